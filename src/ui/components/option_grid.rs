use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::session::quiz::{AnswerState, Session};
use crate::ui::theme::Theme;

/// The quiz question: prompt word on top (karaoke-highlighted after the
/// answer), numbered emoji options below. Once answered, the correct option
/// turns green and a wrong pick turns red.
pub struct OptionGrid<'a> {
    session: &'a Session,
    theme: &'a Theme,
}

impl<'a> OptionGrid<'a> {
    pub fn new(session: &'a Session, theme: &'a Theme) -> Self {
        Self { session, theme }
    }

    fn prompt_line(&self) -> Line<'static> {
        let colors = &self.theme.colors;
        let word = self.session.current();
        let mut spans: Vec<Span> = Vec::new();
        for (i, ch) in word.text.chars().enumerate() {
            let style = if self.session.highlight() == Some(i) {
                Style::default()
                    .fg(colors.highlight_fg())
                    .bg(colors.highlight_bg())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD)
            };
            spans.push(Span::styled(format!(" {ch} "), style));
        }
        Line::from(spans)
    }

    fn option_cell(&self, index: usize) -> Paragraph<'static> {
        let colors = &self.theme.colors;
        let option = &self.session.options()[index];
        let answered = self.session.answer_state() != AnswerState::Unanswered;
        let is_correct = option.id == self.session.current().id;
        let was_chosen = self.session.chosen() == Some(option.id.as_str());

        let (border_style, caption) = if answered && is_correct {
            (Style::default().fg(colors.correct()), "✓".to_string())
        } else if answered && was_chosen {
            (Style::default().fg(colors.incorrect()), "✗".to_string())
        } else if answered {
            (Style::default().fg(colors.accent_dim()), String::new())
        } else {
            (Style::default().fg(colors.border()), String::new())
        };

        let lines = vec![
            Line::from(Span::styled(
                format!("[{}]", index + 1),
                Style::default().fg(colors.accent()),
            )),
            Line::from(""),
            Line::from(option.emoji.clone()),
            Line::from(""),
            Line::from(Span::styled(caption, border_style)),
        ];

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(
                Block::bordered()
                    .border_style(border_style)
                    .style(Style::default().bg(colors.bg())),
            )
    }
}

impl Widget for OptionGrid<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Min(7),
            ])
            .split(area);

        let progress = format!(
            " 第 {} 題 / {}   得分 {}",
            self.session.position() + 1,
            self.session.len(),
            self.session.score()
        );
        let header = vec![
            Line::from(Span::styled(progress, Style::default().fg(colors.pending()))),
            Line::from(""),
            self.prompt_line(),
        ];
        Paragraph::new(header)
            .alignment(Alignment::Center)
            .render(layout[0], buf);

        // Up to 8 options in rows of four
        let count = self.session.options().len();
        let rows = count.div_ceil(4).max(1);
        let row_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Min(7); rows])
            .split(layout[1]);

        for row in 0..rows {
            let start = row * 4;
            let in_row = (count - start).min(4);
            let cells = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Percentage(25); 4])
                .split(row_layout[row]);
            for i in 0..in_row {
                self.option_cell(start + i).render(cells[i], buf);
            }
        }
    }
}
