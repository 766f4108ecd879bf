use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::session::quiz::Session;
use crate::ui::theme::Theme;

/// End-of-quiz summary: star rating, score, and the words to review.
pub struct ResultPanel<'a> {
    session: &'a Session,
    theme: &'a Theme,
}

impl<'a> ResultPanel<'a> {
    pub fn new(session: &'a Session, theme: &'a Theme) -> Self {
        Self { session, theme }
    }
}

impl Widget for ResultPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" 結果 Result ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let stars = self.session.stars();
        let star_row: String = (0..3)
            .map(|i| if i < stars { "★ " } else { "☆ " })
            .collect();

        let praise = match stars {
            3 => "完美！Perfect!",
            2 => "很棒！Great job!",
            1 => "不錯喔！Keep going!",
            _ => "再試一次吧！Try again!",
        };

        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                star_row,
                Style::default().fg(colors.star()).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                format!("{} / {}", self.session.score(), self.session.len()),
                Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(praise, Style::default().fg(colors.accent()))),
        ];

        if !self.session.missed().is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "要多練習的字 Words to review:",
                Style::default().fg(colors.pending()),
            )));
            for word in self.session.missed() {
                lines.push(Line::from(Span::styled(
                    format!("{}  {}", word.emoji, word.text),
                    Style::default().fg(colors.incorrect()),
                )));
            }
        }

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(inner, buf);
    }
}
