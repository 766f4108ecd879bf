use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::session::quiz::{Session, SessionPhase};
use crate::ui::theme::Theme;

/// One flashcard: big pictograph above the word, with the character under
/// playback highlighted karaoke-style. At the end of the unit the card is
/// replaced by the celebration screen.
pub struct LearnCard<'a> {
    session: &'a Session,
    theme: &'a Theme,
}

impl<'a> LearnCard<'a> {
    pub fn new(session: &'a Session, theme: &'a Theme) -> Self {
        Self { session, theme }
    }
}

impl Widget for LearnCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        if self.session.phase() == SessionPhase::Celebration {
            let lines = vec![
                Line::from(""),
                Line::from(""),
                Line::from("🎉 🎊 🎉"),
                Line::from(""),
                Line::from(Span::styled(
                    "太棒了！你學完了這個單元！",
                    Style::default()
                        .fg(colors.star())
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    "You finished the whole unit!",
                    Style::default().fg(colors.fg()),
                )),
            ];
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .render(inner, buf);
            return;
        }

        let word = self.session.current();

        let mut word_spans: Vec<Span> = Vec::new();
        for (i, ch) in word.text.chars().enumerate() {
            let style = if self.session.highlight() == Some(i) {
                Style::default()
                    .fg(colors.highlight_fg())
                    .bg(colors.highlight_bg())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD)
            };
            word_spans.push(Span::styled(format!(" {ch} "), style));
        }

        let progress = format!(
            "{} / {}",
            self.session.position() + 1,
            self.session.len()
        );

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(progress, Style::default().fg(colors.pending()))),
            Line::from(""),
            Line::from(""),
            Line::from(Span::styled(
                word.emoji.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(""),
            Line::from(word_spans),
        ];

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(inner, buf);
    }
}
