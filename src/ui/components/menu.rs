use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::ui::theme::Theme;

pub struct MenuItem {
    pub key: char,
    pub icon: &'static str,
    pub label: &'static str,
    pub hint: &'static str,
}

/// Mode picker shown on launch. The rows are data so the key handler and
/// the renderer agree on their order.
pub struct Menu<'a> {
    pub items: Vec<MenuItem>,
    pub selected: usize,
    pub theme: &'a Theme,
}

impl<'a> Menu<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self {
            items: vec![
                MenuItem {
                    key: '1',
                    icon: "📖",
                    label: "學習 Learn",
                    hint: "Browse a unit card by card, with audio",
                },
                MenuItem {
                    key: '2',
                    icon: "🎯",
                    label: "練習 Quiz",
                    hint: "Match the spoken word to its picture",
                },
                MenuItem {
                    key: 'q',
                    icon: "👋",
                    label: "離開 Quit",
                    hint: "See you next time!",
                },
            ],
            selected: 0,
            theme,
        }
    }

    pub fn next(&mut self) {
        self.selected = (self.selected + 1) % self.items.len();
    }

    pub fn prev(&mut self) {
        self.selected = (self.selected + self.items.len() - 1) % self.items.len();
    }
}

impl Widget for &Menu<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "🦜 wordling 🦜",
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "小小單字樂園 — vocabulary for kids",
                Style::default().fg(colors.fg()),
            )),
            Line::from(""),
            Line::from(""),
        ];

        for (i, item) in self.items.iter().enumerate() {
            let row = format!("{} [{}] {}", item.icon, item.key, item.label);
            // Selected row gets a highlight band, like the karaoke character
            let line = if i == self.selected {
                Line::from(Span::styled(
                    format!("▶  {row}  ◀"),
                    Style::default()
                        .fg(colors.highlight_fg())
                        .bg(colors.highlight_bg())
                        .add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(Span::styled(row, Style::default().fg(colors.fg())))
            };
            lines.push(line);
            lines.push(Line::from(""));
        }

        lines.push(Line::from(Span::styled(
            self.items[self.selected].hint,
            Style::default().fg(colors.pending()),
        )));

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(inner, buf);
    }
}
