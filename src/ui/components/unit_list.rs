use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::catalog::Unit;
use crate::ui::theme::{Theme, ThemeColors};

/// Unit picker. In exercise mode a final "all units" challenge row is
/// appended after the catalog units.
pub struct UnitList<'a> {
    units: &'a [Unit],
    selected: usize,
    with_challenge_row: bool,
    theme: &'a Theme,
}

impl<'a> UnitList<'a> {
    pub fn new(
        units: &'a [Unit],
        selected: usize,
        with_challenge_row: bool,
        theme: &'a Theme,
    ) -> Self {
        Self {
            units,
            selected,
            with_challenge_row,
            theme,
        }
    }
}

impl Widget for UnitList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" 選一個單元 Pick a unit ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines: Vec<Line> = vec![Line::from("")];
        for (i, unit) in self.units.iter().enumerate() {
            let row = format!(
                "  {} {}  ({} words)",
                unit.icon,
                unit.title,
                unit.words.len()
            );
            lines.push(row_line(row, i == self.selected, unit.color.as_str(), colors));
            lines.push(Line::from(""));
        }
        if self.with_challenge_row {
            let row = "  ⭐ 全部單元挑戰 All-units challenge".to_string();
            lines.push(row_line(
                row,
                self.selected == self.units.len(),
                &self.theme.colors.star,
                colors,
            ));
        }

        Paragraph::new(lines).render(inner, buf);
    }
}

fn row_line(text: String, selected: bool, unit_color: &str, colors: &ThemeColors) -> Line<'static> {
    let marker = if selected { "▶" } else { " " };
    let style = if selected {
        Style::default()
            .fg(ThemeColors::parse_color(unit_color))
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(colors.fg())
    };
    Line::from(vec![
        Span::styled(format!(" {marker}"), Style::default().fg(colors.accent())),
        Span::styled(text, style),
    ])
}
