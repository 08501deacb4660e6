use crate::github::types::Contributor;
use crate::ui::{theme, truncate_with_ellipsis};
use ratatui::{
    buffer::Buffer as Buf,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

pub struct ContributorPanel<'a> {
    pub contributors: &'a [Contributor],
    pub selected: usize,
    pub scroll: usize,
    pub focused: bool,
    pub loading: bool,
}

struct ContributorEntry {
    label: String,
    avatar_url: String,
}

impl<'a> Widget for ContributorPanel<'a> {
    fn render(self, area: Rect, buf: &mut Buf) {
        let border_style = if self.focused {
            Style::default().fg(theme::ACTIVE_BORDER)
        } else {
            Style::default().fg(theme::BORDER_COLOR)
        };

        let block = Block::default()
            .title(" Contributors ")
            .borders(Borders::ALL)
            .border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        if self.contributors.is_empty() {
            let text = if self.loading {
                " fetching contributors\u{2026}"
            } else {
                " select a repository"
            };
            let line = Line::from(Span::styled(text, Style::default().fg(theme::DIM_TEXT)));
            buf.set_line(inner.x, inner.y, &line, inner.width);
            return;
        }

        let entries = self.build_entries();
        let visible = inner.height as usize;
        let avatar_width = (inner.width as usize / 3).min(40);

        for (i, entry) in entries.iter().skip(self.scroll).take(visible).enumerate() {
            let y = inner.y + i as u16;
            let abs_idx = self.scroll + i;
            let is_selected = abs_idx == self.selected;

            let label_style = if is_selected {
                Style::default()
                    .bg(theme::SELECTED_BG)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let avatar_style = Style::default().fg(theme::DIM_TEXT);

            let line = Line::from(vec![
                Span::styled(format!(" {}", entry.label), label_style),
                Span::styled(
                    format!("  {}", truncate_with_ellipsis(&entry.avatar_url, avatar_width)),
                    avatar_style,
                ),
            ]);
            buf.set_line(inner.x, y, &line, inner.width);

            if is_selected {
                for x in inner.x..(inner.x + inner.width) {
                    buf[(x, y)].set_style(Style::default().bg(theme::SELECTED_BG));
                }
            }
        }
    }
}

impl<'a> ContributorPanel<'a> {
    fn build_entries(&self) -> Vec<ContributorEntry> {
        self.contributors
            .iter()
            .map(|c| ContributorEntry {
                label: format!("{}  {}", c.login, c.contributions),
                avatar_url: c.avatar_url.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    fn panel(contributors: &[Contributor]) -> ContributorPanel<'_> {
        ContributorPanel {
            contributors,
            selected: 0,
            scroll: 0,
            focused: false,
            loading: false,
        }
    }

    #[test]
    fn test_one_entry_per_contributor_with_login_and_count() {
        let contributors = vec![Contributor {
            login: "bob".to_string(),
            avatar_url: "u".to_string(),
            contributions: 7,
        }];
        let entries = panel(&contributors).build_entries();

        assert_eq!(entries.len(), 1);
        assert!(entries[0].label.contains("bob"));
        assert!(entries[0].label.contains('7'));
        assert_eq!(entries[0].avatar_url, "u");
    }

    #[test]
    fn test_entries_keep_response_order() {
        let contributors = vec![
            make_contributor("zoe", 100),
            make_contributor("amy", 2),
        ];
        let entries = panel(&contributors).build_entries();
        assert!(entries[0].label.starts_with("zoe"));
        assert!(entries[1].label.starts_with("amy"));
    }
}
