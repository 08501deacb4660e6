use crate::github::store::RepoStore;
use crate::ui::theme;
use ratatui::{
    buffer::Buffer as Buf,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

pub struct RepoPanel<'a> {
    pub store: &'a RepoStore,
    pub selected: usize,
    pub scroll: usize,
    pub focused: bool,
}

/// One selectable row: `value` is the repository id the rest of the app
/// keys on, `label` is what the user sees.
struct RepoRow {
    #[allow(dead_code)]
    value: String,
    label: String,
}

impl<'a> Widget for RepoPanel<'a> {
    fn render(self, area: Rect, buf: &mut Buf) {
        let border_style = if self.focused {
            Style::default().fg(theme::ACTIVE_BORDER)
        } else {
            Style::default().fg(theme::BORDER_COLOR)
        };

        let block = Block::default()
            .title(" Repositories ")
            .borders(Borders::ALL)
            .border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        if self.store.is_empty() {
            let line = Line::from(Span::styled(
                " loading\u{2026}",
                Style::default().fg(theme::DIM_TEXT),
            ));
            buf.set_line(inner.x, inner.y, &line, inner.width);
            return;
        }

        let rows = self.build_rows();
        let visible = inner.height as usize;

        for (i, row) in rows.iter().skip(self.scroll).take(visible).enumerate() {
            let y = inner.y + i as u16;
            let abs_idx = self.scroll + i;
            let is_selected = abs_idx == self.selected;

            let style = if is_selected {
                Style::default().bg(theme::SELECTED_BG)
            } else {
                Style::default()
            };
            let line = Line::from(Span::styled(format!(" {}", row.label), style));
            buf.set_line(inner.x, y, &line, inner.width);

            if is_selected {
                for x in inner.x..(inner.x + inner.width) {
                    buf[(x, y)].set_style(Style::default().bg(theme::SELECTED_BG));
                }
            }
        }
    }
}

impl<'a> RepoPanel<'a> {
    fn build_rows(&self) -> Vec<RepoRow> {
        self.store
            .iter()
            .map(|repo| RepoRow {
                value: repo.id.to_string(),
                label: repo.name.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    fn panel(store: &RepoStore) -> RepoPanel<'_> {
        RepoPanel {
            store,
            selected: 0,
            scroll: 0,
            focused: true,
        }
    }

    #[test]
    fn test_one_row_per_store_entry_in_order() {
        let store = RepoStore::from_repositories(vec![
            make_repo(3, "gamma"),
            make_repo(1, "alpha"),
            make_repo(2, "beta"),
        ]);
        let rows = panel(&store).build_rows();

        assert_eq!(rows.len(), 3);
        let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["gamma", "alpha", "beta"]);
        let values: Vec<&str> = rows.iter().map(|r| r.value.as_str()).collect();
        assert_eq!(values, vec!["3", "1", "2"]);
    }

    #[test]
    fn test_empty_store_builds_no_rows() {
        let store = RepoStore::default();
        assert!(panel(&store).build_rows().is_empty());
    }
}
