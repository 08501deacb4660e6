use crate::github::types::Repository;
use crate::ui::theme;
use ratatui::{
    buffer::Buffer as Buf,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

const PLACEHOLDER: &str = "\u{2014}";

/// The four detail fields, verbatim from the stored repository. A lookup
/// miss degrades to placeholders for every field instead of failing.
pub fn detail_fields(repo: Option<&Repository>) -> [(&'static str, String); 4] {
    match repo {
        Some(repo) => [
            ("Repository", repo.name.clone()),
            (
                "Description",
                repo.description.clone().unwrap_or_default(),
            ),
            ("Forks", repo.forks.to_string()),
            ("Updated", repo.updated_at.clone()),
        ],
        None => [
            ("Repository", PLACEHOLDER.to_string()),
            ("Description", PLACEHOLDER.to_string()),
            ("Forks", PLACEHOLDER.to_string()),
            ("Updated", PLACEHOLDER.to_string()),
        ],
    }
}

pub struct DetailPanel<'a> {
    pub repo: Option<&'a Repository>,
}

impl<'a> Widget for DetailPanel<'a> {
    fn render(self, area: Rect, buf: &mut Buf) {
        let block = Block::default()
            .title(" Repository ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::BORDER_COLOR));
        let inner = block.inner(area);
        block.render(area, buf);

        let label_style = Style::default().fg(theme::ACCENT);

        for (i, (label, value)) in detail_fields(self.repo).iter().enumerate() {
            if i >= inner.height as usize {
                break;
            }
            let line = Line::from(vec![
                Span::styled(format!(" {label:<12}"), label_style),
                Span::raw(value.clone()),
            ]);
            buf.set_line(inner.x, inner.y + i as u16, &line, inner.width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_render_stored_values_verbatim() {
        let repo = Repository {
            id: 42,
            name: "Alpha".to_string(),
            description: Some("Desc".to_string()),
            forks: 3,
            updated_at: "2020-01-01T00:00:00Z".to_string(),
            contributors_url: "https://api.example.test/repos/org/Alpha/contributors"
                .to_string(),
        };
        let fields = detail_fields(Some(&repo));
        let values: Vec<&str> = fields.iter().map(|(_, v)| v.as_str()).collect();

        assert_eq!(values, vec!["Alpha", "Desc", "3", "2020-01-01T00:00:00Z"]);
    }

    #[test]
    fn test_missing_repository_degrades_to_placeholders() {
        let fields = detail_fields(None);
        assert_eq!(fields.len(), 4);
        for (_, value) in &fields {
            assert_eq!(value, PLACEHOLDER);
        }
    }

    #[test]
    fn test_null_description_renders_empty() {
        let repo = Repository {
            id: 1,
            name: "x".to_string(),
            description: None,
            forks: 0,
            updated_at: "2020-01-01T00:00:00Z".to_string(),
            contributors_url: "https://api.example.test/x".to_string(),
        };
        let fields = detail_fields(Some(&repo));
        assert_eq!(fields[1].1, "");
    }
}
