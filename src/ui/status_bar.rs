use crate::github::types::RateWindow;
use crate::ui::theme;
use chrono::{DateTime, Local, TimeZone, Timelike};
use ratatui::{
    buffer::Buffer as Buf,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

fn clock_for<Tz: TimeZone>(dt: &DateTime<Tz>) -> String {
    format!("{:02}:{:02}", dt.hour(), dt.minute())
}

/// Local wall-clock `HH:MM` for a quota reset given in epoch seconds.
pub fn reset_clock(reset_epoch: i64) -> String {
    Local
        .timestamp_opt(reset_epoch, 0)
        .earliest()
        .map(|dt| clock_for(&dt))
        .unwrap_or_else(|| "--:--".to_string())
}

pub struct StatusBar<'a> {
    pub org: &'a str,
    pub repo_count: usize,
    pub last_sync: &'a str,
    pub rate: Option<RateWindow>,
}

impl<'a> Widget for StatusBar<'a> {
    fn render(self, area: Rect, buf: &mut Buf) {
        let bg = Style::default().bg(theme::STATUS_BG);
        for x in area.x..area.right() {
            buf[(x, area.y)].set_style(bg);
        }

        let separator = Span::styled(
            "\u{2502}",
            Style::default().fg(theme::SEPARATOR).bg(theme::STATUS_BG),
        );

        let mut spans = Vec::new();

        spans.push(Span::styled(
            format!(" {} ", self.org),
            Style::default().fg(theme::ACCENT).bg(theme::STATUS_BG),
        ));
        spans.push(separator.clone());
        spans.push(Span::styled(
            format!(" {} repositories ", self.repo_count),
            Style::default().bg(theme::STATUS_BG),
        ));
        spans.push(separator.clone());

        let sync_style = if self.last_sync.starts_with("error") {
            Style::default().fg(theme::ERROR_FG).bg(theme::STATUS_BG)
        } else {
            Style::default().bg(theme::STATUS_BG)
        };
        spans.push(Span::styled(
            format!(" synced: {} ", self.last_sync),
            sync_style,
        ));

        if let Some(rate) = self.rate {
            spans.push(separator.clone());
            spans.push(Span::styled(
                format!(" API: {} left ", rate.remaining),
                Style::default().bg(theme::STATUS_BG),
            ));
            spans.push(separator);
            spans.push(Span::styled(
                format!(" new {} at {} ", rate.limit, reset_clock(rate.reset)),
                Style::default().fg(theme::DIM_TEXT).bg(theme::STATUS_BG),
            ));
        }

        let line = Line::from(spans);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_clock_zero_pads_hours_and_minutes() {
        // 2023-11-15 03:05:00 UTC
        let dt = Utc.timestamp_opt(1_700_017_500, 0).unwrap();
        assert_eq!(clock_for(&dt), "03:05");
    }

    #[test]
    fn test_clock_for_double_digit_components() {
        // 2023-11-14 22:13:20 UTC
        let dt = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        assert_eq!(clock_for(&dt), "22:13");
    }

    #[test]
    fn test_reset_clock_is_well_formed() {
        let out = reset_clock(1_700_000_000);
        let chars: Vec<char> = out.chars().collect();
        assert_eq!(chars.len(), 5);
        assert_eq!(chars[2], ':');
        for i in [0, 1, 3, 4] {
            assert!(chars[i].is_ascii_digit());
        }
    }
}
