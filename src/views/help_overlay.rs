use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph},
};

use crate::app::{App, View};
use crate::help::{HelpItem, detail_overlay_items, results_overlay_items};
use crate::keys::{Keymap, detail_keymap, global_keymap, results_keymap};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    if !app.show_help {
        return;
    }

    let buf = frame.buffer_mut();
    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            let cell = &mut buf[(x, y)];
            cell.set_style(cell.style().add_modifier(Modifier::DIM));
        }
    }

    let theme = &app.theme;

    let (items, keymap): (Vec<HelpItem>, Keymap) = match &app.view {
        View::Search => (
            results_overlay_items(),
            global_keymap().extend(results_keymap()),
        ),
        View::Detail { .. } => (
            detail_overlay_items(),
            global_keymap().extend(detail_keymap()),
        ),
    };

    let formatted: Vec<(String, &str)> = items
        .iter()
        .filter_map(|item| item.format_for_overlay(&keymap))
        .collect();

    let key_width = formatted.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    let label_width = formatted.iter().map(|(_, l)| l.len()).max().unwrap_or(0);
    // Borders (2) and one column of padding each side (4).
    let popup_width = (key_width + 2 + label_width + 6) as u16;
    let popup_height = (formatted.len() + 4) as u16;

    let popup_width = popup_width.min(area.width.saturating_sub(4));
    let popup_height = popup_height.min(area.height.saturating_sub(4));
    let popup_area = centered_rect(popup_width, popup_height, area);

    frame.render_widget(Clear, popup_area);

    let alt_row_style = Style::default().bg(theme.selection_bg);
    let lines: Vec<Line> = formatted
        .iter()
        .enumerate()
        .map(|(i, (keys, label))| {
            let base_style = if i % 2 == 1 {
                alt_row_style
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::styled(
                    format!("{:>width$}", keys, width = key_width),
                    theme.dim_style().patch(base_style),
                ),
                Span::styled("  ", base_style),
                Span::styled(
                    format!("{:<width$}", label, width = label_width),
                    theme.title_style().patch(base_style),
                ),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.focus_border_style())
            .title("Keys")
            .padding(Padding::uniform(1)),
    );

    frame.render_widget(paragraph, popup_area);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestAppBuilder;
    use crate::views::tests::render_to_string;

    #[test]
    fn results_overlay_lists_actions() {
        let app = TestAppBuilder::new().show_help().build();

        let output = render_to_string(80, 24, |frame| {
            render(frame, &app, frame.area());
        });

        assert!(output.contains("Keys"));
        assert!(output.contains("open details"));
        assert!(output.contains("run search again"));
    }

    #[test]
    fn detail_overlay_lists_back() {
        let app = TestAppBuilder::new()
            .view(View::Detail {
                imdb_id: "tt0096895".to_string(),
                result_index: 0,
                result_scroll: 0,
            })
            .show_help()
            .build();

        let output = render_to_string(80, 24, |frame| {
            render(frame, &app, frame.area());
        });

        assert!(output.contains("back to results"));
        assert!(!output.contains("run search again"));
    }

    #[test]
    fn hidden_when_closed() {
        let app = TestAppBuilder::new().build();

        let output = render_to_string(80, 24, |frame| {
            render(frame, &app, frame.area());
        });

        assert!(output.trim().is_empty());
    }
}
