use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;
use crate::loading::OperationKind;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let block = Block::default()
        .title(" Debug ")
        .borders(Borders::ALL)
        .border_style(theme.dim_style());

    let mut lines = Vec::new();

    // In-flight counts per kind, then the search cursor.
    let mut header = vec![Span::styled("In flight: ", theme.dim_style())];
    for &kind in OperationKind::all() {
        let count = app.in_flight.count(kind);
        let style = if count > 0 {
            theme.spinner_style()
        } else {
            Style::default().fg(theme.foreground)
        };
        header.push(Span::styled(format!("{}={} ", kind.label(), count), style));
    }
    let query = app.search.query();
    header.push(Span::styled(
        format!(
            "| term={:?} page={}{} more={:?} gen={} trigger={}",
            query.term,
            query.page,
            if app.search.is_page_in_flight() { "*" } else { "" },
            app.search.more(),
            app.search.generation(),
            if app.trigger.is_observing() { "on" } else { "off" },
        ),
        theme.dim_style(),
    ));
    lines.push(Line::from(header));

    for task in &app.debug.running_tasks {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  [{}:{}] ", task.id, task.kind.label()),
                theme.dim_style(),
            ),
            Span::styled(&task.description, Style::default().fg(theme.foreground)),
            Span::styled(
                format!(" ({:.1?})", task.started_at.elapsed()),
                Style::default().fg(theme.movie_year),
            ),
        ]));
    }

    let available_lines = area.height.saturating_sub(3) as usize;
    let log_lines = available_lines.saturating_sub(app.debug.running_tasks.len());

    for entry in app.debug.log.iter().rev().take(log_lines) {
        lines.push(Line::from(Span::styled(
            format!("  {}", entry.message),
            theme.dim_style(),
        )));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
