use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::common::render_error;
use super::spinner::spinner_frame;
use super::status_bar::StatusBar;
use crate::api::MovieDetail;
use crate::app::App;
use crate::help::detail_help;
use crate::keys::{detail_keymap, global_keymap};
use crate::loading::OperationKind;
use crate::theme::ResolvedTheme;

const LABEL_WIDTH: usize = 10;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).split(area);

    render_body(frame, app, chunks[0]);
    render_status_bar(frame, app, chunks[1]);
}

fn render_body(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    if let Some(err) = &app.error {
        render_error(frame, err, theme, area);
        return;
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style());

    let Some(detail) = app.store.detail() else {
        let line = if app.is_loading(OperationKind::Detail) {
            Line::from(vec![
                Span::styled(
                    format!("{} ", spinner_frame(app.in_flight.last_started())),
                    theme.spinner_style(),
                ),
                Span::styled("Loading...", theme.dim_style()),
            ])
        } else {
            Line::from(Span::styled(
                "No details available. Press Esc to go back.",
                theme.dim_style(),
            ))
        };
        frame.render_widget(Paragraph::new(line).block(block), area);
        return;
    };

    let block = block.title(format!(" {} ", detail.imdb_id));
    let width = block.inner(area).width as usize;
    let lines = detail_lines(detail, width, theme);
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .scroll((app.detail_scroll, 0)),
        area,
    );
}

/// The record laid out for a pane `width` columns wide.
pub fn detail_lines(
    detail: &MovieDetail,
    width: usize,
    theme: &ResolvedTheme,
) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(vec![
            Span::styled(detail.title.clone(), theme.title_style()),
            Span::styled(
                format!(" ({})", detail.year),
                Style::default().fg(theme.movie_year),
            ),
        ]),
        Line::from(""),
    ];

    let fields = [
        ("Genre", &detail.genre),
        ("Director", &detail.director),
        ("Writer", &detail.writer),
        ("Actors", &detail.actors),
        ("Runtime", &detail.runtime),
        ("Rated", &detail.rated),
        ("Rating", &detail.imdb_rating),
    ];
    let value_width = width.saturating_sub(LABEL_WIDTH).max(10);
    for (label, value) in fields {
        let value = value.as_deref().unwrap_or("n/a");
        for (i, chunk) in textwrap::wrap(value, value_width).into_iter().enumerate() {
            let label = if i == 0 { label } else { "" };
            lines.push(Line::from(vec![
                Span::styled(format!("{:<w$}", label, w = LABEL_WIDTH), theme.label_style()),
                Span::styled(chunk.into_owned(), Style::default().fg(theme.foreground)),
            ]));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Plot", theme.label_style())));
    let plot = detail.plot.as_deref().unwrap_or("No plot available.");
    for chunk in textwrap::wrap(plot, width.max(10)) {
        lines.push(Line::from(Span::styled(
            chunk.into_owned(),
            Style::default().fg(theme.foreground),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(format!("{:<w$}", "Poster", w = LABEL_WIDTH), theme.label_style()),
        Span::styled(
            detail.poster.clone().unwrap_or_else(|| "none".to_string()),
            theme.dim_style(),
        ),
    ]));
    lines.push(Line::from(vec![
        Span::styled(format!("{:<w$}", "IMDb", w = LABEL_WIDTH), theme.label_style()),
        Span::styled(detail.imdb_url(), theme.dim_style()),
    ]));

    lines
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = detail_help().format(&global_keymap().extend(detail_keymap()));
    let mut bar = StatusBar::new(&app.theme).label("Detail").help(help_text);
    if app.is_loading(OperationKind::Detail) {
        bar = bar.loading("Loading details...");
    }
    bar.render(frame, area);
}
