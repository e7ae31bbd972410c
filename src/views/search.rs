use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use super::common::{render_error, truncate};
use super::spinner::spinner_frame;
use super::status_bar::StatusBar;
use crate::api::MovieSummary;
use crate::app::{App, Focus};
use crate::help::{results_help, search_input_help};
use crate::keys::{global_keymap, input_keymap, results_keymap};
use crate::loading::OperationKind;
use crate::search::MoreState;
use crate::theme::ResolvedTheme;

const PLACEHOLDER: &str = "e.g. Batman";

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Length(3), // Search box
        Constraint::Min(0),    // Results
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    render_input(frame, app, chunks[0]);
    render_results(frame, app, chunks[1]);
    render_status_bar(frame, app, chunks[2]);
}

fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let focused = app.focus == Focus::Input;

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(if focused {
            theme.focus_border_style()
        } else {
            theme.border_style()
        })
        .title(" Search OMDb ");
    if app.in_flight.should_show_spinner() {
        block = block.title_top(
            Line::from(Span::styled(
                format!(" {} ", spinner_frame(app.in_flight.last_started())),
                theme.spinner_style(),
            ))
            .right_aligned(),
        );
    }
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let value = app.input.value();
    let text = if value.is_empty() && focused {
        Span::styled(PLACEHOLDER, theme.dim_style())
    } else {
        Span::raw(value)
    };
    let scroll = app.input.visual_scroll(inner.width as usize);
    frame.render_widget(
        Paragraph::new(Line::from(text)).scroll((0, scroll as u16)),
        inner,
    );

    if focused {
        let cursor_x = app.input.visual_cursor().saturating_sub(scroll);
        frame.set_cursor_position(Position::new(inner.x + cursor_x as u16, inner.y));
    }
}

fn render_results(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    if let Some(err) = &app.error {
        render_error(frame, err, theme, area);
        return;
    }

    let border_style = if app.focus == Focus::Results {
        theme.focus_border_style()
    } else {
        theme.border_style()
    };
    let term = &app.search.query().term;
    let title = if app.search.has_searched() {
        format!(" Results for \"{}\" ", term)
    } else {
        " Results ".to_string()
    };
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title);

    if app.store.is_empty() {
        let message = if !app.search.has_searched() {
            "Type a title and press Enter to search.".to_string()
        } else if app.is_loading(OperationKind::Search) {
            "Searching...".to_string()
        } else {
            format!("No results for \"{}\".", term)
        };
        frame.render_widget(
            Paragraph::new(Span::styled(message, theme.dim_style())).block(block),
            area,
        );
        return;
    }

    if app.search.more() == MoreState::Exhausted {
        block = block.title_bottom(
            Line::from(Span::styled(" end of results ", theme.dim_style())).right_aligned(),
        );
    } else if app.is_loading(OperationKind::Search) {
        block = block.title_bottom(
            Line::from(Span::styled(" loading more... ", theme.spinner_style())).right_aligned(),
        );
    }

    // Room for rank, title and year on the first line.
    let title_width = (area.width as usize).saturating_sub(20);
    let items: Vec<ListItem> = app
        .store
        .results()
        .iter()
        .enumerate()
        .map(|(i, movie)| movie_to_list_item(movie, i + 1, title_width, theme))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(theme.selection_style())
        .highlight_symbol("▶ ");

    let selected = (app.focus == Focus::Results).then_some(app.selected_index);
    let mut state = ListState::default()
        .with_offset(app.scroll_offset)
        .with_selected(selected);
    frame.render_stateful_widget(list, area, &mut state);
}

fn movie_to_list_item(
    movie: &MovieSummary,
    rank: usize,
    title_width: usize,
    theme: &ResolvedTheme,
) -> ListItem<'static> {
    let title_line = Line::from(vec![
        Span::styled(format!("{:>3}. ", rank), theme.dim_style()),
        Span::styled(truncate(&movie.title, title_width), theme.title_style()),
        Span::styled(
            format!(" ({})", movie.year),
            Style::default().fg(theme.movie_year),
        ),
    ]);

    let poster = if movie.poster.is_some() {
        "poster"
    } else {
        "no poster"
    };
    let meta_line = Line::from(vec![
        Span::raw("     "),
        Span::styled(
            movie.kind.clone(),
            Style::default().fg(theme.movie_kind),
        ),
        Span::styled(format!(" | {} | {}", movie.imdb_id, poster), theme.dim_style()),
    ]);

    ListItem::new(vec![title_line, meta_line])
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = match app.focus {
        Focus::Input => search_input_help().format(&input_keymap()),
        Focus::Results => results_help().format(&global_keymap().extend(results_keymap())),
    };

    let mut bar = StatusBar::new(&app.theme).label("Search").help(help_text);
    if app.is_loading(OperationKind::Search) {
        let text = if app.search.query().page > 1 {
            format!("Loading page {}...", app.search.query().page)
        } else {
            "Searching...".to_string()
        };
        bar = bar.loading(text);
    }
    if !app.store.is_empty() {
        bar = bar
            .position(app.selected_index + 1, app.store.len())
            .total(app.search.total_results());
    }
    bar.render(frame, area);
}
