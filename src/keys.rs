use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Focus, Message, View};

/// A declarative keybinding map that can be composed and extended.
#[derive(Clone)]
pub struct Keymap {
    bindings: Vec<(KeyCode, KeyModifiers, Message)>,
}

impl Keymap {
    pub const fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    pub fn bind(mut self, code: KeyCode, message: Message) -> Self {
        self.bindings.push((code, KeyModifiers::NONE, message));
        self
    }

    pub fn bind_ctrl(mut self, code: KeyCode, message: Message) -> Self {
        self.bindings.push((code, KeyModifiers::CONTROL, message));
        self
    }

    /// Later bindings take precedence over earlier ones.
    pub fn get(&self, event: &KeyEvent) -> Option<Message> {
        self.bindings
            .iter()
            .rev()
            .find(|(code, mods, _)| *code == event.code && event.modifiers.contains(*mods))
            .map(|(_, _, msg)| msg.clone())
    }

    pub fn extend(mut self, other: Self) -> Self {
        self.bindings.extend(other.bindings);
        self
    }

    /// First key bound to `message`, for help text.
    pub fn find_key(&self, message: &Message) -> Option<(KeyCode, KeyModifiers)> {
        self.bindings
            .iter()
            .find(|(_, _, msg)| msg == message)
            .map(|(code, mods, _)| (*code, *mods))
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new()
    }
}

pub fn format_key(code: KeyCode, mods: KeyModifiers) -> String {
    let key_str = match code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        KeyCode::Backspace => "Bksp".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::F(n) => format!("F{n}"),
        _ => "?".to_string(),
    };
    if mods.contains(KeyModifiers::CONTROL) {
        format!("C-{key_str}")
    } else {
        key_str
    }
}

/// Keys that work whenever the search box isn't being typed into.
pub fn global_keymap() -> Keymap {
    Keymap::new()
        .bind(KeyCode::Char('q'), Message::Quit)
        .bind_ctrl(KeyCode::Char('c'), Message::Quit)
        .bind(KeyCode::Char('`'), Message::ToggleDebug)
}

/// While typing, everything unbound here is edited into the search box.
pub fn input_keymap() -> Keymap {
    Keymap::new()
        .bind(KeyCode::Enter, Message::SubmitSearch)
        .bind(KeyCode::Esc, Message::FocusResults)
        .bind(KeyCode::Tab, Message::FocusResults)
        .bind(KeyCode::Down, Message::FocusResults)
        .bind_ctrl(KeyCode::Char('c'), Message::Quit)
}

fn help_overlay_keymap() -> Keymap {
    Keymap::new()
        .bind(KeyCode::Char('?'), Message::ToggleHelp)
        .bind(KeyCode::Esc, Message::ToggleHelp)
        .bind(KeyCode::Char('q'), Message::ToggleHelp)
        .bind_ctrl(KeyCode::Char('c'), Message::ToggleHelp)
}

fn navigation_keymap() -> Keymap {
    Keymap::new()
        .bind(KeyCode::Char('j'), Message::SelectNext)
        .bind(KeyCode::Down, Message::SelectNext)
        .bind(KeyCode::Char('k'), Message::SelectPrev)
        .bind(KeyCode::Up, Message::SelectPrev)
        .bind(KeyCode::Char('g'), Message::SelectFirst)
        .bind(KeyCode::Char('G'), Message::SelectLast)
        .bind_ctrl(KeyCode::Char('d'), Message::PageDown)
        .bind_ctrl(KeyCode::Char('u'), Message::PageUp)
        .bind(KeyCode::Char('o'), Message::OpenImdb)
        .bind(KeyCode::Char('p'), Message::OpenPoster)
        .bind(KeyCode::Char('?'), Message::ToggleHelp)
}

pub fn results_keymap() -> Keymap {
    navigation_keymap()
        .bind(KeyCode::Char('/'), Message::FocusInput)
        .bind(KeyCode::Char('i'), Message::FocusInput)
        .bind(KeyCode::Enter, Message::OpenDetail)
        .bind(KeyCode::Char('l'), Message::OpenDetail)
        .bind(KeyCode::Char('r'), Message::Rerun)
}

/// In the detail view j/k scroll the record instead of moving a selection.
pub fn detail_keymap() -> Keymap {
    navigation_keymap()
        .bind(KeyCode::Esc, Message::Back)
        .bind(KeyCode::Char('h'), Message::Back)
        .bind(KeyCode::Backspace, Message::Back)
}

pub fn handle_key(key: KeyEvent, app: &App) -> Option<Message> {
    if app.show_help {
        return help_overlay_keymap().get(&key);
    }

    if matches!(app.view, View::Search) && app.focus == Focus::Input {
        return Some(input_keymap().get(&key).unwrap_or(Message::EditInput(key)));
    }

    if let Some(msg) = global_keymap().get(&key) {
        return Some(msg);
    }

    match app.view {
        View::Search => results_keymap().get(&key),
        View::Detail { .. } => detail_keymap().get(&key),
    }
}
