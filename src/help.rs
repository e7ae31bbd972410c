//! Help text generated from the keymaps, so it can't drift from the bindings.

use crate::app::Message;
use crate::keys::{Keymap, format_key};

/// One or more related actions shown under a single label.
pub struct HelpItem {
    /// Keys are joined with "/".
    messages: Vec<Message>,
    label: &'static str,
}

impl HelpItem {
    pub fn new(message: Message, label: &'static str) -> Self {
        Self {
            messages: vec![message],
            label,
        }
    }

    /// Paired actions, e.g. j/k for next/prev.
    pub fn pair(first: Message, second: Message, label: &'static str) -> Self {
        Self {
            messages: vec![first, second],
            label,
        }
    }

    fn keys(&self, keymap: &Keymap) -> Option<String> {
        let keys: Vec<String> = self
            .messages
            .iter()
            .filter_map(|msg| {
                keymap
                    .find_key(msg)
                    .map(|(code, mods)| format_key(code, mods))
            })
            .collect();
        (!keys.is_empty()).then(|| keys.join("/"))
    }

    /// `None` if nothing in `keymap` triggers this item.
    pub fn format(&self, keymap: &Keymap) -> Option<String> {
        self.keys(keymap)
            .map(|keys| format!("{}:{}", keys, self.label))
    }

    pub fn format_for_overlay(&self, keymap: &Keymap) -> Option<(String, &'static str)> {
        self.keys(keymap).map(|keys| (keys, self.label))
    }
}

pub struct HelpConfig {
    pub items: Vec<HelpItem>,
}

impl HelpConfig {
    pub fn format(&self, keymap: &Keymap) -> String {
        self.items
            .iter()
            .filter_map(|item| item.format(keymap))
            .collect::<Vec<_>>()
            .join("  ")
    }
}

pub fn search_input_help() -> HelpConfig {
    use Message::{FocusResults, Quit, SubmitSearch};
    HelpConfig {
        items: vec![
            HelpItem::new(SubmitSearch, "search"),
            HelpItem::new(FocusResults, "results"),
            HelpItem::new(Quit, "quit"),
        ],
    }
}

pub fn results_help() -> HelpConfig {
    use Message::{FocusInput, OpenDetail, Quit, ToggleHelp};
    HelpConfig {
        items: vec![
            HelpItem::new(FocusInput, "search"),
            HelpItem::new(OpenDetail, "details"),
            HelpItem::new(ToggleHelp, "help"),
            HelpItem::new(Quit, "quit"),
        ],
    }
}

pub fn detail_help() -> HelpConfig {
    use Message::{Back, OpenImdb, Quit, SelectNext, SelectPrev, ToggleHelp};
    HelpConfig {
        items: vec![
            HelpItem::pair(SelectNext, SelectPrev, "scroll"),
            HelpItem::new(OpenImdb, "imdb"),
            HelpItem::new(Back, "back"),
            HelpItem::new(ToggleHelp, "help"),
            HelpItem::new(Quit, "quit"),
        ],
    }
}

pub fn results_overlay_items() -> Vec<HelpItem> {
    use Message::{
        FocusInput, OpenDetail, OpenImdb, OpenPoster, PageDown, PageUp, Quit, Rerun, SelectFirst,
        SelectLast, SelectNext, SelectPrev, ToggleDebug, ToggleHelp,
    };
    vec![
        HelpItem::pair(SelectNext, SelectPrev, "navigate"),
        HelpItem::pair(SelectFirst, SelectLast, "top/bottom"),
        HelpItem::pair(PageDown, PageUp, "page down/up"),
        HelpItem::new(FocusInput, "edit search"),
        HelpItem::new(OpenDetail, "open details"),
        HelpItem::new(OpenImdb, "open on imdb"),
        HelpItem::new(OpenPoster, "open poster"),
        HelpItem::new(Rerun, "run search again"),
        HelpItem::new(ToggleDebug, "debug"),
        HelpItem::new(Quit, "quit"),
        HelpItem::new(ToggleHelp, "close"),
    ]
}

pub fn detail_overlay_items() -> Vec<HelpItem> {
    use Message::{
        Back, OpenImdb, OpenPoster, Quit, SelectFirst, SelectNext, SelectPrev, ToggleDebug,
        ToggleHelp,
    };
    vec![
        HelpItem::pair(SelectNext, SelectPrev, "scroll"),
        HelpItem::new(SelectFirst, "top"),
        HelpItem::new(OpenImdb, "open on imdb"),
        HelpItem::new(OpenPoster, "open poster"),
        HelpItem::new(Back, "back to results"),
        HelpItem::new(ToggleDebug, "debug"),
        HelpItem::new(Quit, "quit"),
        HelpItem::new(ToggleHelp, "close"),
    ]
}
