use std::collections::HashMap;
use std::time::{Duration, Instant};

const MIN_SPINNER_DURATION: Duration = Duration::from_millis(500);

/// Kinds of fetches tracked separately for loading indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Search,
    Detail,
}

impl OperationKind {
    pub fn label(&self) -> &'static str {
        match self {
            OperationKind::Search => "search",
            OperationKind::Detail => "detail",
        }
    }

    pub fn all() -> &'static [OperationKind] {
        &[OperationKind::Search, OperationKind::Detail]
    }
}

/// Outstanding fetch counts per kind. Loading means count > 0.
#[derive(Debug, Default)]
pub struct InFlight {
    counts: HashMap<OperationKind, usize>,
    last_started: Option<Instant>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, kind: OperationKind) {
        *self.counts.entry(kind).or_default() += 1;
        self.last_started = Some(Instant::now());
    }

    pub fn finish(&mut self, kind: OperationKind) {
        if let Some(count) = self.counts.get_mut(&kind) {
            *count = count.saturating_sub(1);
        }
    }

    pub fn count(&self, kind: OperationKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn is_loading(&self, kind: OperationKind) -> bool {
        self.count(kind) > 0
    }

    pub fn is_any_loading(&self) -> bool {
        self.counts.values().any(|&c| c > 0)
    }

    pub fn last_started(&self) -> Option<Instant> {
        self.last_started
    }

    /// Keep the spinner up briefly so fast fetches don't flicker.
    pub fn should_show_spinner(&self) -> bool {
        match self.last_started {
            Some(start) => self.is_any_loading() || start.elapsed() < MIN_SPINNER_DURATION,
            None => false,
        }
    }
}
