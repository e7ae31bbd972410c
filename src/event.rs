use crossterm::event::KeyEvent;

#[derive(Debug, Clone)]
pub enum Event {
    Key(KeyEvent),
    /// Redraw without input, so spinners keep turning.
    Tick,
    Resize,
}
