pub mod common;
pub mod debug;
pub mod detail;
pub mod help_overlay;
pub mod search;
pub mod spinner;
pub mod status_bar;
