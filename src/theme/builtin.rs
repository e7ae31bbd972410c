use ratatui::style::Color;

use super::{ResolvedTheme, ThemeVariant};

pub fn default_for_variant(variant: ThemeVariant) -> ResolvedTheme {
    match variant {
        ThemeVariant::Dark => dark(),
        ThemeVariant::Light => light(),
    }
}

/// Monokai palette.
pub fn dark() -> ResolvedTheme {
    ResolvedTheme {
        name: "dark".to_string(),
        variant: ThemeVariant::Dark,
        foreground: Color::Rgb(0xF8, 0xF8, 0xF2),
        foreground_dim: Color::Rgb(0x75, 0x71, 0x5E),
        border: Color::Rgb(0x75, 0x71, 0x5E),
        selection_bg: Color::Rgb(0x49, 0x48, 0x3E),
        primary: Color::Rgb(0xA6, 0xE2, 0x2E),
        error: Color::Rgb(0xF9, 0x26, 0x72),
        movie_title: Color::Rgb(0xF8, 0xF8, 0xF2),
        movie_year: Color::Rgb(0xE6, 0xDB, 0x74),
        movie_kind: Color::Rgb(0x66, 0xD9, 0xEF),
        field_label: Color::Rgb(0xAE, 0x81, 0xFF),
        status_bar_bg: Color::Rgb(0xA6, 0xE2, 0x2E),
        status_bar_fg: Color::Rgb(0x27, 0x28, 0x22),
        spinner: Color::Rgb(0xE6, 0xDB, 0x74),
    }
}

/// Terminal named colors, readable on a white background.
pub fn light() -> ResolvedTheme {
    ResolvedTheme {
        name: "light".to_string(),
        variant: ThemeVariant::Light,
        foreground: Color::Black,
        foreground_dim: Color::DarkGray,
        border: Color::DarkGray,
        selection_bg: Color::LightBlue,
        primary: Color::Blue,
        error: Color::Red,
        movie_title: Color::Black,
        movie_year: Color::Magenta,
        movie_kind: Color::Blue,
        field_label: Color::Blue,
        status_bar_bg: Color::Blue,
        status_bar_fg: Color::White,
        spinner: Color::Blue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_picks_matching_theme() {
        assert_eq!(default_for_variant(ThemeVariant::Dark).name, "dark");
        assert_eq!(
            default_for_variant(ThemeVariant::Light).variant,
            ThemeVariant::Light
        );
    }
}
