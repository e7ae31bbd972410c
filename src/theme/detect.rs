use tracing::debug;

use super::ThemeVariant;

/// Luma above which the terminal background counts as light.
const LIGHT_THRESHOLD: f32 = 0.6;

/// Ask the terminal for its background color. Falls back to dark when the
/// terminal doesn't answer.
pub fn detect_terminal_theme() -> ThemeVariant {
    match terminal_light::luma() {
        Ok(luma) => variant_for_luma(luma),
        Err(e) => {
            debug!(error = %e, "terminal background detection failed");
            ThemeVariant::Dark
        }
    }
}

fn variant_for_luma(luma: f32) -> ThemeVariant {
    if luma > LIGHT_THRESHOLD {
        ThemeVariant::Light
    } else {
        ThemeVariant::Dark
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bright_background_is_light() {
        assert_eq!(variant_for_luma(0.95), ThemeVariant::Light);
    }

    #[test]
    fn dark_background_is_dark() {
        assert_eq!(variant_for_luma(0.1), ThemeVariant::Dark);
        assert_eq!(variant_for_luma(LIGHT_THRESHOLD), ThemeVariant::Dark);
    }
}
