use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::theme::ResolvedTheme;

/// `[Label] [Loading?] Position [of Total] | Help`
pub struct StatusBar<'a> {
    theme: &'a ResolvedTheme,
    label: &'a str,
    loading_text: Option<String>,
    position: Option<(usize, usize)>,
    total: Option<u32>,
    help_text: String,
}

impl<'a> StatusBar<'a> {
    pub fn new(theme: &'a ResolvedTheme) -> Self {
        Self {
            theme,
            label: "",
            loading_text: None,
            position: None,
            total: None,
            help_text: String::new(),
        }
    }

    pub fn label(mut self, label: &'a str) -> Self {
        self.label = label;
        self
    }

    pub fn loading(mut self, text: impl Into<String>) -> Self {
        self.loading_text = Some(text.into());
        self
    }

    pub fn position(mut self, current: usize, loaded: usize) -> Self {
        self.position = Some((current, loaded));
        self
    }

    /// Upstream's match count, when it reported one.
    pub fn total(mut self, total: Option<u32>) -> Self {
        self.total = total;
        self
    }

    pub fn help(mut self, text: impl Into<String>) -> Self {
        self.help_text = text.into();
        self
    }

    pub fn render(self, frame: &mut Frame, area: Rect) {
        let theme = self.theme;
        let mut spans = vec![
            Span::styled(format!(" {} ", self.label), theme.status_bar_style()),
            Span::raw(" "),
        ];

        if let Some(loading) = self.loading_text {
            spans.push(Span::styled(loading, theme.spinner_style()));
            spans.push(Span::raw(" | "));
        }

        if let Some((current, loaded)) = self.position {
            let text = match self.total {
                Some(total) => format!("{}/{} of {}", current, loaded, total),
                None => format!("{}/{}", current, loaded),
            };
            spans.push(Span::styled(text, theme.dim_style()));
            spans.push(Span::raw(" | "));
        }

        spans.push(Span::styled(self.help_text, theme.dim_style()));

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{ThemeVariant, default_for_variant};
    use crate::views::tests::render_to_string;

    #[test]
    fn full_status_bar() {
        let theme = default_for_variant(ThemeVariant::Dark);
        let output = render_to_string(60, 1, |frame| {
            StatusBar::new(&theme)
                .label("Search")
                .position(5, 20)
                .total(Some(412))
                .help("?:help  q:quit")
                .render(frame, frame.area());
        });

        assert!(output.contains("Search"));
        assert!(output.contains("5/20 of 412"));
        assert!(output.contains("?:help"));
    }

    #[test]
    fn loading_text_is_shown() {
        let theme = default_for_variant(ThemeVariant::Light);
        let output = render_to_string(60, 1, |frame| {
            StatusBar::new(&theme)
                .label("Detail")
                .loading("Loading details...")
                .help("Esc:back")
                .render(frame, frame.area());
        });

        assert!(output.contains("Loading details..."));
        assert!(output.contains("Esc:back"));
    }

    #[test]
    fn position_without_total() {
        let theme = default_for_variant(ThemeVariant::Dark);
        let output = render_to_string(40, 1, |frame| {
            StatusBar::new(&theme)
                .label("Search")
                .position(1, 10)
                .render(frame, frame.area());
        });

        assert!(output.contains("1/10"));
        assert!(!output.contains(" of "));
    }
}
