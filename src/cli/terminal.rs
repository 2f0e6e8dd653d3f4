//! Colouring of findme's stdout output

use owo_colors::{OwoColorize, colors::css};

/// How findme output is coloured.
///
/// Colour support is detected once, when the style is created, and every
/// piece of output rendered through it is coloured (or not) consistently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    color: bool,
}

impl Style {
    /// Colours output if stdout supports it.
    pub fn stdout() -> Self {
        Self {
            color: supports_color::on(supports_color::Stream::Stdout).is_some(),
        }
    }

    /// Never colours output.
    #[cfg(test)]
    pub const fn plain() -> Self {
        Self { color: false }
    }

    /// A table header cell.
    pub fn header(self, text: &str) -> String {
        if self.color {
            text.fg::<css::LightBlue>().to_string()
        } else {
            text.to_string()
        }
    }

    /// A scope flag cell, padded to `width` before colouring so escape codes
    /// don't skew alignment. Set flags are green, unset ones red.
    pub fn flag(self, value: bool, width: usize) -> String {
        let cell = format!("{value:<width$}");
        match (self.color, value) {
            (false, _) => cell,
            (true, true) => cell.fg::<css::Green>().to_string(),
            (true, false) => cell.fg::<css::Red>().to_string(),
        }
    }

    /// Informational text with nothing to report.
    pub fn notice(self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    /// Confirmation that a change to the config was made.
    pub fn confirm(self, text: &str) -> String {
        if self.color {
            text.fg::<css::Green>().to_string()
        } else {
            text.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_flags_are_padded() {
        assert_eq!(Style::plain().flag(true, 10), "true      ");
        assert_eq!(Style::plain().flag(false, 5), "false");
    }

    #[test]
    fn coloured_flags_keep_padding_inside_escape_codes() {
        let style = Style { color: true };

        let set = style.flag(true, 6);
        let unset = style.flag(false, 6);

        assert!(set.starts_with('\u{1b}') && set.contains("true  "));
        assert!(unset.starts_with('\u{1b}') && unset.contains("false "));
    }

    #[test]
    fn plain_text_is_unchanged() {
        let style = Style::plain();
        assert_eq!(style.header("Alias"), "Alias");
        assert_eq!(style.notice("nothing"), "nothing");
        assert_eq!(style.confirm("done"), "done");
    }
}
