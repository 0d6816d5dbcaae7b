use colored::{ColoredString, Colorize};
use is_terminal::IsTerminal;
use std::env;
use std::io::stderr;

/// Color mode configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    #[default]
    Auto, // Use TTY detection
    Always,
    Never,
}

impl std::str::FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(ColorMode::Auto),
            "always" => Ok(ColorMode::Always),
            "never" => Ok(ColorMode::Never),
            _ => Err(format!(
                "Invalid color mode: '{}'. Valid options: auto, always, never",
                s
            )),
        }
    }
}

/// Colours diagnostics on stderr.
///
/// Observation output on stdout is always plain text.
#[derive(Debug, Clone)]
pub struct ColorHelper {
    mode: ColorMode,
    stderr_is_terminal: bool,
    no_color: bool,
}

impl ColorHelper {
    pub fn new(mode: ColorMode) -> Self {
        Self {
            mode,
            stderr_is_terminal: stderr().is_terminal(),
            no_color: env::var("NO_COLOR").is_ok_and(|v| !v.is_empty()),
        }
    }

    pub fn should_color_stderr(&self) -> bool {
        if self.no_color {
            return false;
        }
        match self.mode {
            ColorMode::Never => false,
            ColorMode::Always => true,
            ColorMode::Auto => self.stderr_is_terminal,
        }
    }

    /// Make `colored` follow this helper instead of its own stdout detection
    pub fn apply(&self) {
        colored::control::set_override(self.should_color_stderr());
    }

    /// Prefix for fatal diagnostics
    pub fn error_label(&self) -> ColoredString {
        if self.should_color_stderr() {
            "Error:".red().bold()
        } else {
            "Error:".normal()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_mode_parsing() {
        assert_eq!("auto".parse::<ColorMode>().unwrap(), ColorMode::Auto);
        assert_eq!("ALWAYS".parse::<ColorMode>().unwrap(), ColorMode::Always);
        assert_eq!("never".parse::<ColorMode>().unwrap(), ColorMode::Never);
        assert!("sometimes".parse::<ColorMode>().is_err());
    }

    #[test]
    fn test_color_helper_never() {
        let helper = ColorHelper::new(ColorMode::Never);
        assert!(!helper.should_color_stderr());
        assert_eq!(helper.error_label().to_string(), "Error:");
    }

    #[test]
    fn test_color_helper_always() {
        let helper = ColorHelper::new(ColorMode::Always);
        // NO_COLOR wins over --color=always
        assert_eq!(helper.should_color_stderr(), !helper.no_color);
    }
}
