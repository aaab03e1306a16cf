//! Terminal styling helpers
//!
//! Every helper degrades to plain text when colors are disabled, so the same
//! formatting code serves both terminals and pipes.

use colored::*;

/// Semantic roles used by the report, each with a fixed color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Client and server details
    Info,
    /// Latency and jitter figures
    Latency,
    /// Per-tier speed figures
    TierSpeed,
    /// Overall speed figures and lite banners
    Highlight,
    /// Direction-only banners
    Mode,
}

impl Tone {
    pub fn color(&self) -> Color {
        match self {
            Self::Info => Color::Blue,
            Self::Latency => Color::Magenta,
            Self::TierSpeed => Color::Yellow,
            Self::Highlight => Color::Green,
            Self::Mode => Color::Cyan,
        }
    }
}

/// Applies colors and emphasis when enabled
#[derive(Debug, Clone, Copy)]
pub struct ConsoleStyle {
    enable_color: bool,
}

impl ConsoleStyle {
    pub fn new(enable_color: bool) -> Self {
        Self { enable_color }
    }

    pub fn enabled(&self) -> bool {
        self.enable_color
    }

    /// Apply the tone's color if colors are enabled
    pub fn colorize(&self, text: &str, tone: Tone) -> ColoredString {
        if self.enable_color {
            text.color(tone.color())
        } else {
            text.normal()
        }
    }

    /// Apply bold formatting if colors are enabled
    pub fn bold(&self, text: &str) -> ColoredString {
        if self.enable_color {
            text.bold()
        } else {
            text.normal()
        }
    }

    /// Bold and colored
    pub fn emphasize(&self, text: &str, tone: Tone) -> ColoredString {
        if self.enable_color {
            text.color(tone.color()).bold()
        } else {
            text.normal()
        }
    }

    /// Bold label followed by a colored value
    pub fn labelled(&self, label: &str, value: &str, tone: Tone) -> String {
        format!("{} {}", self.bold(label), self.emphasize(value, tone))
    }
}
