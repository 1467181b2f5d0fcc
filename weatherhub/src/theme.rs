//! Color palettes
//!
//! The background follows the current condition, one table per theme. Without
//! a snapshot the theme's base colors are used.

use ratatui::style::{Color, Modifier, Style};
use weatherhub_core::{ConditionCategory, Theme};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg: Color,
    pub fg: Color,
    pub muted: Color,
    pub accent: Color,
    pub border: Color,
    pub error: Color,
    /// Background of the detail cards
    pub card: Color,
}

impl Palette {
    pub fn for_condition(theme: Theme, category: Option<ConditionCategory>) -> Self {
        match theme {
            Theme::Light => light(category),
            Theme::Dark => dark(category),
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn accent(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn error(&self) -> Style {
        Style::default().fg(self.error).add_modifier(Modifier::BOLD)
    }
}

fn light(category: Option<ConditionCategory>) -> Palette {
    let bg = match category {
        Some(ConditionCategory::Clear) => Color::Rgb(56, 189, 248),
        Some(ConditionCategory::Clouds) => Color::Rgb(148, 163, 184),
        Some(ConditionCategory::Rain) => Color::Rgb(71, 105, 160),
        Some(ConditionCategory::Snow) => Color::Rgb(125, 211, 252),
        Some(ConditionCategory::Thunderstorm) => Color::Rgb(67, 56, 202),
        _ => Color::Rgb(59, 130, 246),
    };
    // thunderstorm is the one dark background in the light table
    let storm = category == Some(ConditionCategory::Thunderstorm);

    Palette {
        bg,
        fg: if storm { Color::White } else { Color::Rgb(17, 24, 39) },
        muted: if storm {
            Color::Rgb(199, 210, 254)
        } else {
            Color::Rgb(55, 65, 81)
        },
        accent: if storm {
            Color::Rgb(253, 224, 71)
        } else {
            Color::Rgb(30, 64, 175)
        },
        border: Color::Rgb(241, 245, 249),
        error: Color::Rgb(185, 28, 28),
        card: Color::Rgb(226, 232, 240),
    }
}

fn dark(category: Option<ConditionCategory>) -> Palette {
    let bg = match category {
        Some(ConditionCategory::Clear) => Color::Rgb(23, 37, 84),
        Some(ConditionCategory::Clouds) => Color::Rgb(31, 41, 55),
        Some(ConditionCategory::Rain) => Color::Rgb(30, 41, 59),
        Some(ConditionCategory::Snow) => Color::Rgb(30, 58, 138),
        _ => Color::Rgb(17, 24, 39),
    };

    Palette {
        bg,
        fg: Color::Rgb(243, 244, 246),
        muted: Color::Rgb(156, 163, 175),
        accent: Color::Rgb(96, 165, 250),
        border: Color::Rgb(75, 85, 99),
        error: Color::Rgb(248, 113, 113),
        card: Color::Rgb(55, 65, 81),
    }
}
