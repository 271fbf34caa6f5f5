// SPDX-License-Identifier: GPL-3.0-only

use iced::widget::{button, container, text};
use iced::{Border, Theme};

/// Standard spacing values
pub mod spacing {
    pub const TINY: f32 = 4.0;
    pub const SMALL: f32 = 8.0;
    pub const MEDIUM: f32 = 12.0;
    pub const LARGE: f32 = 16.0;
}

/// Standard border radius values
pub mod radius {
    pub const SMALL: f32 = 6.0;
    pub const MEDIUM: f32 = 8.0;
}

/// Standard font sizes
pub mod font_size {
    pub const SMALL: f32 = 12.0;
    pub const BODY: f32 = 14.0;
    pub const LARGE: f32 = 18.0;
    pub const TITLE: f32 = 24.0;
    pub const HERO: f32 = 28.0;
}

/// Card around each code row and around the manual section
pub fn code_card(theme: &Theme) -> container::Style {
    container::Style {
        background: Some(theme.palette().background.into()),
        border: Border {
            color: theme.palette().text.scale_alpha(0.1),
            width: 1.0,
            radius: radius::MEDIUM.into(),
        },
        ..Default::default()
    }
}

pub fn primary_button(theme: &Theme, status: button::Status) -> button::Style {
    button::Style {
        border: Border {
            radius: radius::SMALL.into(),
            ..Default::default()
        },
        ..button::primary(theme, status)
    }
}

pub fn secondary_button(theme: &Theme, status: button::Status) -> button::Style {
    button::Style {
        border: Border {
            radius: radius::SMALL.into(),
            ..Default::default()
        },
        ..button::secondary(theme, status)
    }
}

/// Code digits, turning to the danger color while the window is about to end
pub fn code_text(theme: &Theme, urgent: bool) -> text::Style {
    let palette = theme.palette();
    text::Style {
        color: Some(if urgent { palette.danger } else { palette.text }),
    }
}

/// Codes from a window that already ended
pub fn stale_text(theme: &Theme) -> text::Style {
    text::Style {
        color: Some(theme.palette().text.scale_alpha(0.4)),
    }
}

/// Muted text style (for hints, subtitles, etc.)
pub fn muted_text(theme: &Theme) -> text::Style {
    text::Style {
        color: Some(theme.palette().text.scale_alpha(0.6)),
    }
}

pub fn error_text(theme: &Theme) -> text::Style {
    text::Style {
        color: Some(theme.palette().danger),
    }
}

pub fn info_text(theme: &Theme) -> text::Style {
    text::Style {
        color: Some(theme.palette().success),
    }
}
