// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nanostep-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nanostep and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::{env, error::Error, fmt};

use ratatui::style::{Color, Modifier, Style};

use crate::ui::NoticeLevel;

const PALETTE_ENV: &str = "NANOSTEP_TUI_PALETTE";

#[derive(Debug, Clone, Default)]
pub(crate) struct TuiTheme {
    palette: Option<TuiPalette>,
}

impl TuiTheme {
    pub(crate) fn from_env() -> Result<Self, ThemeError> {
        let palette = match env::var(PALETTE_ENV) {
            Ok(value) if value.trim().is_empty() => None,
            Ok(value) => Some(TuiPalette::parse_csv(value.trim()).map_err(|error| {
                ThemeError::InvalidEnv { name: PALETTE_ENV.to_owned(), value: error }
            })?),
            Err(env::VarError::NotPresent) => None,
            Err(env::VarError::NotUnicode(_)) => {
                return Err(ThemeError::InvalidEnv {
                    name: PALETTE_ENV.to_owned(),
                    value: "<non-unicode>".to_owned(),
                });
            }
        };
        Ok(Self { palette })
    }

    pub(crate) fn base_style(&self) -> Style {
        match &self.palette {
            Some(palette) => Style::default().fg(palette.fg).bg(palette.bg),
            None => Style::default(),
        }
    }

    fn accent(&self) -> Color {
        self.palette.as_ref().map_or(Color::LightGreen, |palette| palette.accent)
    }

    fn warning(&self) -> Color {
        self.palette.as_ref().map_or(Color::Yellow, |palette| palette.warning)
    }

    fn error(&self) -> Color {
        self.palette.as_ref().map_or(Color::Red, |palette| palette.error)
    }

    pub(crate) fn panel_border_style(&self, focused: bool) -> Style {
        if focused {
            self.base_style().fg(self.accent())
        } else {
            self.base_style()
        }
    }

    pub(crate) fn selection_style(&self) -> Style {
        self.base_style().add_modifier(Modifier::REVERSED | Modifier::BOLD)
    }

    pub(crate) fn dim_style(&self) -> Style {
        self.base_style().fg(Color::DarkGray)
    }

    /// Source characters inside the selected term's span.
    pub(crate) fn highlight_style(&self) -> Style {
        self.base_style().fg(Color::Black).bg(self.accent()).add_modifier(Modifier::BOLD)
    }

    /// Source characters under an error annotation.
    pub(crate) fn annotation_style(&self) -> Style {
        self.base_style().fg(self.error()).add_modifier(Modifier::UNDERLINED | Modifier::BOLD)
    }

    pub(crate) fn notice_style(&self, level: NoticeLevel) -> Style {
        let color = match level {
            NoticeLevel::Info => self.accent(),
            NoticeLevel::Warning => self.warning(),
            NoticeLevel::Error => self.error(),
        };
        self.base_style().fg(color).add_modifier(Modifier::BOLD)
    }

    pub(crate) fn outcome_style(&self, stuck: bool) -> Style {
        if stuck {
            self.notice_style(NoticeLevel::Error)
        } else {
            self.notice_style(NoticeLevel::Info)
        }
    }
}

/// Colour override: `fg,bg,accent,warning,error`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct TuiPalette {
    fg: Color,
    bg: Color,
    accent: Color,
    warning: Color,
    error: Color,
}

impl TuiPalette {
    const CSV_LEN: usize = 5;

    fn parse_csv(value: &str) -> Result<Self, String> {
        let parts = value.split(',').map(str::trim).collect::<Vec<_>>();
        if parts.len() != Self::CSV_LEN {
            return Err(format!(
                "expected {} comma-separated colors (fg,bg,accent,warning,error), got {}",
                Self::CSV_LEN,
                parts.len()
            ));
        }
        Ok(Self {
            fg: parse_hex_color(parts[0])?,
            bg: parse_hex_color(parts[1])?,
            accent: parse_hex_color(parts[2])?,
            warning: parse_hex_color(parts[3])?,
            error: parse_hex_color(parts[4])?,
        })
    }
}

fn parse_hex_color(value: &str) -> Result<Color, String> {
    let hex = value.strip_prefix('#').unwrap_or(value);
    if hex.len() != 6 || !hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return Err(format!("invalid hex color: {value} (expected #RRGGBB)"));
    }
    let rgb = u32::from_str_radix(hex, 16).map_err(|_| format!("invalid hex color: {value}"))?;
    let [_, r, g, b] = rgb.to_be_bytes();
    Ok(Color::Rgb(r, g, b))
}

#[derive(Debug, Clone)]
pub(crate) enum ThemeError {
    InvalidEnv { name: String, value: String },
}

impl fmt::Display for ThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEnv { name, value } => write!(f, "invalid env {name}: {value}"),
        }
    }
}

impl Error for ThemeError {}
