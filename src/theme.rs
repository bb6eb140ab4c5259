//! Theme loading: btop-style `theme[key]="value"` and hex → ratatui Color.

use crate::piece::Cell;
use ratatui::style::Color;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Keys for the seven piece colours, in colour-id order (1..=7).
const PIECE_KEYS: [&str; 7] = [
    "piece_i", "piece_l", "piece_j", "piece_o", "piece_z", "piece_s", "piece_t",
];

/// Classic palette: red, blue, green, pink, yellow, purple, orange.
const CLASSIC: [&str; 7] = [
    "#FF0000", "#0000FF", "#008000", "#FFC0CB", "#FFFF00", "#800080", "#FFA500",
];

/// Piece palette and board colours.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Piece colours; index 0 is colour id 1.
    pub pieces: [Color; 7],
    /// Board background.
    pub bg: Color,
    /// Border.
    pub div_line: Color,
    /// Hint text.
    pub main_fg: Color,
    /// Title.
    pub title: Color,
}

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid hex: {0}")]
    InvalidHex(String),
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}

impl Theme {
    pub fn classic() -> Self {
        Self {
            pieces: CLASSIC.map(|hex| parse_hex(hex).unwrap()),
            bg: Color::Black,
            div_line: parse_hex("#3F444F").unwrap(),
            main_fg: parse_hex("#ABB2BF").unwrap(),
            title: parse_hex("#E5C07B").unwrap(),
        }
    }

    /// Load theme from a btop-style file: `theme[key]="value"` or `theme[key]='value'`.
    /// Missing path or missing keys fall back to the classic palette.
    pub fn load(path: Option<&Path>, palette: crate::Palette) -> Result<Self, ThemeError> {
        let mut theme = match path {
            Some(p) => Self::from_map(&parse_theme_file(&std::fs::read_to_string(p)?)),
            None => Self::classic(),
        };
        theme.apply_palette(palette);
        Ok(theme)
    }

    /// Override piece colours for high-contrast or colorblind.
    pub fn apply_palette(&mut self, palette: crate::Palette) {
        let hex = match palette {
            crate::Palette::Normal => return,
            crate::Palette::HighContrast => [
                "#FF0000", "#0088FF", "#00FF00", "#FF00FF", "#FFFF00", "#00FFFF", "#FF8800",
            ],
            // Okabe-Ito-style set, distinguishable without red/green.
            crate::Palette::Colorblind => [
                "#0077BB", "#EE7733", "#009988", "#CC3311", "#EE3377", "#BBBB00", "#FFFFFF",
            ],
        };
        self.pieces = hex.map(|h| parse_hex(h).unwrap());
    }

    fn from_map(map: &HashMap<String, String>) -> Self {
        let get = |key: &str| map.get(key).and_then(|v| parse_hex(v).ok());
        let classic = Self::classic();
        let mut pieces = classic.pieces;
        for (slot, key) in pieces.iter_mut().zip(PIECE_KEYS) {
            if let Some(c) = get(key) {
                *slot = c;
            }
        }
        Self {
            pieces,
            bg: get("main_bg").unwrap_or(classic.bg),
            div_line: get("div_line").unwrap_or(classic.div_line),
            main_fg: get("main_fg").unwrap_or(classic.main_fg),
            title: get("title").unwrap_or(classic.title),
        }
    }

    /// Colour for a non-empty cell id (1..=7).
    #[inline]
    pub fn piece_color(&self, cell: Cell) -> Color {
        self.pieces[(cell as usize).saturating_sub(1) % 7]
    }
}

/// Parse btop-style theme file into key -> value map.
fn parse_theme_file(s: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in s.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some(stripped) = line.strip_prefix("theme[") else {
            continue;
        };
        let Some(end) = stripped.find(']') else {
            continue;
        };
        let key = stripped[..end].trim();
        let rest = stripped[end + 1..].trim();
        if let Some(value) = rest.strip_prefix('=') {
            let value = value.trim().trim_matches('"').trim_matches('\'');
            if !value.is_empty() {
                map.insert(key.to_string(), value.to_string());
            }
        }
    }
    map
}

/// Parse hex colour "#RRGGBB" or "#RGB" into ratatui Color.
pub fn parse_hex(s: &str) -> Result<Color, ThemeError> {
    let s = s.trim().trim_start_matches('#');
    let invalid = || ThemeError::InvalidHex(s.to_string());
    // Byte slicing below needs every char to be one ASCII hex digit.
    if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let channel = |digits: &str, scale: u8| {
        u8::from_str_radix(digits, 16)
            .map(|v| v * scale)
            .map_err(|_| invalid())
    };
    let (r, g, b) = match s.len() {
        6 => (channel(&s[0..2], 1)?, channel(&s[2..4], 1)?, channel(&s[4..6], 1)?),
        3 => (channel(&s[0..1], 17)?, channel(&s[1..2], 17)?, channel(&s[2..3], 17)?),
        _ => return Err(invalid()),
    };
    Ok(Color::Rgb(r, g, b))
}
