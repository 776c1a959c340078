// SPDX-License-Identifier: MIT OR Apache-2.0
//! Colors used by cells and highlights.

use crate::error::{ArrayVizError, Result};
use serde::{Deserialize, Serialize};

/// RGBA color with components in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color(pub [f32; 4]);

impl Color {
    /// Black
    pub const BLACK: Color = Color::rgb8(0x00, 0x00, 0x00);
    /// White
    pub const WHITE: Color = Color::rgb8(0xFF, 0xFF, 0xFF);
    /// Soft green, the default highlight color
    pub const GREEN: Color = Color::rgb8(0x83, 0xC1, 0x67);
    /// Yellow
    pub const YELLOW: Color = Color::rgb8(0xFF, 0xFF, 0x00);
    /// Soft blue
    pub const BLUE: Color = Color::rgb8(0x58, 0xC4, 0xDD);
    /// Soft red
    pub const RED: Color = Color::rgb8(0xFC, 0x62, 0x55);

    /// Build an opaque color from 8-bit channels
    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self([r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0])
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA` (leading `#` optional)
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !matches!(digits.len(), 6 | 8) || !digits.is_ascii() {
            return Err(ArrayVizError::InvalidColor(hex.to_string()));
        }

        let mut channels = [1.0_f32; 4];
        for (i, channel) in channels.iter_mut().enumerate().take(digits.len() / 2) {
            let byte = u8::from_str_radix(&digits[i * 2..i * 2 + 2], 16)
                .map_err(|_| ArrayVizError::InvalidColor(hex.to_string()))?;
            *channel = f32::from(byte) / 255.0;
        }
        Ok(Self(channels))
    }

}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}
