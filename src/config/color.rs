//! Hex color parsing for pad configuration
//!
//! Colors are written as six hex digits, `"RRGGBB"`, optionally with a
//! leading `#`.

use thiserror::Error;

use crate::mpc::PadColor;

/// Error decoding a configured color string
#[derive(Debug, Error, PartialEq)]
pub enum ColorError {
    #[error("color '{0}' must be 6 hex digits (RRGGBB)")]
    Length(String),
    #[error("color '{value}' is not valid hex: {source}")]
    Hex {
        value: String,
        #[source]
        source: hex::FromHexError,
    },
}

/// Decode an `"RRGGBB"` string into a pad color
pub fn parse_hex_color(value: &str) -> Result<PadColor, ColorError> {
    let digits = value.trim();
    let digits = digits.strip_prefix('#').unwrap_or(digits);

    if digits.len() != 6 {
        return Err(ColorError::Length(value.to_string()));
    }

    let mut rgb = [0u8; 3];
    hex::decode_to_slice(digits, &mut rgb).map_err(|source| ColorError::Hex {
        value: value.to_string(),
        source,
    })?;

    Ok(PadColor::new(rgb[0], rgb[1], rgb[2]))
}
