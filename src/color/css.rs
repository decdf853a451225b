use thiserror::Error;

use super::Rgb;

#[derive(Debug, Error, PartialEq)]
pub enum ColorParseError {
    #[error("unsupported color syntax: {0:?}")]
    Syntax(String),

    #[error("color channel out of range in {0:?}")]
    Channel(String),
}

/// Parse a precomputed ward color.
///
/// Accepts `#rrggbb`, `#rgb` and `rgb(r, g, b)` (whitespace optional).
pub fn parse_color(raw: &str) -> Result<Rgb, ColorParseError> {
    let s = raw.trim();

    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex).ok_or_else(|| ColorParseError::Syntax(raw.to_string()));
    }

    let lower = s.to_ascii_lowercase();
    if let Some(inner) = lower
        .strip_prefix("rgb(")
        .and_then(|rest| rest.strip_suffix(')'))
    {
        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(ColorParseError::Syntax(raw.to_string()));
        }
        let mut channels = [0u8; 3];
        for (slot, part) in channels.iter_mut().zip(parts) {
            let value: u16 = part
                .parse()
                .map_err(|_| ColorParseError::Syntax(raw.to_string()))?;
            *slot = u8::try_from(value).map_err(|_| ColorParseError::Channel(raw.to_string()))?;
        }
        return Ok(Rgb::new(channels[0], channels[1], channels[2]));
    }

    Err(ColorParseError::Syntax(raw.to_string()))
}

fn parse_hex(hex: &str) -> Option<Rgb> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        6 => Some(Rgb::new(
            u8::from_str_radix(&hex[0..2], 16).ok()?,
            u8::from_str_radix(&hex[2..4], 16).ok()?,
            u8::from_str_radix(&hex[4..6], 16).ok()?,
        )),
        3 => {
            let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
            Some(Rgb::new(nibble(0)?, nibble(1)?, nibble(2)?))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_forms() {
        assert_eq!(parse_color("#ff9900"), Ok(Rgb::new(255, 153, 0)));
        assert_eq!(parse_color("#FF9900"), Ok(Rgb::new(255, 153, 0)));
        assert_eq!(parse_color("#0f0"), Ok(Rgb::new(0, 255, 0)));
    }

    #[test]
    fn test_rgb_function() {
        assert_eq!(parse_color("rgb(255, 69, 0)"), Ok(Rgb::new(255, 69, 0)));
        assert_eq!(parse_color("rgb(1,2,3)"), Ok(Rgb::new(1, 2, 3)));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(parse_color("red"), Err(ColorParseError::Syntax(_))));
        assert!(matches!(parse_color("#12345"), Err(ColorParseError::Syntax(_))));
        assert!(matches!(parse_color("#gg0000"), Err(ColorParseError::Syntax(_))));
        assert!(matches!(
            parse_color("rgb(300, 0, 0)"),
            Err(ColorParseError::Channel(_))
        ));
    }

    #[test]
    fn test_display_round_trips_through_parser() {
        let c = Rgb::new(17, 141, 5);
        assert_eq!(parse_color(&c.to_string()), Ok(c));
    }
}
