//! Flood-risk colors for map polygons and legends.
//!
//! - [`palette`]: control-point gradient and the probability → color mapper.
//! - [`css`]: parsing of precomputed ward colors (`#rrggbb`, `#rgb`, `rgb(r, g, b)`).

pub mod css;
pub mod palette;

use std::fmt;

use serde::Serialize;

/// An 8-bit RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Lowercase `#rrggbb` form.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    /// CSS functional notation: `rgb(r,g,b)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_hex() {
        let c = Rgb::new(255, 69, 0);
        assert_eq!(c.to_string(), "rgb(255,69,0)");
        assert_eq!(c.to_hex(), "#ff4500");
    }
}
