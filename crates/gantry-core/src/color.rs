//! Color handling for Gantry diagrams
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate, adding the conveniences the renderer needs: CSS
//! string parsing, SVG-id-safe names for marker definitions, and alpha access.

use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::DynamicColor;
use thiserror::Error;

/// Error produced when a color string cannot be parsed.
#[derive(Debug, Error)]
#[error("invalid color `{value}`: {reason}")]
pub struct ColorParseError {
    value: String,
    reason: String,
}

/// Wrapper around `DynamicColor` from the color crate.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl Color {
    /// Parse a CSS color string such as `"#ff0000"`, `"rgb(255, 0, 0)"`, or `"red"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use gantry_core::color::Color;
    ///
    /// let orange = Color::new("#ed7100").unwrap();
    /// let named = Color::new("slategray").unwrap();
    /// ```
    pub fn new(color_str: &str) -> Result<Self, ColorParseError> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(ColorParseError {
                value: color_str.to_string(),
                reason: err.to_string(),
            }),
        }
    }

    /// Returns a sanitized string usable as an SVG element id.
    ///
    /// Marker definitions are keyed by color; SVG ids cannot contain `#`,
    /// parentheses, or leading digits.
    pub fn to_id_safe_string(self) -> String {
        let mut sanitized = self
            .to_string()
            .replace('#', "hex")
            .replace(['(', ')', ',', ' ', ';', '.'], "_");

        if sanitized.chars().next().is_some_and(|c| c.is_ascii_digit()) {
            sanitized = format!("c_{sanitized}");
        }

        sanitized
    }

    /// Returns the alpha component, 0.0 (transparent) to 1.0 (opaque).
    pub fn alpha(self) -> f32 {
        self.color.components[3]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("named color `black` always parses")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        svg::node::Value::from(color.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_and_named_colors() {
        assert!(Color::new("#ed7100").is_ok());
        assert!(Color::new("rebeccapurple").is_ok());
        assert!(Color::new("rgb(12, 34, 56)").is_ok());
    }

    #[test]
    fn rejects_garbage() {
        let err = Color::new("not-a-color").unwrap_err();
        assert!(err.to_string().contains("not-a-color"));
    }

    #[test]
    fn id_safe_string_is_a_valid_svg_id() {
        for value in ["#ff8000", "rgb(255, 0, 0)", "orange"] {
            let id = Color::new(value).unwrap().to_id_safe_string();
            assert!(
                id.chars().all(|c| c.is_alphanumeric() || c == '_'),
                "bad id: {id}"
            );
            assert!(!id.starts_with(|c: char| c.is_ascii_digit()));
        }
    }

    #[test]
    fn default_is_opaque_black() {
        let color = Color::default();
        assert_eq!(color.alpha(), 1.0);
    }
}
