//! Color handling for connector and shape styling.
//!
//! [`Color`] wraps the `DynamicColor` type from the color crate so that styles
//! can be configured with any CSS color string and emitted into SVG attributes.

use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::DynamicColor;

/// A CSS color used by connector and shape styles.
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
    /// Parses a CSS color string such as `"#000000"`, `"rgb(0, 0, 0)"` or `"black"`.
    ///
    /// # Errors
    ///
    /// Returns a message describing the rejected input when the string is
    /// not a valid CSS color.
    ///
    /// # Examples
    ///
    /// ```
    /// use ferry_core::color::Color;
    ///
    /// let black = Color::new("#000000").unwrap();
    /// assert!(Color::new("no-such-color").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        DynamicColor::from_str(color_str)
            .map(|color| Self { color })
            .map_err(|err| format!("invalid color `{color_str}`: {err}"))
    }

    /// Returns a representation usable inside an SVG `id` attribute.
    ///
    /// The result contains only alphanumeric characters and underscores and
    /// always starts with a letter.
    pub fn to_id_safe_string(self) -> String {
        let mut sanitized = self
            .to_string()
            .replace('#', "hex")
            .replace(['(', ')', ',', ' ', ';', '.', '%'], "_");

        if sanitized.chars().next().is_some_and(|c| c.is_ascii_digit()) {
            sanitized = format!("c_{sanitized}");
        }

        sanitized
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_string())
    }
}
