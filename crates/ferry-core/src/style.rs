//! Connector style intents.
//!
//! Connectors in the target document are described by what they *mean*
//! rather than by renderer codes: a [`LinePattern`] says whether a line is
//! solid or dashed and an [`ArrowDirection`] says whether it points anywhere.
//! [`ConnectorStyle`] bundles both with a color and a width.
//!
//! # SVG Attribute Mapping
//!
//! | Property | SVG Attribute | Example Values |
//! |----------|---------------|----------------|
//! | `color` | `stroke` | `"black"` |
//! | `width` | `stroke-width` | `1.4` |
//! | `pattern` | `stroke-dasharray` | absent, `"6,4"` |
//! | `direction` | `marker-end` | absent, `url(#arrow-black)` |
//!
//! Use [`apply_connector_style!`](crate::apply_connector_style!) to set the
//! stroke attributes on an SVG element.

use crate::color::Color;

/// Line pattern of a connector.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LinePattern {
    /// Continuous line (default)
    #[default]
    Solid,
    /// Dashed line (6px dash, 4px gap)
    Dashed,
}

impl LinePattern {
    /// Returns the SVG dasharray value for this pattern, or `None` for solid lines
    pub fn to_svg_value(self) -> Option<&'static str> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some("6,4"),
        }
    }
}

/// Whether a connector carries an arrowhead at its destination.
///
/// - `Forward`: `->` pointing from source to destination
/// - `Plain`: `-` no marker
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ArrowDirection {
    Forward,
    #[default]
    Plain,
}

impl ArrowDirection {
    /// Returns `true` when the connector points at its destination
    pub fn is_directional(self) -> bool {
        matches!(self, Self::Forward)
    }
}

/// Visual intent of a connector.
///
/// # Examples
///
/// ```
/// use ferry_core::color::Color;
/// use ferry_core::style::{ArrowDirection, ConnectorStyle, LinePattern};
///
/// let inactive = ConnectorStyle::lifeline(Color::default(), 1.4, false);
/// assert_eq!(inactive.pattern(), LinePattern::Dashed);
/// assert_eq!(inactive.direction(), ArrowDirection::Plain);
///
/// let call = ConnectorStyle::message(Color::default(), 1.4);
/// assert!(call.direction().is_directional());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectorStyle {
    color: Color,
    width: f32,
    pattern: LinePattern,
    direction: ArrowDirection,
}

impl Default for ConnectorStyle {
    fn default() -> Self {
        Self::new(Color::default(), 1.4)
    }
}

impl ConnectorStyle {
    /// Creates a solid, non-directional style with the given color and width.
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            pattern: LinePattern::Solid,
            direction: ArrowDirection::Plain,
        }
    }

    /// Style of a lifeline: no arrowhead, solid while active and dashed otherwise.
    pub fn lifeline(color: Color, width: f32, active: bool) -> Self {
        let pattern = if active {
            LinePattern::Solid
        } else {
            LinePattern::Dashed
        };
        Self::new(color, width).with_pattern(pattern)
    }

    /// Style of a method call: solid line pointing at the callee.
    pub fn message(color: Color, width: f32) -> Self {
        Self::new(color, width).with_direction(ArrowDirection::Forward)
    }

    pub fn with_pattern(mut self, pattern: LinePattern) -> Self {
        self.pattern = pattern;
        self
    }

    pub fn with_direction(mut self, direction: ArrowDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn pattern(&self) -> LinePattern {
        self.pattern
    }

    pub fn direction(&self) -> ArrowDirection {
        self.direction
    }

    /// Id of the SVG marker drawn at the end of directional connectors of this color.
    pub fn marker_id(&self) -> String {
        format!("arrow-{}", self.color.to_id_safe_string())
    }
}

/// Applies the stroke attributes of a [`ConnectorStyle`] to an SVG element.
///
/// Sets `stroke`, `stroke-width` and, for dashed patterns, `stroke-dasharray`.
/// Arrowhead markers are left to the caller since they require a matching
/// `<marker>` definition.
#[macro_export]
macro_rules! apply_connector_style {
    ($element:expr, $style:expr) => {{
        let mut elem = $element
            .set("stroke", &$style.color())
            .set("stroke-width", $style.width());

        if let Some(dasharray) = $style.pattern().to_svg_value() {
            elem = elem.set("stroke-dasharray", dasharray);
        }

        elem
    }};
}
