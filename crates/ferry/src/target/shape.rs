//! Shapes of a target [`Document`](super::Document).

use std::fmt;

use ferry_core::{
    geometry::{Bounds, Point, Size},
    style::ConnectorStyle,
};

/// Id handed out by a [`Document`](super::Document) when a shape is created.
///
/// Ids start at 1 and every shape, connectors included, consumes one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(u32);

impl ShapeId {
    pub(super) fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Template a shape is created from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Master {
    Actor,
    Object,
    Activation,
    Constraint,
    Loop,
    Alternative,
    Connector,
}

impl Master {
    /// Default size of shapes made from this master; connectors have none.
    pub fn size(self) -> Option<Size> {
        match self {
            Self::Actor => Some(Size::new(100.0, 60.0)),
            Self::Object => Some(Size::new(160.0, 50.0)),
            Self::Activation => Some(Size::new(20.0, 80.0)),
            Self::Constraint | Self::Loop | Self::Alternative => Some(Size::new(200.0, 60.0)),
            Self::Connector => None,
        }
    }

    /// Whether shapes of this master annotate the diagram rather than take part in it.
    pub fn is_annotation(self) -> bool {
        matches!(self, Self::Constraint | Self::Loop | Self::Alternative)
    }
}

impl fmt::Display for Master {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Actor => "actor",
            Self::Object => "object",
            Self::Activation => "activation",
            Self::Constraint => "constraint",
            Self::Loop => "loop",
            Self::Alternative => "alternative",
            Self::Connector => "connector",
        };
        f.write_str(name)
    }
}

/// Side of a shape a connector end is glued to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionPoint {
    Top,
    Bottom,
    Left,
    Right,
}

impl ConnectionPoint {
    /// Location of this point on the edge of `bounds`.
    pub fn locate(self, bounds: Bounds) -> Point {
        let center = bounds.center();
        match self {
            Self::Top => Point::new(center.x(), bounds.min_y()),
            Self::Bottom => Point::new(center.x(), bounds.max_y()),
            Self::Left => Point::new(bounds.min_x(), center.y()),
            Self::Right => Point::new(bounds.max_x(), center.y()),
        }
    }
}

/// Both glued ends of a connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    from: (ShapeId, ConnectionPoint),
    to: (ShapeId, ConnectionPoint),
}

impl Connection {
    pub(super) fn new(from: (ShapeId, ConnectionPoint), to: (ShapeId, ConnectionPoint)) -> Self {
        Self { from, to }
    }

    pub fn from(&self) -> (ShapeId, ConnectionPoint) {
        self.from
    }

    pub fn to(&self) -> (ShapeId, ConnectionPoint) {
        self.to
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    id: ShapeId,
    master: Master,
    text: Vec<String>,
    style: Option<ConnectorStyle>,
    position: Option<Point>,
    connection: Option<Connection>,
}

impl Shape {
    pub(super) fn new(id: ShapeId, master: Master) -> Self {
        Self {
            id,
            master,
            text: Vec::new(),
            style: None,
            position: None,
            connection: None,
        }
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn master(&self) -> Master {
        self.master
    }

    /// Text lines drawn inside the shape, or next to a connector.
    pub fn text(&self) -> &[String] {
        &self.text
    }

    pub fn set_text<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.text = lines.into_iter().map(Into::into).collect();
    }

    pub fn style(&self) -> Option<&ConnectorStyle> {
        self.style.as_ref()
    }

    pub fn set_style(&mut self, style: ConnectorStyle) {
        self.style = Some(style);
    }

    /// Top-left corner, once the document has been arranged.
    pub fn position(&self) -> Option<Point> {
        self.position
    }

    pub(super) fn set_position(&mut self, position: Point) {
        self.position = Some(position);
    }

    pub fn connection(&self) -> Option<Connection> {
        self.connection
    }

    pub(super) fn set_connection(&mut self, connection: Connection) {
        self.connection = Some(connection);
    }

    /// Area covered by the shape, if it is placed and has a size.
    pub fn bounds(&self) -> Option<Bounds> {
        let size = self.master.size()?;
        self.position
            .map(|top_left| Bounds::new_from_top_left(top_left, size))
    }
}
