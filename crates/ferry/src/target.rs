//! In-memory target drawing document.
//!
//! A [`Document`] is a flat list of shapes created from a closed set of
//! [`Master`]s. Shape ids are handed out by the document at creation time
//! from a single counter starting at 1, so they are unrelated to any
//! numbering on the source side. Connectors are shapes too and are glued to
//! two other shapes through [`Document::connect`].
//!
//! Placement is a fixed grid ([`Document::arrange`]); serialization goes
//! through the `svg` crate ([`Document::render_svg`], [`Document::save`]).

mod render;
mod shape;

pub use shape::{Connection, ConnectionPoint, Master, Shape, ShapeId};

use std::{
    fmt,
    fs::OpenOptions,
    io::Write as _,
    path::Path,
    str::FromStr,
};

use log::{debug, trace};
use serde::Deserialize;

use ferry_core::geometry::{Bounds, Point};

use crate::FerryError;

/// Left edge of every grid row.
const GRID_LEFT: f32 = 40.0;

/// Horizontal gap between neighbouring shapes of a row.
const GRID_COLUMN_GAP: f32 = 40.0;

/// Top edge of the participant, activation and annotation rows.
const GRID_ROW_TOPS: [f32; 3] = [40.0, 180.0, 340.0];

/// File formats a [`Document`] can be saved as.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Svg,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Svg => f.write_str("svg"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            _ => Err(format!("unsupported output format `{s}`")),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Document {
    shapes: Vec<Shape>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty shape from `master` and returns its id.
    pub fn add_shape(&mut self, master: Master) -> ShapeId {
        let id = ShapeId::new(self.next_id());
        self.shapes.push(Shape::new(id, master));
        trace!(id:% = id, master:% = master; "Shape created");
        id
    }

    fn next_id(&self) -> u32 {
        // Ids are dense, so the next one is always len + 1.
        u32::try_from(self.shapes.len() + 1).unwrap_or(u32::MAX)
    }

    fn position_of(&self, id: ShapeId) -> Option<usize> {
        let position = usize::try_from(id.get()).ok()?.checked_sub(1)?;
        (position < self.shapes.len()).then_some(position)
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.position_of(id).map(|position| &self.shapes[position])
    }

    /// Mutable access to a shape.
    ///
    /// # Errors
    ///
    /// Returns [`FerryError::Reference`] if no shape has this id.
    pub fn shape_mut(&mut self, id: ShapeId) -> Result<&mut Shape, FerryError> {
        let position = self.position_of(id).ok_or_else(|| unknown_shape(id))?;
        Ok(&mut self.shapes[position])
    }

    /// Glues both ends of `connector` to existing shapes.
    ///
    /// # Errors
    ///
    /// Returns [`FerryError::Reference`] if any of the three ids is unknown
    /// or if `connector` was not created from [`Master::Connector`].
    pub fn connect(
        &mut self,
        connector: ShapeId,
        from: ShapeId,
        from_point: ConnectionPoint,
        to: ShapeId,
        to_point: ConnectionPoint,
    ) -> Result<(), FerryError> {
        for endpoint in [from, to] {
            if self.shape(endpoint).is_none() {
                return Err(unknown_shape(endpoint));
            }
        }

        let shape = self.shape_mut(connector)?;
        if shape.master() != Master::Connector {
            return Err(FerryError::Reference(format!(
                "shape {connector} is a {} and cannot be connected",
                shape.master()
            )));
        }
        shape.set_connection(Connection::new((from, from_point), (to, to_point)));

        trace!(connector:% = connector, from:% = from, to:% = to; "Connector glued");
        Ok(())
    }

    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Places every sized shape on a fixed grid.
    ///
    /// Actors and objects share the top row, activation boxes the second
    /// and annotations the third; each row fills left to right in creation
    /// order. Connectors are not placed, their ends follow the shapes they
    /// are glued to.
    pub fn arrange(&mut self) {
        let mut cursors = [GRID_LEFT; GRID_ROW_TOPS.len()];

        for shape in &mut self.shapes {
            let Some(size) = shape.master().size() else {
                continue;
            };

            let row = match shape.master() {
                Master::Actor | Master::Object => 0,
                Master::Activation => 1,
                _ => 2,
            };

            shape.set_position(Point::new(cursors[row], GRID_ROW_TOPS[row]));
            cursors[row] += size.width() + GRID_COLUMN_GAP;
        }

        debug!(shapes_count = self.shapes.len(); "Document arranged");
    }

    /// Smallest bounds containing every placed shape.
    pub fn bounds(&self) -> Bounds {
        self.shapes
            .iter()
            .filter_map(Shape::bounds)
            .reduce(|acc, bounds| acc.merge(&bounds))
            .unwrap_or_default()
    }

    /// Writes the document to `path` in `format`.
    ///
    /// The content is rendered in full before the file is opened. Unless
    /// `replace` is set, an existing file at `path` is left alone and the
    /// call fails.
    ///
    /// # Errors
    ///
    /// Returns [`FerryError::Io`] if the file exists and `replace` is not
    /// set, or if writing fails.
    pub fn save(&self, path: &Path, format: OutputFormat, replace: bool) -> Result<(), FerryError> {
        let content = match format {
            OutputFormat::Svg => self.render_svg().to_string(),
        };

        let mut options = OpenOptions::new();
        options.write(true);
        if replace {
            options.create(true).truncate(true);
        } else {
            options.create_new(true);
        }

        let mut file = options.open(path)?;
        file.write_all(content.as_bytes())?;
        file.flush()?;

        debug!(path:? = path, format:% = format; "Document written");
        Ok(())
    }
}

fn unknown_shape(id: ShapeId) -> FerryError {
    FerryError::Reference(format!("no shape with id {id} in the document"))
}
