//! Writing side of an export.
//!
//! An [`OutputAdapter`] builds a target document one element at a time and
//! saves it. Addressable elements (actors, objects, activation boxes,
//! lifelines) are registered against consecutive virtual indices as they are
//! added; connectors refer back to them through those indices.
//!
//! Every operation returns a short human-readable description of what it
//! did, collected by the [`Exporter`](crate::Exporter) into its transcript.

mod path;
mod svg;

pub use path::resolve_output_path;
pub use svg::SvgWriter;

use std::{fmt, path::Path};

use crate::{FerryError, target::OutputFormat, translate::VirtualIndex};

/// Lifecycle of an [`OutputAdapter`].
///
/// ```text
/// Uninitialized -> Initialized -> Populating -> Finalized -> Saved
/// ```
///
/// `initialize_diagram` is accepted in every phase and starts over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Uninitialized,
    Initialized,
    Populating,
    Finalized,
    Saved,
}

impl Phase {
    /// Whether elements may still be added.
    pub fn accepts_elements(self) -> bool {
        matches!(self, Self::Initialized | Self::Populating)
    }

    /// Whether the document is ready to be written.
    pub fn is_finalized(self) -> bool {
        matches!(self, Self::Finalized | Self::Saved)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Uninitialized => "uninitialized",
            Self::Initialized => "initialized",
            Self::Populating => "populating",
            Self::Finalized => "finalized",
            Self::Saved => "saved",
        };
        f.write_str(name)
    }
}

/// File type of a saved diagram: an extension with its leading dot and the
/// format written under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputType {
    extension: String,
    format: OutputFormat,
}

impl OutputType {
    pub fn new(extension: impl Into<String>, format: OutputFormat) -> Self {
        Self {
            extension: extension.into(),
            format,
        }
    }

    /// Scalable vector graphics, saved as `.svg`.
    pub fn svg() -> Self {
        Self::from(OutputFormat::Svg)
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }
}

impl Default for OutputType {
    fn default() -> Self {
        Self::svg()
    }
}

impl From<OutputFormat> for OutputType {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Svg => Self::new(".svg", format),
        }
    }
}

/// Builds and saves a target document.
///
/// Add operations must be called in the fixed order actors, objects,
/// activation boxes, lifelines for the virtual indices to line up with the
/// ones the [`InputAdapter`](crate::input::InputAdapter) assigned.
///
/// # Errors
///
/// Every add operation and `finalize_diagram` fail with
/// [`FerryError::Phase`] unless the adapter is initialized or populating;
/// `save_to_file` fails the same way before finalization.
pub trait OutputAdapter {
    /// Starts a fresh, empty document and resets the virtual index counter.
    fn initialize_diagram(&mut self) -> Result<String, FerryError>;

    /// Adds an actor and registers it under the next virtual index.
    fn add_actor(&mut self, name: &str) -> Result<String, FerryError>;

    /// Adds an object box shown as `instance:Class` and registers it.
    fn add_class_block(&mut self, instance_name: &str, class_name: &str)
    -> Result<String, FerryError>;

    /// Adds `count` activation boxes, registering each in turn.
    fn add_activation_blocks(&mut self, count: usize) -> Result<String, FerryError>;

    /// Connects two registered elements with a lifeline and registers the
    /// lifeline itself.
    ///
    /// Fails with [`FerryError::Reference`], without adding anything, when
    /// either end is not registered yet.
    fn add_lifeline(
        &mut self,
        from: VirtualIndex,
        to: VirtualIndex,
        active: bool,
    ) -> Result<String, FerryError>;

    /// Connects two registered elements with a labelled call arrow.
    fn add_method(
        &mut self,
        from: VirtualIndex,
        to: VirtualIndex,
        text: &str,
    ) -> Result<String, FerryError>;

    fn add_constraint(&mut self, text: &str) -> Result<String, FerryError>;

    fn add_loop(&mut self, text: &str) -> Result<String, FerryError>;

    fn add_alternative(&mut self, text: &str, text_else: &str) -> Result<String, FerryError>;

    /// Places the shapes. Must run exactly once, after the last add.
    fn finalize_diagram(&mut self) -> Result<String, FerryError>;

    /// Writes the document to `path/name[N]extension`.
    ///
    /// An empty `path` means the current directory, which is created
    /// recursively if missing. With `overwrite` unset, `N` is the smallest
    /// positive integer giving a path that does not exist yet (or nothing if
    /// `path/name.extension` itself is free); otherwise an existing file is
    /// replaced.
    ///
    /// # Errors
    ///
    /// Returns [`FerryError::Config`] when `name` or the extension of
    /// `output_type` is empty.
    fn save_to_file(
        &mut self,
        path: &Path,
        name: &str,
        output_type: &OutputType,
        overwrite: bool,
    ) -> Result<String, FerryError>;
}
