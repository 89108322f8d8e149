//! Ferry - Sequence diagram export between object models.
//!
//! Ferry reads a UML sequence diagram from a source object model and rebuilds
//! it, element by element, in a target drawing document that is then saved
//! to a file.
//!
//! Source elements carry author-assigned ids while target shapes get their
//! ids from the document as they are created. Both sides are correlated
//! through a dense [`VirtualIndex`]: the reader numbers the addressable
//! elements (actors, objects, activation boxes, lifelines) in a fixed order
//! and the writer registers them in that same order.
//!
//! # Pipeline
//!
//! ```text
//! SequenceDiagram
//!     ↓ read (input::SequenceReader)
//! Element records with virtual indices
//!     ↓ replay (Exporter)
//! Target document (output::SvgWriter)
//!     ↓ finalize + save
//! Output file
//! ```

pub mod config;
pub mod element;
pub mod input;
pub mod output;
pub mod target;
pub mod translate;

mod error;
mod export;

pub use ferry_core::{color, geometry, identifier, kind, model, style};

pub use error::FerryError;
pub use export::Exporter;
pub use translate::VirtualIndex;
