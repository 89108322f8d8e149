//! Reading side of an export.
//!
//! An [`InputAdapter`] exposes a source diagram as counted, positionally
//! indexed sequences of element records, one sequence per
//! [`ElementKind`]. Cross-references are already translated into the virtual
//! index space, so the exporter never sees a source native id.
//!
//! [`SequenceReader`] is the adapter over a
//! [`SequenceDiagram`](ferry_core::model::SequenceDiagram).

mod sequence;
mod text;

pub use sequence::SequenceReader;
pub use text::{
    CALL_PLACEHOLDER, ELSE_TEXT, RETURN_PLACEHOLDER, format_method_text, format_return_text,
};

use ferry_core::kind::ElementKind;

use crate::{
    FerryError,
    element::{
        ActorElement, AlternativeElement, ConditionElement, LifelineElement, MethodElement,
        ObjectElement,
    },
};

/// Counted, randomly indexed access to the elements of a source diagram.
///
/// Every positional getter fails with [`FerryError::Index`] when
/// `index >= count`. Getters that resolve links fail with
/// [`FerryError::Reference`] when a link is missing and with
/// [`FerryError::UnindexedElement`] when it points at a non-addressable
/// element. Text attributes are never absent; missing values are normalized.
pub trait InputAdapter {
    fn actor_count(&self) -> usize;
    fn actor(&self, index: usize) -> Result<ActorElement, FerryError>;

    fn object_count(&self) -> usize;
    fn object(&self, index: usize) -> Result<ObjectElement, FerryError>;

    /// Activation slots are anonymous, so only their number is exposed.
    fn activation_count(&self) -> usize;

    fn lifeline_count(&self) -> usize;
    fn lifeline(&self, index: usize) -> Result<LifelineElement, FerryError>;

    fn method_count(&self) -> usize;
    fn method(&self, index: usize) -> Result<MethodElement, FerryError>;

    fn guard_count(&self) -> usize;
    fn guard(&self, index: usize) -> Result<ConditionElement, FerryError>;

    fn loop_count(&self) -> usize;
    fn loop_block(&self, index: usize) -> Result<ConditionElement, FerryError>;

    fn alternative_count(&self) -> usize;
    fn alternative(&self, index: usize) -> Result<AlternativeElement, FerryError>;

    /// Number of elements of `kind`.
    fn count(&self, kind: ElementKind) -> usize {
        match kind {
            ElementKind::Actor => self.actor_count(),
            ElementKind::Object => self.object_count(),
            ElementKind::ActivationSlot => self.activation_count(),
            ElementKind::Lifeline => self.lifeline_count(),
            ElementKind::Method => self.method_count(),
            ElementKind::Guard => self.guard_count(),
            ElementKind::Loop => self.loop_count(),
            ElementKind::Alternative => self.alternative_count(),
        }
    }

    /// Number of elements that take part in the virtual index space.
    fn addressable_count(&self) -> usize {
        ElementKind::ADDRESSABLE
            .into_iter()
            .map(|kind| self.count(kind))
            .sum()
    }
}

/// Fails with [`FerryError::Index`] unless `index < count`.
pub(crate) fn check_index(
    kind: ElementKind,
    index: usize,
    count: usize,
) -> Result<(), FerryError> {
    if index < count {
        Ok(())
    } else {
        Err(FerryError::Index(format!(
            "{kind} index {index} is out of range (count: {count})"
        )))
    }
}
