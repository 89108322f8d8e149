//! The closed set of element kinds handled during an export.

use std::fmt;

/// Kind of a diagram element, independent of any concrete object model.
///
/// Only the four *addressable* kinds may be the endpoint of a connector and
/// only they take part in the virtual index space. They are numbered in the
/// order given by [`ElementKind::ADDRESSABLE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Actor,
    Object,
    ActivationSlot,
    Lifeline,
    Method,
    Guard,
    Loop,
    Alternative,
}

impl ElementKind {
    /// Addressable kinds in virtual index order.
    pub const ADDRESSABLE: [ElementKind; 4] = [
        ElementKind::Actor,
        ElementKind::Object,
        ElementKind::ActivationSlot,
        ElementKind::Lifeline,
    ];

    /// Returns `true` if elements of this kind can be connector endpoints.
    pub fn is_addressable(self) -> bool {
        Self::ADDRESSABLE.contains(&self)
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Actor => "actor",
            Self::Object => "object",
            Self::ActivationSlot => "activation slot",
            Self::Lifeline => "lifeline",
            Self::Method => "method",
            Self::Guard => "guard",
            Self::Loop => "loop",
            Self::Alternative => "alternative",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
