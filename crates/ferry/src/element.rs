//! Model-independent element descriptions.
//!
//! These records are what an [`InputAdapter`](crate::input::InputAdapter)
//! hands to the exporter: attributes are already normalized and every
//! cross-reference is expressed as a [`VirtualIndex`].

use crate::translate::VirtualIndex;

/// A participant outside the system under design.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorElement {
    name: String,
}

impl ActorElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Returns the actor's display name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// An object box, rendered as `instance:Class`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectElement {
    instance_name: String,
    class_name: String,
}

impl ObjectElement {
    pub fn new(instance_name: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            instance_name: instance_name.into(),
            class_name: class_name.into(),
        }
    }

    /// Returns the part before the colon.
    pub fn instance_name(&self) -> &str {
        &self.instance_name
    }

    /// Returns the part after the colon.
    pub fn class_name(&self) -> &str {
        &self.class_name
    }
}

/// An addressable connector between two addressable elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifelineElement {
    from: VirtualIndex,
    to: VirtualIndex,
    active: bool,
}

impl LifelineElement {
    pub fn new(from: VirtualIndex, to: VirtualIndex, active: bool) -> Self {
        Self { from, to, active }
    }

    /// Returns the virtual index of the element the lifeline starts at.
    pub fn from(&self) -> VirtualIndex {
        self.from
    }

    /// Returns the virtual index of the element the lifeline ends at.
    pub fn to(&self) -> VirtualIndex {
        self.to
    }

    /// Returns `true` if the lifeline is drawn solid rather than dashed.
    pub fn active(&self) -> bool {
        self.active
    }
}

/// A labelled message from caller to callee. Method calls are not addressable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodElement {
    from: VirtualIndex,
    to: VirtualIndex,
    text: String,
}

impl MethodElement {
    pub fn new(from: VirtualIndex, to: VirtualIndex, text: impl Into<String>) -> Self {
        Self {
            from,
            to,
            text: text.into(),
        }
    }

    /// Returns the virtual index of the caller.
    pub fn from(&self) -> VirtualIndex {
        self.from
    }

    /// Returns the virtual index of the callee.
    pub fn to(&self) -> VirtualIndex {
        self.to
    }

    /// Returns the formatted call or return label.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A guard (constraint) or loop block; both carry only a condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionElement {
    text: String,
}

impl ConditionElement {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Returns the condition text.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// An alternative block with a condition and an `else` branch label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlternativeElement {
    text: String,
    text_else: String,
}

impl AlternativeElement {
    pub fn new(text: impl Into<String>, text_else: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            text_else: text_else.into(),
        }
    }

    /// Returns the condition of the first branch.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the label of the `else` branch.
    pub fn text_else(&self) -> &str {
        &self.text_else
    }
}
