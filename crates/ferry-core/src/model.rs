//! Source object model of a UML sequence diagram.
//!
//! A [`SequenceDiagram`] is an insertion-ordered collection of [`Symbol`]s.
//! Every symbol has a native [`Id`], a [`SymbolKind`] carrying its attributes,
//! and optional `source` / `destination` links to other symbols by id. The
//! model knows nothing about virtual indices; it only guarantees that ids are
//! unique and that every link names an existing symbol.
//!
//! # Loading from TOML
//!
//! ```
//! use ferry_core::{kind::ElementKind, model::SequenceDiagram};
//!
//! let source = r#"
//!     [[symbols]]
//!     id = "user"
//!     kind = "actor"
//!     name = "User"
//!
//!     [[symbols]]
//!     id = "svc"
//!     kind = "class"
//!     instance_name = "svc"
//!     class_name = "Service"
//!
//!     [[symbols]]
//!     id = "login"
//!     kind = "synchronous_message"
//!     name = "login"
//!     source = "user"
//!     destination = "svc"
//! "#;
//!
//! let diagram: SequenceDiagram = toml::from_str(source).unwrap();
//! assert_eq!(diagram.len(), 3);
//! assert_eq!(diagram.symbols_of(ElementKind::Method).count(), 1);
//! ```

use std::collections::HashSet;

use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use thiserror::Error;

use crate::{identifier::Id, kind::ElementKind};

/// Errors raised while assembling a [`SequenceDiagram`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("duplicate symbol id `{0}`")]
    DuplicateId(Id),

    #[error("symbol `{symbol}` links to unknown symbol `{target}`")]
    UnknownReference { symbol: Id, target: Id },
}

/// An argument of a call message.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MessageArgument {
    name: Option<String>,
    data_type: Option<String>,
    initialized_to: Option<String>,
    #[serde(default)]
    var_args: bool,
}

impl MessageArgument {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_data_type(mut self, data_type: impl Into<String>) -> Self {
        self.data_type = Some(data_type.into());
        self
    }

    pub fn with_initialized_to(mut self, value: impl Into<String>) -> Self {
        self.initialized_to = Some(value.into());
        self
    }

    /// Marks the argument as followed by a variadic tail.
    pub fn with_var_args(mut self) -> Self {
        self.var_args = true;
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn data_type(&self) -> Option<&str> {
        self.data_type.as_deref()
    }

    pub fn initialized_to(&self) -> Option<&str> {
        self.initialized_to.as_deref()
    }

    pub fn var_args(&self) -> bool {
        self.var_args
    }
}

/// Payload shared by synchronous and create messages.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Call {
    name: Option<String>,
    return_type: Option<String>,
    #[serde(default)]
    arguments: Vec<MessageArgument>,
}

impl Call {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// A call whose name is missing from the model.
    pub fn unnamed() -> Self {
        Self::default()
    }

    pub fn with_return_type(mut self, return_type: impl Into<String>) -> Self {
        self.return_type = Some(return_type.into());
        self
    }

    pub fn with_argument(mut self, argument: MessageArgument) -> Self {
        self.arguments.push(argument);
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn return_type(&self) -> Option<&str> {
        self.return_type.as_deref()
    }

    pub fn arguments(&self) -> &[MessageArgument] {
        &self.arguments
    }
}

/// A textual condition, as owned by condition, loop and alternatives symbols.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Guard {
    condition: Option<String>,
}

impl Guard {
    pub fn new(condition: impl Into<String>) -> Self {
        Self {
            condition: Some(condition.into()),
        }
    }

    pub fn condition(&self) -> Option<&str> {
        self.condition.as_deref()
    }
}

/// Kind-specific attributes of a [`Symbol`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SymbolKind {
    Actor {
        name: Option<String>,
    },
    Class {
        instance_name: Option<String>,
        class_name: Option<String>,
    },
    ActivationBox,
    Lifeline,
    SynchronousMessage(Call),
    CreateMessage(Call),
    ReturnMessage {
        return_name: Option<String>,
    },
    Condition(Guard),
    Loop {
        condition: Option<Guard>,
    },
    Alternatives {
        condition: Option<Guard>,
    },
}

impl SymbolKind {
    pub fn actor(name: impl Into<String>) -> Self {
        Self::Actor {
            name: Some(name.into()),
        }
    }

    pub fn class(instance_name: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self::Class {
            instance_name: Some(instance_name.into()),
            class_name: Some(class_name.into()),
        }
    }

    /// Maps the symbol onto the model-independent element kind.
    pub fn element_kind(&self) -> ElementKind {
        match self {
            Self::Actor { .. } => ElementKind::Actor,
            Self::Class { .. } => ElementKind::Object,
            Self::ActivationBox => ElementKind::ActivationSlot,
            Self::Lifeline => ElementKind::Lifeline,
            Self::SynchronousMessage(_) | Self::CreateMessage(_) | Self::ReturnMessage { .. } => {
                ElementKind::Method
            }
            Self::Condition(_) => ElementKind::Guard,
            Self::Loop { .. } => ElementKind::Loop,
            Self::Alternatives { .. } => ElementKind::Alternative,
        }
    }
}

/// A single element of the source diagram.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Symbol {
    id: Id,
    #[serde(flatten)]
    kind: SymbolKind,
    source: Option<Id>,
    destination: Option<Id>,
}

impl Symbol {
    pub fn new(id: impl Into<Id>, kind: SymbolKind) -> Self {
        Self {
            id: id.into(),
            kind,
            source: None,
            destination: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<Id>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_destination(mut self, destination: impl Into<Id>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn kind(&self) -> &SymbolKind {
        &self.kind
    }

    pub fn element_kind(&self) -> ElementKind {
        self.kind.element_kind()
    }

    pub fn source(&self) -> Option<Id> {
        self.source
    }

    pub fn destination(&self) -> Option<Id> {
        self.destination
    }

    fn links(&self) -> impl Iterator<Item = Id> {
        self.source.into_iter().chain(self.destination)
    }
}

/// An insertion-ordered, reference-checked sequence diagram.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "DiagramDocument")]
pub struct SequenceDiagram {
    symbols: IndexMap<Id, Symbol>,
}

/// Serialized layout of a diagram file.
#[derive(Deserialize)]
struct DiagramDocument {
    #[serde(default)]
    symbols: Vec<Symbol>,
}

impl TryFrom<DiagramDocument> for SequenceDiagram {
    type Error = ModelError;

    fn try_from(document: DiagramDocument) -> Result<Self, Self::Error> {
        Self::new(document.symbols)
    }
}

impl SequenceDiagram {
    /// Builds a diagram from symbols in traversal order.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DuplicateId`] when two symbols share an id and
    /// [`ModelError::UnknownReference`] when a `source` or `destination`
    /// link names a symbol that is not part of the diagram.
    pub fn new(symbols: impl IntoIterator<Item = Symbol>) -> Result<Self, ModelError> {
        let mut map = IndexMap::new();
        for symbol in symbols {
            let id = symbol.id();
            if map.insert(id, symbol).is_some() {
                return Err(ModelError::DuplicateId(id));
            }
        }

        let known: HashSet<Id> = map.keys().copied().collect();
        for symbol in map.values() {
            if let Some(target) = symbol.links().find(|target| !known.contains(target)) {
                return Err(ModelError::UnknownReference {
                    symbol: symbol.id(),
                    target,
                });
            }
        }

        debug!(symbols_count = map.len(); "Sequence diagram assembled");
        Ok(Self { symbols: map })
    }

    /// Iterates over all symbols in traversal order.
    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.values()
    }

    /// Iterates over the symbols of one element kind in traversal order.
    pub fn symbols_of(&self, kind: ElementKind) -> impl Iterator<Item = &Symbol> {
        self.symbols
            .values()
            .filter(move |symbol| symbol.element_kind() == kind)
    }

    pub fn symbol(&self, id: Id) -> Option<&Symbol> {
        self.symbols.get(&id)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
