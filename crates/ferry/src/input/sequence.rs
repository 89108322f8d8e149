//! [`InputAdapter`] over the ferry-core sequence diagram model.

use std::collections::HashMap;

use log::{debug, trace};

use ferry_core::{
    identifier::Id,
    kind::ElementKind,
    model::{Guard, SequenceDiagram, Symbol, SymbolKind},
};

use super::{
    InputAdapter, check_index,
    text::{ELSE_TEXT, format_method_text, format_return_text},
};
use crate::{
    FerryError,
    element::{
        ActorElement, AlternativeElement, ConditionElement, LifelineElement, MethodElement,
        ObjectElement,
    },
    translate::{SourceIndex, VirtualIndex},
};

/// Reads a [`SequenceDiagram`] for export.
///
/// Symbols are grouped by [`ElementKind`] once, at construction, and the
/// addressable ones are numbered into a [`SourceIndex`] in the order actors,
/// objects, activation boxes, lifelines. Neither is modified afterwards.
///
/// # Examples
///
/// ```
/// use ferry::input::{InputAdapter, SequenceReader};
/// use ferry_core::model::{SequenceDiagram, Symbol, SymbolKind};
///
/// let diagram = SequenceDiagram::new([
///     Symbol::new("svc", SymbolKind::class("svc", "Service")),
///     Symbol::new("user", SymbolKind::actor("User")),
/// ])
/// .unwrap();
///
/// let reader = SequenceReader::new(&diagram);
/// assert_eq!(reader.actor_count(), 1);
/// // Actors are numbered before objects regardless of declaration order.
/// assert_eq!(reader.index().get("user".into()).unwrap().get(), 0);
/// assert_eq!(reader.index().get("svc".into()).unwrap().get(), 1);
/// ```
#[derive(Debug)]
pub struct SequenceReader<'a> {
    diagram: &'a SequenceDiagram,
    by_kind: HashMap<ElementKind, Vec<&'a Symbol>>,
    index: SourceIndex,
}

impl<'a> SequenceReader<'a> {
    pub fn new(diagram: &'a SequenceDiagram) -> Self {
        let mut by_kind: HashMap<ElementKind, Vec<&'a Symbol>> = HashMap::new();
        for symbol in diagram.symbols() {
            by_kind.entry(symbol.element_kind()).or_default().push(symbol);
        }

        let index = SourceIndex::build(ElementKind::ADDRESSABLE.into_iter().flat_map(|kind| {
            by_kind
                .get(&kind)
                .into_iter()
                .flatten()
                .map(|symbol| symbol.id())
        }));

        debug!(
            symbols_count = diagram.len(),
            addressable_count = index.len();
            "Source index built"
        );

        Self {
            diagram,
            by_kind,
            index,
        }
    }

    /// The native id to virtual index table of this reader.
    pub fn index(&self) -> &SourceIndex {
        &self.index
    }

    fn symbols(&self, kind: ElementKind) -> &[&'a Symbol] {
        self.by_kind.get(&kind).map_or(&[], Vec::as_slice)
    }

    fn symbol(&self, kind: ElementKind, index: usize) -> Result<&'a Symbol, FerryError> {
        let symbols = self.symbols(kind);
        check_index(kind, index, symbols.len())?;
        trace!(kind:% = kind, index, id:% = symbols[index].id(); "Reading symbol");
        Ok(symbols[index])
    }

    /// Translates a link of the element at `kind`/`index` into a virtual index.
    fn resolve_link(
        &self,
        link: Option<Id>,
        role: &str,
        kind: ElementKind,
        index: usize,
    ) -> Result<VirtualIndex, FerryError> {
        let id = link
            .ok_or_else(|| FerryError::Reference(format!("{kind} {index} has no {role}")))?;

        self.index
            .get(id)
            .ok_or_else(|| FerryError::UnindexedElement {
                id,
                context: format!("(the {role} of {kind} {index})"),
            })
    }

    /// The destination of a lifeline is its explicit link if present,
    /// otherwise the first symbol that names the lifeline as its source.
    fn lifeline_destination(&self, lifeline: &Symbol) -> Option<Id> {
        lifeline.destination().or_else(|| {
            self.diagram
                .symbols()
                .find(|symbol| symbol.source() == Some(lifeline.id()))
                .map(Symbol::id)
        })
    }
}

fn guard_text(guard: Option<&Guard>) -> String {
    guard
        .and_then(Guard::condition)
        .unwrap_or_default()
        .to_owned()
}

impl InputAdapter for SequenceReader<'_> {
    fn actor_count(&self) -> usize {
        self.symbols(ElementKind::Actor).len()
    }

    fn actor(&self, index: usize) -> Result<ActorElement, FerryError> {
        match self.symbol(ElementKind::Actor, index)?.kind() {
            SymbolKind::Actor { name } => Ok(ActorElement::new(name.as_deref().unwrap_or_default())),
            other => unreachable!("{other:?} grouped as an actor"),
        }
    }

    fn object_count(&self) -> usize {
        self.symbols(ElementKind::Object).len()
    }

    fn object(&self, index: usize) -> Result<ObjectElement, FerryError> {
        match self.symbol(ElementKind::Object, index)?.kind() {
            SymbolKind::Class {
                instance_name,
                class_name,
            } => Ok(ObjectElement::new(
                instance_name.as_deref().unwrap_or_default(),
                class_name.as_deref().unwrap_or_default(),
            )),
            other => unreachable!("{other:?} grouped as an object"),
        }
    }

    fn activation_count(&self) -> usize {
        self.symbols(ElementKind::ActivationSlot).len()
    }

    fn lifeline_count(&self) -> usize {
        self.symbols(ElementKind::Lifeline).len()
    }

    fn lifeline(&self, index: usize) -> Result<LifelineElement, FerryError> {
        let kind = ElementKind::Lifeline;
        let lifeline = self.symbol(kind, index)?;

        let from = self.resolve_link(lifeline.source(), "source", kind, index)?;
        let to = self.resolve_link(
            self.lifeline_destination(lifeline),
            "destination",
            kind,
            index,
        )?;

        // The model has no notion of an inactive lifeline.
        Ok(LifelineElement::new(from, to, true))
    }

    fn method_count(&self) -> usize {
        self.symbols(ElementKind::Method).len()
    }

    fn method(&self, index: usize) -> Result<MethodElement, FerryError> {
        let kind = ElementKind::Method;
        let method = self.symbol(kind, index)?;

        let from = self.resolve_link(method.source(), "source", kind, index)?;
        let to = self.resolve_link(method.destination(), "destination", kind, index)?;

        let text = match method.kind() {
            SymbolKind::SynchronousMessage(call) | SymbolKind::CreateMessage(call) => {
                format_method_text(call.name(), call.arguments(), call.return_type())
            }
            SymbolKind::ReturnMessage { return_name } => {
                format_return_text(return_name.as_deref())
            }
            other => unreachable!("{other:?} grouped as a method"),
        };

        Ok(MethodElement::new(from, to, text))
    }

    fn guard_count(&self) -> usize {
        self.symbols(ElementKind::Guard).len()
    }

    fn guard(&self, index: usize) -> Result<ConditionElement, FerryError> {
        match self.symbol(ElementKind::Guard, index)?.kind() {
            SymbolKind::Condition(guard) => Ok(ConditionElement::new(guard_text(Some(guard)))),
            other => unreachable!("{other:?} grouped as a guard"),
        }
    }

    fn loop_count(&self) -> usize {
        self.symbols(ElementKind::Loop).len()
    }

    fn loop_block(&self, index: usize) -> Result<ConditionElement, FerryError> {
        match self.symbol(ElementKind::Loop, index)?.kind() {
            SymbolKind::Loop { condition } => {
                Ok(ConditionElement::new(guard_text(condition.as_ref())))
            }
            other => unreachable!("{other:?} grouped as a loop"),
        }
    }

    fn alternative_count(&self) -> usize {
        self.symbols(ElementKind::Alternative).len()
    }

    fn alternative(&self, index: usize) -> Result<AlternativeElement, FerryError> {
        match self.symbol(ElementKind::Alternative, index)?.kind() {
            // Else branches carry no text in the model.
            SymbolKind::Alternatives { condition } => Ok(AlternativeElement::new(
                guard_text(condition.as_ref()),
                ELSE_TEXT,
            )),
            other => unreachable!("{other:?} grouped as an alternative"),
        }
    }
}
