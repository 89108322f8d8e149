//! [`OutputAdapter`] producing SVG files through the target [`Document`].

use std::{fs, path::Path};

use log::{debug, info, trace};

use ferry_core::style::ConnectorStyle;

use super::{OutputAdapter, OutputType, Phase, resolve_output_path};
use crate::{
    FerryError,
    target::{ConnectionPoint, Document, Master, ShapeId},
    translate::{TargetIndex, VirtualIndex},
};

/// Writes sequence diagrams as SVG.
///
/// Holds one document at a time together with the table translating
/// virtual indices into the shape ids the document handed out.
#[derive(Debug, Default)]
pub struct SvgWriter {
    document: Option<Document>,
    index: TargetIndex<ShapeId>,
    phase: Phase,
    style: ConnectorStyle,
}

impl SvgWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `style` as the base color and width of lifelines and calls.
    pub fn with_style(style: ConnectorStyle) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The document under construction, if initialized.
    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    /// Shape id registered for `index`, if any.
    pub fn shape_id(&self, index: VirtualIndex) -> Option<ShapeId> {
        self.index.resolve(index)
    }

    /// Number of addressable elements registered since initialization.
    pub fn registered_count(&self) -> usize {
        self.index.len()
    }

    fn set_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            debug!(from:% = self.phase, to:% = phase; "Writer phase changed");
            self.phase = phase;
        }
    }

    /// Checks that `operation` may add elements and returns the document.
    fn populate(&mut self, operation: &str) -> Result<&mut Document, FerryError> {
        if !self.phase.accepts_elements() {
            return Err(FerryError::Phase(format!(
                "`{operation}` called while the writer is {}",
                self.phase
            )));
        }
        self.set_phase(Phase::Populating);

        let phase = self.phase;
        self.document
            .as_mut()
            .ok_or_else(|| FerryError::Phase(format!("`{operation}` called while {phase}")))
    }

    fn resolve(&self, index: VirtualIndex) -> Result<ShapeId, FerryError> {
        self.index.resolve(index).ok_or_else(|| {
            FerryError::Reference(format!(
                "virtual index {index} is not registered (registered: {})",
                self.index.len()
            ))
        })
    }

    /// Creates a shape with text and registers it under the next virtual index.
    fn add_addressable(
        &mut self,
        operation: &str,
        master: Master,
        text: Option<String>,
    ) -> Result<VirtualIndex, FerryError> {
        let document = self.populate(operation)?;
        let id = document.add_shape(master);
        if let Some(text) = text {
            document.shape_mut(id)?.set_text([text]);
        }

        let index = self.index.register(id);
        trace!(index:% = index, id:% = id, master:% = master; "Registered addressable shape");
        Ok(index)
    }

    fn add_annotation(
        &mut self,
        operation: &str,
        master: Master,
        lines: &[&str],
    ) -> Result<ShapeId, FerryError> {
        let document = self.populate(operation)?;
        let id = document.add_shape(master);
        document
            .shape_mut(id)?
            .set_text(lines.iter().copied().filter(|line| !line.is_empty()));
        Ok(id)
    }

    /// Creates a connector glued between the shapes of two virtual indices.
    ///
    /// Both indices are resolved before anything is created.
    fn add_connector(
        &mut self,
        operation: &str,
        from: VirtualIndex,
        to: VirtualIndex,
        style: ConnectorStyle,
        text: &str,
        (from_point, to_point): (ConnectionPoint, ConnectionPoint),
    ) -> Result<ShapeId, FerryError> {
        if !self.phase.accepts_elements() {
            return Err(FerryError::Phase(format!(
                "`{operation}` called while the writer is {}",
                self.phase
            )));
        }
        let from_id = self.resolve(from)?;
        let to_id = self.resolve(to)?;

        let document = self.populate(operation)?;
        let connector = document.add_shape(Master::Connector);
        let shape = document.shape_mut(connector)?;
        shape.set_style(style);
        if !text.is_empty() {
            shape.set_text([text]);
        }
        document.connect(connector, from_id, from_point, to_id, to_point)?;

        Ok(connector)
    }
}

impl OutputAdapter for SvgWriter {
    fn initialize_diagram(&mut self) -> Result<String, FerryError> {
        self.document = Some(Document::new());
        self.index.clear();
        self.set_phase(Phase::Initialized);

        Ok("Empty diagram created".to_string())
    }

    fn add_actor(&mut self, name: &str) -> Result<String, FerryError> {
        let index = self.add_addressable("add_actor", Master::Actor, Some(name.to_string()))?;
        Ok(format!("Actor: {name} added at index {index}"))
    }

    fn add_class_block(
        &mut self,
        instance_name: &str,
        class_name: &str,
    ) -> Result<String, FerryError> {
        let text = format!("{instance_name}:{class_name}");
        let index = self.add_addressable("add_class_block", Master::Object, Some(text))?;
        Ok(format!(
            "Class: {class_name} with instance: {instance_name} added at index {index}"
        ))
    }

    fn add_activation_blocks(&mut self, count: usize) -> Result<String, FerryError> {
        // Checked up front so a zero count still enforces the phase.
        self.populate("add_activation_blocks")?;

        let indices = (0..count)
            .map(|_| self.add_addressable("add_activation_blocks", Master::Activation, None))
            .collect::<Result<Vec<_>, _>>()?;

        match (indices.first(), indices.last()) {
            (Some(first), Some(last)) => Ok(format!(
                "{count} activation boxes added at indices {first}..={last}"
            )),
            _ => Ok("No activation boxes added".to_string()),
        }
    }

    fn add_lifeline(
        &mut self,
        from: VirtualIndex,
        to: VirtualIndex,
        active: bool,
    ) -> Result<String, FerryError> {
        let style = ConnectorStyle::lifeline(self.style.color(), self.style.width(), active);
        let connector = self.add_connector(
            "add_lifeline",
            from,
            to,
            style,
            "",
            (ConnectionPoint::Bottom, ConnectionPoint::Top),
        )?;

        let index = self.index.register(connector);
        trace!(index:% = index, id:% = connector; "Registered lifeline");
        Ok(format!(
            "Lifeline from index: {from} to index: {to} active: {active} added at index {index}"
        ))
    }

    fn add_method(
        &mut self,
        from: VirtualIndex,
        to: VirtualIndex,
        text: &str,
    ) -> Result<String, FerryError> {
        let style = ConnectorStyle::message(self.style.color(), self.style.width());
        self.add_connector(
            "add_method",
            from,
            to,
            style,
            text,
            (ConnectionPoint::Right, ConnectionPoint::Left),
        )?;

        Ok(format!(
            "Method from index: {from} to index: {to} with text: {text} added"
        ))
    }

    fn add_constraint(&mut self, text: &str) -> Result<String, FerryError> {
        self.add_annotation("add_constraint", Master::Constraint, &[text])?;
        Ok(format!("Constraint with text: {text} added"))
    }

    fn add_loop(&mut self, text: &str) -> Result<String, FerryError> {
        self.add_annotation("add_loop", Master::Loop, &["loop", text])?;
        Ok(format!("Loop with constraint: {text} added"))
    }

    fn add_alternative(&mut self, text: &str, text_else: &str) -> Result<String, FerryError> {
        self.add_annotation("add_alternative", Master::Alternative, &["alt", text, text_else])?;
        Ok(format!(
            "Alternative block with if statement: {text} and else statement: {text_else} added"
        ))
    }

    fn finalize_diagram(&mut self) -> Result<String, FerryError> {
        let document = self.populate("finalize_diagram")?;
        document.arrange();
        let shapes_count = document.len();

        self.set_phase(Phase::Finalized);
        Ok(format!("{shapes_count} shapes positioned in the diagram"))
    }

    fn save_to_file(
        &mut self,
        path: &Path,
        name: &str,
        output_type: &OutputType,
        overwrite: bool,
    ) -> Result<String, FerryError> {
        if !self.phase.is_finalized() {
            return Err(FerryError::Phase(format!(
                "`save_to_file` called while the writer is {}",
                self.phase
            )));
        }
        if name.is_empty() {
            return Err(FerryError::Config("output file name is empty".to_string()));
        }
        if output_type.extension().is_empty() {
            return Err(FerryError::Config(format!(
                "output type {} has no file extension",
                output_type.format()
            )));
        }

        let directory = if path.as_os_str().is_empty() {
            Path::new(".")
        } else {
            path
        };
        fs::create_dir_all(directory)?;

        let target = resolve_output_path(directory, name, output_type.extension(), overwrite);
        let document = self
            .document
            .as_ref()
            .ok_or_else(|| FerryError::Phase("no document to save".to_string()))?;
        document.save(&target, output_type.format(), overwrite)?;

        self.set_phase(Phase::Saved);
        info!(path:? = target; "Diagram saved");
        Ok(format!("Diagram saved as: {}", target.display()))
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn vi(index: usize) -> VirtualIndex {
        VirtualIndex::new(index)
    }

    fn initialized() -> SvgWriter {
        let mut writer = SvgWriter::new();
        writer.initialize_diagram().unwrap();
        writer
    }

    #[test]
    fn test_add_before_initialize_is_phase_error() {
        let mut writer = SvgWriter::new();

        let err = writer.add_actor("User").unwrap_err();
        assert!(matches!(err, FerryError::Phase(_)), "{err:?}");

        let err = writer.finalize_diagram().unwrap_err();
        assert!(matches!(err, FerryError::Phase(_)), "{err:?}");
        assert_eq!(writer.phase(), Phase::Uninitialized);
    }

    #[test]
    fn test_addressable_shapes_are_registered_in_order() {
        let mut writer = initialized();

        writer.add_actor("User").unwrap();
        writer.add_class_block("svc", "Service").unwrap();
        writer.add_activation_blocks(2).unwrap();
        writer.add_lifeline(vi(0), vi(2), true).unwrap();

        assert_eq!(writer.registered_count(), 5);
        assert_eq!(writer.phase(), Phase::Populating);

        let document = writer.document().unwrap();
        let master = |index| {
            let id = writer.shape_id(vi(index)).unwrap();
            document.shape(id).unwrap().master()
        };
        assert_eq!(master(0), Master::Actor);
        assert_eq!(master(1), Master::Object);
        assert_eq!(master(2), Master::Activation);
        assert_eq!(master(3), Master::Activation);
        assert_eq!(master(4), Master::Connector);

        let object = document.shape(writer.shape_id(vi(1)).unwrap()).unwrap();
        assert_eq!(object.text(), ["svc:Service"]);
    }

    #[test]
    fn test_shape_ids_drift_from_virtual_indices() {
        let mut writer = initialized();

        writer.add_actor("A").unwrap();
        writer.add_actor("B").unwrap();
        writer.add_method(vi(0), vi(1), "ping()").unwrap();
        writer.add_constraint("x > 1").unwrap();
        writer.add_class_block("c", "C").unwrap();

        assert_eq!(writer.shape_id(vi(0)).unwrap().get(), 1);
        assert_eq!(writer.shape_id(vi(1)).unwrap().get(), 2);
        assert_eq!(writer.shape_id(vi(2)).unwrap().get(), 5);
        assert_eq!(writer.registered_count(), 3);
    }

    #[test]
    fn test_lifeline_style_and_glue_points() {
        let mut writer = initialized();
        writer.add_actor("User").unwrap();
        writer.add_activation_blocks(1).unwrap();

        writer.add_lifeline(vi(0), vi(1), false).unwrap();

        let document = writer.document().unwrap();
        let lifeline = document.shape(writer.shape_id(vi(2)).unwrap()).unwrap();
        let style = lifeline.style().unwrap();
        assert_eq!(style.pattern(), ferry_core::style::LinePattern::Dashed);
        assert!(!style.direction().is_directional());

        let connection = lifeline.connection().unwrap();
        assert_eq!(connection.from().1, ConnectionPoint::Bottom);
        assert_eq!(connection.to().1, ConnectionPoint::Top);
    }

    #[test]
    fn test_unresolved_lifeline_adds_nothing() {
        let mut writer = initialized();
        writer.add_actor("User").unwrap();

        let err = writer.add_lifeline(vi(0), vi(1), true).unwrap_err();
        assert!(matches!(err, FerryError::Reference(_)), "{err:?}");
        assert_eq!(writer.registered_count(), 1);
        assert_eq!(writer.document().unwrap().len(), 1);
    }

    #[test]
    fn test_method_is_not_registered() {
        let mut writer = initialized();
        writer.add_actor("User").unwrap();
        writer.add_class_block("svc", "Service").unwrap();

        writer.add_method(vi(0), vi(1), "login(name:string)").unwrap();

        assert_eq!(writer.registered_count(), 2);
        let document = writer.document().unwrap();
        let method = document.shapes().last().unwrap();
        assert_eq!(method.master(), Master::Connector);
        assert_eq!(method.text(), ["login(name:string)"]);
        assert!(method.style().unwrap().direction().is_directional());

        let err = writer.add_method(vi(0), vi(7), "lost()").unwrap_err();
        assert!(matches!(err, FerryError::Reference(_)), "{err:?}");
    }

    #[test]
    fn test_finalize_then_add_is_phase_error() {
        let mut writer = initialized();
        writer.add_actor("User").unwrap();
        writer.finalize_diagram().unwrap();

        let err = writer.add_actor("Late").unwrap_err();
        assert!(matches!(err, FerryError::Phase(_)), "{err:?}");
        let err = writer.finalize_diagram().unwrap_err();
        assert!(matches!(err, FerryError::Phase(_)), "{err:?}");
    }

    #[test]
    fn test_initialize_resets_counter() {
        let mut writer = initialized();
        writer.add_actor("User").unwrap();
        writer.finalize_diagram().unwrap();

        writer.initialize_diagram().unwrap();

        assert_eq!(writer.phase(), Phase::Initialized);
        assert_eq!(writer.registered_count(), 0);
        assert!(writer.document().unwrap().is_empty());
    }

    #[test]
    fn test_save_before_finalize_is_phase_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = initialized();

        let err = writer
            .save_to_file(dir.path(), "diagram", &OutputType::svg(), false)
            .unwrap_err();
        assert!(matches!(err, FerryError::Phase(_)), "{err:?}");
    }

    #[test]
    fn test_save_validates_name_and_extension() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = initialized();
        writer.finalize_diagram().unwrap();

        let err = writer
            .save_to_file(dir.path(), "", &OutputType::svg(), false)
            .unwrap_err();
        assert!(matches!(err, FerryError::Config(_)), "{err:?}");

        let no_extension = OutputType::new("", crate::target::OutputFormat::Svg);
        let err = writer
            .save_to_file(dir.path(), "diagram", &no_extension, false)
            .unwrap_err();
        assert!(matches!(err, FerryError::Config(_)), "{err:?}");
    }

    #[test]
    fn test_save_creates_directories_and_avoids_collisions() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("out").join("diagrams");
        let mut writer = initialized();
        writer.add_actor("User").unwrap();
        writer.finalize_diagram().unwrap();

        writer
            .save_to_file(&nested, "diagram", &OutputType::svg(), false)
            .unwrap();
        let message = writer
            .save_to_file(&nested, "diagram", &OutputType::svg(), false)
            .unwrap();

        assert_eq!(writer.phase(), Phase::Saved);
        assert!(nested.join("diagram.svg").exists());
        assert!(nested.join("diagram1.svg").exists());
        assert!(message.ends_with("diagram1.svg"), "{message}");
    }

    #[test]
    fn test_save_with_overwrite_replaces() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("diagram.svg"), "old").unwrap();

        let mut writer = initialized();
        writer.add_actor("User").unwrap();
        writer.finalize_diagram().unwrap();
        writer
            .save_to_file(dir.path(), "diagram", &OutputType::svg(), true)
            .unwrap();

        let content = fs::read_to_string(dir.path().join("diagram.svg")).unwrap();
        assert!(content.contains("User"), "{content}");
        assert!(!dir.path().join("diagram1.svg").exists());
    }

    proptest! {
        #[test]
        fn prop_counter_tracks_addressable_adds(
            actors in 0usize..6,
            objects in 0usize..6,
            activations in 0usize..6,
            annotations in 0usize..4,
        ) {
            let mut writer = initialized();

            for i in 0..actors {
                writer.add_actor(&format!("actor{i}")).unwrap();
                writer.add_constraint("noise").unwrap();
            }
            for i in 0..objects {
                writer.add_class_block(&format!("o{i}"), "Class").unwrap();
            }
            writer.add_activation_blocks(activations).unwrap();
            for _ in 0..annotations {
                writer.add_loop("again").unwrap();
            }

            let expected = actors + objects + activations;
            prop_assert_eq!(writer.registered_count(), expected);
            for k in 0..expected {
                prop_assert!(writer.shape_id(vi(k)).is_some());
            }
            prop_assert!(writer.shape_id(vi(expected)).is_none());
        }
    }
}
