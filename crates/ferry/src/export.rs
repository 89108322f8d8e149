//! Export orchestration.
//!
//! [`Exporter`] walks an [`InputAdapter`] kind by kind and replays every
//! element into an [`OutputAdapter`], then finalizes and saves the result.
//!
//! # Ordering
//!
//! Addressable kinds are replayed in the same fixed order the reader used to
//! number them (actors, objects, activation boxes, lifelines), each in index
//! order. That is what makes the Nth addressable element on both sides the
//! same logical element; nothing checks it at runtime.
//!
//! ```text
//! initialize -> actors -> objects -> activation boxes -> lifelines
//!            -> methods -> guards -> loops -> alternatives
//!            -> finalize -> save
//! ```

use std::{
    fmt::Write as _,
    io,
    path::{Path, PathBuf},
};

use log::{debug, info, trace};

use ferry_core::kind::ElementKind;

use crate::{
    FerryError,
    config::{AppConfig, DEFAULT_FILE_NAME},
    input::InputAdapter,
    output::{OutputAdapter, OutputType, SvgWriter},
};

const SEPARATOR: &str = "--------------------------------";

/// Drives an export from an [`InputAdapter`] into an [`OutputAdapter`].
///
/// # Examples
///
/// ```
/// use ferry::{Exporter, input::SequenceReader};
/// use ferry_core::model::{SequenceDiagram, Symbol, SymbolKind};
///
/// let diagram = SequenceDiagram::new([Symbol::new("user", SymbolKind::actor("User"))]).unwrap();
/// let dir = tempfile::tempdir().unwrap();
///
/// let mut exporter = Exporter::new();
/// exporter.set_output_file(dir.path(), "Login").unwrap();
///
/// let mut transcript = Vec::new();
/// exporter
///     .export_file(&SequenceReader::new(&diagram), Some(&mut transcript))
///     .unwrap();
///
/// assert!(dir.path().join("Login.svg").exists());
/// assert!(String::from_utf8(transcript).unwrap().contains("Input Actors: 1"));
/// ```
pub struct Exporter {
    overwrite: bool,
    file_path: PathBuf,
    file_name: String,
    file_type: OutputType,
    output: Box<dyn OutputAdapter>,
}

impl Default for Exporter {
    fn default() -> Self {
        Self {
            overwrite: false,
            file_path: PathBuf::new(),
            file_name: DEFAULT_FILE_NAME.to_string(),
            file_type: OutputType::default(),
            output: Box::new(SvgWriter::new()),
        }
    }
}

impl Exporter {
    /// An exporter writing `SequenceDiagram.svg` to the current directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an exporter from the output and style sections of `config`.
    ///
    /// # Errors
    ///
    /// Returns [`FerryError::Config`] for an empty file name or invalid
    /// style values.
    pub fn from_config(config: &AppConfig) -> Result<Self, FerryError> {
        let style = config
            .style()
            .connector_style()
            .map_err(FerryError::Config)?;

        let output = config.output();
        let mut exporter = Self::new();
        exporter.set_output_file(output.directory(), output.name())?;
        exporter.set_overwrite(output.overwrite());
        exporter.set_output_type(OutputType::from(output.format()));
        exporter.set_output_adapter(Box::new(SvgWriter::with_style(style)));

        Ok(exporter)
    }

    pub fn overwrite(&self) -> bool {
        self.overwrite
    }

    /// Whether an existing file is replaced instead of picking a free name.
    pub fn set_overwrite(&mut self, overwrite: bool) {
        self.overwrite = overwrite;
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Sets the directory and base name of the saved file.
    ///
    /// An empty `path` means the current directory.
    ///
    /// # Errors
    ///
    /// Returns [`FerryError::Config`] if `name` is empty; the previous
    /// settings are kept.
    pub fn set_output_file(
        &mut self,
        path: impl Into<PathBuf>,
        name: &str,
    ) -> Result<(), FerryError> {
        if name.is_empty() {
            return Err(FerryError::Config("output file name is empty".to_string()));
        }
        self.file_path = path.into();
        self.file_name = name.to_string();
        Ok(())
    }

    pub fn file_type(&self) -> &OutputType {
        &self.file_type
    }

    pub fn set_output_type(&mut self, file_type: OutputType) {
        self.file_type = file_type;
    }

    /// Replaces the target the diagram is written to.
    pub fn set_output_adapter(&mut self, output: Box<dyn OutputAdapter>) {
        self.output = output;
    }

    /// Exports `diagram` and saves it.
    ///
    /// A transcript with one line per element and one count line per kind
    /// is written to `transcript`, if given, whether the export succeeds or
    /// not.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by `diagram` or the output adapter,
    /// unchanged. Nothing is saved after an error. A failure to write the
    /// transcript is reported only when the export itself succeeded.
    pub fn export_file(
        &mut self,
        diagram: &dyn InputAdapter,
        transcript: Option<&mut dyn io::Write>,
    ) -> Result<(), FerryError> {
        info!(
            path:? = self.file_path,
            name = self.file_name.as_str(),
            overwrite = self.overwrite;
            "Export started"
        );

        let mut log = Transcript::default();
        log.line(SEPARATOR);

        let result = self.replay(diagram, &mut log);
        if let Err(err) = &result {
            log.line(format!("Export failed: {err}"));
        }
        log.line(SEPARATOR);

        if let Some(sink) = transcript {
            let written = log.write_to(sink);
            if result.is_ok() {
                written?;
            }
        }

        if result.is_ok() {
            info!("Export finished");
        }
        result
    }

    fn replay(
        &mut self,
        diagram: &dyn InputAdapter,
        log: &mut Transcript,
    ) -> Result<(), FerryError> {
        let output = self.output.as_mut();

        log.line(output.initialize_diagram()?);
        log.blank();

        replay_kind(log, diagram, ElementKind::Actor, "Actors", |index| {
            let actor = diagram.actor(index)?;
            output.add_actor(actor.name())
        })?;

        replay_kind(log, diagram, ElementKind::Object, "Class Blocks", |index| {
            let object = diagram.object(index)?;
            output.add_class_block(object.instance_name(), object.class_name())
        })?;

        let count = diagram.activation_count();
        debug!(kind:% = ElementKind::ActivationSlot, count; "Replaying elements");
        log.line(format!("Input Activation Blocks: {count}"));
        log.line(output.add_activation_blocks(count)?);
        log.blank();

        replay_kind(log, diagram, ElementKind::Lifeline, "Lifelines", |index| {
            let lifeline = diagram.lifeline(index)?;
            output.add_lifeline(lifeline.from(), lifeline.to(), lifeline.active())
        })?;

        replay_kind(log, diagram, ElementKind::Method, "Methods", |index| {
            let method = diagram.method(index)?;
            output.add_method(method.from(), method.to(), method.text())
        })?;

        replay_kind(log, diagram, ElementKind::Guard, "Constraints", |index| {
            output.add_constraint(diagram.guard(index)?.text())
        })?;

        replay_kind(log, diagram, ElementKind::Loop, "Loop Blocks", |index| {
            output.add_loop(diagram.loop_block(index)?.text())
        })?;

        replay_kind(
            log,
            diagram,
            ElementKind::Alternative,
            "Alternative Blocks",
            |index| {
                let alternative = diagram.alternative(index)?;
                output.add_alternative(alternative.text(), alternative.text_else())
            },
        )?;

        log.line(output.finalize_diagram()?);
        log.blank();

        log.line(output.save_to_file(
            &self.file_path,
            &self.file_name,
            &self.file_type,
            self.overwrite,
        )?);

        Ok(())
    }
}

/// Replays every element of `kind` through `add`, in index order.
fn replay_kind<F>(
    log: &mut Transcript,
    diagram: &dyn InputAdapter,
    kind: ElementKind,
    label: &str,
    mut add: F,
) -> Result<(), FerryError>
where
    F: FnMut(usize) -> Result<String, FerryError>,
{
    let count = diagram.count(kind);
    debug!(kind:% = kind, count; "Replaying elements");
    log.line(format!("Input {label}: {count}"));

    for index in 0..count {
        trace!(kind:% = kind, index; "Replaying element");
        log.line(add(index)?);
    }

    if count > 0 {
        log.blank();
    }
    Ok(())
}

/// Text accumulated during an export and flushed at the end.
#[derive(Debug, Default)]
struct Transcript {
    text: String,
}

impl Transcript {
    fn line(&mut self, line: impl AsRef<str>) {
        let _ = writeln!(self.text, "{}", line.as_ref());
    }

    fn blank(&mut self) {
        self.text.push('\n');
    }

    fn write_to(&self, sink: &mut dyn io::Write) -> io::Result<()> {
        sink.write_all(self.text.as_bytes())?;
        sink.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let exporter = Exporter::new();

        assert!(!exporter.overwrite());
        assert_eq!(exporter.file_path(), Path::new(""));
        assert_eq!(exporter.file_name(), "SequenceDiagram");
        assert_eq!(exporter.file_type(), &OutputType::svg());
    }

    #[test]
    fn test_set_output_file_rejects_empty_name() {
        let mut exporter = Exporter::new();
        exporter.set_output_file("out", "Login").unwrap();

        let err = exporter.set_output_file("elsewhere", "").unwrap_err();

        assert!(matches!(err, FerryError::Config(_)), "{err:?}");
        assert_eq!(exporter.file_path(), Path::new("out"));
        assert_eq!(exporter.file_name(), "Login");
    }

    #[test]
    fn test_from_config() {
        let config: AppConfig = toml::from_str(
            r#"
            [output]
            directory = "out"
            name = "Login"
            overwrite = true
            "#,
        )
        .unwrap();

        let exporter = Exporter::from_config(&config).unwrap();

        assert!(exporter.overwrite());
        assert_eq!(exporter.file_path(), Path::new("out"));
        assert_eq!(exporter.file_name(), "Login");
    }

    #[test]
    fn test_from_config_rejects_bad_values() {
        let config: AppConfig = toml::from_str("[output]\nname = \"\"\n").unwrap();
        let err = Exporter::from_config(&config).err().unwrap();
        assert!(matches!(err, FerryError::Config(_)), "{err:?}");

        let config: AppConfig = toml::from_str("[style]\nline_color = \"nope\"\n").unwrap();
        let err = Exporter::from_config(&config).err().unwrap();
        assert!(matches!(err, FerryError::Config(_)), "{err:?}");
    }

    #[test]
    fn test_transcript_lines() {
        let mut transcript = Transcript::default();
        transcript.line("a");
        transcript.blank();
        transcript.line(String::from("b"));

        let mut sink = Vec::new();
        transcript.write_to(&mut sink).unwrap();
        assert_eq!(String::from_utf8(sink).unwrap(), "a\n\nb\n");
    }
}
