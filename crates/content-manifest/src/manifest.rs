//! The line-oriented `.mgcb` manifest model and parser.
//!
//! A manifest is a free-form header terminated by the content-section marker
//! comment, followed by build blocks separated by blank lines:
//!
//! ```text
//! #----------------------------- Global Properties ----------------------------#
//!
//! /outputDir:bin/$(Platform)
//!
//! #---------------------------------- Content ---------------------------------#
//!
//! #begin Texture2D/tiles.png
//! /importer:TextureImporter
//! /processor:TextureProcessor
//! /build:Texture2D/tiles.png
//! ```
//!
//! Header lines and entry lines are kept verbatim so that a manifest whose
//! entries all survive reconciliation is written back unchanged.

use std::collections::HashSet;

use crate::writer::ManifestWriter;
use crate::ManifestError;

/// Word that identifies the comment line opening the content section.
pub const CONTENT_MARKER: &str = "Content";

/// Directive that opens a build block; the entry name follows it.
pub const BEGIN_DIRECTIVE: &str = "#begin";

// ---------------------------------------------------------------------------
// LineEnding
// ---------------------------------------------------------------------------

/// Line terminator used when rendering manifest and index text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    Lf,
    /// The terminator MonoGame tooling writes; used when nothing else is known.
    #[default]
    CrLf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }

    /// The terminator style of existing text. Text without any line break
    /// falls back to the default.
    pub fn detect(text: &str) -> Self {
        match text.find('\n') {
            Some(idx) if idx > 0 && text.as_bytes()[idx - 1] == b'\r' => LineEnding::CrLf,
            Some(_) => LineEnding::Lf,
            None => LineEnding::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// ManifestHeader
// ---------------------------------------------------------------------------

/// Verbatim lines preceding the first build block, including the
/// content-section marker line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ManifestHeader {
    lines: Vec<String>,
}

impl ManifestHeader {
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

// ---------------------------------------------------------------------------
// ManifestEntry
// ---------------------------------------------------------------------------

/// One build block: the `#begin` line and the directives that follow it.
///
/// Entries are immutable. Whether an entry survives a sync is decided by
/// the reconciler and recorded outside the entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    name: String,
    lines: Vec<String>,
}

impl ManifestEntry {
    /// Create an entry from its name and verbatim lines. The first line is
    /// expected to be the `#begin` line naming `name`.
    pub fn new(name: impl Into<String>, lines: Vec<String>) -> Self {
        Self {
            name: name.into(),
            lines,
        }
    }

    /// The build identifier, e.g. `Texture2D/tiles.png`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

// ---------------------------------------------------------------------------
// Manifest
// ---------------------------------------------------------------------------

/// A parsed manifest: header, build entries in file order, and the line
/// ending style of the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    header: ManifestHeader,
    entries: Vec<ManifestEntry>,
    line_ending: LineEnding,
}

impl Manifest {
    pub fn new(
        header: ManifestHeader,
        entries: Vec<ManifestEntry>,
        line_ending: LineEnding,
    ) -> Self {
        Self {
            header,
            entries,
            line_ending,
        }
    }

    /// Parse manifest text, remembering its line ending style.
    pub fn from_text(text: &str) -> crate::Result<Self> {
        let mut manifest = Self::parse(text.lines())?;
        manifest.line_ending = LineEnding::detect(text);
        Ok(manifest)
    }

    /// Parse a manifest from individual lines (without terminators).
    ///
    /// Fails with [`ManifestError::Format`] when the content-section marker
    /// is missing, when a block does not open with `#begin <name>`, or when
    /// two blocks share a name.
    pub fn parse<I, S>(lines: I) -> crate::Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut lines = lines
            .into_iter()
            .map(Into::into)
            .enumerate()
            .map(|(idx, line): (usize, String)| (idx + 1, line))
            .peekable();

        let mut header = Vec::new();
        loop {
            let Some((_, line)) = lines.next() else {
                return Err(ManifestError::Format {
                    line: header.len() + 1,
                    reason: format!("content section marker '{CONTENT_MARKER}' not found"),
                });
            };
            let is_marker = is_content_marker(&line);
            header.push(line);
            if is_marker {
                break;
            }
        }

        let mut entries = Vec::new();
        let mut seen = HashSet::new();
        loop {
            while lines.next_if(|(_, line)| is_blank(line)).is_some() {}

            let Some((line_no, begin)) = lines.next() else {
                break;
            };
            let name = entry_name(&begin).ok_or_else(|| ManifestError::Format {
                line: line_no,
                reason: format!("expected '{BEGIN_DIRECTIVE} <name>', found '{}'", begin.trim()),
            })?;
            if !seen.insert(name.clone()) {
                return Err(ManifestError::Format {
                    line: line_no,
                    reason: format!("duplicate entry '{name}'"),
                });
            }

            let mut block = vec![begin];
            while let Some((_, line)) = lines.next_if(|(_, line)| !is_blank(line)) {
                block.push(line);
            }

            tracing::debug!(
                entry = %name,
                line = line_no,
                directives = block.len() - 1,
                "parsed manifest entry"
            );
            entries.push(ManifestEntry::new(name, block));
        }

        Ok(Self {
            header: ManifestHeader::new(header),
            entries,
            line_ending: LineEnding::default(),
        })
    }

    pub fn header(&self) -> &ManifestHeader {
        &self.header
    }

    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// Find an entry by its build identifier.
    pub fn entry(&self, name: &str) -> Option<&ManifestEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Split into header and entries, e.g. to hand the entries to a reconciler.
    pub fn into_parts(self) -> (ManifestHeader, Vec<ManifestEntry>, LineEnding) {
        (self.header, self.entries, self.line_ending)
    }

    /// Render back to text in the manifest's own line ending style.
    pub fn render(&self) -> String {
        ManifestWriter::render(&self.header, &self.entries, self.line_ending)
    }
}

// -- internal helpers -------------------------------------------------------

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// A comment line containing the word `Content`, e.g.
/// `#---------- Content ----------#`.
fn is_content_marker(line: &str) -> bool {
    let line = line.trim_start();
    line.starts_with('#')
        && !line.starts_with(BEGIN_DIRECTIVE)
        && line
            .split(|c: char| !c.is_alphanumeric())
            .any(|word| word == CONTENT_MARKER)
}

/// The name following `#begin`, or `None` if the line is not a begin line.
///
/// Only the separator after `#begin` is dropped; trailing whitespace belongs
/// to the name, since asset file names may end in spaces.
fn entry_name(line: &str) -> Option<String> {
    let rest = line.trim_start().strip_prefix(BEGIN_DIRECTIVE)?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let rest = rest.trim_start();
    let name = rest.strip_suffix('\r').unwrap_or(rest);
    (!name.trim().is_empty()).then(|| name.to_owned())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "\
#----------------------------- Global Properties ----------------------------#

/outputDir:bin/$(Platform)
/intermediateDir:obj/$(Platform)
/platform:DesktopGL
/config:
/profile:Reach
/compress:False

#-------------------------------- References --------------------------------#


#---------------------------------- Content ---------------------------------#";

    fn sample() -> String {
        format!(
            "{HEADER}\n\n#begin Texture2D/tiles.png\n/importer:TextureImporter\n/build:Texture2D/tiles.png\n\n\
             #begin Song/theme.mp3\n/importer:Mp3Importer\n/build:Song/theme.mp3\n\n"
        )
    }

    // -- header -------------------------------------------------------------

    #[test]
    fn header_includes_marker_line() {
        let manifest = Manifest::from_text(&sample()).unwrap();
        let header = manifest.header().lines();
        assert_eq!(header.len(), HEADER.lines().count());
        assert_eq!(
            header.last().unwrap(),
            "#---------------------------------- Content ---------------------------------#"
        );
    }

    #[test]
    fn references_to_content_pipeline_are_not_the_marker() {
        let text = "/reference:MonoGame.Content.Pipeline.dll\n#--- Content ---#\n\n#begin Song/a.mp3\n";
        let manifest = Manifest::from_text(text).unwrap();
        assert_eq!(manifest.header().lines().len(), 2);
        assert_eq!(manifest.entries().len(), 1);
    }

    #[test]
    fn missing_marker_is_a_format_error() {
        let err = Manifest::from_text("/outputDir:bin\n/platform:DesktopGL\n").unwrap_err();
        match err {
            ManifestError::Format { line, reason } => {
                assert_eq!(line, 3);
                assert!(reason.contains("marker"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_input_is_a_format_error() {
        assert!(matches!(
            Manifest::parse(Vec::<String>::new()),
            Err(ManifestError::Format { line: 1, .. })
        ));
    }

    // -- entries ------------------------------------------------------------

    #[test]
    fn entries_parsed_in_order_with_verbatim_lines() {
        let manifest = Manifest::from_text(&sample()).unwrap();
        let names: Vec<_> = manifest.entries().iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["Texture2D/tiles.png", "Song/theme.mp3"]);

        let tiles = manifest.entry("Texture2D/tiles.png").unwrap();
        assert_eq!(
            tiles.lines(),
            &[
                "#begin Texture2D/tiles.png",
                "/importer:TextureImporter",
                "/build:Texture2D/tiles.png"
            ]
        );
    }

    #[test]
    fn whitespace_only_lines_separate_blocks() {
        let text = "#- Content -#\n#begin Effect/a.fx\n/build:Effect/a.fx\n   \t\n\n#begin Effect/b.fx\n";
        let manifest = Manifest::from_text(text).unwrap();
        assert_eq!(manifest.entries().len(), 2);
        assert_eq!(manifest.entries()[1].lines(), &["#begin Effect/b.fx"]);
    }

    #[test]
    fn inner_spaces_are_part_of_the_name() {
        let text = "#- Content -#\n\n#begin   Texture2D/ui icon.png\n";
        let manifest = Manifest::from_text(text).unwrap();
        assert_eq!(manifest.entries()[0].name(), "Texture2D/ui icon.png");
    }

    #[test]
    fn trailing_spaces_are_part_of_the_name() {
        let text = "#- Content -#\r\n\r\n#begin Texture2D/x.png \r\n/build:Texture2D/x.png \r\n";
        let manifest = Manifest::from_text(text).unwrap();
        assert_eq!(manifest.entries()[0].name(), "Texture2D/x.png ");
        assert_eq!(manifest.render(), format!("{text}\r\n"));
    }

    #[test]
    fn stray_carriage_return_is_not_part_of_the_name() {
        let manifest = Manifest::parse(["#- Content -#", "#begin Song/a.mp3\r"]).unwrap();
        assert_eq!(manifest.entries()[0].name(), "Song/a.mp3");
    }

    #[test]
    fn block_without_begin_is_rejected() {
        let text = "#- Content -#\n\n/importer:TextureImporter\n";
        match Manifest::from_text(text).unwrap_err() {
            ManifestError::Format { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn begin_without_name_is_rejected() {
        assert!(Manifest::from_text("#- Content -#\n#begin   \n").is_err());
        assert!(Manifest::from_text("#- Content -#\n#beginTexture2D/a.png\n").is_err());
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let text = "#- Content -#\n\n#begin Song/a.mp3\n\n#begin Song/a.mp3\n";
        match Manifest::from_text(text).unwrap_err() {
            ManifestError::Format { line, reason } => {
                assert_eq!(line, 5);
                assert!(reason.contains("duplicate"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn manifest_without_entries() {
        let manifest = Manifest::from_text(HEADER).unwrap();
        assert!(manifest.entries().is_empty());
    }

    // -- line endings and round trip -----------------------------------------

    #[test]
    fn line_ending_detection() {
        assert_eq!(LineEnding::detect("a\r\nb"), LineEnding::CrLf);
        assert_eq!(LineEnding::detect("a\nb"), LineEnding::Lf);
        assert_eq!(LineEnding::detect("a"), LineEnding::CrLf);
        assert_eq!(LineEnding::detect("\nb"), LineEnding::Lf);
    }

    #[test]
    fn render_round_trips_lf() {
        let text = sample();
        let manifest = Manifest::from_text(&text).unwrap();
        assert_eq!(manifest.line_ending(), LineEnding::Lf);
        assert_eq!(manifest.render(), text);
    }

    #[test]
    fn render_round_trips_crlf() {
        let text = sample().replace('\n', "\r\n");
        let manifest = Manifest::from_text(&text).unwrap();
        assert_eq!(manifest.line_ending(), LineEnding::CrLf);
        assert_eq!(manifest.render(), text);
    }
}
