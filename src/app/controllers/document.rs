use std::path::{Path, PathBuf};

use crate::app::domain::xml::XmlDocument;
use crate::app::infrastructure::error::Result;
use crate::app::services::file_io;
use crate::app::services::formatter::to_pretty_string;
use crate::app::services::markers::tag_markers;
use crate::app::services::outline::{self, OutlineNode};

/// Everything the views need after a successful parse.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedView {
    /// Pretty-printed document, to be written back into the text pane.
    pub formatted: String,
    pub outline: Vec<OutlineNode>,
    pub tags: Vec<String>,
}

/// Owns the parsed document and the state derived from it.
///
/// The text itself lives in the text pane; callers pass it in and apply the
/// returned values to their widgets. Nothing here changes on a failed parse.
pub struct DocumentController {
    /// Where the document is read from.
    source: PathBuf,
    /// Where saves go; differs from `source` when output is redirected.
    path: PathBuf,
    document: Option<XmlDocument>,
    tags: Vec<String>,
    markers: Vec<String>,
    debug: bool,
}

impl DocumentController {
    pub fn new(source: PathBuf, path: PathBuf, debug: bool) -> Self {
        Self {
            source,
            path,
            document: None,
            tags: Vec::new(),
            markers: Vec::new(),
            debug,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    fn is_redirected(&self) -> bool {
        self.source != self.path
    }

    pub fn document(&self) -> Option<&XmlDocument> {
        self.document.as_ref()
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    /// Create the save target with the default skeleton if it is missing.
    pub fn ensure_exists(&self) -> Result<bool> {
        file_io::ensure_exists(&self.path)
    }

    /// Read a document's text, from `path` or the current source.
    ///
    /// With output redirected and no source file on disk, the save target
    /// (which `ensure_exists` bootstraps) is read instead. The stored paths
    /// only change when reading succeeds. Without output redirection the
    /// save target follows the newly loaded file.
    pub fn load(&mut self, path: Option<&Path>) -> Result<String> {
        let target = match path {
            Some(p) => p,
            None if self.is_redirected() && !self.source.is_file() => self.path.as_path(),
            None => self.source.as_path(),
        };
        let text = file_io::read_document(target)?;
        log::debug!("read {} bytes from {}", text.len(), target.display());
        if let Some(p) = path {
            if !self.is_redirected() {
                self.path = p.to_path_buf();
            }
            self.source = p.to_path_buf();
        }
        Ok(text)
    }

    pub fn parse(&mut self, text: &str) -> Result<ParsedView> {
        let document = XmlDocument::parse(text)?;
        let formatted = to_pretty_string(&document);
        let outline = outline::flatten(&document, self.debug);
        log::debug!(
            "parsed <{}>: {} tree items, {} tags",
            document.root.name,
            outline.nodes.len(),
            outline.tags.len()
        );

        self.document = Some(document);
        self.tags = outline.tags.clone();
        Ok(ParsedView {
            formatted,
            outline: outline.nodes,
            tags: outline.tags,
        })
    }

    pub fn save(&self, text: &str) -> Result<()> {
        file_io::write_document(&self.path, text)?;
        log::info!("saved {}", self.path.display());
        Ok(())
    }

    /// Point the markers at a tag. An empty name clears them.
    pub fn select_tag(&mut self, name: &str) -> &[String] {
        self.markers = tag_markers(name);
        log::debug!("current markers: {:?}", self.markers);
        &self.markers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::infrastructure::error::AppError;
    use crate::app::services::file_io::DEFAULT_SKELETON;
    use std::fs;
    use tempfile::TempDir;

    fn controller(dir: &TempDir) -> DocumentController {
        let path = dir.path().join("doc.xml");
        DocumentController::new(path.clone(), path, false)
    }

    #[test]
    fn test_parse_updates_state() {
        let dir = TempDir::new().unwrap();
        let mut c = controller(&dir);

        let view = c.parse(r#"<a><b x="1">hi</b></a>"#).unwrap();
        assert_eq!(view.tags, vec!["a", "b"]);
        assert_eq!(c.tags(), ["a", "b"]);
        assert_eq!(view.formatted, "<a>\n  <b x=\"1\">hi</b>\n</a>\n");
        let labels: Vec<&str> = view.outline.iter().map(|n| n.label.as_str()).collect();
        assert_eq!(labels, vec!["a", "b = hi", "x"]);
        assert_eq!(c.document().map(|d| d.root.name.as_str()), Some("a"));
    }

    #[test]
    fn test_failed_parse_keeps_previous_state() {
        let dir = TempDir::new().unwrap();
        let mut c = controller(&dir);
        c.parse("<keep><me/></keep>").unwrap();

        let err = c.parse("<a><b></a>").unwrap_err();
        assert!(matches!(err, AppError::Xml(_)));
        assert_eq!(c.tags(), ["keep", "me"]);
        assert_eq!(c.document().map(|d| d.root.name.as_str()), Some("keep"));
    }

    #[test]
    fn test_reparse_of_formatted_text_is_stable() {
        let dir = TempDir::new().unwrap();
        let mut c = controller(&dir);
        let first = c.parse("<r><x a=\"1\">t</x><y><z/></y></r>").unwrap();
        let second = c.parse(&first.formatted).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_select_tag_sets_four_markers() {
        let dir = TempDir::new().unwrap();
        let mut c = controller(&dir);
        assert_eq!(c.select_tag("T"), ["<T>", "<T", "</T", "</T>"]);
        assert_eq!(c.markers().len(), 4);
        assert!(c.select_tag("").is_empty());
    }

    #[test]
    fn test_missing_file_is_bootstrapped_then_loads() {
        let dir = TempDir::new().unwrap();
        let mut c = controller(&dir);

        assert!(c.ensure_exists().unwrap());
        let text = c.load(None).unwrap();
        assert_eq!(text, DEFAULT_SKELETON);
        let view = c.parse(&text).unwrap();
        assert_eq!(view.tags, vec!["root", "test"]);
    }

    #[test]
    fn test_load_failure_keeps_path() {
        let dir = TempDir::new().unwrap();
        let mut c = controller(&dir);
        let missing = dir.path().join("missing.xml");

        assert!(c.load(Some(&missing)).is_err());
        assert_eq!(c.path(), dir.path().join("doc.xml"));
    }

    #[test]
    fn test_load_other_file_switches_path() {
        let dir = TempDir::new().unwrap();
        let mut c = controller(&dir);
        let other = dir.path().join("other.xml");
        fs::write(&other, "<o/>").unwrap();

        assert_eq!(c.load(Some(&other)).unwrap(), "<o/>");
        assert_eq!(c.source(), other);
        assert_eq!(c.path(), other);
    }

    #[test]
    fn test_redirected_output_keeps_save_target() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.xml");
        let output = dir.path().join("out").join("in.xml");
        fs::write(&input, "<i/>").unwrap();
        fs::create_dir(dir.path().join("out")).unwrap();
        let mut c = DocumentController::new(input.clone(), output.clone(), false);

        assert_eq!(c.load(None).unwrap(), "<i/>");
        c.save("<o/>").unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), "<o/>");
        assert_eq!(fs::read_to_string(&input).unwrap(), "<i/>");

        let other = dir.path().join("other.xml");
        fs::write(&other, "<x/>").unwrap();
        c.load(Some(&other)).unwrap();
        assert_eq!(c.path(), output);
    }

    #[test]
    fn test_redirected_missing_input_loads_bootstrapped_output() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("missing.xml");
        fs::create_dir(dir.path().join("out")).unwrap();
        let output = dir.path().join("out").join("missing.xml");
        let mut c = DocumentController::new(input.clone(), output.clone(), false);

        assert!(c.ensure_exists().unwrap());
        assert_eq!(c.load(None).unwrap(), DEFAULT_SKELETON);
        assert!(!input.exists());

        c.save("<edited/>").unwrap();
        assert_eq!(c.load(None).unwrap(), "<edited/>");
        assert_eq!(c.path(), output);
    }

    #[test]
    fn test_save_writes_text_verbatim() {
        let dir = TempDir::new().unwrap();
        let c = controller(&dir);
        let text = "<a>\n  <b>not parsed yet\n";
        c.save(text).unwrap();
        assert_eq!(fs::read_to_string(c.path()).unwrap(), text);
    }
}
