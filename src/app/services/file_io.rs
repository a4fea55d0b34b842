use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::app::infrastructure::error::{AppError, Result};

/// Written to a missing working file so there is always something to show.
pub const DEFAULT_SKELETON: &str =
    "<?xml version=\"1.0\"?>\n<root>\n<test>not much here</test>\n</root>";

/// Create `path` with the default skeleton if it does not exist.
///
/// Returns `true` when the file had to be created.
pub fn ensure_exists(path: &Path) -> Result<bool> {
    if path.is_file() {
        return Ok(false);
    }
    log::warn!("output file {} does not exist - making one...", path.display());
    write_document(path, DEFAULT_SKELETON)?;
    Ok(true)
}

pub fn read_document(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| AppError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Write text verbatim as UTF-8.
pub fn write_document(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text.as_bytes()).map_err(|source| AppError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Collect `prefix` followed by every line of `input` until end of input.
pub fn read_all_lines(prefix: &str, input: impl BufRead) -> Result<String> {
    let mut text = String::from(prefix);
    for line in input.lines() {
        text.push_str(&line?);
        text.push('\n');
    }
    Ok(text)
}

/// Persist captured text to a temporary `.xml` file that outlives the process.
pub fn write_temp_document(text: &str) -> Result<PathBuf> {
    let mut file = tempfile::Builder::new()
        .prefix("xmlview-")
        .suffix(".xml")
        .tempfile()?;
    file.write_all(text.as_bytes())?;
    file.flush()?;
    let path = file
        .into_temp_path()
        .keep()
        .map_err(|e| AppError::Io(e.error))?;
    log::debug!("stdin captured to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::domain::xml::XmlDocument;
    use std::io::Cursor;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_exists_creates_skeleton() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("new.xml");

        assert!(ensure_exists(&path).unwrap());
        let content = read_document(&path).unwrap();
        assert_eq!(content, DEFAULT_SKELETON);

        let doc = XmlDocument::parse(&content).unwrap();
        assert_eq!(doc.root.name, "root");
        assert_eq!(doc.root.child_elements().next().unwrap().text(), Some("not much here"));
    }

    #[test]
    fn test_ensure_exists_leaves_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("keep.xml");
        fs::write(&path, "<mine/>").unwrap();

        assert!(!ensure_exists(&path).unwrap());
        assert_eq!(read_document(&path).unwrap(), "<mine/>");
    }

    #[test]
    fn test_ensure_exists_unwritable_target() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no/such/dir/file.xml");
        assert!(matches!(ensure_exists(&path), Err(AppError::Write { .. })));
    }

    #[test]
    fn test_read_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = read_document(&dir.path().join("gone.xml")).unwrap_err();
        assert!(matches!(err, AppError::Read { .. }));
    }

    #[test]
    fn test_write_is_verbatim_utf8() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("u.xml");
        write_document(&path, "<a>grüß</a>\n").unwrap();
        assert_eq!(fs::read(&path).unwrap(), "<a>grüß</a>\n".as_bytes());
    }

    #[test]
    fn test_read_all_lines_appends_to_prefix() {
        let input = Cursor::new("<b/>\n</a>");
        let text = read_all_lines("<a>\n", input).unwrap();
        assert_eq!(text, "<a>\n<b/>\n</a>\n");
    }

    #[test]
    fn test_write_temp_document() {
        let path = write_temp_document("<t/>").unwrap();
        assert_eq!(read_document(&path).unwrap(), "<t/>");
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("xml"));
        fs::remove_file(path).unwrap();
    }
}
