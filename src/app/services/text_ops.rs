use std::path::Path;

/// File name shown next to the Parse button.
///
/// Returns the last path component, or "Unknown" if there is none.
pub fn extract_filename(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .filter(|s| !s.is_empty() && *s != ".")
        .map(|s| s.to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Escape a label for FLTK menu paths, where `/` nests, `&` marks a
/// shortcut and `\` escapes.
pub fn escape_menu_label(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    for c in label.chars() {
        if matches!(c, '/' | '\\' | '&' | '_' | '|') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
