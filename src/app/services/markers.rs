use std::ops::Range;

pub const LINK_PREFIXES: [&str; 2] = ["http://", "https://"];

/// Style characters used in the text pane's style buffer.
pub const STYLE_PLAIN: char = 'A';
pub const STYLE_MARKER: char = 'B';
pub const STYLE_LINK: char = 'C';
pub const STYLE_MARKER_LINK: char = 'D';

/// The four spellings of a tag that get highlighted when it is selected:
/// `<name>`, `<name`, `</name`, `</name>`.
pub fn tag_markers(name: &str) -> Vec<String> {
    if name.is_empty() {
        return Vec::new();
    }
    vec![
        format!("<{}>", name),
        format!("<{}", name),
        format!("</{}", name),
        format!("</{}>", name),
    ]
}

/// Byte ranges of all non-overlapping occurrences of `needle`, scanning left to right.
pub fn find_all(text: &str, needle: &str) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    if needle.is_empty() {
        return ranges;
    }
    let mut pos = 0;
    while let Some(found) = text[pos..].find(needle) {
        let start = pos + found;
        let end = start + needle.len();
        ranges.push(start..end);
        pos = end;
    }
    ranges
}

/// Byte ranges of every marker occurrence, sorted and merged.
pub fn marker_ranges(text: &str, markers: &[String]) -> Vec<Range<usize>> {
    let mut ranges: Vec<Range<usize>> = markers.iter().flat_map(|m| find_all(text, m)).collect();
    merge(&mut ranges);
    ranges
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub range: Range<usize>,
    pub url: String,
}

/// Finds `http://` and `https://` and takes the rest of the whitespace-delimited token.
pub fn find_links(text: &str) -> Vec<Link> {
    let mut links = Vec::new();
    for prefix in LINK_PREFIXES {
        for hit in find_all(text, prefix) {
            let end = text[hit.start..]
                .find(char::is_whitespace)
                .map_or(text.len(), |off| hit.start + off);
            links.push(Link {
                range: hit.start..end,
                url: text[hit.start..end].to_string(),
            });
        }
    }
    links.sort_by_key(|l| l.range.start);
    // A link token swallowing the next prefix (no whitespace between) wins.
    let mut result: Vec<Link> = Vec::with_capacity(links.len());
    for link in links {
        match result.last() {
            Some(prev) if link.range.start < prev.range.end => {}
            _ => result.push(link),
        }
    }
    result
}

pub fn link_at(links: &[Link], pos: usize) -> Option<&Link> {
    links.iter().find(|l| l.range.contains(&pos))
}

/// Build a style string (one style byte per text byte) from scratch.
///
/// The output depends only on its inputs, so applying it any number of times
/// yields the same marks.
pub fn style_string(text: &str, markers: &[String], links: &[Link]) -> String {
    let mut styles = vec![STYLE_PLAIN as u8; text.len()];
    for link in links {
        fill(&mut styles, &link.range, STYLE_LINK as u8);
    }
    for range in marker_ranges(text, markers) {
        for b in &mut styles[range] {
            *b = if *b == STYLE_LINK as u8 {
                STYLE_MARKER_LINK as u8
            } else {
                STYLE_MARKER as u8
            };
        }
    }
    // Only ASCII style characters were written.
    String::from_utf8_lossy(&styles).into_owned()
}

fn fill(styles: &mut [u8], range: &Range<usize>, style: u8) {
    let end = range.end.min(styles.len());
    if range.start < end {
        styles[range.start..end].fill(style);
    }
}

fn merge(ranges: &mut Vec<Range<usize>>) {
    ranges.sort_by_key(|r| (r.start, r.end));
    let mut merged: Vec<Range<usize>> = Vec::with_capacity(ranges.len());
    for r in ranges.drain(..) {
        match merged.last_mut() {
            Some(last) if r.start <= last.end => last.end = last.end.max(r.end),
            _ => merged.push(r),
        }
    }
    *ranges = merged;
}
