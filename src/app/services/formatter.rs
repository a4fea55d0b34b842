use crate::app::domain::xml::{Element, Node, XmlDocument};

const INDENT: &str = "  ";

/// Serialize a document with stable, indented formatting.
///
/// The preamble is emitted verbatim. Elements whose content is only markup get
/// one child per line; elements carrying text are written inline so their
/// text content survives a reparse unchanged.
pub fn to_pretty_string(doc: &XmlDocument) -> String {
    let mut out = String::with_capacity(doc.preamble.len() + 256);
    out.push_str(&doc.preamble);
    write_element(&mut out, &doc.root, 0);
    out.push('\n');
    if !doc.epilogue.is_empty() {
        out.push_str(&doc.epilogue);
        out.push('\n');
    }
    out
}

fn write_element(out: &mut String, element: &Element, depth: usize) {
    write_start_tag(out, element);
    if element.children.is_empty() {
        return;
    }

    if element.has_mixed_content() {
        for child in &element.children {
            write_inline(out, child);
        }
    } else {
        for child in &element.children {
            out.push('\n');
            push_indent(out, depth + 1);
            match child {
                Node::Element(e) => write_element(out, e, depth + 1),
                other => write_inline(out, other),
            }
        }
        out.push('\n');
        push_indent(out, depth);
    }
    write_end_tag(out, element);
}

fn write_inline(out: &mut String, node: &Node) {
    match node {
        Node::Element(e) => {
            write_start_tag(out, e);
            if !e.children.is_empty() {
                for child in &e.children {
                    write_inline(out, child);
                }
                write_end_tag(out, e);
            }
        }
        Node::Text(t) => out.push_str(&escape_text(t)),
        Node::Comment(c) => {
            out.push_str("<!--");
            out.push_str(c);
            out.push_str("-->");
        }
        Node::ProcessingInstruction(p) => {
            out.push_str("<?");
            out.push_str(p);
            out.push_str("?>");
        }
    }
}

/// Writes `<name attr="v">`, or `<name/>` for an element without content.
fn write_start_tag(out: &mut String, element: &Element) {
    out.push('<');
    out.push_str(&element.name);
    for (key, value) in &element.attributes {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&escape_attribute(value));
        out.push('"');
    }
    if element.children.is_empty() {
        out.push_str("/>");
    } else {
        out.push('>');
    }
}

fn write_end_tag(out: &mut String, element: &Element) {
    out.push_str("</");
    out.push_str(&element.name);
    out.push('>');
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '"' => out.push_str("&quot;"),
            '\n' => out.push_str("&#10;"),
            '\t' => out.push_str("&#9;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format(src: &str) -> String {
        to_pretty_string(&XmlDocument::parse(src).unwrap())
    }

    #[test]
    fn test_format_nested_elements() {
        let out = format(r#"<a><b x="1">hi</b><c/></a>"#);
        assert_eq!(out, "<a>\n  <b x=\"1\">hi</b>\n  <c/>\n</a>\n");
    }

    #[test]
    fn test_format_keeps_preamble() {
        let out = format("<?xml version=\"1.0\"?>\n<root>\n<test>not much here</test>\n</root>");
        assert_eq!(
            out,
            "<?xml version=\"1.0\"?>\n<root>\n  <test>not much here</test>\n</root>\n"
        );
    }

    #[test]
    fn test_format_is_stable() {
        let src = "<?xml version=\"1.0\"?>\n<!-- hello -->\n<cfg a=\"1\" b=\"x &amp; y\">\
                   <item>one</item><!-- c --><group><item>two</item>\
                   <p>mixed <b>bold</b> text</p></group></cfg>";
        let once = format(src);
        let twice = format(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_format_round_trip_preserves_content() {
        let src = r#"<a k="&lt;v&gt;"><b>1 &amp; 2</b><c><d z="q"/></c></a>"#;
        let first = XmlDocument::parse(src).unwrap();
        let second = XmlDocument::parse(&to_pretty_string(&first)).unwrap();
        assert_eq!(first.root, second.root);
    }

    #[test]
    fn test_format_keeps_byte_order_mark() {
        let src = "\u{feff}<?xml version=\"1.0\"?>\n<root>\n<test>not much here</test>\n</root>\n";
        let once = format(src);
        assert_eq!(
            once,
            "\u{feff}<?xml version=\"1.0\"?>\n<root>\n  <test>not much here</test>\n</root>\n"
        );
        assert_eq!(format(&once), once);
        assert_eq!(format("\u{feff}<a/>"), "\u{feff}<a/>\n");
    }

    #[test]
    fn test_mixed_content_written_inline() {
        let out = format("<p>a <b>b</b> c</p>");
        assert_eq!(out, "<p>a <b>b</b> c</p>\n");
    }

    #[test]
    fn test_comment_children_indented() {
        let out = format("<a><!--x--><b/></a>");
        assert_eq!(out, "<a>\n  <!--x-->\n  <b/>\n</a>\n");
    }

    #[test]
    fn test_epilogue_kept() {
        let out = format("<a/>\n\n<!-- end -->\n");
        assert_eq!(out, "<a/>\n<!-- end -->\n");
    }

    #[test]
    fn test_escape_attribute() {
        assert_eq!(escape_attribute("a\"b<&"), "a&quot;b&lt;&amp;");
        assert_eq!(escape_text("<x> & y"), "&lt;x&gt; &amp; y");
    }
}
