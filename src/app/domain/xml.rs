use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::app::infrastructure::error::XmlError;

/// A node inside an element's content.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
    Comment(String),
    ProcessingInstruction(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Text that directly follows the start tag, before any child markup.
    pub fn text(&self) -> Option<&str> {
        match self.children.first() {
            Some(Node::Text(t)) => Some(t.as_str()),
            _ => None,
        }
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    /// True when any direct text child carries more than whitespace.
    pub fn has_mixed_content(&self) -> bool {
        self.children.iter().any(|n| matches!(n, Node::Text(t) if !is_blank(t)))
    }
}

/// A parsed XML document.
///
/// `preamble` is the source text in front of the root start tag (declaration,
/// doctype, leading comments) and `epilogue` the trimmed source text after the
/// root end tag. Both are kept verbatim so re-serialization does not lose them.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlDocument {
    pub preamble: String,
    pub root: Element,
    pub epilogue: String,
}

impl XmlDocument {
    pub fn parse(source: &str) -> Result<Self, XmlError> {
        Parser::new(source).run()
    }
}

/// Whitespace-only text is dropped by the parser and ignored by the views.
pub fn is_blank(text: &str) -> bool {
    text.chars().all(|c| matches!(c, ' ' | '\n' | '\r' | '\t'))
}

/// A leading UTF-8 byte order mark. The reader never sees it, so every
/// offset it reports is relative to the text after it.
const BOM: &str = "\u{feff}";

struct Parser<'a> {
    bom: &'a str,
    /// Document text without the byte order mark.
    source: &'a str,
    reader: Reader<&'a [u8]>,
    stack: Vec<Element>,
    root: Option<Element>,
    preamble_end: Option<usize>,
    root_end: usize,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Self {
        let (bom, source) = match text.strip_prefix(BOM) {
            Some(rest) => (&text[..BOM.len()], rest),
            None => ("", text),
        };
        let mut reader = Reader::from_str(source);
        let config = reader.config_mut();
        config.trim_text(false);
        config.check_end_names = true;
        Self {
            bom,
            source,
            reader,
            stack: Vec::new(),
            root: None,
            preamble_end: None,
            root_end: 0,
        }
    }

    fn run(mut self) -> Result<XmlDocument, XmlError> {
        loop {
            let event_start = self.reader.buffer_position() as usize;
            let event = match self.reader.read_event() {
                Ok(event) => event,
                Err(e) => {
                    let pos = self.reader.error_position() as usize;
                    return Err(self.error_at(e.to_string(), pos));
                }
            };

            match event {
                Event::Start(e) => {
                    let element = self.open_element(&e, event_start)?;
                    self.stack.push(element);
                }
                Event::Empty(e) => {
                    let element = self.open_element(&e, event_start)?;
                    self.close_element(element);
                }
                Event::End(_) => match self.stack.pop() {
                    Some(element) => self.close_element(element),
                    None => return Err(self.error_at("unexpected end tag", event_start)),
                },
                Event::Text(e) => {
                    let text = e
                        .unescape()
                        .map_err(|err| self.error_at(err.to_string(), event_start))?;
                    self.push_text(&text, event_start)?;
                }
                Event::CData(e) => {
                    let text = String::from_utf8_lossy(&e).into_owned();
                    self.push_text(&text, event_start)?;
                }
                Event::Comment(e) => {
                    let text = String::from_utf8_lossy(&e).into_owned();
                    self.push_child(Node::Comment(text));
                }
                Event::PI(e) => {
                    let text = String::from_utf8_lossy(&e).into_owned();
                    self.push_child(Node::ProcessingInstruction(text));
                }
                Event::Decl(_) | Event::DocType(_) => {
                    if self.root.is_some() || !self.stack.is_empty() {
                        return Err(self.error_at("declaration inside document", event_start));
                    }
                }
                Event::Eof => break,
            }
        }

        if let Some(open) = self.stack.last() {
            let msg = format!("unclosed tag: {}", open.name);
            return Err(self.error_at(msg, self.source.len()));
        }

        let root = match self.root.take() {
            Some(root) => root,
            None => return Err(self.error_at("document has no root element", self.source.len())),
        };
        let preamble_end = self.preamble_end.unwrap_or(0);

        Ok(XmlDocument {
            preamble: format!("{}{}", self.bom, &self.source[..preamble_end]),
            root,
            epilogue: self.source[self.root_end..].trim().to_string(),
        })
    }

    fn open_element(&mut self, start: &BytesStart, event_start: usize) -> Result<Element, XmlError> {
        if self.stack.is_empty() {
            if self.root.is_some() {
                return Err(self.error_at("extra content after the root element", event_start));
            }
            self.preamble_end = Some(event_start);
        }

        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut element = Element::new(name);
        for attr in start.attributes() {
            let attr = attr.map_err(|e| self.error_at(e.to_string(), event_start))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|e| self.error_at(e.to_string(), event_start))?
                .into_owned();
            element.attributes.push((key, value));
        }
        Ok(element)
    }

    fn close_element(&mut self, element: Element) {
        match self.stack.last_mut() {
            Some(parent) => parent.children.push(Node::Element(element)),
            None => {
                self.root = Some(element);
                self.root_end = self.reader.buffer_position() as usize;
            }
        }
    }

    fn push_text(&mut self, text: &str, event_start: usize) -> Result<(), XmlError> {
        if is_blank(text) {
            return Ok(());
        }
        let Some(parent) = self.stack.last_mut() else {
            return Err(self.error_at("text outside the root element", event_start));
        };
        // Adjacent text and CDATA sections merge into one text node.
        if let Some(Node::Text(prev)) = parent.children.last_mut() {
            prev.push_str(text);
        } else {
            parent.children.push(Node::Text(text.to_string()));
        }
        Ok(())
    }

    fn push_child(&mut self, node: Node) {
        // Comments and PIs outside the root stay in the preamble/epilogue text.
        if let Some(parent) = self.stack.last_mut() {
            parent.children.push(node);
        }
    }

    fn error_at(&self, message: impl Into<String>, pos: usize) -> XmlError {
        let pos = pos.min(self.source.len());
        let before = &self.source.as_bytes()[..pos];
        let line = before.iter().filter(|b| **b == b'\n').count() + 1;
        let column = before.iter().rev().take_while(|b| **b != b'\n').count() + 1;
        XmlError {
            message: message.into(),
            line,
            column,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_document() {
        let doc = XmlDocument::parse(r#"<a><b x="1">hi</b></a>"#).unwrap();
        assert_eq!(doc.root.name, "a");
        assert_eq!(doc.preamble, "");

        let b: Vec<&Element> = doc.root.child_elements().collect();
        assert_eq!(b.len(), 1);
        assert_eq!(b[0].name, "b");
        assert_eq!(b[0].attributes, vec![("x".to_string(), "1".to_string())]);
        assert_eq!(b[0].text(), Some("hi"));
    }

    #[test]
    fn test_parse_with_bom_round_trips() {
        let src = "\u{feff}<?xml version=\"1.0\"?>\n<root>\n<test>not much here</test>\n</root>\n";
        let doc = XmlDocument::parse(src).unwrap();
        assert_eq!(doc.preamble, "\u{feff}<?xml version=\"1.0\"?>\n");
        assert_eq!(doc.root.name, "root");
        assert_eq!(doc.epilogue, "");

        let bare = XmlDocument::parse("\u{feff}<a/>").unwrap();
        assert_eq!(bare.preamble, "\u{feff}");
        assert_eq!(bare.root.name, "a");
        assert_eq!(bare.epilogue, "");
    }

    #[test]
    fn test_parse_keeps_preamble() {
        let src = "<?xml version=\"1.0\"?>\n<!-- note -->\n<root><test>x</test></root>\n";
        let doc = XmlDocument::parse(src).unwrap();
        assert_eq!(doc.preamble, "<?xml version=\"1.0\"?>\n<!-- note -->\n");
        assert_eq!(doc.root.name, "root");
        assert_eq!(doc.epilogue, "");
    }

    #[test]
    fn test_preamble_ignores_root_spelling_in_comment() {
        let src = "<!-- <root> is the root -->\n<root/>";
        let doc = XmlDocument::parse(src).unwrap();
        assert_eq!(doc.preamble, "<!-- <root> is the root -->\n");
    }

    #[test]
    fn test_parse_drops_blank_text() {
        let doc = XmlDocument::parse("<a>\n  <b/>\n  <c/>\n</a>").unwrap();
        assert_eq!(doc.root.children.len(), 2);
        assert_eq!(doc.root.text(), None);
    }

    #[test]
    fn test_parse_unescapes_entities() {
        let doc = XmlDocument::parse(r#"<a t="&quot;q&quot;">1 &lt; 2 &amp; 3</a>"#).unwrap();
        assert_eq!(doc.root.text(), Some("1 < 2 & 3"));
        assert_eq!(doc.root.attributes[0].1, "\"q\"");
    }

    #[test]
    fn test_parse_comments_and_epilogue() {
        let doc = XmlDocument::parse("<a><!-- c --><b/></a>\n<!-- tail -->\n").unwrap();
        assert_eq!(doc.root.children[0], Node::Comment(" c ".to_string()));
        assert_eq!(doc.epilogue, "<!-- tail -->");
    }

    #[test]
    fn test_parse_cdata_merges_with_text() {
        let doc = XmlDocument::parse("<a>x<![CDATA[<y>]]></a>").unwrap();
        assert_eq!(doc.root.text(), Some("x<y>"));
    }

    #[test]
    fn test_mismatched_end_tag_fails() {
        let err = XmlDocument::parse("<a><b></a>").unwrap_err();
        assert_eq!(err.line, 1);
        assert!(!err.message.is_empty());
    }

    #[test]
    fn test_unclosed_tag_fails() {
        let err = XmlDocument::parse("<a>\n<b>").unwrap_err();
        assert!(err.message.contains("unclosed"));
        assert_eq!(err.line, 2);
    }

    #[test]
    fn test_empty_input_fails() {
        assert!(XmlDocument::parse("").is_err());
        assert!(XmlDocument::parse("  \n").is_err());
    }

    #[test]
    fn test_second_root_fails() {
        let err = XmlDocument::parse("<a/><b/>").unwrap_err();
        assert!(err.message.contains("after the root"));
    }

    #[test]
    fn test_text_outside_root_fails() {
        assert!(XmlDocument::parse("junk<a/>").is_err());
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank(" \n\t\r"));
        assert!(!is_blank(" x "));
    }
}
