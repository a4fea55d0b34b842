//! Flattening of a parsed document into tree-view rows.
//!
//! The result is a pre-order list where every row knows its depth, so any
//! tree widget can rebuild the hierarchy by keeping a stack of parents.

use crate::app::domain::xml::{Element, Node, XmlDocument, is_blank};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutlineKind {
    Element,
    Attribute,
    Comment,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineNode {
    pub kind: OutlineKind,
    pub depth: usize,
    pub label: String,
    pub open: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outline {
    pub nodes: Vec<OutlineNode>,
    /// Distinct element names in order of first appearance.
    pub tags: Vec<String>,
}

pub fn flatten(doc: &XmlDocument, debug: bool) -> Outline {
    let mut outline = Outline::default();
    walk(&doc.root, 0, debug, &mut outline);
    outline
}

fn walk(element: &Element, depth: usize, debug: bool, outline: &mut Outline) {
    if !outline.tags.iter().any(|t| t == &element.name) {
        outline.tags.push(element.name.clone());
    }

    let label = if debug {
        debug_label(element)
    } else {
        element_label(element)
    };
    outline.nodes.push(OutlineNode {
        kind: OutlineKind::Element,
        depth,
        label,
        open: debug || depth == 0,
    });

    for (name, _) in &element.attributes {
        outline.nodes.push(OutlineNode {
            kind: OutlineKind::Attribute,
            depth: depth + 1,
            label: name.clone(),
            open: debug,
        });
    }

    for child in &element.children {
        match child {
            Node::Element(e) => walk(e, depth + 1, debug, outline),
            Node::Comment(c) => outline.nodes.push(OutlineNode {
                kind: OutlineKind::Comment,
                depth: depth + 1,
                label: comment_label(c),
                open: debug,
            }),
            Node::Text(_) | Node::ProcessingInstruction(_) => {}
        }
    }
}

fn element_label(element: &Element) -> String {
    match element.text() {
        Some(text) if !is_blank(text) => format!("{} = {}", element.name, text.trim()),
        _ => element.name.clone(),
    }
}

fn debug_label(element: &Element) -> String {
    let mut label = format!("tag:{} type:Element", element.name);
    if let Some(text) = element.text() {
        label.push_str(&format!(" text({}):{}", text.len(), text));
    }
    label
}

fn comment_label(text: &str) -> String {
    if is_blank(text) {
        "# ".to_string()
    } else {
        format!("# {}", text.trim())
    }
}
