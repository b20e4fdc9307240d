use crate::content::{Content, Element, Node, Text};

/// Visitor pattern for traversing content trees immutably
///
/// This trait provides default implementations that walk the entire tree.
/// Override specific visit_* methods to perform custom actions on nodes.
pub trait Visitor: Sized {
    fn visit_content(&mut self, content: &Content) {
        walk_content(self, content);
    }

    fn visit_node(&mut self, node: &Node) {
        walk_node(self, node);
    }

    fn visit_element(&mut self, element: &Element) {
        walk_element(self, element);
    }

    fn visit_text(&mut self, _text: &Text) {
        // Leaf node, no children to walk
    }
}

// Default walk implementations

pub fn walk_content<V: Visitor>(visitor: &mut V, content: &Content) {
    for block in content.blocks() {
        visitor.visit_node(block);
    }
}

pub fn walk_node<V: Visitor>(visitor: &mut V, node: &Node) {
    match node {
        Node::Element(element) => visitor.visit_element(element),
        Node::Text(text) => visitor.visit_text(text),
    }
}

pub fn walk_element<V: Visitor>(visitor: &mut V, element: &Element) {
    for child in &element.children {
        visitor.visit_node(child);
    }
}
