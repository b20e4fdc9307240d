//! # Content Tree
//!
//! The document value shared by the version store and the live editor buffer.
//!
//! A document is an ordered sequence of block nodes. Every node is either an
//! element (a `type` tag plus `children`) or a text leaf (`text`). Any other
//! keys an editor attaches (marks, ids, alignment, ...) are carried through
//! untouched so snapshots round-trip losslessly.
//!
//! ```json
//! [
//!   { "type": "h1", "children": [{ "text": "Title" }] },
//!   { "type": "p",  "children": [{ "text": "Body", "bold": true }] }
//! ]
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ContentError;
use crate::result::ContentResult;
use crate::visitor::{walk_content, walk_element, Visitor};

/// Paragraph block tag
pub const PARAGRAPH: &str = "p";

/// A single node in the content tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Element(Element),
    Text(Text),
}

/// Tagged node with nested children
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    #[serde(rename = "type")]
    pub kind: String,

    pub children: Vec<Node>,

    /// Editor-specific attributes (ids, alignment, indentation, ...)
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// Literal text leaf
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub text: String,

    /// Formatting marks (bold, italic, ...)
    #[serde(flatten)]
    pub marks: Map<String, Value>,
}

impl Node {
    pub fn element(kind: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Element(Element::new(kind, children))
    }

    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(Text::new(text))
    }

    /// Block-level nodes are elements; text leaves never appear at the top level
    pub fn is_block(&self) -> bool {
        matches!(self, Node::Element(_))
    }
}

impl Element {
    pub fn new(kind: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            kind: kind.into(),
            children,
            attributes: Map::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }
}

impl Text {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            marks: Map::new(),
        }
    }

    pub fn with_mark(mut self, key: impl Into<String>, value: Value) -> Self {
        self.marks.insert(key.into(), value);
        self
    }
}

/// Ordered sequence of block nodes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Content {
    blocks: Vec<Node>,
}

impl Content {
    pub fn new(blocks: Vec<Node>) -> Self {
        Self { blocks }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Single block of the given type holding one text leaf
    pub fn block(kind: impl Into<String>, text: impl Into<String>) -> Node {
        Node::element(kind, vec![Node::text(text)])
    }

    /// A single empty paragraph; the smallest content an editor accepts
    pub fn minimal() -> Self {
        Self::new(vec![Self::block(PARAGRAPH, "")])
    }

    /// Content of the bootstrap "Initial version"
    pub fn welcome() -> Self {
        Self::new(vec![Self::block(PARAGRAPH, "Welcome to your editor!")])
    }

    /// Canonical default document loaded for an untouched placeholder version
    pub fn default_document() -> Self {
        Self::new(vec![
            Self::block("h1", "Co-Founders' Agreement"),
            Self::block("h1", "1. Roles and Responsibilities"),
            Self::block("h2", "1.1 Flexible Roles"),
            Self::block(
                PARAGRAPH,
                "The Co-Founders acknowledge and agree that the roles and responsibilities within the Company will be dynamic and subject to change as the business evolves. Each Co-Founder commits to adapting their role as necessary for the benefit of the Company.",
            ),
            Self::block("h2", "1.2 Initial Role Allocation"),
            Self::block(
                PARAGRAPH,
                "Notwithstanding the flexible nature of the roles, the initial primary responsibilities of each Co-Founder shall be as follows:",
            ),
            Self::block(PARAGRAPH, "Co-Founder 1: [DESCRIPTION OF INITIAL RESPONSIBILITIES]"),
            Self::block(PARAGRAPH, "Co-Founder 2: [DESCRIPTION OF INITIAL RESPONSIBILITIES]"),
            Self::block(PARAGRAPH, "Co-Founder 3: [DESCRIPTION OF INITIAL RESPONSIBILITIES]"),
            Self::block("h2", "1.3 Duty to Company Success"),
            Self::block(
                PARAGRAPH,
                "Each Co-Founder hereby affirms and agrees that their primary and overriding obligation shall be to promote and ensure the success of the Company. This obligation shall take precedence over individual interests or preferences in all business-related decisions and actions.",
            ),
            Self::block("h1", "2. Equity Distribution"),
            Self::block("h2", "2.1 Initial Equity"),
        ])
    }

    /// Parse content from its JSON array form
    pub fn from_json(json: &str) -> ContentResult<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> ContentResult<Self> {
        if !value.is_array() {
            return Err(ContentError::NotASequence);
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn to_json(&self) -> ContentResult<String> {
        Ok(serde_json::to_string(&self.blocks)?)
    }

    /// Structural deep copy.
    ///
    /// Every node, attribute map and string is freshly allocated, so the copy
    /// shares no storage with `self` and later edits to either side are
    /// invisible to the other.
    pub fn deep_copy(&self) -> Self {
        Self {
            blocks: self.blocks.iter().map(copy_node).collect(),
        }
    }

    /// Non-empty sequence whose top-level nodes are all blocks
    pub fn is_valid(&self) -> bool {
        !self.blocks.is_empty() && self.blocks.iter().all(Node::is_block)
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn blocks(&self) -> &[Node] {
        &self.blocks
    }

    pub fn blocks_mut(&mut self) -> &mut Vec<Node> {
        &mut self.blocks
    }

    pub fn push(&mut self, node: Node) {
        self.blocks.push(node);
    }

    /// Concatenated text, one line per block
    pub fn plain_text(&self) -> String {
        let mut collector = TextCollector::default();
        walk_content(&mut collector, self);
        collector.lines.join("\n")
    }

    pub fn word_count(&self) -> usize {
        let mut counter = WordCounter::default();
        walk_content(&mut counter, self);
        counter.words
    }
}

impl From<Vec<Node>> for Content {
    fn from(blocks: Vec<Node>) -> Self {
        Self::new(blocks)
    }
}

fn copy_node(node: &Node) -> Node {
    match node {
        Node::Element(element) => Node::Element(Element {
            kind: element.kind.as_str().to_owned(),
            children: element.children.iter().map(copy_node).collect(),
            attributes: copy_map(&element.attributes),
        }),
        Node::Text(text) => Node::Text(Text {
            text: text.text.as_str().to_owned(),
            marks: copy_map(&text.marks),
        }),
    }
}

fn copy_map(map: &Map<String, Value>) -> Map<String, Value> {
    map.iter()
        .map(|(key, value)| (key.as_str().to_owned(), value.clone()))
        .collect()
}

#[derive(Default)]
struct TextCollector {
    lines: Vec<String>,
    depth: usize,
}

impl Visitor for TextCollector {
    fn visit_element(&mut self, element: &Element) {
        if self.depth == 0 {
            self.lines.push(String::new());
        }
        self.depth += 1;
        walk_element(self, element);
        self.depth -= 1;
    }

    fn visit_text(&mut self, text: &Text) {
        match self.lines.last_mut() {
            Some(line) => line.push_str(&text.text),
            None => self.lines.push(text.text.clone()),
        }
    }
}

#[derive(Default)]
struct WordCounter {
    words: usize,
}

impl Visitor for WordCounter {
    fn visit_text(&mut self, text: &Text) {
        self.words += text.text.split_whitespace().count();
    }
}
