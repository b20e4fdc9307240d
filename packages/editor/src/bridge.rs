//! # Editor Bridge
//!
//! Contract between the version core and the live editing surface.
//!
//! The live buffer is owned by the bridge; the version core only reads a
//! snapshot of it and hands content back to be written.
//!
//! - **Mandatory**: [`read_content`](EditorBridge::read_content),
//!   [`write_content`](EditorBridge::write_content)
//! - **Optional**: normalization and change notification, exposed through
//!   [`as_normalizer`](EditorBridge::as_normalizer) and
//!   [`as_change_listener`](EditorBridge::as_change_listener). A bridge that
//!   lacks a capability keeps the default `None`.
//!
//! ## Write path
//!
//! ```text
//! write(content) → normalize(force) ──ok──→ notify(content)   Applied
//!        │ err
//!        ↓
//! write(minimal) → normalize(force) ──ok──→ notify(minimal)   FellBack
//!        │ err
//!        ↓
//! error! to the observability target                          Failed
//! ```
//!
//! Listeners are always told about the content that was actually committed.

use plume_common::{Content, Node, PARAGRAPH};
use tracing::{debug, error, warn};

use crate::errors::BridgeError;

/// Tracing target for failures that leave the live buffer stale
pub const OBSERVABILITY_TARGET: &str = "plume::observability";

/// Live editing surface
pub trait EditorBridge {
    /// Snapshot of the live buffer (may be empty)
    fn read_content(&self) -> Content;

    /// Replace the live buffer.
    ///
    /// Either the whole content is applied or the buffer is left unchanged
    /// and an error is returned.
    fn write_content(&mut self, content: &Content) -> Result<(), BridgeError>;

    fn as_normalizer(&mut self) -> Option<&mut dyn Normalize> {
        None
    }

    fn as_change_listener(&mut self) -> Option<&mut dyn ChangeListener> {
        None
    }
}

/// Repairs structural invariants the editing surface enforces
pub trait Normalize {
    fn normalize(&mut self, force: bool) -> Result<(), BridgeError>;
}

/// Lets dependent UI react to newly written content
pub trait ChangeListener {
    fn content_changed(&mut self, content: &Content);
}

/// What happened when content was pushed into the live buffer
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// The requested content was committed
    Applied,

    /// The requested content was rejected; a single empty paragraph was committed instead
    FellBack { error: BridgeError },

    /// Both attempts failed; the buffer holds whatever the last attempt left
    Failed {
        primary: BridgeError,
        fallback: BridgeError,
    },
}

impl LoadOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, LoadOutcome::Applied)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, LoadOutcome::Failed { .. })
    }
}

/// Push `content` into the live buffer, falling back to a minimal document
pub fn load_content<B: EditorBridge + ?Sized>(bridge: &mut B, content: &Content) -> LoadOutcome {
    let primary = match commit(bridge, content) {
        Ok(()) => {
            notify(bridge, content);
            debug!(blocks = content.len(), "loaded content into editor");
            return LoadOutcome::Applied;
        }
        Err(e) => e,
    };

    warn!(error = %primary, "editor rejected version content, loading an empty paragraph instead");

    let fallback_content = Content::minimal();
    match commit(bridge, &fallback_content) {
        Ok(()) => {
            notify(bridge, &fallback_content);
            LoadOutcome::FellBack { error: primary }
        }
        Err(fallback) => {
            error!(
                target: OBSERVABILITY_TARGET,
                primary = %primary,
                fallback = %fallback,
                "editor rejected fallback content, live buffer may be stale"
            );
            LoadOutcome::Failed { primary, fallback }
        }
    }
}

fn commit<B: EditorBridge + ?Sized>(bridge: &mut B, content: &Content) -> Result<(), BridgeError> {
    bridge.write_content(content)?;
    if let Some(normalizer) = bridge.as_normalizer() {
        normalizer.normalize(true)?;
    }
    Ok(())
}

fn notify<B: EditorBridge + ?Sized>(bridge: &mut B, content: &Content) {
    if let Some(listener) = bridge.as_change_listener() {
        listener.content_changed(content);
    }
}

/// In-memory live buffer.
///
/// Useful for headless editing and tests. Normalization and change tracking
/// are opt-in so both capability paths can be exercised.
#[derive(Debug, Clone, Default)]
pub struct MemoryBuffer {
    content: Content,
    normalizes: bool,
    tracks_changes: bool,
    normalize_calls: usize,
    changes: Vec<Content>,
}

impl MemoryBuffer {
    pub fn new(content: Content) -> Self {
        Self {
            content,
            ..Self::default()
        }
    }

    /// Enable the normalization capability
    pub fn with_normalizer(mut self) -> Self {
        self.normalizes = true;
        self
    }

    /// Enable the change-notification capability
    pub fn with_change_tracking(mut self) -> Self {
        self.tracks_changes = true;
        self
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    /// Simulate the user typing: replace the buffer without notifications
    pub fn edit(&mut self, content: Content) {
        self.content = content;
    }

    pub fn normalize_calls(&self) -> usize {
        self.normalize_calls
    }

    /// Content passed to each change notification, oldest first
    pub fn changes(&self) -> &[Content] {
        &self.changes
    }
}

impl EditorBridge for MemoryBuffer {
    fn read_content(&self) -> Content {
        self.content.deep_copy()
    }

    fn write_content(&mut self, content: &Content) -> Result<(), BridgeError> {
        self.content = content.deep_copy();
        Ok(())
    }

    fn as_normalizer(&mut self) -> Option<&mut dyn Normalize> {
        if self.normalizes {
            Some(self)
        } else {
            None
        }
    }

    fn as_change_listener(&mut self) -> Option<&mut dyn ChangeListener> {
        if self.tracks_changes {
            Some(self)
        } else {
            None
        }
    }
}

impl Normalize for MemoryBuffer {
    /// Wraps stray top-level text into paragraphs and never leaves the
    /// buffer without a block.
    fn normalize(&mut self, _force: bool) -> Result<(), BridgeError> {
        self.normalize_calls += 1;

        let blocks = std::mem::take(self.content.blocks_mut());
        let mut normalized = Vec::with_capacity(blocks.len().max(1));
        for node in blocks {
            if node.is_block() {
                normalized.push(node);
            } else {
                normalized.push(Node::element(PARAGRAPH, vec![node]));
            }
        }
        if normalized.is_empty() {
            normalized = Content::minimal().blocks().to_vec();
        }

        *self.content.blocks_mut() = normalized;
        Ok(())
    }
}

impl ChangeListener for MemoryBuffer {
    fn content_changed(&mut self, content: &Content) {
        self.changes.push(content.deep_copy());
    }
}
