//! # Plume Editor
//!
//! Version history for a rich-text editing surface.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ UI: save / select / delete / rename         │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ VersionHistory                              │
//! │  - reads live content before switching      │
//! │  - pushes resolved content back             │
//! └─────────────────────────────────────────────┘
//!           ↓                        ↓
//! ┌───────────────────┐   ┌─────────────────────┐
//! │ VersionStore      │   │ EditorBridge        │
//! │  snapshots +      │   │  live buffer,       │
//! │  current pointer  │   │  normalize, notify  │
//! └───────────────────┘   └─────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Exactly one current version** whenever the collection is non-empty
//! 2. **Capture before switch**: live edits are frozen into the outgoing version first
//! 3. **Copies, never aliases**: stored content never shares storage with the buffer
//! 4. **Local recovery**: invalid content and rejected writes degrade to a
//!    minimal document instead of surfacing errors
//!
//! ## Usage
//!
//! ```rust
//! use plume_editor::{MemoryBuffer, VersionHistory, VersionId};
//! use plume_common::Content;
//!
//! let buffer = MemoryBuffer::new(Content::default_document()).with_change_tracking();
//! let mut history = VersionHistory::new(buffer);
//!
//! let saved = history.save_new_version();
//! history.select_version(&VersionId::from("1")).unwrap();
//! history.rename_version(&saved, "Before edits");
//! assert_eq!(history.current_version().unwrap().id, VersionId::from("1"));
//! ```

mod bridge;
mod clock;
mod errors;
mod history;
mod store;
mod version;

pub use bridge::{
    load_content, ChangeListener, EditorBridge, LoadOutcome, MemoryBuffer, Normalize,
    OBSERVABILITY_TARGET,
};
pub use clock::{Clock, ManualClock, SystemClock};
pub use errors::{BridgeError, VersionError};
pub use history::VersionHistory;
pub use store::{resolve_content, VersionStore, NEW_VERSION_NAME};
pub use version::{version_name, Version, VersionId, VersionRecord, VersionSummary};

// Re-export the content tree for convenience
pub use plume_common::{Content, Element, Node, Text};
