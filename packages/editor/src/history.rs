//! # Version History
//!
//! Wires a [`VersionStore`] to a live editor through an [`EditorBridge`].
//!
//! This is the surface UI actions call into: save, select, delete, rename.
//! Selecting a version reads the live buffer first, so unsaved edits are
//! frozen into the outgoing version before the buffer is replaced.

use plume_common::Content;
use tracing::info;

use crate::bridge::{load_content, EditorBridge, LoadOutcome};
use crate::errors::VersionError;
use crate::store::VersionStore;
use crate::version::{Version, VersionId};

/// Version history bound to a live editor
#[derive(Debug)]
pub struct VersionHistory<B: EditorBridge> {
    store: VersionStore,
    bridge: B,
}

impl<B: EditorBridge> VersionHistory<B> {
    /// History seeded with the startup versions
    pub fn new(bridge: B) -> Self {
        Self::with_store(VersionStore::bootstrap(), bridge)
    }

    pub fn with_store(store: VersionStore, bridge: B) -> Self {
        Self { store, bridge }
    }

    /// Snapshot the live buffer as a new current version
    pub fn save_new_version(&mut self) -> VersionId {
        let live = self.bridge.read_content();
        let id = self.store.create_version(&live);
        info!(id = %id, "saved new version");
        id
    }

    /// Switch the editor to another version
    pub fn select_version(&mut self, id: &VersionId) -> Result<LoadOutcome, VersionError> {
        let live = self.bridge.read_content();
        let resolved = self.store.select_version(id, &live)?;
        Ok(load_content(&mut self.bridge, &resolved))
    }

    /// Remove a version; the store keeps one current
    pub fn delete_version(&mut self, id: &VersionId) -> bool {
        self.store.delete_version(id)
    }

    pub fn rename_version(&mut self, id: &VersionId, name: impl Into<String>) -> bool {
        self.store.rename_version(id, name)
    }

    pub fn current_version(&self) -> Option<&Version> {
        self.store.current()
    }

    pub fn versions(&self) -> &[Version] {
        self.store.versions()
    }

    /// Live buffer content as the bridge reports it
    pub fn live_content(&self) -> Content {
        self.bridge.read_content()
    }

    pub fn store(&self) -> &VersionStore {
        &self.store
    }

    pub fn bridge(&self) -> &B {
        &self.bridge
    }

    pub fn bridge_mut(&mut self) -> &mut B {
        &mut self.bridge
    }

    pub fn into_parts(self) -> (VersionStore, B) {
        (self.store, self.bridge)
    }
}
