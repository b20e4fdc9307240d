//! # Version Store
//!
//! Ordered collection of document snapshots with a single *current* entry.
//!
//! ## Invariant
//!
//! Whenever the collection is non-empty after an operation, exactly one
//! version is current. The store keeps an explicit id reference to it rather
//! than a flag per record, so two entries can never both claim the role. The
//! collection is never left empty: deleting the last version synthesizes a
//! fresh one.
//!
//! ## Switching versions
//!
//! ```text
//! select(target, live)
//!   1. target must exist          → otherwise NotFound, nothing mutated
//!   2. outgoing.content = copy(live)   (unsaved edits are frozen first)
//!   3. current = target
//!   4. resolve target content     → default / minimal substitution
//! ```
//!
//! The store never touches the live buffer; the caller hands the resolved
//! content to an [`EditorBridge`](crate::EditorBridge).

use chrono::Duration;
use plume_common::Content;
use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::errors::VersionError;
use crate::version::{version_name, Version, VersionId, VersionRecord, VersionSummary};

/// Name given to the version synthesized when the collection empties
pub const NEW_VERSION_NAME: &str = "New version";

/// Version history state machine
#[derive(Debug)]
pub struct VersionStore {
    /// Insertion order, not freshness order
    versions: Vec<Version>,

    /// The current version, if any
    current: Option<VersionId>,

    clock: Box<dyn Clock>,

    /// Last time-derived id handed out (milliseconds)
    last_issued: i64,
}

impl VersionStore {
    /// Store seeded with the two startup versions
    pub fn bootstrap() -> Self {
        Self::bootstrap_with_clock(SystemClock)
    }

    /// Seeds an "Initial version" holding the welcome text, dated a day
    /// back, and an uncaptured "Current version" placeholder.
    pub fn bootstrap_with_clock(clock: impl Clock + 'static) -> Self {
        let now = clock.now();
        let initial = Version::new(
            VersionId::from("1"),
            "Initial version",
            now - Duration::days(1),
            Content::welcome(),
        );
        let current = Version::placeholder(VersionId::from("2"), "Current version", now);
        let current_id = current.id.clone();

        Self {
            versions: vec![initial, current],
            current: Some(current_id),
            clock: Box::new(clock),
            last_issued: 0,
        }
    }

    /// Build a store from flag-carrying records.
    ///
    /// The first flagged record becomes current. Records with a repeated id
    /// are dropped. An empty input is repaired with a fresh version; a
    /// non-empty input with no flag is kept as-is until the next select or
    /// delete repairs it.
    pub fn from_records(records: Vec<VersionRecord>, clock: impl Clock + 'static) -> Self {
        let mut versions: Vec<Version> = Vec::with_capacity(records.len());
        let mut current: Option<VersionId> = None;

        for record in records {
            if versions.iter().any(|v| v.id == record.id) {
                warn!(id = %record.id, "dropping version record with duplicate id");
                continue;
            }

            if record.is_current {
                match &current {
                    None => current = Some(record.id.clone()),
                    Some(existing) => warn!(
                        id = %record.id,
                        current = %existing,
                        "multiple versions flagged current, keeping the first"
                    ),
                }
            }

            versions.push(record.into_version());
        }

        let mut store = Self {
            versions,
            current,
            clock: Box::new(clock),
            last_issued: 0,
        };

        if store.versions.is_empty() {
            store.synthesize_default();
        } else if store.current.is_none() {
            warn!(count = store.versions.len(), "no version flagged current");
        }

        store
    }

    /// Capture `live` as a new version and make it current
    pub fn create_version(&mut self, live: &Content) -> VersionId {
        let id = self.next_id();
        let date = self.clock.now();
        let version = Version::new(id.clone(), version_name(date), date, live.deep_copy());

        debug!(id = %id, name = %version.name, blocks = live.len(), "created version");

        self.versions.push(version);
        self.current = Some(id.clone());
        id
    }

    /// Switch to `target`, freezing `live` into the outgoing version.
    ///
    /// Returns the content the editor should load. An unknown `target`
    /// leaves the store untouched.
    pub fn select_version(&mut self, target: &VersionId, live: &Content) -> Result<Content, VersionError> {
        if !self.contains(target) {
            warn!(id = %target, "cannot select unknown version");
            return Err(VersionError::NotFound(target.clone()));
        }

        // Capture before the current reference moves
        let captured_at = self.clock.now();
        match self.current.take() {
            Some(outgoing_id) => match self.find_mut(&outgoing_id) {
                Some(outgoing) => {
                    outgoing.content = live.deep_copy();
                    outgoing.date = captured_at;
                    outgoing.placeholder = false;
                    debug!(id = %outgoing_id, blocks = live.len(), "captured live content");
                }
                None => warn!(id = %outgoing_id, "current version missing from collection, live edits not captured"),
            },
            None => warn!("no current version to capture live edits into"),
        }

        self.current = Some(target.clone());
        debug!(id = %target, "selected version");

        let version = self
            .get(target)
            .ok_or_else(|| VersionError::NotFound(target.clone()))?;
        Ok(resolve_content(version))
    }

    /// Remove a version, keeping one current. Returns whether it existed.
    pub fn delete_version(&mut self, id: &VersionId) -> bool {
        let before = self.versions.len();
        self.versions.retain(|v| &v.id != id);
        let removed = self.versions.len() != before;

        if self.versions.is_empty() {
            debug!(id = %id, "deleted last version, synthesizing a new one");
            self.synthesize_default();
            return removed;
        }

        let current_alive = self
            .current
            .as_ref()
            .map(|current| self.contains(current))
            .unwrap_or(false);

        if !current_alive {
            let promoted = self.versions[0].id.clone();
            debug!(id = %promoted, "promoting first version to current");
            self.current = Some(promoted);
        }

        if removed {
            debug!(id = %id, "deleted version");
        }
        removed
    }

    /// Rename a version. Returns whether it existed.
    pub fn rename_version(&mut self, id: &VersionId, name: impl Into<String>) -> bool {
        match self.find_mut(id) {
            Some(version) => {
                version.name = name.into();
                true
            }
            None => false,
        }
    }

    pub fn current(&self) -> Option<&Version> {
        self.current.as_ref().and_then(|id| self.get(id))
    }

    pub fn current_id(&self) -> Option<&VersionId> {
        self.current.as_ref()
    }

    pub fn is_current(&self, id: &VersionId) -> bool {
        self.current.as_ref() == Some(id)
    }

    pub fn get(&self, id: &VersionId) -> Option<&Version> {
        self.versions.iter().find(|v| &v.id == id)
    }

    pub fn contains(&self, id: &VersionId) -> bool {
        self.get(id).is_some()
    }

    /// Versions in insertion order
    pub fn versions(&self) -> &[Version] {
        &self.versions
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    /// Export with per-record current flags
    pub fn records(&self) -> Vec<VersionRecord> {
        self.versions
            .iter()
            .map(|v| VersionRecord::from_version(v, self.is_current(&v.id)))
            .collect()
    }

    pub fn summaries(&self) -> Vec<VersionSummary> {
        self.versions
            .iter()
            .map(|v| VersionSummary {
                id: v.id.clone(),
                name: v.name.clone(),
                date: v.date,
                is_current: self.is_current(&v.id),
                word_count: v.content.word_count(),
            })
            .collect()
    }

    fn find_mut(&mut self, id: &VersionId) -> Option<&mut Version> {
        self.versions.iter_mut().find(|v| &v.id == id)
    }

    fn synthesize_default(&mut self) {
        let id = self.next_id();
        let version = Version::new(id.clone(), NEW_VERSION_NAME, self.clock.now(), Content::minimal());
        self.versions.push(version);
        self.current = Some(id);
    }

    /// Time-derived id, bumped past anything already issued or stored
    fn next_id(&mut self) -> VersionId {
        let mut candidate = self.clock.now().timestamp_millis().max(self.last_issued + 1);
        while self.contains(&VersionId::new(candidate.to_string())) {
            candidate += 1;
        }
        self.last_issued = candidate;
        VersionId::new(candidate.to_string())
    }
}

impl Default for VersionStore {
    fn default() -> Self {
        Self::bootstrap()
    }
}

/// Content to load for `version`.
///
/// An untouched placeholder resolves to the default document. Anything that
/// is not a non-empty sequence of blocks resolves to a single empty paragraph.
pub fn resolve_content(version: &Version) -> Content {
    let content = if version.placeholder && version.content.is_empty() {
        Content::default_document()
    } else {
        version.content.deep_copy()
    };

    if content.is_valid() {
        content
    } else {
        warn!(id = %version.id, blocks = content.len(), "version content is not a valid block sequence, loading an empty paragraph");
        Content::minimal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use chrono::{TimeZone, Utc};
    use plume_common::Node;

    fn clock() -> ManualClock {
        ManualClock::new(Utc.with_ymd_and_hms(2024, 3, 7, 9, 0, 0).unwrap())
    }

    fn draft(text: &str) -> Content {
        Content::new(vec![Content::block("p", text)])
    }

    fn current_count(store: &VersionStore) -> usize {
        store.records().iter().filter(|r| r.is_current).count()
    }

    #[test]
    fn test_bootstrap_seeds_two_versions() {
        let store = VersionStore::bootstrap_with_clock(clock());

        assert_eq!(store.len(), 2);
        assert_eq!(store.versions()[0].name, "Initial version");
        assert_eq!(store.versions()[1].name, "Current version");
        assert_eq!(store.current_id(), Some(&VersionId::from("2")));
        assert!(store.versions()[1].placeholder);
        assert_eq!(
            store.versions()[1].date - store.versions()[0].date,
            Duration::days(1)
        );
    }

    #[test]
    fn test_create_version_becomes_current() {
        let clock = clock();
        let mut store = VersionStore::bootstrap_with_clock(clock.clone());

        let id = store.create_version(&draft("hello"));

        assert_eq!(store.len(), 3);
        assert_eq!(store.current_id(), Some(&id));
        assert_eq!(current_count(&store), 1);

        let created = store.get(&id).unwrap();
        assert_eq!(created.name, "Version 3/7/2024");
        assert_eq!(created.date, clock.now());
        assert_eq!(created.content, draft("hello"));
        assert_eq!(created.id.as_str(), clock.now().timestamp_millis().to_string());
    }

    #[test]
    fn test_ids_never_collide_within_same_millisecond() {
        let mut store = VersionStore::bootstrap_with_clock(clock());

        let a = store.create_version(&draft("a"));
        let b = store.create_version(&draft("b"));
        let c = store.create_version(&draft("c"));

        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_ne!(a, c);
    }

    #[test]
    fn test_next_id_skips_existing_ids() {
        let clock = ManualClock::new(Utc.timestamp_millis_opt(5).unwrap());
        let records = vec![VersionRecord {
            id: VersionId::from("5"),
            name: "taken".to_string(),
            date: clock.now(),
            content: draft("x"),
            is_current: true,
            placeholder: false,
        }];
        let mut store = VersionStore::from_records(records, clock);

        let id = store.create_version(&draft("y"));
        assert_eq!(id, VersionId::from("6"));
    }

    #[test]
    fn test_select_captures_then_switches() {
        let mut store = VersionStore::bootstrap_with_clock(clock());

        let loaded = store.select_version(&VersionId::from("1"), &draft("draft")).unwrap();

        assert_eq!(store.current_id(), Some(&VersionId::from("1")));
        assert_eq!(store.get(&VersionId::from("2")).unwrap().content, draft("draft"));
        assert!(!store.get(&VersionId::from("2")).unwrap().placeholder);
        assert_eq!(loaded, Content::welcome());
    }

    #[test]
    fn test_select_capture_updates_date_but_not_name() {
        let clock = clock();
        let mut store = VersionStore::bootstrap_with_clock(clock.clone());
        clock.advance(Duration::minutes(5));

        store.select_version(&VersionId::from("1"), &draft("draft")).unwrap();

        let outgoing = store.get(&VersionId::from("2")).unwrap();
        assert_eq!(outgoing.date, clock.now());
        assert_eq!(outgoing.name, "Current version");
    }

    #[test]
    fn test_select_unknown_leaves_store_untouched() {
        let mut store = VersionStore::bootstrap_with_clock(clock());
        let before = store.records();

        let result = store.select_version(&VersionId::from("404"), &draft("lost?"));

        assert_eq!(result, Err(VersionError::NotFound(VersionId::from("404"))));
        assert_eq!(store.records(), before);
        assert_eq!(store.current_id(), Some(&VersionId::from("2")));
    }

    #[test]
    fn test_select_untouched_placeholder_loads_default_document() {
        let mut store = VersionStore::bootstrap_with_clock(clock());
        store.select_version(&VersionId::from("1"), &Content::welcome()).unwrap();

        // "2" was captured on the way out, so it is no longer a placeholder
        let loaded = store.select_version(&VersionId::from("2"), &Content::welcome()).unwrap();
        assert_eq!(loaded, draft("Welcome to your editor!"));

        let mut fresh = VersionStore::from_records(
            vec![
                VersionRecord::from_version(&Version::new(VersionId::from("1"), "a", clock().now(), draft("a")), true),
                VersionRecord::from_version(&Version::placeholder(VersionId::from("2"), "b", clock().now()), false),
            ],
            clock(),
        );
        let loaded = fresh.select_version(&VersionId::from("2"), &draft("a")).unwrap();
        assert_eq!(loaded, Content::default_document());
    }

    #[test]
    fn test_select_invalid_content_loads_minimal() {
        let records = vec![
            VersionRecord {
                id: VersionId::from("1"),
                name: "empty".to_string(),
                date: clock().now(),
                content: Content::empty(),
                is_current: false,
                placeholder: false,
            },
            VersionRecord {
                id: VersionId::from("2"),
                name: "stray text".to_string(),
                date: clock().now(),
                content: Content::new(vec![Node::text("no block")]),
                is_current: true,
                placeholder: false,
            },
        ];
        let mut store = VersionStore::from_records(records, clock());

        let loaded = store.select_version(&VersionId::from("1"), &draft("live")).unwrap();
        assert_eq!(loaded, Content::minimal());

        let loaded = store.select_version(&VersionId::from("2"), &Content::new(vec![Node::text("bad")])).unwrap();
        assert_eq!(loaded, draft("live"));

        // the stored capture is kept as-is; substitution only affects loading
        assert_eq!(store.get(&VersionId::from("1")).unwrap().content, Content::new(vec![Node::text("bad")]));
        let loaded = store.select_version(&VersionId::from("1"), &draft("live")).unwrap();
        assert_eq!(loaded, Content::minimal());
    }

    #[test]
    fn test_select_without_current_skips_capture() {
        let records = vec![
            VersionRecord::from_version(&Version::new(VersionId::from("1"), "a", clock().now(), draft("a")), false),
            VersionRecord::from_version(&Version::new(VersionId::from("2"), "b", clock().now(), draft("b")), false),
        ];
        let mut store = VersionStore::from_records(records, clock());
        assert_eq!(store.current_id(), None);

        let loaded = store.select_version(&VersionId::from("2"), &draft("live")).unwrap();

        assert_eq!(loaded, draft("b"));
        assert_eq!(store.current_id(), Some(&VersionId::from("2")));
        assert_eq!(store.get(&VersionId::from("1")).unwrap().content, draft("a"));
    }

    #[test]
    fn test_from_records_keeps_first_flag_and_drops_duplicates() {
        let now = clock().now();
        let records = vec![
            VersionRecord::from_version(&Version::new(VersionId::from("1"), "a", now, draft("a")), true),
            VersionRecord::from_version(&Version::new(VersionId::from("2"), "b", now, draft("b")), true),
            VersionRecord::from_version(&Version::new(VersionId::from("1"), "dup", now, draft("c")), false),
        ];
        let store = VersionStore::from_records(records, clock());

        assert_eq!(store.len(), 2);
        assert_eq!(store.current_id(), Some(&VersionId::from("1")));
        assert_eq!(store.get(&VersionId::from("1")).unwrap().name, "a");
    }

    #[test]
    fn test_from_empty_records_synthesizes_version() {
        let store = VersionStore::from_records(Vec::new(), clock());

        assert_eq!(store.len(), 1);
        assert_eq!(store.current().unwrap().name, NEW_VERSION_NAME);
        assert!(store.current().unwrap().content.is_valid());
    }

    #[test]
    fn test_delete_current_promotes_first() {
        let mut store = VersionStore::bootstrap_with_clock(clock());
        let created = store.create_version(&draft("x"));

        assert!(store.delete_version(&created));

        assert_eq!(store.len(), 2);
        assert_eq!(store.current_id(), Some(&VersionId::from("1")));
    }

    #[test]
    fn test_delete_non_current_keeps_current() {
        let mut store = VersionStore::bootstrap_with_clock(clock());

        assert!(store.delete_version(&VersionId::from("1")));

        assert_eq!(store.len(), 1);
        assert_eq!(store.current_id(), Some(&VersionId::from("2")));
    }

    #[test]
    fn test_delete_last_synthesizes_default() {
        let mut store = VersionStore::bootstrap_with_clock(clock());
        store.delete_version(&VersionId::from("1"));
        store.delete_version(&VersionId::from("2"));

        assert_eq!(store.len(), 1);
        let only = &store.versions()[0];
        assert_eq!(only.name, NEW_VERSION_NAME);
        assert_eq!(only.content, Content::minimal());
        assert!(store.is_current(&only.id));
    }

    #[test]
    fn test_delete_unknown_is_noop() {
        let mut store = VersionStore::bootstrap_with_clock(clock());
        let before = store.records();

        assert!(!store.delete_version(&VersionId::from("nope")));
        assert_eq!(store.records(), before);
    }

    #[test]
    fn test_rename_changes_only_name() {
        let mut store = VersionStore::bootstrap_with_clock(clock());
        let before = store.get(&VersionId::from("1")).unwrap().clone();

        assert!(store.rename_version(&VersionId::from("1"), "Kickoff"));

        let after = store.get(&VersionId::from("1")).unwrap();
        assert_eq!(after.name, "Kickoff");
        assert_eq!(after.date, before.date);
        assert_eq!(after.content, before.content);
        assert_eq!(store.current_id(), Some(&VersionId::from("2")));
    }

    #[test]
    fn test_rename_unknown_is_noop() {
        let mut store = VersionStore::bootstrap_with_clock(clock());
        let before = store.records();

        assert!(!store.rename_version(&VersionId::from("nope"), "x"));
        assert_eq!(store.records(), before);
    }

    #[test]
    fn test_summaries_report_current_and_words() {
        let mut store = VersionStore::bootstrap_with_clock(clock());
        store.create_version(&draft("three little words"));

        let summaries = store.summaries();
        assert_eq!(summaries.len(), 3);
        assert_eq!(summaries[0].word_count, 4);
        assert!(!summaries[0].is_current);
        assert!(summaries[2].is_current);
        assert_eq!(summaries[2].word_count, 3);
    }
}
