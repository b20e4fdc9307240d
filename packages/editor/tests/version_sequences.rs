//! Property-based tests for arbitrary create/select/delete/rename sequences
//!
//! After every step:
//! - exactly one version is current
//! - the collection is never empty
//! - ids stay unique

use chrono::{Duration, TimeZone, Utc};
use plume_editor::{Content, ManualClock, VersionId, VersionStore};
use proptest::prelude::*;
use std::collections::HashSet;

#[derive(Debug, Clone)]
enum Op {
    Create(String),
    Select(usize, String),
    SelectMissing,
    Delete(usize),
    DeleteMissing,
    Rename(usize, String),
    Tick(i64),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        "[a-z ]{0,12}".prop_map(Op::Create),
        (0usize..8, "[a-z ]{0,12}").prop_map(|(i, s)| Op::Select(i, s)),
        Just(Op::SelectMissing),
        (0usize..8).prop_map(Op::Delete),
        Just(Op::DeleteMissing),
        (0usize..8, "[A-Za-z]{1,8}").prop_map(|(i, s)| Op::Rename(i, s)),
        (0i64..3).prop_map(Op::Tick),
    ]
}

fn live(text: &str) -> Content {
    Content::new(vec![Content::block("p", text)])
}

fn pick(store: &VersionStore, index: usize) -> VersionId {
    let versions = store.versions();
    versions[index % versions.len()].id.clone()
}

fn assert_invariants(store: &VersionStore) -> Result<(), TestCaseError> {
    prop_assert!(!store.is_empty());

    let flagged = store.records().iter().filter(|r| r.is_current).count();
    prop_assert_eq!(flagged, 1);

    let ids: HashSet<_> = store.versions().iter().map(|v| v.id.clone()).collect();
    prop_assert_eq!(ids.len(), store.len());
    Ok(())
}

proptest! {
    #[test]
    fn exactly_one_current_after_every_operation(ops in prop::collection::vec(op(), 1..40)) {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        let mut store = VersionStore::bootstrap_with_clock(clock.clone());

        for op in ops {
            match op {
                Op::Create(text) => {
                    let before = store.len();
                    let id = store.create_version(&live(&text));
                    prop_assert_eq!(store.len(), before + 1);
                    prop_assert!(store.is_current(&id));
                }
                Op::Select(i, text) => {
                    let target = pick(&store, i);
                    prop_assert!(store.select_version(&target, &live(&text)).unwrap().is_valid());
                    prop_assert!(store.is_current(&target));
                }
                Op::SelectMissing => {
                    let before = store.records();
                    prop_assert!(store.select_version(&VersionId::from("missing"), &live("x")).is_err());
                    prop_assert_eq!(store.records(), before);
                }
                Op::Delete(i) => {
                    let target = pick(&store, i);
                    store.delete_version(&target);
                    prop_assert!(store.get(&target).is_none() || store.len() == 1);
                }
                Op::DeleteMissing => {
                    let before = store.records();
                    store.delete_version(&VersionId::from("missing"));
                    prop_assert_eq!(store.records(), before);
                }
                Op::Rename(i, name) => {
                    let target = pick(&store, i);
                    let current = store.current_id().cloned();
                    store.rename_version(&target, name.clone());
                    prop_assert_eq!(&store.get(&target).unwrap().name, &name);
                    prop_assert_eq!(store.current_id().cloned(), current);
                }
                Op::Tick(ms) => clock.advance(Duration::milliseconds(ms)),
            }

            assert_invariants(&store)?;
        }
    }

    #[test]
    fn create_never_touches_existing_content(texts in prop::collection::vec("[a-z]{1,6}", 1..10)) {
        let mut store = VersionStore::bootstrap();

        for text in texts {
            let before: Vec<Content> = store.versions().iter().map(|v| v.content.clone()).collect();
            let input = live(&text);
            let id = store.create_version(&input);

            for (version, content) in store.versions().iter().zip(&before) {
                prop_assert_eq!(&version.content, content);
            }
            let stored = &store.get(&id).unwrap().content;
            prop_assert_eq!(stored, &input);
            prop_assert!(!std::ptr::eq(stored.blocks().as_ptr(), input.blocks().as_ptr()));
        }
    }
}
