use std::sync::Once;

use monitor_core::{reconcile, ManuscriptRecord, Snapshot, Source, StoredEntry, Timestamp};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(monitor_logging::initialize_for_tests);
}

fn ts(text: &str) -> Timestamp {
    Timestamp::parse(text).unwrap()
}

fn record(source: &str, id: &str, title: &str, status: &str) -> ManuscriptRecord {
    ManuscriptRecord {
        source: Source::new(source),
        id: id.to_string(),
        title: title.to_string(),
        status: status.to_string(),
        url: None,
    }
}

fn entry(source: &str, id: &str, status: &str, first_seen: &str, last_checked: &str) -> StoredEntry {
    StoredEntry {
        id: id.to_string(),
        title: format!("title of {id}"),
        status: status.to_string(),
        source: Source::new(source),
        url: None,
        last_checked: ts(last_checked),
        first_seen: ts(first_seen),
    }
}

#[test]
fn status_change_emits_one_event() {
    init_logging();
    let mut old = Snapshot::new();
    old.insert(
        "IEEE_123".to_string(),
        entry("IEEE", "123", "Under Review", "2024-01-01 08:00:00", "2024-01-02 08:00:00"),
    );
    let harvested = vec![record("IEEE", "123", "X", "Accepted")];
    let now = ts("2024-01-03 08:00:00");

    let result = reconcile(&old, &harvested, now);

    assert_eq!(result.changes.len(), 1);
    let event = &result.changes[0];
    assert_eq!(event.id, "123");
    assert_eq!(event.old_status, "Under Review");
    assert_eq!(event.new_status, "Accepted");
    assert_eq!(event.changed_at, now);
    assert_eq!(result.snapshot["IEEE_123"].status, "Accepted");
    assert!(result.new_keys.is_empty());
}

#[test]
fn new_record_is_silent_but_stored() {
    init_logging();
    let old = Snapshot::new();
    let harvested = vec![record("IEEE", "9", "Y", "Submitted")];
    let now = ts("2024-02-01 12:00:00");

    let result = reconcile(&old, &harvested, now);

    assert!(result.changes.is_empty());
    assert_eq!(result.new_keys, vec!["IEEE_9".to_string()]);
    let stored = &result.snapshot["IEEE_9"];
    assert_eq!(stored.first_seen, now);
    assert_eq!(stored.last_checked, now);
    assert_eq!(stored.status, "Submitted");
}

#[test]
fn reconcile_is_idempotent_against_its_own_output() {
    init_logging();
    let old = Snapshot::new();
    let harvested = vec![
        record("IEEE", "1", "A", "Under Review"),
        record("Elsevier", "2", "B", "With Editor"),
    ];

    let first = reconcile(&old, &harvested, ts("2024-03-01 09:00:00"));
    let second = reconcile(&first.snapshot, &harvested, ts("2024-03-02 09:00:00"));

    assert!(second.changes.is_empty());
    assert!(second.new_keys.is_empty());
}

#[test]
fn first_seen_never_moves() {
    init_logging();
    let mut old = Snapshot::new();
    old.insert(
        "IEEE_1".to_string(),
        entry("IEEE", "1", "Submitted", "2023-12-24 10:30:00", "2024-01-01 10:30:00"),
    );
    let harvested = vec![record("IEEE", "1", "A", "Under Review")];
    let now = ts("2024-01-08 10:30:00");

    let result = reconcile(&old, &harvested, now);

    let stored = &result.snapshot["IEEE_1"];
    assert_eq!(stored.first_seen, ts("2023-12-24 10:30:00"));
    assert_eq!(stored.last_checked, now);
    assert!(stored.first_seen <= stored.last_checked);
}

#[test]
fn unchanged_status_still_updates_last_checked() {
    init_logging();
    let mut old = Snapshot::new();
    old.insert(
        "IEEE_1".to_string(),
        entry("IEEE", "1", "Under Review", "2024-01-01 08:00:00", "2024-01-02 08:00:00"),
    );
    let now = ts("2024-01-09 08:00:00");

    let result = reconcile(&old, &[record("IEEE", "1", "A", "Under Review")], now);

    assert!(result.changes.is_empty());
    assert_eq!(result.snapshot["IEEE_1"].last_checked, now);
}

#[test]
fn duplicate_keys_last_observed_wins() {
    init_logging();
    let old = Snapshot::new();
    let harvested = vec![
        record("IEEE", "1", "A", "Submitted"),
        record("IEEE", "1", "A", "Under Review"),
    ];
    let now = ts("2024-04-01 00:00:00");

    let result = reconcile(&old, &harvested, now);

    assert_eq!(result.snapshot.len(), 1);
    assert_eq!(result.snapshot["IEEE_1"].status, "Under Review");
    // The key is new exactly once.
    assert_eq!(result.new_keys, vec!["IEEE_1".to_string()]);
}

#[test]
fn same_id_in_different_sources_stays_distinct() {
    init_logging();
    let old = Snapshot::new();
    let harvested = vec![
        record("IEEE", "42", "A", "Submitted"),
        record("Elsevier", "42", "B", "With Editor"),
    ];

    let result = reconcile(&old, &harvested, ts("2024-04-02 00:00:00"));

    assert_eq!(result.snapshot.len(), 2);
    assert!(result.snapshot.contains_key("IEEE_42"));
    assert!(result.snapshot.contains_key("Elsevier_42"));
}

#[test]
fn unobserved_keys_carry_over_unchanged() {
    init_logging();
    let mut old = Snapshot::new();
    old.insert(
        "IEEE_1".to_string(),
        entry("IEEE", "1", "Under Review", "2024-01-01 08:00:00", "2024-01-05 08:00:00"),
    );
    old.insert(
        "Elsevier_2".to_string(),
        entry("Elsevier", "2", "With Editor", "2024-01-02 08:00:00", "2024-01-05 08:00:00"),
    );
    let now = ts("2024-01-12 08:00:00");

    // Only the IEEE record shows up this run; the Elsevier scrape came
    // back empty.
    let result = reconcile(&old, &[record("IEEE", "1", "A", "Under Review")], now);

    assert!(result.changes.is_empty());
    let kept = &result.snapshot["Elsevier_2"];
    assert_eq!(kept, &old["Elsevier_2"]);
    assert_eq!(kept.last_checked, ts("2024-01-05 08:00:00"));
}

#[test]
fn events_follow_harvest_order() {
    init_logging();
    let mut old = Snapshot::new();
    old.insert(
        "IEEE_b".to_string(),
        entry("IEEE", "b", "Submitted", "2024-01-01 00:00:00", "2024-01-01 00:00:00"),
    );
    old.insert(
        "IEEE_a".to_string(),
        entry("IEEE", "a", "Submitted", "2024-01-01 00:00:00", "2024-01-01 00:00:00"),
    );
    let harvested = vec![
        record("IEEE", "b", "B", "Accepted"),
        record("IEEE", "a", "A", "Rejected"),
    ];

    let result = reconcile(&old, &harvested, ts("2024-01-02 00:00:00"));

    let ids: Vec<&str> = result.changes.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["b", "a"]);
}

#[test]
fn events_never_carry_equal_statuses() {
    init_logging();
    let mut old = Snapshot::new();
    old.insert(
        "IEEE_1".to_string(),
        entry("IEEE", "1", "Accepted", "2024-01-01 00:00:00", "2024-01-01 00:00:00"),
    );

    let result = reconcile(
        &old,
        &[record("IEEE", "1", "A", "Accepted")],
        ts("2024-01-02 00:00:00"),
    );

    assert!(result.changes.is_empty());
}

#[test]
fn timestamp_round_trips_through_text() {
    let now = ts("2024-06-30 23:59:59");
    assert_eq!(now.to_string(), "2024-06-30 23:59:59");
    assert_eq!(Timestamp::parse(&now.to_string()).unwrap(), now);
}

#[test]
fn stored_entry_serializes_with_the_persisted_layout() {
    let stored = entry("IEEE", "123", "Under Review", "2024-01-01 08:00:00", "2024-01-02 08:00:00");
    let json = serde_json::to_value(&stored).unwrap();
    assert_eq!(json["id"], "123");
    assert_eq!(json["status"], "Under Review");
    assert_eq!(json["source"], "IEEE");
    assert_eq!(json["first_seen"], "2024-01-01 08:00:00");
    assert_eq!(json["last_checked"], "2024-01-02 08:00:00");
}
