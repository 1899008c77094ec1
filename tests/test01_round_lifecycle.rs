mod common;

use chrono::Duration;

use crate::common::{at, eighteen_in_cart, group, test_day};
use golf_round_tracker::model::{Busyness, Holes, RoundStatus, TransportMode};
use golf_round_tracker::storage::{MemoryStore, RoundStore, SqliteStore, TextLogStore};
use golf_round_tracker::{RoundTracker, TrackerError};

/// Runs the same checks against every backend.
fn each_store(check: impl Fn(RoundTracker<Box<dyn RoundStore>>)) -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let stores: Vec<Box<dyn RoundStore>> = vec![
        Box::new(MemoryStore::new()),
        Box::new(TextLogStore::open(dir.path().join("logs"))?),
        Box::new(SqliteStore::open_in_memory()?),
    ];
    for store in stores {
        check(RoundTracker::new(store));
    }
    Ok(())
}

#[test]
fn test01_start_then_list_shows_one_active_round() -> Result<(), Box<dyn std::error::Error>> {
    each_store(|mut tracker| {
        let round = tracker
            .start_round("Alice", group(2, TransportMode::Cart), at(9, 0, 0))
            .expect("start succeeds");
        assert_eq!(round.status(), RoundStatus::Active);

        let active = tracker.list_active().expect("list active");
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].golfer_name, "Alice");
        assert_eq!(active[0].id, round.id);
        assert!(active[0].end_time.is_none());
    })
}

#[test]
fn test01_alice_scenario_writes_expected_history_row() -> Result<(), Box<dyn std::error::Error>> {
    each_store(|mut tracker| {
        tracker
            .start_round("Alice", group(2, TransportMode::Cart), at(9, 0, 0))
            .expect("start succeeds");
        let ended = tracker.end_round("Alice", at(11, 30, 0)).expect("end succeeds");
        assert_eq!(ended.summary_line(), "Alice | 2 | Cart | 09:00 AM | 11:30 AM | 02:30:00");

        assert!(tracker.list_active().expect("list active").is_empty());
        let history = tracker.list_history(test_day()).expect("list history");
        assert_eq!(history.len(), 1);
        assert_eq!(history[0], ended);
        assert_eq!(history[0].summary_line(), "Alice | 2 | Cart | 09:00 AM | 11:30 AM | 02:30:00");
    })
}

#[test]
fn test01_bob_cannot_start_twice() -> Result<(), Box<dyn std::error::Error>> {
    each_store(|mut tracker| {
        tracker
            .start_round("Bob", group(1, TransportMode::Walking), at(14, 0, 0))
            .expect("first start succeeds");
        let second = tracker.start_round("Bob", group(3, TransportMode::Cart), at(14, 5, 0));
        assert!(matches!(second, Err(TrackerError::DuplicateActiveRound(ref n)) if n == "Bob"));
        assert_eq!(tracker.list_active().expect("list active").len(), 1);
    })
}

#[test]
fn test01_golfer_can_start_again_after_ending() -> Result<(), Box<dyn std::error::Error>> {
    each_store(|mut tracker| {
        tracker
            .start_round("Bob", group(1, TransportMode::Walking), at(8, 0, 0))
            .expect("start");
        tracker.end_round("Bob", at(10, 0, 0)).expect("end");
        tracker
            .start_round("Bob", group(1, TransportMode::Walking), at(13, 0, 0))
            .expect("second round starts once the first has ended");
        assert_eq!(tracker.active_names().expect("names"), vec!["Bob".to_string()]);
    })
}

#[test]
fn test01_end_without_active_round_fails() -> Result<(), Box<dyn std::error::Error>> {
    each_store(|mut tracker| {
        let never_started = tracker.end_round("Carol", at(10, 0, 0));
        assert!(matches!(never_started, Err(TrackerError::NoActiveRound(_))));

        tracker
            .start_round("Carol", group(4, TransportMode::Cart), at(9, 0, 0))
            .expect("start");
        tracker.end_round("Carol", at(10, 0, 0)).expect("end");
        let already_ended = tracker.end_round("Carol", at(10, 5, 0));
        assert!(matches!(already_ended, Err(TrackerError::NoActiveRound(_))));
        assert_eq!(tracker.list_history(test_day()).expect("history").len(), 1);
    })
}

#[test]
fn test01_blank_names_are_invalid() -> Result<(), Box<dyn std::error::Error>> {
    each_store(|mut tracker| {
        let blank = tracker.start_round("   ", group(1, TransportMode::Cart), at(9, 0, 0));
        assert!(matches!(blank, Err(TrackerError::InvalidInput(_))));
        assert!(tracker.list_active().expect("list active").is_empty());
    })
}

#[test]
fn test01_names_are_trimmed_but_case_sensitive() -> Result<(), Box<dyn std::error::Error>> {
    each_store(|mut tracker| {
        tracker
            .start_round("  Dana ", group(1, TransportMode::Cart), at(9, 0, 0))
            .expect("start");
        let dup = tracker.start_round("Dana", group(1, TransportMode::Cart), at(9, 1, 0));
        assert!(matches!(dup, Err(TrackerError::DuplicateActiveRound(_))));

        tracker
            .start_round("dana", group(1, TransportMode::Cart), at(9, 2, 0))
            .expect("different case is a different golfer");
        assert_eq!(tracker.list_active().expect("list active").len(), 2);
    })
}

#[test]
fn test01_end_before_start_clamps_elapsed() -> Result<(), Box<dyn std::error::Error>> {
    each_store(|mut tracker| {
        tracker
            .start_round("Eve", group(2, TransportMode::Walking), at(11, 0, 0))
            .expect("start");
        let ended = tracker.end_round("Eve", at(10, 45, 0)).expect("end is accepted");
        assert_eq!(ended.elapsed.map(|e| e.to_string()).as_deref(), Some("00:00:00"));
    })
}

#[test]
fn test01_empty_active_list_is_not_an_error() -> Result<(), Box<dyn std::error::Error>> {
    each_store(|tracker| {
        assert!(tracker.list_active().expect("list active").is_empty());
        assert!(tracker.active_board(at(12, 0, 0)).expect("board").is_empty());
        assert!(tracker.list_history(test_day()).expect("history").is_empty());
    })
}

#[test]
fn test01_elapsed_since_is_live_and_not_persisted() -> Result<(), Box<dyn std::error::Error>> {
    each_store(|mut tracker| {
        tracker
            .start_round("Finn", eighteen_in_cart(4), at(7, 0, 0))
            .expect("start");
        let first = tracker.elapsed_since("Finn", at(8, 15, 30)).expect("elapsed");
        let later = tracker.elapsed_since("Finn", at(9, 0, 0)).expect("elapsed");
        assert_eq!(first.to_string(), "01:15:30");
        assert_eq!(later.to_string(), "02:00:00");

        let active = tracker.list_active().expect("list active");
        assert!(active[0].elapsed.is_none());
        assert!(matches!(
            tracker.elapsed_since("Nobody", at(9, 0, 0)),
            Err(TrackerError::NoActiveRound(_))
        ));
    })
}

#[test]
fn test01_board_flags_rounds_over_pace() -> Result<(), Box<dyn std::error::Error>> {
    each_store(|mut tracker| {
        tracker
            .start_round("Gus", group(2, TransportMode::Cart).with_holes(Holes::Nine), at(8, 0, 0))
            .expect("start nine");
        tracker
            .start_round("Hal", eighteen_in_cart(2), at(8, 0, 0))
            .expect("start eighteen");
        tracker
            .start_round("Ida", group(1, TransportMode::Walking), at(6, 0, 0))
            .expect("start without hole count");

        let board = tracker.active_board(at(10, 30, 0)).expect("board");
        let overdue: Vec<(&str, bool)> = board
            .iter()
            .map(|e| (e.round.golfer_name.as_str(), e.overdue))
            .collect();
        assert_eq!(overdue, vec![("Gus", true), ("Hal", false), ("Ida", false)]);
        assert_eq!(board[2].elapsed.to_string(), "04:30:00");
    })
}

#[test]
fn test01_history_round_trip_keeps_every_field() -> Result<(), Box<dyn std::error::Error>> {
    each_store(|mut tracker| {
        let attrs = eighteen_in_cart(3).with_busyness(Busyness::Heavy);
        let started = tracker.start_round("Jo", attrs, at(6, 30, 0)).expect("start");
        let ended = tracker.end_round("Jo", at(10, 41, 9)).expect("end");

        let history = tracker.list_history(test_day()).expect("history");
        let stored = &history[0];
        assert_eq!(stored.id, started.id);
        assert_eq!(stored.golfer_name, "Jo");
        assert_eq!(stored.attributes, attrs);
        assert_eq!(stored.start_time, at(6, 30, 0));
        assert_eq!(stored.end_time, Some(at(10, 41, 9)));
        assert_eq!(stored.elapsed, ended.elapsed);
        assert_eq!(stored.elapsed.map(|e| e.to_string()).as_deref(), Some("04:11:09"));
    })
}

#[test]
fn test01_history_is_filtered_by_day() -> Result<(), Box<dyn std::error::Error>> {
    each_store(|mut tracker| {
        tracker
            .start_round("Kit", group(1, TransportMode::Cart), at(9, 0, 0))
            .expect("start");
        tracker.end_round("Kit", at(10, 0, 0)).expect("end");

        let next_day = test_day().succ_opt().expect("valid date");
        assert!(tracker.list_history(next_day).expect("history").is_empty());
        assert_eq!(tracker.list_history(test_day()).expect("history").len(), 1);
    })
}

#[test]
fn test01_history_is_ordered_by_end_time_on_every_backend() -> Result<(), Box<dyn std::error::Error>> {
    each_store(|mut tracker| {
        tracker
            .start_round("Alice", group(2, TransportMode::Cart), at(8, 0, 0))
            .expect("start Alice");
        tracker
            .start_round("Bob", group(1, TransportMode::Walking), at(8, 5, 0))
            .expect("start Bob");
        tracker.end_round("Alice", at(12, 0, 0)).expect("end Alice");
        // Bob's end is entered by hand after Alice's, but is earlier on the clock.
        tracker.end_round("Bob", at(10, 0, 0)).expect("end Bob");

        let names: Vec<String> = tracker
            .list_history(test_day())
            .expect("history")
            .into_iter()
            .map(|r| r.golfer_name)
            .collect();
        assert_eq!(names, vec!["Bob".to_string(), "Alice".to_string()]);
    })
}

#[test]
fn test01_sub_second_times_are_stored_at_second_precision() -> Result<(), Box<dyn std::error::Error>> {
    each_store(|mut tracker| {
        let started = tracker
            .start_round("Lou", group(1, TransportMode::Cart), at(9, 0, 0) + Duration::milliseconds(700))
            .expect("start");
        assert_eq!(started.start_time, at(9, 0, 0));
        assert_eq!(tracker.list_active().expect("list active"), vec![started]);

        let ended = tracker
            .end_round("Lou", at(11, 0, 0) + Duration::milliseconds(250))
            .expect("end");
        assert_eq!(ended.end_time, Some(at(11, 0, 0)));
        assert_eq!(tracker.list_history(test_day()).expect("history"), vec![ended]);
    })
}
