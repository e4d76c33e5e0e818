use std::path::PathBuf;

use chrono::NaiveDate;

use tabla_terminal::config::ReplayConfig;
use tabla_terminal::normalize::{RawFixture, normalize_fixtures, parse_fixture_date};
use tabla_terminal::persist::load_fixtures_csv;
use tabla_terminal::timeline::build_timeline;

fn raw(
    match_id: u64,
    date: &str,
    home: &str,
    away: &str,
    goals: Option<(u32, u32)>,
    status: &str,
    round: &str,
) -> RawFixture {
    RawFixture {
        match_id,
        date: date.to_string(),
        home_team: home.to_string(),
        away_team: away.to_string(),
        home_goals: goals.map(|(h, _)| h),
        away_goals: goals.map(|(_, a)| a),
        status: status.to_string(),
        round: round.to_string(),
    }
}

fn fixture_path(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    path
}

#[test]
fn unfinished_and_malformed_rows_are_dropped() {
    let rows = vec![
        raw(1, "2024-01-14T15:00:00-06:00", "A", "B", Some((2, 1)), "FT", "Clausura - 1"),
        raw(2, "2024-01-14T17:00:00-06:00", "C", "D", None, "NS", "Clausura - 1"),
        raw(3, "not a date", "A", "C", Some((1, 0)), "FT", "Clausura - 1"),
        raw(4, "2024-01-14T19:00:00-06:00", "B", "D", None, "FT", "Clausura - 1"),
    ];

    let matches = normalize_fixtures(&rows, &ReplayConfig::default()).expect("one valid row");
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].home_team, "A");
    assert_eq!(matches[0].home_goals, 2);
}

#[test]
fn round_keyword_filter_is_case_insensitive() {
    let rows = vec![
        raw(1, "2023-08-06T15:00:00-06:00", "A", "B", Some((1, 1)), "FT", "Apertura - 1"),
        raw(2, "2024-01-14T15:00:00-06:00", "A", "B", Some((2, 0)), "FT", "Clausura - 1"),
    ];

    let cfg = ReplayConfig {
        round_keyword: Some("clausura".to_string()),
        ..ReplayConfig::default()
    };
    let matches = normalize_fixtures(&rows, &cfg).expect("clausura row survives");
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].round, "Clausura - 1");
}

#[test]
fn date_range_is_inclusive_on_both_ends() {
    let rows = vec![
        raw(1, "2024-01-13T15:00:00-06:00", "A", "B", Some((1, 0)), "FT", "J1"),
        raw(2, "2024-01-14T15:00:00-06:00", "C", "D", Some((0, 0)), "FT", "J1"),
        raw(3, "2024-01-21T15:00:00-06:00", "A", "C", Some((2, 2)), "FT", "J2"),
        raw(4, "2024-01-22T15:00:00-06:00", "B", "D", Some((3, 1)), "FT", "J2"),
    ];

    let cfg = ReplayConfig {
        date_from: NaiveDate::from_ymd_opt(2024, 1, 14),
        date_to: NaiveDate::from_ymd_opt(2024, 1, 21),
        ..ReplayConfig::default()
    };
    let matches = normalize_fixtures(&rows, &cfg).expect("two rows in range");
    let ids: Vec<&str> = matches.iter().map(|m| m.home_team.as_str()).collect();
    assert_eq!(ids, ["C", "A"]);
}

#[test]
fn empty_result_after_filtering_is_fatal() {
    let rows = vec![raw(
        1,
        "2023-08-06T15:00:00-06:00",
        "A",
        "B",
        Some((1, 1)),
        "FT",
        "Apertura - 1",
    )];

    let cfg = ReplayConfig {
        round_keyword: Some("Clausura".to_string()),
        ..ReplayConfig::default()
    };
    let err = normalize_fixtures(&rows, &cfg).expect_err("nothing survives the filter");
    assert!(err.to_string().contains("no matches left after filtering"));
}

#[test]
fn output_is_sorted_ascending_by_date() {
    let rows = vec![
        raw(1, "2024-02-04T15:00:00-06:00", "C", "D", Some((0, 1)), "FT", "J3"),
        raw(2, "2024-01-14T15:00:00-06:00", "A", "B", Some((2, 1)), "FT", "J1"),
        raw(3, "2024-01-21T15:00:00-06:00", "B", "C", Some((1, 1)), "FT", "J2"),
    ];

    let matches = normalize_fixtures(&rows, &ReplayConfig::default()).expect("all valid");
    let rounds: Vec<&str> = matches.iter().map(|m| m.round.as_str()).collect();
    assert_eq!(rounds, ["J1", "J2", "J3"]);
}

#[test]
fn accepts_the_date_formats_seen_in_the_wild() {
    for raw_date in [
        "2024-01-14T15:00:00-06:00",
        "2024-01-14T15:00:00",
        "2024-01-14 15:00:00",
        "2024-01-14",
    ] {
        assert!(
            parse_fixture_date(raw_date).is_some(),
            "should parse {raw_date}"
        );
    }
    assert!(parse_fixture_date("14/01/2024").is_none());
    assert!(parse_fixture_date("").is_none());
}

#[test]
fn csv_fixture_replays_end_to_end() {
    let rows = load_fixtures_csv(&fixture_path("fixtures_sample.csv")).expect("sample csv loads");

    let cfg = ReplayConfig {
        round_keyword: Some("Clausura".to_string()),
        frame_count: 4,
        ..ReplayConfig::default()
    };
    let matches = normalize_fixtures(&rows, &cfg).expect("clausura matches survive");
    assert_eq!(matches.len(), 6);

    let timeline = build_timeline(&matches, &cfg).expect("timeline builds");
    assert_eq!(timeline.snapshots.len(), 3);
    assert_eq!(timeline.frames.len(), 1 + 2 * 4);

    let final_table = &timeline.snapshots[2];
    assert_eq!(final_table.round, "Clausura - 3");
    let leader = &final_table.rows[0];
    assert_eq!(leader.team, "LD Alajuelense");
    assert_eq!(leader.points, 7);
    assert_eq!(leader.goal_difference, 2);
}
