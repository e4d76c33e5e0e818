use std::fs;
use std::path::PathBuf;

use tabla_terminal::fixtures_fetch::parse_fixtures_json;

fn fixture_payload(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(&path).expect("fixture payload readable")
}

#[test]
fn parses_rows_and_skips_incomplete_ones() {
    let body = fixture_payload("fixtures_response.json");
    let rows = parse_fixtures_json(&body).expect("valid payload");

    // Three items in the payload; the one without a home team name is skipped.
    assert_eq!(rows.len(), 2);

    let finished = &rows[0];
    assert_eq!(finished.match_id, 1190001);
    assert_eq!(finished.date, "2024-01-14T15:00:00-06:00");
    assert_eq!(finished.home_team, "LD Alajuelense");
    assert_eq!(finished.away_team, "Deportivo Saprissa");
    assert_eq!(finished.home_goals, Some(2));
    assert_eq!(finished.away_goals, Some(1));
    assert_eq!(finished.status, "FT");
    assert_eq!(finished.round, "Clausura - 1");
}

#[test]
fn null_goals_map_to_none() {
    let body = fixture_payload("fixtures_response.json");
    let rows = parse_fixtures_json(&body).expect("valid payload");

    let unplayed = &rows[1];
    assert_eq!(unplayed.match_id, 1190002);
    assert_eq!(unplayed.status, "NS");
    assert_eq!(unplayed.home_goals, None);
    assert_eq!(unplayed.away_goals, None);
}

#[test]
fn empty_and_null_bodies_are_rejected() {
    assert!(parse_fixtures_json("").is_err());
    assert!(parse_fixtures_json("   ").is_err());
    assert!(parse_fixtures_json("null").is_err());
}

#[test]
fn body_without_response_array_is_rejected() {
    let err = parse_fixtures_json(r#"{"results": 0}"#).expect_err("missing array must fail");
    assert!(err.to_string().contains("response"));
}
