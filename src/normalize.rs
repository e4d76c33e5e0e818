use anyhow::{Result, anyhow};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::config::ReplayConfig;

/// One fixture row as fetched from the API or read back from the CSV.
/// Goals are optional because not-yet-played fixtures carry none.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawFixture {
    pub match_id: u64,
    pub date: String,
    pub home_team: String,
    pub away_team: String,
    pub home_goals: Option<u32>,
    pub away_goals: Option<u32>,
    pub status: String,
    pub round: String,
}

/// A validated, finished match. Immutable once constructed; everything
/// downstream of the normalizer trusts these fields without re-checking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub home_team: String,
    pub away_team: String,
    pub home_goals: u32,
    pub away_goals: u32,
    pub round: String,
    pub date: NaiveDateTime,
}

const STATUS_FULL_TIME: &str = "FT";

/// Turn raw fixture rows into a chronologically sorted stream of finished
/// matches. Rows that are not full-time, have unparseable dates, or miss a
/// goal count are dropped silently. The optional round-keyword and date-range
/// filters narrow to a sub-competition. An empty result after filtering is
/// fatal: partial or empty histories are never produced silently.
pub fn normalize_fixtures(rows: &[RawFixture], cfg: &ReplayConfig) -> Result<Vec<MatchResult>> {
    let keyword = cfg
        .round_keyword
        .as_deref()
        .map(|k| k.to_lowercase())
        .filter(|k| !k.is_empty());

    let mut out: Vec<MatchResult> = Vec::new();
    for row in rows {
        if row.status != STATUS_FULL_TIME {
            continue;
        }
        let Some(date) = parse_fixture_date(&row.date) else {
            continue;
        };
        let (Some(home_goals), Some(away_goals)) = (row.home_goals, row.away_goals) else {
            continue;
        };
        if row.round.trim().is_empty() {
            continue;
        }
        if let Some(kw) = &keyword
            && !row.round.to_lowercase().contains(kw)
        {
            continue;
        }
        if !within_range(date.date(), cfg.date_from, cfg.date_to) {
            continue;
        }

        out.push(MatchResult {
            home_team: row.home_team.clone(),
            away_team: row.away_team.clone(),
            home_goals,
            away_goals,
            round: row.round.clone(),
            date,
        });
    }

    if out.is_empty() {
        return Err(anyhow!(
            "no matches left after filtering; relax the round keyword or date range"
        ));
    }

    out.sort_by(|a, b| a.date.cmp(&b.date));
    Ok(out)
}

fn within_range(date: NaiveDate, from: Option<NaiveDate>, to: Option<NaiveDate>) -> bool {
    if let Some(from) = from
        && date < from
    {
        return false;
    }
    if let Some(to) = to
        && date > to
    {
        return false;
    }
    true
}

/// API-Football sends RFC 3339 with an offset; CSVs written by other tools
/// sometimes carry bare datetimes or plain dates. Accept all of those.
pub fn parse_fixture_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }

    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];
    for fmt in FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
