use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use once_cell::sync::OnceCell;
use reqwest::blocking::Client;
use serde_json::Value;

use crate::normalize::RawFixture;

const API_BASE: &str = "https://v3.football.api-sports.io";
const API_KEY_VAR: &str = "APISPORTS_KEY";
const REQUEST_TIMEOUT_SECS: u64 = 30;

pub const DEFAULT_LEAGUE_ID: u32 = 162; // Primera División de Costa Rica
pub const DEFAULT_SEASON: u32 = 2024;
const API_TIMEZONE: &str = "America/Costa_Rica";

static CLIENT: OnceCell<Client> = OnceCell::new();

fn http_client() -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("failed to build http client")
    })
}

fn api_key() -> Result<String> {
    let key = std::env::var(API_KEY_VAR)
        .ok()
        .filter(|k| !k.trim().is_empty())
        .ok_or_else(|| anyhow!("{API_KEY_VAR} is not set; put it in .env or the environment"))?;
    Ok(key)
}

/// Download one season of fixtures for a league from API-Football v3.
/// Rows come back raw: unplayed fixtures keep `None` goals and whatever
/// status the API reports; filtering is the normalizer's job.
pub fn fetch_season_fixtures(league_id: u32, season: u32) -> Result<Vec<RawFixture>> {
    let client = http_client()?;
    let key = api_key()?;

    let url = format!(
        "{API_BASE}/fixtures?league={league_id}&season={season}&timezone={API_TIMEZONE}"
    );
    let body = client
        .get(&url)
        .header("x-apisports-key", key)
        .send()
        .context("fixtures request failed")?
        .error_for_status()
        .context("fixtures request rejected")?
        .text()
        .context("fixtures response unreadable")?;

    parse_fixtures_json(&body)
}

/// Parse the `/fixtures` payload. Rows missing the fields we need are
/// skipped rather than failing the whole download.
pub fn parse_fixtures_json(raw: &str) -> Result<Vec<RawFixture>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Err(anyhow!("empty fixtures response"));
    }
    let v: Value = serde_json::from_str(trimmed).context("invalid fixtures json")?;

    let Some(items) = v.get("response").and_then(|x| x.as_array()) else {
        return Err(anyhow!("fixtures response has no 'response' array"));
    };

    let mut out = Vec::with_capacity(items.len());
    for item in items {
        if let Some(row) = parse_fixture_row(item) {
            out.push(row);
        }
    }
    Ok(out)
}

fn parse_fixture_row(v: &Value) -> Option<RawFixture> {
    let fixture = v.get("fixture")?;
    let match_id = fixture.get("id")?.as_u64()?;
    let date = fixture.get("date")?.as_str()?.to_string();
    let status = fixture
        .get("status")
        .and_then(|s| s.get("short"))
        .and_then(|x| x.as_str())
        .unwrap_or_default()
        .to_string();

    let teams = v.get("teams")?;
    let home_team = teams.get("home")?.get("name")?.as_str()?.to_string();
    let away_team = teams.get("away")?.get("name")?.as_str()?.to_string();

    let goals = v.get("goals");
    let home_goals = goals
        .and_then(|g| g.get("home"))
        .and_then(|x| x.as_u64())
        .map(|g| g as u32);
    let away_goals = goals
        .and_then(|g| g.get("away"))
        .and_then(|x| x.as_u64())
        .map(|g| g as u32);

    let round = v
        .get("league")
        .and_then(|l| l.get("round"))
        .and_then(|x| x.as_str())
        .unwrap_or_default()
        .to_string();

    Some(RawFixture {
        match_id,
        date,
        home_team,
        away_team,
        home_goals,
        away_goals,
        status,
        round,
    })
}
