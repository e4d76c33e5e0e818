use std::path::PathBuf;

use anyhow::{Context, Result};

use tabla_terminal::config::ReplayConfig;
use tabla_terminal::fixtures_fetch::{DEFAULT_LEAGUE_ID, DEFAULT_SEASON, fetch_season_fixtures};
use tabla_terminal::normalize::normalize_fixtures;
use tabla_terminal::persist::{DEFAULT_FIXTURES_CSV, save_fixtures_csv};
use tabla_terminal::summary::{attack_rankings, home_away_splits, season_summary};

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let league_id = parse_u32_arg("--league").unwrap_or(DEFAULT_LEAGUE_ID);
    let season = parse_u32_arg("--season").unwrap_or(DEFAULT_SEASON);
    let out_path = parse_path_arg("--out").unwrap_or_else(|| PathBuf::from(DEFAULT_FIXTURES_CSV));

    println!("Fetching fixtures for league {league_id}, season {season}...");
    let rows = fetch_season_fixtures(league_id, season)?;
    println!("Fixtures downloaded: {}", rows.len());

    let finished = rows.iter().filter(|r| r.status == "FT").count();
    let mut rounds: Vec<&str> = Vec::new();
    for row in &rows {
        if !row.round.is_empty() && !rounds.contains(&row.round.as_str()) {
            rounds.push(&row.round);
        }
    }
    println!("Finished: {finished} | Rounds: {}", rounds.len());
    if let Some(first) = rounds.first() {
        println!("Example round: {first}");
    }

    save_fixtures_csv(&out_path, &rows)
        .with_context(|| format!("saving fixtures to {}", out_path.display()))?;
    println!("CSV saved to {}", out_path.display());

    // Quick descriptive readout over whatever has finished so far.
    if let Ok(matches) = normalize_fixtures(&rows, &ReplayConfig::default()) {
        println!("{}", season_summary(&matches).one_liner());
        if let Some(split) = home_away_splits(&matches).into_iter().next() {
            println!(
                "Most home-dependent: {} (home {:.2} PPG, away {:.2} PPG, gap {:+.2})",
                split.team, split.home_ppg, split.away_ppg, split.ppg_gap
            );
        }
        if let Some(attack) = attack_rankings(&matches).into_iter().next() {
            println!(
                "Best attack: {} ({} goals, {:.2} per match)",
                attack.team, attack.goals_for, attack.goals_per_match
            );
        }
    }
    Ok(())
}

fn parse_u32_arg(flag: &str) -> Option<u32> {
    let prefix = format!("{flag}=");
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    for (idx, arg) in args.iter().enumerate() {
        if let Some(raw) = arg.strip_prefix(&prefix) {
            if let Ok(value) = raw.trim().parse::<u32>() {
                return Some(value);
            }
        }
        if arg == flag
            && let Some(next) = args.get(idx + 1)
            && let Ok(value) = next.trim().parse::<u32>()
        {
            return Some(value);
        }
    }
    None
}

fn parse_path_arg(flag: &str) -> Option<PathBuf> {
    let prefix = format!("{flag}=");
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    for (idx, arg) in args.iter().enumerate() {
        if let Some(raw) = arg.strip_prefix(&prefix) {
            let trimmed = raw.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }
        if arg == flag
            && let Some(next) = args.get(idx + 1)
            && !next.trim().is_empty()
        {
            return Some(PathBuf::from(next));
        }
    }
    None
}
