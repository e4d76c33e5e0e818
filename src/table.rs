use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use anyhow::{Result, anyhow};

use crate::normalize::MatchResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Home,
    Away,
}

/// One league-table row. `goal_difference` is recomputed from GF/GA after
/// every round; it is never an independent source of truth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamRecord {
    pub team: String,
    pub matches_played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i64,
    pub points: u32,
}

impl TeamRecord {
    pub fn zeroed(team: impl Into<String>) -> Self {
        Self {
            team: team.into(),
            matches_played: 0,
            wins: 0,
            draws: 0,
            losses: 0,
            goals_for: 0,
            goals_against: 0,
            goal_difference: 0,
            points: 0,
        }
    }
}

/// Points awarded to one side of a finished match: 3 for a win, 1 each for a
/// draw, 0 for a loss.
pub fn points_for(home_goals: u32, away_goals: u32, side: Side) -> u32 {
    if home_goals == away_goals {
        return 1;
    }
    let won = match side {
        Side::Home => home_goals > away_goals,
        Side::Away => away_goals > home_goals,
    };
    if won { 3 } else { 0 }
}

/// The running aggregate table. Rows live in roster (first-seen) order and
/// are never reordered or removed; ranking works on a copy.
#[derive(Debug, Clone)]
pub struct TableState {
    rows: Vec<TeamRecord>,
    index: HashMap<String, usize>,
}

impl TableState {
    /// Seed an all-zero table from the full roster. Every team that will
    /// ever appear in a match must be present before the first round folds.
    pub fn seed<I, S>(roster: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut rows = Vec::new();
        let mut index = HashMap::new();
        for team in roster {
            let team: String = team.into();
            if index.contains_key(&team) {
                continue;
            }
            index.insert(team.clone(), rows.len());
            rows.push(TeamRecord::zeroed(team));
        }
        Self { rows, index }
    }

    pub fn rows(&self) -> &[TeamRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Fold one round of matches into the table in place. Matches within a
    /// round are commutative, so their order does not matter. GD is
    /// recomputed for every team once the whole round is in.
    pub fn apply_round(&mut self, matches: &[MatchResult]) -> Result<()> {
        for m in matches {
            let home = self.row_index(&m.home_team)?;
            let away = self.row_index(&m.away_team)?;

            {
                let row = &mut self.rows[home];
                row.matches_played += 1;
                row.goals_for += m.home_goals;
                row.goals_against += m.away_goals;
                row.points += points_for(m.home_goals, m.away_goals, Side::Home);
            }
            {
                let row = &mut self.rows[away];
                row.matches_played += 1;
                row.goals_for += m.away_goals;
                row.goals_against += m.home_goals;
                row.points += points_for(m.home_goals, m.away_goals, Side::Away);
            }

            match m.home_goals.cmp(&m.away_goals) {
                Ordering::Greater => {
                    self.rows[home].wins += 1;
                    self.rows[away].losses += 1;
                }
                Ordering::Less => {
                    self.rows[away].wins += 1;
                    self.rows[home].losses += 1;
                }
                Ordering::Equal => {
                    self.rows[home].draws += 1;
                    self.rows[away].draws += 1;
                }
            }
        }

        for row in &mut self.rows {
            row.goal_difference = i64::from(row.goals_for) - i64::from(row.goals_against);
        }
        Ok(())
    }

    /// Ranked copy of the table: PTS, then GD, then GF, all descending.
    /// No further tie-break; `sort_by` is stable, so teams equal on all
    /// three keys keep their roster order. Head-to-head and disciplinary
    /// rules are deliberately not applied.
    pub fn rank(&self) -> Vec<TeamRecord> {
        let mut ranked = self.rows.clone();
        ranked.sort_by(compare_records);
        ranked
    }

    fn row_index(&self, team: &str) -> Result<usize> {
        self.index.get(team).copied().ok_or_else(|| {
            anyhow!("team '{team}' is not in the seeded roster; the table must know every team before round 1")
        })
    }
}

fn compare_records(a: &TeamRecord, b: &TeamRecord) -> Ordering {
    b.points
        .cmp(&a.points)
        .then(b.goal_difference.cmp(&a.goal_difference))
        .then(b.goals_for.cmp(&a.goals_for))
}

/// Full roster in first-seen order over the date-sorted match stream.
pub fn roster_from_matches(matches: &[MatchResult]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut roster = Vec::new();
    for m in matches {
        for team in [m.home_team.as_str(), m.away_team.as_str()] {
            if seen.insert(team) {
                roster.push(team.to_string());
            }
        }
    }
    roster
}
