use std::collections::{HashMap, HashSet};

use anyhow::{Result, anyhow};

use crate::config::ReplayConfig;
use crate::normalize::MatchResult;
use crate::table::{TableState, TeamRecord, roster_from_matches};

/// The fully-ranked table immediately after one round is folded in.
/// Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSnapshot {
    pub round: String,
    /// How many rounds have been folded into this snapshot (1-based).
    pub rounds_applied: usize,
    /// Ranked rows, leader first. Always the full roster.
    pub rows: Vec<TeamRecord>,
}

/// One row of an interpolated frame. PTS/GD/GF are fractional mid-blend;
/// the remaining counters are carried from the target snapshot for display.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameRow {
    pub team: String,
    pub points: f64,
    pub goal_difference: f64,
    pub goals_for: f64,
    pub matches_played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_against: u32,
}

impl FrameRow {
    fn from_record(rec: &TeamRecord) -> Self {
        Self {
            team: rec.team.clone(),
            points: f64::from(rec.points),
            goal_difference: rec.goal_difference as f64,
            goals_for: f64::from(rec.goals_for),
            matches_played: rec.matches_played,
            wins: rec.wins,
            draws: rec.draws,
            losses: rec.losses,
            goals_against: rec.goals_against,
        }
    }
}

/// A single animation state. Frames always carry the round label of the
/// snapshot they are blending *towards*; `step` runs 1..=frame_count within
/// an interpolation run (0 marks the verbatim opening snapshot).
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub round: String,
    pub step: usize,
    pub rows: Vec<FrameRow>,
}

impl Frame {
    pub fn from_snapshot(snap: &TableSnapshot, step: usize) -> Self {
        Self {
            round: snap.round.clone(),
            step,
            rows: snap.rows.iter().map(FrameRow::from_record).collect(),
        }
    }
}

/// The whole replay: one snapshot per round plus the dense frame sequence
/// the renderer plays back. Both are append-only history.
#[derive(Debug, Clone)]
pub struct Timeline {
    pub snapshots: Vec<TableSnapshot>,
    pub frames: Vec<Frame>,
}

/// Fold the date-sorted match stream into per-round snapshots and expand
/// consecutive snapshot pairs into interpolated frames. Rounds are grouped
/// by label in first-encountered order; labels like "Jornada 10" do not
/// sort lexically, so encounter order is the only correct order.
pub fn build_timeline(matches: &[MatchResult], cfg: &ReplayConfig) -> Result<Timeline> {
    if matches.is_empty() {
        return Err(anyhow!("no matches to build a timeline from"));
    }

    let rounds = group_rounds(matches);
    let mut table = TableState::seed(roster_from_matches(matches));

    let mut snapshots: Vec<TableSnapshot> = Vec::with_capacity(rounds.len());
    for (label, round_matches) in &rounds {
        table.apply_round(round_matches)?;
        // rank() copies the live table; the snapshot never aliases it.
        snapshots.push(TableSnapshot {
            round: label.clone(),
            rounds_applied: snapshots.len() + 1,
            rows: table.rank(),
        });
    }

    let mut frames: Vec<Frame> = Vec::new();
    // The opening snapshot has no predecessor; it plays once, verbatim.
    frames.push(Frame::from_snapshot(&snapshots[0], 0));
    for pair in snapshots.windows(2) {
        frames.extend(interpolate(&pair[0], &pair[1], cfg.frame_count)?);
    }

    Ok(Timeline { snapshots, frames })
}

/// Expand the transition between two consecutive snapshots into
/// `frame_count` intermediate states. PTS, GD and GF blend linearly; each
/// blended state is re-ranked with the same three-key rule, so positions can
/// swap mid-transition as one team's blended points overtake another's. The
/// final frame reproduces `next` exactly, values and ranking both.
pub fn interpolate(
    prev: &TableSnapshot,
    next: &TableSnapshot,
    frame_count: usize,
) -> Result<Vec<Frame>> {
    if frame_count < 1 {
        return Err(anyhow!("frame_count must be at least 1"));
    }

    let prev_by_team: HashMap<&str, &TeamRecord> =
        prev.rows.iter().map(|r| (r.team.as_str(), r)).collect();
    let next_by_team: HashMap<&str, &TeamRecord> =
        next.rows.iter().map(|r| (r.team.as_str(), r)).collect();

    // Union of both team sets, walked in the target snapshot's ranked order
    // so the t=1.0 frame re-sorts to exactly the target ranking (ties
    // included). Teams missing from one side count as all-zero there; both
    // snapshots carry the full roster when they come from build_timeline, so
    // this only matters for hand-built inputs.
    let zero = TeamRecord::zeroed("");
    let mut order: Vec<&str> = next.rows.iter().map(|r| r.team.as_str()).collect();
    let in_next: HashSet<&str> = order.iter().copied().collect();
    order.extend(
        prev.rows
            .iter()
            .map(|r| r.team.as_str())
            .filter(|t| !in_next.contains(t)),
    );

    let mut frames = Vec::with_capacity(frame_count);
    for step in 1..=frame_count {
        let t = step as f64 / frame_count as f64;
        let mut rows: Vec<FrameRow> = order
            .iter()
            .map(|team| {
                let from = prev_by_team.get(team).copied().unwrap_or(&zero);
                let to = next_by_team.get(team).copied().unwrap_or(&zero);
                FrameRow {
                    team: (*team).to_string(),
                    points: blend(f64::from(from.points), f64::from(to.points), t),
                    goal_difference: blend(
                        from.goal_difference as f64,
                        to.goal_difference as f64,
                        t,
                    ),
                    goals_for: blend(f64::from(from.goals_for), f64::from(to.goals_for), t),
                    matches_played: to.matches_played,
                    wins: to.wins,
                    draws: to.draws,
                    losses: to.losses,
                    goals_against: to.goals_against,
                }
            })
            .collect();
        rows.sort_by(compare_frame_rows);

        frames.push(Frame {
            round: next.round.clone(),
            step,
            rows,
        });
    }

    Ok(frames)
}

fn blend(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

fn compare_frame_rows(a: &FrameRow, b: &FrameRow) -> std::cmp::Ordering {
    b.points
        .total_cmp(&a.points)
        .then(b.goal_difference.total_cmp(&a.goal_difference))
        .then(b.goals_for.total_cmp(&a.goals_for))
}

/// Group matches by round label, preserving the order labels first appear in
/// the chronological stream.
pub fn group_rounds(matches: &[MatchResult]) -> Vec<(String, Vec<MatchResult>)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut rounds: Vec<(String, Vec<MatchResult>)> = Vec::new();
    for m in matches {
        match index.get(m.round.as_str()) {
            Some(&i) => rounds[i].1.push(m.clone()),
            None => {
                index.insert(m.round.as_str(), rounds.len());
                rounds.push((m.round.clone(), vec![m.clone()]));
            }
        }
    }
    rounds
}
