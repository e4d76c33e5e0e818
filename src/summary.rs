use std::collections::HashMap;

use crate::normalize::MatchResult;
use crate::table::{Side, points_for};

/// Season-level descriptive stats shown alongside the replay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeasonSummary {
    pub matches: usize,
    pub avg_goals: f64,
    pub home_win_pct: f64,
    pub draw_pct: f64,
    pub away_win_pct: f64,
    pub over25_pct: f64,
    pub over35_pct: f64,
}

pub fn season_summary(matches: &[MatchResult]) -> SeasonSummary {
    let total = matches.len();
    let denom = total.max(1) as f64;

    let mut goals = 0u64;
    let mut home_wins = 0usize;
    let mut away_wins = 0usize;
    let mut draws = 0usize;
    let mut over25 = 0usize;
    let mut over35 = 0usize;

    for m in matches {
        let sum = u64::from(m.home_goals) + u64::from(m.away_goals);
        goals += sum;
        if m.home_goals > m.away_goals {
            home_wins += 1;
        } else if m.away_goals > m.home_goals {
            away_wins += 1;
        } else {
            draws += 1;
        }
        if sum >= 3 {
            over25 += 1;
        }
        if sum >= 4 {
            over35 += 1;
        }
    }

    SeasonSummary {
        matches: total,
        avg_goals: goals as f64 / denom,
        home_win_pct: home_wins as f64 / denom * 100.0,
        draw_pct: draws as f64 / denom * 100.0,
        away_win_pct: away_wins as f64 / denom * 100.0,
        over25_pct: over25 as f64 / denom * 100.0,
        over35_pct: over35 as f64 / denom * 100.0,
    }
}

impl SeasonSummary {
    pub fn one_liner(&self) -> String {
        format!(
            "{} matches | {:.2} goals/match | H {:.0}% D {:.0}% A {:.0}% | O2.5 {:.0}% O3.5 {:.0}%",
            self.matches,
            self.avg_goals,
            self.home_win_pct,
            self.draw_pct,
            self.away_win_pct,
            self.over25_pct,
            self.over35_pct
        )
    }
}

/// Per-team home vs away form: points and points-per-game on each side of
/// the draw, plus the home-minus-away PPG gap.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamSplit {
    pub team: String,
    pub home_matches: u32,
    pub away_matches: u32,
    pub home_points: u32,
    pub away_points: u32,
    pub home_ppg: f64,
    pub away_ppg: f64,
    pub ppg_gap: f64,
}

impl TeamSplit {
    fn zeroed(team: &str) -> Self {
        Self {
            team: team.to_string(),
            home_matches: 0,
            away_matches: 0,
            home_points: 0,
            away_points: 0,
            home_ppg: 0.0,
            away_ppg: 0.0,
            ppg_gap: 0.0,
        }
    }
}

/// Home/away splits for every team, most home-dependent first (largest
/// home-minus-away PPG gap). A team with no matches on one side scores
/// 0.0 PPG there rather than dividing by zero.
pub fn home_away_splits(matches: &[MatchResult]) -> Vec<TeamSplit> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut splits: Vec<TeamSplit> = Vec::new();

    for m in matches {
        let home = slot(&mut splits, &mut index, &m.home_team, TeamSplit::zeroed);
        splits[home].home_matches += 1;
        splits[home].home_points += points_for(m.home_goals, m.away_goals, Side::Home);

        let away = slot(&mut splits, &mut index, &m.away_team, TeamSplit::zeroed);
        splits[away].away_matches += 1;
        splits[away].away_points += points_for(m.home_goals, m.away_goals, Side::Away);
    }

    for s in &mut splits {
        s.home_ppg = ppg(s.home_points, s.home_matches);
        s.away_ppg = ppg(s.away_points, s.away_matches);
        s.ppg_gap = s.home_ppg - s.away_ppg;
    }
    splits.sort_by(|a, b| b.ppg_gap.total_cmp(&a.ppg_gap));
    splits
}

fn ppg(points: u32, matches: u32) -> f64 {
    if matches == 0 {
        0.0
    } else {
        f64::from(points) / f64::from(matches)
    }
}

/// Per-team offensive line: total goals each way and goals scored per match.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamAttack {
    pub team: String,
    pub matches: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i64,
    pub goals_per_match: f64,
}

impl TeamAttack {
    fn zeroed(team: &str) -> Self {
        Self {
            team: team.to_string(),
            matches: 0,
            goals_for: 0,
            goals_against: 0,
            goal_difference: 0,
            goals_per_match: 0.0,
        }
    }
}

/// Offensive ranking: every team sorted by goals scored, best attack first.
/// Teams level on goals keep their first-seen order.
pub fn attack_rankings(matches: &[MatchResult]) -> Vec<TeamAttack> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut rows: Vec<TeamAttack> = Vec::new();

    for m in matches {
        let home = slot(&mut rows, &mut index, &m.home_team, TeamAttack::zeroed);
        rows[home].matches += 1;
        rows[home].goals_for += m.home_goals;
        rows[home].goals_against += m.away_goals;

        let away = slot(&mut rows, &mut index, &m.away_team, TeamAttack::zeroed);
        rows[away].matches += 1;
        rows[away].goals_for += m.away_goals;
        rows[away].goals_against += m.home_goals;
    }

    for r in &mut rows {
        r.goal_difference = i64::from(r.goals_for) - i64::from(r.goals_against);
        r.goals_per_match = if r.matches == 0 {
            0.0
        } else {
            f64::from(r.goals_for) / f64::from(r.matches)
        };
    }
    rows.sort_by(|a, b| b.goals_for.cmp(&a.goals_for));
    rows
}

fn slot<T>(
    rows: &mut Vec<T>,
    index: &mut HashMap<String, usize>,
    team: &str,
    zeroed: impl Fn(&str) -> T,
) -> usize {
    if let Some(&i) = index.get(team) {
        return i;
    }
    index.insert(team.to_string(), rows.len());
    rows.push(zeroed(team));
    rows.len() - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn result(home: u32, away: u32) -> MatchResult {
        named("H", home, away, "A")
    }

    fn named(home_team: &str, home: u32, away: u32, away_team: &str) -> MatchResult {
        MatchResult {
            home_team: home_team.to_string(),
            away_team: away_team.to_string(),
            home_goals: home,
            away_goals: away,
            round: "Clausura - 1".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 14)
                .unwrap()
                .and_hms_opt(15, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn shares_and_overs_add_up() {
        let matches = vec![result(2, 1), result(0, 0), result(1, 3), result(3, 2)];
        let s = season_summary(&matches);
        assert_eq!(s.matches, 4);
        assert!((s.avg_goals - 3.0).abs() < 1e-9);
        assert!((s.home_win_pct - 50.0).abs() < 1e-9);
        assert!((s.draw_pct - 25.0).abs() < 1e-9);
        assert!((s.away_win_pct - 25.0).abs() < 1e-9);
        // 2-1, 1-3 and 3-2 clear 2.5; only 1-3 and 3-2 clear 3.5.
        assert!((s.over25_pct - 75.0).abs() < 1e-9);
        assert!((s.over35_pct - 50.0).abs() < 1e-9);
    }

    #[test]
    fn splits_rank_by_home_away_ppg_gap() {
        // A: wins at home (3 PPG), draws away (1 PPG), gap 2.0.
        // B: draws at home (1 PPG), loses away (0 PPG), gap 1.0.
        let matches = vec![named("A", 2, 0, "B"), named("B", 1, 1, "A")];

        let splits = home_away_splits(&matches);
        assert_eq!(splits.len(), 2);

        let a = &splits[0];
        assert_eq!(a.team, "A");
        assert_eq!(a.home_matches, 1);
        assert_eq!(a.away_matches, 1);
        assert_eq!(a.home_points, 3);
        assert_eq!(a.away_points, 1);
        assert!((a.home_ppg - 3.0).abs() < 1e-9);
        assert!((a.away_ppg - 1.0).abs() < 1e-9);
        assert!((a.ppg_gap - 2.0).abs() < 1e-9);

        let b = &splits[1];
        assert_eq!(b.team, "B");
        assert!((b.ppg_gap - 1.0).abs() < 1e-9);
    }

    #[test]
    fn split_with_no_away_matches_has_zero_away_ppg() {
        let matches = vec![named("A", 1, 0, "B")];
        let splits = home_away_splits(&matches);
        let a = splits.iter().find(|s| s.team == "A").unwrap();
        assert_eq!(a.away_matches, 0);
        assert!((a.away_ppg - 0.0).abs() < 1e-9);
    }

    #[test]
    fn attack_ranking_sorts_by_goals_scored() {
        // B scores 5 across two matches, A scores 3, C scores 1.
        let matches = vec![
            named("A", 2, 3, "B"),
            named("B", 2, 1, "C"),
            named("C", 0, 1, "A"),
        ];

        let rows = attack_rankings(&matches);
        let order: Vec<&str> = rows.iter().map(|r| r.team.as_str()).collect();
        assert_eq!(order, ["B", "A", "C"]);

        let b = &rows[0];
        assert_eq!(b.matches, 2);
        assert_eq!(b.goals_for, 5);
        assert_eq!(b.goals_against, 3);
        assert_eq!(b.goal_difference, 2);
        assert!((b.goals_per_match - 2.5).abs() < 1e-9);
    }
}
