use chrono::NaiveDate;

/// Explicit pipeline configuration, resolved once at startup. Mirrors the
/// knobs of the animation: which sub-competition to replay, how many
/// interpolation steps per round transition, and how many teams to draw.
#[derive(Debug, Clone)]
pub struct ReplayConfig {
    /// Case-insensitive substring match on the round label ("Clausura").
    pub round_keyword: Option<String>,
    /// Inclusive date window, either bound optional.
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    /// Intermediate frames per round transition. 6-12 plays smoothly;
    /// values below 1 are rejected by the interpolation engine, never
    /// clamped here.
    pub frame_count: usize,
    /// How many teams the renderer draws per frame. Display-only: frames
    /// always carry the full roster.
    pub top_n: usize,
    /// Playback tick in milliseconds.
    pub tick_ms: u64,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            round_keyword: None,
            date_from: None,
            date_to: None,
            frame_count: 8,
            top_n: 12,
            tick_ms: 120,
        }
    }
}

impl ReplayConfig {
    /// Environment overrides, applied on top of the defaults. CLI flags are
    /// layered on top of this by the binaries.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(raw) = std::env::var("TABLA_ROUND_KEYWORD")
            && !raw.trim().is_empty()
        {
            cfg.round_keyword = Some(raw.trim().to_string());
        }
        cfg.date_from = opt_date_env("TABLA_DATE_FROM").or(cfg.date_from);
        cfg.date_to = opt_date_env("TABLA_DATE_TO").or(cfg.date_to);
        if let Some(steps) = opt_usize_env("TABLA_INTERP_STEPS") {
            cfg.frame_count = steps;
        }
        if let Some(top_n) = opt_usize_env("TABLA_TOP_N") {
            cfg.top_n = top_n.max(1);
        }
        if let Some(tick) = opt_usize_env("TABLA_TICK_MS") {
            cfg.tick_ms = (tick as u64).max(20);
        }
        cfg
    }
}

fn opt_date_env(key: &str) -> Option<NaiveDate> {
    let raw = std::env::var(key).ok()?;
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

fn opt_usize_env(key: &str) -> Option<usize> {
    std::env::var(key).ok()?.trim().parse::<usize>().ok()
}
