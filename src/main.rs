use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use tabla_terminal::config::ReplayConfig;
use tabla_terminal::fixtures_fetch::{self, DEFAULT_LEAGUE_ID, DEFAULT_SEASON};
use tabla_terminal::normalize::{RawFixture, normalize_fixtures};
use tabla_terminal::persist::{self, DEFAULT_FIXTURES_CSV};
use tabla_terminal::sample_feed::sample_season;
use tabla_terminal::summary::{SeasonSummary, season_summary};
use tabla_terminal::timeline::{Frame as ReplayFrame, build_timeline};
use tabla_terminal::ui;

#[derive(Debug)]
enum Source {
    Csv(PathBuf),
    Fetch { league_id: u32, season: u32 },
    Demo,
}

#[derive(Debug)]
struct CliArgs {
    source: Source,
    cfg: ReplayConfig,
}

struct App {
    frames: Vec<ReplayFrame>,
    summary: SeasonSummary,
    top_n: usize,
    tick: Duration,
    current: usize,
    paused: bool,
    show_help: bool,
    should_quit: bool,
}

impl App {
    fn new(frames: Vec<ReplayFrame>, summary: SeasonSummary, cfg: &ReplayConfig) -> Self {
        Self {
            frames,
            summary,
            top_n: cfg.top_n,
            tick: Duration::from_millis(cfg.tick_ms),
            current: 0,
            paused: false,
            show_help: false,
            should_quit: false,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char(' ') => self.paused = !self.paused,
            KeyCode::Char('r') => {
                self.current = 0;
                self.paused = false;
            }
            KeyCode::Char('l') | KeyCode::Right => self.step_forward(),
            KeyCode::Char('h') | KeyCode::Left => {
                self.paused = true;
                self.current = self.current.saturating_sub(1);
            }
            KeyCode::Char('G') | KeyCode::End => {
                self.paused = true;
                self.current = self.frames.len() - 1;
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.tick = Duration::from_millis((self.tick.as_millis() as u64 / 2).max(20));
            }
            KeyCode::Char('-') => {
                self.tick = Duration::from_millis((self.tick.as_millis() as u64 * 2).min(2000));
            }
            KeyCode::Char('?') => self.show_help = !self.show_help,
            _ => {}
        }
    }

    fn step_forward(&mut self) {
        if self.current + 1 < self.frames.len() {
            self.current += 1;
        } else {
            // Stay on the final table instead of looping.
            self.paused = true;
        }
    }
}

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let args = parse_args()?;

    let rows = load_rows(&args.source)?;
    let matches = normalize_fixtures(&rows, &args.cfg)?;
    let summary = season_summary(&matches);
    let timeline = build_timeline(&matches, &args.cfg)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let mut app = App::new(timeline.frames, summary, &args.cfg);
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn load_rows(source: &Source) -> Result<Vec<RawFixture>> {
    match source {
        Source::Csv(path) => persist::load_fixtures_csv(path),
        Source::Fetch { league_id, season } => {
            let rows = fixtures_fetch::fetch_season_fixtures(*league_id, *season)?;
            let path = PathBuf::from(DEFAULT_FIXTURES_CSV);
            persist::save_fixtures_csv(&path, &rows)
                .with_context(|| format!("saving fixtures to {}", path.display()))?;
            Ok(rows)
        }
        Source::Demo => {
            let mut rng = rand::thread_rng();
            Ok(sample_season(&mut rng))
        }
    }
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| draw(f, app))?;

        let timeout = app
            .tick
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= app.tick {
            if !app.paused {
                app.step_forward();
            }
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn draw(f: &mut ratatui::Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(f.size());

    let frame = &app.frames[app.current.min(app.frames.len() - 1)];

    let header = Paragraph::new(ui::header_text(
        frame,
        app.current,
        app.frames.len(),
        app.paused,
    ))
    .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(header, chunks[0]);

    ui::render_frame_bars(f, chunks[1], frame, app.top_n);

    let footer = Paragraph::new(ui::footer_text(&app.summary))
        .block(Block::default().borders(Borders::TOP));
    f.render_widget(footer, chunks[2]);

    if app.show_help {
        ui::render_help_overlay(f, f.size());
    }
}

fn parse_args() -> Result<CliArgs> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    parse_cli(&args)
}

fn parse_cli(args: &[String]) -> Result<CliArgs> {
    let mut cfg = ReplayConfig::from_env();
    let mut csv_path: Option<PathBuf> = None;
    let mut league_id = DEFAULT_LEAGUE_ID;
    let mut season = DEFAULT_SEASON;
    let mut demo = false;
    let mut fetch = false;

    let mut idx = 0;
    while idx < args.len() {
        let arg = &args[idx];
        idx += 1;
        match arg.as_str() {
            "--demo" => demo = true,
            "--fetch" => fetch = true,
            _ => {
                if let Some(path) = arg.strip_prefix("--csv=") {
                    csv_path = Some(PathBuf::from(path));
                } else if let Some(raw) = arg.strip_prefix("--keyword=") {
                    cfg.round_keyword = if raw.trim().is_empty() {
                        None
                    } else {
                        Some(raw.trim().to_string())
                    };
                } else if let Some(raw) = arg.strip_prefix("--from=") {
                    cfg.date_from = Some(parse_date_flag(raw, "--from")?);
                } else if let Some(raw) = arg.strip_prefix("--to=") {
                    cfg.date_to = Some(parse_date_flag(raw, "--to")?);
                } else if let Some(raw) = arg.strip_prefix("--steps=") {
                    cfg.frame_count = raw
                        .trim()
                        .parse::<usize>()
                        .with_context(|| format!("invalid --steps value '{raw}'"))?;
                } else if let Some(raw) = arg.strip_prefix("--top=") {
                    cfg.top_n = raw
                        .trim()
                        .parse::<usize>()
                        .with_context(|| format!("invalid --top value '{raw}'"))?
                        .max(1);
                } else if let Some(raw) = arg.strip_prefix("--tick-ms=") {
                    cfg.tick_ms = raw
                        .trim()
                        .parse::<u64>()
                        .with_context(|| format!("invalid --tick-ms value '{raw}'"))?
                        .max(20);
                } else if let Some(raw) = arg.strip_prefix("--league=") {
                    league_id = raw
                        .trim()
                        .parse::<u32>()
                        .with_context(|| format!("invalid --league value '{raw}'"))?;
                } else if let Some(raw) = arg.strip_prefix("--season=") {
                    season = raw
                        .trim()
                        .parse::<u32>()
                        .with_context(|| format!("invalid --season value '{raw}'"))?;
                } else {
                    return Err(anyhow!("unknown argument '{arg}'"));
                }
            }
        }
    }

    let picked = usize::from(csv_path.is_some()) + usize::from(demo) + usize::from(fetch);
    if picked > 1 {
        return Err(anyhow!(
            "--csv, --demo and --fetch are mutually exclusive; pass at most one source"
        ));
    }

    let source = if fetch {
        Source::Fetch { league_id, season }
    } else if demo {
        Source::Demo
    } else {
        Source::Csv(csv_path.unwrap_or_else(|| PathBuf::from(DEFAULT_FIXTURES_CSV)))
    };

    Ok(CliArgs { source, cfg })
}

fn parse_date_flag(raw: &str, flag: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .with_context(|| format!("invalid {flag} date '{raw}', expected YYYY-MM-DD"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn conflicting_source_flags_are_rejected() {
        for conflict in [
            &["--demo", "--fetch"][..],
            &["--csv=data/x.csv", "--demo"][..],
            &["--csv=data/x.csv", "--fetch"][..],
        ] {
            let err = parse_cli(&argv(conflict)).expect_err("conflicting sources must fail");
            assert!(err.to_string().contains("mutually exclusive"));
        }
    }

    #[test]
    fn single_source_flag_is_accepted() {
        let args = parse_cli(&argv(&["--fetch", "--league=162"])).expect("valid flags");
        assert!(matches!(args.source, Source::Fetch { league_id: 162, .. }));

        let args = parse_cli(&argv(&["--demo"])).expect("valid flags");
        assert!(matches!(args.source, Source::Demo));

        let args = parse_cli(&argv(&["--csv=data/x.csv"])).expect("valid flags");
        assert!(matches!(args.source, Source::Csv(_)));
    }

    #[test]
    fn no_source_flag_defaults_to_the_fixtures_csv() {
        let args = parse_cli(&argv(&["--keyword=Clausura"])).expect("valid flags");
        match args.source {
            Source::Csv(path) => assert_eq!(path, PathBuf::from(DEFAULT_FIXTURES_CSV)),
            _ => panic!("default source must be the CSV"),
        }
    }
}
