use ratatui::Frame as TuiFrame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::palette::team_color;
use crate::summary::SeasonSummary;
use crate::timeline::Frame;

const NAME_COL: u16 = 22;
const VALUE_COL: u16 = 5;

/// Draw one animation frame: a horizontal bar per team, leader on top,
/// bar lengths proportional to blended points.
pub fn render_frame_bars(f: &mut TuiFrame, area: Rect, frame: &Frame, top_n: usize) {
    if area.height == 0 || area.width <= NAME_COL + VALUE_COL + 4 {
        return;
    }

    let shown = frame.rows.iter().take(top_n.max(1)).collect::<Vec<_>>();
    let max_points = shown
        .iter()
        .map(|r| r.points)
        .fold(0.0_f64, f64::max)
        .max(1.0);

    let bar_width = area.width - NAME_COL - VALUE_COL - 4;
    for (i, row) in shown.iter().enumerate() {
        let y = area.y + i as u16;
        if y >= area.y + area.height {
            break;
        }
        let row_area = Rect {
            x: area.x,
            y,
            width: area.width,
            height: 1,
        };
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(NAME_COL),
                Constraint::Min(4),
                Constraint::Length(VALUE_COL),
            ])
            .split(row_area);

        let rank = Paragraph::new(format!("{:>2}.", i + 1))
            .style(Style::default().fg(Color::DarkGray));
        f.render_widget(rank, cols[0]);

        let name = Paragraph::new(clip(&row.team, NAME_COL as usize));
        f.render_widget(name, cols[1]);

        let filled = ((row.points / max_points) * f64::from(bar_width)).round() as usize;
        let bar = Paragraph::new("█".repeat(filled.min(bar_width as usize)))
            .style(Style::default().fg(team_color(&row.team)));
        f.render_widget(bar, cols[2]);

        // Bars are labelled with the rounded point total.
        let pts = Paragraph::new(format!("{:>4}", row.points.round() as i64))
            .style(Style::default().add_modifier(Modifier::BOLD));
        f.render_widget(pts, cols[3]);
    }
}

pub fn header_text(frame: &Frame, frame_idx: usize, total_frames: usize, paused: bool) -> String {
    let state = if paused { "PAUSED" } else { "PLAYING" };
    format!(
        "TABLA TERMINAL | {} | frame {}/{} | {}",
        frame.round,
        frame_idx + 1,
        total_frames,
        state
    )
}

pub fn footer_text(summary: &SeasonSummary) -> String {
    format!(
        "{}\nSpace Pause | h/l Step | +/- Speed | r Restart | G End | ? Help | q Quit",
        summary.one_liner()
    )
}

pub fn render_help_overlay(f: &mut TuiFrame, area: Rect) {
    let popup_area = centered_rect(50, 50, area);
    f.render_widget(Clear, popup_area);

    let text = [
        "Tabla Terminal - Help",
        "",
        "  Space        Pause / resume playback",
        "  h / ←        Step one frame back (paused)",
        "  l / →        Step one frame forward (paused)",
        "  + / -        Faster / slower",
        "  r            Restart from round 1",
        "  G / End      Jump to the final table",
        "  ?            Toggle help",
        "  q            Quit",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    f.render_widget(help, popup_area);
}

fn clip(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        text.chars().take(width.saturating_sub(1)).collect::<String>() + "…"
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
