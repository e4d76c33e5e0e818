use ratatui::style::Color;

/// Fixed color per team, approximating club colors, so a team keeps its bar
/// color while positions shuffle. Unknown teams fall back to gray.
pub fn team_color(team: &str) -> Color {
    match team {
        "LD Alajuelense" => Color::Rgb(0x5C, 0x0B, 0x0E),
        "Deportivo Saprissa" => Color::Rgb(0x32, 0x03, 0x2B),
        "CS Herediano" => Color::Rgb(0xDB, 0x7F, 0x05),
        "CS Cartagines" => Color::Rgb(0x06, 0x2B, 0x79),
        "San Carlos" => Color::Rgb(0xF2, 0x3A, 0x3A),
        "AD Guanacasteca" => Color::Rgb(0x05, 0x5C, 0x29),
        "Santos DE Guapiles" => Color::Rgb(0xD3, 0x70, 0x75),
        "Santa Ana" => Color::Rgb(0x34, 0x46, 0x58),
        "Puntarenas FC" => Color::Rgb(0xCA, 0x30, 0x05),
        "Perez Zeledon" => Color::Rgb(0x06, 0x39, 0x9E),
        "Sporting San Jose" => Color::Rgb(0x22, 0x22, 0x22),
        _ => Color::Rgb(0x7F, 0x8C, 0x8D),
    }
}
