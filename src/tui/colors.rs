use ratatui::style::Color;

/// Color for a topic tag, grouped by ecosystem
pub fn color_for_tag(tag: &str) -> Color {
    match tag.to_ascii_lowercase().as_str() {
        "rust" | "cargo" => Color::LightRed,
        "python" | "django" | "flask" | "data-science" => Color::Yellow,
        "javascript" | "typescript" | "react" | "nextjs" | "node" | "nodejs" | "vue" => {
            Color::LightYellow
        }
        "go" | "golang" => Color::Cyan,
        "java" | "kotlin" | "android" => Color::Red,
        "c" | "cpp" | "c++" | "linux" | "x11" | "xorg" => Color::LightBlue,
        "docker" | "kubernetes" | "devops" => Color::Blue,
        "foss" | "open-source" | "opensource" | "free-software" | "oss" | "floss" => Color::Green,
        "game" | "space-game" | "mmo" | "audio" | "voice" => Color::Magenta,
        _ => Color::Gray,
    }
}

/// Star counts get warmer as they grow
pub fn color_for_stars(stars: u64) -> Color {
    match stars {
        0..=99 => Color::Gray,
        100..=999 => Color::White,
        1_000..=9_999 => Color::Yellow,
        _ => Color::LightYellow,
    }
}

/// Skill-match score: green for a good fit, red for a poor one
pub fn color_for_score(score: f64) -> Color {
    if score >= 0.75 {
        Color::Green
    } else if score >= 0.4 {
        Color::Yellow
    } else {
        Color::Red
    }
}

/// Label for an optional difficulty string
pub fn difficulty_label(difficulty: Option<&str>) -> &'static str {
    match difficulty.map(|d| d.to_ascii_lowercase()).as_deref() {
        Some("beginner") | Some("easy") => "Beginner",
        Some("intermediate") | Some("medium") => "Intermediate",
        Some("advanced") | Some("hard") => "Advanced",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_bands() {
        assert_eq!(color_for_score(0.9), Color::Green);
        assert_eq!(color_for_score(0.5), Color::Yellow);
        assert_eq!(color_for_score(0.1), Color::Red);
    }

    #[test]
    fn difficulty_aliases() {
        assert_eq!(difficulty_label(Some("Easy")), "Beginner");
        assert_eq!(difficulty_label(Some("unknown")), "");
        assert_eq!(difficulty_label(None), "");
    }
}
