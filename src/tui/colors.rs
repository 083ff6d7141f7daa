use ratatui::style::Color;

pub fn color_for_points(points: u64) -> Color {
    match points {
        0..=9 => Color::Gray,
        10..=99 => Color::Yellow,
        100..=499 => Color::LightRed,
        _ => Color::Red,
    }
}

pub fn color_for_comments(num_comments: u64) -> Color {
    match num_comments {
        0 => Color::DarkGray,
        1..=49 => Color::Cyan,
        _ => Color::LightCyan,
    }
}

pub fn icon_for_story(url: &str) -> &'static str {
    if url.is_empty() {
        "\u{1F4AC}" // speech balloon (self post)
    } else {
        "\u{1F517}" // link
    }
}
