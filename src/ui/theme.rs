use ratatui::style::Color;

// Dark grays with one orange accent. New roles go here rather than inline in
// the render code.
pub const FG: Color = Color::Rgb(229, 231, 235);
pub const MUTED: Color = Color::Rgb(156, 163, 175);
pub const DIM: Color = Color::Rgb(107, 114, 128);
pub const BORDER: Color = Color::Rgb(55, 65, 81);

pub const ACCENT: Color = Color::Rgb(255, 159, 26);
pub const ACCENT_BG: Color = Color::Rgb(44, 32, 16);

pub const SELECTED_FG: Color = Color::Rgb(11, 13, 16);
pub const SELECTED_BG: Color = Color::Rgb(229, 231, 235);
