use lipgloss::{Color, Style};
use once_cell::sync::Lazy;

// Styles backing the template helpers of the same name
pub static STYLE_CYAN: Lazy<Style> =
    Lazy::new(|| Style::new().foreground(Color::from_rgb(0, 238, 238)));
pub static STYLE_BOLD: Lazy<Style> = Lazy::new(|| Style::new().bold(true));
pub static STYLE_FAINT: Lazy<Style> = Lazy::new(|| Style::new().faint(true));
pub static STYLE_GREEN: Lazy<Style> =
    Lazy::new(|| Style::new().foreground(Color::from_rgb(0, 205, 0)));

pub fn cyan(s: &str) -> String {
    STYLE_CYAN.render(s)
}

pub fn bold(s: &str) -> String {
    STYLE_BOLD.render(s)
}

pub fn faint(s: &str) -> String {
    STYLE_FAINT.render(s)
}

pub fn green(s: &str) -> String {
    STYLE_GREEN.render(s)
}
