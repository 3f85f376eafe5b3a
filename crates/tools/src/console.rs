use std::fmt::Write;
use trilab_common::Rgb;
use trilab_kernel::Notice;

/// Control menu for the tint exercise, one `(key, description)` per line.
pub const MENU: &[(&str, &str)] = &[
    ("R", "Red"),
    ("G", "Green"),
    ("B", "Blue"),
    ("D", "Lower alpha (more transparent)"),
    ("A", "Raise alpha (less transparent)"),
    ("X", "Reset RGB to white"),
    ("V", "Print RGB values"),
    ("M", "Show this menu"),
    ("W / S", "Zoom in / out"),
    ("ESC", "Quit"),
    ("CLICK (left)", "Rotate"),
];

pub fn menu_text() -> String {
    let mut out = String::from("\n   CHOOSE AN OPTION\n");
    for (key, what) in MENU {
        let _ = writeln!(out, " {key} - {what}");
    }
    out
}

pub fn color_report(rgb: Rgb) -> String {
    format!(
        "Current RGB values: Red={}, Green={}, Blue={}",
        rgb.r, rgb.g, rgb.b
    )
}

pub const RESET_TEXT: &str = "RGB values reset to default (1.0, 1.0, 1.0)";

/// Console text for a notice emitted by a controller tick.
pub fn notice_text(notice: Notice) -> String {
    match notice {
        Notice::Menu => menu_text(),
        Notice::ColorValues(rgb) => color_report(rgb),
        Notice::ColorReset => RESET_TEXT.to_string(),
    }
}
