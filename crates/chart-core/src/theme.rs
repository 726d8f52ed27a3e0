// File: crates/chart-core/src/theme.rs
// Summary: Light/Dark theming for chart rendering colors and the default series palette.

use crate::color::Rgba;

/// Series colors in assignment order.
pub const DEFAULT_PALETTE: [&str; 8] = [
    "#3b82f6", "#10b981", "#f59e0b", "#ef4444", "#8b5cf6", "#06b6d4", "#ec4899", "#84cc16",
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub background: Rgba,
    pub grid: Rgba,
    pub axis_line: Rgba,
    pub axis_label: Rgba,
    pub zero_line: Rgba,
    pub positive_shade: Rgba,
    pub negative_shade: Rgba,
    pub marker_stroke: Rgba,
    pub tooltip_background: Rgba,
    pub tooltip_border: Rgba,
    pub tooltip_text: Rgba,
    pub placeholder_text: Rgba,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: Rgba::rgb(18, 18, 20),
            grid: Rgba::rgb(40, 40, 45),
            axis_line: Rgba::rgb(180, 180, 190),
            axis_label: Rgba::rgb(200, 200, 210),
            zero_line: Rgba::rgb(150, 150, 160),
            positive_shade: Rgba::new(40, 200, 120, 64),
            negative_shade: Rgba::new(220, 80, 80, 64),
            marker_stroke: Rgba::rgb(255, 255, 255),
            tooltip_background: Rgba::new(30, 30, 36, 235),
            tooltip_border: Rgba::rgb(90, 90, 100),
            tooltip_text: Rgba::rgb(235, 235, 245),
            placeholder_text: Rgba::rgb(140, 140, 150),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            background: Rgba::rgb(255, 255, 255),
            grid: Rgba::rgb(230, 230, 235),
            axis_line: Rgba::rgb(60, 60, 70),
            axis_label: Rgba::rgb(75, 85, 99),
            zero_line: Rgba::rgb(107, 114, 128),
            positive_shade: Rgba::new(16, 185, 129, 56),
            negative_shade: Rgba::new(239, 68, 68, 56),
            marker_stroke: Rgba::rgb(17, 24, 39),
            tooltip_background: Rgba::new(255, 255, 255, 245),
            tooltip_border: Rgba::rgb(209, 213, 219),
            tooltip_text: Rgba::rgb(17, 24, 39),
            placeholder_text: Rgba::rgb(107, 114, 128),
        }
    }

    pub fn high_contrast_dark() -> Self {
        Self {
            name: "high-contrast-dark",
            background: Rgba::rgb(0x00, 0x00, 0x00),
            grid: Rgba::rgb(0x22, 0x22, 0x22),
            axis_line: Rgba::rgb(0xff, 0xff, 0xff),
            axis_label: Rgba::rgb(0xff, 0xff, 0xff),
            zero_line: Rgba::rgb(0xcc, 0xcc, 0xcc),
            positive_shade: Rgba::new(0x00, 0xff, 0x00, 96),
            negative_shade: Rgba::new(0xff, 0x00, 0x00, 96),
            marker_stroke: Rgba::rgb(0xff, 0xff, 0x00),
            tooltip_background: Rgba::rgb(0x11, 0x11, 0x11),
            tooltip_border: Rgba::rgb(0xff, 0xff, 0xff),
            tooltip_text: Rgba::rgb(0xff, 0xff, 0xff),
            placeholder_text: Rgba::rgb(0xcc, 0xcc, 0xcc),
        }
    }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::dark(), Theme::light(), Theme::high_contrast_dark()]
}

/// Find a theme by its `name`, falling back to dark.
pub fn find(name: &str) -> Theme {
    for t in presets() { if t.name.eq_ignore_ascii_case(name) { return t; } }
    log::warn!("unknown theme `{name}`, using dark");
    Theme::dark()
}

/// Resolve palette entries, skipping unparseable ones. Never empty.
pub fn resolve_palette(entries: &[String]) -> Vec<Rgba> {
    let mut out: Vec<Rgba> = entries
        .iter()
        .filter_map(|hex| match Rgba::from_hex(hex) {
            Ok(c) => Some(c),
            Err(e) => {
                log::warn!("ignoring palette entry: {e}");
                None
            }
        })
        .collect();
    if out.is_empty() {
        out = DEFAULT_PALETTE.iter().filter_map(|hex| Rgba::from_hex(hex).ok()).collect();
    }
    out
}
