use serde::{Deserialize, Serialize};
use svg::node::element::Path;
use svg::node::element::path::Data;

use crate::geometry::primitives::{Outline, Rect};

#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SvgDrawOptions {
    pub theme: SvgLayoutThemes,
    ///Draws the usable interior of the sheet
    pub interior: bool,
    ///Draws the rotated bounding box of every placement
    pub bounding_boxes: bool,
}

impl Default for SvgDrawOptions {
    fn default() -> Self {
        Self {
            theme: SvgLayoutThemes::default(),
            interior: true,
            bounding_boxes: false,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum SvgLayoutThemes {
    #[default]
    EarthTones,
    Gray,
}

impl SvgLayoutThemes {
    pub fn theme(&self) -> &'static SvgLayoutTheme {
        match self {
            SvgLayoutThemes::EarthTones => &EARTH_TONES_THEME,
            SvgLayoutThemes::Gray => &GRAY_THEME,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SvgLayoutTheme {
    pub stroke_width_multiplier: f64,
    pub sheet_fill: &'static str,
    pub die_line_fill: &'static str,
    pub interior_stroke_opac: f64,
}

pub static EARTH_TONES_THEME: SvgLayoutTheme = SvgLayoutTheme {
    stroke_width_multiplier: 2.0,
    sheet_fill: "#CC824A",
    die_line_fill: "#FFC879",
    interior_stroke_opac: 0.5,
};

pub static GRAY_THEME: SvgLayoutTheme = SvgLayoutTheme {
    stroke_width_multiplier: 2.5,
    sheet_fill: "#C3C3C3",
    die_line_fill: "#8F8F8F",
    interior_stroke_opac: 0.9,
};

/// Scales the RGB components of a `#RRGGBB` color by `fraction`.
/// Colors in any other format are returned unchanged.
pub fn change_brightness(color: &str, fraction: f64) -> String {
    let hex = color.trim_start_matches('#');
    let component = |i: usize| {
        hex.get(i..i + 2)
            .and_then(|c| u8::from_str_radix(c, 16).ok())
            .map(|c| (c as f64 * fraction).clamp(0.0, 255.0) as u8)
    };
    match (hex.len(), component(0), component(2), component(4)) {
        (6, Some(r), Some(g), Some(b)) => format!("#{r:02X}{g:02X}{b:02X}"),
        _ => color.to_string(),
    }
}

pub fn outline_data(outline: &Outline) -> Data {
    let mut data = Data::new().move_to::<(f64, f64)>(outline.vertex(0).into());
    for i in 1..outline.n_vertices() {
        data = data.line_to::<(f64, f64)>(outline.vertex(i).into());
    }
    data.close()
}

pub fn rect_data(rect: &Rect) -> Data {
    Data::new()
        .move_to((rect.x_min, rect.y_min))
        .line_to((rect.x_max, rect.y_min))
        .line_to((rect.x_max, rect.y_max))
        .line_to((rect.x_min, rect.y_max))
        .close()
}

pub fn data_to_path(data: Data, params: &[(&str, &str)]) -> Path {
    let mut path = Path::new();
    for param in params {
        path = path.set(param.0, param.1)
    }
    path.set("d", data)
}
