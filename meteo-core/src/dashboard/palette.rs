//! Colour ramps for the dashboard panels.

use plotters::style::RGBColor;

pub const CORAL: RGBColor = RGBColor(255, 127, 80);
pub const SKY_BLUE: RGBColor = RGBColor(135, 206, 235);
pub const DARK_GREEN: RGBColor = RGBColor(0, 100, 0);
pub const LIGHT_GREEN: RGBColor = RGBColor(144, 238, 144);

/// Blue through pale yellow to red, for temperature bars.
const DIVERGING: &[(u8, u8, u8)] = &[
    (49, 54, 149),
    (116, 173, 209),
    (255, 255, 191),
    (244, 109, 67),
    (165, 0, 38),
];

/// Blue through grey to red, for the scatter plot.
const COOL_WARM: &[(u8, u8, u8)] = &[(59, 76, 192), (221, 221, 221), (180, 4, 38)];

/// Near-white to navy, for humidity.
const BLUES: &[(u8, u8, u8)] = &[(247, 251, 255), (107, 174, 214), (8, 48, 107)];

/// Qualitative colours for pie slices; repeats after twelve.
const SET3: &[RGBColor] = &[
    RGBColor(141, 211, 199),
    RGBColor(255, 255, 179),
    RGBColor(190, 186, 218),
    RGBColor(251, 128, 114),
    RGBColor(128, 177, 211),
    RGBColor(253, 180, 98),
    RGBColor(179, 222, 105),
    RGBColor(252, 205, 229),
    RGBColor(217, 217, 217),
    RGBColor(188, 128, 189),
    RGBColor(204, 235, 197),
    RGBColor(255, 237, 111),
];

pub fn diverging(t: f64) -> RGBColor {
    ramp(DIVERGING, t)
}

pub fn cool_warm(t: f64) -> RGBColor {
    ramp(COOL_WARM, t)
}

pub fn blues(t: f64) -> RGBColor {
    ramp(BLUES, t)
}

pub fn qualitative(index: usize) -> RGBColor {
    SET3[index % SET3.len()]
}

/// Piecewise-linear interpolation across evenly spaced stops. `t` is clamped to [0, 1].
fn ramp(stops: &[(u8, u8, u8)], t: f64) -> RGBColor {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let segments = (stops.len() - 1) as f64;
    let scaled = t * segments;
    let i = (scaled.floor() as usize).min(stops.len() - 2);
    let frac = scaled - i as f64;

    let (a, b) = (stops[i], stops[i + 1]);
    let lerp = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * frac).round() as u8;
    RGBColor(lerp(a.0, b.0), lerp(a.1, b.1), lerp(a.2, b.2))
}
