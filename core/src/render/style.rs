use plotters::style::RGBColor;

/// Bands drawn on a light-curve plot, in legend order.
pub const BAND_ORDER: [&str; 6] = ["u", "g", "r", "i", "z", "Y"];

pub const NON_DET_COLOR: RGBColor = RGBColor(128, 128, 128);
pub const DET_ALPHA: f64 = 0.9;
pub const NON_DET_ALPHA: f64 = 0.5;

pub fn band_color(band: &str) -> RGBColor {
    match band {
        "u" => RGBColor(86, 64, 160),
        "g" => RGBColor(31, 119, 180),
        "r" => RGBColor(44, 160, 44),
        "i" => RGBColor(214, 39, 40),
        "z" => RGBColor(255, 127, 14),
        "Y" => RGBColor(140, 86, 75),
        _ => RGBColor(0, 0, 0),
    }
}

pub fn is_plotted_band(band: &str) -> bool {
    BAND_ORDER.contains(&band)
}
