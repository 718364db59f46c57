use clap::ValueEnum;
use palette::{Hsl, IntoColor, Srgb};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, ValueEnum, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Spectrum,
    Rainbow,
    Warm,
    Ocean,
    Forest,
    Purple,
    Monochrome,
}

impl FromStr for ColorScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "spectrum" => Ok(Self::Spectrum),
            "rainbow" => Ok(Self::Rainbow),
            "warm" | "fire" => Ok(Self::Warm),
            "ocean" => Ok(Self::Ocean),
            "forest" => Ok(Self::Forest),
            "purple" => Ok(Self::Purple),
            "mono" | "monochrome" => Ok(Self::Monochrome),
            _ => Err(format!("Unknown color scheme: {}", s)),
        }
    }
}

/// Colors for one overlaid data series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStyle {
    pub stroke: (u8, u8, u8),
    pub fill: (u8, u8, u8),
    pub fill_opacity: f32,
}

impl SeriesStyle {
    pub fn stroke_hex(&self) -> String {
        to_hex(self.stroke)
    }

    pub fn fill_hex(&self) -> String {
        to_hex(self.fill)
    }
}

/// Grid ring and axis spoke color.
pub const GRID_COLOR: (u8, u8, u8) = (170, 170, 170);
/// Label text color.
pub const LABEL_COLOR: (u8, u8, u8) = (68, 68, 68);

impl ColorScheme {
    /// Get color for a given position (0.0 to 1.0) and intensity (0.0 to 1.0)
    pub fn get_color(&self, position: f32, intensity: f32) -> (u8, u8, u8) {
        let (h, s, l) = match self {
            ColorScheme::Spectrum => {
                // purple -> blue -> cyan -> green -> yellow -> red
                let hue = 270.0 - (position * 270.0);
                (hue, 0.9, 0.4 + intensity * 0.3)
            }
            ColorScheme::Rainbow => {
                let hue = position * 360.0;
                (hue, 0.85, 0.5 + intensity * 0.2)
            }
            ColorScheme::Warm => {
                // Red -> orange -> yellow
                let hue = position * 60.0;
                (hue, 0.95, 0.3 + intensity * 0.4)
            }
            ColorScheme::Ocean => {
                let hue = 180.0 + position * 60.0;
                (hue, 0.8, 0.3 + intensity * 0.35)
            }
            ColorScheme::Forest => {
                let hue = 80.0 + position * 60.0;
                (hue, 0.75, 0.25 + intensity * 0.35)
            }
            ColorScheme::Purple => {
                let hue = 270.0 + position * 60.0;
                (hue, 0.8, 0.35 + intensity * 0.3)
            }
            ColorScheme::Monochrome => (0.0, 0.0, 0.15 + intensity * 0.6),
        };

        let hsl = Hsl::new(h, s, l.clamp(0.0, 1.0));
        let rgb: Srgb = hsl.into_color();

        (
            (rgb.red.clamp(0.0, 1.0) * 255.0) as u8,
            (rgb.green.clamp(0.0, 1.0) * 255.0) as u8,
            (rgb.blue.clamp(0.0, 1.0) * 255.0) as u8,
        )
    }

    /// Style for layer `index` out of `count` overlaid series.
    ///
    /// Hues are spread across the scheme so layers stay distinguishable; the
    /// fill is a lighter shade of the stroke.
    pub fn series_style(&self, index: usize, count: usize) -> SeriesStyle {
        let position = if count > 1 {
            index as f32 / (count - 1) as f32
        } else {
            0.5
        };
        let stroke = self.get_color(position, 0.2);
        let fill = lerp_color(stroke, (255, 255, 255), 0.35);
        // keep the stack readable when many layers overlap
        let fill_opacity = (0.45 / count.max(1) as f32).max(0.12);

        SeriesStyle {
            stroke,
            fill,
            fill_opacity,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ColorScheme::Spectrum => "spectrum",
            ColorScheme::Rainbow => "rainbow",
            ColorScheme::Warm => "warm",
            ColorScheme::Ocean => "ocean",
            ColorScheme::Forest => "forest",
            ColorScheme::Purple => "purple",
            ColorScheme::Monochrome => "monochrome",
        }
    }

    pub fn all() -> &'static [ColorScheme] {
        &[
            ColorScheme::Spectrum,
            ColorScheme::Rainbow,
            ColorScheme::Warm,
            ColorScheme::Ocean,
            ColorScheme::Forest,
            ColorScheme::Purple,
            ColorScheme::Monochrome,
        ]
    }

    pub fn next(&self) -> Self {
        let all = Self::all();
        let current = all.iter().position(|c| c == self).unwrap_or(0);
        all[(current + 1) % all.len()]
    }
}

/// Interpolate between two colors
pub fn lerp_color(a: (u8, u8, u8), b: (u8, u8, u8), t: f32) -> (u8, u8, u8) {
    let t = t.clamp(0.0, 1.0);
    (
        (a.0 as f32 + (b.0 as f32 - a.0 as f32) * t) as u8,
        (a.1 as f32 + (b.1 as f32 - a.1 as f32) * t) as u8,
        (a.2 as f32 + (b.2 as f32 - a.2 as f32) * t) as u8,
    )
}

pub fn to_hex((r, g, b): (u8, u8, u8)) -> String {
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}
