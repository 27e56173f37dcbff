// Copyright 2026 the Vistat Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Command-line configuration.

use std::path::PathBuf;

use clap::Parser;
use peniko::Color;

/// Interactive statistical chart dashboard.
#[derive(Debug, Parser)]
#[command(name = "vistat", version, about)]
pub(crate) struct Args {
    /// Directory holding the static datasets.
    #[arg(long, default_value = "data")]
    pub(crate) data_dir: PathBuf,

    /// Chart shown at startup (bar | scatter | heatmap | choropleth | treemap).
    #[arg(long, default_value = "bar")]
    pub(crate) chart: String,

    /// Render the chart headless and write it as SVG to this path, then
    /// exit.
    #[arg(long, value_name = "PATH")]
    pub(crate) export: Option<PathBuf>,

    /// Export surface width in pixels.
    #[arg(long, default_value_t = 960.0)]
    pub(crate) width: f64,

    /// Export surface height in pixels.
    #[arg(long, default_value_t = 540.0)]
    pub(crate) height: f64,

    /// Bar fill, as `#rrggbb` (the "bar color" styling token).
    #[arg(long, default_value = "#4682b4")]
    pub(crate) bar_color: String,

    /// Bar fill while hovered, as `#rrggbb` (the "bar hover color" token).
    #[arg(long, default_value = "#ff6347")]
    pub(crate) bar_hover: String,
}

/// Parses a `#rrggbb` hex color.
pub(crate) fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::from_rgb8(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors_parse_and_reject() {
        let c = parse_hex_color("#4682b4").expect("valid color");
        let rgba = c.to_rgba8();
        assert_eq!((rgba.r, rgba.g, rgba.b), (0x46, 0x82, 0xb4));

        assert!(parse_hex_color("4682b4").is_none(), "missing #");
        assert!(parse_hex_color("#46 2b4").is_none());
        assert!(parse_hex_color("#abcd").is_none());
    }
}
