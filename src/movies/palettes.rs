//! Palette registry for loading and accessing chart color palettes
//!
//! Loads palettes from palettes.json (embedded at compile time) and provides
//! access by name.
//!
//! Palette types:
//! - `categorical`: Discrete colors for distinct series (colors repeat after exhausting the list)
//! - `sequential`: Gradient from low to high values
//! - `diverging`: Gradient with a neutral midpoint

use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, error, warn};

/// Embedded palettes.json content
const PALETTES_JSON: &str = include_str!("../../palettes.json");

/// Global palette registry, initialized lazily on first access
pub static PALETTE_REGISTRY: Lazy<PaletteRegistry> = Lazy::new(|| {
    PaletteRegistry::from_json(PALETTES_JSON).unwrap_or_else(|e| {
        error!("failed to load palettes.json: {}", e);
        PaletteRegistry::default()
    })
});

/// Default categorical palette name (single-series charts use its first color)
pub const DEFAULT_CATEGORICAL_PALETTE: &str = "Tab10";

/// Gray used when a palette is missing or a color fails to parse
const FALLBACK_COLOR: [u8; 3] = [128, 128, 128];

/// Palette type as defined in palettes.json
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteType {
    Categorical,
    Sequential,
    Diverging,
}

/// A single palette definition from palettes.json
#[derive(Debug, Clone, Deserialize)]
pub struct PaletteDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub palette_type: PaletteType,
    pub colors: Vec<String>,
}

impl PaletteDefinition {
    /// Get a color by index (wraps around)
    pub fn get_color(&self, index: usize) -> [u8; 3] {
        if self.colors.is_empty() {
            return FALLBACK_COLOR;
        }
        let idx = index % self.colors.len();
        parse_hex_color(&self.colors[idx]).unwrap_or(FALLBACK_COLOR)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Interpolate a color from the palette at position t ∈ [0, 1]
    ///
    /// t=0 returns the first color, t=1 returns the last color.
    /// Values in between are linearly interpolated.
    pub fn interpolate(&self, t: f64) -> [u8; 3] {
        if self.colors.is_empty() {
            return FALLBACK_COLOR;
        }

        let t = t.clamp(0.0, 1.0);
        let n = self.colors.len();

        if n == 1 {
            return self.get_color(0);
        }

        let pos = t * (n - 1) as f64;
        let idx_low = pos.floor() as usize;
        let idx_high = (idx_low + 1).min(n - 1);
        let frac = pos - idx_low as f64;

        let color_low = self.get_color(idx_low);
        let color_high = self.get_color(idx_high);

        [
            lerp_channel(color_low[0], color_high[0], frac),
            lerp_channel(color_low[1], color_high[1], frac),
            lerp_channel(color_low[2], color_high[2], frac),
        ]
    }

    /// Pick `n` colors for `n` bars or categories
    ///
    /// Categorical palettes cycle through their colors. Gradient palettes are
    /// sampled at evenly spaced interior points, so the extreme end colors
    /// are never used.
    pub fn sample(&self, n: usize) -> Vec<[u8; 3]> {
        match self.palette_type {
            PaletteType::Categorical => (0..n).map(|i| self.get_color(i)).collect(),
            PaletteType::Sequential | PaletteType::Diverging => (0..n)
                .map(|i| self.interpolate((i + 1) as f64 / (n + 1) as f64))
                .collect(),
        }
    }
}

fn lerp_channel(low: u8, high: u8, frac: f64) -> u8 {
    (low as f64 * (1.0 - frac) + high as f64 * frac).round() as u8
}

/// Registry of all available palettes
#[derive(Debug, Clone, Default)]
pub struct PaletteRegistry {
    /// All palettes by name (lowercase keys for case-insensitive lookup)
    palettes: HashMap<String, PaletteDefinition>,
    /// Palette names in file order
    names: Vec<String>,
}

impl PaletteRegistry {
    /// Load palettes from JSON string
    pub fn from_json(json: &str) -> Result<Self, String> {
        let definitions: Vec<PaletteDefinition> = serde_json::from_str(json)
            .map_err(|e| format!("Failed to parse palettes JSON: {}", e))?;

        let mut registry = Self::default();
        for def in definitions {
            registry.names.push(def.name.clone());
            registry.palettes.insert(def.name.to_lowercase(), def);
        }

        debug!(count = registry.palettes.len(), "palette registry loaded");
        Ok(registry)
    }

    /// Get a palette by name (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&PaletteDefinition> {
        self.palettes.get(&name.to_lowercase())
    }

    pub fn default_categorical(&self) -> Option<&PaletteDefinition> {
        self.get(DEFAULT_CATEGORICAL_PALETTE)
    }

    /// All palette names in definition order
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

/// Parse a hex color string to RGB array
///
/// Supports `#RRGGBB`, `#RRGGBBAA` (alpha ignored) and the same without `#`.
pub fn parse_hex_color(hex: &str) -> Option<[u8; 3]> {
    let hex = hex.trim_start_matches('#');

    if !hex.is_ascii() {
        warn!("invalid hex color '{}': non-ASCII characters", hex);
        return None;
    }
    if hex.len() != 6 && hex.len() != 8 {
        warn!("invalid hex color length '{}': {}", hex, hex.len());
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some([r, g, b])
}

/// Series color for single-series charts, by index into the default palette
pub fn series_color(index: usize) -> [u8; 3] {
    PALETTE_REGISTRY
        .default_categorical()
        .map(|p| p.get_color(index))
        .unwrap_or(FALLBACK_COLOR)
}

/// `n` colors from the named palette, gray if the palette is unknown
pub fn palette_colors(name: &str, n: usize) -> Vec<[u8; 3]> {
    match PALETTE_REGISTRY.get(name) {
        Some(palette) => palette.sample(n),
        None => {
            warn!(palette = name, "unknown palette, using gray");
            vec![FALLBACK_COLOR; n]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#FF0000"), Some([255, 0, 0]));
        assert_eq!(parse_hex_color("#1F77B4"), Some([31, 119, 180]));
        assert_eq!(parse_hex_color("0000FF"), Some([0, 0, 255]));
        assert_eq!(parse_hex_color("#440154FF"), Some([68, 1, 84]));

        assert_eq!(parse_hex_color("#FFF"), None);
        assert_eq!(parse_hex_color("GGGGGG"), None);
        // Six bytes, but not six ASCII digits
        assert_eq!(parse_hex_color("aé€"), None);
        assert_eq!(parse_hex_color("#aé€"), None);
    }

    #[test]
    fn test_palette_registry_loads() {
        let registry = &*PALETTE_REGISTRY;
        assert!(registry.names().contains(&"Viridis".to_string()));
        assert!(registry.names().contains(&"Coolwarm".to_string()));

        let tab10 = registry.get("tab10").unwrap();
        assert_eq!(tab10.palette_type, PaletteType::Categorical);
        assert_eq!(tab10.get_color(0), [31, 119, 180]);

        assert_eq!(
            registry.get("coolwarm").unwrap().palette_type,
            PaletteType::Diverging
        );
    }

    #[test]
    fn test_palette_color_wrapping() {
        let palette = PALETTE_REGISTRY.get("Tab10").unwrap();
        let len = palette.len();
        assert_eq!(palette.get_color(0), palette.get_color(len));
        assert_eq!(palette.get_color(1), palette.get_color(len + 1));
    }

    #[test]
    fn test_interpolate_endpoints_and_midpoint() {
        let palette = PaletteDefinition {
            name: "test".to_string(),
            palette_type: PaletteType::Sequential,
            colors: vec!["#000000".to_string(), "#FFFFFF".to_string()],
        };
        assert_eq!(palette.interpolate(0.0), [0, 0, 0]);
        assert_eq!(palette.interpolate(1.0), [255, 255, 255]);
        assert_eq!(palette.interpolate(0.5), [128, 128, 128]);
        assert_eq!(palette.interpolate(-1.0), [0, 0, 0]);
    }

    #[test]
    fn test_sample_gradient_skips_endpoints() {
        let palette = PaletteDefinition {
            name: "test".to_string(),
            palette_type: PaletteType::Sequential,
            colors: vec!["#000000".to_string(), "#FF0000".to_string()],
        };
        let colors = palette.sample(3);
        assert_eq!(colors.len(), 3);
        // t = 0.25, 0.5, 0.75
        assert_eq!(colors[0], [64, 0, 0]);
        assert_eq!(colors[1], [128, 0, 0]);
        assert_eq!(colors[2], [191, 0, 0]);
    }

    #[test]
    fn test_palette_colors_unknown_name() {
        assert_eq!(palette_colors("nope", 2), vec![[128, 128, 128]; 2]);
        assert_eq!(palette_colors("Viridis", 10).len(), 10);
        assert_eq!(series_color(0), [31, 119, 180]);
    }
}
