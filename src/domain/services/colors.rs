use crate::domain::model::{LayerHierarchy, Submodules, DEFAULT_SUBMODULE_COLOR};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Pastel rainbow settings; one hue per module, spread evenly around the wheel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub lightness: f64,
    pub saturation: f64,
    /// Used for submodules whose module is not listed in `root_layers`.
    pub fallback: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            lightness: 0.85,
            saturation: 0.55,
            fallback: DEFAULT_SUBMODULE_COLOR.to_string(),
        }
    }
}

fn hue_component(m1: f64, m2: f64, hue: f64) -> f64 {
    let hue = hue.rem_euclid(1.0);
    if hue < 1.0 / 6.0 {
        m1 + (m2 - m1) * hue * 6.0
    } else if hue < 0.5 {
        m2
    } else if hue < 2.0 / 3.0 {
        m1 + (m2 - m1) * (2.0 / 3.0 - hue) * 6.0
    } else {
        m1
    }
}

/// HLS → RGB, each channel in `[0, 1]`.
pub fn hls_to_rgb(h: f64, l: f64, s: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (l, l, l);
    }
    let m2 = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let m1 = 2.0 * l - m2;
    (
        hue_component(m1, m2, h + 1.0 / 3.0),
        hue_component(m1, m2, h),
        hue_component(m1, m2, h - 1.0 / 3.0),
    )
}

fn to_hex((r, g, b): (f64, f64, f64)) -> String {
    let channel = |c: f64| (c * 255.0) as u8;
    format!("#{:02x}{:02x}{:02x}", channel(r), channel(g), channel(b))
}

/// Module → color, in `root_layers` order.
pub fn module_colors(layers: &LayerHierarchy, palette: &Palette) -> HashMap<String, String> {
    let modules: Vec<&String> = layers.root_layers.iter().flatten().collect();
    let n = modules.len();
    modules
        .into_iter()
        .enumerate()
        .map(|(i, module)| {
            let h = if n > 1 { i as f64 / n as f64 } else { 0.0 };
            let rgb = hls_to_rgb(h, palette.lightness, palette.saturation);
            (module.clone(), to_hex(rgb))
        })
        .collect()
}

pub fn assign_submodule_colors(
    submodules: &Submodules,
    layers: &LayerHierarchy,
    palette: &Palette,
) -> Submodules {
    let colors = module_colors(layers, palette);
    let mut result = submodules.clone();
    for (_, sm) in result.iter_mut() {
        sm.color = colors
            .get(&sm.module)
            .cloned()
            .unwrap_or_else(|| palette.fallback.clone());
    }
    result
}
