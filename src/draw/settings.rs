use serde::{Deserialize, Serialize};

use crate::draw::model::{clamp_tool_size, Rgb, Tool, ToolConfigs};
use crate::draw::state::OverlayState;

/// Initial size for every tool, as written in the settings file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolSizes {
    #[serde(default = "default_pen_size")]
    pub pen: u32,
    #[serde(default = "default_pencil_size")]
    pub pencil: u32,
    #[serde(default = "default_marker_size")]
    pub marker: u32,
    #[serde(default = "default_eraser_size")]
    pub eraser: u32,
}

impl ToolSizes {
    pub fn get(&self, tool: Tool) -> u32 {
        match tool {
            Tool::Pen => self.pen,
            Tool::Pencil => self.pencil,
            Tool::Marker => self.marker,
            Tool::Eraser => self.eraser,
        }
    }

    pub fn to_configs(self) -> ToolConfigs {
        ToolConfigs::from_fn(|tool| self.get(tool))
    }
}

impl Default for ToolSizes {
    fn default() -> Self {
        Self {
            pen: default_pen_size(),
            pencil: default_pencil_size(),
            marker: default_marker_size(),
            eraser: default_eraser_size(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OverlaySettings {
    #[serde(default)]
    pub default_sizes: ToolSizes,
    #[serde(default)]
    pub default_color: Rgb,
    #[serde(default = "default_quick_colors")]
    pub quick_colors: Vec<Rgb>,
    #[serde(default)]
    pub start_active: bool,
    #[serde(default = "default_enable_pressure")]
    pub enable_pressure: bool,
    #[serde(default)]
    pub debug_logging: bool,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            default_sizes: ToolSizes::default(),
            default_color: Rgb::BLACK,
            quick_colors: default_quick_colors(),
            start_active: false,
            enable_pressure: default_enable_pressure(),
            debug_logging: false,
        }
    }
}

impl OverlaySettings {
    /// Pulls hand-edited values back into the supported ranges.
    pub fn sanitize(&mut self) {
        let sizes = &mut self.default_sizes;
        for size in [
            &mut sizes.pen,
            &mut sizes.pencil,
            &mut sizes.marker,
            &mut sizes.eraser,
        ] {
            *size = clamp_tool_size(*size);
        }
        if self.quick_colors.is_empty() {
            self.quick_colors = default_quick_colors();
        }
    }

    /// Fresh overlay state seeded from these settings.
    pub fn initial_state(&self) -> OverlayState {
        OverlayState::new(
            self.default_sizes.to_configs(),
            self.default_color,
            self.start_active,
        )
    }
}

fn default_pen_size() -> u32 {
    Tool::Pen.default_size()
}

fn default_pencil_size() -> u32 {
    Tool::Pencil.default_size()
}

fn default_marker_size() -> u32 {
    Tool::Marker.default_size()
}

fn default_eraser_size() -> u32 {
    Tool::Eraser.default_size()
}

fn default_enable_pressure() -> bool {
    true
}

fn default_quick_colors() -> Vec<Rgb> {
    vec![
        Rgb::BLACK,
        Rgb::new(0xef, 0x44, 0x44),
        Rgb::new(0x3b, 0x82, 0xf6),
        Rgb::new(0x10, 0xb9, 0x81),
    ]
}
