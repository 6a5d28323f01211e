use crate::draw::model::{Rgb, Tool};
use crate::draw::state::OverlayState;

/// Everything a toolbar control can ask the overlay to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarCommand {
    ToggleActive,
    SelectTool(Tool),
    SetColor(Rgb),
    /// Index into the configured quick swatches; out-of-range indices are ignored.
    QuickColor(usize),
    SetSize(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorStyle {
    #[default]
    Default,
    Crosshair,
}

/// Whether touch gestures over the surface still scroll the content beneath.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TouchAction {
    #[default]
    Auto,
    None,
}

/// How the host should route pointer input over the overlay's bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputPolicy {
    pub intercepts_pointer: bool,
    pub cursor: CursorStyle,
    pub touch_action: TouchAction,
}

impl InputPolicy {
    pub fn for_active(active: bool) -> Self {
        if active {
            Self {
                intercepts_pointer: true,
                cursor: CursorStyle::Crosshair,
                touch_action: TouchAction::None,
            }
        } else {
            Self::default()
        }
    }
}

/// Snapshot of the overlay state in the shape a toolbar renders it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolbarView {
    pub active: bool,
    pub tool: Tool,
    pub color: Rgb,
    pub color_hex: String,
    pub size: u32,
    pub size_label: &'static str,
    pub color_enabled: bool,
    pub quick_colors: Vec<Rgb>,
}

impl ToolbarView {
    pub fn from_state(state: &OverlayState, quick_colors: &[Rgb]) -> Self {
        let tool = state.current_tool();
        Self {
            active: state.is_active(),
            tool,
            color: state.color(),
            color_hex: state.color().to_hex(),
            size: state.current_size(),
            size_label: size_label(tool),
            color_enabled: tool.uses_color(),
            quick_colors: quick_colors.to_vec(),
        }
    }

    pub fn is_selected(&self, tool: Tool) -> bool {
        self.tool == tool
    }
}

/// Caption for the size control of `tool`.
pub fn size_label(tool: Tool) -> &'static str {
    match tool {
        Tool::Pen | Tool::Pencil => "Size",
        Tool::Marker => "Marker",
        Tool::Eraser => "Eraser",
    }
}
