use crate::draw::model::{Rgb, Tool, ToolConfigs};

/// Mutable overlay state, owned by one overlay instance from mount to unmount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayState {
    active: bool,
    current_tool: Tool,
    color: Rgb,
    configs: ToolConfigs,
}

impl Default for OverlayState {
    fn default() -> Self {
        Self::new(ToolConfigs::default(), Rgb::BLACK, false)
    }
}

impl OverlayState {
    pub fn new(configs: ToolConfigs, color: Rgb, active: bool) -> Self {
        Self {
            active,
            current_tool: Tool::Pen,
            color,
            configs,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn current_tool(&self) -> Tool {
        self.current_tool
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn configs(&self) -> &ToolConfigs {
        &self.configs
    }

    pub fn size_of(&self, tool: Tool) -> u32 {
        self.configs.get(tool).size()
    }

    pub fn current_size(&self) -> u32 {
        self.size_of(self.current_tool)
    }

    pub fn toggle_active(&mut self) -> bool {
        self.active = !self.active;
        self.active
    }

    pub fn select_tool(&mut self, tool: Tool) {
        self.current_tool = tool;
    }

    pub fn set_color(&mut self, color: Rgb) {
        self.color = color;
    }

    /// Sets the selected tool's size, clamped to 1..=100. Returns the stored size.
    pub fn set_size(&mut self, size: u32) -> u32 {
        self.configs.set_size(self.current_tool, size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_inactive_with_pen_selected() {
        let state = OverlayState::default();
        assert!(!state.is_active());
        assert_eq!(state.current_tool(), Tool::Pen);
        assert_eq!(state.color(), Rgb::BLACK);
        assert_eq!(state.current_size(), 3);
    }

    #[test]
    fn size_changes_follow_the_selected_tool_only() {
        let mut state = OverlayState::default();
        state.select_tool(Tool::Pencil);
        assert_eq!(state.set_size(10), 10);

        state.select_tool(Tool::Pen);
        assert_eq!(state.current_size(), 3);
        state.select_tool(Tool::Pencil);
        assert_eq!(state.current_size(), 10);
        assert_eq!(state.size_of(Tool::Marker), 20);
    }

    #[test]
    fn toggle_flips_and_reports_new_value() {
        let mut state = OverlayState::default();
        assert!(state.toggle_active());
        assert!(!state.toggle_active());
    }
}
