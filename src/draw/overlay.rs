use crate::draw::input::{DrawTarget, DrawnSegment, InkEngine, PointerId, PointerSample};
use crate::draw::model::{Rgb, Tool};
use crate::draw::settings::OverlaySettings;
use crate::draw::state::OverlayState;
use crate::draw::surface::{HostContainer, RasterSurface, SurfaceTracker};
use crate::draw::toolbar::{InputPolicy, ToolbarCommand, ToolbarView};

/// Annotation layer mounted over one host container.
///
/// Owns the raster surface (through its [`SurfaceTracker`]) and the [`InkEngine`]
/// drawing into it. Pending resize notifications are handled before every pointer
/// event, so strokes always see the current buffer.
#[derive(Debug)]
pub struct InkOverlay {
    tracker: SurfaceTracker,
    engine: InkEngine,
    quick_colors: Vec<Rgb>,
}

impl InkOverlay {
    pub fn mount<H: HostContainer + ?Sized>(host: &mut H, settings: &OverlaySettings) -> Self {
        let tracker = SurfaceTracker::mount(host);
        let engine = InkEngine::new(settings.initial_state(), settings.enable_pressure);
        let (width, height) = tracker.surface().size();
        tracing::debug!(
            width,
            height,
            active = engine.state().is_active(),
            "ink overlay mounted"
        );
        Self {
            tracker,
            engine,
            quick_colors: settings.quick_colors.clone(),
        }
    }

    /// Releases every host observer. The overlay state is dropped with `self`.
    pub fn unmount<H: HostContainer + ?Sized>(self, host: &mut H) {
        self.tracker.unmount(host);
        tracing::debug!("ink overlay unmounted");
    }

    pub fn pump_resizes<H: HostContainer + ?Sized>(&mut self, host: &H) -> usize {
        self.tracker.pump(host)
    }

    pub fn synchronize_dimensions<H: HostContainer + ?Sized>(&mut self, host: &H) -> bool {
        self.tracker.synchronize_dimensions(host)
    }

    pub fn pointer_down<H: HostContainer + ?Sized>(
        &mut self,
        host: &H,
        sample: &PointerSample,
    ) -> bool {
        self.tracker.pump(host);
        let origin = host.client_origin();
        let target = self
            .tracker
            .drawable_mut()
            .map(|surface| DrawTarget { surface, origin });
        let captured = self.engine.on_pointer_down(target, sample);
        if captured {
            tracing::trace!(
                pointer = sample.pointer_id.0,
                tool = ?self.engine.state().current_tool(),
                "stroke started"
            );
        }
        captured
    }

    pub fn pointer_move<H: HostContainer + ?Sized>(
        &mut self,
        host: &H,
        sample: &PointerSample,
    ) -> Option<DrawnSegment> {
        self.tracker.pump(host);
        let origin = host.client_origin();
        let target = self
            .tracker
            .drawable_mut()
            .map(|surface| DrawTarget { surface, origin });
        self.engine.on_pointer_move(target, sample)
    }

    pub fn pointer_up(&mut self, sample: &PointerSample) -> bool {
        self.engine.on_pointer_up(sample)
    }

    pub fn pointer_cancel(&mut self, pointer_id: PointerId) -> bool {
        self.engine.on_pointer_cancel(pointer_id)
    }

    /// Whether the host should route `sample` to the overlay rather than the content
    /// beneath. A captured pointer is routed here even outside the bounds.
    pub fn wants_pointer(&self, sample: &PointerSample, inside_bounds: bool) -> bool {
        if self.engine.captured_pointer() == Some(sample.pointer_id) {
            return true;
        }
        self.engine.state().is_active() && inside_bounds
    }

    pub fn apply(&mut self, command: ToolbarCommand) {
        match command {
            ToolbarCommand::ToggleActive => {
                self.toggle_active();
            }
            ToolbarCommand::SelectTool(tool) => self.select_tool(tool),
            ToolbarCommand::SetColor(color) => self.set_color(color),
            ToolbarCommand::QuickColor(index) => {
                if let Some(color) = self.quick_colors.get(index).copied() {
                    self.set_color(color);
                }
            }
            ToolbarCommand::SetSize(size) => {
                self.set_size(size);
            }
        }
    }

    pub fn toggle_active(&mut self) -> bool {
        let active = self.engine.toggle_active();
        tracing::debug!(active, "ink overlay toggled");
        active
    }

    pub fn select_tool(&mut self, tool: Tool) {
        self.engine.select_tool(tool);
        tracing::debug!(?tool, "ink tool selected");
    }

    pub fn set_color(&mut self, color: Rgb) {
        self.engine.set_color(color);
        tracing::debug!(color = %color, "ink color changed");
    }

    pub fn set_size(&mut self, size: u32) -> u32 {
        let stored = self.engine.set_size(size);
        tracing::debug!(
            tool = ?self.engine.state().current_tool(),
            requested = size,
            stored,
            "ink size changed"
        );
        stored
    }

    pub fn state(&self) -> &OverlayState {
        self.engine.state()
    }

    pub fn surface(&self) -> &RasterSurface {
        self.tracker.surface()
    }

    pub fn resize_count(&self) -> u64 {
        self.tracker.resize_count()
    }

    pub fn captured_pointer(&self) -> Option<PointerId> {
        self.engine.captured_pointer()
    }

    pub fn quick_colors(&self) -> &[Rgb] {
        &self.quick_colors
    }

    pub fn input_policy(&self) -> InputPolicy {
        InputPolicy::for_active(self.engine.state().is_active())
    }

    pub fn toolbar_view(&self) -> ToolbarView {
        ToolbarView::from_state(self.engine.state(), &self.quick_colors)
    }
}
