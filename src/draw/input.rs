use crate::draw::model::{Rgb, Tool};
use crate::draw::render::{
    pressure_width, CompositeMode, DirtyRect, WidthSource, PRESSURE_UNKNOWN,
};
use crate::draw::state::OverlayState;
use crate::draw::surface::RasterSurface;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointerId(pub u32);

/// Button mask as reported with each pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerButtons(pub u8);

impl PointerButtons {
    pub const NONE: Self = Self(0);
    pub const PRIMARY: Self = Self(1);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub pointer_id: PointerId,
    /// Client-space position in device pixels.
    pub client: (f32, f32),
    /// 0..=1, where 0.5 means the device cannot report pressure.
    pub pressure: f32,
    pub buttons: PointerButtons,
}

impl PointerSample {
    /// A primary-button sample without pressure information.
    pub fn primary(pointer_id: PointerId, x: f32, y: f32) -> Self {
        Self {
            pointer_id,
            client: (x, y),
            pressure: PRESSURE_UNKNOWN,
            buttons: PointerButtons::PRIMARY,
        }
    }

    pub fn with_pressure(mut self, pressure: f32) -> Self {
        self.pressure = pressure;
        self
    }

    pub fn with_buttons(mut self, buttons: PointerButtons) -> Self {
        self.buttons = buttons;
        self
    }
}

/// Surface to draw into plus its on-screen origin in client space.
#[derive(Debug)]
pub struct DrawTarget<'a> {
    pub surface: &'a mut RasterSurface,
    pub origin: (f32, f32),
}

impl DrawTarget<'_> {
    /// Buffer-local position, or `None` when either coordinate is not finite.
    fn to_local(&self, client: (f32, f32)) -> Option<(f32, f32)> {
        let local = (client.0 - self.origin.0, client.1 - self.origin.1);
        (local.0.is_finite() && local.1.is_finite()).then_some(local)
    }
}

/// One segment rendered by a pointer move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawnSegment {
    pub from: (f32, f32),
    pub to: (f32, f32),
    pub width: f32,
    pub composite: CompositeMode,
    pub dirty: Option<DirtyRect>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ActiveStroke {
    pointer: PointerId,
    tool: Tool,
    last: (f32, f32),
    base_size: u32,
    generation: u64,
}

/// Pointer state machine that turns samples into segments on a [`RasterSurface`].
///
/// At most one pointer owns input at a time. The stroke holding capture keeps the
/// tool it started with; a surface resize under it stops it from drawing further.
#[derive(Debug, Clone)]
pub struct InkEngine {
    state: OverlayState,
    pressure_enabled: bool,
    stroke: Option<ActiveStroke>,
}

impl Default for InkEngine {
    fn default() -> Self {
        Self::new(OverlayState::default(), true)
    }
}

impl InkEngine {
    pub fn new(state: OverlayState, pressure_enabled: bool) -> Self {
        Self {
            state,
            pressure_enabled,
            stroke: None,
        }
    }

    pub fn state(&self) -> &OverlayState {
        &self.state
    }

    pub fn pressure_enabled(&self) -> bool {
        self.pressure_enabled
    }

    pub fn captured_pointer(&self) -> Option<PointerId> {
        self.stroke.map(|stroke| stroke.pointer)
    }

    pub fn toggle_active(&mut self) -> bool {
        self.state.toggle_active()
    }

    pub fn select_tool(&mut self, tool: Tool) {
        self.state.select_tool(tool);
    }

    pub fn set_color(&mut self, color: Rgb) {
        self.state.set_color(color);
    }

    pub fn set_size(&mut self, size: u32) -> u32 {
        self.state.set_size(size)
    }

    /// Starts a stroke and captures `sample.pointer_id`. Returns whether capture was taken.
    ///
    /// Ignored while inactive, without a drawable surface, for non-finite positions,
    /// or while another pointer holds capture. A repeated down from the capturing pointer restarts the stroke.
    pub fn on_pointer_down(&mut self, target: Option<DrawTarget<'_>>, sample: &PointerSample) -> bool {
        if !self.state.is_active() {
            return false;
        }
        let Some(target) = target else {
            return false;
        };
        if !target.surface.is_drawable() {
            return false;
        }
        if matches!(self.stroke, Some(stroke) if stroke.pointer != sample.pointer_id) {
            return false;
        }
        let Some(start) = target.to_local(sample.client) else {
            return false;
        };

        let tool = self.state.current_tool();
        let base_size = self.state.current_size();
        target
            .surface
            .context_mut()
            .configure_for(tool, self.state.color(), base_size);

        self.stroke = Some(ActiveStroke {
            pointer: sample.pointer_id,
            tool,
            last: start,
            base_size,
            generation: target.surface.generation(),
        });
        true
    }

    /// Draws from the last position to this sample. `None` when the sample is ignored.
    pub fn on_pointer_move(
        &mut self,
        target: Option<DrawTarget<'_>>,
        sample: &PointerSample,
    ) -> Option<DrawnSegment> {
        if !self.state.is_active() || sample.buttons != PointerButtons::PRIMARY {
            return None;
        }
        let target = target?;
        let stroke = self.stroke.as_mut()?;
        if stroke.pointer != sample.pointer_id
            || stroke.generation != target.surface.generation()
            || !target.surface.is_drawable()
        {
            return None;
        }

        let to = target.to_local(sample.client)?;
        let ctx = target.surface.context_mut();
        if self.pressure_enabled && stroke.tool.render().width == WidthSource::PressureModulated {
            if let Some(width) = pressure_width(stroke.base_size as f32, Some(sample.pressure)) {
                ctx.line_width = width;
            }
        }
        let width = ctx.line_width;
        let composite = ctx.composite;

        let from = stroke.last;
        let dirty = target.surface.stroke_line(from, to);
        stroke.last = to;
        Some(DrawnSegment {
            from,
            to,
            width,
            composite,
            dirty,
        })
    }

    /// Ends the stroke owned by `sample.pointer_id`, wherever the release happened.
    /// Returns whether capture was released.
    pub fn on_pointer_up(&mut self, sample: &PointerSample) -> bool {
        self.release(sample.pointer_id)
    }

    /// The host took capture away (cancel, lost capture). Same as a release.
    pub fn on_pointer_cancel(&mut self, pointer_id: PointerId) -> bool {
        self.release(pointer_id)
    }

    fn release(&mut self, pointer_id: PointerId) -> bool {
        match self.stroke {
            Some(stroke) if stroke.pointer == pointer_id => {
                self.stroke = None;
                true
            }
            _ => false,
        }
    }
}
