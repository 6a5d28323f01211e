use crate::draw::model::{Rgb, Tool};

/// Pressure reported by devices that have no pressure sensor.
pub const PRESSURE_UNKNOWN: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompositeMode {
    /// Paint over existing pixels.
    #[default]
    SourceOver,
    /// Remove existing pixels where the stroke covers them.
    DestinationOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidthSource {
    Fixed,
    PressureModulated,
}

/// Per-tool rendering parameters, applied once when a stroke starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolRender {
    pub opacity: f32,
    pub composite: CompositeMode,
    pub width: WidthSource,
}

impl Tool {
    pub const fn render(self) -> ToolRender {
        match self {
            Tool::Pen => ToolRender {
                opacity: 1.0,
                composite: CompositeMode::SourceOver,
                width: WidthSource::Fixed,
            },
            Tool::Pencil => ToolRender {
                opacity: 1.0,
                composite: CompositeMode::SourceOver,
                width: WidthSource::PressureModulated,
            },
            // Full opacity on purpose: a translucent highlighter reads badly on dark hosts.
            Tool::Marker => ToolRender {
                opacity: 1.0,
                composite: CompositeMode::SourceOver,
                width: WidthSource::Fixed,
            },
            Tool::Eraser => ToolRender {
                opacity: 1.0,
                composite: CompositeMode::DestinationOut,
                width: WidthSource::Fixed,
            },
        }
    }
}

/// Width for one segment. `None` pressure, the "unknown" marker and zero all mean
/// no pressure signal, in which case the configured size is kept as-is.
pub fn pressure_width(base: f32, pressure: Option<f32>) -> Option<f32> {
    let pressure = pressure?;
    if !pressure.is_finite() || pressure <= 0.0 || pressure == PRESSURE_UNKNOWN {
        return None;
    }
    Some(base * (0.5 + pressure.min(1.0)))
}

/// Drawing state of a raster surface, equivalent to a 2D canvas context.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeContext {
    pub color: Rgb,
    pub line_width: f32,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
    pub global_alpha: f32,
    pub composite: CompositeMode,
}

impl Default for StrokeContext {
    fn default() -> Self {
        Self {
            color: Rgb::BLACK,
            line_width: 1.0,
            line_cap: LineCap::default(),
            line_join: LineJoin::default(),
            global_alpha: 1.0,
            composite: CompositeMode::default(),
        }
    }
}

impl StrokeContext {
    pub fn configure_for(&mut self, tool: Tool, color: Rgb, size: u32) {
        let render = tool.render();
        self.color = color;
        self.line_width = size as f32;
        self.line_cap = LineCap::Round;
        self.line_join = LineJoin::Round;
        self.global_alpha = render.opacity;
        self.composite = render.composite;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirtyRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl DirtyRect {
    pub fn from_points(a: (f32, f32), b: (f32, f32), pad: i32) -> Self {
        let min_x = (a.0.min(b.0).floor() as i32).saturating_sub(pad);
        let max_x = (a.0.max(b.0).ceil() as i32).saturating_add(pad);
        let min_y = (a.1.min(b.1).floor() as i32).saturating_sub(pad);
        let max_y = (a.1.max(b.1).ceil() as i32).saturating_add(pad);
        Self {
            x: min_x,
            y: min_y,
            width: max_x.saturating_sub(min_x).saturating_add(1).max(1),
            height: max_y.saturating_sub(min_y).saturating_add(1).max(1),
        }
    }

    pub fn union(self, other: DirtyRect) -> DirtyRect {
        let min_x = self.x.min(other.x);
        let min_y = self.y.min(other.y);
        let max_x = self.right().max(other.right());
        let max_y = self.bottom().max(other.bottom());
        DirtyRect {
            x: min_x,
            y: min_y,
            width: max_x.saturating_sub(min_x).max(1),
            height: max_y.saturating_sub(min_y).max(1),
        }
    }

    pub fn clamp(self, width: u32, height: u32) -> Option<DirtyRect> {
        let max_w = width as i32;
        let max_h = height as i32;
        let x0 = self.x.clamp(0, max_w);
        let y0 = self.y.clamp(0, max_h);
        let x1 = self.right().clamp(0, max_w);
        let y1 = self.bottom().clamp(0, max_h);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(DirtyRect {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: y1 - y0,
        })
    }

    pub fn contains(self, point: (i32, i32)) -> bool {
        point.0 >= self.x && point.0 < self.right() && point.1 >= self.y && point.1 < self.bottom()
    }

    fn right(self) -> i32 {
        self.x.saturating_add(self.width)
    }

    fn bottom(self) -> i32 {
        self.y.saturating_add(self.height)
    }
}

/// Strokes one line segment into premultiplied RGBA8 `pixels` using `ctx`.
///
/// Coverage is anti-aliased over one pixel around the stroke outline, sampled at
/// pixel centers. Returns the pixel rectangle that was touched.
pub fn stroke_segment(
    pixels: &mut [u8],
    width: u32,
    height: u32,
    ctx: &StrokeContext,
    start: (f32, f32),
    end: (f32, f32),
) -> Option<DirtyRect> {
    if width == 0 || height == 0 || pixels.len() < (width as usize * height as usize * 4) {
        return None;
    }
    let line_width = ctx.line_width;
    if !line_width.is_finite() || line_width <= 0.0 {
        return None;
    }
    let alpha = ctx.global_alpha.clamp(0.0, 1.0);
    if alpha <= 0.0 {
        return None;
    }

    if ![start.0, start.1, end.0, end.1].iter().all(|v| v.is_finite()) {
        return None;
    }

    let radius = line_width / 2.0;
    let capped = matches!(ctx.line_cap, LineCap::Round);
    if !capped && start == end {
        return None;
    }

    let pad = radius.ceil() as i32 + 1;
    let clip = DirtyRect::from_points(start, end, pad).clamp(width, height)?;

    let mut touched: Option<DirtyRect> = None;
    for y in clip.y..(clip.y + clip.height) {
        let row_base = (y as usize) * (width as usize) * 4;
        for x in clip.x..(clip.x + clip.width) {
            let center = (x as f32 + 0.5, y as f32 + 0.5);
            let Some(distance) = segment_distance(center, start, end, capped) else {
                continue;
            };
            let coverage = (radius + 0.5 - distance).clamp(0.0, 1.0);
            if coverage <= 0.0 {
                continue;
            }
            let idx = row_base + (x as usize) * 4;
            composite_pixel(
                &mut pixels[idx..idx + 4],
                ctx.color,
                coverage * alpha,
                ctx.composite,
            );
            let px = DirtyRect {
                x,
                y,
                width: 1,
                height: 1,
            };
            touched = Some(touched.map_or(px, |rect| rect.union(px)));
        }
    }
    touched
}

/// Distance from `point` to the segment. Without caps, points projecting past either
/// end are outside the stroke.
fn segment_distance(
    point: (f32, f32),
    start: (f32, f32),
    end: (f32, f32),
    capped: bool,
) -> Option<f32> {
    let vx = end.0 - start.0;
    let vy = end.1 - start.1;
    let wx = point.0 - start.0;
    let wy = point.1 - start.1;
    let len_sq = vx * vx + vy * vy;
    if len_sq <= f32::EPSILON {
        return Some((wx * wx + wy * wy).sqrt());
    }
    let t = (wx * vx + wy * vy) / len_sq;
    if !capped && !(0.0..=1.0).contains(&t) {
        return None;
    }
    let t = t.clamp(0.0, 1.0);
    let dx = point.0 - (start.0 + vx * t);
    let dy = point.1 - (start.1 + vy * t);
    Some((dx * dx + dy * dy).sqrt())
}

fn composite_pixel(dst: &mut [u8], color: Rgb, src_alpha: f32, mode: CompositeMode) {
    let keep = 1.0 - src_alpha;
    match mode {
        CompositeMode::SourceOver => {
            let over = |src: u8, dst: u8| -> u8 {
                (src as f32 * src_alpha + dst as f32 * keep)
                    .round()
                    .clamp(0.0, 255.0) as u8
            };
            dst[0] = over(color.r, dst[0]);
            dst[1] = over(color.g, dst[1]);
            dst[2] = over(color.b, dst[2]);
            dst[3] = over(255, dst[3]);
        }
        CompositeMode::DestinationOut => {
            for channel in dst.iter_mut() {
                *channel = (*channel as f32 * keep).round().clamp(0.0, 255.0) as u8;
            }
        }
    }
}
