use crate::draw::render::{stroke_segment, DirtyRect, LineCap, LineJoin, StrokeContext};
use slab::Slab;
use std::sync::mpsc::{channel, Receiver, Sender};

/// What caused a dimension sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeSource {
    Mount,
    Viewport,
    Container,
    /// An explicit `synchronize_dimensions` call.
    Manual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeNotice {
    pub source: ResizeSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverKey(pub usize);

/// The element the overlay sits on. Sizes and origins are in device pixels.
pub trait HostContainer {
    fn client_size(&self) -> (u32, u32);

    /// On-screen position of the container's top-left corner, in the same space as
    /// pointer client coordinates.
    fn client_origin(&self) -> (f32, f32);

    /// Registers `notify` for `source` resize notifications (`Viewport` or `Container`).
    fn observe(&mut self, source: ResizeSource, notify: Sender<ResizeNotice>) -> ObserverKey;

    fn unobserve(&mut self, key: ObserverKey) -> bool;
}

/// Pixel buffer plus its drawing context. Changing the dimensions discards every
/// pixel and resets the context, the same way a 2D canvas does.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterSurface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    context: StrokeContext,
    generation: u64,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; buffer_len(width, height)],
            context: StrokeContext::default(),
            generation: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn is_drawable(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Premultiplied RGBA8, row-major.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + x as usize) * 4;
        let mut px = [0; 4];
        px.copy_from_slice(&self.pixels[idx..idx + 4]);
        Some(px)
    }

    pub fn context(&self) -> &StrokeContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut StrokeContext {
        &mut self.context
    }

    /// Bumped by every resize; strokes started under an older generation are dead.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Resizes the buffer. Pixels are cleared and the context falls back to defaults.
    pub fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels = vec![0; buffer_len(width, height)];
        self.context = StrokeContext::default();
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn stroke_line(&mut self, start: (f32, f32), end: (f32, f32)) -> Option<DirtyRect> {
        stroke_segment(
            &mut self.pixels,
            self.width,
            self.height,
            &self.context,
            start,
            end,
        )
    }
}

fn buffer_len(width: u32, height: u32) -> usize {
    (width as usize)
        .saturating_mul(height as usize)
        .saturating_mul(4)
}

/// Keeps a [`RasterSurface`] the same size as its host container.
#[derive(Debug)]
pub struct SurfaceTracker {
    surface: RasterSurface,
    observers: Vec<ObserverKey>,
    notices: Receiver<ResizeNotice>,
    resize_count: u64,
}

impl SurfaceTracker {
    /// Registers viewport and container observers on `host` and performs the initial sync.
    pub fn mount<H: HostContainer + ?Sized>(host: &mut H) -> Self {
        let (tx, rx) = channel();
        let observers = vec![
            host.observe(ResizeSource::Viewport, tx.clone()),
            host.observe(ResizeSource::Container, tx),
        ];
        let mut tracker = Self {
            surface: RasterSurface::new(0, 0),
            observers,
            notices: rx,
            resize_count: 0,
        };
        tracker.sync_from(&*host, ResizeSource::Mount);
        tracker
    }

    /// Matches the buffer to the host's client size. Returns whether a resize happened;
    /// calling it again with unchanged dimensions is a no-op.
    pub fn synchronize_dimensions<H: HostContainer + ?Sized>(&mut self, host: &H) -> bool {
        self.sync_from(host, ResizeSource::Manual)
    }

    fn sync_from<H: HostContainer + ?Sized>(&mut self, host: &H, source: ResizeSource) -> bool {
        let (width, height) = host.client_size();
        if self.surface.size() == (width, height) {
            return false;
        }

        self.surface.set_size(width, height);
        let ctx = self.surface.context_mut();
        ctx.line_cap = LineCap::Round;
        ctx.line_join = LineJoin::Round;
        self.resize_count += 1;
        tracing::debug!(width, height, ?source, "overlay surface resized");
        true
    }

    /// Handles every queued resize notification. Returns how many of them resized the buffer.
    pub fn pump<H: HostContainer + ?Sized>(&mut self, host: &H) -> usize {
        let mut resized = 0;
        while let Ok(notice) = self.notices.try_recv() {
            if self.sync_from(host, notice.source) {
                resized += 1;
            }
        }
        resized
    }

    /// Releases every observer registered at mount.
    pub fn unmount<H: HostContainer + ?Sized>(mut self, host: &mut H) {
        for key in self.observers.drain(..) {
            if !host.unobserve(key) {
                tracing::warn!(?key, "overlay resize observer was already released");
            }
        }
    }

    pub fn surface(&self) -> &RasterSurface {
        &self.surface
    }

    /// The surface, when it has pixels to draw into.
    pub fn drawable_mut(&mut self) -> Option<&mut RasterSurface> {
        if self.surface.is_drawable() {
            Some(&mut self.surface)
        } else {
            None
        }
    }

    pub fn resize_count(&self) -> u64 {
        self.resize_count
    }
}

/// In-memory [`HostContainer`] for embedders that track layout themselves.
#[derive(Debug, Default)]
pub struct BoxHost {
    size: (u32, u32),
    origin: (f32, f32),
    observers: Slab<(ResizeSource, Sender<ResizeNotice>)>,
}

impl BoxHost {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            ..Self::default()
        }
    }

    pub fn set_origin(&mut self, x: f32, y: f32) {
        self.origin = (x, y);
    }

    /// Applies a new box size and notifies container observers when it changed.
    pub fn resize_container(&mut self, width: u32, height: u32) {
        if self.size == (width, height) {
            return;
        }
        self.size = (width, height);
        self.notify(ResizeSource::Container);
    }

    /// Signals a viewport resize. The box keeps its size unless the caller also resizes it.
    pub fn viewport_resized(&mut self) {
        self.notify(ResizeSource::Viewport);
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    fn notify(&mut self, source: ResizeSource) {
        let mut closed = Vec::new();
        for (key, (kind, tx)) in self.observers.iter() {
            if *kind == source && tx.send(ResizeNotice { source }).is_err() {
                closed.push(key);
            }
        }
        for key in closed {
            self.observers.remove(key);
        }
    }
}

impl HostContainer for BoxHost {
    fn client_size(&self) -> (u32, u32) {
        self.size
    }

    fn client_origin(&self) -> (f32, f32) {
        self.origin
    }

    fn observe(&mut self, source: ResizeSource, notify: Sender<ResizeNotice>) -> ObserverKey {
        ObserverKey(self.observers.insert((source, notify)))
    }

    fn unobserve(&mut self, key: ObserverKey) -> bool {
        self.observers.try_remove(key.0).is_some()
    }
}
