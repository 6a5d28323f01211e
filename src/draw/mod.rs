pub mod input;
pub mod model;
pub mod overlay;
pub mod render;
pub mod settings;
pub mod settings_store;
pub mod state;
pub mod surface;
pub mod toolbar;

pub use input::{DrawnSegment, InkEngine, PointerButtons, PointerId, PointerSample};
pub use model::{Rgb, Tool};
pub use overlay::InkOverlay;
pub use settings::OverlaySettings;
pub use surface::{BoxHost, HostContainer, RasterSurface, SurfaceTracker};
