pub mod draw;
pub mod logging;

#[cfg(feature = "gui")]
pub mod gui;

pub use draw::{InkOverlay, OverlaySettings, PointerSample, Tool};
