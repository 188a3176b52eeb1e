//! StrokeInk Render Library
//!
//! Draws StrokeInk documents onto an abstract 2D surface. Ships a command
//! recorder and an SVG writer as reference surfaces.

mod recording;
mod renderer;
mod surface;
mod svg;
mod viewer;

pub use recording::{DrawCommand, RecordingSurface};
pub use renderer::{RenderResult, Renderer, RendererError};
pub use surface::{CompositeMode, DrawingSurface};
pub use svg::SvgSurface;
pub use viewer::SurfaceViewer;
