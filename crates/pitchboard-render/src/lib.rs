//! Pitchboard Render Library
//!
//! Renderer abstraction for the tactics board: pitch markings, token
//! glyphs and the drag preview. The bundled backend writes SVG.

mod field;
mod paint;
mod renderer;
mod svg;

pub use field::{grid, markings};
pub use paint::{GlyphDescription, Paint, Primitive, glyph_primitives};
pub use renderer::{DragPreview, GridStyle, RenderContext, RenderError, RenderResult, Renderer};
pub use svg::SvgRenderer;
