//! Chart definitions and rendering
//!
//! - `spec.rs`: the five chart kinds, their labels and prepared data
//! - `render.rs`: plotters drawing for PNG and SVG output

pub mod render;
pub mod spec;

pub use render::render_chart;
pub use spec::{ChartData, ChartKind, ChartResult, ChartSpec};
