// Template Rendering Engine.
// Layout is pure and CPU-bound: handlers run it inside tokio::task::spawn_blocking.

pub mod flow;
pub mod font_metrics;
pub mod model;
pub mod pdf;
pub mod templates;
pub mod theme;

pub use model::RenderedDocument;
pub use pdf::{to_pdf, RenderError};
pub use templates::TemplateVariant;
