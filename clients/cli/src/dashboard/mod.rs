//! Dashboard view: escaped markup, page regions and region renderers

pub mod markup;
pub mod page;
pub mod render;

// Re-export main types and functions for external use
pub use markup::Markup;
pub use page::{Page, RegionId, ViewError};
pub use render::{render_dapps, render_incidents, render_rpc};
