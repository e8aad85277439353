// Page layout: size classification, ordering and page batching.
// Pure and synchronous; handlers call it inline.

pub mod batcher;
pub mod handlers;
pub mod page_fill;
pub mod planner;
pub mod size_class;
pub mod sorter;

// Re-export the public API consumed by handlers, the renderer and the CLI.
pub use planner::{plan_pages, PagePlan};
pub use size_class::LayoutError;
