// GB/T 9704-2012 layout values shared by the preview and export renderers.
// Both read this one table; neither carries its own copy of a constant.

pub mod spec;

// Re-export the public API consumed by other modules (renderers, state).
pub use spec::{gb9704_2012, FontFamily, LayoutSpec};
