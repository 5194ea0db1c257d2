//! Treemap layout engine for the Carbonview dashboard framework.
//!
//! Maps a weighted tree onto an area-proportional partition of a pixel
//! rectangle using squarified tiling, with configurable padding and
//! label-visibility thresholds.

mod treemap;

pub use treemap::{
    compute_layout, LayoutRect, TreemapCell, TreemapConfig, TreemapLayout, TreemapNode,
};
