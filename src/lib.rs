//! Library behind `dopingplot`
//! Loads the cyclist dataset, lays out the doping scatterplot and renders it as HTML, SVG or Markdown.

pub mod config;
pub mod core;
pub mod logger;

pub use crate::core::get_version;
