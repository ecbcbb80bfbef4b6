//! Visualization generators for reports
//!
//! Serializes the laid-out chart into markup that report formats embed.

pub mod svg;

pub use svg::SvgChartWriter;
