//! Core module: dataset, scales, chart layout and report rendering

pub mod chart;
pub mod dataset;
pub mod report;
pub mod scale;

/// Returns the current version of the `dopingplot` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
