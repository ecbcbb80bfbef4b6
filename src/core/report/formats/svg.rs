//! SVG report generator
//!
//! Writes the chart as a standalone SVG document. Viewers show each dot's
//! `<title>` as a native tooltip, so the file needs no script.

use crate::core::report::visualization::SvgChartWriter;
use crate::core::report::{ReportContext, ReportGenerator};
use std::error::Error;

/// Standalone SVG generator
pub struct SvgReporter;

impl SvgReporter {
    /// Create a new SVG reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for SvgReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SvgReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(SvgChartWriter::standalone().write(ctx.plot))
    }
}
