//! Report generation for the scatterplot
//!
//! This module renders a laid-out [`ScatterPlot`] in several formats
//! (interactive HTML, standalone SVG, Markdown summary).

pub mod formats;
pub mod summary;
pub mod visualization;

use crate::core::chart::ScatterPlot;
use crate::core::dataset::Dataset;
use std::error::Error;
use std::path::Path;

pub use formats::{HtmlReporter, MarkdownReporter, ReportFormat, SvgReporter};
pub use summary::ChartSummary;
pub use visualization::SvgChartWriter;

/// Data context for report generation
///
/// Aggregates everything a format needs, so each reporter renders from a
/// single source.
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    /// Records being plotted
    pub dataset: &'a Dataset,
    /// Laid-out chart
    pub plot: &'a ScatterPlot,
    /// Summary statistics
    pub summary: &'a ChartSummary,
    /// Where the dataset came from (path or URL)
    pub source: &'a str,
}

impl<'a> ReportContext<'a> {
    /// Create a new report context
    #[must_use]
    pub const fn new(
        dataset: &'a Dataset,
        plot: &'a ScatterPlot,
        summary: &'a ChartSummary,
        source: &'a str,
    ) -> Self {
        Self {
            dataset,
            plot,
            summary,
            source,
        }
    }

    /// Chart title
    #[must_use]
    pub fn title(&self) -> &str {
        &self.plot.title.text
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report to a file
    ///
    /// # Errors
    /// Returns an error if rendering or writing the file fails
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let content = self.render(ctx)?;
        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(output_path, content)?;
        Ok(())
    }

    /// Generate report content as a string
    ///
    /// # Errors
    /// Returns an error if rendering fails
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>>;
}
