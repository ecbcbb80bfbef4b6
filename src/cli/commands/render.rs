//! Render and summary command handlers
//!
//! Loads the cyclist dataset, lays out the scatterplot and writes it in the
//! requested format.

use doping_plot::config::Config;
use doping_plot::core::chart::{ChartStyle, ScatterPlot};
use doping_plot::core::dataset::{Dataset, DatasetSource};
use doping_plot::core::report::{
    ChartSummary, HtmlReporter, MarkdownReporter, ReportContext, ReportFormat, ReportGenerator,
    SvgReporter,
};
use doping_plot::{error, info, verbose};
use std::path::PathBuf;

/// Base name of the default output file
const DEFAULT_OUTPUT_STEM: &str = "cyclists_scatterplot";

/// Arguments of the render command
#[derive(Debug, Clone)]
pub struct RenderRequest {
    /// Dataset path or URL, config `url` when absent
    pub source: Option<String>,
    /// Output file, `<reports_dir>/cyclists_scatterplot.<ext>` when absent
    pub output: Option<PathBuf>,
    /// Output format
    pub format: ReportFormat,
    /// Canvas width override
    pub width: Option<f64>,
    /// Canvas height override
    pub height: Option<f64>,
    /// Title override
    pub title: Option<String>,
}

impl RenderRequest {
    /// Chart style from config with this run's overrides applied
    fn style(&self, config: &Config) -> ChartStyle {
        let mut style = config.chart.clone();
        if let Some(width) = self.width {
            style.width = width;
        }
        if let Some(height) = self.height {
            style.height = height;
        }
        if let Some(title) = &self.title {
            style.title.clone_from(title);
        }
        style
    }
}

/// Run the render command
///
/// # Errors
/// Returns a printable message if loading, layout, rendering or writing fails
pub fn run(request: &RenderRequest, config: &Config) -> Result<(), String> {
    let source = resolve_source(request.source.as_deref(), config)?;
    let dataset = load_dataset(&source)?;
    let style = request.style(config);

    let plot = ScatterPlot::build(&dataset, &style).map_err(|e| {
        error!("Chart layout failed for {source}: {e}");
        format!("✗ Failed to lay out chart: {e}")
    })?;
    let (doping, clean) = plot.category_counts();
    verbose!(
        "Plotted {} dots: {doping} with allegations, {clean} without",
        plot.dots.len()
    );
    let summary = ChartSummary::from_dataset(&dataset)
        .ok_or_else(|| "✗ Dataset is empty, nothing to plot".to_string())?;

    let output_path = request.output.clone().unwrap_or_else(|| {
        PathBuf::from(&config.paths.reports_dir)
            .join(format!("{DEFAULT_OUTPUT_STEM}.{}", request.format.extension()))
    });

    let source_label = source.to_string();
    let ctx = ReportContext::new(&dataset, &plot, &summary, &source_label);
    let reporter: Box<dyn ReportGenerator> = match request.format {
        ReportFormat::Html => Box::new(HtmlReporter::new()),
        ReportFormat::Svg => Box::new(SvgReporter::new()),
        ReportFormat::Markdown => Box::new(MarkdownReporter::new()),
    };
    reporter.generate(&ctx, &output_path).map_err(|e| {
        error!(
            "Writing {} report to {} failed: {e}",
            request.format,
            output_path.display()
        );
        format!("✗ Failed to generate {} report: {e}", request.format)
    })?;

    println!("✓ Chart generated: {}", output_path.display());
    info!("Chart exported to: {}", output_path.display());
    print_summary(&summary);
    Ok(())
}

/// Run the summary command
///
/// # Errors
/// Returns a printable message if the dataset cannot be loaded or is empty
pub fn summary(source: Option<&str>, config: &Config) -> Result<(), String> {
    let source = resolve_source(source, config)?;
    let dataset = load_dataset(&source)?;
    let summary = ChartSummary::from_dataset(&dataset)
        .ok_or_else(|| format!("✗ Dataset {source} has no records"))?;
    print_summary(&summary);
    Ok(())
}

fn resolve_source(source: Option<&str>, config: &Config) -> Result<DatasetSource, String> {
    source
        .map(str::to_string)
        .or_else(|| (!config.dataset.url.is_empty()).then(|| config.dataset.url.clone()))
        .map(|s| DatasetSource::parse(&s))
        .ok_or_else(|| {
            "✗ No dataset given. Pass SOURCE or run `dopingplot config set url <URL>`".to_string()
        })
}

fn load_dataset(source: &DatasetSource) -> Result<Dataset, String> {
    verbose!("Loading dataset from {source}");
    let dataset = Dataset::load(source).map_err(|e| {
        error!("Dataset load failed: {e}");
        format!("✗ Failed to load dataset: {e}")
    })?;
    info!("Dataset loaded: {} records from {source}", dataset.len());
    Ok(dataset)
}

fn print_summary(summary: &ChartSummary) {
    println!("\n=== Summary ===");
    println!("Climbs: {}", summary.record_count);
    println!("Years: {}-{}", summary.first_year, summary.last_year);
    println!(
        "Fastest: {} ({}, {})",
        summary.fastest.time, summary.fastest.name, summary.fastest.year
    );
    println!(
        "Slowest: {} ({}, {})",
        summary.slowest.time, summary.slowest.name, summary.slowest.year
    );
    println!(
        "Doping allegations: {} of {} ({:.1}%)",
        summary.with_allegations,
        summary.record_count,
        summary.allegation_share()
    );
}
