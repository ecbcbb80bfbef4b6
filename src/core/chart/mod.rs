//! Scatterplot scene
//!
//! [`ScatterPlot::build`] turns a [`Dataset`] and a [`ChartStyle`] into a
//! fully positioned scene: title, both axes with their ticks, one dot per
//! record and the legend. Output formats only serialize this scene.

pub mod tooltip;

pub use tooltip::{TooltipContent, TooltipGeometry, TooltipPlacement};

use crate::core::dataset::{Allegation, Dataset};
use crate::core::scale::{Palette, RaceTimeScale, Tick, YearScale};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while laying out the chart
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    /// No records, so no extent to scale
    #[error("dataset is empty, nothing to plot")]
    EmptyDataset,
    /// Margins leave no room for the plot area
    #[error("margins leave no drawing area ({width}x{height} canvas)")]
    NoDrawingArea {
        /// Canvas width
        width: f64,
        /// Canvas height
        height: f64,
    },
}

/// Layout constants of the chart. Serialized as the `[chart]` config section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    /// Title text
    pub title: String,
    /// Canvas width
    pub width: f64,
    /// Canvas height
    pub height: f64,
    /// Space above the plot area (title lives here)
    pub margin_top: f64,
    /// Space right of the plot area
    pub margin_right: f64,
    /// Space below the plot area (x axis and legend live here)
    pub margin_bottom: f64,
    /// Space left of the plot area (y axis lives here)
    pub margin_left: f64,
    /// Dot radius
    pub dot_radius: f64,
    /// Fill for riders with allegations
    pub doping_color: String,
    /// Fill for riders without allegations
    pub clean_color: String,
    /// Horizontal distance between legend items
    pub legend_item_width: f64,
    /// Legend swatch side
    pub swatch_size: f64,
    /// Gap between swatch and label
    pub swatch_spacing: f64,
    /// Tooltip box width
    pub tooltip_width: f64,
    /// Tooltip box height
    pub tooltip_height: f64,
    /// Gap between pointer and tooltip
    pub tooltip_offset: f64,
    /// Approximate tick count on the year axis
    pub x_ticks: usize,
    /// Approximate tick count on the time axis
    pub y_ticks: usize,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            title: "Doping in Professional Bicycle Racing".to_string(),
            width: 960.0,
            height: 600.0,
            margin_top: 100.0,
            margin_right: 50.0,
            margin_bottom: 80.0,
            margin_left: 80.0,
            dot_radius: 5.0,
            doping_color: "blue".to_string(),
            clean_color: "orange".to_string(),
            legend_item_width: 150.0,
            swatch_size: 10.0,
            swatch_spacing: 5.0,
            tooltip_width: 200.0,
            tooltip_height: 100.0,
            tooltip_offset: 20.0,
            x_ticks: 10,
            y_ticks: 10,
        }
    }
}

impl ChartStyle {
    /// Palette built from the two configured colors
    #[must_use]
    pub fn palette(&self) -> Palette {
        Palette::new(self.doping_color.clone(), self.clean_color.clone())
    }

    /// Tooltip box geometry
    #[must_use]
    pub const fn tooltip_geometry(&self) -> TooltipGeometry {
        TooltipGeometry {
            width: self.tooltip_width,
            height: self.tooltip_height,
            offset: self.tooltip_offset,
        }
    }
}

/// Canvas and plot-area dimensions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    /// Canvas width
    pub width: f64,
    /// Canvas height
    pub height: f64,
    /// Left margin, the plot area's x offset
    pub margin_left: f64,
    /// Top margin, the plot area's y offset
    pub margin_top: f64,
    /// Bottom margin
    pub margin_bottom: f64,
    /// Plot area width
    pub chart_width: f64,
    /// Plot area height
    pub chart_height: f64,
}

impl Layout {
    /// Derive the plot area from canvas size and margins
    ///
    /// # Errors
    /// Returns [`ChartError::NoDrawingArea`] when the margins consume the canvas
    /// or any dimension is not a finite number
    pub fn new(style: &ChartStyle) -> Result<Self, ChartError> {
        let chart_width = style.width - style.margin_left - style.margin_right;
        let chart_height = style.height - style.margin_top - style.margin_bottom;
        let usable = |extent: f64| extent > 0.0 && extent.is_finite();
        if !usable(chart_width) || !usable(chart_height) {
            return Err(ChartError::NoDrawingArea {
                width: style.width,
                height: style.height,
            });
        }
        Ok(Self {
            width: style.width,
            height: style.height,
            margin_left: style.margin_left,
            margin_top: style.margin_top,
            margin_bottom: style.margin_bottom,
            chart_width,
            chart_height,
        })
    }
}

/// Positioned title
#[derive(Debug, Clone, PartialEq)]
pub struct Title {
    /// Text
    pub text: String,
    /// Center x, canvas coordinates
    pub x: f64,
    /// Baseline y, canvas coordinates
    pub y: f64,
}

/// Which side of the plot area an axis is drawn on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisSide {
    /// Below the plot area, ticks pointing down
    Bottom,
    /// Left of the plot area, ticks pointing left
    Left,
}

/// Axis with positioned ticks, in plot-area coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    /// Element id (`x-axis` / `y-axis`)
    pub id: &'static str,
    /// Side of the plot area
    pub side: AxisSide,
    /// Length of the domain line
    pub length: f64,
    /// Offset of the axis group inside the plot area
    pub offset: (f64, f64),
    /// Ticks
    pub ticks: Vec<Tick>,
}

/// One plotted record, in plot-area coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct Dot {
    /// Center x
    pub cx: f64,
    /// Center y
    pub cy: f64,
    /// Radius
    pub r: f64,
    /// Fill color
    pub fill: String,
    /// Category of the record
    pub allegation: Allegation,
    /// `data-xvalue`: the year as a date
    pub x_value: String,
    /// `data-yvalue`: the race time as a date-time
    pub y_value: String,
    /// Tooltip for this dot
    pub tooltip: TooltipContent,
    /// Where the tooltip opens, in canvas coordinates, for a pointer on this dot
    pub tooltip_placement: TooltipPlacement,
}

/// One legend entry, in legend-group coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct LegendItem {
    /// Label text
    pub label: &'static str,
    /// Swatch fill
    pub color: String,
    /// Swatch x
    pub swatch_x: f64,
    /// Label x
    pub text_x: f64,
}

/// Legend group
#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    /// Group origin, canvas coordinates
    pub origin: (f64, f64),
    /// Swatch side
    pub swatch_size: f64,
    /// Entries in display order
    pub items: Vec<LegendItem>,
}

/// The complete scatterplot scene
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPlot {
    /// Canvas and plot area
    pub layout: Layout,
    /// Title
    pub title: Title,
    /// Year axis
    pub x_axis: Axis,
    /// Race time axis
    pub y_axis: Axis,
    /// Dots, in dataset order
    pub dots: Vec<Dot>,
    /// Legend
    pub legend: Legend,
    /// Tooltip geometry the interactive output applies
    pub tooltip: TooltipGeometry,
}

impl ScatterPlot {
    /// Lay out the chart for a dataset
    ///
    /// # Errors
    /// Returns an error for an empty dataset or when the margins leave no drawing area
    pub fn build(dataset: &Dataset, style: &ChartStyle) -> Result<Self, ChartError> {
        let layout = Layout::new(style)?;
        let (years, times) = dataset
            .year_extent()
            .zip(dataset.time_extent())
            .ok_or(ChartError::EmptyDataset)?;

        let x_scale = YearScale::new(years, layout.chart_width);
        let y_scale = RaceTimeScale::new(times, layout.chart_height);
        let palette = style.palette();
        let geometry = style.tooltip_geometry();

        let dots = dataset
            .iter()
            .map(|cyclist| {
                let allegation = cyclist.allegation();
                let cx = x_scale.map(cyclist.year);
                let cy = y_scale.map(cyclist.race_time());
                Dot {
                    cx,
                    cy,
                    r: style.dot_radius,
                    fill: palette.color(allegation).to_string(),
                    allegation,
                    x_value: cyclist
                        .year_date()
                        .map_or_else(|| cyclist.year.to_string(), |d| d.format("%Y-%m-%d").to_string()),
                    y_value: cyclist.race_time().as_datetime().map_or_else(
                        || cyclist.race_time().to_string(),
                        |dt| dt.format("%Y-%m-%dT%H:%M:%S").to_string(),
                    ),
                    tooltip: TooltipContent::for_cyclist(cyclist),
                    tooltip_placement: TooltipPlacement::place(
                        (layout.margin_left + cx, layout.margin_top + cy),
                        (layout.width, layout.height),
                        geometry,
                    ),
                }
            })
            .collect();

        crate::debug!(
            "Chart laid out: {} dots, years {}-{}, times {}-{}",
            dataset.len(),
            years.0,
            years.1,
            times.0,
            times.1
        );

        Ok(Self {
            title: Title {
                text: style.title.clone(),
                x: layout.width * 0.5,
                y: layout.margin_top * 0.5,
            },
            x_axis: Axis {
                id: "x-axis",
                side: AxisSide::Bottom,
                length: layout.chart_width,
                offset: (0.0, layout.chart_height),
                ticks: x_scale.ticks(style.x_ticks),
            },
            y_axis: Axis {
                id: "y-axis",
                side: AxisSide::Left,
                length: layout.chart_height,
                offset: (0.0, 0.0),
                ticks: y_scale.ticks(style.y_ticks),
            },
            dots,
            legend: Self::legend(&layout, style, &palette),
            tooltip: geometry,
            layout,
        })
    }

    #[allow(clippy::cast_precision_loss)]
    fn legend(layout: &Layout, style: &ChartStyle, palette: &Palette) -> Legend {
        let items = Allegation::ALL
            .iter()
            .enumerate()
            .map(|(i, &allegation)| {
                let swatch_x = i as f64 * style.legend_item_width;
                LegendItem {
                    label: allegation.label(),
                    color: palette.color(allegation).to_string(),
                    swatch_x,
                    text_x: swatch_x + style.swatch_size + style.swatch_spacing,
                }
            })
            .collect();

        Legend {
            origin: (
                layout.margin_left,
                layout.height - layout.margin_bottom * 0.5,
            ),
            swatch_size: style.swatch_size,
            items,
        }
    }

    /// Count of dots per category, `(doping, clean)`
    #[must_use]
    pub fn category_counts(&self) -> (usize, usize) {
        let doping = self
            .dots
            .iter()
            .filter(|d| d.allegation == Allegation::Doping)
            .count();
        (doping, self.dots.len() - doping)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {"Time": "36:50", "Place": 1, "Name": "Marco Pantani", "Year": 1995, "Nationality": "ITA",
         "Doping": "Alleged drug use during 1995 due to high hematocrit levels"},
        {"Time": "39:50", "Place": 2, "Name": "Rider Two", "Year": 2015, "Nationality": "FRA", "Doping": ""},
        {"Time": "38:20", "Place": 3, "Name": "Rider Three", "Year": 2005, "Nationality": "USA", "Doping": ""}
    ]"#;

    fn plot() -> ScatterPlot {
        let dataset = Dataset::from_json(SAMPLE).unwrap();
        ScatterPlot::build(&dataset, &ChartStyle::default()).unwrap()
    }

    #[test]
    fn test_layout_from_default_margins() {
        let layout = Layout::new(&ChartStyle::default()).unwrap();
        assert!((layout.chart_width - 830.0).abs() < 1e-9);
        assert!((layout.chart_height - 420.0).abs() < 1e-9);
    }

    #[test]
    fn test_layout_rejects_oversized_margins() {
        let style = ChartStyle {
            width: 100.0,
            ..ChartStyle::default()
        };
        assert!(matches!(
            Layout::new(&style),
            Err(ChartError::NoDrawingArea { .. })
        ));
    }

    #[test]
    fn test_layout_rejects_non_finite_dimensions() {
        let dataset = Dataset::from_json(SAMPLE).unwrap();
        let styles = [
            ChartStyle {
                width: f64::NAN,
                ..ChartStyle::default()
            },
            ChartStyle {
                height: f64::INFINITY,
                ..ChartStyle::default()
            },
            ChartStyle {
                margin_left: f64::NAN,
                ..ChartStyle::default()
            },
        ];
        for style in &styles {
            assert!(matches!(
                ScatterPlot::build(&dataset, style),
                Err(ChartError::NoDrawingArea { .. })
            ));
        }
    }

    #[test]
    fn test_empty_dataset_is_an_error() {
        let result = ScatterPlot::build(&Dataset::default(), &ChartStyle::default());
        assert_eq!(result.unwrap_err(), ChartError::EmptyDataset);
    }

    #[test]
    fn test_extreme_dots_sit_on_axis_ends() {
        let plot = plot();
        let pantani = &plot.dots[0];
        assert!(pantani.cx.abs() < 1e-9);
        assert!((pantani.cy - plot.layout.chart_height).abs() < 1e-9);

        let last = &plot.dots[1];
        assert!((last.cx - plot.layout.chart_width).abs() < 1e-9);
        assert!(last.cy.abs() < 1e-9);
    }

    #[test]
    fn test_dot_attributes() {
        let plot = plot();
        let dot = &plot.dots[0];
        assert_eq!(dot.fill, "blue");
        assert!((dot.r - 5.0).abs() < f64::EPSILON);
        assert_eq!(dot.x_value, "1995-01-01");
        assert_eq!(dot.y_value, "1900-01-01T00:36:50");
        assert_eq!(plot.dots[1].fill, "orange");
        assert_eq!(plot.category_counts(), (1, 2));
    }

    #[test]
    fn test_tooltip_placement_uses_canvas_frame() {
        let plot = plot();

        // Fastest climb: bottom-left corner of the plot area, canvas (80, 520)
        let fastest = plot.dots[0].tooltip_placement;
        assert_eq!(fastest.left, Some(100.0));
        assert_eq!(fastest.bottom, Some(600.0 - 520.0 + 20.0));

        // Slowest climb: top-right corner of the plot area, canvas (910, 100)
        let slowest = plot.dots[1].tooltip_placement;
        assert_eq!(slowest.right, Some(960.0 - 910.0 + 20.0));
        assert_eq!(slowest.top, Some(120.0));

        // Every box stays inside the canvas
        for dot in &plot.dots {
            let p = dot.tooltip_placement;
            assert!([p.left, p.right, p.top, p.bottom]
                .iter()
                .flatten()
                .all(|&v| v >= 0.0));
        }
    }

    #[test]
    fn test_title_and_legend_positions() {
        let plot = plot();
        assert!((plot.title.x - 480.0).abs() < 1e-9);
        assert!((plot.title.y - 50.0).abs() < 1e-9);

        assert_eq!(plot.legend.origin, (80.0, 560.0));
        let labels: Vec<_> = plot.legend.items.iter().map(|i| i.label).collect();
        assert_eq!(labels, ["Doping Allegations", "No Doping Allegations"]);
        assert!((plot.legend.items[1].swatch_x - 150.0).abs() < 1e-9);
        assert!((plot.legend.items[1].text_x - 165.0).abs() < 1e-9);
        assert_eq!(plot.legend.items[0].color, "blue");
    }

    #[test]
    fn test_axes_placement() {
        let plot = plot();
        assert_eq!(plot.x_axis.id, "x-axis");
        assert_eq!(plot.x_axis.offset, (0.0, plot.layout.chart_height));
        assert_eq!(plot.y_axis.side, AxisSide::Left);
        assert!(!plot.x_axis.ticks.is_empty());
        assert!(plot.y_axis.ticks.iter().all(|t| t.label.contains(':')));
    }
}
