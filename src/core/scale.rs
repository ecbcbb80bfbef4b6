//! Scales mapping data values onto chart coordinates
//!
//! Two continuous scales drive the chart: years along the x axis and race
//! times along the y axis. Both are linear; they differ in how ticks are
//! chosen and labelled. Colors come from a two-entry ordinal palette.

use crate::core::dataset::{Allegation, RaceTime};

/// Clock-friendly tick steps for race times, in seconds
const TIME_TICK_STEPS: [u32; 9] = [1, 5, 15, 30, 60, 300, 900, 1800, 3600];

/// Minimum and maximum of a sequence, `None` when it is empty
pub fn extent<T, I>(values: I) -> Option<(T, T)>
where
    T: PartialOrd + Copy,
    I: IntoIterator<Item = T>,
{
    values.into_iter().fold(None, |acc, value| match acc {
        None => Some((value, value)),
        Some((lo, hi)) => Some((
            if value < lo { value } else { lo },
            if value > hi { value } else { hi },
        )),
    })
}

/// A "nice" step (1, 2 or 5 times a power of ten) splitting `[start, stop]` into about `count` parts
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let raw = (stop - start).abs() / count.max(1) as f64;
    if raw <= 0.0 || !raw.is_finite() {
        return 1.0;
    }
    let mut step = 10f64.powf(raw.log10().floor());
    let error = raw / step;
    if error >= 50f64.sqrt() {
        step *= 10.0;
    } else if error >= 10f64.sqrt() {
        step *= 5.0;
    } else if error >= 2f64.sqrt() {
        step *= 2.0;
    }
    step
}

/// A positioned, labelled axis tick
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Domain value
    pub value: f64,
    /// Position along the axis, in chart coordinates
    pub position: f64,
    /// Tick label
    pub label: String,
}

/// Linear mapping from a numeric domain onto a pixel range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    /// Create a scale
    #[must_use]
    pub const fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Domain bounds
    #[must_use]
    pub const fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Map a domain value into the range. A zero-width domain maps to the middle of the range.
    #[must_use]
    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if (d1 - d0).abs() < f64::EPSILON {
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    /// Nice tick values inside the domain, about `count` of them
    #[must_use]
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let lo = self.domain.0.min(self.domain.1);
        let hi = self.domain.0.max(self.domain.1);
        Self::ticks_with_step(lo, hi, tick_step(lo, hi, count))
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn ticks_with_step(lo: f64, hi: f64, step: f64) -> Vec<f64> {
        if (hi - lo).abs() < f64::EPSILON {
            return vec![lo];
        }
        let first = (lo / step).ceil() as i64;
        let last = (hi / step).floor() as i64;
        (first..=last).map(|i| i as f64 * step).collect()
    }
}

/// Year axis scale. Ticks fall on whole years and are labelled `%Y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearScale {
    inner: LinearScale,
}

impl YearScale {
    /// Scale the `(first, last)` year extent onto `[0, width]`
    #[must_use]
    pub fn new(extent: (i32, i32), width: f64) -> Self {
        Self {
            inner: LinearScale::new((f64::from(extent.0), f64::from(extent.1)), (0.0, width)),
        }
    }

    /// Horizontal position of a year
    #[must_use]
    pub fn map(&self, year: i32) -> f64 {
        self.inner.map(f64::from(year))
    }

    /// Whole-year ticks. Fractional nice steps on short spans keep only their whole years.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn ticks(&self, count: usize) -> Vec<Tick> {
        self.inner
            .ticks(count)
            .into_iter()
            .filter(|value| (value - value.round()).abs() < 1e-6)
            .map(f64::round)
            .map(|value| Tick {
                value,
                position: self.inner.map(value),
                label: format!("{}", value.round() as i64),
            })
            .collect()
    }
}

/// Race-time axis scale. Ticks snap to clock steps and are labelled `%M:%S`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaceTimeScale {
    inner: LinearScale,
}

impl RaceTimeScale {
    /// Scale the `(fastest, slowest)` extent onto `[height, 0]`, fastest at the bottom
    #[must_use]
    pub fn new(extent: (RaceTime, RaceTime), height: f64) -> Self {
        Self {
            inner: LinearScale::new(
                (
                    f64::from(extent.0.as_seconds()),
                    f64::from(extent.1.as_seconds()),
                ),
                (height, 0.0),
            ),
        }
    }

    /// Vertical position of a race time
    #[must_use]
    pub fn map(&self, time: RaceTime) -> f64 {
        self.inner.map(f64::from(time.as_seconds()))
    }

    /// Pick the clock step closest (by ratio) to an even split of the domain into `count` parts
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn clock_step(&self, count: usize) -> u32 {
        let (lo, hi) = self.inner.domain();
        let target = (hi - lo).abs() / count.max(1) as f64;
        let above = TIME_TICK_STEPS.partition_point(|&s| f64::from(s) <= target);
        match above {
            0 => TIME_TICK_STEPS[0],
            i if i == TIME_TICK_STEPS.len() => TIME_TICK_STEPS[i - 1],
            i => {
                let below = f64::from(TIME_TICK_STEPS[i - 1]);
                let over = f64::from(TIME_TICK_STEPS[i]);
                if target / below < over / target {
                    TIME_TICK_STEPS[i - 1]
                } else {
                    TIME_TICK_STEPS[i]
                }
            }
        }
    }

    /// Clock-step ticks
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn ticks(&self, count: usize) -> Vec<Tick> {
        let (lo, hi) = self.inner.domain();
        let step = f64::from(self.clock_step(count));
        LinearScale::ticks_with_step(lo.min(hi), lo.max(hi), step)
            .into_iter()
            .map(|value| Tick {
                value,
                position: self.inner.map(value),
                label: RaceTime::from_seconds(value.round().max(0.0) as u32).to_string(),
            })
            .collect()
    }
}

/// Ordinal color assignment for the two allegation categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    doping: String,
    clean: String,
}

impl Palette {
    /// First color for riders with allegations, second for the rest
    #[must_use]
    pub fn new(doping: impl Into<String>, clean: impl Into<String>) -> Self {
        Self {
            doping: doping.into(),
            clean: clean.into(),
        }
    }

    /// Color of a category
    #[must_use]
    pub fn color(&self, allegation: Allegation) -> &str {
        match allegation {
            Allegation::Doping => &self.doping,
            Allegation::Clean => &self.clean,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new("blue", "orange")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_extent() {
        assert_eq!(extent([3, 1, 4, 1, 5]), Some((1, 5)));
        assert_eq!(extent(Vec::<i32>::new()), None);
        assert_eq!(extent([2.5]), Some((2.5, 2.5)));
    }

    #[test]
    fn test_linear_map_and_inverted_range() {
        let scale = LinearScale::new((10.0, 20.0), (100.0, 0.0));
        assert!(approx(scale.map(10.0), 100.0));
        assert!(approx(scale.map(20.0), 0.0));
        assert!(approx(scale.map(15.0), 50.0));
    }

    #[test]
    fn test_degenerate_domain_maps_to_middle() {
        let scale = LinearScale::new((7.0, 7.0), (0.0, 300.0));
        assert!(approx(scale.map(7.0), 150.0));
        assert_eq!(scale.ticks(10), vec![7.0]);
    }

    #[test]
    fn test_tick_step_is_nice() {
        assert!(approx(tick_step(0.0, 100.0, 10), 10.0));
        assert!(approx(tick_step(0.0, 1.0, 10), 0.1));
        assert!(approx(tick_step(0.0, 21.0, 10), 2.0));
        assert!(approx(tick_step(0.0, 45.0, 10), 5.0));
    }

    #[test]
    fn test_year_ticks_for_tour_range() {
        let scale = YearScale::new((1994, 2015), 840.0);
        let labels: Vec<_> = scale.ticks(10).into_iter().map(|t| t.label).collect();
        assert_eq!(
            labels,
            [
                "1994", "1996", "1998", "2000", "2002", "2004", "2006", "2008", "2010", "2012",
                "2014"
            ]
        );
        assert!(approx(scale.map(1994), 0.0));
        assert!(approx(scale.map(2015), 840.0));
    }

    #[test]
    fn test_year_ticks_never_fractional() {
        let scale = YearScale::new((2000, 2002), 100.0);
        let labels: Vec<_> = scale.ticks(10).into_iter().map(|t| t.label).collect();
        assert_eq!(labels, ["2000", "2001", "2002"]);
    }

    #[test]
    fn test_race_time_ticks_snap_to_fifteen_seconds() {
        let scale = RaceTimeScale::new(
            (RaceTime::from_seconds(2210), RaceTime::from_seconds(2390)),
            420.0,
        );
        assert_eq!(scale.clock_step(10), 15);
        let ticks = scale.ticks(10);
        assert_eq!(ticks.first().map(|t| t.label.as_str()), Some("37:00"));
        assert_eq!(ticks.last().map(|t| t.label.as_str()), Some("39:45"));
        assert_eq!(ticks.len(), 12);
    }

    #[test]
    fn test_fastest_time_at_bottom() {
        let scale = RaceTimeScale::new(
            (RaceTime::from_seconds(2210), RaceTime::from_seconds(2390)),
            420.0,
        );
        assert!(approx(scale.map(RaceTime::from_seconds(2210)), 420.0));
        assert!(approx(scale.map(RaceTime::from_seconds(2390)), 0.0));
    }

    #[test]
    fn test_clock_step_extremes() {
        let tiny = RaceTimeScale::new((RaceTime::from_seconds(60), RaceTime::from_seconds(62)), 10.0);
        assert_eq!(tiny.clock_step(10), 1);
        let huge = RaceTimeScale::new(
            (RaceTime::from_seconds(0), RaceTime::from_seconds(200_000)),
            10.0,
        );
        assert_eq!(huge.clock_step(10), 3600);
    }

    #[test]
    fn test_palette_assigns_first_color_to_doping() {
        let palette = Palette::default();
        assert_eq!(palette.color(Allegation::Doping), "blue");
        assert_eq!(palette.color(Allegation::Clean), "orange");
    }
}
