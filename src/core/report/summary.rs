//! Summary statistics printed after a render and embedded in the Markdown report

use crate::core::dataset::{Allegation, Cyclist, Dataset, RaceTime};

/// A rider and time singled out by the summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standout {
    /// Rider name
    pub name: String,
    /// Year of the climb
    pub year: i32,
    /// Race time
    pub time: RaceTime,
}

impl Standout {
    fn of(cyclist: &Cyclist) -> Self {
        Self {
            name: cyclist.name.clone(),
            year: cyclist.year,
            time: cyclist.time,
        }
    }
}

/// Summary statistics for a dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSummary {
    /// Number of records
    pub record_count: usize,
    /// Earliest year
    pub first_year: i32,
    /// Latest year
    pub last_year: i32,
    /// Fastest climb (first in dataset order on ties)
    pub fastest: Standout,
    /// Slowest climb (first in dataset order on ties)
    pub slowest: Standout,
    /// Records with an allegation
    pub with_allegations: usize,
}

impl ChartSummary {
    /// Compute the summary, `None` for an empty dataset
    #[must_use]
    pub fn from_dataset(dataset: &Dataset) -> Option<Self> {
        let (first_year, last_year) = dataset.year_extent()?;
        let fastest = dataset.iter().min_by_key(|c| c.time)?;
        let slowest = dataset
            .iter()
            .rev()
            .max_by_key(|c| c.time)?;
        let with_allegations = dataset
            .iter()
            .filter(|c| c.allegation() == Allegation::Doping)
            .count();

        Some(Self {
            record_count: dataset.len(),
            first_year,
            last_year,
            fastest: Standout::of(fastest),
            slowest: Standout::of(slowest),
            with_allegations,
        })
    }

    /// Records without an allegation
    #[must_use]
    pub const fn without_allegations(&self) -> usize {
        self.record_count - self.with_allegations
    }

    /// Percentage of records with an allegation
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn allegation_share(&self) -> f64 {
        if self.record_count == 0 {
            return 0.0;
        }
        self.with_allegations as f64 * 100.0 / self.record_count as f64
    }
}
