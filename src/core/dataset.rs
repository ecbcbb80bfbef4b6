//! Cyclist dataset: record types, race-time parsing and loading
//!
//! The dataset is a JSON array of records with capitalised field names
//! (`Time`, `Place`, `Seconds`, `Name`, `Year`, `Nationality`, `Doping`, `URL`).
//! It can be read from a local file or fetched over HTTP.

use crate::core::scale::extent;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Timeout for fetching a remote dataset
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors raised while loading a dataset
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The dataset file could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// Path that failed
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
    /// The dataset URL could not be fetched
    #[error("failed to fetch {url}: {message}")]
    Fetch {
        /// URL that failed
        url: String,
        /// Transport error or HTTP status
        message: String,
    },
    /// The payload is not a JSON array of cyclist records
    #[error("invalid dataset JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// A record carries a malformed race time
    #[error("record {index} ({name}): {source}")]
    Record {
        /// Zero-based position of the record in the array
        index: usize,
        /// Rider name, for context
        name: String,
        /// Parse failure
        source: RaceTimeError,
    },
}

/// A race time string that is not `MM:SS`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid race time '{0}', expected MM:SS")]
pub struct RaceTimeError(pub String);

/// Race time parsed from `MM:SS`, stored as whole seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RaceTime {
    seconds: u32,
}

impl RaceTime {
    /// Build a race time from a number of seconds
    #[must_use]
    pub const fn from_seconds(seconds: u32) -> Self {
        Self { seconds }
    }

    /// Total seconds
    #[must_use]
    pub const fn as_seconds(self) -> u32 {
        self.seconds
    }

    /// Whole minutes (may exceed 59)
    #[must_use]
    pub const fn minutes(self) -> u32 {
        self.seconds / 60
    }

    /// Seconds past the minute
    #[must_use]
    pub const fn seconds_part(self) -> u32 {
        self.seconds % 60
    }

    /// The time as a date-time on 1900-01-01, the anchor a `%M:%S` parser uses.
    ///
    /// Returns `None` for times of 24 hours or more.
    #[must_use]
    pub fn as_datetime(self) -> Option<NaiveDateTime> {
        let time = NaiveTime::from_num_seconds_from_midnight_opt(self.seconds, 0)?;
        NaiveDate::from_ymd_opt(1900, 1, 1).map(|date| date.and_time(time))
    }
}

impl FromStr for RaceTime {
    type Err = RaceTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || RaceTimeError(s.to_string());
        let (minutes, seconds) = s.trim().split_once(':').ok_or_else(invalid)?;

        let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(minutes) || !all_digits(seconds) || seconds.len() > 2 {
            return Err(invalid());
        }

        let minutes: u32 = minutes.parse().map_err(|_| invalid())?;
        let seconds: u32 = seconds.parse().map_err(|_| invalid())?;
        if seconds >= 60 {
            return Err(invalid());
        }

        minutes
            .checked_mul(60)
            .and_then(|m| m.checked_add(seconds))
            .map(Self::from_seconds)
            .ok_or_else(invalid)
    }
}

impl fmt::Display for RaceTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.minutes(), self.seconds_part())
    }
}

/// Whether a rider faced doping allegations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Allegation {
    /// Non-empty `Doping` text
    Doping,
    /// Empty `Doping` text
    Clean,
}

impl Allegation {
    /// Legend order
    pub const ALL: [Self; 2] = [Self::Doping, Self::Clean];

    /// Legend label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Doping => "Doping Allegations",
            Self::Clean => "No Doping Allegations",
        }
    }
}

/// Raw record as it appears in the JSON payload
#[derive(Debug, Deserialize)]
struct RawCyclist {
    #[serde(rename = "Time")]
    time: String,
    #[serde(rename = "Place", default)]
    place: Option<u32>,
    #[serde(rename = "Seconds", default)]
    seconds: Option<u32>,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "Nationality", default)]
    nationality: String,
    #[serde(rename = "Doping", default)]
    doping: String,
    #[serde(rename = "URL", default)]
    url: String,
}

/// One rider's climb
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cyclist {
    /// Race time
    pub time: RaceTime,
    /// Ranking by time, when provided
    pub place: Option<u32>,
    /// Rider name
    pub name: String,
    /// Year of the climb
    pub year: i32,
    /// Three-letter nationality code
    pub nationality: String,
    /// Allegation text, empty when none
    pub doping: String,
    /// Source link for the allegation, empty when none
    pub url: String,
}

impl Cyclist {
    /// Race time of this record
    #[must_use]
    pub const fn race_time(&self) -> RaceTime {
        self.time
    }

    /// Allegation category
    #[must_use]
    pub fn allegation(&self) -> Allegation {
        if self.doping.trim().is_empty() {
            Allegation::Clean
        } else {
            Allegation::Doping
        }
    }

    /// January 1st of the record's year
    #[must_use]
    pub fn year_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, 1, 1)
    }

    fn from_raw(index: usize, raw: RawCyclist) -> Result<Self, DatasetError> {
        let time = raw.time.parse::<RaceTime>().map_err(|source| DatasetError::Record {
            index,
            name: raw.name.clone(),
            source,
        })?;

        if let Some(seconds) = raw.seconds.filter(|&s| s != time.as_seconds()) {
            crate::warn!(
                "Record {index} ({}): Seconds={seconds} disagrees with Time={time}; using Time",
                raw.name
            );
        }

        Ok(Self {
            time,
            place: raw.place,
            name: raw.name,
            year: raw.year,
            nationality: raw.nationality,
            doping: raw.doping,
            url: raw.url,
        })
    }
}

/// Where to load the dataset from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    /// Local JSON file
    File(PathBuf),
    /// Remote JSON document
    Url(String),
}

impl DatasetSource {
    /// Classify a user-supplied source string
    #[must_use]
    pub fn parse(source: &str) -> Self {
        let trimmed = source.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Url(trimmed.to_string())
        } else {
            Self::File(PathBuf::from(trimmed))
        }
    }
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

/// Ordered collection of cyclist records
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    records: Vec<Cyclist>,
}

impl Dataset {
    /// Wrap already-parsed records
    #[must_use]
    pub const fn new(records: Vec<Cyclist>) -> Self {
        Self { records }
    }

    /// Parse a JSON array of records
    ///
    /// # Errors
    /// Returns an error if the JSON is malformed or a record's `Time` is not `MM:SS`
    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        let raw: Vec<RawCyclist> = serde_json::from_str(json)?;
        let records = raw
            .into_iter()
            .enumerate()
            .map(|(index, record)| Cyclist::from_raw(index, record))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(records))
    }

    /// Load from a file or URL
    ///
    /// # Errors
    /// Returns an error if the source cannot be read or fetched, or does not parse
    pub fn load(source: &DatasetSource) -> Result<Self, DatasetError> {
        let body = match source {
            DatasetSource::File(path) => Self::read_file(path)?,
            DatasetSource::Url(url) => Self::fetch(url)?,
        };
        let dataset = Self::from_json(&body)?;
        crate::debug!("Loaded {} records from {source}", dataset.len());
        Ok(dataset)
    }

    fn read_file(path: &Path) -> Result<String, DatasetError> {
        fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    fn fetch(url: &str) -> Result<String, DatasetError> {
        let fetch_error = |message: String| DatasetError::Fetch {
            url: url.to_string(),
            message,
        };

        crate::info!("Fetching dataset from {url}");
        let client = reqwest::blocking::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(concat!("dopingplot/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| fetch_error(e.to_string()))?;

        let response = client
            .get(url)
            .send()
            .map_err(|e| fetch_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fetch_error(format!("HTTP {status}")));
        }

        response.text().map_err(|e| fetch_error(e.to_string()))
    }

    /// All records, in payload order
    #[must_use]
    pub fn records(&self) -> &[Cyclist] {
        &self.records
    }

    /// Iterate over records
    pub fn iter(&self) -> std::slice::Iter<'_, Cyclist> {
        self.records.iter()
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when there are no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Earliest and latest year
    #[must_use]
    pub fn year_extent(&self) -> Option<(i32, i32)> {
        extent(self.records.iter().map(|c| c.year))
    }

    /// Fastest and slowest race time
    #[must_use]
    pub fn time_extent(&self) -> Option<(RaceTime, RaceTime)> {
        extent(self.records.iter().map(Cyclist::race_time))
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Cyclist;
    type IntoIter = std::slice::Iter<'a, Cyclist>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
