//! Per-country likelihood table decoded from `?country=all`.
//!
//! The payload is a JSON object keyed by country name. Entries are kept as
//! three parallel sequences in payload key order; index `i` names the same
//! country in all three.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Year in which a country is projected to meet its target.
///
/// The server reports `"NOW"` for countries already rated compatible.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "YearWire", into = "YearWire")]
pub enum TargetYear {
    Year(i32),
    Now,
}

impl fmt::Display for TargetYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Year(year) => write!(f, "{year}"),
            Self::Now => f.write_str("NOW"),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum YearWire {
    Year(i32),
    Text(String),
}

impl TryFrom<YearWire> for TargetYear {
    type Error = String;

    fn try_from(wire: YearWire) -> Result<Self, Self::Error> {
        match wire {
            YearWire::Year(year) => Ok(Self::Year(year)),
            YearWire::Text(text) if text.trim().eq_ignore_ascii_case("now") => Ok(Self::Now),
            YearWire::Text(text) => Err(format!("expected a year or \"NOW\", got {text:?}")),
        }
    }
}

impl From<TargetYear> for YearWire {
    fn from(year: TargetYear) -> Self {
        match year {
            TargetYear::Year(year) => Self::Year(year),
            TargetYear::Now => Self::Text("NOW".to_string()),
        }
    }
}

/// One row of the table, copied out of the parallel sequences.
#[derive(Clone, Debug, PartialEq)]
pub struct CountryMetric {
    pub name: String,
    /// Percentage, nominally 0-100.
    pub likelihood: f64,
    pub target_year: TargetYear,
}

impl CountryMetric {
    /// Likelihood without a trailing `.0` for whole numbers.
    pub fn likelihood_label(&self) -> String {
        format_likelihood(self.likelihood)
    }
}

/// Format a likelihood the way it is shown to the user: `42`, `42.5`.
pub fn format_likelihood(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

/// Decode failure for the country table.
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    #[error("Country data is not valid JSON: {0}")]
    NotJson(#[from] serde_json::Error),
    #[error("Country data must be a JSON object keyed by country name")]
    NotAnObject,
    #[error("Invalid entry for {country}: {reason}")]
    InvalidEntry { country: String, reason: String },
}

/// Parallel sequences of names, likelihoods and target years.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CountryMetrics {
    names: Vec<String>,
    likelihoods: Vec<f64>,
    years: Vec<TargetYear>,
}

impl CountryMetrics {
    /// Append one country to all three sequences.
    pub fn push(&mut self, name: impl Into<String>, likelihood: f64, year: TargetYear) {
        self.names.push(name.into());
        self.likelihoods.push(likelihood);
        self.years.push(year);
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn likelihoods(&self) -> &[f64] {
        &self.likelihoods
    }

    pub fn years(&self) -> &[TargetYear] {
        &self.years
    }

    /// Row `index` assembled from the three sequences.
    pub fn get(&self, index: usize) -> Option<CountryMetric> {
        Some(CountryMetric {
            name: self.names.get(index)?.clone(),
            likelihood: *self.likelihoods.get(index)?,
            target_year: *self.years.get(index)?,
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|candidate| candidate == name)
    }

    /// Leading `limit` likelihoods, the series plotted on the chart.
    pub fn chart_values(&self, limit: usize) -> &[f64] {
        &self.likelihoods[..self.likelihoods.len().min(limit)]
    }
}

#[derive(Deserialize)]
struct EntryWire {
    likelihood: f64,
    year: TargetYear,
}

/// Decode the `?country=all` body, keeping key order.
pub fn parse_metrics(body: &str) -> Result<CountryMetrics, MetricsError> {
    let value: serde_json::Value = serde_json::from_str(body.trim())?;
    let serde_json::Value::Object(entries) = value else {
        return Err(MetricsError::NotAnObject);
    };
    let mut metrics = CountryMetrics::default();
    for (country, entry) in entries {
        let entry: EntryWire =
            serde_json::from_value(entry).map_err(|err| MetricsError::InvalidEntry {
                country: country.clone(),
                reason: err.to_string(),
            })?;
        if !entry.likelihood.is_finite() {
            return Err(MetricsError::InvalidEntry {
                country,
                reason: "likelihood is not a finite number".to_string(),
            });
        }
        metrics.push(country, entry.likelihood, entry.year);
    }
    Ok(metrics)
}
