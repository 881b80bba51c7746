use serde::Serialize;
use std::fmt;

use crate::errors::ScrapeError;

/// One event link found on a yearly listing page. Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct EventRecord {
    pub year: i32,
    pub title: String,
    pub url: String,
}

/// Inclusive span of listing years, always walked from `latest` down to `earliest`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub latest: i32,
    pub earliest: i32,
}

impl YearRange {
    pub fn new(latest: i32, earliest: i32) -> Result<Self, ScrapeError> {
        let range = Self { latest, earliest };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> Result<(), ScrapeError> {
        if self.earliest > self.latest || self.earliest <= 0 {
            return Err(ScrapeError::InvalidYearRange {
                latest: self.latest,
                earliest: self.earliest,
            });
        }
        Ok(())
    }

    pub fn years(&self) -> impl Iterator<Item = i32> {
        (self.earliest..=self.latest).rev()
    }

    pub fn len(&self) -> usize {
        if self.earliest > self.latest {
            0
        } else {
            (self.latest - self.earliest + 1) as usize
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for YearRange {
    fn default() -> Self {
        Self {
            latest: 2025,
            earliest: 1998,
        }
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.latest, self.earliest)
    }
}
