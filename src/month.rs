//! Code for working with calendar months.
//!
//! A month is the key on which the hourly consumption dataset is joined to
//! the monthly capacity dataset.
use anyhow::{Context, Result, ensure};
use chrono::{Datelike, NaiveDateTime};
use serde::de::Error;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// A calendar month, written `YYYYMM` in input and output files.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    /// The month containing the given datetime
    pub fn containing(datetime: &NaiveDateTime) -> Self {
        Self {
            year: datetime.year(),
            month: datetime.month(),
        }
    }
}

impl FromStr for Month {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        ensure!(
            s.len() == 6 && s.bytes().all(|b| b.is_ascii_digit()),
            "Invalid month '{s}': should be in the form YYYYMM"
        );
        let year = s[..4].parse().with_context(|| format!("Invalid year in '{s}'"))?;
        let month = s[4..].parse().with_context(|| format!("Invalid month in '{s}'"))?;
        ensure!(
            (1..=12).contains(&month),
            "Invalid month '{s}': month number must be between 1 and 12"
        );

        Ok(Self { year, month })
    }
}

impl Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}{:02}", self.year, self.month)
    }
}

impl<'de> Deserialize<'de> for Month {
    fn deserialize<D>(deserialiser: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s: String = Deserialize::deserialize(deserialiser)?;
        s.parse().map_err(D::Error::custom)
    }
}

impl Serialize for Month {
    fn serialize<S>(&self, serialiser: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serialiser.collect_str(self)
    }
}
