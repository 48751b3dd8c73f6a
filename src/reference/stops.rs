//! Stop reference table, loaded once from a CSV export of "L" stops.
//!
//! Expected columns (header row required, extra columns ignored):
//! `stop_id, direction_id, stop_name, station_name, station_descriptive_name,
//! map_id, ada`.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::error::ValidationError;

/// A single platform-level stop.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Stop {
    /// Five-digit stop code (`stpid` in arrivals queries).
    pub stop_id: u32,
    /// Compass direction of travel served by the platform, e.g. `N`, `S`, `E`, `W`.
    pub direction_id: String,
    pub stop_name: String,
    pub station_name: String,
    pub station_descriptive_name: String,
    /// Parent station code (`mapid` in arrivals queries).
    pub map_id: u32,
    pub ada: bool,
}

/// How to identify a stop in a lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopKey {
    Id(u32),
    Name(String),
}

impl fmt::Display for StopKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopKey::Id(id) => write!(f, "{id}"),
            StopKey::Name(name) => f.write_str(name),
        }
    }
}

/// Immutable stop lookup. Build once, then share by reference.
#[derive(Debug, Clone)]
pub struct StopTable {
    stops: Vec<Stop>,
    stop_ids: Vec<u32>,
    stop_names: Vec<String>,
}

impl StopTable {
    /// Loads the table from a CSV file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading stop table");
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::Reader::from_reader(reader);
        let mut stops = Vec::new();

        for result in rdr.deserialize() {
            let stop: Stop = result?;
            stops.push(stop);
        }

        Ok(Self::from_stops(stops))
    }

    pub fn from_stops(stops: Vec<Stop>) -> Self {
        let mut stop_ids: Vec<u32> = stops.iter().map(|s| s.stop_id).collect();
        stop_ids.sort_unstable();
        stop_ids.dedup();

        let mut stop_names: Vec<String> = stops.iter().map(|s| s.stop_name.clone()).collect();
        stop_names.sort();
        stop_names.dedup();

        Self {
            stops,
            stop_ids,
            stop_names,
        }
    }

    /// Returns the first stop matching `key`, in table order.
    pub fn get(&self, key: &StopKey) -> Result<&Stop, ValidationError> {
        let found = match key {
            StopKey::Id(id) => self.stops.iter().find(|s| s.stop_id == *id),
            StopKey::Name(name) => self.stops.iter().find(|s| &s.stop_name == name),
        };
        found.ok_or_else(|| ValidationError::UnknownStop(key.to_string()))
    }

    /// Sorted, de-duplicated stop IDs.
    pub fn stop_ids(&self) -> &[u32] {
        &self.stop_ids
    }

    /// Sorted, de-duplicated stop names.
    pub fn stop_names(&self) -> &[String] {
        &self.stop_names
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}
