//! Static reference data for the Train Tracker APIs.
//!
//! [`errors`] holds the error codes each API can return, [`params`] the
//! query parameters each API accepts, and [`stops`] the stop table loaded
//! from a CSV export. Route metadata lives in [`crate::routes`].

pub mod errors;
pub mod params;
pub mod stops;

use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// The three Train Tracker APIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiFamily {
    Arrivals,
    Positions,
    Follow,
}

impl ApiFamily {
    /// Base URL of the API, without a query string.
    pub fn endpoint(self) -> &'static str {
        match self {
            ApiFamily::Arrivals => "http://lapi.transitchicago.com/api/1.0/ttarrivals.aspx",
            ApiFamily::Positions => "http://lapi.transitchicago.com/api/1.0/ttpositions.aspx",
            ApiFamily::Follow => "http://lapi.transitchicago.com/api/1.0/ttfollow.aspx",
        }
    }
}

impl fmt::Display for ApiFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ApiFamily::Arrivals => "arrivals",
            ApiFamily::Positions => "positions",
            ApiFamily::Follow => "follow",
        })
    }
}

impl FromStr for ApiFamily {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "arrivals" => Ok(ApiFamily::Arrivals),
            "positions" => Ok(ApiFamily::Positions),
            "follow" => Ok(ApiFamily::Follow),
            _ => Err(ValidationError::InvalidParameter {
                name: "family",
                value: s.to_string(),
            }),
        }
    }
}
