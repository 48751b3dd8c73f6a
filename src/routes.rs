//! Train routes: names, wire codes, and direction termini.

use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// One of the eight rail lines served by the Train Tracker API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Red,
    Blue,
    Brown,
    Green,
    Orange,
    Purple,
    Pink,
    Yellow,
}

/// Both termini of a route, keyed by direction code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Termini {
    pub one: &'static str,
    pub five: &'static str,
}

/// Train direction as reported in `trDr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// `trDr = 1`, generally northbound (toward the Loop for Orange and Pink).
    One,
    /// `trDr = 5`, generally southbound.
    Five,
}

impl Route {
    /// Every route in reference-table order.
    pub const ALL: [Route; 8] = [
        Route::Red,
        Route::Blue,
        Route::Brown,
        Route::Green,
        Route::Orange,
        Route::Purple,
        Route::Pink,
        Route::Yellow,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Route::Red => "red",
            Route::Blue => "blue",
            Route::Brown => "brown",
            Route::Green => "green",
            Route::Orange => "orange",
            Route::Purple => "purple",
            Route::Pink => "pink",
            Route::Yellow => "yellow",
        }
    }

    /// The `rt` value the API expects for this route.
    pub fn code(self) -> &'static str {
        match self {
            Route::Red => "red",
            Route::Blue => "blue",
            Route::Brown => "brn",
            Route::Green => "g",
            Route::Orange => "org",
            Route::Purple => "p",
            Route::Pink => "pink",
            Route::Yellow => "y",
        }
    }

    /// Looks up a route by its human-readable name. Exact match only.
    pub fn from_name(name: &str) -> Result<Route, ValidationError> {
        Route::ALL
            .into_iter()
            .find(|r| r.name() == name)
            .ok_or_else(|| ValidationError::UnknownRouteName(name.to_string()))
    }

    /// Looks up a route by its wire code. Exact match only.
    pub fn from_code(code: &str) -> Result<Route, ValidationError> {
        Route::ALL
            .into_iter()
            .find(|r| r.code() == code)
            .ok_or_else(|| ValidationError::UnknownRouteCode(code.to_string()))
    }

    pub fn termini(self) -> Termini {
        let (one, five) = match self {
            Route::Red => ("Howard", "95th/Dan Ryan"),
            Route::Blue => ("O'Hare", "Forest Park"),
            Route::Brown => ("Kimball", "Loop"),
            Route::Green => ("Harlem/Lake", "Ashland/63rd or Cottage Grove"),
            Route::Orange => ("Loop", "Midway"),
            Route::Purple => ("Linden", "Howard or Loop"),
            Route::Pink => ("Loop", "54th/Cermak"),
            Route::Yellow => ("Skokie", "Howard"),
        };
        Termini { one, five }
    }

    /// Terminus name for a single direction.
    pub fn terminus(self, direction: Direction) -> &'static str {
        let termini = self.termini();
        match direction {
            Direction::One => termini.one,
            Direction::Five => termini.five,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returns `true` if `code` is one of the eight wire codes.
pub fn is_known_code(code: &str) -> bool {
    Route::from_code(code).is_ok()
}

/// Resolves a wire code to its termini: both when `direction` is `None`,
/// otherwise only the selected one.
pub fn termini_for_code(
    code: &str,
    direction: Option<Direction>,
) -> Result<Vec<&'static str>, ValidationError> {
    let route = Route::from_code(code)?;
    Ok(match direction {
        Some(dir) => vec![route.terminus(dir)],
        None => {
            let t = route.termini();
            vec![t.one, t.five]
        }
    })
}

impl Direction {
    pub fn code(self) -> u8 {
        match self {
            Direction::One => 1,
            Direction::Five => 5,
        }
    }

    pub fn from_code(code: u8) -> Result<Direction, ValidationError> {
        match code {
            1 => Ok(Direction::One),
            5 => Ok(Direction::Five),
            other => Err(ValidationError::UnknownDirection(other.to_string())),
        }
    }
}

impl FromStr for Direction {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" => Ok(Direction::One),
            "5" => Ok(Direction::Five),
            other => Err(ValidationError::UnknownDirection(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_name_to_code() {
        assert_eq!(Route::from_name("brown").unwrap().code(), "brn");
        assert_eq!(Route::from_name("green").unwrap().code(), "g");
        assert_eq!(Route::from_name("red").unwrap().code(), "red");
    }

    #[test]
    fn test_name_code_mapping_is_bijective() {
        let codes: HashSet<_> = Route::ALL.iter().map(|r| r.code()).collect();
        let names: HashSet<_> = Route::ALL.iter().map(|r| r.name()).collect();
        assert_eq!(codes.len(), 8);
        assert_eq!(names.len(), 8);

        for route in Route::ALL {
            assert_eq!(Route::from_name(route.name()).unwrap(), route);
            assert_eq!(Route::from_code(route.code()).unwrap(), route);
        }
    }

    #[test]
    fn test_lookup_is_exact() {
        assert_eq!(
            Route::from_name("Brown"),
            Err(ValidationError::UnknownRouteName("Brown".into()))
        );
        assert!(Route::from_code("brown").is_err());
        assert!(Route::from_name("brn").is_err());
        assert!(!is_known_code("silver"));
    }

    #[test]
    fn test_termini_for_code() {
        assert_eq!(termini_for_code("brn", None).unwrap(), vec!["Kimball", "Loop"]);
        assert_eq!(
            termini_for_code("red", Some(Direction::Five)).unwrap(),
            vec!["95th/Dan Ryan"]
        );
        assert!(termini_for_code("brown", None).is_err());
    }

    #[test]
    fn test_direction_parsing() {
        assert_eq!("1".parse::<Direction>().unwrap(), Direction::One);
        assert_eq!(Direction::from_code(5).unwrap(), Direction::Five);
        assert_eq!(
            "3".parse::<Direction>(),
            Err(ValidationError::UnknownDirection("3".into()))
        );
    }
}
