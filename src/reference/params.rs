//! Query parameters accepted by each API.

use super::ApiFamily;
use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamInfo {
    pub name: &'static str,
    /// Short description of the expected value.
    pub value: &'static str,
    pub description: &'static str,
}

const KEY_DESCRIPTION: &str = "Your unique API key, assigned to you after agreeing to DLA and requesting a key be generated for you.";

static ARRIVALS: &[ParamInfo] = &[
    ParamInfo {
        name: "mapid",
        value: "Numeric station identifier (required if stpid not specified)",
        description: "A single five-digit code to tell the server which station you'd like to receive predictions for. See appendix for information about valid station codes.",
    },
    ParamInfo {
        name: "stpid",
        value: "Numeric stop identifier (required if mapid not specified)",
        description: "A single five-digit code to tell the server which specific stop (in this context, specific platform or platform side within a larger station) you'd like to receive predictions for. See appendix for information about valid stop codes.",
    },
    ParamInfo {
        name: "max",
        value: "Maximum results (optional)",
        description: "The maximum number you'd like to receive (if not specified, all available results for the requested stop or station will be returned)",
    },
    ParamInfo {
        name: "rt",
        value: "Route code (optional)",
        description: "Allows you to specify a single route for which you'd like results (if not specified, all available results for the requested stop or station will be returned)",
    },
    ParamInfo {
        name: "key",
        value: "Alphanumeric API key (required)",
        description: KEY_DESCRIPTION,
    },
];

static POSITIONS: &[ParamInfo] = &[
    ParamInfo {
        name: "rt",
        value: "Train route(s) (required)",
        description: "Allows you to specify one or more routes for which you'd like train location information.",
    },
    ParamInfo {
        name: "key",
        value: "Alphanumeric API key (required)",
        description: KEY_DESCRIPTION,
    },
];

static FOLLOW: &[ParamInfo] = &[
    ParamInfo {
        name: "runnumber",
        value: "Train Run Number (required)",
        description: "Allows you to specify a single run number for a train for which you'd like a series of upcoming arrival estimations.",
    },
    ParamInfo {
        name: "key",
        value: "Alphanumeric API key (required)",
        description: KEY_DESCRIPTION,
    },
];

pub fn param_table(family: ApiFamily) -> &'static [ParamInfo] {
    match family {
        ApiFamily::Arrivals => ARRIVALS,
        ApiFamily::Positions => POSITIONS,
        ApiFamily::Follow => FOLLOW,
    }
}

pub fn param_info(family: ApiFamily, name: &str) -> Result<&'static ParamInfo, ValidationError> {
    param_table(family)
        .iter()
        .find(|p| p.name == name)
        .ok_or_else(|| ValidationError::UnknownParameter(name.to_string()))
}

/// Returns the short value description for `name`, or the long description
/// when `detail` is set.
pub fn describe_param(
    family: ApiFamily,
    name: &str,
    detail: bool,
) -> Result<&'static str, ValidationError> {
    let info = param_info(family, name)?;
    Ok(if detail { info.description } else { info.value })
}
