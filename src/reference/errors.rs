//! Error codes returned in the `errCd`/`errNm` envelope fields.

use super::ApiFamily;
use crate::error::ValidationError;

/// A documented API error code.
///
/// `message` is the text the API sends as `errNm` (with `[value]` standing in
/// for the offending value); `description` is the longer explanation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorInfo {
    pub code: u16,
    pub message: &'static str,
    pub description: &'static str,
}

const fn e(code: u16, message: &'static str, description: &'static str) -> ErrorInfo {
    ErrorInfo {
        code,
        message,
        description,
    }
}

static ARRIVALS: &[ErrorInfo] = &[
    e(0, "OK", "No error."),
    e(
        100,
        "Required parameter [value] is missing.",
        "The query string does not contain one of the required parameters, currently: \"mapid or stpid\", \"key\".",
    ),
    e(
        101,
        "Invalid API key",
        "The value for the required parameter \"key\" is not a valid API key.",
    ),
    e(
        102,
        "Maximum Daily CTA Train Tracker API usage exceeded.",
        "The number of successful API Requests using the supplied \"key\" have exceeded the maximum daily value.",
    ),
    e(
        103,
        "Invalid mapid: [value]",
        "At least one of the supplied values for the \"mapid\" parameter is not valid. The first invalid id is returned.",
    ),
    e(
        104,
        "Mapid's need to be integers: [value]",
        "At least one of the supplied values for the \"mapid\" parameter is not an integer value. The first invalid id is returned.",
    ),
    e(
        105,
        "Maximum of mapid's you can request is 4.",
        "A maximum of 4 values may be specified for the parameter \"mapid\". More than 4 were supplied.",
    ),
    e(
        106,
        "Invalid Route Identifier: [value]",
        "At least one of the supplied values for the \"rt\" parameter is invalid. Supported values are: \"Red\", \"Blue\", \"Brn\", \"G\", \"Org\", \"P\", \"Pink\", \"Y\".",
    ),
    e(
        107,
        "Maximum of rt's you can request is 4.",
        "A maximum of 4 values may be specified for the parameter \"rt\". More than 4 were supplied.",
    ),
    e(
        108,
        "Invalid stpId specified: [value]",
        "At least one of the supplied values for the \"stpId\" parameter is invalid. The first invalid value is returned.",
    ),
    e(
        109,
        "Maximum of stpid's you can request is 4.",
        "A maximum of 4 values may be specified for the parameter \"stpId\". More than 4 were supplied.",
    ),
    e(
        110,
        "Invalid max specified: [value]",
        "A non-integer value was specified for the \"max\" parameter.",
    ),
    e(
        111,
        "Parameter 'max' must be a positive integer.",
        "A value less than 1 was specified for the \"max\" parameter. The value must be an integer greater than zero.",
    ),
    e(
        112,
        "Stpid's need to be integers: [value]",
        "At least one of the supplied values for the \"stpid\" parameter is not an integer value. The first invalid id is returned.",
    ),
    e(
        500,
        "Invalid parameter: [value]",
        "The query string contains a parameter that is not supported by the train tracker API, currently supported parameters are: \"mapid\", \"key\", \"rt\", \"stpid\", \"max\".",
    ),
    e(900, "Server Error", "A server error occurred."),
];

static POSITIONS: &[ErrorInfo] = &[
    e(0, "OK", "No error."),
    e(
        100,
        "Required parameter [value] is missing.",
        "One of the required parameters (rt, key) was not provided.",
    ),
    e(
        101,
        "Invalid API key",
        "The API key given in the parameter 'key' was either not found or inactive.",
    ),
    e(
        102,
        "Maximum Daily Train Tracker API usage exceeded.",
        "Key usage has exceeded daily limits. Limits are reset at midnight.",
    ),
    e(
        106,
        "Invalid Route Identifier: [value]",
        "Valid route identifiers are: red, blue, brn, g, org, p, pink, y",
    ),
    e(
        107,
        "Maximum of rt's you can request is 4.",
        "No more than 8 routes can be issued per request. Note duplicates are counted but not returned.",
    ),
    e(
        500,
        "Invalid parameter: [value]",
        "The indicated parameter is not valid. Valid parameters are: rt, key.",
    ),
    e(900, "Server Error", "A server error occurred."),
];

static FOLLOW: &[ErrorInfo] = &[
    e(0, "OK", "No error."),
    e(
        100,
        "Required parameter [value] is missing.",
        "One or more of the required parameters is missing. For this API, the required parameters are: \"runnumber\", and \"key\"",
    ),
    e(
        101,
        "Invalid API key",
        "The supplied API key was not a valid API key.",
    ),
    e(
        102,
        "Maximum Daily Train Tracker API usage exceeded.",
        "The daily usage limit for the supplied key has been exceeded.",
    ),
    e(
        500,
        "Invalid parameter: [value]",
        "Valid parameters for this API are: \"runnumber\", and \"key\".",
    ),
    e(
        501,
        "No trains with runnumber [value] were found.",
        "The indicated train may have left service or may simply be incorrect.",
    ),
    e(
        502,
        "Unable to determine upcoming stops.",
        "The indicated train has an unexpected exit station id, and the system cannot reliably determine which predictions to report.",
    ),
    e(
        503,
        "Unable to find predictions.",
        "The train exists, however none of the available predictions are for active stations.",
    ),
    e(900, "Server Error", "A server error occurred."),
];

/// All documented error codes for `family`, in ascending code order.
pub fn error_table(family: ApiFamily) -> &'static [ErrorInfo] {
    match family {
        ApiFamily::Arrivals => ARRIVALS,
        ApiFamily::Positions => POSITIONS,
        ApiFamily::Follow => FOLLOW,
    }
}

pub fn error_info(family: ApiFamily, code: u16) -> Result<&'static ErrorInfo, ValidationError> {
    error_table(family)
        .iter()
        .find(|info| info.code == code)
        .ok_or(ValidationError::UnknownErrorCode(code))
}

/// Returns the short message for `code`, or the long description when
/// `detail` is set.
pub fn describe_error(
    family: ApiFamily,
    code: u16,
    detail: bool,
) -> Result<&'static str, ValidationError> {
    let info = error_info(family, code)?;
    Ok(if detail {
        info.description
    } else {
        info.message
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_error() {
        assert_eq!(
            describe_error(ApiFamily::Positions, 101, false).unwrap(),
            "Invalid API key"
        );
        assert_eq!(
            describe_error(ApiFamily::Positions, 102, true).unwrap(),
            "Key usage has exceeded daily limits. Limits are reset at midnight."
        );
        assert_eq!(
            describe_error(ApiFamily::Follow, 501, false).unwrap(),
            "No trains with runnumber [value] were found."
        );
    }

    #[test]
    fn test_code_not_in_family() {
        // 103 is an arrivals-only code
        assert!(error_info(ApiFamily::Arrivals, 103).is_ok());
        assert_eq!(
            error_info(ApiFamily::Positions, 103),
            Err(ValidationError::UnknownErrorCode(103))
        );
    }

    #[test]
    fn test_tables_sorted_and_unique() {
        for family in [ApiFamily::Arrivals, ApiFamily::Positions, ApiFamily::Follow] {
            let codes: Vec<u16> = error_table(family).iter().map(|i| i.code).collect();
            assert!(codes.windows(2).all(|w| w[0] < w[1]), "{family}");
            assert_eq!(codes.first(), Some(&0));
            assert_eq!(codes.last(), Some(&900));
        }
    }
}
