//! Request URL construction.
//!
//! Every builder validates its inputs before producing a URL, so a request
//! with an unknown route or a missing parameter is never sent.

use reqwest::Url;
use std::fmt;
use std::str::FromStr;

use crate::config::ApiConfig;
use crate::error::ValidationError;
use crate::routes::{Route, is_known_code};

/// Marker that introduces each route in a query suffix.
pub const ROUTE_MARKER: &str = "&rt=";

/// Output-format parameter appended to every request.
pub const OUTPUT_TYPE: (&str, &str) = ("outputType", "JSON");

/// Placeholder logged in place of the API key.
pub const REDACTED: &str = "REDACTED";

/// Which routes a positions request covers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RouteFilter {
    /// Every known route, in reference-table order.
    #[default]
    All,
    /// Route tokens in request order. Each token is a wire code (`"brn"`) or
    /// a route name (`"brown"`). Duplicates are kept.
    Tokens(Vec<String>),
    /// A pre-built suffix such as `"&rt=red&rt=brn"`.
    RawSuffix(String),
}

impl RouteFilter {
    pub fn tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RouteFilter::Tokens(tokens.into_iter().map(Into::into).collect())
    }

    /// Builds a filter from the values of a mapping, in its iteration order.
    pub fn from_mapping<I, K, V>(mapping: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        V: Into<String>,
    {
        RouteFilter::Tokens(mapping.into_iter().map(|(_, v)| v.into()).collect())
    }

    /// Interprets a single string: an existing `&rt=` fragment (any case) is
    /// taken whole and lowercased, anything else is one route token. An
    /// empty string selects every route.
    pub fn from_fragment(s: &str) -> Self {
        if s.is_empty() {
            return RouteFilter::All;
        }
        let starts_with_marker = s
            .get(..ROUTE_MARKER.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(ROUTE_MARKER));
        if starts_with_marker {
            RouteFilter::RawSuffix(s.to_lowercase())
        } else {
            RouteFilter::Tokens(vec![s.to_string()])
        }
    }

    /// Resolves the filter to validated wire codes, in request order.
    pub fn resolve(&self) -> Result<Vec<&str>, ValidationError> {
        match self {
            RouteFilter::All => Ok(Route::ALL.iter().map(|r| r.code()).collect()),
            RouteFilter::Tokens(tokens) if tokens.is_empty() => {
                Ok(Route::ALL.iter().map(|r| r.code()).collect())
            }
            RouteFilter::Tokens(tokens) => tokens.iter().map(|t| resolve_token(t)).collect(),
            RouteFilter::RawSuffix(suffix) => {
                let mut parts = suffix.split(ROUTE_MARKER);
                // text before the first marker; empty for a well-formed suffix
                if let Some(head) = parts.next()
                    && !head.is_empty()
                {
                    return Err(ValidationError::UnknownRouteToken(head.to_string()));
                }
                parts
                    .map(|code| {
                        if code.is_empty() {
                            Err(ValidationError::EmptyRouteToken)
                        } else if is_known_code(code) {
                            Ok(code)
                        } else {
                            Err(ValidationError::UnknownRouteToken(code.to_string()))
                        }
                    })
                    .collect()
            }
        }
    }

    /// Builds the `&rt=<code>...` suffix after validating every token.
    pub fn to_suffix(&self) -> Result<String, ValidationError> {
        if let RouteFilter::RawSuffix(suffix) = self {
            self.resolve()?;
            return Ok(suffix.clone());
        }
        Ok(self
            .resolve()?
            .into_iter()
            .map(|code| format!("{ROUTE_MARKER}{code}"))
            .collect())
    }
}

fn resolve_token(token: &str) -> Result<&str, ValidationError> {
    if token.is_empty() {
        return Err(ValidationError::EmptyRouteToken);
    }
    if is_known_code(token) {
        return Ok(token);
    }
    Route::from_name(token)
        .map(Route::code)
        .map_err(|_| ValidationError::UnknownRouteToken(token.to_string()))
}

/// How the tabular sink opens its destination file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Truncate (or create), then write a header row before the records.
    Write,
    /// Create if absent, otherwise append after existing rows. No header.
    Append,
}

impl FromStr for WriteMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "w" => Ok(WriteMode::Write),
            "a" => Ok(WriteMode::Append),
            other => Err(ValidationError::UnknownWriteMode(other.to_string())),
        }
    }
}

impl fmt::Display for WriteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WriteMode::Write => "w",
            WriteMode::Append => "a",
        })
    }
}

/// Parses `endpoint` and appends the encoded `key` parameter.
fn keyed_url(endpoint: &str, key: &str) -> Result<Url, ValidationError> {
    let mut url =
        Url::parse(endpoint).map_err(|_| ValidationError::InvalidEndpoint(endpoint.to_string()))?;
    url.query_pairs_mut().append_pair("key", key);
    Ok(url)
}

/// Builds the positions URL: `<endpoint>?key=<key><suffix>&outputType=JSON`.
///
/// The key is form-encoded, so it cannot inject parameters of its own.
pub fn positions_url(config: &ApiConfig, filter: &RouteFilter) -> Result<String, ValidationError> {
    let codes = filter.resolve()?;
    let mut url = keyed_url(&config.positions_url, config.api_key())?;
    {
        let mut pairs = url.query_pairs_mut();
        for code in codes {
            pairs.append_pair("rt", code);
        }
        pairs.append_pair(OUTPUT_TYPE.0, OUTPUT_TYPE.1);
    }
    Ok(url.into())
}

/// Arrivals request for one station or one stop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArrivalsQuery {
    pub mapid: Option<u32>,
    pub stpid: Option<u32>,
    pub max: Option<u32>,
    pub route: Option<Route>,
}

impl ArrivalsQuery {
    pub fn station(mapid: u32) -> Self {
        Self {
            mapid: Some(mapid),
            ..Self::default()
        }
    }

    pub fn stop(stpid: u32) -> Self {
        Self {
            stpid: Some(stpid),
            ..Self::default()
        }
    }

    pub fn with_max(mut self, max: u32) -> Self {
        self.max = Some(max);
        self
    }

    pub fn with_route(mut self, route: Route) -> Self {
        self.route = Some(route);
        self
    }

    pub fn to_url(&self, config: &ApiConfig) -> Result<String, ValidationError> {
        if self.mapid.is_none() && self.stpid.is_none() {
            return Err(ValidationError::MissingParameter("mapid or stpid"));
        }
        if self.max == Some(0) {
            return Err(ValidationError::InvalidParameter {
                name: "max",
                value: "0".into(),
            });
        }

        let mut url = keyed_url(&config.arrivals_url, config.api_key())?;
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(mapid) = self.mapid {
                pairs.append_pair("mapid", &mapid.to_string());
            }
            if let Some(stpid) = self.stpid {
                pairs.append_pair("stpid", &stpid.to_string());
            }
            if let Some(max) = self.max {
                pairs.append_pair("max", &max.to_string());
            }
            if let Some(route) = self.route {
                pairs.append_pair("rt", route.code());
            }
            pairs.append_pair(OUTPUT_TYPE.0, OUTPUT_TYPE.1);
        }
        Ok(url.into())
    }
}

/// Follow-this-train request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowQuery {
    pub runnumber: String,
}

impl FollowQuery {
    pub fn new(runnumber: impl Into<String>) -> Self {
        Self {
            runnumber: runnumber.into(),
        }
    }

    pub fn to_url(&self, config: &ApiConfig) -> Result<String, ValidationError> {
        if self.runnumber.is_empty() {
            return Err(ValidationError::MissingParameter("runnumber"));
        }
        if !self.runnumber.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::InvalidParameter {
                name: "runnumber",
                value: self.runnumber.clone(),
            });
        }
        let mut url = keyed_url(&config.follow_url, config.api_key())?;
        url.query_pairs_mut()
            .append_pair("runnumber", &self.runnumber)
            .append_pair(OUTPUT_TYPE.0, OUTPUT_TYPE.1);
        Ok(url.into())
    }
}

/// Rebuilds `url` with the `key` parameter replaced so it can be logged.
///
/// Anything that does not parse as a URL is withheld entirely.
pub fn redact_key(url: &str) -> String {
    let Ok(mut parsed) = Url::parse(url) else {
        return format!("<unparseable url: {REDACTED}>");
    };
    let pairs: Vec<(String, String)> = parsed
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "key" { REDACTED.to_string() } else { v.into_owned() };
            (k.into_owned(), v)
        })
        .collect();
    parsed.set_fragment(None);
    if !pairs.is_empty() {
        parsed.query_pairs_mut().clear().extend_pairs(pairs);
    }
    parsed.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn config() -> ApiConfig {
        ApiConfig::new("KEY").with_positions_url("http://host/pos")
    }

    #[test]
    fn test_list_filter_maps_names_to_codes() {
        let filter = RouteFilter::tokens(["red", "brown"]);
        assert_eq!(filter.to_suffix().unwrap(), "&rt=red&rt=brn");
    }

    #[test]
    fn test_raw_suffix_used_whole() {
        let filter = RouteFilter::from_fragment("&rt=blue");
        assert_eq!(filter, RouteFilter::RawSuffix("&rt=blue".into()));
        assert_eq!(filter.to_suffix().unwrap(), "&rt=blue");

        let filter = RouteFilter::from_fragment("&RT=Blue&rt=BRN");
        assert_eq!(filter.to_suffix().unwrap(), "&rt=blue&rt=brn");
    }

    #[test]
    fn test_single_token_fragment() {
        assert_eq!(
            RouteFilter::from_fragment("g").to_suffix().unwrap(),
            "&rt=g"
        );
        assert_eq!(RouteFilter::from_fragment(""), RouteFilter::All);
    }

    #[test]
    fn test_mapping_filter_uses_values_in_order() {
        let mapping: BTreeMap<&str, &str> = [("a", "g"), ("b", "y")].into_iter().collect();
        let filter = RouteFilter::from_mapping(mapping);
        assert_eq!(filter.to_suffix().unwrap(), "&rt=g&rt=y");
    }

    #[test]
    fn test_empty_filter_selects_all_routes() {
        let expected = "&rt=red&rt=blue&rt=brn&rt=g&rt=org&rt=p&rt=pink&rt=y";
        assert_eq!(RouteFilter::All.to_suffix().unwrap(), expected);
        assert_eq!(
            RouteFilter::Tokens(Vec::new()).to_suffix().unwrap(),
            expected
        );
    }

    #[test]
    fn test_duplicates_preserved() {
        let filter = RouteFilter::tokens(["red", "red"]);
        assert_eq!(filter.to_suffix().unwrap(), "&rt=red&rt=red");
    }

    #[test]
    fn test_unknown_tokens_rejected() {
        assert_eq!(
            RouteFilter::tokens(["red", "silver"]).to_suffix(),
            Err(ValidationError::UnknownRouteToken("silver".into()))
        );
        assert_eq!(
            RouteFilter::from_fragment("&rt=red&rt=xyz").to_suffix(),
            Err(ValidationError::UnknownRouteToken("xyz".into()))
        );
        assert_eq!(
            RouteFilter::from_fragment("&rt=").to_suffix(),
            Err(ValidationError::EmptyRouteToken)
        );
        // names are not accepted inside a raw suffix
        assert!(RouteFilter::from_fragment("&rt=brown").to_suffix().is_err());
    }

    #[test]
    fn test_positions_url() {
        let url = positions_url(&config(), &RouteFilter::tokens(["red"])).unwrap();
        assert_eq!(url, "http://host/pos?key=KEY&rt=red&outputType=JSON");
    }

    #[test]
    fn test_positions_url_is_deterministic() {
        let filter = RouteFilter::tokens(["pink", "y", "pink"]);
        let a = positions_url(&config(), &filter).unwrap();
        let b = positions_url(&config(), &filter).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_key_is_encoded_and_cannot_add_parameters() {
        let config = ApiConfig::new("ab&rt=zz#9").with_positions_url("http://host/pos");
        let url = positions_url(&config, &RouteFilter::tokens(["red"])).unwrap();
        assert_eq!(
            url,
            "http://host/pos?key=ab%26rt%3Dzz%239&rt=red&outputType=JSON"
        );

        let parsed = Url::parse(&url).unwrap();
        assert_eq!(parsed.fragment(), None);
        let routes: Vec<_> = parsed
            .query_pairs()
            .filter(|(k, _)| k == "rt")
            .map(|(_, v)| v.into_owned())
            .collect();
        assert_eq!(routes, ["red"]);
        let key = parsed.query_pairs().find(|(k, _)| k == "key").unwrap().1;
        assert_eq!(key, "ab&rt=zz#9");
    }

    #[test]
    fn test_invalid_endpoint() {
        let config = ApiConfig::new("KEY").with_positions_url("not a url");
        assert_eq!(
            positions_url(&config, &RouteFilter::All),
            Err(ValidationError::InvalidEndpoint("not a url".into()))
        );
    }

    #[test]
    fn test_write_mode_parsing() {
        assert_eq!("w".parse::<WriteMode>().unwrap(), WriteMode::Write);
        assert_eq!("a".parse::<WriteMode>().unwrap(), WriteMode::Append);
        assert_eq!(
            "w+".parse::<WriteMode>(),
            Err(ValidationError::UnknownWriteMode("w+".into()))
        );
        assert_eq!(
            "write".parse::<WriteMode>(),
            Err(ValidationError::UnknownWriteMode("write".into()))
        );
        assert!("append".parse::<WriteMode>().is_err());
        assert!("A".parse::<WriteMode>().is_err());
    }

    #[test]
    fn test_arrivals_url() {
        let config = ApiConfig::new("KEY").with_arrivals_url("http://host/arr");
        let url = ArrivalsQuery::station(40380)
            .with_max(3)
            .with_route(Route::Brown)
            .to_url(&config)
            .unwrap();
        assert_eq!(
            url,
            "http://host/arr?key=KEY&mapid=40380&max=3&rt=brn&outputType=JSON"
        );

        assert_eq!(
            ArrivalsQuery::default().to_url(&config),
            Err(ValidationError::MissingParameter("mapid or stpid"))
        );
        assert!(ArrivalsQuery::stop(30162).with_max(0).to_url(&config).is_err());
    }

    #[test]
    fn test_follow_url() {
        let config = ApiConfig::new("KEY").with_follow_url("http://host/follow");
        assert_eq!(
            FollowQuery::new("831").to_url(&config).unwrap(),
            "http://host/follow?key=KEY&runnumber=831&outputType=JSON"
        );
        assert!(FollowQuery::new("").to_url(&config).is_err());
        assert!(FollowQuery::new("8a1").to_url(&config).is_err());
    }

    #[test]
    fn test_redact_key() {
        assert_eq!(
            redact_key("http://host/pos?key=SECRET&rt=red&outputType=JSON"),
            "http://host/pos?key=REDACTED&rt=red&outputType=JSON"
        );
        assert_eq!(redact_key("http://host/pos?key=SECRET"), "http://host/pos?key=REDACTED");
        assert_eq!(redact_key("http://host/pos"), "http://host/pos");
    }

    #[test]
    fn test_redact_key_hides_every_part_of_an_awkward_key() {
        let config = ApiConfig::new("ab&rt=zz#9").with_positions_url("http://host/pos");
        let url = positions_url(&config, &RouteFilter::tokens(["red"])).unwrap();
        let logged = redact_key(&url);
        assert_eq!(logged, "http://host/pos?key=REDACTED&rt=red&outputType=JSON");
        assert!(!logged.contains("zz"));

        // a hand-built, unencoded URL still loses its fragment
        let logged = redact_key("http://host/pos?key=ab&rt=red#9");
        assert!(!logged.contains('#'));
        assert!(!logged.contains("ab"));
    }
}
