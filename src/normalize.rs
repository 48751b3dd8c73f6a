//! Flattens a positions response into one record per train.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::ResponseError;
use crate::parser::{as_sequence, envelope};

/// Column names of a flattened positions row, in output order.
pub const COLUMNS: [&str; 19] = [
    "tmst",
    "errCd",
    "errNm",
    "route",
    "rn",
    "destSt",
    "destNm",
    "trDr",
    "nextStaId",
    "nextStpId",
    "nextStaNm",
    "prdt",
    "arrT",
    "isApp",
    "isDly",
    "flags",
    "lat",
    "lon",
    "heading",
];

/// One train from one fetch, with the envelope fields and its route copied in.
///
/// Values are passed through as decoded; the API sends nearly everything as
/// text, and `flags` is usually `null`. Field order matches [`COLUMNS`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatRecord {
    pub tmst: Value,
    pub err_cd: Value,
    pub err_nm: Value,
    pub route: Value,
    pub rn: Value,
    pub dest_st: Value,
    pub dest_nm: Value,
    pub tr_dr: Value,
    pub next_sta_id: Value,
    pub next_stp_id: Value,
    pub next_sta_nm: Value,
    pub prdt: Value,
    pub arr_t: Value,
    pub is_app: Value,
    pub is_dly: Value,
    pub flags: Value,
    pub lat: Value,
    pub lon: Value,
    pub heading: Value,
}

impl FlatRecord {
    /// Field values in [`COLUMNS`] order.
    pub fn values(&self) -> [&Value; 19] {
        [
            &self.tmst,
            &self.err_cd,
            &self.err_nm,
            &self.route,
            &self.rn,
            &self.dest_st,
            &self.dest_nm,
            &self.tr_dr,
            &self.next_sta_id,
            &self.next_stp_id,
            &self.next_sta_nm,
            &self.prdt,
            &self.arr_t,
            &self.is_app,
            &self.is_dly,
            &self.flags,
            &self.lat,
            &self.lon,
            &self.heading,
        ]
    }
}

/// Looks up `field` and requires it to be a scalar (text, number, bool, null).
fn required(
    map: &Map<String, Value>,
    field: &'static str,
    scope: impl Fn() -> String,
) -> Result<Value, ResponseError> {
    match map.get(field) {
        None => Err(ResponseError::MissingField {
            scope: scope(),
            field,
        }),
        Some(Value::Array(_) | Value::Object(_)) => Err(ResponseError::UnexpectedShape {
            scope: format!("field '{field}' of {}", scope()),
            expected: "a scalar value",
        }),
        Some(value) => Ok(value.clone()),
    }
}

fn as_object<'a>(
    value: &'a Value,
    scope: impl Fn() -> String,
) -> Result<&'a Map<String, Value>, ResponseError> {
    value.as_object().ok_or_else(|| ResponseError::UnexpectedShape {
        scope: scope(),
        expected: "an object",
    })
}

/// Flattens a decoded positions response into [`FlatRecord`]s.
///
/// Records follow the order of route groups, then trains within each group.
/// Groups without trains contribute nothing.
///
/// # Errors
///
/// Returns [`ResponseError`] if the envelope is missing, if an envelope or
/// train field is absent or not a scalar, or if a group or train is not an
/// object.
pub fn flatten_positions(root: &Value) -> Result<Vec<FlatRecord>, ResponseError> {
    let env = envelope(root)?;
    let tmst = required(env, "tmst", || "envelope".into())?;
    let err_cd = required(env, "errCd", || "envelope".into())?;
    let err_nm = required(env, "errNm", || "envelope".into())?;

    let groups = as_sequence(env.get("route"), || "envelope member 'route'".into())?;
    let mut records = Vec::new();

    for (gi, group) in groups.into_iter().enumerate() {
        let group = as_object(group, || format!("route group {gi}"))?;
        if group.is_empty() {
            continue;
        }

        let trains = as_sequence(group.get("train"), || format!("route group {gi}"))?;
        if trains.is_empty() {
            continue;
        }
        let route = required(group, "@name", || format!("route group {gi}"))?;

        for (ti, train) in trains.into_iter().enumerate() {
            let scope = || format!("train entry {ti} of route {route}");
            let train = as_object(train, scope)?;
            let take = |field: &'static str| required(train, field, scope);

            records.push(FlatRecord {
                tmst: tmst.clone(),
                err_cd: err_cd.clone(),
                err_nm: err_nm.clone(),
                route: route.clone(),
                rn: take("rn")?,
                dest_st: take("destSt")?,
                dest_nm: take("destNm")?,
                tr_dr: take("trDr")?,
                next_sta_id: take("nextStaId")?,
                next_stp_id: take("nextStpId")?,
                next_sta_nm: take("nextStaNm")?,
                prdt: take("prdt")?,
                arr_t: take("arrT")?,
                is_app: take("isApp")?,
                is_dly: take("isDly")?,
                flags: take("flags")?,
                lat: take("lat")?,
                lon: take("lon")?,
                heading: take("heading")?,
            });
        }
    }

    debug!(records = records.len(), "Flattened positions response");
    Ok(records)
}
