//! Route selection to CSV rows: build, fetch, flatten, write.

use anyhow::Result;
use std::path::Path;
use tracing::{info, warn};

use crate::config::ApiConfig;
use crate::fetch::{HttpClient, fetch_json};
use crate::normalize::{FlatRecord, flatten_positions};
use crate::output::write_records;
use crate::parser::{envelope, error_code};
use crate::query::{RouteFilter, WriteMode, positions_url};
use crate::reference::ApiFamily;
use crate::reference::errors::error_info;

/// Fetches current train positions for `filter` and flattens them.
///
/// The filter is validated before any request is sent.
pub fn fetch_positions<C: HttpClient>(
    client: &C,
    config: &ApiConfig,
    filter: &RouteFilter,
) -> Result<Vec<FlatRecord>> {
    let url = positions_url(config, filter)?;
    let body = fetch_json(client, &url)?;

    let env = envelope(&body)?;
    match error_code(env) {
        Some(0) | None => {}
        Some(code) => {
            let reference = error_info(ApiFamily::Positions, code)
                .map(|info| info.message)
                .unwrap_or("undocumented error code");
            warn!(
                err_cd = code,
                err_nm = %env.get("errNm").unwrap_or(&serde_json::Value::Null),
                reference,
                "Positions API reported an error"
            );
        }
    }

    Ok(flatten_positions(&body)?)
}

/// Writes current train positions for `filter` to the CSV file at `path`.
///
/// Returns the number of data rows written. Nothing is fetched or written if
/// the filter is invalid; nothing is written if the fetch fails.
#[tracing::instrument(skip_all, fields(path = %path.as_ref().display(), %mode, ?filter))]
pub fn write_positions_csv<C: HttpClient>(
    client: &C,
    config: &ApiConfig,
    path: impl AsRef<Path>,
    mode: WriteMode,
    filter: &RouteFilter,
) -> Result<usize> {
    let records = fetch_positions(client, config, filter)?;
    write_records(path.as_ref(), mode, &records)?;

    info!(rows = records.len(), "Positions written");
    Ok(records.len())
}
