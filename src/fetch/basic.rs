use super::client::HttpClient;
use anyhow::Result;

/// [`HttpClient`] backed by a blocking `reqwest` client with default settings.
///
/// No retries and no timeout beyond the transport default. A non-2xx status
/// is returned as the `reqwest::Error` produced by `error_for_status`.
pub struct BasicClient(reqwest::blocking::Client);

impl BasicClient {
    pub fn new() -> Self {
        Self(reqwest::blocking::Client::new())
    }
}

impl Default for BasicClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for BasicClient {
    fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let resp = self.0.get(url).send()?.error_for_status()?;
        Ok(resp.bytes()?.to_vec())
    }
}
