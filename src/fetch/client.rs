use anyhow::Result;

/// Transport used by the fetcher. One blocking GET per call.
pub trait HttpClient {
    fn get_bytes(&self, url: &str) -> Result<Vec<u8>>;
}
