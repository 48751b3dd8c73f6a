mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::Result;
use serde_json::Value;
use tracing::debug;

use crate::parser::parse_body;
use crate::query::redact_key;

pub fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>> {
    debug!(url = %redact_key(url), "Sending request");
    let bytes = client.get_bytes(url)?;
    debug!(bytes = bytes.len(), "Response received");
    Ok(bytes)
}

/// Fetches `url` and decodes the body as JSON, returned unmodified.
pub fn fetch_json<C: HttpClient>(client: &C, url: &str) -> Result<Value> {
    let bytes = fetch_bytes(client, url)?;
    Ok(parse_body(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct StubClient {
        body: &'static str,
        seen: RefCell<Vec<String>>,
    }

    impl HttpClient for StubClient {
        fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
            self.seen.borrow_mut().push(url.to_string());
            Ok(self.body.as_bytes().to_vec())
        }
    }

    #[test]
    fn test_fetch_json_decodes_body() {
        let client = StubClient {
            body: r#"{"ctatt":{"tmst":"2024-01-01T12:00:00","errCd":"0"}}"#,
            seen: RefCell::new(Vec::new()),
        };
        let value = fetch_json(&client, "http://host/pos?key=K").unwrap();
        assert_eq!(value["ctatt"]["errCd"], "0");
        assert_eq!(client.seen.borrow().as_slice(), ["http://host/pos?key=K"]);
    }

    #[test]
    fn test_fetch_json_surfaces_decode_error() {
        let client = StubClient {
            body: "<html>Service Unavailable</html>",
            seen: RefCell::new(Vec::new()),
        };
        let err = fetch_json(&client, "http://host/pos").unwrap_err();
        assert!(err.downcast_ref::<serde_json::Error>().is_some());
    }
}
