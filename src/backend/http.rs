//! Remote document service over HTTP.
//!
//! Each record is a JSON document addressed as
//! `{endpoint}/tables/{table}/items/{id}`:
//!
//! | Operation | Request | Success | Absent |
//! |-----------|---------|---------|--------|
//! | fetch | `GET` | `200` with the document | `404` |
//! | write | `PUT` with the document | any `2xx` | n/a |
//! | erase | `DELETE` | any `2xx` | `404` (tolerated) |
//!
//! Every other status, and every transport failure, becomes
//! [`EnviError::Backend`]. No retries happen here.

use std::time::Duration;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::StatusCode;
use reqwest::blocking::Client;

use crate::backend::{Backend, Fetched};
use crate::error::EnviError;
use crate::record::Record;

/// Path segment encoding: everything but RFC 3986 unreserved characters.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    endpoint: String,
    table: String,
}

impl HttpBackend {
    pub fn new(endpoint: &str, table: &str, timeout: Duration) -> Result<Self, EnviError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EnviError::backend("connect", endpoint, e))?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            table: table.to_string(),
        })
    }

    fn item_url(&self, id: &str) -> String {
        format!(
            "{}/tables/{}/items/{}",
            self.endpoint,
            utf8_percent_encode(&self.table, SEGMENT),
            utf8_percent_encode(id, SEGMENT)
        )
    }
}

fn unexpected_status(operation: &'static str, id: &str, status: StatusCode) -> EnviError {
    EnviError::backend(operation, id, format!("unexpected status {status}"))
}

impl Backend for HttpBackend {
    fn fetch(&self, id: &str) -> Result<Fetched, EnviError> {
        let url = self.item_url(id);
        tracing::debug!(%url, "fetching record");
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| EnviError::backend("fetch", id, e))?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(Fetched::Absent),
            status if status.is_success() => {
                let record: Record = response
                    .json()
                    .map_err(|e| EnviError::backend("decode", id, e))?;
                Ok(Fetched::Found(record))
            }
            status => Err(unexpected_status("fetch", id, status)),
        }
    }

    fn write(&mut self, record: &Record) -> Result<(), EnviError> {
        let url = self.item_url(&record.id);
        tracing::debug!(%url, "writing record");
        let response = self
            .client
            .put(&url)
            .json(record)
            .send()
            .map_err(|e| EnviError::backend("write", &record.id, e))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(unexpected_status("write", &record.id, status))
        }
    }

    fn erase(&mut self, id: &str) -> Result<(), EnviError> {
        let url = self.item_url(id);
        tracing::debug!(%url, "erasing record");
        let response = self
            .client
            .delete(&url)
            .send()
            .map_err(|e| EnviError::backend("erase", id, e))?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(()),
            status if status.is_success() => Ok(()),
            status => Err(unexpected_status("erase", id, status)),
        }
    }
}
