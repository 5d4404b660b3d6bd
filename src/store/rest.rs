//! HTTP client for a PostgREST-style journal table.
//!
//! Requests go to `{base_url}/rest/v1/{table}` and carry the API key both as
//! the `apikey` header and as a bearer token.

use super::{EntryStore, NewEntry};
use crate::constants::{DATE_FORMAT_ISO, REST_PATH_PREFIX};
use crate::entry::{EntryId, JournalEntry};
use crate::errors::PersistenceError;
use chrono::NaiveDate;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::StatusCode;
use std::fmt;
use tracing::debug;

/// Client for the journal table of the REST service.
pub struct RestStore {
    base_url: String,
    api_key: String,
    table: String,
    client: Client,
}

impl fmt::Debug for RestStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestStore")
            .field("base_url", &self.base_url)
            .field("api_key", &crate::constants::REDACTED_PLACEHOLDER)
            .field("table", &self.table)
            .finish()
    }
}

impl RestStore {
    /// Creates a client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Service root (e.g., "https://abc.supabase.co"); a trailing slash is ignored
    /// * `api_key` - Key sent with every request
    /// * `table` - Table holding the entries
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            table: table.into(),
            client: Client::new(),
        }
    }

    fn table_url(&self) -> String {
        format!("{}/{}/{}", self.base_url, REST_PATH_PREFIX, self.table)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// Sends `request` and turns non-success statuses into errors.
    fn send(&self, request: RequestBuilder, what: &str) -> Result<Response, PersistenceError> {
        let response = self
            .authorized(request)
            .send()
            .map_err(PersistenceError::Offline)?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_text = response.text().unwrap_or_default();
        if status == StatusCode::NOT_FOUND {
            return Err(PersistenceError::NotFound(what.to_string()));
        }
        Err(PersistenceError::Rejected {
            status: status.as_u16(),
            message: error_text,
        })
    }

    fn parse_rows(response: Response, what: &str) -> Result<Vec<JournalEntry>, PersistenceError> {
        response.json().map_err(|e| {
            PersistenceError::InvalidResponse(format!("Failed to parse {}: {}", what, e))
        })
    }
}

impl EntryStore for RestStore {
    fn query_entries(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<JournalEntry>, PersistenceError> {
        debug!("Querying {} from {} to {}", self.table, start, end);

        let request = self.client.get(self.table_url()).query(&[
            ("select", "*".to_string()),
            ("date", format!("gte.{}", start.format(DATE_FORMAT_ISO))),
            ("date", format!("lte.{}", end.format(DATE_FORMAT_ISO))),
            ("order", "created_at.desc".to_string()),
        ]);
        let response = self.send(request, &format!("table {}", self.table))?;
        let entries = Self::parse_rows(response, "entry list")?;

        debug!("Received {} entries", entries.len());
        Ok(entries)
    }

    fn get_entry(&self, id: &EntryId) -> Result<Option<JournalEntry>, PersistenceError> {
        debug!("Fetching entry {}", id);

        let request = self
            .client
            .get(self.table_url())
            .query(&[("select", "*".to_string()), ("id", format!("eq.{}", id))]);
        let response = match self.send(request, &id.to_string()) {
            Ok(response) => response,
            Err(PersistenceError::NotFound(_)) => return Ok(None),
            Err(e) => return Err(e),
        };

        Ok(Self::parse_rows(response, "entry")?.into_iter().next())
    }

    fn insert_entry(&self, entry: &NewEntry) -> Result<JournalEntry, PersistenceError> {
        debug!("Inserting entry dated {}", entry.date);

        let request = self
            .client
            .post(self.table_url())
            .header("Prefer", "return=representation")
            .json(&entry.to_row());
        let response = self.send(request, &format!("table {}", self.table))?;

        Self::parse_rows(response, "inserted entry")?
            .into_iter()
            .next()
            .ok_or_else(|| {
                PersistenceError::InvalidResponse(
                    "Service returned no row for the inserted entry".to_string(),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_url_ignores_trailing_slash() {
        let store = RestStore::new("http://localhost:54321/", "key", "journals");
        assert_eq!(store.table_url(), "http://localhost:54321/rest/v1/journals");
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let store = RestStore::new("http://localhost:54321", "super-secret", "journals");
        let debug = format!("{:?}", store);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
