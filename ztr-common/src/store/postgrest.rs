//! PostgREST client for the hosted students table
//!
//! Talks to the Supabase REST interface at `{store_url}/rest/v1/students`.
//! Every request carries the access key both as `apikey` and as a bearer token.

use async_trait::async_trait;
use reqwest::{header, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};
use tracing::debug;

use super::{StoreError, StudentStore};
use crate::models::{NewStudent, StudentRecord, STUDENTS_TABLE, STUDENT_COLUMNS};

const USER_AGENT: &str = concat!("ztr/", env!("CARGO_PKG_VERSION"));
/// Asks PostgREST for a single JSON object; zero or multiple rows yield 406
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";
const RETURN_REPRESENTATION: &str = "return=representation";

/// Error body returned by PostgREST
#[derive(Debug, Deserialize)]
struct PostgrestErrorBody {
    message: String,
}

/// Student store backed by a PostgREST endpoint
pub struct PostgrestStore {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl PostgrestStore {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, StoreError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, STUDENTS_TABLE)
    }

    fn request(&self, method: reqwest::Method) -> reqwest::RequestBuilder {
        self.http_client
            .request(method, self.table_url())
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// Turn a non-success response into `StoreError::Api`
    async fn api_error(response: reqwest::Response) -> StoreError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<PostgrestErrorBody>(&body)
            .map(|parsed| parsed.message)
            .unwrap_or(body);

        StoreError::Api { status, message }
    }

    /// Read a success body and decode it
    ///
    /// A connection lost while the body is still arriving is a transport
    /// failure; only a complete body that does not parse is a decode error.
    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, StoreError> {
        let body = response
            .bytes()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        serde_json::from_slice(&body).map_err(|e| StoreError::Decode(e.to_string()))
    }
}

#[async_trait]
impl StudentStore for PostgrestStore {
    async fn find_by_roll_number(
        &self,
        roll_number: &str,
    ) -> Result<Option<StudentRecord>, StoreError> {
        let filter = format!("eq.{}", roll_number);

        debug!(roll_number = %roll_number, "Querying students table");

        let response = self
            .request(reqwest::Method::GET)
            .header(header::ACCEPT, SINGLE_OBJECT)
            .query(&[("select", STUDENT_COLUMNS), ("roll_number", filter.as_str())])
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        let status = response.status();

        if status == StatusCode::NOT_ACCEPTABLE {
            return Ok(None);
        }

        if !status.is_success() {
            return Err(Self::api_error(response).await);
        }

        let record = Self::read_json::<StudentRecord>(response).await?;

        Ok(Some(record))
    }

    async fn insert_batch(&self, students: &[NewStudent]) -> Result<Vec<StudentRecord>, StoreError> {
        debug!(count = students.len(), "Inserting student batch");

        let response = self
            .request(reqwest::Method::POST)
            .header("Prefer", RETURN_REPRESENTATION)
            .json(students)
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        Self::read_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_url_strips_trailing_slash() {
        let store = PostgrestStore::new("https://example.supabase.co/", "key").unwrap();
        assert_eq!(
            store.table_url(),
            "https://example.supabase.co/rest/v1/students"
        );
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        // Port 9 (discard) on localhost is not expected to accept HTTP
        let store = PostgrestStore::new("http://127.0.0.1:9", "key").unwrap();
        let err = store.find_by_roll_number("1").await.unwrap_err();
        assert!(err.is_transport(), "expected transport error, got {:?}", err);
    }
}
