//! Typed client for the hosted PostgREST / GoTrue backend.

use std::sync::Arc;

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use crate::auth::{AccessToken, AuthGateway};
use crate::repository::{CategoryRepository, FolderRepository, QuestionRepository, Storage, StorageError};

mod auth;
mod query;
mod repos;
mod rows;

pub use auth::RemoteAuth;
pub use query::RestQuery;
pub use repos::RemoteRepository;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RemoteInitError {
    #[error("invalid backend url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("backend url must be http or https: {0}")]
    UnsupportedScheme(String),

    #[error("an anon key is required for the hosted backend")]
    MissingAnonKey,

    #[error(transparent)]
    Client(#[from] reqwest::Error),
}

/// Where the hosted backend lives and the public key it expects.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    base_url: Url,
    anon_key: String,
}

impl RemoteConfig {
    /// # Errors
    ///
    /// Returns `RemoteInitError` if the URL does not parse or the key is blank.
    pub fn new(base_url: &str, anon_key: impl Into<String>) -> Result<Self, RemoteInitError> {
        let mut base_url = Url::parse(base_url.trim())?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(RemoteInitError::UnsupportedScheme(base_url.scheme().to_owned()));
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let anon_key = anon_key.into();
        if anon_key.trim().is_empty() {
            return Err(RemoteInitError::MissingAnonKey);
        }
        Ok(Self { base_url, anon_key })
    }

    fn rest_base(&self) -> Result<Url, RemoteInitError> {
        Ok(self.base_url.join("rest/v1/")?)
    }

    fn auth_base(&self) -> Result<Url, RemoteInitError> {
        Ok(self.base_url.join("auth/v1/")?)
    }
}

//
// ─── REST CLIENT ───────────────────────────────────────────────────────────────
//

#[derive(Debug, serde::Deserialize, Default)]
struct ErrorBody {
    message: Option<String>,
    msg: Option<String>,
    error_description: Option<String>,
}

/// Pulls a human readable message out of a backend error body.
pub(crate) fn error_message(body: &str) -> String {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    parsed
        .message
        .or(parsed.error_description)
        .or(parsed.msg)
        .unwrap_or_else(|| body.trim().to_owned())
}

/// Maps a non-success status and body onto `StorageError`.
pub(crate) fn status_error(status: StatusCode, body: &str) -> StorageError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => StorageError::Unauthorized,
        StatusCode::CONFLICT => StorageError::Conflict,
        _ => StorageError::Remote {
            status: status.as_u16(),
            message: error_message(body),
        },
    }
}

/// Decodes a PostgREST response body into rows.
pub(crate) fn decode_rows<T: DeserializeOwned>(
    status: StatusCode,
    body: &str,
) -> Result<Vec<T>, StorageError> {
    if !status.is_success() {
        return Err(status_error(status, body));
    }
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(body).map_err(|e| StorageError::Serialization(e.to_string()))
}

fn transport(e: reqwest::Error) -> StorageError {
    StorageError::Connection(e.to_string())
}

/// Thin wrapper around `reqwest` that signs requests and decodes rows.
#[derive(Clone)]
pub struct RestClient {
    http: Client,
    rest_base: Url,
    anon_key: String,
    token: AccessToken,
}

impl RestClient {
    fn request(&self, method: Method, table: &str, query: &RestQuery) -> Result<RequestBuilder, StorageError> {
        let url = self
            .rest_base
            .join(table)
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let bearer = self.token.get().unwrap_or_else(|| self.anon_key.clone());
        Ok(self
            .http
            .request(method, url)
            .query(query.params())
            .header("apikey", &self.anon_key)
            .bearer_auth(bearer))
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<Vec<T>, StorageError> {
        let response = builder.send().await.map_err(transport)?;
        let status = response.status();
        let body = response.text().await.map_err(transport)?;
        decode_rows(status, &body)
    }

    /// `GET` with filters.
    pub(crate) async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &RestQuery,
    ) -> Result<Vec<T>, StorageError> {
        log::debug!("GET {table} {:?}", query.params());
        self.send(self.request(Method::GET, table, query)?).await
    }

    /// `POST` one row, returning the stored representation.
    pub(crate) async fn insert<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        table: &str,
        body: &B,
    ) -> Result<T, StorageError> {
        let builder = self
            .request(Method::POST, table, &RestQuery::empty())?
            .header("Prefer", "return=representation")
            .json(body);
        self.send::<T>(builder)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| StorageError::Serialization(format!("insert into {table} returned no row")))
    }

    /// `PATCH` the filtered rows; an empty result means nothing matched.
    pub(crate) async fn update<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        table: &str,
        query: &RestQuery,
        body: &B,
    ) -> Result<T, StorageError> {
        let builder = self
            .request(Method::PATCH, table, query)?
            .header("Prefer", "return=representation")
            .json(body);
        self.send::<T>(builder)
            .await?
            .into_iter()
            .next()
            .ok_or(StorageError::NotFound)
    }

    /// `DELETE` the filtered rows; an empty result means nothing matched.
    pub(crate) async fn delete(&self, table: &str, query: &RestQuery) -> Result<(), StorageError> {
        let builder = self
            .request(Method::DELETE, table, query)?
            .header("Prefer", "return=representation");
        let removed: Vec<serde_json::Value> = self.send(builder).await?;
        if removed.is_empty() {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}

impl Storage {
    /// Build a `Storage` that talks to the hosted backend.
    ///
    /// # Errors
    ///
    /// Returns `RemoteInitError` if the HTTP client cannot be built.
    pub fn remote(config: &RemoteConfig) -> Result<Self, RemoteInitError> {
        let http = Client::builder().build()?;
        let access_token = AccessToken::default();
        let client = RestClient {
            http: http.clone(),
            rest_base: config.rest_base()?,
            anon_key: config.anon_key.clone(),
            token: access_token.clone(),
        };
        let repo = RemoteRepository::new(client);
        let folders: Arc<dyn FolderRepository> = Arc::new(repo.clone());
        let categories: Arc<dyn CategoryRepository> = Arc::new(repo.clone());
        let questions: Arc<dyn QuestionRepository> = Arc::new(repo);
        let auth: Arc<dyn AuthGateway> =
            Arc::new(RemoteAuth::new(http, config.auth_base()?, config.anon_key.clone()));
        log::info!("using hosted backend at {}", config.base_url);
        Ok(Self {
            folders,
            categories,
            questions,
            auth,
            access_token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn config_normalizes_base_path() {
        let config = RemoteConfig::new("https://demo.example.co", "anon").unwrap();
        assert_eq!(
            config.rest_base().unwrap().as_str(),
            "https://demo.example.co/rest/v1/"
        );
        let nested = RemoteConfig::new("https://host/proxy", "anon").unwrap();
        assert_eq!(nested.auth_base().unwrap().as_str(), "https://host/proxy/auth/v1/");
    }

    #[test]
    fn config_rejects_bad_input() {
        assert!(matches!(
            RemoteConfig::new("https://demo.example.co", "  "),
            Err(RemoteInitError::MissingAnonKey)
        ));
        assert!(matches!(
            RemoteConfig::new("ftp://demo", "k"),
            Err(RemoteInitError::UnsupportedScheme(_))
        ));
        assert!(RemoteConfig::new("not a url", "k").is_err());
    }

    #[test]
    fn decode_rows_maps_statuses() {
        let rows: Vec<Value> = decode_rows(StatusCode::OK, "[{\"id\":1}]").unwrap();
        assert_eq!(rows.len(), 1);

        let empty: Vec<Value> = decode_rows(StatusCode::NO_CONTENT, "").unwrap();
        assert!(empty.is_empty());

        let err = decode_rows::<Value>(StatusCode::UNAUTHORIZED, "{}").unwrap_err();
        assert!(matches!(err, StorageError::Unauthorized));

        let err = decode_rows::<Value>(
            StatusCode::BAD_REQUEST,
            r#"{"message":"invalid input syntax for type uuid"}"#,
        )
        .unwrap_err();
        match err {
            StorageError::Remote { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "invalid input syntax for type uuid");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn error_message_falls_back_to_raw_body() {
        assert_eq!(error_message("gateway timeout"), "gateway timeout");
        assert_eq!(
            error_message(r#"{"error_description":"Invalid login credentials"}"#),
            "Invalid login credentials"
        );
    }
}
