//! The study server client and builder.

use std::time::Duration;

use reqwest::header::{COOKIE, HeaderMap, HeaderValue};
use reqwest::multipart::Form;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::actions::{ReviewActions, SpeechActions, TextActions};
use crate::error::{Error, Result};
use crate::request::ErrorBody;
use crate::types::DeckRoute;

/// Default URL of the study server.
const DEFAULT_URL: &str = "http://127.0.0.1:5001";

/// Default timeout for requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Cookie the server reads to identify the studying user.
const USER_COOKIE: &str = "anki_user";

/// The main client for interacting with the study server.
///
/// # Example
///
/// ```no_run
/// use drillkit::{DeckRoute, StudyClient};
///
/// # async fn example() -> drillkit::Result<()> {
/// let client = StudyClient::builder().user("feng").build()?;
///
/// if let Some(card) = client.review(DeckRoute::English).next().await? {
///     println!("{} card {}", card.content.kind(), card.card_id);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct StudyClient {
    http_client: Client,
    base_url: String,
}

impl StudyClient {
    /// Create a builder for custom client configuration.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// The server URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Access review operations (next card, reveal, answer) for a deck.
    pub fn review(&self, route: DeckRoute) -> ReviewActions<'_> {
        ReviewActions {
            client: self,
            route,
        }
    }

    /// Access text operations (diff, translation).
    pub fn text(&self) -> TextActions<'_> {
        TextActions { client: self }
    }

    /// Access pronunciation analysis.
    pub fn speech(&self) -> SpeechActions<'_> {
        SpeechActions { client: self }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET a JSON document where 404 means "nothing there".
    pub(crate) async fn get_optional<R>(&self, path: &str) -> Result<Option<R>>
    where
        R: DeserializeOwned,
    {
        let response = self.send(self.http_client.get(self.url(path))).await?;
        if response.status() == StatusCode::NOT_FOUND {
            debug!(path, "server reported nothing found");
            return Ok(None);
        }
        decode(response).await.map(Some)
    }

    /// POST a JSON body and decode a JSON response.
    pub(crate) async fn post<P, R>(&self, path: &str, body: &P) -> Result<R>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self
            .send(self.http_client.post(self.url(path)).json(body))
            .await?;
        decode(response).await
    }

    /// POST without a body, ignoring any successful response content.
    pub(crate) async fn post_empty(&self, path: &str) -> Result<()> {
        let response = self.send(self.http_client.post(self.url(path))).await?;
        check_status(response).await.map(|_| ())
    }

    /// POST a multipart form and decode a JSON response.
    pub(crate) async fn post_multipart<R>(&self, path: &str, form: Form) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let response = self
            .send(self.http_client.post(self.url(path)).multipart(form))
            .await?;
        decode(response).await
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        request.send().await.map_err(|e| {
            if e.is_connect() {
                Error::ConnectionRefused
            } else {
                Error::Http(e)
            }
        })
    }
}

/// Turn a non-success response into [`Error::Server`] or [`Error::Forbidden`].
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .ok()
        .and_then(|body| body.error)
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });
    debug!(status = status.as_u16(), %message, "server returned an error");

    if status == StatusCode::FORBIDDEN {
        Err(Error::Forbidden(message))
    } else {
        Err(Error::Server {
            status: status.as_u16(),
            message,
        })
    }
}

async fn decode<R>(response: Response) -> Result<R>
where
    R: DeserializeOwned,
{
    let response = check_status(response).await?;
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Builder for creating a customized [`StudyClient`].
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use drillkit::StudyClient;
///
/// let client = StudyClient::builder()
///     .url("http://localhost:5001")
///     .user("yisen")
///     .timeout(Duration::from_secs(60))
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    base_url: String,
    user: Option<String>,
    timeout: Duration,
}

impl ClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_URL.to_string(),
            user: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the study server URL.
    ///
    /// Defaults to `http://127.0.0.1:5001`. A trailing slash is ignored.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the user the server should study as.
    ///
    /// Sent as the `anki_user` cookie on every request.
    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Set the request timeout.
    ///
    /// Defaults to 30 seconds.
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = duration;
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<StudyClient> {
        let mut headers = HeaderMap::new();
        if let Some(user) = self.user.as_deref().map(str::trim).filter(|u| !u.is_empty()) {
            let cookie = HeaderValue::from_str(&format!("{}={}", USER_COOKIE, user.to_lowercase()))
                .map_err(|_| Error::Config(format!("user name '{}' is not a valid cookie", user)))?;
            headers.insert(COOKIE, cookie);
        }

        let http_client = Client::builder()
            .timeout(self.timeout)
            .default_headers(headers)
            .build()?;

        Ok(StudyClient {
            http_client,
            base_url: self.base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
