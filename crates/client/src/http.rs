//! Shared HTTP client for every backend domain.
//!
//! One [`ApiClient`] is built per backend host. It owns the two behaviors
//! every service relies on:
//!
//! - **Outgoing**: when the session holds a token, it is attached as
//!   `Authorization: Bearer <token>` on every request.
//! - **Incoming**: a 401 on an authenticated call clears the session and
//!   fires the login redirect once, then surfaces
//!   [`ClientError::Unauthorized`].
//!
//! Every request goes to `<base>/api/v1<path>` and is attempted exactly
//! once; there are no retries and no client-side timeouts.

use std::sync::Arc;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder, StatusCode};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};
use url::Url;

use crate::envelope::ApiResponse;
use crate::error::{ClientError, ErrorBody, generic_message};
use crate::query::QueryParams;
use crate::redirect::LoginRedirect;
use crate::session::Session;

/// Version prefix shared by every backend route.
pub const API_PREFIX: &str = "/api/v1";

/// How a request treats a 401 response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Credential exchange (register, login, refresh). A 401 here means
    /// the submitted credentials were rejected; the session is untouched.
    Public,
    /// Everything else. A 401 evicts the session and redirects.
    Authenticated,
}

/// HTTP client bound to one backend host.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    api_root: String,
    session: Session,
    redirect: Arc<dyn LoginRedirect>,
    login_path: String,
}

impl ApiClient {
    /// Create a client for the backend at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(
        base_url: &Url,
        session: Session,
        redirect: Arc<dyn LoginRedirect>,
        login_path: impl Into<String>,
    ) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(concat!("ddd-micro-client/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let api_root = format!("{}{API_PREFIX}", base_url.as_str().trim_end_matches('/'));

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                api_root,
                session,
                redirect,
                login_path: login_path.into(),
            }),
        })
    }

    /// The session this client reads tokens from.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.inner.session
    }

    /// Root every path is appended to, e.g. `http://localhost:8081/api/v1`.
    #[must_use]
    pub fn api_root(&self) -> &str {
        &self.inner.api_root
    }

    /// Execute an authenticated GET.
    ///
    /// # Errors
    ///
    /// See [`ClientError`].
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<ApiResponse<T>, ClientError> {
        self.get_with_query(path, &QueryParams::new()).await
    }

    /// Execute an authenticated GET with query parameters.
    ///
    /// # Errors
    ///
    /// See [`ClientError`].
    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &QueryParams,
    ) -> Result<ApiResponse<T>, ClientError> {
        let request = self.request(Method::GET, path, query)?;
        self.execute(request, Access::Authenticated).await
    }

    /// Execute an authenticated POST with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ClientError`].
    pub async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse<T>, ClientError> {
        self.post_as(path, body, Access::Authenticated).await
    }

    /// Execute a POST with a JSON body under an explicit [`Access`] mode.
    ///
    /// # Errors
    ///
    /// See [`ClientError`].
    pub async fn post_as<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
        access: Access,
    ) -> Result<ApiResponse<T>, ClientError> {
        let request = self.request(Method::POST, path, &QueryParams::new())?.json(body);
        self.execute(request, access).await
    }

    /// Execute an authenticated POST without a body.
    ///
    /// # Errors
    ///
    /// See [`ClientError`].
    pub async fn post_empty<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<ApiResponse<T>, ClientError> {
        let request = self.request(Method::POST, path, &QueryParams::new())?;
        self.execute(request, Access::Authenticated).await
    }

    /// Execute an authenticated PUT with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ClientError`].
    pub async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse<T>, ClientError> {
        self.put_with_query(path, &QueryParams::new(), body).await
    }

    /// Execute an authenticated PUT with query parameters and a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ClientError`].
    pub async fn put_with_query<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        query: &QueryParams,
        body: &B,
    ) -> Result<ApiResponse<T>, ClientError> {
        let request = self.request(Method::PUT, path, query)?.json(body);
        self.execute(request, Access::Authenticated).await
    }

    /// Execute an authenticated DELETE.
    ///
    /// # Errors
    ///
    /// See [`ClientError`].
    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<ApiResponse<T>, ClientError> {
        let request = self.request(Method::DELETE, path, &QueryParams::new())?;
        self.execute(request, Access::Authenticated).await
    }

    /// Build the full URL for `path` plus any query parameters.
    fn url(&self, path: &str, query: &QueryParams) -> Result<Url, ClientError> {
        let raw = format!("{}{path}", self.inner.api_root);
        let mut url = Url::parse(&raw).map_err(|e| ClientError::InvalidUrl(format!("{raw}: {e}")))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.pairs());
        }
        Ok(url)
    }

    /// Start a request, attaching the cached bearer token if there is one.
    fn request(
        &self,
        method: Method,
        path: &str,
        query: &QueryParams,
    ) -> Result<RequestBuilder, ClientError> {
        let url = self.url(path, query)?;
        debug!(%method, %url, "Dispatching request");

        let mut request = self.inner.client.request(method, url);
        if let Some(token) = self.inner.session.token() {
            request = request.bearer_auth(token.expose_secret());
        }
        Ok(request)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        access: Access,
    ) -> Result<ApiResponse<T>, ClientError> {
        let response = request.send().await?;
        self.handle_response(response, access).await
    }

    /// Decode a 2xx envelope or map the failure.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
        access: Access,
    ) -> Result<ApiResponse<T>, ClientError> {
        let status = response.status();

        if status.is_success() {
            let body = response.bytes().await?;
            if body.iter().all(u8::is_ascii_whitespace) {
                return Ok(ApiResponse {
                    success: true,
                    message: String::new(),
                    data: None,
                });
            }
            return serde_json::from_slice(&body)
                .map_err(|e| ClientError::Parse(format!("Failed to parse response: {e}")));
        }

        Err(self.parse_error(response, access).await)
    }

    /// Map a non-2xx response to a [`ClientError`].
    async fn parse_error(&self, response: reqwest::Response, access: Access) -> ClientError {
        let status = response.status();
        let code = status.as_u16();

        let message = match response.bytes().await {
            Ok(body) => serde_json::from_slice::<ErrorBody>(&body)
                .unwrap_or_default()
                .into_message(code),
            Err(_) => generic_message(code),
        };

        if status == StatusCode::UNAUTHORIZED && access == Access::Authenticated {
            self.evict();
            return ClientError::Unauthorized { message };
        }

        ClientError::Api {
            status: code,
            message,
        }
    }

    /// Clear the cached credentials and send the user to the login view.
    fn evict(&self) {
        warn!("Backend rejected credentials; clearing session");
        if let Err(e) = self.inner.session.clear() {
            error!(error = %e, "Failed to clear session after 401");
        }
        self.inner.redirect.redirect_to_login(&self.inner.login_path);
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("api_root", &self.inner.api_root)
            .field("login_path", &self.inner.login_path)
            .field("session", &self.inner.session)
            .finish_non_exhaustive()
    }
}
