//! Blocking, single-request HTTP fetching.
//!
//! Checks issue exactly one GET per run. Each call to [`get`] spins up a current-thread Tokio runtime, performs
//! the request through a hyper client and tears everything down again before returning, so no connection
//! outlives the call regardless of how it ends.
use std::{fmt, io, time::Duration};

use ::http::{header::InvalidHeaderValue, uri::InvalidUri, uri::Scheme};
use base64::prelude::{Engine as _, BASE64_STANDARD};
use http_body_util::{BodyExt, Collected, Empty};
use hyper::{
    header::{HeaderValue, AUTHORIZATION, PROXY_AUTHORIZATION},
    Method, Request, Uri,
};
pub use hyper::{body::Bytes, StatusCode};
use hyper_rustls::HttpsConnectorBuilder;
use hyper_util::{
    client::legacy::{
        connect::{proxy::Tunnel, Connect, HttpConnector},
        Client,
    },
    rt::TokioExecutor,
};
use thiserror::Error;
use tracing::debug;

use self::forward::ForwardProxy;
use crate::proxy::ProxyTarget;

mod forward;
mod tls;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Errors that could occur while fetching a URL.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The target URL could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] InvalidUri),

    /// A proxy URL could not be parsed.
    #[error("invalid proxy URL `{0}`")]
    InvalidProxy(String),

    /// The request did not complete within the configured timeout.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The platform root certificates could not be loaded.
    #[error("failed to load native root certificates: {0}")]
    TlsRoots(#[source] io::Error),

    /// The TLS client configuration could not be built.
    #[error("failed to configure TLS: {0}")]
    Tls(#[from] rustls::Error),

    /// The runtime driving the request could not be created.
    #[error("failed to create runtime for request: {0}")]
    Runtime(#[source] io::Error),

    /// The request could not be built.
    #[error("failed to build request: {0}")]
    Request(#[from] ::http::Error),

    /// Connecting, sending the request or receiving the response head failed.
    #[error("error sending request: {0}")]
    Client(#[from] hyper_util::client::legacy::Error),

    /// Reading the response body failed.
    #[error("failed to read response body: {0}")]
    Body(#[from] hyper::Error),
}

impl FetchError {
    /// Returns `true` if the request failed because it ran into its timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Timeout(_))
    }
}

/// Options controlling a single request.
#[derive(Clone, Debug)]
pub struct RequestOptions {
    timeout: Duration,
    auth: Option<Credentials>,
    verify_tls: bool,
    proxy: Option<ProxyTarget>,
}

impl RequestOptions {
    /// Creates a new [`RequestOptions`] with a 20 second timeout, TLS verification enabled, and neither
    /// authentication nor proxy.
    pub fn new() -> Self {
        RequestOptions { timeout: DEFAULT_TIMEOUT, auth: None, verify_tls: true, proxy: None }
    }

    /// Sets the timeout for the whole request, covering connect, response head and body.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sends HTTP basic authentication with the given credentials.
    #[must_use]
    pub fn with_basic_auth(mut self, username: &str, password: &str) -> Self {
        self.auth = Some(Credentials { username: username.to_owned(), password: password.to_owned() });
        self
    }

    /// Enables or disables verification of the server's TLS certificate.
    ///
    /// Defaults to `true`.
    #[must_use]
    pub fn with_tls_verification(mut self, verify: bool) -> Self {
        self.verify_tls = verify;
        self
    }

    /// Sends the request through the given proxy.
    ///
    /// `https://` targets are tunneled with `CONNECT`. Plain `http://` targets are sent to the proxy in absolute
    /// form, with the proxy credentials in a `Proxy-Authorization` header.
    #[must_use]
    pub fn with_proxy(mut self, proxy: Option<ProxyTarget>) -> Self {
        self.proxy = proxy;
        self
    }

    /// Returns the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns `true` if the server's TLS certificate is verified.
    pub fn verifies_tls(&self) -> bool {
        self.verify_tls
    }

    /// Returns the proxy the request is sent through, if any.
    pub fn proxy(&self) -> Option<&ProxyTarget> {
        self.proxy.as_ref()
    }
}

#[derive(Clone)]
struct Credentials {
    username: String,
    password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials").field("username", &self.username).field("password", &"***").finish()
    }
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// A fully read response.
#[derive(Clone, Debug)]
pub struct Response {
    /// Response status.
    pub status: StatusCode,

    /// Response body.
    pub body: Bytes,
}

/// Performs a blocking GET request against `url`.
///
/// Must not be called from within a Tokio runtime.
///
/// # Errors
///
/// If the URL is invalid, the request fails at the transport level, or it does not complete within the configured
/// timeout, an error variant will be returned. Non-success statuses are not errors and are returned as part of
/// the [`Response`].
pub fn get(url: &str, options: &RequestOptions) -> Result<Response, FetchError> {
    let uri = url.parse::<Uri>()?;
    let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build().map_err(FetchError::Runtime)?;

    let timeout = options.timeout;
    runtime.block_on(async move {
        match tokio::time::timeout(timeout, send(uri, options)).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout(timeout)),
        }
    })
}

async fn send(uri: Uri, options: &RequestOptions) -> Result<Response, FetchError> {
    let tls = if options.verify_tls {
        HttpsConnectorBuilder::new().with_native_roots().map_err(FetchError::TlsRoots)?
    } else {
        HttpsConnectorBuilder::new().with_tls_config(tls::insecure_client_config()?)
    };

    let mut http = HttpConnector::new();
    http.enforce_http(false);

    match &options.proxy {
        Some(proxy) if uri.scheme() == Some(&Scheme::HTTPS) => {
            debug!(proxy = %proxy.uri(), target = %uri, "tunneling request through proxy");

            let mut tunnel = Tunnel::new(proxy.uri().clone(), http);
            if let Some(auth) = proxy.auth() {
                tunnel = tunnel.with_auth(auth.clone());
            }
            let connector = tls.https_or_http().enable_http1().wrap_connector(tunnel);
            request(connector, uri, options, None).await
        }
        Some(proxy) => {
            debug!(proxy = %proxy.uri(), target = %uri, "forwarding request through proxy");

            let connector = tls.https_or_http().enable_http1().wrap_connector(http);
            let connector = ForwardProxy::new(proxy.uri().clone(), connector);
            request(connector, uri, options, proxy.auth()).await
        }
        None => {
            let connector = tls.https_or_http().enable_http1().wrap_connector(http);
            request(connector, uri, options, None).await
        }
    }
}

async fn request<C>(
    connector: C,
    uri: Uri,
    options: &RequestOptions,
    proxy_auth: Option<&HeaderValue>,
) -> Result<Response, FetchError>
where
    C: Connect + Clone + Send + Sync + 'static,
{
    let client: Client<_, Empty<Bytes>> = Client::builder(TokioExecutor::new())
        .pool_max_idle_per_host(0)
        .build(connector);

    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(auth) = &options.auth {
        let header = basic_auth(&auth.username, Some(&auth.password)).map_err(::http::Error::from)?;
        builder = builder.header(AUTHORIZATION, header);
    }
    if let Some(auth) = proxy_auth {
        builder = builder.header(PROXY_AUTHORIZATION, auth.clone());
    }
    let req = builder.body(Empty::new())?;

    let response = client.request(req).await?;
    let status = response.status();
    let body = response.into_body().collect().await.map(Collected::to_bytes)?;

    Ok(Response { status, body })
}

/// Builds the value of a basic authentication header, marked as sensitive.
pub(crate) fn basic_auth(username: &str, password: Option<&str>) -> Result<HeaderValue, InvalidHeaderValue> {
    let credentials = format!("{username}:{}", password.unwrap_or_default());
    let mut header = HeaderValue::try_from(format!("Basic {}", BASE64_STANDARD.encode(credentials)))?;
    header.set_sensitive(true);
    Ok(header)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use base64::prelude::{Engine as _, BASE64_STANDARD};

    use super::{basic_auth, get, FetchError, RequestOptions};

    #[test]
    fn basic_auth_header() {
        let header = basic_auth("envoy", Some("admin")).unwrap();
        assert_eq!(header.to_str().unwrap(), "Basic ZW52b3k6YWRtaW4=");
        assert!(header.is_sensitive());

        // A user name alone still carries the separator.
        let header = basic_auth("envoy", None).unwrap();
        assert_eq!(header.to_str().unwrap(), "Basic ZW52b3k6");

        // Passwords may contain the separator and non-ASCII characters.
        let header = basic_auth("envoy", Some("p:ss\u{e9}")).unwrap();
        let encoded = header.to_str().unwrap().strip_prefix("Basic ").unwrap();
        assert_eq!(BASE64_STANDARD.decode(encoded).unwrap(), "envoy:p:ss\u{e9}".as_bytes());
    }

    #[test]
    fn request_options_defaults() {
        let options = RequestOptions::default();
        assert_eq!(options.timeout(), Duration::from_secs(20));
        assert!(options.verify_tls);
        assert!(options.auth.is_none());
        assert!(options.proxy.is_none());

        let options = options.with_basic_auth("envoy", "admin").with_tls_verification(false);
        assert!(!options.verify_tls);
        let auth = options.auth.as_ref().unwrap();
        assert_eq!(auth.username, "envoy");
        assert_eq!(auth.password, "admin");
        assert!(!format!("{options:?}").contains("admin\""));
    }

    #[test]
    fn invalid_url_is_rejected_before_connecting() {
        let result = get("http://exa mple.com/stats", &RequestOptions::new());
        assert!(matches!(result, Err(FetchError::InvalidUrl(_))));
    }

    #[test]
    fn timeout_classification() {
        assert!(FetchError::Timeout(Duration::from_secs(1)).is_timeout());
        assert!(!FetchError::InvalidProxy("x".to_owned()).is_timeout());
    }
}
