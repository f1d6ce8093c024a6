//! Test doubles for exercising checks end to end.
use std::{
    convert::Infallible,
    io,
    net::SocketAddr,
    sync::Arc,
    thread::{self, JoinHandle},
    time::Duration,
};

use http_body_util::Full;
use hyper::{
    body::{Bytes, Incoming},
    header::{HeaderName, HeaderValue, AUTHORIZATION, PROXY_AUTHORIZATION},
    server::conn::http1,
    service::service_fn,
    Method, Request, Response, StatusCode,
};
use hyper_util::rt::TokioIo;
use parking_lot::Mutex;
use rustls::{
    crypto,
    pki_types::{pem::PemObject, CertificateDer, PrivateKeyDer},
    ServerConfig,
};
use tokio::{
    io::{AsyncRead, AsyncWrite},
    net::TcpListener,
    sync::oneshot,
};
use tokio_rustls::TlsAcceptor;
use tracing::warn;

use crate::{CheckSink, MetricType, ServiceCheckStatus};

const LOCALHOST_CERT: &[u8] = include_bytes!("../testdata/localhost.crt");
const LOCALHOST_KEY: &[u8] = include_bytes!("../testdata/localhost.key");

/// A single submission captured by [`RecordingSink`].
#[derive(Clone, Debug, PartialEq)]
pub enum Submission {
    /// A metric submission.
    Metric {
        /// Metric type the submission was made with.
        kind: MetricType,
        /// Metric name.
        name: String,
        /// Submitted value.
        value: i64,
        /// Tags, in submission order.
        tags: Vec<String>,
    },

    /// A service check.
    ServiceCheck {
        /// Service check name.
        name: String,
        /// Reported status.
        status: ServiceCheckStatus,
        /// Tags, in submission order.
        tags: Vec<String>,
        /// Optional message.
        message: Option<String>,
    },
}

/// A sink that keeps every submission in memory, in order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    submissions: Mutex<Vec<Submission>>,
}

impl RecordingSink {
    /// Creates an empty [`RecordingSink`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every submission so far.
    pub fn submissions(&self) -> Vec<Submission> {
        self.submissions.lock().clone()
    }

    /// Returns every metric submission so far as `(kind, name, value, tags)`.
    pub fn metrics(&self) -> Vec<(MetricType, String, i64, Vec<String>)> {
        self.submissions
            .lock()
            .iter()
            .filter_map(|submission| match submission {
                Submission::Metric { kind, name, value, tags } => {
                    Some((*kind, name.clone(), *value, tags.clone()))
                }
                Submission::ServiceCheck { .. } => None,
            })
            .collect()
    }

    /// Returns every service check so far as `(name, status, message)`.
    pub fn service_checks(&self) -> Vec<(String, ServiceCheckStatus, Option<String>)> {
        self.submissions
            .lock()
            .iter()
            .filter_map(|submission| match submission {
                Submission::ServiceCheck { name, status, message, .. } => {
                    Some((name.clone(), *status, message.clone()))
                }
                Submission::Metric { .. } => None,
            })
            .collect()
    }

    fn push_metric(&self, kind: MetricType, name: &str, value: i64, tags: &[String]) {
        self.submissions.lock().push(Submission::Metric { kind, name: name.to_owned(), value, tags: tags.to_vec() });
    }
}

impl CheckSink for RecordingSink {
    fn gauge(&self, name: &str, value: i64, tags: &[String]) {
        self.push_metric(MetricType::Gauge, name, value, tags);
    }

    fn count(&self, name: &str, value: i64, tags: &[String]) {
        self.push_metric(MetricType::Count, name, value, tags);
    }

    fn monotonic_count(&self, name: &str, value: i64, tags: &[String]) {
        self.push_metric(MetricType::MonotonicCount, name, value, tags);
    }

    fn rate(&self, name: &str, value: i64, tags: &[String]) {
        self.push_metric(MetricType::Rate, name, value, tags);
    }

    fn histogram(&self, name: &str, value: i64, tags: &[String]) {
        self.push_metric(MetricType::Histogram, name, value, tags);
    }

    fn service_check(&self, name: &str, status: ServiceCheckStatus, tags: &[String], message: Option<&str>) {
        self.submissions.lock().push(Submission::ServiceCheck {
            name: name.to_owned(),
            status,
            tags: tags.to_vec(),
            message: message.map(str::to_owned),
        });
    }
}

/// The parts of an incoming request a stub handler gets to see.
#[derive(Clone, Debug)]
pub struct StubRequest {
    /// Request method.
    pub method: Method,
    /// Request target as sent on the wire: a path for direct requests, an absolute URL for requests sent to a
    /// forward proxy, an authority for `CONNECT`.
    pub target: String,
    /// Request path, without query.
    pub path: String,
    /// Value of the `Authorization` header, if any.
    pub authorization: Option<String>,
    /// Value of the `Proxy-Authorization` header, if any.
    pub proxy_authorization: Option<String>,
}

/// Response produced by a stub handler.
#[derive(Clone, Debug)]
pub struct StubResponse {
    status: StatusCode,
    body: Bytes,
    delay: Duration,
}

impl StubResponse {
    /// A `200 OK` response with the given body.
    pub fn ok<B: Into<Bytes>>(body: B) -> Self {
        StubResponse { status: StatusCode::OK, body: body.into(), delay: Duration::ZERO }
    }

    /// An empty response with the given status.
    pub fn status(status: StatusCode) -> Self {
        StubResponse { status, body: Bytes::new(), delay: Duration::ZERO }
    }

    /// Holds the response back for `delay` before sending it.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    fn into_http(self) -> Response<Full<Bytes>> {
        let mut response = Response::new(Full::new(self.body));
        *response.status_mut() = self.status;
        response
    }
}

/// An HTTP/1 server on a random local port, answering every request through a handler.
///
/// The server runs on its own thread and is shut down when dropped.
pub struct StubServer {
    addr: SocketAddr,
    scheme: &'static str,
    shutdown: Option<oneshot::Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl StubServer {
    /// Starts a server answering every request with `handler`.
    ///
    /// # Errors
    ///
    /// If the listener cannot be bound or the server thread cannot be spawned, an error is returned.
    pub fn start<F>(handler: F) -> io::Result<Self>
    where
        F: Fn(&StubRequest) -> StubResponse + Send + Sync + 'static,
    {
        Self::spawn(handler, None)
    }

    /// Starts an HTTPS server answering every request with `handler`.
    ///
    /// The server presents a self-signed certificate for `localhost` and `127.0.0.1`, which no trust store
    /// accepts.
    ///
    /// # Errors
    ///
    /// If the certificate cannot be loaded, the listener cannot be bound or the server thread cannot be spawned,
    /// an error is returned.
    pub fn start_tls<F>(handler: F) -> io::Result<Self>
    where
        F: Fn(&StubRequest) -> StubResponse + Send + Sync + 'static,
    {
        Self::spawn(handler, Some(self_signed_acceptor()?))
    }

    /// Starts a server answering every request with `200 OK` and the given body.
    ///
    /// # Errors
    ///
    /// If the listener cannot be bound or the server thread cannot be spawned, an error is returned.
    pub fn serving<B: Into<Bytes>>(body: B) -> io::Result<Self> {
        let body = body.into();
        Self::start(move |_| StubResponse::ok(body.clone()))
    }

    fn spawn<F>(handler: F, tls: Option<TlsAcceptor>) -> io::Result<Self>
    where
        F: Fn(&StubRequest) -> StubResponse + Send + Sync + 'static,
    {
        let listener = std::net::TcpListener::bind(("127.0.0.1", 0))?;
        listener.set_nonblocking(true)?;
        let addr = listener.local_addr()?;
        let scheme = if tls.is_some() { "https" } else { "http" };

        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
        let (shutdown, mut shutdown_rx) = oneshot::channel::<()>();
        let handler: Arc<Handler> = Arc::new(handler);

        let thread = thread::Builder::new().name("stub-server".to_owned()).spawn(move || {
            runtime.block_on(async move {
                let listener = match TcpListener::from_std(listener) {
                    Ok(listener) => listener,
                    Err(e) => {
                        warn!("failed to register stub listener: {:?}", e);
                        return;
                    }
                };

                loop {
                    tokio::select! {
                        _ = &mut shutdown_rx => break,
                        accepted = listener.accept() => {
                            let stream = match accepted {
                                Ok((stream, _)) => stream,
                                Err(e) => {
                                    warn!("Error accepting connection. Ignoring request. Error: {:?}", e);
                                    continue;
                                }
                            };

                            let handler = Arc::clone(&handler);
                            match &tls {
                                Some(acceptor) => {
                                    let acceptor = acceptor.clone();
                                    tokio::spawn(async move {
                                        match acceptor.accept(stream).await {
                                            Ok(stream) => serve(stream, handler).await,
                                            Err(e) => warn!("TLS handshake failed. Error: {:?}", e),
                                        }
                                    });
                                }
                                None => {
                                    tokio::spawn(serve(stream, handler));
                                }
                            }
                        }
                    }
                }
            });
        })?;

        Ok(StubServer { addr, scheme, shutdown: Some(shutdown), thread: Some(thread) })
    }

    /// Returns the address the server listens on.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Returns a URL pointing at `path` on this server.
    pub fn url(&self, path: &str) -> String {
        format!("{}://{}{}", self.scheme, self.addr, path)
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

type Handler = dyn Fn(&StubRequest) -> StubResponse + Send + Sync;

async fn serve<I>(stream: I, handler: Arc<Handler>)
where
    I: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    let service = service_fn(move |req: Request<Incoming>| {
        let response = handler(&StubRequest::from_request(&req));
        async move {
            if !response.delay.is_zero() {
                tokio::time::sleep(response.delay).await;
            }
            Ok::<_, Infallible>(response.into_http())
        }
    });

    if let Err(err) = http1::Builder::new().serve_connection(TokioIo::new(stream), service).await {
        warn!("Error serving connection.  Error: {:?}", err);
    }
}

fn self_signed_acceptor() -> io::Result<TlsAcceptor> {
    let cert = CertificateDer::from_pem_slice(LOCALHOST_CERT).map_err(io::Error::other)?;
    let key = PrivateKeyDer::from_pem_slice(LOCALHOST_KEY).map_err(io::Error::other)?;

    let config = ServerConfig::builder_with_provider(Arc::new(crypto::aws_lc_rs::default_provider()))
        .with_safe_default_protocol_versions()
        .and_then(|builder| builder.with_no_client_auth().with_single_cert(vec![cert], key))
        .map_err(io::Error::other)?;

    Ok(TlsAcceptor::from(Arc::new(config)))
}

impl StubRequest {
    fn from_request(req: &Request<Incoming>) -> Self {
        let header = |name: HeaderName| {
            req.headers().get(name).and_then(|value: &HeaderValue| value.to_str().ok()).map(str::to_owned)
        };

        StubRequest {
            method: req.method().clone(),
            target: req.uri().to_string(),
            path: req.uri().path().to_owned(),
            authorization: header(AUTHORIZATION),
            proxy_authorization: header(PROXY_AUTHORIZATION),
        }
    }
}
