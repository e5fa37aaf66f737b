//! HTTP/HTTPS Transport for the Reporter
//!
//! ## Overview
//!
//! [`HttpTransport`] implements [`Transport`] over a blocking `ureq` agent.
//! It POSTs exactly what the Reporter hands it and reports back a status
//! code, the way an ESP32 `HTTPClient` does:
//!
//! - Any HTTP status, including 4xx and 5xx, comes back as-is with its body
//! - A request that never produced a status comes back as a negative code
//!   from [`codes`]
//!
//! There are no retries here. A failed POST is reported and the next cycle
//! sends a fresh reading.
//!
//! ## Link Status
//!
//! A host has no WiFi association to ask about. With a probe endpoint
//! configured, [`Transport::is_link_up`] opens a TCP connection to the
//! endpoint's `host:port` with a short timeout and reports whether that
//! worked. Without one the link always counts as up and connection errors
//! surface as transport failures instead.
//!
//! ## Example Usage
//!
//! ```no_run
//! use airsense_connectors::http::{HttpConfig, HttpTransport};
//! use airsense_core::Transport;
//!
//! let url = "http://192.168.1.100:5000/receive_sensor";
//! let mut http = HttpTransport::new(
//!     HttpConfig::new().timeout_secs(5).probe_endpoint(url),
//! )?;
//!
//! if http.is_link_up() {
//!     let response = http.post(url, &[("Content-Type", "application/json")], "{}");
//!     println!("{}", response.status_code);
//! }
//! # Ok::<(), airsense_connectors::HttpError>(())
//! ```

use std::io;
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use airsense_core::{HttpResponse, Transport};
use log::{debug, warn};
use thiserror::Error;

use crate::ConnectionStats;

/// Negative status codes for requests that never got an HTTP status
///
/// Same numbering as the Arduino `HTTPClient`, so logs and dashboards read
/// the same whichever device sent them.
pub mod codes {
    /// Could not connect (refused, unreachable, DNS failure)
    pub const CONNECTION_REFUSED: i32 = -1;
    /// Connection dropped mid-request
    pub const CONNECTION_LOST: i32 = -5;
    /// Peer answered with something that is not HTTP
    pub const NO_HTTP_SERVER: i32 = -7;
    /// No response within the timeout
    pub const READ_TIMEOUT: i32 = -11;
}

/// HTTP transport setup errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HttpError {
    /// Probe URL is not an absolute http:// or https:// URL
    #[error("Invalid URL `{0}`: must start with http:// or https:// and name a host")]
    InvalidUrl(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// HTTP transport configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Whole-request timeout (connect, send and receive)
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
    /// URL whose `host:port` answers `is_link_up`
    pub probe_url: Option<String>,
    /// Connect timeout for the link probe
    pub probe_timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            user_agent: format!("AirSense/{}", env!("CARGO_PKG_VERSION")),
            probe_url: None,
            probe_timeout: Duration::from_secs(2),
        }
    }
}

impl HttpConfig {
    /// Defaults: 5 s request timeout, no link probe
    pub fn new() -> Self {
        Self::default()
    }

    /// Set request timeout in seconds
    pub fn timeout_secs(self, secs: u64) -> Self {
        self.timeout(Duration::from_secs(secs))
    }

    /// Set request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Probe the host and port of `url` to answer `is_link_up`
    pub fn probe_endpoint(mut self, url: impl Into<String>) -> Self {
        self.probe_url = Some(url.into());
        self
    }

    /// Set connect timeout for the link probe
    pub fn probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }
}

/// [`Transport`] backed by a blocking `ureq` agent
pub struct HttpTransport {
    agent: ureq::Agent,
    probe_addr: Option<String>,
    probe_timeout: Duration,
    stats: ConnectionStats,
}

impl HttpTransport {
    /// Create new HTTP transport
    pub fn new(config: HttpConfig) -> Result<Self, HttpError> {
        if config.timeout.is_zero() {
            return Err(HttpError::Config("request timeout must be non-zero".into()));
        }
        if config.probe_url.is_some() && config.probe_timeout.is_zero() {
            return Err(HttpError::Config("probe timeout must be non-zero".into()));
        }

        let probe_addr = config.probe_url.as_deref().map(authority).transpose()?;

        let agent = ureq::AgentBuilder::new()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build();

        Ok(Self {
            agent,
            probe_addr,
            probe_timeout: config.probe_timeout,
            stats: ConnectionStats::default(),
        })
    }

    /// `host:port` the link probe connects to, if any
    pub fn probe_address(&self) -> Option<&str> {
        self.probe_addr.as_deref()
    }

    /// Delivery statistics so far
    pub fn stats(&self) -> &ConnectionStats {
        &self.stats
    }

    fn probe(&self, addr: &str) -> bool {
        let candidates = match addr.to_socket_addrs() {
            Ok(candidates) => candidates,
            Err(e) => {
                debug!("Link probe could not resolve {}: {}", addr, e);
                return false;
            }
        };

        for candidate in candidates {
            if TcpStream::connect_timeout(&candidate, self.probe_timeout).is_ok() {
                return true;
            }
        }
        debug!("Link probe to {} failed", addr);
        false
    }

    fn received(&mut self, response: ureq::Response, sent: usize) -> HttpResponse {
        let status = response.status();
        let body = response.into_string().unwrap_or_else(|e| {
            warn!("Could not read response body: {}", e);
            String::new()
        });

        self.stats.messages_sent += 1;
        self.stats.bytes_sent += sent as u64;
        HttpResponse::new(i32::from(status), body)
    }
}

impl Transport for HttpTransport {
    fn is_link_up(&self) -> bool {
        match &self.probe_addr {
            Some(addr) => self.probe(addr),
            None => true,
        }
    }

    fn post(&mut self, url: &str, headers: &[(&str, &str)], body: &str) -> HttpResponse {
        let mut request = self.agent.post(url);
        for &(name, value) in headers {
            request = request.set(name, value);
        }

        debug!("POST {} ({} bytes)", url, body.len());
        match request.send_string(body) {
            Ok(response) => self.received(response, body.len()),
            // ureq treats 4xx/5xx as errors; for us they are answers
            Err(ureq::Error::Status(_, response)) => self.received(response, body.len()),
            Err(ureq::Error::Transport(e)) => {
                let code = transport_code(&e);
                warn!("POST {} failed ({}): {}", url, code, e);
                self.stats.messages_failed += 1;
                self.stats.last_error = Some(e.to_string());
                HttpResponse::failure(code)
            }
        }
    }
}

/// Map a `ureq` transport error onto a negative [`codes`] value
pub fn transport_code(error: &ureq::Transport) -> i32 {
    match error.kind() {
        ureq::ErrorKind::Io if is_timeout(error) => codes::READ_TIMEOUT,
        ureq::ErrorKind::Io => codes::CONNECTION_LOST,
        ureq::ErrorKind::BadStatus | ureq::ErrorKind::BadHeader => codes::NO_HTTP_SERVER,
        _ => codes::CONNECTION_REFUSED,
    }
}

fn is_timeout(error: &ureq::Transport) -> bool {
    std::error::Error::source(error)
        .and_then(|source| source.downcast_ref::<io::Error>())
        .map_or(false, |e| {
            matches!(e.kind(), io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock)
        })
}

/// `host:port` of an http(s) URL, with the scheme's default port filled in
pub fn authority(url: &str) -> Result<String, HttpError> {
    let invalid = || HttpError::InvalidUrl(url.to_string());

    let (rest, default_port) = if let Some(rest) = url.strip_prefix("http://") {
        (rest, 80)
    } else if let Some(rest) = url.strip_prefix("https://") {
        (rest, 443)
    } else {
        return Err(invalid());
    };

    let host_port = rest
        .split(|c| matches!(c, '/' | '?' | '#'))
        .next()
        .unwrap_or("");
    // drop user:password@
    let host_port = host_port.rsplit('@').next().unwrap_or(host_port);
    if host_port.is_empty() || host_port.starts_with(':') {
        return Err(invalid());
    }

    // a colon inside [..] belongs to an IPv6 literal, not a port
    let explicit_port = match host_port.rfind(':') {
        Some(i) if !host_port[i..].contains(']') => Some(&host_port[i + 1..]),
        _ => None,
    };

    match explicit_port {
        Some(port) => {
            port.parse::<u16>().map_err(|_| invalid())?;
            Ok(host_port.to_string())
        }
        None => Ok(format!("{}:{}", host_port, default_port)),
    }
}
