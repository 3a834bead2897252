use std::fmt;
use std::time::Duration;

use serde::Deserialize;
use serde::de::{DeserializeOwned, Error as _};
use tracing::{debug, warn};

use crate::address::ServerAddress;
use crate::error::{Error, Result};

/// Root of the mcstatus.io API. The versioned path is appended per request.
pub const API_BASE_URL: &str = "https://api.mcstatus.io";

/// Request timeout used unless one is set on the server value.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Longest timeout a request is allowed. Larger values are clamped to this.
pub const MAX_TIMEOUT: Duration = Duration::from_secs(60 * 60);

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Minecraft server variant. Each has its own status schema and endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edition {
    Java,
    Bedrock,
}

impl Edition {
    /// Path segment used by the API for this edition.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Java => "java",
            Self::Bedrock => "bedrock",
        }
    }

    /// Port a server of this edition listens on when none is given.
    pub const fn default_port(self) -> u16 {
        match self {
            Self::Java => 25565,
            Self::Bedrock => 19132,
        }
    }
}

impl fmt::Display for Edition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How requests reach the API.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) enum ProxyConfig {
    /// Whatever `HTTP_PROXY`/`HTTPS_PROXY`/`NO_PROXY` say.
    #[default]
    System,
    Disabled,
    /// Explicit `http://`, `https://` or `socks5://` proxy.
    Url(String),
}

/// A decoded status document.
pub(crate) trait StatusPayload: DeserializeOwned {
    /// First field an online server must report but this payload lacks.
    fn missing_field(&self) -> Option<&'static str>;
}

/// Request settings shared by the edition wrappers.
///
/// Nothing here is mutated by a query, and every query builds its own
/// client, so concurrent calls are independent.
#[derive(Debug, Clone)]
pub(crate) struct Connection {
    pub base_url: String,
    pub timeout: Duration,
    pub proxy: ProxyConfig,
}

impl Default for Connection {
    fn default() -> Self {
        Self {
            base_url: API_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            proxy: ProxyConfig::default(),
        }
    }
}

impl Connection {
    /// Sets the request deadline, clamped to [`MAX_TIMEOUT`].
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout.min(MAX_TIMEOUT);
    }

    /// `{base}/v2/status/{edition}/{host}:{port}`
    pub fn url(&self, edition: Edition, addr: &ServerAddress) -> String {
        format!(
            "{}/v2/status/{}/{}",
            self.base_url.trim_end_matches('/'),
            edition,
            addr
        )
    }

    /// Tells the API how long to wait on the game server, in seconds.
    fn timeout_param(&self) -> String {
        self.timeout.as_secs_f64().to_string()
    }

    fn client(&self) -> Result<reqwest::Client> {
        let builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT);
        let builder = match &self.proxy {
            ProxyConfig::System => builder,
            ProxyConfig::Disabled => builder.no_proxy(),
            ProxyConfig::Url(url) => builder.proxy(explicit_proxy(url)?),
        };
        builder.build().map_err(Error::Transport)
    }

    #[cfg(feature = "blocking")]
    fn blocking_client(&self) -> Result<reqwest::blocking::Client> {
        let builder = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT);
        let builder = match &self.proxy {
            ProxyConfig::System => builder,
            ProxyConfig::Disabled => builder.no_proxy(),
            ProxyConfig::Url(url) => builder.proxy(explicit_proxy(url)?),
        };
        builder.build().map_err(Error::Transport)
    }

    /// Fetches and decodes the status of `addr`.
    ///
    /// The whole round trip, body included, runs under one deadline.
    pub async fn get_status<T: StatusPayload>(
        &self,
        edition: Edition,
        addr: &ServerAddress,
    ) -> Result<T> {
        let url = self.url(edition, addr);
        debug!(%url, timeout = ?self.timeout, "querying {edition} server status");

        let client = self.client()?;
        let round_trip = async {
            let response = client
                .get(&url)
                .query(&[("timeout", self.timeout_param())])
                .send()
                .await
                .map_err(|e| Error::from_transport(e, self.timeout))?;
            check_status(response.status(), &url)?;
            let body = response
                .bytes()
                .await
                .map_err(|e| Error::from_transport(e, self.timeout))?;
            Ok::<_, Error>(body)
        };

        let body = tokio::time::timeout(self.timeout, round_trip)
            .await
            .map_err(|_| Error::Timeout { timeout: self.timeout })??;

        decode(&body)
    }

    /// Blocking counterpart of [`Connection::get_status`].
    ///
    /// Must not be called from inside an async runtime.
    #[cfg(feature = "blocking")]
    pub fn get_status_blocking<T: StatusPayload>(
        &self,
        edition: Edition,
        addr: &ServerAddress,
    ) -> Result<T> {
        let url = self.url(edition, addr);
        debug!(%url, timeout = ?self.timeout, "querying {edition} server status (blocking)");

        let client = self.blocking_client()?;
        let response = client
            .get(&url)
            .query(&[("timeout", self.timeout_param())])
            .send()
            .map_err(|e| Error::from_transport(e, self.timeout))?;
        check_status(response.status(), &url)?;
        let body = response
            .bytes()
            .map_err(|e| Error::from_transport(e, self.timeout))?;

        decode(&body)
    }
}

fn explicit_proxy(url: &str) -> Result<reqwest::Proxy> {
    reqwest::Proxy::all(url).map_err(Error::Transport)
}

fn check_status(status: reqwest::StatusCode, url: &str) -> Result<()> {
    if status.is_success() {
        debug!(%status, "status response received");
        Ok(())
    } else {
        warn!(%status, %url, "mcstatus.io request failed");
        Err(Error::Status {
            status,
            url: url.to_string(),
        })
    }
}

/// Parses a status body, rejecting online payloads with required fields missing.
pub(crate) fn decode<T: StatusPayload>(body: &[u8]) -> Result<T> {
    let status: T = serde_json::from_slice(body)?;
    match status.missing_field() {
        Some(field) => Err(Error::Decode(serde_json::Error::missing_field(field))),
        None => Ok(status),
    }
}

/// Treats an explicit `null` the same as a missing key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_follows_api_layout() {
        let conn = Connection::default();
        let addr = ServerAddress::resolve("mc.hypixel.net", None, 25565).unwrap();
        assert_eq!(
            conn.url(Edition::Java, &addr),
            "https://api.mcstatus.io/v2/status/java/mc.hypixel.net:25565"
        );

        let addr = ServerAddress::resolve("[::1]:19133", None, 19132).unwrap();
        assert_eq!(
            conn.url(Edition::Bedrock, &addr),
            "https://api.mcstatus.io/v2/status/bedrock/[::1]:19133"
        );
    }

    #[test]
    fn base_url_trailing_slash_is_ignored() {
        let conn = Connection {
            base_url: "http://127.0.0.1:8080/".to_string(),
            ..Connection::default()
        };
        let addr = ServerAddress::resolve("a.example:1", None, 25565).unwrap();
        assert_eq!(
            conn.url(Edition::Java, &addr),
            "http://127.0.0.1:8080/v2/status/java/a.example:1"
        );
    }

    #[test]
    fn timeout_param_is_in_seconds() {
        let mut conn = Connection::default();
        assert_eq!(conn.timeout_param(), "5");
        conn.set_timeout(Duration::from_millis(250));
        assert_eq!(conn.timeout_param(), "0.25");
    }

    #[test]
    fn oversized_timeout_is_clamped() {
        let mut conn = Connection::default();
        conn.set_timeout(Duration::MAX);
        assert_eq!(conn.timeout, MAX_TIMEOUT);
        assert_eq!(conn.timeout_param(), "3600");

        conn.set_timeout(Duration::from_secs(30));
        assert_eq!(conn.timeout, Duration::from_secs(30));
    }

    #[test]
    fn malformed_proxy_url_is_a_transport_error() {
        let conn = Connection {
            proxy: ProxyConfig::Url("not a url".to_string()),
            ..Connection::default()
        };
        assert!(matches!(conn.client(), Err(Error::Transport(_))));
    }

    #[test]
    fn edition_defaults() {
        assert_eq!(Edition::Java.default_port(), 25565);
        assert_eq!(Edition::Bedrock.default_port(), 19132);
        assert_eq!(Edition::Bedrock.to_string(), "bedrock");
    }
}
