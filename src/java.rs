use std::time::Duration;

use serde::Deserialize;

use crate::address::ServerAddress;
use crate::connection::{Connection, Edition, ProxyConfig, StatusPayload, null_as_default};
use crate::error::Result;
use crate::mc_text::{FormattedText, Motd, Player};

/// Default port of a Java Edition server.
pub const JAVA_DEFAULT_PORT: u16 = Edition::Java.default_port();

/// Client for querying a Java Edition server through mcstatus.io.
///
/// # Example
///
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> mcstatus_io::Result<()> {
/// use mcstatus_io::JavaServer;
///
/// let status = JavaServer::new("mc.hypixel.net").async_status().await?;
/// if let Some(players) = &status.players {
///     println!("{}/{} players", players.online, players.max);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct JavaServer {
    address: String,
    port: Option<u16>,
    connection: Connection,
}

impl JavaServer {
    /// `address` is a hostname or IP, optionally with an embedded `:port`.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            port: None,
            connection: Connection::default(),
        }
    }

    /// Sets the port explicitly. Overrides a port embedded in the address.
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Sets the request timeout, clamped to [`MAX_TIMEOUT`](crate::MAX_TIMEOUT).
    /// Defaults to [`DEFAULT_TIMEOUT`](crate::DEFAULT_TIMEOUT).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.connection.set_timeout(timeout);
        self
    }

    /// Points requests at another API root, e.g. a mirror or a local mock.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.connection.base_url = base_url.into();
        self
    }

    /// Routes requests through an `http://`, `https://` or `socks5://` proxy.
    ///
    /// A malformed proxy URL surfaces as [`Error::Transport`](crate::Error::Transport)
    /// when a status is requested.
    pub fn proxy(mut self, proxy_url: impl Into<String>) -> Self {
        self.connection.proxy = ProxyConfig::Url(proxy_url.into());
        self
    }

    /// Ignores proxy environment variables.
    pub fn no_proxy(mut self) -> Self {
        self.connection.proxy = ProxyConfig::Disabled;
        self
    }

    /// Resolves the configured address without touching the network.
    pub fn address(&self) -> Result<ServerAddress> {
        ServerAddress::resolve(&self.address, self.port, JAVA_DEFAULT_PORT)
    }

    /// Queries the server status, blocking the current thread.
    ///
    /// Must not be called from inside an async runtime; use
    /// [`JavaServer::async_status`] there.
    #[cfg(feature = "blocking")]
    pub fn status(&self) -> Result<JavaStatus> {
        let addr = self.address()?;
        self.connection.get_status_blocking(Edition::Java, &addr)
    }

    /// Queries the server status.
    pub async fn async_status(&self) -> Result<JavaStatus> {
        let addr = self.address()?;
        self.connection.get_status(Edition::Java, &addr).await
    }
}

/// Status of a Java Edition server as reported by mcstatus.io.
///
/// When `online` is false only the address fields, `eula_blocked`, the
/// timestamps and `srv` are populated.
///
/// Keys are read under either their v2 API name or an older one: `host` or
/// `hostname`, `srv_record` or `srv`, `expires_at` or `expiries_at`, and
/// `players.list` or `players.sample`. A payload that carries both spellings
/// of the same field is rejected with [`Error::Decode`](crate::Error::Decode).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JavaStatus {
    pub online: bool,

    /// Hostname the API was asked about.
    #[serde(default, alias = "host")]
    pub hostname: String,

    /// Resolved IP address, if the hostname resolved.
    #[serde(default)]
    pub ip_address: Option<String>,

    pub port: u16,

    /// Whether Mojang blocks this server for EULA violations.
    #[serde(default, deserialize_with = "null_as_default")]
    pub eula_blocked: bool,

    /// Unix milliseconds when mcstatus.io fetched this status.
    #[serde(default, deserialize_with = "null_as_default")]
    pub retrieved_at: u64,

    /// Unix milliseconds when the cached status expires.
    #[serde(default, alias = "expiries_at", deserialize_with = "null_as_default")]
    pub expires_at: u64,

    #[serde(default, alias = "srv_record")]
    pub srv: Option<SrvRecord>,

    #[serde(default)]
    pub version: Option<JavaVersion>,

    #[serde(default)]
    pub players: Option<JavaPlayers>,

    #[serde(default)]
    pub motd: Option<Motd>,

    /// Server icon as a base64 `data:image/png` URI.
    #[serde(default)]
    pub icon: Option<String>,

    /// Server software, e.g. "Paper".
    #[serde(default)]
    pub software: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub plugins: Vec<Plugin>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub mods: Vec<Mod>,
}

impl StatusPayload for JavaStatus {
    fn missing_field(&self) -> Option<&'static str> {
        if !self.online {
            return None;
        }
        if self.version.is_none() {
            Some("version")
        } else if self.players.is_none() {
            Some("players")
        } else if self.motd.is_none() {
            Some("motd")
        } else {
            None
        }
    }
}

/// Java server version.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawJavaVersion")]
pub struct JavaVersion {
    /// Version name, e.g. "Paper 1.21.4".
    pub name: FormattedText,

    /// Protocol version number, e.g. 769.
    pub protocol: i32,
}

/// The API reports the version name as flat `name_*` keys.
#[derive(Deserialize)]
struct RawJavaVersion {
    name_raw: String,
    name_clean: String,
    name_html: String,
    protocol: i32,
}

impl From<RawJavaVersion> for JavaVersion {
    fn from(raw: RawJavaVersion) -> Self {
        Self {
            name: FormattedText {
                raw: raw.name_raw,
                clean: raw.name_clean,
                html: raw.name_html,
            },
            protocol: raw.protocol,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JavaPlayers {
    pub online: u32,
    pub max: u32,

    /// Sample of online players. Many servers send none.
    #[serde(default, alias = "list", deserialize_with = "null_as_default")]
    pub sample: Vec<Player>,
}

/// DNS SRV record the hostname resolved through.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SrvRecord {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Plugin {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Mod {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
}
