use std::fmt;
use std::net::Ipv6Addr;

use crate::error::{Error, Result};

/// A resolved `(host, port)` pair, ready to be placed in a request path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServerAddress {
    pub host: String,
    pub port: u16,
}

impl ServerAddress {
    /// Parses `input` into a host and port.
    ///
    /// `input` may be `host`, `host:port`, `[ipv6]`, `[ipv6]:port` or a bare IPv6
    /// literal. When `explicit_port` is set it wins over any port embedded in
    /// `input`; with neither, `default_port` is used.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAddress`] for an empty host, a non-numeric or
    /// out-of-range embedded port, or a host with characters that would alter
    /// the request URL (`/`, `\`, `?`, `#`, `@`, `%`, whitespace).
    ///
    /// # Example
    ///
    /// ```
    /// use mcstatus_io::ServerAddress;
    ///
    /// let addr = ServerAddress::resolve("play.example.com:25566", None, 25565).unwrap();
    /// assert_eq!(addr.port, 25566);
    ///
    /// let addr = ServerAddress::resolve("play.example.com:25566", Some(25570), 25565).unwrap();
    /// assert_eq!(addr.port, 25570);
    /// ```
    pub fn resolve(input: &str, explicit_port: Option<u16>, default_port: u16) -> Result<Self> {
        let trimmed = input.trim();
        let (host, embedded) = split_host_port(input, trimmed)?;

        if host.is_empty() {
            return Err(Error::invalid_address(input, "host is empty"));
        }
        if let Some(c) = host.chars().find(|&c| is_forbidden_host_char(c)) {
            return Err(Error::invalid_address(
                input,
                format!("host contains forbidden character {c:?}"),
            ));
        }

        let embedded = embedded.map(|p| parse_port(input, p)).transpose()?;
        let port = explicit_port.or(embedded).unwrap_or(default_port);

        Ok(Self {
            host: host.to_string(),
            port,
        })
    }

    fn is_ipv6(&self) -> bool {
        self.host.contains(':')
    }
}

impl fmt::Display for ServerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_ipv6() {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

/// Splits off the embedded port, if any. The port is returned unparsed.
fn split_host_port<'a>(input: &str, s: &'a str) -> Result<(&'a str, Option<&'a str>)> {
    if let Some(rest) = s.strip_prefix('[') {
        let (host, tail) = rest
            .split_once(']')
            .ok_or_else(|| Error::invalid_address(input, "missing closing `]`"))?;
        if host.parse::<Ipv6Addr>().is_err() {
            return Err(Error::invalid_address(input, "bracketed host is not an IPv6 address"));
        }
        return match tail {
            "" => Ok((host, None)),
            _ => match tail.strip_prefix(':') {
                Some(port) => Ok((host, Some(port))),
                None => Err(Error::invalid_address(input, "unexpected text after `]`")),
            },
        };
    }

    match s.matches(':').count() {
        0 => Ok((s, None)),
        1 => {
            let (host, port) = s.split_once(':').unwrap_or((s, ""));
            Ok((host, Some(port)))
        }
        _ => {
            if s.parse::<Ipv6Addr>().is_ok() {
                Ok((s, None))
            } else {
                Err(Error::invalid_address(input, "too many `:` separators"))
            }
        }
    }
}

/// Characters that would end or re-route the host path segment.
fn is_forbidden_host_char(c: char) -> bool {
    c.is_whitespace() || c.is_control() || matches!(c, '/' | '\\' | '?' | '#' | '@' | '%')
}

fn parse_port(input: &str, port: &str) -> Result<u16> {
    if port.is_empty() {
        return Err(Error::invalid_address(input, "port is empty"));
    }
    if !port.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::invalid_address(input, format!("port `{port}` is not numeric")));
    }
    port.parse::<u16>().map_err(|_| {
        Error::invalid_address(input, format!("port `{port}` is out of range (0-65535)"))
    })
}
