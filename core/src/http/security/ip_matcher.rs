//! Client address matching for origin-gated routes.
//!
//! # Spring Security Equivalent
//! `org.springframework.security.web.util.matcher.IpAddressMatcher`

use std::fmt;
use std::net::IpAddr;

use crate::http::error::SecurityError;

/// Matches a client address against a single address or a CIDR block.
///
/// # Example
/// ```
/// use travel_agency_security::http::security::IpAddressMatcher;
///
/// let office = IpAddressMatcher::parse("192.168.10.0/24").unwrap();
/// assert!(office.matches("192.168.10.77".parse().unwrap()));
/// assert!(!office.matches("192.168.11.1".parse().unwrap()));
///
/// let host = IpAddressMatcher::parse("10.0.0.5").unwrap();
/// assert!(host.matches("10.0.0.5".parse().unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpAddressMatcher {
    network: IpAddr,
    prefix_len: u8,
}

impl IpAddressMatcher {
    /// Parses `addr` or `addr/prefix`. A bare address is an exact match.
    pub fn parse(value: &str) -> Result<Self, SecurityError> {
        let invalid = || SecurityError::InvalidConfiguration {
            key: "ip address".to_string(),
            value: value.to_string(),
        };

        let value_trimmed = value.trim();
        let (addr, prefix) = match value_trimmed.split_once('/') {
            Some((addr, prefix)) => (addr, Some(prefix)),
            None => (value_trimmed, None),
        };

        let network: IpAddr = addr.parse().map_err(|_| invalid())?;
        let max_len = max_prefix_len(&network);
        let prefix_len = match prefix {
            Some(p) => p.parse::<u8>().map_err(|_| invalid())?,
            None => max_len,
        };
        if prefix_len > max_len {
            return Err(invalid());
        }

        Ok(IpAddressMatcher {
            network,
            prefix_len,
        })
    }

    /// Address families never cross-match.
    pub fn matches(&self, addr: IpAddr) -> bool {
        match (self.network, addr) {
            (IpAddr::V4(net), IpAddr::V4(ip)) => {
                prefix_eq(&net.octets(), &ip.octets(), self.prefix_len)
            }
            (IpAddr::V6(net), IpAddr::V6(ip)) => {
                prefix_eq(&net.octets(), &ip.octets(), self.prefix_len)
            }
            _ => false,
        }
    }
}

fn max_prefix_len(addr: &IpAddr) -> u8 {
    match addr {
        IpAddr::V4(_) => 32,
        IpAddr::V6(_) => 128,
    }
}

fn prefix_eq(network: &[u8], addr: &[u8], prefix_len: u8) -> bool {
    let full_bytes = usize::from(prefix_len / 8);
    let rest_bits = prefix_len % 8;

    if network[..full_bytes] != addr[..full_bytes] {
        return false;
    }
    if rest_bits == 0 {
        return true;
    }
    let mask = 0xffu8 << (8 - rest_bits);
    network[full_bytes] & mask == addr[full_bytes] & mask
}

impl fmt::Display for IpAddressMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.prefix_len == max_prefix_len(&self.network) {
            write!(f, "{}", self.network)
        } else {
            write!(f, "{}/{}", self.network, self.prefix_len)
        }
    }
}
