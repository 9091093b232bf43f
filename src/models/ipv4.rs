//! IPv4 address and CIDR notation utilities.
//!
//! Provides [`Ipv4`] struct for representing IPv4 addresses with a prefix length,
//! along with the 32-bit helpers every subnet calculation builds on.

use crate::error::{Error, Result};
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Maximum length for an IPv4 subnet mask (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// Convert a CIDR prefix length to a subnet mask as u32.
///
/// # Examples
/// ```
/// use cidr_calculator::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
/// assert_eq!(get_cidr_mask(0).unwrap(), 0);
/// ```
pub fn get_cidr_mask(len: u8) -> Result<u32> {
    if len > MAX_LENGTH {
        Err(Error::invalid_cidr(
            format!("/{len}"),
            "Network length is too long",
        ))
    } else {
        let right_len = MAX_LENGTH - len;
        let all_bits = u32::MAX as u64;

        // u64 so that a shift by 32 (/0) is defined
        let mask = (all_bits >> right_len) << right_len;

        Ok(mask as u32)
    }
}

/// Get the network address for a given IP and prefix length.
pub fn cut_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr> {
    let mask = get_cidr_mask(len)?;
    Ok(Ipv4Addr::from(u32::from(addr) & mask))
}

/// Calculate the broadcast address for a given IP and prefix length.
pub fn broadcast_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr> {
    let mask = get_cidr_mask(len)?;
    let network_bits = u32::from(addr) & mask;
    Ok(Ipv4Addr::from(network_bits | !mask))
}

/// Total number of addresses covered by a prefix length, `2^(32 - len)`.
pub fn num_addresses(len: u8) -> Result<u64> {
    if len > MAX_LENGTH {
        return Err(Error::invalid_cidr(
            format!("/{len}"),
            "Network length is too long",
        ));
    }
    Ok(1u64 << (MAX_LENGTH - len))
}

/// Returns the IP address following the given subnet, `None` past 255.255.255.255.
pub fn ip_after_subnet(addr: Ipv4Addr, len: u8) -> Result<Option<Ipv4Addr>> {
    let broadcast = broadcast_addr(addr, len)?;
    Ok(u32::from(broadcast).checked_add(1).map(Ipv4Addr::from))
}

/// IPv4 address with CIDR notation support.
#[derive(Eq, Ord, Debug, Copy, Clone, Hash)]
pub struct Ipv4 {
    /// The IPv4 address as written, host bits included.
    pub addr: Ipv4Addr,
    /// The prefix length (0-32).
    pub mask: u8,
}

impl Serialize for Ipv4 {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Ipv4 {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Ipv4, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ipv4::new(&s).map_err(de::Error::custom)
    }
}

impl FromStr for Ipv4 {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ipv4::new(s)
    }
}

impl Ipv4 {
    /// Create a new [`Ipv4`] from a CIDR string (e.g., "10.0.0.0/24").
    pub fn new(addr_cidr: &str) -> Result<Ipv4> {
        let trimmed = addr_cidr.trim();
        let parts: Vec<&str> = trimmed.split('/').collect();
        if parts.len() != 2 {
            return Err(Error::invalid_cidr(addr_cidr, "expected address/prefix"));
        }
        let addr: Ipv4Addr = parts[0]
            .parse()
            .map_err(|_| Error::invalid_cidr(addr_cidr, format!("invalid address {}", parts[0])))?;
        // u8::from_str accepts a leading '+', plain digits only here
        if parts[1].is_empty() || !parts[1].bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::invalid_cidr(
                addr_cidr,
                format!("invalid prefix length {}", parts[1]),
            ));
        }
        let mask: u8 = parts[1]
            .parse()
            .map_err(|_| Error::invalid_cidr(addr_cidr, format!("invalid prefix length {}", parts[1])))?;
        Ipv4::from_parts(addr, mask)
    }

    /// Build from an already parsed address and prefix length.
    pub fn from_parts(addr: Ipv4Addr, mask: u8) -> Result<Ipv4> {
        if mask > MAX_LENGTH {
            return Err(Error::invalid_cidr(
                format!("{addr}/{mask}"),
                "prefix length out of range 0..=32",
            ));
        }
        Ok(Ipv4 { addr, mask })
    }

    /// Get the highest (broadcast) address in the subnet.
    pub fn hi(&self) -> Ipv4Addr {
        // mask is validated on construction
        let mask = get_cidr_mask(self.mask).unwrap_or(u32::MAX);
        Ipv4Addr::from((u32::from(self.addr) & mask) | !mask)
    }

    /// Get the lowest (network) address in the subnet.
    pub fn lo(&self) -> Ipv4Addr {
        let mask = get_cidr_mask(self.mask).unwrap_or(u32::MAX);
        Ipv4Addr::from(u32::from(self.addr) & mask)
    }

    /// The subnet this address belongs to, host bits cleared.
    pub fn network(&self) -> Ipv4 {
        Ipv4 {
            addr: self.lo(),
            mask: self.mask,
        }
    }

    /// True if `ip` falls inside this subnet.
    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        self.lo() <= ip && ip <= self.hi()
    }

    /// Prefix overlap: both networks cut to the shorter prefix share a network address.
    pub fn overlaps(&self, other: &Ipv4) -> bool {
        let len = self.mask.min(other.mask);
        let mask = get_cidr_mask(len).unwrap_or(u32::MAX);
        u32::from(self.addr) & mask == u32::from(other.addr) & mask
    }
}

impl std::fmt::Display for Ipv4 {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.mask)
    }
}

impl PartialEq for Ipv4 {
    fn eq(&self, other: &Ipv4) -> bool {
        self.addr == other.addr && self.mask == other.mask
    }
}

impl PartialOrd for Ipv4 {
    fn partial_cmp(&self, other: &Ipv4) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
