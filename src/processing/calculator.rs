//! Subnet arithmetic.
//!
//! Turns an address and prefix length into a [`SubnetDescriptor`]. Pure, no I/O.
//! All host arithmetic is done on the address as one u32 so that carries cross
//! octet boundaries.

use crate::error::Result;
use crate::models::{get_cidr_mask, num_addresses, Ipv4, SubnetDescriptor};
use std::net::Ipv4Addr;

/// Parse a CIDR string such as "10.0.0.0/24".
pub fn parse_cidr(cidr: &str) -> Result<Ipv4> {
    Ipv4::new(cidr)
}

/// Number of assignable hosts for a prefix length.
///
/// /32 is a host route (1), /31 a point-to-point link with both ends usable
/// (RFC 3021), otherwise network and broadcast are excluded.
pub fn assignable_hosts(len: u8) -> Result<u64> {
    let total = num_addresses(len)?;
    Ok(match len {
        32 => 1,
        31 => 2,
        _ => total - 2,
    })
}

/// Resolve an address and prefix length into its full subnet descriptor.
pub fn resolve(address: Ipv4Addr, prefix_len: u8) -> Result<SubnetDescriptor> {
    let cidr = Ipv4::from_parts(address, prefix_len)?;
    resolve_ipv4(&cidr)
}

/// Resolve a CIDR string into its full subnet descriptor.
pub fn resolve_cidr(cidr: &str) -> Result<SubnetDescriptor> {
    let ipv4 = parse_cidr(cidr)?;
    let mut descriptor = resolve_ipv4(&ipv4)?;
    descriptor.cidr_notation = cidr.trim().to_string();
    Ok(descriptor)
}

/// Resolve an already parsed [`Ipv4`].
pub fn resolve_ipv4(cidr: &Ipv4) -> Result<SubnetDescriptor> {
    let mask = get_cidr_mask(cidr.mask)?;
    let network = u32::from(cidr.addr) & mask;
    let broadcast = network | !mask;

    let (first, last) = match cidr.mask {
        32 => (u32::from(cidr.addr), u32::from(cidr.addr)),
        31 => (network, broadcast),
        // prefix <= 30 leaves at least 4 addresses, no wrap possible
        _ => (network + 1, broadcast - 1),
    };

    Ok(SubnetDescriptor {
        doc_type: None,
        cidr_notation: cidr.to_string(),
        address: cidr.addr,
        subnet_bits: cidr.mask,
        subnet_mask: Ipv4Addr::from(mask),
        wildcard_mask: Ipv4Addr::from(!mask),
        network_address: Ipv4Addr::from(network),
        broadcast_address: Ipv4Addr::from(broadcast),
        assignable_hosts: assignable_hosts(cidr.mask)?,
        first_assignable_host: Ipv4Addr::from(first),
        last_assignable_host: Ipv4Addr::from(last),
    })
}

/// First address after the subnet, `None` at the top of the address space.
pub fn next_address(descriptor: &SubnetDescriptor) -> Option<Ipv4Addr> {
    u32::from(descriptor.broadcast_address)
        .checked_add(1)
        .map(Ipv4Addr::from)
}

/// Numeric prefix overlap of two CIDRs.
pub fn overlaps(left: &Ipv4, right: &Ipv4) -> bool {
    left.overlaps(right)
}
