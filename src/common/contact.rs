//! Compact encoding of an announced peer's address.
use std::{
    fmt::{self, Debug, Formatter},
    net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, SocketAddrV4},
};

use bytes::Bytes;

use crate::{Error, Result};

/// Compact IPv4 peer contact size: 4 bytes address + 2 bytes port.
pub const COMPACT_V4_SIZE: usize = 6;
/// Compact IPv6 peer contact size: 16 bytes address + 2 bytes port.
pub const COMPACT_V6_SIZE: usize = 18;

#[derive(Clone, PartialEq, Eq, Hash)]
/// Peer address in the compact binary form used in `get_peers` values.
///
/// The store never looks inside, contacts are compared by their raw bytes.
pub struct PeerContact(Bytes);

impl PeerContact {
    /// Create a PeerContact from compact bytes. Returns Err unless `bytes` is
    /// [COMPACT_V4_SIZE] or [COMPACT_V6_SIZE] long.
    pub fn from_bytes<T: AsRef<[u8]>>(bytes: T) -> Result<PeerContact> {
        let bytes = bytes.as_ref();

        match bytes.len() {
            COMPACT_V4_SIZE | COMPACT_V6_SIZE => Ok(PeerContact(Bytes::copy_from_slice(bytes))),
            len => Err(Error::InvalidPeerContactSize(len)),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Decode the compact bytes back into a socket address.
    pub fn to_socket_addr(&self) -> SocketAddr {
        let bytes = &self.0;
        let (ip, port) = bytes.split_at(bytes.len() - 2);
        let port = u16::from_be_bytes([port[0], port[1]]);

        let ip = if ip.len() == 4 {
            let mut octets = [0; 4];
            octets.copy_from_slice(ip);
            IpAddr::V4(Ipv4Addr::from(octets))
        } else {
            let mut octets = [0; 16];
            octets.copy_from_slice(ip);
            IpAddr::V6(Ipv6Addr::from(octets))
        };

        SocketAddr::new(ip, port)
    }
}

impl From<SocketAddr> for PeerContact {
    fn from(address: SocketAddr) -> Self {
        let mut bytes = Vec::with_capacity(COMPACT_V6_SIZE);

        match address.ip() {
            IpAddr::V4(ip) => bytes.extend_from_slice(&ip.octets()),
            IpAddr::V6(ip) => bytes.extend_from_slice(&ip.octets()),
        }
        bytes.extend_from_slice(&address.port().to_be_bytes());

        PeerContact(bytes.into())
    }
}

impl From<SocketAddrV4> for PeerContact {
    fn from(address: SocketAddrV4) -> Self {
        SocketAddr::V4(address).into()
    }
}

impl Debug for PeerContact {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "PeerContact({})", self.to_socket_addr())
    }
}
