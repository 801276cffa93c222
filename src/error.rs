//! Main Crate Error

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
/// Peerstore crate error enum.
pub enum Error {
    /// Info hashes are exactly [INFO_HASH_SIZE](crate::INFO_HASH_SIZE) bytes.
    #[error("Invalid info hash size, expected 20 bytes, got {0}")]
    InvalidInfoHashSize(usize),

    /// Compact peer contacts are 6 bytes (IPv4) or 18 bytes (IPv6).
    #[error("Invalid compact peer contact size, expected 6 or 18 bytes, got {0}")]
    InvalidPeerContactSize(usize),
}

/// Alias for `Result<T, Error>`.
pub type Result<T, E = Error> = std::result::Result<T, E>;
