//! Info hash of a swarm, used as an opaque lookup key.
use rand::Rng;
use std::{
    convert::TryInto,
    fmt::{self, Debug, Display, Formatter},
};

use crate::{Error, Result};

/// The size of info hashes in bytes.
pub const INFO_HASH_SIZE: usize = 20;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
/// Info hash identifying a content swarm
pub struct InfoHash(pub [u8; INFO_HASH_SIZE]);

impl InfoHash {
    pub fn random() -> InfoHash {
        let mut rng = rand::thread_rng();
        let random_bytes: [u8; INFO_HASH_SIZE] = rng.gen();

        InfoHash(random_bytes)
    }

    /// Create a new InfoHash from some bytes. Returns Err if `bytes` is not of length
    /// [INFO_HASH_SIZE].
    pub fn from_bytes<T: AsRef<[u8]>>(bytes: T) -> Result<InfoHash> {
        let bytes = bytes.as_ref();

        let array: [u8; INFO_HASH_SIZE] = bytes
            .try_into()
            .map_err(|_| Error::InvalidInfoHashSize(bytes.len()))?;

        Ok(InfoHash(array))
    }

    pub fn as_bytes(&self) -> &[u8; INFO_HASH_SIZE] {
        &self.0
    }
}

impl Display for InfoHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for byte in self.0.iter() {
            write!(f, "{:02x}", byte)?;
        }

        Ok(())
    }
}

impl Debug for InfoHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "InfoHash({})", self)
    }
}
