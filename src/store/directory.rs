//! Manage announced peers for info_hashes

use lru::LruCache;
use rand::{thread_rng, Rng};
use tracing::{debug, trace};

use crate::common::{InfoHash, PeerContact};

use super::{ContactSet, PeerStoreSettings};

#[derive(Debug)]
/// An LRU cache of announced [PeerContact]s per info hash.
///
/// The cache alone bounds the number of info hashes: adding a contact for a new
/// info hash while full evicts the least recently used info hash with all of its contacts.
/// Reads and writes both refresh an info hash's recency.
///
/// Read [BEP_0005](https://www.bittorrent.org/beps/bep_0005.html) for more information.
pub struct PeerDirectory {
    info_hashes: LruCache<InfoHash, ContactSet>,
    max_info_hash_peers: usize,
    k_nodes: usize,
}

impl Default for PeerDirectory {
    fn default() -> Self {
        PeerDirectory::new(&PeerStoreSettings::default())
    }
}

impl PeerDirectory {
    pub fn new(settings: &PeerStoreSettings) -> Self {
        Self {
            info_hashes: LruCache::new(settings.max_info_hashes()),
            max_info_hash_peers: settings.max_info_hash_peers(),
            k_nodes: settings.k_nodes(),
        }
    }

    /// Number of info hashes currently tracked.
    pub fn size(&self) -> usize {
        self.info_hashes.len()
    }

    /// Maximum number of info hashes before the least recently used is evicted.
    pub fn capacity(&self) -> usize {
        self.info_hashes.cap().get()
    }

    /// Contacts announced for `info_hash`, or None if it is not tracked.
    pub fn get(&mut self, info_hash: &InfoHash) -> Option<&ContactSet> {
        self.info_hashes.get(info_hash)
    }

    /// Number of known contacts for `info_hash`, 0 if it is not tracked.
    pub fn count(&mut self, info_hash: &InfoHash) -> usize {
        self.get(info_hash).map_or(0, ContactSet::len)
    }

    /// Returns up to `k_nodes` (default [K_NODES](super::K_NODES)) contacts
    /// for `info_hash` to include in a `get_peers` response.
    pub fn peer_contacts(&mut self, info_hash: &InfoHash) -> Vec<PeerContact> {
        self.peer_contacts_with_rng(info_hash, &mut thread_rng())
    }

    /// Same as [Self::peer_contacts] with a caller provided random number generator.
    ///
    /// If there are no more than `k_nodes` contacts, all of them are returned in insertion order.
    /// Otherwise a random offset in `[0, count - k_nodes)` is chosen and the `k_nodes`
    /// contiguous contacts from there are returned. This is cheap and good enough
    /// for peer discovery, but not a uniform sample.
    pub fn peer_contacts_with_rng<R: Rng + ?Sized>(
        &mut self,
        info_hash: &InfoHash,
        rng: &mut R,
    ) -> Vec<PeerContact> {
        let k_nodes = self.k_nodes;

        let contacts = match self.info_hashes.get(info_hash) {
            Some(contacts) => contacts,
            None => return Vec::new(),
        };

        let size = contacts.len();

        if size <= k_nodes {
            return contacts.iter().cloned().collect();
        }

        let offset = rng.gen_range(0..size - k_nodes);

        contacts.window(offset, k_nodes).to_vec()
    }

    /// Record that `contact` announced itself as a peer for `info_hash`.
    ///
    /// Returns false without adding anything if the contact is already known,
    /// or if the info hash already has more than `max_info_hash_peers` contacts.
    pub fn add_contact(&mut self, info_hash: InfoHash, contact: PeerContact) -> bool {
        let max_info_hash_peers = self.max_info_hash_peers;

        if !self.info_hashes.contains(&info_hash) {
            if let Some((evicted, contacts)) = self.info_hashes.push(info_hash, ContactSet::new())
            {
                debug!(
                    ?evicted,
                    peers = contacts.len(),
                    "Evicted least recently used info hash"
                );
            }
        }

        let contacts = match self.info_hashes.get_mut(&info_hash) {
            Some(contacts) => contacts,
            None => return false,
        };

        if contacts.len() > max_info_hash_peers {
            debug!(
                ?info_hash,
                ?contact,
                peers = contacts.len(),
                "Too many peers for info hash"
            );

            return false;
        }

        if !contacts.insert(contact) {
            return false;
        }

        trace!(?info_hash, peers = contacts.len(), "Added peer contact");

        true
    }
}

#[cfg(test)]
mod test {
    use std::{collections::HashSet, net::SocketAddr};

    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn contact(i: u16) -> PeerContact {
        SocketAddr::from(([127, 0, (i >> 8) as u8, i as u8], 6881)).into()
    }

    fn directory(max_info_hashes: usize, max_info_hash_peers: usize) -> PeerDirectory {
        PeerDirectory::new(&PeerStoreSettings {
            max_info_hashes,
            max_info_hash_peers,
            ..Default::default()
        })
    }

    #[test]
    fn unknown_info_hash() {
        let mut directory = PeerDirectory::default();

        let info_hash = InfoHash::random();

        assert!(directory.get(&info_hash).is_none());
        assert_eq!(directory.count(&info_hash), 0);
        assert!(directory.peer_contacts(&info_hash).is_empty());
        assert_eq!(directory.size(), 0);
    }

    #[test]
    fn duplicate_contact() {
        let mut directory = PeerDirectory::default();

        let info_hash = InfoHash::random();

        assert!(directory.add_contact(info_hash, contact(1)));
        assert!(!directory.add_contact(info_hash, contact(1)));
        assert!(directory.add_contact(info_hash, contact(2)));

        assert_eq!(directory.count(&info_hash), 2);
        assert_eq!(directory.size(), 1);
    }

    #[test]
    fn max_info_hash_peers() {
        let mut directory = directory(10, 3);

        let info_hash = InfoHash::random();

        for i in 0..4 {
            assert!(directory.add_contact(info_hash, contact(i)));
        }

        assert!(!directory.add_contact(info_hash, contact(4)));
        assert!(!directory.add_contact(info_hash, contact(5)));
        assert_eq!(directory.count(&info_hash), 4);
    }

    #[test]
    fn max_info_hashes() {
        let mut directory = directory(2, 100);

        let info_hash_a = InfoHash::random();
        let info_hash_b = InfoHash::random();
        let info_hash_c = InfoHash::random();

        directory.add_contact(info_hash_a, contact(1));
        directory.add_contact(info_hash_a, contact(2));
        directory.add_contact(info_hash_b, contact(1));
        directory.add_contact(info_hash_c, contact(1));

        assert_eq!(directory.size(), 2);
        assert!(directory.get(&info_hash_a).is_none());
        assert_eq!(directory.count(&info_hash_b), 1);
        assert_eq!(directory.count(&info_hash_c), 1);
    }

    #[test]
    fn reads_refresh_recency() {
        let mut directory = directory(2, 100);

        let info_hash_a = InfoHash::random();
        let info_hash_b = InfoHash::random();
        let info_hash_c = InfoHash::random();

        directory.add_contact(info_hash_a, contact(1));
        directory.add_contact(info_hash_b, contact(1));

        assert_eq!(directory.count(&info_hash_a), 1);

        directory.add_contact(info_hash_c, contact(1));

        assert!(directory.get(&info_hash_b).is_none());
        assert!(directory.get(&info_hash_a).is_some());
    }

    #[test]
    fn all_peers_when_few() {
        let mut directory = PeerDirectory::default();

        let info_hash = InfoHash::random();

        for i in 0..8 {
            directory.add_contact(info_hash, contact(i));
        }

        assert_eq!(
            directory.peer_contacts(&info_hash),
            (0..8).map(contact).collect::<Vec<_>>()
        );
    }

    #[test]
    fn contiguous_window() {
        let mut directory = PeerDirectory::default();

        let info_hash = InfoHash::random();

        for i in 0..100 {
            directory.add_contact(info_hash, contact(i));
        }

        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..50 {
            let sample = directory.peer_contacts_with_rng(&info_hash, &mut rng);

            assert_eq!(sample.len(), 8);

            let contacts = directory.get(&info_hash).unwrap();
            let start = contacts.iter().position(|c| c == &sample[0]).unwrap();

            assert!(start < 100 - 8);
            assert_eq!(contacts.window(start, 8), sample.as_slice());
            assert_eq!(sample.iter().collect::<HashSet<_>>().len(), 8);
        }
    }

    #[test]
    fn one_more_than_k_nodes() {
        let mut directory = PeerDirectory::default();

        let info_hash = InfoHash::random();

        for i in 0..9 {
            directory.add_contact(info_hash, contact(i));
        }

        // Only offset 0 is in range.
        assert_eq!(
            directory.peer_contacts(&info_hash),
            (0..8).map(contact).collect::<Vec<_>>()
        );
    }
}
