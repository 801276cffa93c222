//! Simulate announces from a swarm of peers and answer `get_peers` lookups
//! from the resulting peer store.
//!
//! Run: `cargo run --example swarm -- --info-hashes 4 --announces 5000 --verbose`

use std::net::{Ipv4Addr, SocketAddrV4};

use clap::Parser;
use rand::Rng;
use tracing::{info, Level};

use peerstore::{InfoHash, PeerContact, PeerStore, PeerStoreSettings};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Number of distinct info hashes announced for
    #[arg(long, default_value_t = 4)]
    info_hashes: usize,
    /// Number of announce_peer requests to simulate
    #[arg(long, default_value_t = 5000)]
    announces: usize,
    /// Maximum info hashes kept in the store
    #[arg(long, default_value_t = 0)]
    max_info_hashes: usize,
    /// Maximum peers kept per info hash
    #[arg(long, default_value_t = 0)]
    max_peers: usize,
    /// Log rejected announces and evictions
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        })
        .init();

    let mut store = PeerStore::new(&PeerStoreSettings {
        max_info_hashes: cli.max_info_hashes,
        max_info_hash_peers: cli.max_peers,
        ..Default::default()
    });

    let info_hashes: Vec<InfoHash> = (0..cli.info_hashes.max(1))
        .map(|_| InfoHash::random())
        .collect();

    let local = PeerContact::from(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 6881));
    store.add_local_download(info_hashes[0]);

    let mut rng = rand::thread_rng();
    let mut accepted = 0;

    for _ in 0..cli.announces {
        let info_hash = info_hashes[rng.gen_range(0..info_hashes.len())];
        let peer = SocketAddrV4::new(
            Ipv4Addr::from(rng.gen::<u32>()),
            rng.gen_range(1024..=u16::MAX),
        );

        if store.add_contact(info_hash, peer.into()) {
            accepted += 1;
        }
    }

    info!(
        announces = cli.announces,
        accepted,
        info_hashes = store.size(),
        "Finished simulating announces"
    );

    for info_hash in &info_hashes {
        let count = store.count(info_hash);

        match store.get_peers(info_hash, Some(&local)) {
            Some(peers) => {
                println!("\n{} ({} peers known):", info_hash, count);
                for peer in peers {
                    println!("  {}", peer.to_socket_addr());
                }
            }
            None => println!("\n{} has no peers", info_hash),
        }
    }
}
