mod contact;
mod info_hash;

pub use contact::*;
pub use info_hash::*;
