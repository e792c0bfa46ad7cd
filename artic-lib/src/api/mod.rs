//! Web API operations

mod artworks;

pub use artworks::*;
