//! Artwork collection client library
//!
//! An async client for the Art Institute of Chicago artworks listing, plus
//! the state behind a paged table whose row selection survives page
//! navigation.

pub mod api;
pub mod controller;
pub mod error;
pub mod fetch;
pub mod model;
pub mod selection;

mod client;

pub use client::*;
pub use controller::TableController;
pub use fetch::Fetcher;
pub use fetch::PageSource;
