//! Terminal viewer for the artwork collection: a paged table whose row
//! selection survives page navigation.

pub mod app;
pub mod config;
pub mod input;
pub mod paths;
pub mod render;
pub mod view;
pub mod widgets;
