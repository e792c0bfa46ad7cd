//! Typed models

mod artwork;
mod result_set;
mod window;

pub use artwork::*;
pub use result_set::*;
pub use window::*;
