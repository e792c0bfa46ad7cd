//! Cell buffer and terminal output.

mod buffer;
mod terminal;

pub use buffer::*;
pub use terminal::Terminal;
