pub mod paginator;
pub mod spinner;
pub mod table;
pub mod tags;
