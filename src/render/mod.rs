//! Terminal output: the crossterm driver that puts a cell buffer on screen.

pub mod driver;

pub use driver::Driver;
