pub mod flight;

pub use flight::*;
