pub mod draw;
pub mod fixed;
pub mod random;
pub mod tickets;
pub mod transfers;
pub mod withdraw;
pub mod yield_source;

#[cfg(test)]
pub mod testing;

pub use fixed::*;
pub use transfers::*;
pub use yield_source::*;
