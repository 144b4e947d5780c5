//! Domain models

pub mod order;
pub mod printer;
pub mod staff;
