// Type definitions for the evidence register

pub mod category;
pub mod record;

pub use category::*;
pub use record::*;
