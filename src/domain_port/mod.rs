// store

mod membership_store;
mod profile_store;

pub use membership_store::*;
pub use profile_store::*;

// diagnostics

mod diagnostic_sink;

pub use diagnostic_sink::*;
