mod diagnostic_sink_memory;
mod membership_store_memory;
mod profile_store_memory;
mod seed;

pub use diagnostic_sink_memory::*;
pub use membership_store_memory::*;
pub use profile_store_memory::*;
pub use seed::*;
