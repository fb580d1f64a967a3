mod diagnostics;
mod logger;

pub use diagnostics::*;
pub use logger::*;

pub use tracing::{debug, error, info, trace, warn};
