mod company;
mod profile;
mod user;

pub use company::*;
pub use profile::*;
pub use user::*;
