mod membership_store_mysql;
mod profile_store_mysql;

pub use membership_store_mysql::*;
pub use profile_store_mysql::*;

mod util;
