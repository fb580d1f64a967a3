mod profile_service_impl;

pub use profile_service_impl::*;
