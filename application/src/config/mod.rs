//! Application-level configuration.
//!
//! - [`ListingParams`]: how many questions the index view shows

pub mod listing_params;

pub use listing_params::ListingParams;
