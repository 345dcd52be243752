//! Directory listing extraction.
//!
//! Fetches one listing page and turns the rows of its
//! `table.directory-listing-table` into [`Entry`](crate::Entry) values, in
//! document order.

mod error;
mod extract;
mod walk;

pub use error::ListingError;
pub use extract::{LISTING_TABLE_CLASS, PARENT_DIRECTORY_LABEL, extract, parse_listing};
