//! tsdiag-middleware
//!
//! Wrappers that sit between a [`SeriesSource`](tsdiag_core::SeriesSource)
//! and its callers.
#![warn(missing_docs)]

mod cache;

pub use crate::cache::CachingSource;
