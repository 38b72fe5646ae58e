//! Domain values shared by the synchronizer, the API client and the pages.

pub mod calendar;
pub mod criteria;
pub mod lenient;
pub mod lot;
pub mod pagination;
pub mod query;
pub mod types;
