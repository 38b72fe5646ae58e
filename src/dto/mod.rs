//! Data transfer objects handed from services to templates.

pub mod calendar;
pub mod lot;
pub mod search;
