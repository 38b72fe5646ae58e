//! Form definitions backing the search routes.

use thiserror::Error;

use crate::domain::criteria::UnknownQuickFilter;

pub mod search;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error(transparent)]
    UnknownQuickFilter(#[from] UnknownQuickFilter),

    #[error("malformed form body: {0}")]
    Malformed(String),
}
