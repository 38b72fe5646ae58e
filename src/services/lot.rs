//! Lot detail page loader.

use crate::api::LotReader;
use crate::domain::types::LotId;
use crate::dto::lot::LotPageData;
use crate::services::{ServiceError, ServiceResult};

/// Loads the detail page for the lot with id `raw_id`.
///
/// A missing or blank id fails with [`ServiceError::TypeConstraint`] before
/// any request is made.
pub async fn load_lot_page<R>(reader: &R, raw_id: Option<&str>) -> ServiceResult<LotPageData>
where
    R: LotReader + ?Sized,
{
    let id = LotId::new(raw_id.unwrap_or_default())?;

    let lot = reader.get_lot(&id).await.map_err(|err| {
        log::error!("Failed to load lot {id}: {err}");
        ServiceError::from(err)
    })?;

    Ok(LotPageData::from(&lot))
}
