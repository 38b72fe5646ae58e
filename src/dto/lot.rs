//! Page data for the lot detail page.

use serde::Serialize;

use crate::domain::lot::{Lot, LotSpecs};
use crate::dto::search::LotCard;

pub const NO_LOT_ID_MESSAGE: &str = "No lot ID provided";
pub const LOT_NOT_FOUND_MESSAGE: &str = "Lot not found";
pub const LOT_LOAD_FAILED_MESSAGE: &str = "Failed to load vehicle details. Please try again later.";

const MISSING_VALUE: &str = "—";
const UNKNOWN_ODOMETER: &str = "Not specified";

/// A labelled value in the key facts or specification tables.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FactRow {
    pub label: &'static str,
    pub value: String,
}

fn row(label: &'static str, value: Option<&str>) -> Option<FactRow> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| FactRow {
            label,
            value: v.to_string(),
        })
}

fn spec_rows(specs: Option<&LotSpecs>) -> Vec<FactRow> {
    let Some(specs) = specs else {
        return Vec::new();
    };
    [
        row("Engine", specs.engine.as_deref()),
        row("Transmission", specs.transmission.as_deref()),
        row("Odometer", specs.odometer.as_deref()),
        row("Body Style", specs.body_style.as_deref()),
        row("Exterior", specs.exterior.as_deref()),
        row("Interior", specs.interior.as_deref()),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Everything the detail template shows about one lot.
#[derive(Debug, Serialize)]
pub struct LotPageData {
    pub lot: LotCard,
    pub images: Vec<String>,
    pub badges: Vec<String>,
    pub key_facts: Vec<FactRow>,
    pub specs: Vec<FactRow>,
    pub description: Option<String>,
    pub provenance: Option<String>,
    pub buyers_premium_pct: Option<f64>,
    pub source_url: Option<String>,
}

impl From<&Lot> for LotPageData {
    fn from(lot: &Lot) -> Self {
        let card = LotCard::from(lot);

        let mut badges: Vec<String> = card.badge.iter().map(|b| b.to_string()).collect();
        if let Some(status) = lot.status.as_deref().filter(|s| !s.trim().is_empty()) {
            badges.push(status.replacen('_', " ", 1));
        }

        let year = lot.year.map(|y| y.to_string());
        let key_facts = vec![
            FactRow {
                label: "Make",
                value: lot.make.clone().unwrap_or_else(|| MISSING_VALUE.to_string()),
            },
            FactRow {
                label: "Model",
                value: lot.model.clone().unwrap_or_else(|| MISSING_VALUE.to_string()),
            },
            FactRow {
                label: "Year",
                value: year.unwrap_or_else(|| MISSING_VALUE.to_string()),
            },
            FactRow {
                label: "Odometer",
                value: card
                    .odometer
                    .clone()
                    .unwrap_or_else(|| UNKNOWN_ODOMETER.to_string()),
            },
        ];

        Self {
            images: lot.image_urls(),
            badges,
            key_facts,
            specs: spec_rows(lot.specs.as_ref()),
            description: lot.description.clone(),
            provenance: lot.provenance.clone(),
            buyers_premium_pct: lot.buyers_premium_pct,
            source_url: lot.url.clone(),
            lot: card,
        }
    }
}
