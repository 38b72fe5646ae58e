//! Auction lot records returned by the aggregation API.
//!
//! The remote schema is loose: most fields are optional, numbers sometimes
//! arrive as strings and two price shapes coexist (`price.current` and
//! `price_range`). Deserialization here is lenient so that one odd field never
//! discards a whole result page, and every defaulting rule the pages rely on
//! lives on [`Lot`] instead of in the templates.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::domain::lenient::{lenient_number, lenient_record, lenient_text};
use crate::domain::query::{Location, QueryString};

/// Image shown when a lot carries no photos.
pub const PLACEHOLDER_IMAGE: &str = "/assets/placeholder-car.jpg";

const FALLBACK_TITLE: &str = "Classic Vehicle";
const FALLBACK_HOUSE: &str = "Online Auction";
const FALLBACK_LOCATION: &str = "Australia";

/// Known `source` slugs and the auction house they belong to.
const AUCTION_HOUSES: [(&str, &str); 10] = [
    ("shannons", "Shannons"),
    ("lloydsonline", "Lloyds Auctions"),
    ("grays", "Grays"),
    ("pickles", "Pickles"),
    ("allbids", "Allbids"),
    ("carbids", "Carbids"),
    ("bennettsclassicauctions", "Bennetts Classic Auctions"),
    ("collectingcars", "Collecting Cars"),
    ("seven82motors", "Seven82Motors"),
    ("tradinggarage", "Trading Garage"),
];

/// Maps a lot `source` to a display name for its auction house.
pub fn auction_house_name(source: Option<&str>) -> String {
    let Some(source) = source.map(str::trim).filter(|s| !s.is_empty()) else {
        return FALLBACK_HOUSE.to_string();
    };
    let slug = source.to_lowercase();
    AUCTION_HOUSES
        .iter()
        .find(|(key, _)| *key == slug)
        .map_or_else(|| source.to_string(), |(_, name)| (*name).to_string())
}

fn lenient_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let number = lenient_number(deserializer)?;
    Ok(number
        .filter(|n| n.fract() == 0.0 && *n > 0.0 && *n < 10_000.0)
        .map(|n| n as i32))
}

fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        Some(Value::String(s)) => vec![s],
        _ => Vec::new(),
    })
}

fn lenient_location<'de, D>(deserializer: D) -> Result<Option<LotLocation>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(LotLocation::Text(s)),
        Some(Value::Object(map)) => {
            let part = |key: &str| map.get(key).and_then(Value::as_str).map(str::to_string);
            Some(LotLocation::Parts {
                city: part("city"),
                state: part("state"),
            })
        }
        _ => None,
    })
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Where a lot is offered: either free text or structured parts.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(untagged)]
pub enum LotLocation {
    Text(String),
    Parts {
        city: Option<String>,
        state: Option<String>,
    },
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct LotPriceInfo {
    #[serde(default, deserialize_with = "lenient_number")]
    pub current: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub starting: Option<f64>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct LotPriceRange {
    #[serde(default, deserialize_with = "lenient_number")]
    pub low: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub high: Option<f64>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct LotSpecs {
    #[serde(default, deserialize_with = "lenient_text")]
    pub engine: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub transmission: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub odometer: Option<String>,
    #[serde(
        default,
        rename = "bodyStyle",
        alias = "body_style",
        deserialize_with = "lenient_text"
    )]
    pub body_style: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub exterior: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub interior: Option<String>,
}

impl LotSpecs {
    pub fn is_empty(&self) -> bool {
        [
            &self.engine,
            &self.transmission,
            &self.odometer,
            &self.body_style,
            &self.exterior,
            &self.interior,
        ]
        .iter()
        .all(|field| non_blank(field).is_none())
    }
}

/// Price shown for a lot after the defaulting rules are applied.
#[derive(Clone, Copy, Debug, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LotPrice {
    Range { low: f64, high: f64 },
    Single { amount: f64 },
    OnRequest,
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LotBadge {
    NoReserve,
    ReserveMet,
}

impl LotBadge {
    pub fn label(self) -> &'static str {
        match self {
            LotBadge::NoReserve => "No Reserve",
            LotBadge::ReserveMet => "Reserve Met",
        }
    }
}

/// A single auctioned vehicle listing.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Lot {
    #[serde(default, rename = "_id", deserialize_with = "lenient_text")]
    pub object_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub make: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub model: Option<String>,
    #[serde(default, deserialize_with = "lenient_year")]
    pub year: Option<i32>,
    #[serde(default, deserialize_with = "string_list")]
    pub images: Vec<String>,
    #[serde(default, deserialize_with = "lenient_record")]
    pub price: Option<LotPriceInfo>,
    #[serde(default, deserialize_with = "lenient_record")]
    pub price_range: Option<LotPriceRange>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub reserve: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub auction_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub auction_end: Option<String>,
    #[serde(default, deserialize_with = "lenient_location")]
    pub location: Option<LotLocation>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub source: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub provenance: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub odometer: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub body_style: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub transmission: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub fuel_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub buyers_premium_pct: Option<f64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient_record")]
    pub specs: Option<LotSpecs>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub status: Option<String>,
}

impl Lot {
    /// Record id, preferring `_id` over `id`.
    pub fn lot_id(&self) -> Option<&str> {
        non_blank(&self.object_id).or_else(|| non_blank(&self.id))
    }

    /// Trimmed title, else `year make model`, else a generic label.
    pub fn display_title(&self) -> String {
        if let Some(title) = non_blank(&self.title) {
            return title.to_string();
        }
        let year = self.year.map(|y| y.to_string());
        let parts = [year.as_deref(), non_blank(&self.make), non_blank(&self.model)]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>();
        if parts.is_empty() {
            FALLBACK_TITLE.to_string()
        } else {
            parts.join(" ")
        }
    }

    /// A lot is worth listing when it can be named by title or by make and model.
    pub fn is_listable(&self) -> bool {
        non_blank(&self.title).is_some()
            || (non_blank(&self.make).is_some() && non_blank(&self.model).is_some())
    }

    /// Image URLs with tracking/resize query strings stripped.
    pub fn image_urls(&self) -> Vec<String> {
        self.images
            .iter()
            .filter_map(|img| img.split('?').next())
            .filter(|img| !img.trim().is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn primary_image(&self) -> String {
        self.image_urls()
            .into_iter()
            .next()
            .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string())
    }

    pub fn auction_house(&self) -> String {
        auction_house_name(self.source.as_deref())
    }

    pub fn location_label(&self) -> String {
        match &self.location {
            Some(LotLocation::Text(text)) if !text.trim().is_empty() => text.trim().to_string(),
            Some(LotLocation::Parts { city, state }) => {
                let parts = [non_blank(city), non_blank(state)]
                    .into_iter()
                    .flatten()
                    .collect::<Vec<_>>();
                if parts.is_empty() {
                    FALLBACK_LOCATION.to_string()
                } else {
                    parts.join(", ")
                }
            }
            _ => FALLBACK_LOCATION.to_string(),
        }
    }

    pub fn badge(&self) -> Option<LotBadge> {
        match non_blank(&self.reserve) {
            Some("No") => Some(LotBadge::NoReserve),
            Some("Yes") => Some(LotBadge::ReserveMet),
            _ => None,
        }
    }

    /// Auction date, falling back to the auction end.
    pub fn scheduled_date(&self) -> Option<&str> {
        non_blank(&self.auction_date).or_else(|| non_blank(&self.auction_end))
    }

    pub fn odometer_reading(&self) -> Option<&str> {
        non_blank(&self.odometer).or_else(|| {
            self.specs
                .as_ref()
                .and_then(|specs| non_blank(&specs.odometer))
        })
    }

    pub fn price(&self) -> LotPrice {
        if let Some(LotPriceRange {
            low: Some(low),
            high: Some(high),
        }) = self.price_range.as_ref()
        {
            if low == high {
                return LotPrice::Single { amount: *low };
            }
            return LotPrice::Range {
                low: *low,
                high: *high,
            };
        }
        match self.price.as_ref().and_then(|p| p.current) {
            Some(amount) => LotPrice::Single { amount },
            None => LotPrice::OnRequest,
        }
    }

    /// Link to the detail page for this lot, when it has an id.
    pub fn detail_href(&self) -> Option<String> {
        self.lot_id().map(|id| {
            Location::new("/auction-detail")
                .with_query(QueryString::from_pairs([("id", id)]))
                .href()
        })
    }
}
