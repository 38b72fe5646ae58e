//! Forms posted by the advanced search panel.

use serde::Deserialize;

use crate::domain::criteria::FilterCriteria;
use crate::domain::query::QueryParams;
use crate::forms::FormError;

/// Advanced search form. Every field arrives as text; blank fields are unset.
#[derive(Debug, Default, Deserialize)]
pub struct FilterForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub make: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub year_min: String,
    #[serde(default)]
    pub year_max: String,
    #[serde(default)]
    pub price_min: String,
    #[serde(default)]
    pub price_max: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub auction_house: String,
    #[serde(default)]
    pub body_style: String,
    #[serde(default)]
    pub transmission: String,
    #[serde(default)]
    pub newly_added: String,
    /// Checkbox value: `"on"` from a browser, `"true"` from a hidden field.
    pub no_reserve: Option<String>,
    #[serde(default)]
    pub sort: String,
    #[serde(default)]
    pub limit: String,
}

impl FilterForm {
    /// Parses an `application/x-www-form-urlencoded` body.
    pub fn from_body(body: &[u8]) -> Result<Self, FormError> {
        serde_html_form::from_bytes(body).map_err(|e| FormError::Malformed(e.to_string()))
    }
}

impl From<FilterForm> for FilterCriteria {
    fn from(form: FilterForm) -> Self {
        let params = QueryParams::from_pairs([
            ("title", form.title),
            ("make", form.make),
            ("model", form.model),
            ("year_min", form.year_min),
            ("year_max", form.year_max),
            ("price_min", form.price_min),
            ("price_max", form.price_max),
            ("state", form.state),
            ("auction_house", form.auction_house),
            ("body_style", form.body_style),
            ("transmission", form.transmission),
            ("newly_added", form.newly_added),
            ("sort", form.sort),
            ("limit", form.limit),
        ]);
        let mut criteria = FilterCriteria::from_params(&params);
        criteria.no_reserve = matches!(form.no_reserve.as_deref(), Some("true" | "on"));
        criteria
    }
}

/// A quick-filter button press. The current criteria ride along as hidden
/// fields so the preset is merged over them.
#[derive(Debug, Deserialize)]
pub struct QuickFilterForm {
    pub name: String,
    #[serde(flatten)]
    pub filters: FilterForm,
}

impl QuickFilterForm {
    pub fn from_body(body: &[u8]) -> Result<Self, FormError> {
        serde_html_form::from_bytes(body).map_err(|e| FormError::Malformed(e.to_string()))
    }
}

/// Make/model/variant search in the home page hero.
#[derive(Debug, Default, Deserialize)]
pub struct HomeSearchForm {
    #[serde(default)]
    pub make: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub variant: String,
}

impl HomeSearchForm {
    pub fn from_body(body: &[u8]) -> Result<Self, FormError> {
        serde_html_form::from_bytes(body).map_err(|e| FormError::Malformed(e.to_string()))
    }

    /// Trimmed field values keyed by their query parameter name.
    pub fn fields(&self) -> [(&'static str, &str); 3] {
        [
            ("make", self.make.trim()),
            ("model", self.model.trim()),
            ("variant", self.variant.trim()),
        ]
    }
}
