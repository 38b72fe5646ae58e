//! Page data for the auction calendar.

use serde::Serialize;

use crate::domain::calendar::{AuctionEvent, StateChip};

pub const CALENDAR_LOAD_FAILED_MESSAGE: &str = "Failed to load auctions";
pub const NO_EVENTS_MESSAGE: &str = "No upcoming auctions found";

/// An auction as shown on the calendar.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EventCard {
    pub id: Option<String>,
    pub title: String,
    pub auction_house: String,
    pub date: Option<String>,
    pub end_date: Option<String>,
    pub time: Option<String>,
    pub location: Option<String>,
    pub state: Option<String>,
    pub online_only: bool,
    pub lots: Option<u64>,
    pub url: Option<String>,
}

impl From<&AuctionEvent> for EventCard {
    fn from(event: &AuctionEvent) -> Self {
        Self {
            id: event.event_id().map(str::to_string),
            title: event.display_title(),
            auction_house: event.house_name(),
            date: event.date.clone(),
            end_date: event.end_date.clone(),
            time: event.time.clone(),
            location: event.location.clone(),
            state: event.state.clone(),
            online_only: event.online_only.unwrap_or(false),
            lots: event.lots,
            url: event.url.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EventsState {
    Events { events: Vec<EventCard> },
    Empty { message: &'static str },
    Failed { message: &'static str, retry_href: String },
}

/// Values echoed into the calendar filter form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CalendarFormValues {
    pub state: String,
    pub month: String,
    pub auction_house: String,
    pub online_only: bool,
}

/// Data required to render the calendar page.
#[derive(Debug, Serialize)]
pub struct CalendarPageData {
    pub chips: Vec<StateChip>,
    pub form: CalendarFormValues,
    pub events: EventsState,
}
