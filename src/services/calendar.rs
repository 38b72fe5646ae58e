//! Auction calendar page loader.

use crate::api::CalendarReader;
use crate::domain::calendar::{CalendarQuery, state_chips};
use crate::domain::query::{Location, QueryParams};
use crate::dto::calendar::{
    CALENDAR_LOAD_FAILED_MESSAGE, CalendarFormValues, CalendarPageData, EventCard, EventsState,
    NO_EVENTS_MESSAGE,
};

pub const CALENDAR_PATH: &str = "/auction-calendar";

/// Loads the calendar for the filters encoded in `params`.
pub async fn load_calendar_page<R>(reader: &R, params: &QueryParams) -> CalendarPageData
where
    R: CalendarReader + ?Sized,
{
    let query = CalendarQuery::from_params(params);

    let events = match reader.list_events(&query.to_query_string()).await {
        Ok(events) if events.is_empty() => EventsState::Empty {
            message: NO_EVENTS_MESSAGE,
        },
        Ok(events) => EventsState::Events {
            events: events.iter().map(EventCard::from).collect(),
        },
        Err(err) => {
            log::error!("Failed to load auction calendar: {err}");
            EventsState::Failed {
                message: CALENDAR_LOAD_FAILED_MESSAGE,
                retry_href: Location::new(CALENDAR_PATH)
                    .with_query(params.to_query_string())
                    .href(),
            }
        }
    };

    CalendarPageData {
        chips: state_chips(CALENDAR_PATH, params),
        form: CalendarFormValues {
            state: query.state.as_ref().map(|s| s.to_string()).unwrap_or_default(),
            month: query.month.map(|m| m.to_string()).unwrap_or_default(),
            auction_house: query
                .auction_house
                .as_ref()
                .map(|h| h.to_string())
                .unwrap_or_default(),
            online_only: query.online_only,
        },
        events,
    }
}
