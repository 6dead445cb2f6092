use chrono::NaiveDate;
use rand::Rng;

use crate::models::{BookingSlots, BookingSummary, RoomType};

pub const BOOKING_ID_PREFIX: &str = "GH";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SummaryError {
    #[error("slot {0} is empty")]
    MissingSlot(&'static str),

    #[error("stored {field} {value:?} is not an ISO date")]
    BadStoredDate { field: &'static str, value: String },
}

// Not checked for collisions
pub fn generate_booking_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("{BOOKING_ID_PREFIX}{}", rng.gen_range(1000..=9999))
}

pub fn parse_stored_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

fn required<'a>(value: &'a Option<String>, field: &'static str) -> Result<&'a str, SummaryError> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or(SummaryError::MissingSlot(field))
}

fn stored_date(value: &str, field: &'static str) -> Result<NaiveDate, SummaryError> {
    parse_stored_date(value).ok_or_else(|| SummaryError::BadStoredDate {
        field,
        value: value.to_string(),
    })
}

pub fn build_summary<R: Rng + ?Sized>(
    slots: &BookingSlots,
    room: RoomType,
    rng: &mut R,
) -> Result<BookingSummary, SummaryError> {
    let guest_name = required(&slots.guest_name, "guest_name")?;
    let checkin = stored_date(required(&slots.checkin_date, "checkin_date")?, "checkin_date")?;
    let checkout = stored_date(required(&slots.checkout_date, "checkout_date")?, "checkout_date")?;
    let guests = required(&slots.number_of_guests, "number_of_guests")?;

    Ok(BookingSummary {
        booking_id: generate_booking_id(rng),
        guest_name: guest_name.to_string(),
        room_type: room,
        checkin,
        checkout,
        nights: (checkout - checkin).num_days(),
        guests: guests.to_string(),
    })
}
