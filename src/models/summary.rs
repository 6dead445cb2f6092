use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::RoomType;

pub const DISPLAY_DATE_FORMAT: &str = "%B %d, %Y";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingSummary {
    pub booking_id: String,
    pub guest_name: String,
    pub room_type: RoomType,
    pub checkin: NaiveDate,
    pub checkout: NaiveDate,
    pub nights: i64,
    pub guests: String,
}

impl BookingSummary {
    pub fn render(&self, hotel_name: &str) -> String {
        // relay scrapes these labels, one per line
        format!(
            "🎉 Booking Confirmed! 🎉\n\
             \n\
             Booking ID: {}\n\
             Guest: {}\n\
             Room: {}\n\
             Check-in: {}\n\
             Check-out: {}\n\
             Nights: {}\n\
             Guests: {}\n\
             \n\
             Thank you for choosing {hotel_name}!",
            self.booking_id,
            self.guest_name,
            self.room_type,
            self.checkin.format(DISPLAY_DATE_FORMAT),
            self.checkout.format(DISPLAY_DATE_FORMAT),
            self.nights,
            self.guests,
        )
    }
}
