use chrono::NaiveDate;
use rand::Rng;

use crate::models::{
    room_menu, BookingSlots, RoomType, SlotField, SlotUpdate, StepOutcome, DISPLAY_DATE_FORMAT,
};
use crate::services::name_policy::{NameValidator, StopWordNameValidator};
use crate::services::parsers::{extract_guest_count, match_room, parse_date};
use crate::services::summary::{build_summary, parse_stored_date};

pub const NAME_PROMPT: &str = "What's your name for the booking?";
pub const RESTART_MESSAGE: &str = "Error with dates. Let's start over. What's your name?";
const GUESTS_PROMPT: &str = "How many guests will be staying? Please enter a number.";
const ROOM_PROMPT: &str = "Please select a room type: Standard, Deluxe, Family, or Suite.";
const ROOM_CHOICES: &str = "Please choose: Standard, Deluxe, Family, or Suite.";

#[derive(Debug, Clone)]
pub struct DialogueConfig {
    // year for dates typed without one ("sep 20", "20/9")
    pub default_year: i32,
    pub hotel_name: String,
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            default_year: 2025,
            hotel_name: "Grand Hotel".to_string(),
        }
    }
}

pub struct BookingDialogue {
    config: DialogueConfig,
    names: Box<dyn NameValidator>,
}

impl BookingDialogue {
    pub fn new(config: DialogueConfig) -> Self {
        Self {
            config,
            names: Box::new(StopWordNameValidator),
        }
    }

    pub fn with_name_validator(mut self, validator: impl NameValidator + 'static) -> Self {
        self.names = Box::new(validator);
        self
    }

    pub fn step(&self, slots: &BookingSlots, text: &str, today: NaiveDate) -> StepOutcome {
        self.step_with_rng(slots, text, today, &mut rand::thread_rng())
    }

    pub fn step_with_rng<R: Rng + ?Sized>(
        &self,
        slots: &BookingSlots,
        text: &str,
        today: NaiveDate,
        rng: &mut R,
    ) -> StepOutcome {
        let text = text.trim();
        let next = slots.first_missing();

        tracing::debug!(
            slot = next.map(|f| f.as_str()).unwrap_or("none"),
            input = text,
            "dialogue step"
        );

        match next {
            Some(SlotField::GuestName) => self.collect_name(text),
            Some(SlotField::CheckinDate) => self.collect_checkin(text, today),
            Some(SlotField::CheckoutDate) => self.collect_checkout(slots, text),
            Some(SlotField::NumberOfGuests) => collect_guests(text),
            Some(SlotField::RoomType) => self.collect_room(slots, text, rng),
            None => self.repeat_summary(slots, rng),
        }
    }

    fn collect_name(&self, text: &str) -> StepOutcome {
        if !self.names.accept(text) {
            return StepOutcome::reply(NAME_PROMPT);
        }

        tracing::info!(guest_name = text, "guest name set");
        StepOutcome::with_update(
            SlotUpdate::set(SlotField::GuestName, text),
            format!("Hi {text}! When would you like to check in? (e.g., '20/9/2025', 'September 20')"),
        )
    }

    fn collect_checkin(&self, text: &str, today: NaiveDate) -> StepOutcome {
        let Some(checkin) = parse_date(text, self.config.default_year) else {
            return StepOutcome::reply(
                "I couldn't understand that date. Please try '20/9/2025', 'September 20', or 'sep 20'.",
            );
        };

        if checkin <= today {
            return StepOutcome::reply(format!(
                "Please enter a check-in date after {}.",
                today.format(DISPLAY_DATE_FORMAT)
            ));
        }

        tracing::info!(%checkin, "check-in date set");
        StepOutcome::with_update(
            SlotUpdate::set(SlotField::CheckinDate, checkin.format("%Y-%m-%d").to_string()),
            format!(
                "Check-in: {}. When would you like to check out?",
                checkin.format(DISPLAY_DATE_FORMAT)
            ),
        )
    }

    fn collect_checkout(&self, slots: &BookingSlots, text: &str) -> StepOutcome {
        let Some(checkout) = parse_date(text, self.config.default_year) else {
            return StepOutcome::reply(
                "I couldn't understand that date. Please try '23/9/2025', 'September 23', or 'sep 23'.",
            );
        };

        let Some(checkin) = slots.checkin_date.as_deref().and_then(parse_stored_date) else {
            tracing::warn!(
                checkin = ?slots.checkin_date,
                "stored check-in date does not parse, restarting"
            );
            return restart(slots);
        };

        if checkout <= checkin {
            return StepOutcome::reply(format!(
                "Check-out must be after check-in ({}). Please try again.",
                checkin.format(DISPLAY_DATE_FORMAT)
            ));
        }

        let nights = (checkout - checkin).num_days();
        tracing::info!(%checkout, nights, "check-out date set");
        StepOutcome::with_update(
            SlotUpdate::set(SlotField::CheckoutDate, checkout.format("%Y-%m-%d").to_string()),
            format!(
                "Check-out: {} ({nights} nights). How many guests?\n\nHere are our available rooms:\n\n{}",
                checkout.format(DISPLAY_DATE_FORMAT),
                room_menu()
            ),
        )
    }

    fn collect_room<R: Rng + ?Sized>(
        &self,
        slots: &BookingSlots,
        text: &str,
        rng: &mut R,
    ) -> StepOutcome {
        let Some(room) = match_room(text) else {
            return StepOutcome::reply(ROOM_PROMPT);
        };

        let summary = match build_summary(slots, room, rng) {
            Ok(summary) => summary,
            Err(e) => {
                tracing::warn!(error = %e, "could not build booking summary, restarting");
                return restart(slots);
            }
        };

        tracing::info!(
            room = room.as_str(),
            booking_id = %summary.booking_id,
            "booking complete"
        );
        StepOutcome {
            updates: vec![SlotUpdate::set(SlotField::RoomType, room.as_str())],
            messages: vec![
                format!("Excellent choice! You've selected the {room}."),
                summary.render(&self.config.hotel_name),
            ],
        }
    }

    fn repeat_summary<R: Rng + ?Sized>(&self, slots: &BookingSlots, rng: &mut R) -> StepOutcome {
        let room = slots.room_type.as_deref().and_then(RoomType::parse);
        let summary = room.map(|room| build_summary(slots, room, rng));

        match summary {
            Some(Ok(summary)) => StepOutcome::reply(summary.render(&self.config.hotel_name)),
            Some(Err(e)) => {
                tracing::warn!(error = %e, "could not rebuild booking summary, restarting");
                restart(slots)
            }
            None => {
                tracing::warn!(room = ?slots.room_type, "stored room type is unknown, restarting");
                restart(slots)
            }
        }
    }
}

impl Default for BookingDialogue {
    fn default() -> Self {
        Self::new(DialogueConfig::default())
    }
}

fn collect_guests(text: &str) -> StepOutcome {
    let Some(count) = extract_guest_count(text) else {
        return StepOutcome::reply(GUESTS_PROMPT);
    };

    tracing::info!(guests = count, "guest count set");
    StepOutcome::with_update(
        SlotUpdate::set(SlotField::NumberOfGuests, count),
        format!(
            "Perfect! Booking for {count} guest(s). Which room would you like?\n\n{}\n\n{ROOM_CHOICES}",
            room_menu()
        ),
    )
}

fn restart(slots: &BookingSlots) -> StepOutcome {
    StepOutcome {
        updates: slots
            .filled_fields()
            .into_iter()
            .map(SlotUpdate::clear)
            .collect(),
        messages: vec![RESTART_MESSAGE.to_string()],
    }
}
