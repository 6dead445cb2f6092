use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SlotField {
    GuestName,
    CheckinDate,
    CheckoutDate,
    NumberOfGuests,
    RoomType,
}

impl SlotField {
    // fill order
    pub const ORDER: [SlotField; 5] = [
        SlotField::GuestName,
        SlotField::CheckinDate,
        SlotField::CheckoutDate,
        SlotField::NumberOfGuests,
        SlotField::RoomType,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SlotField::GuestName => "guest_name",
            SlotField::CheckinDate => "checkin_date",
            SlotField::CheckoutDate => "checkout_date",
            SlotField::NumberOfGuests => "number_of_guests",
            SlotField::RoomType => "room_type",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BookingSlots {
    pub guest_name: Option<String>,
    pub checkin_date: Option<String>,
    pub checkout_date: Option<String>,
    pub number_of_guests: Option<String>,
    pub room_type: Option<String>,
}

impl BookingSlots {
    pub fn get(&self, field: SlotField) -> Option<&str> {
        let value = match field {
            SlotField::GuestName => &self.guest_name,
            SlotField::CheckinDate => &self.checkin_date,
            SlotField::CheckoutDate => &self.checkout_date,
            SlotField::NumberOfGuests => &self.number_of_guests,
            SlotField::RoomType => &self.room_type,
        };
        value.as_deref().filter(|v| !v.is_empty())
    }

    fn slot_mut(&mut self, field: SlotField) -> &mut Option<String> {
        match field {
            SlotField::GuestName => &mut self.guest_name,
            SlotField::CheckinDate => &mut self.checkin_date,
            SlotField::CheckoutDate => &mut self.checkout_date,
            SlotField::NumberOfGuests => &mut self.number_of_guests,
            SlotField::RoomType => &mut self.room_type,
        }
    }

    pub fn first_missing(&self) -> Option<SlotField> {
        SlotField::ORDER
            .into_iter()
            .find(|field| self.get(*field).is_none())
    }

    pub fn filled_fields(&self) -> Vec<SlotField> {
        SlotField::ORDER
            .into_iter()
            .filter(|field| self.get(*field).is_some())
            .collect()
    }

    pub fn apply(&mut self, updates: &[SlotUpdate]) {
        for update in updates {
            *self.slot_mut(update.field) = update.value.clone();
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SlotUpdate {
    pub field: SlotField,
    pub value: Option<String>,
}

impl SlotUpdate {
    pub fn set(field: SlotField, value: impl Into<String>) -> Self {
        Self {
            field,
            value: Some(value.into()),
        }
    }

    pub fn clear(field: SlotField) -> Self {
        Self { field, value: None }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StepOutcome {
    pub updates: Vec<SlotUpdate>,
    pub messages: Vec<String>,
}

impl StepOutcome {
    pub fn reply(message: impl Into<String>) -> Self {
        Self {
            updates: vec![],
            messages: vec![message.into()],
        }
    }

    pub fn with_update(update: SlotUpdate, message: impl Into<String>) -> Self {
        Self {
            updates: vec![update],
            messages: vec![message.into()],
        }
    }
}
