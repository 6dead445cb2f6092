pub mod conversation;
pub mod relay;
pub mod room;
pub mod slots;
pub mod summary;

pub use conversation::Conversation;
pub use relay::{BookingData, BotMessage, RelayReply, ResponseKind, WebhookRequest};
pub use room::{room_menu, RoomType};
pub use slots::{BookingSlots, SlotField, SlotUpdate, StepOutcome};
pub use summary::{BookingSummary, DISPLAY_DATE_FORMAT};
