use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RoomType {
    #[serde(rename = "Standard Room")]
    Standard,
    #[serde(rename = "Deluxe Room")]
    Deluxe,
    #[serde(rename = "Family Room")]
    Family,
    #[serde(rename = "Suite")]
    Suite,
}

impl RoomType {
    pub const ALL: [RoomType; 4] = [
        RoomType::Standard,
        RoomType::Deluxe,
        RoomType::Family,
        RoomType::Suite,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoomType::Standard => "Standard Room",
            RoomType::Deluxe => "Deluxe Room",
            RoomType::Family => "Family Room",
            RoomType::Suite => "Suite",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        RoomType::ALL.into_iter().find(|room| room.as_str() == s)
    }

    pub fn menu_number(&self) -> u8 {
        match self {
            RoomType::Standard => 1,
            RoomType::Deluxe => 2,
            RoomType::Family => 3,
            RoomType::Suite => 4,
        }
    }

    pub fn nightly_price(&self) -> u32 {
        match self {
            RoomType::Standard => 100,
            RoomType::Deluxe => 150,
            RoomType::Family => 180,
            RoomType::Suite => 250,
        }
    }

    pub fn amenities(&self) -> &'static [&'static str] {
        match self {
            RoomType::Standard => &["WiFi", "TV", "AC"],
            RoomType::Deluxe => &["WiFi", "TV", "AC", "Mini-bar"],
            RoomType::Family => &["WiFi", "TV", "AC", "Extra bed"],
            RoomType::Suite => &["WiFi", "TV", "AC", "Living area", "Balcony"],
        }
    }
}

impl std::fmt::Display for RoomType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn room_menu() -> String {
    RoomType::ALL
        .iter()
        .map(|room| {
            format!(
                "{}. {} - ${}/night\n   {}",
                room.menu_number(),
                room.as_str(),
                room.nightly_price(),
                room.amenities().join(", ")
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
