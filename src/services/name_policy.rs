use super::parsers::looks_like_date;

pub trait NameValidator: Send + Sync {
    fn accept(&self, candidate: &str) -> bool;
}

const STOP_WORDS: &[&str] = &[
    "hello", "hi", "hey", "start", "book", "room", "thanks", "thank", "you", "bye", "goodbye",
];

// Rejects greetings, bare numbers, dates and single characters
#[derive(Debug, Clone, Default)]
pub struct StopWordNameValidator;

impl NameValidator for StopWordNameValidator {
    fn accept(&self, candidate: &str) -> bool {
        let trimmed = candidate.trim();
        let lowered = trimmed.to_lowercase();

        trimmed.chars().count() > 1
            && !STOP_WORDS.contains(&lowered.as_str())
            && !trimmed.chars().all(|c| c.is_ascii_digit())
            && !looks_like_date(trimmed)
    }
}
