use std::str::FromStr;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::models::RoomType;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DateParseError {
    #[error("no recognizable date in input")]
    NoMatch,

    #[error("{day}/{month}/{year} is not a calendar date")]
    InvalidCalendarDate { day: u32, month: u32, year: i32 },
}

// ── Date patterns, tried in this order ──

static DAY_MONTH_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,2})[/-](\d{1,2})[/-](\d{4})").unwrap());

static DAY_MONTH: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d{1,2})[/-](\d{1,2})\b").unwrap());

static DATE_LIKE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{1,2}[/-]\d{1,2}").unwrap());

static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

const MONTH_NAMES: [(u32, &str, &str); 12] = [
    (1, "january", "jan"),
    (2, "february", "feb"),
    (3, "march", "mar"),
    (4, "april", "apr"),
    (5, "may", "may"),
    (6, "june", "jun"),
    (7, "july", "jul"),
    (8, "august", "aug"),
    (9, "september", "sep"),
    (10, "october", "oct"),
    (11, "november", "nov"),
    (12, "december", "dec"),
];

struct MonthPatterns {
    month: u32,
    month_day: Regex,
    day_month: Regex,
}

// "sep 20" / "20 september", month names only on word boundaries
static MONTH_PATTERNS: Lazy<Vec<MonthPatterns>> = Lazy::new(|| {
    MONTH_NAMES
        .iter()
        .map(|(month, full, short)| {
            let names = format!("(?:{full}|{short})");
            MonthPatterns {
                month: *month,
                month_day: Regex::new(&format!(r"\b{names}\s+(\d{{1,2}})(?:st|nd|rd|th)?\b"))
                    .unwrap(),
                day_month: Regex::new(&format!(r"\b(\d{{1,2}})(?:st|nd|rd|th)?\s+{names}\b"))
                    .unwrap(),
            }
        })
        .collect()
});

fn capture<T: FromStr>(caps: &Captures, index: usize) -> Result<T, DateParseError> {
    caps.get(index)
        .and_then(|m| m.as_str().parse().ok())
        .ok_or(DateParseError::NoMatch)
}

fn calendar_date(year: i32, month: u32, day: u32) -> Result<NaiveDate, DateParseError> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or(DateParseError::InvalidCalendarDate { day, month, year })
}

// The first pattern that matches decides; an impossible date there is an error
pub fn try_parse_date(text: &str, default_year: i32) -> Result<NaiveDate, DateParseError> {
    let text = text.trim().to_lowercase();

    if let Some(caps) = DAY_MONTH_YEAR.captures(&text) {
        return calendar_date(capture(&caps, 3)?, capture(&caps, 2)?, capture(&caps, 1)?);
    }

    if let Some(caps) = DAY_MONTH.captures(&text) {
        return calendar_date(default_year, capture(&caps, 2)?, capture(&caps, 1)?);
    }

    for patterns in MONTH_PATTERNS.iter() {
        let caps = patterns
            .month_day
            .captures(&text)
            .or_else(|| patterns.day_month.captures(&text));
        if let Some(caps) = caps {
            return calendar_date(default_year, patterns.month, capture(&caps, 1)?);
        }
    }

    Err(DateParseError::NoMatch)
}

pub fn parse_date(text: &str, default_year: i32) -> Option<NaiveDate> {
    match try_parse_date(text, default_year) {
        Ok(date) => {
            tracing::debug!(input = text, %date, "parsed date");
            Some(date)
        }
        Err(e) => {
            tracing::debug!(input = text, error = %e, "could not parse date");
            None
        }
    }
}

pub fn looks_like_date(text: &str) -> bool {
    DATE_LIKE.is_match(text)
}

// First digit run, kept as typed: no range check, leading zeros preserved
pub fn extract_guest_count(text: &str) -> Option<&str> {
    DIGITS.find(text).map(|m| m.as_str())
}

// ── Room selection ──

// Precedence order: full names, tier words, synonyms, menu numbers
pub const ROOM_ALIASES: &[(&str, RoomType)] = &[
    ("standard room", RoomType::Standard),
    ("deluxe room", RoomType::Deluxe),
    ("family room", RoomType::Family),
    ("standard", RoomType::Standard),
    ("deluxe", RoomType::Deluxe),
    ("family", RoomType::Family),
    ("suite", RoomType::Suite),
    ("basic", RoomType::Standard),
    ("luxury", RoomType::Deluxe),
    ("large", RoomType::Family),
    ("presidential", RoomType::Suite),
    ("premium", RoomType::Suite),
    ("1", RoomType::Standard),
    ("2", RoomType::Deluxe),
    ("3", RoomType::Family),
    ("4", RoomType::Suite),
];

fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

fn contains_phrase(tokens: &[String], phrase: &str) -> bool {
    let words: Vec<&str> = phrase.split_whitespace().collect();
    !words.is_empty()
        && tokens
            .windows(words.len())
            .any(|window| window.iter().zip(&words).all(|(token, word)| token.as_str() == *word))
}

pub fn match_room(text: &str) -> Option<RoomType> {
    let tokens = tokenize(text);
    let matched = ROOM_ALIASES
        .iter()
        .find(|(alias, _)| contains_phrase(&tokens, alias))
        .map(|(_, room)| *room);

    match matched {
        Some(room) => tracing::debug!(input = text, room = room.as_str(), "matched room"),
        None => tracing::debug!(input = text, "no room alias matched"),
    }
    matched
}
