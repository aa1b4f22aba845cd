//! Domain DTOs and response envelopes for the Puppy Bowl API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently;
//! integration tests catch any drift between the two crates. Every response
//! wraps its payload in an envelope (`{success, error, data}`), which is
//! unwrapped by `PlayerClient` so callers only ever see players.

use std::borrow::Cow;
use std::convert::Infallible;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Opaque player identifier assigned by the server.
///
/// The API hands out integers, but nothing in the client depends on that, so
/// string keys are accepted too. Two ids are equal when their display forms
/// are equal: `Number(7)` equals `Text("7")` but not `Text("007")`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlayerId {
    Number(i64),
    Text(String),
}

impl PlayerId {
    /// The id as it appears in URLs and `data-player-id` attributes.
    pub fn key(&self) -> Cow<'_, str> {
        match self {
            PlayerId::Number(n) => Cow::Owned(n.to_string()),
            PlayerId::Text(s) => Cow::Borrowed(s),
        }
    }
}

impl PartialEq for PlayerId {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for PlayerId {}

impl Hash for PlayerId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerId::Number(n) => write!(f, "{n}"),
            PlayerId::Text(s) => f.write_str(s),
        }
    }
}

impl FromStr for PlayerId {
    type Err = Infallible;

    /// Takes a `data-player-id` attribute value verbatim. The text is never
    /// reinterpreted as a number, so `"007"` stays `"007"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(PlayerId::Text(s.to_string()))
    }
}

impl From<i64> for PlayerId {
    fn from(n: i64) -> Self {
        PlayerId::Number(n)
    }
}

/// A player on the roster, as returned by the API. Fields the client does
/// not display are ignored; missing display fields decode as empty so a
/// partial record still gets a card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub breed: String,
}

impl Player {
    /// Age as shown on cards and details.
    pub fn age_label(&self) -> String {
        match self.age {
            Some(age) => age.to_string(),
            None => "unknown".to_string(),
        }
    }
}

/// A not-yet-persisted player built from the form.
///
/// `age` is `None` when the age field did not start with an integer. It is
/// sent as `null` rather than corrected; the server decides what to do.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerDraft {
    pub name: String,
    pub age: Option<i64>,
    pub breed: String,
}

impl PlayerDraft {
    /// Build a draft from raw form input.
    pub fn from_fields(name: &str, age: &str, breed: &str) -> Self {
        Self {
            name: name.to_string(),
            age: parse_int_prefix(age),
            breed: breed.to_string(),
        }
    }
}

/// Leading-integer parse: skips leading whitespace, accepts one sign, then
/// reads digits until the first non-digit. `"3"`, `" 3 "` and `"3.9"` all
/// give `3`; `""` and `"abc"` give `None`. Digit runs too long for an `i64`
/// saturate instead of failing.
pub fn parse_int_prefix(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let value = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

/// Response wrapper shared by every endpoint.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default = "assume_success")]
    pub success: bool,
    #[serde(default)]
    pub error: Option<serde_json::Value>,
    pub data: Option<T>,
}

fn assume_success() -> bool {
    true
}

impl<T> Envelope<T> {
    /// Human-readable form of the `error` field, whichever shape it has.
    pub fn error_message(&self) -> String {
        match &self.error {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(serde_json::Value::Object(map)) => map
                .get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| serde_json::Value::Object(map.clone()).to_string()),
            Some(other) => other.to_string(),
            None => "unknown error".to_string(),
        }
    }
}

/// `data` of the list response. `players` stays untyped until a renderer
/// validates it.
#[derive(Debug, Deserialize)]
pub struct RosterData {
    #[serde(default)]
    pub players: serde_json::Value,
}

/// `data` of the single-player response.
#[derive(Debug, Deserialize)]
pub struct PlayerData {
    pub player: Player,
}

/// `data` of the create response.
#[derive(Debug, Deserialize)]
pub struct CreatedData {
    #[serde(rename = "newPlayer")]
    pub new_player: Player,
}

/// The roster exactly as the server sent it, not yet checked to be a list
/// of players.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterPayload(pub serde_json::Value);
