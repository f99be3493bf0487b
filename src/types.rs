//! Content records shared by the API client, the page loaders and the renderers.
//!
//! These types are deserialized from the content API and rendered as-is.
//! They carry no behavior beyond a few read-only helpers; all mutable state
//! lives in page instances ([`crate::loader`]) and the contact flow
//! ([`crate::contact`]).

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Record identifier as issued by the content API.
pub type Id = u64;

/// The church's singleton profile.
///
/// The API returns a list; pages only ever render its first element
/// (see [`crate::loader::fetch_first`]).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChurchInfo {
    #[serde(default)]
    pub mission_statement: String,
    /// Free text; newlines separate paragraphs.
    #[serde(default)]
    pub about_text: String,
    /// Postal address; newlines separate lines.
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub bio: String,
    /// Portrait URL. A placeholder glyph is rendered when absent.
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// A recurring worship service or ministry meeting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Time of day; `None` for services without a fixed time ("Monthly").
    #[serde(default, with = "time_of_day")]
    pub time: Option<NaiveTime>,
    #[serde(default)]
    pub day_of_week: String,
    #[serde(default)]
    pub location: String,
    /// Display glyph, usually a single emoji.
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: Id,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// RFC 3339, or a timestamp without offset taken as UTC.
    #[serde(with = "timestamp")]
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub registration_required: Option<bool>,
}

impl Event {
    /// Whether the event shows a registration affordance.
    pub fn needs_registration(&self) -> bool {
        self.registration_required == Some(true)
    }
}

/// Contact form payload, posted by visitors and forwarded to the API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

impl ContactForm {
    /// First required field that is blank, in form order.
    pub fn missing_field(&self) -> Option<&'static str> {
        [
            ("name", &self.name),
            ("email", &self.email),
            ("subject", &self.subject),
            ("message", &self.message),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
            && self.email.is_empty()
            && self.subject.is_empty()
            && self.message.is_empty()
    }
}

/// Events split on [`Event::is_featured`].
#[derive(Debug)]
pub struct EventPartition<'a> {
    pub featured: Vec<&'a Event>,
    pub other: Vec<&'a Event>,
}

/// Split events into featured and non-featured, preserving order in both.
pub fn partition_events(events: &[Event]) -> EventPartition<'_> {
    let (featured, other) = events.iter().partition(|event| event.is_featured);
    EventPartition { featured, other }
}

/// The routed pages of the site, in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Home,
    About,
    Services,
    Events,
    Contact,
}

impl Page {
    pub const ALL: [Page; 5] = [
        Page::Home,
        Page::About,
        Page::Services,
        Page::Events,
        Page::Contact,
    ];

    /// Route path, also used for links.
    pub fn path(self) -> &'static str {
        match self {
            Page::Home => "/",
            Page::About => "/about",
            Page::Services => "/services",
            Page::Events => "/events",
            Page::Contact => "/contact",
        }
    }

    /// Nav label.
    pub fn label(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::About => "About",
            Page::Services => "Services",
            Page::Events => "Events",
            Page::Contact => "Contact",
        }
    }

    /// Output file for static rendering, relative to the output directory.
    pub fn output_file(self) -> &'static str {
        match self {
            Page::Home => "index.html",
            Page::About => "about/index.html",
            Page::Services => "services/index.html",
            Page::Events => "events/index.html",
            Page::Contact => "contact/index.html",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Serde adapter for optional `HH:MM` / `HH:MM:SS` times.
///
/// Blank strings and `null` both decode to `None`.
mod time_of_day {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(time: &Option<NaiveTime>, s: S) -> Result<S::Ok, S::Error> {
        match time {
            Some(t) => s.serialize_str(&t.format("%H:%M:%S").to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveTime>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
            return Ok(None);
        };
        let raw = raw.trim();
        NaiveTime::parse_from_str(raw, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
            .map(Some)
            .map_err(|e| de::Error::custom(format!("invalid time of day {raw:?}: {e}")))
    }
}

/// Serde adapter for event timestamps.
///
/// Accepts RFC 3339 (`2025-09-01T12:00:00Z`, `...+02:00`) and naive
/// `YYYY-MM-DDTHH:MM[:SS[.fff]]` timestamps, which are read as UTC.
/// Always writes RFC 3339.
mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de};

    const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

    pub fn serialize<S: Serializer>(date: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&date.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        let raw = raw.trim();
        if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
            return Ok(date.with_timezone(&Utc));
        }
        NAIVE_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
            .map(|naive| naive.and_utc())
            .ok_or_else(|| de::Error::custom(format!("invalid timestamp {raw:?}")))
    }
}
