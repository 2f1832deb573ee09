//! Wire schema of the `getStopInfo` endpoint.
//!
//! Only the fields the projector reads (plus a few identifiers useful in logs)
//! are modelled. Every field is optional so that a missing key stays
//! distinguishable from an empty or zero value.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Reads `null` the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Top-level success envelope. `data` is only present when the request was
/// accepted with a valid csrf token.
#[derive(Debug, Default, Deserialize)]
pub struct StopInfoResponse {
    pub data: Option<StopData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopData {
    pub id: Option<String>,
    pub name: Option<String>,
    pub current_time: Option<i64>,
    pub tz_offset: Option<i64>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub transports: Vec<Transport>,
}

/// A route serving the stop.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transport {
    pub line_id: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub threads: Vec<Thread>,
}

/// One run/direction of a route.
#[derive(Debug, Default, Deserialize)]
pub struct Thread {
    #[serde(rename = "threadId")]
    pub thread_id: Option<String>,
    #[serde(rename = "noBoarding", default, deserialize_with = "null_as_default")]
    pub no_boarding: bool,
    #[serde(rename = "BriefSchedule")]
    pub brief_schedule: Option<BriefSchedule>,
}

impl Thread {
    /// Events of the brief schedule, empty when the schedule is absent.
    pub fn events(&self) -> &[Event] {
        self.brief_schedule
            .as_ref()
            .map(|s| s.events.as_slice())
            .unwrap_or_default()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct BriefSchedule {
    #[serde(rename = "Events", default, deserialize_with = "null_as_default")]
    pub events: Vec<Event>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Event {
    #[serde(rename = "Scheduled")]
    pub scheduled: Option<ScheduleTime>,
    #[serde(rename = "Estimated")]
    pub estimated: Option<ScheduleTime>,
    #[serde(rename = "vehicleId")]
    pub vehicle_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleTime {
    /// Unix seconds encoded as a string.
    pub value: Option<String>,
    pub tz_offset: Option<i64>,
    pub text: Option<String>,
}

impl ScheduleTime {
    /// Parses `value` as Unix epoch seconds. Absent, empty and malformed
    /// values all mean "unknown".
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        let secs = self.value.as_deref()?.parse::<i64>().ok()?;
        DateTime::from_timestamp(secs, 0)
    }
}

/// Body returned instead of stop data when the csrf token is missing or stale.
#[derive(Debug, Default, Deserialize)]
pub struct TokenCarrier {
    #[serde(rename = "csrfToken")]
    pub csrf_token: Option<String>,
}

impl TokenCarrier {
    /// The carried token, if it is non-empty.
    pub fn token(&self) -> Option<&str> {
        self.csrf_token.as_deref().filter(|t| !t.is_empty())
    }
}
