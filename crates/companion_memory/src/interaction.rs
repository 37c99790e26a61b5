use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Structured context attached to an interaction.
///
/// Always carries `detected_topics` when built by the engine; callers may add
/// arbitrary fields.
pub type InteractionContext = Map<String, Value>;

/// One user/companion exchange. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    #[serde(deserialize_with = "deserialize_timestamp")]
    timestamp: DateTime<Utc>,
    user_input: String,
    ai_response: String,
    #[serde(default)]
    context: InteractionContext,
}

impl Interaction {
    /// Create an interaction stamped with the current time.
    pub fn new(user_input: &str, ai_response: &str, context: InteractionContext) -> Self {
        Self::at(Utc::now(), user_input, ai_response, context)
    }

    pub fn at(
        timestamp: DateTime<Utc>,
        user_input: &str,
        ai_response: &str,
        context: InteractionContext,
    ) -> Self {
        Self {
            timestamp,
            user_input: user_input.to_string(),
            ai_response: ai_response.to_string(),
            context,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn user_input(&self) -> &str {
        &self.user_input
    }

    pub fn ai_response(&self) -> &str {
        &self.ai_response
    }

    pub fn context(&self) -> &InteractionContext {
        &self.context
    }

    /// Lowercased `user_input` and `ai_response` joined by a space.
    ///
    /// Both importance classification and relevance scoring search this text.
    pub fn searchable_text(&self) -> String {
        format!("{} {}", self.user_input, self.ai_response).to_lowercase()
    }

    /// Topic labels recorded under `context.detected_topics`, if any.
    pub fn detected_topics(&self) -> Vec<&str> {
        self.context
            .get("detected_topics")
            .and_then(Value::as_array)
            .map(|topics| topics.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}

/// Parse an ISO-8601 timestamp.
///
/// RFC 3339 with an offset is preferred. Timestamps without an offset
/// (`2024-05-01T10:00:00.123456`) are read as local time.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    let naive = raw.parse::<NaiveDateTime>().ok()?;
    let utc = Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .unwrap_or_else(|| naive.and_utc());
    Some(utc)
}

pub(crate) fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp: {}", raw)))
}
