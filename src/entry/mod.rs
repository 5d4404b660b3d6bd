//! Journal entry model as returned by the persistence service.
//!
//! Entries are read-only once fetched. Every field other than `id` may be
//! missing from a response; missing fields are "not provided", never errors.
//! Fields that are present but unparsable (a date of `"yesterday-ish"`, a time
//! of `"25:99"`) are kept as [`Lenient::Invalid`] so the rest of the month
//! still renders.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Opaque entry identifier. The service may use numeric or string keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryId {
    Number(i64),
    Text(String),
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryId::Number(n) => write!(f, "{}", n),
            EntryId::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for EntryId {
    fn from(s: &str) -> Self {
        match s.parse::<i64>() {
            Ok(n) => EntryId::Number(n),
            Err(_) => EntryId::Text(s.to_string()),
        }
    }
}

/// The mood tag attached to an entry.
///
/// The known vocabulary gets its own variants; anything else is kept verbatim
/// in [`Feeling::Other`]. Parsing is case-sensitive, so `"Happy"` is
/// `Other("Happy")` and will not match a `"happy"` mood filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Feeling {
    Sad,
    Neutral,
    Happy,
    Excited,
    Excellent,
    Anxious,
    Angry,
    Grateful,
    Tired,
    Peaceful,
    Other(String),
}

impl Feeling {
    /// Every feeling in the fixed vocabulary, in picker order.
    pub const KNOWN: [Feeling; 10] = [
        Feeling::Sad,
        Feeling::Neutral,
        Feeling::Happy,
        Feeling::Excited,
        Feeling::Excellent,
        Feeling::Anxious,
        Feeling::Angry,
        Feeling::Grateful,
        Feeling::Tired,
        Feeling::Peaceful,
    ];

    /// Feelings offered by the new-entry mood picker, indexed 0 to 4.
    pub const PICKER: [Feeling; 5] = [
        Feeling::Sad,
        Feeling::Neutral,
        Feeling::Happy,
        Feeling::Excited,
        Feeling::Excellent,
    ];

    /// The stored string value.
    pub fn as_str(&self) -> &str {
        match self {
            Feeling::Sad => "sad",
            Feeling::Neutral => "neutral",
            Feeling::Happy => "happy",
            Feeling::Excited => "excited",
            Feeling::Excellent => "excellent",
            Feeling::Anxious => "anxious",
            Feeling::Angry => "angry",
            Feeling::Grateful => "grateful",
            Feeling::Tired => "tired",
            Feeling::Peaceful => "peaceful",
            Feeling::Other(s) => s,
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Feeling::Sad => "😢",
            Feeling::Neutral => "😐",
            Feeling::Happy => "😊",
            Feeling::Excited => "😃",
            Feeling::Excellent => "🤩",
            Feeling::Anxious => "😰",
            Feeling::Angry => "😠",
            Feeling::Grateful => "🙏",
            Feeling::Tired => "😴",
            Feeling::Peaceful => "😌",
            Feeling::Other(_) => crate::constants::FALLBACK_FEELING_EMOJI,
        }
    }

    /// Maps a mood picker position to its feeling.
    pub fn from_picker_index(index: usize) -> Option<Feeling> {
        Self::PICKER.get(index).cloned()
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Feeling::Other(_))
    }
}

impl Default for Feeling {
    /// A missing feeling is an empty free-text tag.
    fn default() -> Self {
        Feeling::Other(String::new())
    }
}

impl From<&str> for Feeling {
    fn from(s: &str) -> Self {
        Feeling::KNOWN
            .iter()
            .find(|known| known.as_str() == s)
            .cloned()
            .unwrap_or_else(|| Feeling::Other(s.to_string()))
    }
}

impl From<String> for Feeling {
    fn from(s: String) -> Self {
        Feeling::from(s.as_str())
    }
}

impl fmt::Display for Feeling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Feeling {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Feeling {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<Value>::deserialize(deserializer)?;
        Ok(raw.and_then(scalar_text).map(Feeling::from).unwrap_or_default())
    }
}

/// Types that can be recovered from a loosely formatted string.
pub trait LenientParse: Sized {
    fn parse_lenient(raw: &str) -> Option<Self>;
}

impl LenientParse for NaiveDate {
    fn parse_lenient(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        NaiveDate::parse_from_str(raw, crate::constants::DATE_FORMAT_ISO)
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
    }
}

impl LenientParse for NaiveTime {
    fn parse_lenient(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        ["%H:%M:%S%.f", "%H:%M:%S", "%H:%M"]
            .iter()
            .find_map(|fmt| NaiveTime::parse_from_str(raw, fmt).ok())
    }
}

impl LenientParse for DateTime<FixedOffset> {
    fn parse_lenient(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        DateTime::parse_from_rfc3339(raw).ok().or_else(|| {
            // Timestamps without an offset are taken as UTC.
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
                .ok()
                .map(|naive| naive.and_utc().fixed_offset())
        })
    }
}

/// A field that is either a parsed value or the raw text that failed to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lenient<T> {
    Valid(T),
    Invalid(String),
}

impl<T> Lenient<T> {
    pub fn valid(&self) -> Option<&T> {
        match self {
            Lenient::Valid(value) => Some(value),
            Lenient::Invalid(_) => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Lenient::Valid(_))
    }
}

impl<T: LenientParse> Lenient<T> {
    pub fn parse(raw: &str) -> Self {
        T::parse_lenient(raw)
            .map(Lenient::Valid)
            .unwrap_or_else(|| Lenient::Invalid(raw.to_string()))
    }
}

impl<'de, T: LenientParse> Deserialize<'de> for Lenient<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::String(s) => Lenient::parse(&s),
            other => Lenient::Invalid(other.to_string()),
        })
    }
}

/// Insights produced for an entry: a list of points or a single paragraph.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Insights {
    List(Vec<String>),
    Text(String),
    /// Any other JSON shape, rendered as pretty-printed JSON.
    Other(Value),
}

/// One journal entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JournalEntry {
    pub id: EntryId,
    #[serde(default = "missing_date")]
    pub date: Lenient<NaiveDate>,
    #[serde(default, deserialize_with = "optional_lenient")]
    pub time: Option<Lenient<NaiveTime>>,
    #[serde(default)]
    pub feeling: Feeling,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub text: String,
    #[serde(default, deserialize_with = "optional_non_empty")]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "optional_number")]
    pub confidence_score: Option<f64>,
    #[serde(default, deserialize_with = "emotion_map")]
    pub emotions: Option<BTreeMap<String, f64>>,
    #[serde(default, deserialize_with = "optional_insights")]
    pub insights: Option<Insights>,
    #[serde(default, deserialize_with = "optional_lenient")]
    pub created_at: Option<Lenient<DateTime<FixedOffset>>>,
}

impl JournalEntry {
    /// Whether this entry was authored on `date`. Entries with an invalid
    /// date never match.
    pub fn is_on(&self, date: NaiveDate) -> bool {
        self.date.valid() == Some(&date)
    }

    /// Confidence used for ranking; a missing score ranks as 0.
    pub fn rank_score(&self) -> f64 {
        self.confidence_score.unwrap_or(0.0)
    }

    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

fn missing_date() -> Lenient<NaiveDate> {
    Lenient::Invalid(String::new())
}

fn optional_lenient<'de, D, T>(deserializer: D) -> Result<Option<Lenient<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: LenientParse,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.trim().is_empty() => None,
        Some(Value::String(s)) => Some(Lenient::parse(&s)),
        Some(other) => Some(Lenient::Invalid(other.to_string())),
    })
}

/// Text of a scalar field. Non-string values are kept in their JSON form.
fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

/// A number, or a string holding one.
fn lenient_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn string_or_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(scalar_text).unwrap_or_default())
}

fn optional_non_empty<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(scalar_text).filter(|s| !s.trim().is_empty()))
}

fn optional_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(lenient_number))
}

/// Keeps the numeric intensities of an emotions object and drops the rest.
fn emotion_map<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<BTreeMap<String, f64>>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    let Some(Value::Object(map)) = value else {
        return Ok(None);
    };
    let emotions: BTreeMap<String, f64> = map
        .into_iter()
        .filter_map(|(name, intensity)| Some((name, lenient_number(&intensity)?)))
        .collect();
    Ok(Some(emotions).filter(|m| !m.is_empty()))
}

fn optional_insights<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Insights>, D::Error> {
    let value = Option::<Insights>::deserialize(deserializer)?;
    Ok(value.filter(|insights| match insights {
        Insights::List(items) => !items.is_empty(),
        Insights::Text(s) => !s.trim().is_empty(),
        Insights::Other(v) => !v.is_null(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_row() -> Value {
        json!({
            "id": 12,
            "date": "2025-09-03",
            "time": "14:05:00",
            "feeling": "happy",
            "text": "Finished the work project",
            "summary": "A productive day",
            "confidence_score": 87,
            "emotions": {"joy": 0.8, "relief": "0.5", "noise": [1]},
            "insights": ["Rest more", "Keep going"],
            "created_at": "2025-09-03T14:05:11.123456+00:00"
        })
    }

    #[test]
    fn test_deserialize_full_row() {
        let entry: JournalEntry = serde_json::from_value(full_row()).unwrap();
        assert_eq!(entry.id, EntryId::Number(12));
        assert_eq!(
            entry.date,
            Lenient::Valid(NaiveDate::from_ymd_opt(2025, 9, 3).unwrap())
        );
        assert_eq!(
            entry.time,
            Some(Lenient::Valid(NaiveTime::from_hms_opt(14, 5, 0).unwrap()))
        );
        assert_eq!(entry.feeling, Feeling::Happy);
        assert_eq!(entry.confidence_score, Some(87.0));
        let emotions = entry.emotions.unwrap();
        assert_eq!(emotions.len(), 2);
        assert_eq!(emotions["relief"], 0.5);
        assert_eq!(
            entry.insights,
            Some(Insights::List(vec![
                "Rest more".to_string(),
                "Keep going".to_string()
            ]))
        );
        assert!(entry.created_at.unwrap().is_valid());
    }

    #[test]
    fn test_missing_optional_fields_are_not_provided() {
        let entry: JournalEntry =
            serde_json::from_value(json!({"id": "abc", "date": "2025-09-03"})).unwrap();
        assert_eq!(entry.id, EntryId::Text("abc".to_string()));
        assert!(entry.time.is_none());
        assert!(entry.summary.is_none());
        assert!(entry.confidence_score.is_none());
        assert!(entry.emotions.is_none());
        assert!(entry.insights.is_none());
        assert!(entry.created_at.is_none());
        assert_eq!(entry.text, "");
    }

    #[test]
    fn test_null_fields_are_not_provided() {
        let entry: JournalEntry = serde_json::from_value(json!({
            "id": 1,
            "date": "2025-09-03",
            "time": null,
            "summary": null,
            "emotions": null,
            "insights": null,
            "text": null
        }))
        .unwrap();
        assert!(entry.time.is_none());
        assert!(entry.summary.is_none());
        assert!(entry.emotions.is_none());
        assert!(entry.insights.is_none());
        assert_eq!(entry.feeling, Feeling::Other(String::new()));
    }

    #[test]
    fn test_missing_date_is_invalid_not_an_error() {
        let entry: JournalEntry = serde_json::from_value(json!({"id": 3})).unwrap();
        assert!(!entry.date.is_valid());
    }

    #[test]
    fn test_malformed_date_and_time_are_kept_as_invalid() {
        let entry: JournalEntry = serde_json::from_value(json!({
            "id": 1,
            "date": "not a date",
            "time": "25:99"
        }))
        .unwrap();
        assert_eq!(entry.date, Lenient::Invalid("not a date".to_string()));
        assert_eq!(entry.time, Some(Lenient::Invalid("25:99".to_string())));
        assert!(!entry.is_on(NaiveDate::from_ymd_opt(2025, 9, 3).unwrap()));
    }

    #[test]
    fn test_mistyped_scalars_degrade_instead_of_failing() {
        let entries: Vec<JournalEntry> = serde_json::from_value(json!([
            {"id": 1, "date": "2025-09-03", "confidence_score": 80},
            {"id": 2, "date": "2025-09-03", "confidence_score": "85"},
            {"id": 3, "date": "2025-09-03", "confidence_score": "high", "text": 42,
             "summary": true, "feeling": 7}
        ]))
        .unwrap();
        assert_eq!(entries[0].confidence_score, Some(80.0));
        assert_eq!(entries[1].confidence_score, Some(85.0));
        assert_eq!(entries[2].confidence_score, None);
        assert_eq!(entries[2].text, "42");
        assert_eq!(entries[2].summary.as_deref(), Some("true"));
        assert_eq!(entries[2].feeling, Feeling::Other("7".to_string()));
    }

    #[test]
    fn test_feeling_parsing_is_case_sensitive() {
        assert_eq!(Feeling::from("happy"), Feeling::Happy);
        assert_eq!(Feeling::from("Happy"), Feeling::Other("Happy".to_string()));
        assert_eq!(Feeling::from("Happy").as_str(), "Happy");
        assert_eq!(Feeling::from("melancholy").emoji(), "📝");
    }

    #[test]
    fn test_picker_index() {
        assert_eq!(Feeling::from_picker_index(0), Some(Feeling::Sad));
        assert_eq!(Feeling::from_picker_index(4), Some(Feeling::Excellent));
        assert_eq!(Feeling::from_picker_index(5), None);
    }

    #[test]
    fn test_single_string_insights() {
        let entry: JournalEntry = serde_json::from_value(json!({
            "id": 1,
            "date": "2025-09-03",
            "insights": "Sleep earlier"
        }))
        .unwrap();
        assert_eq!(
            entry.insights,
            Some(Insights::Text("Sleep earlier".to_string()))
        );
    }

    #[test]
    fn test_entry_id_from_str() {
        assert_eq!(EntryId::from("42"), EntryId::Number(42));
        assert_eq!(
            EntryId::from("7f3c-uuid"),
            EntryId::Text("7f3c-uuid".to_string())
        );
        assert_eq!(EntryId::Number(42).to_string(), "42");
    }

    #[test]
    fn test_counts() {
        let entry: JournalEntry = serde_json::from_value(json!({
            "id": 1,
            "date": "2025-09-03",
            "text": "three  small words"
        }))
        .unwrap();
        assert_eq!(entry.word_count(), 3);
        assert_eq!(entry.char_count(), 18);
        assert_eq!(entry.rank_score(), 0.0);
    }
}
