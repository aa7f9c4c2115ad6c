use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Identifier wrapper for candidate profiles.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProfileId(pub String);

/// Identifier wrapper for agency applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

/// Identifier wrapper for boards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardId(pub String);

/// Identifier wrapper for agencies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgencyId(pub String);

/// An agency-defined requirement set used to rank candidates. The
/// requirements and weights records attached to a board live behind the
/// storage trait and are loaded separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub id: BoardId,
    pub agency_id: AgencyId,
    pub name: String,
}

/// Read-only candidate record as the scoring engine sees it.
///
/// Profiles are owned and mutated elsewhere; every scalar attribute is
/// optional and the engine degrades gracefully when data is missing. List
/// attributes arrive from the legacy store as opaque serialized text, so
/// their deserialization is lenient: a JSON array, a delimited string, or
/// unusable input all decode, the last of these to an empty list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSnapshot {
    pub profile_id: ProfileId,
    /// Explicit age in whole years; wins over `birth_date` when present.
    pub age_years: Option<u8>,
    pub birth_date: Option<NaiveDate>,
    pub height_cm: Option<f64>,
    pub bust_cm: Option<f64>,
    pub waist_cm: Option<f64>,
    pub hips_cm: Option<f64>,
    pub gender: Option<String>,
    pub body_type: Option<String>,
    pub experience_level: Option<String>,
    pub ethnicity: Option<String>,
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub comfort_tags: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub specialties: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub languages: Vec<String>,
    pub primary_city: Option<String>,
    pub secondary_city: Option<String>,
    /// Follower-style reach magnitude, populated by an external pipeline.
    pub social_reach: Option<u64>,
}

impl ProfileSnapshot {
    /// Blank snapshot for the given profile id.
    pub fn new(profile_id: ProfileId) -> Self {
        Self {
            profile_id,
            age_years: None,
            birth_date: None,
            height_cm: None,
            bust_cm: None,
            waist_cm: None,
            hips_cm: None,
            gender: None,
            body_type: None,
            experience_level: None,
            ethnicity: None,
            comfort_tags: Vec::new(),
            skills: Vec::new(),
            specialties: Vec::new(),
            languages: Vec::new(),
            primary_city: None,
            secondary_city: None,
            social_reach: None,
        }
    }

    /// Age in whole years: the explicit field wins, otherwise derived from
    /// the birth date against the current UTC date.
    pub fn age(&self) -> Option<u8> {
        self.age_on(Utc::now().date_naive())
    }

    pub(crate) fn age_on(&self, today: NaiveDate) -> Option<u8> {
        if let Some(age) = self.age_years {
            return Some(age);
        }
        let birth = self.birth_date?;
        let mut years = today.year() - birth.year();
        if (today.month(), today.day()) < (birth.month(), birth.day()) {
            years -= 1;
        }
        u8::try_from(years.max(0)).ok()
    }
}

/// Decode a serialized list field from the legacy store.
///
/// Accepts a JSON string array or a comma/semicolon-delimited string.
/// Anything unusable decodes to an empty list so one candidate's bad data
/// never blocks the rest of a batch.
pub fn decode_list_field(raw: &str) -> Vec<String> {
    if let Ok(values) = serde_json::from_str::<Vec<serde_json::Value>>(raw) {
        return values
            .into_iter()
            .filter_map(|value| match value {
                serde_json::Value::String(s) => Some(s),
                other => other.as_i64().map(|n| n.to_string()),
            })
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
    }

    raw.split(|c| c == ',' || c == ';')
        .map(str::trim)
        .filter(|part| !part.is_empty() && !part.starts_with(['[', '{']))
        .map(str::to_string)
        .collect()
}

fn lenient_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Values(Vec<serde_json::Value>),
        Other(serde_json::Value),
    }

    Ok(match Raw::deserialize(deserializer) {
        Ok(Raw::Text(text)) => decode_list_field(&text),
        Ok(Raw::Values(values)) => values
            .into_iter()
            .filter_map(|value| match value {
                serde_json::Value::String(s) => {
                    let s = s.trim().to_string();
                    (!s.is_empty()).then_some(s)
                }
                _ => None,
            })
            .collect(),
        Ok(Raw::Other(_)) | Err(_) => Vec::new(),
    })
}
