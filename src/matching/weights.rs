use serde::{Deserialize, Deserializer, Serialize};

/// Upper bound for every importance weight.
pub const MAX_WEIGHT: u8 = 5;

/// The nine scoring dimensions, in the order they aggregate.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    Age,
    Height,
    Measurements,
    BodyType,
    Comfort,
    Experience,
    Skills,
    Location,
    SocialReach,
}

impl Criterion {
    pub const ALL: [Criterion; 9] = [
        Criterion::Age,
        Criterion::Height,
        Criterion::Measurements,
        Criterion::BodyType,
        Criterion::Comfort,
        Criterion::Experience,
        Criterion::Skills,
        Criterion::Location,
        Criterion::SocialReach,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            Criterion::Age => "age",
            Criterion::Height => "height",
            Criterion::Measurements => "measurements",
            Criterion::BodyType => "body_type",
            Criterion::Comfort => "comfort",
            Criterion::Experience => "experience",
            Criterion::Skills => "skills",
            Criterion::Location => "location",
            Criterion::SocialReach => "social_reach",
        }
    }
}

/// Per-criterion importance weights for one board.
///
/// Weights are clamped to `[0, MAX_WEIGHT]` when written; a weight of zero
/// excludes the criterion from aggregation entirely rather than scoring it
/// and ignoring the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardWeights {
    #[serde(deserialize_with = "clamped_weight")]
    pub age: u8,
    #[serde(deserialize_with = "clamped_weight")]
    pub height: u8,
    #[serde(deserialize_with = "clamped_weight")]
    pub measurements: u8,
    #[serde(deserialize_with = "clamped_weight")]
    pub body_type: u8,
    #[serde(deserialize_with = "clamped_weight")]
    pub comfort: u8,
    #[serde(deserialize_with = "clamped_weight")]
    pub experience: u8,
    #[serde(deserialize_with = "clamped_weight")]
    pub skills: u8,
    #[serde(deserialize_with = "clamped_weight")]
    pub location: u8,
    #[serde(deserialize_with = "clamped_weight")]
    pub social_reach: u8,
}

impl BoardWeights {
    /// Every criterion at the same weight.
    pub const fn uniform(weight: u8) -> Self {
        let weight = if weight > MAX_WEIGHT { MAX_WEIGHT } else { weight };
        Self {
            age: weight,
            height: weight,
            measurements: weight,
            body_type: weight,
            comfort: weight,
            experience: weight,
            skills: weight,
            location: weight,
            social_reach: weight,
        }
    }

    /// Copy with every weight clamped to `[0, MAX_WEIGHT]`.
    pub fn clamped(self) -> Self {
        Self {
            age: self.age.min(MAX_WEIGHT),
            height: self.height.min(MAX_WEIGHT),
            measurements: self.measurements.min(MAX_WEIGHT),
            body_type: self.body_type.min(MAX_WEIGHT),
            comfort: self.comfort.min(MAX_WEIGHT),
            experience: self.experience.min(MAX_WEIGHT),
            skills: self.skills.min(MAX_WEIGHT),
            location: self.location.min(MAX_WEIGHT),
            social_reach: self.social_reach.min(MAX_WEIGHT),
        }
    }

    pub fn weight(&self, criterion: Criterion) -> u8 {
        match criterion {
            Criterion::Age => self.age,
            Criterion::Height => self.height,
            Criterion::Measurements => self.measurements,
            Criterion::BodyType => self.body_type,
            Criterion::Comfort => self.comfort,
            Criterion::Experience => self.experience,
            Criterion::Skills => self.skills,
            Criterion::Location => self.location,
            Criterion::SocialReach => self.social_reach,
        }
    }

    pub fn sum(&self) -> u32 {
        Criterion::ALL
            .iter()
            .map(|criterion| u32::from(self.weight(*criterion)))
            .sum()
    }
}

impl Default for BoardWeights {
    fn default() -> Self {
        Self::uniform(1)
    }
}

fn clamped_weight<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = i64::deserialize(deserializer)?;
    Ok(raw.clamp(0, i64::from(MAX_WEIGHT)) as u8)
}
