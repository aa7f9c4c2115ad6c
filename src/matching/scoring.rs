//! The nine criterion scorers.
//!
//! Every scorer is a pure, total function over `(profile, requirements)`
//! returning 0-100. An unconfigured requirement always scores 100; missing
//! or unusable profile data degrades to 0 rather than erroring. The
//! aggregator only invokes a scorer when its weight is positive, but each
//! function is also part of the public surface and callable on its own.

use super::domain::ProfileSnapshot;
use super::requirements::BoardRequirements;

/// 100 when no age range is configured or the derived age is within every
/// configured bound; 0 when the age is missing or out of range.
///
/// When an age range is configured the hard filter has already eliminated
/// out-of-range candidates, so inside the aggregator the 0 branch only
/// fires for direct callers scoring without the gate.
pub fn score_age(profile: &ProfileSnapshot, requirements: &BoardRequirements) -> u8 {
    if !requirements.age.is_configured() {
        return 100;
    }
    match profile.age() {
        Some(age) if requirements.age.contains(f64::from(age)) => 100,
        _ => 0,
    }
}

/// 100 within the configured range, otherwise a linear penalty of 10 points
/// per centimeter outside the nearer bound, floored at 0.
///
/// The falloff region is unreachable through the aggregator whenever the
/// same range also acts as a hard filter; it is kept for callers that score
/// without the gate.
pub fn score_height(profile: &ProfileSnapshot, requirements: &BoardRequirements) -> u8 {
    if !requirements.height_cm.is_configured() {
        return 100;
    }
    let Some(height_cm) = profile.height_cm else {
        return 0;
    };
    let outside = requirements.height_cm.distance_outside(height_cm);
    if outside <= 0.0 {
        100
    } else {
        (100.0 - outside * 10.0).max(0.0).round() as u8
    }
}

/// Mean over the configured bust/waist/hips dimensions: 100 per dimension
/// in range, 0 per dimension missing or out; 100 when none is configured.
pub fn score_measurements(profile: &ProfileSnapshot, requirements: &BoardRequirements) -> u8 {
    let dimensions = [
        (requirements.bust_cm, profile.bust_cm),
        (requirements.waist_cm, profile.waist_cm),
        (requirements.hips_cm, profile.hips_cm),
    ];

    let mut configured = 0u32;
    let mut total = 0u32;
    for (range, value) in dimensions {
        if !range.is_configured() {
            continue;
        }
        configured += 1;
        if matches!(value, Some(v) if range.contains(v)) {
            total += 100;
        }
    }

    if configured == 0 {
        100
    } else {
        (f64::from(total) / f64::from(configured)).round() as u8
    }
}

/// Binary allow-list: 100 with no list or a listed body type, else 0.
pub fn score_body_type(profile: &ProfileSnapshot, requirements: &BoardRequirements) -> u8 {
    if requirements.body_types.is_empty() {
        return 100;
    }
    match &profile.body_type {
        Some(body_type) if requirements.body_types.contains(body_type) => 100,
        _ => 0,
    }
}

/// Fraction of required comfort tags present, as a rounded percentage.
pub fn score_comfort(profile: &ProfileSnapshot, requirements: &BoardRequirements) -> u8 {
    fractional_match(&requirements.comfort_tags, &profile.comfort_tags)
}

/// Binary allow-list over experience levels.
pub fn score_experience(profile: &ProfileSnapshot, requirements: &BoardRequirements) -> u8 {
    if requirements.experience_levels.is_empty() {
        return 100;
    }
    match &profile.experience_level {
        Some(level) if requirements.experience_levels.contains(level) => 100,
        _ => 0,
    }
}

/// Fraction of required skills present, as a rounded percentage.
pub fn score_skills(profile: &ProfileSnapshot, requirements: &BoardRequirements) -> u8 {
    fractional_match(&requirements.skills, &profile.skills)
}

/// 100 when any required location is a case-insensitive substring of the
/// primary or secondary city, or when no location is required; else 0.
pub fn score_location(profile: &ProfileSnapshot, requirements: &BoardRequirements) -> u8 {
    if requirements.locations.is_empty() {
        return 100;
    }

    let cities = [
        profile.primary_city.as_deref(),
        profile.secondary_city.as_deref(),
    ];
    let matched = requirements.locations.iter().any(|wanted| {
        let wanted = wanted.to_lowercase();
        cities
            .iter()
            .flatten()
            .any(|city| city.to_lowercase().contains(&wanted))
    });

    if matched {
        100
    } else {
        0
    }
}

/// 100 at or above the configured threshold (or with no threshold), a
/// linear ramp `round(value / threshold * 100)` below it, and 0 for an
/// absent or zero reach value.
pub fn score_social_reach(profile: &ProfileSnapshot, requirements: &BoardRequirements) -> u8 {
    let Some(threshold) = requirements.min_social_reach else {
        return 100;
    };
    let value = profile.social_reach.unwrap_or(0);
    if value == 0 {
        return 0;
    }
    if value >= threshold {
        return 100;
    }
    ((value as f64 / threshold as f64) * 100.0).round() as u8
}

fn fractional_match(required: &[String], present: &[String]) -> u8 {
    if required.is_empty() {
        return 100;
    }
    if present.is_empty() {
        return 0;
    }
    let hits = required.iter().filter(|item| present.contains(item)).count();
    ((hits as f64 / required.len() as f64) * 100.0).round() as u8
}
