//! Collision-resistant test data generation
//!
//! Identifiers combine a semantic prefix, the current unix-millisecond
//! timestamp, and a bounded random disambiguator. Two identifiers collide
//! only when both components collide in the same process, which the design
//! treats as acceptably rare rather than impossible. All functions are pure
//! and callable concurrently from independent test executions.

use chrono::Utc;
use rand::Rng;

/// Unique name of the form `{prefix}-{millis}-{rand}`.
///
/// A tight generation loop fits inside one or two milliseconds, so the
/// timestamp alone cannot disambiguate; the random component is wide enough
/// that a thousand draws within one millisecond stay collision-free in
/// practice.
pub fn unique_name(prefix: &str) -> String {
    let ts = Utc::now().timestamp_millis();
    let rand: u32 = rand::thread_rng().gen_range(0..1_000_000_000);
    format!("{}-{}-{}", prefix, ts, rand)
}

/// Unique URL-safe slug under a fixed example host.
///
/// Derived from [`unique_name`], lowercased, with anything outside
/// `[a-z0-9-]` collapsed to hyphens.
pub fn unique_url(prefix: &str) -> String {
    let slug = slugify(&unique_name(prefix));
    format!("https://example.com/{}", slug)
}

/// Unique human-readable sentence carrying the prefix and disambiguator.
pub fn unique_sentence(prefix: &str) -> String {
    format!(
        "{} generated for automated verification at {}",
        unique_name(prefix),
        Utc::now().to_rfc3339()
    )
}

/// Random integer in the inclusive range `[min, max]`.
pub fn random_int(min: i64, max: i64) -> i64 {
    if min >= max {
        return min;
    }
    rand::thread_rng().gen_range(min..=max)
}

fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut last_was_hyphen = false;
    for ch in input.to_lowercase().chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch);
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }
    slug.trim_matches('-').to_string()
}
