//! URL slugs shared by every public catalog entity.
//!
//! A slug is lowercase kebab-case ASCII. [`SlugCandidates`] produces the
//! sequence of candidates tried when looking for a free slug: the bare base
//! first, then the base joined with a random hex suffix, re-truncated so the
//! whole candidate stays within the policy's length bound.

use crate::domain::errors::{DomainError, DomainResult};
use async_trait::async_trait;
use std::fmt;

/// Number of hex characters appended on collision.
pub const SUFFIX_LEN: usize = 8;
const SEPARATOR: char = '-';

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slug(String);

impl Slug {
    /// Validate a caller-supplied slug against `max_length`.
    pub fn parse(value: impl Into<String>, max_length: usize) -> DomainResult<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(DomainError::validation("slug cannot be empty"));
        }
        if value.len() > max_length {
            return Err(DomainError::Validation(format!(
                "slug must be at most {max_length} characters"
            )));
        }
        if !is_url_safe(&value) {
            return Err(DomainError::validation("slug must be lowercase kebab-case"));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Slug> for String {
    fn from(value: Slug) -> Self {
        value.0
    }
}

pub fn is_url_safe(value: &str) -> bool {
    !value.is_empty()
        && !value.starts_with(SEPARATOR)
        && !value.ends_with(SEPARATOR)
        && !value.contains("--")
        && value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == SEPARATOR)
}

/// Length bound for the slugs of one entity type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlugPolicy {
    max_length: usize,
}

impl SlugPolicy {
    /// Smallest bound that still fits a separator and a full suffix.
    pub const MIN_LENGTH: usize = SUFFIX_LEN + 1;

    pub const CATEGORY: Self = Self { max_length: 100 };
    pub const TAG: Self = Self { max_length: 50 };
    pub const PRODUCT: Self = Self { max_length: 200 };

    pub fn new(max_length: usize) -> DomainResult<Self> {
        if max_length < Self::MIN_LENGTH {
            return Err(DomainError::Validation(format!(
                "slug length bound must be at least {}",
                Self::MIN_LENGTH
            )));
        }
        Ok(Self { max_length })
    }

    pub const fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn parse(&self, value: impl Into<String>) -> DomainResult<Slug> {
        Slug::parse(value, self.max_length)
    }
}

/// Candidate sequence for one slug search.
#[derive(Debug, Clone)]
pub struct SlugCandidates {
    base: String,
    policy: SlugPolicy,
    bare_tried: bool,
}

impl SlugCandidates {
    /// `slugified` is the output of a slugify pass over the display name. It
    /// is re-normalised here so a sloppy slugifier cannot break URL safety.
    pub fn new(slugified: &str, policy: SlugPolicy) -> Self {
        let base = truncate(&normalize(slugified), policy.max_length);
        Self {
            base,
            policy,
            bare_tried: false,
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Produce the next candidate. The bare base is returned once (when it is
    /// non-empty); every later call asks `suffix` for fresh entropy.
    pub fn next_candidate<F>(&mut self, suffix: F) -> DomainResult<Slug>
    where
        F: FnOnce() -> String,
    {
        if !self.bare_tried {
            self.bare_tried = true;
            if !self.base.is_empty() {
                return Ok(Slug(self.base.clone()));
            }
        }

        let suffix = sanitize_suffix(&suffix());
        if suffix.is_empty() {
            return Err(DomainError::validation("slug suffix must contain hex digits"));
        }

        let room = self.policy.max_length.saturating_sub(suffix.len() + 1);
        let head = truncate(&self.base, room);
        let candidate = if head.is_empty() {
            suffix
        } else {
            format!("{head}{SEPARATOR}{suffix}")
        };

        self.policy.parse(candidate)
    }
}

/// Keep ASCII alphanumerics (lowercased) and collapse every other run into a
/// single separator.
fn normalize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_separator = false;
    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !out.is_empty() {
                out.push(SEPARATOR);
            }
            pending_separator = false;
            out.push(c.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }
    out
}

/// Cut an already-normalised ASCII slug to `max` bytes without leaving a
/// dangling separator.
fn truncate(slug: &str, max: usize) -> String {
    let cut = slug.get(..max.min(slug.len())).unwrap_or(slug);
    cut.trim_end_matches(SEPARATOR).to_string()
}

fn sanitize_suffix(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_hexdigit)
        .map(|c| c.to_ascii_lowercase())
        .take(SUFFIX_LEN)
        .collect()
}

/// Uniqueness index over the slugs of one entity type.
#[async_trait]
pub trait SlugRegistry: Send + Sync {
    /// `exclude` names a row id whose own slug does not count as taken.
    async fn slug_exists(&self, slug: &Slug, exclude: Option<i64>) -> DomainResult<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates(input: &str, max: usize) -> SlugCandidates {
        SlugCandidates::new(input, SlugPolicy::new(max).unwrap())
    }

    #[test]
    fn parse_rejects_non_kebab_case() {
        assert!(Slug::parse("Hello", 50).is_err());
        assert!(Slug::parse("-hello", 50).is_err());
        assert!(Slug::parse("hello-", 50).is_err());
        assert!(Slug::parse("hel--lo", 50).is_err());
        assert!(Slug::parse("", 50).is_err());
        assert!(Slug::parse("hello-world-2", 50).is_ok());
    }

    #[test]
    fn parse_enforces_length_bound() {
        assert!(Slug::parse("abcdefghij", 9).is_err());
        assert!(Slug::parse("abcdefghi", 9).is_ok());
    }

    #[test]
    fn policy_requires_room_for_suffix() {
        assert!(SlugPolicy::new(8).is_err());
        assert_eq!(SlugPolicy::new(9).unwrap().max_length(), 9);
    }

    #[test]
    fn first_candidate_is_bare_base() {
        let mut c = candidates("electronics", 100);
        let slug = c.next_candidate(|| unreachable!()).unwrap();
        assert_eq!(slug.as_str(), "electronics");
    }

    #[test]
    fn later_candidates_carry_suffix() {
        let mut c = candidates("electronics", 100);
        c.next_candidate(String::new).unwrap();
        let slug = c.next_candidate(|| "deadbeef".into()).unwrap();
        assert_eq!(slug.as_str(), "electronics-deadbeef");
    }

    #[test]
    fn base_is_truncated_to_fit_suffix() {
        let mut c = candidates("abcdefghijklmnop", 12);
        assert_eq!(c.next_candidate(String::new).unwrap().as_str(), "abcdefghijkl");
        let slug = c.next_candidate(|| "0123abcd".into()).unwrap();
        assert_eq!(slug.as_str(), "abc-0123abcd");
        assert!(slug.as_str().len() <= 12);
    }

    #[test]
    fn truncation_drops_dangling_separator() {
        let mut c = candidates("ab-cdefgh", 12);
        c.next_candidate(String::new).unwrap();
        // room for the head is 3 bytes: "ab-" must become "ab"
        let slug = c.next_candidate(|| "ffffffff".into()).unwrap();
        assert_eq!(slug.as_str(), "ab-ffffffff");
    }

    #[test]
    fn empty_base_uses_suffix_only() {
        let mut c = candidates("", 50);
        assert_eq!(c.base(), "");
        let slug = c.next_candidate(|| "a1b2c3d4".into()).unwrap();
        assert_eq!(slug.as_str(), "a1b2c3d4");
    }

    #[test]
    fn sloppy_slugifier_output_is_normalised() {
        let c = candidates("--Hello__World!!", 50);
        assert_eq!(c.base(), "hello-world");
    }

    #[test]
    fn suffix_without_hex_is_rejected() {
        let mut c = candidates("", 50);
        assert!(c.next_candidate(|| "zzzz".into()).is_err());
    }
}
