use crate::application::ports::{time::Clock, util::SlugGenerator};
use crate::domain::slug::SUFFIX_LEN;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Default, Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// `slug` crate transliteration plus v4-UUID entropy for collision suffixes.
#[derive(Default, Clone)]
pub struct DefaultSlugGenerator;

impl SlugGenerator for DefaultSlugGenerator {
    fn slugify(&self, input: &str) -> String {
        slug::slugify(input)
    }

    fn random_suffix(&self) -> String {
        let mut suffix = Uuid::new_v4().simple().to_string();
        suffix.truncate(SUFFIX_LEN);
        suffix
    }
}
