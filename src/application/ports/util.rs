// src/application/ports/util.rs
pub trait SlugGenerator: Send + Sync {
    /// Turn a display name into a URL-safe base (may be empty).
    fn slugify(&self, input: &str) -> String;

    /// Fresh collision suffix of `domain::slug::SUFFIX_LEN` lowercase hex chars.
    fn random_suffix(&self) -> String;
}
