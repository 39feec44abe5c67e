// tests/support/mocks/util.rs
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

/// Real slugifier with a predictable suffix sequence: `00000001`,
/// `00000002`, ...
#[derive(Debug, Default)]
pub struct CountingSlug {
    counter: AtomicU32,
}

impl bazaar_core::application::ports::util::SlugGenerator for CountingSlug {
    fn slugify(&self, input: &str) -> String {
        slug::slugify(input)
    }

    fn random_suffix(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        format!("{n:08x}")
    }
}

/// Hands out the given suffixes in order, then repeats the last one.
#[derive(Debug)]
pub struct ScriptedSlug {
    suffixes: Mutex<Vec<String>>,
}

impl ScriptedSlug {
    pub fn new(suffixes: &[&str]) -> Self {
        let mut suffixes: Vec<String> = suffixes.iter().map(|s| (*s).to_string()).collect();
        suffixes.reverse();
        Self {
            suffixes: Mutex::new(suffixes),
        }
    }
}

impl bazaar_core::application::ports::util::SlugGenerator for ScriptedSlug {
    fn slugify(&self, input: &str) -> String {
        slug::slugify(input)
    }

    fn random_suffix(&self) -> String {
        let mut suffixes = self.suffixes.lock().unwrap();
        if suffixes.len() > 1 {
            suffixes.pop().unwrap()
        } else {
            suffixes.last().cloned().unwrap_or_else(|| "ffffffff".into())
        }
    }
}
