//! Paths that never make it into a change set.

/// Build output and lockfiles: large, generated, and noise for a reviewer.
pub const DEFAULT_EXCLUDES: &[&str] = &[
    "dist",
    "bun.lock",
    "bun.lockb",
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "Cargo.lock",
];

/// Exclusion list applied by the change collector.
///
/// A single-segment entry (`dist`, `yarn.lock`) matches any path that has it as one of its
/// components. An entry containing `/` matches that exact path or anything beneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionPolicy {
    entries: Vec<String>,
}

impl ExclusionPolicy {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut policy = Self {
            entries: Vec::new(),
        };
        policy.extend(entries);
        policy
    }

    /// A policy that keeps every file.
    pub fn none() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add entries, ignoring blanks and duplicates.
    pub fn extend<I, S>(&mut self, entries: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for entry in entries {
            let entry = entry.as_ref().trim().trim_matches('/');
            if !entry.is_empty() && !self.entries.iter().any(|e| e == entry) {
                self.entries.push(entry.to_string());
            }
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn is_excluded(&self, path: &str) -> bool {
        let path = path.trim_start_matches("./");
        self.entries.iter().any(|entry| {
            if entry.contains('/') {
                path == entry
                    || path
                        .strip_prefix(entry.as_str())
                        .is_some_and(|rest| rest.starts_with('/'))
            } else {
                path.split('/').any(|component| component == entry)
            }
        })
    }
}

impl Default for ExclusionPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUDES)
    }
}
