use std::fmt;

use serde::de::{self, Deserialize, Deserializer, SeqAccess, Visitor};

/// Configured pattern selection for one replica key, before collapse.
///
/// Mirrors the two shapes a config file may supply: an explicit ordered glob
/// list, or the `"everything"` sentinel. What the sentinel collapses to
/// depends on the role: as an exclude it becomes the single glob `*`, as an
/// include it becomes no filter at all (absence of includes means include
/// everything).
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Patterns {
    /// The `"everything"` sentinel.
    Everything,
    /// Explicit ordered glob list.
    List(Vec<String>),
}

impl Patterns {
    /// Collapses this selection in include position.
    #[must_use]
    pub fn into_includes(self) -> Vec<String> {
        match self {
            // No include filter means everything is included.
            Self::Everything => Vec::new(),
            Self::List(patterns) => patterns,
        }
    }

    /// Collapses this selection in exclude position.
    #[must_use]
    pub fn into_excludes(self) -> Vec<String> {
        match self {
            Self::Everything => vec!["*".to_string()],
            Self::List(patterns) => patterns,
        }
    }

    /// Iterates the explicit patterns, if any, for validation.
    pub(crate) fn explicit_patterns(&self) -> impl Iterator<Item = &str> {
        let patterns: &[String] = match self {
            Self::Everything => &[],
            Self::List(patterns) => patterns,
        };
        patterns.iter().map(String::as_str)
    }
}

impl<'de> Deserialize<'de> for Patterns {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PatternsVisitor;

        impl<'de> Visitor<'de> for PatternsVisitor {
            type Value = Patterns;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a list of glob patterns or the string \"everything\"")
            }

            fn visit_str<E>(self, value: &str) -> Result<Patterns, E>
            where
                E: de::Error,
            {
                if value == "everything" {
                    Ok(Patterns::Everything)
                } else {
                    Err(E::invalid_value(de::Unexpected::Str(value), &self))
                }
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Patterns, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut patterns = Vec::new();
                while let Some(pattern) = seq.next_element::<String>()? {
                    patterns.push(pattern);
                }
                Ok(Patterns::List(patterns))
            }
        }

        deserializer.deserialize_any(PatternsVisitor)
    }
}

/// Resolved include/exclude filters for one replica, after collapse.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct WorkingSet {
    includes: Vec<String>,
    excludes: Vec<String>,
}

impl WorkingSet {
    /// Creates a working set from collapsed pattern lists.
    #[must_use]
    pub const fn new(includes: Vec<String>, excludes: Vec<String>) -> Self {
        Self { includes, excludes }
    }

    /// Ordered include globs; empty means no include filter.
    #[must_use]
    pub fn includes(&self) -> &[String] {
        &self.includes
    }

    /// Ordered exclude globs.
    #[must_use]
    pub fn excludes(&self) -> &[String] {
        &self.excludes
    }

    /// Whether the set filters nothing at all.
    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        self.includes.is_empty() && self.excludes.is_empty()
    }
}
