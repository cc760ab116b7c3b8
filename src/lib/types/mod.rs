//! Shared data types for language routing.
//! Implemented as newtypes to enforce invariants.

use std::fmt;

use color_eyre::{Section, eyre::eyre};
use url::Url;

use crate::config::{DEFAULT_LANGUAGE, INDEX_PAGE, PREFIXED_LANGUAGES};

/// A supported UI language. Only constructible from the fixed set of codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LanguageCode(&'static str);

impl LanguageCode {
    pub fn default_language() -> Self {
        Self(DEFAULT_LANGUAGE)
    }

    pub fn parse(raw: &str) -> Option<Self> {
        if raw == DEFAULT_LANGUAGE {
            return Some(Self::default_language());
        }
        Self::parse_prefixed(raw)
    }

    /// Accept only codes that appear as a leading path segment.
    pub fn parse_prefixed(raw: &str) -> Option<Self> {
        PREFIXED_LANGUAGES
            .iter()
            .copied()
            .find(|code| *code == raw)
            .map(Self)
    }

    pub fn is_default(&self) -> bool {
        self.0 == DEFAULT_LANGUAGE
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// Every supported code, default first.
    pub fn all() -> impl Iterator<Item = Self> {
        std::iter::once(Self::default_language())
            .chain(PREFIXED_LANGUAGES.iter().copied().map(Self))
    }
}

impl Default for LanguageCode {
    fn default() -> Self {
        Self::default_language()
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// File name of a page, e.g. `privacy-policy.html`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PageId(String);

impl PageId {
    pub fn index() -> Self {
        Self(INDEX_PAGE.to_string())
    }

    /// Empty names collapse to the index page.
    pub fn new(name: &str) -> Self {
        if name.is_empty() {
            Self::index()
        } else {
            Self(name.to_string())
        }
    }

    pub fn is_index(&self) -> bool {
        self.0 == INDEX_PAGE
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The current document location: path plus query string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Location {
    path: String,
    query: String,
}

impl Location {
    /// Parse an absolute URL or a root-relative path such as
    /// `/es/privacy-policy.html?ref=x`. The fragment is discarded.
    pub fn parse(raw: &str) -> color_eyre::Result<Self> {
        let base = Url::parse("http://localhost/").map_err(|e| eyre!(e))?;
        let url = base
            .join(raw)
            .map_err(|e| eyre!("Invalid location {raw:?}: {e}"))
            .with_note(|| "Expected an absolute URL or a path starting with '/'")?;

        let query = url
            .query()
            .filter(|q| !q.is_empty())
            .map(|q| format!("?{q}"))
            .unwrap_or_default();

        Ok(Self {
            path: url.path().to_string(),
            query,
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Either empty or starting with `?`.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Non-empty path segments in order.
    pub fn segments(&self) -> Vec<&str> {
        self.path.split('/').filter(|s| !s.is_empty()).collect()
    }
}

#[cfg(test)]
mod tests;
