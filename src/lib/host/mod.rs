//! The page environment the components run against: where the visitor is,
//! the client-side key/value storage, the document holding the mount points,
//! and the navigation that ends a page load.
//!
//! Everything is behind small traits so the routing and rendering logic runs
//! against in-memory doubles in tests and against files from the binary.

use std::{
    collections::{BTreeMap, HashMap},
    fs, io,
    path::PathBuf,
};

use color_eyre::{Section, eyre::eyre};
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::types::Location;

/// Client-side key/value storage. Either call may fail, e.g. when storage is
/// disabled or full.
pub trait Storage {
    fn get(&self, key: &str) -> color_eyre::Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> color_eyre::Result<()>;
}

/// A document with identifiable mount points whose contents can be swapped.
pub trait Document {
    fn has_mount_point(&self, id: &str) -> bool;
    /// Replace everything inside the element with the given id. Returns
    /// `false` when no such element exists.
    fn replace_mount_point(&mut self, id: &str, markup: &str) -> bool;
}

/// Source of the current calendar year.
pub trait Clock {
    fn current_year(&self) -> i32;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn current_year(&self) -> i32 {
        OffsetDateTime::now_local()
            .unwrap_or_else(|_| OffsetDateTime::now_utc())
            .year()
    }
}

#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub i32);

impl Clock for FixedClock {
    fn current_year(&self) -> i32 {
        self.0
    }
}

#[derive(Clone, Debug)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
    available: bool,
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            available: true,
        }
    }
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that rejects every read and write.
    pub fn unavailable() -> Self {
        Self {
            entries: HashMap::new(),
            available: false,
        }
    }

    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> color_eyre::Result<Option<String>> {
        if !self.available {
            return Err(eyre!("storage is unavailable"));
        }
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> color_eyre::Result<()> {
        if !self.available {
            return Err(eyre!("storage is unavailable"));
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Storage persisted as a flat JSON object, so a preference survives between
/// runs of the binary.
#[derive(Clone, Debug)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_all(&self) -> color_eyre::Result<BTreeMap<String, String>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(e).with_note(|| format!("While reading {}", self.path.display()));
            }
        };
        serde_json::from_str(&raw)
            .map_err(|e| eyre!("Corrupt storage file: {e}"))
            .with_note(|| format!("While parsing {}", self.path.display()))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> color_eyre::Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> color_eyre::Result<()> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        let raw = serde_json::to_string_pretty(&entries).map_err(|e| eyre!(e))?;
        fs::write(&self.path, raw)
            .with_note(|| format!("While writing {}", self.path.display()))
    }
}

/// An HTML page held as text. Mount points are elements carrying an `id`
/// attribute; their inner contents are replaced in place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HtmlDocument {
    html: String,
}

impl HtmlDocument {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.html
    }

    pub fn into_html(self) -> String {
        self.html
    }

    /// Byte range of the inner contents of the element with the given id.
    fn inner_range(&self, id: &str) -> Option<(usize, usize)> {
        let html = self.html.as_str();
        let tag = open_tags(html).find(|tag| tag.id == Some(id))?;
        if tag.self_closing {
            // Self-closing elements have no inner contents to replace.
            return None;
        }
        let inner_start = tag.end + 1;
        let inner_end = find_matching_close(html, inner_start, tag.name)?;
        Some((inner_start, inner_end))
    }
}

/// An opening tag as the tokenizer sees it. `end` is the index of its `>`.
#[derive(Debug)]
struct OpenTag<'a> {
    name: &'a str,
    id: Option<&'a str>,
    end: usize,
    self_closing: bool,
}

/// Start of the next tag at or after `cursor`, skipping comments.
fn next_tag_start(html: &str, mut cursor: usize) -> Option<usize> {
    loop {
        let at = cursor + html.get(cursor..)?.find('<')?;
        if html[at..].starts_with("<!--") {
            cursor = html[at..].find("-->").map_or(html.len(), |e| at + e + 3);
            continue;
        }
        return Some(at);
    }
}

fn open_tags(html: &str) -> impl Iterator<Item = OpenTag<'_>> {
    let mut cursor = 0;
    std::iter::from_fn(move || {
        loop {
            let at = next_tag_start(html, cursor)?;
            match parse_open_tag(html, at) {
                Some(tag) => {
                    cursor = tag.end + 1;
                    return Some(tag);
                }
                None => cursor = at + 1,
            }
        }
    })
}

fn skip_whitespace(bytes: &[u8], mut i: usize) -> usize {
    while bytes.get(i).is_some_and(u8::is_ascii_whitespace) {
        i += 1;
    }
    i
}

/// Parse the opening tag starting at the `<` at `start`. Attribute values may
/// be double-quoted, single-quoted or bare, with whitespace around `=`.
fn parse_open_tag(html: &str, start: usize) -> Option<OpenTag<'_>> {
    let bytes = html.as_bytes();
    if !bytes.get(start + 1)?.is_ascii_alphabetic() {
        return None;
    }

    let mut i = start + 1;
    while bytes.get(i).is_some_and(|b| b.is_ascii_alphanumeric() || *b == b'-') {
        i += 1;
    }
    let name = &html[start + 1..i];
    let mut id = None;

    loop {
        i = skip_whitespace(bytes, i);
        match *bytes.get(i)? {
            b'>' => {
                return Some(OpenTag { name, id, end: i, self_closing: false });
            }
            b'/' if bytes.get(i + 1) == Some(&b'>') => {
                return Some(OpenTag { name, id, end: i + 1, self_closing: true });
            }
            b'/' | b'=' => {
                i += 1;
                continue;
            }
            _ => {}
        }

        let attr_start = i;
        while bytes
            .get(i)
            .is_some_and(|b| !b.is_ascii_whitespace() && !matches!(*b, b'=' | b'>' | b'/'))
        {
            i += 1;
        }
        let attr = &html[attr_start..i];

        let after_name = skip_whitespace(bytes, i);
        if bytes.get(after_name) != Some(&b'=') {
            continue;
        }
        let value_start = skip_whitespace(bytes, after_name + 1);
        let value = match *bytes.get(value_start)? {
            quote @ (b'"' | b'\'') => {
                let close = value_start + 1 + html[value_start + 1..].find(quote as char)?;
                i = close + 1;
                &html[value_start + 1..close]
            }
            _ => {
                i = value_start;
                while bytes.get(i).is_some_and(|b| !b.is_ascii_whitespace() && *b != b'>') {
                    i += 1;
                }
                &html[value_start..i]
            }
        };

        if id.is_none() && attr.eq_ignore_ascii_case("id") {
            id = Some(value);
        }
    }
}

/// Name of the closing tag starting at `at`, if there is one.
fn closing_tag_name(html: &str, at: usize) -> Option<&str> {
    let rest = html.get(at..)?.strip_prefix("</")?;
    let len = rest
        .bytes()
        .take_while(|b| b.is_ascii_alphanumeric() || *b == b'-')
        .count();
    (len > 0).then(|| &rest[..len])
}

/// Index of the `</name` balancing an element whose contents start at `from`.
/// Tag names compare case-insensitively.
fn find_matching_close(html: &str, from: usize, name: &str) -> Option<usize> {
    let mut depth = 1usize;
    let mut cursor = from;

    loop {
        let at = next_tag_start(html, cursor)?;
        if let Some(close) = closing_tag_name(html, at) {
            if close.eq_ignore_ascii_case(name) {
                depth -= 1;
                if depth == 0 {
                    return Some(at);
                }
            }
            cursor = at + 2;
            continue;
        }
        match parse_open_tag(html, at) {
            Some(tag) => {
                if !tag.self_closing && tag.name.eq_ignore_ascii_case(name) {
                    depth += 1;
                }
                cursor = tag.end + 1;
            }
            None => cursor = at + 1,
        }
    }
}

impl Document for HtmlDocument {
    fn has_mount_point(&self, id: &str) -> bool {
        self.inner_range(id).is_some()
    }

    fn replace_mount_point(&mut self, id: &str, markup: &str) -> bool {
        match self.inner_range(id) {
            Some((start, end)) => {
                self.html.replace_range(start..end, markup);
                true
            }
            None => false,
        }
    }
}

/// One page load: location, storage, document and the navigation that ends
/// it.
#[derive(Debug)]
pub struct Window<S, D> {
    location: Location,
    storage: S,
    document: D,
    navigation: Option<String>,
    language_select_bound: bool,
}

impl<S: Storage, D: Document> Window<S, D> {
    pub fn new(location: Location, storage: S, document: D) -> Self {
        Self {
            location,
            storage,
            document,
            navigation: None,
            language_select_bound: false,
        }
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    pub fn into_parts(self) -> (S, D, Option<String>) {
        (self.storage, self.document, self.navigation)
    }

    /// Leave the page for `href`. The first navigation ends the page load;
    /// anything requested afterwards is dropped.
    pub fn navigate(&mut self, href: &str) {
        if let Some(pending) = &self.navigation {
            warn!(pending = pending.as_str(), ignored = href, "Page is already navigating away");
            return;
        }
        info!(target_href = href, "Navigating");
        self.navigation = Some(href.to_string());
    }

    pub fn navigation(&self) -> Option<&str> {
        self.navigation.as_deref()
    }

    pub fn has_navigated(&self) -> bool {
        self.navigation.is_some()
    }

    pub(crate) fn bind_language_select(&mut self) {
        self.language_select_bound = true;
    }

    pub fn language_select_bound(&self) -> bool {
        self.language_select_bound
    }
}

#[cfg(test)]
mod tests;
