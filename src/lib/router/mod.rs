//! Language routing. The default language lives at the site root, every other
//! language in a `/{code}/` folder holding the same page file names.
//!
//! A visitor's explicit choice is stored client-side; on a later page load in
//! a different language folder they are sent to the same page in the chosen
//! language.

use tracing::{debug, warn};

use crate::{
    config::PREFERENCE_KEY,
    host::{Document, Storage, Window},
    types::{LanguageCode, Location, PageId},
};

/// The current location interpreted as language + page. Derived on every
/// read, never cached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathState {
    pub segments: Vec<String>,
    pub lang: LanguageCode,
    pub page: PageId,
}

impl PathState {
    pub fn from_location(location: &Location) -> Self {
        let segments = location.segments();
        let lang = detect_current_language(&segments);
        let page = resolve_page_identifier(&segments, lang);
        Self {
            segments: segments.into_iter().map(str::to_string).collect(),
            lang,
            page,
        }
    }
}

/// First segment if it names a prefixed language, otherwise the default.
pub fn detect_current_language(segments: &[&str]) -> LanguageCode {
    segments
        .first()
        .and_then(|first| LanguageCode::parse_prefixed(first))
        .unwrap_or_default()
}

/// File name of the current page. On a prefixed language the leading language
/// segment is skipped; nothing left means the index page.
pub fn resolve_page_identifier(segments: &[&str], lang: LanguageCode) -> PageId {
    let rest = if lang.is_default() {
        segments
    } else {
        segments.get(1..).unwrap_or_default()
    };

    rest.last()
        .map(|name| PageId::new(name))
        .unwrap_or_else(PageId::index)
}

/// Root-relative path of `page` in `lang`, followed by `query` verbatim.
pub fn build_target_path(lang: LanguageCode, page: &PageId, query: &str) -> String {
    let path = match (lang.is_default(), page.is_index()) {
        (true, true) => "/".to_string(),
        (true, false) => format!("/{page}"),
        (false, true) => format!("/{lang}/"),
        (false, false) => format!("/{lang}/{page}"),
    };
    format!("{path}{query}")
}

/// Stored preference, if any. Unreadable storage and values outside the
/// supported set both count as no preference.
pub fn read_preference<S: Storage>(storage: &S) -> Option<LanguageCode> {
    let raw = match storage.get(PREFERENCE_KEY) {
        Ok(raw) => raw?,
        Err(e) => {
            warn!(error = %e, "Failed to read language preference");
            return None;
        }
    };

    let lang = LanguageCode::parse(&raw);
    if lang.is_none() {
        warn!(stored = raw.as_str(), "Ignoring unsupported stored language");
    }
    lang
}

/// Persist the chosen language. Failures are logged and swallowed.
pub fn save_preference<S: Storage>(storage: &mut S, lang: LanguageCode) -> bool {
    match storage.set(PREFERENCE_KEY, lang.as_str()) {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "Failed to save language preference");
            false
        }
    }
}

/// Send the visitor to their preferred language if the current page is in a
/// different one. Returns whether a navigation was issued.
pub fn check_and_apply_preference<S: Storage, D: Document>(window: &mut Window<S, D>) -> bool {
    let Some(preferred) = read_preference(window.storage()) else {
        return false;
    };

    let state = PathState::from_location(window.location());
    if preferred == state.lang {
        return false;
    }

    let target = build_target_path(preferred, &state.page, window.location().query());
    debug!(
        preferred = preferred.as_str(),
        current = state.lang.as_str(),
        page = state.page.as_str(),
        "Stored language differs from page language"
    );
    window.navigate(&target);
    true
}

/// Record `lang` as the visitor's choice and open the current page in it.
pub fn on_language_selected<S: Storage, D: Document>(window: &mut Window<S, D>, lang: LanguageCode) {
    let state = PathState::from_location(window.location());
    save_preference(window.storage_mut(), lang);

    debug!(
        selected = lang.as_str(),
        current = state.lang.as_str(),
        page = state.page.as_str(),
        segments = ?state.segments,
        "Language switch triggered"
    );

    let target = build_target_path(lang, &state.page, window.location().query());
    window.navigate(&target);
}
