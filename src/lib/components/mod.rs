//! Page initialization. Rendering happens synchronously inside
//! [`Components::init`]; the stored-preference check is queued and only runs
//! when the caller drains the queue with [`Components::run_deferred`], so the
//! page is always painted before a redirect can happen.

use std::collections::VecDeque;

use tracing::{debug, warn};

use crate::{
    config::{LANGUAGE_SELECT_ID, SiteConfig},
    host::{Clock, Document, Storage, SystemClock, Window},
    render::{render_footer, render_header},
    router::{check_and_apply_preference, on_language_selected},
    types::LanguageCode,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InitOptions {
    /// Key of the navigation entry to highlight.
    pub current_page: String,
    pub render_header: bool,
    pub render_footer: bool,
}

impl Default for InitOptions {
    fn default() -> Self {
        Self {
            current_page: String::new(),
            render_header: true,
            render_footer: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Deferred {
    CheckPreference,
}

/// Owns everything that lives for one page session: the configuration, the
/// deferred task queue and whether the preference check was already queued.
#[derive(Debug)]
pub struct Components<C = SystemClock> {
    config: Option<SiteConfig>,
    clock: C,
    preference_checked: bool,
    deferred: VecDeque<Deferred>,
}

impl Components<SystemClock> {
    pub fn new(config: Option<SiteConfig>) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> Components<C> {
    pub fn with_clock(config: Option<SiteConfig>, clock: C) -> Self {
        Self {
            config,
            clock,
            preference_checked: false,
            deferred: VecDeque::new(),
        }
    }

    /// Render the requested chrome and queue the preference check. The check
    /// is queued on the first call only.
    pub fn init<S: Storage, D: Document>(&mut self, window: &mut Window<S, D>, options: &InitOptions) {
        if !self.preference_checked {
            self.preference_checked = true;
            self.deferred.push_back(Deferred::CheckPreference);
        }

        if options.render_header {
            render_header(window, self.config.as_ref(), &options.current_page);
        }
        if options.render_footer {
            render_footer(window, self.config.as_ref(), &self.clock);
        }
    }

    pub fn pending_tasks(&self) -> usize {
        self.deferred.len()
    }

    /// Run queued tasks in order. Once the page has navigated away the rest
    /// of the queue is dropped. Returns how many tasks ran.
    pub fn run_deferred<S: Storage, D: Document>(&mut self, window: &mut Window<S, D>) -> usize {
        let mut ran = 0;
        while let Some(task) = self.deferred.pop_front() {
            if window.has_navigated() {
                debug!(dropped = self.deferred.len() + 1, "Page is unloading; dropping deferred tasks");
                self.deferred.clear();
                break;
            }
            match task {
                Deferred::CheckPreference => {
                    check_and_apply_preference(window);
                }
            }
            ran += 1;
        }
        ran
    }

    /// Change handler of the language selector. Returns whether the selection
    /// was accepted.
    pub fn select_language<S: Storage, D: Document>(
        &mut self,
        window: &mut Window<S, D>,
        value: &str,
    ) -> bool {
        if !window.language_select_bound() {
            warn!(id = LANGUAGE_SELECT_ID, "Language select element not found");
            return false;
        }
        let Some(lang) = LanguageCode::parse(value) else {
            warn!(value, "Ignoring selection of unsupported language");
            return false;
        };
        on_language_selected(window, lang);
        true
    }
}
