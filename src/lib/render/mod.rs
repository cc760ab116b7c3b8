//! Shared page chrome. The site configuration and the page's language are
//! first mapped onto plain view models, which are then turned into markup for
//! the header and footer mount points.

use itertools::Itertools;
use tracing::{debug, error, warn};

use crate::{
    config::{
        BadgeWidth, FOOTER_MOUNT_ID, HEADER_MOUNT_ID, INDEX_PAGE, LANGUAGE_SELECT_ID, Partner,
        SiteConfig,
    },
    host::{Clock, Document, Storage, Window},
    router::PathState,
    types::LanguageCode,
    utils::{escape_attr, escape_text, localize_href},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderView {
    pub brand_name: String,
    pub brand_href: String,
    pub logo_src: String,
    pub nav: Vec<NavItemView>,
    pub language_switch: Option<Vec<LanguageOptionView>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavItemView {
    pub text: String,
    pub href: String,
    pub active: bool,
    pub external: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LanguageOptionView {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl HeaderView {
    pub fn build(config: &SiteConfig, lang: LanguageCode, active_key: &str) -> Self {
        let nav = config
            .nav_links
            .iter()
            .map(|link| NavItemView {
                text: link.text.clone(),
                href: if link.external {
                    link.href.clone()
                } else {
                    localize_href(&link.href, lang)
                },
                active: link.key == active_key,
                external: link.external,
            })
            .collect();

        let language_switch = config.show_language_switch.then(|| {
            config
                .languages
                .iter()
                .map(|option| LanguageOptionView {
                    value: option.value.clone(),
                    label: format!("{} {}", option.flag, option.name),
                    selected: option.value == lang.as_str(),
                })
                .collect()
        });

        Self {
            brand_name: config.brand.name.clone(),
            // Every language folder has its own index page.
            brand_href: format!("./{INDEX_PAGE}"),
            logo_src: localize_href(&config.brand.logo, lang),
            nav,
            language_switch,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FooterView {
    pub brand_name: String,
    pub links: Vec<FooterLinkView>,
    pub partners: Vec<Partner>,
    pub year: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FooterLinkView {
    pub text: String,
    pub href: String,
    pub i18n: Option<String>,
}

impl FooterView {
    pub fn build(config: &SiteConfig, lang: LanguageCode, year: i32) -> Self {
        let links = config
            .footer_links
            .iter()
            .map(|link| FooterLinkView {
                text: link.text.clone(),
                href: localize_href(&link.href, lang),
                i18n: link.i18n.clone(),
            })
            .collect();

        Self {
            brand_name: config.brand.name.clone(),
            links,
            partners: config.footer_partners.clone(),
            year,
        }
    }
}

pub fn render_header_markup(view: &HeaderView) -> String {
    let nav_links = view
        .nav
        .iter()
        .map(|item| {
            let class = if item.active { "nav-link active" } else { "nav-link" };
            let external = if item.external {
                r#" target="_blank" rel="noopener noreferrer""#
            } else {
                ""
            };
            format!(
                r#"<a href="{}" class="{class}"{external}>{}</a>"#,
                escape_attr(&item.href),
                escape_text(&item.text)
            )
        })
        .join("\n");

    let language_switch = view
        .language_switch
        .as_ref()
        .map(|options| {
            let options = options
                .iter()
                .map(|option| {
                    let selected = if option.selected { " selected" } else { "" };
                    format!(
                        r#"<option value="{}"{selected}>{}</option>"#,
                        escape_attr(&option.value),
                        escape_text(&option.label)
                    )
                })
                .join("\n");
            format!(
                r#"
<div class="language-switch">
<label for="{LANGUAGE_SELECT_ID}" data-i18n="ui.languageLabel">Language</label>
<select id="{LANGUAGE_SELECT_ID}" class="language-select" aria-label="Language selector">
{options}
</select>
</div>"#
            )
        })
        .unwrap_or_default();

    format!(
        r#"
<header>
<div class="nav">
<div class="nav-links">
<a href="{}" class="brand">
<img src="{}" alt="{} Logo" class="brand-logo" />
<span data-i18n="brand.name">{}</span>
</a>
{nav_links}
</div>{language_switch}
</div>
</header>
"#,
        escape_attr(&view.brand_href),
        escape_attr(&view.logo_src),
        escape_attr(&view.brand_name),
        escape_text(&view.brand_name),
    )
}

pub fn render_footer_markup(view: &FooterView) -> String {
    let links = view
        .links
        .iter()
        .map(|link| {
            let i18n = link
                .i18n
                .as_ref()
                .map(|key| format!(r#" data-i18n="{}""#, escape_attr(key)))
                .unwrap_or_default();
            format!(
                r#"<a href="{}"{i18n}>{}</a>"#,
                escape_attr(&link.href),
                escape_text(&link.text)
            )
        })
        .join("\n");

    let partners = view.partners.iter().map(render_partner).join("\n");
    let brand = escape_text(&view.brand_name);

    format!(
        r#"
<footer>
<div class="footer-inner">
<span>{brand}</span>
<div class="footer-links">
{links}
</div>
<small>&copy; <span id="year">{}</span> {brand}</small>
</div>
<div class="footer-partner">
{partners}
</div>
</footer>
"#,
        view.year
    )
}

fn render_partner(partner: &Partner) -> String {
    match partner {
        Partner::Image {
            href,
            src,
            alt,
            width,
            height,
            rel,
        } => {
            let rel = rel
                .as_ref()
                .map(|rel| format!(r#" rel="{}""#, escape_attr(rel)))
                .unwrap_or_default();
            // An auto width only pins the height; the image keeps its ratio.
            let sizing = match width {
                BadgeWidth::Px(px) => {
                    format!(r#"style="width: {px}px; height: {height}px;" width="{px}""#)
                }
                BadgeWidth::Auto => format!(r#"style="height: {height}px; width: auto;""#),
            };
            format!(
                r#"<a href="{}" target="_blank"{rel}><img src="{}" alt="{}" {sizing} height="{height}" /></a>"#,
                escape_attr(href),
                escape_attr(src),
                escape_attr(alt),
            )
        }
        Partner::Text {
            href,
            text,
            title,
            target,
        } => {
            let target = target
                .as_ref()
                .map(|t| format!(r#" target="{}""#, escape_attr(t)))
                .unwrap_or_default();
            let title = title
                .as_ref()
                .map(|t| format!(r#" title="{}""#, escape_attr(t)))
                .unwrap_or_default();
            format!(
                r#"<a href="{}"{target}{title} class="footer-partner-text">{}</a>"#,
                escape_attr(href),
                escape_text(text)
            )
        }
    }
}

/// Paint the header into its mount point and wire the language selector.
/// Returns whether anything was rendered.
pub fn render_header<S: Storage, D: Document>(
    window: &mut Window<S, D>,
    config: Option<&SiteConfig>,
    active_key: &str,
) -> bool {
    let Some(config) = config else {
        error!("Site configuration is not loaded; skipping header");
        return false;
    };
    if !window.document().has_mount_point(HEADER_MOUNT_ID) {
        warn!(mount = HEADER_MOUNT_ID, "Header placeholder not found");
        return false;
    }

    let state = PathState::from_location(window.location());
    let view = HeaderView::build(config, state.lang, active_key);
    let markup = render_header_markup(&view);
    window
        .document_mut()
        .replace_mount_point(HEADER_MOUNT_ID, &markup);

    if view.language_switch.is_some() {
        window.bind_language_select();
        debug!(
            path = window.location().path(),
            segments = ?state.segments,
            current = state.lang.as_str(),
            "Language switch initialized"
        );
    }
    true
}

/// Paint the footer into its mount point. Returns whether anything was
/// rendered.
pub fn render_footer<S: Storage, D: Document>(
    window: &mut Window<S, D>,
    config: Option<&SiteConfig>,
    clock: &impl Clock,
) -> bool {
    if !window.document().has_mount_point(FOOTER_MOUNT_ID) {
        warn!(mount = FOOTER_MOUNT_ID, "Footer placeholder not found");
        return false;
    }
    let Some(config) = config else {
        error!("Site configuration is not loaded; skipping footer");
        return false;
    };

    let state = PathState::from_location(window.location());
    let view = FooterView::build(config, state.lang, clock.current_year());
    window
        .document_mut()
        .replace_mount_point(FOOTER_MOUNT_ID, &render_footer_markup(&view));
    true
}
