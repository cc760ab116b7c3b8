//! Site configuration: the brand, link lists, partner badges and language
//! descriptors shared by every page, plus the fixed constants of the
//! language routing scheme.

use std::{fmt, fs, path::Path};

use color_eyre::{Section, eyre::eyre};
use serde::Deserialize;

/// Language served from the site root, without a path prefix.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Languages served from a `/{code}/` subfolder.
pub const PREFIXED_LANGUAGES: &[&str] = &[
    "es", "de", "fr", "uk", "pl", "it", "tr", "pt", "sv", "ja", "ms", "ko",
];

/// Storage key holding the visitor's chosen language.
pub const PREFERENCE_KEY: &str = "preferredLanguage";

pub const HEADER_MOUNT_ID: &str = "header-placeholder";
pub const FOOTER_MOUNT_ID: &str = "footer-placeholder";

/// Id of the `<select>` rendered by the language switch.
pub const LANGUAGE_SELECT_ID: &str = "languageSelect";

/// Page identifier used when the path names no file.
pub const INDEX_PAGE: &str = "index.html";

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    pub brand: Brand,
    #[serde(default)]
    pub nav_links: Vec<NavLink>,
    #[serde(default)]
    pub footer_links: Vec<FooterLink>,
    #[serde(default)]
    pub footer_partners: Vec<Partner>,
    #[serde(default)]
    pub languages: Vec<LanguageOption>,
    #[serde(default = "default_true")]
    pub show_language_switch: bool,
}

fn default_true() -> bool {
    true
}

impl SiteConfig {
    pub fn load(path: &Path) -> color_eyre::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_note(|| format!("While reading site configuration {}", path.display()))?;
        Self::from_json(&raw)
            .with_note(|| format!("While parsing site configuration {}", path.display()))
    }

    pub fn from_json(raw: &str) -> color_eyre::Result<Self> {
        serde_json::from_str(raw).map_err(|e| eyre!("Invalid site configuration: {e}"))
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    pub name: String,
    pub logo: String,
    /// Larger raster variant of the logo, for pages that want one.
    #[serde(default)]
    pub logo_png: Option<String>,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct NavLink {
    pub text: String,
    pub href: String,
    pub key: String,
    #[serde(default)]
    pub external: bool,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct FooterLink {
    pub text: String,
    pub href: String,
    #[serde(default)]
    pub i18n: Option<String>,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Partner {
    Image {
        href: String,
        src: String,
        alt: String,
        width: BadgeWidth,
        height: u32,
        #[serde(default)]
        rel: Option<String>,
    },
    Text {
        href: String,
        text: String,
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        target: Option<String>,
    },
}

/// Width of a partner badge: fixed pixels, or `"auto"` to follow the image's
/// natural aspect ratio.
#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(try_from = "RawWidth")]
pub enum BadgeWidth {
    Px(u32),
    Auto,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawWidth {
    Px(u32),
    Keyword(String),
}

impl TryFrom<RawWidth> for BadgeWidth {
    type Error = String;

    fn try_from(raw: RawWidth) -> Result<Self, Self::Error> {
        match raw {
            RawWidth::Px(px) => Ok(Self::Px(px)),
            RawWidth::Keyword(k) if k == "auto" => Ok(Self::Auto),
            RawWidth::Keyword(k) => Err(format!("badge width must be a number or \"auto\", got {k:?}")),
        }
    }
}

impl fmt::Display for BadgeWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(px) => write!(f, "{px}"),
            Self::Auto => f.write_str("auto"),
        }
    }
}

/// An entry of the language selector.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct LanguageOption {
    pub value: String,
    pub flag: String,
    pub name: String,
}
