use proptest::{
    prelude::*,
    test_runner::{Config, TestRunner},
};

use super::{LanguageCode, Location, PageId};
use crate::config::{DEFAULT_LANGUAGE, PREFIXED_LANGUAGES};

#[test]
fn language_parse_accepts_only_known_codes() {
    let mut runner = TestRunner::new(Config {
        cases: 64,
        failure_persistence: None,
        ..Config::default()
    });
    runner
        .run(&"[a-z]{0,4}", |raw| {
            let known = raw == DEFAULT_LANGUAGE || PREFIXED_LANGUAGES.contains(&raw.as_str());
            prop_assert_eq!(LanguageCode::parse(&raw).is_some(), known);
            Ok(())
        })
        .unwrap();
}

#[test]
fn default_language_is_not_a_prefix() {
    assert!(LanguageCode::parse_prefixed(DEFAULT_LANGUAGE).is_none());
    assert!(LanguageCode::parse(DEFAULT_LANGUAGE).unwrap().is_default());
    assert!(!LanguageCode::parse("ko").unwrap().is_default());
}

#[test]
fn all_lists_default_first() {
    let all: Vec<_> = LanguageCode::all().collect();
    assert_eq!(all.len(), PREFIXED_LANGUAGES.len() + 1);
    assert!(all[0].is_default());
    assert_eq!(all[1].as_str(), "es");
}

#[test]
fn empty_page_name_is_index() {
    assert!(PageId::new("").is_index());
    assert!(PageId::index().is_index());
    assert_eq!(PageId::new("a.html").as_str(), "a.html");
}

#[test]
fn location_splits_path_and_query() {
    let loc = Location::parse("/es/privacy-policy.html?ref=x#top").unwrap();
    assert_eq!(loc.path(), "/es/privacy-policy.html");
    assert_eq!(loc.query(), "?ref=x");
    assert_eq!(loc.segments(), vec!["es", "privacy-policy.html"]);
}

#[test]
fn location_accepts_absolute_urls() {
    let loc = Location::parse("https://blackimage.online/de/?a=1&b=2").unwrap();
    assert_eq!(loc.path(), "/de/");
    assert_eq!(loc.query(), "?a=1&b=2");
    assert_eq!(loc.segments(), vec!["de"]);
}

#[test]
fn bare_question_mark_is_no_query() {
    let loc = Location::parse("/?").unwrap();
    assert_eq!(loc.query(), "");
    assert!(loc.segments().is_empty());
}

#[test]
fn segments_skip_empty_parts() {
    let mut runner = TestRunner::new(Config {
        cases: 32,
        failure_persistence: None,
        ..Config::default()
    });
    runner
        .run(
            &proptest::collection::vec("[a-z0-9_-]{0,8}", 0..5),
            |parts| {
                let path = format!("/p/{}", parts.join("//"));
                let loc = Location::parse(&path).unwrap();
                let expected: Vec<&str> = std::iter::once("p")
                    .chain(parts.iter().map(String::as_str).filter(|p| !p.is_empty()))
                    .collect();
                prop_assert_eq!(loc.segments(), expected);
                Ok(())
            },
        )
        .unwrap();
}
