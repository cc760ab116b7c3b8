use proptest::{
    prelude::*,
    test_runner::{Config, TestRunner},
};

use super::{escape_text, localize_href};
use crate::types::LanguageCode;

#[test]
fn escape_text_removes_angle_and_quotes() {
    let mut runner = TestRunner::new(Config {
        failure_persistence: None,
        ..Config::default()
    });
    runner
        .run(&".*", |s| {
            let escaped = escape_text(&s);
            for ch in ['<', '>', '"', '\''] {
                prop_assert!(!escaped.contains(ch));
            }
            Ok(())
        })
        .unwrap();
}

#[test]
fn escape_text_noops_when_safe() {
    let mut runner = TestRunner::new(Config {
        failure_persistence: None,
        ..Config::default()
    });
    runner
        .run(&"[^<>'\"&]*", |s| {
            let escaped = escape_text(&s);
            prop_assert_eq!(escaped, s);
            Ok(())
        })
        .unwrap();
}

#[test]
fn default_language_keeps_hrefs() {
    let mut runner = TestRunner::new(Config {
        cases: 64,
        failure_persistence: None,
        ..Config::default()
    });
    runner
        .run(&"(\\./)?[a-z./:-]{0,16}", |href| {
            prop_assert_eq!(localize_href(&href, LanguageCode::default_language()), href);
            Ok(())
        })
        .unwrap();
}

#[test]
fn prefixed_language_climbs_one_folder() {
    let de = LanguageCode::parse("de").unwrap();
    assert_eq!(localize_href("./black-screen.html", de), "../black-screen.html");
    assert_eq!(localize_href("./pic/logo.ico", de), "../pic/logo.ico");
}

#[test]
fn only_leading_marker_is_rewritten() {
    let es = LanguageCode::parse("es").unwrap();
    assert_eq!(localize_href("https://example.com/./x", es), "https://example.com/./x");
    assert_eq!(localize_href("/absolute.html", es), "/absolute.html");
    assert_eq!(localize_href("../up.html", es), "../up.html");
}
