use std::fs;

use proptest::{
    prelude::*,
    test_runner::{Config, TestRunner},
};
use tempfile::TempDir;

use super::{
    Clock, Document, FileStorage, FixedClock, HtmlDocument, MemoryStorage, Storage, SystemClock,
    Window,
};
use crate::types::Location;

#[test]
fn memory_storage_round_trips_values() {
    let mut storage = MemoryStorage::new();
    assert_eq!(storage.get("k").unwrap(), None);
    storage.set("k", "es").unwrap();
    assert_eq!(storage.get("k").unwrap().as_deref(), Some("es"));
}

#[test]
fn unavailable_storage_fails_both_ways() {
    let mut storage = MemoryStorage::unavailable();
    assert!(storage.get("k").is_err());
    assert!(storage.set("k", "es").is_err());
}

#[test]
fn file_storage_persists_between_instances() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("prefs.json");

    let first = FileStorage::new(&path);
    assert_eq!(first.get("preferredLanguage").unwrap(), None);

    let mut writer = FileStorage::new(&path);
    writer.set("preferredLanguage", "de").unwrap();
    writer.set("other", "x").unwrap();

    let reader = FileStorage::new(&path);
    assert_eq!(reader.get("preferredLanguage").unwrap().as_deref(), Some("de"));
    assert_eq!(reader.get("other").unwrap().as_deref(), Some("x"));
}

#[test]
fn file_storage_reports_corrupt_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("prefs.json");
    fs::write(&path, "not json").unwrap();

    let mut storage = FileStorage::new(&path);
    assert!(storage.get("preferredLanguage").is_err());
    assert!(storage.set("preferredLanguage", "de").is_err());
}

#[test]
fn replaces_empty_mount_point() {
    let mut doc = HtmlDocument::new(
        r#"<body><div id="header-placeholder"></div><main>x</main></body>"#,
    );
    assert!(doc.has_mount_point("header-placeholder"));
    assert!(doc.replace_mount_point("header-placeholder", "<header>h</header>"));
    assert_eq!(
        doc.as_str(),
        r#"<body><div id="header-placeholder"><header>h</header></div><main>x</main></body>"#
    );
}

#[test]
fn replacement_is_wholesale_and_repeatable() {
    let mut doc = HtmlDocument::new(r#"<div class="x" id='footer-placeholder'>old</div>"#);
    assert!(doc.replace_mount_point("footer-placeholder", "one"));
    assert!(doc.replace_mount_point("footer-placeholder", "two"));
    assert_eq!(doc.as_str(), r#"<div class="x" id='footer-placeholder'>two</div>"#);
}

#[test]
fn nested_elements_of_same_tag_are_kept_balanced() {
    let mut doc = HtmlDocument::new(
        r#"<div id="m"><div><div>a</div></div></div><div id="after"></div>"#,
    );
    assert!(doc.replace_mount_point("m", "new"));
    assert_eq!(doc.as_str(), r#"<div id="m">new</div><div id="after"></div>"#);
}

#[test]
fn missing_or_lookalike_ids_are_not_mount_points() {
    let mut doc = HtmlDocument::new(
        r#"<div data-id="header-placeholder"></div><div id="header-placeholder-2"></div><br id="x"/>"#,
    );
    assert!(!doc.has_mount_point("header-placeholder"));
    assert!(!doc.replace_mount_point("header-placeholder", "h"));
    assert!(!doc.has_mount_point("x"));
}

#[test]
fn mount_point_contents_are_replaced_for_any_markup() {
    let mut runner = TestRunner::new(Config {
        cases: 32,
        failure_persistence: None,
        ..Config::default()
    });
    runner
        .run(&("[a-z />]{0,20}", "[a-z]{0,10}"), |(old, new)| {
            let mut doc = HtmlDocument::new(format!(r#"<p>pre</p><div id="m">{old}</div>"#));
            prop_assert!(doc.replace_mount_point("m", &new));
            prop_assert_eq!(doc.as_str(), format!(r#"<p>pre</p><div id="m">{new}</div>"#));
            Ok(())
        })
        .unwrap();
}

#[test]
fn unquoted_id_is_a_mount_point() {
    let mut doc = HtmlDocument::new("<div id=header-placeholder></div>");
    assert!(doc.has_mount_point("header-placeholder"));
    assert!(doc.replace_mount_point("header-placeholder", "h"));
    assert_eq!(doc.into_html(), "<div id=header-placeholder>h</div>");
}

#[test]
fn whitespace_around_equals_is_accepted() {
    let mut doc = HtmlDocument::new(
        "<div class=\"a\" id = \"header-placeholder\"></div><div id\n=\n'footer-placeholder'>x</div>",
    );
    assert!(doc.replace_mount_point("header-placeholder", "h"));
    assert!(doc.replace_mount_point("footer-placeholder", "f"));
    assert_eq!(
        doc.as_str(),
        "<div class=\"a\" id = \"header-placeholder\">h</div><div id\n=\n'footer-placeholder'>f</div>"
    );
}

#[test]
fn tag_and_attribute_names_ignore_case() {
    let mut doc = HtmlDocument::new(r#"<DIV ID="footer-placeholder"><Div>old</dIV></div><p></p>"#);
    assert!(doc.has_mount_point("footer-placeholder"));
    assert!(doc.replace_mount_point("footer-placeholder", "new"));
    assert_eq!(doc.as_str(), r#"<DIV ID="footer-placeholder">new</div><p></p>"#);
}

#[test]
fn attribute_values_and_comments_do_not_confuse_the_scan() {
    let mut doc = HtmlDocument::new(
        r#"<!-- <div id="m"> --><a title="id=m" href=x>l</a><div data-x='>' id="m">a<!-- </div> -->b</div>"#,
    );
    assert!(doc.replace_mount_point("m", "c"));
    assert_eq!(
        doc.as_str(),
        r#"<!-- <div id="m"> --><a title="id=m" href=x>l</a><div data-x='>' id="m">c</div>"#
    );
}

#[test]
fn first_navigation_wins() {
    let mut window = Window::new(
        Location::parse("/").unwrap(),
        MemoryStorage::new(),
        HtmlDocument::default(),
    );
    assert!(!window.has_navigated());
    window.navigate("/es/");
    window.navigate("/de/");
    assert_eq!(window.navigation(), Some("/es/"));
}

#[test]
fn fixed_clock_reports_its_year() {
    assert_eq!(FixedClock(2031).current_year(), 2031);
}

#[test]
fn system_clock_reports_a_plausible_year() {
    let year = SystemClock.current_year();
    assert!((2024..3000).contains(&year));
}
