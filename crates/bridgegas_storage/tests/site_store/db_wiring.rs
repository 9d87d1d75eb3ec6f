#![forbid(unsafe_code)]

use std::collections::BTreeSet;

use bridgegas_contracts::content::{ContentDocument, SectionKey};
use bridgegas_contracts::whitelist::WhitelistEmail;
use bridgegas_contracts::UnixTimeNs;
use bridgegas_storage::repo::{SiteContentRepo, WhitelistRepo};
use bridgegas_storage::SiteStore;
use serde_json::json;

fn email(s: &str) -> WhitelistEmail {
    WhitelistEmail::new(s).unwrap()
}

fn section(s: &str) -> SectionKey {
    SectionKey::new(s).unwrap()
}

fn doc(v: serde_json::Value) -> ContentDocument {
    ContentDocument::new(v).unwrap()
}

fn seeded_store() -> SiteStore {
    SiteStore::seeded(UnixTimeNs(1_000)).unwrap()
}

#[test]
fn at_site_db_01_created_email_is_listed_exactly_once() {
    let mut s = seeded_store();
    s.create_whitelist_row(UnixTimeNs(2_000), email("cfo@acme.com"));
    s.create_whitelist_row(UnixTimeNs(2_001), email("ops@acme.com"));

    let matches: Vec<_> = s
        .whitelist_rows()
        .iter()
        .filter(|row| row.email.as_str() == "cfo@acme.com")
        .collect();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].created_at, UnixTimeNs(2_000));
}

#[test]
fn at_site_db_02_created_row_is_visible_immediately() {
    let mut s = SiteStore::new_in_memory();
    let created = s.create_whitelist_row(UnixTimeNs(5), email("a@b.com"));
    let found = s.whitelist_row_by_email(&email("a@b.com")).unwrap();
    assert_eq!(found, &created);
    assert_eq!(s.whitelist_rows().len(), 1);
}

#[test]
fn at_site_db_03_double_create_without_precheck_yields_two_ids() {
    let mut s = SiteStore::new_in_memory();
    let first = s.create_whitelist_row(UnixTimeNs(1), email("a@b.com"));
    let second = s.create_whitelist_row(UnixTimeNs(1), email("a@b.com"));

    assert_ne!(first.id, second.id);
    let ids: BTreeSet<_> = s
        .whitelist_rows()
        .iter()
        .filter(|row| row.email.as_str() == "a@b.com")
        .map(|row| row.id.clone())
        .collect();
    assert_eq!(ids.len(), 2);
}

#[test]
fn at_site_db_04_whitelist_lookup_is_case_sensitive() {
    let mut s = SiteStore::new_in_memory();
    s.create_whitelist_row(UnixTimeNs(1), email("a@b.com"));
    assert!(s.whitelist_row_by_email(&email("a@b.com")).is_some());
    assert!(s.whitelist_row_by_email(&email("A@B.com")).is_none());
}

#[test]
fn at_site_db_05_whitelist_lists_in_insertion_order() {
    let mut s = SiteStore::new_in_memory();
    for (i, e) in ["one@x.io", "two@x.io", "three@x.io"].iter().enumerate() {
        s.create_whitelist_row(UnixTimeNs(i as u64 + 1), email(e));
    }
    let listed: Vec<&str> = s.whitelist_rows().iter().map(|r| r.email.as_str()).collect();
    assert_eq!(listed, vec!["one@x.io", "two@x.io", "three@x.io"]);
}

#[test]
fn at_site_db_06_upsert_twice_keeps_one_row_and_first_id() {
    let mut s = SiteStore::new_in_memory();
    let first = s.upsert_content_section_row(
        UnixTimeNs(10),
        section("pricing"),
        doc(json!({"plan": "basic"})),
    );
    let second = s.upsert_content_section_row(
        UnixTimeNs(20),
        section("pricing"),
        doc(json!({"plan": "pro"})),
    );

    assert_eq!(first.id, second.id);
    assert_eq!(second.section.as_str(), "pricing");
    let rows: Vec<_> = s
        .content_section_rows()
        .iter()
        .filter(|row| row.section.as_str() == "pricing")
        .collect();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].content, doc(json!({"plan": "pro"})));
    assert_eq!(rows[0].id, first.id);
    assert_eq!(rows[0].updated_at, UnixTimeNs(20));
}

#[test]
fn at_site_db_07_missing_section_is_absent() {
    let s = seeded_store();
    assert!(s.content_section_row("nonexistent").is_none());
}

#[test]
fn at_site_db_08_section_lookup_has_no_case_folding() {
    let s = seeded_store();
    assert!(s.content_section_row("hero").is_some());
    assert!(s.content_section_row("Hero").is_none());
    assert!(s.content_section_row(" hero").is_none());
}

#[test]
fn at_site_db_09_hero_update_replaces_content_and_refreshes_timestamp() {
    let mut s = seeded_store();
    let before = s.content_section_row("hero").unwrap().clone();

    s.upsert_content_section_row(
        UnixTimeNs(9_000),
        section("hero"),
        doc(json!({"title": "X", "tagline": "Y"})),
    );

    let after = s.content_section_row("hero").unwrap();
    assert_eq!(after.content, doc(json!({"title": "X", "tagline": "Y"})));
    assert!(after.updated_at >= before.updated_at);
    assert_eq!(after.id, before.id);
    assert_eq!(s.content_section_rows().len(), 4);
}

#[test]
fn at_site_db_10_new_section_is_created_lazily() {
    let mut s = seeded_store();
    let created = s.upsert_content_section_row(
        UnixTimeNs(3_000),
        section("faq"),
        doc(json!({"q1": {"question": "Fees?", "answer": "Low."}})),
    );
    assert_eq!(s.content_section_rows().len(), 5);
    assert_eq!(created.updated_at, UnixTimeNs(3_000));
    assert_eq!(s.content_section_row("faq").unwrap().id, created.id);
}

#[test]
fn at_site_db_11_stores_are_independent() {
    let mut a = seeded_store();
    let b = seeded_store();
    a.create_whitelist_row(UnixTimeNs(1), email("a@b.com"));
    assert_eq!(a.whitelist_rows().len(), 1);
    assert!(b.whitelist_rows().is_empty());
    assert_ne!(
        a.content_section_row("hero").unwrap().id,
        b.content_section_row("hero").unwrap().id
    );
}
