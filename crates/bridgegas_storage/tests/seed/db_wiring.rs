#![forbid(unsafe_code)]

use bridgegas_contracts::content::{ContentDocument, SectionKey, SectionShape};
use bridgegas_contracts::UnixTimeNs;
use bridgegas_storage::repo::SiteContentRepo;
use bridgegas_storage::seed::{default_section_documents, default_team};
use bridgegas_storage::SiteStore;
use serde_json::json;

#[test]
fn at_seed_db_01_seeded_store_has_exactly_four_sections_in_order() {
    let s = SiteStore::seeded(UnixTimeNs(7)).unwrap();
    let sections: Vec<&str> = s
        .content_section_rows()
        .iter()
        .map(|row| row.section.as_str())
        .collect();
    assert_eq!(sections, vec!["hero", "about", "solutions", "team"]);
    assert!(s.content_section_rows().iter().all(|row| row.updated_at == UnixTimeNs(7)));
    assert!(s.whitelist_rows().is_empty());
}

#[test]
fn at_seed_db_02_seeded_documents_match_their_shapes() {
    let s = SiteStore::seeded(UnixTimeNs(1)).unwrap();
    for row in s.content_section_rows() {
        let shape = SectionShape::for_section(&row.section).unwrap();
        assert!(shape.check(&row.content).is_ok(), "{} shape", row.section.as_str());
    }
}

#[test]
fn at_seed_db_03_default_hero_copy() {
    let s = SiteStore::seeded(UnixTimeNs(1)).unwrap();
    let hero = s.content_section_row("hero").unwrap();
    assert_eq!(hero.content.get("title"), Some(&json!("BridgeGas")));
    assert_eq!(
        hero.content.get("tagline"),
        Some(&json!("Bridging TradFi & Crypto Payment Solutions"))
    );
}

#[test]
fn at_seed_db_04_team_document_uses_wire_key_names() {
    let s = SiteStore::seeded(UnixTimeNs(1)).unwrap();
    let team = s.content_section_row("team").unwrap();
    assert_eq!(
        team.content.get("footerNote"),
        Some(&json!(default_team().footer_note))
    );
    assert_eq!(
        team.content.get("kirill").and_then(|k| k.get("role")),
        Some(&json!("Founder & CEO"))
    );
}

#[test]
fn at_seed_db_05_reseeding_restores_defaults_without_duplicates() {
    let mut s = SiteStore::seeded(UnixTimeNs(1)).unwrap();
    let hero_id = s.content_section_row("hero").unwrap().id.clone();
    s.upsert_content_section_row(
        UnixTimeNs(2),
        SectionKey::new("hero").unwrap(),
        ContentDocument::new(json!({"title": "X", "tagline": "Y"})).unwrap(),
    );

    s.seed_default_sections(UnixTimeNs(3)).unwrap();

    assert_eq!(s.content_section_rows().len(), 4);
    let hero = s.content_section_row("hero").unwrap();
    assert_eq!(hero.id, hero_id);
    assert_eq!(hero.content.get("title"), Some(&json!("BridgeGas")));
}

#[test]
fn at_seed_db_06_default_documents_follow_seed_order() {
    let docs = default_section_documents().unwrap();
    let order: Vec<SectionShape> = docs.iter().map(|(shape, _)| *shape).collect();
    assert_eq!(order, SectionShape::ALL.to_vec());
}
