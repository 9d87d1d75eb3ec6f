#![forbid(unsafe_code)]

use std::collections::BTreeMap;
use std::fmt;

use bridgegas_contracts::content::{ContentDocument, ContentSection, ContentSectionId, SectionKey};
use bridgegas_contracts::whitelist::{WhitelistEmail, WhitelistEntry, WhitelistEntryId};
use bridgegas_contracts::{ContractViolation, UnixTimeNs};

use crate::seed;

#[derive(Debug, Clone, PartialEq)]
pub enum StorageError {
    SeedFailed {
        section: &'static str,
        violation: ContractViolation,
    },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::SeedFailed { section, violation } => {
                write!(f, "default content for '{section}' is invalid: {violation}")
            }
        }
    }
}

impl std::error::Error for StorageError {}

/// In-memory whitelist and site-content tables.
///
/// Whitelist rows are append-only. Content sections live in a single ordered
/// table with an index from section key to row position, so there is at most
/// one row per section.
#[derive(Debug, Clone)]
pub struct SiteStore {
    whitelist: Vec<WhitelistEntry>,
    content_sections: Vec<ContentSection>,
    content_section_index: BTreeMap<SectionKey, usize>,
}

impl SiteStore {
    pub fn new_in_memory() -> Self {
        Self {
            whitelist: Vec::new(),
            content_sections: Vec::new(),
            content_section_index: BTreeMap::new(),
        }
    }

    /// Store ready for serving: the four default sections are written before it is returned.
    pub fn seeded(now: UnixTimeNs) -> Result<Self, StorageError> {
        let mut store = Self::new_in_memory();
        store.seed_default_sections(now)?;
        Ok(store)
    }

    /// Upserts hero, about, solutions and team, in that order.
    pub fn seed_default_sections(&mut self, now: UnixTimeNs) -> Result<(), StorageError> {
        for (shape, content) in seed::default_section_documents()? {
            self.content_section_upsert(now, shape.section_key(), content);
        }
        Ok(())
    }

    /// Appends unconditionally. Email uniqueness is checked by the caller.
    pub fn whitelist_entry_create(
        &mut self,
        now: UnixTimeNs,
        email: WhitelistEmail,
    ) -> WhitelistEntry {
        let entry = WhitelistEntry::v1(WhitelistEntryId::generate(), email, now);
        self.whitelist.push(entry.clone());
        entry
    }

    pub fn whitelist_rows(&self) -> &[WhitelistEntry] {
        &self.whitelist
    }

    pub fn content_section_get(&self, section: &str) -> Option<&ContentSection> {
        // Keys that cannot be valid sections are simply absent.
        let key = SectionKey::new(section).ok()?;
        self.content_section_index
            .get(&key)
            .and_then(|idx| self.content_sections.get(*idx))
    }

    pub fn content_section_upsert(
        &mut self,
        now: UnixTimeNs,
        section: SectionKey,
        content: ContentDocument,
    ) -> ContentSection {
        if let Some(idx) = self.content_section_index.get(&section).copied() {
            let row = &mut self.content_sections[idx];
            row.content = content;
            // updated_at never moves backwards, even if the caller's clock does.
            row.updated_at = now.max(row.updated_at);
            return row.clone();
        }

        let row = ContentSection::v1(ContentSectionId::generate(), section.clone(), content, now);
        self.content_section_index
            .insert(section, self.content_sections.len());
        self.content_sections.push(row.clone());
        row
    }

    pub fn content_section_rows(&self) -> &[ContentSection] {
        &self.content_sections
    }
}
