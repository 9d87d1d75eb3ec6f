#![forbid(unsafe_code)]

use bridgegas_contracts::content::{ContentDocument, ContentSection, SectionKey};
use bridgegas_contracts::whitelist::{WhitelistEmail, WhitelistEntry};
use bridgegas_contracts::UnixTimeNs;

use crate::SiteStore;

/// Typed repository interface for the `whitelist_emails` table.
pub trait WhitelistRepo {
    fn create_whitelist_row(&mut self, now: UnixTimeNs, email: WhitelistEmail) -> WhitelistEntry;
    fn whitelist_rows(&self) -> &[WhitelistEntry];
    fn whitelist_row_by_email(&self, email: &WhitelistEmail) -> Option<&WhitelistEntry>;
}

/// Typed repository interface for the `site_content` table.
pub trait SiteContentRepo {
    fn content_section_row(&self, section: &str) -> Option<&ContentSection>;
    fn upsert_content_section_row(
        &mut self,
        now: UnixTimeNs,
        section: SectionKey,
        content: ContentDocument,
    ) -> ContentSection;
    fn content_section_rows(&self) -> &[ContentSection];
}

impl WhitelistRepo for SiteStore {
    fn create_whitelist_row(&mut self, now: UnixTimeNs, email: WhitelistEmail) -> WhitelistEntry {
        self.whitelist_entry_create(now, email)
    }

    fn whitelist_rows(&self) -> &[WhitelistEntry] {
        SiteStore::whitelist_rows(self)
    }

    fn whitelist_row_by_email(&self, email: &WhitelistEmail) -> Option<&WhitelistEntry> {
        SiteStore::whitelist_rows(self)
            .iter()
            .find(|row| &row.email == email)
    }
}

impl SiteContentRepo for SiteStore {
    fn content_section_row(&self, section: &str) -> Option<&ContentSection> {
        self.content_section_get(section)
    }

    fn upsert_content_section_row(
        &mut self,
        now: UnixTimeNs,
        section: SectionKey,
        content: ContentDocument,
    ) -> ContentSection {
        self.content_section_upsert(now, section, content)
    }

    fn content_section_rows(&self) -> &[ContentSection] {
        SiteStore::content_section_rows(self)
    }
}
