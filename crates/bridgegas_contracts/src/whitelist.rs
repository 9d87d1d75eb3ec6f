#![forbid(unsafe_code)]

use email_address::{EmailAddress, Options};
use uuid::Uuid;

use crate::{ContractViolation, SchemaVersion, UnixTimeNs, Validate};

pub const WHITELIST_CONTRACT_VERSION: SchemaVersion = SchemaVersion(1);

const MAX_EMAIL_LEN: usize = 254;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WhitelistEntryId(String);

impl WhitelistEntryId {
    /// Fresh random identifier (UUID v4 text).
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A bare mailbox address (no display name), compared exactly as submitted.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WhitelistEmail(String);

impl WhitelistEmail {
    pub fn new(email: impl Into<String>) -> Result<Self, ContractViolation> {
        let email = Self(email.into());
        email.validate()?;
        Ok(email)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Validate for WhitelistEmail {
    fn validate(&self) -> Result<(), ContractViolation> {
        if self.0.is_empty() {
            return Err(ContractViolation::InvalidValue {
                field: "whitelist_email",
                reason: "must not be empty",
            });
        }
        if self.0.len() > MAX_EMAIL_LEN {
            return Err(ContractViolation::InvalidValue {
                field: "whitelist_email",
                reason: "must be <= 254 chars",
            });
        }
        let options = Options::default().without_display_text();
        match EmailAddress::parse_with_options(&self.0, options) {
            Ok(parsed) if parsed.email() == self.0 => Ok(()),
            _ => Err(ContractViolation::InvalidValue {
                field: "whitelist_email",
                reason: "must be a valid email address",
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhitelistEntry {
    pub schema_version: SchemaVersion,
    pub id: WhitelistEntryId,
    pub email: WhitelistEmail,
    pub created_at: UnixTimeNs,
}

impl WhitelistEntry {
    pub fn v1(
        id: WhitelistEntryId,
        email: WhitelistEmail,
        created_at: UnixTimeNs,
    ) -> Self {
        Self {
            schema_version: WHITELIST_CONTRACT_VERSION,
            id,
            email,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitelist_email_accepts_business_address() {
        let email = WhitelistEmail::new("ops@acme-payments.com").unwrap();
        assert_eq!(email.as_str(), "ops@acme-payments.com");
    }

    #[test]
    fn whitelist_email_rejects_empty_and_malformed() {
        assert!(WhitelistEmail::new("").is_err());
        assert!(WhitelistEmail::new("not-an-email").is_err());
        assert!(WhitelistEmail::new("a@").is_err());
    }

    #[test]
    fn whitelist_email_keeps_case_as_submitted() {
        let lower = WhitelistEmail::new("a@b.com").unwrap();
        let upper = WhitelistEmail::new("A@b.com").unwrap();
        assert_ne!(lower, upper);
    }

    #[test]
    fn whitelist_email_rejects_overlong_address() {
        let local = "a".repeat(250);
        assert!(WhitelistEmail::new(format!("{local}@b.com")).is_err());
    }

    #[test]
    fn whitelist_email_rejects_display_name_forms() {
        assert!(WhitelistEmail::new("Name <a@b.com>").is_err());
        assert!(WhitelistEmail::new("<a@b.com>").is_err());
        assert!(WhitelistEmail::new(" a@b.com").is_err());
        assert!(WhitelistEmail::new("a@b.com").is_ok());
    }

    #[test]
    fn whitelist_entry_ids_are_distinct() {
        let a = WhitelistEntryId::generate();
        let b = WhitelistEntryId::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 36);
    }
}
