#![forbid(unsafe_code)]

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{SystemTime, UNIX_EPOCH};

use axum::http::StatusCode;
use bridgegas_contracts::content::{ContentDocument, ContentSection, SectionKey, SectionShape};
use bridgegas_contracts::whitelist::{WhitelistEmail, WhitelistEntry};
use bridgegas_contracts::{ContractViolation, UnixTimeNs};
use bridgegas_storage::repo::{SiteContentRepo, WhitelistRepo};
use bridgegas_storage::{SiteStore, StorageError};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::{info, warn};

pub mod config;
pub mod http;

pub use config::AdapterConfig;

pub mod messages {
    pub const WHITELIST_ADDED: &str = "Successfully added to whitelist";
    pub const INVALID_EMAIL: &str = "Invalid email format";
    pub const EMAIL_ALREADY_REGISTERED: &str = "Email already registered";
    pub const ACCESS_DENIED: &str = "Access denied. Password required to view whitelist emails.";
    pub const SECTION_NOT_FOUND: &str = "Content section not found";
    pub const INVALID_CONTENT: &str = "Invalid content format";
    pub const INTERNAL_ERROR: &str = "Internal server error";
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct WhitelistSubmitRequest {
    pub email: String,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ContentUpdateRequest {
    #[serde(default)]
    pub content: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhitelistEntryView {
    pub id: String,
    pub email: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSectionView {
    pub id: String,
    pub section: String,
    pub content: serde_json::Value,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WhitelistSubmitResponse {
    pub message: String,
    pub email: WhitelistEntryView,
}

/// One rejected input field. `path` walks the request body from its root;
/// an empty path means the body as a whole could not be read.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AdapterFieldError {
    pub path: Vec<String>,
    pub message: String,
}

impl AdapterFieldError {
    pub fn at(path: &[&str], message: impl Into<String>) -> Self {
        Self {
            path: path.iter().map(|p| p.to_string()).collect(),
            message: message.into(),
        }
    }

    pub fn unreadable_body(message: impl Into<String>) -> Self {
        Self::at(&[], message)
    }

    /// Places a contract violation under `root`, the request field it came from.
    /// Shape violations extend the path with their dotted field name.
    pub fn from_violation(root: &str, violation: &ContractViolation) -> Self {
        match violation {
            ContractViolation::InvalidValue { reason, .. } => Self::at(&[root], *reason),
            ContractViolation::InvalidShape { field, reason, .. } => {
                let mut path = vec![root.to_string()];
                path.extend(field.split('.').map(str::to_string));
                Self {
                    path,
                    message: reason.to_string(),
                }
            }
        }
    }
}

impl std::fmt::Display for AdapterFieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path.join("."), self.message)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AdapterErrorBody {
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<AdapterFieldError>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AdapterHealthResponse {
    pub status: String,
    pub outcome: String,
    pub reason: Option<String>,
    pub whitelist_count: u64,
    pub content_section_count: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    #[error("invalid whitelist submission: {0}")]
    InvalidEmail(AdapterFieldError),
    #[error("invalid content submission: {0}")]
    InvalidContent(AdapterFieldError),
    #[error("email already registered")]
    EmailAlreadyRegistered,
    #[error("whitelist read denied")]
    AccessDenied,
    #[error("content section '{0}' not found")]
    SectionNotFound(String),
    #[error("adapter store lock poisoned")]
    StoreLockPoisoned,
    #[error("timestamp {0}ns cannot be rendered as RFC 3339")]
    TimestampOutOfRange(u64),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl AdapterError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AdapterError::InvalidEmail(_)
            | AdapterError::InvalidContent(_)
            | AdapterError::EmailAlreadyRegistered => StatusCode::BAD_REQUEST,
            AdapterError::AccessDenied => StatusCode::UNAUTHORIZED,
            AdapterError::SectionNotFound(_) => StatusCode::NOT_FOUND,
            AdapterError::StoreLockPoisoned
            | AdapterError::TimestampOutOfRange(_)
            | AdapterError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to return to clients. Internal detail stays in the logs.
    pub fn public_message(&self) -> &'static str {
        match self {
            AdapterError::InvalidEmail(_) => messages::INVALID_EMAIL,
            AdapterError::InvalidContent(_) => messages::INVALID_CONTENT,
            AdapterError::EmailAlreadyRegistered => messages::EMAIL_ALREADY_REGISTERED,
            AdapterError::AccessDenied => messages::ACCESS_DENIED,
            AdapterError::SectionNotFound(_) => messages::SECTION_NOT_FOUND,
            AdapterError::StoreLockPoisoned
            | AdapterError::TimestampOutOfRange(_)
            | AdapterError::Storage(_) => messages::INTERNAL_ERROR,
        }
    }

    pub fn body(&self) -> AdapterErrorBody {
        let errors = match self {
            AdapterError::InvalidEmail(detail) | AdapterError::InvalidContent(detail) => {
                vec![detail.clone()]
            }
            _ => Vec::new(),
        };
        AdapterErrorBody {
            message: self.public_message().to_string(),
            errors,
        }
    }
}

/// Request-facing owner of the site store: input validation, the whitelist
/// duplicate pre-check, and conversion to wire records.
#[derive(Debug, Clone)]
pub struct AdapterRuntime {
    store: Arc<Mutex<SiteStore>>,
    config: AdapterConfig,
}

impl AdapterRuntime {
    pub fn new(store: Arc<Mutex<SiteStore>>, config: AdapterConfig) -> Self {
        Self { store, config }
    }

    /// Runtime over a freshly seeded store. The seed is written before this returns.
    pub fn new_seeded(config: AdapterConfig, now_ns: Option<u64>) -> Result<Self, AdapterError> {
        let now = UnixTimeNs(now_ns.unwrap_or_else(system_time_now_ns).max(1));
        let store = SiteStore::seeded(now)?;
        info!(
            sections = store.content_section_rows().len(),
            "seeded default site content"
        );
        Ok(Self::new(Arc::new(Mutex::new(store)), config))
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    fn lock_store(&self) -> Result<MutexGuard<'_, SiteStore>, AdapterError> {
        self.store
            .lock()
            .map_err(|_| AdapterError::StoreLockPoisoned)
    }

    pub fn submit_whitelist_email(
        &self,
        request: WhitelistSubmitRequest,
        now_ns: Option<u64>,
    ) -> Result<WhitelistSubmitResponse, AdapterError> {
        let email = WhitelistEmail::new(request.email).map_err(|v| {
            AdapterError::InvalidEmail(AdapterFieldError::from_violation("email", &v))
        })?;
        let now = UnixTimeNs(now_ns.unwrap_or_else(system_time_now_ns).max(1));

        let entry = {
            let mut store = self.lock_store()?;
            if store.whitelist_row_by_email(&email).is_some() {
                warn!("whitelist submission rejected as duplicate");
                return Err(AdapterError::EmailAlreadyRegistered);
            }
            store.create_whitelist_row(now, email)
        };
        info!(id = entry.id.as_str(), "whitelist entry created");

        Ok(WhitelistSubmitResponse {
            message: messages::WHITELIST_ADDED.to_string(),
            email: whitelist_entry_view(&entry)?,
        })
    }

    pub fn list_whitelist_entries(
        &self,
        password: Option<&str>,
    ) -> Result<Vec<WhitelistEntryView>, AdapterError> {
        let authorized = match (self.config.whitelist_read_secret.as_deref(), password) {
            (Some(secret), Some(given)) => secret == given,
            _ => false,
        };
        if !authorized {
            warn!(
                password_present = password.is_some(),
                "whitelist read denied"
            );
            return Err(AdapterError::AccessDenied);
        }

        let rows: Vec<WhitelistEntry> = self.lock_store()?.whitelist_rows().to_vec();
        rows.iter().map(whitelist_entry_view).collect()
    }

    pub fn get_content_section(&self, section: &str) -> Result<ContentSectionView, AdapterError> {
        let row = self.lock_store()?.content_section_row(section).cloned();
        match row {
            Some(row) => content_section_view(&row),
            None => Err(AdapterError::SectionNotFound(section.to_string())),
        }
    }

    pub fn put_content_section(
        &self,
        section: &str,
        request: ContentUpdateRequest,
        now_ns: Option<u64>,
    ) -> Result<ContentSectionView, AdapterError> {
        let invalid = |root: &str, v: ContractViolation| {
            AdapterError::InvalidContent(AdapterFieldError::from_violation(root, &v))
        };
        let key = SectionKey::new(section).map_err(|v| invalid("section", v))?;
        let raw = request.content.ok_or_else(|| {
            AdapterError::InvalidContent(AdapterFieldError::at(&["content"], "is required"))
        })?;
        let content = ContentDocument::new(raw).map_err(|v| invalid("content", v))?;
        if let Some(shape) = SectionShape::for_section(&key) {
            shape.check(&content).map_err(|v| invalid("content", v))?;
        }
        let now = UnixTimeNs(now_ns.unwrap_or_else(system_time_now_ns).max(1));

        let row = self
            .lock_store()?
            .upsert_content_section_row(now, key, content);
        info!(
            id = row.id.as_str(),
            section = row.section.as_str(),
            "content section written"
        );
        content_section_view(&row)
    }

    pub fn list_content_sections(&self) -> Result<Vec<ContentSectionView>, AdapterError> {
        let rows: Vec<ContentSection> = self.lock_store()?.content_section_rows().to_vec();
        rows.iter().map(content_section_view).collect()
    }

    pub fn health_report(&self) -> Result<AdapterHealthResponse, AdapterError> {
        let store = self.lock_store()?;
        Ok(AdapterHealthResponse {
            status: "ok".to_string(),
            outcome: "HEALTHY".to_string(),
            reason: None,
            whitelist_count: store.whitelist_rows().len() as u64,
            content_section_count: store.content_section_rows().len() as u64,
        })
    }
}

fn whitelist_entry_view(entry: &WhitelistEntry) -> Result<WhitelistEntryView, AdapterError> {
    Ok(WhitelistEntryView {
        id: entry.id.as_str().to_string(),
        email: entry.email.as_str().to_string(),
        created_at: format_rfc3339(entry.created_at)?,
    })
}

fn content_section_view(row: &ContentSection) -> Result<ContentSectionView, AdapterError> {
    Ok(ContentSectionView {
        id: row.id.as_str().to_string(),
        section: row.section.as_str().to_string(),
        content: row.content.to_value(),
        updated_at: format_rfc3339(row.updated_at)?,
    })
}

fn format_rfc3339(t: UnixTimeNs) -> Result<String, AdapterError> {
    OffsetDateTime::from_unix_timestamp_nanos(t.0 as i128)
        .ok()
        .and_then(|dt| dt.format(&Rfc3339).ok())
        .ok_or(AdapterError::TimestampOutOfRange(t.0))
}

fn system_time_now_ns() -> u64 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(1);
    if nanos > u64::MAX as u128 {
        u64::MAX
    } else {
        nanos as u64
    }
}
