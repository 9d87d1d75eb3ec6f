#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::{ContractViolation, SchemaVersion, UnixTimeNs, Validate};

pub const CONTENT_CONTRACT_VERSION: SchemaVersion = SchemaVersion(1);

const MAX_SECTION_KEY_LEN: usize = 64;
const MAX_DOCUMENT_DEPTH: usize = 8;

/// Natural key of a content section, matched exactly (no case folding).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SectionKey(String);

impl SectionKey {
    pub fn new(key: impl Into<String>) -> Result<Self, ContractViolation> {
        let key = Self(key.into());
        key.validate()?;
        Ok(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Validate for SectionKey {
    fn validate(&self) -> Result<(), ContractViolation> {
        if self.0.trim().is_empty() {
            return Err(ContractViolation::InvalidValue {
                field: "section_key",
                reason: "must not be empty",
            });
        }
        if self.0.len() > MAX_SECTION_KEY_LEN {
            return Err(ContractViolation::InvalidValue {
                field: "section_key",
                reason: "must be <= 64 chars",
            });
        }
        if self.0.contains('/') {
            return Err(ContractViolation::InvalidValue {
                field: "section_key",
                reason: "must not contain '/'",
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContentSectionId(String);

impl ContentSectionId {
    /// Fresh random identifier (UUID v4 text).
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Display text for one page section: a JSON object whose values are strings
/// or nested documents of the same kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct ContentDocument(Map<String, Value>);

impl ContentDocument {
    pub fn new(value: Value) -> Result<Self, ContractViolation> {
        match value {
            Value::Object(map) => {
                let doc = Self(map);
                doc.validate()?;
                Ok(doc)
            }
            _ => Err(ContractViolation::InvalidValue {
                field: "content_document",
                reason: "must be a JSON object",
            }),
        }
    }

    /// Builds a document from one of the typed section shapes.
    pub fn from_shape<T: Serialize>(shape: &T) -> Result<Self, ContractViolation> {
        let value = serde_json::to_value(shape).map_err(|_| ContractViolation::InvalidValue {
            field: "content_document",
            reason: "must serialize to a JSON object",
        })?;
        Self::new(value)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

impl Validate for ContentDocument {
    fn validate(&self) -> Result<(), ContractViolation> {
        validate_document_level(&self.0, 1)
    }
}

fn validate_document_level(
    map: &Map<String, Value>,
    depth: usize,
) -> Result<(), ContractViolation> {
    if depth > MAX_DOCUMENT_DEPTH {
        return Err(ContractViolation::InvalidValue {
            field: "content_document",
            reason: "must nest at most 8 levels",
        });
    }
    for (key, value) in map {
        if key.trim().is_empty() {
            return Err(ContractViolation::InvalidValue {
                field: "content_document.key",
                reason: "must not be empty",
            });
        }
        match value {
            Value::String(_) => {}
            Value::Object(nested) => validate_document_level(nested, depth + 1)?,
            _ => {
                return Err(ContractViolation::InvalidValue {
                    field: "content_document.value",
                    reason: "must be a string or a nested object",
                })
            }
        }
    }
    Ok(())
}

impl TryFrom<Value> for ContentDocument {
    type Error = ContractViolation;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ContentDocument> for Value {
    fn from(doc: ContentDocument) -> Self {
        Value::Object(doc.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContentSection {
    pub schema_version: SchemaVersion,
    pub id: ContentSectionId,
    pub section: SectionKey,
    pub content: ContentDocument,
    pub updated_at: UnixTimeNs,
}

impl ContentSection {
    pub fn v1(
        id: ContentSectionId,
        section: SectionKey,
        content: ContentDocument,
        updated_at: UnixTimeNs,
    ) -> Self {
        Self {
            schema_version: CONTENT_CONTRACT_VERSION,
            id,
            section,
            content,
            updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroContent {
    pub title: String,
    pub tagline: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutContent {
    pub heading: String,
    pub description: String,
    pub mission: String,
    pub values: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolutionOffering {
    pub title: String,
    pub description: String,
    pub benefit: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolutionsContent {
    pub heading: String,
    pub subheading: String,
    pub payment: SolutionOffering,
    pub bridging: SolutionOffering,
    pub compliance: SolutionOffering,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub name: String,
    pub role: String,
    pub bio: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamContent {
    pub heading: String,
    pub subheading: String,
    pub kirill: TeamMember,
    pub footer_note: String,
}

enum FieldRule {
    Text(&'static str),
    Group(&'static str, &'static [FieldRule]),
}

const OFFERING_FIELDS: &[FieldRule] = &[
    FieldRule::Text("title"),
    FieldRule::Text("description"),
    FieldRule::Text("benefit"),
];

const HERO_FIELDS: &[FieldRule] = &[FieldRule::Text("title"), FieldRule::Text("tagline")];

const ABOUT_FIELDS: &[FieldRule] = &[
    FieldRule::Text("heading"),
    FieldRule::Text("description"),
    FieldRule::Text("mission"),
    FieldRule::Text("values"),
];

const SOLUTIONS_FIELDS: &[FieldRule] = &[
    FieldRule::Text("heading"),
    FieldRule::Text("subheading"),
    FieldRule::Group("payment", OFFERING_FIELDS),
    FieldRule::Group("bridging", OFFERING_FIELDS),
    FieldRule::Group("compliance", OFFERING_FIELDS),
];

const TEAM_MEMBER_FIELDS: &[FieldRule] = &[
    FieldRule::Text("name"),
    FieldRule::Text("role"),
    FieldRule::Text("bio"),
];

const TEAM_FIELDS: &[FieldRule] = &[
    FieldRule::Text("heading"),
    FieldRule::Text("subheading"),
    FieldRule::Group("kirill", TEAM_MEMBER_FIELDS),
    FieldRule::Text("footerNote"),
];

/// Structural shape required of a known section's document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionShape {
    Hero,
    About,
    Solutions,
    Team,
}

impl SectionShape {
    /// Seed order.
    pub const ALL: [SectionShape; 4] = [
        SectionShape::Hero,
        SectionShape::About,
        SectionShape::Solutions,
        SectionShape::Team,
    ];

    pub fn for_section(section: &SectionKey) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|shape| shape.section_name() == section.as_str())
    }

    pub fn section_name(self) -> &'static str {
        match self {
            SectionShape::Hero => "hero",
            SectionShape::About => "about",
            SectionShape::Solutions => "solutions",
            SectionShape::Team => "team",
        }
    }

    pub fn section_key(self) -> SectionKey {
        SectionKey(self.section_name().to_string())
    }

    fn fields(self) -> &'static [FieldRule] {
        match self {
            SectionShape::Hero => HERO_FIELDS,
            SectionShape::About => ABOUT_FIELDS,
            SectionShape::Solutions => SOLUTIONS_FIELDS,
            SectionShape::Team => TEAM_FIELDS,
        }
    }

    /// Checks that every required field is present with the right kind.
    /// Unlisted keys are left alone.
    pub fn check(self, doc: &ContentDocument) -> Result<(), ContractViolation> {
        check_fields(self.section_name(), doc.as_map(), self.fields(), "")
    }
}

fn check_fields(
    section: &'static str,
    map: &Map<String, Value>,
    fields: &'static [FieldRule],
    prefix: &str,
) -> Result<(), ContractViolation> {
    for rule in fields {
        match rule {
            FieldRule::Text(name) => match map.get(*name) {
                Some(Value::String(_)) => {}
                Some(_) => {
                    return Err(ContractViolation::InvalidShape {
                        section,
                        field: format!("{prefix}{name}"),
                        reason: "must be a string",
                    })
                }
                None => {
                    return Err(ContractViolation::InvalidShape {
                        section,
                        field: format!("{prefix}{name}"),
                        reason: "is required",
                    })
                }
            },
            FieldRule::Group(name, nested) => match map.get(*name) {
                Some(Value::Object(inner)) => {
                    check_fields(section, inner, nested, &format!("{prefix}{name}."))?
                }
                Some(_) => {
                    return Err(ContractViolation::InvalidShape {
                        section,
                        field: format!("{prefix}{name}"),
                        reason: "must be an object",
                    })
                }
                None => {
                    return Err(ContractViolation::InvalidShape {
                        section,
                        field: format!("{prefix}{name}"),
                        reason: "is required",
                    })
                }
            },
        }
    }
    Ok(())
}
