//! Label schemas: a group-scoped tag with a name and display color, in each
//! shape it takes between client, API, and storage.
//!
//! ```text
//! LabelCreate --with_group_id--> LabelSave --with_id--> LabelUpdate
//!                                                        |-> LabelSummary
//!                                                        '-> LabelOut
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::error::{Result, ValidationError};
use crate::pagination::PaginationBase;
use crate::schema::{self, Searchable};

pub const DEFAULT_LABEL_COLOR: &str = "#E0E0E0";

/// Client request body for creating a label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct LabelCreate {
    pub name: String,
    pub color: String,
}

impl LabelCreate {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(ValidationError::EmptyField { field: "name" });
        }
        Ok(Self {
            name,
            color: DEFAULT_LABEL_COLOR.to_string(),
        })
    }

    pub fn with_color(self, color: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            ..self
        }
    }

    pub fn from_json(value: &Value) -> Result<Self> {
        parse_create(value).inspect_err(|e| debug!("rejected label create: {e}"))
    }

    /// Attach the owning group. The id comes from the authenticated
    /// session, never from the request body.
    pub fn with_group_id(self, group_id: &str) -> Result<LabelSave> {
        let group_id = schema::parse_uuid4("group_id", group_id)
            .inspect_err(|e| debug!("rejected label group: {e}"))?;
        Ok(self.attach_group(group_id))
    }

    pub fn with_group(self, group_id: Uuid) -> Result<LabelSave> {
        let group_id = schema::ensure_uuid4("group_id", group_id)
            .inspect_err(|e| debug!("rejected label group: {e}"))?;
        Ok(self.attach_group(group_id))
    }

    fn attach_group(self, group_id: Uuid) -> LabelSave {
        LabelSave {
            name: self.name,
            color: self.color,
            group_id,
        }
    }
}

fn parse_create(value: &Value) -> Result<LabelCreate> {
    let map = schema::as_object(value)?;
    Ok(LabelCreate {
        name: schema::require_non_empty_str(map, "name")?,
        color: schema::optional_str(map, "color", DEFAULT_LABEL_COLOR)?,
    })
}

impl TryFrom<Value> for LabelCreate {
    type Error = ValidationError;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_json(&value)
    }
}

/// What the storage layer receives to insert a label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct LabelSave {
    pub name: String,
    pub color: String,
    pub group_id: Uuid,
}

impl LabelSave {
    pub fn from_json(value: &Value) -> Result<Self> {
        let parsed = parse_create(value).and_then(|create| {
            let map = schema::as_object(value)?;
            let group_id = schema::require_uuid4(map, "group_id")?;
            Ok(create.attach_group(group_id))
        });
        parsed.inspect_err(|e| debug!("rejected label save: {e}"))
    }

    /// Attach the identifier storage assigned to this label.
    pub fn with_id(self, id: &str) -> Result<LabelUpdate> {
        let id = schema::parse_uuid4("id", id).inspect_err(|e| debug!("rejected label id: {e}"))?;
        Ok(self.attach_id(id))
    }

    pub fn with_uuid(self, id: Uuid) -> Result<LabelUpdate> {
        let id = schema::ensure_uuid4("id", id).inspect_err(|e| debug!("rejected label id: {e}"))?;
        Ok(self.attach_id(id))
    }

    fn attach_id(self, id: Uuid) -> LabelUpdate {
        LabelUpdate {
            name: self.name,
            color: self.color,
            group_id: self.group_id,
            id,
        }
    }
}

impl TryFrom<Value> for LabelSave {
    type Error = ValidationError;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_json(&value)
    }
}

/// What the storage layer receives to modify an existing label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct LabelUpdate {
    pub name: String,
    pub color: String,
    pub group_id: Uuid,
    pub id: Uuid,
}

impl LabelUpdate {
    pub fn from_json(value: &Value) -> Result<Self> {
        let parsed = LabelSave::from_json(value).and_then(|save| {
            let map = schema::as_object(value)?;
            let id = schema::require_uuid4(map, "id")?;
            Ok(save.attach_id(id))
        });
        parsed.inspect_err(|e| debug!("rejected label update: {e}"))
    }

    pub fn to_summary(&self) -> LabelSummary {
        LabelSummary {
            name: self.name.clone(),
            color: self.color.clone(),
            group_id: self.group_id,
            id: self.id,
        }
    }

    pub fn to_out(&self) -> LabelOut {
        LabelOut {
            name: self.name.clone(),
            color: self.color.clone(),
            group_id: self.group_id,
            id: self.id,
        }
    }
}

impl TryFrom<Value> for LabelUpdate {
    type Error = ValidationError;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_json(&value)
    }
}

/// Any stored label representation the read-back schemas can be built from.
pub trait LabelRecord {
    fn id(&self) -> Uuid;
    fn group_id(&self) -> Uuid;
    fn name(&self) -> &str;
    fn color(&self) -> &str;
}

impl LabelRecord for LabelUpdate {
    fn id(&self) -> Uuid {
        self.id
    }

    fn group_id(&self) -> Uuid {
        self.group_id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn color(&self) -> &str {
        &self.color
    }
}

// Read-back shapes check field types only: any text name, defaulted color,
// and v4 identifiers.
fn parse_stored(value: &Value) -> Result<LabelUpdate> {
    let map = schema::as_object(value)?;
    Ok(LabelUpdate {
        name: schema::require_str(map, "name")?,
        color: schema::optional_str(map, "color", DEFAULT_LABEL_COLOR)?,
        group_id: schema::require_uuid4(map, "group_id")?,
        id: schema::require_uuid4(map, "id")?,
    })
}

/// A label as it appears in list and search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct LabelSummary {
    pub name: String,
    pub color: String,
    pub group_id: Uuid,
    pub id: Uuid,
}

impl LabelSummary {
    pub fn from_record(record: &impl LabelRecord) -> Result<Self> {
        Ok(Self {
            name: record.name().to_string(),
            color: record.color().to_string(),
            group_id: schema::ensure_uuid4("group_id", record.group_id())?,
            id: schema::ensure_uuid4("id", record.id())?,
        })
    }
}

impl Searchable for LabelSummary {
    const SEARCHABLE_PROPERTIES: &'static [&'static str] = &["name"];

    fn property(&self, name: &str) -> Option<&str> {
        match name {
            "name" => Some(self.name.as_str()),
            _ => None,
        }
    }
}

impl TryFrom<Value> for LabelSummary {
    type Error = ValidationError;

    fn try_from(value: Value) -> Result<Self> {
        parse_stored(&value)
            .map(Self::from)
            .inspect_err(|e| debug!("rejected label summary: {e}"))
    }
}

impl From<LabelUpdate> for LabelSummary {
    fn from(label: LabelUpdate) -> Self {
        Self {
            name: label.name,
            color: label.color,
            group_id: label.group_id,
            id: label.id,
        }
    }
}

/// A single label returned by a fetch endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct LabelOut {
    pub name: String,
    pub color: String,
    pub group_id: Uuid,
    pub id: Uuid,
}

impl LabelOut {
    pub fn from_record(record: &impl LabelRecord) -> Result<Self> {
        Ok(Self {
            name: record.name().to_string(),
            color: record.color().to_string(),
            group_id: schema::ensure_uuid4("group_id", record.group_id())?,
            id: schema::ensure_uuid4("id", record.id())?,
        })
    }
}

impl TryFrom<Value> for LabelOut {
    type Error = ValidationError;

    fn try_from(value: Value) -> Result<Self> {
        parse_stored(&value)
            .map(Self::from)
            .inspect_err(|e| debug!("rejected label out: {e}"))
    }
}

impl From<LabelUpdate> for LabelOut {
    fn from(label: LabelUpdate) -> Self {
        Self {
            name: label.name,
            color: label.color,
            group_id: label.group_id,
            id: label.id,
        }
    }
}

pub type LabelPagination = PaginationBase<LabelSummary>;

impl PaginationBase<LabelSummary> {
    /// Page of summaries built from stored records, in record order.
    pub fn from_records<R: LabelRecord>(
        records: &[R],
        page: i64,
        per_page: i64,
        total: i64,
    ) -> Result<Self> {
        let items = records
            .iter()
            .map(|record| LabelSummary::from_record(record))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(items, page, per_page, total))
    }
}
