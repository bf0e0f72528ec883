//! Wire-schema and column mapping for visitor records
//!
//! The visitor entity itself carries no serialization or persistence
//! metadata. This module holds the single authoritative field table
//! (version 1, which matches the storage layout) plus the recorded history
//! of wire-schema changes. Later wire versions are derived by replaying
//! that history, never declared a second time.

use chrono::{DateTime, TimeZone, Utc};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde_json::{json, Map, Value};

use crate::{
    error::{AppError, AppResult},
    models::visitor::Visitor,
};

/// SQL column type of a mapped field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Serial,
    Text,
    TimestampTz,
}

/// One entry of the field table
#[derive(Debug, Clone, Copy)]
pub struct FieldDef {
    /// Field name on [`Visitor`]
    pub field: &'static str,
    /// Column name in the `visitors` table
    pub column: &'static str,
    /// JSON key in the version-1 wire form
    pub json_key: &'static str,
    pub column_type: ColumnType,
    /// Designated primary key of the table
    pub primary_key: bool,
    /// Assigned by the database, never by the caller
    pub generated: bool,
}

const fn text(field: &'static str) -> FieldDef {
    FieldDef {
        field,
        column: field,
        json_key: field,
        column_type: ColumnType::Text,
        primary_key: false,
        generated: false,
    }
}

/// Authoritative field table. The storage layout and the version-1 wire form
/// both read directly from this list.
static VISITOR_FIELDS: [FieldDef; 10] = [
    FieldDef {
        field: "id",
        column: "id",
        json_key: "id",
        column_type: ColumnType::Serial,
        primary_key: true,
        generated: true,
    },
    text("name"),
    text("gender"),
    text("purpose"),
    text("address"),
    text("institution"),
    text("phone"),
    text("department"),
    FieldDef {
        field: "visit_date",
        column: "visit_date",
        json_key: "visit_date",
        column_type: ColumnType::TimestampTz,
        primary_key: false,
        generated: false,
    },
    FieldDef {
        field: "created_at",
        column: "created_at",
        json_key: "created_at",
        column_type: ColumnType::TimestampTz,
        primary_key: false,
        generated: true,
    },
];

/// A recorded change to the wire schema
#[derive(Debug, Clone, Copy)]
pub enum SchemaChange {
    /// The field keeps its storage column but is exposed under a new JSON key
    RenameJsonKey {
        field: &'static str,
        to: &'static str,
    },
    /// The field is no longer exposed on the wire; storage is untouched
    DropFromWire { field: &'static str },
}

/// Wire-schema version selectable by API clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SchemaVersion {
    V1,
    V2,
}

impl SchemaVersion {
    pub const CURRENT: SchemaVersion = SchemaVersion::V2;

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(SchemaVersion::V1),
            2 => Some(SchemaVersion::V2),
            _ => None,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            SchemaVersion::V1 => 1,
            SchemaVersion::V2 => 2,
        }
    }
}

/// Wire-schema migration history. Replaying every step whose target version
/// is at most the requested one on top of [`VISITOR_FIELDS`] yields that
/// version's view.
const MIGRATIONS: [(SchemaVersion, &[SchemaChange]); 1] = [(
    SchemaVersion::V2,
    &[
        SchemaChange::RenameJsonKey {
            field: "visit_date",
            to: "visitDate",
        },
        SchemaChange::DropFromWire { field: "created_at" },
    ],
)];

fn derive_view(version: SchemaVersion) -> IndexMap<&'static str, FieldDef> {
    let mut view: IndexMap<&'static str, FieldDef> =
        VISITOR_FIELDS.iter().map(|f| (f.field, *f)).collect();

    for (target, changes) in MIGRATIONS {
        if target > version {
            continue;
        }
        for change in changes {
            match *change {
                SchemaChange::RenameJsonKey { field, to } => {
                    if let Some(def) = view.get_mut(field) {
                        def.json_key = to;
                    }
                }
                SchemaChange::DropFromWire { field } => {
                    view.shift_remove(field);
                }
            }
        }
    }

    view
}

static VIEW_V1: Lazy<IndexMap<&'static str, FieldDef>> =
    Lazy::new(|| derive_view(SchemaVersion::V1));
static VIEW_V2: Lazy<IndexMap<&'static str, FieldDef>> =
    Lazy::new(|| derive_view(SchemaVersion::V2));

/// Field view of a wire-schema version, in declaration order
pub fn view(version: SchemaVersion) -> &'static IndexMap<&'static str, FieldDef> {
    match version {
        SchemaVersion::V1 => &VIEW_V1,
        SchemaVersion::V2 => &VIEW_V2,
    }
}

/// Comma-separated column list for SELECT statements
pub fn select_columns() -> String {
    VISITOR_FIELDS
        .iter()
        .map(|f| f.column)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Columns the caller provides on INSERT (everything not database-generated)
pub fn insert_columns() -> Vec<&'static str> {
    VISITOR_FIELDS
        .iter()
        .filter(|f| !f.generated)
        .map(|f| f.column)
        .collect()
}

/// The designated primary-key column
pub fn primary_key() -> &'static FieldDef {
    VISITOR_FIELDS
        .iter()
        .find(|f| f.primary_key)
        .expect("field table declares a primary key")
}

/// The zero date-time; serializes as `0001-01-01T00:00:00Z`
pub fn zero_datetime() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(1, 1, 1, 0, 0, 0).unwrap()
}

/// Encode a visitor under the given wire-schema version
pub fn encode(visitor: &Visitor, version: SchemaVersion) -> Value {
    let mut obj = Map::new();
    for def in view(version).values() {
        obj.insert(def.json_key.to_string(), field_value(visitor, def.field));
    }
    Value::Object(obj)
}

fn field_value(v: &Visitor, field: &str) -> Value {
    match field {
        "id" => json!(v.id),
        "name" => json!(v.name),
        "gender" => json!(v.gender),
        "purpose" => json!(v.purpose),
        "address" => json!(v.address),
        "institution" => json!(v.institution),
        "phone" => json!(v.phone),
        "department" => json!(v.department),
        "visit_date" => json!(v.visit_date),
        "created_at" => json!(v.created_at),
        _ => Value::Null,
    }
}

/// Decode a JSON object under the given wire-schema version. Missing fields
/// take their zero values; unknown keys are ignored.
pub fn decode(value: &Value, version: SchemaVersion) -> AppResult<Visitor> {
    let obj = value
        .as_object()
        .ok_or_else(|| AppError::Validation("Expected a JSON object".to_string()))?;

    let mut visitor = Visitor::default();
    for def in view(version).values() {
        if let Some(raw) = obj.get(def.json_key) {
            set_field(&mut visitor, def, raw)?;
        }
    }
    Ok(visitor)
}

fn set_field(visitor: &mut Visitor, def: &FieldDef, raw: &Value) -> AppResult<()> {
    fn parse<T: serde::de::DeserializeOwned>(def: &FieldDef, raw: &Value) -> AppResult<T> {
        serde_json::from_value(raw.clone())
            .map_err(|_| AppError::Validation(format!("Invalid value for {}", def.json_key)))
    }

    match def.field {
        "id" => visitor.id = parse(def, raw)?,
        "name" => visitor.name = parse(def, raw)?,
        "gender" => visitor.gender = parse(def, raw)?,
        "purpose" => visitor.purpose = parse(def, raw)?,
        "address" => visitor.address = parse(def, raw)?,
        "institution" => visitor.institution = parse(def, raw)?,
        "phone" => visitor.phone = parse(def, raw)?,
        "department" => visitor.department = parse(def, raw)?,
        "visit_date" => visitor.visit_date = parse(def, raw)?,
        "created_at" => visitor.created_at = parse(def, raw)?,
        _ => {}
    }
    Ok(())
}
