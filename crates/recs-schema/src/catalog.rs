//! # Record Catalogs
//!
//! Loads record type declarations from YAML or JSON documents and resolves
//! them into [`RecordType`]s.
//!
//! ## Document format
//!
//! ```yaml
//! records:
//!   - name: Named
//!     doc: A base class for things with names
//!     fields:
//!       - { name: name, label: The name }
//!   - name: Animal
//!     extends: Named
//!     fields:
//!       - name: habitat
//!         label: The habitat
//!         check: { one_of: [air, land, water] }
//!       - name: weight
//!         label: The animals weight (kg)
//!         check: { range: { min: 0 } }
//! ```
//!
//! Declarations are resolved in document order, so `extends` may only name
//! a record declared earlier in the same document.
//!
//! Argument documents (the input to construction) are flat mappings of
//! field name to scalar, in YAML or JSON.

use std::fmt;
use std::path::Path;

use indexmap::IndexMap;
use recs_core::{Check, Field, SchemaDeclarationError, Value};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::record_type::RecordType;

/// Error while loading a catalog or an argument document.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The file could not be read.
    #[error("cannot read '{path}': {reason}")]
    Read {
        /// Path to the file.
        path: String,
        /// Reason the file could not be read.
        reason: String,
    },

    /// The document is not valid YAML/JSON or does not match the format.
    #[error("cannot parse '{source_name}': {reason}")]
    Parse {
        /// Path or label of the document.
        source_name: String,
        /// Parser message.
        reason: String,
    },

    /// A declaration in the document was rejected.
    #[error(transparent)]
    Declaration(#[from] SchemaDeclarationError),
}

/// A whole declaration document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogDecl {
    /// Record declarations, parents before children.
    pub records: Vec<RecordDecl>,
}

/// One record type declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecordDecl {
    /// Type name.
    pub name: String,
    /// Name of an earlier declaration to inherit fields from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
    /// Documentation for the type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    /// Own fields, in declaration order.
    #[serde(default)]
    pub fields: Vec<FieldDecl>,
}

/// One field declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDecl {
    /// Field name.
    pub name: String,
    /// Documentation label.
    pub label: String,
    /// Optional precondition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check: Option<Check>,
}

impl FieldDecl {
    fn to_field(&self) -> Field {
        let field = Field::new(self.label.clone());
        match &self.check {
            Some(check) => field.with_check(check.clone()),
            None => field,
        }
    }
}

/// A set of resolved record types, keyed by name in declaration order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    types: IndexMap<String, RecordType>,
}

impl Catalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve every declaration in order.
    ///
    /// # Errors
    ///
    /// Returns the first declaration error; no catalog is produced.
    pub fn from_decl(decl: &CatalogDecl) -> Result<Self, SchemaDeclarationError> {
        let mut catalog = Self::new();
        for record in &decl.records {
            let builder = match &record.extends {
                Some(parent) => catalog
                    .get(parent)
                    .ok_or_else(|| SchemaDeclarationError::UnknownParent {
                        record: record.name.clone(),
                        parent: parent.clone(),
                    })?
                    .extend(record.name.clone()),
                None => RecordType::builder(record.name.clone()),
            };
            let builder = match &record.doc {
                Some(doc) => builder.doc(doc.clone()),
                None => builder,
            };
            let record_type = record
                .fields
                .iter()
                .fold(builder, |b, f| b.field(f.name.clone(), f.to_field()))
                .build()?;
            catalog.insert(record_type)?;
        }
        Ok(catalog)
    }

    /// Parse and resolve a YAML declaration document.
    pub fn from_yaml_str(content: &str) -> Result<Self, CatalogError> {
        let decl: CatalogDecl =
            serde_yaml::from_str(content).map_err(|e| CatalogError::Parse {
                source_name: "<yaml>".to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self::from_decl(&decl)?)
    }

    /// Parse and resolve a JSON declaration document.
    pub fn from_json_str(content: &str) -> Result<Self, CatalogError> {
        let decl: CatalogDecl =
            serde_json::from_str(content).map_err(|e| CatalogError::Parse {
                source_name: "<json>".to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self::from_decl(&decl)?)
    }

    /// Load a declaration file. `.json` files are parsed as JSON, anything
    /// else as YAML.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = read(path)?;
        let result = match extension(path) {
            "json" => Self::from_json_str(&content),
            _ => Self::from_yaml_str(&content),
        };
        let catalog = result.map_err(|e| with_source(e, path))?;
        tracing::debug!(
            path = %path.display(),
            records = catalog.len(),
            "loaded record catalog"
        );
        Ok(catalog)
    }

    /// Add a record type declared in code.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaDeclarationError::DuplicateType`] if the name is taken.
    pub fn insert(&mut self, record_type: RecordType) -> Result<(), SchemaDeclarationError> {
        if self.types.contains_key(record_type.name()) {
            return Err(SchemaDeclarationError::DuplicateType {
                record: record_type.name().to_string(),
            });
        }
        self.types
            .insert(record_type.name().to_string(), record_type);
        Ok(())
    }

    /// Look up a record type by name.
    pub fn get(&self, name: &str) -> Option<&RecordType> {
        self.types.get(name)
    }

    /// Type names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    /// Record types in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &RecordType> {
        self.types.values()
    }

    /// Number of record types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Load a flat argument document (field name to scalar) for construction.
///
/// `.json` files are parsed as JSON, anything else as YAML. The result
/// keeps document order, which only matters for error reporting. A key
/// repeated in a JSON document appears once per occurrence; YAML rejects
/// repeated keys at parse time.
///
/// # Errors
///
/// Returns [`CatalogError::Read`] or [`CatalogError::Parse`]; nested
/// collections and nulls are parse errors.
pub fn load_arguments(path: &Path) -> Result<Vec<(String, Value)>, CatalogError> {
    let content = read(path)?;
    let parsed = match extension(path) {
        "json" => parse_json_arguments(&content),
        _ => parse_yaml_arguments(&content),
    };
    parsed.map_err(|reason| CatalogError::Parse {
        source_name: path.display().to_string(),
        reason,
    })
}

/// Parse a YAML argument document.
pub fn parse_yaml_arguments(content: &str) -> Result<Vec<(String, Value)>, String> {
    let yaml: serde_yaml::Value =
        serde_yaml::from_str(content).map_err(|e| format!("invalid YAML: {e}"))?;
    let serde_yaml::Value::Mapping(map) = yaml else {
        return Err("expected a mapping of field names to values".to_string());
    };
    map.iter()
        .map(|(k, v)| {
            let key = match k {
                serde_yaml::Value::String(s) => s.clone(),
                other => return Err(format!("unsupported field name: {other:?}")),
            };
            let value = yaml_to_value(v).map_err(|e| format!("field '{key}': {e}"))?;
            Ok((key, value))
        })
        .collect()
}

/// Parse a JSON argument document.
///
/// Repeated keys are kept, so construction reports them as duplicate
/// arguments instead of silently keeping the last value.
pub fn parse_json_arguments(content: &str) -> Result<Vec<(String, Value)>, String> {
    let ArgumentEntries(entries) =
        serde_json::from_str(content).map_err(|e| format!("invalid JSON: {e}"))?;
    entries
        .into_iter()
        .map(|(key, v)| {
            let value = Value::try_from(v).map_err(|e| format!("field '{key}': {e}"))?;
            Ok((key, value))
        })
        .collect()
}

/// Top-level argument object as an ordered list of entries, repeats included.
struct ArgumentEntries(Vec<(String, serde_json::Value)>);

impl<'de> Deserialize<'de> for ArgumentEntries {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = ArgumentEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object of field names to values")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, serde_json::Value>()? {
                    entries.push(entry);
                }
                Ok(ArgumentEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

/// Convert a YAML scalar into a field value.
fn yaml_to_value(yaml: &serde_yaml::Value) -> Result<Value, String> {
    match yaml {
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Int(i))
            } else if let Some(f) = n.as_f64() {
                Ok(Value::Float(f))
            } else {
                Err(format!("unsupported YAML number: {n:?}"))
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::Text(s.clone())),
        serde_yaml::Value::Null => Err("null is not a field value".to_string()),
        serde_yaml::Value::Sequence(_) | serde_yaml::Value::Mapping(_) => {
            Err("collection values are not supported".to_string())
        }
        // Ignore YAML tags, just convert the inner value.
        serde_yaml::Value::Tagged(tagged) => yaml_to_value(&tagged.value),
    }
}

fn read(path: &Path) -> Result<String, CatalogError> {
    std::fs::read_to_string(path).map_err(|e| CatalogError::Read {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

fn extension(path: &Path) -> &str {
    path.extension().and_then(|e| e.to_str()).unwrap_or("")
}

fn with_source(err: CatalogError, path: &Path) -> CatalogError {
    match err {
        CatalogError::Parse { reason, .. } => CatalogError::Parse {
            source_name: path.display().to_string(),
            reason,
        },
        other => other,
    }
}
