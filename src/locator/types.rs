//! Declaration records and the command map built from them.

use crate::token::Token;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Kind of a declared command, determined by its declaring keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationKind {
    /// Ordinary command declared with `function`
    Routine,
    /// Long-running, checkpoint-capable command declared with `workflow`
    Orchestration,
}

impl DeclarationKind {
    /// Every declaration kind, in keyword order.
    pub const ALL: [DeclarationKind; 2] = [DeclarationKind::Routine, DeclarationKind::Orchestration];

    /// Kind declared by `token`, if it is a declaring keyword. Matching ignores case.
    pub fn from_token(token: &Token<'_>) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| token.is_keyword(kind.keyword()))
    }

    /// The keyword that declares this kind.
    pub fn keyword(self) -> &'static str {
        match self {
            DeclarationKind::Routine => "function",
            DeclarationKind::Orchestration => "workflow",
        }
    }
}

impl std::fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeclarationKind::Routine => write!(f, "routine"),
            DeclarationKind::Orchestration => write!(f, "orchestration"),
        }
    }
}

impl std::str::FromStr for DeclarationKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "routine" | "function" => Ok(DeclarationKind::Routine),
            "orchestration" | "workflow" => Ok(DeclarationKind::Orchestration),
            _ => anyhow::bail!(
                "Invalid declaration kind '{}'. Valid values: routine, orchestration",
                s
            ),
        }
    }
}

/// A single declared command and where it was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarationRecord {
    /// Command name as written after the keyword
    pub name: String,
    pub kind: DeclarationKind,
    /// Absolute path of the declaring file
    pub source_path: PathBuf,
}

impl DeclarationRecord {
    pub fn new(name: &str, kind: DeclarationKind, source_path: &Path) -> Self {
        Self {
            name: name.to_string(),
            kind,
            source_path: source_path.to_path_buf(),
        }
    }
}

/// Declared commands keyed by name.
///
/// Names compare case-insensitively, like the scripting language's own
/// command lookup; each record keeps its name as declared. Inserting a name
/// that is already present replaces the earlier record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandMap {
    entries: BTreeMap<String, DeclarationRecord>,
}

fn map_key(name: &str) -> String {
    name.to_lowercase()
}

impl CommandMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, returning the record it replaced, if any.
    pub fn insert(&mut self, record: DeclarationRecord) -> Option<DeclarationRecord> {
        self.entries.insert(map_key(&record.name), record)
    }

    pub fn get(&self, name: &str) -> Option<&DeclarationRecord> {
        self.entries.get(&map_key(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&map_key(name))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = &DeclarationRecord> {
        self.entries.values()
    }

    /// Records of one kind, ordered by name.
    pub fn of_kind(&self, kind: DeclarationKind) -> impl Iterator<Item = &DeclarationRecord> {
        self.iter().filter(move |record| record.kind == kind)
    }

    /// Keep only records of one kind.
    pub fn retain_kind(&mut self, kind: DeclarationKind) {
        self.entries.retain(|_, record| record.kind == kind);
    }
}

impl<'a> IntoIterator for &'a CommandMap {
    type Item = &'a DeclarationRecord;
    type IntoIter = std::collections::btree_map::Values<'a, String, DeclarationRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}

impl IntoIterator for CommandMap {
    type Item = DeclarationRecord;
    type IntoIter = std::collections::btree_map::IntoValues<String, DeclarationRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_values()
    }
}

impl Extend<DeclarationRecord> for CommandMap {
    fn extend<I: IntoIterator<Item = DeclarationRecord>>(&mut self, iter: I) {
        for record in iter {
            self.insert(record);
        }
    }
}

impl FromIterator<DeclarationRecord> for CommandMap {
    fn from_iter<I: IntoIterator<Item = DeclarationRecord>>(iter: I) -> Self {
        let mut map = CommandMap::new();
        map.extend(iter);
        map
    }
}

// Serialized as `{ "<declared name>": record }` rather than by lowercase key.
impl Serialize for CommandMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.values().map(|record| (&record.name, record)))
    }
}
