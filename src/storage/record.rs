// On-disk representation of the pattern collection.
//
// The alias is the key of the JSON object, so it does not appear inside the
// record itself. Entries keep the order they have in the file.

use std::fmt;

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{MapAccess, Visitor},
    ser::SerializeMap,
};

use crate::domain::{IllegalPatternError, Pattern};

/// The stored fields of one pattern, excluding its alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatternRecord {
    pub pattern: String,
    #[serde(default)]
    pub files_only: bool,
    #[serde(default)]
    pub directories_only: bool,
}

impl PatternRecord {
    /// Rebuilds the domain pattern, compiling the stored expression.
    pub fn into_pattern(self, alias: String) -> Result<Pattern, IllegalPatternError> {
        let mut pattern = Pattern::new(alias, &self.pattern)?;
        pattern.files_only = self.files_only;
        pattern.directories_only = self.directories_only;
        Ok(pattern)
    }
}

impl From<&Pattern> for PatternRecord {
    fn from(pattern: &Pattern) -> Self {
        Self {
            pattern: pattern.expression().to_string(),
            files_only: pattern.files_only,
            directories_only: pattern.directories_only,
        }
    }
}

/// Alias to record entries, in file order.
///
/// Duplicate keys are kept as separate entries so the caller can reject them.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PatternTable(pub Vec<(String, PatternRecord)>);

impl Serialize for PatternTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (alias, record) in &self.0 {
            map.serialize_entry(alias, record)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for PatternTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(TableVisitor)
    }
}

struct TableVisitor;

impl<'de> Visitor<'de> for TableVisitor {
    type Value = PatternTable;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object mapping aliases to pattern records")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or_default());
        while let Some(entry) = access.next_entry::<String, PatternRecord>()? {
            entries.push(entry);
        }
        Ok(PatternTable(entries))
    }
}
