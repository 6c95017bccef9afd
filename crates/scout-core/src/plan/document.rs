use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use utoipa::ToSchema;

use super::PlanError;

/// Ordered section title → body mapping.
///
/// Keys keep the order in which they were first inserted. Re-inserting an
/// existing title replaces its body without moving it. On the wire this is a
/// plain JSON object whose keys appear in that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sections {
    entries: Vec<(String, String)>,
}

impl Sections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, title: &str) -> Option<&str> {
        self.position(title).map(|i| self.entries[i].1.as_str())
    }

    pub fn contains(&self, title: &str) -> bool {
        self.position(title).is_some()
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(t, _)| t.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(t, b)| (t.as_str(), b.as_str()))
    }

    /// Insert or overwrite. An existing title keeps its position.
    pub(crate) fn upsert(&mut self, title: &str, body: String) {
        match self.position(title) {
            Some(i) => self.entries[i].1 = body,
            None => self.entries.push((title.to_owned(), body)),
        }
    }

    /// Replace the body of an existing title, returning the previous body.
    /// Unknown titles are left alone and yield `None`.
    pub fn replace(&mut self, title: &str, body: String) -> Option<String> {
        let i = self.position(title)?;
        Some(std::mem::replace(&mut self.entries[i].1, body))
    }

    fn position(&self, title: &str) -> Option<usize> {
        self.entries.iter().position(|(t, _)| t == title)
    }
}

impl Serialize for Sections {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (title, body) in &self.entries {
            map.serialize_entry(title, body)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Sections {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SectionsVisitor;

        impl<'de> Visitor<'de> for SectionsVisitor {
            type Value = Sections;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of section title to section body")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Sections, A::Error> {
                let mut sections = Sections::new();
                while let Some((title, body)) = access.next_entry::<String, String>()? {
                    sections.upsert(&title, body);
                }
                Ok(sections)
            }
        }

        deserializer.deserialize_map(SectionsVisitor)
    }
}

/// One generated account plan.
///
/// `full_text` is the model output exactly as returned. `sections` is what
/// the parser recognised in it; when it is empty the plan can only be shown
/// as full text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlanDocument {
    pub full_text: String,
    #[schema(value_type = std::collections::HashMap<String, String>)]
    pub sections: Sections,
}

impl PlanDocument {
    /// A plan with no recognised sections.
    pub fn full_text_only(full_text: impl Into<String>) -> Self {
        Self {
            full_text: full_text.into(),
            sections: Sections::new(),
        }
    }

    pub fn is_full_text_only(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn section(&self, title: &str) -> Option<&str> {
        self.sections.get(title)
    }

    /// Merge the body returned by a section update back into the plan.
    ///
    /// Only the named section changes; `full_text` stays the original model
    /// output. The new body is stored as-is.
    pub fn apply_section_update(
        &mut self,
        section_name: &str,
        updated_content: impl Into<String>,
    ) -> Result<(), PlanError> {
        self.sections
            .replace(section_name, updated_content.into())
            .map(|_| ())
            .ok_or_else(|| PlanError::UnknownSection(section_name.to_owned()))
    }
}
