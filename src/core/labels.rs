//! Display labels for section and subsection identifiers.

use std::collections::HashMap;

/// Identifier → label lookup with fallbacks for unmapped keys.
#[derive(Debug, Clone, Default)]
pub struct LabelTable {
    sections: HashMap<String, String>,
    subsections: HashMap<String, String>,
}

impl LabelTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_section(&mut self, id: impl Into<String>, label: impl Into<String>) {
        self.sections.insert(id.into(), label.into());
    }

    pub fn set_subsection(&mut self, id: impl Into<String>, label: impl Into<String>) {
        self.subsections.insert(id.into(), label.into());
    }

    /// Apply every entry of `other` on top of this table.
    pub fn merge(&mut self, other: &LabelTable) {
        for (id, label) in &other.sections {
            self.sections.insert(id.clone(), label.clone());
        }
        for (id, label) in &other.subsections {
            self.subsections.insert(id.clone(), label.clone());
        }
    }

    /// Mapped label, or the identifier upper-cased.
    pub fn section_label(&self, id: &str) -> String {
        self.sections
            .get(id)
            .cloned()
            .unwrap_or_else(|| id.to_uppercase())
    }

    /// Mapped label, or the identifier with `-`/`_` turned into spaces and
    /// upper-cased.
    pub fn subsection_label(&self, id: &str) -> String {
        self.subsections
            .get(id)
            .cloned()
            .unwrap_or_else(|| id.replace(['-', '_'], " ").to_uppercase())
    }

    pub fn sections(&self) -> impl Iterator<Item = (&str, &str)> {
        self.sections.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn subsections(&self) -> impl Iterator<Item = (&str, &str)> {
        self.subsections.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// `"<Section>"` or `"<Section> - <Subsection>"`.
pub fn sticky_title(section_label: &str, subsection_label: Option<&str>) -> String {
    match subsection_label {
        Some(sub) => format!("{section_label} - {sub}"),
        None => section_label.to_string(),
    }
}
