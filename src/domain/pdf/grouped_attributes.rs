//! Attributes of a product sheet, bucketed by attribute group label.

use serde::{Deserialize, Serialize};

use crate::domain::catalog::Attribute;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSection {
    pub label: String,
    pub attributes: Vec<Attribute>,
}

/// Ordered groups: first-seen group order, insertion order within a group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupedAttributes(Vec<AttributeSection>);

impl GroupedAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an attribute under its group label. Re-adding a code replaces the
    /// earlier definition in place.
    pub fn push(&mut self, attribute: Attribute) {
        let label = attribute.group.label.clone();
        let section = match self.0.iter().position(|s| s.label == label) {
            Some(index) => &mut self.0[index],
            None => {
                self.0.push(AttributeSection {
                    label,
                    attributes: Vec::new(),
                });
                let last = self.0.len() - 1;
                &mut self.0[last]
            }
        };

        match section.attributes.iter().position(|a| a.code == attribute.code) {
            Some(index) => section.attributes[index] = attribute,
            None => section.attributes.push(attribute),
        }
    }

    pub fn sections(&self) -> &[AttributeSection] {
        &self.0
    }

    pub fn labels(&self) -> Vec<&str> {
        self.0.iter().map(|s| s.label.as_str()).collect()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.0
            .iter()
            .any(|s| s.attributes.iter().any(|a| a.code == code))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{AttributeGroup, AttributeType};

    fn attribute(code: &str, label: &str) -> Attribute {
        Attribute::new(code, AttributeType::Text, AttributeGroup::new(label.to_lowercase(), label))
    }

    #[test]
    fn keeps_first_seen_group_order() {
        let mut grouped = GroupedAttributes::new();
        grouped.push(attribute("size", "Technical"));
        grouped.push(attribute("name", "Marketing"));
        grouped.push(attribute("weight", "Technical"));

        assert_eq!(grouped.labels(), vec!["Technical", "Marketing"]);
        let codes: Vec<&str> = grouped.sections()[0]
            .attributes
            .iter()
            .map(|a| a.code.as_str())
            .collect();
        assert_eq!(codes, vec!["size", "weight"]);
    }

    #[test]
    fn duplicate_code_does_not_add_a_second_entry() {
        let mut grouped = GroupedAttributes::new();
        grouped.push(attribute("size", "Technical"));
        grouped.push(attribute("size", "Technical"));

        assert_eq!(grouped.sections()[0].attributes.len(), 1);
    }

    #[test]
    fn serializes_as_ordered_list() {
        let mut grouped = GroupedAttributes::new();
        grouped.push(attribute("size", "Technical"));

        let json = serde_json::to_value(&grouped).unwrap();
        assert_eq!(json[0]["label"], "Technical");
        assert_eq!(json[0]["attributes"][0]["code"], "size");
    }
}
