//! Visibility policies.
//!
//! The PDF sheet and the CSV export deliberately apply different rules:
//!
//! - [`RoleAwareVisibility`] (PDF): denylisted codes are never shown,
//!   administrators still see `notpublic` attributes, unknown attributes are
//!   never shown and images only when asked.
//! - [`UnconditionalVisibility`] (CSV): role-blind, hides every code of the
//!   [`VisibilitySet`].
//!
//! Call sites pick one explicitly.

use crate::domain::catalog::Attribute;

use super::VisibilitySet;

/// Decides whether an attribute may appear in an output.
pub trait VisibilityPolicy {
    /// `attribute` is `None` when no definition exists for `code`.
    fn is_visible(&self, code: &str, attribute: Option<&Attribute>, include_images: bool) -> bool;
}

/// Policy of the product PDF sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleAwareVisibility {
    actor_is_admin: bool,
    hidden: VisibilitySet,
}

impl RoleAwareVisibility {
    pub fn new(actor_is_admin: bool) -> Self {
        Self {
            actor_is_admin,
            hidden: VisibilitySet::default(),
        }
    }

    /// Hidden codes of the render: denylisted ones are dropped for every
    /// actor, `notpublic` ones for non-administrators.
    pub fn with_hidden(mut self, hidden: VisibilitySet) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn actor_is_admin(&self) -> bool {
        self.actor_is_admin
    }
}

impl VisibilityPolicy for RoleAwareVisibility {
    fn is_visible(&self, code: &str, attribute: Option<&Attribute>, include_images: bool) -> bool {
        let Some(attribute) = attribute else {
            return false;
        };

        if self.hidden.is_ignored(code) {
            return false;
        }
        if !include_images && attribute.is_image() {
            return false;
        }

        let not_public = attribute.group.is_not_public() || self.hidden.is_not_public(code);
        self.actor_is_admin || !not_public
    }
}

/// Policy of the CSV export. Only the code matters; definitions and the
/// media flag are handled by header generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnconditionalVisibility {
    hidden: VisibilitySet,
}

impl UnconditionalVisibility {
    pub fn new(hidden: VisibilitySet) -> Self {
        Self { hidden }
    }

    pub fn hidden(&self) -> &VisibilitySet {
        &self.hidden
    }
}

impl VisibilityPolicy for UnconditionalVisibility {
    fn is_visible(&self, code: &str, _attribute: Option<&Attribute>, _include_images: bool) -> bool {
        !self.hidden.contains(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{AttributeGroup, AttributeType};

    fn attribute(code: &str, attribute_type: AttributeType, group: &str) -> Attribute {
        Attribute::new(code, attribute_type, AttributeGroup::new(group, group))
    }

    #[test]
    fn role_aware_hides_unknown_attributes() {
        let policy = RoleAwareVisibility::new(true);
        assert!(!policy.is_visible("ghost", None, true));
    }

    #[test]
    fn role_aware_hides_images_unless_included() {
        let policy = RoleAwareVisibility::new(false);
        let image = attribute("packshot", AttributeType::Image, "media");

        assert!(!policy.is_visible("packshot", Some(&image), false));
        assert!(policy.is_visible("packshot", Some(&image), true));
    }

    #[test]
    fn role_aware_hides_not_public_for_non_admin_only() {
        let color = attribute("color", AttributeType::SimpleSelect, "notpublic");

        assert!(!RoleAwareVisibility::new(false).is_visible("color", Some(&color), false));
        assert!(RoleAwareVisibility::new(true).is_visible("color", Some(&color), false));
    }

    #[test]
    fn role_aware_hides_denylisted_codes_for_every_role() {
        let hidden = VisibilitySet::from_codes(vec!["purchase_price".to_string()]);
        let price = attribute("purchase_price", AttributeType::Number, "marketing");

        for admin in [true, false] {
            let policy = RoleAwareVisibility::new(admin).with_hidden(hidden.clone());
            assert!(!policy.is_visible("purchase_price", Some(&price), true));
        }
    }

    #[test]
    fn role_aware_honors_not_public_codes_of_the_set() {
        let hidden = VisibilitySet::new(
            &crate::domain::visibility::IgnoredAttributes::default(),
            vec!["cost".to_string()],
        );
        let cost = attribute("cost", AttributeType::Number, "marketing");

        assert!(!RoleAwareVisibility::new(false)
            .with_hidden(hidden.clone())
            .is_visible("cost", Some(&cost), false));
        assert!(RoleAwareVisibility::new(true)
            .with_hidden(hidden)
            .is_visible("cost", Some(&cost), false));
    }

    #[test]
    fn unconditional_ignores_role_and_definition() {
        let policy = UnconditionalVisibility::new(VisibilitySet::from_codes(vec![
            "color".to_string(),
        ]));
        let color = attribute("color", AttributeType::SimpleSelect, "marketing");

        assert!(!policy.is_visible("color", Some(&color), true));
        assert!(policy.is_visible("size", None, false));
    }
}
