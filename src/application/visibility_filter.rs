//! Attribute visibility filter.
//!
//! Combines the static denylist with the `notpublic` lookup and hands out the
//! policy each output applies.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::debug;

use crate::domain::catalog::{actor_is_admin, Actor, Attribute};
use crate::domain::visibility::{
    IgnoredAttributes, RoleAwareVisibility, UnconditionalVisibility, VisibilityPolicy,
    VisibilitySet,
};
use crate::ports::{AttributeVisibilityReader, RepositoryError};

#[derive(Clone)]
pub struct AttributeVisibilityFilter {
    reader: Arc<dyn AttributeVisibilityReader>,
    ignored: IgnoredAttributes,
}

impl AttributeVisibilityFilter {
    pub fn new(reader: Arc<dyn AttributeVisibilityReader>, ignored: IgnoredAttributes) -> Self {
        Self { reader, ignored }
    }

    /// Codes excluded from every CSV export regardless of group.
    pub fn static_ignored_codes(&self) -> &BTreeSet<String> {
        self.ignored.codes()
    }

    /// Codes of the `notpublic` group, whoever is asking.
    pub async fn not_public_attribute_codes(&self) -> Result<BTreeSet<String>, RepositoryError> {
        let codes = self.reader.not_public_attribute_codes().await?;
        Ok(codes.into_iter().collect())
    }

    /// Static denylist ∪ `notpublic` codes.
    pub async fn visibility_set(&self) -> Result<VisibilitySet, RepositoryError> {
        let not_public = self.reader.not_public_attribute_codes().await?;
        let set = VisibilitySet::new(&self.ignored, not_public);
        debug!(hidden = set.len(), "Computed attribute visibility set");
        Ok(set)
    }

    /// Role-blind policy of the CSV export.
    pub async fn unconditional(&self) -> Result<UnconditionalVisibility, RepositoryError> {
        Ok(UnconditionalVisibility::new(self.visibility_set().await?))
    }

    /// Role-aware policy of the product sheet, over a freshly computed
    /// visibility set.
    pub async fn role_aware(&self, actor: Option<&Actor>) -> Result<RoleAwareVisibility, RepositoryError> {
        let hidden = self.visibility_set().await?;
        Ok(RoleAwareVisibility::new(actor_is_admin(actor)).with_hidden(hidden))
    }

    pub fn is_visible(
        policy: &dyn VisibilityPolicy,
        code: &str,
        attribute: Option<&Attribute>,
        include_images: bool,
    ) -> bool {
        policy.is_visible(code, attribute, include_images)
    }

    /// Order-preserving subset of `codes` the policy lets through.
    pub fn visible_codes(policy: &dyn VisibilityPolicy, codes: &[String]) -> Vec<String> {
        codes
            .iter()
            .filter(|code| policy.is_visible(code, None, true))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryCatalog;
    use crate::domain::catalog::{AttributeGroup, AttributeType, ADMINISTRATOR_ROLE};

    fn catalog() -> Arc<InMemoryCatalog> {
        Arc::new(
            InMemoryCatalog::new()
                .with_attribute(Attribute::new(
                    "color",
                    AttributeType::SimpleSelect,
                    AttributeGroup::new("notpublic", "Not public"),
                ))
                .with_attribute(Attribute::new(
                    "size",
                    AttributeType::SimpleSelect,
                    AttributeGroup::new("technical", "Technical"),
                )),
        )
    }

    fn filter() -> AttributeVisibilityFilter {
        AttributeVisibilityFilter::new(
            catalog(),
            IgnoredAttributes::from_codes(vec!["erp_id".to_string()]),
        )
    }

    #[tokio::test]
    async fn not_public_codes_come_from_the_group_lookup() {
        let codes = filter().not_public_attribute_codes().await.unwrap();
        assert_eq!(codes.into_iter().collect::<Vec<_>>(), vec!["color"]);
    }

    #[tokio::test]
    async fn visibility_set_unions_both_sources() {
        let set = filter().visibility_set().await.unwrap();
        assert!(set.contains("color"));
        assert!(set.contains("erp_id"));
        assert!(!set.contains("size"));
    }

    #[tokio::test]
    async fn unconditional_policy_hides_not_public_even_for_admins() {
        let policy = filter().unconditional().await.unwrap();
        let codes: Vec<String> = ["color", "size", "erp_id"].iter().map(|c| c.to_string()).collect();

        assert_eq!(
            AttributeVisibilityFilter::visible_codes(&policy, &codes),
            vec!["size"]
        );
    }

    #[tokio::test]
    async fn role_aware_policy_depends_on_actor() {
        let filter = filter();
        let admin = Actor::new("julia", vec![ADMINISTRATOR_ROLE.to_string()]);
        let color = catalog().attribute("color").await.unwrap();

        let admin_policy = filter.role_aware(Some(&admin)).await.unwrap();
        let anonymous_policy = filter.role_aware(None).await.unwrap();

        assert!(AttributeVisibilityFilter::is_visible(
            &admin_policy,
            "color",
            Some(&color),
            false
        ));
        assert!(!AttributeVisibilityFilter::is_visible(
            &anonymous_policy,
            "color",
            Some(&color),
            false
        ));
    }

    #[tokio::test]
    async fn role_aware_policy_keeps_denylist_for_admins() {
        let filter = filter();
        let admin = Actor::new("julia", vec![ADMINISTRATOR_ROLE.to_string()]);
        let erp_id = Attribute::new(
            "erp_id",
            AttributeType::Text,
            AttributeGroup::new("technical", "Technical"),
        );

        let policy = filter.role_aware(Some(&admin)).await.unwrap();
        assert!(!AttributeVisibilityFilter::is_visible(&policy, "erp_id", Some(&erp_id), true));
    }
}
