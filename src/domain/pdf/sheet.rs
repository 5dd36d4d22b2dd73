//! Selection rules of the product sheet: which attributes are listed, which
//! images are shown.

use std::collections::HashMap;

use crate::domain::catalog::{Attribute, Product};
use crate::domain::visibility::VisibilityPolicy;

use super::GroupedAttributes;

/// Most images shown on one sheet.
pub const MAX_IMAGES: usize = 5;

/// Attribute code rendered as the sheet's short description.
pub const SHORT_DESCRIPTION_CODE: &str = "short_description";

/// Attribute code rendered as the sheet's long description.
pub const LONG_DESCRIPTION_CODE: &str = "description";

/// Groups the visible, non-image attributes of `codes` by group label,
/// skipping the codes in `excluded` and codes with no definition.
pub fn group_attributes(
    codes: &[String],
    definitions: &HashMap<String, Attribute>,
    excluded: &[&str],
    policy: &dyn VisibilityPolicy,
) -> GroupedAttributes {
    let mut grouped = GroupedAttributes::new();

    for code in codes {
        let Some(attribute) = definitions.get(code) else {
            continue;
        };
        if excluded.contains(&attribute.code.as_str()) {
            continue;
        }
        if policy.is_visible(code, Some(attribute), false) {
            grouped.push(attribute.clone());
        }
    }

    grouped
}

/// Definition of `code` if it is among the product's codes.
pub fn find_attribute<'a>(
    code: &str,
    codes: &[String],
    definitions: &'a HashMap<String, Attribute>,
) -> Option<&'a Attribute> {
    codes
        .iter()
        .filter(|c| c.as_str() == code)
        .find_map(|c| definitions.get(c))
}

/// Storage keys of up to [`MAX_IMAGES`] visible image values, scanning the
/// product's used attribute codes in order.
pub fn collect_image_paths(
    product: &Product,
    definitions: &HashMap<String, Attribute>,
    locale: &str,
    scope: &str,
    policy: &dyn VisibilityPolicy,
) -> Vec<String> {
    let mut image_paths = Vec::new();

    for code in product.used_attribute_codes() {
        if image_paths.len() >= MAX_IMAGES {
            break;
        }

        let attribute = definitions.get(&code);
        if !policy.is_visible(&code, attribute, true) {
            continue;
        }
        let Some(attribute) = attribute.filter(|a| a.is_image()) else {
            continue;
        };

        let value = product.get_value(
            &attribute.code,
            attribute.localizable.then_some(locale),
            attribute.scopable.then_some(scope),
        );

        if let Some(media) = value.and_then(|v| v.data.as_media()) {
            if !media.key.is_empty() {
                image_paths.push(media.key.clone());
            }
        }
    }

    image_paths
}
