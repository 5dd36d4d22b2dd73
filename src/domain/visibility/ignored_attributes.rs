//! Static denylist of attribute codes never exported to flat files.
//!
//! The built-in list is data; deployments can replace it with a YAML file of
//! the form:
//!
//! ```yaml
//! ignored_attributes:
//!   - erp_id
//!   - purchase_price
//! ```

use std::collections::BTreeSet;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::Deserialize;
use thiserror::Error;

/// Internal attributes excluded from every CSV export, whatever their group.
pub const DEFAULT_IGNORED_ATTRIBUTE_CODES: [&str; 35] = [
    "erp_id",
    "erp_sync_status",
    "erp_last_sync",
    "purchase_price",
    "supplier_code",
    "supplier_name",
    "supplier_reference",
    "internal_notes",
    "internal_comment",
    "margin",
    "cost_price",
    "landed_cost",
    "buyer",
    "buyer_comment",
    "warehouse_location",
    "stock_internal",
    "reorder_level",
    "lead_time_days",
    "customs_code_internal",
    "approval_status",
    "approval_comment",
    "workflow_state",
    "data_quality_score",
    "import_source",
    "import_batch",
    "legacy_id",
    "legacy_sku",
    "migration_flag",
    "sap_material_number",
    "sap_plant",
    "pricing_tier",
    "discount_group",
    "competitor_price",
    "price_override_reason",
    "photo_shoot_notes",
];

static BUILTIN: Lazy<IgnoredAttributes> = Lazy::new(|| {
    IgnoredAttributes::from_codes(DEFAULT_IGNORED_ATTRIBUTE_CODES.iter().map(|c| c.to_string()))
});

/// Errors raised while loading a denylist file.
#[derive(Debug, Error)]
pub enum IgnoredAttributesError {
    #[error("Failed to read ignored attributes file '{path}': {reason}")]
    Read { path: String, reason: String },

    #[error("Failed to parse ignored attributes file '{path}': {reason}")]
    Parse { path: String, reason: String },
}

#[derive(Debug, Deserialize)]
struct IgnoredAttributesFile {
    #[serde(default)]
    ignored_attributes: Vec<String>,
}

/// Set of attribute codes unconditionally removed from CSV exports.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IgnoredAttributes {
    codes: BTreeSet<String>,
}

impl IgnoredAttributes {
    /// The list shipped with the crate.
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    pub fn from_codes(codes: impl IntoIterator<Item = String>) -> Self {
        Self {
            codes: codes.into_iter().filter(|c| !c.is_empty()).collect(),
        }
    }

    /// Parses a YAML document with an `ignored_attributes` sequence.
    pub fn from_yaml_str(yaml: &str, origin: &str) -> Result<Self, IgnoredAttributesError> {
        let file: IgnoredAttributesFile =
            serde_yaml::from_str(yaml).map_err(|e| IgnoredAttributesError::Parse {
                path: origin.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self::from_codes(file.ignored_attributes))
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self, IgnoredAttributesError> {
        let content = std::fs::read_to_string(path).map_err(|e| IgnoredAttributesError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_yaml_str(&content, &path.display().to_string())
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    pub fn codes(&self) -> &BTreeSet<String> {
        &self.codes
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}
