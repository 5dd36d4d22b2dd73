//! Product families.

use serde::{Deserialize, Serialize};

/// A named set of attribute codes a product of that family may carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Family {
    pub code: String,
    #[serde(default)]
    pub attribute_codes: Vec<String>,
}

impl Family {
    pub fn new(code: impl Into<String>, attribute_codes: Vec<String>) -> Self {
        Self {
            code: code.into(),
            attribute_codes,
        }
    }
}
