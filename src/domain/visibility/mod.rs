//! Visibility module - Which attributes may leave the PIM, and for whom.

mod ignored_attributes;
mod policy;
mod visibility_set;

pub use ignored_attributes::{
    IgnoredAttributes, IgnoredAttributesError, DEFAULT_IGNORED_ATTRIBUTE_CODES,
};
pub use policy::{RoleAwareVisibility, UnconditionalVisibility, VisibilityPolicy};
pub use visibility_set::VisibilitySet;
