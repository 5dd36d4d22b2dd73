//! Catalog module - Attributes, families, products and actors as seen by
//! the publishing outputs.

mod actor;
mod attribute;
mod family;
mod product;

pub use actor::{actor_is_admin, Actor, ADMINISTRATOR_ROLE};
pub use attribute::{Attribute, AttributeGroup, AttributeType, NOT_PUBLIC_GROUP_CODE};
pub use family::Family;
pub use product::{MediaFile, Product, ProductValue, ValueData};
