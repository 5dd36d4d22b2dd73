//! Domain layer - Catalog vocabulary and the pure rules of the publishing
//! outputs. Nothing here performs I/O.

pub mod catalog;
pub mod export;
pub mod foundation;
pub mod pdf;
pub mod visibility;
