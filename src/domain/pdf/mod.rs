//! PDF module - Content selection and template parameters of the product
//! sheet.

mod grouped_attributes;
mod render_options;
mod sheet;

pub use grouped_attributes::{AttributeSection, GroupedAttributes};
pub use render_options::{RenderContext, RenderParameters, PDF_FORMAT, THUMBNAIL_FILTER};
pub use sheet::{
    collect_image_paths, find_attribute, group_attributes, LONG_DESCRIPTION_CODE, MAX_IMAGES,
    SHORT_DESCRIPTION_CODE,
};
