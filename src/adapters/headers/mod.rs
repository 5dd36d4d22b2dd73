//! Header adapters - `HeaderGenerator` implementations.

mod repository_header_generator;

pub use repository_header_generator::RepositoryHeaderGenerator;
