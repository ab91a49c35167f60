//! Entity mapping module
//!
//! Maps logical entity names ("tickets", "posts") to endpoint templates,
//! result root paths, and the filters each endpoint requires.
//!
//! The table is built once when a connector is constructed and is read-only
//! afterwards; request handlers share it by reference.

mod resolver;
mod types;

pub use resolver::EndpointResolver;
pub use types::EntityMapping;
