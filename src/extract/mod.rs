//! Record extraction and schema inference
//!
//! # Overview
//!
//! - `extract_array` pulls the record array out of a JSON response envelope
//!   by dotted root path. Missing or wrongly shaped paths yield no records
//!   rather than an error.
//! - `infer_schema` derives an `EntityStructure` from the first record of a
//!   page. An empty structure means the schema is unknown.

mod extractor;
mod types;

pub use extractor::{extract_array, infer_schema, lookup_path, lookup_string, lookup_u64};
pub use types::{EntityStructure, FieldDescriptor, FieldType};
