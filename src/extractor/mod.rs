//! Remote extractor service client and record parser.
//!
//! An extractor is an opaque endpoint on the extraction service that
//! returns the latest scraped run as newline-delimited JSON. `http`
//! fetches a run; `parse` flattens its nested records into the flat rows
//! the pipeline works on.

pub mod http;
pub mod parse;

pub use http::ExtractorClient;
pub use parse::parse_records;
