//! # flatfields
//!
//! Flattens an arbitrary, possibly cyclic, record value into a single-level
//! mapping from dotted path names to leaf values - ready to attach as
//! structured log fields.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! extract   → Extractor facade + recursive field walker
//!   ↓
//! tag       → annotation mini-language, output-name resolution
//! visited   → per-call cycle guard over shared locations
//!   ↓
//! value     → Value/Record/Field graph, Kind, FieldMap
//! error     → ExtractError
//! ```
//!
//! ## Example
//!
//! ```
//! use flatfields::{Extractor, Record, Value};
//!
//! let order = Record::new()
//!     .tagged("Id", r#"json:"id""#, "order-1234")
//!     .field("Total", 42i64);
//!
//! let fields = Extractor::new()
//!     .extract_fields(&Value::Record(order))
//!     .unwrap();
//!
//! assert_eq!(fields["id"], Value::from("order-1234"));
//! assert_eq!(fields["Total"], Value::Int(42));
//! ```
//!
//! Nested records flatten into dot-joined paths (`customer.address.line1`);
//! shared references are walked once per extraction call, so
//! self-referential graphs terminate with the back-edge silently omitted.

/// Error types: ExtractError
pub mod error;

/// Extraction: Extractor facade, builder, recursive walker
pub mod extract;

/// Annotation mini-language: key precedence, exclusion marker
pub mod tag;

/// Dynamic value graph: Value, Record, Field, Kind
pub mod value;

/// Per-call cycle guard
mod visited;

// Re-export the public surface
pub use error::ExtractError;
pub use extract::{Extractor, ExtractorBuilder};
pub use tag::TagResolution;
pub use value::{Field, FieldMap, Kind, Record, SharedValue, Value};
