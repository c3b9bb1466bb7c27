//! Extraction engine for JSON secrets.
//!
//! A fetched [`SecretValue`] whose content is a JSON object is split into
//! derived secrets, either one per configured JMESPath query or one per
//! top-level key when the descriptor enables `syncAllKeys`.

pub mod config;
pub mod extract;
pub mod observer;
pub mod query;

pub use config::DescriptorSet;
pub use extract::{extract, Extractor};
pub use observer::{ExtractObserver, NoopObserver, TracingObserver};
pub use query::{json_kind, Query, QueryOutcome};
pub use secrets_extract_spec::{
    Error, JmesPathEntry, ObjectType, Result, SecretDescriptor, SecretValue, REDACTED,
};
