//! Splits one fetched JSON secret into derived secrets.
//!
//! Two policies apply, chosen by the descriptor's `syncAllKeys` flag:
//! - query mode evaluates every `jmesPath` entry in declared order and aborts
//!   on the first entry that fails, returning nothing;
//! - sync-all-keys mode emits one secret per top-level key in ascending key
//!   order, rendering non-string values as empty secrets instead of failing.

use crate::observer::{ExtractObserver, TracingObserver};
use crate::query::{json_kind, Query, QueryOutcome};
use secrets_extract_spec::{Error, Result, SecretDescriptor, SecretValue};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Extract derived secrets using the default [`TracingObserver`].
pub fn extract(secret: SecretValue) -> Result<Vec<SecretValue>> {
    Extractor::<TracingObserver>::default().extract(secret)
}

#[derive(Debug, Clone, Default)]
pub struct Extractor<O = TracingObserver> {
    observer: O,
}

impl<O: ExtractObserver> Extractor<O> {
    pub fn new(observer: O) -> Self {
        Self { observer }
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn extract(&self, secret: SecretValue) -> Result<Vec<SecretValue>> {
        let (value, descriptor) = secret.into_parts();
        let fields = parse_object(&value, &descriptor)?;

        let derived = if descriptor.sync_all_keys() {
            self.split_all_keys(&descriptor, fields)
        } else {
            self.run_queries(&descriptor, fields)?
        };

        self.observer.extracted(&descriptor, derived.len());
        Ok(derived)
    }

    /// Extract from several secrets, stopping at the first failure.
    pub fn extract_all<I>(&self, secrets: I) -> Result<Vec<SecretValue>>
    where
        I: IntoIterator<Item = SecretValue>,
    {
        let mut derived = Vec::new();
        for secret in secrets {
            derived.extend(self.extract(secret)?);
        }
        Ok(derived)
    }

    fn split_all_keys(
        &self,
        descriptor: &SecretDescriptor,
        fields: Map<String, Value>,
    ) -> Vec<SecretValue> {
        self.observer.sync_all_keys(descriptor, fields.len());

        let sorted: BTreeMap<String, Value> = fields.into_iter().collect();
        sorted
            .into_iter()
            .map(|(key, value)| {
                let bytes = match value {
                    Value::String(text) => text.into_bytes(),
                    other => {
                        self.observer
                            .non_string_key(descriptor, &key, json_kind(&other));
                        Vec::new()
                    }
                };
                SecretValue::new(bytes, descriptor.derive_for_key(&key))
            })
            .collect()
    }

    fn run_queries(
        &self,
        descriptor: &SecretDescriptor,
        fields: Map<String, Value>,
    ) -> Result<Vec<SecretValue>> {
        let document = Value::Object(fields);
        let mut derived = Vec::with_capacity(descriptor.jmes_path().len());

        for entry in descriptor.jmes_path() {
            let query = Query::compile(&entry.path)?;
            let text = match query.evaluate(&document)? {
                QueryOutcome::Text(text) => text,
                QueryOutcome::Missing => {
                    return Err(Error::QueryNotFound {
                        path: entry.path.clone(),
                        alias: entry.object_alias.clone(),
                    })
                }
                QueryOutcome::Other(found) => {
                    return Err(Error::UnsupportedResultType {
                        path: entry.path.clone(),
                        found,
                    })
                }
            };
            derived.push(SecretValue::new(
                text.into_bytes(),
                descriptor.derive_for_entry(entry),
            ));
        }

        Ok(derived)
    }
}

fn parse_object(bytes: &[u8], descriptor: &SecretDescriptor) -> Result<Map<String, Value>> {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(fields)) => Ok(fields),
        _ => Err(Error::InvalidFormat {
            object_name: descriptor.object_name().to_string(),
        }),
    }
}
