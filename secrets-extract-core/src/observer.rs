//! Hooks for observing extraction without routing through a global logger.

use secrets_extract_spec::SecretDescriptor;
use std::sync::Arc;
use tracing::{debug, info};

/// Receives extraction events. Every hook defaults to doing nothing.
///
/// Hooks are handed descriptors, keys and counts only; secret content never
/// reaches an observer.
pub trait ExtractObserver {
    /// Sync-all-keys mode is about to split a secret with `key_count` keys.
    fn sync_all_keys(&self, _descriptor: &SecretDescriptor, _key_count: usize) {}

    /// A key held a non-string value and was rendered empty.
    fn non_string_key(&self, _descriptor: &SecretDescriptor, _key: &str, _kind: &'static str) {}

    /// Extraction finished with `count` derived secrets.
    fn extracted(&self, _descriptor: &SecretDescriptor, _count: usize) {}
}

impl<O: ExtractObserver + ?Sized> ExtractObserver for &O {
    fn sync_all_keys(&self, descriptor: &SecretDescriptor, key_count: usize) {
        (**self).sync_all_keys(descriptor, key_count)
    }

    fn non_string_key(&self, descriptor: &SecretDescriptor, key: &str, kind: &'static str) {
        (**self).non_string_key(descriptor, key, kind)
    }

    fn extracted(&self, descriptor: &SecretDescriptor, count: usize) {
        (**self).extracted(descriptor, count)
    }
}

impl<O: ExtractObserver + ?Sized> ExtractObserver for Arc<O> {
    fn sync_all_keys(&self, descriptor: &SecretDescriptor, key_count: usize) {
        (**self).sync_all_keys(descriptor, key_count)
    }

    fn non_string_key(&self, descriptor: &SecretDescriptor, key: &str, kind: &'static str) {
        (**self).non_string_key(descriptor, key, kind)
    }

    fn extracted(&self, descriptor: &SecretDescriptor, count: usize) {
        (**self).extracted(descriptor, count)
    }
}

/// Forwards extraction events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ExtractObserver for TracingObserver {
    fn sync_all_keys(&self, descriptor: &SecretDescriptor, key_count: usize) {
        info!(
            object_name = %descriptor.object_name(),
            key_count,
            "sync all keys enabled for secret"
        );
    }

    fn non_string_key(&self, descriptor: &SecretDescriptor, key: &str, kind: &'static str) {
        debug!(
            object_name = %descriptor.object_name(),
            key,
            kind,
            "non-string value rendered as empty secret"
        );
    }

    fn extracted(&self, descriptor: &SecretDescriptor, count: usize) {
        debug!(
            object_name = %descriptor.object_name(),
            count,
            "extracted derived secrets"
        );
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ExtractObserver for NoopObserver {}
