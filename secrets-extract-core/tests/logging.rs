use secrets_extract_core::{
    extract, Extractor, JmesPathEntry, ObjectType, SecretDescriptor, SecretValue, TracingObserver,
};
use std::io;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl io::Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn captured<F: FnOnce()>(run: F) -> String {
    let capture = Capture::default();
    let writer = capture.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, run);
    capture.contents()
}

#[test]
fn sync_all_keys_logs_identity_without_values() {
    let descriptor = SecretDescriptor::builder("team/api")
        .object_type(ObjectType::SecretsManager)
        .sync_all_keys(true)
        .build()
        .unwrap();
    let secret = SecretValue::new(
        r#"{"token":"tok-9f8e7d","retries":3}"#,
        descriptor,
    );

    let logs = captured(|| {
        let derived = extract(secret).unwrap();
        assert_eq!(derived.len(), 2);
    });

    assert!(logs.contains("sync all keys enabled"), "{logs}");
    assert!(logs.contains("team/api"), "{logs}");
    assert!(logs.contains("retries"), "{logs}");
    assert!(!logs.contains("tok-9f8e7d"), "{logs}");
}

#[test]
fn formatting_derived_secrets_is_redacted() {
    let descriptor = SecretDescriptor::builder("team/api")
        .object_type(ObjectType::SecretsManager)
        .jmes_path(JmesPathEntry::new("token", "token"))
        .build()
        .unwrap();
    let secret = SecretValue::new(r#"{"token":"tok-9f8e7d"}"#, descriptor);

    let logs = captured(|| {
        let derived = Extractor::new(TracingObserver).extract(secret).unwrap();
        tracing::info!(?derived, first = %derived[0], "derived secrets");
    });

    assert!(logs.contains("<REDACTED>"), "{logs}");
    assert!(!logs.contains("tok-9f8e7d"), "{logs}");
}
