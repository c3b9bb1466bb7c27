use crate::descriptor::SecretDescriptor;
use std::fmt;

/// Fixed text every formatted [`SecretValue`] renders as.
pub const REDACTED: &str = "<REDACTED>";

/// Raw secret content together with the descriptor it was fetched under.
///
/// `Debug` and `Display` never expose the bytes or the descriptor; both print
/// [`REDACTED`].
#[derive(Clone, PartialEq, Eq)]
pub struct SecretValue {
    value: Vec<u8>,
    descriptor: SecretDescriptor,
}

impl SecretValue {
    pub fn new(value: impl Into<Vec<u8>>, descriptor: SecretDescriptor) -> Self {
        Self {
            value: value.into(),
            descriptor,
        }
    }

    pub fn value(&self) -> &[u8] {
        &self.value
    }

    pub fn descriptor(&self) -> &SecretDescriptor {
        &self.descriptor
    }

    pub fn into_value(self) -> Vec<u8> {
        self.value
    }

    pub fn into_parts(self) -> (Vec<u8>, SecretDescriptor) {
        (self.value, self.descriptor)
    }
}

impl fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl fmt::Display for SecretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ObjectType;

    #[test]
    fn formatting_is_redacted() {
        let descriptor = SecretDescriptor::builder("api")
            .object_type(ObjectType::SecretsManager)
            .build()
            .unwrap();
        let secret = SecretValue::new("hunter2", descriptor);

        assert_eq!(secret.to_string(), REDACTED);
        assert_eq!(format!("{secret:?}"), REDACTED);
        assert_eq!(format!("{:#?}", vec![secret.clone()]), "[\n    <REDACTED>,\n]");
        assert_eq!(secret.value(), b"hunter2");
    }
}
