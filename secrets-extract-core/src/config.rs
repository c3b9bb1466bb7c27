//! Loads the list of descriptors a mount request asks for.

use secrets_extract_spec::{validate_translate, Error, ObjectType, Result, SecretDescriptor};
use std::collections::BTreeSet;
use tracing::warn;

/// Validated descriptors from one `objects` document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DescriptorSet {
    descriptors: Vec<SecretDescriptor>,
}

impl DescriptorSet {
    /// Parse a YAML (or JSON) array of objects and stamp each one with the
    /// mount directory and path translation of the request.
    pub fn from_yaml(
        objects: &str,
        mount_dir: impl Into<String>,
        translate: impl Into<String>,
    ) -> Result<Self> {
        let mount_dir = mount_dir.into();
        let translate = translate.into();
        validate_translate(&translate)?;

        let parsed: Vec<SecretDescriptor> =
            serde_yaml::from_str(objects).map_err(|err| Error::Config(err.to_string()))?;

        let descriptors = parsed
            .into_iter()
            .map(|descriptor| descriptor.with_rendering(mount_dir.clone(), translate.clone()))
            .collect();
        Self::new(descriptors)
    }

    /// Validate descriptors and reject outputs that collide on file name.
    pub fn new(descriptors: Vec<SecretDescriptor>) -> Result<Self> {
        let mut names = BTreeSet::new();
        for descriptor in &descriptors {
            descriptor.validate()?;
            claim_name(&mut names, descriptor.file_name())?;

            if descriptor.sync_all_keys() {
                if !descriptor.jmes_path().is_empty() {
                    warn!(
                        object_name = %descriptor.object_name(),
                        entries = descriptor.jmes_path().len(),
                        "jmesPath entries ignored because syncAllKeys is enabled"
                    );
                }
                continue;
            }

            for entry in descriptor.jmes_path() {
                claim_name(&mut names, descriptor.derive_for_entry(entry).file_name())?;
            }
        }
        Ok(Self { descriptors })
    }

    pub fn descriptors(&self) -> &[SecretDescriptor] {
        &self.descriptors
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SecretDescriptor> {
        self.descriptors.iter()
    }

    /// Descriptors fetched from the given store, in configured order.
    pub fn of_type(&self, object_type: ObjectType) -> impl Iterator<Item = &SecretDescriptor> {
        self.descriptors.iter().filter(move |descriptor| {
            descriptor
                .resolved_object_type()
                .map(|resolved| resolved == object_type)
                .unwrap_or(false)
        })
    }
}

impl IntoIterator for DescriptorSet {
    type Item = SecretDescriptor;
    type IntoIter = std::vec::IntoIter<SecretDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.descriptors.into_iter()
    }
}

impl<'a> IntoIterator for &'a DescriptorSet {
    type Item = &'a SecretDescriptor;
    type IntoIter = std::slice::Iter<'a, SecretDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.descriptors.iter()
    }
}

fn claim_name(names: &mut BTreeSet<String>, name: String) -> Result<()> {
    if names.contains(&name) {
        return Err(Error::DuplicateName { name });
    }
    names.insert(name);
    Ok(())
}
