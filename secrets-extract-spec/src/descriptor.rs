use crate::error::{Error, Result};
use crate::object_type::ObjectType;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Replacement for `/` in file names when no translation is configured.
pub const DEFAULT_TRANSLATE: char = '_';

/// `translate` value that disables path translation.
pub const TRANSLATE_DISABLED: &str = "False";

const MAX_FILE_MODE: u32 = 0o777;

/// Parse an octal permission string such as `0644`.
pub fn parse_file_permission(value: &str) -> Result<u32> {
    let trimmed = value.trim();
    let mode = u32::from_str_radix(trimmed, 8).map_err(|_| Error::InvalidFilePermission {
        value: value.to_string(),
    })?;
    if trimmed.is_empty() || mode > MAX_FILE_MODE {
        return Err(Error::InvalidFilePermission {
            value: value.to_string(),
        });
    }
    Ok(mode)
}

/// Validate a `translate` rendering attribute.
pub fn validate_translate(value: &str) -> Result<()> {
    if value.is_empty() || value == TRANSLATE_DISABLED || value.chars().count() == 1 {
        return Ok(());
    }
    Err(Error::InvalidTranslate {
        value: value.to_string(),
    })
}

/// A single query to pull one value out of a JSON secret.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct JmesPathEntry {
    pub path: String,
    pub object_alias: String,
    #[cfg_attr(feature = "serde", serde(default))]
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub file_permission: Option<String>,
}

impl JmesPathEntry {
    pub fn new(path: impl Into<String>, object_alias: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            object_alias: object_alias.into(),
            file_permission: None,
        }
    }

    pub fn with_file_permission(mut self, permission: impl Into<String>) -> Self {
        self.file_permission = Some(permission.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.path.trim().is_empty() {
            return Err(Error::EmptyComponent {
                field: "jmesPath.path",
            });
        }
        if self.object_alias.trim().is_empty() {
            return Err(Error::EmptyComponent {
                field: "jmesPath.objectAlias",
            });
        }
        if let Some(permission) = &self.file_permission {
            parse_file_permission(permission)?;
        }
        Ok(())
    }
}

/// Identity and extraction configuration for a secret.
///
/// Fields are only reachable through accessors, so a descriptor cannot be
/// changed after [`SecretDescriptorBuilder::build`]. `translate` and
/// `mount_dir` come from the mount request rather than the object list and
/// are never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SecretDescriptor {
    object_name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "String::is_empty"))]
    object_alias: String,
    #[cfg_attr(feature = "serde", serde(default))]
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    object_type: Option<ObjectType>,
    #[cfg_attr(feature = "serde", serde(default))]
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    object_version: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    object_version_label: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    file_permission: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    sync_all_keys: bool,
    #[cfg_attr(feature = "serde", serde(default, rename = "jmesPath"))]
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
    jmes_path: Vec<JmesPathEntry>,
    #[cfg_attr(feature = "serde", serde(skip))]
    translate: String,
    #[cfg_attr(feature = "serde", serde(skip))]
    mount_dir: String,
}

impl SecretDescriptor {
    pub fn builder(object_name: impl Into<String>) -> SecretDescriptorBuilder {
        SecretDescriptorBuilder {
            inner: SecretDescriptor {
                object_name: object_name.into(),
                ..Default::default()
            },
        }
    }

    pub fn object_name(&self) -> &str {
        &self.object_name
    }

    pub fn object_alias(&self) -> &str {
        &self.object_alias
    }

    pub fn object_type(&self) -> Option<ObjectType> {
        self.object_type
    }

    pub fn object_version(&self) -> Option<&str> {
        self.object_version.as_deref()
    }

    pub fn object_version_label(&self) -> Option<&str> {
        self.object_version_label.as_deref()
    }

    pub fn file_permission(&self) -> Option<&str> {
        self.file_permission.as_deref()
    }

    pub fn sync_all_keys(&self) -> bool {
        self.sync_all_keys
    }

    pub fn jmes_path(&self) -> &[JmesPathEntry] {
        &self.jmes_path
    }

    pub fn translate(&self) -> &str {
        &self.translate
    }

    pub fn mount_dir(&self) -> &str {
        &self.mount_dir
    }

    /// Declared type, falling back to the service named by an ARN object name.
    pub fn resolved_object_type(&self) -> Result<ObjectType> {
        let inferred = ObjectType::from_arn(&self.object_name)?;
        match (self.object_type, inferred) {
            (Some(declared), Some(inferred)) if declared != inferred => {
                Err(Error::ObjectTypeMismatch {
                    object_name: self.object_name.clone(),
                    declared: declared.to_string(),
                    inferred: inferred.to_string(),
                })
            }
            (Some(declared), _) => Ok(declared),
            (None, Some(inferred)) => Ok(inferred),
            (None, None) => Err(Error::EmptyComponent {
                field: "objectType",
            }),
        }
    }

    /// Replacement character for `/`, or `None` when translation is off.
    pub fn translate_char(&self) -> Option<char> {
        if self.translate == TRANSLATE_DISABLED {
            return None;
        }
        Some(self.translate.chars().next().unwrap_or(DEFAULT_TRANSLATE))
    }

    /// Name of the file this secret renders to.
    pub fn file_name(&self) -> String {
        let name = if self.object_alias.is_empty() {
            &self.object_name
        } else {
            &self.object_alias
        };
        match self.translate_char() {
            Some(replacement) => name.replace('/', &replacement.to_string()),
            None => name.clone(),
        }
    }

    pub fn mount_path(&self) -> PathBuf {
        Path::new(&self.mount_dir).join(self.file_name())
    }

    /// Stamp the mount request attributes onto a descriptor read from config.
    pub fn with_rendering(
        mut self,
        mount_dir: impl Into<String>,
        translate: impl Into<String>,
    ) -> Self {
        self.mount_dir = mount_dir.into();
        self.translate = translate.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.object_name.trim().is_empty() {
            return Err(Error::EmptyComponent {
                field: "objectName",
            });
        }
        self.resolved_object_type()?;
        validate_translate(&self.translate)?;
        if let Some(permission) = &self.file_permission {
            parse_file_permission(permission)?;
        }
        for entry in &self.jmes_path {
            entry.validate()?;
        }
        Ok(())
    }

    /// Descriptor for the value selected by one query entry.
    pub fn derive_for_entry(&self, entry: &JmesPathEntry) -> SecretDescriptor {
        let mut derived = self.derive(&entry.object_alias);
        if entry.file_permission.is_some() {
            derived.file_permission = entry.file_permission.clone();
        }
        derived
    }

    /// Descriptor for one top-level key in sync-all-keys mode.
    pub fn derive_for_key(&self, key: &str) -> SecretDescriptor {
        self.derive(key)
    }

    fn derive(&self, alias: &str) -> SecretDescriptor {
        SecretDescriptor {
            object_name: self.object_name.clone(),
            object_alias: alias.to_string(),
            object_type: self.object_type,
            object_version: None,
            object_version_label: None,
            file_permission: self.file_permission.clone(),
            sync_all_keys: false,
            jmes_path: Vec::new(),
            translate: self.translate.clone(),
            mount_dir: self.mount_dir.clone(),
        }
    }
}

/// Builder for [`SecretDescriptor`]; `build` validates.
#[derive(Debug, Clone)]
pub struct SecretDescriptorBuilder {
    inner: SecretDescriptor,
}

impl SecretDescriptorBuilder {
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.inner.object_alias = alias.into();
        self
    }

    pub fn object_type(mut self, object_type: ObjectType) -> Self {
        self.inner.object_type = Some(object_type);
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.inner.object_version = Some(version.into());
        self
    }

    pub fn version_label(mut self, label: impl Into<String>) -> Self {
        self.inner.object_version_label = Some(label.into());
        self
    }

    pub fn file_permission(mut self, permission: impl Into<String>) -> Self {
        self.inner.file_permission = Some(permission.into());
        self
    }

    pub fn sync_all_keys(mut self, enabled: bool) -> Self {
        self.inner.sync_all_keys = enabled;
        self
    }

    pub fn jmes_path(mut self, entry: JmesPathEntry) -> Self {
        self.inner.jmes_path.push(entry);
        self
    }

    pub fn translate(mut self, translate: impl Into<String>) -> Self {
        self.inner.translate = translate.into();
        self
    }

    pub fn mount_dir(mut self, mount_dir: impl Into<String>) -> Self {
        self.inner.mount_dir = mount_dir.into();
        self
    }

    pub fn build(self) -> Result<SecretDescriptor> {
        self.inner.validate()?;
        Ok(self.inner)
    }
}
