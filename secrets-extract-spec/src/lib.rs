//! Descriptor model for splitting a fetched JSON secret into derived secrets.

pub mod descriptor;
pub mod error;
pub mod object_type;
pub mod value;

pub use descriptor::{
    parse_file_permission, validate_translate, JmesPathEntry, SecretDescriptor,
    SecretDescriptorBuilder, DEFAULT_TRANSLATE, TRANSLATE_DISABLED,
};
pub use error::{Error, Result};
pub use object_type::ObjectType;
pub use value::{SecretValue, REDACTED};

pub mod prelude {
    pub use crate::{Error, JmesPathEntry, ObjectType, Result, SecretDescriptor, SecretValue};
}
