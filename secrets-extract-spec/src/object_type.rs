use crate::error::{Error, Result};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const ARN_PREFIX: &str = "arn:";

/// Store a secret is fetched from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ObjectType {
    SecretsManager,
    SsmParameter,
}

impl ObjectType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SecretsManager => "secretsmanager",
            Self::SsmParameter => "ssmparameter",
        }
    }

    /// Infer the type from an ARN style object name.
    ///
    /// Returns `Ok(None)` when the name is not an ARN.
    pub fn from_arn(name: &str) -> Result<Option<Self>> {
        if !name.starts_with(ARN_PREFIX) {
            return Ok(None);
        }

        // arn:<partition>:<service>:<region>:<account>:<resource>
        let service = name.split(':').nth(2).unwrap_or_default();
        match service {
            "secretsmanager" => Ok(Some(Self::SecretsManager)),
            "ssm" => Ok(Some(Self::SsmParameter)),
            other => Err(Error::InvalidObjectType {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObjectType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let value = s.trim().to_ascii_lowercase();
        match value.as_str() {
            "secretsmanager" => Ok(Self::SecretsManager),
            "ssmparameter" => Ok(Self::SsmParameter),
            _ => Err(Error::InvalidObjectType {
                value: s.to_string(),
            }),
        }
    }
}
