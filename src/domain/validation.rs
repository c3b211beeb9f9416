use serde::{Deserialize, Serialize};
use std::fmt;

/// License key value reported by a validator whose license has lapsed.
pub const EXPIRED_LICENSE_KEY: &str = "EXPIRED";

/// How thoroughly a validator should check a frequent-flyer number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    #[default]
    Quick,
    Detailed,
}

impl ValidationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationMode::Quick => "quick",
            ValidationMode::Detailed => "detailed",
        }
    }
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// License held by a validator service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    #[serde(default)]
    pub license_key: Option<String>,
}

impl License {
    pub fn new(license_key: impl Into<String>) -> Self {
        License {
            license_key: Some(license_key.into()),
        }
    }

    /// Only the exact key `EXPIRED` counts; a missing key is still valid.
    pub fn is_expired(&self) -> bool {
        self.license_key.as_deref() == Some(EXPIRED_LICENSE_KEY)
    }
}

/// Metadata a validator service reports about itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInformation {
    pub license: License,
}

impl ServiceInformation {
    pub fn with_license_key(license_key: Option<String>) -> Self {
        ServiceInformation {
            license: License { license_key },
        }
    }
}
