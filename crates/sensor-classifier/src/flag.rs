//! Tri-state qualitative observation flag

use crate::error::InputError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Qualitative observation such as a two-wave cluster or audible crackling.
///
/// `NotSupplied` (left blank) is distinct from `Absent` (explicitly checked
/// and not observed); several rules treat them differently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Option<String>", into = "String")]
pub enum Flag {
    #[default]
    NotSupplied,
    Present,
    Absent,
}

impl Flag {
    pub fn is_present(self) -> bool {
        self == Flag::Present
    }

    pub fn is_supplied(self) -> bool {
        self != Flag::NotSupplied
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Flag::NotSupplied => "",
            Flag::Present => "present",
            Flag::Absent => "absent",
        }
    }
}

impl FromStr for Flag {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" => Ok(Flag::NotSupplied),
            "present" | "ada" | "yes" => Ok(Flag::Present),
            "absent" | "tidak ada" | "no" => Ok(Flag::Absent),
            _ => Err(InputError::UnknownFlag(s.to_string())),
        }
    }
}

impl TryFrom<String> for Flag {
    type Error = InputError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<Option<String>> for Flag {
    type Error = InputError;

    fn try_from(value: Option<String>) -> Result<Self, Self::Error> {
        value.map_or(Ok(Flag::NotSupplied), |text| text.parse())
    }
}

impl From<Flag> for String {
    fn from(flag: Flag) -> Self {
        flag.as_str().to_string()
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
