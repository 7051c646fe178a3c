use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Built-in tags, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SystemTag {
    #[serde(rename = "My Day")]
    MyDay,
    Important,
    Personal,
    All,
    Completed,
}

impl SystemTag {
    pub const ALL: [SystemTag; 5] = [
        SystemTag::MyDay,
        SystemTag::Important,
        SystemTag::Personal,
        SystemTag::All,
        SystemTag::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SystemTag::MyDay => "My Day",
            SystemTag::Important => "Important",
            SystemTag::Personal => "Personal",
            SystemTag::All => "All",
            SystemTag::Completed => "Completed",
        }
    }

    /// Exact, case-sensitive lookup; tag values are compared verbatim
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.as_str() == name)
    }

    pub fn is_system(name: &str) -> bool {
        Self::from_name(name).is_some()
    }
}

impl fmt::Display for SystemTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SystemTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| format!("'{}' is not a system tag", s))
    }
}
