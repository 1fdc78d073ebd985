//! Closed catalog of models the companion can talk to.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum ModelSelection {
    #[default]
    DeepseekR1Small,
    DeepseekR1Medium,
}

impl ModelSelection {
    /// Catalog order; also the order shown in the sidebar.
    pub const ALL: [ModelSelection; 2] = [
        ModelSelection::DeepseekR1Small,
        ModelSelection::DeepseekR1Medium,
    ];

    /// Identifier understood by the model server.
    pub fn id(self) -> &'static str {
        match self {
            ModelSelection::DeepseekR1Small => "deepseek-r1:1.5b",
            ModelSelection::DeepseekR1Medium => "deepseek-r1:3b",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|model| *model == self)
            .unwrap_or_default()
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        let len = Self::ALL.len();
        Self::ALL[(self.index() + len - 1) % len]
    }

    /// Whether a tag from `/api/tags` is this model. Tags carry the size
    /// suffix, so `deepseek-r1:latest` does not count.
    pub fn matches_installed(self, installed: &str) -> bool {
        installed == self.id()
    }

    fn known_ids() -> String {
        Self::ALL
            .iter()
            .map(|model| model.id())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ModelSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ModelSelection {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim();
        Self::ALL
            .into_iter()
            .find(|model| model.id().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                format!(
                    "unknown model '{wanted}' (expected one of: {})",
                    Self::known_ids()
                )
            })
    }
}

impl TryFrom<String> for ModelSelection {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
