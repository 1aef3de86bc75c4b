use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Response of `console_id.php`.
/// The list of consoles arrives wrapped in a single-element array, which is kept as-is.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ConsoleList {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub console: Option<Vec<Vec<Console>>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ConsoleList {
    pub fn consoles(&self) -> impl Iterator<Item = &Console> {
        self.console.iter().flatten().flatten()
    }

    pub fn error(&self) -> Option<&str> {
        crate::util::get_error(&self.extra)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq, Hash)]
#[serde(default)]
pub struct Console {
    #[serde(
        rename = "ID",
        deserialize_with = "crate::util::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<u32>,
    #[serde(rename = "Name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}
