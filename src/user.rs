use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A member's rank and score, used in responses from [`crate::RetroClient::user_rank`].
///
/// The layout of this response is not documented, so anything beyond the three
/// known fields is kept in `extra`.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default, rename_all = "PascalCase")]
pub struct UserRank {
    #[serde(
        deserialize_with = "crate::util::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub score: Option<u64>,
    #[serde(
        deserialize_with = "crate::util::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub rank: Option<u64>,
    #[serde(
        deserialize_with = "crate::util::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_ranked: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserRank {
    pub fn error(&self) -> Option<&str> {
        crate::util::get_error(&self.extra)
    }
}
