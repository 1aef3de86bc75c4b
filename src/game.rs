use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Response of `game_list.php`.
/// Like [`crate::console::ConsoleList`], the entries are wrapped in a single-element array.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct GameList {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game: Option<Vec<Vec<GameListEntry>>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GameList {
    pub fn games(&self) -> impl Iterator<Item = &GameListEntry> {
        self.game.iter().flatten().flatten()
    }

    pub fn error(&self) -> Option<&str> {
        crate::util::get_error(&self.extra)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default, rename_all = "PascalCase")]
pub struct GameListEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(
        rename = "ID",
        deserialize_with = "crate::util::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<u32>,
    #[serde(
        rename = "ConsoleID",
        deserialize_with = "crate::util::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub console_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub console_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_icon: Option<String>,
    #[serde(
        deserialize_with = "crate::util::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub num_achievements: Option<u32>,
    #[serde(
        deserialize_with = "crate::util::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub num_leaderboards: Option<u32>,
    #[serde(
        deserialize_with = "crate::util::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub points: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_modified: Option<String>,
    #[serde(
        rename = "ForumTopicID",
        deserialize_with = "crate::util::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub forum_topic_id: Option<u32>,
}

/// Basic metadata for one game, from `game_info.php`.
/// Used in responses from [`crate::RetroClient::game`].
///
/// Fields not listed here end up in `extra`. When flattened into
/// [`GameInfoExtended`], `extra` holds whatever neither struct knows about.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default, rename_all = "PascalCase")]
pub struct GameInfo {
    #[serde(
        rename = "ID",
        deserialize_with = "crate::util::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(
        rename = "ForumTopicID",
        deserialize_with = "crate::util::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub forum_topic_id: Option<u32>,
    #[serde(
        rename = "ConsoleID",
        deserialize_with = "crate::util::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub console_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub console_name: Option<String>,
    #[serde(
        deserialize_with = "crate::util::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub flags: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_ingame: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_box_art: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub developer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub released: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub console: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GameInfo {
    pub fn error(&self) -> Option<&str> {
        crate::util::get_error(&self.extra)
    }
}

/// [`GameInfo`] plus player counts and the achievement set, from `game_info_extended.php`.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default, rename_all = "PascalCase")]
pub struct GameInfoExtended {
    #[serde(flatten)]
    pub info: GameInfo,
    #[serde(
        deserialize_with = "crate::util::lenient_flag",
        skip_serializing_if = "Option::is_none"
    )]
    pub is_final: Option<bool>,
    #[serde(rename = "GuideURL", skip_serializing_if = "Option::is_none")]
    pub guide_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rich_presence_patch: Option<String>,
    #[serde(
        deserialize_with = "crate::util::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub num_distinct_players_casual: Option<u32>,
    #[serde(
        deserialize_with = "crate::util::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub num_distinct_players_hardcore: Option<u32>,
    #[serde(
        deserialize_with = "crate::util::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub num_achievements: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claims: Option<Vec<Value>>,
    /// Keyed by achievement id.
    #[serde(
        deserialize_with = "crate::util::keyed_map",
        skip_serializing_if = "Option::is_none"
    )]
    pub achievements: Option<BTreeMap<String, Achievement>>,
}

impl GameInfoExtended {
    /// Achievements sorted by their display order, falling back to id.
    pub fn achievements_in_order(&self) -> Vec<&Achievement> {
        let mut list: Vec<_> = self.achievements.iter().flat_map(|m| m.values()).collect();
        list.sort_by_key(|a| (a.display_order.unwrap_or(u32::MAX), a.id.unwrap_or(u32::MAX)));
        list
    }

    pub fn error(&self) -> Option<&str> {
        self.info.error()
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default, rename_all = "PascalCase")]
pub struct Achievement {
    #[serde(
        rename = "ID",
        deserialize_with = "crate::util::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<u32>,
    #[serde(
        deserialize_with = "crate::util::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub num_awarded: Option<u32>,
    #[serde(
        deserialize_with = "crate::util::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub num_awarded_hardcore: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        deserialize_with = "crate::util::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub points: Option<u32>,
    #[serde(
        deserialize_with = "crate::util::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub true_ratio: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_modified: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge_name: Option<String>,
    #[serde(
        deserialize_with = "crate::util::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub display_order: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mem_addr: Option<String>,
}
