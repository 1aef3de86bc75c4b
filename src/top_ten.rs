use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The global top ten, as returned by `top_ten.php`.
/// Used in responses from [`crate::RetroClient::top_ten`].
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct TopTen {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top10: Option<TopTenPlaces>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TopTen {
    /// Places that were present in the response, best first.
    pub fn places(&self) -> impl Iterator<Item = &TopTenPlace> {
        self.top10
            .iter()
            .flat_map(|places| places.as_array())
            .flatten()
    }

    /// The API's `error` message, if it rejected the request.
    pub fn error(&self) -> Option<&str> {
        crate::util::get_error(&self.extra)
    }
}

/// The API sends the ranking as an object with one key per place rather than a list.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct TopTenPlaces {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_1: Option<TopTenPlace>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_2: Option<TopTenPlace>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_3: Option<TopTenPlace>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_4: Option<TopTenPlace>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_5: Option<TopTenPlace>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_6: Option<TopTenPlace>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_7: Option<TopTenPlace>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_8: Option<TopTenPlace>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_9: Option<TopTenPlace>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_10: Option<TopTenPlace>,
}

impl TopTenPlaces {
    pub fn as_array(&self) -> [Option<&TopTenPlace>; 10] {
        [
            self.place_1.as_ref(),
            self.place_2.as_ref(),
            self.place_3.as_ref(),
            self.place_4.as_ref(),
            self.place_5.as_ref(),
            self.place_6.as_ref(),
            self.place_7.as_ref(),
            self.place_8.as_ref(),
            self.place_9.as_ref(),
            self.place_10.as_ref(),
        ]
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct TopTenPlace {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(
        deserialize_with = "crate::util::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub score: Option<u64>,
    #[serde(
        deserialize_with = "crate::util::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub trueratio: Option<u64>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn places_in_rank_order() {
        let json = r#"{"top10":{
            "place_2":{"user":"Second","score":"900","trueratio":"1500"},
            "place_1":{"user":"First","score":1000,"trueratio":2000},
            "place_3":{"user":"Third"}
        }}"#;
        let top: TopTen = serde_json::from_str(json).unwrap();
        let users: Vec<_> = top.places().filter_map(|p| p.user.as_deref()).collect();
        assert_eq!(users, ["First", "Second", "Third"]);
        let places = top.top10.as_ref().unwrap();
        assert_eq!(places.place_2.as_ref().unwrap().score, Some(900));
        assert_eq!(places.place_3.as_ref().unwrap().trueratio, None);
        assert!(top.error().is_none());
    }

    #[test]
    fn empty_and_null_documents_parse() {
        let top: TopTen = serde_json::from_str("{}").unwrap();
        assert_eq!(top.places().count(), 0);

        let top: TopTen = serde_json::from_str(r#"{"top10":null}"#).unwrap();
        assert!(top.top10.is_none());
        assert_eq!(top.places().count(), 0);
    }

    #[test]
    fn serializes_back_to_the_same_document() {
        let document = json!({
            "top10": {
                "place_1": {"user": "First", "score": 1000, "trueratio": 2000},
                "place_2": {"user": "Second"}
            },
            "generated": "2023-04-10"
        });
        let top: TopTen = serde_json::from_value(document.clone()).unwrap();
        assert_eq!(top.extra.get("generated"), Some(&json!("2023-04-10")));
        assert_eq!(serde_json::to_value(&top).unwrap(), document);
    }
}
