use serde::{Deserialize, Serialize};

/// One entry of the upstream listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub title: String,
    pub url: String,
    pub points: u32,
    /// Name of the submitter.
    pub sent_by: String,
    /// Relative age as shown upstream, e.g. "3 hours ago".
    pub published: String,
    pub comments: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_the_six_listing_keys() {
        let item = Item {
            title: "Show HN: a thing".into(),
            url: "https://example.com".into(),
            points: 42,
            sent_by: "pg".into(),
            published: "1 hour ago".into(),
            comments: 7,
        };
        let value = serde_json::to_value(&item).unwrap();
        let mut keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(
            keys,
            ["comments", "points", "published", "sent_by", "title", "url"]
        );
        assert_eq!(value["points"], 42);
        assert_eq!(value["comments"], 7);
    }
}
