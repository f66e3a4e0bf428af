use serde::{Deserialize, Serialize};

use super::new_id;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    #[serde(default = "new_id")]
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// ISO-8601 date; listings sort on the raw string
    pub date: String,
    #[serde(default)]
    pub likes: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn negative_likes_are_rejected() {
        let bad = serde_json::from_value::<BlogPost>(json!({
            "title": "t", "excerpt": "e", "content": "c", "date": "2024-01-01", "likes": -1
        }));
        assert!(bad.is_err());
    }

    #[test]
    fn likes_default_to_zero() {
        let post: BlogPost = serde_json::from_value(json!({
            "title": "t", "excerpt": "e", "content": "c", "date": "2024-01-01"
        }))
        .unwrap();
        assert_eq!(post.likes, 0);
        assert!(!post.id.is_empty());
    }
}
