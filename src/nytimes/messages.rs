//! Most Popular API response shapes

use serde::{Deserialize, Serialize};

use crate::common::traits::{FieldMapping, ResponseShape};
use crate::common::types::Article;

/// Body of every Most Popular endpoint
///
/// Envelope fields such as `status`, `copyright` and `num_results` are
/// ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticlesResponse {
    pub results: Vec<Article>,
}

impl ResponseShape for ArticlesResponse {
    const FIELDS: &'static [FieldMapping] = &[FieldMapping::required("results", "results")];
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map, Value};

    /// Build an object containing every wire key of a shape
    fn full_object<R: ResponseShape>(sample: impl Fn(&str) -> Value) -> Map<String, Value> {
        R::FIELDS
            .iter()
            .map(|mapping| (mapping.wire.to_string(), sample(mapping.wire)))
            .collect()
    }

    fn article_sample(wire: &str) -> Value {
        match wire {
            "id" => json!(100000009876543i64),
            "title" => json!("A Title"),
            "byline" => json!("By Someone"),
            "published_date" => json!("2025-08-27"),
            "url" => json!("https://www.nytimes.com/a.html"),
            other => panic!("no sample for wire key {}", other),
        }
    }

    fn response_sample(wire: &str) -> Value {
        match wire {
            "results" => json!([Value::Object(full_object::<Article>(article_sample))]),
            other => panic!("no sample for wire key {}", other),
        }
    }

    /// Every wire key must land in its paired field, and dropping a key
    /// must fail decoding exactly when it is declared required
    fn check_mapping_table<R: ResponseShape + Serialize>(sample: impl Fn(&str) -> Value) {
        let full = full_object::<R>(&sample);
        let decoded: R = serde_json::from_value(Value::Object(full.clone()))
            .expect("full object must decode");

        let encoded = serde_json::to_value(&decoded).unwrap();
        for mapping in R::FIELDS {
            assert_eq!(
                encoded.get(mapping.field),
                Some(&sample(mapping.wire)),
                "wire key {:?} must feed field {:?}",
                mapping.wire,
                mapping.field
            );
        }

        for mapping in R::FIELDS {
            let mut partial = full.clone();
            partial.remove(mapping.wire);
            let decoded = serde_json::from_value::<R>(Value::Object(partial));
            assert_eq!(
                decoded.is_ok(),
                !mapping.required,
                "wire key {:?} -> field {:?} declared required={}",
                mapping.wire,
                mapping.field,
                mapping.required
            );
        }
    }

    #[test]
    fn test_article_mapping_table() {
        check_mapping_table::<Article>(article_sample);
    }

    #[test]
    fn test_articles_response_mapping_table() {
        check_mapping_table::<ArticlesResponse>(response_sample);
    }

    #[test]
    fn test_mapping_table_catches_swapped_fields() {
        // Same keys and optionality as Article, with the pairs crossed
        #[derive(Serialize, Deserialize)]
        struct Crossed {
            id: i64,
            title: String,
            byline: Option<String>,
            published_date: Option<String>,
            url: String,
        }

        impl ResponseShape for Crossed {
            const FIELDS: &'static [FieldMapping] = &[
                FieldMapping::required("id", "id"),
                FieldMapping::required("title", "title"),
                FieldMapping::optional("byline", "published_date"),
                FieldMapping::optional("published_date", "byline"),
                FieldMapping::required("url", "url"),
            ];
        }

        let outcome = std::panic::catch_unwind(|| check_mapping_table::<Crossed>(article_sample));
        assert!(outcome.is_err());
    }

    #[test]
    fn test_negative_id_decodes() {
        let body = r#"{"results":[{"id":-42,"title":"T","url":"http://x"}]}"#;
        let response: ArticlesResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.results[0].id, -42);
    }

    #[test]
    fn test_published_date_wire_key() {
        assert_eq!(Article::wire_key("published_date"), Some("published_date"));
        assert_eq!(ArticlesResponse::wire_key("results"), Some("results"));
        assert_eq!(Article::wire_key("missing"), None);

        let article: Article = serde_json::from_value(Value::Object(full_object::<Article>(
            article_sample,
        )))
        .unwrap();
        assert_eq!(article.published_date.as_deref(), Some("2025-08-27"));
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let body = r#"{
            "status": "OK",
            "copyright": "Copyright (c) 2025 The New York Times Company.",
            "num_results": 1,
            "results": [{
                "id": 7,
                "title": "T",
                "url": "http://x",
                "section": "World",
                "media": []
            }]
        }"#;
        let response: ArticlesResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.results.len(), 1);
        assert_eq!(response.results[0].id, 7);
    }

    #[test]
    fn test_published_date_is_not_reformatted() {
        let raw = "2025-08-27 14:03:11";
        let body = format!(
            r#"{{"results":[{{"id":1,"title":"T","url":"http://x","published_date":"{}"}}]}}"#,
            raw
        );
        let response: ArticlesResponse = serde_json::from_str(&body).unwrap();
        assert_eq!(response.results[0].published_date.as_deref(), Some(raw));

        let encoded = serde_json::to_value(&response.results[0]).unwrap();
        assert_eq!(encoded["published_date"], raw);
    }
}
