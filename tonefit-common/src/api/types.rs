//! Request/response types for the prediction and recommendation endpoints

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::color;

/// Query sent when the user gave no cosmetic preference
pub const DEFAULT_QUERY: &str = "추천해주세요";

/// Number of products requested per recommendation
pub const DEFAULT_RESULT_LIMIT: u32 = 10;

/// A recommended cosmetic product
///
/// Immutable once received; lives as long as the result set it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub brand: String,
    pub name: String,
    pub option_name: String,
    /// Numeric price, absent when the catalogue has none
    pub price: Option<f64>,
    /// Price formatted for display
    pub price_str: String,
    pub img_url: String,
    /// Shade swatch color (`#rrggbb`)
    pub shade_hex: Option<String>,
    pub product_url: String,
    /// Why this product was recommended
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Response body of `POST /recommend`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub products: Vec<Product>,
    pub total_found: u64,
    pub personal_color: String,
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Response body of `POST /predict-color`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalColorResponse {
    /// Coarse or detailed class name
    pub predicted_class: String,
    pub confidence: f64,
    pub class_probabilities: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all_probs: Option<Vec<f64>>,
    /// `reason | suggestions` free text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Parameters of a recommendation request
///
/// All parameters are carried in the query string; the request has no body.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendRequest {
    /// Color code in wire format
    pub personal_color: String,
    pub query: String,
    pub limit: u32,
    pub budget: Option<u32>,
    pub skin_type: Option<String>,
}

impl RecommendRequest {
    /// Build a request for `color` (coarse or detailed, converted to wire
    /// format here). An empty `query` is replaced by [`DEFAULT_QUERY`].
    pub fn new(color: &str, query: &str) -> Self {
        let query = if query.is_empty() { DEFAULT_QUERY } else { query };
        Self {
            personal_color: color::to_wire_format(color),
            query: query.to_string(),
            limit: DEFAULT_RESULT_LIMIT,
            budget: None,
            skin_type: None,
        }
    }

    /// Override the result count
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Restrict results to a budget (in won)
    pub fn with_budget(mut self, budget: u32) -> Self {
        self.budget = Some(budget);
        self
    }

    /// Restrict results to a skin type
    pub fn with_skin_type(mut self, skin_type: impl Into<String>) -> Self {
        self.skin_type = Some(skin_type.into());
        self
    }

    /// Query-string pairs in request order; unset filters are omitted
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("personal_color", self.personal_color.clone()),
            ("query", self.query.clone()),
            ("limit", self.limit.to_string()),
        ];
        // A zero budget means "no budget"
        if let Some(budget) = self.budget.filter(|b| *b > 0) {
            pairs.push(("budget", budget.to_string()));
        }
        if let Some(skin_type) = self.skin_type.as_ref().filter(|s| !s.is_empty()) {
            pairs.push(("skin_type", skin_type.clone()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommend_request_defaults() {
        let request = RecommendRequest::new("spring-light", "");
        assert_eq!(request.personal_color, "spring_light");
        assert_eq!(request.query, DEFAULT_QUERY);
        assert_eq!(request.limit, 10);

        let pairs = request.query_pairs();
        assert_eq!(
            pairs,
            vec![
                ("personal_color", "spring_light".to_string()),
                ("query", DEFAULT_QUERY.to_string()),
                ("limit", "10".to_string()),
            ]
        );
    }

    #[test]
    fn test_recommend_request_optional_filters() {
        let request = RecommendRequest::new("summer", "촉촉한 립")
            .with_budget(30000)
            .with_skin_type("dry");
        let pairs = request.query_pairs();
        assert_eq!(pairs[0], ("personal_color", "summer".to_string()));
        assert_eq!(pairs[1], ("query", "촉촉한 립".to_string()));
        assert_eq!(pairs[3], ("budget", "30000".to_string()));
        assert_eq!(pairs[4], ("skin_type", "dry".to_string()));

        let zero_budget = RecommendRequest::new("summer", "x").with_budget(0);
        assert_eq!(zero_budget.query_pairs().len(), 3);
    }

    #[test]
    fn test_product_nullable_fields() {
        let json = r#"{
            "id": "p-1", "brand": "B", "name": "Tint", "option_name": "01 Coral",
            "price": null, "price_str": "가격 정보 없음", "img_url": "http://img",
            "shade_hex": null, "product_url": "http://product"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.price, None);
        assert_eq!(product.shade_hex, None);
        assert_eq!(product.reason, None);
    }

    #[test]
    fn test_prediction_response_optional_fields() {
        let json = r#"{
            "predicted_class": "summer",
            "confidence": 0.91,
            "class_probabilities": {"spring": 0.03, "summer": 0.91, "autumn": 0.02, "winter": 0.04}
        }"#;
        let response: PersonalColorResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.predicted_class, "summer");
        assert_eq!(response.class_probabilities.len(), 4);
        assert!(response.all_probs.is_none());
        assert!(response.note.is_none());
    }
}
