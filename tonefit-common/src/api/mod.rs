//! Shared HTTP API types
//!
//! Request and response shapes for the two backend endpoints:
//! - `POST /predict-color` (multipart image upload)
//! - `POST /recommend` (query-string parameters, JSON response)
//!
//! This module contains ONLY plain data types and pure helpers. The HTTP
//! clients live in `tonefit-ui`.

pub mod types;

pub use types::{
    PersonalColorResponse, Product, RecommendRequest, SearchResponse, DEFAULT_QUERY,
    DEFAULT_RESULT_LIMIT,
};
