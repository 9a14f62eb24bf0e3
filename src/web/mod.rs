//! HTTP service for disease prediction.
//!
//! This module exposes the prediction engine through a small Axum JSON API.
//!
//! ## Starting the Server
//!
//! ```text
//! # Start on default port 8080
//! symptom-solver serve
//!
//! # Custom port, all interfaces
//! symptom-solver serve --port 3000 --address 0.0.0.0
//! ```
//!
//! ## API Endpoints
//!
//! - `GET /api/prediction` - Sorted list of known symptoms: `{"symptoms": [...]}`
//! - `POST /api/prediction` - Predict from `{"symptoms": [...]}`
//! - `GET /api/symptoms` - Alias of `GET /api/prediction`

pub mod server;
