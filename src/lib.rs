//! Client library for a mobile data-bundle reselling platform.
//!
//! Parses and validates purchase input (single numbers and bulk lists),
//! groups the product catalog by network, submits purchases to the remote
//! API and renders the per-agent storefront.

pub mod api;
pub mod bulk;
pub mod catalog;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod network;
pub mod output;
pub mod phone;
pub mod routes;
pub mod services;
pub mod store;
pub mod templates;
pub mod utils;

pub use error::{ApiError, BulkError, ValidationError};
pub use network::Network;
