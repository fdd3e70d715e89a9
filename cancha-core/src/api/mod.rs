//! HTTP boundary: authenticated JSON client and envelope decoding.
//!
//! The backend is inconsistent about response shapes - the same controller
//! may return a bare array, a `{ data, success, message, errors }` envelope,
//! or a single object. All of that is decoded here, once; nothing past this
//! module branches on payload shape.

pub mod client;
pub mod payload;

pub use client::{ApiBody, ApiClient};
