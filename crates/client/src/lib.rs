//! HTTP client and UI-facing flows for the Bitmap storefront API.
//!
//! [`api::BitmapApi`] wraps the REST endpoints. The flows in [`flows`]
//! combine it with the wizard controllers and draft store from
//! `bitmap-core` through the [`backend::StorefrontBackend`] seam.

pub mod api;
pub mod backend;
pub mod config;
pub mod error;
pub mod flows;
pub mod models;

#[cfg(test)]
pub(crate) mod fake;
