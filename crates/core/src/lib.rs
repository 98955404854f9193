//! Bitmap storefront domain logic.
//!
//! Everything in this crate is I/O free: game records and the publishing
//! draft store, the Hangul-aware catalog search, validation rules and the
//! wizard state machines used by the signup, bitmap-ID and game submission
//! flows. Network access lives in `bitmap-client`.

pub mod draft;
pub mod error;
pub mod game;
pub mod hangul;
pub mod locale;
pub mod membership;
pub mod search;
pub mod types;
pub mod validation;
pub mod wizard;
