//! Storefront - session and account management for the handmade storefront
//!
//! The heart of the crate is [`SessionStore`]: it keeps the bearer token and
//! cached user record in durable [`storage`], answers "is anyone signed in",
//! and tells any number of decoupled observers when that changes. The
//! [`api`] client talks to the remote auth API; the [`cli`] is one consumer
//! of both.

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod storage;

pub use api::ApiClient;
pub use auth::{SessionEvent, SessionStore, User};
pub use config::Config;
pub use error::Error;
