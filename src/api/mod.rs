//! Remote auth API

mod client;

pub use client::ApiClient;
