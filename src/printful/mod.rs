//! Printful Client Module
//!
//! Typed access to the Printful catalog, order, tax and shipping endpoints.
//!
//! API Documentation: https://developers.printful.com/docs/

mod client;
pub mod models;
pub mod rules;

pub use client::{PrintfulClient, MIN_API_KEY_LEN};
