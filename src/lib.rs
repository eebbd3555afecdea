//! Printful Client
//!
//! Async SDK for the Printful print-on-demand fulfillment API. Requests are
//! authenticated with a store API key, write payloads are checked against
//! presence rules before anything leaves the process, and every non-200
//! response becomes a typed error.
//!
//! ```no_run
//! use printful_client::PrintfulClient;
//!
//! # async fn run() -> printful_client::PrintfulResult<()> {
//! let client = PrintfulClient::new("<32+ character store key>", "https://api.printful.com/")?;
//! for product in client.get_products().await? {
//!     println!("{} {:?}", product.id, product.display_name());
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod http_client;
pub mod printful;
pub mod validation;

// Re-export commonly used types
pub use self::config::Settings;
pub use error::{PrintfulError, PrintfulResult};
pub use http_client::{HttpTransport, Method, Transport, TransportRequest, TransportResponse};
pub use printful::models::{
    Order, OrderRequest, Product, ProductDetail, Recipient, ShippingRate, ShippingRateRequest,
    TaxRate, TaxRecipient, Variant,
};
pub use printful::PrintfulClient;
pub use validation::{validate, Rule, RuleSet, Violations};
