//! Printful API Client Implementation
//!
//! Every public operation runs the same pipeline: serialize the input,
//! check it against the endpoint's rules, send one authenticated request,
//! then unwrap the `result` field of the response envelope.
//!
//! API Docs: https://developers.printful.com/docs/

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use super::models::*;
use super::rules;
use crate::config::Settings;
use crate::error::{PrintfulError, PrintfulResult};
use crate::http_client::{HttpTransport, Method, Transport, TransportOptions, TransportRequest};
use crate::validation::{validate, RuleSet, Violations};

/// Shortest API key Printful issues
pub const MIN_API_KEY_LEN: usize = 32;

/// Printful API client
///
/// Holds only immutable credentials and the transport, so a single instance
/// can be shared across tasks (`Arc<PrintfulClient>` or `clone()`).
#[derive(Clone)]
pub struct PrintfulClient {
    /// Precomputed `Basic <base64(key)>` header value
    authorization: String,

    /// API base URL, without trailing slash
    base_url: String,

    transport: Arc<dyn Transport>,
}

impl PrintfulClient {
    /// Create a client backed by the default HTTP transport
    pub fn new(api_key: &str, base_url: &str) -> PrintfulResult<Self> {
        // Credentials are checked before any HTTP machinery is built.
        check_api_key(api_key)?;
        let transport = HttpTransport::new()?;
        Self::with_transport(api_key, base_url, Arc::new(transport))
    }

    /// Create a client that sends requests through `transport`
    pub fn with_transport(
        api_key: &str,
        base_url: &str,
        transport: Arc<dyn Transport>,
    ) -> PrintfulResult<Self> {
        check_api_key(api_key)?;
        let base_url = check_base_url(base_url)?;

        info!(base_url = %base_url, "Printful client configured");

        Ok(PrintfulClient {
            authorization: format!("Basic {}", BASE64.encode(api_key)),
            base_url,
            transport,
        })
    }

    /// Create a client from loaded settings, passing timeouts to the transport
    pub fn from_settings(settings: &Settings) -> PrintfulResult<Self> {
        check_api_key(&settings.api_key)?;

        let mut options = TransportOptions {
            timeout: Duration::from_secs(settings.timeout_secs),
            connect_timeout: Duration::from_secs(settings.connect_timeout_secs),
            ..TransportOptions::default()
        };
        if let Some(user_agent) = &settings.user_agent {
            options.user_agent = user_agent.clone();
        }

        let transport = HttpTransport::with_options(&options)?;
        Self::with_transport(&settings.api_key, &settings.base_url, Arc::new(transport))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a request without validation and return the envelope's `result`
    pub async fn request(&self, method: Method, path: &str, body: &Value) -> PrintfulResult<Value> {
        self.send(method, path, body, None).await
    }

    /// Send a request after checking `body` against `rules`
    pub async fn request_validated(
        &self,
        method: Method,
        path: &str,
        body: &Value,
        rules: &RuleSet,
    ) -> PrintfulResult<Value> {
        self.send(method, path, body, Some(rules)).await
    }

    /// List catalog products
    pub async fn get_products(&self) -> PrintfulResult<Vec<Product>> {
        self.send(Method::Get, "products", &json!({}), None).await
    }

    /// Get a product with its variants
    pub async fn get_variants(&self, product_id: i64) -> PrintfulResult<ProductDetail> {
        let path = format!("products/{}", product_id);
        self.send(Method::Get, &path, &json!({}), None).await
    }

    /// Place a new order
    pub async fn create_order<T>(&self, order: &T) -> PrintfulResult<Order>
    where
        T: Serialize + ?Sized,
    {
        let body = to_body(order)?;
        self.send(Method::Post, "orders", &body, Some(&rules::order_rules())).await
    }

    /// Look up the sales tax rate for an address
    pub async fn calculate_tax_rate<T>(&self, recipient: &T) -> PrintfulResult<TaxRate>
    where
        T: Serialize + ?Sized,
    {
        let body = json!({ "recipient": to_body(recipient)? });
        self.send(Method::Post, "tax/rates", &body, Some(&rules::tax_rate_rules())).await
    }

    /// Quote shipping options for a set of items
    pub async fn calculate_shipping_rates<T>(&self, request: &T) -> PrintfulResult<Vec<ShippingRate>>
    where
        T: Serialize + ?Sized,
    {
        let body = to_body(request)?;
        self.send(Method::Post, "shipping/rates", &body, Some(&rules::shipping_rate_rules())).await
    }

    /// Shared request pipeline
    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &Value,
        rules: Option<&RuleSet>,
    ) -> PrintfulResult<T> {
        if let Some(rules) = rules {
            let violations = validate(rules, body);
            if !violations.is_empty() {
                warn!(
                    method = %method,
                    path = %path,
                    fields = violations.len(),
                    "Printful request rejected by validation"
                );
                return Err(PrintfulError::validation(violations));
            }
        }

        let request = TransportRequest {
            method,
            url: self.url(path),
            headers: vec![("Authorization".to_string(), self.authorization.clone())],
            body: body.clone(),
        };
        debug!(method = %method, url = %request.url, "Printful API request");

        let response = self.transport.send(request).await?;

        // Only an exact 200 counts as success.
        if response.status != 200 {
            warn!(
                status = response.status,
                reason = %response.reason,
                body = %truncate(&response.body, 500),
                "Printful API returned an error"
            );
            return Err(PrintfulError::Api {
                status: response.status,
                message: response.reason,
            });
        }

        let envelope: PrintfulResponse<T> = serde_json::from_str(&response.body).map_err(|e| {
            PrintfulError::Api {
                status: response.status,
                message: format!(
                    "Invalid response envelope: {} - Body: {}",
                    e,
                    truncate(&response.body, 500)
                ),
            }
        })?;

        Ok(envelope.result)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl fmt::Debug for PrintfulClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrintfulClient")
            .field("base_url", &self.base_url)
            .field("authorization", &"<redacted>")
            .finish()
    }
}

fn check_api_key(api_key: &str) -> PrintfulResult<()> {
    if api_key.chars().count() < MIN_API_KEY_LEN {
        return Err(PrintfulError::Configuration(
            "Missing or invalid Printful store key".to_string(),
        ));
    }
    Ok(())
}

fn check_base_url(base_url: &str) -> PrintfulResult<String> {
    let parsed = Url::parse(base_url).map_err(|e| {
        PrintfulError::Configuration(format!("Invalid Printful base URL '{}': {}", base_url, e))
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(PrintfulError::Configuration(format!(
            "Unsupported scheme in Printful base URL '{}'",
            base_url
        )));
    }
    Ok(base_url.trim_end_matches('/').to_string())
}

fn to_body<T: Serialize + ?Sized>(input: &T) -> PrintfulResult<Value> {
    serde_json::to_value(input).map_err(|e| {
        let mut errors = Violations::default();
        errors.push("payload", format!("The payload could not be serialized: {}.", e));
        PrintfulError::validation(errors)
    })
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
