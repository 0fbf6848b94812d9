//! Client for the Shopify Admin REST API.

use std::collections::HashMap;

use base64::prelude::*;
use serde_json::{json, Value};

use crate::clients::{HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse};
use crate::config::{ApiVersion, ShopifyConfig};
use crate::document::{Document, DocumentExt};
use crate::error::{Result, SyncError};
use crate::shopify::metafield::{key_metafields, metafield_values, wire_value, Metafield};
use crate::shopify::product::{split_product_update, variants_by_id};

/// Result of writing a single metafield.
///
/// Metafield writes happen after the product write has already landed, so a
/// rejected write is reported here instead of failing the whole update.
#[derive(Clone, Debug, PartialEq)]
pub enum MetafieldWrite {
    /// A new metafield was created; holds Shopify's echo of it.
    Created(Document),
    /// An existing metafield was updated; holds Shopify's echo of it.
    Updated(Document),
    /// Shopify rejected the write.
    Failed {
        /// HTTP status of the reply.
        status: u16,
        /// The raw reply text.
        body_text: String,
    },
    /// The write could not be completed, e.g. the existing metafields could
    /// not be listed or no reply arrived.
    Error {
        /// Display form of the underlying [`SyncError`].
        message: String,
    },
}

impl MetafieldWrite {
    /// Returns `true` unless the write failed.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        !matches!(self, Self::Failed { .. } | Self::Error { .. })
    }
}

/// Outcome of [`ShopifyClient::set_product_attributes`].
#[derive(Clone, Debug, PartialEq)]
pub struct ProductUpdateReport {
    /// The product as returned by the update.
    pub product: Document,
    /// One entry per top-level metafield in the update, in key order.
    pub metafields: Vec<(String, MetafieldWrite)>,
}

impl ProductUpdateReport {
    /// Returns `true` when every metafield write succeeded.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.metafields.iter().all(|(_, write)| write.is_success())
    }

    /// Returns the keys whose metafield write failed.
    #[must_use]
    pub fn failed_metafields(&self) -> Vec<&str> {
        self.metafields
            .iter()
            .filter(|(_, write)| !write.is_success())
            .map(|(key, _)| key.as_str())
            .collect()
    }
}

/// Adapter for Shopify products, variants and metafields.
///
/// Requests use Basic auth with the private app's API key and password, and
/// go to `/admin/api/{version}` on the shop (or on the configured API host).
///
/// [`get_product`](Self::get_product) returns products in the keyed shape:
///
/// ```text
/// {id, title, body_html, ...,
///  variants:   {variant_id -> {..., metafields: {key -> value}}},
///  metafields: {key -> value}}
/// ```
///
/// and [`set_product_attributes`](Self::set_product_attributes) accepts
/// partial updates in the same shape.
///
/// # Thread Safety
///
/// `ShopifyClient` is `Send + Sync`, making it safe to share across async
/// tasks.
///
/// # Example
///
/// ```rust,ignore
/// use shopify_ebay_sync::{ApiKey, ApiPassword, ShopDomain, ShopifyConfig};
/// use shopify_ebay_sync::shopify::ShopifyClient;
/// use serde_json::json;
///
/// let config = ShopifyConfig::builder()
///     .shop(ShopDomain::new("glitchlab")?)
///     .api_key(ApiKey::new("key")?)
///     .api_password(ApiPassword::new("password")?)
///     .build()?;
/// let client = ShopifyClient::new(config)?;
///
/// let product = client.get_product(632910392).await?;
/// let report = client
///     .set_product_attributes(632910392, &json!({"metafields": {"color": "red"}}))
///     .await?;
/// assert!(report.is_complete());
/// ```
#[derive(Debug)]
pub struct ShopifyClient {
    http_client: HttpClient,
    config: ShopifyConfig,
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ShopifyClient>();
};

impl ShopifyClient {
    /// Creates a client for the configured shop.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Http`] if the HTTP client cannot be built.
    pub fn new(config: ShopifyConfig) -> Result<Self> {
        let api_version = config.api_version();
        if api_version.is_deprecated() {
            tracing::warn!(
                "Shopify API version {} is deprecated; the minimum supported version is {}",
                api_version,
                ApiVersion::minimum_supported()
            );
        }

        let credentials = format!("{}:{}", config.api_key().as_ref(), config.api_password().as_ref());
        let http_client = HttpClient::new(
            config.base_uri(),
            format!("/admin/api/{api_version}"),
            config.user_agent_prefix(),
        )?
        .with_default_header(
            "Authorization",
            format!("Basic {}", BASE64_STANDARD.encode(credentials)),
        );

        Ok(Self {
            http_client,
            config,
        })
    }

    /// Returns the configuration this client was built with.
    #[must_use]
    pub const fn config(&self) -> &ShopifyConfig {
        &self.config
    }

    /// Fetches a product with its variants and all their metafields.
    ///
    /// Product metafields and each variant's metafields are fetched with
    /// separate requests and stitched in as `key -> value` maps.
    ///
    /// # Errors
    ///
    /// [`SyncError::ItemNotFound`] when the product does not exist.
    pub async fn get_product(&self, product_id: u64) -> Result<Document> {
        let id = product_id.to_string();
        let response = self.send(HttpMethod::Get, product_path(product_id), None).await?;
        let status = response.code;
        let mut body = read_json(response, "Product", &id)?;

        let Some(mut product) = body.take_field("product") else {
            return Err(SyncError::UnexpectedRemoteError { status, raw: body });
        };

        let metafields = self.get_metafields(product_id, None).await?;

        let variants = match product.take_field("variants") {
            Some(Value::Array(variants)) => variants,
            _ => Vec::new(),
        };
        let mut keyed_variants = variants_by_id(variants);
        for (variant_id, variant) in &mut keyed_variants {
            let Ok(variant_id) = variant_id.parse::<u64>() else {
                tracing::warn!(
                    product_id = product_id,
                    variant_id = %variant_id,
                    "variant id is not numeric, skipping its metafields"
                );
                continue;
            };
            let variant_metafields = self.get_metafields(product_id, Some(variant_id)).await?;
            if let Some(fields) = variant.as_object_mut() {
                fields.insert(
                    "metafields".to_string(),
                    Value::Object(metafield_values(&variant_metafields)),
                );
            }
        }

        if let Some(fields) = product.as_object_mut() {
            fields.insert("variants".to_string(), Value::Object(keyed_variants));
            fields.insert(
                "metafields".to_string(),
                Value::Object(metafield_values(&metafields)),
            );
        }

        tracing::debug!(product_id = product_id, "fetched Shopify product");
        Ok(product)
    }

    /// Applies a partial update to a product.
    ///
    /// A `variants` map is expanded into Shopify's variant list, with each
    /// variant's `metafields` map sent inline. Top-level `metafields` are
    /// written one key at a time with [`set_metafield`](Self::set_metafield)
    /// once the product update has succeeded; their outcomes are collected in
    /// the report and never fail the call.
    ///
    /// # Errors
    ///
    /// Only failures of the product update itself propagate.
    pub async fn set_product_attributes(
        &self,
        product_id: u64,
        partial: &Document,
    ) -> Result<ProductUpdateReport> {
        let (mut body, metafields) = split_product_update(partial, self.config.metafield_namespace());
        if let Some(fields) = body.as_object_mut() {
            fields.insert("id".to_string(), Value::from(product_id));
        }

        tracing::info!(product_id = product_id, "updating Shopify product");
        let response = self
            .send(
                HttpMethod::Put,
                product_path(product_id),
                Some(json!({ "product": body })),
            )
            .await?;
        let mut reply = read_json(response, "Product", &product_id.to_string())?;
        let product = reply.take_field("product").unwrap_or(reply);

        let mut writes = Vec::new();
        for (key, value) in metafields.unwrap_or_default() {
            let write = match self.set_metafield(product_id, &key, &value, None).await {
                Ok(write) => write,
                Err(error) => {
                    tracing::error!(
                        product_id = product_id,
                        key = %key,
                        error = %error,
                        "metafield write failed after product update"
                    );
                    MetafieldWrite::Error {
                        message: error.to_string(),
                    }
                }
            };
            writes.push((key, write));
        }

        Ok(ProductUpdateReport {
            product,
            metafields: writes,
        })
    }

    /// Creates or updates one metafield on a product or one of its variants.
    ///
    /// Existing metafields are looked up by key first. A match is updated by
    /// its remote id with the new value only, so it keeps its stored type;
    /// otherwise a metafield is created with an inferred type in the
    /// configured namespace.
    ///
    /// # Errors
    ///
    /// Failures listing the existing metafields propagate. A rejected write
    /// is returned as [`MetafieldWrite::Failed`].
    pub async fn set_metafield(
        &self,
        product_id: u64,
        key: &str,
        value: &Value,
        variant_id: Option<u64>,
    ) -> Result<MetafieldWrite> {
        let existing = self.get_metafields(product_id, variant_id).await?;
        let scope = metafields_scope(product_id, variant_id);

        let (response, created) = match existing.get(key).and_then(|metafield| metafield.id) {
            Some(metafield_id) => {
                let body = json!({"metafield": {"id": metafield_id, "value": wire_value(value)}});
                let path = format!("{scope}/metafields/{metafield_id}.json");
                (self.send(HttpMethod::Put, path, Some(body)).await?, false)
            }
            None => {
                let metafield = Metafield::for_create(key, value, self.config.metafield_namespace());
                let body = json!({ "metafield": metafield });
                let path = format!("{scope}/metafields.json");
                (self.send(HttpMethod::Post, path, Some(body)).await?, true)
            }
        };

        if !response.is_ok() {
            tracing::error!(
                product_id = product_id,
                variant_id = ?variant_id,
                key = %key,
                status = response.code,
                body = %response.text,
                "Shopify rejected metafield write"
            );
            return Ok(MetafieldWrite::Failed {
                status: response.code,
                body_text: response.text,
            });
        }

        tracing::info!(
            product_id = product_id,
            variant_id = ?variant_id,
            key = %key,
            "wrote Shopify metafield"
        );
        let echo = response
            .body
            .and_then(|mut body| body.take_field("metafield"))
            .unwrap_or_else(|| json!({}));
        Ok(if created {
            MetafieldWrite::Created(echo)
        } else {
            MetafieldWrite::Updated(echo)
        })
    }

    /// Lists the metafields of a product, or of one of its variants, keyed
    /// by metafield key.
    ///
    /// # Errors
    ///
    /// [`SyncError::ItemNotFound`] when the product or variant does not
    /// exist.
    pub async fn get_metafields(
        &self,
        product_id: u64,
        variant_id: Option<u64>,
    ) -> Result<HashMap<String, Metafield>> {
        let path = format!("{}/metafields.json", metafields_scope(product_id, variant_id));
        let response = self.send(HttpMethod::Get, path, None).await?;
        let status = response.code;
        let owner = variant_id.map_or_else(|| product_id.to_string(), |id| id.to_string());
        let resource = if variant_id.is_some() { "Variant" } else { "Product" };
        let mut body = read_json(response, resource, &owner)?;

        let listing = match body.take_field("metafields") {
            Some(listing) => listing,
            None => return Err(SyncError::UnexpectedRemoteError { status, raw: body }),
        };
        let metafields: Vec<Metafield> = serde_json::from_value(listing.clone())
            .map_err(|_| SyncError::UnexpectedRemoteError { status, raw: listing })?;

        Ok(key_metafields(metafields, self.config.metafield_namespace()))
    }

    async fn send(
        &self,
        method: HttpMethod,
        path: String,
        body: Option<Value>,
    ) -> Result<HttpResponse> {
        let mut builder = HttpRequest::builder(method, path);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let request = builder.build().map_err(HttpError::from)?;
        let response = self.http_client.request(request).await?;

        if let Some(limit) = response.api_call_limit() {
            if limit.is_nearly_exhausted() {
                tracing::warn!(
                    used = limit.request_count,
                    max = limit.bucket_size,
                    "Shopify API call limit nearly exhausted"
                );
            }
        }
        if let Some(reason) = response.deprecation_reason() {
            tracing::warn!(reason = %reason, "Shopify reported a deprecated API call");
        }

        Ok(response)
    }
}

/// Reads a Shopify reply as JSON, mapping error statuses onto [`SyncError`].
fn read_json(response: HttpResponse, resource: &'static str, id: &str) -> Result<Document> {
    let status = response.code;
    let succeeded = response.is_ok();

    let Some(body) = response.body else {
        tracing::error!(status = status, body = %response.text, "Shopify reply is not JSON");
        return Err(SyncError::TransportFailure {
            status,
            body: response.text,
        });
    };

    if !succeeded {
        let error = SyncError::from_shopify_response(status, &body, resource, id);
        tracing::warn!(status = status, error = %error, "Shopify request failed");
        return Err(error);
    }

    Ok(body)
}

fn product_path(product_id: u64) -> String {
    format!("products/{product_id}.json")
}

fn metafields_scope(product_id: u64, variant_id: Option<u64>) -> String {
    match variant_id {
        Some(variant_id) => format!("products/{product_id}/variants/{variant_id}"),
        None => format!("products/{product_id}"),
    }
}
