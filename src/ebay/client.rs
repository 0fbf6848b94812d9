//! Client for the eBay Sell Inventory API.

use std::fmt;
use std::sync::Arc;

use serde_json::{json, Map, Value};

use crate::auth::TokenProvider;
use crate::clients::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
};
use crate::config::EbayConfig;
use crate::document::{merge, Document, DocumentExt};
use crate::ebay::errors::{classify_ebay_response, Outcome};
use crate::error::{Result, SyncError};

/// Path prefix of the Sell Inventory API.
pub const INVENTORY_BASE_PATH: &str = "/sell/inventory/v1";

/// Adapter for eBay inventory items, offers and inventory item groups.
///
/// eBay's PUT endpoints replace the whole resource. Every `update_*` method
/// therefore fetches the current document, merges the caller's partial update
/// into it, and sends the merged result:
///
/// ```text
/// GET old -> missing -> ItemNotFound
///         -> merge(old, partial) -> PUT
///              -> 204            -> {}
///              -> JSON body      -> classify -> body | typed error
///              -> non-JSON body  -> TransportFailure
/// ```
///
/// A bearer token is requested from the [`TokenProvider`] for every call.
/// Tokens are never refreshed here.
///
/// # Thread Safety
///
/// `EbayClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use shopify_ebay_sync::auth::{StaticTokenProvider, Token};
/// use shopify_ebay_sync::ebay::EbayClient;
/// use shopify_ebay_sync::EbayConfig;
/// use serde_json::json;
///
/// let config = EbayConfig::builder().marketplace_id("EBAY_US").build()?;
/// let tokens = Arc::new(StaticTokenProvider::new(Token::new("v^1.1#...")));
/// let client = EbayClient::new(config, tokens)?;
///
/// client
///     .update_inventory_item("LAMP-01", &json!({"condition": "USED_EXCELLENT"}))
///     .await?;
/// ```
pub struct EbayClient {
    http_client: HttpClient,
    config: EbayConfig,
    token_provider: Arc<dyn TokenProvider>,
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<EbayClient>();
};

impl fmt::Debug for EbayClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EbayClient")
            .field("http_client", &self.http_client)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl EbayClient {
    /// Creates a client for the configured eBay environment.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Http`] if the HTTP client cannot be built.
    pub fn new(config: EbayConfig, token_provider: Arc<dyn TokenProvider>) -> Result<Self> {
        let mut http_client = HttpClient::new(
            config.api_url().as_ref(),
            INVENTORY_BASE_PATH,
            config.user_agent_prefix(),
        )?;
        if let Some(marketplace_id) = config.marketplace_id() {
            http_client = http_client.with_default_header("X-EBAY-C-MARKETPLACE-ID", marketplace_id);
        }

        Ok(Self {
            http_client,
            config,
            token_provider,
        })
    }

    /// Returns the configuration this client was built with.
    #[must_use]
    pub const fn config(&self) -> &EbayConfig {
        &self.config
    }

    /// Fetches the inventory item for `sku`.
    ///
    /// # Errors
    ///
    /// [`SyncError::ItemNotFound`] when eBay has no item for the SKU, plus the
    /// usual classified and transport failures.
    pub async fn get_inventory_item(&self, sku: &str) -> Result<Document> {
        self.get(&inventory_item_path(sku)).await
    }

    /// Merges `partial` into the inventory item for `sku` and writes it back.
    ///
    /// # Errors
    ///
    /// [`SyncError::ItemNotFound`] if the item does not exist; nothing is
    /// written in that case.
    pub async fn update_inventory_item(&self, sku: &str, partial: &Document) -> Result<Document> {
        tracing::info!(sku = %sku, "updating eBay inventory item");
        self.fetch_merge_put(&inventory_item_path(sku), partial).await
    }

    /// Lists every offer for `sku`.
    ///
    /// A SKU with no offers, including one eBay answers with 404, yields an
    /// empty list.
    ///
    /// # Errors
    ///
    /// Authentication, unexpected remote and transport failures propagate.
    pub async fn get_offers(&self, sku: &str) -> Result<Vec<Document>> {
        let request = HttpRequest::builder(HttpMethod::Get, "offer").query_param("sku", sku);
        match self.send(request).await {
            Ok(mut listing) => match listing.take_field("offers") {
                Some(Value::Array(offers)) => Ok(offers),
                _ => Ok(Vec::new()),
            },
            Err(SyncError::ItemNotFound { message }) => {
                tracing::debug!(sku = %sku, message = %message, "no offers for SKU");
                Ok(Vec::new())
            }
            Err(SyncError::UnexpectedRemoteError { status: 404, raw }) => {
                tracing::debug!(sku = %sku, raw = %raw, "no offers for SKU");
                Ok(Vec::new())
            }
            Err(error) => Err(error),
        }
    }

    /// Fetches a single offer.
    ///
    /// # Errors
    ///
    /// [`SyncError::ItemNotFound`] for an unknown offer id.
    pub async fn get_offer(&self, offer_id: &str) -> Result<Document> {
        self.get(&offer_path(offer_id)).await
    }

    /// Merges `partial` into an offer and writes it back.
    ///
    /// # Errors
    ///
    /// [`SyncError::ItemNotFound`] if the offer does not exist.
    pub async fn update_offer(&self, offer_id: &str, partial: &Document) -> Result<Document> {
        tracing::info!(offer_id = %offer_id, "updating eBay offer");
        self.fetch_merge_put(&offer_path(offer_id), partial).await
    }

    /// Fetches an inventory item group.
    ///
    /// # Errors
    ///
    /// [`SyncError::ItemNotFound`] for an unknown group key.
    pub async fn get_inventory_item_group(&self, group_key: &str) -> Result<Document> {
        self.get(&inventory_item_group_path(group_key)).await
    }

    /// Merges `partial` into an inventory item group and writes it back.
    ///
    /// Variant data belongs to each variant SKU's own inventory item, so a
    /// `variants` key in `partial` is dropped before merging.
    ///
    /// # Errors
    ///
    /// [`SyncError::ItemNotFound`] if the group does not exist.
    pub async fn update_inventory_item_group(
        &self,
        group_key: &str,
        partial: &Document,
    ) -> Result<Document> {
        let mut partial = partial.clone();
        if partial.take_field("variants").is_some() {
            tracing::warn!(
                group_key = %group_key,
                "ignoring 'variants' in group update; update each variant SKU instead"
            );
        }

        tracing::info!(group_key = %group_key, "updating eBay inventory item group");
        self.fetch_merge_put(&inventory_item_group_path(group_key), &partial)
            .await
    }

    /// Looks up a product by SKU, falling back to an inventory item group.
    ///
    /// If `sku` has no inventory item it is retried as a group key. When the
    /// group lists `variantSKUs`, each variant's inventory item is fetched and
    /// attached under `variants`, keyed by the variant document's own `sku`.
    /// Variants without a `sku` field are skipped.
    ///
    /// # Errors
    ///
    /// [`SyncError::ItemNotFound`] when neither an item nor a group exists,
    /// or when a listed variant SKU cannot be fetched.
    pub async fn get_ebay_product(&self, sku: &str) -> Result<Document> {
        match self.get_inventory_item(sku).await {
            Err(SyncError::ItemNotFound { .. }) => {
                tracing::debug!(sku = %sku, "no inventory item, trying inventory item group");
            }
            other => return other,
        }

        let mut group = self.get_inventory_item_group(sku).await?;

        let variant_skus: Vec<String> = group
            .get("variantSKUs")
            .and_then(Value::as_array)
            .map(|skus| {
                skus.iter()
                    .filter_map(Value::as_str)
                    .map(ToString::to_string)
                    .collect()
            })
            .unwrap_or_default();
        if variant_skus.is_empty() {
            return Ok(group);
        }

        let mut variants = Map::new();
        for variant_sku in &variant_skus {
            let variant = self.get_inventory_item(variant_sku).await?;
            match variant.str_field("sku").map(ToString::to_string) {
                Some(own_sku) => {
                    variants.insert(own_sku, variant);
                }
                None => {
                    tracing::warn!(
                        group_key = %sku,
                        variant_sku = %variant_sku,
                        "variant inventory item has no 'sku' field, skipping"
                    );
                }
            }
        }

        if let Some(fields) = group.as_object_mut() {
            fields.insert("variants".to_string(), Value::Object(variants));
        }
        Ok(group)
    }

    async fn get(&self, path: &str) -> Result<Document> {
        self.send(HttpRequest::builder(HttpMethod::Get, path)).await
    }

    async fn fetch_merge_put(&self, path: &str, partial: &Document) -> Result<Document> {
        let mut document = self.get(path).await?;
        merge(&mut document, partial)?;

        let request = HttpRequest::builder(HttpMethod::Put, path)
            .json(document)
            .header("Content-Language", self.config.content_language());
        self.send(request).await
    }

    async fn send(&self, request: HttpRequestBuilder) -> Result<Document> {
        let token = self.token_provider.get_token()?;
        if token.is_expired() {
            tracing::warn!(
                expires_at = ?token.expires_at,
                "eBay access token has expired; sending it anyway"
            );
        }

        let request = request
            .header("Authorization", token.authorization_header())
            .build()
            .map_err(HttpError::from)?;
        let path = request.path.clone();
        let response = self.http_client.request(request).await?;
        interpret(&path, response)
    }
}

/// Turns an eBay reply into a document or a typed failure.
fn interpret(path: &str, response: HttpResponse) -> Result<Document> {
    let status = response.code;
    let succeeded = response.is_ok();
    if response.is_no_content() {
        return Ok(json!({}));
    }

    let Some(body) = response.body else {
        tracing::error!(
            path = %path,
            status = status,
            body = %response.text,
            "eBay reply is not JSON"
        );
        return Err(SyncError::TransportFailure {
            status,
            body: response.text,
        });
    };

    let outcome = match classify_ebay_response(status, &body) {
        Outcome::Ok if succeeded => Outcome::Ok,
        Outcome::Ok if status == 404 => Outcome::ItemNotFound(format!("{path}: {body}")),
        Outcome::Ok => Outcome::UnexpectedRemoteError(body.clone()),
        outcome => outcome,
    };

    if let Outcome::UnexpectedRemoteError(raw) = &outcome {
        tracing::error!(path = %path, status = status, raw = %raw, "unexpected eBay error");
    }
    outcome.into_result(status).map(|()| body)
}

fn inventory_item_path(sku: &str) -> String {
    format!("inventory_item/{}", urlencoding::encode(sku))
}

fn offer_path(offer_id: &str) -> String {
    format!("offer/{}", urlencoding::encode(offer_id))
}

fn inventory_item_group_path(group_key: &str) -> String {
    format!("inventory_item_group/{}", urlencoding::encode(group_key))
}
