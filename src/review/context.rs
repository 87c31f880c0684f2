//! Order context handed to the review screen by navigation.
//!
//! The navigation parameter has the shape
//! `{ "productData": { "shopDetail": { "id_shop" }, "products": [...] } }`.
//! The shop id is required; a `products` value that is not an array is
//! tolerated and reads as an empty order.

use serde_json::Value;

use crate::api::ReviewError;

/// One product line of the order being reviewed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderProduct {
    /// Cart line identifier (`_id`); used as the review's order reference.
    pub id: Option<String>,
    /// Product name.
    pub product_name: Option<String>,
    /// Short product description.
    pub short_description: Option<String>,
    /// First product photo URL.
    pub photo: Option<String>,
    /// Line subtotal as displayed by the storefront.
    pub subtotal: Option<String>,
}

impl OrderProduct {
    /// Product line with only an identifier.
    #[must_use]
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    fn from_value(value: &Value) -> Self {
        let product = value.get("id_product");
        let text = |key: &str| {
            product
                .and_then(|p| p.get(key))
                .and_then(Value::as_str)
                .map(ToOwned::to_owned)
        };

        Self {
            id: value.get("_id").and_then(scalar_to_string),
            product_name: text("product_name"),
            short_description: text("short_description"),
            photo: product
                .and_then(|p| p.get("product_photo"))
                .and_then(Value::as_array)
                .and_then(|photos| photos.first())
                .and_then(Value::as_str)
                .map(ToOwned::to_owned),
            subtotal: value.get("cart_subtotal").and_then(scalar_to_string),
        }
    }
}

/// Immutable identifiers and products the review refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewContext {
    shop_id: String,
    products: Vec<OrderProduct>,
}

impl ReviewContext {
    /// Creates a context from already-parsed parts.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::InvalidContext`] when `shop_id` is blank.
    pub fn new(shop_id: impl Into<String>, products: Vec<OrderProduct>) -> Result<Self, ReviewError> {
        let id: String = shop_id.into();
        if id.trim().is_empty() {
            return Err(invalid("productData.shopDetail.id_shop is blank"));
        }
        Ok(Self {
            shop_id: id,
            products,
        })
    }

    /// Context with no shop and no products, for a screen started without
    /// navigation input. It can never produce a payload.
    pub(crate) const fn unconfigured() -> Self {
        Self {
            shop_id: String::new(),
            products: Vec::new(),
        }
    }

    /// Parses the navigation parameter.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::InvalidContext`] when `productData` or the shop
    /// id is missing.
    pub fn from_navigation(params: &Value) -> Result<Self, ReviewError> {
        let product_data = params
            .get("productData")
            .ok_or_else(|| invalid("productData is missing"))?;

        let shop_id = product_data
            .get("shopDetail")
            .and_then(|detail| detail.get("id_shop"))
            .and_then(scalar_to_string)
            .ok_or_else(|| invalid("productData.shopDetail.id_shop is missing"))?;

        let products = match product_data.get("products") {
            Some(Value::Array(items)) => items.iter().map(OrderProduct::from_value).collect(),
            _ => Vec::new(),
        };

        Self::new(shop_id, products)
    }

    /// Parses the navigation parameter from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::InvalidContext`] for malformed JSON or a
    /// parameter [`Self::from_navigation`] rejects.
    pub fn from_json_str(json: &str) -> Result<Self, ReviewError> {
        let params: Value = serde_json::from_str(json)
            .map_err(|error| invalid(&format!("navigation parameter is not JSON: {error}")))?;
        Self::from_navigation(&params)
    }

    /// Identifier of the reviewed shop.
    #[must_use]
    pub const fn shop_id(&self) -> &str {
        self.shop_id.as_str()
    }

    /// Products of the order.
    #[must_use]
    pub fn products(&self) -> &[OrderProduct] {
        &self.products
    }

    /// Number of products shown in the order header.
    #[must_use]
    pub const fn product_count(&self) -> usize {
        self.products.len()
    }

    /// Order reference sent with the review.
    ///
    /// Only the first product line is referenced, even for multi-product
    /// orders ([`OrderReferencePolicy::FirstProduct`]).
    #[must_use]
    pub fn order_reference(&self) -> Option<&str> {
        OrderReferencePolicy::FirstProduct.resolve(&self.products)
    }
}

/// How the review's `orderId` is derived from the order's products.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrderReferencePolicy {
    /// Use the `_id` of the first product line.
    #[default]
    FirstProduct,
}

impl OrderReferencePolicy {
    /// Picks the order reference from `products`.
    #[must_use]
    pub fn resolve(self, products: &[OrderProduct]) -> Option<&str> {
        match self {
            Self::FirstProduct => products
                .first()
                .and_then(|product| product.id.as_deref())
                .filter(|id| !id.is_empty()),
        }
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn invalid(message: &str) -> ReviewError {
    ReviewError::InvalidContext {
        message: message.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::{OrderProduct, ReviewContext};
    use crate::api::ReviewError;

    #[test]
    fn parses_shop_and_products() {
        let params = json!({
            "productData": {
                "shopDetail": { "id_shop": "shop-1" },
                "products": [
                    {
                        "_id": "cart-1",
                        "id_product": {
                            "product_name": "Mango",
                            "short_description": "Ripe",
                            "product_photo": ["https://cdn/mango.png", "https://cdn/2.png"]
                        },
                        "cart_subtotal": 120000
                    },
                    { "_id": "cart-2", "id_product": { "product_name": "Kiwi" } }
                ]
            }
        });

        let context = ReviewContext::from_navigation(&params).expect("context should parse");

        assert_eq!(context.shop_id(), "shop-1");
        assert_eq!(context.product_count(), 2);
        assert_eq!(context.order_reference(), Some("cart-1"));
        let first = context.products().first().expect("first product");
        assert_eq!(first.product_name.as_deref(), Some("Mango"));
        assert_eq!(first.photo.as_deref(), Some("https://cdn/mango.png"));
        assert_eq!(first.subtotal.as_deref(), Some("120000"));
    }

    #[rstest]
    #[case::object(json!({ "_id": "cart-1" }))]
    #[case::string(json!("cart-1"))]
    #[case::null(json!(null))]
    fn non_array_products_count_as_zero(#[case] products: serde_json::Value) {
        let params = json!({
            "productData": { "shopDetail": { "id_shop": 42 }, "products": products }
        });

        let context = ReviewContext::from_navigation(&params).expect("context should parse");

        assert_eq!(context.product_count(), 0);
        assert_eq!(context.shop_id(), "42");
        assert_eq!(context.order_reference(), None);
    }

    #[test]
    fn missing_products_key_counts_as_zero() {
        let params = json!({ "productData": { "shopDetail": { "id_shop": "s" } } });

        let context = ReviewContext::from_navigation(&params).expect("context should parse");

        assert_eq!(context.product_count(), 0);
    }

    #[rstest]
    #[case::no_product_data(json!({}))]
    #[case::no_shop_detail(json!({ "productData": { "products": [] } }))]
    #[case::blank_shop(json!({ "productData": { "shopDetail": { "id_shop": "" } } }))]
    fn missing_shop_id_is_rejected(#[case] params: serde_json::Value) {
        let result = ReviewContext::from_navigation(&params);

        assert!(
            matches!(result, Err(ReviewError::InvalidContext { .. })),
            "expected InvalidContext, got {result:?}"
        );
    }

    #[test]
    fn first_product_without_id_has_no_reference() {
        let context = ReviewContext::new(
            "shop-1",
            vec![OrderProduct::default(), OrderProduct::with_id("cart-2")],
        )
        .expect("context should build");

        assert_eq!(context.order_reference(), None);
    }

    #[test]
    fn malformed_json_is_rejected() {
        let result = ReviewContext::from_json_str("{ not json");

        assert!(matches!(result, Err(ReviewError::InvalidContext { .. })));
    }
}
