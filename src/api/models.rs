//! Data models for storefront API responses.

use serde::Deserialize;
use serde_json::Value;

/// Read-only projection of a shop shown on the review screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShopSummary {
    /// Identifier of the shop (the shop owner's user id).
    pub shop_id: String,
    /// Display name of the shop, when the directory knows it.
    pub shop_name: Option<String>,
    /// Avatar image URL, when present.
    pub avatar: Option<String>,
}

impl ShopSummary {
    /// Summary used when the directory returned nothing usable.
    #[must_use]
    pub fn empty(shop_id: impl Into<String>) -> Self {
        Self {
            shop_id: shop_id.into(),
            shop_name: None,
            avatar: None,
        }
    }

    /// Shop name for display; blank when unknown.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.shop_name.as_deref().unwrap_or_default()
    }
}

/// Acknowledgement returned by the review API.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitReceipt {
    /// Server-side identifier of the stored review, if reported.
    pub review_id: Option<String>,
    /// Server message, if reported.
    pub message: Option<String>,
}

/// User record returned by `get-user-by-id`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiUser {
    #[serde(default)]
    data_user: Option<ApiShopProfile>,
}

#[derive(Debug, Clone, Deserialize)]
struct ApiShopProfile {
    #[serde(default)]
    shop_name: Option<String>,
    #[serde(default)]
    avatar_shop: Option<String>,
}

impl ApiUser {
    pub(crate) fn into_summary(self, shop_id: &str) -> ShopSummary {
        let profile = self.data_user;
        ShopSummary {
            shop_id: shop_id.to_owned(),
            shop_name: profile.as_ref().and_then(|p| p.shop_name.clone()),
            avatar: profile.and_then(|p| p.avatar_shop),
        }
    }
}

/// Builds a summary from a raw directory response.
///
/// The directory answers with an array of users; anything else leaves the
/// summary empty rather than failing.
pub(crate) fn summary_from_response(shop_id: &str, body: Value) -> ShopSummary {
    let Value::Array(users) = body else {
        return ShopSummary::empty(shop_id);
    };

    users
        .into_iter()
        .find_map(|user| serde_json::from_value::<ApiUser>(user).ok())
        .map_or_else(
            || ShopSummary::empty(shop_id),
            |user| user.into_summary(shop_id),
        )
}

/// Builds a receipt from the review API's JSON body, tolerating any shape.
pub(crate) fn receipt_from_response(body: &Value) -> SubmitReceipt {
    let review_id = body
        .get("data")
        .and_then(|data| data.get("_id"))
        .or_else(|| body.get("_id"))
        .and_then(Value::as_str)
        .map(ToOwned::to_owned);
    let message = body
        .get("message")
        .and_then(Value::as_str)
        .map(ToOwned::to_owned);

    SubmitReceipt { review_id, message }
}
