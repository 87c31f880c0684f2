//! Multipart payload accepted by the review API.

/// Form field carrying the reviewing user's id.
pub const FIELD_USER: &str = "id_user";
/// Form field carrying the reviewed shop's id.
pub const FIELD_SHOP: &str = "id_shop";
/// Form field carrying the order reference.
pub const FIELD_ORDER: &str = "orderId";
/// Form field carrying the star rating as text.
pub const FIELD_RATING: &str = "rating";
/// Form field carrying the comment.
pub const FIELD_COMMENT: &str = "comment";
/// Form field repeated once per attached file.
pub const FIELD_FILES: &str = "files";

/// One file part of the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadFile {
    /// Location of the media, usually a `file://` URI.
    pub uri: String,
    /// MIME type reported by the picker.
    pub mime_type: Option<String>,
    /// File name sent with the part; never empty.
    pub name: String,
}

/// The complete review submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewPayload {
    /// Reviewing user.
    pub user_id: String,
    /// Reviewed shop.
    pub shop_id: String,
    /// Order reference.
    pub order_id: String,
    /// Star rating, stringified.
    pub rating: String,
    /// Free-text comment, verbatim.
    pub comment: String,
    /// Attached media in attach order.
    pub files: Vec<PayloadFile>,
}

impl ReviewPayload {
    /// Text fields in the order they are appended to the form.
    #[must_use]
    pub fn text_fields(&self) -> [(&'static str, &str); 5] {
        [
            (FIELD_USER, self.user_id.as_str()),
            (FIELD_SHOP, self.shop_id.as_str()),
            (FIELD_ORDER, self.order_id.as_str()),
            (FIELD_RATING, self.rating.as_str()),
            (FIELD_COMMENT, self.comment.as_str()),
        ]
    }
}
