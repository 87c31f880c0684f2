//! Product cards for the order being reviewed.

use crate::review::OrderProduct;

use super::layout::{Column, Justify, Row};
use super::text_fit::fit_width;

/// Renders one product line of the order.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductCard;

impl ProductCard {
    /// Renders `product` as a name/subtotal line and a description line.
    #[must_use]
    pub fn view(product: &OrderProduct, max_width: usize) -> String {
        let name = product.product_name.as_deref().unwrap_or("Unnamed product");
        let subtotal = product.subtotal.as_deref().unwrap_or_default();
        let name_width = max_width.saturating_sub(subtotal.len().saturating_add(4));

        let title = Row::<()>::new()
            .child(format!("• {}", fit_width(name, name_width)))
            .child(subtotal)
            .justify(Justify::SpaceBetween)
            .width(max_width)
            .render();

        let mut card = Column::<()>::new().child(title);
        if let Some(description) = product
            .short_description
            .as_deref()
            .filter(|text| !text.is_empty())
        {
            card = card.child(format!(
                "  {}",
                fit_width(description, max_width.saturating_sub(2))
            ));
        }
        card.render()
    }
}
