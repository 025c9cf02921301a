//! Catalogue serialization
//!
//! Renders the catalogue into the fixed tagged-block format embedded in the
//! outbound prompt. Downstream prompt consumers depend on every field being
//! present, so absent values render literal placeholder text instead of being
//! omitted.

use crate::models::Catalogue;
use crate::templates;

/// Serialize the catalogue to its tagged-block form
pub fn serialize_catalogue(catalogue: &Catalogue) -> String {
    let mut blocks = Vec::with_capacity(catalogue.products.len());

    for product in &catalogue.products {
        let price = if product.estimated_price.trim().is_empty() {
            templates::NO_PRICE_TEXT
        } else {
            product.estimated_price.as_str()
        };
        let image_url = product
            .image_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or(templates::NO_IMAGE_TEXT);

        blocks.push(format!(
            "<product>\nNAME: {}\nDESCRIPTION: {}\nPRICE: {}\nCATEGORY: Custom\nIMAGE_URL: {}\n</product>",
            product.name, product.description, price, image_url
        ));
    }

    blocks.join("\n")
}
