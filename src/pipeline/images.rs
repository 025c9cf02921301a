//! Product image synthesis
//!
//! Products are processed strictly sequentially; each call is awaited before
//! the next begins. A failed call substitutes the placeholder for that product
//! only and the batch continues. Output order equals input order and `id` is
//! assigned as the 1-based position.

use crate::models::{Catalogue, ProductDescriptor};
use crate::providers::ImageModel;
use crate::templates;

/// Prompt sent to the image provider for one product
pub fn build_image_prompt(product: &ProductDescriptor) -> String {
    let subject = if product.image_prompt.trim().is_empty() {
        format!("{}: {}", product.name, product.description)
    } else {
        product.image_prompt.clone()
    };
    format!("{}, {}", subject, templates::IMAGE_STYLE_QUALIFIERS)
}

/// Attach an image URL to every product and assemble the catalogue.
///
/// Never fails: a provider error for product `i` yields the placeholder
/// reference for that product while the rest keep their generated URLs.
pub async fn synthesize_images<M: ImageModel>(
    model: &M,
    mut products: Vec<ProductDescriptor>,
    conditioning_image: Option<&str>,
) -> Catalogue {
    for (index, product) in products.iter_mut().enumerate() {
        product.id = (index + 1).to_string();

        let prompt = build_image_prompt(product);
        match model.generate_image(&prompt, conditioning_image).await {
            Ok(url) => {
                log::debug!("Generated image for product {}: {}", product.id, url);
                product.image_url = Some(url);
            }
            Err(err) => {
                log::warn!(
                    "Image synthesis failed for product {} ({}), using placeholder",
                    product.name,
                    err
                );
                product.image_url = Some(templates::PLACEHOLDER_IMAGE_URL.to_string());
            }
        }
    }

    Catalogue::new(products)
}
