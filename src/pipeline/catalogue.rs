//! Catalogue synthesis
//!
//! One schema-constrained generative attempt per turn; any failure is replaced
//! by a deterministic single-item fallback catalogue. The caller always gets a
//! usable product list, never an error.

use crate::models::ProductDescriptor;
use crate::providers::CatalogueModel;
use crate::templates;
use regex::Regex;

/// Distinguishes provider-produced data from the deterministic substitute.
/// Observable for logging only; both variants flow through the pipeline the
/// same way.
#[derive(Debug, Clone)]
pub enum Synthesized<T> {
    Provider(T),
    Fallback(T),
}

impl<T> Synthesized<T> {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Synthesized::Fallback(_))
    }

    pub fn into_inner(self) -> T {
        match self {
            Synthesized::Provider(value) | Synthesized::Fallback(value) => value,
        }
    }
}

/// How many product entries the user asked for; defaults to one
pub fn requested_product_count(user_text: &str) -> usize {
    let re = Regex::new(r"(?i)\b(\d{1,2})\s+(?:products|items|pieces)\b").unwrap();
    re.captures(user_text)
        .and_then(|captures| captures.get(1))
        .and_then(|m| m.as_str().parse::<usize>().ok())
        .filter(|&count| count >= 1)
        .unwrap_or(1)
}

/// Natural-language instruction sent to the catalogue model
pub fn build_catalogue_instruction(user_text: &str, count: usize) -> String {
    format!(
        "Derive a product catalogue for this pop-up store concept: \"{}\".\n\
         Respond with a JSON array of exactly {} product object(s). Each object has the fields \
         \"name\", \"description\", \"estimatedPrice\" (a display string like \"$29.99\"), and \
         \"imagePrompt\" (a short visual description of the product for an image generator). \
         Output only the JSON array.",
        user_text, count
    )
}

/// Deterministic single-item substitute used when inference fails
pub fn fallback_products(user_text: &str) -> Vec<ProductDescriptor> {
    vec![ProductDescriptor {
        id: String::new(),
        name: templates::FALLBACK_PRODUCT_NAME.to_string(),
        description: templates::FALLBACK_PRODUCT_DESCRIPTION.to_string(),
        estimated_price: templates::FALLBACK_PRODUCT_PRICE.to_string(),
        image_prompt: format!("product for a store about {}", user_text),
        image_url: None,
    }]
}

/// Synthesize the product list for one turn.
///
/// At most one generative attempt; transport errors, provider errors, and
/// malformed or empty structured output all collapse to the fallback.
pub async fn synthesize<M: CatalogueModel>(
    model: &M,
    user_text: &str,
    image: Option<&str>,
) -> Synthesized<Vec<ProductDescriptor>> {
    let count = requested_product_count(user_text);
    let instruction = build_catalogue_instruction(user_text, count);

    match model.infer_products(&instruction, image).await {
        Ok(products) => {
            let usable: Vec<ProductDescriptor> = products
                .into_iter()
                .filter(|product| !product.name.trim().is_empty())
                .collect();
            if usable.is_empty() {
                log::warn!("Catalogue inference returned no usable products, using fallback");
                Synthesized::Fallback(fallback_products(user_text))
            } else {
                log::info!("Catalogue inference produced {} products", usable.len());
                Synthesized::Provider(usable)
            }
        }
        Err(err) => {
            log::warn!("Catalogue inference failed ({}), using fallback", err);
            Synthesized::Fallback(fallback_products(user_text))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::{CatalogueModel, ProviderError};

    struct StubModel {
        result: Result<Vec<ProductDescriptor>, ()>,
    }

    impl CatalogueModel for StubModel {
        async fn infer_products(
            &self,
            _instruction: &str,
            _image: Option<&str>,
        ) -> Result<Vec<ProductDescriptor>, ProviderError> {
            match &self.result {
                Ok(products) => Ok(products.clone()),
                Err(()) => Err(ProviderError::Transport("connection refused".to_string())),
            }
        }
    }

    fn product(name: &str) -> ProductDescriptor {
        ProductDescriptor {
            id: String::new(),
            name: name.to_string(),
            description: format!("{} description", name),
            estimated_price: "$10".to_string(),
            image_prompt: name.to_lowercase(),
            image_url: None,
        }
    }

    #[test]
    fn test_requested_product_count_default_one() {
        assert_eq!(requested_product_count("a sneaker drop store"), 1);
    }

    #[test]
    fn test_requested_product_count_explicit() {
        assert_eq!(requested_product_count("a store with 6 products"), 6);
        assert_eq!(requested_product_count("give me 4 items for the drop"), 4);
    }

    #[test]
    fn test_requested_product_count_zero_falls_back_to_one() {
        assert_eq!(requested_product_count("a store with 0 products"), 1);
    }

    #[test]
    fn test_instruction_mentions_count_and_concept() {
        let instruction = build_catalogue_instruction("a sneaker drop store", 3);
        assert!(instruction.contains("sneaker drop store"));
        assert!(instruction.contains("exactly 3"));
        assert!(instruction.contains("imagePrompt"));
    }

    #[tokio::test]
    async fn test_synthesize_provider_success() {
        let model = StubModel {
            result: Ok(vec![product("Hoodie"), product("Poster")]),
        };
        let result = synthesize(&model, "merch store", None).await;
        assert!(!result.is_fallback());
        assert_eq!(result.into_inner().len(), 2);
    }

    #[tokio::test]
    async fn test_synthesize_failure_yields_single_fallback() {
        let model = StubModel { result: Err(()) };
        let result = synthesize(&model, "merch store", None).await;
        assert!(result.is_fallback());
        let products = result.into_inner();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Custom Product");
        assert!(!products[0].description.is_empty());
        assert!(products[0].image_prompt.contains("merch store"));
    }

    #[tokio::test]
    async fn test_synthesize_empty_output_yields_fallback() {
        let model = StubModel { result: Ok(vec![]) };
        assert!(synthesize(&model, "anything", None).await.is_fallback());
    }

    #[tokio::test]
    async fn test_synthesize_filters_nameless_entries() {
        let model = StubModel {
            result: Ok(vec![product("Real"), product("  ")]),
        };
        let products = synthesize(&model, "store", None).await.into_inner();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Real");
    }
}
