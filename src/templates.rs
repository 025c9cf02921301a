// Built-in prompt templates for store generation

/// System persona sent when opening a new backend session
pub const STORE_SYSTEM_PERSONA: &str = "You are an expert storefront builder. \
You turn trend descriptions into polished, single-page pop-up stores that are \
ready for impulse purchases.";

/// Fixed layout instruction block for new store generations
pub const STORE_LAYOUT_INSTRUCTIONS: &str = r#"Create a viral pop-up store landing page.

Build a single-page Next.js store with:
- Eye-catching hero section with trend-themed design
- Simple product grid showing 4-6 items with prices
- No need to add things like "Add to favorites" or "Add to cart"
- Quick "Buy Now" buttons for each product
- The "Buy Now" button should open a modal with a checkout form ( the pay function can be mocked )
- Minimal navigation (just logo and no cart)
- Mobile-first responsive design
- Trendy colors and bold typography
- No social sharing buttons or testimonials
- Images are important, make sure to create all the images you need and don't use placeholder images

Focus on: Simple, fast, impulse-buy experience. No complex menus or pages."#;

/// Style qualifiers appended to every product image prompt
pub const IMAGE_STYLE_QUALIFIERS: &str =
    "professional product photography, white background, studio lighting, high quality, commercial photography";

/// Placeholder image reference used when image synthesis fails for a product
pub const PLACEHOLDER_IMAGE_URL: &str = "/mock-product.jpg";

/// Rendered in the catalogue block when a product has no image
pub const NO_IMAGE_TEXT: &str = "No image available";

/// Rendered in the catalogue block when a product has no price
pub const NO_PRICE_TEXT: &str = "Contact for pricing";

/// Assistant-facing copy appended to the conversation when a turn fails
pub const GENERATION_FAILED_MESSAGE: &str =
    "Trend generation failed! The moment might have passed. Try a different viral topic or trend.";

/// Name/description/price of the deterministic fallback product used when
/// catalogue synthesis fails
pub const FALLBACK_PRODUCT_NAME: &str = "Custom Product";
pub const FALLBACK_PRODUCT_DESCRIPTION: &str =
    "A curated product matched to your store concept, with quality materials and great value.";
pub const FALLBACK_PRODUCT_PRICE: &str = "$29.99";

/// A built-in store template suggested from keywords in the user message
pub struct StoreTemplate {
    pub name: &'static str,
    pub target_audience: &'static str,
    pub color_scheme: &'static str,
    pub keywords: &'static [&'static str],
    /// (name, description, price)
    pub sample_products: &'static [(&'static str, &'static str, &'static str)],
}

/// Built-in store templates used to enrich the outbound prompt
pub const STORE_TEMPLATES: &[StoreTemplate] = &[
    StoreTemplate {
        name: "Fashion Boutique",
        target_audience: "fashion-forward millennials and Gen Z",
        color_scheme: "neutral tones with black accents",
        keywords: &["fashion", "clothing", "boutique"],
        sample_products: &[
            (
                "Minimalist Cashmere Sweater",
                "Luxuriously soft cashmere sweater in neutral tones, perfect for layering",
                "$189",
            ),
            (
                "High-Waisted Denim Jeans",
                "Classic high-waisted jeans with a flattering fit and sustainable fabric",
                "$89",
            ),
        ],
    },
    StoreTemplate {
        name: "Gourmet Food Marketplace",
        target_audience: "food enthusiasts and home chefs",
        color_scheme: "warm earth tones with gold accents",
        keywords: &["food", "gourmet", "restaurant", "coffee"],
        sample_products: &[
            (
                "Single-Origin Coffee Beans",
                "Hand-roasted coffee beans from Ethiopian highlands, notes of chocolate and citrus",
                "$24",
            ),
            (
                "Truffle Honey Selection",
                "Gourmet honey infused with real truffle pieces, perfect for cheese boards",
                "$45",
            ),
        ],
    },
    StoreTemplate {
        name: "Tech Innovation Hub",
        target_audience: "tech enthusiasts and early adopters",
        color_scheme: "modern blues and grays with tech accents",
        keywords: &["tech", "gadget", "electronic", "smart"],
        sample_products: &[
            (
                "Wireless Charging Stand",
                "Fast wireless charging stand with adjustable angle and LED status indicator",
                "$49",
            ),
            (
                "Smart Home Security Camera",
                "4K security camera with night vision and AI motion detection",
                "$199",
            ),
        ],
    },
    StoreTemplate {
        name: "Urban Plant Nursery",
        target_audience: "urban dwellers and plant parents",
        color_scheme: "natural greens with earth tones",
        keywords: &["plant", "garden", "nursery"],
        sample_products: &[
            (
                "Monstera Deliciosa",
                "Popular houseplant with distinctive split leaves, perfect for bright indirect light",
                "$45",
            ),
            (
                "Plant Care Starter Kit",
                "Everything needed for plant care: watering can, fertilizer, and soil meter",
                "$29",
            ),
        ],
    },
];

/// Find a built-in store template whose keywords appear in the user message
pub fn suggest_store_template(user_message: &str) -> Option<&'static StoreTemplate> {
    let message = user_message.to_lowercase();
    STORE_TEMPLATES
        .iter()
        .find(|template| template.keywords.iter().any(|kw| message.contains(kw)))
}

/// Render the template enhancement block appended to the outbound prompt,
/// or an empty string when no template matches
pub fn store_template_enhancement(user_message: &str) -> String {
    let Some(template) = suggest_store_template(user_message) else {
        return String::new();
    };

    let sample_products = template
        .sample_products
        .iter()
        .map(|(name, description, price)| format!("- {}: {} ({})", name, description, price))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "\nSUGGESTED STORE TEMPLATE: {}\nTarget Audience: {}\nColor Scheme: {}\n\nSAMPLE PRODUCTS:\n{}\n\nUse this template as inspiration but customize it based on the user's specific request: \"{}\"",
        template.name, template.target_audience, template.color_scheme, sample_products, user_message
    )
}
