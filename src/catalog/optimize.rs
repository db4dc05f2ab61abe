use std::sync::Arc;
use std::time::Duration;

use super::models::{OptimizedContent, ProductData};
use crate::preferences::{OptimizationSettings, PreferencesStore};

const ELLIPSIS: &str = "...";

/// Rewrites listings for the storefront using the current optimization settings.
pub struct ContentOptimizer {
    preferences: Arc<PreferencesStore>,
    delay: Duration,
}

impl ContentOptimizer {
    pub fn new(preferences: Arc<PreferencesStore>, delay: Duration) -> Self {
        Self { preferences, delay }
    }

    pub async fn optimize(&self, product: &ProductData) -> OptimizedContent {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let settings = self.preferences.optimization().await;
        optimize_content(product, &settings)
    }
}

pub fn optimize_content(
    product: &ProductData,
    settings: &OptimizationSettings,
) -> OptimizedContent {
    OptimizedContent {
        title: truncate_title(&product.title, settings.max_title_length),
        description: render_description(product),
    }
}

/// Cuts titles over `max_len` characters to `max_len - 3` plus an ellipsis.
pub fn truncate_title(title: &str, max_len: usize) -> String {
    if title.chars().count() <= max_len {
        return title.to_string();
    }
    let keep = max_len.saturating_sub(ELLIPSIS.len());
    let mut out: String = title.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}

fn render_description(product: &ProductData) -> String {
    let mut out = String::new();
    out.push_str(&format!("# {}\n\n", product.title));
    out.push_str("## Product description\n\n");
    out.push_str(&format!("{}\n\n", product.description));

    out.push_str("## Technical specifications\n\n");
    for (key, value) in &product.specifications {
        out.push_str(&format!("- **{}**: {}\n", key, value));
    }
    out.push('\n');

    out.push_str("## Benefits\n\n");
    out.push_str("- Elegant design that fits seamlessly into your lifestyle\n");
    out.push_str("- Excellent value for money in its category\n");
    out.push_str("- Easy to use and maintain\n\n");

    out.push_str("## Usage tips\n\n");
    out.push_str("To get the most out of your product, follow these simple tips:\n\n");
    out.push_str("1. Inspect the product on delivery to make sure it is in perfect condition\n");
    out.push_str("2. Follow the manufacturer's instructions for setup and use\n");
    out.push_str("3. Maintain the product regularly to extend its lifespan\n\n");

    out.push_str("## Warranty and after-sales service\n\n");
    out.push_str("This product is covered by our satisfaction guarantee. ");
    out.push_str("Feel free to contact us with any question about your purchase.\n\n");
    out
}
