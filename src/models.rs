//! Payloads served by the product API.
//!
//! Lookups by id answer `null` when nothing matches, so views fetch them as
//! `Option<...>`. The scratchpad payload has no fixed shape and is fetched as
//! [`serde_json::Value`].

use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Clone, PartialEq, Debug)]
pub struct TaxonomyResponse {
    pub id: u64,
    pub name: String,
    pub parent_id: Option<u64>,
    #[serde(default)]
    pub parent_name: Option<String>,
    #[serde(default)]
    pub children: Vec<TaxonomyResponse>,
}

impl TaxonomyResponse {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// A taxonomy as attached to a product, without its subtree.
#[derive(Deserialize, Serialize, Clone, PartialEq, Debug)]
pub struct Taxon {
    pub id: u64,
    pub name: String,
    pub parent_id: Option<u64>,
}

/// Nutrient amounts; any nutrient may be unknown.
#[derive(Deserialize, Serialize, Clone, PartialEq, Debug, Default)]
#[serde(default)]
pub struct Nutrition {
    pub energy: Option<f64>,
    pub protein: Option<f64>,
    pub fat: Option<f64>,
    pub sat_fat: Option<f64>,
    pub cholesterol: Option<f64>,
    pub carbohydrate: Option<f64>,
    pub total_sugar: Option<f64>,
    pub starch: Option<f64>,
    pub fibre: Option<f64>,
    pub sodium: Option<f64>,
    pub potassium: Option<f64>,
    pub calcium: Option<f64>,
    pub magnesium: Option<f64>,
    pub chromium: Option<f64>,
    pub molybdenum: Option<f64>,
    pub phosphorus: Option<f64>,
    pub iron: Option<f64>,
    pub copper: Option<f64>,
    pub zinc: Option<f64>,
    pub manganese: Option<f64>,
    pub selenium: Option<f64>,
    pub iodine: Option<f64>,
    pub vit_a: Option<f64>,
    pub vit_c: Option<f64>,
    pub vit_d: Option<f64>,
    pub vit_e: Option<f64>,
    pub vit_k: Option<f64>,
    pub vit_b1: Option<f64>,
    pub vit_b2: Option<f64>,
    pub vit_b3: Option<f64>,
    pub vit_b5: Option<f64>,
    pub vit_b6: Option<f64>,
    pub vit_b7: Option<f64>,
    pub vit_b9: Option<f64>,
    pub vit_b12: Option<f64>,
}

/// Nutrition reported by one source for `amount` of `measure` of a product.
#[derive(Deserialize, Serialize, Clone, PartialEq, Debug)]
pub struct ProductNutrition {
    pub measure: String,
    pub amount: f64,
    pub source: String,
    pub sureness: f64,
    pub nutrition: Nutrition,
}

/// A product as listed by search.
#[derive(Deserialize, Serialize, Clone, PartialEq, Debug)]
pub struct ProductSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
    pub url: String,
    pub unit_price: f64,
    pub unit_measure: String,
    pub unit_amount: f64,
    pub retail_price: f64,
    #[serde(default)]
    pub is_alcohol: bool,
    pub brand: Option<String>,
}

/// A product page: the product with its taxonomies and nutrition.
#[derive(Deserialize, Serialize, Clone, PartialEq, Debug)]
pub struct ProductResponse {
    #[serde(flatten)]
    pub product: ProductSummary,
    pub taxonomies: Vec<Taxon>,
    pub nutritions: Vec<ProductNutrition>,
    /// Nutrition per unit amount, collated across sources.
    pub total_nutrition: Nutrition,
}
