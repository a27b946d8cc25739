//! Data model for catalog API entities.
//!
//! These are the wire shapes of the remote catalog, fetched on demand and
//! cached per client instance. Only the fields the renderer depends on are
//! modeled; unknown fields are ignored, absent collections default to empty.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub price: f64,
    pub quantity: Option<i64>,
    pub description: Option<String>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub default_category_id: Option<u64>,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub options: Vec<ProductOption>,
    #[serde(default)]
    pub gallery_images: Vec<GalleryImage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    #[serde(default)]
    pub name: String,
    pub internal_name: Option<String>,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductOption {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: OptionType,
    #[serde(default)]
    pub choices: Vec<OptionChoice>,
}

/// Option input types the renderer knows how to turn into form controls.
///
/// Anything the API adds later deserializes as [`OptionType::Other`] and is
/// silently skipped during rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OptionType {
    Textfield,
    Date,
    Textarea,
    Select,
    Radio,
    Checkbox,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionChoice {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub price_modifier: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImage {
    #[serde(default)]
    pub url: String,
    pub alt: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub url: Option<String>,
}

/// Store-wide settings; fetched once per catalog session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default)]
    pub formats_and_units: FormatsAndUnits,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatsAndUnits {
    #[serde(default)]
    pub currency: String,
}

/// One page of a cursor-paginated list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub offset: u64,
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

/// Everything the host page template needs to embed a snapshot: the HTML
/// fragment body plus the derived `<title>`, `<meta name=description>` and
/// `<link rel=canonical>` values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSnapshot {
    pub html: String,
    pub title: String,
    pub description: String,
    pub canonical_url: String,
}
