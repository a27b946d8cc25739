//! Catalog facade: turns routed requests into crawler-ready snapshots.
//!
//! The facade owns a [`CatalogClient`] and the storefront base URL and
//! produces the three snapshot surfaces the host page embeds: the HTML
//! fragment, the title/description pair, and the canonical URL. All output
//! mirrors what the live SPA renders for the same route, so a crawler
//! indexing the snapshot and a visitor loading the interactive page see
//! the same catalog content.
//!
//! Missing data renders as silence. An unreachable product renders as an
//! empty fragment with blank metadata, never as an error page.

use crate::client::CatalogClient;
use crate::config::StoreConfig;
use crate::html::{esc_attr, esc_html, FragmentWriter};
use crate::route::{parse_route, RouteMode};
use crate::seo::prepare_meta_description;
use crate::types::{Category, OptionType, PageSnapshot, Product};
use crate::Result;
use tracing::debug;

const PRICE_LABEL: &str = "Price";

/// Snapshot renderer for one store.
pub struct Catalog {
    client: CatalogClient,
    base_url: String,
}

impl Catalog {
    /// Create a catalog facade for the given store.
    pub fn new(config: StoreConfig) -> Result<Self> {
        let base_url = config.base_url.clone();
        let client = CatalogClient::new(config)?;
        Ok(Self { client, base_url })
    }

    /// Direct access to the underlying API client.
    pub fn client_mut(&mut self) -> &mut CatalogClient {
        &mut self.client
    }

    /// Render the full snapshot for an escaped fragment.
    ///
    /// A missing or unroutable fragment falls back to the root category
    /// listing with the storefront base URL as canonical. Routed snapshots
    /// additionally carry a script that restores the SPA hash when a human
    /// follows an indexed link.
    pub async fn render_snapshot(&mut self, fragment: Option<&str>) -> PageSnapshot {
        let route = fragment.and_then(parse_route);

        let Some(route) = route else {
            debug!(?fragment, "no catalog route, rendering root listing");
            return PageSnapshot {
                html: self.render_category(0).await,
                title: String::new(),
                description: String::new(),
                canonical_url: self.base_url.clone(),
            };
        };

        // The fragment is present whenever a route was parsed from it.
        let fragment = fragment.unwrap_or_default();
        let (mut html, title, description, canonical_url) = match route.mode {
            RouteMode::Product => (
                self.render_product(route.id).await,
                self.product_title(route.id).await,
                self.product_description(route.id).await,
                self.product_url_for_id(route.id).await,
            ),
            RouteMode::Category => (
                self.render_category(route.id).await,
                self.category_title(route.id).await,
                self.category_description(route.id).await,
                self.category_url_for_id(route.id).await,
            ),
        };
        html.push_str(&hash_redirect_script(fragment));

        PageSnapshot {
            html,
            title,
            description: prepare_meta_description(&description),
            canonical_url,
        }
    }

    /// Render the product page fragment, or an empty string if the product
    /// cannot be fetched.
    pub async fn render_product(&mut self, id: u64) -> String {
        let Some(product) = self.client.get_product(id).await else {
            return String::new();
        };
        let currency = self.currency().await;

        let mut w = FragmentWriter::new();
        w.open(r#"<div itemscope itemtype="http://schema.org/Product">"#);
        w.line(&format!(
            r#"<h2 class="catalog_product_name" itemprop="name">{}</h2>"#,
            esc_html(&product.name)
        ));
        w.line(&format!(
            r#"<p class="catalog_product_sku" itemprop="sku">{}</p>"#,
            esc_html(&product.sku)
        ));

        if let Some(thumbnail) = product.thumbnail_url.as_deref().filter(|u| !u.is_empty()) {
            w.open(r#"<div class="catalog_product_image">"#);
            w.line(&format!(
                r#"<img itemprop="image" src="{}" alt="{}" />"#,
                esc_attr(thumbnail),
                esc_attr(&format!("{} {}", product.name, product.sku))
            ));
            w.close("</div>");
        }

        if let Some(category_id) = product.default_category_id.filter(|&id| id > 0) {
            if let Some(category) = self.client.get_category(category_id).await {
                w.line(&format!(
                    r#"<div class="catalog_product_category"><a href="{}">{}</a></div>"#,
                    esc_attr(category.url.as_deref().unwrap_or_default()),
                    esc_html(&category.name)
                ));
            }
        }

        w.open(
            r#"<div class="catalog_product_price" itemprop="offers" itemscope itemtype="http://schema.org/Offer">"#,
        );
        w.line(&format!(
            r#"{PRICE_LABEL}: <span itemprop="price">{}</span>"#,
            esc_html(&format_number(product.price))
        ));
        w.line(&format!(
            r#"<span itemprop="priceCurrency">{}</span>"#,
            esc_html(&currency)
        ));
        // Quantity is only reported for tracked inventory; untracked means
        // always purchasable.
        if product.quantity.map_or(true, |q| q > 0) {
            w.line(r#"<link itemprop="availability" href="http://schema.org/InStock" />In stock"#);
        }
        w.close("</div>");

        // Description HTML is authored in the store admin and arrives
        // sanitized; it is embedded verbatim.
        w.open(r#"<div class="catalog_product_description" itemprop="description">"#);
        w.line(product.description.as_deref().unwrap_or_default());
        w.close("</div>");

        for attribute in &product.attributes {
            if attribute.value.trim().is_empty() {
                continue;
            }
            w.open(r#"<div class="catalog_product_attribute">"#);
            let value = if attribute.internal_name.as_deref() == Some("Brand") {
                format!(
                    r#"<span itemprop="brand">{}</span>"#,
                    esc_html(&attribute.value)
                )
            } else {
                esc_html(&attribute.value)
            };
            w.line(&format!("{}:{value}", esc_html(&attribute.name)));
            w.close("</div>");
        }

        for option in &product.options {
            if option.kind == OptionType::Other {
                continue;
            }
            w.open(r#"<div class="catalog_product_options">"#);
            w.line(&format!("<span>{}</span>", esc_html(&option.name)));
            let name_attr = esc_attr(&option.name);
            match option.kind {
                OptionType::Textfield | OptionType::Date => {
                    w.line(&format!(r#"<input type="text" size="40" name="{name_attr}">"#));
                }
                OptionType::Textarea => {
                    w.line(&format!(r#"<textarea name="{name_attr}"></textarea>"#));
                }
                OptionType::Select => {
                    w.open(&format!(r#"<select name="{name_attr}">"#));
                    for choice in &option.choices {
                        w.line(&format!(
                            r#"<option value="{}">{} ({})</option>"#,
                            esc_attr(&choice.text),
                            esc_html(&choice.text),
                            esc_html(&format_number(choice.price_modifier))
                        ));
                    }
                    w.close("</select>");
                }
                OptionType::Radio | OptionType::Checkbox => {
                    let input_type = if option.kind == OptionType::Radio {
                        "radio"
                    } else {
                        "checkbox"
                    };
                    for choice in &option.choices {
                        w.line(&format!(
                            r#"<input type="{input_type}" name="{name_attr}" value="{}" />{} ({})"#,
                            esc_attr(&choice.text),
                            esc_html(&choice.text),
                            esc_html(&format_number(choice.price_modifier))
                        ));
                    }
                }
                OptionType::Other => {}
            }
            w.close("</div>");
        }

        for image in &product.gallery_images {
            let alt = image
                .alt
                .as_deref()
                .filter(|a| !a.is_empty())
                .unwrap_or(&product.name);
            w.line(&format!(
                r#"<img src="{}" alt="{}" title="{}" />"#,
                esc_attr(&image.url),
                esc_attr(alt),
                esc_attr(alt)
            ));
        }

        w.close("</div>");
        w.finish()
    }

    /// Render the category page fragment. Id `0` is the root listing and
    /// skips the header.
    pub async fn render_category(&mut self, id: u64) -> String {
        let header = if id > 0 {
            self.client.get_category(id).await
        } else {
            None
        };
        let subcategories = self.client.get_subcategories(id).await;
        let products = self.client.get_products_by_category(id).await;
        let currency = self.currency().await;

        let mut w = FragmentWriter::new();

        if let Some(category) = header {
            w.line(&format!("<h2>{}</h2>", esc_html(&category.name)));
            w.line(&format!(
                "<div>{}</div>",
                category.description.as_deref().unwrap_or_default()
            ));
        }

        for category in &subcategories {
            w.open(r#"<div class="catalog_category_name">"#);
            w.line(&format!(
                r#"<a href="{}">{}</a>"#,
                esc_attr(&self.category_url(category)),
                esc_html(&category.name)
            ));
            w.close("</div>");
        }

        for product in &products {
            let price = format!("{} {currency}", format_number(product.price));
            w.open("<div>");
            w.open(r#"<span class="product_name">"#);
            w.line(&format!(
                r#"<a href="{}">{}</a>"#,
                esc_attr(&self.product_url(product)),
                esc_html(&product.name)
            ));
            w.close("</span>");
            w.line(&format!(
                r#"<span class="product_price">{}</span>"#,
                esc_html(&price)
            ));
            w.close("</div>");
        }

        w.finish()
    }

    /// Product page title: the SEO title when set, the name otherwise.
    pub async fn product_title(&mut self, id: u64) -> String {
        match self.client.get_product(id).await {
            Some(product) => non_empty(product.seo_title).unwrap_or(product.name),
            None => String::new(),
        }
    }

    /// Category page title: the SEO title when set, the name otherwise.
    pub async fn category_title(&mut self, id: u64) -> String {
        match self.client.get_category(id).await {
            Some(category) => non_empty(category.seo_title).unwrap_or(category.name),
            None => String::new(),
        }
    }

    /// Raw product meta description, before crawler preparation.
    pub async fn product_description(&mut self, id: u64) -> String {
        match self.client.get_product(id).await {
            Some(product) => non_empty(product.seo_description)
                .or(product.description)
                .unwrap_or_default(),
            None => String::new(),
        }
    }

    /// Raw category meta description, before crawler preparation.
    pub async fn category_description(&mut self, id: u64) -> String {
        match self.client.get_category(id).await {
            Some(category) => non_empty(category.seo_description)
                .or(category.description)
                .unwrap_or_default(),
            None => String::new(),
        }
    }

    /// Public page URL of an already-fetched product.
    #[must_use]
    pub fn product_url(&self, product: &Product) -> String {
        self.entity_url(product.url.as_deref(), 'p', product.id)
    }

    /// Public page URL of an already-fetched category.
    #[must_use]
    pub fn category_url(&self, category: &Category) -> String {
        self.entity_url(category.url.as_deref(), 'c', category.id)
    }

    /// Resolve a bare product id to its public page URL.
    ///
    /// Fetches the product only when the API is reachable; otherwise falls
    /// back to the hash permalink, which the SPA resolves client-side.
    pub async fn product_url_for_id(&mut self, id: u64) -> String {
        if self.client.is_api_enabled().await {
            if let Some(product) = self.client.get_product(id).await {
                return self.product_url(&product);
            }
        }
        self.entity_url(None, 'p', id)
    }

    /// Resolve a bare category id to its public page URL.
    pub async fn category_url_for_id(&mut self, id: u64) -> String {
        if self.client.is_api_enabled().await {
            if let Some(category) = self.client.get_category(id).await {
                return self.category_url(&category);
            }
        }
        self.entity_url(None, 'c', id)
    }

    /// The entity's own URL carries the store domain; only its hash part is
    /// kept and re-rooted on the configured base URL, so snapshots link
    /// within the page that embeds them.
    fn entity_url(&self, url: Option<&str>, kind: char, id: u64) -> String {
        if let Some(url) = url {
            if let Some(pos) = url.find('#') {
                return format!("{}{}", self.base_url, &url[pos..]);
            }
        }
        format!("{}#!/{kind}/{id}", self.base_url)
    }

    async fn currency(&mut self) -> String {
        self.client
            .get_profile()
            .await
            .unwrap_or_default()
            .formats_and_units
            .currency
    }
}

/// Hash-restore script appended to routed snapshots. When a person (not a
/// crawler) lands on the indexed URL, this puts the SPA route back into
/// the location hash so the interactive storefront takes over.
fn hash_redirect_script(fragment: &str) -> String {
    format!(
        "<script type=\"text/javascript\">\n\
         if (!document.location.hash) {{\n  \
         document.location.hash = '!{fragment}';\n\
         }}\n\
         </script>\n"
    )
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Format an API number the way its JSON literal reads (no trailing zeros,
/// no decimal point for whole values).
fn format_number(value: f64) -> String {
    format!("{value}")
}
