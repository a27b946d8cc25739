//! Render command: produce the snapshot for an escaped fragment.

use crate::cli::OutputFormat;
use anyhow::{Context, Result};
use shopsnap_core::Catalog;
use tracing::info;
use url::Url;

/// Execute the render command.
///
/// The fragment can be given directly or extracted from a full crawler
/// request URL. A page URL without an `_escaped_fragment_` parameter is a
/// regular visitor request: there is nothing to snapshot, so the command
/// prints nothing and exits successfully. No fragment at all renders the
/// root category listing.
pub async fn execute(
    catalog: &mut Catalog,
    fragment: Option<String>,
    url: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let fragment = match (fragment, url) {
        (Some(fragment), _) => Some(fragment),
        (None, Some(page_url)) => match extract_fragment(&page_url)? {
            Some(fragment) => Some(fragment),
            None => {
                info!(%page_url, "no _escaped_fragment_ parameter, nothing to render");
                return Ok(());
            },
        },
        (None, None) => None,
    };

    let snapshot = catalog.render_snapshot(fragment.as_deref()).await;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        },
        OutputFormat::Text => {
            print!("{}", snapshot.html);
            println!("title: {}", snapshot.title);
            println!("description: {}", snapshot.description);
            println!("canonical: {}", snapshot.canonical_url);
        },
    }

    Ok(())
}

/// Pull the `_escaped_fragment_` value out of a crawler request URL.
///
/// The query parser percent-decodes the value once, the same decoding a web
/// server applies before handing query parameters to an application.
fn extract_fragment(page_url: &str) -> Result<Option<String>> {
    let parsed = Url::parse(page_url).with_context(|| format!("invalid page URL: {page_url}"))?;
    Ok(parsed
        .query_pairs()
        .find(|(key, _)| key == "_escaped_fragment_")
        .map(|(_, value)| value.into_owned()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn fragment_is_extracted_and_decoded_once() {
        let url = "https://shop.example/?utm=x&_escaped_fragment_=%2FKitchen%2Fp%2F42";
        let fragment = extract_fragment(url).unwrap();
        assert_eq!(fragment.as_deref(), Some("/Kitchen/p/42"));
    }

    #[test]
    fn missing_parameter_yields_none() {
        let fragment = extract_fragment("https://shop.example/?utm=x").unwrap();
        assert!(fragment.is_none());
    }

    #[test]
    fn invalid_url_is_an_error() {
        assert!(extract_fragment("not a url").is_err());
    }
}
