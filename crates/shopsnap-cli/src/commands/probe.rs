//! Probe command: check that the store API answers for the configured token.

use anyhow::{bail, Result};
use shopsnap_core::Catalog;

/// Execute the probe. Exit code 0 means the API is reachable.
pub async fn execute(catalog: &mut Catalog) -> Result<()> {
    let client = catalog.client_mut();

    if client.is_api_enabled().await {
        println!("store API is reachable");
        return Ok(());
    }

    match client.last_error() {
        Some(err) if err.status > 0 => {
            bail!("store API rejected the request (status {})", err.status)
        },
        Some(err) => bail!("store API is unreachable: {}", err.message),
        None => bail!("store API is unreachable"),
    }
}
