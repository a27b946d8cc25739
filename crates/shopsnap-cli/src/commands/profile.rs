//! Profile command: fetch and print the store profile.

use anyhow::{bail, Result};
use shopsnap_core::Catalog;

pub async fn execute(catalog: &mut Catalog) -> Result<()> {
    let client = catalog.client_mut();

    let Some(profile) = client.get_profile().await else {
        match client.last_error() {
            Some(err) if err.status > 0 => {
                bail!("could not fetch store profile (status {})", err.status)
            },
            Some(err) => bail!("could not fetch store profile: {}", err.message),
            None => bail!("could not fetch store profile"),
        }
    };

    let currency = &profile.formats_and_units.currency;
    if currency.is_empty() {
        println!("currency: (not set)");
    } else {
        println!("currency: {currency}");
    }

    Ok(())
}
