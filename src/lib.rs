pub mod config;
mod duckdb_impl;
pub mod error;
pub mod event;
mod log;

use duckdb::{Connection, Result};
use duckdb_ext_macros::duckdb_extension;
use event::{VolleyballNormalizeTextScalar, VolleyballParseEventScalar};
use std::error::Error;

#[duckdb_extension(name = "duckdb_volleyball", api_version = "v1.0.0")]
pub unsafe fn extension_entrypoint(con: Connection) -> Result<(), Box<dyn Error>> {
    // Refuse to load with a bad VOLLEYBALL_SYNONYM_VERSION rather than failing every query.
    let config = config::process_config().inspect_err(|err| {
        log::error(format!("extension not loaded: {err}"));
    })?;
    if config.synonym_version != event::LATEST_SYNONYM_VERSION {
        log::warn(format!(
            "synonym table pinned to {} (latest is {})",
            config.synonym_version,
            event::LATEST_SYNONYM_VERSION
        ));
    }

    con.register_scalar_function::<VolleyballParseEventScalar>("volleyball_parse_event")?;
    con.register_scalar_function::<VolleyballNormalizeTextScalar>("volleyball_normalize_text")?;

    Ok(())
}
