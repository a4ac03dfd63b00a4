use std::error::Error;

use ::duckdb::vtab::arrow::WritableVector;
use ::duckdb::{
    Result,
    core::{DataChunkHandle, LogicalTypeHandle, LogicalTypeId},
    vscalar::{ScalarFunctionSignature, VScalar},
};

use crate::config::{ParserConfig, process_config};
use crate::duckdb_impl::scalar::{
    invoke_varchar_i64_optional_varchar_to_varchar,
    invoke_varchar_optional_varchar_to_varchar,
};
use crate::error::ConfigurationError;
use crate::log;

mod json;
pub mod matcher;
pub mod rules;
pub mod synonyms;

pub use matcher::{UNKNOWN_EVENT, match_event};
pub use rules::{EventRule, PointSide};
pub use synonyms::{LATEST_SYNONYM_VERSION, normalize};

/// One annotation turned into a stat line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEvent {
    pub set_number: i64,
    /// `None` for team-level point commands and when no number was found.
    pub player_number: Option<u8>,
    pub event: String,
    pub point_awarded_to: Option<PointSide>,
    pub needs_review: bool,
    /// The caller's input, exactly as received.
    pub raw_text: String,
}

impl ParsedEvent {
    pub fn to_json(&self) -> String {
        json::event_to_json(self)
    }
}

pub fn parse_event(
    text: &str,
    set_number: i64,
    version: &str,
) -> Result<ParsedEvent, ConfigurationError> {
    let normalized = normalize(text, version)?;
    Ok(match_event(&normalized, text, set_number))
}

pub fn parse_event_default(text: &str, set_number: i64) -> ParsedEvent {
    let normalized =
        normalize(text, LATEST_SYNONYM_VERSION).expect("latest synonym version is registered");
    match_event(&normalized, text, set_number)
}

fn configured() -> Result<&'static ParserConfig, Box<dyn Error>> {
    process_config().map_err(|err| {
        log::error(format!("invalid parser configuration: {err}"));
        err.into()
    })
}

pub struct VolleyballParseEventScalar;

impl VScalar for VolleyballParseEventScalar {
    type State = ();

    unsafe fn invoke(
        _state: &Self::State,
        input: &mut DataChunkHandle,
        output: &mut dyn WritableVector,
    ) -> Result<(), Box<dyn Error>> {
        let config = configured()?;
        invoke_varchar_i64_optional_varchar_to_varchar(input, output, |text, set_number, version| {
            let parsed = parse_event(text, set_number, config.resolve_version(version))?;
            if parsed.needs_review {
                log::debug(format!("needs review: {:?}", parsed.raw_text));
            }
            Ok(parsed.to_json())
        })
    }

    fn signatures() -> Vec<ScalarFunctionSignature> {
        vec![
            ScalarFunctionSignature::exact(
                vec![
                    LogicalTypeHandle::from(LogicalTypeId::Varchar),
                    LogicalTypeHandle::from(LogicalTypeId::Bigint),
                ],
                LogicalTypeHandle::from(LogicalTypeId::Varchar),
            ),
            ScalarFunctionSignature::exact(
                vec![
                    LogicalTypeHandle::from(LogicalTypeId::Varchar),
                    LogicalTypeHandle::from(LogicalTypeId::Bigint),
                    LogicalTypeHandle::from(LogicalTypeId::Varchar),
                ],
                LogicalTypeHandle::from(LogicalTypeId::Varchar),
            ),
        ]
    }
}

pub struct VolleyballNormalizeTextScalar;

impl VScalar for VolleyballNormalizeTextScalar {
    type State = ();

    unsafe fn invoke(
        _state: &Self::State,
        input: &mut DataChunkHandle,
        output: &mut dyn WritableVector,
    ) -> Result<(), Box<dyn Error>> {
        let config = configured()?;
        invoke_varchar_optional_varchar_to_varchar(input, output, |text, version| {
            Ok(normalize(text, config.resolve_version(version))?)
        })
    }

    fn signatures() -> Vec<ScalarFunctionSignature> {
        vec![
            ScalarFunctionSignature::exact(
                vec![LogicalTypeHandle::from(LogicalTypeId::Varchar)],
                LogicalTypeHandle::from(LogicalTypeId::Varchar),
            ),
            ScalarFunctionSignature::exact(
                vec![
                    LogicalTypeHandle::from(LogicalTypeId::Varchar),
                    LogicalTypeHandle::from(LogicalTypeId::Varchar),
                ],
                LogicalTypeHandle::from(LogicalTypeId::Varchar),
            ),
        ]
    }
}
