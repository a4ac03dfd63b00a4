//! Shared DuckDB scalar invoke helpers.
//!
//! These helpers centralize the per-row boilerplate of the volleyball scalars:
//! - flat vector access and logical type checks
//! - per-row NULL checks
//! - `duckdb_string_t` decoding
//! - output insertion / validity handling
//!
//! # Safety
//! These helpers MUST only be called from within a DuckDB scalar `invoke()` while the
//! underlying vectors are valid.

use std::error::Error;
use std::ffi::CString;

use duckdb::{
    Result,
    core::{DataChunkHandle, FlatVector, Inserter, LogicalTypeId},
    vtab::arrow::WritableVector,
};
use libduckdb_sys::duckdb_string_t;

use super::string::decode_duckdb_string;

fn ensure_type(
    vec: &FlatVector,
    expected: LogicalTypeId,
    label: &str,
) -> Result<(), Box<dyn Error>> {
    let actual = vec.logical_type().id();
    if actual != expected {
        return Err(format!(
            "scalar helper type mismatch: {label} expected {expected:?}, got {actual:?}"
        )
        .into());
    }
    Ok(())
}

fn optional_varchar_column(
    input: &DataChunkHandle,
    column: usize,
) -> Result<Option<FlatVector>, Box<dyn Error>> {
    if input.num_columns() <= column {
        return Ok(None);
    }
    let vec = input.flat_vector(column);
    ensure_type(&vec, LogicalTypeId::Varchar, "optional varchar argument")?;
    Ok(Some(vec))
}

fn read_optional_varchar(vec: Option<&FlatVector>, row: usize) -> Option<String> {
    let vec = vec?;
    if vec.row_is_null(row as u64) {
        return None;
    }
    let slice = vec.as_slice::<duckdb_string_t>();
    // SAFETY: Row nullability is checked above.
    Some(unsafe { decode_duckdb_string(&slice[row]) })
}

/// Invoke a `VARCHAR[, VARCHAR] -> VARCHAR` scalar. The trailing argument is passed as `None`
/// when the overload without it was called or when the row value is NULL. A NULL first argument
/// yields a NULL output.
pub fn invoke_varchar_optional_varchar_to_varchar<F>(
    input: &DataChunkHandle,
    output: &mut dyn WritableVector,
    mut f: F,
) -> Result<(), Box<dyn Error>>
where
    F: FnMut(&str, Option<&str>) -> Result<String, Box<dyn Error>>,
{
    let len = input.len();
    let text_vec = input.flat_vector(0);
    ensure_type(&text_vec, LogicalTypeId::Varchar, "input[0]")?;
    let text_slice = text_vec.as_slice::<duckdb_string_t>();
    let option_vec = optional_varchar_column(input, 1)?;
    let mut output_vec = output.flat_vector();
    ensure_type(&output_vec, LogicalTypeId::Varchar, "output")?;

    for (i, s) in text_slice.iter().take(len).enumerate() {
        if text_vec.row_is_null(i as u64) {
            output_vec.set_null(i);
            continue;
        }

        // SAFETY: Row nullability is checked above.
        let text = unsafe { decode_duckdb_string(s) };
        let option = read_optional_varchar(option_vec.as_ref(), i);
        let value = f(&text, option.as_deref())?;
        output_vec.insert(i, CString::new(value)?);
    }

    Ok(())
}

/// Invoke a `VARCHAR, BIGINT[, VARCHAR] -> VARCHAR` scalar. A NULL in either of the first two
/// arguments yields a NULL output; a NULL or missing third argument is passed as `None`.
pub fn invoke_varchar_i64_optional_varchar_to_varchar<F>(
    input: &DataChunkHandle,
    output: &mut dyn WritableVector,
    mut f: F,
) -> Result<(), Box<dyn Error>>
where
    F: FnMut(&str, i64, Option<&str>) -> Result<String, Box<dyn Error>>,
{
    let len = input.len();
    let text_vec = input.flat_vector(0);
    ensure_type(&text_vec, LogicalTypeId::Varchar, "input[0]")?;
    let text_slice = text_vec.as_slice::<duckdb_string_t>();
    let number_vec = input.flat_vector(1);
    ensure_type(&number_vec, LogicalTypeId::Bigint, "input[1]")?;
    let number_slice = number_vec.as_slice::<i64>();
    let option_vec = optional_varchar_column(input, 2)?;
    let mut output_vec = output.flat_vector();
    ensure_type(&output_vec, LogicalTypeId::Varchar, "output")?;

    for (i, (s, number)) in text_slice
        .iter()
        .take(len)
        .zip(number_slice.iter().take(len))
        .enumerate()
    {
        if text_vec.row_is_null(i as u64) || number_vec.row_is_null(i as u64) {
            output_vec.set_null(i);
            continue;
        }

        // SAFETY: Both required rows are checked non-NULL above.
        let text = unsafe { decode_duckdb_string(s) };
        let option = read_optional_varchar(option_vec.as_ref(), i);
        let value = f(&text, *number, option.as_deref())?;
        output_vec.insert(i, CString::new(value)?);
    }

    Ok(())
}
