//! DuckDB FFI plumbing shared by the scalar functions.

pub mod scalar;
pub mod string;
