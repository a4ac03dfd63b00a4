use libduckdb_sys::duckdb_string_t;

const INLINE_CAPACITY: u32 = 12;

/// Copy a DuckDB `VARCHAR` row into an owned `String`, replacing invalid UTF-8.
///
/// # Safety
///
/// `s` must be a non-NULL row of a `duckdb_string_t` vector handed to the
/// running scalar invocation. Check row validity before calling.
pub unsafe fn decode_duckdb_string(s: &duckdb_string_t) -> String {
    // SAFETY: every representation starts with the length field.
    let len = unsafe { s.value.inlined.length };
    if len == 0 {
        return String::new();
    }

    let bytes = if len <= INLINE_CAPACITY {
        // SAFETY: short strings keep their `len` bytes inline.
        let inlined = unsafe { &s.value.inlined.inlined };
        // SAFETY: `len <= 12` bytes of `inlined` are initialized.
        unsafe { std::slice::from_raw_parts(inlined.as_ptr() as *const u8, len as usize) }
    } else {
        // SAFETY: long strings point at `len` bytes owned by the vector.
        let ptr = unsafe { s.value.pointer.ptr };
        // SAFETY: `ptr` stays valid for the duration of the invocation.
        unsafe { std::slice::from_raw_parts(ptr as *const u8, len as usize) }
    };

    String::from_utf8_lossy(bytes).into_owned()
}
