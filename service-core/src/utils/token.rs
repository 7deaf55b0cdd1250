use subtle::ConstantTimeEq;

/// Compare two secret strings in constant time.
///
/// The length check short-circuits; lengths of configured secrets are not
/// considered sensitive, only their contents.
pub fn constant_time_eq(a: &str, b: &str) -> bool {
    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    if a_bytes.len() != b_bytes.len() {
        return false;
    }

    a_bytes.ct_eq(b_bytes).into()
}
