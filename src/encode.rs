//! UUID wire encodings for RAW binary and text columns.

use uuid::Uuid;

/// Big-endian RAW(16) encoding: most-significant half first.
pub fn uuid_raw_bytes(u: &Uuid) -> [u8; 16] {
    *u.as_bytes()
}

/// Hyphenated textual rendering as bytes, for columns that store the UUID's
/// string form.
pub fn uuid_text_bytes(u: &Uuid) -> Vec<u8> {
    u.to_string().into_bytes()
}
