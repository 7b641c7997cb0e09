pub mod base64url;
pub mod buffer;

pub use base64url::{decode_bytes, decode_string, encode_bytes};
pub use buffer::{BoundedBuffer, HashBuffer, SignatureBuffer};
