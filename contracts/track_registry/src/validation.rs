use crate::error::Error;

/// Check a fingerprint against the caller's tier limit.
/// A fingerprint of exactly `max_size` bytes is accepted.
pub fn check_fingerprint_size(fingerprint_len: u32, max_size: u32) -> Result<(), Error> {
    if fingerprint_len > max_size {
        return Err(Error::FingerprintTooLarge);
    }
    Ok(())
}
