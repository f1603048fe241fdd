use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // ============================================
    // INITIALIZATION ERRORS (1-9)
    // ============================================
    /// Contract already initialized
    AlreadyInitialized = 1,
    /// Contract not initialized
    NotInitialized = 2,

    // ============================================
    // AUTHORIZATION ERRORS (10-19)
    // ============================================
    /// Caller has no active subscription
    NoActiveSubscription = 10,
    /// Caller does not own the track
    NotTrackOwner = 11,

    // ============================================
    // INPUT ERRORS (20-29)
    // ============================================
    /// Fingerprint exceeds the caller's tier limit
    FingerprintTooLarge = 20,

    // ============================================
    // CONFLICT ERRORS (30-39)
    // ============================================
    /// Fingerprint already registered, by anyone
    FingerprintAlreadyExists = 30,

    // ============================================
    // LOOKUP ERRORS (40-49)
    // ============================================
    /// No track with this ID or fingerprint
    TrackNotFound = 40,
}
