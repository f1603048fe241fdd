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
    /// Caller is not the administrator
    Unauthorized = 10,

    // ============================================
    // TIER ERRORS (20-29)
    // ============================================
    /// Tier value outside Free / Pro / Gold
    InvalidTier = 20,

    // ============================================
    // INPUT ERRORS (30-39)
    // ============================================
    /// now + duration_days overflows the ledger timestamp
    InvalidDuration = 30,
}
