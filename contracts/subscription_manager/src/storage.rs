use soroban_sdk::{contracttype, Address};

use crate::error::Error;

// Constants
pub const SECONDS_PER_DAY: u64 = 86_400;

// TTLs are in ledgers (~5s each)
pub const DAY_IN_LEDGERS: u32 = 17_280;
pub const TTL_THRESHOLD: u32 = 30 * DAY_IN_LEDGERS;
pub const TTL_EXTEND_TO: u32 = 120 * DAY_IN_LEDGERS;

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub enum Tier {
    /// Metadata and on-chain fingerprint only
    Free = 0,
    /// Adds audio storage
    Pro = 1,
    /// Adds permanent storage
    Gold = 2,
}

impl TryFrom<u32> for Tier {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Tier::Free),
            1 => Ok(Tier::Pro),
            2 => Ok(Tier::Gold),
            _ => Err(Error::InvalidTier),
        }
    }
}

/// Feature policy attached to a tier. Replaced wholesale by the admin.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TierPolicy {
    pub metadata_storage_allowed: bool,
    pub onchain_fingerprint_allowed: bool,
    pub audio_storage_allowed: bool,
    pub permanent_storage_allowed: bool,
    /// Largest fingerprint, in bytes, a subscriber of this tier may register
    pub max_fingerprint_size: u32,
}

/// Stored subscription record. Only the latest write is kept.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Subscription {
    pub user: Address,
    pub tier: Tier,
    /// Unix timestamp; the subscription is active while `expires_at > now`
    pub expires_at: u64,
}

/// Read view of a subscription with the derived activity flag
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SubscriptionStatus {
    pub user: Address,
    pub tier: Tier,
    pub expires_at: u64,
    pub is_active: bool,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Initialized,
    TierPolicy(Tier),
    Subscription(Address),
}
