use crate::storage::{Tier, TierPolicy, SECONDS_PER_DAY};

pub const FREE_MAX_FINGERPRINT_SIZE: u32 = 1024;
pub const PRO_MAX_FINGERPRINT_SIZE: u32 = 4096;
pub const GOLD_MAX_FINGERPRINT_SIZE: u32 = 16_384;

/// Policy installed for each tier at initialization
///
/// - Free: metadata + on-chain fingerprint, 1 KiB fingerprints
/// - Pro: Free + audio storage, 4 KiB fingerprints
/// - Gold: Pro + permanent storage, 16 KiB fingerprints
pub fn default_policy(tier: Tier) -> TierPolicy {
    match tier {
        Tier::Free => TierPolicy {
            metadata_storage_allowed: true,
            onchain_fingerprint_allowed: true,
            audio_storage_allowed: false,
            permanent_storage_allowed: false,
            max_fingerprint_size: FREE_MAX_FINGERPRINT_SIZE,
        },
        Tier::Pro => TierPolicy {
            metadata_storage_allowed: true,
            onchain_fingerprint_allowed: true,
            audio_storage_allowed: true,
            permanent_storage_allowed: false,
            max_fingerprint_size: PRO_MAX_FINGERPRINT_SIZE,
        },
        Tier::Gold => TierPolicy {
            metadata_storage_allowed: true,
            onchain_fingerprint_allowed: true,
            audio_storage_allowed: true,
            permanent_storage_allowed: true,
            max_fingerprint_size: GOLD_MAX_FINGERPRINT_SIZE,
        },
    }
}

/// What an identity without an active subscription may do: nothing
pub fn restricted_policy() -> TierPolicy {
    TierPolicy {
        metadata_storage_allowed: false,
        onchain_fingerprint_allowed: false,
        audio_storage_allowed: false,
        permanent_storage_allowed: false,
        max_fingerprint_size: 0,
    }
}

/// A subscription is active strictly before its expiry timestamp
pub fn is_active(expires_at: u64, current_time: u64) -> bool {
    expires_at > current_time
}

/// Calculate expiry for a subscription starting now
///
/// Formula: expires_at = now + duration_days × 86,400
///
/// Returns `None` on overflow.
pub fn calculate_expiry(current_time: u64, duration_days: u32) -> Option<u64> {
    (duration_days as u64)
        .checked_mul(SECONDS_PER_DAY)
        .and_then(|seconds| current_time.checked_add(seconds))
}

/// Policy that actually applies given the stored tier policy and the
/// subscription's expiry. Expired subscriptions confer nothing.
pub fn effective_policy(policy: TierPolicy, expires_at: u64, current_time: u64) -> TierPolicy {
    if is_active(expires_at, current_time) {
        policy
    } else {
        restricted_policy()
    }
}
