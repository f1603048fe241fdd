use soroban_sdk::{contracttype, Address};

use crate::storage::{Tier, TierPolicy};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SubscriptionSetEvent {
    pub user: Address,
    pub tier: Tier,
    pub expires_at: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TierPolicyUpdatedEvent {
    pub tier: Tier,
    pub policy: TierPolicy,
}
