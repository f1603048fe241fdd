use soroban_sdk::{contracttype, Address, Bytes};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TrackRegisteredEvent {
    pub track_id: u64,
    pub owner: Address,
    pub fingerprint: Bytes,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnershipTransferredEvent {
    pub track_id: u64,
    pub previous_owner: Address,
    pub new_owner: Address,
}
