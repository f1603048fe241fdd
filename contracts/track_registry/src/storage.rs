use soroban_sdk::{contracttype, Address, Bytes, BytesN, Env, String};

// TTLs are in ledgers (~5s each)
pub const DAY_IN_LEDGERS: u32 = 17_280;
pub const TTL_THRESHOLD: u32 = 30 * DAY_IN_LEDGERS;
pub const TTL_EXTEND_TO: u32 = 120 * DAY_IN_LEDGERS;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Track {
    /// Sequential ID, starting at 1
    pub id: u64,
    pub title: String,
    pub artist: String,
    pub genre: String,
    /// Opaque content identifier of the off-chain metadata
    pub metadata_ref: String,
    pub fingerprint: Bytes,
    /// The only mutable field, changed by `transfer_ownership`
    pub owner: Address,
    /// Ledger timestamp of registration
    pub registered_at: u64,
    pub is_registered: bool,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Initialized,
    SubscriptionManager,
    TrackCounter,
    Track(u64),
    /// SHA-256 of the fingerprint → track ID
    Fingerprint(BytesN<32>),
}

pub struct Storage;

impl Storage {
    // Track counter (highest ID issued so far)
    pub fn get_track_count(env: &Env) -> u64 {
        env.storage()
            .instance()
            .get(&DataKey::TrackCounter)
            .unwrap_or(0)
    }

    pub fn set_track_count(env: &Env, count: u64) {
        env.storage().instance().set(&DataKey::TrackCounter, &count);
    }

    // Tracks
    pub fn get_track(env: &Env, track_id: u64) -> Option<Track> {
        env.storage().persistent().get(&DataKey::Track(track_id))
    }

    pub fn set_track(env: &Env, track: &Track) {
        let key = DataKey::Track(track.id);
        env.storage().persistent().set(&key, track);
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }

    // Fingerprint index. Ledger keys are size-limited, so the index is
    // keyed by digest rather than by the raw fingerprint.
    pub fn fingerprint_key(env: &Env, fingerprint: &Bytes) -> DataKey {
        DataKey::Fingerprint(env.crypto().sha256(fingerprint).to_bytes())
    }

    pub fn get_fingerprint_track(env: &Env, key: &DataKey) -> Option<u64> {
        env.storage().persistent().get(key)
    }

    pub fn has_fingerprint(env: &Env, key: &DataKey) -> bool {
        env.storage().persistent().has(key)
    }

    pub fn set_fingerprint(env: &Env, key: &DataKey, track_id: u64) {
        env.storage().persistent().set(key, &track_id);
        env.storage()
            .persistent()
            .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
}
