#![no_std]

mod error;
mod events;
mod storage;
mod subscription;
mod validation;


pub use error::Error;
pub use storage::Track;

use events::{OwnershipTransferredEvent, TrackRegisteredEvent};
use storage::{DataKey, Storage, TTL_EXTEND_TO, TTL_THRESHOLD};
use subscription::SubscriptionLedger;
use validation::check_fingerprint_size;

use soroban_sdk::{contract, contractimpl, log, Address, Bytes, Env, String, Symbol};

#[contract]
pub struct TrackRegistry;

#[contractimpl]
impl TrackRegistry {
    // ============================================
    // INITIALIZATION
    // ============================================

    /// Initialize the registry against a deployed subscription manager
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    pub fn initialize(
        env: Env,
        admin: Address,
        subscription_manager: Address,
    ) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::AlreadyInitialized);
        }

        admin.require_auth();

        env.storage().instance().set(&DataKey::Initialized, &true);
        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage()
            .instance()
            .set(&DataKey::SubscriptionManager, &subscription_manager);
        Storage::set_track_count(&env, 0);

        env.storage()
            .instance()
            .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);

        Ok(())
    }

    // ============================================
    // REGISTRATION
    // ============================================

    /// Register a new track owned by `caller`. Returns the new track ID.
    ///
    /// Checks run in order, first failure wins.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `NoActiveSubscription`: Caller's subscription is missing or expired
    /// - `FingerprintTooLarge`: Fingerprint exceeds the caller's tier limit
    /// - `FingerprintAlreadyExists`: Fingerprint registered before, by anyone
    pub fn register_track(
        env: Env,
        caller: Address,
        title: String,
        artist: String,
        genre: String,
        metadata_ref: String,
        fingerprint: Bytes,
    ) -> Result<u64, Error> {
        caller.require_auth();

        let ledger = Self::subscription_ledger(&env)?;

        if !ledger.has_active_subscription(&caller) {
            return Err(Error::NoActiveSubscription);
        }

        check_fingerprint_size(
            fingerprint.len(),
            ledger.max_allowed_fingerprint_size(&caller),
        )?;

        let fingerprint_key = Storage::fingerprint_key(&env, &fingerprint);
        if Storage::has_fingerprint(&env, &fingerprint_key) {
            return Err(Error::FingerprintAlreadyExists);
        }

        let track_id = Storage::get_track_count(&env) + 1;

        let track = Track {
            id: track_id,
            title,
            artist,
            genre,
            metadata_ref,
            fingerprint: fingerprint.clone(),
            owner: caller.clone(),
            registered_at: env.ledger().timestamp(),
            is_registered: true,
        };

        // Record and index entry are written together
        Storage::set_track(&env, &track);
        Storage::set_fingerprint(&env, &fingerprint_key, track_id);
        Storage::set_track_count(&env, track_id);

        env.storage()
            .instance()
            .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);

        log!(&env, "track registered", track_id, caller);

        env.events().publish(
            (Symbol::new(&env, "track_registered"), track_id),
            TrackRegisteredEvent {
                track_id,
                owner: caller,
                fingerprint,
            },
        );

        Ok(track_id)
    }

    // ============================================
    // OWNERSHIP
    // ============================================

    /// Hand a track to `new_owner`. The new owner needs no subscription.
    ///
    /// # Errors
    /// - `TrackNotFound`: No track with this ID
    /// - `NotTrackOwner`: Caller does not own the track
    pub fn transfer_ownership(
        env: Env,
        caller: Address,
        track_id: u64,
        new_owner: Address,
    ) -> Result<(), Error> {
        caller.require_auth();

        let mut track = Storage::get_track(&env, track_id).ok_or(Error::TrackNotFound)?;

        if track.owner != caller {
            return Err(Error::NotTrackOwner);
        }

        let previous_owner = track.owner;
        track.owner = new_owner.clone();
        Storage::set_track(&env, &track);

        env.events().publish(
            (Symbol::new(&env, "ownership_transferred"), track_id),
            OwnershipTransferredEvent {
                track_id,
                previous_owner,
                new_owner,
            },
        );

        Ok(())
    }

    // ============================================
    // VIEW FUNCTIONS
    // ============================================

    pub fn get_track(env: Env, track_id: u64) -> Result<Track, Error> {
        Storage::get_track(&env, track_id).ok_or(Error::TrackNotFound)
    }

    /// True iff the track exists and `user` owns it. Never fails.
    pub fn verify_ownership(env: Env, track_id: u64, user: Address) -> bool {
        Storage::get_track(&env, track_id)
            .map(|track| track.owner == user)
            .unwrap_or(false)
    }

    /// Highest track ID issued so far
    pub fn track_count(env: Env) -> u64 {
        Storage::get_track_count(&env)
    }

    pub fn fingerprint_exists(env: Env, fingerprint: Bytes) -> bool {
        let key = Storage::fingerprint_key(&env, &fingerprint);
        Storage::has_fingerprint(&env, &key)
    }

    pub fn get_track_by_fingerprint(env: Env, fingerprint: Bytes) -> Result<Track, Error> {
        let key = Storage::fingerprint_key(&env, &fingerprint);
        let track_id =
            Storage::get_fingerprint_track(&env, &key).ok_or(Error::TrackNotFound)?;
        Storage::get_track(&env, track_id).ok_or(Error::TrackNotFound)
    }

    pub fn get_admin(env: Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)
    }

    pub fn get_subscription_manager(env: Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::SubscriptionManager)
            .ok_or(Error::NotInitialized)
    }

    // ============================================
    // INTERNAL HELPERS
    // ============================================

    fn subscription_ledger(env: &Env) -> Result<SubscriptionLedger<'_>, Error> {
        let address: Address = env
            .storage()
            .instance()
            .get(&DataKey::SubscriptionManager)
            .ok_or(Error::NotInitialized)?;
        Ok(SubscriptionLedger::new(env, address))
    }
}
