#![no_std]

mod error;
mod events;
mod policy;
mod storage;

pub use error::Error;
pub use storage::{Subscription, SubscriptionStatus, Tier, TierPolicy};

use events::{SubscriptionSetEvent, TierPolicyUpdatedEvent};
use policy::{calculate_expiry, default_policy, effective_policy, is_active, restricted_policy};
use storage::{DataKey, TTL_EXTEND_TO, TTL_THRESHOLD};

use soroban_sdk::{contract, contractimpl, log, Address, Env, Symbol};

#[contract]
pub struct SubscriptionManager;

#[contractimpl]
impl SubscriptionManager {
    // ============================================
    // INITIALIZATION & ADMIN
    // ============================================

    /// Initialize the ledger and install the default tier policies
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    pub fn initialize(env: Env, admin: Address) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::AlreadyInitialized);
        }

        admin.require_auth();

        env.storage().instance().set(&DataKey::Initialized, &true);
        env.storage().instance().set(&DataKey::Admin, &admin);

        for tier in [Tier::Free, Tier::Pro, Tier::Gold] {
            env.storage()
                .instance()
                .set(&DataKey::TierPolicy(tier), &default_policy(tier));
        }

        env.storage()
            .instance()
            .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);

        Ok(())
    }

    /// Create or overwrite a user's subscription, expiring
    /// `duration_days` from the current ledger time
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `Unauthorized`: Caller is not admin
    /// - `InvalidTier`: Tier is not Free (0), Pro (1) or Gold (2)
    /// - `InvalidDuration`: Expiry overflows the ledger timestamp
    pub fn set_subscription(
        env: Env,
        caller: Address,
        user: Address,
        tier: u32,
        duration_days: u32,
    ) -> Result<(), Error> {
        Self::require_admin(&env, &caller)?;

        let tier = Tier::try_from(tier)?;
        let expires_at = calculate_expiry(env.ledger().timestamp(), duration_days)
            .ok_or(Error::InvalidDuration)?;

        let key = DataKey::Subscription(user.clone());
        env.storage().persistent().set(
            &key,
            &Subscription {
                user: user.clone(),
                tier,
                expires_at,
            },
        );
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);

        log!(&env, "subscription set", user, expires_at);

        env.events().publish(
            (Symbol::new(&env, "subscription_set"), user.clone()),
            SubscriptionSetEvent {
                user,
                tier,
                expires_at,
            },
        );

        Ok(())
    }

    /// Replace a tier's policy. Every field must be supplied.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `Unauthorized`: Caller is not admin
    /// - `InvalidTier`: Tier is not Free (0), Pro (1) or Gold (2)
    pub fn set_tier_policy(
        env: Env,
        caller: Address,
        tier: u32,
        policy: TierPolicy,
    ) -> Result<(), Error> {
        Self::require_admin(&env, &caller)?;

        let tier = Tier::try_from(tier)?;

        env.storage()
            .instance()
            .set(&DataKey::TierPolicy(tier), &policy);
        env.storage()
            .instance()
            .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);

        env.events().publish(
            (Symbol::new(&env, "tier_policy_updated"),),
            TierPolicyUpdatedEvent { tier, policy },
        );

        Ok(())
    }

    // ============================================
    // VIEW FUNCTIONS
    // ============================================

    /// Get a user's subscription. Users never subscribed read as an
    /// expired Free subscription.
    pub fn get_subscription(env: Env, user: Address) -> SubscriptionStatus {
        let now = env.ledger().timestamp();

        match Self::load_subscription(&env, &user) {
            Some(subscription) => SubscriptionStatus {
                user: subscription.user,
                tier: subscription.tier,
                expires_at: subscription.expires_at,
                is_active: is_active(subscription.expires_at, now),
            },
            None => SubscriptionStatus {
                user,
                tier: Tier::Free,
                expires_at: 0,
                is_active: false,
            },
        }
    }

    /// Get the stored policy for a tier
    pub fn get_tier_policy(env: Env, tier: u32) -> Result<TierPolicy, Error> {
        let tier = Tier::try_from(tier)?;
        Ok(Self::load_tier_policy(&env, tier))
    }

    pub fn get_admin(env: Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)
    }

    pub fn has_active_subscription(env: Env, user: Address) -> bool {
        Self::load_subscription(&env, &user)
            .map(|subscription| is_active(subscription.expires_at, env.ledger().timestamp()))
            .unwrap_or(false)
    }

    pub fn can_store_metadata(env: Env, user: Address) -> bool {
        Self::effective(&env, &user).metadata_storage_allowed
    }

    pub fn can_store_fingerprint_onchain(env: Env, user: Address) -> bool {
        Self::effective(&env, &user).onchain_fingerprint_allowed
    }

    pub fn can_store_audio(env: Env, user: Address) -> bool {
        Self::effective(&env, &user).audio_storage_allowed
    }

    pub fn can_use_permanent_storage(env: Env, user: Address) -> bool {
        Self::effective(&env, &user).permanent_storage_allowed
    }

    /// Largest fingerprint (bytes) the user may register right now; 0
    /// without an active subscription
    pub fn max_allowed_fingerprint_size(env: Env, user: Address) -> u32 {
        Self::effective(&env, &user).max_fingerprint_size
    }

    // ============================================
    // INTERNAL HELPERS
    // ============================================

    fn require_admin(env: &Env, caller: &Address) -> Result<(), Error> {
        caller.require_auth();

        let admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)?;

        if *caller != admin {
            return Err(Error::Unauthorized);
        }
        Ok(())
    }

    fn load_subscription(env: &Env, user: &Address) -> Option<Subscription> {
        env.storage()
            .persistent()
            .get(&DataKey::Subscription(user.clone()))
    }

    fn load_tier_policy(env: &Env, tier: Tier) -> TierPolicy {
        env.storage()
            .instance()
            .get(&DataKey::TierPolicy(tier))
            .unwrap_or_else(|| default_policy(tier))
    }

    fn effective(env: &Env, user: &Address) -> TierPolicy {
        match Self::load_subscription(env, user) {
            Some(subscription) => effective_policy(
                Self::load_tier_policy(env, subscription.tier),
                subscription.expires_at,
                env.ledger().timestamp(),
            ),
            None => restricted_policy(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use soroban_sdk::{
        testutils::{Address as _, Events, Ledger},
        Address, Env, Symbol, TryFromVal,
    };

    const DAY: u64 = 86_400;

    fn setup() -> (Env, SubscriptionManagerClient<'static>, Address) {
        let env = Env::default();
        env.mock_all_auths();
        env.ledger().set_timestamp(1_000);

        let contract_id = env.register_contract(None, SubscriptionManager);
        let client = SubscriptionManagerClient::new(&env, &contract_id);

        let admin = Address::generate(&env);
        client.initialize(&admin);

        (env, client, admin)
    }

    #[test]
    fn test_initialize() {
        let (_env, client, admin) = setup();

        assert_eq!(client.get_admin(), admin);

        let result = client.try_initialize(&admin);
        assert_eq!(result, Err(Ok(Error::AlreadyInitialized)));
    }

    #[test]
    fn test_not_initialized() {
        let env = Env::default();
        env.mock_all_auths();

        let contract_id = env.register_contract(None, SubscriptionManager);
        let client = SubscriptionManagerClient::new(&env, &contract_id);

        let admin = Address::generate(&env);
        let user = Address::generate(&env);

        let result = client.try_set_subscription(&admin, &user, &1, &30);
        assert_eq!(result, Err(Ok(Error::NotInitialized)));
        assert_eq!(client.try_get_admin(), Err(Ok(Error::NotInitialized)));
    }

    #[test]
    fn test_default_tier_policies() {
        let (_env, client, _admin) = setup();

        let free = client.get_tier_policy(&0);
        assert!(free.metadata_storage_allowed);
        assert!(free.onchain_fingerprint_allowed);
        assert!(!free.audio_storage_allowed);
        assert!(!free.permanent_storage_allowed);
        assert_eq!(free.max_fingerprint_size, 1024);

        let pro = client.get_tier_policy(&1);
        assert!(pro.audio_storage_allowed);
        assert!(!pro.permanent_storage_allowed);

        let gold = client.get_tier_policy(&2);
        assert!(gold.audio_storage_allowed);
        assert!(gold.permanent_storage_allowed);
    }

    #[test]
    fn test_set_subscription() {
        let (env, client, admin) = setup();
        let user = Address::generate(&env);

        client.set_subscription(&admin, &user, &1, &30);

        let status = client.get_subscription(&user);
        assert_eq!(status.user, user);
        assert_eq!(status.tier, Tier::Pro);
        assert_eq!(status.expires_at, 1_000 + 30 * DAY);
        assert!(status.is_active);
    }

    #[test]
    fn test_subscription_lifecycle() {
        let (env, client, admin) = setup();
        let user = Address::generate(&env);

        assert!(!client.has_active_subscription(&user));

        client.set_subscription(&admin, &user, &2, &7);
        assert!(client.has_active_subscription(&user));

        // One second before expiry
        env.ledger().set_timestamp(1_000 + 7 * DAY - 1);
        assert!(client.has_active_subscription(&user));

        env.ledger().set_timestamp(1_000 + 7 * DAY);
        assert!(!client.has_active_subscription(&user));

        // The record stays queryable after expiry
        let status = client.get_subscription(&user);
        assert_eq!(status.tier, Tier::Gold);
        assert!(!status.is_active);
    }

    #[test]
    fn test_unknown_user_reads_as_inactive_free() {
        let (env, client, _admin) = setup();
        let user = Address::generate(&env);

        let status = client.get_subscription(&user);
        assert_eq!(status.tier, Tier::Free);
        assert_eq!(status.expires_at, 0);
        assert!(!status.is_active);
        assert_eq!(client.max_allowed_fingerprint_size(&user), 0);
    }

    #[test]
    fn test_zero_duration_is_immediately_expired() {
        let (env, client, admin) = setup();
        let user = Address::generate(&env);

        client.set_subscription(&admin, &user, &1, &0);

        let status = client.get_subscription(&user);
        assert_eq!(status.expires_at, 1_000);
        assert!(!status.is_active);
        assert!(!client.can_store_audio(&user));
    }

    #[test]
    fn test_only_admin_sets_subscription() {
        let (env, client, _admin) = setup();
        let user = Address::generate(&env);

        let result = client.try_set_subscription(&user, &user, &2, &365);
        assert_eq!(result, Err(Ok(Error::Unauthorized)));
        assert!(!client.has_active_subscription(&user));
    }

    #[test]
    fn test_invalid_tier() {
        let (env, client, admin) = setup();
        let user = Address::generate(&env);

        let result = client.try_set_subscription(&admin, &user, &3, &30);
        assert_eq!(result, Err(Ok(Error::InvalidTier)));

        let policy = client.get_tier_policy(&0);
        let result = client.try_set_tier_policy(&admin, &7, &policy);
        assert_eq!(result, Err(Ok(Error::InvalidTier)));

        assert_eq!(client.try_get_tier_policy(&3), Err(Ok(Error::InvalidTier)));
    }

    #[test]
    fn test_only_admin_sets_tier_policy() {
        let (env, client, admin) = setup();
        let user = Address::generate(&env);

        let policy = TierPolicy {
            metadata_storage_allowed: true,
            onchain_fingerprint_allowed: true,
            audio_storage_allowed: false,
            permanent_storage_allowed: false,
            max_fingerprint_size: 2048,
        };

        client.set_tier_policy(&admin, &0, &policy);
        assert_eq!(client.get_tier_policy(&0), policy);

        let result = client.try_set_tier_policy(&user, &0, &policy);
        assert_eq!(result, Err(Ok(Error::Unauthorized)));
    }

    #[test]
    fn test_tier_policy_replaced_wholesale() {
        let (env, client, admin) = setup();
        let user = Address::generate(&env);

        client.set_subscription(&admin, &user, &2, &30);
        assert!(client.can_use_permanent_storage(&user));

        let policy = TierPolicy {
            metadata_storage_allowed: false,
            onchain_fingerprint_allowed: true,
            audio_storage_allowed: false,
            permanent_storage_allowed: false,
            max_fingerprint_size: 64,
        };
        client.set_tier_policy(&admin, &2, &policy);

        assert!(!client.can_store_metadata(&user));
        assert!(client.can_store_fingerprint_onchain(&user));
        assert!(!client.can_store_audio(&user));
        assert!(!client.can_use_permanent_storage(&user));
        assert_eq!(client.max_allowed_fingerprint_size(&user), 64);
    }

    #[test]
    fn test_capability_checks() {
        let (env, client, admin) = setup();
        let user = Address::generate(&env);

        assert!(!client.can_store_audio(&user));

        client.set_subscription(&admin, &user, &1, &30);

        assert!(client.can_store_metadata(&user));
        assert!(client.can_store_audio(&user));
        assert!(!client.can_use_permanent_storage(&user));
        assert_eq!(client.max_allowed_fingerprint_size(&user), 4096);
    }

    #[test]
    fn test_expired_subscription_confers_nothing() {
        let (env, client, admin) = setup();
        let user = Address::generate(&env);

        client.set_subscription(&admin, &user, &2, &1);
        env.ledger().set_timestamp(1_000 + 2 * DAY);

        assert!(!client.can_store_metadata(&user));
        assert!(!client.can_store_fingerprint_onchain(&user));
        assert!(!client.can_store_audio(&user));
        assert!(!client.can_use_permanent_storage(&user));
        assert_eq!(client.max_allowed_fingerprint_size(&user), 0);
    }

    #[test]
    fn test_downgrade_overwrites_tier_and_expiry() {
        let (env, client, admin) = setup();
        let user = Address::generate(&env);

        client.set_subscription(&admin, &user, &2, &365);

        env.ledger().set_timestamp(2_000);
        client.set_subscription(&admin, &user, &0, &10);

        let status = client.get_subscription(&user);
        assert_eq!(status.tier, Tier::Free);
        assert_eq!(status.expires_at, 2_000 + 10 * DAY);
        assert!(!client.can_use_permanent_storage(&user));
    }

    #[test]
    fn test_set_subscription_emits_event() {
        let (env, client, admin) = setup();
        let user = Address::generate(&env);

        client.set_subscription(&admin, &user, &1, &30);

        let events = env.events().all();
        let (contract, _topics, data) = events.last().unwrap();
        assert_eq!(contract, client.address);

        let event = SubscriptionSetEvent::try_from_val(&env, &data).unwrap();
        assert_eq!(
            event,
            SubscriptionSetEvent {
                user,
                tier: Tier::Pro,
                expires_at: 1_000 + 30 * DAY,
            }
        );
    }

    #[test]
    fn test_set_tier_policy_emits_event() {
        let (env, client, admin) = setup();

        let policy = TierPolicy {
            metadata_storage_allowed: true,
            onchain_fingerprint_allowed: true,
            audio_storage_allowed: true,
            permanent_storage_allowed: false,
            max_fingerprint_size: 512,
        };
        client.set_tier_policy(&admin, &1, &policy);

        let events = env.events().all();
        let (contract, topics, data) = events.last().unwrap();
        assert_eq!(contract, client.address);

        let name = Symbol::try_from_val(&env, &topics.get(0).unwrap()).unwrap();
        assert_eq!(name, Symbol::new(&env, "tier_policy_updated"));

        let event = TierPolicyUpdatedEvent::try_from_val(&env, &data).unwrap();
        assert_eq!(
            event,
            TierPolicyUpdatedEvent {
                tier: Tier::Pro,
                policy,
            }
        );
    }

    #[test]
    fn test_expiry_overflow_rejected() {
        let (env, client, admin) = setup();
        let user = Address::generate(&env);

        env.ledger().set_timestamp(u64::MAX - 10);

        let result = client.try_set_subscription(&admin, &user, &1, &1);
        assert_eq!(result, Err(Ok(Error::InvalidDuration)));

        // Nothing was written
        assert_eq!(client.get_subscription(&user).expires_at, 0);
    }
}
