use soroban_sdk::{vec, Address, Env, Symbol};

/// Read-only handle on the deployed subscription manager contract.
/// The registry never calls its mutating entry points.
pub struct SubscriptionLedger<'a> {
    env: &'a Env,
    address: Address,
}

impl<'a> SubscriptionLedger<'a> {
    pub fn new(env: &'a Env, address: Address) -> Self {
        Self { env, address }
    }

    pub fn has_active_subscription(&self, user: &Address) -> bool {
        self.env.invoke_contract(
            &self.address,
            &Symbol::new(self.env, "has_active_subscription"),
            vec![self.env, user.to_val()],
        )
    }

    /// 0 for users without an active subscription
    pub fn max_allowed_fingerprint_size(&self, user: &Address) -> u32 {
        self.env.invoke_contract(
            &self.address,
            &Symbol::new(self.env, "max_allowed_fingerprint_size"),
            vec![self.env, user.to_val()],
        )
    }
}
