use fvm_shared::econ::TokenAmount;
use num_traits::Signed;

use crate::error::ActionError;

/// Envelope version assigned by `ActionBuilder` when none is set.
pub const DEFAULT_VERSION: u32 = 1;
/// Chain id assigned by `ActionBuilder` when none is set.
pub const DEFAULT_CHAIN_ID: u32 = 0;

/// The fields every action shares regardless of its payload: envelope
/// version, chain id, nonce and gas parameters.
///
/// Concrete actions carry this as a named field and copy it verbatim; only
/// `sanity_check` looks inside it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AbstractAction {
    version: u32,
    chain_id: u32,
    nonce: u64,
    gas_limit: u64,
    gas_price: TokenAmount,
}

impl AbstractAction {
    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn chain_id(&self) -> u32 {
        self.chain_id
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    pub fn gas_limit(&self) -> u64 {
        self.gas_limit
    }

    pub fn gas_price(&self) -> &TokenAmount {
        &self.gas_price
    }

    /// Validates the envelope fields.
    pub fn sanity_check(&self) -> Result<(), ActionError> {
        if self.gas_price.atto().is_negative() {
            return Err(ActionError::NegativeGasPrice);
        }
        Ok(())
    }
}

/// Staged construction of an `AbstractAction`.
#[derive(Debug, Clone)]
pub struct ActionBuilder {
    action: AbstractAction,
}

impl Default for ActionBuilder {
    fn default() -> Self {
        Self {
            action: AbstractAction {
                version: DEFAULT_VERSION,
                chain_id: DEFAULT_CHAIN_ID,
                ..AbstractAction::default()
            },
        }
    }
}

impl ActionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_version(mut self, version: u32) -> Self {
        self.action.version = version;
        self
    }

    pub fn set_chain_id(mut self, chain_id: u32) -> Self {
        self.action.chain_id = chain_id;
        self
    }

    pub fn set_nonce(mut self, nonce: u64) -> Self {
        self.action.nonce = nonce;
        self
    }

    pub fn set_gas_limit(mut self, gas_limit: u64) -> Self {
        self.action.gas_limit = gas_limit;
        self
    }

    pub fn set_gas_price(mut self, gas_price: TokenAmount) -> Self {
        self.action.gas_price = gas_price;
        self
    }

    pub fn build(self) -> AbstractAction {
        self.action
    }
}
