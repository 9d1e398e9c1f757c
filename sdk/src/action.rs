use fvm_shared::econ::TokenAmount;

use crate::abi::AbiMethod;
use crate::envelope::AbstractAction;
use crate::error::ActionError;

/// Capabilities the dispatch layer expects from every action.
pub trait Action {
    /// The shared envelope fields of the action.
    fn action(&self) -> &AbstractAction;

    /// Structural validation. The default only checks the envelope.
    fn sanity_check(&self) -> Result<(), ActionError> {
        self.action().sanity_check()
    }

    /// Gas charged before execution starts.
    fn intrinsic_gas(&self) -> Result<u64, ActionError>;

    /// Total amount the sender is charged for the action.
    fn cost(&self) -> Result<TokenAmount, ActionError>;

    /// Canonical native encoding of the action payload.
    fn serialize(&self) -> Vec<u8>;
}

/// Actions that can be exposed through a legacy Ethereum transaction,
/// where the payload travels as contract call data.
pub trait EthCompatibleAction: Action {
    /// The ABI method describing the call data layout.
    fn eth_method(&self) -> &'static AbiMethod;

    /// Selector followed by the ABI-packed arguments.
    fn eth_data(&self) -> Result<Vec<u8>, ActionError>;
}
