use action_sdk::abi::{AbiInterface, AbiMethod};
use action_sdk::AbiError;
use anyhow::Context;
use lazy_static::lazy_static;

pub const GRANT_REWARD_METHOD_NAME: &str = "grantReward";

/// Canonical interface description of the grant reward call.
pub const GRANT_REWARD_INTERFACE_ABI: &str = r#"[
    {
        "inputs": [
            {
                "internalType": "int8",
                "name": "rewardType",
                "type": "int8"
            },
            {
                "internalType": "uint64",
                "name": "height",
                "type": "uint64"
            }
        ],
        "name": "grantReward",
        "outputs": [],
        "stateMutability": "nonpayable",
        "type": "function"
    }
]"#;

lazy_static! {
    static ref GRANT_REWARD_METHOD: Result<AbiMethod, AbiError> =
        load_method(GRANT_REWARD_INTERFACE_ABI, GRANT_REWARD_METHOD_NAME);
}

fn load_method(interface: &str, name: &str) -> Result<AbiMethod, AbiError> {
    AbiInterface::from_json(interface)?.into_method(name)
}

/// Loads the grant reward ABI descriptor. Hosts call this once at startup
/// and abort on error; later calls are no-ops returning the same result.
pub fn init() -> anyhow::Result<()> {
    let method = match &*GRANT_REWARD_METHOD {
        Ok(method) => method,
        Err(e) => return Err(e.clone()).context("failed to load the grantReward abi"),
    };
    log::debug!(
        "loaded {} with selector {:02x?}",
        method.signature(),
        method.selector()
    );
    Ok(())
}

/// The shared grant reward descriptor.
///
/// Panics if the canonical interface fails to load, which `init` reports
/// at startup.
pub fn grant_reward_method() -> &'static AbiMethod {
    match &*GRANT_REWARD_METHOD {
        Ok(method) => method,
        Err(e) => panic!("grantReward abi is unavailable: {}", e),
    }
}
