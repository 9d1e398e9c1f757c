use action_sdk::abi::{AbiMethod, AbiValue};
use action_sdk::{AbstractAction, Action, ActionBuilder, ActionError, EthCompatibleAction};
use fvm_ipld_encoding::Cbor;
use fvm_shared::econ::TokenAmount;
use num_traits::Zero;

use crate::abi::grant_reward_method;
use crate::message::GrantRewardMessage;
use crate::reward_type::RewardType;

/// Action instructing the runtime to grant a block or epoch reward at the
/// given height.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GrantReward {
    action: AbstractAction,
    reward_type: RewardType,
    height: u64,
}

impl GrantReward {
    pub fn reward_type(&self) -> RewardType {
        self.reward_type
    }

    /// Block height the reward is granted for.
    pub fn height(&self) -> u64 {
        self.height
    }

    pub fn to_message(&self) -> GrantRewardMessage {
        GrantRewardMessage {
            height: self.height,
            reward_type: self.reward_type.tag(),
        }
    }

    /// Replaces the whole action, envelope included, with the content of
    /// the message.
    pub fn load_message(&mut self, msg: &GrantRewardMessage) -> Result<(), ActionError> {
        *self = GrantReward {
            height: msg.height,
            reward_type: RewardType::from_tag(msg.reward_type),
            ..Default::default()
        };
        if !self.reward_type.is_defined() {
            log::warn!(
                "grant reward at height {} carries unknown reward type {}",
                msg.height,
                msg.reward_type
            );
        }
        Ok(())
    }

    /// Decodes the native encoding produced by `serialize`.
    pub fn from_bytes(bz: &[u8]) -> Result<Self, ActionError> {
        let msg = GrantRewardMessage::unmarshal_cbor(bz)
            .map_err(|e| ActionError::Decode(e.to_string()))?;
        let mut g = GrantReward::default();
        g.load_message(&msg)?;
        Ok(g)
    }

    /// Decodes the call data produced by `eth_data`.
    pub fn from_eth_data(data: &[u8]) -> Result<Self, ActionError> {
        match grant_reward_method().decode_call(data)?.as_slice() {
            [AbiValue::Int(t), AbiValue::Uint(height)] => Ok(GrantReward {
                // int8 range is enforced by decode_call
                reward_type: RewardType::from_tag(*t as i32),
                height: *height,
                ..Default::default()
            }),
            values => Err(ActionError::Decode(format!(
                "unexpected grantReward arguments: {:?}",
                values
            ))),
        }
    }
}

impl Action for GrantReward {
    fn action(&self) -> &AbstractAction {
        &self.action
    }

    fn sanity_check(&self) -> Result<(), ActionError> {
        self.action.sanity_check()?;
        if let RewardType::Unspecified(tag) = self.reward_type {
            return Err(ActionError::SanityCheck(format!(
                "unknown reward type {}",
                tag
            )));
        }
        Ok(())
    }

    /// Reward grants are protocol-internal and not metered.
    fn intrinsic_gas(&self) -> Result<u64, ActionError> {
        Ok(0)
    }

    fn cost(&self) -> Result<TokenAmount, ActionError> {
        Ok(TokenAmount::zero())
    }

    fn serialize(&self) -> Vec<u8> {
        self.to_message()
            .marshal_cbor()
            .expect("grant reward message is always encodable")
    }
}

impl EthCompatibleAction for GrantReward {
    fn eth_method(&self) -> &'static AbiMethod {
        grant_reward_method()
    }

    fn eth_data(&self) -> Result<Vec<u8>, ActionError> {
        let data = grant_reward_method().encode_call(&[
            AbiValue::Int(self.reward_type.tag() as i64),
            AbiValue::Uint(self.height),
        ])?;
        Ok(data)
    }
}

/// Staged construction of a `GrantReward`. The envelope fields come from
/// the wrapped `ActionBuilder`.
#[derive(Debug, Clone, Default)]
pub struct GrantRewardBuilder {
    builder: ActionBuilder,
    grant_reward: GrantReward,
}

impl GrantRewardBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_action(mut self, builder: ActionBuilder) -> Self {
        self.builder = builder;
        self
    }

    pub fn set_reward_type(mut self, t: RewardType) -> Self {
        self.grant_reward.reward_type = t;
        self
    }

    pub fn set_height(mut self, height: u64) -> Self {
        self.grant_reward.height = height;
        self
    }

    pub fn build(self) -> GrantReward {
        GrantReward {
            action: self.builder.build(),
            ..self.grant_reward
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::WireRewardType;

    #[test]
    fn test_grant_reward() {
        let cases = [
            (RewardType::BlockReward, 100, WireRewardType::BlockReward),
            (RewardType::EpochReward, 200, WireRewardType::EpochReward),
        ];
        for (reward_type, height, wire) in cases {
            let g = GrantRewardBuilder::new()
                .set_reward_type(reward_type)
                .set_height(height)
                .build();
            assert_eq!(g.reward_type(), reward_type);
            assert_eq!(g.height(), height);
            assert!(g.sanity_check().is_ok());

            let msg = g.to_message();
            assert_eq!(
                msg,
                GrantRewardMessage {
                    height,
                    reward_type: wire as i32
                }
            );

            let mut loaded = GrantReward::default();
            loaded.load_message(&msg).unwrap();
            assert_eq!(loaded.reward_type(), reward_type);
            assert_eq!(loaded.height(), height);

            assert_eq!(g.intrinsic_gas().unwrap(), 0);
            assert_eq!(g.cost().unwrap(), TokenAmount::zero());
        }
    }

    #[test]
    fn test_load_message_resets_state() {
        let mut g = GrantRewardBuilder::new()
            .with_action(ActionBuilder::new().set_nonce(9).set_gas_limit(50))
            .set_reward_type(RewardType::EpochReward)
            .set_height(42)
            .build();
        assert_eq!(g.action().nonce(), 9);

        g.load_message(&GrantRewardMessage {
            height: 7,
            reward_type: 0,
        })
        .unwrap();
        assert_eq!(g.action(), &AbstractAction::default());
        assert_eq!(g.reward_type(), RewardType::BlockReward);
        assert_eq!(g.height(), 7);
    }

    #[test]
    fn test_unknown_reward_type() {
        let mut g = GrantReward::default();
        g.load_message(&GrantRewardMessage {
            height: 1,
            reward_type: 42,
        })
        .unwrap();
        assert_eq!(g.reward_type(), RewardType::Unspecified(42));
        assert!(matches!(
            g.sanity_check(),
            Err(ActionError::SanityCheck(_))
        ));
        // the raw tag survives re-encoding
        assert_eq!(g.to_message().reward_type, 42);
    }

    #[test]
    fn test_serialize() {
        let g = GrantRewardBuilder::new()
            .set_reward_type(RewardType::BlockReward)
            .set_height(100)
            .build();
        assert_eq!(hex::encode(g.serialize()), "82186400");
        assert_eq!(g.serialize(), g.serialize());

        let decoded = GrantReward::from_bytes(&g.serialize()).unwrap();
        assert_eq!(decoded.reward_type(), RewardType::BlockReward);
        assert_eq!(decoded.height(), 100);

        assert!(matches!(
            GrantReward::from_bytes(&[0xff]),
            Err(ActionError::Decode(_))
        ));
    }

    #[test]
    fn test_eth_data() {
        let g = GrantRewardBuilder::new()
            .set_reward_type(RewardType::EpochReward)
            .set_height(200)
            .build();
        let data = g.eth_data().unwrap();
        let expected = concat!(
            "d72778dc",
            "0000000000000000000000000000000000000000000000000000000000000001",
            "00000000000000000000000000000000000000000000000000000000000000c8",
        );
        assert_eq!(hex::encode(&data), expected);
        assert_eq!(g.eth_method().selector(), [0xd7, 0x27, 0x78, 0xdc]);

        let decoded = GrantReward::from_eth_data(&data).unwrap();
        assert_eq!(decoded.reward_type(), RewardType::EpochReward);
        assert_eq!(decoded.height(), 200);
    }

    #[test]
    fn test_eth_data_overflow() {
        let g = GrantRewardBuilder::new()
            .set_reward_type(RewardType::Unspecified(200))
            .set_height(1)
            .build();
        assert!(matches!(g.eth_data(), Err(ActionError::Abi(_))));

        // still representable as int8
        let g = GrantRewardBuilder::new()
            .set_reward_type(RewardType::Unspecified(-1))
            .build();
        let data = g.eth_data().unwrap();
        assert_eq!(&data[4..36], &[0xff; 32]);
    }

    #[test]
    fn test_builder_values_are_independent() {
        let builder = GrantRewardBuilder::new()
            .with_action(ActionBuilder::new().set_nonce(3))
            .set_reward_type(RewardType::BlockReward)
            .set_height(10);
        let first = builder.clone().build();
        let second = builder.set_height(11).build();

        assert_eq!(first.height(), 10);
        assert_eq!(second.height(), 11);
        assert_eq!(first.action(), second.action());
        assert_eq!(first.action().nonce(), 3);
    }

    #[test]
    fn test_negative_gas_price_fails_sanity_check() {
        let g = GrantRewardBuilder::new()
            .with_action(ActionBuilder::new().set_gas_price(TokenAmount::from_atto(-5)))
            .set_reward_type(RewardType::EpochReward)
            .build();
        assert!(matches!(
            g.sanity_check(),
            Err(ActionError::NegativeGasPrice)
        ));
    }
}
