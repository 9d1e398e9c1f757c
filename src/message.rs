use fvm_ipld_encoding::tuple::{Deserialize_tuple, Serialize_tuple};
use fvm_ipld_encoding::Cbor;
use num_derive::FromPrimitive;

/// Closed set of reward kinds as they appear on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
#[repr(i32)]
pub enum WireRewardType {
    BlockReward = 0,
    EpochReward = 1,
}

/// Native wire form of a grant reward action.
///
/// The reward type is kept as an open `i32` so a message carrying a tag
/// this node does not know still decodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize_tuple, Deserialize_tuple)]
pub struct GrantRewardMessage {
    pub height: u64,
    pub reward_type: i32,
}
impl Cbor for GrantRewardMessage {}
