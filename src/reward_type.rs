use num_traits::FromPrimitive;
use std::fmt;
use std::str::FromStr;

use crate::message::WireRewardType;

/// The kind of reward a grant reward action pays out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RewardType {
    /// Reward for producing a block.
    #[default]
    BlockReward,
    /// Reward distributed at the end of an epoch.
    EpochReward,
    /// A wire tag outside the known set, kept verbatim so re-encoding the
    /// action reproduces the original bytes. Never passes a sanity check.
    Unspecified(i32),
}

impl RewardType {
    /// Maps a wire tag to a reward type. Unknown tags map to
    /// `Unspecified` rather than failing.
    pub fn from_tag(tag: i32) -> Self {
        match WireRewardType::from_i32(tag) {
            Some(t) => t.into(),
            None => RewardType::Unspecified(tag),
        }
    }

    pub fn tag(&self) -> i32 {
        match self {
            RewardType::BlockReward => WireRewardType::BlockReward as i32,
            RewardType::EpochReward => WireRewardType::EpochReward as i32,
            RewardType::Unspecified(tag) => *tag,
        }
    }

    pub fn is_defined(&self) -> bool {
        !matches!(self, RewardType::Unspecified(_))
    }
}

impl From<WireRewardType> for RewardType {
    fn from(t: WireRewardType) -> Self {
        match t {
            WireRewardType::BlockReward => RewardType::BlockReward,
            WireRewardType::EpochReward => RewardType::EpochReward,
        }
    }
}

impl fmt::Display for RewardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RewardType::BlockReward => write!(f, "block"),
            RewardType::EpochReward => write!(f, "epoch"),
            RewardType::Unspecified(tag) => write!(f, "unspecified({})", tag),
        }
    }
}

impl FromStr for RewardType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "block" => Ok(RewardType::BlockReward),
            "epoch" => Ok(RewardType::EpochReward),
            _ => Err(format!("unknown reward type: {}", s)),
        }
    }
}
