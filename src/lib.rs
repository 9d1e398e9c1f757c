//! The grant reward action: an instruction appended to a block telling the
//! execution layer to pay out a block or epoch reward at a given height.

pub mod abi;
mod grant_reward;
pub mod message;
mod reward_type;

pub use self::abi::{grant_reward_method, init};
pub use self::grant_reward::{GrantReward, GrantRewardBuilder};
pub use self::message::{GrantRewardMessage, WireRewardType};
pub use self::reward_type::RewardType;
pub use action_sdk::{AbstractAction, Action, ActionBuilder, ActionError, EthCompatibleAction};
