pub mod abi;
pub mod action;
pub mod envelope;
pub mod error;

pub use crate::action::{Action, EthCompatibleAction};
pub use crate::envelope::{AbstractAction, ActionBuilder};
pub use crate::error::{AbiError, ActionError};
