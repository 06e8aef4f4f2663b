//! Channel mode changes.
//!
//! A MODE line such as `MODE #chan +ov-k alice bob key` is split into
//! atomic [`ModeChange`]s, one per mode letter.

mod parse;
mod types;

pub use self::parse::parse_channel_modes;
pub use self::types::{ChannelMode, ModeChange};
