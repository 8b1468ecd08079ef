//! Adapter crate - the game's boundary with files and presentation layers
//!
//! - [`level`]: level JSON loading, validated before any board exists
//! - [`protocol`]: line-delimited JSON messages describing observations,
//!   turns, shuffles and hints
//!
//! # Example Message Flow
//!
//! ```text
//! {"type":"shuffle","seq":0,"pieces":[{"id":0,"kind":"donut",...},...],"legal_swaps":7}
//! {"type":"observation","seq":1,"columns":9,"rows":9,"tiles":[[0,1,1,...],...],...}
//! {"type":"hint","seq":2,"swap":{"first":{"column":2,"row":0},"second":{"column":3,"row":0}}}
//! {"type":"turn","seq":3,"swap":{...},"steps":[{"chains":[...],...,"score":60}],...}
//! ```

pub mod level;
pub mod protocol;

pub use cookie_crunch_types as types;

pub use level::{load_level_file, load_level_str, LoadError};
pub use protocol::{
    ErrorMessage, HintMessage, ObservationMessage, ShuffleMessage, TurnMessage,
};
