mod coin_id;
mod color;
mod freeze;
mod parse_error;
mod raw_coin;
mod script;
mod txid;

pub use coin_id::*;
pub use color::*;
pub use freeze::*;
pub use parse_error::*;
pub use raw_coin::*;
pub use script::*;
pub use txid::*;
