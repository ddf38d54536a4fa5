mod coin;
mod coin_authority;
mod coin_error;
mod coin_list;
mod coin_query;
mod coin_set_provider;
mod coin_state;
mod query_error;

pub use coin::*;
pub use coin_authority::*;
pub use coin_error::*;
pub use coin_list::*;
pub use coin_query::*;
pub use coin_set_provider::*;
pub use coin_state::*;
pub use query_error::*;

#[cfg(test)]
mod testing;
