mod simulator;
mod simulator_config;
mod simulator_error;

pub use simulator::*;
pub use simulator_config::*;
pub use simulator_error::*;
