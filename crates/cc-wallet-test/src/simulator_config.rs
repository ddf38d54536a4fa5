/// Settings for a [`CoinSimulator`](crate::CoinSimulator).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatorConfig {
    /// How many confirmations a coin needs before it is available to spend.
    pub confirmations: u32,

    /// The block height the simulated chain starts at.
    pub height: u32,

    /// The unix timestamp the simulated clock starts at, in seconds.
    pub timestamp: u64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            confirmations: 1,
            height: 0,
            timestamp: 1_600_000_000,
        }
    }
}
