pub mod driver;
pub mod state;

pub use state::StatsState;
