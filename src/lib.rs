// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod burst;
pub mod config;
pub mod pace;
pub mod runtime;
pub mod scene;
pub mod session;
pub mod spawner;
pub mod stats;
pub mod tier;
pub mod util;

pub const TICK_RATE_MS: u64 = 100;
