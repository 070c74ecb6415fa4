pub mod config_cmd;
pub mod gen;
pub mod json;
pub mod repl;

use tangle_engine::RngSource;

/// Seeded source plus the seed itself, drawing a fresh seed when none is
/// given so every run can be replayed.
pub fn seeded_source(seed: Option<u64>) -> (u64, RngSource<rand::rngs::StdRng>) {
    let seed = seed.unwrap_or_else(rand::random);
    tracing::debug!(seed, "random source");
    (seed, RngSource::seeded(seed))
}
