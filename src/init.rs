//! One-shot construction of the process-wide lookup tables.
//!
//! The sliding-attack magics and the Zobrist keys are drawn from a single
//! xorshift64* stream, so one seed reproduces every table exactly. The
//! tables live behind a `OnceLock`: they are built at most once, the
//! first initialization wins, and afterwards they are immutable and safe
//! to read from any thread.

use std::sync::OnceLock;

use crate::moves::sliding_moves::SlidingAttacks;
use crate::random::Xorshift64;
use crate::zobrist::ZobristKeys;

/// Seed used when the tables are first touched without an explicit
/// [`init_with_seed`] call.
pub const DEFAULT_SEED: u64 = 2147483647;

pub(crate) struct EngineTables {
    pub(crate) attacks: SlidingAttacks,
    pub(crate) zobrist: ZobristKeys,
}

static TABLES: OnceLock<EngineTables> = OnceLock::new();

/// Build the attack and hashing tables from the default seed.
///
/// Calling this is optional: any accessor initializes the tables on first
/// use. An explicit call moves the construction cost to a known point.
pub fn init() {
    init_with_seed(DEFAULT_SEED);
}

/// Build the tables from a caller-chosen seed. A no-op if the tables have
/// already been built; the seed of the first initialization sticks.
pub fn init_with_seed(seed: u64) {
    let _ = TABLES.get_or_init(|| build_tables(seed));
}

#[inline]
pub(crate) fn tables() -> &'static EngineTables {
    TABLES.get_or_init(|| build_tables(DEFAULT_SEED))
}

fn build_tables(seed: u64) -> EngineTables {
    let mut rng = Xorshift64::new(seed);
    let attacks = SlidingAttacks::generate(&mut rng);
    let zobrist = ZobristKeys::generate(&mut rng);
    EngineTables { attacks, zobrist }
}

#[cfg(test)]
mod tests {
    use super::{init, tables};

    #[test]
    fn tables_are_built_once_and_stable() {
        init();
        let first = tables() as *const _;
        init();
        let second = tables() as *const _;
        assert_eq!(first, second);
    }
}
