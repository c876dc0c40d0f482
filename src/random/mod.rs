mod prng;
mod utils;

pub use prng::{derive_seed, Mulberry32, Seed, PRNG_JS_SOURCE};
pub use utils::{rank_of, RandomUtils, REVEAL_ORDER_SEED_OFFSET};
