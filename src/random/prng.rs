/// Seed identifying one reproducible random stream.
pub type Seed = u32;

/// JavaScript source of the exact same generator, embedded into exported artifacts so that
/// they replay the preview bit-for-bit.
pub const PRNG_JS_SOURCE: &str = r#"function createPRNG(seed) {
  let state = seed;
  return function random() {
    state |= 0;
    state = (state + 0x6d2b79f5) | 0;
    let t = Math.imul(state ^ (state >>> 15), 1 | state);
    t = (t + Math.imul(t ^ (t >>> 7), 61 | t)) ^ t;
    return ((t ^ (t >>> 14)) >>> 0) / 4294967296;
  };
}"#;

const INCREMENT: u32 = 0x6D2B_79F5;
const TWO_POW_32: f64 = 4_294_967_296.0;

/// Mulberry32: a 32 bit generator with a single word of state.
///
/// The state transition only uses wrapping 32 bit integer arithmetic, so any platform that
/// implements that faithfully produces the same stream for the same seed. Floating point is only
/// involved in the final normalization in [Mulberry32::next_f64].
#[derive(Debug, Clone)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    /// Create a generator positioned at the start of the stream for `seed`.
    pub fn new(seed: Seed) -> Self {
        Self { state: seed }
    }

    /// Advance the stream and return the next raw 32 bit output.
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(INCREMENT);
        let state = self.state;
        let mut t = (state ^ (state >> 15)).wrapping_mul(state | 1);
        t = t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61)) ^ t;
        t ^ (t >> 14)
    }

    /// Advance the stream and return a float in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / TWO_POW_32
    }
}

impl Iterator for Mulberry32 {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.next_f64())
    }
}

/// Derive the seed of an independent stream by offsetting the base seed.
///
/// Seeds are truncated to 32 bits when a generator starts, so offsets wrap around.
pub fn derive_seed(seed: Seed, offset: u32) -> Seed {
    seed.wrapping_add(offset)
}
