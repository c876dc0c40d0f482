use super::prng::{derive_seed, Mulberry32, Seed};
use crate::settings::RevealMode;

/// Offset applied to the base seed for the stream that shuffles random reveal orders.
///
/// Reveal orders draw from their own stream so computing one never moves the position of the
/// main stream.
pub const REVEAL_ORDER_SEED_OFFSET: u32 = 12345;

/// Helpers layered on a single seeded stream. Every call advances the stream.
#[derive(Debug, Clone)]
pub struct RandomUtils {
    seed: Seed,
    rng: Mulberry32,
}

impl RandomUtils {
    pub fn new(seed: Seed) -> Self {
        Self { seed, rng: Mulberry32::new(seed) }
    }

    /// The seed this stream was created from.
    pub fn seed(&self) -> Seed {
        self.seed
    }

    /// Next float in `[0, 1)`.
    pub fn next(&mut self) -> f64 {
        self.rng.next_f64()
    }

    /// Float in the half open range `[min, max)`.
    pub fn float(&mut self, min: f64, max: f64) -> f64 {
        self.next() * (max - min) + min
    }

    /// Integer in the inclusive range `[min, max]`.
    pub fn int(&mut self, min: i64, max: i64) -> i64 {
        (self.next() * (max - min + 1) as f64).floor() as i64 + min
    }

    /// Pick the element at `floor(next() * len)`.
    ///
    /// The slice is expected to be non-empty; an empty one still consumes a value from the stream
    /// and yields `None`.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        let index = (self.next() * items.len() as f64).floor() as usize;
        items.get(index)
    }

    /// In place Fisher-Yates shuffle.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        fisher_yates(&mut self.rng, items);
    }

    /// The order in which `length` units reveal, as a permutation of `0..length`.
    ///
    /// The random mode uses a separate stream derived from the seed, so this never advances
    /// the stream owned by `self`.
    pub fn reveal_order(&self, length: usize, mode: RevealMode) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..length).collect();
        match mode {
            RevealMode::Ltr => indices,
            RevealMode::Rtl => {
                indices.reverse();
                indices
            }
            RevealMode::Center => center_out(length),
            RevealMode::Random => {
                let mut rng = Mulberry32::new(derive_seed(self.seed, REVEAL_ORDER_SEED_OFFSET));
                fisher_yates(&mut rng, &mut indices);
                indices
            }
        }
    }
}

/// Invert a reveal order: `ranks[position]` is the step at which `position` reveals.
pub fn rank_of(order: &[usize]) -> Vec<usize> {
    let mut ranks = vec![0; order.len()];
    for (rank, &position) in order.iter().enumerate() {
        if let Some(slot) = ranks.get_mut(position) {
            *slot = rank;
        }
    }
    ranks
}

fn fisher_yates<T>(rng: &mut Mulberry32, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = (rng.next_f64() * (i + 1) as f64).floor() as usize;
        items.swap(i, j);
    }
}

fn center_out(length: usize) -> Vec<usize> {
    if length == 0 {
        return Vec::new();
    }
    let center = length / 2;
    let mut order = Vec::with_capacity(length);
    order.push(center);
    let mut offset = 1;
    while order.len() < length {
        if offset <= center {
            order.push(center - offset);
        }
        if center + offset < length {
            order.push(center + offset);
        }
        offset += 1;
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use strum::IntoEnumIterator;

    fn is_permutation(order: &[usize], length: usize) -> bool {
        let mut seen = vec![false; length];
        order.len() == length && order.iter().all(|&i| i < length && !std::mem::replace(&mut seen[i], true))
    }

    #[test]
    fn ranges() {
        let mut utils = RandomUtils::new(42);
        assert_eq!(utils.int(1, 10), 7);
        assert_eq!(utils.int(1, 10), 5);
        assert_eq!(utils.float(2.0, 5.0), 4.5573973804712296);
    }

    #[test]
    fn shuffle_matches_reference_stream() {
        let mut utils = RandomUtils::new(42);
        let mut items = [0, 1, 2, 3, 4, 5];
        utils.shuffle(&mut items);
        assert_eq!(items, [1, 0, 4, 5, 2, 3]);
    }

    #[test]
    fn pick_empty() {
        let mut utils = RandomUtils::new(1);
        let empty: [char; 0] = [];
        assert_eq!(utils.pick(&empty), None);
        assert!(utils.pick(&['a', 'b']).is_some());
    }

    #[rstest]
    #[case::ltr(RevealMode::Ltr, 4, vec![0, 1, 2, 3])]
    #[case::rtl(RevealMode::Rtl, 4, vec![3, 2, 1, 0])]
    #[case::center_odd(RevealMode::Center, 5, vec![2, 1, 3, 0, 4])]
    #[case::center_even(RevealMode::Center, 4, vec![2, 1, 3, 0])]
    #[case::random(RevealMode::Random, 5, vec![2, 3, 4, 1, 0])]
    #[case::random_longer(RevealMode::Random, 8, vec![2, 6, 3, 5, 4, 7, 1, 0])]
    fn reveal_orders(#[case] mode: RevealMode, #[case] length: usize, #[case] expected: Vec<usize>) {
        assert_eq!(RandomUtils::new(42).reveal_order(length, mode), expected);
    }

    #[test]
    fn reveal_order_is_always_a_permutation() {
        for mode in RevealMode::iter() {
            for length in 0..40 {
                let order = RandomUtils::new(length as u32 * 7).reveal_order(length, mode);
                assert!(is_permutation(&order, length), "{mode} {length}: {order:?}");
            }
        }
    }

    #[test]
    fn random_reveal_order_leaves_main_stream_untouched() {
        let mut touched = RandomUtils::new(9);
        touched.reveal_order(10, RevealMode::Random);
        let mut fresh = RandomUtils::new(9);
        assert_eq!(touched.next(), fresh.next());
    }

    #[test]
    fn ranks_invert_order() {
        assert_eq!(rank_of(&[2, 3, 4, 1, 0]), vec![4, 3, 0, 1, 2]);
        assert!(rank_of(&[]).is_empty());
    }
}
