use fastrand::Rng;

/// In-place Fisher-Yates: walk from the back, swapping each slot with a
/// uniformly chosen index at or before it.
pub fn shuffle<T>(rng: &mut Rng, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = rng.usize(0..=i);
        items.swap(i, j);
    }
}

/// Returns a shuffled copy, leaving the input untouched.
pub fn shuffled<T: Clone>(rng: &mut Rng, items: &[T]) -> Vec<T> {
    let mut out = items.to_vec();
    shuffle(rng, &mut out);
    out
}

/// Seeded generator when a seed is given, system entropy otherwise.
pub fn make_rng(seed: Option<u64>) -> Rng {
    match seed {
        Some(s) => Rng::with_seed(s),
        None => Rng::new(),
    }
}
