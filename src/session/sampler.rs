use rand::Rng;
use rand::seq::SliceRandom;

use crate::catalog::WordEntry;

/// Build the presentation set for one question: `distractors` wrong options
/// drawn uniformly without replacement from `pool` (anything sharing the
/// correct entry's id is excluded), plus the correct entry itself, in a
/// uniformly shuffled order.
///
/// An undersized pool degrades to fewer distractors rather than failing.
pub fn sample_options<R: Rng>(
    correct: &WordEntry,
    pool: &[WordEntry],
    distractors: usize,
    rng: &mut R,
) -> Vec<WordEntry> {
    let mut candidates: Vec<&WordEntry> =
        pool.iter().filter(|w| w.id != correct.id).collect();
    // Fisher-Yates, so every k-subset and every order is equally likely
    candidates.shuffle(rng);
    candidates.truncate(distractors);

    let mut options: Vec<WordEntry> = candidates.into_iter().cloned().collect();
    options.push(correct.clone());
    options.shuffle(rng);
    options
}
