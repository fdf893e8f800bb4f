//! Option-order randomization.
//!
//! Each question's options are permuted once, with a Fisher–Yates shuffle,
//! when a session is built. The permuted order is stored in the `Question`
//! and never recomputed.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::model::Question;

/// Return `question` with its options in a uniformly random order.
pub fn shuffle_options<R: Rng + ?Sized>(mut question: Question, rng: &mut R) -> Question {
    question.options.shuffle(rng);
    question
}

/// Shuffle the options of every question, keeping question order.
pub fn shuffle_all<R: Rng + ?Sized>(questions: Vec<Question>, rng: &mut R) -> Vec<Question> {
    questions
        .into_iter()
        .map(|q| shuffle_options(q, rng))
        .collect()
}
