//! Answer-pool construction and shuffling.

use rand::Rng;

use crate::model::{AnswerChoice, ChoiceLabel, QuestionRecord};

/// Uniform in-place Fisher-Yates shuffle.
///
/// Walks the slice front to back, swapping each slot with one picked uniformly
/// from itself to the end.
pub fn fisher_yates<T, R: Rng + ?Sized>(pool: &mut [T], rng: &mut R) {
    let len = pool.len();
    for i in 0..len {
        let j = rng.random_range(i..len);
        pool.swap(i, j);
    }
}

/// Build the shuffled choice set for a question.
///
/// The pool is every incorrect answer followed by the correct one, duplicates
/// kept. Labels are positional after the shuffle; `is_correct` is fixed here by
/// string identity with the record's correct answer.
pub fn build_choices<R: Rng + ?Sized>(record: &QuestionRecord, rng: &mut R) -> Vec<AnswerChoice> {
    let mut pool: Vec<&str> = record
        .incorrect_answers()
        .iter()
        .map(String::as_str)
        .chain(std::iter::once(record.correct_answer()))
        .collect();

    fisher_yates(&mut pool, rng);

    pool.into_iter()
        .enumerate()
        .map(|(position, text)| {
            AnswerChoice::new(
                ChoiceLabel::new(position),
                text,
                text == record.correct_answer(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap;

    fn sorted_texts(choices: &[AnswerChoice]) -> Vec<String> {
        let mut texts: Vec<String> = choices.iter().map(|c| c.text.clone()).collect();
        texts.sort();
        texts
    }

    #[test]
    fn choices_are_a_permutation_of_the_pool() {
        let record = QuestionRecord::new("2+2?", "4", ["3", "5", "22"]);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let choices = build_choices(&record, &mut rng);
            assert_eq!(sorted_texts(&choices), vec!["22", "3", "4", "5"]);
        }
    }

    #[test]
    fn exactly_one_choice_is_correct() {
        let record = QuestionRecord::new("Capital of France?", "Paris", ["Lyon", "Nice", "Lille"]);
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            let choices = build_choices(&record, &mut rng);
            let correct: Vec<_> = choices.iter().filter(|c| c.is_correct).collect();
            assert_eq!(correct.len(), 1);
            assert_eq!(correct[0].text, "Paris");
        }
    }

    #[test]
    fn labels_are_positional() {
        let record = QuestionRecord::new("q", "a", ["b", "c"]);
        let mut rng = StdRng::seed_from_u64(3);
        let choices = build_choices(&record, &mut rng);
        let labels: Vec<usize> = choices.iter().map(|c| c.label.index()).collect();
        assert_eq!(labels, vec![0, 1, 2]);
    }

    #[test]
    fn duplicated_correct_answer_flags_every_copy() {
        let record = QuestionRecord::new("q", "same", ["same", "other"]);
        let mut rng = StdRng::seed_from_u64(5);
        let choices = build_choices(&record, &mut rng);
        assert_eq!(choices.len(), 3);
        assert_eq!(choices.iter().filter(|c| c.is_correct).count(), 2);
    }

    #[test]
    fn single_answer_record_yields_one_choice() {
        let record = QuestionRecord::new("q", "only", Vec::<String>::new());
        let mut rng = StdRng::seed_from_u64(5);
        let choices = build_choices(&record, &mut rng);
        assert_eq!(choices, vec![AnswerChoice::new(ChoiceLabel::new(0), "only", true)]);
    }

    #[test]
    fn empty_slice_is_a_no_op() {
        let mut pool: Vec<u8> = Vec::new();
        fisher_yates(&mut pool, &mut StdRng::seed_from_u64(1));
        assert!(pool.is_empty());
    }

    #[test]
    fn every_position_is_reachable() {
        // 3! = 6 orderings; with enough draws each should show up.
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen: HashMap<Vec<u8>, usize> = HashMap::new();
        for _ in 0..600 {
            let mut pool = vec![1_u8, 2, 3];
            fisher_yates(&mut pool, &mut rng);
            *seen.entry(pool).or_default() += 1;
        }
        assert_eq!(seen.len(), 6);
        assert!(seen.values().all(|count| *count > 50));
    }
}
