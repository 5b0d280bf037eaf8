use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use crate::HangmanError;

/// Summed occurrences of each letter.
///
/// A letter that appears twice in one word counts twice. Keys iterate in alphabetical order,
/// which is what makes letter selection reproducible.
pub type LetterFrequencies = BTreeMap<char, usize>;

/// Count how often each letter occurs in `word`
pub fn frequency_of(word: &str) -> LetterFrequencies {
    let mut counts = LetterFrequencies::new();
    for letter in word.chars() {
        *counts.entry(letter).or_insert(0) += 1;
    }
    counts
}

/// Sum the counts of every letter across all the maps.
///
/// A letter missing from a map contributes nothing for that map. Merging no maps gives an empty
/// map.
pub fn merge<I>(maps: I) -> LetterFrequencies
where
    I: IntoIterator,
    I::Item: Borrow<LetterFrequencies>,
{
    maps.into_iter().fold(LetterFrequencies::new(), |mut merged, map| {
        for (&letter, &count) in Borrow::<LetterFrequencies>::borrow(&map) {
            *merged.entry(letter).or_insert(0) += count;
        }
        merged
    })
}

/// Pick the unguessed letter that occurs most often across `candidates`.
///
/// Ties go to the alphabetically first letter.
pub fn choose_letter<S>(candidates: &[S], guessed: &BTreeSet<char>) -> Result<char, HangmanError>
where
    S: AsRef<str>,
{
    if candidates.is_empty() {
        return Err(HangmanError::NoCandidateWords);
    }
    let mut scores = merge(candidates.iter().map(|word| frequency_of(word.as_ref())));
    for letter in guessed {
        if let Some(score) = scores.get_mut(letter) {
            *score = 0;
        }
    }
    scores
        .into_iter()
        .filter(|&(_, score)| score > 0)
        // Reverse the letter order so the alphabetically first one wins a tie
        .max_by(|(a, a_score), (b, b_score)| match a_score.cmp(b_score) {
            Ordering::Equal => b.cmp(a),
            unequal => unequal,
        })
        .map(|(letter, _)| letter)
        .ok_or(HangmanError::NoUnguessedLetters)
}
