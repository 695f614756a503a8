// Dictionary near-miss scan
//
// Edit generators only reach words one operation away. This pass walks the
// expanded forms of every stem of about the right length and keeps those
// within the distance bound, so two-edit misspellings ("walkk" -> "walked")
// are still found.

use morphspell_core::case::{CaseType, detect_case, set_case};
use morphspell_core::enums::MAX_SUGGESTION_DISTANCE;

use super::generators::suggest_word;
use super::status::{SuggestionStatus, suggestion_distance};
use crate::morphology::Lexicon;
use crate::speller::Speller;

/// Something that can enumerate surface forms by approximate length.
pub trait FormSource {
    /// Visit every form whose length may lie within `slack` characters of
    /// `length`. Forms outside the window may be visited too.
    fn for_each_form_near(&self, length: usize, slack: usize, visit: &mut dyn FnMut(&str));
}

impl FormSource for Lexicon<'_> {
    fn for_each_form_near(&self, length: usize, slack: usize, visit: &mut dyn FnMut(&str)) {
        Lexicon::for_each_form_near(self, length, slack, visit);
    }
}

/// Near-miss scan over a [`FormSource`].
///
/// Runs after the edit generators and is bounded by the suggestion count
/// only, not by the cost budget.
#[derive(Debug, Clone, Copy, Default)]
pub struct NearMiss;

impl NearMiss {
    pub fn generate(
        &self,
        forms: &dyn FormSource,
        speller: &dyn Speller,
        status: &mut SuggestionStatus<'_>,
    ) {
        let input = status.input().to_string();
        let length = status.word_len();
        let case = detect_case(&input);

        let mut close: Vec<(usize, String)> = Vec::new();
        forms.for_each_form_near(length, MAX_SUGGESTION_DISTANCE, &mut |form| {
            let candidate = match case {
                CaseType::FirstUpper | CaseType::AllUpper => set_case(form, case),
                _ => form.to_string(),
            };
            let distance = suggestion_distance(&input, &candidate);
            if distance <= MAX_SUGGESTION_DISTANCE && !close.iter().any(|(_, c)| *c == candidate) {
                close.push((distance, candidate));
            }
        });
        close.sort_by_key(|(distance, _)| *distance);

        status.set_max_cost(usize::MAX);
        for (_, candidate) in close {
            if status.is_full() {
                break;
            }
            suggest_word(speller, status, &candidate);
        }
    }
}
