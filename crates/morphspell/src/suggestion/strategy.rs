// Suggestion strategy orchestration

use morphspell_aff::aff::AffixTable;
use morphspell_aff::dic::Dictionary;

use super::generators::*;
use super::near_miss::{FormSource, NearMiss};
use super::status::SuggestionStatus;
use crate::speller::Speller;

/// Default cost budget: number of spell checks made by the edit generators.
pub const DEFAULT_MAX_COST: usize = 2000;

/// A suggestion strategy holds primary and secondary generator lists and
/// orchestrates them with a cost budget.
pub struct SuggestionStrategy {
    max_cost: usize,
    /// Run first; if any produce suggestions, the rest are skipped.
    primary_generators: Vec<Box<dyn SuggestionGenerator>>,
    generators: Vec<Box<dyn SuggestionGenerator>>,
    /// Final pass over dictionary forms, when a form source is given.
    near_miss: Option<NearMiss>,
}

impl SuggestionStrategy {
    pub fn new(
        max_cost: usize,
        primary_generators: Vec<Box<dyn SuggestionGenerator>>,
        generators: Vec<Box<dyn SuggestionGenerator>>,
    ) -> Self {
        Self {
            max_cost,
            primary_generators,
            generators,
            near_miss: None,
        }
    }

    pub fn with_near_miss(mut self) -> Self {
        self.near_miss = Some(NearMiss);
        self
    }

    pub fn max_cost(&self) -> usize {
        self.max_cost
    }

    pub fn set_max_cost(&mut self, max_cost: usize) {
        self.max_cost = max_cost;
    }

    pub fn generator_count(&self) -> usize {
        self.primary_generators.len() + self.generators.len()
    }

    /// Run the strategy: primary generators, then the secondary ones and the
    /// near-miss scan if the primaries found nothing.
    pub fn generate(
        &self,
        speller: &dyn Speller,
        forms: Option<&dyn FormSource>,
        status: &mut SuggestionStatus<'_>,
    ) {
        status.set_max_cost(self.max_cost);

        for generator in &self.primary_generators {
            if status.should_abort() {
                break;
            }
            generator.generate(speller, status);
        }
        if status.suggestion_count() > 0 {
            return;
        }

        for generator in &self.generators {
            if status.should_abort() {
                break;
            }
            generator.generate(speller, status);
        }

        if let (Some(near_miss), Some(forms)) = (&self.near_miss, forms) {
            near_miss.generate(forms, speller, status);
        }
    }
}

/// Build the strategy described by an affix table.
///
/// Substitution and insertion characters come from `TRY`; without it the
/// dictionary's letters are used, most frequent first.
pub fn strategy_for_table(
    table: &AffixTable,
    dictionary: &Dictionary,
    max_cost: usize,
) -> SuggestionStrategy {
    let characters: Vec<char> = match &table.try_chars {
        Some(try_chars) => try_chars.chars().collect(),
        None => dictionary.char_frequency_alphabet(),
    };

    let primary_generators: Vec<Box<dyn SuggestionGenerator>> = vec![Box::new(CaseChange)];

    let mut generators: Vec<Box<dyn SuggestionGenerator>> = vec![
        Box::new(Replacements {
            table: table.replacements.clone(),
        }),
        Box::new(MapRelated {
            groups: table.map.clone(),
        }),
        Box::new(KeyAdjacency::new(&table.key)),
        Box::new(Swap),
        Box::new(Deletion),
        Box::new(Substitution {
            characters: characters.clone(),
        }),
        Box::new(Insertion { characters }),
    ];
    if !table.no_split_suggestions {
        generators.push(Box::new(SplitWord));
    }

    SuggestionStrategy::new(max_cost, primary_generators, generators).with_near_miss()
}

#[cfg(test)]
mod tests {
    use super::*;
    use morphspell_core::enums::SpellResult;

    struct MockSpeller(Vec<&'static str>);

    impl Speller for MockSpeller {
        fn spell(&self, word: &str) -> SpellResult {
            if self.0.iter().any(|w| *w == word) {
                SpellResult::Ok
            } else {
                SpellResult::Failed
            }
        }
    }

    struct Forms(Vec<&'static str>);

    impl FormSource for Forms {
        fn for_each_form_near(&self, _length: usize, _slack: usize, visit: &mut dyn FnMut(&str)) {
            self.0.iter().for_each(|form| visit(form));
        }
    }

    fn suggest(
        strategy: &SuggestionStrategy,
        accepted: &[&'static str],
        forms: Option<&dyn FormSource>,
        input: &str,
    ) -> Vec<String> {
        let speller = MockSpeller(accepted.to_vec());
        let word: Vec<char> = input.chars().collect();
        let mut status = SuggestionStatus::new(&word, 10);
        strategy.generate(&speller, forms, &mut status);
        status.sort_suggestions();
        status.into_suggestions().into_iter().map(|s| s.word).collect()
    }

    fn load(aff: &str) -> (AffixTable, Dictionary) {
        let table = AffixTable::parse(aff).unwrap();
        let (dictionary, _) = Dictionary::parse("2\nwalk\ntalk\n", &table).unwrap();
        (table, dictionary)
    }

    #[test]
    fn primary_success_skips_secondaries() {
        let (table, dic) = load("");
        let strategy = strategy_for_table(&table, &dic, DEFAULT_MAX_COST);
        let found = suggest(&strategy, &["walk", "Walk"], None, "WAlk");
        assert_eq!(found, vec!["Walk", "walk"]);
    }

    #[test]
    fn secondaries_and_near_miss() {
        let (table, dic) = load("");
        let strategy = strategy_for_table(&table, &dic, DEFAULT_MAX_COST);
        let forms = Forms(vec!["walk", "walked"]);
        let found = suggest(&strategy, &["walk", "walked"], Some(&forms), "walkk");
        assert_eq!(found, vec!["walk", "walked"]);
    }

    #[test]
    fn alphabet_from_try_or_dictionary() {
        let (table, dic) = load("TRY xyz\n");
        let strategy = strategy_for_table(&table, &dic, DEFAULT_MAX_COST);
        // "wxlk" needs 'a', which TRY does not offer; no form source either.
        assert!(suggest(&strategy, &["walk"], None, "wxlk").is_empty());

        let (table, dic) = load("");
        let strategy = strategy_for_table(&table, &dic, DEFAULT_MAX_COST);
        assert_eq!(suggest(&strategy, &["walk"], None, "wxlk"), vec!["walk"]);
    }

    #[test]
    fn no_split_suggestions() {
        let (table_default, dic) = load("");
        let with_split = strategy_for_table(&table_default, &dic, DEFAULT_MAX_COST);
        let (table_nosplit, _) = load("NOSPLITSUGS\n");
        let without_split = strategy_for_table(&table_nosplit, &dic, DEFAULT_MAX_COST);
        assert_eq!(with_split.generator_count(), without_split.generator_count() + 1);
        assert_eq!(
            suggest(&with_split, &["walk", "talk"], None, "walktalk"),
            vec!["walk talk"]
        );
        assert!(suggest(&without_split, &["walk", "talk"], None, "walktalk").is_empty());
    }

    #[test]
    fn budget_is_passed_on() {
        let mut strategy = SuggestionStrategy::new(5, vec![Box::new(CaseChange)], vec![]);
        assert_eq!(strategy.max_cost(), 5);
        strategy.set_max_cost(7);
        assert_eq!(strategy.max_cost(), 7);
    }
}
