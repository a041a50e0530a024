//! Per-document field extraction.
//!
//! Every field is extracted by an ordered chain of strategies. The
//! strategies for one field all target the same logical value but assume
//! different physical layouts (single-line, multi-line, merged-digit,
//! table-column); the chain order encodes observed likelihood and keeps a
//! looser pattern from shadowing a stricter one. The first strategy to
//! produce a value wins and later ones never run.

pub mod advance;
pub mod credit_debit;
pub mod engine;
pub mod posting;
pub mod remittance;
pub mod revenue;
pub mod rules;
pub mod settlement;

use tracing::trace;

pub use engine::{parse_batch, parse_page, RevenueIndex};

/// One layout-specific extraction attempt, named for tracing.
pub struct Strategy<'a, T> {
    pub name: &'static str,
    pub apply: &'a dyn Fn(&str) -> Option<T>,
}

impl<'a, T> Strategy<'a, T> {
    pub fn new(name: &'static str, apply: &'a dyn Fn(&str) -> Option<T>) -> Self {
        Self { name, apply }
    }
}

/// Result of a strategy chain, tagged with the winning strategy's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyHit<T> {
    pub value: T,
    pub strategy: &'static str,
}

/// Evaluate a chain in order; the first strategy returning `Some` wins.
pub fn first_match<T>(chain: &[Strategy<'_, T>], input: &str) -> Option<StrategyHit<T>> {
    for strategy in chain {
        if let Some(value) = (strategy.apply)(input) {
            trace!(strategy = strategy.name, "strategy matched");
            return Some(StrategyHit {
                value,
                strategy: strategy.name,
            });
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digits(input: &str) -> Option<String> {
        let collected: String = input.chars().filter(char::is_ascii_digit).collect();
        (!collected.is_empty()).then_some(collected)
    }

    #[test]
    fn first_matching_strategy_wins() {
        let strict = |input: &str| input.strip_prefix("ID ").map(str::to_string);
        let loose = |input: &str| digits(input);

        let chain = [
            Strategy::new("labeled", &strict),
            Strategy::new("digits", &loose),
        ];

        // Input satisfies both strategies; the earlier one must win and
        // the later one must never override it.
        let hit = first_match(&chain, "ID 42").unwrap();
        assert_eq!(hit.strategy, "labeled");
        assert_eq!(hit.value, "42");

        // Only the loose strategy matches.
        let hit = first_match(&chain, "ref 42").unwrap();
        assert_eq!(hit.strategy, "digits");
    }

    #[test]
    fn empty_chain_and_no_match_yield_none() {
        let chain: [Strategy<'_, String>; 0] = [];
        assert!(first_match(&chain, "anything").is_none());

        let none = |_: &str| None::<String>;
        let chain = [Strategy::new("never", &none)];
        assert!(first_match(&chain, "anything").is_none());
    }
}
