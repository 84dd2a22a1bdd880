//! Free-text command dispatcher.
//!
//! An ordered list of `(matcher, action)` rules, evaluated top to bottom;
//! the first match wins and spawns a fixed type key with a canned
//! feedback line. No match falls through to a feedback-only fallback.
//!
//! The matcher is pluggable (`CommandMatcher`) so a real language-model
//! planner can replace the substring stub without touching the canvas
//! core — the contract to preserve is first-match ordering and the
//! spawn-or-fallback dichotomy.

use bic_core::TypeKey;

/// Predicate deciding whether a rule applies to an input string.
pub trait CommandMatcher {
    fn matches(&self, input: &str) -> bool;
}

/// Case-insensitive matcher requiring every needle to appear somewhere
/// in the input.
pub struct SubstringMatcher {
    needles: Vec<String>,
}

impl SubstringMatcher {
    pub fn all_of<I, S>(needles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            needles: needles.into_iter().map(|n| n.into().to_lowercase()).collect(),
        }
    }
}

impl CommandMatcher for SubstringMatcher {
    fn matches(&self, input: &str) -> bool {
        let input = input.to_lowercase();
        self.needles.iter().all(|n| input.contains(n.as_str()))
    }
}

/// One dispatch rule: predicate plus the spawn it triggers.
pub struct CommandRule {
    pub matcher: Box<dyn CommandMatcher>,
    pub type_key: TypeKey,
    pub feedback: String,
}

/// What a command resolved to.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    /// Spawn `type_key` and show `feedback`.
    Spawn { type_key: TypeKey, feedback: String },
    /// Nothing matched; show `feedback` only.
    Fallback { feedback: String },
}

pub struct CommandDispatcher {
    rules: Vec<CommandRule>,
    fallback: String,
}

impl Default for CommandDispatcher {
    fn default() -> Self {
        Self::builtin()
    }
}

impl CommandDispatcher {
    pub fn new(fallback: impl Into<String>) -> Self {
        Self {
            rules: Vec::new(),
            fallback: fallback.into(),
        }
    }

    /// Append a rule. Later rules only fire when no earlier rule matched.
    pub fn push_rule(&mut self, rule: CommandRule) {
        self.rules.push(rule);
    }

    fn push_substrings(&mut self, needles: &[&str], type_key: &str, feedback: &str) {
        self.push_rule(CommandRule {
            matcher: Box::new(SubstringMatcher::all_of(needles.iter().copied())),
            type_key: TypeKey::new(type_key),
            feedback: feedback.to_string(),
        });
    }

    /// The builtin keyword rules for the analytics suite. Order matters:
    /// more specific phrases come before their generic prefixes
    /// ("sales trend" before "sales").
    pub fn builtin() -> Self {
        let mut d = Self::new(
            "Sorry, I don't have a visualization for that yet. \
             Try \"show purchase frequency\" or \"sales trends\".",
        );
        d.push_substrings(
            &["purchase", "frequency"],
            "purchase-frequency.histogram",
            "Here's the purchase frequency breakdown.",
        );
        d.push_substrings(
            &["behaviour"],
            "customer-behaviour.dashboard",
            "Pulling up the customer behaviour dashboard.",
        );
        // US spelling alias.
        d.push_substrings(
            &["behavior"],
            "customer-behaviour.dashboard",
            "Pulling up the customer behaviour dashboard.",
        );
        d.push_substrings(
            &["churn"],
            "churn-prediction.risk-matrix",
            "Mapping churn risk across your customer base.",
        );
        d.push_substrings(
            &["sales", "trend"],
            "sales-performance.trend",
            "Charting the sales trend.",
        );
        d.push_substrings(
            &["sales"],
            "sales-performance.dashboard",
            "Opening the sales performance dashboard.",
        );
        d.push_substrings(
            &["forecast"],
            "demand-forecast.forecast",
            "Projecting demand for the coming periods.",
        );
        d.push_substrings(
            &["demand"],
            "demand-forecast.forecast",
            "Projecting demand for the coming periods.",
        );
        d.push_substrings(
            &["inventory"],
            "inventory-levels.treemap",
            "Breaking down current stock levels.",
        );
        d.push_substrings(
            &["stock"],
            "inventory-levels.treemap",
            "Breaking down current stock levels.",
        );
        // "financ" covers both finance and financial.
        d.push_substrings(
            &["financ"],
            "financial-overview.dashboard",
            "Summarizing the financial picture.",
        );
        d.push_substrings(
            &["revenue"],
            "financial-overview.dashboard",
            "Summarizing the financial picture.",
        );
        d
    }

    /// Evaluate the rules in order; first match wins.
    pub fn interpret(&self, input: &str) -> CommandOutcome {
        for rule in &self.rules {
            if rule.matcher.matches(input) {
                return CommandOutcome::Spawn {
                    type_key: rule.type_key.clone(),
                    feedback: rule.feedback.clone(),
                };
            }
        }
        CommandOutcome::Fallback {
            feedback: self.fallback.clone(),
        }
    }
}
