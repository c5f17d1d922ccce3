//! Ordered formatting passes

use super::FormatOptions;
use super::indentation::Indentation;
use super::rules::{
    CollapseBlankLines, CollapseInteriorWhitespace, NormalizeNewlines, RemoveLeadingBlankLines,
    SpaceAroundOperators, StripTrailingWhitespace, TightenPunctuation, TrimDocumentEnd,
    WhitespaceOnlyLines,
};
use crate::sequence::TokenSequence;

/// One pass over the whole token sequence.
pub trait Rule: Send + Sync {
    fn name(&self) -> &'static str;

    fn apply(&self, tokens: &mut TokenSequence, options: &FormatOptions);
}

/// Passes run strictly in order, each seeing the previous one's output.
pub struct Pipeline {
    rules: Vec<Box<dyn Rule>>,
}

impl Pipeline {
    pub fn new(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    /// The canonical layout pipeline.
    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(RemoveLeadingBlankLines),
            Box::new(CollapseBlankLines),
            Box::new(WhitespaceOnlyLines),
            Box::new(CollapseInteriorWhitespace),
            Box::new(Indentation),
            Box::new(SpaceAroundOperators),
            Box::new(TightenPunctuation),
            Box::new(StripTrailingWhitespace),
            Box::new(TrimDocumentEnd),
            Box::new(NormalizeNewlines),
        ])
    }

    pub fn rule_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|rule| rule.name())
    }

    pub fn run(&self, tokens: &mut TokenSequence, options: &FormatOptions) {
        for rule in &self.rules {
            tracing::debug!(rule = rule.name(), "applying rule");
            rule.apply(tokens, options);
            if options.trace.rules {
                tracing::trace!(rule = rule.name(), "after rule:\n{}", tokens.render());
            }
        }
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::standard()
    }
}
