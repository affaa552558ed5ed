use super::AdviceRule;
use crate::models::{Advice, AdviceCategory};

pub struct AdviceEngine<I> {
    category: AdviceCategory,
    rules: Vec<Box<dyn AdviceRule<I>>>,
    fallback_summary: &'static str,
}

impl<I> AdviceEngine<I> {
    pub fn new(
        category: AdviceCategory,
        rules: Vec<Box<dyn AdviceRule<I>>>,
        fallback_summary: &'static str,
    ) -> Self {
        Self {
            category,
            rules,
            fallback_summary,
        }
    }

    pub fn evaluate(&self, input: &I) -> Advice {
        let recommendations: Vec<String> = self
            .rules
            .iter()
            .filter_map(|rule| {
                let line = rule.evaluate(input);
                if let Some(ref text) = line {
                    tracing::trace!(rule = rule.id(), "{}", text);
                }
                line
            })
            .collect();

        let summary = recommendations
            .first()
            .cloned()
            .unwrap_or_else(|| self.fallback_summary.to_string());

        Advice {
            category: self.category,
            summary,
            recommendations,
        }
    }

    pub fn list_rules(&self) -> Vec<(&'static str, &'static str)> {
        self.rules.iter().map(|r| (r.id(), r.name())).collect()
    }
}
