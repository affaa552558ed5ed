use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdviceCategory {
    Fertilizer,
    Pest,
}

impl AdviceCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdviceCategory::Fertilizer => "Fertilizer",
            AdviceCategory::Pest => "Pest & Disease",
        }
    }

    /// Tag used when advice lines are merged into the conclusions list.
    pub fn prefix(&self) -> &'static str {
        match self {
            AdviceCategory::Fertilizer => "FERT",
            AdviceCategory::Pest => "PEST",
        }
    }
}

impl std::fmt::Display for AdviceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ordered advice lines plus the one to show first.
///
/// `summary` is stored rather than derived from the list so that reordering
/// the rules never silently changes the headline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advice {
    pub category: AdviceCategory,
    pub summary: String,
    pub recommendations: Vec<String>,
}

impl Advice {
    /// Lines tagged for the conclusions list, at most `limit` of them.
    pub fn tagged(&self, limit: usize) -> impl Iterator<Item = String> + '_ {
        self.recommendations
            .iter()
            .take(limit)
            .map(move |r| format!("{}: {}", self.category.prefix(), r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tagged_limits_and_prefixes() {
        let advice = Advice {
            category: AdviceCategory::Pest,
            summary: "one".into(),
            recommendations: vec!["one".into(), "two".into(), "three".into(), "four".into()],
        };

        let tagged: Vec<String> = advice.tagged(3).collect();
        assert_eq!(tagged, vec!["PEST: one", "PEST: two", "PEST: three"]);
    }

    #[test]
    fn category_prefixes() {
        assert_eq!(AdviceCategory::Fertilizer.prefix(), "FERT");
        assert_eq!(AdviceCategory::Pest.prefix(), "PEST");
    }
}
