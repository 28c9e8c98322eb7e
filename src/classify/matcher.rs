//! Ordered include/exclude rule evaluation.
//!
//! A rule set is a list of rules, each carrying a polarity. Rules are applied in
//! order and the last rule that fires decides the verdict, so the tables read as
//! inclusions first, broad exclusions second, narrow re-inclusions last.

/// Whether a firing rule includes or excludes the place
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Include,
    Exclude,
}

/// One declarative rule.
///
/// Fires when the trigger matches (any listed type, or any listed keyword in the
/// name; an empty trigger always matches), every `all_keywords` entry is in the
/// name, and no `unless` keyword is in the name.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub polarity: Polarity,
    pub any_type: &'static [&'static str],
    pub any_keyword: &'static [&'static str],
    pub all_keywords: &'static [&'static str],
    pub unless: &'static [&'static str],
}

impl Rule {
    const fn new(polarity: Polarity) -> Self {
        Self {
            polarity,
            any_type: &[],
            any_keyword: &[],
            all_keywords: &[],
            unless: &[],
        }
    }

    pub const fn include() -> Self {
        Self::new(Polarity::Include)
    }

    pub const fn exclude() -> Self {
        Self::new(Polarity::Exclude)
    }

    pub const fn types(mut self, types: &'static [&'static str]) -> Self {
        self.any_type = types;
        self
    }

    pub const fn keywords(mut self, keywords: &'static [&'static str]) -> Self {
        self.any_keyword = keywords;
        self
    }

    pub const fn requiring(mut self, keywords: &'static [&'static str]) -> Self {
        self.all_keywords = keywords;
        self
    }

    pub const fn unless(mut self, keywords: &'static [&'static str]) -> Self {
        self.unless = keywords;
        self
    }

    /// `name` and `types` must already be case-folded
    pub fn fires(&self, name: &str, types: &[String]) -> bool {
        let type_hit = self
            .any_type
            .iter()
            .any(|t| types.iter().any(|pt| pt == t));
        let keyword_hit = self.any_keyword.iter().any(|k| name.contains(k));
        let untriggered = self.any_type.is_empty() && self.any_keyword.is_empty();

        (untriggered || type_hit || keyword_hit)
            && self.all_keywords.iter().all(|k| name.contains(k))
            && !self.unless.iter().any(|k| name.contains(k))
    }
}

/// Ordered rules for one category
#[derive(Debug, Clone, Copy)]
pub struct RuleSet {
    pub rules: &'static [Rule],
}

impl RuleSet {
    /// Verdict of the last firing rule; no firing rule means no match.
    pub fn evaluate(&self, name: &str, types: &[String]) -> bool {
        self.rules.iter().fold(false, |verdict, rule| {
            if rule.fires(name, types) {
                rule.polarity == Polarity::Include
            } else {
                verdict
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn types(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_type_or_keyword_triggers() {
        let rule = Rule::include().types(&["gym"]).keywords(&["fitness"]);
        assert!(rule.fires("iron house", &types(&["gym"])));
        assert!(rule.fires("fitness first", &[]));
        assert!(!rule.fires("iron house", &types(&["store"])));
    }

    #[test]
    fn test_requiring_and_unless() {
        let rule = Rule::include()
            .types(&["lodging"])
            .requiring(&["service", "apartment"])
            .unless(&["hotel"]);
        let lodging = types(&["lodging"]);
        assert!(rule.fires("service luxury apartment", &lodging));
        assert!(!rule.fires("luxury apartment", &lodging));
        assert!(!rule.fires("hotel service apartment", &lodging));
    }

    #[test]
    fn test_empty_trigger_always_matches() {
        let rule = Rule::exclude().unless(&["keep"]);
        assert!(rule.fires("anything", &[]));
        assert!(!rule.fires("keep me", &[]));
    }

    #[test]
    fn test_last_firing_rule_wins() {
        static RULES: &[Rule] = &[
            Rule::include().keywords(&["cafe"]),
            Rule::exclude().keywords(&["closed"]),
            Rule::include().keywords(&["reopened"]),
        ];
        let set = RuleSet { rules: RULES };
        assert!(set.evaluate("corner cafe", &[]));
        assert!(!set.evaluate("corner cafe closed", &[]));
        assert!(set.evaluate("corner cafe closed reopened", &[]));
        assert!(!set.evaluate("bookshop", &[]));
    }
}
