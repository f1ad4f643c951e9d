use crate::types::KnowledgeRecord;

/// A keyword fallback: if the lower-cased query contains any of `terms`,
/// the record stored under `target` is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordRule {
    pub terms: Vec<String>,
    pub target: String,
}

impl KeywordRule {
    pub fn new(terms: &[&str], target: &str) -> Self {
        Self {
            terms: terms.iter().map(|t| t.to_string()).collect(),
            target: target.to_string(),
        }
    }

    fn matches(&self, lower_query: &str) -> bool {
        self.terms.iter().any(|t| lower_query.contains(t.as_str()))
    }
}

/// Read-only table of legal topics, built once at startup.
///
/// Entries keep their insertion order: direct matching walks them front to
/// back and the first key contained in the query wins, so order is part of
/// the matching contract. Keyword rules are likewise evaluated in order and
/// only when no key matched directly.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    entries: Vec<(String, KnowledgeRecord)>,
    rules: Vec<KeywordRule>,
}

impl KnowledgeBase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a topic. Keys are stored lower-cased.
    pub fn with_entry(mut self, key: &str, record: KnowledgeRecord) -> Self {
        self.entries.push((key.to_lowercase(), record));
        self
    }

    pub fn with_rule(mut self, rule: KeywordRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn get(&self, key: &str) -> Option<&KnowledgeRecord> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, record)| record)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn rules(&self) -> &[KeywordRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Best-matching record for a free-text query, or `None`.
    pub fn resolve(&self, query: &str) -> Option<&KnowledgeRecord> {
        if query.is_empty() {
            return None;
        }
        let lower = query.to_lowercase();

        if let Some((_, record)) = self
            .entries
            .iter()
            .find(|(key, _)| !key.is_empty() && lower.contains(key.as_str()))
        {
            return Some(record);
        }

        self.rules
            .iter()
            .find(|rule| rule.matches(&lower))
            .and_then(|rule| self.get(&rule.target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(topic: &str) -> KnowledgeRecord {
        KnowledgeRecord {
            topic: topic.into(),
            ..Default::default()
        }
    }

    fn kb() -> KnowledgeBase {
        KnowledgeBase::new()
            .with_entry("alpha", record("Alpha"))
            .with_entry("alpha beta", record("Alpha Beta"))
            .with_entry("gamma", record("Gamma"))
            .with_rule(KeywordRule::new(&["g-word", "77"], "gamma"))
            .with_rule(KeywordRule::new(&["a-word"], "alpha"))
            .with_rule(KeywordRule::new(&["dangling"], "missing"))
    }

    #[test]
    fn earlier_key_wins_over_longer_later_key() {
        let kb = kb();
        assert_eq!(kb.resolve("tell me about alpha beta").unwrap().topic, "Alpha");
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(kb().resolve("GAMMA rays").unwrap().topic, "Gamma");
    }

    #[test]
    fn rules_apply_in_priority_order() {
        let kb = kb();
        assert_eq!(kb.resolve("an a-word and a g-word").unwrap().topic, "Gamma");
        assert_eq!(kb.resolve("section 77").unwrap().topic, "Gamma");
        assert_eq!(kb.resolve("just an a-word").unwrap().topic, "Alpha");
    }

    #[test]
    fn direct_key_beats_rules() {
        assert_eq!(kb().resolve("g-word about alpha").unwrap().topic, "Alpha");
    }

    #[test]
    fn rule_pointing_at_missing_key_yields_none() {
        assert!(kb().resolve("dangling").is_none());
    }

    #[test]
    fn empty_query_never_matches() {
        assert!(kb().resolve("").is_none());
    }

    #[test]
    fn keys_are_lowercased_and_ordered() {
        let kb = KnowledgeBase::new()
            .with_entry("Zeta", record("Z"))
            .with_entry("Eta", record("E"));
        assert_eq!(kb.keys().collect::<Vec<_>>(), vec!["zeta", "eta"]);
        assert_eq!(kb.len(), 2);
    }
}
