use lexquiz_core::format::{format_response, NO_MATCH_GUIDANCE};
use lexquiz_domains::legal::{
    indian_law_knowledge_base, ARTICLE_21, BNS, FUNDAMENTAL_RIGHTS, IPC, KESAVANANDA_BHARATI, RIGHT_TO_PRIVACY,
    SECTION_302,
};

fn topic_for(query: &str) -> Option<String> {
    indian_law_knowledge_base().resolve(query).map(|r| r.topic.clone())
}

fn topic_of(key: &str) -> String {
    indian_law_knowledge_base().get(key).unwrap().topic.clone()
}

#[test]
fn keys_keep_declared_order() {
    let kb = indian_law_knowledge_base();
    let keys: Vec<&str> = kb.keys().collect();
    assert_eq!(
        keys,
        vec![ARTICLE_21, FUNDAMENTAL_RIGHTS, KESAVANANDA_BHARATI, IPC, BNS, SECTION_302, RIGHT_TO_PRIVACY]
    );
}

#[test]
fn keyword_rules_keep_priority_order_and_point_at_real_keys() {
    let kb = indian_law_knowledge_base();
    let targets: Vec<&str> = kb.rules().iter().map(|r| r.target.as_str()).collect();
    assert_eq!(targets, vec![SECTION_302, RIGHT_TO_PRIVACY, FUNDAMENTAL_RIGHTS]);
    assert_eq!(kb.rules()[0].terms, vec!["murder", "302"]);
    for rule in kb.rules() {
        assert!(kb.get(&rule.target).is_some(), "{}", rule.target);
    }
}

#[test]
fn every_key_resolves_to_its_own_record_when_alone() {
    let kb = indian_law_knowledge_base();
    for key in kb.keys() {
        let query = format!("Tell me about {}", key.to_uppercase());
        assert_eq!(kb.resolve(&query).unwrap().topic, kb.get(key).unwrap().topic, "{query}");
    }
}

#[test]
fn earliest_key_wins_when_several_match() {
    assert_eq!(
        topic_for("fundamental rights under article 21"),
        Some(topic_of(ARTICLE_21))
    );
    assert_eq!(topic_for("bns vs ipc"), Some(topic_of(IPC)));
    // "right to privacy" is listed after "section 302"
    assert_eq!(topic_for("section 302 and right to privacy"), Some(topic_of(SECTION_302)));
}

#[test]
fn murder_and_302_fall_back_to_section_302() {
    assert_eq!(topic_for("murder weapon"), Some(topic_of(SECTION_302)));
    assert_eq!(topic_for("What does 302 say?"), Some(topic_of(SECTION_302)));
}

#[test]
fn direct_ipc_key_beats_the_302_keyword() {
    // "ipc" is a knowledge base key, so direct matching claims this query first.
    assert_eq!(topic_for("ipc 302"), Some(topic_of(IPC)));
}

#[test]
fn privacy_and_constitution_keywords() {
    assert_eq!(topic_for("is PRIVACY protected?"), Some(topic_of(RIGHT_TO_PRIVACY)));
    assert_eq!(topic_for("basic constitution questions"), Some(topic_of(FUNDAMENTAL_RIGHTS)));
    assert_eq!(topic_for("the 42nd amendment"), Some(topic_of(FUNDAMENTAL_RIGHTS)));
}

#[test]
fn keyword_priority_murder_before_privacy() {
    assert_eq!(topic_for("murder and privacy"), Some(topic_of(SECTION_302)));
    assert_eq!(topic_for("privacy amendment"), Some(topic_of(RIGHT_TO_PRIVACY)));
}

#[test]
fn unrelated_query_has_no_match_and_formats_as_guidance() {
    let kb = indian_law_knowledge_base();
    let resolved = kb.resolve("what is the capital of france");
    assert!(resolved.is_none());

    let text = format_response(resolved);
    assert_eq!(text, NO_MATCH_GUIDANCE);
    for topic in [
        "Article 21",
        "Fundamental Rights",
        "Kesavananda Bharati case",
        "IPC/BNS sections",
        "Right to Privacy",
    ] {
        assert!(text.contains(topic), "guidance must mention {topic}");
    }
}

#[test]
fn empty_query_has_no_match() {
    assert!(indian_law_knowledge_base().resolve("").is_none());
}

#[test]
fn kesavananda_bharati_rendering() {
    let kb = indian_law_knowledge_base();
    let record = kb.get(KESAVANANDA_BHARATI).unwrap();
    let text = format_response(Some(record));

    assert!(text.contains("1973"));
    assert!(text.contains("Basic Structure Doctrine"));
    assert!(text.contains("7-6 majority upheld the Basic Structure Doctrine"));
    assert!(text.contains("Chief Justice: Justice S.M. Sikri"));
    assert!(text.contains("13-judge bench (largest ever)"));
    assert!(!text.contains("Related Landmark Cases"));

    assert_eq!(text, format_response(Some(record)), "formatting is deterministic");
}

#[test]
fn bns_renders_key_changes_without_cases() {
    let kb = indian_law_knowledge_base();
    let text = format_response(kb.get(BNS));
    assert!(text.contains("**Key Changes:**"));
    assert!(text.contains("• Introduced community service as punishment"));
    assert!(!text.contains("Related Landmark Cases"));
}

#[test]
fn article_21_lists_both_cases_in_order() {
    let kb = indian_law_knowledge_base();
    let text = format_response(kb.get(ARTICLE_21));
    let maneka = text.find("1. **Maneka Gandhi v. Union of India (1978)**").unwrap();
    let kharak = text.find("2. **Kharak Singh v. State of UP (1963)**").unwrap();
    assert!(maneka < kharak);
    assert!(text.starts_with("📚 **Article 21 - Right to Life and Personal Liberty**"));
}
