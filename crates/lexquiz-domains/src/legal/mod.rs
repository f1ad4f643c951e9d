use lexquiz_core::{
    knowledge::{KeywordRule, KnowledgeBase},
    types::{CaseDetails, KnowledgeRecord},
};

use crate::{landmark, strings};

pub const ARTICLE_21: &str = "article 21";
pub const FUNDAMENTAL_RIGHTS: &str = "fundamental rights";
pub const KESAVANANDA_BHARATI: &str = "kesavananda bharati";
pub const IPC: &str = "ipc";
pub const BNS: &str = "bns";
pub const SECTION_302: &str = "section 302";
pub const RIGHT_TO_PRIVACY: &str = "right to privacy";

/// The built-in Indian-law knowledge base.
///
/// Entry order decides which topic wins when a query mentions several keys,
/// e.g. "fundamental rights under article 21" resolves to Article 21.
pub fn indian_law_knowledge_base() -> KnowledgeBase {
    KnowledgeBase::new()
        .with_entry(ARTICLE_21, article_21())
        .with_entry(FUNDAMENTAL_RIGHTS, fundamental_rights())
        .with_entry(KESAVANANDA_BHARATI, kesavananda_bharati())
        .with_entry(IPC, ipc())
        .with_entry(BNS, bns())
        .with_entry(SECTION_302, section_302())
        .with_entry(RIGHT_TO_PRIVACY, right_to_privacy())
        .with_rule(KeywordRule::new(&["murder", "302"], SECTION_302))
        .with_rule(KeywordRule::new(&["privacy"], RIGHT_TO_PRIVACY))
        .with_rule(KeywordRule::new(&["constitution", "amendment"], FUNDAMENTAL_RIGHTS))
}

fn article_21() -> KnowledgeRecord {
    KnowledgeRecord {
        topic: "Article 21 - Right to Life and Personal Liberty".into(),
        summary: Some(
            "Article 21 of the Indian Constitution is one of the most important fundamental rights. \
             It states: \"No person shall be deprived of his life or personal liberty except according \
             to procedure established by law.\""
                .into(),
        ),
        cases: vec![
            landmark(
                "Maneka Gandhi v. Union of India (1978)",
                1978,
                "Expanded the scope of Article 21. Held that \"procedure established by law\" must be just, fair, and reasonable.",
                "Landmark case that broadened the interpretation of personal liberty",
            ),
            landmark(
                "Kharak Singh v. State of UP (1963)",
                1963,
                "Discussed the right to privacy under Article 21.",
                "Early case on privacy rights",
            ),
        ],
        ..Default::default()
    }
}

fn fundamental_rights() -> KnowledgeRecord {
    KnowledgeRecord {
        topic: "Fundamental Rights".into(),
        summary: Some(
            "Fundamental Rights are enshrined in Part III of the Indian Constitution (Articles 12-35). \
             They include Right to Equality, Right to Freedom, Right against Exploitation, Right to \
             Freedom of Religion, Cultural and Educational Rights, and Right to Constitutional Remedies."
                .into(),
        ),
        cases: vec![
            landmark(
                "Kesavananda Bharati v. State of Kerala (1973)",
                1973,
                "Established the Basic Structure Doctrine. Parliament cannot amend the Constitution to destroy its basic structure.",
                "Most important constitutional case in Indian history",
            ),
            landmark(
                "Minerva Mills v. Union of India (1980)",
                1980,
                "Reaffirmed the Basic Structure Doctrine and limited Parliament's amending power.",
                "Strengthened constitutional supremacy",
            ),
        ],
        ..Default::default()
    }
}

fn kesavananda_bharati() -> KnowledgeRecord {
    KnowledgeRecord {
        topic: "Kesavananda Bharati v. State of Kerala (1973)".into(),
        summary: Some(
            "The most landmark case in Indian constitutional history. A 13-judge bench delivered this historic judgment."
                .into(),
        ),
        details: Some(CaseDetails {
            year: 1973,
            judges: "13-judge bench (largest ever)".into(),
            chief_justice: Some("Justice S.M. Sikri".into()),
            key_points: strings(&[
                "Established the Basic Structure Doctrine",
                "Parliament cannot amend the Constitution to destroy its basic structure",
                "Fundamental Rights are part of the basic structure",
                "Judicial review is part of the basic structure",
            ]),
            significance: "Protected the Constitution from unlimited amendments by Parliament. \
                           Ensured checks and balances in democracy."
                .into(),
            verdict: Some("7-6 majority upheld the Basic Structure Doctrine".into()),
        }),
        ..Default::default()
    }
}

fn ipc() -> KnowledgeRecord {
    KnowledgeRecord {
        topic: "Indian Penal Code (IPC)".into(),
        summary: Some(
            "The Indian Penal Code, 1860 is the main criminal code of India. It was drafted by Lord \
             Macaulay and came into force in 1860. It covers all substantive aspects of criminal law."
                .into(),
        ),
        cases: vec![landmark(
            "State of Maharashtra v. Mayer Hans George (1965)",
            1965,
            "Defined \"mens rea\" (guilty mind) in Indian criminal law.",
            "Important for understanding criminal intent",
        )],
        ..Default::default()
    }
}

fn bns() -> KnowledgeRecord {
    KnowledgeRecord {
        topic: "Bharatiya Nyaya Sanhita (BNS) 2023".into(),
        summary: Some(
            "The Bharatiya Nyaya Sanhita, 2023 replaced the Indian Penal Code. It came into effect on \
             July 1, 2024. It modernizes criminal law with Indian terminology and removes colonial-era provisions."
                .into(),
        ),
        key_changes: Some(strings(&[
            "Replaced IPC sections with BNS sections",
            "Introduced community service as punishment",
            "Enhanced penalties for crimes against women and children",
            "Removed sedition, added provisions for acts endangering sovereignty",
        ])),
        ..Default::default()
    }
}

fn section_302() -> KnowledgeRecord {
    KnowledgeRecord {
        topic: "Section 302 IPC - Murder".into(),
        summary: Some(
            "Section 302 IPC deals with punishment for murder. Whoever commits murder shall be punished \
             with death or imprisonment for life, and shall also be liable to fine."
                .into(),
        ),
        cases: vec![landmark(
            "Machhi Singh v. State of Punjab (1983)",
            1983,
            "Established the \"rarest of rare\" doctrine for death penalty.",
            "Guidelines for awarding death penalty",
        )],
        ..Default::default()
    }
}

fn right_to_privacy() -> KnowledgeRecord {
    KnowledgeRecord {
        topic: "Right to Privacy".into(),
        summary: Some(
            "The Right to Privacy is a fundamental right under Article 21 of the Indian Constitution, \
             as declared by the Supreme Court."
                .into(),
        ),
        cases: vec![landmark(
            "Justice K.S. Puttaswamy v. Union of India (2017)",
            2017,
            "9-judge bench unanimously held that Right to Privacy is a fundamental right under Article 21.",
            "Landmark judgment recognizing privacy as a fundamental right",
        )],
        ..Default::default()
    }
}
