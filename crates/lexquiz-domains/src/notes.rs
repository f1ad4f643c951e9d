use lexquiz_core::types::{Resources, Semester, SemesterStatus, Subject};

use crate::link;

/// File served from the public directory for Constitutional Law 1.
pub const CONSTITUTIONAL_LAW_1_PDF: &str = "notes/Constitutional_Law_1.pdf";

const PLACEHOLDER: &str = "#";

fn subject(id: &str, name: &str, notes: &[(&str, &str)], previous: &[&str]) -> Subject {
    Subject {
        id: id.into(),
        name: name.into(),
        resources: Resources {
            notes: notes.iter().map(|(title, url)| link(title, url)).collect(),
            previous_qns: previous.iter().map(|title| link(title, PLACEHOLDER)).collect(),
        },
    }
}

fn coming_soon(n: u8, ordinal: &str) -> Semester {
    Semester {
        id: format!("sem{n}"),
        title: format!("{ordinal} Semester"),
        status: SemesterStatus::ComingSoon,
        subjects: None,
    }
}

/// Semester-wise notes catalog. `public_base` is the absolute URL prefix of
/// the static file mount (e.g. `http://localhost:5000/public`).
pub fn semester_catalog(public_base: &str) -> Vec<Semester> {
    let pdf = format!("{}/{CONSTITUTIONAL_LAW_1_PDF}", public_base.trim_end_matches('/'));
    let paper_2023 = "2023 Previous Year Paper";

    let first = Semester {
        id: "sem1".into(),
        title: "1st Semester".into(),
        status: SemesterStatus::Active,
        subjects: Some(vec![
            subject(
                "contracts",
                "Law of Contracts",
                &[
                    ("Contract Basics & Formation", PLACEHOLDER),
                    ("Free Consent & Void Agreements", PLACEHOLDER),
                ],
                &[paper_2023, "2022 Previous Year Paper"],
            ),
            subject("torts", "Law of Torts", &[("Nature & Definition of Tort", PLACEHOLDER)], &[paper_2023]),
            subject("consti1", "Constitutional Law 1", &[("Constitutional_Law_1.pdf", pdf.as_str())], &[paper_2023]),
            subject("family1", "Family Law 1", &[("Sources of Hindu Law", PLACEHOLDER)], &[paper_2023]),
            subject("crimes1", "Law of Crimes 1", &[("General Exceptions (IPC/BNS)", PLACEHOLDER)], &[paper_2023]),
            subject(
                "legal_lang",
                "Legal Language and Legal Writing",
                &[("Legal Maxims & Terms", PLACEHOLDER)],
                &[paper_2023],
            ),
        ]),
    };

    vec![
        first,
        coming_soon(2, "2nd"),
        coming_soon(3, "3rd"),
        coming_soon(4, "4th"),
        coming_soon(5, "5th"),
        coming_soon(6, "6th"),
    ]
}
