pub mod legal;
pub mod notes;
pub mod quiz;
pub mod seed;

use lexquiz_core::types::{LandmarkCase, ResourceLink};

pub use legal::indian_law_knowledge_base;
pub use notes::semester_catalog;
pub use quiz::quiz_bank;

// ── Shared builders ──────────────────────────────────────────────────────

pub(crate) fn landmark(name: &str, year: u16, summary: &str, significance: &str) -> LandmarkCase {
    LandmarkCase {
        name: name.into(),
        year,
        summary: summary.into(),
        significance: significance.into(),
    }
}

pub(crate) fn link(title: &str, url: &str) -> ResourceLink {
    ResourceLink {
        title: title.into(),
        url: url.into(),
    }
}

pub(crate) fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
