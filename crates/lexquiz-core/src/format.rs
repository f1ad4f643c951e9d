use std::fmt::Write;

use crate::types::{CaseDetails, KnowledgeRecord, LandmarkCase};

/// Reply used when no knowledge base entry matches the query.
pub const NO_MATCH_GUIDANCE: &str = "I apologize, but I don't have specific information about that topic in my current knowledge base. I specialize in:\n\n\
• Constitutional Law (Articles, Fundamental Rights)\n\
• IPC and BNS provisions\n\
• Landmark Supreme Court cases\n\
• Criminal and Civil law concepts\n\n\
Try asking about:\n\
- Article 21\n\
- Fundamental Rights\n\
- Kesavananda Bharati case\n\
- IPC/BNS sections\n\
- Right to Privacy";

/// Render a resolved record (or its absence) as a chat reply.
///
/// Sections appear in a fixed order: title, summary, case details, key
/// points, key changes, related cases. Absent sections are skipped.
pub fn format_response(record: Option<&KnowledgeRecord>) -> String {
    let Some(record) = record else {
        return NO_MATCH_GUIDANCE.to_string();
    };

    let mut sections = vec![format!("📚 **{}**", record.topic)];

    if let Some(summary) = record.summary.as_deref().filter(|s| !s.is_empty()) {
        sections.push(summary.to_string());
    }
    if let Some(details) = &record.details {
        sections.push(details_block(details));
    }
    if let Some(points) = record.key_points.as_deref().filter(|p| !p.is_empty()) {
        sections.push(bullet_section("Key Points", points));
    }
    if let Some(changes) = record.key_changes.as_deref().filter(|c| !c.is_empty()) {
        sections.push(bullet_section("Key Changes", changes));
    }
    if !record.cases.is_empty() {
        sections.push(cases_block(&record.cases));
    }

    sections.join("\n\n")
}

fn bullet_section(heading: &str, items: &[String]) -> String {
    let mut out = format!("**{heading}:**");
    for item in items {
        let _ = write!(out, "\n• {item}");
    }
    out
}

fn details_block(d: &CaseDetails) -> String {
    let mut out = String::from("**Case Details:**");
    let _ = write!(out, "\n• Year: {}", d.year);
    let _ = write!(out, "\n• Bench: {}", d.judges);
    if let Some(cj) = &d.chief_justice {
        let _ = write!(out, "\n• Chief Justice: {cj}");
    }
    if !d.key_points.is_empty() {
        out.push_str("\n\n");
        out.push_str(&bullet_section("Key Points", &d.key_points));
    }
    let _ = write!(out, "\n\n**Significance:** {}", d.significance);
    if let Some(verdict) = &d.verdict {
        let _ = write!(out, "\n\n**Verdict:** {verdict}");
    }
    out
}

fn cases_block(cases: &[LandmarkCase]) -> String {
    let entries: Vec<String> = cases
        .iter()
        .enumerate()
        .map(|(i, c)| {
            format!(
                "{}. **{}**\n   📅 Year: {}\n   📖 {}\n   ⚖️ Significance: {}",
                i + 1,
                c.name,
                c.year,
                c.summary,
                c.significance
            )
        })
        .collect();
    format!("**Related Landmark Cases:**\n\n{}", entries.join("\n\n"))
}
