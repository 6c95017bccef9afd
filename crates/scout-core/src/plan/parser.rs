//! Splits generated plan text into named sections.
//!
//! A line opens a section when its trimmed form *contains* one of the
//! expected titles; the first title in list order wins. This is a substring
//! heuristic, not a markdown grammar: a title quoted inside ordinary prose
//! also starts a new section, and the heading line itself never ends up in a
//! body. Text before the first heading is dropped from `sections` and only
//! survives in `full_text`. Parsing never fails; when nothing matches the
//! result is a full-text-only document.

use tracing::debug;

use super::document::{PlanDocument, Sections};

/// Parse `plan_text` against `titles` (normally [`super::CANONICAL_TITLES`]).
pub fn parse_sections<T: AsRef<str>>(plan_text: &str, titles: &[T]) -> PlanDocument {
    let mut sections = Sections::new();
    let mut current: Option<&str> = None;
    let mut buffer: Vec<&str> = Vec::new();

    for line in plan_text.split('\n') {
        let trimmed = line.trim();
        let heading = titles
            .iter()
            .map(|t| t.as_ref())
            .find(|title| trimmed.contains(*title));

        match (heading, current) {
            (Some(title), _) => {
                if let Some(open) = current {
                    sections.upsert(open, commit(&buffer));
                }
                current = Some(title);
                buffer.clear();
            }
            (None, Some(_)) => buffer.push(line),
            (None, None) => {}
        }
    }

    if let Some(open) = current {
        sections.upsert(open, commit(&buffer));
    }

    debug!(
        sections = sections.len(),
        text_len = plan_text.len(),
        "parsed account plan"
    );

    PlanDocument {
        full_text: plan_text.to_owned(),
        sections,
    }
}

fn commit(lines: &[&str]) -> String {
    lines.join("\n").trim().to_owned()
}

// ── Tests ──────────────────────────────────────────────────────────────────────
