//! Document category classification
//!
//! Rules are evaluated top to bottom and the first hit wins. Some rules look
//! at the filename only, some at the subject only, the rest at either.

use crate::types::Category;

#[derive(Debug, Clone, Copy)]
enum Scope {
    Either,
    FilenameOnly,
    SubjectOnly,
}

struct Rule {
    needles: &'static [&'static str],
    scope: Scope,
    category: Category,
}

const RULES: &[Rule] = &[
    Rule { needles: &["receipt"], scope: Scope::Either, category: Category::Receipt },
    Rule { needles: &["agreement", "contract"], scope: Scope::FilenameOnly, category: Category::Legal },
    Rule { needles: &["vcat"], scope: Scope::Either, category: Category::VcatDocument },
    Rule { needles: &["order"], scope: Scope::Either, category: Category::CourtOrder },
    Rule { needles: &["notice"], scope: Scope::Either, category: Category::Notice },
    Rule { needles: &["maintenance", "repair"], scope: Scope::SubjectOnly, category: Category::Maintenance },
    Rule { needles: &["payment"], scope: Scope::SubjectOnly, category: Category::Payment },
    Rule { needles: &["exhibit"], scope: Scope::FilenameOnly, category: Category::Exhibit },
    Rule { needles: &["medical"], scope: Scope::FilenameOnly, category: Category::Medical },
];

/// Classifies a document by case-insensitive keyword match.
pub fn categorize(filename: &str, subject: &str) -> Category {
    let filename = filename.to_lowercase();
    let subject = subject.to_lowercase();

    RULES
        .iter()
        .find(|rule| {
            rule.needles.iter().any(|needle| match rule.scope {
                Scope::Either => filename.contains(needle) || subject.contains(needle),
                Scope::FilenameOnly => filename.contains(needle),
                Scope::SubjectOnly => subject.contains(needle),
            })
        })
        .map(|rule| rule.category)
        .unwrap_or_default()
}
