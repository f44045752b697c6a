//! Policy catalog and document resolution.
//!
//! The school publishes a fixed set of policies and forms on the Forms & Fees
//! page. Each catalog slot has a stable slug; an uploaded document linked by
//! `policy_slug` resolves directly. Documents uploaded without a slug are
//! matched by normalized title so older uploads keep appearing.

use serde::Serialize;

use crate::models::Document;

/// One slot in the policy catalog.
#[derive(Debug, Clone)]
pub struct PolicyDefinition {
    /// Stable identifier documents link against
    pub slug: &'static str,
    /// Display title on the public page
    pub title: &'static str,
    /// Alternative titles seen on historical uploads
    pub synonyms: &'static [&'static str],
    /// A title containing all of these also counts as a match
    pub keywords: &'static [&'static str],
}

/// The documents parents expect to find on the Forms & Fees page.
pub const POLICIES: &[PolicyDefinition] = &[
    PolicyDefinition {
        slug: "code-of-conduct",
        title: "Code of Conduct",
        synonyms: &["learner code of conduct", "school code of conduct"],
        keywords: &["code", "conduct"],
    },
    PolicyDefinition {
        slug: "admissions-policy",
        title: "Admissions Policy",
        synonyms: &["admission policy", "enrolment policy"],
        keywords: &["admission", "policy"],
    },
    PolicyDefinition {
        slug: "school-fees",
        title: "School Fees",
        synonyms: &["fees structure", "fee structure", "school fees schedule"],
        keywords: &["school", "fee"],
    },
    PolicyDefinition {
        slug: "uniform-policy",
        title: "Uniform Policy",
        synonyms: &["school uniform", "dress code"],
        keywords: &["uniform", "policy"],
    },
    PolicyDefinition {
        slug: "application-form",
        title: "Application Form",
        synonyms: &["admission form", "enrolment form", "registration form"],
        keywords: &["application", "form"],
    },
];

/// A catalog slot with its resolved document, if any.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyStatus {
    pub slug: String,
    pub title: String,
    pub document: Option<Document>,
}

impl PolicyDefinition {
    /// Whether a document title refers to this policy.
    pub fn matches_title(&self, title: &str) -> bool {
        let normalized = normalize(title);

        if normalized == normalize(self.title) {
            return true;
        }
        if self.synonyms.iter().any(|s| normalized == normalize(s)) {
            return true;
        }
        !self.keywords.is_empty()
            && self
                .keywords
                .iter()
                .all(|k| normalized.contains(normalize(k).as_str()))
    }
}

/// Lowercase and strip everything that isn't a letter or digit.
pub fn normalize(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

/// Resolve a catalog slot against a set of published documents.
///
/// A `policy_slug` link always beats title heuristics.
pub fn resolve<'a>(policy: &PolicyDefinition, documents: &'a [Document]) -> Option<&'a Document> {
    documents
        .iter()
        .find(|d| d.policy_slug.as_deref() == Some(policy.slug))
        .or_else(|| documents.iter().find(|d| policy.matches_title(&d.title)))
}

/// Resolve every catalog slot.
pub fn resolve_catalog(documents: &[Document]) -> Vec<PolicyStatus> {
    POLICIES
        .iter()
        .map(|policy| PolicyStatus {
            slug: policy.slug.to_string(),
            title: policy.title.to_string(),
            document: resolve(policy, documents).cloned(),
        })
        .collect()
}
