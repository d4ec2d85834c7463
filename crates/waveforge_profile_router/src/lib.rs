//! # Waveforge Profile Router
//!
//! Maps an intent's tags and complexity to one of the seven agent profiles
//! via a precompiled, priority-ordered rule table. See §4.4 of the
//! specification. The router is pure and side-effect-free: calling it
//! twice with equal inputs yields equal outputs.

use waveforge_types::{AgentProfile, Complexity, Intent};

type Rule = fn(&Intent) -> bool;

/// One rule: a predicate and the profile it maps to, in declared priority
/// order. Precompiled once as a `static` rather than rebuilt per call.
static RULE_TABLE: &[(Rule, AgentProfile)] = &[
    (is_reviewer, AgentProfile::Reviewer),
    (is_bug_investigator, AgentProfile::BugInvestigator),
    (is_unit_tester, AgentProfile::UnitTester),
    (is_test_engineer, AgentProfile::TestEngineer),
    (is_doc_writer, AgentProfile::DocWriter),
    (is_planner, AgentProfile::Planner),
];

fn is_reviewer(intent: &Intent) -> bool {
    intent.has_tag_keyword("verify") || intent.has_tag_keyword("review")
}

fn is_bug_investigator(intent: &Intent) -> bool {
    ["reproduce", "diagnose", "fix", "hotfix", "root-cause"]
        .iter()
        .any(|kw| intent.has_tag_keyword(kw))
}

fn is_unit_tester(intent: &Intent) -> bool {
    let test_tagged = ["test", "testing", "unit", "integration", "regression"]
        .iter()
        .any(|kw| intent.has_tag_keyword(kw));
    test_tagged && matches!(intent.complexity, Complexity::Trivial | Complexity::Simple)
}

fn is_test_engineer(intent: &Intent) -> bool {
    ["test", "testing", "integration", "regression"]
        .iter()
        .any(|kw| intent.has_tag_keyword(kw))
}

fn is_doc_writer(intent: &Intent) -> bool {
    ["docs", "document", "api-docs", "user-guide"]
        .iter()
        .any(|kw| intent.has_tag_keyword(kw))
}

fn is_planner(intent: &Intent) -> bool {
    let analysis_tagged = ["analysis", "analyze", "requirements", "research", "design"]
        .iter()
        .any(|kw| intent.has_tag_keyword(kw));
    analysis_tagged || intent.complexity == Complexity::Epic
}

/// Route an intent to one of the seven profiles. First matching rule in
/// priority order wins; an intent matching none of the rules falls back to
/// `implementer`.
pub fn route(intent: &Intent) -> AgentProfile {
    RULE_TABLE
        .iter()
        .find(|(rule, _)| rule(intent))
        .map(|(_, profile)| *profile)
        .unwrap_or(AgentProfile::Implementer)
}
