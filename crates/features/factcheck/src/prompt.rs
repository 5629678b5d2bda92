pub(crate) const FACT_CHECKER_SYSTEM: &str = "You are a careful fact-checker. Given a short statement and a list of \
evidence links/headlines, decide whether the statement is true, false, misleading, or unverified. Provide a short \
verdict label (one line) and then a brief, human-friendly explanation that cites the evidence when possible. Keep it \
concise and clear.";

pub(crate) const ASSISTANT_SYSTEM: &str =
    "You are TruthScope, an AI fact-checking assistant. Answer clearly and cite evidence when possible.";

pub(crate) const NO_EVIDENCE_CONTEXT: &str = "No evidence found in trusted sources.";

pub(crate) fn fact_check_user(statement: &str, evidence: &[String]) -> String {
    let context = if evidence.is_empty() { NO_EVIDENCE_CONTEXT.to_owned() } else { evidence.join("\n") };
    format!(
        "Statement to fact-check:\n{statement}\n\nEvidence collected:\n{context}\n\nPlease respond with a short \
         verdict label (like 'Verified Real' or 'Likely Fake') followed by a 2-5 sentence explanation in plain human \
         language that cites any of the listed evidence links/headlines."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_prompt_lists_evidence_or_placeholder() {
        let with = fact_check_user("Moon is cheese", &["A (x)".to_owned(), "B (y)".to_owned()]);
        assert!(with.starts_with("Statement to fact-check:\nMoon is cheese\n\nEvidence collected:\nA (x)\nB (y)\n\n"));

        let without = fact_check_user("Moon is cheese", &[]);
        assert!(without.contains("Evidence collected:\nNo evidence found in trusted sources.\n\n"));
    }
}
