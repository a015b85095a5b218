//! Plan command implementation.

use crate::cli::PlanArgs;
use crate::commands::read_evidence;
use crate::error::Result;
use crate::output::{Formatter, PlanEntry};
use evidence_domain::Evidence;
use evidence_verify::select_checker;

/// Execute the plan command.
pub fn execute_plan(args: PlanArgs, formatter: &Formatter) -> Result<()> {
    let evidence = read_evidence(&args.files, args.stdin)?;
    println!("{}", formatter.format_plan(&plan_entries(&evidence))?);
    Ok(())
}

/// Routing decision for each item, in order.
pub fn plan_entries(evidence: &[Evidence]) -> Vec<PlanEntry> {
    evidence
        .iter()
        .map(|item| {
            let checker = select_checker(item);
            PlanEntry {
                id: item.label().to_string(),
                kind: item.kind_name().to_string(),
                source: item.source().to_string(),
                checker: checker.to_string(),
                network: checker.needs_network(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use evidence_domain::load_evidence;

    #[test]
    fn test_plan_entries() {
        let evidence = load_evidence(
            r#"[
                {"evidence_id": "push-1", "event_type": "push", "when": "2025-07-13T20:37:04Z",
                 "verification": {"source": "gharchive"}},
                {"evidence_id": "local", "observation_type": "commit", "sha": "abc",
                 "verification": {"source": "git"}}
            ]"#,
        )
        .unwrap();

        let entries = plan_entries(&evidence);
        assert_eq!(entries[0].checker, "gharchive");
        assert!(entries[0].network);
        assert_eq!(entries[1].checker, "git");
        assert!(!entries[1].network);
    }
}
