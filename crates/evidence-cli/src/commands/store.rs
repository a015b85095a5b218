//! Store command implementation.

use crate::cli::{StoreAction, StoreArgs, StoreFilter};
use crate::commands::plan::plan_entries;
use crate::commands::read_evidence;
use crate::commands::verify::verify_live;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use evidence_domain::{Evidence, EvidenceId, EvidenceQuery, EvidenceSource, EvidenceStore};
use tracing::info;

/// Execute a store action.
///
/// Returns whether every verified item passed; other actions return true.
pub fn execute_store(args: StoreArgs, config: &Config, formatter: &Formatter) -> Result<bool> {
    let mut store = EvidenceStore::load(&args.store)?;

    match args.action {
        StoreAction::Add { files, stdin } => {
            let added = add_items(&mut store, read_evidence(&files, stdin)?);
            store.save(&args.store)?;
            info!(path = %args.store.display(), added, total = store.len(), "Updated store");
            println!(
                "{}",
                formatter.success(&format!(
                    "Stored {} items in {} ({} total)",
                    added,
                    args.store.display(),
                    store.len()
                ))
            );
            Ok(true)
        }
        StoreAction::List { filter } => {
            let items = select(&store, &filter);
            println!("{}", formatter.format_plan(&plan_entries(&items))?);
            Ok(true)
        }
        StoreAction::Remove { id } => {
            if store.remove(&EvidenceId::new(id.as_str())).is_none() {
                return Err(CliError::InvalidInput(format!("No stored item with id {}", id)));
            }
            store.save(&args.store)?;
            println!("{}", formatter.success(&format!("Removed {}", id)));
            Ok(true)
        }
        StoreAction::Verify {
            filter,
            identity_only,
            timeout,
        } => {
            let items = select(&store, &filter);
            verify_live(&items, identity_only, timeout, config, formatter)
        }
    }
}

/// Add items to a store, returning how many were added.
pub fn add_items(store: &mut EvidenceStore, items: Vec<Evidence>) -> usize {
    let count = items.len();
    store.extend(items);
    count
}

/// Stored items passing the filter, cloned in store order.
pub fn select(store: &EvidenceStore, filter: &StoreFilter) -> Vec<Evidence> {
    store
        .query(&query_for(filter))
        .into_iter()
        .cloned()
        .collect()
}

fn query_for(filter: &StoreFilter) -> EvidenceQuery {
    EvidenceQuery {
        source: filter.source.as_deref().map(EvidenceSource::parse),
        kind: filter.kind.clone(),
        repository: filter.repo.clone(),
    }
}
