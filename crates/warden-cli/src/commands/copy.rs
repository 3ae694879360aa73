use anyhow::{anyhow, bail};
use serde::Serialize;
use warden_client::{DeleteConfirmation, DeleteTarget};
use warden_core::{EntityKind, EntityRef};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::CopyArgs;
use crate::output::output;

#[derive(Debug, Serialize)]
struct CopyResponse {
    title: String,
    subtitle: String,
    success: String,
    failure: String,
}

/// Handle `warden copy`.
pub fn run(args: &CopyArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let targets = args
        .names
        .iter()
        .map(|name| DeleteTarget::new(EntityRef::new(args.kind, name.as_str()), name.as_str()))
        .collect();
    let modal = confirmation(args.kind, args.single, targets)?;
    let feedback = modal.feedback();
    output(
        &CopyResponse {
            title: modal.title(),
            subtitle: modal.subtitle(),
            success: feedback.success,
            failure: feedback.failure,
        },
        flags.format,
    )
}

/// Pick the modal matching `kind`.
pub fn confirmation(
    kind: EntityKind,
    single: bool,
    targets: Vec<DeleteTarget>,
) -> anyhow::Result<DeleteConfirmation> {
    match kind {
        EntityKind::Rule | EntityKind::Policy | EntityKind::Detection if single => {
            let [target] = <[DeleteTarget; 1]>::try_from(targets)
                .map_err(|_| anyhow!("--single takes exactly one name"))?;
            Ok(DeleteConfirmation::detection(target))
        }
        EntityKind::Rule | EntityKind::Policy | EntityKind::Detection => {
            Ok(DeleteConfirmation::detections(targets))
        }
        EntityKind::DataModel => Ok(DeleteConfirmation::data_models(targets)),
        EntityKind::SavedQuery => Ok(DeleteConfirmation::saved_queries(targets)),
        EntityKind::Destination => bail!("destinations cannot be deleted"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn targets(kind: EntityKind, names: &[&str]) -> Vec<DeleteTarget> {
        names
            .iter()
            .map(|n| DeleteTarget::new(EntityRef::new(kind, *n), *n))
            .collect()
    }

    #[test]
    fn single_flag_needs_exactly_one_name() {
        let result = confirmation(
            EntityKind::Rule,
            true,
            targets(EntityKind::Rule, &["a", "b"]),
        );
        assert!(result.is_err());
    }

    #[test]
    fn single_rule_modal_is_titled_by_name() {
        let modal = confirmation(
            EntityKind::Rule,
            true,
            targets(EntityKind::Rule, &["Suspicious Login"]),
        )
        .unwrap();
        assert_eq!(modal.title(), "Delete Suspicious Login");
    }

    #[test]
    fn saved_queries_join_names() {
        let modal = confirmation(
            EntityKind::SavedQuery,
            false,
            targets(EntityKind::SavedQuery, &["Logins", "Errors", "Admins"]),
        )
        .unwrap();
        assert_eq!(
            modal.subtitle(),
            "Are you sure you want to delete Logins, Errors and Admins?"
        );
    }

    #[test]
    fn destinations_are_refused() {
        assert!(confirmation(EntityKind::Destination, false, Vec::new()).is_err());
    }
}
