//! Confirmation modal copy.
//!
//! A [`DeleteConfirmation`] renders title and subtitle for the entities about
//! to be deleted and hands them to the controller on confirm. It never touches
//! the cache.

use warden_core::EntityKind;
use warden_core::copy::{Noun, join_names};

use crate::controller::{DeleteController, DeleteOptions, DeleteOutcome, DeleteTarget};
use crate::error::ClientError;
use crate::mutation::DeleteMutation;
use crate::transport::MutationTransport;

/// Notification titles for the two terminal outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackCopy {
    pub success: String,
    pub failure: String,
}

impl FeedbackCopy {
    /// Default copy: `Successfully deleted detection` / `... 3 detections`.
    ///
    /// The noun is lowercased since it sits mid-sentence.
    #[must_use]
    pub fn for_mutation(mutation: DeleteMutation, count: usize) -> Self {
        let counted = mutation.noun().counted(count).to_lowercase();
        Self {
            success: format!("Successfully deleted {counted}"),
            failure: format!("Failed to delete {counted}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ModalStyle {
    /// Bulk detection modal from the list view.
    Detections,
    /// Modal for the rule or policy currently being viewed.
    SingleDetection,
    /// Modal listing every name being deleted.
    Named(DeleteMutation),
}

#[derive(Debug, Clone)]
pub struct DeleteConfirmation {
    style: ModalStyle,
    targets: Vec<DeleteTarget>,
}

impl DeleteConfirmation {
    #[must_use]
    pub const fn detections(targets: Vec<DeleteTarget>) -> Self {
        Self {
            style: ModalStyle::Detections,
            targets,
        }
    }

    #[must_use]
    pub fn detection(target: DeleteTarget) -> Self {
        Self {
            style: ModalStyle::SingleDetection,
            targets: vec![target],
        }
    }

    #[must_use]
    pub const fn data_models(targets: Vec<DeleteTarget>) -> Self {
        Self {
            style: ModalStyle::Named(DeleteMutation::DataModels),
            targets,
        }
    }

    #[must_use]
    pub const fn saved_queries(targets: Vec<DeleteTarget>) -> Self {
        Self {
            style: ModalStyle::Named(DeleteMutation::SavedQueries),
            targets,
        }
    }

    #[must_use]
    pub fn targets(&self) -> &[DeleteTarget] {
        &self.targets
    }

    #[must_use]
    pub const fn mutation(&self) -> DeleteMutation {
        match self.style {
            ModalStyle::Detections | ModalStyle::SingleDetection => DeleteMutation::Detections,
            ModalStyle::Named(mutation) => mutation,
        }
    }

    #[must_use]
    pub fn title(&self) -> String {
        let count = self.targets.len();
        match self.style {
            ModalStyle::SingleDetection => format!("Delete {}", self.first_label()),
            ModalStyle::Detections | ModalStyle::Named(_) => {
                let noun = title_noun(self.mutation());
                if count == 1 {
                    format!("Delete {}", noun.singular)
                } else {
                    format!("Delete {count} {}", noun.plural)
                }
            }
        }
    }

    #[must_use]
    pub fn subtitle(&self) -> String {
        let count = self.targets.len();
        match self.style {
            ModalStyle::Detections if count != 1 => {
                format!("Are you sure you want to delete all {count} detections?")
            }
            ModalStyle::Detections | ModalStyle::SingleDetection => {
                format!("Are you sure you want to delete {}?", self.first_label())
            }
            ModalStyle::Named(_) => {
                let names: Vec<&str> = self.targets.iter().map(|t| t.label.as_str()).collect();
                format!("Are you sure you want to delete {}?", join_names(&names))
            }
        }
    }

    #[must_use]
    pub fn feedback(&self) -> FeedbackCopy {
        match self.style {
            ModalStyle::SingleDetection => {
                let noun = self
                    .targets
                    .first()
                    .map_or(Noun::DETECTION, |t| match t.reference.kind {
                        EntityKind::Rule => Noun::RULE,
                        EntityKind::Policy => Noun::POLICY,
                        _ => Noun::DETECTION,
                    });
                let label = self.first_label();
                FeedbackCopy {
                    success: format!("Successfully deleted {}: {label}", noun.singular),
                    failure: format!("Failed to delete {}: {label}", noun.singular),
                }
            }
            ModalStyle::Detections | ModalStyle::Named(_) => {
                FeedbackCopy::for_mutation(self.mutation(), self.targets.len())
            }
        }
    }

    /// Hand the targets to `controller`, using this modal's feedback copy
    /// unless `options` already carries one.
    pub async fn confirm<T: MutationTransport>(
        self,
        controller: &DeleteController<T>,
        mut options: DeleteOptions,
    ) -> Result<DeleteOutcome, ClientError> {
        if options.copy.is_none() {
            options.copy = Some(self.feedback());
        }
        controller.delete_entities(self.targets, options).await
    }

    fn first_label(&self) -> &str {
        self.targets.first().map_or("", |t| t.label.as_str())
    }
}

/// Capitalized noun used in modal titles.
const fn title_noun(mutation: DeleteMutation) -> Noun {
    match mutation {
        DeleteMutation::Detections => Noun::new("Detection", "Detections"),
        DeleteMutation::DataModels | DeleteMutation::SavedQueries => mutation.noun(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use warden_core::EntityRef;

    fn rules(labels: &[&str]) -> Vec<DeleteTarget> {
        labels
            .iter()
            .enumerate()
            .map(|(i, label)| DeleteTarget::new(EntityRef::rule(format!("R{i}")), *label))
            .collect()
    }

    #[test]
    fn single_detection_uses_its_name() {
        let modal = DeleteConfirmation::detections(rules(&["Suspicious Login"]));
        assert_eq!(modal.title(), "Delete Detection");
        assert_eq!(
            modal.subtitle(),
            "Are you sure you want to delete Suspicious Login?"
        );
        assert_eq!(modal.feedback().success, "Successfully deleted detection");
    }

    #[test]
    fn bulk_detections_use_the_count() {
        let modal = DeleteConfirmation::detections(rules(&["a", "b", "c"]));
        assert_eq!(modal.title(), "Delete 3 Detections");
        assert_eq!(
            modal.subtitle(),
            "Are you sure you want to delete all 3 detections?"
        );
        assert_eq!(
            modal.feedback(),
            FeedbackCopy {
                success: "Successfully deleted 3 detections".into(),
                failure: "Failed to delete 3 detections".into(),
            }
        );
    }

    #[test]
    fn single_policy_modal_names_the_kind() {
        let target = DeleteTarget::new(EntityRef::policy("P1"), "S3 Encryption");
        let modal = DeleteConfirmation::detection(target);
        assert_eq!(modal.title(), "Delete S3 Encryption");
        assert_eq!(
            modal.feedback().success,
            "Successfully deleted policy: S3 Encryption"
        );
    }

    #[rstest]
    #[case(&["Okta"], "Delete Data Model", "Are you sure you want to delete Okta?")]
    #[case(&["Okta", "GSuite"], "Delete 2 Data Models", "Are you sure you want to delete Okta and GSuite?")]
    #[case(
        &["Okta", "GSuite", "Box"],
        "Delete 3 Data Models",
        "Are you sure you want to delete Okta, GSuite and Box?"
    )]
    fn data_model_copy(#[case] names: &[&str], #[case] title: &str, #[case] subtitle: &str) {
        let targets = names
            .iter()
            .map(|n| DeleteTarget::new(EntityRef::new(EntityKind::DataModel, *n), *n))
            .collect();
        let modal = DeleteConfirmation::data_models(targets);
        assert_eq!(modal.title(), title);
        assert_eq!(modal.subtitle(), subtitle);
    }

    #[rstest]
    #[case(DeleteMutation::DataModels, 1, "Successfully deleted data model", "Failed to delete data model")]
    #[case(
        DeleteMutation::SavedQueries,
        2,
        "Successfully deleted 2 saved queries",
        "Failed to delete 2 saved queries"
    )]
    fn notification_copy_is_lowercase_mid_sentence(
        #[case] mutation: DeleteMutation,
        #[case] count: usize,
        #[case] success: &str,
        #[case] failure: &str,
    ) {
        let copy = FeedbackCopy::for_mutation(mutation, count);
        assert_eq!(copy.success, success);
        assert_eq!(copy.failure, failure);
    }

    #[test]
    fn saved_query_modal_pluralizes() {
        let targets = vec![
            DeleteTarget::new(EntityRef::new(EntityKind::SavedQuery, "q1"), "Logins"),
            DeleteTarget::new(EntityRef::new(EntityKind::SavedQuery, "q2"), "Errors"),
        ];
        let modal = DeleteConfirmation::saved_queries(targets);
        assert_eq!(modal.title(), "Delete 2 Saved Queries");
        assert_eq!(modal.mutation(), DeleteMutation::SavedQueries);
    }
}
