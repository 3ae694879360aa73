//! Optimistic delete controller.
//!
//! One call to [`DeleteController::delete_entities`] walks
//! `Idle → Optimistic → {Reconciled | RolledBack}`: the optimistic layer is
//! registered before the request is sent, and exactly one of commit or
//! rollback runs when the transport answers. Cache and selection locks are
//! only taken in closures, never across the transport `.await`.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::json;
use warden_cache::{PendingDeletion, ReconcileReport, RequestId, SharedCache, SharedSelection};
use warden_config::{RedirectMatch, RoutesConfig, WardenConfig};
use warden_core::reference::Identify;
use warden_core::{CoreError, EntityKind, EntityRef};

use crate::collaborators::{Analytics, Navigator, Notification, Notifier};
use crate::error::{ClientError, TransportError};
use crate::modal::FeedbackCopy;
use crate::mutation::{DeleteMutation, DeleteRequest};
use crate::transport::MutationTransport;

/// An entity to delete plus the name shown for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteTarget {
    pub reference: EntityRef,
    pub label: String,
}

impl DeleteTarget {
    #[must_use]
    pub fn new(reference: EntityRef, label: impl Into<String>) -> Self {
        Self {
            reference,
            label: label.into(),
        }
    }

    /// Target for a loaded entity, labelled with its display name or id.
    #[must_use]
    pub fn from_entity(entity: &impl Identify) -> Self {
        Self::new(entity.reference(), entity.label())
    }
}

/// A bare reference; the id doubles as the label.
impl From<EntityRef> for DeleteTarget {
    fn from(reference: EntityRef) -> Self {
        let label = reference.id.clone();
        Self { reference, label }
    }
}

/// Decides whether to leave the current path after a successful delete.
pub type RedirectPredicate = Box<dyn Fn(&str, &[EntityRef]) -> bool + Send + Sync>;

/// Per-call behaviour overrides.
#[derive(Default)]
pub struct DeleteOptions {
    pub on_success: Option<Box<dyn FnOnce(&[EntityRef]) + Send>>,
    pub redirect: Option<RedirectPredicate>,
    pub list_path: Option<String>,
    pub copy: Option<FeedbackCopy>,
}

impl DeleteOptions {
    #[must_use]
    pub fn on_success(mut self, f: impl FnOnce(&[EntityRef]) + Send + 'static) -> Self {
        self.on_success = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn redirect_when(
        mut self,
        predicate: impl Fn(&str, &[EntityRef]) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.redirect = Some(Box::new(predicate));
        self
    }

    #[must_use]
    pub fn never_redirect(self) -> Self {
        self.redirect_when(|_, _| false)
    }

    #[must_use]
    pub fn list_path(mut self, path: impl Into<String>) -> Self {
        self.list_path = Some(path.into());
        self
    }
}

impl fmt::Debug for DeleteOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeleteOptions")
            .field("on_success", &self.on_success.is_some())
            .field("redirect", &self.redirect.is_some())
            .field("list_path", &self.list_path)
            .field("copy", &self.copy)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeletePhase {
    Idle,
    Optimistic,
    Reconciled,
    RolledBack,
}

impl DeletePhase {
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Idle => &[Self::Optimistic],
            Self::Optimistic => &[Self::Reconciled, Self::RolledBack],
            Self::Reconciled | Self::RolledBack => &[Self::Idle],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }
}

/// Terminal result of one delete call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DeleteOutcome {
    Reconciled {
        request_id: RequestId,
        references: Vec<EntityRef>,
        report: ReconcileReport,
        #[serde(skip_serializing_if = "Option::is_none")]
        redirected_to: Option<String>,
    },
    RolledBack {
        request_id: RequestId,
        references: Vec<EntityRef>,
        message: String,
    },
}

impl DeleteOutcome {
    #[must_use]
    pub const fn phase(&self) -> DeletePhase {
        match self {
            Self::Reconciled { .. } => DeletePhase::Reconciled,
            Self::RolledBack { .. } => DeletePhase::RolledBack,
        }
    }

    #[must_use]
    pub const fn is_reconciled(&self) -> bool {
        matches!(self, Self::Reconciled { .. })
    }
}

/// Settings taken from [`WardenConfig`].
#[derive(Debug, Clone)]
pub struct ControllerSettings {
    pub routes: RoutesConfig,
    pub redirect_match: RedirectMatch,
    pub analytics_enabled: bool,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self::from(&WardenConfig::default())
    }
}

impl From<&WardenConfig> for ControllerSettings {
    fn from(config: &WardenConfig) -> Self {
        Self {
            routes: config.routes.clone(),
            redirect_match: config.general.redirect_match,
            analytics_enabled: config.general.analytics_enabled,
        }
    }
}

#[derive(Clone)]
pub struct Collaborators {
    pub navigator: Arc<dyn Navigator>,
    pub notifier: Arc<dyn Notifier>,
    pub analytics: Arc<dyn Analytics>,
}

pub struct DeleteController<T> {
    transport: T,
    cache: SharedCache,
    selection: SharedSelection,
    collaborators: Collaborators,
    settings: ControllerSettings,
}

impl<T: MutationTransport> DeleteController<T> {
    pub const fn new(
        transport: T,
        cache: SharedCache,
        selection: SharedSelection,
        collaborators: Collaborators,
        settings: ControllerSettings,
    ) -> Self {
        Self {
            transport,
            cache,
            selection,
            collaborators,
            settings,
        }
    }

    pub const fn transport(&self) -> &T {
        &self.transport
    }

    pub const fn cache(&self) -> &SharedCache {
        &self.cache
    }

    pub const fn selection(&self) -> &SharedSelection {
        &self.selection
    }

    /// Delete `targets` with one batched mutation.
    ///
    /// Validation failures (empty input, unresolvable detection ids, mixed
    /// families, cached fields of the wrong shape) return `Err` before
    /// anything is mutated or sent. Transport failures
    /// are rolled back and reported as [`DeleteOutcome::RolledBack`].
    pub async fn delete_entities(
        &self,
        targets: Vec<DeleteTarget>,
        options: DeleteOptions,
    ) -> Result<DeleteOutcome, ClientError> {
        let references = self.resolve(targets)?;
        let mutation = DeleteMutation::for_references(&references)?;
        let count = references.len();
        let DeleteOptions {
            on_success,
            redirect,
            list_path,
            copy,
        } = options;
        let copy = copy.unwrap_or_else(|| FeedbackCopy::for_mutation(mutation, count));

        let pending = PendingDeletion::new(references.clone(), mutation.affected_fields());
        let request_id = pending.request_id;
        let mut phase = DeletePhase::Idle;

        // Nothing is sent unless the confirmed cache can take the reconcile.
        self.cache.read(|store| store.check(&pending))??;
        if mutation.is_optimistic() {
            self.cache
                .write(|store| store.push_optimistic(pending.clone()))??;
        }
        advance(&mut phase, DeletePhase::Optimistic, request_id);
        tracing::info!(request = %request_id, %mutation, count, "dispatching delete");

        let request = DeleteRequest::new(mutation, &references);
        let answer = match self.transport.send(&request).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(TransportError::Rejected),
            Err(error) => Err(error),
        };

        if let Err(error) = answer {
            let rolled_back = self.cache.write(|store| store.rollback(request_id));
            advance(&mut phase, DeletePhase::RolledBack, request_id);
            let message = error.user_message();
            tracing::warn!(request = %request_id, %error, "delete failed; rolled back");

            self.collaborators
                .notifier
                .notify(Notification::error(copy.failure, message.clone()));
            self.track(mutation.failed_event(), count);
            rolled_back?;
            return Ok(DeleteOutcome::RolledBack {
                request_id,
                references,
                message,
            });
        }

        let report = match self.cache.write(|store| store.commit(&pending))? {
            Ok(report) => report,
            Err(error) => {
                tracing::error!(request = %request_id, %error, "confirmed delete could not be reconciled");
                self.cache.write(|store| store.rollback(request_id))?;
                return Err(error.into());
            }
        };
        advance(&mut phase, DeletePhase::Reconciled, request_id);
        tracing::debug!(
            request = %request_id,
            removed = report.removed_entries,
            cleared = report.cleared_singletons.len(),
            evicted = report.evicted.len(),
            not_found = report.not_found.len(),
            "reconciled delete"
        );

        let ids: Vec<&str> = references.iter().map(|r| r.id.as_str()).collect();
        self.selection.write(|selection| selection.remove_all(&ids))?;

        let redirected_to =
            self.redirect_if_viewing(mutation, &references, redirect.as_ref(), list_path);
        self.collaborators
            .notifier
            .notify(Notification::success(copy.success));
        self.track(mutation.completed_event(), count);
        if let Some(on_success) = on_success {
            on_success(&references);
        }
        tracing::info!(request = %request_id, count, "delete confirmed");

        Ok(DeleteOutcome::Reconciled {
            request_id,
            references,
            report,
            redirected_to,
        })
    }

    /// Narrow detection ids to Rule/Policy and collapse duplicates.
    fn resolve(&self, targets: Vec<DeleteTarget>) -> Result<Vec<EntityRef>, ClientError> {
        if targets.is_empty() {
            return Err(CoreError::EmptyReferenceSet.into());
        }
        let mut references: Vec<EntityRef> = Vec::with_capacity(targets.len());
        for target in targets {
            let reference = if target.reference.kind == EntityKind::Detection {
                self.cache
                    .read(|store| store.base().resolve_detection(&target.reference.id))??
            } else {
                target.reference
            };
            if !references.contains(&reference) {
                references.push(reference);
            }
        }
        Ok(references)
    }

    fn redirect_if_viewing(
        &self,
        mutation: DeleteMutation,
        references: &[EntityRef],
        predicate: Option<&RedirectPredicate>,
        list_path: Option<String>,
    ) -> Option<String> {
        let current = self.collaborators.navigator.current_path();
        let viewing_deleted = predicate.map_or_else(
            || {
                references
                    .iter()
                    .any(|r| path_refers_to(&current, &r.id, self.settings.redirect_match))
            },
            |predicate| predicate(&current, references),
        );
        if !viewing_deleted {
            return None;
        }
        let target =
            list_path.unwrap_or_else(|| mutation.list_path(&self.settings.routes).to_string());
        self.collaborators.navigator.navigate(&target);
        Some(target)
    }

    fn track(&self, event: &str, count: usize) {
        if !self.settings.analytics_enabled {
            return;
        }
        if let Err(error) = self
            .collaborators
            .analytics
            .track(event, &json!({ "count": count }))
        {
            tracing::warn!(event, %error, "analytics event dropped");
        }
    }
}

fn advance(phase: &mut DeletePhase, next: DeletePhase, request_id: RequestId) {
    debug_assert!(phase.can_transition_to(next), "{phase:?} -> {next:?}");
    tracing::debug!(request = %request_id, from = ?*phase, to = ?next, "delete phase");
    *phase = next;
}

/// Whether `path` points at the entity `id`.
///
/// Query string and fragment are ignored.
#[must_use]
pub fn path_refers_to(path: &str, id: &str, mode: RedirectMatch) -> bool {
    if id.is_empty() {
        return false;
    }
    let path = path.split(['?', '#']).next().unwrap_or_default();
    match mode {
        RedirectMatch::Segment => path.split('/').any(|segment| segment == id),
        RedirectMatch::Substring => path.contains(id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/detections/R1/", "R1", RedirectMatch::Segment, true)]
    #[case("/detections/R1/edit?tab=tests", "R1", RedirectMatch::Segment, true)]
    #[case("/detections/R10/", "R1", RedirectMatch::Segment, false)]
    #[case("/detections/R10/", "R1", RedirectMatch::Substring, true)]
    #[case("/detections/", "R1", RedirectMatch::Substring, false)]
    #[case("/detections/?q=R1", "R1", RedirectMatch::Substring, false)]
    #[case("/detections/", "", RedirectMatch::Substring, false)]
    fn redirect_matching(
        #[case] path: &str,
        #[case] id: &str,
        #[case] mode: RedirectMatch,
        #[case] expected: bool,
    ) {
        assert_eq!(path_refers_to(path, id, mode), expected);
    }

    #[test]
    fn phases_only_move_forward_through_one_terminal_state() {
        assert!(DeletePhase::Idle.can_transition_to(DeletePhase::Optimistic));
        assert!(DeletePhase::Optimistic.can_transition_to(DeletePhase::RolledBack));
        assert!(!DeletePhase::Idle.can_transition_to(DeletePhase::Reconciled));
        assert!(!DeletePhase::Reconciled.can_transition_to(DeletePhase::RolledBack));
    }

    #[test]
    fn bare_reference_is_labelled_by_id() {
        let target = DeleteTarget::from(EntityRef::rule("AWS.Root.Login"));
        assert_eq!(target.label, "AWS.Root.Login");
    }
}
