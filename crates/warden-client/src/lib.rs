//! # warden-client
//!
//! Delete flow for detections, data models and saved queries.
//!
//! - [`DeleteController`]: optimistic layer, one batched mutation, then commit
//!   or rollback, followed by selection cleanup, redirect, notification and
//!   analytics
//! - [`MutationTransport`]: [`GraphQlTransport`] over HTTP and the in-process
//!   [`LocalTransport`]
//! - [`DeleteConfirmation`]: modal copy, hands its targets to the controller

pub mod collaborators;
pub mod controller;
pub mod error;
pub mod modal;
pub mod mutation;
pub mod transport;

pub use collaborators::{
    Analytics, MemoryNavigator, Navigator, Notification, NotificationVariant, Notifier,
    RecordingAnalytics, RecordingNotifier, TrackedEvent,
};
pub use controller::{
    Collaborators, ControllerSettings, DeleteController, DeleteOptions, DeleteOutcome,
    DeletePhase, DeleteTarget, path_refers_to,
};
pub use error::{ClientError, TransportError, extract_error_message};
pub use modal::{DeleteConfirmation, FeedbackCopy};
pub use mutation::{DeleteMutation, DeleteRequest};
pub use transport::{GraphQlTransport, LocalOutcome, LocalTransport, MutationTransport};
