use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, bail};
use serde::Serialize;
use warden_cache::{NormalizedCache, SelectionTracker, SharedCache, SharedSelection};
use warden_client::{
    Collaborators, ControllerSettings, DeleteController, DeleteOptions, DeleteOutcome,
    DeleteTarget, GraphQlTransport, LocalOutcome, LocalTransport, MemoryNavigator,
    MutationTransport, Notification, RecordingAnalytics, RecordingNotifier, TrackedEvent,
};
use warden_config::WardenConfig;
use warden_core::reference::Identify;
use warden_core::{CachedEntity, EntityKind, EntityRef};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::DeleteArgs;
use crate::commands::copy::confirmation;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct DeleteResponse {
    #[serde(flatten)]
    outcome: DeleteOutcome,
    notifications: Vec<Notification>,
    navigation: Vec<String>,
    selection: Vec<String>,
    analytics: Vec<TrackedEvent>,
}

/// Handle `warden delete`.
pub async fn run(args: &DeleteArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let outcome = if args.remote {
        let transport = GraphQlTransport::from_config(&ctx.config.api)
            .context("--remote needs a configured [api] section")?;
        execute(transport, args, ctx, flags).await?
    } else {
        execute(local_transport(args, &ctx.config), args, ctx, flags).await?
    };

    if let DeleteOutcome::RolledBack { message, .. } = outcome {
        bail!("delete rolled back: {message}");
    }
    Ok(())
}

fn local_transport(args: &DeleteArgs, config: &WardenConfig) -> LocalTransport {
    let outcome = match (&args.fail, args.reject) {
        (Some(message), _) => LocalOutcome::Fail(message.clone()),
        (None, true) => LocalOutcome::Reject,
        (None, false) => LocalOutcome::Confirm,
    };
    LocalTransport::new(outcome)
        .with_latency(Duration::from_millis(config.general.transport_latency_ms))
}

async fn execute<T: MutationTransport>(
    transport: T,
    args: &DeleteArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<DeleteOutcome> {
    let navigator = Arc::new(MemoryNavigator::at(args.path.as_str()));
    let notifier = Arc::new(RecordingNotifier::default());
    let analytics = Arc::new(RecordingAnalytics::default());

    let mut tracker = SelectionTracker::new();
    for id in &args.select {
        tracker.select(id.as_str());
    }
    let selection = SharedSelection::new(tracker);

    let controller = DeleteController::new(
        transport,
        ctx.cache.clone(),
        selection.clone(),
        Collaborators {
            navigator: navigator.clone(),
            notifier: notifier.clone(),
            analytics: analytics.clone(),
        },
        ControllerSettings::from(&ctx.config),
    );

    let targets = targets_for(&ctx.cache, args.kind, &args.ids)?;
    let outcome = confirmation(args.kind, false, targets)?
        .confirm(&controller, DeleteOptions::default())
        .await?;

    output(
        &DeleteResponse {
            outcome: outcome.clone(),
            notifications: notifier.notifications(),
            navigation: navigator.history(),
            selection: selection.read(|s| s.selection().to_vec())?,
            analytics: analytics.events(),
        },
        flags.format,
    )?;
    Ok(outcome)
}

/// Targets labelled with the cached display name when the entity is known.
fn targets_for(
    cache: &SharedCache,
    kind: EntityKind,
    ids: &[String],
) -> anyhow::Result<Vec<DeleteTarget>> {
    let targets = cache.read(|store| {
        let base = store.base();
        ids.iter()
            .map(|id| {
                let reference = EntityRef::new(kind, id.as_str());
                let label = cached(base, &reference)
                    .map_or_else(|| id.clone(), |entity| entity.label().to_string());
                DeleteTarget::new(reference, label)
            })
            .collect()
    })?;
    Ok(targets)
}

fn cached<'a>(cache: &'a NormalizedCache, reference: &EntityRef) -> Option<&'a CachedEntity> {
    if reference.kind == EntityKind::Detection {
        let resolved = cache.resolve_detection(&reference.id).ok()?;
        return cache.get(&resolved);
    }
    cache.get(reference)
}
