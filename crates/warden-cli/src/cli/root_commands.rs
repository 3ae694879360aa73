use clap::{Args, Subcommand};
use warden_core::EntityKind;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Print the cache as the UI would render it.
    Show(ShowArgs),
    /// Delete entities through the optimistic delete flow.
    Delete(DeleteArgs),
    /// Print confirmation modal copy for the given names.
    Copy(CopyArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ShowArgs {
    /// Only print the entities held by this root field
    #[arg(long)]
    pub field: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct DeleteArgs {
    /// Ids of the entities to delete
    #[arg(required = true)]
    pub ids: Vec<String>,

    /// Entity kind (rule, policy, detection, data-model, saved-query)
    #[arg(short, long, default_value = "detection")]
    pub kind: EntityKind,

    /// Path the user is currently viewing
    #[arg(long, default_value = "/")]
    pub path: String,

    /// Ids selected in the list view before the delete
    #[arg(long, value_delimiter = ',')]
    pub select: Vec<String>,

    /// Make the in-process server fail with this message
    #[arg(long, conflicts_with_all = ["reject", "remote"])]
    pub fail: Option<String>,

    /// Make the in-process server answer `false`
    #[arg(long, conflicts_with = "remote")]
    pub reject: bool,

    /// Send the mutation to the configured API instead of answering in-process
    #[arg(long)]
    pub remote: bool,
}

#[derive(Clone, Debug, Args)]
pub struct CopyArgs {
    /// Display names of the entities
    #[arg(required = true)]
    pub names: Vec<String>,

    /// Entity kind (rule, policy, detection, data-model, saved-query)
    #[arg(short, long, default_value = "detection")]
    pub kind: EntityKind,

    /// Use the single rule/policy modal instead of the list modal
    #[arg(long)]
    pub single: bool,
}
