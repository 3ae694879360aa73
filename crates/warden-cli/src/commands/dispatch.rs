use crate::cli::{Commands, GlobalFlags};
use crate::commands::{copy, delete, show};
use crate::context::AppContext;

pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Show(args) => show::run(&args, ctx, flags),
        Commands::Delete(args) => delete::run(&args, ctx, flags).await,
        Commands::Copy(args) => copy::run(&args, flags),
    }
}
