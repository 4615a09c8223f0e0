mod adapters;
mod commands;
mod shell;
mod terminal;

use std::sync::Arc;
use std::time::Duration;

use adapters::{FileInventory, SubprocessExecutor};
use commands::CommandLine;
use terminal::{logging, print};

use mrcli_common::model::OutputMode;
use mrcli_core::inventory::InventorySource;
use mrcli_core::render::Normalizer;
use mrcli_core::session::Session;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CommandLine::parse_args();

    logging::init_logging();

    let inventory = Arc::new(FileInventory::load(&args.inventory)?);
    mrcli_common::success!(
        "Loaded {} device(s) from {}",
        inventory.list_devices()?.len(),
        args.inventory.display()
    );
    let executor = Arc::new(SubprocessExecutor::new(&args.remote_shell));

    // The normalization collaborator is resolved once, here. None ships
    // with this binary, so structured mode stays disabled for the session.
    let mut session = Session::new(inventory, executor, Normalizer::Unavailable);

    if let Some(secs) = args.timeout {
        session.set_timeout(Duration::from_secs(secs))?;
    }
    if let Some(mode) = &args.output {
        session.set_output(mode.parse::<OutputMode>().map_err(anyhow::Error::msg)?)?;
    }
    if let Some(pattern) = &args.targets {
        session.select_targets(pattern)?;
    }

    match &args.cmd {
        Some(command) => {
            let body = session.run(command).await?;
            print::body(&body);
            Ok(())
        }
        None => shell::run(&mut session).await,
    }
}
