use clap::Parser;

use envi::{Cli, EnviError, Store, logging, ops};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(err.exit_code());
    }
}

fn run(cli: Cli) -> Result<(), EnviError> {
    let settings = cli.settings_loader().load()?;
    let action = cli.into_action()?;
    tracing::debug!(id = action.id(), ?action, "resolved action");

    let mut store = Store::with_options(settings.open_backend()?, settings.store_options());
    let outcome = ops::execute(&mut store, action, settings.output)?;
    print!("{outcome}");
    Ok(())
}
