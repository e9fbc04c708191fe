//! eztemplate's main application entry point.
//! Handles command-line argument parsing, logger setup and error reporting.

use eztemplate::{
    cli::{get_args, Cli},
    config::Config,
    constants::HELP_ENGINE,
    engine::EngineRegistry,
    error::{default_error_handler, Result},
    logger::init_logger,
    run,
};

/// Main application entry point.
fn main() {
    let cli = get_args();

    init_logger(cli.args.verbose);

    let registry = EngineRegistry::builtin();

    if cli.args.engine == HELP_ENGINE {
        eprint!("{}", registry.describe());
        return;
    }

    if let Err(err) = execute(cli, &registry) {
        default_error_handler(err);
    }
}

fn execute(cli: Cli, registry: &EngineRegistry) -> Result<()> {
    let config = Config::from_cli(cli, registry)?;
    if config.tolerant {
        log::debug!("Tolerant mode: unknown names become placeholders");
    }
    run(&config, registry)
}
