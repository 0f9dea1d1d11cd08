use anyhow::Result;

use crate::{
    cli::Cli,
    domain, infra, relay, ui,
    usecases::{self, bootstrap},
};

pub fn run(cli: Cli) -> Result<()> {
    let mut context = bootstrap::bootstrap(&cli.bootstrap_options())?;

    tracing::debug!(
        ui = ui::module_name(),
        domain = domain::module_name(),
        relay = relay::module_name(),
        usecases = usecases::module_name(),
        infra = infra::module_name(),
        "module boundaries loaded"
    );

    let result = bootstrap::compose_shell(&mut context)
        .map_err(anyhow::Error::from)
        .and_then(|mut shell| {
            ui::shell::start(
                &context,
                shell.event_source.as_mut(),
                shell.orchestrator.as_mut(),
            )
        });

    context.shutdown();
    result
}
