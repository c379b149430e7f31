use pitchside_core::FootballDataService;

use crate::cli::LeaguesArgs;
use crate::error::CliError;

use super::{CommandOutput, RouteReport};

pub async fn run(
    args: &LeaguesArgs,
    service: &FootballDataService,
) -> Result<CommandOutput, CliError> {
    let route = service.leagues_routed(args.country.as_deref()).await?;

    Ok(CommandOutput::leagues(&route.data)?.with_route(RouteReport::from_route(&route)))
}
