use pitchside_core::{FootballDataService, MatchFilter};

use crate::cli::LiveArgs;
use crate::error::CliError;

use super::{parse_filters, CommandOutput, RouteReport};

pub async fn run(args: &LiveArgs, service: &FootballDataService) -> Result<CommandOutput, CliError> {
    let filters = parse_filters(&args.filters)?;
    let route = service.live_matches_routed().await?;
    let report = RouteReport::from_route(&route);
    let matches = MatchFilter::apply_all(&filters, route.data);

    Ok(CommandOutput::matches(&matches)?.with_route(report))
}
