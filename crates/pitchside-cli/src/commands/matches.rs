use pitchside_core::{parse_date, FootballDataService, MatchFilter};
use time::OffsetDateTime;

use crate::cli::MatchesArgs;
use crate::error::CliError;

use super::{parse_filters, CommandOutput, RouteReport};

pub async fn run(
    args: &MatchesArgs,
    service: &FootballDataService,
) -> Result<CommandOutput, CliError> {
    let date = match args.date.as_deref() {
        Some(raw) => parse_date(raw)?,
        None => OffsetDateTime::now_utc().date(),
    };
    let filters = parse_filters(&args.filters)?;

    let route = service.matches_by_date_routed(date, args.league).await?;
    let report = RouteReport::from_route(&route);
    let matches = MatchFilter::apply_all(&filters, route.data);

    Ok(CommandOutput::matches(&matches)?.with_route(report))
}
