use pitchside_core::FootballDataService;

use crate::cli::StatsArgs;
use crate::error::CliError;

use super::CommandOutput;

pub async fn run(args: &StatsArgs, service: &FootballDataService) -> Result<CommandOutput, CliError> {
    let statistics = service.match_statistics(args.match_id).await?;

    Ok(CommandOutput::new(serde_json::to_value(statistics)?))
}
