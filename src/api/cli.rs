use clap::{Args, Parser, Subcommand};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing::info;

use super::error::ApiError;
use super::payload::api_request_from_json;
use crate::core::{EngineConfig, MAX_HORIZON_CAP, build_plan};

#[derive(Parser, Debug)]
#[command(
    name = "b2a",
    about = "Before-to-after wealth goal planner (timelines, required SIP/lump sum, scenarios)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the planning API over HTTP
    Serve {
        #[arg(long, default_value_t = 8080)]
        port: u16,
        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Compute one goal plan from a JSON request and print it
    Plan {
        #[arg(
            long,
            default_value = "-",
            help = "Path to a JSON goal request, or - for stdin"
        )]
        input: String,
        #[arg(long, help = "Pretty-print the JSON output")]
        pretty: bool,
        #[command(flatten)]
        config: ConfigArgs,
    },
}

#[derive(Args, Debug, Default, Clone)]
pub struct ConfigArgs {
    #[arg(long, help = "JSON engine config (risk profile returns, horizon cap, scenario spread)")]
    pub config: Option<PathBuf>,
    #[arg(long, help = "Default annual return for conservative profiles in percent")]
    pub conservative_return: Option<f64>,
    #[arg(long, help = "Default annual return for moderate profiles in percent")]
    pub moderate_return: Option<f64>,
    #[arg(long, help = "Default annual return for aggressive profiles in percent")]
    pub aggressive_return: Option<f64>,
    #[arg(long, help = "Maximum timeline in years")]
    pub max_years: Option<u32>,
}

pub async fn run_cli(cli: Cli) -> Result<(), ApiError> {
    match cli.command {
        Command::Serve { port, config } => {
            let config = load_engine_config(&config)?;
            super::run_http_server(port, config).await?;
            Ok(())
        }
        Command::Plan {
            input,
            pretty,
            config,
        } => {
            let config = load_engine_config(&config)?;
            let json = read_input(&input)?;
            println!("{}", plan_json(&json, &config, pretty)?);
            Ok(())
        }
    }
}

fn plan_json(json: &str, config: &EngineConfig, pretty: bool) -> Result<String, ApiError> {
    let request = api_request_from_json(json, config)?;
    let plan = build_plan(&request.plan, config);
    info!(
        effective_return = plan.effective_return,
        achievable = plan.requirements.is_achievable_with_cash_flows,
        "plan computed"
    );
    let rendered = if pretty {
        serde_json::to_string_pretty(&plan)?
    } else {
        serde_json::to_string(&plan)?
    };
    Ok(rendered)
}

fn read_input(input: &str) -> Result<String, ApiError> {
    if input == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

pub(crate) fn load_engine_config(args: &ConfigArgs) -> Result<EngineConfig, ApiError> {
    let mut config = match &args.config {
        Some(path) => serde_json::from_str::<EngineConfig>(&fs::read_to_string(path)?)?,
        None => EngineConfig::default(),
    };

    if let Some(v) = args.conservative_return {
        config.risk_returns.conservative = v;
    }
    if let Some(v) = args.moderate_return {
        config.risk_returns.moderate = v;
    }
    if let Some(v) = args.aggressive_return {
        config.risk_returns.aggressive = v;
    }
    if let Some(v) = args.max_years {
        config.max_years = v;
    }

    validate_engine_config(&config)?;
    Ok(config)
}

fn validate_engine_config(config: &EngineConfig) -> Result<(), ApiError> {
    if config.max_years == 0 || config.max_years > MAX_HORIZON_CAP {
        return Err(ApiError::Config(format!(
            "maxYears must be between 1 and {MAX_HORIZON_CAP}"
        )));
    }
    for (name, rate) in [
        ("riskReturns.conservative", config.risk_returns.conservative),
        ("riskReturns.moderate", config.risk_returns.moderate),
        ("riskReturns.aggressive", config.risk_returns.aggressive),
    ] {
        if !rate.is_finite() || rate <= -100.0 {
            return Err(ApiError::Config(format!("{name} must be a finite rate > -100")));
        }
    }
    if !config.optimistic_bonus.is_finite() || config.optimistic_bonus < 0.0 {
        return Err(ApiError::Config("optimisticBonus must be >= 0".to_string()));
    }
    if !config.pessimistic_penalty.is_finite() || config.pessimistic_penalty < 0.0 {
        return Err(ApiError::Config("pessimisticPenalty must be >= 0".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_args_yield_default_engine_config() {
        let config = load_engine_config(&ConfigArgs::default()).expect("valid config");
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn flag_overrides_apply_on_top_of_defaults() {
        let args = ConfigArgs {
            moderate_return: Some(9.5),
            max_years: Some(50),
            ..ConfigArgs::default()
        };
        let config = load_engine_config(&args).expect("valid config");
        assert_eq!(config.risk_returns.moderate, 9.5);
        assert_eq!(config.risk_returns.aggressive, 12.0);
        assert_eq!(config.max_years, 50);
    }

    #[test]
    fn rejects_zero_horizon_cap() {
        let args = ConfigArgs {
            max_years: Some(0),
            ..ConfigArgs::default()
        };
        let err = load_engine_config(&args).expect_err("zero cap");
        assert!(err.to_string().contains("maxYears"));
    }

    #[test]
    fn rejects_horizon_cap_above_ceiling() {
        let args = ConfigArgs {
            max_years: Some(4_000_000_000),
            ..ConfigArgs::default()
        };
        let err = load_engine_config(&args).expect_err("huge cap");
        assert!(matches!(err, ApiError::Config(_)));
        assert!(err.to_string().contains("maxYears"));

        let at_ceiling = ConfigArgs {
            max_years: Some(MAX_HORIZON_CAP),
            ..ConfigArgs::default()
        };
        assert_eq!(
            load_engine_config(&at_ceiling).expect("ceiling is allowed").max_years,
            MAX_HORIZON_CAP
        );
    }

    #[test]
    fn rejects_missing_config_file() {
        let args = ConfigArgs {
            config: Some(PathBuf::from("/nonexistent/b2a-config.json")),
            ..ConfigArgs::default()
        };
        assert!(matches!(load_engine_config(&args), Err(ApiError::Io(_))));
    }

    #[test]
    fn cli_parses_plan_subcommand() {
        let cli = Cli::try_parse_from([
            "b2a",
            "plan",
            "--input",
            "goal.json",
            "--pretty",
            "--aggressive-return",
            "14",
        ])
        .expect("cli should parse");
        match cli.command {
            Command::Plan {
                input,
                pretty,
                config,
            } => {
                assert_eq!(input, "goal.json");
                assert!(pretty);
                assert_eq!(config.aggressive_return, Some(14.0));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn cli_serve_defaults_port() {
        let cli = Cli::try_parse_from(["b2a", "serve"]).expect("cli should parse");
        assert!(matches!(cli.command, Command::Serve { port: 8080, .. }));
    }

    #[test]
    fn plan_json_reports_organic_growth_fixture() {
        let json = r#"{
          "currentWealth": 5000000,
          "targetWealth": 20000000,
          "desiredTimelineYears": 15,
          "annualReturn": 11,
          "allocations": [{"assetClassId": "equity", "allocationPercentage": 100, "returnRate": 11}]
        }"#;
        let rendered = plan_json(json, &EngineConfig::default(), false).expect("plan renders");
        let value: serde_json::Value = serde_json::from_str(&rendered).expect("valid json");
        assert_eq!(value["effectiveReturn"], 11.0);
        assert_eq!(value["requirements"]["isAchievableWithCashFlows"], true);
        assert_eq!(value["requirements"]["requiredMonthlySIP"], 0.0);
        assert_eq!(value["requirements"]["requiredLumpsum"], 0.0);
        assert_eq!(value["naturalTimeline"]["years"], 15);
    }
}
