use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use log::info;
use solar_proposal_calc::general::settings_file::{configuration_to_toml, load_or_default};
use solar_proposal_calc::reverse::plot::{plot_savings_projection, print_proposal_summary};
use solar_proposal_calc::reverse::projection::comparison_series;
use solar_proposal_calc::{Configuration, ReverseCalcResult, compute, compute_for_system};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "solar-proposal-calc")]
#[command(about = "Sizes a solar system for a monthly budget and projects its savings", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML configuration file (defaults are used when omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Size a system for the client's monthly budget
    Reverse {
        /// Monthly budget in R$ (the current electricity bill)
        #[arg(long)]
        budget: f64,

        /// Current tariff in R$/kWh
        #[arg(long)]
        tariff: f64,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Build a proposal for a known system size
    System {
        /// Installed power in kWp
        #[arg(long)]
        power: f64,

        /// Current monthly bill in R$
        #[arg(long)]
        bill: f64,

        /// Current tariff in R$/kWh
        #[arg(long)]
        tariff: f64,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Render cumulative savings with and without tariff escalation
    Chart {
        /// Monthly budget in R$
        #[arg(long)]
        budget: f64,

        /// Current tariff in R$/kWh
        #[arg(long)]
        tariff: f64,

        /// Output PNG file
        #[arg(short, long, default_value = "savings_projection.png")]
        output: PathBuf,
    },
    /// Print the active configuration as TOML
    Config,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Reverse {
            budget,
            tariff,
            json,
        } => {
            let result = compute(budget, tariff, &config)
                .with_context(|| format!("Failed to size a system for a budget of {}", budget))?;
            report(&result, &config, json)?;
        }
        Commands::System {
            power,
            bill,
            tariff,
            json,
        } => {
            let result = compute_for_system(power, bill, tariff, &config)
                .with_context(|| format!("Failed to build a proposal for {} kWp", power))?;
            report(&result, &config, json)?;
        }
        Commands::Chart {
            budget,
            tariff,
            output,
        } => {
            let result = compute(budget, tariff, &config)
                .with_context(|| format!("Failed to size a system for a budget of {}", budget))?;
            let series = comparison_series(&result.recommendation, tariff, &config);
            let filename = output
                .to_str()
                .ok_or_else(|| anyhow!("Output path is not valid UTF-8: {}", output.display()))?;
            info!("Rendering {} projection years to {}", series.len(), filename);
            plot_savings_projection(&series, result.recommendation.system_value, filename)
                .map_err(|e| anyhow!(e.to_string()))
                .context("Failed to render the savings chart")?;
        }
        Commands::Config => {
            print!("{}", configuration_to_toml(&config)?);
        }
    }

    Ok(())
}

fn report(result: &ReverseCalcResult, config: &Configuration, json: bool) -> Result<()> {
    if json {
        let text = serde_json::to_string_pretty(result).context("Failed to serialize the result")?;
        println!("{}", text);
    } else {
        print_proposal_summary(result, config);
    }
    Ok(())
}
