use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use log::{warn, LevelFilter};

use lander_simulation::*;

#[derive(Debug, Parser)]
#[command(author, version, about = "Turn-based lunar lander")]
struct Cli {
    /// Scenario file (TOML). Defaults to the built-in lunar descent
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the time step in seconds
    #[arg(long)]
    delta_time: Option<f64>,

    /// Reject throttle values outside [0, 1] instead of passing them through
    #[arg(long, default_value_t = false)]
    strict: bool,

    /// Scale the position update by the time step
    #[arg(long, default_value_t = false)]
    scaled_position: bool,

    /// Fly a fixed throttle sequence without prompting, e.g. 0,0,1,0.5
    #[arg(long, value_delimiter = ',')]
    script: Option<Vec<f64>>,
}

/// Reads throttle commands typed by the player, one line per tick.
struct ConsoleThrottle<R: BufRead> {
    input: R,
    delta_time: f64,
}

impl<R: BufRead> ConsoleThrottle<R> {
    // None once stdin is closed
    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line),
        }
    }
}

impl<R: BufRead> ThrottleSource for ConsoleThrottle<R> {
    fn next_throttle(&mut self, status: &StatusReport) -> f64 {
        println!(
            "Every time you press enter, the game advances {:.2}s",
            self.delta_time
        );
        println!("{}", status);
        println!("How much throttle? (Percentage between 0 and 1)");
        if let Err(e) = io::stdout().flush() {
            warn!("Failed to flush prompt: {}", e);
        }

        self.read_line()
            .map(|line| parse_throttle(&line))
            .unwrap_or(0.0)
    }
}

fn report(summary: &RunSummary, telemetry: &Telemetry, delta_time: f64) {
    println!("{}", summary.touchdown);
    println!("---------------------------------------");
    println!("{}", summary.outcome);
    println!("{}", telemetry.summary(delta_time));
}

// Scenario file (or the stock descent) with the command-line overrides applied
fn scenario(cli: &Cli) -> SimulationResult<SimulationConfig> {
    let mut config = match &cli.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(delta_time) = cli.delta_time {
        config.delta_time = delta_time;
    }
    if cli.strict {
        config.input_validation = InputValidation::Strict;
    }
    if cli.scaled_position {
        config.position_integration = PositionIntegration::Scaled;
    }
    Ok(config)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Warn)
        .parse_default_env()
        .init();

    let cli = Cli::parse();

    let config = scenario(&cli)?;
    let delta_time = config.delta_time;

    let mut simulation = Simulation::new(config)?;

    if let Some(commands) = cli.script {
        let mut telemetry = Telemetry::new();
        let summary = simulation.run(&mut ScriptedThrottle::new(commands), &mut telemetry)?;
        report(&summary, &telemetry, delta_time);
        return Ok(());
    }

    let mut console = ConsoleThrottle {
        input: io::stdin().lock(),
        delta_time,
    };
    loop {
        let mut telemetry = Telemetry::new();
        let summary = simulation.run(&mut console, &mut telemetry)?;
        report(&summary, &telemetry, delta_time);

        println!("Do you want to play again? (Y/N)");
        match console.read_line() {
            Some(answer) if matches!(answer.trim(), "Y" | "y") => simulation.start()?,
            _ => break,
        }
    }

    Ok(())
}
