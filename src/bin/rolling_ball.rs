//! Rolling Ball Demo
//!
//! Run with: `cargo run --bin rolling-ball`
//!
//! Text-mode simulation of a ball inside a rotating box. Prints the ball
//! position and the box corners (relative to the box center) after every
//! fixed step.
//!
//! Options:
//! - `--config <file.json>`: Load scene settings (missing fields use defaults)
//! - `--duration <seconds>`: Simulated time to run
//! - `--time-step <seconds>`: Fixed physics step
//! - `--json`: Print one JSON object per step instead of text
//! - `--realtime`: Sleep one time step between frames

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use tumble_box_engine::physics::PhysicsError;
use tumble_box_engine::scenario::{Scenario, ScenarioConfig};

// ============================================================================
// COMMAND LINE
// ============================================================================

#[derive(Debug, Default)]
struct Options {
    config: Option<PathBuf>,
    duration: Option<f32>,
    time_step: Option<f32>,
    json: bool,
    realtime: bool,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Options, String> {
    let mut options = Options::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args.next().ok_or("--config needs a file path")?;
                options.config = Some(PathBuf::from(path));
            }
            "--duration" => options.duration = Some(parse_seconds(&arg, args.next())?),
            "--time-step" => options.time_step = Some(parse_seconds(&arg, args.next())?),
            "--json" => options.json = true,
            "--realtime" => options.realtime = true,
            "-h" | "--help" => return Err(usage()),
            other => return Err(format!("unknown argument: {other}\n{}", usage())),
        }
    }
    Ok(options)
}

fn parse_seconds(flag: &str, value: Option<String>) -> Result<f32, String> {
    let value = value.ok_or_else(|| format!("{flag} needs a value"))?;
    value
        .parse()
        .map_err(|e| format!("{flag}: invalid number {value:?}: {e}"))
}

fn usage() -> String {
    "usage: rolling-ball [--config FILE] [--duration SECONDS] [--time-step SECONDS] [--json] [--realtime]"
        .to_string()
}

// ============================================================================
// MAIN
// ============================================================================

fn build_config(options: &Options) -> Result<ScenarioConfig, PhysicsError> {
    let mut config = match &options.config {
        Some(path) => ScenarioConfig::load(path)?,
        None => ScenarioConfig::default(),
    };
    if let Some(duration) = options.duration {
        config.duration = duration;
    }
    if let Some(time_step) = options.time_step {
        config.time_step = time_step;
    }
    Ok(config)
}

fn run(options: &Options) -> Result<(), Box<dyn std::error::Error>> {
    let config = build_config(options)?;
    let mut scenario = Scenario::new(config)?;
    let pause = Duration::from_secs_f32(scenario.config().time_step);

    while !scenario.is_finished() {
        let frame = scenario.step()?;
        if options.json {
            println!("{}", serde_json::to_string(&frame)?);
        } else {
            println!("{frame}");
        }
        if options.realtime {
            std::thread::sleep(pause);
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let options = match parse_args(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::from(2);
        }
    };

    match run(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("rolling-ball: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn test_parse_defaults() {
        let options = parse_args(args(&[])).unwrap();
        assert!(options.config.is_none());
        assert!(!options.json);
        assert!(!options.realtime);
    }

    #[test]
    fn test_parse_overrides() {
        let options =
            parse_args(args(&["--duration", "2.5", "--time-step", "0.05", "--json"])).unwrap();
        assert_eq!(options.duration, Some(2.5));
        assert_eq!(options.time_step, Some(0.05));
        assert!(options.json);

        let config = build_config(&options).unwrap();
        assert_eq!(config.duration, 2.5);
        assert_eq!(config.total_steps(), 50);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_args(args(&["--duration"])).is_err());
        assert!(parse_args(args(&["--time-step", "fast"])).is_err());
        assert!(parse_args(args(&["--bogus"])).is_err());
    }
}
