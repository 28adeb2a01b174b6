use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args as ClapArgs, Parser, Subcommand};

use sonarlab::config::{
    ActiveSpaceInput, ActiveSpaceParams, AttenuationInput, AttenuationParams, Demo, Scenario,
    SourceLevelInput, SourceLevelParams,
};
use sonarlab::output::{Formatter, OutputFormat, RecordKind, create_formatter, write_samples_csv};
use sonarlab::session::evaluate;
use sonarlab::signal::AttenuationTrace;
use sonarlab::sweep::noise_sweep;

#[derive(Parser, Debug)]
#[command(name = "sonarlab")]
#[command(
    about = "Underwater acoustics demos: sonar equation, active space, attenuation",
    long_about = None
)]
struct Args {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "text", global = true)]
    format: OutputFormat,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// TOML scenario file overriding the slider defaults
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Propagation loss, maximum detection range and active space
    ActiveSpace(ActiveSpaceArgs),
    /// Source level from a measurement setup
    SourceLevel(SourceLevelArgs),
    /// Source and received waveforms at a distance
    Attenuation(AttenuationArgs),
    /// Active space for every ambient noise level
    NoiseSweep(NoiseSweepArgs),
    /// List every input control with its range, step and default
    Controls,
}

#[derive(ClapArgs, Debug)]
struct ActiveSpaceArgs {
    /// Source level in dB re 1 µPa @ 1 m
    #[arg(long)]
    sl: Option<f64>,
    /// Detection threshold in dB
    #[arg(long)]
    dt: Option<f64>,
    /// Ambient noise level in dB
    #[arg(long)]
    nl: Option<f64>,
    /// Processing gain in dB
    #[arg(long)]
    pg: Option<f64>,
    /// Geometric spreading coefficient (10 cylindrical, 20 spherical)
    #[arg(long)]
    spreading: Option<f64>,
}

impl ActiveSpaceArgs {
    fn apply(&self, params: &mut ActiveSpaceParams) {
        let overrides = [
            (ActiveSpaceInput::SourceLevel, self.sl),
            (ActiveSpaceInput::DetectionThreshold, self.dt),
            (ActiveSpaceInput::NoiseLevel, self.nl),
            (ActiveSpaceInput::ProcessingGain, self.pg),
            (ActiveSpaceInput::GeometricSpreading, self.spreading),
        ];
        for (input, value) in overrides {
            if let Some(v) = value {
                params.set(input, v);
            }
        }
    }
}

#[derive(ClapArgs, Debug)]
struct SourceLevelArgs {
    /// Detection threshold in dB
    #[arg(long)]
    dt: Option<f64>,
    /// Transmission (propagation) loss in dB
    #[arg(long)]
    tl: Option<f64>,
    /// Noise level in dB
    #[arg(long)]
    nl: Option<f64>,
    /// Processing gain in dB
    #[arg(long)]
    pg: Option<f64>,
}

impl SourceLevelArgs {
    fn apply(&self, params: &mut SourceLevelParams) {
        let overrides = [
            (SourceLevelInput::DetectionThreshold, self.dt),
            (SourceLevelInput::TransmissionLoss, self.tl),
            (SourceLevelInput::NoiseLevel, self.nl),
            (SourceLevelInput::ProcessingGain, self.pg),
        ];
        for (input, value) in overrides {
            if let Some(v) = value {
                params.set(input, v);
            }
        }
    }
}

#[derive(ClapArgs, Debug)]
struct AttenuationArgs {
    /// Source signal frequency in Hz
    #[arg(long)]
    frequency: Option<f64>,
    /// Receiver distance in metres
    #[arg(long)]
    distance: Option<f64>,
    /// Write every sample to a CSV file
    #[arg(long)]
    samples: Option<PathBuf>,
    /// Write source/received waveforms to a stereo WAV file
    #[arg(long)]
    wav: Option<PathBuf>,
}

impl AttenuationArgs {
    fn apply(&self, params: &mut AttenuationParams) {
        let overrides = [
            (AttenuationInput::Frequency, self.frequency),
            (AttenuationInput::Distance, self.distance),
        ];
        for (input, value) in overrides {
            if let Some(v) = value {
                params.set(input, v);
            }
        }
    }
}

#[derive(ClapArgs, Debug)]
struct NoiseSweepArgs {
    /// Source level in dB re 1 µPa @ 1 m
    #[arg(long)]
    sl: Option<f64>,
    /// Detection threshold in dB
    #[arg(long)]
    dt: Option<f64>,
    /// Processing gain in dB
    #[arg(long)]
    pg: Option<f64>,
    /// Geometric spreading coefficient (10 cylindrical, 20 spherical)
    #[arg(long)]
    spreading: Option<f64>,
}

impl NoiseSweepArgs {
    fn apply(&self, params: &mut ActiveSpaceParams) {
        ActiveSpaceArgs {
            sl: self.sl,
            dt: self.dt,
            nl: None,
            pg: self.pg,
            spreading: self.spreading,
        }
        .apply(params);
    }
}

/// Merge command-line overrides into the scenario and check the inputs of
/// the demo the command runs.
///
/// Flags win over the scenario, which already holds the slider defaults for
/// anything it does not set.
fn resolve(mut scenario: Scenario, command: &Command) -> sonarlab::Result<Scenario> {
    match command {
        Command::ActiveSpace(cmd) => {
            cmd.apply(&mut scenario.active_space);
            scenario.active_space.validate()?;
        }
        Command::SourceLevel(cmd) => {
            cmd.apply(&mut scenario.source_level);
            scenario.source_level.validate()?;
        }
        Command::Attenuation(cmd) => {
            cmd.apply(&mut scenario.attenuation);
            scenario.attenuation.validate()?;
        }
        Command::NoiseSweep(cmd) => {
            cmd.apply(&mut scenario.active_space);
            scenario.active_space.validate()?;
        }
        Command::Controls => {}
    }
    Ok(scenario)
}

fn print_record(formatter: &dyn Formatter, kind: RecordKind, line: String) {
    if let Some(header) = formatter.header(kind) {
        println!("{}", header);
    }
    println!("{}", line);
}

fn write_attenuation_files(args: &AttenuationArgs, trace: &AttenuationTrace) -> anyhow::Result<()> {
    if let Some(path) = &args.samples {
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        write_samples_csv(trace, BufWriter::new(file))
            .with_context(|| format!("Failed to write samples to {}", path.display()))?;
        log::info!("Wrote {} samples to {}", trace.len(), path.display());
    }
    if let Some(path) = &args.wav {
        sonarlab::save_trace_wav(path, trace)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let scenario = match &args.config {
        Some(path) => Scenario::load(path)
            .with_context(|| format!("Failed to load scenario {}", path.display()))?,
        None => Scenario::default(),
    };
    let scenario = resolve(scenario, &args.command)?;

    let formatter = create_formatter(args.format, args.verbose > 0);

    match &args.command {
        Command::ActiveSpace(_) => {
            let evaluation = evaluate(&scenario, Demo::ActiveSpace);
            print_record(
                formatter.as_ref(),
                RecordKind::ActiveSpace,
                formatter.format(&evaluation),
            );
        }
        Command::SourceLevel(_) => {
            let evaluation = evaluate(&scenario, Demo::SourceLevel);
            print_record(
                formatter.as_ref(),
                RecordKind::SourceLevel,
                formatter.format(&evaluation),
            );
        }
        Command::Attenuation(cmd) => {
            let trace = AttenuationTrace::simulate(&scenario.attenuation);
            print_record(
                formatter.as_ref(),
                RecordKind::Attenuation,
                formatter.attenuation(&trace),
            );
            write_attenuation_files(cmd, &trace)?;
        }
        Command::NoiseSweep(_) => {
            if let Some(header) = formatter.header(RecordKind::Sweep) {
                println!("{}", header);
            }
            for point in noise_sweep(&scenario.active_space) {
                println!(
                    "{}",
                    formatter.sweep_point(ActiveSpaceInput::NoiseLevel, &point)
                );
            }
        }
        Command::Controls => {
            for demo in Demo::ALL {
                println!("{}", demo.title());
                for control in demo.controls() {
                    println!("  {}", control.slider());
                }
            }
        }
    }

    Ok(())
}
