//! Linksim - BPSK baseband link simulator
//!
//! Runs single simulations and BER sweeps from the command line

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

use linksim_channel::prelude::*;
use linksim_modem::prelude::*;
use linksim_tools::{
    save_config, sweep, write_report_json, write_wav, LinkSimulator, SimArgs, SimConfig,
};

/// Linksim BPSK link simulator
#[derive(Parser)]
#[command(name = "linksim")]
#[command(about = "BPSK link simulation with RRC pulse shaping and AWGN")]
#[command(version)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one simulation
    Run(RunArgs),
    /// Sweep BER over a range of SNR values
    Sweep(SweepArgs),
    /// Show defaults and supported line codes
    Info,
}

#[derive(Args, Clone)]
struct RunArgs {
    #[command(flatten)]
    sim: SimArgs,

    /// Write the full report as JSON
    #[arg(long, value_name = "JSON_PATH")]
    report: Option<PathBuf>,

    /// Write the transmitted waveform as 16-bit PCM
    #[arg(long, value_name = "WAV_PATH")]
    wav: Option<PathBuf>,

    /// FFT size for the transmit spectrum (power of two)
    #[arg(long)]
    spectrum_size: Option<usize>,

    /// Save the resolved configuration (TOML, or JSON for .json)
    #[arg(long, value_name = "CONFIG_PATH")]
    save_config: Option<PathBuf>,
}

#[derive(Args, Clone)]
struct SweepArgs {
    #[command(flatten)]
    sim: SimArgs,

    /// First SNR point in dB
    #[arg(long, allow_hyphen_values = true)]
    snr_start: Option<f64>,

    /// Last SNR point in dB
    #[arg(long, allow_hyphen_values = true)]
    snr_stop: Option<f64>,

    /// SNR step in dB
    #[arg(long)]
    snr_step: Option<f64>,

    /// Write the sweep points as JSON
    #[arg(short, long, value_name = "JSON_PATH")]
    output: Option<PathBuf>,
}

fn run(args: RunArgs) -> Result<()> {
    let mut config = args.sim.resolve()?;
    if args.spectrum_size.is_some() {
        config.request.spectrum_size = args.spectrum_size;
    }
    if let Some(path) = &args.save_config {
        save_config(&config, path)?;
        info!("Saved configuration to {:?}", path);
    }

    let simulator = LinkSimulator::new(config.link)?;
    let mut rng = seeded_rng(config.seed);

    let start = Instant::now();
    let report = simulator.run(&config.request, &mut rng)?;
    info!("Simulation took {:.2?}", start.elapsed());

    println!("=== Linksim Run ===");
    println!("Bits:           {}", report.original_bits.len());
    println!("Line code:      {}", report.request.line_code);
    println!("Channel:        {}", describe_channel(&report.request.channel));
    println!("Timing offset:  {} (phase {})", report.timing_offset, report.timing_phase);
    println!(
        "Bit errors:     {}/{}",
        report.stats.errors, report.stats.compared
    );
    if report.decision.has_erasures() {
        println!("Erasures:       {}", report.decision.erasures.len());
    }
    println!("BER:            {:.6}", report.ber());

    if let Some(path) = &args.report {
        write_report_json(&report, path)?;
        println!("✓ Report written to {:?}", path);
    }

    if let Some(path) = &args.wav {
        write_wav(report.modulated.samples(), path, config.sample_rate())?;
        println!("✓ Waveform written to {:?}", path);
    }

    Ok(())
}

fn run_sweep(args: SweepArgs) -> Result<()> {
    let mut config = args.sim.resolve()?;
    if let Some(start) = args.snr_start {
        config.sweep.start = start;
    }
    if let Some(stop) = args.snr_stop {
        config.sweep.stop = stop;
    }
    if let Some(step) = args.snr_step {
        config.sweep.step = step;
    }

    let snr_points = config.sweep.points()?;
    let simulator = LinkSimulator::new(config.link)?;
    info!(
        "Sweeping {} points, {} bits each, {} coding",
        snr_points.len(),
        config.request.n_bits,
        config.request.line_code
    );

    let points = sweep(&simulator, &config.request, &snr_points, config.seed)?;

    println!("{:>9}  {:>8}  {:>8}  {:>10}  {:>8}", "SNR (dB)", "errors", "bits", "BER", "erasures");
    for point in &points {
        println!(
            "{:>9.2}  {:>8}  {:>8}  {:>10.6}  {:>8}",
            point.snr_db, point.stats.errors, point.stats.compared, point.stats.ber, point.erasures
        );
    }

    if let Some(path) = &args.output {
        let json = serde_json::to_string_pretty(&points)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write sweep output: {:?}", path))?;
        println!("✓ Sweep written to {:?}", path);
    }

    Ok(())
}

fn describe_channel(model: &ChannelModel) -> String {
    match model {
        ChannelModel::Ideal => "ideal".to_string(),
        ChannelModel::Awgn { snr_db } => format!("AWGN at {} dB", snr_db),
    }
}

fn show_info() {
    let config = SimConfig::default();
    let link = &config.link;

    println!("=== Linksim ===");
    println!("Version: {}", env!("CARGO_PKG_VERSION"));

    println!("\n=== Line Codes ===");
    for code in LineCode::ALL {
        println!("  • {} ({} symbol(s) per bit)", code, code.symbols_per_bit());
    }

    println!("\n=== Defaults ===");
    println!("  Samples per symbol: {}", link.sps);
    println!("  RRC roll-off:       {}", link.beta);
    println!("  RRC span:           {} symbols", link.span);
    println!("  Carrier:            {} cycles/symbol", link.carrier_frequency);
    println!("  Carrier phase:      {} rad", link.carrier_phase);
    println!("  Bits per run:       {}", config.request.n_bits);
    println!("  Channel:            {}", describe_channel(&config.request.channel));
    println!(
        "  Sweep:              {} to {} dB, step {}",
        config.sweep.start, config.sweep.stop, config.sweep.step
    );

    println!("\n=== Example Usage ===");
    println!("  Run:    linksim run -n 1000 --code manchester --snr 6 --report out.json");
    println!("  Ideal:  linksim run --ideal --wav tx.wav");
    println!("  Sweep:  linksim sweep --snr-start -10 --snr-stop 12 --snr-step 2");
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug {
        tracing::Level::DEBUG
    } else if cli.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Run(args) => run(args),
        Commands::Sweep(args) => run_sweep(args),
        Commands::Info => {
            show_info();
            Ok(())
        }
    }
}
