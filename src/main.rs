use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Parser;

use rusty_dips::data::filter::{crop, filtered_indices, MetadataFilter, WavelengthRange};
use rusty_dips::data::loader::load_file;
use rusty_dips::detect::{find_absorption_peaks, ConfigOverrides, DetectionConfig};
use rusty_dips::report::{render_text, SpectrumReport};

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

/// Find absorption dips in spectra.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Spectrum file (.txt two-column, .parquet, .json or .csv)
    input: PathBuf,

    /// JSON file with detection settings; flags below override it
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Moving-average window in samples (even values become odd)
    #[arg(long)]
    window_size: Option<i64>,

    /// Minimum drop below background, in percent
    #[arg(long)]
    min_drop_percent: Option<f64>,

    /// Minimum absolute drop below background
    #[arg(long)]
    min_abs_drop: Option<f64>,

    /// Peaks to report per spectrum; 0 or less reports none
    #[arg(long, allow_negative_numbers = true)]
    max_peaks: Option<i64>,

    /// Merge peaks closer than this many samples; 0 or less disables
    #[arg(long, allow_negative_numbers = true)]
    proximity: Option<i64>,

    /// Ignore samples below this wavelength
    #[arg(long)]
    wavelength_min: Option<f64>,

    /// Ignore samples above this wavelength
    #[arg(long)]
    wavelength_max: Option<f64>,

    /// Only analyse spectra whose metadata matches column=value (repeatable)
    #[arg(long = "where", value_name = "COLUMN=VALUE")]
    filters: Vec<MetadataFilter>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    /// Include the background sequence in JSON output
    #[arg(long, requires = "json")]
    background: bool,

    /// Log pipeline counts to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn detection_config(&self) -> Result<DetectionConfig> {
        let overrides = ConfigOverrides {
            window_size: self.window_size,
            min_drop_percent: self.min_drop_percent,
            min_abs_drop: self.min_abs_drop,
            max_peaks: self.max_peaks,
            proximity_threshold: self.proximity,
        };
        DetectionConfig::resolve(self.config.as_deref(), &overrides)
    }

    fn range(&self) -> WavelengthRange {
        WavelengthRange {
            min: self.wavelength_min,
            max: self.wavelength_max,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.detection_config()?;
    let range = cli.range();

    let dataset = load_file(&cli.input)
        .with_context(|| format!("loading {}", cli.input.display()))?;
    log::info!(
        "Loaded {} spectra with columns {:?}",
        dataset.len(),
        dataset.column_names
    );

    let selected = filtered_indices(&dataset, &cli.filters);
    if selected.is_empty() {
        bail!("no spectrum matches the given filters");
    }

    let mut analysed = Vec::with_capacity(selected.len());
    for idx in selected {
        let spectrum = crop(&dataset.spectra[idx], &range);
        let label = spectrum.label(idx);
        match find_absorption_peaks(&spectrum.x, &spectrum.y, &config) {
            Ok(detection) => analysed.push((label, spectrum, detection)),
            Err(e) => log::error!("{label}: {e}"),
        }
    }
    if analysed.is_empty() {
        bail!("no spectrum could be analysed");
    }

    if cli.json {
        let reports: Vec<SpectrumReport> = analysed
            .iter()
            .map(|(label, spectrum, detection)| {
                SpectrumReport::new(label.clone(), spectrum, detection, &config, cli.background)
            })
            .collect();
        let text = serde_json::to_string_pretty(&reports).context("serializing report")?;
        println!("{text}");
    } else {
        for (label, _, detection) in &analysed {
            print!("{}", render_text(label, detection, &config));
        }
    }
    Ok(())
}
