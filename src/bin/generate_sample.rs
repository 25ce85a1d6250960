use std::fmt::Write as _;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Float64Builder, Int64Array, ListBuilder, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Solar-like absorption lines: (centre nm, sigma nm, fractional depth).
const LINES: [(f64, f64, f64); 10] = [
    (393.4, 0.8, 0.45), // Ca K
    (396.8, 0.8, 0.40), // Ca H
    (430.8, 0.6, 0.20),
    (486.1, 0.7, 0.25), // H-beta
    (517.0, 0.5, 0.15), // Mg b
    (527.0, 0.4, 0.10),
    (589.3, 0.5, 0.20), // Na D
    (656.3, 0.8, 0.30), // H-alpha
    (686.7, 1.2, 0.18), // O2 B
    (759.4, 1.5, 0.35), // O2 A
];

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

/// Planck curve in arbitrary units, peak normalised to 1.
fn continuum(wavelength_nm: f64, temperature_k: f64) -> f64 {
    const C2: f64 = 1.438_777e7; // hc/k in nm·K
    let peak = 2.897_771_955e6 / temperature_k;
    let planck = |l: f64| 1.0 / (l.powi(5) * ((C2 / (l * temperature_k)).exp() - 1.0));
    planck(wavelength_nm) / planck(peak)
}

fn generate_spectrum(
    wavelengths: &[f64],
    temperature_k: f64,
    depth_scale: f64,
    noise_level: f64,
    rng: &mut SimpleRng,
) -> Vec<f64> {
    wavelengths
        .iter()
        .map(|&wl| {
            let absorbed: f64 = LINES
                .iter()
                .map(|&(mu, sigma, depth)| gaussian(wl, mu, sigma, depth * depth_scale))
                .sum();
            continuum(wl, temperature_k) * (1.0 - absorbed).max(0.0) + rng.gauss(0.0, noise_level)
        })
        .collect()
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn write_two_column(path: &str, wavelengths: &[f64], intensities: &[f64]) -> Result<()> {
    let mut text = String::from("# Synthetic solar spectrum\n# Wavelength(nm) Intensity\n");
    for (wl, y) in wavelengths.iter().zip(intensities) {
        let _ = writeln!(text, "{wl:.2}\t{y:.6}");
    }
    std::fs::write(path, text).with_context(|| format!("writing {path}"))
}

fn list_array(rows: &[Vec<f64>]) -> arrow::array::ListArray {
    let mut builder = ListBuilder::new(Float64Builder::new());
    for row in rows {
        builder.values().append_slice(row);
        builder.append(true);
    }
    builder.finish()
}

fn main() -> Result<()> {
    env_logger::init();
    let mut rng = SimpleRng::new(42);

    // 350 → 900 nm, step 0.5
    let wavelengths: Vec<f64> = (0..1101).map(|i| 350.0 + i as f64 * 0.5).collect();

    let sources = [("sun", 5778.0, 1.0), ("sky", 6500.0, 0.7), ("lamp", 3200.0, 0.0)];
    let exposures = [50_i64, 100, 200];

    let mut all_y: Vec<Vec<f64>> = Vec::new();
    let mut all_sample: Vec<&str> = Vec::new();
    let mut all_temperature: Vec<f64> = Vec::new();
    let mut all_exposure: Vec<i64> = Vec::new();

    for &(sample, temperature, depth_scale) in &sources {
        for &exposure in &exposures {
            let noise = 0.02 / (exposure as f64 / 50.0).sqrt();
            all_y.push(generate_spectrum(
                &wavelengths,
                temperature,
                depth_scale,
                noise,
                &mut rng,
            ));
            all_sample.push(sample);
            all_temperature.push(temperature);
            all_exposure.push(exposure);
        }
    }

    write_two_column("sample_absorption.txt", &wavelengths, &all_y[1])?;

    let all_x = vec![wavelengths.clone(); all_y.len()];
    let item = Arc::new(Field::new("item", DataType::Float64, true));
    let schema = Arc::new(Schema::new(vec![
        Field::new("x", DataType::List(item.clone()), false),
        Field::new("y", DataType::List(item), false),
        Field::new("sample", DataType::Utf8, false),
        Field::new("temperature_k", DataType::Float64, false),
        Field::new("exposure_ms", DataType::Int64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(list_array(&all_x)),
            Arc::new(list_array(&all_y)),
            Arc::new(StringArray::from(all_sample)),
            Arc::new(Float64Array::from(all_temperature)),
            Arc::new(Int64Array::from(all_exposure)),
        ],
    )
    .context("building record batch")?;

    let output_path = "sample_absorption.parquet";
    let file = std::fs::File::create(output_path).context("creating output file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing writer")?;

    log::info!("wrote {} spectra to {output_path}", batch.num_rows());
    println!(
        "Wrote sample_absorption.txt and {} spectra ({} wavelengths each) to {output_path}",
        batch.num_rows(),
        wavelengths.len()
    );
    Ok(())
}
