//! Writes a small demo model and sample input files into the working
//! directory:
//!
//! * `random_forest_model.json` – a hand-seeded forest over the 31 features
//! * `sample_transactions.csv`  – 50 records with a header row
//! * `sample_single.csv`        – one record, no header

use std::fs::File;
use std::io::BufWriter;

use anyhow::{Context, Result};
use serde_json::{json, Value};

const N_TREES: usize = 15;
const N_RECORDS: usize = 50;

/// Feature index of `Amount_log` in the classifier input.
const AMOUNT_LOG_IDX: usize = 30;

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

    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn feature_names() -> Vec<String> {
    let mut names = vec!["Hour".to_string()];
    names.extend((1..=28).map(|i| format!("V{i}")));
    names.push("Amount".to_string());
    names.push("Amount_log".to_string());
    names
}

fn leaf(value: f64) -> Value {
    json!({ "value": value })
}

fn split(feature_idx: usize, threshold: f64, left: Value, right: Value) -> Value {
    json!({
        "feature_idx": feature_idx,
        "threshold": threshold,
        "left": left,
        "right": right,
    })
}

/// Depth-two tree: a low value of an anonymized feature combined with a
/// large amount votes fraud.
fn random_tree(rng: &mut SimpleRng) -> Value {
    let feature = 1 + rng.below(28) as usize;
    let feature_cut = rng.gauss(-1.5, 0.5);
    let amount_cut = rng.gauss(5.0, 0.8);
    let root = split(
        feature,
        feature_cut,
        split(AMOUNT_LOG_IDX, amount_cut, leaf(0.0), leaf(1.0)),
        split(AMOUNT_LOG_IDX, amount_cut + 2.0, leaf(0.0), leaf(1.0)),
    );
    json!({ "root": root })
}

fn random_record(rng: &mut SimpleRng) -> Vec<String> {
    let mut row = vec![rng.below(24).to_string()];
    for _ in 0..28 {
        row.push(format!("{:.6}", rng.gauss(0.0, 1.5)));
    }
    let amount = (rng.gauss(3.5, 1.8)).exp().min(25_000.0);
    row.push(format!("{amount:.2}"));
    row
}

fn write_csv(path: &str, header: Option<&[String]>, rows: &[Vec<String>]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    if let Some(header) = header {
        writer.write_record(header)?;
    }
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let trees: Vec<Value> = (0..N_TREES).map(|_| random_tree(&mut rng)).collect();
    let model = json!({
        "name": "demo_random_forest",
        "feature_names": feature_names(),
        "trees": trees,
    });
    let model_path = "random_forest_model.json";
    let file = File::create(model_path).with_context(|| format!("creating {model_path}"))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &model).context("writing model")?;

    let records: Vec<Vec<String>> = (0..N_RECORDS).map(|_| random_record(&mut rng)).collect();
    let mut header = vec!["Time".to_string()];
    header.extend(feature_names().into_iter().skip(1).take(29));
    write_csv("sample_transactions.csv", Some(&header), &records)?;

    let single = vec![random_record(&mut rng)];
    write_csv("sample_single.csv", None, &single)?;

    println!(
        "Wrote {model_path} ({N_TREES} trees), sample_transactions.csv ({N_RECORDS} records) \
         and sample_single.csv"
    );
    Ok(())
}
