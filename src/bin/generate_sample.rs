//! Writes synthetic `[{time, value}]` recordings, one per catalog entry, so
//! the viewer can be used without the mission data set.
//!
//! Usage: `generate_sample [OUTPUT_DIR]` (defaults to `data`).

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use quiver::{Planet, RecordingId, Sample};

/// Length of each synthetic trace.
const TRACE_SECONDS: f64 = 1800.0;

fn sampling_rate(planet: Planet) -> f64 {
    match planet {
        Planet::Mars => 20.0,
        Planet::Moon => 6.625,
    }
}

/// Background noise plus one exponentially decaying burst starting at
/// `onset_s`.
fn generate_trace(start_ms: f64, rate_hz: f64, onset_s: f64, rng: &mut impl Rng) -> Vec<Sample> {
    let n = (TRACE_SECONDS * rate_hz) as usize;
    let freq_hz = 1.0 + rng.gen::<f64>();
    let amplitude = 4.0 + 6.0 * rng.gen::<f64>();

    (0..n)
        .map(|i| {
            let t = i as f64 / rate_hz;
            let mut value = gauss(rng, 0.0, 0.3);
            if t >= onset_s {
                let dt = t - onset_s;
                value += amplitude
                    * (-dt / 120.0).exp()
                    * (2.0 * std::f64::consts::PI * freq_hz * dt).sin();
            }
            Sample::new(start_ms + t * 1000.0, value)
        })
        .collect()
}

/// Normal deviate via Box-Muller.
fn gauss(rng: &mut impl Rng, mean: f64, std_dev: f64) -> f64 {
    let u1: f64 = rng.gen::<f64>().max(f64::MIN_POSITIVE);
    let u2: f64 = rng.gen();
    mean + std_dev * (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
}

/// Milliseconds since the Unix epoch for `YYYY-MM-DD` at `hour`:00 UTC.
/// `None` for dates that do not exist or hours past 23.
fn epoch_millis(date: &str, hour: u8) -> Option<f64> {
    let start = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()?
        .and_hms_opt(u32::from(hour), 0, 0)?;
    Some(start.and_utc().timestamp_millis() as f64)
}

fn main() -> Result<()> {
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let mut rng = StdRng::seed_from_u64(42);
    let mut written = 0usize;

    for planet in Planet::ALL {
        for &name in planet.filenames() {
            let id = RecordingId::parse(name)
                .with_context(|| format!("catalog entry {name} does not parse"))?;
            let start_ms = epoch_millis(&id.date, id.hour)
                .with_context(|| format!("bad date in {name}"))?;

            let onset_s = 300.0 + rng.gen::<f64>() * (TRACE_SECONDS - 600.0);
            let trace = generate_trace(start_ms, sampling_rate(planet), onset_s, &mut rng);

            let path = out_dir.join(name);
            let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
            serde_json::to_writer(BufWriter::new(file), &trace)
                .with_context(|| format!("writing {}", path.display()))?;

            println!(
                "{planet}: {name}  {} samples, event at {onset_s:.0} s",
                trace.len()
            );
            written += 1;
        }
    }

    println!("Wrote {written} recordings to {}", out_dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_of_known_dates() {
        assert_eq!(epoch_millis("1970-01-01", 0), Some(0.0));
        assert_eq!(epoch_millis("1970-01-19", 0), Some(18.0 * 86_400_000.0));
        // 2022-01-02T04:00:00Z
        assert_eq!(epoch_millis("2022-01-02", 4), Some(1_641_096_000_000.0));
        assert_eq!(epoch_millis("not-a-date", 0), None);
    }

    #[test]
    fn epoch_rejects_impossible_dates() {
        assert_eq!(epoch_millis("2022-13-01", 0), None);
        assert_eq!(epoch_millis("2022-02-30", 0), None);
        assert_eq!(epoch_millis("2022-13-40", 0), None);
        assert_eq!(epoch_millis("2022-01-02", 24), None);
    }

    #[test]
    fn trace_covers_the_window() {
        let mut rng = StdRng::seed_from_u64(7);
        let trace = generate_trace(1000.0, 2.0, 100.0, &mut rng);
        assert_eq!(trace.len(), (TRACE_SECONDS * 2.0) as usize);
        assert_eq!(trace[0].time, 1000.0);
        assert_eq!(trace[1].time, 1500.0);
        assert!(trace.iter().all(|s| s.value.is_finite()));
    }

    #[test]
    fn same_seed_same_trace() {
        let a = generate_trace(0.0, 1.0, 500.0, &mut StdRng::seed_from_u64(3));
        let b = generate_trace(0.0, 1.0, 500.0, &mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
    }
}
