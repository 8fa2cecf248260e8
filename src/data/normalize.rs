use super::model::{RelativeSeries, Sample, UtcSample, UtcTimestamp};

// ---------------------------------------------------------------------------
// Time-axis normalization
// ---------------------------------------------------------------------------

/// Rescale every timestamp from milliseconds to UTC seconds.
///
/// Order and length are preserved; an empty input yields an empty series.
pub fn to_utc_seconds(samples: &[Sample]) -> Vec<UtcSample> {
    samples
        .iter()
        .map(|s| UtcSample {
            time: UtcTimestamp::from_millis(s.time),
            value: s.value,
        })
        .collect()
}

/// Shift the time axis so the first sample sits at zero.
///
/// Returns `None` when there is no first sample to use as the origin.
pub fn to_relative(samples: &[Sample]) -> Option<RelativeSeries> {
    let origin = samples.first()?.time;

    let (times, values) = samples
        .iter()
        .map(|s| (s.time - origin, s.value))
        .unzip();

    Some(RelativeSeries { times, values })
}
