/// Data layer: recording types, loading, and time-axis normalization.
///
/// Architecture:
/// ```text
///  name / URL / path
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  resolve → fetch or read → Vec<Sample>
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ normalize  │  ms → UTC seconds, or shift to first sample
///   └───────────┘
///        │
///        ▼
///   Vec<UtcSample> / RelativeSeries  → chart
/// ```

pub mod loader;
pub mod model;
pub mod normalize;
