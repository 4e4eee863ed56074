mod sample;

pub use sample::{SampleCurve, SampleParams, MAX_SAMPLES};
