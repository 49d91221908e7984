//! Display-string rendering for normalized parameter values.
//!
//! The real extension reports both the normalized value and REAPER's human
//! readable rendering; the mock derives the latter from the parameter's
//! unit and format hint.

use crate::model::{FormatHint, Parameter};

/// Decibel display spans -12..+12 dB across the normalized range.
const DB_SPAN: f64 = 24.0;
/// Frequency display is exponential across 20 Hz .. 20 kHz.
const FREQ_MIN_HZ: f64 = 20.0;
const FREQ_MAX_HZ: f64 = 20_000.0;

/// Render a normalized value. The hint wins over the unit except for
/// percentages, which trigger on the unit itself.
pub fn display_value(value: f64, unit: &str, format_hint: FormatHint) -> String {
    match format_hint {
        FormatHint::Decibel => format!("{:+.1} dB", value * DB_SPAN - DB_SPAN / 2.0),
        FormatHint::Frequency => {
            let hz = FREQ_MIN_HZ * (FREQ_MAX_HZ / FREQ_MIN_HZ).powf(value);
            format!("{:.0} Hz", hz)
        }
        _ if unit == "%" => format!("{:.0}%", value * 100.0),
        _ => format!("{:.3}", value),
    }
}

impl Parameter {
    /// Human readable rendering of the current value.
    pub fn display(&self) -> String {
        display_value(self.value, &self.unit, self.format_hint)
    }
}
