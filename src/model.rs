//! The track / FX / parameter tree the mock serves.

use serde::{Deserialize, Serialize};

use crate::errors::MockError;

/// How a normalized parameter value is rendered as display text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatHint {
    Raw,
    Decibel,
    Frequency,
    Percentage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    /// Normalized position in [0, 1]. Display conversion happens on read;
    /// the stored value is never altered by formatting.
    pub value: f64,
    pub unit: String,
    pub format_hint: FormatHint,
}

impl Parameter {
    /// A unitless parameter with raw display formatting.
    pub fn raw(name: &str, value: f64) -> Self {
        Self {
            name: name.to_string(),
            value,
            unit: String::new(),
            format_hint: FormatHint::Raw,
        }
    }

    pub fn with_unit(name: &str, value: f64, unit: &str, format_hint: FormatHint) -> Self {
        Self {
            name: name.to_string(),
            value,
            unit: unit.to_string(),
            format_hint,
        }
    }
}

/// One FX instance in a track's chain.
///
/// `enabled` is the chain-level toggle REAPER shows next to the plugin.
/// Several archetypes additionally expose their own bypass parameter; the
/// two are independent and never synchronized, which some fixtures exploit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plugin {
    pub name: String,
    pub enabled: bool,
    pub params: Vec<Parameter>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub name: String,
    /// Order is index-addressed by clients and only ever grows.
    pub fx: Vec<Plugin>,
}

/// The whole tree a scenario builds and the endpoints operate on.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SessionState {
    pub tracks: Vec<Track>,
}

impl SessionState {
    pub fn track(&self, track: i64) -> Result<&Track, MockError> {
        usize::try_from(track)
            .ok()
            .and_then(|idx| self.tracks.get(idx))
            .ok_or(MockError::TrackNotFound { track })
    }

    pub fn track_mut(&mut self, track: i64) -> Result<&mut Track, MockError> {
        usize::try_from(track)
            .ok()
            .and_then(|idx| self.tracks.get_mut(idx))
            .ok_or(MockError::TrackNotFound { track })
    }

    pub fn plugin(&self, track: i64, fx: i64) -> Result<&Plugin, MockError> {
        let chain = &self.track(track)?.fx;
        usize::try_from(fx)
            .ok()
            .and_then(|idx| chain.get(idx))
            .ok_or(MockError::FxNotFound { track, fx })
    }

    pub fn plugin_mut(&mut self, track: i64, fx: i64) -> Result<&mut Plugin, MockError> {
        let chain = &mut self.track_mut(track)?.fx;
        usize::try_from(fx)
            .ok()
            .and_then(|idx| chain.get_mut(idx))
            .ok_or(MockError::FxNotFound { track, fx })
    }

    pub fn param(&self, track: i64, fx: i64, param_index: i64) -> Result<&Parameter, MockError> {
        let plugin = self.plugin(track, fx)?;
        usize::try_from(param_index)
            .ok()
            .and_then(|idx| plugin.params.get(idx))
            .ok_or(MockError::ParamIndexNotFound { fx, param_index })
    }
}
