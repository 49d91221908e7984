//! Shared mock state behind a single lock.
//!
//! One `SessionState` tree, one mutex. Every externally visible operation
//! is a method that holds the lock for its entire read-modify-write
//! sequence, so a concurrent reset appears atomic to each request and a
//! failed lookup can never leave the store locked (guard drop releases it
//! on every exit path).

use std::sync::Mutex;

use crate::archetypes::build_plugin;
use crate::errors::MockError;
use crate::model::{Plugin, SessionState};
use crate::scenarios::build_session;

/// ReaDelay refuses delay times above 0.9 normalized; writes are silently
/// capped before the general range clamp.
const READELAY_TIME_CAP: f64 = 0.9;

pub struct MockState {
    session: Mutex<SessionState>,
}

impl MockState {
    pub fn new(scenario: &str) -> Self {
        Self {
            session: Mutex::new(build_session(scenario)),
        }
    }

    /// Swap in a freshly built scenario tree.
    pub fn reset(&self, scenario: &str) {
        let mut session = self.session.lock().unwrap();
        *session = build_session(scenario);
    }

    /// Clone the whole tree for read-only handlers. Cloning under the lock
    /// means a reader always observes one consistent tree, never a mix of
    /// pre- and post-reset state.
    pub fn snapshot(&self) -> SessionState {
        self.session.lock().unwrap().clone()
    }

    pub fn set_fx_enabled(&self, track: i64, fx: i64, enabled: bool) -> Result<(), MockError> {
        let mut session = self.session.lock().unwrap();
        session.plugin_mut(track, fx)?.enabled = enabled;
        Ok(())
    }

    /// Append a plugin built from the archetype catalog; returns its chain
    /// index. Existing indices never shift.
    pub fn add_fx(&self, track: i64, plugin_name: &str) -> Result<usize, MockError> {
        let mut session = self.session.lock().unwrap();
        let chain = &mut session.track_mut(track)?.fx;
        chain.push(build_plugin(plugin_name));
        Ok(chain.len() - 1)
    }

    /// Write a parameter by index. Returns the parameter name and the value
    /// actually stored after constraint simulation and range clamping.
    pub fn write_param(
        &self,
        track: i64,
        fx: i64,
        param_index: i64,
        value: f64,
    ) -> Result<(String, f64), MockError> {
        let mut session = self.session.lock().unwrap();
        let plugin = session.plugin_mut(track, fx)?;
        let index = usize::try_from(param_index)
            .ok()
            .filter(|idx| *idx < plugin.params.len())
            .ok_or(MockError::ParamIndexNotFound { fx, param_index })?;
        let stored = store_value(plugin, index, value);
        Ok((plugin.params[index].name.clone(), stored))
    }

    /// Resolve a parameter by (normalized) name and return its index and
    /// current value.
    pub fn resolve_param(
        &self,
        track: i64,
        fx: i64,
        query: &str,
    ) -> Result<(usize, f64), MockError> {
        let session = self.session.lock().unwrap();
        let plugin = session.plugin(track, fx)?;
        let index = find_param_index(plugin, query).ok_or_else(|| MockError::ParamNotFound {
            fx,
            param: query.to_string(),
        })?;
        Ok((index, plugin.params[index].value))
    }

    /// Write a parameter by (normalized) name through the same constraint
    /// and clamp path as index writes.
    pub fn write_param_by_name(
        &self,
        track: i64,
        fx: i64,
        query: &str,
        value: f64,
    ) -> Result<(usize, f64), MockError> {
        let mut session = self.session.lock().unwrap();
        let plugin = session.plugin_mut(track, fx)?;
        let index = find_param_index(plugin, query).ok_or_else(|| MockError::ParamNotFound {
            fx,
            param: query.to_string(),
        })?;
        let stored = store_value(plugin, index, value);
        Ok((index, stored))
    }
}

/// Apply the plugin-specific write constraint, then the general range
/// clamp, and store the result. `index` must already be validated.
fn store_value(plugin: &mut Plugin, index: usize, value: f64) -> f64 {
    let constrained = constrain_value(&plugin.name, &plugin.params[index].name, value);
    let stored = constrained.clamp(0.0, 1.0);
    plugin.params[index].value = stored;
    stored
}

/// Simulated plugin constraint: only ReaDelay's "Delay Time" is capped;
/// every other plugin/parameter pair passes through untouched.
fn constrain_value(plugin_name: &str, param_name: &str, value: f64) -> f64 {
    if plugin_name.to_lowercase().contains("readelay")
        && param_name.eq_ignore_ascii_case("Delay Time")
        && value > READELAY_TIME_CAP
    {
        return READELAY_TIME_CAP;
    }
    value
}

/// Case- and punctuation-insensitive parameter lookup, the same resolution
/// the extension applies to `param` queries.
fn find_param_index(plugin: &Plugin, query: &str) -> Option<usize> {
    let normalized_query = normalize_param_token(query);
    if normalized_query.is_empty() {
        return None;
    }
    plugin
        .params
        .iter()
        .position(|param| normalize_param_token(&param.name).contains(&normalized_query))
}

fn normalize_param_token(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect()
}
