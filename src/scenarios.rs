//! Named test fixtures.
//!
//! Each scenario assembles one "Guitar" track from archetype defaults and
//! then flips the specific switches the fixture is about: a disabled plugin
//! here, a bypass parameter there. The external suite resets to one of
//! these by name before each case and asserts on the exact composition, so
//! the tables below are fixed.

use crate::archetypes::build_plugin;
use crate::model::{Plugin, SessionState, Track};

pub const DEFAULT_SCENARIO: &str = "baseline";

const AMP: &str = "VST3: Neural DSP Archetype";
const AMP_GOJIRA: &str = "VST3: Neural DSP Archetype Gojira";
const GATE: &str = "ReaGate (Cockos)";
const DELAY: &str = "ReaDelay (Cockos)";
const REVERB: &str = "ReaVerbate (Cockos)";
const EQ: &str = "ReaEQ (Cockos)";

/// Build the session tree for a scenario name.
///
/// Matching is case-insensitive; unrecognized or empty names fall back to
/// the baseline rig.
pub fn build_session(scenario: &str) -> SessionState {
    match scenario.to_lowercase().as_str() {
        // A generically named delay whose own bypass is on.
        "confusing_delay_section" => guitar(vec![
            build_plugin(AMP_GOJIRA),
            bypassed(build_plugin("Delay FX")),
        ]),
        "disabled_gate" => guitar(vec![build_plugin(AMP), disabled(build_plugin(GATE))]),
        "missing_reverb" => guitar(vec![build_plugin(AMP), build_plugin(GATE)]),
        "bypassed_reverb" => guitar(vec![build_plugin(AMP), bypassed(build_plugin(REVERB))]),
        // Gates lead with "Gate Enable" rather than a bypass, so the
        // inactive fixture turns the first parameter *off*.
        "gate_enable_off" => guitar(vec![
            build_plugin(AMP),
            with_first_param(build_plugin(GATE), 0.0),
        ]),
        "bypassed_eq" => guitar(vec![build_plugin(AMP), bypassed(build_plugin(EQ))]),
        // Two delays; the ReaDelay is the bypassed one.
        "dual_delay_prefer_readelay" => guitar(vec![
            build_plugin(AMP),
            build_plugin("Delay FX"),
            bypassed(build_plugin(DELAY)),
        ]),
        "shoegaze_wall" => guitar(vec![
            build_plugin(AMP),
            bypassed(build_plugin("Chorus Mod")),
            bypassed(build_plugin(DELAY)),
            bypassed(build_plugin(REVERB)),
        ]),
        "chainsaw_distortion_bypassed" => guitar(vec![
            build_plugin(AMP),
            bypassed(build_plugin("HM-2 Distortion")),
            build_plugin(EQ),
        ]),
        // Disabled at the chain level AND bypassed internally.
        "funk_compressor_disabled" => guitar(vec![
            build_plugin(AMP),
            disabled(bypassed(build_plugin("Compressor"))),
        ]),
        "overdrive_bypassed" => guitar(vec![
            build_plugin(AMP),
            bypassed(build_plugin("TubeScreamer Overdrive")),
        ]),
        "kitchen_sink" => guitar(vec![
            disabled(build_plugin(AMP)),
            bypassed(build_plugin(DELAY)),
        ]),
        _ => guitar(vec![
            build_plugin(AMP),
            build_plugin(GATE),
            build_plugin(DELAY),
        ]),
    }
}

fn guitar(fx: Vec<Plugin>) -> SessionState {
    SessionState {
        tracks: vec![Track {
            name: "Guitar".to_string(),
            fx,
        }],
    }
}

/// Flip the plugin's own bypass parameter on (archetypes put it first).
fn bypassed(plugin: Plugin) -> Plugin {
    with_first_param(plugin, 1.0)
}

fn with_first_param(mut plugin: Plugin, value: f64) -> Plugin {
    if let Some(param) = plugin.params.first_mut() {
        param.value = value;
    }
    plugin
}

fn disabled(mut plugin: Plugin) -> Plugin {
    plugin.enabled = false;
    plugin
}
