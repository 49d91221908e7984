//! Plugin archetype catalog.
//!
//! Maps a plugin display name to the canonical parameter list the real
//! extension would report for that effect family. Matching is by substring
//! against the lowercased name, in fixed priority order; the first family
//! with a hit wins, so a name like "Gate Comp" resolves as a gate.

use crate::model::{FormatHint, Parameter, Plugin};

struct Family {
    keywords: &'static [&'static str],
    params: fn() -> Vec<Parameter>,
}

/// Ordered dispatch table. Order is load-bearing: several keywords are
/// substrings of common plugin names ("comp", "mod", "eq", "amp").
const FAMILIES: &[Family] = &[
    Family {
        keywords: &["reagate", "gate"],
        params: gate_params,
    },
    Family {
        keywords: &["compressor", "comp"],
        params: compressor_params,
    },
    Family {
        keywords: &["overdrive", "tubescreamer", "screamer"],
        params: overdrive_params,
    },
    Family {
        keywords: &["distortion", "fuzz", "hm-2"],
        params: distortion_params,
    },
    Family {
        keywords: &["chorus", "mod"],
        params: chorus_params,
    },
    Family {
        keywords: &["readelay", "delay"],
        params: delay_params,
    },
    Family {
        keywords: &["reaverbate", "reverbate", "reverb"],
        params: reverb_params,
    },
    Family {
        keywords: &["reaeq", "eq"],
        params: eq_params,
    },
    Family {
        keywords: &["neural", "archetype", "amp"],
        params: amp_params,
    },
];

/// Instantiate a plugin from its display name.
///
/// Total: names with no family match get an empty parameter list rather
/// than an error. The name is kept verbatim; detection happens only here,
/// at creation time.
pub fn build_plugin(name: &str) -> Plugin {
    let lowered = name.to_lowercase();
    let params = FAMILIES
        .iter()
        .find(|family| family.keywords.iter().any(|kw| lowered.contains(kw)))
        .map(|family| (family.params)())
        .unwrap_or_default();

    Plugin {
        name: name.to_string(),
        enabled: true,
        params,
    }
}

fn gate_params() -> Vec<Parameter> {
    vec![
        Parameter::raw("Gate Enable", 1.0),
        Parameter::raw("Threshold", 0.5),
        Parameter::raw("Attack", 0.2),
        Parameter::raw("Release", 0.4),
    ]
}

fn compressor_params() -> Vec<Parameter> {
    vec![
        Parameter::raw("Compressor Bypass", 0.0),
        Parameter::raw("Threshold", 0.5),
        Parameter::raw("Ratio", 0.25),
        Parameter::raw("Attack", 0.2),
        Parameter::raw("Release", 0.5),
        Parameter::raw("Makeup", 0.5),
        Parameter::raw("Mix", 1.0),
    ]
}

fn overdrive_params() -> Vec<Parameter> {
    vec![
        Parameter::raw("Overdrive Bypass", 0.0),
        Parameter::raw("Drive", 0.3),
        Parameter::raw("Tone", 0.55),
        Parameter::raw("Level", 0.6),
    ]
}

fn distortion_params() -> Vec<Parameter> {
    vec![
        Parameter::raw("Distortion Bypass", 0.0),
        Parameter::raw("Drive", 0.6),
        Parameter::raw("Tone", 0.5),
        Parameter::raw("Level", 0.6),
        Parameter::raw("Low", 0.5),
        Parameter::raw("High", 0.5),
    ]
}

fn chorus_params() -> Vec<Parameter> {
    vec![
        Parameter::raw("Chorus Bypass", 0.0),
        Parameter::raw("Rate", 0.3),
        Parameter::raw("Depth", 0.4),
        Parameter::raw("Mix", 0.25),
    ]
}

fn delay_params() -> Vec<Parameter> {
    vec![
        Parameter::raw("Delay Bypass", 0.0),
        Parameter::raw("Delay Time", 0.3),
        Parameter::raw("Delay Feedback", 0.2),
        Parameter::raw("Delay Mix", 0.1),
    ]
}

fn reverb_params() -> Vec<Parameter> {
    vec![
        Parameter::raw("Reverb Bypass", 0.0),
        Parameter::raw("Pre-delay", 0.15),
        Parameter::raw("Decay", 0.35),
        Parameter::raw("High Cut", 0.8),
        Parameter::raw("Low Cut", 0.1),
        Parameter::raw("Room Size", 0.25),
        Parameter::raw("Mix", 0.1),
    ]
}

fn eq_params() -> Vec<Parameter> {
    let band_freqs = [0.4, 0.55, 0.65, 0.75];
    let mut params = vec![Parameter::raw("EQ Bypass", 0.0)];
    for (i, freq) in band_freqs.iter().enumerate() {
        let band = i + 1;
        params.push(Parameter::with_unit(
            &format!("Band {} Freq", band),
            *freq,
            "Hz",
            FormatHint::Frequency,
        ));
        params.push(Parameter::with_unit(
            &format!("Band {} Gain", band),
            0.5,
            "dB",
            FormatHint::Decibel,
        ));
        params.push(Parameter::raw(&format!("Band {} Q", band), 0.5));
    }
    params
}

fn amp_params() -> Vec<Parameter> {
    ["Gain", "Input", "Drive", "Bass", "Mid", "Treble", "Presence"]
        .iter()
        .map(|name| Parameter::with_unit(name, 0.5, "%", FormatHint::Percentage))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_family_matches_reagate_and_generic_gate() {
        let plugin = build_plugin("ReaGate (Cockos)");
        let names: Vec<&str> = plugin.params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Gate Enable", "Threshold", "Attack", "Release"]);
        assert_eq!(plugin.params[0].value, 1.0);
        assert!(plugin.enabled);

        assert_eq!(build_plugin("Some Gate Thing").params.len(), 4);
    }

    #[test]
    fn first_matching_family_wins() {
        // Contains both "gate" and "comp"; gate is tested first.
        let plugin = build_plugin("Gate Comp Deluxe");
        assert_eq!(plugin.params[0].name, "Gate Enable");
        // "Modern" hits the "mod" keyword before the delay family is tried.
        let plugin = build_plugin("Modern Delay");
        assert_eq!(plugin.params[0].name, "Chorus Bypass");
    }

    #[test]
    fn name_is_kept_verbatim() {
        let plugin = build_plugin("VST3: Neural DSP Archetype Gojira");
        assert_eq!(plugin.name, "VST3: Neural DSP Archetype Gojira");
    }

    #[test]
    fn delay_family_uses_delay_prefixed_params() {
        let plugin = build_plugin("ReaDelay (Cockos)");
        let names: Vec<&str> = plugin.params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Delay Bypass", "Delay Time", "Delay Feedback", "Delay Mix"]
        );
        let values: Vec<f64> = plugin.params.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![0.0, 0.3, 0.2, 0.1]);
    }

    #[test]
    fn eq_family_has_bypass_plus_four_bands() {
        let plugin = build_plugin("ReaEQ (Cockos)");
        assert_eq!(plugin.params.len(), 13);
        assert_eq!(plugin.params[0].name, "EQ Bypass");

        let band1_freq = &plugin.params[1];
        assert_eq!(band1_freq.name, "Band 1 Freq");
        assert_eq!(band1_freq.unit, "Hz");
        assert_eq!(band1_freq.format_hint, FormatHint::Frequency);
        assert_eq!(band1_freq.value, 0.4);

        let band4_freq = &plugin.params[10];
        assert_eq!(band4_freq.name, "Band 4 Freq");
        assert_eq!(band4_freq.value, 0.75);

        let band2_gain = &plugin.params[5];
        assert_eq!(band2_gain.name, "Band 2 Gain");
        assert_eq!(band2_gain.unit, "dB");
        assert_eq!(band2_gain.format_hint, FormatHint::Decibel);
    }

    #[test]
    fn amp_family_is_all_percentages() {
        let plugin = build_plugin("VST3: Neural DSP Archetype");
        assert_eq!(plugin.params.len(), 7);
        for param in &plugin.params {
            assert_eq!(param.unit, "%");
            assert_eq!(param.format_hint, FormatHint::Percentage);
            assert_eq!(param.value, 0.5);
        }
        assert_eq!(plugin.params[0].name, "Gain");
        assert_eq!(plugin.params[6].name, "Presence");
    }

    #[test]
    fn compressor_and_reverb_defaults() {
        let comp = build_plugin("Compressor");
        assert_eq!(comp.params.len(), 7);
        assert_eq!(comp.params[0].name, "Compressor Bypass");
        assert_eq!(comp.params[6].name, "Mix");
        assert_eq!(comp.params[6].value, 1.0);

        let reverb = build_plugin("ReaVerbate (Cockos)");
        assert_eq!(reverb.params.len(), 7);
        assert_eq!(reverb.params[1].name, "Pre-delay");
        assert_eq!(reverb.params[1].value, 0.15);
    }

    #[test]
    fn unknown_names_get_no_params() {
        let plugin = build_plugin("Custom Unknown");
        assert!(plugin.params.is_empty());
        assert!(plugin.enabled);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(build_plugin("REAGATE").params.len(), 4);
        assert_eq!(build_plugin("TubeScreamer").params[0].name, "Overdrive Bypass");
        assert_eq!(build_plugin("HM-2 Pedal").params[0].name, "Distortion Bypass");
    }

    #[test]
    fn determinism_for_same_name() {
        assert_eq!(build_plugin("ReaDelay (Cockos)"), build_plugin("ReaDelay (Cockos)"));
    }
}
