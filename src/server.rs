//! HTTP surface of the mock extension.
//!
//! Serves the same paths as the real extension and answers from the shared
//! scenario state instead of a live REAPER project. Wire shapes mirror the
//! app-side client structs so both ends of the protocol read alike.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::io::BufReader;
use tokio::net::{TcpListener, TcpStream};

use crate::config::ServerConfig;
use crate::errors::MockError;
use crate::http::{read_request, write_json, Request};
use crate::model::FormatHint;
use crate::scenarios::DEFAULT_SCENARIO;
use crate::state::MockState;

pub const SERVICE_NAME: &str = "Mock REAPER Extension";

#[derive(Debug, Serialize)]
struct TrackFXInfo {
    index: usize,
    name: String,
    enabled: bool,
}

#[derive(Debug, Serialize)]
struct TrackInfo {
    index: usize,
    name: String,
    fx_count: usize,
    fx_list: Vec<TrackFXInfo>,
}

#[derive(Debug, Serialize)]
struct FXParamEntry {
    index: usize,
    name: String,
    value: f64,
    display: String,
    unit: String,
    format_hint: FormatHint,
}

fn default_enabled() -> bool {
    true
}

fn default_param_index() -> i64 {
    -1
}

#[derive(Debug, Deserialize)]
struct ToggleBody {
    #[serde(default)]
    track: i64,
    #[serde(default)]
    fx: i64,
    #[serde(default = "default_enabled")]
    enabled: bool,
}

#[derive(Debug, Deserialize)]
struct AddBody {
    #[serde(default)]
    track: i64,
    #[serde(default)]
    plugin: String,
}

#[derive(Debug, Deserialize)]
struct WriteParamIndexBody {
    #[serde(default)]
    track: i64,
    #[serde(default)]
    fx: i64,
    #[serde(default = "default_param_index")]
    param_index: i64,
    #[serde(default)]
    value: f64,
}

#[derive(Debug, Deserialize)]
struct WriteNamedParamBody {
    #[serde(default)]
    track: i64,
    #[serde(default)]
    fx: i64,
    #[serde(default)]
    param: String,
    #[serde(default)]
    value: f64,
}

pub struct MockServer {
    listener: TcpListener,
    state: Arc<MockState>,
}

impl MockServer {
    /// Bind the listener and build the initial scenario tree.
    pub async fn bind(config: &ServerConfig) -> io::Result<Self> {
        let listener = TcpListener::bind(config.bind_addr()).await?;
        let state = Arc::new(MockState::new(&config.scenario));
        info!(
            "mock REAPER extension listening on {} (scenario '{}')",
            listener.local_addr()?,
            config.scenario
        );
        Ok(Self { listener, state })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept loop; one task per connection, requests on a connection are
    /// handled in order.
    pub async fn run(self) -> io::Result<()> {
        loop {
            let (stream, peer) = self.listener.accept().await?;
            let state = Arc::clone(&self.state);
            tokio::spawn(async move {
                if let Err(err) = handle_connection(stream, state).await {
                    debug!("connection from {} ended: {}", peer, err);
                }
            });
        }
    }
}

async fn handle_connection(stream: TcpStream, state: Arc<MockState>) -> io::Result<()> {
    let (read_half, mut write_half) = stream.into_split();
    let mut reader = BufReader::new(read_half);

    while let Some(request) = read_request(&mut reader).await? {
        let (status, body) = dispatch(&request, &state);
        write_json(&mut write_half, status, &body).await?;
    }
    Ok(())
}

/// Route a request to its handler; every arm resolves to a status and a
/// JSON body, including the error arms.
fn dispatch(request: &Request, state: &MockState) -> (u16, Value) {
    let result = match (request.method.as_str(), request.path.as_str()) {
        ("GET", "/ping") => Ok(json!({ "status": "ok", "service": SERVICE_NAME })),
        ("GET", "/__reset") => handle_reset(request, state),
        ("GET", "/tracks") => Ok(handle_tracks(state)),
        ("GET", "/fx/params") => handle_fx_params(request, state),
        ("GET", "/fx/param_index") => handle_get_param_index(request, state),
        ("GET", "/fx/param") => handle_get_param(request, state),
        ("POST", "/fx/toggle") => handle_toggle(request, state),
        ("POST", "/fx/add") => handle_add(request, state),
        ("POST", "/fx/param_index") => handle_write_param_index(request, state),
        ("POST", "/fx/param") => handle_write_param(request, state),
        _ => Err(MockError::UnknownEndpoint {
            path: request.path.clone(),
        }),
    };

    match result {
        Ok(body) => (200, body),
        Err(err) => (err.status(), err.body()),
    }
}

fn handle_reset(request: &Request, state: &MockState) -> Result<Value, MockError> {
    let scenario = request.query_param("scenario").unwrap_or(DEFAULT_SCENARIO);
    state.reset(scenario);
    Ok(json!({ "ok": true, "scenario": scenario }))
}

fn handle_tracks(state: &MockState) -> Value {
    let session = state.snapshot();
    let tracks: Vec<TrackInfo> = session
        .tracks
        .iter()
        .enumerate()
        .map(|(index, track)| TrackInfo {
            index,
            name: track.name.clone(),
            fx_count: track.fx.len(),
            fx_list: track
                .fx
                .iter()
                .enumerate()
                .map(|(fx_index, plugin)| TrackFXInfo {
                    index: fx_index,
                    name: plugin.name.clone(),
                    enabled: plugin.enabled,
                })
                .collect(),
        })
        .collect();
    json!({ "track_count": tracks.len(), "tracks": tracks })
}

fn handle_fx_params(request: &Request, state: &MockState) -> Result<Value, MockError> {
    let track = int_query(request, "track", 0);
    let fx = int_query(request, "fx", 0);
    let session = state.snapshot();
    let plugin = session.plugin(track, fx)?;
    let params: Vec<FXParamEntry> = plugin
        .params
        .iter()
        .enumerate()
        .map(|(index, param)| FXParamEntry {
            index,
            name: param.name.clone(),
            value: param.value,
            display: param.display(),
            unit: param.unit.clone(),
            format_hint: param.format_hint,
        })
        .collect();
    Ok(json!({ "track": track, "fx": fx, "params": params }))
}

fn handle_get_param_index(request: &Request, state: &MockState) -> Result<Value, MockError> {
    let track = int_query(request, "track", 0);
    let fx = int_query(request, "fx", 0);
    let param_index = int_query(request, "param_index", -1);
    let session = state.snapshot();
    let param = session.param(track, fx, param_index)?;
    Ok(json!({
        "track": track,
        "fx": fx,
        "param_index": param_index,
        "param_name": param.name.clone(),
        "value": param.value,
    }))
}

fn handle_get_param(request: &Request, state: &MockState) -> Result<Value, MockError> {
    let track = int_query(request, "track", 0);
    let fx = int_query(request, "fx", 0);
    let query = request.query_param("param").unwrap_or("");
    let (param_index, value) = state.resolve_param(track, fx, query)?;
    Ok(json!({
        "track": track,
        "fx": fx,
        "param": query,
        "param_index": param_index,
        "value": value,
    }))
}

fn handle_toggle(request: &Request, state: &MockState) -> Result<Value, MockError> {
    let body: ToggleBody = parse_body(request)?;
    state.set_fx_enabled(body.track, body.fx, body.enabled)?;
    Ok(json!({
        "success": true,
        "track": body.track,
        "fx": body.fx,
        "enabled": body.enabled,
    }))
}

fn handle_add(request: &Request, state: &MockState) -> Result<Value, MockError> {
    let body: AddBody = parse_body(request)?;
    if body.plugin.is_empty() {
        return Err(MockError::PluginRequired);
    }
    let fx_index = state.add_fx(body.track, &body.plugin)?;
    Ok(json!({
        "success": true,
        "track": body.track,
        "fx_index": fx_index,
        "fx_name": body.plugin,
    }))
}

fn handle_write_param_index(request: &Request, state: &MockState) -> Result<Value, MockError> {
    let body: WriteParamIndexBody = parse_body(request)?;
    let (param_name, value) = state.write_param(body.track, body.fx, body.param_index, body.value)?;
    Ok(json!({
        "success": true,
        "track": body.track,
        "fx": body.fx,
        "param_index": body.param_index,
        "param_name": param_name,
        "value": value,
    }))
}

fn handle_write_param(request: &Request, state: &MockState) -> Result<Value, MockError> {
    let body: WriteNamedParamBody = parse_body(request)?;
    let (param_index, value) =
        state.write_param_by_name(body.track, body.fx, &body.param, body.value)?;
    Ok(json!({
        "success": true,
        "track": body.track,
        "fx": body.fx,
        "param_index": param_index,
        "value": value,
    }))
}

fn int_query(request: &Request, key: &str, default: i64) -> i64 {
    request
        .query_param(key)
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(default)
}

/// Decode a JSON request body; an absent body reads as an empty object so
/// every field falls back to its default.
fn parse_body<T: serde::de::DeserializeOwned>(request: &Request) -> Result<T, MockError> {
    let raw: &[u8] = if request.body.is_empty() {
        b"{}"
    } else {
        &request.body
    };
    serde_json::from_slice(raw).map_err(|err| MockError::InvalidBody {
        message: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn get(path: &str, query: &[(&str, &str)]) -> Request {
        Request {
            method: "GET".to_string(),
            path: path.to_string(),
            query: query
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body: Vec::new(),
        }
    }

    fn post(path: &str, body: Value) -> Request {
        Request {
            method: "POST".to_string(),
            path: path.to_string(),
            query: HashMap::new(),
            body: body.to_string().into_bytes(),
        }
    }

    #[test]
    fn ping_reports_the_service_name() {
        let state = MockState::new("baseline");
        let (status, body) = dispatch(&get("/ping", &[]), &state);
        assert_eq!(status, 200);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "Mock REAPER Extension");
    }

    #[test]
    fn unknown_paths_echo_the_path() {
        let state = MockState::new("baseline");
        let (status, body) = dispatch(&get("/transport/bpm", &[]), &state);
        assert_eq!(status, 404);
        assert_eq!(body["error"], "Unknown endpoint");
        assert_eq!(body["path"], "/transport/bpm");
        // A known path with the wrong verb is unmatched too.
        let (status, _) = dispatch(&post("/tracks", json!({})), &state);
        assert_eq!(status, 404);
    }

    #[test]
    fn reset_echoes_the_requested_scenario() {
        let state = MockState::new("baseline");
        let (status, body) = dispatch(&get("/__reset", &[("scenario", "kitchen_sink")]), &state);
        assert_eq!(status, 200);
        assert_eq!(body["ok"], true);
        assert_eq!(body["scenario"], "kitchen_sink");
        assert_eq!(state.snapshot().tracks[0].fx.len(), 2);

        let (_, body) = dispatch(&get("/__reset", &[]), &state);
        assert_eq!(body["scenario"], "baseline");
    }

    #[test]
    fn tracks_lists_the_chain_in_order() {
        let state = MockState::new("disabled_gate");
        let (status, body) = dispatch(&get("/tracks", &[]), &state);
        assert_eq!(status, 200);
        assert_eq!(body["track_count"], 1);
        let fx_list = body["tracks"][0]["fx_list"].as_array().unwrap();
        assert_eq!(fx_list.len(), 2);
        assert_eq!(fx_list[1]["index"], 1);
        assert!(fx_list[1]["name"].as_str().unwrap().contains("ReaGate"));
        assert_eq!(fx_list[1]["enabled"], false);
    }

    #[test]
    fn fx_params_carries_display_strings() {
        let state = MockState::new("baseline");
        let (status, body) = dispatch(&get("/fx/params", &[("track", "0"), ("fx", "0")]), &state);
        assert_eq!(status, 200);
        let params = body["params"].as_array().unwrap();
        assert_eq!(params.len(), 7);
        assert_eq!(params[0]["name"], "Gain");
        assert_eq!(params[0]["display"], "50%");
        assert_eq!(params[0]["format_hint"], "percentage");
    }

    #[test]
    fn fx_params_on_a_bad_index_is_not_found() {
        let state = MockState::new("baseline");
        let (status, body) = dispatch(&get("/fx/params", &[("track", "0"), ("fx", "9")]), &state);
        assert_eq!(status, 404);
        assert_eq!(body["error"], "Not found");
    }

    #[test]
    fn param_index_roundtrip_reads_the_clamped_value() {
        let state = MockState::new("baseline");
        let (status, body) = dispatch(
            &post(
                "/fx/param_index",
                json!({ "track": 0, "fx": 2, "param_index": 1, "value": 0.95 }),
            ),
            &state,
        );
        assert_eq!(status, 200);
        assert_eq!(body["success"], true);
        assert_eq!(body["param_name"], "Delay Time");
        assert_eq!(body["value"], 0.9);

        let (status, body) = dispatch(
            &get(
                "/fx/param_index",
                &[("track", "0"), ("fx", "2"), ("param_index", "1")],
            ),
            &state,
        );
        assert_eq!(status, 200);
        assert_eq!(body["value"], 0.9);
    }

    #[test]
    fn get_param_index_without_the_index_is_not_found() {
        let state = MockState::new("baseline");
        let (status, _) = dispatch(&get("/fx/param_index", &[("track", "0"), ("fx", "0")]), &state);
        assert_eq!(status, 404);
    }

    #[test]
    fn toggle_round_trips_the_enabled_flag() {
        let state = MockState::new("baseline");
        let (status, body) = dispatch(
            &post("/fx/toggle", json!({ "track": 0, "fx": 1, "enabled": false })),
            &state,
        );
        assert_eq!(status, 200);
        assert_eq!(body["enabled"], false);
        assert!(!state.snapshot().tracks[0].fx[1].enabled);
    }

    #[test]
    fn add_requires_a_plugin_name() {
        let state = MockState::new("baseline");
        let (status, body) = dispatch(&post("/fx/add", json!({ "track": 0 })), &state);
        assert_eq!(status, 400);
        assert_eq!(body["error"], "plugin required");
    }

    #[test]
    fn add_returns_the_appended_index() {
        let state = MockState::new("baseline");
        let (status, body) = dispatch(
            &post("/fx/add", json!({ "track": 0, "plugin": "Custom Unknown" })),
            &state,
        );
        assert_eq!(status, 200);
        assert_eq!(body["fx_index"], 3);
        assert_eq!(body["fx_name"], "Custom Unknown");
    }

    #[test]
    fn named_param_get_and_set() {
        let state = MockState::new("baseline");
        let (status, body) = dispatch(
            &get(
                "/fx/param",
                &[("track", "0"), ("fx", "2"), ("param", "delay time")],
            ),
            &state,
        );
        assert_eq!(status, 200);
        assert_eq!(body["param_index"], 1);
        assert_eq!(body["value"], 0.3);

        let (status, body) = dispatch(
            &post(
                "/fx/param",
                json!({ "track": 0, "fx": 2, "param": "delaytime", "value": 2.0 }),
            ),
            &state,
        );
        assert_eq!(status, 200);
        assert_eq!(body["value"], 0.9);

        let (status, body) = dispatch(
            &get("/fx/param", &[("track", "0"), ("fx", "2"), ("param", "nope")]),
            &state,
        );
        assert_eq!(status, 404);
        assert_eq!(body["error"], "Parameter not found");
    }

    #[test]
    fn undecodable_bodies_are_bad_requests() {
        let state = MockState::new("baseline");
        let request = Request {
            method: "POST".to_string(),
            path: "/fx/toggle".to_string(),
            query: HashMap::new(),
            body: b"not json".to_vec(),
        };
        let (status, _) = dispatch(&request, &state);
        assert_eq!(status, 400);
    }

    #[test]
    fn missing_body_fields_take_defaults() {
        let state = MockState::new("baseline");
        // Empty toggle body defaults to track 0, fx 0, enabled true.
        let (status, body) = dispatch(&post("/fx/toggle", json!({})), &state);
        assert_eq!(status, 200);
        assert_eq!(body["track"], 0);
        assert_eq!(body["fx"], 0);
        assert_eq!(body["enabled"], true);
    }
}
