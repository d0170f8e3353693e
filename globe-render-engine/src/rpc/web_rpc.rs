use bevy::diagnostic::DiagnosticsStore;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::core::app_state::{SceneCommand, SceneToggles};
use crate::engine::scene::satellite::Satellite;
use crate::engine::systems::fps_tracking::smoothed_fps;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC 2.0 error object.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Resource managing bidirectional RPC communication with the embedding page.
/// Handles both request-response patterns and notification broadcasting.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the page without expecting a response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    #[cfg(test)]
    pub fn pending_notifications(&self) -> &[RpcNotification] {
        &self.outgoing_notifications
    }

    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }
}

/// Scene values the request handlers can read, captured once per frame.
/// `toggles` stays empty until the scene config has resolved.
#[derive(Debug, Clone, Default)]
pub struct RpcSnapshot {
    pub fps: f64,
    pub satellite: Option<SatelliteSnapshot>,
    pub toggles: Option<SceneToggles>,
}

#[derive(Debug, Clone, Copy)]
pub struct SatelliteSnapshot {
    pub angle: f64,
    pub position: [f64; 3],
}

impl SatelliteSnapshot {
    /// Describe the satellite where it is drawn this frame.
    pub fn from_rendered(satellite: &Satellite, transform: &Transform) -> Self {
        Self {
            angle: satellite.placed.angle,
            position: transform.translation.as_dvec3().to_array(),
        }
    }
}

/// What a request produced: a reply for the caller and possibly a scene change.
#[derive(Debug, Default)]
pub struct RpcOutcome {
    pub response: Option<RpcResponse>,
    pub command: Option<SceneCommand>,
}

/// Plugin establishing the WebRPC layer for iframe/page embedding.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_event::<SceneCommand>()
            .add_systems(
                Update,
                (
                    process_incoming_messages,
                    handle_rpc_messages,
                    send_outgoing_messages,
                )
                    .chain(),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();
            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    let Some(window) = window() else {
        error!("Window object not available, RPC bridge disabled");
        return;
    };
    if let Err(e) =
        window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
    {
        error!("Failed to register message listener: {:?}", e);
        return;
    }

    // Hand the closure to JS so it outlives this system.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Message queue filled by the WASM listener and drained each frame.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut scene_commands: EventWriter<SceneCommand>,
    diagnostics: Res<DiagnosticsStore>,
    toggles: Option<Res<SceneToggles>>,
    satellites: Query<(&Satellite, &Transform)>,
) {
    if events.is_empty() {
        return;
    }

    let snapshot = RpcSnapshot {
        fps: smoothed_fps(&diagnostics).unwrap_or(0.0),
        satellite: satellites
            .iter()
            .next()
            .map(|(satellite, transform)| SatelliteSnapshot::from_rendered(satellite, transform)),
        toggles: toggles.map(|t| *t),
    };

    for event in events.read() {
        match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => {
                debug!("Processing RPC method: {}", request.method);
                let outcome = handle_rpc_request(&request, &snapshot);
                if let Some(command) = outcome.command {
                    scene_commands.write(command);
                }
                if let Some(response) = outcome.response {
                    rpc_interface.queue_response(response);
                }
            }
            Err(parse_error) => {
                warn!("Discarding malformed RPC message: {}", parse_error);
            }
        }
    }
}

/// Dispatch a request against the current scene snapshot.
/// Requests without an id are notifications: they may still change the scene but get no reply.
pub fn handle_rpc_request(request: &RpcRequest, snapshot: &RpcSnapshot) -> RpcOutcome {
    let mut command = None;

    let result = match request.method.as_str() {
        "get_fps" => handle_get_fps(snapshot),
        "get_satellite_state" => handle_get_satellite_state(snapshot),
        "set_grid_visible" => require_scene(snapshot)
            .and_then(|_| handle_set_grid_visible(&request.params, &mut command)),
        "set_orbit_paused" => require_scene(snapshot)
            .and_then(|_| handle_set_orbit_paused(&request.params, &mut command)),
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            Err(RpcError::method_not_found(&request.method))
        }
    };

    let response = request.id.clone().map(|id| match result {
        Ok(result_value) => RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        },
        Err(error) => RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        },
    });

    RpcOutcome { response, command }
}

/// Scene commands are only applied once the scene exists; refuse them before that.
fn require_scene(snapshot: &RpcSnapshot) -> Result<SceneToggles, RpcError> {
    snapshot
        .toggles
        .ok_or_else(|| RpcError::internal_error("Scene not ready"))
}

fn handle_get_fps(snapshot: &RpcSnapshot) -> Result<serde_json::Value, RpcError> {
    Ok(serde_json::json!({
        "fps": snapshot.fps as f32
    }))
}

fn handle_get_satellite_state(snapshot: &RpcSnapshot) -> Result<serde_json::Value, RpcError> {
    let satellite = snapshot
        .satellite
        .ok_or_else(|| RpcError::internal_error("Satellite not spawned yet"))?;

    Ok(serde_json::json!({
        "angle": satellite.angle,
        "position": satellite.position,
        "paused": snapshot.toggles.is_some_and(|t| t.orbit_paused)
    }))
}

fn handle_set_grid_visible(
    params: &serde_json::Value,
    command: &mut Option<SceneCommand>,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct GridParams {
        visible: bool,
    }

    let parsed = serde_json::from_value::<GridParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected boolean 'visible' parameter"))?;
    *command = Some(SceneCommand::SetGridVisible(parsed.visible));

    Ok(serde_json::json!({
        "success": true,
        "grid_visible": parsed.visible
    }))
}

fn handle_set_orbit_paused(
    params: &serde_json::Value,
    command: &mut Option<SceneCommand>,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct OrbitParams {
        paused: bool,
    }

    let parsed = serde_json::from_value::<OrbitParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected boolean 'paused' parameter"))?;
    *command = Some(SceneCommand::SetOrbitPaused(parsed.paused));

    Ok(serde_json::json!({
        "success": true,
        "paused": parsed.paused
    }))
}

/// Send queued notifications and responses to the parent window.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        warn!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        // No message target outside the browser.
        let _ = message;
    }
}

/// Standard RPC error codes and constructors.
impl RpcError {
    pub fn method_not_found(method: &str) -> Self {
        Self {
            code: -32601,
            message: "Method not found".to_string(),
            data: Some(serde_json::json!({ "method": method })),
        }
    }

    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }

    pub fn internal_error(message: &str) -> Self {
        Self {
            code: -32603,
            message: message.to_string(),
            data: None,
        }
    }
}
