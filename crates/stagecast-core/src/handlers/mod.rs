//! Request handlers
//!
//! One module per request category, mirroring the remote-control API surface:
//! general engine/config requests, inputs, scenes, and scene items. Every
//! handler is a plain function with the same signature, registered once in the
//! [`HandlerTable`] at startup; dispatch is a lookup, never reflection.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use stagecast_protocol::{Request, RequestData};

use crate::config::RuntimeConfig;
use crate::error::RequestError;
use crate::host::MediaHost;
use crate::resolver::Resolver;

pub mod general;
pub mod inputs;
pub mod scene_items;
pub mod scenes;

/// What a handler produces: an optional response payload or a classified
/// error.
pub type HandlerResult = Result<Option<RequestData>, RequestError>;

/// All handlers share one signature; the table is a map of these.
pub type HandlerFn = fn(&HandlerContext, &Request) -> HandlerResult;

/// Everything a handler may touch: the host collaborator, the runtime config,
/// and the registered request names (for `GetVersion`).
///
/// Handlers receive this by shared reference; nothing here is mutable except
/// through its own synchronization, so concurrent dispatches are safe.
pub struct HandlerContext {
    pub host: Arc<dyn MediaHost>,
    pub config: Arc<RuntimeConfig>,
    /// Sorted names of every registered request type.
    pub request_names: Vec<String>,
}

impl HandlerContext {
    /// Fresh per-call resolver over the host's scene graph.
    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(self.host.as_ref())
    }
}

/// Static mapping from request-type strings to handler functions.
///
/// Built once at startup, read-only afterwards; no locking needed.
pub struct HandlerTable {
    map: HashMap<&'static str, HandlerFn>,
}

impl HandlerTable {
    pub fn new() -> Self {
        let mut map: HashMap<&'static str, HandlerFn> = HashMap::new();

        // General
        map.insert("GetVersion", general::get_version);
        map.insert("GetFilenameFormatting", general::get_filename_formatting);
        map.insert("SetFilenameFormatting", general::set_filename_formatting);

        // Inputs
        map.insert("GetInputList", inputs::get_input_list);
        map.insert("GetInputKindList", inputs::get_input_kind_list);
        map.insert("CreateInput", inputs::create_input);
        map.insert("RemoveInput", inputs::remove_input);
        map.insert("SetInputName", inputs::set_input_name);
        map.insert("GetInputDefaultSettings", inputs::get_input_default_settings);
        map.insert("GetInputSettings", inputs::get_input_settings);
        map.insert("SetInputSettings", inputs::set_input_settings);
        map.insert("GetInputMute", inputs::get_input_mute);
        map.insert("SetInputMute", inputs::set_input_mute);
        map.insert("ToggleInputMute", inputs::toggle_input_mute);
        map.insert("GetInputVolume", inputs::get_input_volume);
        map.insert("SetInputVolume", inputs::set_input_volume);
        map.insert("GetInputAudioSyncOffset", inputs::get_input_audio_sync_offset);
        map.insert("SetInputAudioSyncOffset", inputs::set_input_audio_sync_offset);
        map.insert("GetInputAudioMonitorType", inputs::get_input_audio_monitor_type);
        map.insert("SetInputAudioMonitorType", inputs::set_input_audio_monitor_type);
        map.insert(
            "GetInputPropertiesListPropertyItems",
            inputs::get_input_properties_list_property_items,
        );
        map.insert(
            "PressInputPropertiesButton",
            inputs::press_input_properties_button,
        );

        // Scenes
        map.insert("GetSceneList", scenes::get_scene_list);
        map.insert("CreateScene", scenes::create_scene);
        map.insert("RemoveScene", scenes::remove_scene);

        // Scene items
        map.insert("GetSceneItemId", scene_items::get_scene_item_id);
        map.insert("GetSceneItemEnabled", scene_items::get_scene_item_enabled);
        map.insert("SetSceneItemEnabled", scene_items::set_scene_item_enabled);

        HandlerTable { map }
    }

    pub fn get(&self, request_type: &str) -> Option<HandlerFn> {
        self.map.get(request_type).copied()
    }

    /// Registered request names, sorted.
    pub fn request_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.map.keys().map(|k| k.to_string()).collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl Default for HandlerTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Unwraps a `json!({...})` literal into a response payload.
pub(crate) fn response_data(value: Value) -> Option<RequestData> {
    match value {
        Value::Object(map) => Some(map),
        _ => None,
    }
}
