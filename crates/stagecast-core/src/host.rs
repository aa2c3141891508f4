//! Host collaborator interface
//!
//! The engine never owns domain objects. Sources, scenes and scene items live
//! in the host application's scene graph, which mutates them on its own
//! execution contexts. [`MediaHost`] is the narrow interface the engine
//! consumes; everything behind it — rendering, encoding, the real object
//! model — is out of scope.
//!
//! # Handle lifetime
//!
//! A [`SourceRef`] is a snapshot taken at lookup time. It stays valid for the
//! duration of one handler invocation and must never be cached across
//! requests: the host may rename, mutate or remove the underlying object at
//! any point. Read-modify-write operations built on these handles (e.g.
//! toggle-mute) are last-writer-wins by design; the host exposes no
//! compare-and-set for this category of state.

use crate::bridge::NativeSettings;
use crate::error::HostError;

/// Category of a source within the host's scene graph.
///
/// A closed variant set, so resolution is a pattern match rather than runtime
/// type inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceCategory {
    /// Produces audio/video (capture devices, media players, ...).
    Input,
    /// Container of ordered scene items; itself a kind of source.
    Scene,
    /// Scene-like container that is not a true scene.
    Group,
    /// Transition between scenes.
    Transition,
}

/// Transient, non-owning reference to a source, valid for one handler call.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceRef {
    /// Host-internal identity; opaque to the engine.
    pub id: u64,
    pub name: String,
    pub category: SourceCategory,
    /// Registered kind identifier (e.g. a capture-device driver name).
    pub kind: String,
}

/// Transient reference to one placement of a source within a scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneItemRef {
    pub item_id: i64,
    pub source_name: String,
    pub enabled: bool,
}

/// Audio monitoring mode of an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorType {
    None,
    MonitorOnly,
    MonitorAndOutput,
}

impl MonitorType {
    pub fn as_str(self) -> &'static str {
        match self {
            MonitorType::None => "MONITOR_TYPE_NONE",
            MonitorType::MonitorOnly => "MONITOR_TYPE_MONITOR_ONLY",
            MonitorType::MonitorAndOutput => "MONITOR_TYPE_MONITOR_AND_OUTPUT",
        }
    }

    /// Parses the wire string; `None` for anything unrecognized.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "MONITOR_TYPE_NONE" => Some(MonitorType::None),
            "MONITOR_TYPE_MONITOR_ONLY" => Some(MonitorType::MonitorOnly),
            "MONITOR_TYPE_MONITOR_AND_OUTPUT" => Some(MonitorType::MonitorAndOutput),
            _ => None,
        }
    }
}

/// One introspected source property.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: String,
    pub enabled: bool,
    pub kind: PropertyKind,
}

/// Shape of a source property.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKind {
    /// Selectable list of items.
    List(Vec<PropertyListItem>),
    /// Invokable button.
    Button,
    /// Anything the engine does not introspect further.
    Other,
}

/// One selectable item of a list property.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyListItem {
    pub name: String,
    pub enabled: bool,
    pub value: serde_json::Value,
}

/// Host and protocol version information.
#[derive(Debug, Clone, PartialEq)]
pub struct VersionInfo {
    pub host_version: String,
    pub protocol_version: String,
}

/// The scene-graph provider consumed by the engine.
///
/// Implementations must be `Send + Sync`: the dispatcher invokes handlers
/// concurrently for independent requests, and the engine itself holds no
/// shared mutable state. All failures are [`HostError`]; the dispatcher
/// downgrades unclassifiable ones to `RequestProcessingFailed`.
pub trait MediaHost: Send + Sync {
    fn version(&self) -> VersionInfo;

    // -- Lookup -------------------------------------------------------------

    /// Finds any source by name, regardless of category.
    fn find_source(&self, name: &str) -> Option<SourceRef>;

    /// All sources of category [`SourceCategory::Input`], in host order.
    fn list_inputs(&self) -> Vec<SourceRef>;

    /// All true scenes, in host order.
    fn list_scenes(&self) -> Vec<SourceRef>;

    /// Registered input kinds. With `unversioned`, version suffixes are
    /// stripped.
    fn input_kinds(&self, unversioned: bool) -> Vec<String>;

    // -- Settings -----------------------------------------------------------

    /// Registered default settings for a kind; `None` when the kind is
    /// unknown.
    fn default_settings(&self, kind: &str) -> Option<NativeSettings>;

    fn source_settings(&self, source: &SourceRef) -> Result<NativeSettings, HostError>;

    /// Applies `settings` to the source. With `overlay`, new values land on
    /// top of existing user settings; without it, user settings are reset to
    /// defaults first.
    fn update_settings(
        &self,
        source: &SourceRef,
        settings: NativeSettings,
        overlay: bool,
    ) -> Result<(), HostError>;

    // -- Input lifecycle ----------------------------------------------------

    /// Creates an input and places it in `scene`; returns the new scene item
    /// id.
    fn create_input(
        &self,
        scene: &SourceRef,
        name: &str,
        kind: &str,
        settings: Option<NativeSettings>,
        enabled: bool,
    ) -> Result<i64, HostError>;

    fn remove_source(&self, source: &SourceRef) -> Result<(), HostError>;

    fn rename_source(&self, source: &SourceRef, new_name: &str) -> Result<(), HostError>;

    // -- Audio --------------------------------------------------------------

    fn muted(&self, source: &SourceRef) -> Result<bool, HostError>;

    fn set_muted(&self, source: &SourceRef, muted: bool) -> Result<(), HostError>;

    fn volume_mul(&self, source: &SourceRef) -> Result<f32, HostError>;

    fn set_volume_mul(&self, source: &SourceRef, mul: f32) -> Result<(), HostError>;

    /// Audio sync offset in nanoseconds, as the host stores it.
    fn sync_offset_ns(&self, source: &SourceRef) -> Result<i64, HostError>;

    fn set_sync_offset_ns(&self, source: &SourceRef, offset_ns: i64) -> Result<(), HostError>;

    fn monitor_type(&self, source: &SourceRef) -> Result<MonitorType, HostError>;

    fn set_monitor_type(
        &self,
        source: &SourceRef,
        monitor_type: MonitorType,
    ) -> Result<(), HostError>;

    // -- Properties ---------------------------------------------------------

    /// Introspects the source's property list.
    fn properties(&self, source: &SourceRef) -> Result<Vec<Property>, HostError>;

    /// Invokes a button property.
    fn press_property_button(&self, source: &SourceRef, property: &str) -> Result<(), HostError>;

    // -- Scenes and scene items ---------------------------------------------

    fn create_scene(&self, name: &str) -> Result<(), HostError>;

    fn remove_scene(&self, scene: &SourceRef) -> Result<(), HostError>;

    /// Ordered items of a scene.
    fn scene_items(&self, scene: &SourceRef) -> Result<Vec<SceneItemRef>, HostError>;

    fn set_scene_item_enabled(
        &self,
        scene: &SourceRef,
        item_id: i64,
        enabled: bool,
    ) -> Result<(), HostError>;
}
