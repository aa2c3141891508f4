//! In-memory fake host (testing only)
//!
//! Provides `MemoryHost`, a [`MediaHost`] implementation backed by plain maps
//! and vectors. It models just enough scene-graph behavior for the engine's
//! tests: registered input kinds with default settings, scenes with ordered
//! items, per-input audio state, and introspectable properties.

use std::sync::Mutex;

use crate::bridge::NativeSettings;
use crate::error::HostError;
use crate::host::{
    MediaHost, MonitorType, Property, PropertyKind, SceneItemRef, SourceCategory, SourceRef,
    VersionInfo,
};

#[derive(Debug, Clone)]
struct FakeSource {
    id: u64,
    name: String,
    kind: String,
    category: SourceCategory,
    settings: NativeSettings,
    muted: bool,
    volume_mul: f32,
    sync_offset_ns: i64,
    monitor_type: MonitorType,
    properties: Vec<Property>,
    /// Scene items, for sources of category `Scene` or `Group`.
    items: Vec<SceneItemRef>,
}

impl FakeSource {
    fn new(id: u64, name: &str, kind: &str, category: SourceCategory) -> Self {
        FakeSource {
            id,
            name: name.to_string(),
            kind: kind.to_string(),
            category,
            settings: NativeSettings::new(),
            muted: false,
            volume_mul: 1.0,
            sync_offset_ns: 0,
            monitor_type: MonitorType::None,
            properties: Vec::new(),
            items: Vec::new(),
        }
    }

    fn as_ref(&self) -> SourceRef {
        SourceRef {
            id: self.id,
            name: self.name.clone(),
            category: self.category,
            kind: self.kind.clone(),
        }
    }
}

#[derive(Debug, Default)]
struct State {
    sources: Vec<FakeSource>,
    /// kind name -> registered default settings (as plain values)
    kinds: Vec<(String, NativeSettings)>,
    next_source_id: u64,
    next_item_id: i64,
}

impl State {
    fn source(&self, id: u64) -> Result<&FakeSource, HostError> {
        self.sources
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| HostError::NotFound(format!("source id {id}")))
    }

    fn source_mut(&mut self, id: u64) -> Result<&mut FakeSource, HostError> {
        self.sources
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| HostError::NotFound(format!("source id {id}")))
    }

    fn kind_defaults(&self, kind: &str) -> Option<&NativeSettings> {
        self.kinds
            .iter()
            .find(|(name, _)| name == kind)
            .map(|(_, defaults)| defaults)
    }

    /// Settings object with the kind's defaults registered and no user values.
    fn seeded_settings(&self, kind: &str) -> NativeSettings {
        let mut settings = NativeSettings::new();
        if let Some(defaults) = self.kind_defaults(kind) {
            for name in defaults.names() {
                if let Some(value) = defaults.get(name) {
                    settings.set_default(name.to_string(), value.clone());
                }
            }
        }
        settings
    }
}

/// In-memory scene graph for tests.
#[derive(Debug, Default)]
pub struct MemoryHost {
    state: Mutex<State>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an input kind along with its default settings.
    pub fn register_kind(&self, kind: &str, defaults: NativeSettings) {
        let mut state = self.state.lock().unwrap();
        state.kinds.push((kind.to_string(), defaults));
    }

    /// Adds an empty scene.
    pub fn add_scene(&self, name: &str) {
        let mut state = self.state.lock().unwrap();
        state.next_source_id += 1;
        let id = state.next_source_id;
        state
            .sources
            .push(FakeSource::new(id, name, "scene", SourceCategory::Scene));
    }

    /// Adds an empty group.
    pub fn add_group(&self, name: &str) {
        let mut state = self.state.lock().unwrap();
        state.next_source_id += 1;
        let id = state.next_source_id;
        state
            .sources
            .push(FakeSource::new(id, name, "group", SourceCategory::Group));
    }

    /// Adds a free-standing input of a registered kind.
    pub fn add_input(&self, name: &str, kind: &str) {
        let mut state = self.state.lock().unwrap();
        state.next_source_id += 1;
        let id = state.next_source_id;
        let settings = state.seeded_settings(kind);
        let mut source = FakeSource::new(id, name, kind, SourceCategory::Input);
        source.settings = settings;
        state.sources.push(source);
    }

    /// Places an existing source into a scene; returns the new item id.
    pub fn place_in_scene(&self, scene_name: &str, source_name: &str) -> i64 {
        let mut state = self.state.lock().unwrap();
        state.next_item_id += 1;
        let item_id = state.next_item_id;
        let scene = state
            .sources
            .iter_mut()
            .find(|s| s.name == scene_name)
            .expect("scene must exist");
        scene.items.push(SceneItemRef {
            item_id,
            source_name: source_name.to_string(),
            enabled: true,
        });
        item_id
    }

    /// Replaces the property list of a source.
    pub fn set_properties(&self, source_name: &str, properties: Vec<Property>) {
        let mut state = self.state.lock().unwrap();
        let source = state
            .sources
            .iter_mut()
            .find(|s| s.name == source_name)
            .expect("source must exist");
        source.properties = properties;
    }

    /// Current volume multiplier, for asserting on write-through.
    pub fn peek_volume_mul(&self, source_name: &str) -> Option<f32> {
        let state = self.state.lock().unwrap();
        state
            .sources
            .iter()
            .find(|s| s.name == source_name)
            .map(|s| s.volume_mul)
    }
}

fn strip_version(kind: &str) -> &str {
    if let Some(pos) = kind.rfind("_v") {
        if kind[pos + 2..].chars().all(|c| c.is_ascii_digit()) && pos + 2 < kind.len() {
            return &kind[..pos];
        }
    }
    kind
}

impl MediaHost for MemoryHost {
    fn version(&self) -> VersionInfo {
        VersionInfo {
            host_version: "1.0.0-memory".to_string(),
            protocol_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    fn find_source(&self, name: &str) -> Option<SourceRef> {
        let state = self.state.lock().unwrap();
        state
            .sources
            .iter()
            .find(|s| s.name == name)
            .map(FakeSource::as_ref)
    }

    fn list_inputs(&self) -> Vec<SourceRef> {
        let state = self.state.lock().unwrap();
        state
            .sources
            .iter()
            .filter(|s| s.category == SourceCategory::Input)
            .map(FakeSource::as_ref)
            .collect()
    }

    fn list_scenes(&self) -> Vec<SourceRef> {
        let state = self.state.lock().unwrap();
        state
            .sources
            .iter()
            .filter(|s| s.category == SourceCategory::Scene)
            .map(FakeSource::as_ref)
            .collect()
    }

    fn input_kinds(&self, unversioned: bool) -> Vec<String> {
        let state = self.state.lock().unwrap();
        let mut kinds: Vec<String> = state
            .kinds
            .iter()
            .map(|(kind, _)| {
                if unversioned {
                    strip_version(kind).to_string()
                } else {
                    kind.clone()
                }
            })
            .collect();
        kinds.dedup();
        kinds
    }

    fn default_settings(&self, kind: &str) -> Option<NativeSettings> {
        let state = self.state.lock().unwrap();
        state.kind_defaults(kind)?;
        Some(state.seeded_settings(kind))
    }

    fn source_settings(&self, source: &SourceRef) -> Result<NativeSettings, HostError> {
        let state = self.state.lock().unwrap();
        Ok(state.source(source.id)?.settings.clone())
    }

    fn update_settings(
        &self,
        source: &SourceRef,
        settings: NativeSettings,
        overlay: bool,
    ) -> Result<(), HostError> {
        let mut state = self.state.lock().unwrap();
        let fake = state.source_mut(source.id)?;
        if overlay {
            fake.settings.apply(&settings);
        } else {
            fake.settings.reset_to(&settings);
        }
        Ok(())
    }

    fn create_input(
        &self,
        scene: &SourceRef,
        name: &str,
        kind: &str,
        settings: Option<NativeSettings>,
        enabled: bool,
    ) -> Result<i64, HostError> {
        let mut state = self.state.lock().unwrap();
        if state.sources.iter().any(|s| s.name == name) {
            return Err(HostError::AlreadyExists(name.to_string()));
        }
        if state.kind_defaults(kind).is_none() {
            return Err(HostError::InvalidKind(kind.to_string()));
        }

        state.next_source_id += 1;
        state.next_item_id += 1;
        let source_id = state.next_source_id;
        let item_id = state.next_item_id;

        let mut seeded = state.seeded_settings(kind);
        if let Some(user) = settings {
            seeded.apply(&user);
        }
        let mut input = FakeSource::new(source_id, name, kind, SourceCategory::Input);
        input.settings = seeded;
        state.sources.push(input);

        let scene = state.source_mut(scene.id).map_err(|_| {
            HostError::CreationFailed(format!("destination scene `{}` vanished", scene.name))
        })?;
        scene.items.push(SceneItemRef {
            item_id,
            source_name: name.to_string(),
            enabled,
        });

        Ok(item_id)
    }

    fn remove_source(&self, source: &SourceRef) -> Result<(), HostError> {
        let mut state = self.state.lock().unwrap();
        let name = state.source(source.id)?.name.clone();
        state.sources.retain(|s| s.id != source.id);
        for scene in &mut state.sources {
            scene.items.retain(|item| item.source_name != name);
        }
        Ok(())
    }

    fn rename_source(&self, source: &SourceRef, new_name: &str) -> Result<(), HostError> {
        let mut state = self.state.lock().unwrap();
        if state.sources.iter().any(|s| s.name == new_name) {
            return Err(HostError::AlreadyExists(new_name.to_string()));
        }
        state.source_mut(source.id)?.name = new_name.to_string();
        Ok(())
    }

    fn muted(&self, source: &SourceRef) -> Result<bool, HostError> {
        let state = self.state.lock().unwrap();
        Ok(state.source(source.id)?.muted)
    }

    fn set_muted(&self, source: &SourceRef, muted: bool) -> Result<(), HostError> {
        let mut state = self.state.lock().unwrap();
        state.source_mut(source.id)?.muted = muted;
        Ok(())
    }

    fn volume_mul(&self, source: &SourceRef) -> Result<f32, HostError> {
        let state = self.state.lock().unwrap();
        Ok(state.source(source.id)?.volume_mul)
    }

    fn set_volume_mul(&self, source: &SourceRef, mul: f32) -> Result<(), HostError> {
        let mut state = self.state.lock().unwrap();
        state.source_mut(source.id)?.volume_mul = mul;
        Ok(())
    }

    fn sync_offset_ns(&self, source: &SourceRef) -> Result<i64, HostError> {
        let state = self.state.lock().unwrap();
        Ok(state.source(source.id)?.sync_offset_ns)
    }

    fn set_sync_offset_ns(&self, source: &SourceRef, offset_ns: i64) -> Result<(), HostError> {
        let mut state = self.state.lock().unwrap();
        state.source_mut(source.id)?.sync_offset_ns = offset_ns;
        Ok(())
    }

    fn monitor_type(&self, source: &SourceRef) -> Result<MonitorType, HostError> {
        let state = self.state.lock().unwrap();
        Ok(state.source(source.id)?.monitor_type)
    }

    fn set_monitor_type(
        &self,
        source: &SourceRef,
        monitor_type: MonitorType,
    ) -> Result<(), HostError> {
        let mut state = self.state.lock().unwrap();
        state.source_mut(source.id)?.monitor_type = monitor_type;
        Ok(())
    }

    fn properties(&self, source: &SourceRef) -> Result<Vec<Property>, HostError> {
        let state = self.state.lock().unwrap();
        Ok(state.source(source.id)?.properties.clone())
    }

    fn press_property_button(&self, source: &SourceRef, property: &str) -> Result<(), HostError> {
        let state = self.state.lock().unwrap();
        let fake = state.source(source.id)?;
        let found = fake
            .properties
            .iter()
            .any(|p| p.name == property && matches!(p.kind, PropertyKind::Button));
        if !found {
            return Err(HostError::NotFound(format!("button property `{property}`")));
        }
        tracing::debug!(source = %fake.name, property, "button pressed");
        Ok(())
    }

    fn create_scene(&self, name: &str) -> Result<(), HostError> {
        let mut state = self.state.lock().unwrap();
        if state.sources.iter().any(|s| s.name == name) {
            return Err(HostError::AlreadyExists(name.to_string()));
        }
        state.next_source_id += 1;
        let id = state.next_source_id;
        state
            .sources
            .push(FakeSource::new(id, name, "scene", SourceCategory::Scene));
        Ok(())
    }

    fn remove_scene(&self, scene: &SourceRef) -> Result<(), HostError> {
        let mut state = self.state.lock().unwrap();
        state.source(scene.id)?;
        state.sources.retain(|s| s.id != scene.id);
        Ok(())
    }

    fn scene_items(&self, scene: &SourceRef) -> Result<Vec<SceneItemRef>, HostError> {
        let state = self.state.lock().unwrap();
        Ok(state.source(scene.id)?.items.clone())
    }

    fn set_scene_item_enabled(
        &self,
        scene: &SourceRef,
        item_id: i64,
        enabled: bool,
    ) -> Result<(), HostError> {
        let mut state = self.state.lock().unwrap();
        let fake = state.source_mut(scene.id)?;
        let item = fake
            .items
            .iter_mut()
            .find(|item| item.item_id == item_id)
            .ok_or_else(|| HostError::NotFound(format!("scene item id {item_id}")))?;
        item.enabled = enabled;
        Ok(())
    }
}
