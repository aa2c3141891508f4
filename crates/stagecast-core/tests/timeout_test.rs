//! Timeout behavior at the dispatch boundary
//!
//! A host call that never comes back must not hang the transport; the caller
//! applies a deadline and the client sees `RequestProcessingFailed`.

use std::sync::Arc;
use std::time::Duration;

use stagecast_core::bridge::NativeSettings;
use stagecast_core::config::RuntimeConfig;
use stagecast_core::dispatcher::RequestDispatcher;
use stagecast_core::error::HostError;
use stagecast_core::host::{
    MediaHost, MonitorType, Property, SceneItemRef, SourceRef, VersionInfo,
};
use stagecast_protocol::{Request, RequestStatus};

/// Host whose version query stalls; everything else is inert.
struct StallingHost;

fn unsupported<T>() -> Result<T, HostError> {
    Err(HostError::Internal("not supported by this host".into()))
}

impl MediaHost for StallingHost {
    fn version(&self) -> VersionInfo {
        std::thread::sleep(Duration::from_millis(250));
        VersionInfo {
            host_version: "stalling".into(),
            protocol_version: "0.0.0".into(),
        }
    }

    fn find_source(&self, _name: &str) -> Option<SourceRef> {
        None
    }

    fn list_inputs(&self) -> Vec<SourceRef> {
        Vec::new()
    }

    fn list_scenes(&self) -> Vec<SourceRef> {
        Vec::new()
    }

    fn input_kinds(&self, _unversioned: bool) -> Vec<String> {
        Vec::new()
    }

    fn default_settings(&self, _kind: &str) -> Option<NativeSettings> {
        None
    }

    fn source_settings(&self, _source: &SourceRef) -> Result<NativeSettings, HostError> {
        unsupported()
    }

    fn update_settings(
        &self,
        _source: &SourceRef,
        _settings: NativeSettings,
        _overlay: bool,
    ) -> Result<(), HostError> {
        unsupported()
    }

    fn create_input(
        &self,
        _scene: &SourceRef,
        _name: &str,
        _kind: &str,
        _settings: Option<NativeSettings>,
        _enabled: bool,
    ) -> Result<i64, HostError> {
        unsupported()
    }

    fn remove_source(&self, _source: &SourceRef) -> Result<(), HostError> {
        unsupported()
    }

    fn rename_source(&self, _source: &SourceRef, _new_name: &str) -> Result<(), HostError> {
        unsupported()
    }

    fn muted(&self, _source: &SourceRef) -> Result<bool, HostError> {
        unsupported()
    }

    fn set_muted(&self, _source: &SourceRef, _muted: bool) -> Result<(), HostError> {
        unsupported()
    }

    fn volume_mul(&self, _source: &SourceRef) -> Result<f32, HostError> {
        unsupported()
    }

    fn set_volume_mul(&self, _source: &SourceRef, _mul: f32) -> Result<(), HostError> {
        unsupported()
    }

    fn sync_offset_ns(&self, _source: &SourceRef) -> Result<i64, HostError> {
        unsupported()
    }

    fn set_sync_offset_ns(&self, _source: &SourceRef, _offset_ns: i64) -> Result<(), HostError> {
        unsupported()
    }

    fn monitor_type(&self, _source: &SourceRef) -> Result<MonitorType, HostError> {
        unsupported()
    }

    fn set_monitor_type(
        &self,
        _source: &SourceRef,
        _monitor_type: MonitorType,
    ) -> Result<(), HostError> {
        unsupported()
    }

    fn properties(&self, _source: &SourceRef) -> Result<Vec<Property>, HostError> {
        unsupported()
    }

    fn press_property_button(&self, _source: &SourceRef, _property: &str) -> Result<(), HostError> {
        unsupported()
    }

    fn create_scene(&self, _name: &str) -> Result<(), HostError> {
        unsupported()
    }

    fn remove_scene(&self, _scene: &SourceRef) -> Result<(), HostError> {
        unsupported()
    }

    fn scene_items(&self, _scene: &SourceRef) -> Result<Vec<SceneItemRef>, HostError> {
        unsupported()
    }

    fn set_scene_item_enabled(
        &self,
        _scene: &SourceRef,
        _item_id: i64,
        _enabled: bool,
    ) -> Result<(), HostError> {
        unsupported()
    }
}

fn dispatcher() -> Arc<RequestDispatcher> {
    Arc::new(RequestDispatcher::new(
        Arc::new(StallingHost),
        Arc::new(RuntimeConfig::new()),
    ))
}

#[tokio::test]
async fn expired_deadline_reports_processing_failed() {
    let response = dispatcher()
        .dispatch_with_timeout(Request::new("GetVersion").with_id("t1"), Duration::from_millis(25))
        .await;
    assert!(!response.is_success());
    assert_eq!(
        response.request_status.code,
        RequestStatus::RequestProcessingFailed.code()
    );
    assert_eq!(response.request_id.as_deref(), Some("t1"));
}

#[tokio::test]
async fn generous_deadline_lets_the_request_finish() {
    let response = dispatcher()
        .dispatch_with_timeout(Request::new("GetVersion"), Duration::from_secs(5))
        .await;
    assert!(response.is_success());
}

#[tokio::test]
async fn unclassified_host_failure_is_downgraded() {
    let response = dispatcher()
        .dispatch_with_timeout(
            Request::new("GetInputMute").with_field("inputName", serde_json::json!("Mic")),
            Duration::from_secs(5),
        )
        .await;
    // lookup happens before any host call that could stall
    assert_eq!(
        response.request_status.code,
        RequestStatus::ResourceNotFound.code()
    );
}
