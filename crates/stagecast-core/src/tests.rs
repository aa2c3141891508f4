//! Unit tests for the engine building blocks
//!
//! Validation, conversion, and resolution are exercised directly here; the
//! full request surface is covered by the integration suites under `tests/`.

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use stagecast_protocol::{RequestData, RequestStatus};

    use crate::bridge::{
        json_object_to_settings, json_to_native, native_to_json, settings_to_json, NativeSettings,
        NativeValue,
    };
    use crate::config::RuntimeConfig;
    use crate::fakes::MemoryHost;
    use crate::host::MediaHost;
    use crate::resolver::Resolver;
    use crate::validation::Params;

    fn bag(value: Value) -> RequestData {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object literal"),
        }
    }

    // ------------------------------------------------------------------
    // Field validation
    // ------------------------------------------------------------------

    #[test]
    fn test_missing_required_field() {
        let data = bag(json!({}));
        let err = Params::new(&data).string("inputName").unwrap_err();
        assert_eq!(err.status, RequestStatus::MissingRequestField);
    }

    #[test]
    fn test_wrong_field_type() {
        let data = bag(json!({"inputName": 5}));
        let err = Params::new(&data).string("inputName").unwrap_err();
        assert_eq!(err.status, RequestStatus::InvalidRequestFieldType);
    }

    #[test]
    fn test_boolean_not_conflated_with_number() {
        let data = bag(json!({"volume": true}));
        let err = Params::new(&data).number("volume", 0.0, 1.0).unwrap_err();
        assert_eq!(err.status, RequestStatus::InvalidRequestFieldType);

        let data = bag(json!({"muted": 1}));
        let err = Params::new(&data).boolean("muted").unwrap_err();
        assert_eq!(err.status, RequestStatus::InvalidRequestFieldType);
    }

    #[test]
    fn test_number_bounds_inclusive() {
        let data = bag(json!({"v": 0.0}));
        assert_eq!(Params::new(&data).number("v", 0.0, 20.0).unwrap(), 0.0);

        let data = bag(json!({"v": 20.0}));
        assert_eq!(Params::new(&data).number("v", 0.0, 20.0).unwrap(), 20.0);

        let data = bag(json!({"v": 20.1}));
        let err = Params::new(&data).number("v", 0.0, 20.0).unwrap_err();
        assert_eq!(err.status, RequestStatus::RequestFieldOutOfRange);

        let data = bag(json!({"v": -0.1}));
        let err = Params::new(&data).number("v", 0.0, 20.0).unwrap_err();
        assert_eq!(err.status, RequestStatus::RequestFieldOutOfRange);
    }

    #[test]
    fn test_integer_bounds_one_unit_outside() {
        let data = bag(json!({"offset": -950}));
        assert_eq!(
            Params::new(&data).integer("offset", -950, 20_000).unwrap(),
            -950
        );

        let data = bag(json!({"offset": -951}));
        let err = Params::new(&data)
            .integer("offset", -950, 20_000)
            .unwrap_err();
        assert_eq!(err.status, RequestStatus::RequestFieldOutOfRange);

        let data = bag(json!({"offset": 20_001}));
        let err = Params::new(&data)
            .integer("offset", -950, 20_000)
            .unwrap_err();
        assert_eq!(err.status, RequestStatus::RequestFieldOutOfRange);
    }

    #[test]
    fn test_integer_rejects_fraction() {
        let data = bag(json!({"offset": 1.5}));
        let err = Params::new(&data).integer("offset", 0, 10).unwrap_err();
        assert_eq!(err.status, RequestStatus::InvalidRequestFieldType);
    }

    #[test]
    fn test_empty_string_rejected() {
        let data = bag(json!({"inputName": ""}));
        let err = Params::new(&data).string("inputName").unwrap_err();
        assert_eq!(err.status, RequestStatus::RequestFieldEmpty);
    }

    #[test]
    fn test_empty_object_policy() {
        let data = bag(json!({"inputSettings": {}}));
        let params = Params::new(&data);
        assert!(params.object("inputSettings", true).is_ok());
        let err = params.object("inputSettings", false).unwrap_err();
        assert_eq!(err.status, RequestStatus::RequestFieldEmpty);
    }

    #[test]
    fn test_optional_absent_is_not_an_error() {
        let data = bag(json!({}));
        let params = Params::new(&data);
        assert_eq!(params.optional_string("inputKind").unwrap(), None);
        assert_eq!(params.optional_boolean("overlay").unwrap(), None);
        assert_eq!(params.optional_number("v", 0.0, 1.0).unwrap(), None);
        assert_eq!(params.optional_object("settings", true).unwrap(), None);
    }

    #[test]
    fn test_optional_present_is_still_checked() {
        let data = bag(json!({"inputKind": 3}));
        let err = Params::new(&data)
            .optional_string("inputKind")
            .unwrap_err();
        assert_eq!(err.status, RequestStatus::InvalidRequestFieldType);
    }

    // ------------------------------------------------------------------
    // Native data bridge
    // ------------------------------------------------------------------

    #[test]
    fn test_json_native_roundtrip() {
        let values = [
            json!(null),
            json!(true),
            json!(false),
            json!(42),
            json!(-7),
            json!(2.5),
            json!("text"),
            json!([1, "two", false, null, [3]]),
            json!({"a": 1, "b": {"c": [true, 2.0]}, "d": null}),
        ];
        for value in values {
            let native = json_to_native(&value);
            assert_eq!(native_to_json(&native), value, "roundtrip for {value}");
        }
    }

    #[test]
    fn test_integer_float_distinction_preserved() {
        assert_eq!(json_to_native(&json!(5)), NativeValue::Int(5));
        assert_eq!(json_to_native(&json!(5.0)), NativeValue::Double(5.0));
        assert_eq!(json_to_native(&json!(true)), NativeValue::Bool(true));
        assert_ne!(json_to_native(&json!(1)), json_to_native(&json!(true)));
    }

    #[test]
    fn test_binary_serializes_to_null() {
        assert_eq!(
            native_to_json(&NativeValue::Binary(vec![1, 2, 3])),
            Value::Null
        );
        assert_eq!(native_to_json(&NativeValue::None), Value::Null);
    }

    #[test]
    fn test_non_finite_double_serializes_to_null() {
        assert_eq!(
            native_to_json(&NativeValue::Double(f64::INFINITY)),
            Value::Null
        );
    }

    #[test]
    fn test_settings_object_roundtrip() {
        let object = bag(json!({"device_id": "default", "rate": 48000, "gain": 0.5}));
        let settings = json_object_to_settings(&object);
        assert_eq!(
            settings_to_json(&settings, true),
            Value::Object(object.clone())
        );
        // no defaults registered, so nothing is suppressed
        assert_eq!(settings_to_json(&settings, false), Value::Object(object));
    }

    #[test]
    fn test_default_suppression() {
        let mut settings = NativeSettings::new();
        settings.set_default("rate", NativeValue::Int(44_100));
        settings.set_default("device_id", NativeValue::String("default".into()));

        // nothing explicitly set: no user-visible settings
        assert_eq!(settings_to_json(&settings, false), json!({}));
        // but the effective view includes the defaults
        assert_eq!(
            settings_to_json(&settings, true),
            json!({"rate": 44_100, "device_id": "default"})
        );

        // a value equal to its default must not leak as explicitly set
        settings.set("rate", NativeValue::Int(44_100));
        assert_eq!(settings_to_json(&settings, false), json!({}));

        settings.set("rate", NativeValue::Int(48_000));
        assert_eq!(settings_to_json(&settings, false), json!({"rate": 48_000}));
    }

    #[test]
    fn test_settings_overlay_and_reset() {
        let mut settings = NativeSettings::new();
        settings.set_default("a", NativeValue::Int(1));
        settings.set("a", NativeValue::Int(10));
        settings.set("b", NativeValue::Bool(true));

        let mut patch = NativeSettings::new();
        patch.set("b", NativeValue::Bool(false));
        settings.apply(&patch);
        assert_eq!(settings.get("a"), Some(&NativeValue::Int(10)));
        assert_eq!(settings.get("b"), Some(&NativeValue::Bool(false)));

        settings.reset_to(&patch);
        // user value of `a` cleared back to its default, `b` re-applied
        assert_eq!(settings.get("a"), Some(&NativeValue::Int(1)));
        assert_eq!(settings.user_value("a"), None);
        assert_eq!(settings.get("b"), Some(&NativeValue::Bool(false)));
    }

    // ------------------------------------------------------------------
    // Resource resolution
    // ------------------------------------------------------------------

    fn scene_graph() -> MemoryHost {
        let host = MemoryHost::new();
        host.register_kind("test_kind", NativeSettings::new());
        host.add_scene("Scene");
        host.add_group("Group");
        host.add_input("Mic", "test_kind");
        host
    }

    #[test]
    fn test_resolve_missing_source() {
        let host = scene_graph();
        let err = Resolver::new(&host).source("Nope").unwrap_err();
        assert_eq!(err.status, RequestStatus::ResourceNotFound);
    }

    #[test]
    fn test_resolve_input_rejects_scene() {
        let host = scene_graph();
        let err = Resolver::new(&host).input("Scene").unwrap_err();
        assert_eq!(err.status, RequestStatus::InvalidResourceType);
        assert!(Resolver::new(&host).input("Mic").is_ok());
    }

    #[test]
    fn test_resolve_scene_rejects_group_and_input() {
        let host = scene_graph();
        let err = Resolver::new(&host).scene("Group").unwrap_err();
        assert_eq!(err.status, RequestStatus::NotAScene);
        let err = Resolver::new(&host).scene("Mic").unwrap_err();
        assert_eq!(err.status, RequestStatus::InvalidResourceType);
    }

    #[test]
    fn test_resolve_scene_item_by_name_ambiguity() {
        let host = scene_graph();
        let first = host.place_in_scene("Scene", "Mic");
        let resolver = Resolver::new(&host);
        let scene = resolver.scene("Scene").unwrap();

        let item = resolver.scene_item_by_name(&scene, "Mic").unwrap();
        assert_eq!(item.item_id, first);

        // a second placement makes the name ambiguous
        let second = host.place_in_scene("Scene", "Mic");
        let err = resolver.scene_item_by_name(&scene, "Mic").unwrap_err();
        assert_eq!(err.status, RequestStatus::InvalidRequestField);

        // numeric ids stay unambiguous
        assert_eq!(resolver.scene_item(&scene, second).unwrap().item_id, second);
    }

    #[test]
    fn test_resolve_scene_item_missing() {
        let host = scene_graph();
        let resolver = Resolver::new(&host);
        let scene = resolver.scene("Scene").unwrap();
        let err = resolver.scene_item(&scene, 99).unwrap_err();
        assert_eq!(err.status, RequestStatus::ResourceNotFound);
    }

    // ------------------------------------------------------------------
    // Runtime config and fake host details
    // ------------------------------------------------------------------

    #[test]
    fn test_filename_formatting_roundtrip() {
        let config = RuntimeConfig::new();
        config.set_filename_formatting("%CCYY-%MM-%DD");
        assert_eq!(config.filename_formatting(), "%CCYY-%MM-%DD");
    }

    #[test]
    fn test_unversioned_kind_list() {
        let host = MemoryHost::new();
        host.register_kind("capture_device_v2", NativeSettings::new());
        host.register_kind("media_player", NativeSettings::new());
        assert_eq!(
            host.input_kinds(false),
            vec!["capture_device_v2".to_string(), "media_player".to_string()]
        );
        assert_eq!(
            host.input_kinds(true),
            vec!["capture_device".to_string(), "media_player".to_string()]
        );
    }
}
