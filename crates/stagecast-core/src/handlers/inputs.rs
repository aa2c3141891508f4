//! Input requests: lifecycle, settings, audio state, and property
//! introspection.
//!
//! Validation order follows one rule throughout: resolve the input first, then
//! validate the remaining fields, then touch the host. Errors short-circuit
//! before any effect is applied.

use serde_json::json;

use stagecast_protocol::{Request, RequestStatus};

use crate::bridge::{json_object_to_settings, settings_to_json};
use crate::error::RequestError;
use crate::handlers::{response_data, HandlerContext, HandlerResult};
use crate::host::{MonitorType, PropertyKind};
use crate::validation::Params;

/// Lowest decibel value reported to clients; a volume multiplier of zero is
/// clamped here instead of negative infinity.
const VOLUME_DB_FLOOR: f64 = -100.0;

fn mul_to_db(mul: f64) -> f64 {
    20.0 * mul.log10()
}

fn db_to_mul(db: f64) -> f64 {
    10f64.powf(db / 20.0)
}

/// Lists inputs, optionally filtered by kind.
pub fn get_input_list(ctx: &HandlerContext, request: &Request) -> HandlerResult {
    let params = Params::new(&request.request_data);
    let kind_filter = params.optional_string("inputKind")?;

    let inputs: Vec<_> = ctx
        .host
        .list_inputs()
        .into_iter()
        .filter(|input| kind_filter.map_or(true, |kind| input.kind == kind))
        .map(|input| {
            json!({
                "inputName": input.name,
                "inputKind": input.kind,
            })
        })
        .collect();

    Ok(response_data(json!({ "inputs": inputs })))
}

pub fn get_input_kind_list(ctx: &HandlerContext, request: &Request) -> HandlerResult {
    let params = Params::new(&request.request_data);
    let unversioned = params.optional_boolean("unversioned")?.unwrap_or(false);
    Ok(response_data(json!({
        "inputKinds": ctx.host.input_kinds(unversioned),
    })))
}

/// Creates an input and places it as a scene item in the destination scene.
pub fn create_input(ctx: &HandlerContext, request: &Request) -> HandlerResult {
    let params = Params::new(&request.request_data);
    let scene = ctx.resolver().scene(params.string("sceneName")?)?;
    let input_name = params.string("inputName")?;
    let input_kind = params.string("inputKind")?;

    if ctx.host.find_source(input_name).is_some() {
        return Err(RequestError::with_comment(
            RequestStatus::ResourceAlreadyExists,
            "A source already exists by that input name.",
        ));
    }

    if !ctx.host.input_kinds(false).iter().any(|k| k == input_kind) {
        return Err(RequestError::with_comment(
            RequestStatus::InvalidInputKind,
            "Your specified input kind is not supported by the host. Check that it is \
             properly versioned and that any necessary plugins are loaded.",
        ));
    }

    let settings = params
        .optional_object("inputSettings", true)?
        .map(json_object_to_settings);
    let enabled = params.optional_boolean("sceneItemEnabled")?.unwrap_or(true);

    let item_id = ctx
        .host
        .create_input(&scene, input_name, input_kind, settings, enabled)
        .map_err(|err| {
            RequestError::with_comment(
                RequestStatus::ResourceCreationFailed,
                format!("Creation of the input or scene item failed: {err}"),
            )
        })?;

    Ok(response_data(json!({ "sceneItemId": item_id })))
}

pub fn remove_input(ctx: &HandlerContext, request: &Request) -> HandlerResult {
    let params = Params::new(&request.request_data);
    let input = ctx.resolver().input(params.string("inputName")?)?;
    ctx.host.remove_source(&input)?;
    Ok(None)
}

pub fn set_input_name(ctx: &HandlerContext, request: &Request) -> HandlerResult {
    let params = Params::new(&request.request_data);
    let input = ctx.resolver().input(params.string("inputName")?)?;
    let new_name = params.string("newInputName")?;

    if ctx.host.find_source(new_name).is_some() {
        return Err(RequestError::with_comment(
            RequestStatus::ResourceAlreadyExists,
            "A source already exists by that new input name.",
        ));
    }

    ctx.host.rename_source(&input, new_name)?;
    Ok(None)
}

/// Reports a kind's registered default settings, defaults included.
pub fn get_input_default_settings(ctx: &HandlerContext, request: &Request) -> HandlerResult {
    let params = Params::new(&request.request_data);
    let input_kind = params.string("inputKind")?;

    let defaults = ctx
        .host
        .default_settings(input_kind)
        .ok_or_else(|| RequestError::new(RequestStatus::InvalidInputKind))?;

    Ok(response_data(json!({
        "defaultInputSettings": settings_to_json(&defaults, true),
    })))
}

/// Reports an input's explicitly set settings; untouched defaults are
/// suppressed so they never masquerade as user values.
pub fn get_input_settings(ctx: &HandlerContext, request: &Request) -> HandlerResult {
    let params = Params::new(&request.request_data);
    let input = ctx.resolver().input(params.string("inputName")?)?;
    let settings = ctx.host.source_settings(&input)?;

    Ok(response_data(json!({
        "inputSettings": settings_to_json(&settings, false),
        "inputKind": input.kind,
    })))
}

pub fn set_input_settings(ctx: &HandlerContext, request: &Request) -> HandlerResult {
    let params = Params::new(&request.request_data);
    let input = ctx.resolver().input(params.string("inputName")?)?;
    let settings = json_object_to_settings(params.object("inputSettings", true)?);
    let overlay = params.optional_boolean("overlay")?.unwrap_or(true);

    ctx.host.update_settings(&input, settings, overlay)?;
    Ok(None)
}

pub fn get_input_mute(ctx: &HandlerContext, request: &Request) -> HandlerResult {
    let params = Params::new(&request.request_data);
    let input = ctx.resolver().input(params.string("inputName")?)?;
    Ok(response_data(json!({
        "inputMuted": ctx.host.muted(&input)?,
    })))
}

pub fn set_input_mute(ctx: &HandlerContext, request: &Request) -> HandlerResult {
    let params = Params::new(&request.request_data);
    let input = ctx.resolver().input(params.string("inputName")?)?;
    let muted = params.boolean("inputMuted")?;
    ctx.host.set_muted(&input, muted)?;
    Ok(None)
}

/// Read-negate-write; last-writer-wins under concurrent mutation.
pub fn toggle_input_mute(ctx: &HandlerContext, request: &Request) -> HandlerResult {
    let params = Params::new(&request.request_data);
    let input = ctx.resolver().input(params.string("inputName")?)?;
    let muted = !ctx.host.muted(&input)?;
    ctx.host.set_muted(&input, muted)?;
    Ok(response_data(json!({ "inputMuted": muted })))
}

pub fn get_input_volume(ctx: &HandlerContext, request: &Request) -> HandlerResult {
    let params = Params::new(&request.request_data);
    let input = ctx.resolver().input(params.string("inputName")?)?;

    let mul = f64::from(ctx.host.volume_mul(&input)?);
    let mut db = mul_to_db(mul);
    if !db.is_finite() || db < VOLUME_DB_FLOOR {
        db = VOLUME_DB_FLOOR;
    }

    Ok(response_data(json!({
        "inputVolumeMul": mul,
        "inputVolumeDb": db,
    })))
}

/// Sets volume from exactly one of `inputVolumeMul` / `inputVolumeDb`.
pub fn set_input_volume(ctx: &HandlerContext, request: &Request) -> HandlerResult {
    let params = Params::new(&request.request_data);
    let input = ctx.resolver().input(params.string("inputName")?)?;

    let mul = params.optional_number("inputVolumeMul", 0.0, 20.0)?;
    let db = params.optional_number("inputVolumeDb", -100.0, 26.0)?;

    let volume_mul = match (mul, db) {
        (Some(_), Some(_)) => {
            return Err(RequestError::with_comment(
                RequestStatus::TooManyRequestFields,
                "You may only specify one volume field.",
            ));
        }
        (None, None) => {
            return Err(RequestError::with_comment(
                RequestStatus::MissingRequestField,
                "You must specify one volume field.",
            ));
        }
        (Some(mul), None) => mul,
        (None, Some(db)) => db_to_mul(db),
    };

    ctx.host.set_volume_mul(&input, volume_mul as f32)?;
    Ok(None)
}

pub fn get_input_audio_sync_offset(ctx: &HandlerContext, request: &Request) -> HandlerResult {
    let params = Params::new(&request.request_data);
    let input = ctx.resolver().input(params.string("inputName")?)?;
    // The host stores the offset in nanoseconds; the wire uses milliseconds.
    Ok(response_data(json!({
        "inputAudioSyncOffset": ctx.host.sync_offset_ns(&input)? / 1_000_000,
    })))
}

pub fn set_input_audio_sync_offset(ctx: &HandlerContext, request: &Request) -> HandlerResult {
    let params = Params::new(&request.request_data);
    let input = ctx.resolver().input(params.string("inputName")?)?;
    let offset_ms = params.integer("inputAudioSyncOffset", -950, 20_000)?;
    ctx.host.set_sync_offset_ns(&input, offset_ms * 1_000_000)?;
    Ok(None)
}

pub fn get_input_audio_monitor_type(ctx: &HandlerContext, request: &Request) -> HandlerResult {
    let params = Params::new(&request.request_data);
    let input = ctx.resolver().input(params.string("inputName")?)?;
    Ok(response_data(json!({
        "monitorType": ctx.host.monitor_type(&input)?.as_str(),
    })))
}

pub fn set_input_audio_monitor_type(ctx: &HandlerContext, request: &Request) -> HandlerResult {
    let params = Params::new(&request.request_data);
    let input = ctx.resolver().input(params.string("inputName")?)?;
    let monitor_type_string = params.string("monitorType")?;

    let monitor_type = MonitorType::parse(monitor_type_string).ok_or_else(|| {
        RequestError::with_comment(
            RequestStatus::InvalidRequestField,
            format!("Unknown monitor type: {monitor_type_string}"),
        )
    })?;

    ctx.host.set_monitor_type(&input, monitor_type)?;
    Ok(None)
}

pub fn get_input_properties_list_property_items(
    ctx: &HandlerContext,
    request: &Request,
) -> HandlerResult {
    let params = Params::new(&request.request_data);
    let input = ctx.resolver().input(params.string("inputName")?)?;
    let property_name = params.string("propertyName")?;

    let properties = ctx.host.properties(&input)?;
    let property = properties
        .iter()
        .find(|p| p.name == property_name)
        .ok_or_else(|| {
            RequestError::with_comment(
                RequestStatus::ResourceNotFound,
                "Unable to find a property by that name.",
            )
        })?;

    let items = match &property.kind {
        PropertyKind::List(items) => items,
        _ => {
            return Err(RequestError::with_comment(
                RequestStatus::InvalidResourceType,
                "The property found is not a list.",
            ));
        }
    };

    let property_items: Vec<_> = items
        .iter()
        .map(|item| {
            json!({
                "itemName": item.name,
                "itemEnabled": item.enabled,
                "itemValue": item.value,
            })
        })
        .collect();

    Ok(response_data(json!({ "propertyItems": property_items })))
}

pub fn press_input_properties_button(ctx: &HandlerContext, request: &Request) -> HandlerResult {
    let params = Params::new(&request.request_data);
    let input = ctx.resolver().input(params.string("inputName")?)?;
    let property_name = params.string("propertyName")?;

    let properties = ctx.host.properties(&input)?;
    let property = properties
        .iter()
        .find(|p| p.name == property_name)
        .ok_or_else(|| {
            RequestError::with_comment(
                RequestStatus::ResourceNotFound,
                "Unable to find a property by that name.",
            )
        })?;

    if !matches!(property.kind, PropertyKind::Button) {
        return Err(RequestError::with_comment(
            RequestStatus::InvalidResourceType,
            "The property found is not a button.",
        ));
    }
    if !property.enabled {
        return Err(RequestError::with_comment(
            RequestStatus::InvalidResourceState,
            "The property found is not enabled.",
        ));
    }

    ctx.host.press_property_button(&input, property_name)?;
    Ok(None)
}
