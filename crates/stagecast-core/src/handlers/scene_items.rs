//! Scene item requests.
//!
//! Items are addressed by numeric id except `GetSceneItemId`, which translates
//! a source name into an id and refuses ambiguous names outright.

use serde_json::json;

use stagecast_protocol::Request;

use crate::handlers::{response_data, HandlerContext, HandlerResult};
use crate::validation::Params;

pub fn get_scene_item_id(ctx: &HandlerContext, request: &Request) -> HandlerResult {
    let params = Params::new(&request.request_data);
    let resolver = ctx.resolver();
    let scene = resolver.scene(params.string("sceneName")?)?;
    let source_name = params.string("sourceName")?;

    let item = resolver.scene_item_by_name(&scene, source_name)?;
    Ok(response_data(json!({ "sceneItemId": item.item_id })))
}

pub fn get_scene_item_enabled(ctx: &HandlerContext, request: &Request) -> HandlerResult {
    let params = Params::new(&request.request_data);
    let resolver = ctx.resolver();
    let scene = resolver.scene(params.string("sceneName")?)?;
    let item_id = params.integer("sceneItemId", 0, i64::MAX)?;

    let item = resolver.scene_item(&scene, item_id)?;
    Ok(response_data(json!({ "sceneItemEnabled": item.enabled })))
}

pub fn set_scene_item_enabled(ctx: &HandlerContext, request: &Request) -> HandlerResult {
    let params = Params::new(&request.request_data);
    let resolver = ctx.resolver();
    let scene = resolver.scene(params.string("sceneName")?)?;
    let item_id = params.integer("sceneItemId", 0, i64::MAX)?;
    let enabled = params.boolean("sceneItemEnabled")?;

    // Existence check first so a bad id is a lookup error, not a write error.
    resolver.scene_item(&scene, item_id)?;
    ctx.host.set_scene_item_enabled(&scene, item_id, enabled)?;
    Ok(None)
}
