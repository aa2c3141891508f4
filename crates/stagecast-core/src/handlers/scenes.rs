//! Scene requests.

use serde_json::json;

use stagecast_protocol::{Request, RequestStatus};

use crate::error::RequestError;
use crate::handlers::{response_data, HandlerContext, HandlerResult};
use crate::validation::Params;

pub fn get_scene_list(ctx: &HandlerContext, _request: &Request) -> HandlerResult {
    let scenes: Vec<_> = ctx
        .host
        .list_scenes()
        .into_iter()
        .enumerate()
        .map(|(index, scene)| {
            json!({
                "sceneName": scene.name,
                "sceneIndex": index,
            })
        })
        .collect();

    Ok(response_data(json!({ "scenes": scenes })))
}

pub fn create_scene(ctx: &HandlerContext, request: &Request) -> HandlerResult {
    let params = Params::new(&request.request_data);
    let scene_name = params.string("sceneName")?;

    if ctx.host.find_source(scene_name).is_some() {
        return Err(RequestError::with_comment(
            RequestStatus::ResourceAlreadyExists,
            "A source already exists by that scene name.",
        ));
    }

    ctx.host.create_scene(scene_name)?;
    Ok(None)
}

pub fn remove_scene(ctx: &HandlerContext, request: &Request) -> HandlerResult {
    let params = Params::new(&request.request_data);
    let scene = ctx.resolver().scene(params.string("sceneName")?)?;
    ctx.host.remove_scene(&scene)?;
    Ok(None)
}
