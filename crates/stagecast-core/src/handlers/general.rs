//! General requests: version information and engine configuration.

use serde_json::json;

use stagecast_protocol::Request;

use crate::handlers::{response_data, HandlerContext, HandlerResult};
use crate::validation::Params;

/// Reports host and protocol versions plus every available request type.
pub fn get_version(ctx: &HandlerContext, _request: &Request) -> HandlerResult {
    let version = ctx.host.version();
    Ok(response_data(json!({
        "hostVersion": version.host_version,
        "protocolVersion": version.protocol_version,
        "availableRequests": ctx.request_names,
    })))
}

pub fn get_filename_formatting(ctx: &HandlerContext, _request: &Request) -> HandlerResult {
    Ok(response_data(json!({
        "filenameFormatting": ctx.config.filename_formatting(),
    })))
}

pub fn set_filename_formatting(ctx: &HandlerContext, request: &Request) -> HandlerResult {
    let params = Params::new(&request.request_data);
    let formatting = params.string("filenameFormatting")?;
    ctx.config.set_filename_formatting(formatting);
    Ok(None)
}
