//! Resource resolution
//!
//! Looks up named domain objects through the host and translates "not found"
//! and "wrong kind" into the status taxonomy. Resolution happens fresh on
//! every request — handles are never cached, because the scene graph can be
//! mutated between calls.

use stagecast_protocol::RequestStatus;

use crate::error::RequestError;
use crate::host::{MediaHost, SceneItemRef, SourceCategory, SourceRef};

/// Per-call resolver over the host's scene graph.
#[derive(Clone, Copy)]
pub struct Resolver<'a> {
    host: &'a dyn MediaHost,
}

impl<'a> Resolver<'a> {
    pub fn new(host: &'a dyn MediaHost) -> Self {
        Resolver { host }
    }

    /// Any source by name.
    pub fn source(&self, name: &str) -> Result<SourceRef, RequestError> {
        self.host.find_source(name).ok_or_else(|| {
            RequestError::with_comment(
                RequestStatus::ResourceNotFound,
                format!("No source was found by the name `{name}`."),
            )
        })
    }

    /// A source that must be of category [`SourceCategory::Input`].
    pub fn input(&self, name: &str) -> Result<SourceRef, RequestError> {
        let source = self.source(name)?;
        if source.category != SourceCategory::Input {
            return Err(RequestError::with_comment(
                RequestStatus::InvalidResourceType,
                format!("The source `{name}` is not an input."),
            ));
        }
        Ok(source)
    }

    /// A true scene. Groups are scene-like but not scenes; requests that need
    /// a real scene get `NotAScene` for them.
    pub fn scene(&self, name: &str) -> Result<SourceRef, RequestError> {
        let source = self.source(name)?;
        match source.category {
            SourceCategory::Scene => Ok(source),
            SourceCategory::Group => Err(RequestError::with_comment(
                RequestStatus::NotAScene,
                format!("The source `{name}` is a group, not a scene."),
            )),
            _ => Err(RequestError::with_comment(
                RequestStatus::InvalidResourceType,
                format!("The source `{name}` is not a scene."),
            )),
        }
    }

    /// A scene item inside `scene`, addressed by numeric id.
    pub fn scene_item(&self, scene: &SourceRef, item_id: i64) -> Result<SceneItemRef, RequestError> {
        let items = self.host.scene_items(scene)?;
        items
            .into_iter()
            .find(|item| item.item_id == item_id)
            .ok_or_else(|| {
                RequestError::with_comment(
                    RequestStatus::ResourceNotFound,
                    format!(
                        "No scene item with id {item_id} was found in the scene `{}`.",
                        scene.name
                    ),
                )
            })
    }

    /// A scene item addressed by its source name.
    ///
    /// A source placed more than once in the same scene makes the name
    /// ambiguous; that is an error rather than an arbitrary pick. Use the
    /// numeric id to disambiguate.
    pub fn scene_item_by_name(
        &self,
        scene: &SourceRef,
        source_name: &str,
    ) -> Result<SceneItemRef, RequestError> {
        let items = self.host.scene_items(scene)?;
        let mut matches = items
            .into_iter()
            .filter(|item| item.source_name == source_name);

        let first = matches.next().ok_or_else(|| {
            RequestError::with_comment(
                RequestStatus::ResourceNotFound,
                format!(
                    "No scene item for the source `{source_name}` was found in the scene `{}`.",
                    scene.name
                ),
            )
        })?;

        if matches.next().is_some() {
            return Err(RequestError::with_comment(
                RequestStatus::InvalidRequestField,
                format!(
                    "The source `{source_name}` appears more than once in the scene `{}`; \
                     address the item by its id instead.",
                    scene.name
                ),
            ));
        }

        Ok(first)
    }
}
