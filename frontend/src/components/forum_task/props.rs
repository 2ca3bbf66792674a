//! Defines the properties for the `ForumTaskComponent`.

use common::model::context::WidgetContext;
use yew::prelude::*;

/// Properties for the `ForumTaskComponent`.
#[derive(Properties, PartialEq, Clone)]
pub struct ForumTaskProps {
    /// Mount-time context supplied by the host page.
    ///
    /// Read once in `create` to build the controller; later changes to the
    /// prop are ignored, since every update goes through a sync.
    pub context: WidgetContext,
}
