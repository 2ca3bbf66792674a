//! Component state for the forum task widget.
//!
//! The component itself holds only what the view needs between renders: the
//! latest snapshot, the link being typed, and the inline error. Everything
//! else lives in the shared controller.

use std::rc::Rc;

use common::controller::ForumTaskController;
use common::model::context::WidgetContext;
use common::model::snapshot::Snapshot;

use crate::api::HttpApi;

pub struct ForumTaskComponent {
    /// Shared with every spawned action; operations take `&self`.
    pub controller: Rc<ForumTaskController<HttpApi>>,

    /// Last snapshot received. `None` until the first sync completes.
    pub snapshot: Option<Snapshot>,

    /// Current content of the link input (learner view).
    pub link_input: String,

    /// Inline error shown above the content, cleared on the next edit.
    pub error: Option<String>,

    /// Guard to avoid running the first-render sync more than once.
    pub loaded: bool,
}

impl ForumTaskComponent {
    pub fn new(context: &WidgetContext) -> Self {
        let api = HttpApi::new(&context.handler_base);
        Self {
            controller: Rc::new(ForumTaskController::new(api, context.clone())),
            snapshot: None,
            link_input: String::new(),
            error: None,
            loaded: false,
        }
    }
}
