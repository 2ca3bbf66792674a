//! Forum task widget: root module wiring the Yew `Component` implementation
//! with submodules for state, update logic, view rendering, and helpers.
//!
//! Responsibilities
//! - Re-export selected types (`Msg`, `ForumTaskProps`, `ForumTaskComponent`).
//! - Provide the `Component` implementation that delegates to `update::update` and `view::view`.
//! - On first render, trigger the initial sync so the first snapshot is drawn.

use yew::prelude::*;

mod helpers;
mod messages;
mod props;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::ForumTaskProps;
pub use state::ForumTaskComponent;

impl Component for ForumTaskComponent {
    type Message = Msg;
    type Properties = ForumTaskProps;

    fn create(ctx: &Context<Self>) -> Self {
        ForumTaskComponent::new(&ctx.props().context)
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render && !self.loaded {
            self.loaded = true;
            ctx.link().send_message(Msg::Sync);
        }
    }
}
