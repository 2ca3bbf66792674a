//! Mount point of the widget.
//!
//! The host page addresses a widget instance as `?block=<id>&user=<id>`. On
//! first render the matching `WidgetContext` is fetched once and handed to
//! `ForumTaskComponent` as props.

use common::model::context::WidgetContext;
use yew::platform::spawn_local;
use yew::{html, Component, Context, Html};

use crate::api::fetch_context;
use crate::components::forum_task::ForumTaskComponent;

pub enum Msg {
    ContextLoaded(WidgetContext),
    ContextFailed(String),
}

pub struct App {
    context: Option<WidgetContext>,
    error: Option<String>,
    loaded: bool,
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            context: None,
            error: None,
            loaded: false,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::ContextLoaded(context) => {
                self.context = Some(context);
                self.error = None;
            }
            Msg::ContextFailed(error) => {
                gloo_console::error!(format!("forum task mount failed: {}", error));
                self.error = Some(error);
            }
        }
        true
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        match (&self.context, &self.error) {
            (Some(context), _) => html! {
                <ForumTaskComponent context={context.clone()} />
            },
            (None, Some(_)) => html! {
                <p class="forum-task-error">{"Não foi possível carregar a tarefa."}</p>
            },
            (None, None) => html! {
                <p class="forum-task-loading">{"A carregar..."}</p>
            },
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render && !self.loaded {
            self.loaded = true;

            let link = ctx.link().clone();
            match mount_params() {
                Some((block_id, user_id)) => spawn_local(async move {
                    match fetch_context(&block_id, &user_id).await {
                        Ok(context) => link.send_message(Msg::ContextLoaded(context)),
                        Err(err) => link.send_message(Msg::ContextFailed(err.to_string())),
                    }
                }),
                None => link.send_message(Msg::ContextFailed(
                    "missing block/user query parameters".to_string(),
                )),
            }
        }
    }
}

fn mount_params() -> Option<(String, String)> {
    let search = web_sys::window()?.location().search().ok()?;
    let params = web_sys::UrlSearchParams::new_with_str(&search).ok()?;
    Some((params.get("block")?, params.get("user")?))
}
