//! Update function for the forum task widget.
//!
//! Elm-style: receives the component state, the `Context` and a `Msg`,
//! mutates the state and returns whether the view should re-render.
//!
//! Every user action runs the matching controller operation on a spawned
//! local task. The operation's result comes back as a message:
//! `Msg::Synced` with the fresh snapshot, or `Msg::ActionFailed`. No local
//! state is changed before the server answers.

use yew::platform::spawn_local;
use yew::prelude::*;

use super::helpers::show_toast;
use super::messages::Msg;
use super::state::ForumTaskComponent;
use common::controller::ActionError;

pub fn update(component: &mut ForumTaskComponent, ctx: &Context<ForumTaskComponent>, msg: Msg) -> bool {
    match msg {
        Msg::Sync => {
            let controller = component.controller.clone();
            let link = ctx.link().clone();
            spawn_local(async move {
                match controller.sync().await {
                    Ok(snapshot) => link.send_message(Msg::Synced(snapshot)),
                    Err(err) => link.send_message(Msg::SyncFailed(err.to_string())),
                }
            });
            false
        }
        Msg::Synced(snapshot) => {
            component.snapshot = Some(snapshot);
            true
        }
        Msg::SyncFailed(err) => {
            // The view keeps showing the previous snapshot.
            gloo_console::error!(format!("forum task sync failed: {}", err));
            false
        }
        Msg::UpdateLink(link) => {
            component.link_input = link;
            component.error = None;
            true
        }
        Msg::SubmitLink => {
            let controller = component.controller.clone();
            let link = ctx.link().clone();
            let input = component.link_input.clone();
            spawn_local(async move {
                match controller.submit_link(&input).await {
                    Ok(snapshot) => {
                        link.send_message_batch(vec![
                            Msg::UpdateLink(String::new()),
                            Msg::Synced(snapshot),
                        ]);
                    }
                    Err(err) => link.send_message(Msg::ActionFailed(err)),
                }
            });
            false
        }
        Msg::ValidateSubmission(user_id) => {
            let controller = component.controller.clone();
            let link = ctx.link().clone();
            spawn_local(async move {
                match controller.validate_submission(user_id.as_deref()).await {
                    Ok(Some(snapshot)) => link.send_message(Msg::Synced(snapshot)),
                    Ok(None) => {}
                    Err(err) => link.send_message(Msg::ActionFailed(err)),
                }
            });
            false
        }
        Msg::ChangeCohort(cohort) => {
            let controller = component.controller.clone();
            let link = ctx.link().clone();
            spawn_local(async move {
                match controller.change_cohort(&cohort).await {
                    Ok(snapshot) => link.send_message(Msg::Synced(snapshot)),
                    Err(err) => link.send_message(Msg::ActionFailed(err)),
                }
            });
            false
        }
        Msg::ActionFailed(err) => {
            let Some(message) = err.user_message() else {
                gloo_console::error!(format!("forum task action failed: {}", err));
                return false;
            };
            if let ActionError::Rejected(_) = err {
                show_toast(&message);
            }
            component.error = Some(message);
            true
        }
    }
}
