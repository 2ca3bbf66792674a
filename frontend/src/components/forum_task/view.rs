//! View rendering for the forum task widget.
//!
//! A pure function of the component state: the latest `Snapshot` decides the
//! sub-view through an exhaustive match on `RoleView`.
//!
//! - Learner: the prompt, then either the submission form (unsubmitted) or
//!   the submitted link, read-only.
//! - Staff: an optional cohort selector, the submissions table with a
//!   "Validar" button only on rows not yet validated, and the learners that
//!   have not submitted.
//!
//! All user-facing text is in Portuguese, like the host platform.

use common::model::snapshot::{Cohorting, LearnerView, RoleView, Snapshot, StaffView};
use common::model::submission::{LearnerSubmission, SubmissionRecord};
use yew::html::Scope;
use yew::prelude::*;

use super::helpers::{cohort_filter_id, content_id, link_input_id, validation_label};
use super::messages::Msg;
use super::state::ForumTaskComponent;
use crate::components::cohort_filter::CohortFilter;

pub fn view(component: &ForumTaskComponent, ctx: &Context<ForumTaskComponent>) -> Html {
    let link = ctx.link();
    let Some(snapshot) = &component.snapshot else {
        return html! { <div class="forum-task loading">{"A carregar..."}</div> };
    };

    html! {
        <div class="forum-task" id={content_id(&snapshot.xblock_id)}>
            { build_error(component) }
            {
                match &snapshot.view {
                    RoleView::Learner(learner) => build_learner_view(component, snapshot, learner, link),
                    RoleView::Staff(staff) => build_staff_view(snapshot, staff, link),
                }
            }
        </div>
    }
}

fn build_error(component: &ForumTaskComponent) -> Html {
    match &component.error {
        Some(message) => html! { <p class="forum-task-error" role="alert">{ message.clone() }</p> },
        None => html! {},
    }
}

fn build_learner_view(
    component: &ForumTaskComponent,
    snapshot: &Snapshot,
    learner: &LearnerView,
    link: &Scope<ForumTaskComponent>,
) -> Html {
    let body = match &learner.submission {
        LearnerSubmission::Unsubmitted => {
            let input_id = link_input_id(&snapshot.xblock_id);
            html! {
                <div class="forum-task-form">
                    <input
                        id={input_id}
                        type="url"
                        placeholder="https://forum.treetree2.school/..."
                        value={component.link_input.clone()}
                        oninput={link.callback(|e: InputEvent| {
                            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                            Msg::UpdateLink(input.value())
                        })}
                    />
                    <button id="submit_tarefa" onclick={link.callback(|_| Msg::SubmitLink)}>
                        {"Submeter"}
                    </button>
                </div>
            }
        }
        LearnerSubmission::Submitted { link: url } => submitted_link(url, false),
        LearnerSubmission::Validated { link: url } => submitted_link(url, true),
    };

    html! {
        <div class="forum-task-learner">
            <p class="forum-task-prompt">{ learner.prompt.clone() }</p>
            { body }
        </div>
    }
}

fn submitted_link(url: &str, validated: bool) -> Html {
    html! {
        <p class="forum-task-submitted">
            {"A tua submissão: "}
            <a href={url.to_string()} target="_blank" rel="noopener noreferrer">{ url.to_string() }</a>
            if validated {
                <span class="badge validated">{"validada"}</span>
            }
        </p>
    }
}

fn build_staff_view(
    snapshot: &Snapshot,
    staff: &StaffView,
    link: &Scope<ForumTaskComponent>,
) -> Html {
    let filter = match &snapshot.cohorting {
        Cohorting::Uncohorted => html! {},
        Cohorting::Cohorted { current, available } => html! {
            <CohortFilter
                id={cohort_filter_id(&snapshot.xblock_id)}
                cohorts={available.clone()}
                current={current.clone()}
                on_change={link.callback(Msg::ChangeCohort)}
            />
        },
    };

    html! {
        <div class="forum-task-staff">
            { filter }
            <table class="forum-task-submissions">
                <thead>
                    <tr>
                        <th>{"Aluno"}</th>
                        <th>{"Data"}</th>
                        <th>{"Link"}</th>
                        <th>{"Estado"}</th>
                    </tr>
                </thead>
                <tbody>
                    { for staff.submissions.iter().map(|record| build_submission_row(staff, record, link)) }
                </tbody>
            </table>
            { build_not_submitted(staff) }
        </div>
    }
}

fn build_submission_row(
    staff: &StaffView,
    record: &SubmissionRecord,
    link: &Scope<ForumTaskComponent>,
) -> Html {
    let action = if record.is_actionable() {
        let user_id = record.user_id.clone();
        html! {
            <button
                class="validate-button"
                onclick={link.callback(move |_| Msg::ValidateSubmission(Some(user_id.clone())))}
            >
                {"Validar"}
            </button>
        }
    } else {
        html! {}
    };

    html! {
        <tr key={record.user_id.clone()}>
            <td>{ staff.display_name(&record.user_id).to_string() }</td>
            <td>{ record.timestamp.clone() }</td>
            <td>
                <a href={record.link.clone()} target="_blank" rel="noopener noreferrer">{ record.link.clone() }</a>
            </td>
            <td>
                { validation_label(record) }
                { action }
            </td>
        </tr>
    }
}

fn build_not_submitted(staff: &StaffView) -> Html {
    if staff.not_submitted.is_empty() {
        return html! {};
    }
    html! {
        <div class="forum-task-missing">
            <h4>{ format!("Sem submissão ({})", staff.not_submitted.len()) }</h4>
            <ul>
                { for staff.not_submitted.iter().map(|user_id| html! {
                    <li key={user_id.clone()}>{ staff.display_name(user_id).to_string() }</li>
                }) }
            </ul>
        </div>
    }
}
