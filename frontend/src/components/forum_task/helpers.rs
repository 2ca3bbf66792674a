//! Utility functions for the forum task widget.
//!
//! - **DOM ids**: every id is suffixed with the block id so several widget
//!   instances can live on the same page.
//! - **Labels**: small formatting helpers shared by the staff table.
//! - **User Feedback**: temporary "toast" notifications for server messages.

use common::model::submission::SubmissionRecord;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

pub fn content_id(xblock_id: &str) -> String {
    format!("forum_task_content_{}", xblock_id)
}

pub fn cohort_filter_id(xblock_id: &str) -> String {
    format!("turmas_filter_{}", xblock_id)
}

pub fn link_input_id(xblock_id: &str) -> String {
    format!("tarefa_link_{}", xblock_id)
}

/// Status cell text for a row of the staff table.
pub fn validation_label(record: &SubmissionRecord) -> String {
    match (record.validated, record.validated_by.as_deref()) {
        (false, _) => "Por validar".to_string(),
        (true, Some(by)) => format!("Validada por {}", by),
        (true, None) => "Validada".to_string(),
    }
}

/// Echoes a server rejection ("Apenas uma submissão por aluno.", "Submissão
/// já validada.") as a short-lived toast, in addition to the inline error.
///
/// The message is set as text, never as markup. The element removes itself
/// after three seconds.
pub fn show_toast(message: &str) {
    if let Some(window) = web_sys::window() {
        if let Some(document) = window.document() {
            if let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) {
                toast.set_text_content(Some(message));
                let html_toast: HtmlElement = toast.unchecked_into();
                let style = html_toast.style();
                style.set_property("position", "fixed").ok();
                style.set_property("bottom", "20px").ok();
                style.set_property("left", "50%").ok();
                style.set_property("transform", "translateX(-50%)").ok();
                style.set_property("background", "rgba(0, 0, 0, 0.8)").ok();
                style.set_property("color", "#fff").ok();
                style.set_property("padding", "10px 20px").ok();
                style.set_property("border-radius", "4px").ok();
                style.set_property("z-index", "10000").ok();

                if body.append_child(&html_toast).is_ok() {
                    wasm_bindgen_futures::spawn_local(async move {
                        gloo_timers::future::TimeoutFuture::new(3000).await;
                        if let Some(parent) = html_toast.parent_node() {
                            parent.remove_child(&html_toast).ok();
                        }
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(validated_by: Option<&str>) -> SubmissionRecord {
        SubmissionRecord {
            submission_id: "s1".to_string(),
            user_id: "u1".to_string(),
            timestamp: "02/02/2024 08:00:00".to_string(),
            link: "https://discord.com/x".to_string(),
            validated: validated_by.is_some(),
            validated_by: validated_by.map(str::to_string),
        }
    }

    #[test]
    fn ids_are_scoped_by_block() {
        assert_eq!(content_id("b7"), "forum_task_content_b7");
        assert_eq!(cohort_filter_id("b7"), "turmas_filter_b7");
        assert_eq!(link_input_id("b7"), "tarefa_link_b7");
    }

    #[test]
    fn label_names_the_validator() {
        assert_eq!(validation_label(&record(None)), "Por validar");
        assert_eq!(validation_label(&record(Some("prof"))), "Validada por prof");
    }
}
