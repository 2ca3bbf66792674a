//! Cohort ("turma") selector shown to staff on cohorted courses.
//!
//! Stateless: the selected value comes from the snapshot and every change is
//! reported through `on_change`, which triggers a cohort change and re-sync.

use web_sys::HtmlSelectElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct CohortFilterProps {
    pub id: String,
    /// Available cohorts; the empty name stands for "all learners".
    pub cohorts: Vec<String>,
    #[prop_or_default]
    pub current: Option<String>,
    pub on_change: Callback<String>,
}

pub struct CohortFilter;

impl Component for CohortFilter {
    type Message = ();
    type Properties = CohortFilterProps;

    fn create(_ctx: &Context<Self>) -> Self {
        CohortFilter
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let current = props.current.clone().unwrap_or_default();
        let on_change = props.on_change.clone();
        let onchange = Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            on_change.emit(select.value());
        });

        html! {
            <div class="cohort-filter">
                <label for={props.id.clone()}>{"Turma: "}</label>
                <select id={props.id.clone()} {onchange}>
                    { for props.cohorts.iter().map(|cohort| html! {
                        <option value={cohort.clone()} selected={*cohort == current}>
                            { cohort_label(cohort) }
                        </option>
                    }) }
                </select>
            </div>
        }
    }
}

fn cohort_label(cohort: &str) -> String {
    if cohort.is_empty() {
        "Todas".to_string()
    } else {
        cohort.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::cohort_label;

    #[test]
    fn empty_cohort_reads_as_all() {
        assert_eq!(cohort_label(""), "Todas");
        assert_eq!(cohort_label("T1"), "T1");
    }
}
