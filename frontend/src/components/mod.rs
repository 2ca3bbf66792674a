pub mod cohort_filter;
pub mod forum_task;
