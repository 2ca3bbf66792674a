pub mod forum_task;
