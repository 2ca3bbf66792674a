//! Runtime configuration for the development host.
//!
//! Everything is read from `FORUM_TASK_*` environment variables with local
//! defaults, so `cargo run -p forum_task_backend` works out of the box.
//!
//! | Variable                    | Default              |
//! |-----------------------------|----------------------|
//! | `FORUM_TASK_HOST`           | `127.0.0.1`          |
//! | `FORUM_TASK_PORT`           | `8080`               |
//! | `FORUM_TASK_DB`             | `forum_task.sqlite`  |
//! | `FORUM_TASK_STATIC_DIR`     | `../frontend/dist`   |
//! | `FORUM_TASK_OPEN_BROWSER`   | `false`              |
//! | `FORUM_TASK_STAFF`          | empty, comma list    |
//! | `FORUM_TASK_ROSTER`         | empty, `user:Full Name:cohort;...` |
//! | `FORUM_TASK_COHORTED`       | `true`               |
//! | `FORUM_TASK_PROMPT`, `FORUM_TASK_WAITING_MSG`, `FORUM_TASK_COMPLETED_MSG` | Portuguese defaults |
//!
//! Staff membership and cohort assignment are taken as given here; the host
//! never derives them.

use std::collections::HashSet;

use common::model::context::{PromptMessages, Role};

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_path: String,
    pub static_dir: String,
    pub open_browser: bool,
    /// Seeded into the store at startup; handlers read it from there.
    pub roster: Vec<RosterEntry>,
    pub course: CourseSettings,
}

/// Course-level facts the platform would normally supply.
#[derive(Debug, Clone, Default)]
pub struct CourseSettings {
    pub staff: HashSet<String>,
    pub cohorted: bool,
    pub messages: PromptMessages,
}

impl CourseSettings {
    pub fn role_of(&self, user_id: &str) -> Role {
        if self.staff.contains(user_id) {
            Role::Staff
        } else {
            Role::Learner
        }
    }
}

/// An enrolled learner. An empty cohort means the learner is in none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub user_id: String,
    pub name: String,
    pub cohort: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let port = get("FORUM_TASK_PORT", "8080")
            .parse::<u16>()
            .map_err(|e| format!("FORUM_TASK_PORT inválida: {}", e))?;
        let open_browser = parse_bool("FORUM_TASK_OPEN_BROWSER", &get("FORUM_TASK_OPEN_BROWSER", "false"))?;
        let cohorted = parse_bool("FORUM_TASK_COHORTED", &get("FORUM_TASK_COHORTED", "true"))?;

        let staff = get("FORUM_TASK_STAFF", "")
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        let defaults = PromptMessages::default();
        let messages = PromptMessages {
            prompt: lookup("FORUM_TASK_PROMPT").unwrap_or(defaults.prompt),
            waiting: lookup("FORUM_TASK_WAITING_MSG").unwrap_or(defaults.waiting),
            completed: lookup("FORUM_TASK_COMPLETED_MSG").unwrap_or(defaults.completed),
        };

        Ok(Self {
            host: get("FORUM_TASK_HOST", "127.0.0.1"),
            port,
            db_path: get("FORUM_TASK_DB", "forum_task.sqlite"),
            static_dir: get("FORUM_TASK_STATIC_DIR", "../frontend/dist"),
            open_browser,
            roster: parse_roster(&get("FORUM_TASK_ROSTER", ""))?,
            course: CourseSettings {
                staff,
                cohorted,
                messages,
            },
        })
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        other => Err(format!("{} inválido: {}", key, other)),
    }
}

/// Parses `user:Full Name:cohort` entries separated by `;`. Name and cohort
/// may be left out.
pub fn parse_roster(value: &str) -> Result<Vec<RosterEntry>, String> {
    value
        .split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let mut parts = entry.splitn(3, ':').map(str::trim);
            let user_id = parts.next().unwrap_or_default();
            if user_id.is_empty() {
                return Err(format!("Entrada de turma sem utilizador: {}", entry));
            }
            Ok(RosterEntry {
                user_id: user_id.to_string(),
                name: parts.next().unwrap_or_default().to_string(),
                cohort: parts.next().unwrap_or_default().to_string(),
            })
        })
        .collect()
}
