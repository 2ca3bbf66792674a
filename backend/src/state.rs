//! Shared application state handed to every handler as `web::Data`.

use std::sync::Arc;

use crate::config::CourseSettings;
use crate::store::Store;

/// Clonable handle to the store and the course settings. Each Actix worker
/// gets its own clone; all clones share the same `Arc`s.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub course: Arc<CourseSettings>,
}

impl AppState {
    pub fn new(store: Store, course: CourseSettings) -> Self {
        Self {
            store: Arc::new(store),
            course: Arc::new(course),
        }
    }
}
