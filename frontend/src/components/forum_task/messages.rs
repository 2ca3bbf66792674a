use common::controller::ActionError;
use common::model::snapshot::Snapshot;

#[derive(Clone)]
pub enum Msg {
    Sync,
    Synced(Snapshot),
    SyncFailed(String),
    UpdateLink(String),
    SubmitLink,
    ValidateSubmission(Option<String>),
    ChangeCohort(String),
    ActionFailed(ActionError),
}
