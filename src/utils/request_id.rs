use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

pub fn new_request_id() -> String {
    format!("req-{}", Uuid::new_v4())
}

/// Request id scoped to a scenario, e.g. `req-empty_notification_bad_request-<uuid>`.
pub fn scenario_request_id(scenario_name: &str) -> String {
    if scenario_name.is_empty() {
        return new_request_id();
    }
    format!("req-{}-{}", scenario_name, Uuid::new_v4())
}
