use std::sync::Arc;

use service::repository::EmployeeRepository;

/// Shared handler state.
#[derive(Clone)]
pub struct ServerState {
    pub employees: Arc<dyn EmployeeRepository>,
}
