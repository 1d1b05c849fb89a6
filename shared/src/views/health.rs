use serde::{Deserialize, Serialize};

use crate::model::{HealthResult, Model, RequestKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthView {
    pub query: String,
    pub can_submit: bool,
    pub analyzing: bool,
    pub result: Option<HealthResult>,
}

#[must_use]
pub fn view(model: &Model) -> HealthView {
    HealthView {
        query: model.health_query.clone(),
        can_submit: !model.health_query.trim().is_empty() && !model.is_loading(),
        analyzing: model.is_in_flight(RequestKind::HealthTriage),
        result: model.health_result.clone(),
    }
}
