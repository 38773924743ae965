use serde::Deserialize;
use validator::Validate;

use crate::services::incident_workflow::NewIncident;
use crate::utils::validation::validate_not_blank;

// Reporte de incidente
#[derive(Debug, Deserialize, Validate)]
pub struct ReportIncidentRequest {
    #[validate(length(min = 1, max = 50), custom = "validate_not_blank")]
    pub incident_type: String,

    #[validate(length(min = 1), custom = "validate_not_blank")]
    pub description: String,

    #[validate(length(max = 255))]
    pub location: Option<String>,
}

impl From<ReportIncidentRequest> for NewIncident {
    fn from(request: ReportIncidentRequest) -> Self {
        Self {
            incident_type: request.incident_type.trim().to_string(),
            description: request.description.trim().to_string(),
            location: request
                .location
                .map(|l| l.trim().to_string())
                .filter(|l| !l.is_empty()),
        }
    }
}
