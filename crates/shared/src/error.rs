use serde::{Deserialize, Serialize};

/// Error envelope the catalog service returns alongside non-2xx statuses.
///
/// Gateway rejections (bad key, quota) arrive as `{"fault": {...}}`, while
/// application errors use `{"status": "ERROR", "errors": [...]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceErrorBody {
    #[serde(default)]
    pub fault: Option<ServiceFault>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceFault {
    pub faultstring: String,
}

impl ServiceErrorBody {
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }

    pub fn message(&self) -> Option<String> {
        if let Some(fault) = &self.fault {
            return Some(fault.faultstring.clone());
        }
        if self.errors.is_empty() {
            None
        } else {
            Some(self.errors.join("; "))
        }
    }
}
