use serde::{Deserialize, Serialize};

use super::Searchable;

/// Call-request status stays a free-form string on the wire. Known values:
/// "call pending", "call approve", "call request can cancel",
/// "call completed", "cancelled". Only a pending request can still change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallRequest {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub remark: String,
    #[serde(default)]
    pub call_request_date: String,
    #[serde(default)]
    pub status_updated_at: String,
}

impl CallRequest {
    pub fn is_pending(&self) -> bool {
        self.status.eq_ignore_ascii_case("call pending")
    }
}

impl Searchable for CallRequest {
    fn searchable_fields(&self) -> [&str; 3] {
        [&self.name, &self.phone, &self.note]
    }
}

/// Wire shape of `api_get_call_request.php`.
#[derive(Debug, Deserialize)]
pub struct CallRequestEnvelope {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Vec<CallRequest>,
}
