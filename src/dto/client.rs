use serde::{Deserialize, Serialize};

/// Compact client row for list views, projected from
/// [`crate::models::client::Client`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientSummary {
    pub id: i32,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}
