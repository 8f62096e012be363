use serde::{Deserialize, Serialize};

use super::Searchable;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Astrologer {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub register_date: String,
    #[serde(default)]
    pub expertise: String,
    #[serde(default)]
    pub profile_image: Option<String>,
}

impl Searchable for Astrologer {
    fn searchable_fields(&self) -> [&str; 3] {
        [&self.name, &self.email, &self.expertise]
    }
}

/// Wire shape of `get_astrologer.php`.
#[derive(Debug, Deserialize)]
pub struct AstrologerEnvelope {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub total: i64,
    #[serde(default)]
    pub data: Vec<Astrologer>,
}
