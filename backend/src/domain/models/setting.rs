use chrono::{DateTime, Utc};

pub const ADMIN_PIN_KEY: &str = "admin_pin";

#[derive(Debug, Clone, PartialEq)]
pub struct Setting {
    pub key: String,
    pub value: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
