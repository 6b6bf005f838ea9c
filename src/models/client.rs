//! Diesel model for CRM clients.

use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::schema::clients;

#[derive(Debug, Clone, PartialEq, Identifiable, Queryable, Serialize, Deserialize)]
#[diesel(table_name = clients)]
pub struct Client {
    pub id: i32,
    pub hub_id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Insertable, Validate, Deserialize)]
#[diesel(table_name = clients)]
/// Insertable form of [`Client`].
pub struct NewClient {
    #[validate(range(min = 1))]
    pub hub_id: i32,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,
}

impl NewClient {
    /// Trims every field, lower-cases the email and drops an empty phone.
    #[must_use]
    pub fn new(hub_id: i32, name: &str, email: &str, phone: Option<&str>) -> Self {
        Self {
            hub_id,
            name: name.trim().to_string(),
            email: email.trim().to_lowercase(),
            phone: phone.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = clients)]
/// Data used when updating [`Client`] records. `None` fields are left as is.
pub struct UpdateClient {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl Default for UpdateClient {
    fn default() -> Self {
        Self {
            name: None,
            email: None,
            phone: None,
            updated_at: Utc::now().naive_utc(),
        }
    }
}

impl UpdateClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.trim().to_string());
        self
    }

    pub fn email(mut self, email: &str) -> Self {
        self.email = Some(email.trim().to_lowercase());
        self
    }

    pub fn phone(mut self, phone: &str) -> Self {
        self.phone = Some(phone.trim().to_string());
        self
    }
}

crate::diesel_entity! {
    Client {
        table: clients,
        primary_key: id => i32,
        new: NewClient,
        changes: UpdateClient,
    }
}
