//! Diesel model for CRM managers.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::schema::managers;

#[derive(Debug, Clone, PartialEq, Identifiable, Queryable, Serialize, Deserialize)]
#[diesel(table_name = managers)]
pub struct Manager {
    pub id: i32,
    pub hub_id: i32,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Insertable, Deserialize)]
#[diesel(table_name = managers)]
pub struct NewManager {
    pub hub_id: i32,
    pub name: String,
    pub email: String,
}

impl NewManager {
    #[must_use]
    pub fn new(hub_id: i32, name: &str, email: &str) -> Self {
        Self {
            hub_id,
            name: name.trim().to_string(),
            email: email.trim().to_lowercase(),
        }
    }
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = managers)]
pub struct UpdateManager {
    pub name: String,
}

crate::diesel_entity! {
    Manager {
        table: managers,
        primary_key: id => i32,
        new: NewManager,
        changes: UpdateManager,
    }
}
