use chrono::{DateTime, Utc};
use diesel::prelude::{AsChangeset, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::status::SeatingStatus;
use crate::schema::{chairs, dining_tables};

use super::{check_enum, check_not_blank};

#[derive(Queryable, Selectable, Insertable, Serialize, Debug, Clone)]
#[diesel(table_name = dining_tables, check_for_backend(diesel::pg::Pg))]
pub struct DiningTable{
    pub table_id: Uuid,
    pub restaurant_id: Uuid,
    pub number: String,
    pub capacity: i32,
    pub section: String,
    pub status: String,
    pub waiter_assigned: Option<Uuid>,
    pub created_at: DateTime<Utc>
}

#[derive(Deserialize, Debug)]
pub struct NewTableForm{
    pub restaurant_id: Uuid,
    pub number: String,
    pub capacity: i32,
    #[serde(default)]
    pub section: String,
    #[serde(default = "default_seating_status")]
    pub status: SeatingStatus,
    pub waiter_assigned: Option<Uuid>
}

pub(crate) fn default_seating_status() -> SeatingStatus {
    SeatingStatus::Available
}

impl NewTableForm {
    pub fn into_record(self) -> Result<DiningTable, String> {
        check_not_blank("number", &self.number)?;
        if self.capacity <= 0 {
            return Err("capacity must be greater than zero".to_string());
        }

        Ok(DiningTable{
            table_id: Uuid::new_v4(),
            restaurant_id: self.restaurant_id,
            number: self.number,
            capacity: self.capacity,
            section: self.section,
            status: self.status.to_string(),
            waiter_assigned: self.waiter_assigned,
            created_at: Utc::now()
        })
    }
}

#[derive(Deserialize, AsChangeset, Debug)]
#[diesel(table_name = dining_tables)]
pub struct TableChanges{
    pub number: Option<String>,
    pub capacity: Option<i32>,
    pub section: Option<String>,
    pub status: Option<String>,
    pub waiter_assigned: Option<Uuid>
}

impl TableChanges {
    pub fn validate(&self) -> Result<(), String> {
        check_enum::<SeatingStatus>(&self.status)?;
        match self.capacity {
            Some(c) if c <= 0 => Err("capacity must be greater than zero".to_string()),
            _ => Ok(())
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct SeatingStatusForm{
    pub status: SeatingStatus
}

#[derive(Queryable, Selectable, Insertable, Serialize, Debug, Clone)]
#[diesel(table_name = chairs, check_for_backend(diesel::pg::Pg))]
pub struct Chair{
    pub chair_id: Uuid,
    pub table_id: Uuid,
    pub number: String,
    pub status: String,
    pub created_at: DateTime<Utc>
}

#[derive(Deserialize, Debug)]
pub struct NewChairForm{
    pub number: String,
    #[serde(default = "default_seating_status")]
    pub status: SeatingStatus
}

impl NewChairForm {
    pub fn into_record(self, table_id: Uuid) -> Result<Chair, String> {
        check_not_blank("number", &self.number)?;

        Ok(Chair{
            chair_id: Uuid::new_v4(),
            table_id,
            number: self.number,
            status: self.status.to_string(),
            created_at: Utc::now()
        })
    }
}
