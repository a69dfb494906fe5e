use chrono::{DateTime, Utc};
use diesel::prelude::{Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::status::NotificationKind;
use crate::schema::notifications;

use super::check_not_blank;

#[derive(Queryable, Selectable, Insertable, Serialize, Debug, Clone)]
#[diesel(table_name = notifications, check_for_backend(diesel::pg::Pg))]
pub struct Notification{
    pub notification_id: Uuid,
    pub restaurant_id: Option<Uuid>,
    pub employee_id: Option<Uuid>,
    pub title: String,
    pub message: String,
    pub kind: String,
    pub read: bool,
    pub created_at: DateTime<Utc>
}

impl Notification {
    pub fn new(
        restaurant_id: Option<Uuid>,
        employee_id: Option<Uuid>,
        title: String,
        message: String,
        kind: NotificationKind
    ) -> Self {
        Notification{
            notification_id: Uuid::new_v4(),
            restaurant_id,
            employee_id,
            title,
            message,
            kind: kind.to_string(),
            read: false,
            created_at: Utc::now()
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct NewNotificationForm{
    pub title: String,
    pub message: String,
    #[serde(default = "default_kind", rename = "type")]
    pub kind: NotificationKind,
    pub employee_id: Option<Uuid>
}

fn default_kind() -> NotificationKind {
    NotificationKind::Info
}

impl NewNotificationForm {
    pub fn into_record(self, restaurant_id: Uuid) -> Result<Notification, String> {
        check_not_blank("title", &self.title)?;
        check_not_blank("message", &self.message)?;

        Ok(Notification::new(Some(restaurant_id), self.employee_id, self.title, self.message, self.kind))
    }
}
