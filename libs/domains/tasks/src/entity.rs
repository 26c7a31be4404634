use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::{NotSet, Set};
use serde::{Deserialize, Serialize};

/// Sea-ORM entity for the `tasks` table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tasks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Text")]
    pub task: String,
    pub is_done: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// Conversion from Sea-ORM Model to domain Task
impl From<Model> for crate::models::Task {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            task: model.task,
            is_done: model.is_done,
        }
    }
}

// Conversion from request payload to an insertable ActiveModel; the id
// stays unset so the store assigns it
impl From<crate::models::TaskPayload> for ActiveModel {
    fn from(input: crate::models::TaskPayload) -> Self {
        ActiveModel {
            id: NotSet,
            task: Set(input.task),
            is_done: Set(input.is_done),
        }
    }
}
