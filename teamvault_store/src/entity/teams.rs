use sea_orm::entity::prelude::*;

/// Persisted team record.
///
/// `url` is matched by update and delete but deliberately not declared
/// unique; duplicate adds are the caller's problem, not a constraint
/// violation. `id` fixes the iteration order queries rely on.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "teams")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub generation: String,
    pub style: Option<String>,
    pub url: String,
    pub created_at: chrono::NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
