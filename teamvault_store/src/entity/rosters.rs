use sea_orm::entity::prelude::*;

/// Cached roster extraction for one source URL.
///
/// `roster` is the JSON-encoded slot list. Entries never expire; they are
/// replaced only by an explicit re-resolution.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "rosters")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub url: String,
    pub roster: String,
    pub resolved_at: chrono::NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
