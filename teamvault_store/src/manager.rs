use anyhow::Context;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, Database, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder, Schema, Set,
};
use std::path::PathBuf;
use teamvault_core::{Roster, RosterCache, TeamRecord, TeamStore};
use tracing::info;

use crate::entity::{rosters, teams};

fn is_table_already_exists_error(err: &DbErr) -> bool {
    err.to_string().contains("table") && err.to_string().contains("already exists")
}

/// SQLite-backed store for team records and cached rosters.
///
/// Both collections are independent keyed tables; there is no
/// cross-operation transaction, matching the single-dispatcher model.
pub struct StoreManager {
    db: DatabaseConnection,
}

impl StoreManager {
    pub async fn new(db_path: PathBuf) -> anyhow::Result<Self> {
        let db_url = format!("sqlite:{}?mode=rwc", db_path.display());
        info!("Connecting to database: {}", db_url);
        Self::connect(&db_url).await
    }

    /// In-memory database, for tests.
    pub async fn open_in_memory() -> anyhow::Result<Self> {
        Self::connect("sqlite::memory:").await
    }

    async fn connect(db_url: &str) -> anyhow::Result<Self> {
        let db = Database::connect(db_url).await?;

        create_table(&db, teams::Entity).await?;
        create_table(&db, rosters::Entity).await?;

        info!("StoreManager initialized");
        Ok(Self { db })
    }
}

async fn create_table<E>(db: &DatabaseConnection, entity: E) -> anyhow::Result<()>
where
    E: EntityTrait,
{
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);
    let stmt = schema.create_table_from_entity(entity);
    match db.execute_unprepared(&builder.build(&stmt).to_string()).await {
        Ok(_) => Ok(()),
        Err(e) if is_table_already_exists_error(&e) => {
            info!("Table already exists, skipping creation");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn record_from_model(model: teams::Model) -> TeamRecord {
    TeamRecord {
        generation: model.generation,
        style: model.style,
        url: model.url,
    }
}

#[async_trait]
impl TeamStore for StoreManager {
    async fn add(&self, record: TeamRecord) -> anyhow::Result<()> {
        teams::ActiveModel {
            generation: Set(record.generation),
            style: Set(record.style),
            url: Set(record.url.clone()),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        info!("Added team record: {}", record.url);
        Ok(())
    }

    async fn find_all(&self) -> anyhow::Result<Vec<TeamRecord>> {
        let models = teams::Entity::find()
            .order_by_asc(teams::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(record_from_model).collect())
    }

    async fn update_style(&self, url: &str, style: &str) -> anyhow::Result<bool> {
        let result = teams::Entity::update_many()
            .col_expr(teams::Column::Style, Expr::value(style))
            .filter(teams::Column::Url.eq(url))
            .exec(&self.db)
            .await?;

        if result.rows_affected > 0 {
            info!("Updated style for {url}");
        }
        Ok(result.rows_affected > 0)
    }

    async fn delete_by_url(&self, url: &str) -> anyhow::Result<bool> {
        let result = teams::Entity::delete_many()
            .filter(teams::Column::Url.eq(url))
            .exec(&self.db)
            .await?;

        if result.rows_affected > 0 {
            info!("Deleted team record: {url}");
        }
        Ok(result.rows_affected > 0)
    }
}

#[async_trait]
impl RosterCache for StoreManager {
    async fn lookup(&self, url: &str) -> anyhow::Result<Option<Roster>> {
        let model = rosters::Entity::find_by_id(url.to_owned())
            .one(&self.db)
            .await?;

        model
            .map(|m| {
                serde_json::from_str(&m.roster)
                    .with_context(|| format!("corrupt cached roster for {url}"))
            })
            .transpose()
    }

    async fn store(&self, url: &str, roster: &Roster) -> anyhow::Result<()> {
        let encoded = serde_json::to_string(roster)?;
        let now = Utc::now().naive_utc();

        let exists = rosters::Entity::find_by_id(url.to_owned())
            .one(&self.db)
            .await?
            .is_some();

        if exists {
            rosters::Entity::update(rosters::ActiveModel {
                url: Set(url.to_owned()),
                roster: Set(encoded),
                resolved_at: Set(now),
            })
            .exec(&self.db)
            .await?;
        } else {
            rosters::ActiveModel {
                url: Set(url.to_owned()),
                roster: Set(encoded),
                resolved_at: Set(now),
            }
            .insert(&self.db)
            .await?;
        }

        Ok(())
    }

    async fn evict(&self, url: &str) -> anyhow::Result<bool> {
        let result = rosters::Entity::delete_by_id(url.to_owned())
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
