//! Postgres-backed registry source

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use super::source::{Alias, Entity, RegistryError, RegistrySource};

const DEFAULT_ENTITY_TABLE: &str = "companies";
const DEFAULT_ALIAS_TABLE: &str = "company_aliases";

#[derive(Debug, FromRow)]
struct EntityRow {
    ticker: String,
    name: String,
    official_name: Option<String>,
}

#[derive(Debug, FromRow)]
struct AliasRow {
    ticker: String,
    alias: String,
}

/// Reads entities and aliases from two Postgres tables
///
/// Expected columns: `ticker, name, official_name` on the entity table and
/// `ticker, alias` on the alias table.
#[derive(Debug, Clone)]
pub struct PgRegistrySource {
    pool: PgPool,
    entity_table: String,
    alias_table: String,
}

impl PgRegistrySource {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            entity_table: DEFAULT_ENTITY_TABLE.to_string(),
            alias_table: DEFAULT_ALIAS_TABLE.to_string(),
        }
    }

    /// Override the fully qualified table names (e.g. `"market".companies`)
    pub fn with_tables(mut self, entity_table: &str, alias_table: &str) -> Self {
        self.entity_table = entity_table.to_string();
        self.alias_table = alias_table.to_string();
        self
    }
}

#[async_trait]
impl RegistrySource for PgRegistrySource {
    async fn load_entities(&self) -> Result<Vec<Entity>, RegistryError> {
        let sql = format!(
            "SELECT ticker, name, official_name FROM {} ORDER BY ticker",
            self.entity_table
        );
        let rows = sqlx::query_as::<_, EntityRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| Entity {
                ticker: row.ticker,
                name: row.name,
                official_name: row.official_name,
            })
            .collect())
    }

    async fn load_aliases(&self) -> Result<Vec<Alias>, RegistryError> {
        let sql = format!(
            "SELECT ticker, alias FROM {} ORDER BY ticker, alias",
            self.alias_table
        );
        let rows = sqlx::query_as::<_, AliasRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| Alias {
                ticker: row.ticker,
                alias: row.alias,
            })
            .collect())
    }
}
