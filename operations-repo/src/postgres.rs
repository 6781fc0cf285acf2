//! PostgreSQL repository adapter.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::{info, instrument};

use operations_types::{
    BusinessKey, BusinessKeyRepository, RepoError, Task, TaskRepository, TransactionRequest,
    TransactionRequestRepository, Transfer, TransferDirection, TransferRepository, Variable,
    VariableRepository, WorkflowInstanceKey,
};

use crate::types::{
    DbBusinessKey, DbTask, DbTransactionRequest, DbTransfer, DbVariable, db_err,
};

// NUMERIC is selected as text so the decimal keeps its stored scale.
const TRANSFER_COLUMNS: &str = "workflow_instance_key, transaction_id, direction, status, \
     payer_party_id, payer_party_id_type, payee_party_id, payee_party_id_type, \
     amount::TEXT AS amount, currency, started_at, completed_at";

const TRANSACTION_REQUEST_COLUMNS: &str = "workflow_instance_key, transaction_id, direction, \
     state, payer_party_id, payee_party_id, amount::TEXT AS amount, currency, started_at, \
     completed_at";

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL Repository
// ─────────────────────────────────────────────────────────────────────────────

/// PostgreSQL Transfer Store reader.
pub struct PostgresRepo {
    pool: PgPool,
}

/// Executes SQL statements from a migration file, splitting by semicolons.
async fn execute_migration(pool: &PgPool, sql: &str, name: &str) -> Result<(), anyhow::Error> {
    for statement in sql.split(';') {
        let stmt = statement.trim();
        if !stmt.is_empty() {
            sqlx::query(stmt)
                .execute(pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration {} failed: {}", name, e))?;
        }
    }
    info!(migration = name, "Applied Transfer Store migration");
    Ok(())
}

/// Runs all database migrations.
async fn run_migrations(pool: &PgPool) -> Result<(), anyhow::Error> {
    execute_migration(
        pool,
        include_str!("../migrations/0001_create_tables_pg.sql"),
        "0001",
    )
    .await
}

impl PostgresRepo {
    /// Creates a new PostgreSQL repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        Self::with_acquire_timeout(database_url, Duration::from_secs(5)).await
    }

    /// Like [`PostgresRepo::new`], bounding how long a query waits for a connection.
    pub async fn with_acquire_timeout(
        database_url: &str,
        acquire_timeout: Duration,
    ) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .acquire_timeout(acquire_timeout)
            .connect(database_url)
            .await?;
        run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates the database schema (for testing with existing pool).
    pub async fn create_schema(&self) -> Result<(), RepoError> {
        run_migrations(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl TransferRepository for PostgresRepo {
    #[instrument(skip(self))]
    async fn find_transfer_by_transaction_id(
        &self,
        transaction_id: &str,
        direction: TransferDirection,
    ) -> Result<Option<Transfer>, RepoError> {
        let row: Option<DbTransfer> = sqlx::query_as(&format!(
            "SELECT {} FROM transfers WHERE transaction_id = $1 AND direction = $2 ORDER BY id LIMIT 1",
            TRANSFER_COLUMNS
        ))
        .bind(transaction_id)
        .bind(direction.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.map(DbTransfer::into_domain).transpose()
    }

    async fn find_transfer_by_workflow_instance_key(
        &self,
        key: WorkflowInstanceKey,
    ) -> Result<Option<Transfer>, RepoError> {
        let row: Option<DbTransfer> = sqlx::query_as(&format!(
            "SELECT {} FROM transfers WHERE workflow_instance_key = $1 ORDER BY id LIMIT 1",
            TRANSFER_COLUMNS
        ))
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.map(DbTransfer::into_domain).transpose()
    }
}

#[async_trait]
impl VariableRepository for PostgresRepo {
    async fn find_variable(
        &self,
        key: WorkflowInstanceKey,
        name: &str,
    ) -> Result<Option<Variable>, RepoError> {
        let row: Option<DbVariable> = sqlx::query_as(
            r#"SELECT workflow_instance_key, name, value, timestamp FROM variables
               WHERE workflow_instance_key = $1 AND name = $2
               ORDER BY timestamp DESC, id DESC LIMIT 1"#,
        )
        .bind(key)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(row.map(Variable::from))
    }

    async fn list_variables(&self, key: WorkflowInstanceKey) -> Result<Vec<Variable>, RepoError> {
        let rows: Vec<DbVariable> = sqlx::query_as(
            r#"SELECT workflow_instance_key, name, value, timestamp FROM variables
               WHERE workflow_instance_key = $1 ORDER BY timestamp, id"#,
        )
        .bind(key)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(rows.into_iter().map(Variable::from).collect())
    }
}

#[async_trait]
impl TaskRepository for PostgresRepo {
    async fn list_tasks(&self, key: WorkflowInstanceKey) -> Result<Vec<Task>, RepoError> {
        let rows: Vec<DbTask> = sqlx::query_as(
            r#"SELECT workflow_instance_key, element_id, task_type, intent, timestamp FROM tasks
               WHERE workflow_instance_key = $1 ORDER BY timestamp, id"#,
        )
        .bind(key)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(rows.into_iter().map(Task::from).collect())
    }
}

#[async_trait]
impl BusinessKeyRepository for PostgresRepo {
    async fn find_business_keys(
        &self,
        business_key: &str,
        business_key_type: &str,
    ) -> Result<Vec<BusinessKey>, RepoError> {
        let rows: Vec<DbBusinessKey> = sqlx::query_as(
            r#"SELECT business_key, business_key_type, workflow_instance_key, timestamp FROM business_keys
               WHERE business_key = $1 AND business_key_type = $2 ORDER BY timestamp, id"#,
        )
        .bind(business_key)
        .bind(business_key_type)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(rows.into_iter().map(BusinessKey::from).collect())
    }
}

#[async_trait]
impl TransactionRequestRepository for PostgresRepo {
    async fn find_transaction_request_by_workflow_instance_key(
        &self,
        key: WorkflowInstanceKey,
    ) -> Result<Option<TransactionRequest>, RepoError> {
        let row: Option<DbTransactionRequest> = sqlx::query_as(&format!(
            "SELECT {} FROM transaction_requests WHERE workflow_instance_key = $1 ORDER BY id LIMIT 1",
            TRANSACTION_REQUEST_COLUMNS
        ))
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.map(DbTransactionRequest::into_domain).transpose()
    }
}
