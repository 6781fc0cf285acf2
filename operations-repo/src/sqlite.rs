//! SQLite repository adapter.
#![allow(clippy::collapsible_if)]

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::{info, instrument};

use operations_types::{
    BusinessKey, BusinessKeyRepository, RepoError, Task, TaskRepository, TransactionRequest,
    TransactionRequestRepository, Transfer, TransferDirection, TransferRepository, Variable,
    VariableRepository, WorkflowInstanceKey,
};

use crate::types::{
    DbBusinessKey, DbTask, DbTransactionRequest, DbTransfer, DbVariable, db_err,
};

const TRANSFER_COLUMNS: &str = "workflow_instance_key, transaction_id, direction, status, \
     payer_party_id, payer_party_id_type, payee_party_id, payee_party_id_type, \
     amount, currency, started_at, completed_at";

const TRANSACTION_REQUEST_COLUMNS: &str = "workflow_instance_key, transaction_id, direction, \
     state, payer_party_id, payee_party_id, amount, currency, started_at, completed_at";

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Repository
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite repository implementation.
pub struct SqliteRepo {
    pool: SqlitePool,
}

impl SqliteRepo {
    /// Creates a new SQLite repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        Self::with_acquire_timeout(database_url, Duration::from_secs(5)).await
    }

    /// Like [`SqliteRepo::new`], bounding how long a query waits for a connection.
    pub async fn with_acquire_timeout(
        database_url: &str,
        acquire_timeout: Duration,
    ) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            // Remove query parameters
            let path = path.split('?').next().unwrap_or(path);
            if path != ":memory:" {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .acquire_timeout(acquire_timeout)
            .connect_with(options)
            .await?;

        let repo = Self { pool };
        repo.create_schema().await?;
        Ok(repo)
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Creates the database schema (for testing with existing pool).
    pub async fn create_schema(&self) -> Result<(), RepoError> {
        let ddl = include_str!("../migrations/0001_create_tables.sql");
        sqlx::raw_sql(ddl).execute(&self.pool).await.map_err(db_err)?;
        info!("SQLite Transfer Store schema ready");
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Store writes
    //
    // The exporter owns these tables in production; the operations service
    // never writes them. These are used to seed local databases and tests.
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn insert_transfer(&self, transfer: &Transfer) -> Result<(), RepoError> {
        sqlx::query(&format!(
            "INSERT INTO transfers ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            TRANSFER_COLUMNS
        ))
        .bind(transfer.workflow_instance_key)
        .bind(&transfer.transaction_id)
        .bind(transfer.direction.as_str())
        .bind(transfer.status.as_str())
        .bind(&transfer.payer_party_id)
        .bind(&transfer.payer_party_id_type)
        .bind(&transfer.payee_party_id)
        .bind(&transfer.payee_party_id_type)
        .bind(transfer.amount.to_string())
        .bind(&transfer.currency)
        .bind(transfer.started_at)
        .bind(transfer.completed_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    pub async fn insert_variable(&self, variable: &Variable) -> Result<(), RepoError> {
        sqlx::query(
            r#"INSERT INTO variables (workflow_instance_key, name, value, timestamp) VALUES (?, ?, ?, ?)"#,
        )
        .bind(variable.workflow_instance_key)
        .bind(&variable.name)
        .bind(&variable.value)
        .bind(variable.timestamp)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    pub async fn insert_task(&self, task: &Task) -> Result<(), RepoError> {
        sqlx::query(
            r#"INSERT INTO tasks (workflow_instance_key, element_id, task_type, intent, timestamp) VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(task.workflow_instance_key)
        .bind(&task.element_id)
        .bind(&task.task_type)
        .bind(&task.intent)
        .bind(task.timestamp)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    pub async fn insert_business_key(&self, key: &BusinessKey) -> Result<(), RepoError> {
        sqlx::query(
            r#"INSERT INTO business_keys (business_key, business_key_type, workflow_instance_key, timestamp) VALUES (?, ?, ?, ?)"#,
        )
        .bind(&key.business_key)
        .bind(&key.business_key_type)
        .bind(key.workflow_instance_key)
        .bind(key.timestamp)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    pub async fn insert_transaction_request(
        &self,
        request: &TransactionRequest,
    ) -> Result<(), RepoError> {
        sqlx::query(&format!(
            "INSERT INTO transaction_requests ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            TRANSACTION_REQUEST_COLUMNS
        ))
        .bind(request.workflow_instance_key)
        .bind(&request.transaction_id)
        .bind(request.direction.as_str())
        .bind(&request.state)
        .bind(&request.payer_party_id)
        .bind(&request.payee_party_id)
        .bind(request.amount.to_string())
        .bind(&request.currency)
        .bind(request.started_at)
        .bind(request.completed_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl TransferRepository for SqliteRepo {
    #[instrument(skip(self))]
    async fn find_transfer_by_transaction_id(
        &self,
        transaction_id: &str,
        direction: TransferDirection,
    ) -> Result<Option<Transfer>, RepoError> {
        let row: Option<DbTransfer> = sqlx::query_as(&format!(
            "SELECT {} FROM transfers WHERE transaction_id = ? AND direction = ? ORDER BY id LIMIT 1",
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
            "SELECT {} FROM transfers WHERE workflow_instance_key = ? ORDER BY id LIMIT 1",
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
impl VariableRepository for SqliteRepo {
    async fn find_variable(
        &self,
        key: WorkflowInstanceKey,
        name: &str,
    ) -> Result<Option<Variable>, RepoError> {
        let row: Option<DbVariable> = sqlx::query_as(
            r#"SELECT workflow_instance_key, name, value, timestamp FROM variables
               WHERE workflow_instance_key = ? AND name = ?
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
               WHERE workflow_instance_key = ? ORDER BY timestamp, id"#,
        )
        .bind(key)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(rows.into_iter().map(Variable::from).collect())
    }
}

#[async_trait]
impl TaskRepository for SqliteRepo {
    async fn list_tasks(&self, key: WorkflowInstanceKey) -> Result<Vec<Task>, RepoError> {
        let rows: Vec<DbTask> = sqlx::query_as(
            r#"SELECT workflow_instance_key, element_id, task_type, intent, timestamp FROM tasks
               WHERE workflow_instance_key = ? ORDER BY timestamp, id"#,
        )
        .bind(key)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(rows.into_iter().map(Task::from).collect())
    }
}

#[async_trait]
impl BusinessKeyRepository for SqliteRepo {
    async fn find_business_keys(
        &self,
        business_key: &str,
        business_key_type: &str,
    ) -> Result<Vec<BusinessKey>, RepoError> {
        let rows: Vec<DbBusinessKey> = sqlx::query_as(
            r#"SELECT business_key, business_key_type, workflow_instance_key, timestamp FROM business_keys
               WHERE business_key = ? AND business_key_type = ? ORDER BY timestamp, id"#,
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
impl TransactionRequestRepository for SqliteRepo {
    async fn find_transaction_request_by_workflow_instance_key(
        &self,
        key: WorkflowInstanceKey,
    ) -> Result<Option<TransactionRequest>, RepoError> {
        let row: Option<DbTransactionRequest> = sqlx::query_as(&format!(
            "SELECT {} FROM transaction_requests WHERE workflow_instance_key = ? ORDER BY id LIMIT 1",
            TRANSACTION_REQUEST_COLUMNS
        ))
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.map(DbTransactionRequest::into_domain).transpose()
    }
}
