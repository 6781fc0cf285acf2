//! Database row types shared by the SQLite and PostgreSQL adapters.
//!
//! Amounts are always selected as text so that both backends hand back the
//! exact stored scale.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

use operations_types::{
    BusinessKey, DomainError, RepoError, Task, TransactionRequest, Transfer, Variable,
};

pub(crate) fn db_err(e: sqlx::Error) -> RepoError {
    RepoError::Database(e.to_string())
}

fn parse_amount(raw: &str) -> Result<Decimal, DomainError> {
    Decimal::from_str(raw.trim()).map_err(|_| DomainError::InvalidAmount(raw.to_string()))
}

/// Transfer row.
#[derive(FromRow)]
pub struct DbTransfer {
    pub workflow_instance_key: i64,
    pub transaction_id: String,
    pub direction: String,
    pub status: String,
    pub payer_party_id: String,
    pub payer_party_id_type: String,
    pub payee_party_id: String,
    pub payee_party_id_type: String,
    pub amount: String,
    pub currency: String,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl DbTransfer {
    pub fn into_domain(self) -> Result<Transfer, RepoError> {
        Ok(Transfer {
            transaction_id: self.transaction_id,
            workflow_instance_key: self.workflow_instance_key,
            direction: self.direction.parse()?,
            status: self.status.parse()?,
            payer_party_id: self.payer_party_id,
            payer_party_id_type: self.payer_party_id_type,
            payee_party_id: self.payee_party_id,
            payee_party_id_type: self.payee_party_id_type,
            amount: parse_amount(&self.amount)?,
            currency: self.currency,
            started_at: self.started_at,
            completed_at: self.completed_at,
        })
    }
}

/// Variable row.
#[derive(FromRow)]
pub struct DbVariable {
    pub workflow_instance_key: i64,
    pub name: String,
    pub value: String,
    pub timestamp: DateTime<Utc>,
}

impl From<DbVariable> for Variable {
    fn from(row: DbVariable) -> Self {
        Variable {
            workflow_instance_key: row.workflow_instance_key,
            name: row.name,
            value: row.value,
            timestamp: row.timestamp,
        }
    }
}

/// Task row.
#[derive(FromRow)]
pub struct DbTask {
    pub workflow_instance_key: i64,
    pub element_id: String,
    pub task_type: String,
    pub intent: String,
    pub timestamp: DateTime<Utc>,
}

impl From<DbTask> for Task {
    fn from(row: DbTask) -> Self {
        Task {
            workflow_instance_key: row.workflow_instance_key,
            element_id: row.element_id,
            task_type: row.task_type,
            intent: row.intent,
            timestamp: row.timestamp,
        }
    }
}

/// Business key row.
#[derive(FromRow)]
pub struct DbBusinessKey {
    pub business_key: String,
    pub business_key_type: String,
    pub workflow_instance_key: i64,
    pub timestamp: DateTime<Utc>,
}

impl From<DbBusinessKey> for BusinessKey {
    fn from(row: DbBusinessKey) -> Self {
        BusinessKey {
            business_key: row.business_key,
            business_key_type: row.business_key_type,
            workflow_instance_key: row.workflow_instance_key,
            timestamp: row.timestamp,
        }
    }
}

/// Transaction request row.
#[derive(FromRow)]
pub struct DbTransactionRequest {
    pub workflow_instance_key: i64,
    pub transaction_id: String,
    pub direction: String,
    pub state: String,
    pub payer_party_id: String,
    pub payee_party_id: String,
    pub amount: String,
    pub currency: String,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl DbTransactionRequest {
    pub fn into_domain(self) -> Result<TransactionRequest, RepoError> {
        Ok(TransactionRequest {
            workflow_instance_key: self.workflow_instance_key,
            transaction_id: self.transaction_id,
            direction: self.direction.parse()?,
            state: self.state,
            payer_party_id: self.payer_party_id,
            payee_party_id: self.payee_party_id,
            amount: parse_amount(&self.amount)?,
            currency: self.currency,
            started_at: self.started_at,
            completed_at: self.completed_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_keeps_scale() {
        assert_eq!(parse_amount("10.50").unwrap().to_string(), "10.50");
        assert_eq!(parse_amount("7").unwrap().to_string(), "7");
    }

    #[test]
    fn test_bad_amount_is_domain_error() {
        assert!(matches!(
            parse_amount("ten"),
            Err(DomainError::InvalidAmount(_))
        ));
    }
}
