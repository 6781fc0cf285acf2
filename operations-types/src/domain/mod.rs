//! Domain models for the operations service.

pub mod business_key;
pub mod recall;
pub mod task;
pub mod transaction_request;
pub mod transfer;
pub mod variable;

pub use business_key::BusinessKey;
pub use recall::{BatchRecallVars, InstantRecallVars, PaymentScheme, RecallCommon, RecallVariables};
pub use task::Task;
pub use transaction_request::TransactionRequest;
pub use transfer::{Transfer, TransferDirection, TransferStatus, WorkflowInstanceKey};
pub use variable::{Variable, decode_value, unescape_value};
