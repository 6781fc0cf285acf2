//! Recall protocol variants and their workflow variable sets.

use serde::Serialize;
use serde_json::{Map, Value};

/// Clearing protocol family of a transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentScheme {
    /// Instant credit transfer (`HCT_INST`)
    Instant,
    /// Batch clearing through file exchange (everything else, e.g. `IG2`)
    Batch,
}

impl PaymentScheme {
    /// Discriminator value that selects the instant scheme.
    pub const INSTANT: &'static str = "HCT_INST";

    /// Classifies a stored scheme discriminator, ignoring ASCII case.
    ///
    /// Anything that is not the instant discriminator, including the empty
    /// string, is treated as batch.
    pub fn from_discriminator(discriminator: &str) -> Self {
        if discriminator.eq_ignore_ascii_case(Self::INSTANT) {
            PaymentScheme::Instant
        } else {
            PaymentScheme::Batch
        }
    }
}

/// Variables every recall workflow receives.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecallCommon {
    pub iban: String,
    /// The original debtor becomes the creditor of the recall.
    pub creditor_iban: String,
    pub transaction_group_id: String,
    pub internal_correlation_id: String,
    pub tenant_identifier: String,
    pub original_pacs008_transaction_identification: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recall_reason: Option<String>,
}

/// Variables of the instant-scheme recall workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstantRecallVars {
    #[serde(flatten)]
    pub common: RecallCommon,
    pub original_pacs008: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recall_additional_information: Option<String>,
}

/// Variables of the batch-scheme recall workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRecallVars {
    #[serde(flatten)]
    pub common: RecallCommon,
    pub original_pacs008: String,
    pub original_file_metadata: String,
}

/// Complete variable set for one recall, tagged by scheme marker.
///
/// Serialises to the flat map the workflow engine expects, with the marker
/// under `paymentScheme`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "paymentScheme")]
pub enum RecallVariables {
    #[serde(rename = "HCT_INST:RECALL")]
    Instant(InstantRecallVars),
    #[serde(rename = "IG2:RECALL")]
    Batch(BatchRecallVars),
}

impl RecallVariables {
    /// Flattens the variable set for the workflow trigger.
    pub fn to_variable_map(&self) -> Result<Map<String, Value>, serde_json::Error> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            other => Err(<serde_json::Error as serde::ser::Error>::custom(format!(
                "recall variables did not serialise to an object: {other}"
            ))),
        }
    }
}
