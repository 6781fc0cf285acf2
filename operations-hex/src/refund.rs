//! Refund Request Builder.
//!
//! Turns a completed incoming transfer into the outbound transfer that
//! returns the funds: the original payee pays the original payer the same
//! amount in the same currency.

use operations_types::{
    ChannelTransferRequest, Extension, ExtensionList, Party, Transfer, TransferAmount,
};

use crate::requester::requester_comment;

/// Extension key under which the requester's comment travels.
pub const COMMENT_EXTENSION_KEY: &str = "comment";

/// Builds the channel request for refunding `transfer`.
///
/// An unparseable `request_body` only costs the comment extension; it is
/// logged and the refund request is still produced.
pub fn build_refund_request(request_body: &str, transfer: &Transfer) -> ChannelTransferRequest {
    let extension_list = match requester_comment(request_body) {
        Ok(comment) => comment.map(|value| ExtensionList {
            extension: vec![Extension {
                key: COMMENT_EXTENSION_KEY.to_string(),
                value,
            }],
        }),
        Err(e) => {
            tracing::error!(
                transaction_id = %transfer.transaction_id,
                error = %e,
                "Could not parse refund request body {}, can not set comment on refund!",
                request_body
            );
            None
        }
    };

    ChannelTransferRequest {
        payer: Party::new(&transfer.payee_party_id_type, &transfer.payee_party_id),
        payee: Party::new(&transfer.payer_party_id_type, &transfer.payer_party_id),
        amount: TransferAmount {
            amount: transfer.amount,
            currency: transfer.currency.clone(),
        },
        extension_list,
    }
}
