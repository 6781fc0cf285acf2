//! OperationsService unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::{DateTime, Duration, Utc};

    use operations_types::{
        AppError, BusinessKey, BusinessKeyRepository, ChannelConnector, ChannelResponse,
        ChannelTransferRequest, RepoError, StartProcessInstance, Task, TaskRepository,
        TransactionRequest, TransactionRequestRepository, Transfer, TransferDirection,
        TransferRepository, TransferStatus, UpstreamError, Variable, VariableRepository,
        WorkflowInstanceKey, WorkflowTrigger,
    };

    use crate::service::NOT_COMPENSABLE_MESSAGE;
    use crate::{OperationsService, RecallProcesses};

    const KEY: WorkflowInstanceKey = 2251799813685249;

    /// Simple in-memory read model for testing the service layer.
    #[derive(Default)]
    pub struct MockRepo {
        transfers: Mutex<Vec<Transfer>>,
        variables: Mutex<Vec<Variable>>,
        tasks: Mutex<Vec<Task>>,
        business_keys: Mutex<Vec<BusinessKey>>,
        transaction_requests: Mutex<Vec<TransactionRequest>>,
    }

    impl MockRepo {
        pub fn with_transfer(self, transfer: Transfer) -> Self {
            self.transfers.lock().unwrap().push(transfer);
            self
        }

        pub fn with_variable(self, key: WorkflowInstanceKey, name: &str, value: &str) -> Self {
            let at = base_time() + Duration::seconds(self.variables.lock().unwrap().len() as i64);
            self.variables.lock().unwrap().push(Variable {
                workflow_instance_key: key,
                name: name.to_string(),
                value: value.to_string(),
                timestamp: at,
            });
            self
        }

        pub fn with_task(self, key: WorkflowInstanceKey, element_id: &str) -> Self {
            let at = base_time() + Duration::seconds(self.tasks.lock().unwrap().len() as i64);
            self.tasks.lock().unwrap().push(Task {
                workflow_instance_key: key,
                element_id: element_id.to_string(),
                task_type: "serviceTask".to_string(),
                intent: "COMPLETED".to_string(),
                timestamp: at,
            });
            self
        }

        pub fn with_business_key(self, key: WorkflowInstanceKey, business_key: &str) -> Self {
            self.business_keys.lock().unwrap().push(BusinessKey {
                business_key: business_key.to_string(),
                business_key_type: "transactionId".to_string(),
                workflow_instance_key: key,
                timestamp: base_time(),
            });
            self
        }

        pub fn with_transaction_request(self, request: TransactionRequest) -> Self {
            self.transaction_requests.lock().unwrap().push(request);
            self
        }
    }

    #[async_trait]
    impl TransferRepository for MockRepo {
        async fn find_transfer_by_transaction_id(
            &self,
            transaction_id: &str,
            direction: TransferDirection,
        ) -> Result<Option<Transfer>, RepoError> {
            Ok(self
                .transfers
                .lock()
                .unwrap()
                .iter()
                .find(|t| t.transaction_id == transaction_id && t.direction == direction)
                .cloned())
        }

        async fn find_transfer_by_workflow_instance_key(
            &self,
            key: WorkflowInstanceKey,
        ) -> Result<Option<Transfer>, RepoError> {
            Ok(self
                .transfers
                .lock()
                .unwrap()
                .iter()
                .find(|t| t.workflow_instance_key == key)
                .cloned())
        }
    }

    #[async_trait]
    impl VariableRepository for MockRepo {
        async fn find_variable(
            &self,
            key: WorkflowInstanceKey,
            name: &str,
        ) -> Result<Option<Variable>, RepoError> {
            Ok(self
                .variables
                .lock()
                .unwrap()
                .iter()
                .filter(|v| v.workflow_instance_key == key && v.name == name)
                .max_by_key(|v| v.timestamp)
                .cloned())
        }

        async fn list_variables(
            &self,
            key: WorkflowInstanceKey,
        ) -> Result<Vec<Variable>, RepoError> {
            let mut variables: Vec<_> = self
                .variables
                .lock()
                .unwrap()
                .iter()
                .filter(|v| v.workflow_instance_key == key)
                .cloned()
                .collect();
            variables.sort_by_key(|v| v.timestamp);
            Ok(variables)
        }
    }

    #[async_trait]
    impl TaskRepository for MockRepo {
        async fn list_tasks(&self, key: WorkflowInstanceKey) -> Result<Vec<Task>, RepoError> {
            Ok(self
                .tasks
                .lock()
                .unwrap()
                .iter()
                .filter(|t| t.workflow_instance_key == key)
                .cloned()
                .collect())
        }
    }

    #[async_trait]
    impl BusinessKeyRepository for MockRepo {
        async fn find_business_keys(
            &self,
            business_key: &str,
            business_key_type: &str,
        ) -> Result<Vec<BusinessKey>, RepoError> {
            Ok(self
                .business_keys
                .lock()
                .unwrap()
                .iter()
                .filter(|k| {
                    k.business_key == business_key && k.business_key_type == business_key_type
                })
                .cloned()
                .collect())
        }
    }

    #[async_trait]
    impl TransactionRequestRepository for MockRepo {
        async fn find_transaction_request_by_workflow_instance_key(
            &self,
            key: WorkflowInstanceKey,
        ) -> Result<Option<TransactionRequest>, RepoError> {
            Ok(self
                .transaction_requests
                .lock()
                .unwrap()
                .iter()
                .find(|r| r.workflow_instance_key == key)
                .cloned())
        }
    }

    /// Channel connector that records submissions and answers with a canned response.
    pub struct RecordingChannel {
        pub submitted: Mutex<Vec<(String, ChannelTransferRequest)>>,
        answer: Result<ChannelResponse, String>,
    }

    impl RecordingChannel {
        pub fn answering(status: u16, body: &str) -> Arc<Self> {
            Arc::new(Self {
                submitted: Mutex::new(Vec::new()),
                answer: Ok(ChannelResponse {
                    status,
                    content_type: Some("application/json".to_string()),
                    body: body.to_string(),
                }),
            })
        }

        pub fn unreachable() -> Arc<Self> {
            Arc::new(Self {
                submitted: Mutex::new(Vec::new()),
                answer: Err("connection refused".to_string()),
            })
        }
    }

    #[async_trait]
    impl ChannelConnector for RecordingChannel {
        async fn submit_transfer(
            &self,
            tenant_id: &str,
            request: &ChannelTransferRequest,
        ) -> Result<ChannelResponse, UpstreamError> {
            self.submitted
                .lock()
                .unwrap()
                .push((tenant_id.to_string(), request.clone()));
            self.answer.clone().map_err(UpstreamError::Unavailable)
        }
    }

    /// Workflow trigger that records every start command.
    pub struct RecordingWorkflow {
        pub started: Mutex<Vec<StartProcessInstance>>,
        reject: bool,
    }

    impl RecordingWorkflow {
        pub fn accepting() -> Arc<Self> {
            Arc::new(Self {
                started: Mutex::new(Vec::new()),
                reject: false,
            })
        }

        pub fn rejecting() -> Arc<Self> {
            Arc::new(Self {
                started: Mutex::new(Vec::new()),
                reject: true,
            })
        }
    }

    #[async_trait]
    impl WorkflowTrigger for RecordingWorkflow {
        async fn start_process_instance(
            &self,
            command: StartProcessInstance,
        ) -> Result<(), UpstreamError> {
            self.started.lock().unwrap().push(command);
            if self.reject {
                return Err(UpstreamError::Rejected {
                    status: 404,
                    message: "NOT_FOUND: no such process definition".to_string(),
                });
            }
            Ok(())
        }
    }

    fn base_time() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-03-01T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn transfer(direction: TransferDirection, status: TransferStatus) -> Transfer {
        Transfer {
            transaction_id: "txn-1".to_string(),
            workflow_instance_key: KEY,
            direction,
            status,
            payer_party_id: "DE89370400440532013000".to_string(),
            payer_party_id_type: "IBAN".to_string(),
            payee_party_id: "4915112345678".to_string(),
            payee_party_id_type: "MSISDN".to_string(),
            amount: "10.50".parse().unwrap(),
            currency: "EUR".to_string(),
            started_at: base_time(),
            completed_at: Some(base_time() + Duration::seconds(3)),
        }
    }

    fn completed_incoming() -> Transfer {
        transfer(TransferDirection::Incoming, TransferStatus::Completed)
    }

    fn recall_repo(payment_scheme: &str) -> MockRepo {
        MockRepo::default()
            .with_transfer(completed_incoming())
            .with_variable(KEY, "paymentScheme", &format!("\"{}\"", payment_scheme))
            .with_variable(KEY, "iban", "\"DE02100100100006820101\"")
            .with_variable(KEY, "debtorIban", "\"DE89370400440532013000\"")
            .with_variable(KEY, "transactionGroupId", "\"group-7\"")
            .with_variable(KEY, "tenantIdentifier", "\"rhino\"")
            .with_variable(KEY, "transactionId", "\"e2e-0001\"")
            .with_variable(KEY, "generatedPacs008", r#""<Document>\n<FIToFICstmrCdtTrf/>\n</Document>""#)
            .with_variable(KEY, "generatedPacs008Fragment", "\"<CdtTrfTxInf/>\"")
            .with_variable(KEY, "fileMetadata", "\"file-42\"")
    }

    fn service(
        repo: MockRepo,
        channel: Arc<RecordingChannel>,
        workflow: Arc<RecordingWorkflow>,
    ) -> OperationsService<MockRepo> {
        OperationsService::new(repo, channel, workflow, RecallProcesses::default())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Refund
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_refund_sends_reversed_transfer() {
        let channel = RecordingChannel::answering(202, r#"{"transactionId":"refund-1"}"#);
        let service = service(
            MockRepo::default().with_transfer(completed_incoming()),
            channel.clone(),
            RecordingWorkflow::accepting(),
        );

        let response = service
            .refund("rhino", "txn-1", r#"{"comment":"duplicate payment"}"#)
            .await
            .unwrap();

        assert_eq!(response.status, 202);
        assert_eq!(response.body, r#"{"transactionId":"refund-1"}"#);

        let submitted = channel.submitted.lock().unwrap();
        assert_eq!(submitted.len(), 1);
        let (tenant, request) = &submitted[0];
        assert_eq!(tenant, "rhino");
        assert_eq!(request.payer.party_id_info.party_identifier, "4915112345678");
        assert_eq!(request.payer.party_id_info.party_id_type, "MSISDN");
        assert_eq!(request.payee.party_id_info.party_identifier, "DE89370400440532013000");
        assert_eq!(request.payee.party_id_info.party_id_type, "IBAN");
        assert_eq!(request.amount.amount.to_string(), "10.50");
        assert_eq!(request.amount.currency, "EUR");

        let extensions = &request.extension_list.as_ref().unwrap().extension;
        assert_eq!(extensions.len(), 1);
        assert_eq!(extensions[0].key, "comment");
        assert_eq!(extensions[0].value, "duplicate payment");
    }

    #[tokio::test]
    async fn test_refund_relays_connector_failure_status() {
        let channel = RecordingChannel::answering(500, r#"{"error":"boom"}"#);
        let service = service(
            MockRepo::default().with_transfer(completed_incoming()),
            channel,
            RecordingWorkflow::accepting(),
        );

        let response = service.refund("rhino", "txn-1", "").await.unwrap();

        assert_eq!(response.status, 500);
        assert_eq!(response.body, r#"{"error":"boom"}"#);
    }

    #[tokio::test]
    async fn test_refund_with_malformed_body_still_submits() {
        let channel = RecordingChannel::answering(200, "{}");
        let service = service(
            MockRepo::default().with_transfer(completed_incoming()),
            channel.clone(),
            RecordingWorkflow::accepting(),
        );

        service.refund("rhino", "txn-1", "not json").await.unwrap();

        let submitted = channel.submitted.lock().unwrap();
        assert_eq!(submitted.len(), 1);
        assert!(submitted[0].1.extension_list.is_none());
    }

    #[tokio::test]
    async fn test_refund_rejects_ineligible_transfers() {
        let cases = [
            MockRepo::default(),
            MockRepo::default().with_transfer(transfer(
                TransferDirection::Outgoing,
                TransferStatus::Completed,
            )),
            MockRepo::default().with_transfer(transfer(
                TransferDirection::Incoming,
                TransferStatus::InProgress,
            )),
            MockRepo::default().with_transfer(transfer(
                TransferDirection::Incoming,
                TransferStatus::Failed,
            )),
        ];

        for repo in cases {
            let channel = RecordingChannel::answering(200, "{}");
            let service = service(repo, channel.clone(), RecordingWorkflow::accepting());

            let result = service.refund("rhino", "txn-1", "{}").await;

            match result {
                Err(AppError::NotFound(msg)) => assert_eq!(msg, NOT_COMPENSABLE_MESSAGE),
                other => panic!("expected NotFound, got {:?}", other),
            }
            assert!(channel.submitted.lock().unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn test_refund_unreachable_connector() {
        let service = service(
            MockRepo::default().with_transfer(completed_incoming()),
            RecordingChannel::unreachable(),
            RecordingWorkflow::accepting(),
        );

        let result = service.refund("rhino", "txn-1", "{}").await;

        assert!(matches!(result, Err(AppError::UpstreamUnavailable(_))));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Recall
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_instant_recall_starts_instant_process() {
        let workflow = RecordingWorkflow::accepting();
        let service = service(
            recall_repo("HCT_INST"),
            RecordingChannel::answering(200, "{}"),
            workflow.clone(),
        );

        service
            .recall("rhino", "txn-1", r#"{"comment":"fraud suspected"}"#)
            .await
            .unwrap();

        let started = workflow.started.lock().unwrap();
        assert_eq!(started.len(), 1);
        let command = &started[0];
        assert_eq!(command.bpmn_process_id, "recall_instant");

        let vars = &command.variables;
        assert_eq!(vars["paymentScheme"], "HCT_INST:RECALL");
        assert_eq!(vars["iban"], "DE02100100100006820101");
        assert_eq!(vars["creditorIban"], "DE89370400440532013000");
        assert_eq!(vars["transactionGroupId"], "group-7");
        assert_eq!(vars["tenantIdentifier"], "rhino");
        assert_eq!(vars["internalCorrelationId"], "e2e-0001");
        assert_eq!(vars["originalPacs008TransactionIdentification"], "e2e-0001");
        assert_eq!(
            vars["originalPacs008"],
            "<Document>\n<FIToFICstmrCdtTrf/>\n</Document>"
        );
        assert_eq!(vars["recallReason"], "fraud suspected");
        assert_eq!(vars["recallAdditionalInformation"], "fraud suspected");
        assert!(!vars.contains_key("originalFileMetadata"));
    }

    #[tokio::test]
    async fn test_batch_recall_starts_batch_process() {
        let workflow = RecordingWorkflow::accepting();
        let service = service(
            recall_repo("IG2"),
            RecordingChannel::answering(200, "{}"),
            workflow.clone(),
        );

        service.recall("rhino", "txn-1", "{}").await.unwrap();

        let started = workflow.started.lock().unwrap();
        assert_eq!(started.len(), 1);
        let command = &started[0];
        assert_eq!(command.bpmn_process_id, "recall_batch");

        let vars = &command.variables;
        assert_eq!(vars["paymentScheme"], "IG2:RECALL");
        assert_eq!(vars["originalPacs008"], "<CdtTrfTxInf/>");
        assert_eq!(vars["originalFileMetadata"], "file-42");
        assert!(!vars.contains_key("recallReason"));
        assert!(!vars.contains_key("recallAdditionalInformation"));
    }

    #[tokio::test]
    async fn test_recall_scheme_match_ignores_case() {
        let workflow = RecordingWorkflow::accepting();
        let service = service(
            recall_repo("hct_inst"),
            RecordingChannel::answering(200, "{}"),
            workflow.clone(),
        );

        service.recall("rhino", "txn-1", "{}").await.unwrap();

        assert_eq!(
            workflow.started.lock().unwrap()[0].bpmn_process_id,
            "recall_instant"
        );
    }

    #[tokio::test]
    async fn test_recall_missing_variables_become_empty() {
        let workflow = RecordingWorkflow::accepting();
        let service = service(
            MockRepo::default().with_transfer(completed_incoming()),
            RecordingChannel::answering(200, "{}"),
            workflow.clone(),
        );

        service.recall("rhino", "txn-1", "{}").await.unwrap();

        let started = workflow.started.lock().unwrap();
        let command = &started[0];
        // No paymentScheme recorded: treated as batch
        assert_eq!(command.bpmn_process_id, "recall_batch");
        assert_eq!(command.variables["iban"], "");
        assert_eq!(command.variables["originalFileMetadata"], "");
    }

    #[tokio::test]
    async fn test_recall_uses_latest_variable_value() {
        let workflow = RecordingWorkflow::accepting();
        let repo = recall_repo("HCT_INST").with_variable(KEY, "iban", "\"DE75512108001245126199\"");
        let service = service(repo, RecordingChannel::answering(200, "{}"), workflow.clone());

        service.recall("rhino", "txn-1", "{}").await.unwrap();

        assert_eq!(
            workflow.started.lock().unwrap()[0].variables["iban"],
            "DE75512108001245126199"
        );
    }

    #[tokio::test]
    async fn test_recall_with_malformed_body_still_starts_once() {
        let workflow = RecordingWorkflow::accepting();
        let service = service(
            recall_repo("HCT_INST"),
            RecordingChannel::answering(200, "{}"),
            workflow.clone(),
        );

        service.recall("rhino", "txn-1", "{comment: oops").await.unwrap();

        let started = workflow.started.lock().unwrap();
        assert_eq!(started.len(), 1);
        assert!(!started[0].variables.contains_key("recallReason"));
        assert!(!started[0].variables.contains_key("recallAdditionalInformation"));
    }

    #[tokio::test]
    async fn test_recall_forwards_escaped_values_intact() {
        let metadata = r#"{"name":"say \"hi\"","path":"C:\\new"}"#;
        let stored = serde_json::to_string(metadata).unwrap();
        let workflow = RecordingWorkflow::accepting();
        let repo = recall_repo("IG2").with_variable(KEY, "fileMetadata", &stored);
        let service = service(repo, RecordingChannel::answering(200, "{}"), workflow.clone());

        service.recall("rhino", "txn-1", "{}").await.unwrap();

        let started = workflow.started.lock().unwrap();
        let forwarded = started[0].variables["originalFileMetadata"].as_str().unwrap();
        assert_eq!(forwarded, metadata);
        let parsed: serde_json::Value = serde_json::from_str(forwarded).unwrap();
        assert_eq!(parsed["path"], r"C:\new");
    }

    #[tokio::test]
    async fn test_recall_uses_transfer_tenant_over_requesting_tenant() {
        let workflow = RecordingWorkflow::accepting();
        let service = service(
            recall_repo("HCT_INST"),
            RecordingChannel::answering(200, "{}"),
            workflow.clone(),
        );

        service.recall("gorilla", "txn-1", "{}").await.unwrap();

        assert_eq!(
            workflow.started.lock().unwrap()[0].variables["tenantIdentifier"],
            "rhino"
        );
    }

    #[tokio::test]
    async fn test_recall_of_ineligible_transfer_starts_nothing() {
        let workflow = RecordingWorkflow::accepting();
        let repo = MockRepo::default().with_transfer(transfer(
            TransferDirection::Incoming,
            TransferStatus::Pending,
        ));
        let service = service(repo, RecordingChannel::answering(200, "{}"), workflow.clone());

        let result = service.recall("rhino", "txn-1", "{}").await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert!(workflow.started.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_recall_rejection_is_reported_once() {
        let workflow = RecordingWorkflow::rejecting();
        let service = service(
            recall_repo("HCT_INST"),
            RecordingChannel::answering(200, "{}"),
            workflow.clone(),
        );

        let result = service.recall("rhino", "txn-1", "{}").await;

        assert!(matches!(
            result,
            Err(AppError::UpstreamRejected { status: 404, .. })
        ));
        assert_eq!(workflow.started.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_recall_with_custom_process_ids() {
        let workflow = RecordingWorkflow::accepting();
        let service = OperationsService::new(
            recall_repo("IG2"),
            RecordingChannel::answering(200, "{}"),
            workflow.clone(),
            RecallProcesses {
                instant: "inst_v2".to_string(),
                batch: "batch_v2".to_string(),
            },
        );

        service.recall("rhino", "txn-1", "{}").await.unwrap();

        assert_eq!(workflow.started.lock().unwrap()[0].bpmn_process_id, "batch_v2");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Read views
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_transfer_detail_orders_trace_and_unescapes() {
        let repo = MockRepo::default()
            .with_transfer(completed_incoming())
            .with_task(KEY, "validate")
            .with_task(KEY, "book")
            .with_variable(KEY, "debtorIban", "\"DE89370400440532013000\"")
            .with_variable(KEY + 1, "other", "\"x\"");
        let service = service(
            repo,
            RecordingChannel::answering(200, "{}"),
            RecordingWorkflow::accepting(),
        );

        let detail = service.transfer_detail(KEY).await.unwrap();

        assert_eq!(detail.transfer.transaction_id, "txn-1");
        let elements: Vec<_> = detail.tasks.iter().map(|t| t.element_id.as_str()).collect();
        assert_eq!(elements, ["validate", "book"]);
        assert_eq!(detail.variables.len(), 1);
        assert_eq!(detail.variables[0].value, "DE89370400440532013000");
    }

    #[tokio::test]
    async fn test_transfer_detail_not_found() {
        let service = service(
            MockRepo::default(),
            RecordingChannel::answering(200, "{}"),
            RecordingWorkflow::accepting(),
        );

        let result = service.transfer_detail(42).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_transaction_request_detail() {
        let repo = MockRepo::default()
            .with_transaction_request(TransactionRequest {
                workflow_instance_key: KEY,
                transaction_id: "txn-9".to_string(),
                direction: TransferDirection::Outgoing,
                state: "ACCEPTED".to_string(),
                payer_party_id: "payer".to_string(),
                payee_party_id: "payee".to_string(),
                amount: "1.00".parse().unwrap(),
                currency: "EUR".to_string(),
                started_at: base_time(),
                completed_at: None,
            })
            .with_task(KEY, "request");
        let service = service(
            repo,
            RecordingChannel::answering(200, "{}"),
            RecordingWorkflow::accepting(),
        );

        let detail = service.transaction_request_detail(KEY).await.unwrap();
        assert_eq!(detail.transaction_request.transaction_id, "txn-9");
        assert_eq!(detail.tasks.len(), 1);

        let missing = service.transaction_request_detail(KEY + 1).await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_variables_fan_out_by_business_key() {
        let repo = MockRepo::default()
            .with_business_key(KEY, "e2e-0001")
            .with_business_key(KEY + 1, "e2e-0001")
            .with_business_key(KEY + 2, "e2e-other")
            .with_variable(KEY, "a", "\"1\"")
            .with_variable(KEY + 1, "b", "\"2\"")
            .with_variable(KEY + 1, "c", "\"3\"");
        let service = service(
            repo,
            RecordingChannel::answering(200, "{}"),
            RecordingWorkflow::accepting(),
        );

        let groups = service
            .variables_by_business_key("e2e-0001", "transactionId")
            .await
            .unwrap();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].len(), 1);
        assert_eq!(groups[1].len(), 2);
        // Fan-out views return values as stored
        assert_eq!(groups[0][0].value, "\"1\"");
    }

    #[tokio::test]
    async fn test_tasks_fan_out_for_unknown_key_is_empty() {
        let service = service(
            MockRepo::default().with_task(KEY, "validate"),
            RecordingChannel::answering(200, "{}"),
            RecordingWorkflow::accepting(),
        );

        let groups = service
            .tasks_by_business_key("nope", "transactionId")
            .await
            .unwrap();

        assert!(groups.is_empty());
    }

    #[tokio::test]
    async fn test_tasks_fan_out_groups_per_instance() {
        let repo = MockRepo::default()
            .with_business_key(KEY, "e2e-0001")
            .with_business_key(KEY + 1, "e2e-0001")
            .with_task(KEY, "validate")
            .with_task(KEY, "book");
        let service = service(
            repo,
            RecordingChannel::answering(200, "{}"),
            RecordingWorkflow::accepting(),
        );

        let groups = service
            .tasks_by_business_key("e2e-0001", "transactionId")
            .await
            .unwrap();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].len(), 2);
        assert!(groups[1].is_empty());
    }
}
