use async_trait::async_trait;
use lrma_cloud_utils::clients::WorkspaceApi;
use lrma_cloud_utils::error::{AppError, AppResult, ValidationError};
use lrma_cloud_utils::models::{
    EntityOperation, EntityUpsert, MethodConfig, MethodVersion, SubmissionRecord,
    SubmissionRequest, SubmissionResponse, Workspace,
};
use lrma_cloud_utils::services::ConfigService;
use lrma_cloud_utils::workflow::{SubmissionCtx, SubmissionFlow};
use serde_json::json;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// 内存版工作空间 API，记录所有写操作
#[derive(Default)]
struct FakeWorkspace {
    history: Vec<SubmissionRecord>,
    rejected: HashSet<String>,
    fail_listing: bool,
    fail_upsert: bool,
    created: Mutex<Vec<SubmissionRequest>>,
    upserts: Mutex<Vec<EntityUpsert>>,
    configs: Mutex<HashMap<String, MethodConfig>>,
}

impl FakeWorkspace {
    fn with_history(history: serde_json::Value) -> Self {
        Self {
            history: serde_json::from_value(history).unwrap(),
            ..Default::default()
        }
    }

    fn created(&self) -> Vec<SubmissionRequest> {
        self.created.lock().unwrap().clone()
    }

    fn upserts(&self) -> Vec<EntityUpsert> {
        self.upserts.lock().unwrap().clone()
    }
}

#[async_trait]
impl WorkspaceApi for FakeWorkspace {
    async fn list_submissions(&self, workspace: &Workspace) -> AppResult<Vec<SubmissionRecord>> {
        if self.fail_listing {
            return Err(AppError::bad_response(
                format!("{}/submissions", workspace.api_path()),
                403,
                "forbidden",
            ));
        }
        Ok(self.history.clone())
    }

    async fn create_submission(
        &self,
        _workspace: &Workspace,
        request: &SubmissionRequest,
    ) -> AppResult<SubmissionResponse> {
        if self.rejected.contains(&request.entity_name) {
            return Err(AppError::bad_response("submissions", 400, "entity has no bam"));
        }
        let mut created = self.created.lock().unwrap();
        created.push(request.clone());
        Ok(SubmissionResponse {
            submission_id: format!("sub-{}", created.len()),
        })
    }

    async fn upsert_entities(
        &self,
        _workspace: &Workspace,
        entities: &[EntityUpsert],
    ) -> AppResult<()> {
        if self.fail_upsert {
            return Err(AppError::bad_response("entities/batchUpsert", 500, "boom"));
        }
        self.upserts.lock().unwrap().extend_from_slice(entities);
        Ok(())
    }

    async fn get_method_config(
        &self,
        _workspace: &Workspace,
        _config_namespace: &str,
        config_name: &str,
    ) -> AppResult<MethodConfig> {
        self.configs
            .lock()
            .unwrap()
            .get(config_name)
            .cloned()
            .ok_or_else(|| AppError::bad_response("method_configs", 404, "not found"))
    }

    async fn update_method_config(
        &self,
        _workspace: &Workspace,
        config: &MethodConfig,
    ) -> AppResult<()> {
        self.configs
            .lock()
            .unwrap()
            .insert(config.name.clone(), config.clone());
        Ok(())
    }
}

fn history() -> serde_json::Value {
    json!([
        {
            "submissionId": "s-1",
            "methodConfigurationName": "PBFlowcell",
            "methodConfigurationNamespace": "lrma",
            "submissionEntity": {"entityType": "sample", "entityName": "A"},
            "status": "Done",
            "workflowStatuses": {"Succeeded": 1}
        },
        {
            "submissionId": "s-2",
            "methodConfigurationName": "PBFlowcell",
            "methodConfigurationNamespace": "lrma",
            "submissionEntity": {"entityType": "sample", "entityName": "B"},
            "status": "Submitted",
            "workflowStatuses": {"Failed": 1}
        },
        {
            "submissionId": "s-3",
            "methodConfigurationName": "PBFlowcell",
            "methodConfigurationNamespace": "lrma",
            "submissionEntity": {"entityType": "sample", "entityName": "D"},
            "status": "Submitted",
            "workflowStatuses": {"Running": 1}
        }
    ])
}

fn ctx() -> SubmissionCtx {
    SubmissionCtx::new(Workspace::new("lrma", "LRMA-PacBio"), "PBFlowcell", "sample", true)
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn submits_unseen_and_failed_entities() {
    let api = Arc::new(FakeWorkspace::with_history(history()));
    let flow = SubmissionFlow::new(api.clone());

    let report = flow
        .verify_before_submit(&ctx(), &names(&["A", "B", "C", "D"]))
        .await
        .unwrap();

    assert!(report.is_success());
    assert!(report.batch.is_none());
    let submitted: Vec<&str> = report.submitted.iter().map(|s| s.entity_name.as_str()).collect();
    assert_eq!(submitted, vec!["B", "C"]);

    let created = api.created();
    assert_eq!(created.len(), 2);
    assert!(created.iter().all(|r| r.method_configuration_namespace == "lrma"
        && r.method_configuration_name == "PBFlowcell"
        && r.entity_type == "sample"
        && r.expression.is_none()
        && r.use_call_cache));
}

#[tokio::test]
async fn rejected_submission_is_reported_and_others_continue() {
    let mut fake = FakeWorkspace::with_history(history());
    fake.rejected.insert("B".to_string());
    let api = Arc::new(fake);
    let flow = SubmissionFlow::new(api.clone());

    let report = flow
        .verify_before_submit(&ctx(), &names(&["B", "C"]))
        .await
        .unwrap();

    assert!(!report.is_success());
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].entity_name, "B");
    assert!(report.failed[0].reason.contains("400"));
    assert_eq!(report.submitted.len(), 1);
    assert_eq!(report.submitted[0].entity_name, "C");
    assert_eq!(report.submitted[0].submission_id, "sub-1");
}

#[tokio::test]
async fn listing_failure_stops_before_submitting() {
    let api = Arc::new(FakeWorkspace {
        fail_listing: true,
        ..Default::default()
    });
    let flow = SubmissionFlow::new(api.clone());

    let err = flow
        .verify_before_submit(&ctx(), &names(&["A"]))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(403));
    assert!(api.created().is_empty());
}

#[tokio::test]
async fn analyzable_entities_uses_workspace_history() {
    let api = Arc::new(FakeWorkspace::with_history(history()));
    let flow = SubmissionFlow::new(api);

    let eligible = flow
        .analyzable_entities(&ctx(), &names(&["A", "B", "C"]))
        .await
        .unwrap();
    assert_eq!(eligible, names(&["B", "C"]));
}

#[tokio::test]
async fn batch_submission_creates_one_set() {
    let api = Arc::new(FakeWorkspace::with_history(history()));
    let flow = SubmissionFlow::new(api.clone());

    let report = flow
        .verify_before_batch_submit(&ctx(), &names(&["A", "B", "C"]), "this.samples")
        .await
        .unwrap();

    let batch = report.batch.clone().unwrap();
    assert!(batch.set_name.starts_with("PBFlowcell_"));
    assert_eq!(batch.set_type, "sample_set");
    assert_eq!(batch.members, names(&["B", "C"]));

    let upserts = api.upserts();
    assert_eq!(upserts.len(), 1);
    assert_eq!(upserts[0].name, batch.set_name);
    let members: Vec<&str> = upserts[0]
        .operations
        .iter()
        .filter_map(|op| match op {
            EntityOperation::AddListMember { new_member, .. } => Some(new_member.entity_name.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(members, vec!["B", "C"]);

    let created = api.created();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].entity_type, "sample_set");
    assert_eq!(created[0].entity_name, batch.set_name);
    assert_eq!(created[0].expression.as_deref(), Some("this.samples"));
    assert_eq!(report.submitted.len(), 1);
}

#[tokio::test]
async fn batch_without_eligible_entities_does_nothing() {
    let api = Arc::new(FakeWorkspace::with_history(history()));
    let flow = SubmissionFlow::new(api.clone());

    let report = flow
        .verify_before_batch_submit(&ctx(), &names(&["A", "D"]), "this.samples")
        .await
        .unwrap();

    assert!(report.is_empty());
    assert!(report.batch.is_none());
    assert!(api.upserts().is_empty());
    assert!(api.created().is_empty());
}

#[tokio::test]
async fn batch_requires_expression() {
    let flow = SubmissionFlow::new(Arc::new(FakeWorkspace::default()));
    let err = flow
        .verify_before_batch_submit(&ctx(), &names(&["A"]), "  ")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Validation(ValidationError::EmptyField("expression"))
    ));
}

#[tokio::test]
async fn batch_set_creation_failure_is_an_error() {
    let api = Arc::new(FakeWorkspace {
        fail_upsert: true,
        ..Default::default()
    });
    let flow = SubmissionFlow::new(api.clone());

    let err = flow
        .verify_before_batch_submit(&ctx(), &names(&["A"]), "this.samples")
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert!(api.created().is_empty());
}

fn seeded_config_api() -> Arc<FakeWorkspace> {
    let config: MethodConfig = serde_json::from_value(json!({
        "name": "PBFlowcell",
        "namespace": "lrma",
        "inputs": {"PBFlowcell.bam": "this.bam"},
        "outputs": {"PBFlowcell.aligned_bam": "this.aligned_bam"},
        "rootEntityType": "flowcell",
        "methodRepoMethod": {
            "methodUri": "dockstore://github.com%2Fbroadinstitute%2Flong-read-pipelines%2FPBFlowcell/main",
            "methodVersion": "main",
            "sourceRepo": "dockstore"
        },
        "methodConfigVersion": 3,
        "deleted": false
    }))
    .unwrap();

    let api = FakeWorkspace::default();
    api.configs
        .lock()
        .unwrap()
        .insert(config.name.clone(), config);
    Arc::new(api)
}

#[tokio::test]
async fn update_inputs_merges_and_writes_back() {
    let api = seeded_config_api();
    let service = ConfigService::new(api.clone());
    let workspace = Workspace::new("lrma", "LRMA-PacBio");

    let updated = service
        .update_inputs(
            &workspace,
            "PBFlowcell",
            BTreeMap::from([(
                "PBFlowcell.gcs_out_root_dir".to_string(),
                "\"gs://lrma-out\"".to_string(),
            )]),
        )
        .await
        .unwrap();

    assert_eq!(updated.inputs.len(), 2);
    let stored = service.get_config(&workspace, "PBFlowcell").await.unwrap();
    assert_eq!(stored, updated);
}

#[tokio::test]
async fn change_version_and_root_entity_type() {
    let api = seeded_config_api();
    let service = ConfigService::new(api);
    let workspace = Workspace::new("lrma", "LRMA-PacBio");

    let updated = service
        .change_workflow_version(&workspace, "PBFlowcell", "3.1.0")
        .await
        .unwrap();
    assert_eq!(
        updated.method_repo_method.method_version,
        MethodVersion::Tag("3.1.0".to_string())
    );
    assert!(updated
        .method_repo_method
        .method_uri
        .as_deref()
        .unwrap()
        .ends_with("/3.1.0"));

    let updated = service
        .set_root_entity_type(&workspace, "PBFlowcell", "sample")
        .await
        .unwrap();
    assert_eq!(updated.root_entity_type.as_deref(), Some("sample"));
    assert_eq!(
        updated.method_repo_method.method_version,
        MethodVersion::Tag("3.1.0".to_string())
    );

    assert!(service
        .change_workflow_version(&workspace, "PBFlowcell", "")
        .await
        .is_err());
}

#[tokio::test]
async fn missing_config_propagates_api_error() {
    let service = ConfigService::new(Arc::new(FakeWorkspace::default()));
    let err = service
        .get_config(&Workspace::new("lrma", "LRMA-PacBio"), "Absent")
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(404));
}
