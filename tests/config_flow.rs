//! Integration tests for the configuration reducer: a full wizard run from an
//! empty document to a backend submission.

mod helpers;

use mapper::config::{CallRouting, ConfigAction, ConfigError, IntegrationConfig, CONFIG_VERSION};
use mapper::discover;
use mapper::mapping::{FieldMapping, Provenance};
use mapper::schema::CrmKind;

fn run(config: IntegrationConfig, actions: Vec<ConfigAction>) -> IntegrationConfig {
    actions
        .into_iter()
        .fold(config, |state, action| state.reduce(action).expect("action should apply"))
}

fn wizard() -> IntegrationConfig {
    let schema = Box::new(helpers::pipedrive_schema());
    run(
        IntegrationConfig::default(),
        vec![
            ConfigAction::Rename { name: "Dental inbound".into() },
            ConfigAction::ConnectAccounts {
                crm: CrmKind::Pipedrive,
                retell_account_id: Some("retell_1".into()),
                crm_account_id: Some("pd_1".into()),
            },
            ConfigAction::SelectAgent { agent_id: Some("agent_dental_inbound".into()) },
            ConfigAction::ReplaceDiscovered { fields: helpers::sample_catalog() },
            ConfigAction::GenerateMappings { schema, force: false },
        ],
    )
}

#[test]
fn wizard_run_produces_submission() {
    let config = wizard();
    assert_eq!(config.revision, 5);
    assert_eq!(config.mappings.len(), 16);

    let stage = config
        .mappings
        .iter()
        .position(|m| m.target_field == "deal.stage_id")
        .unwrap();
    let config = run(
        config,
        vec![
            ConfigAction::SetMappingLevel1 { index: stage, value: Some("10".into()) },
            ConfigAction::SetMappingLevel2 { index: stage, value: Some("3".into()) },
            ConfigAction::SetRouting {
                pipeline_id: Some("10".into()),
                stage_id: Some("1".into()),
                owner_id: Some("9001".into()),
            },
        ],
    );
    assert_eq!(config.mappings[stage].source, Provenance::Manual);
    assert!(config.is_ready());

    let submission = config.to_submission();
    assert_eq!(submission.version, CONFIG_VERSION);
    assert_eq!(submission.field_mappings.len(), 16);
    let staged = &submission.field_mappings[stage];
    assert_eq!(staged.crm_field, "deal.stage_id");
    assert_eq!(staged.crm_field_level1.as_deref(), Some("10"));
    assert_eq!(staged.crm_field_level2.as_deref(), Some("3"));
    assert_eq!(submission.routing.owner_id.as_deref(), Some("9001"));
}

#[test]
fn regenerating_without_force_keeps_edits() {
    let config = wizard();
    let mut edited = config.mappings[0].clone();
    edited.required = false;
    let config = config
        .reduce(ConfigAction::UpdateMapping { index: 0, mapping: edited })
        .unwrap();

    let schema = Box::new(helpers::pipedrive_schema());
    let again = config
        .reduce(ConfigAction::GenerateMappings { schema: schema.clone(), force: false })
        .unwrap();
    assert_eq!(again, config);

    let forced = config
        .reduce(ConfigAction::GenerateMappings { schema, force: true })
        .unwrap();
    assert!(forced.mappings[0].required);
    assert_eq!(forced.mappings[0].source, Provenance::Workflow);
}

#[test]
fn switching_crm_prunes_and_resets() {
    let config = run(
        wizard(),
        vec![ConfigAction::SetRouting {
            pipeline_id: Some("10".into()),
            stage_id: None,
            owner_id: None,
        }],
    );
    let switched = run(
        config,
        vec![
            ConfigAction::ConnectAccounts {
                crm: CrmKind::Hubspot,
                retell_account_id: Some("retell_1".into()),
                crm_account_id: Some("hs_1".into()),
            },
            ConfigAction::PruneStale { schema: Box::new(helpers::contacts_only_schema()) },
        ],
    );
    assert_eq!(switched.routing, CallRouting::default());
    assert!(switched.mappings.iter().all(|m| !m.target_field.starts_with("deal.")));
    assert!(switched.mappings.iter().any(|m| m.target_field == "person.phone"));
}

#[test]
fn rediscovery_for_new_agent() {
    let config = wizard();
    let switched = config
        .reduce(ConfigAction::SelectAgent { agent_id: Some("agent_outbound_followup".into()) })
        .unwrap();
    assert!(switched.discovered_fields.is_empty());
    assert_eq!(switched.mappings, config.mappings);

    let report = discover::discover_recent(&helpers::recent_events(), &Default::default());
    let refreshed = switched
        .reduce(ConfigAction::ReplaceDiscovered { fields: report.fields })
        .unwrap();
    assert!(refreshed.discovered_fields.iter().any(|f| f.id == "metadata.deal_id"));
}

#[test]
fn rejected_actions_leave_state_alone() {
    let config = wizard();
    let len = config.mappings.len();
    let err = config
        .reduce(ConfigAction::RemoveMapping { index: len })
        .unwrap_err();
    assert_eq!(err, ConfigError::MappingIndexOutOfRange { index: len, len });
    assert_eq!(
        err.to_string(),
        format!("Mapping index {} is out of range ({} mappings)", len, len)
    );

    let err = config
        .reduce(ConfigAction::SetMappingLevel1 { index: 0, value: Some("10".into()) })
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Mapping 0 targets 'person.phone', which has no second level"
    );
}

#[test]
fn saved_document_round_trip() {
    let config = run(
        wizard(),
        vec![ConfigAction::AddMapping {
            mapping: FieldMapping::manual("metadata.lead_id", "person.id"),
        }],
    );
    let json = config.to_json().unwrap();
    let back = IntegrationConfig::from_json(&json).unwrap();
    assert_eq!(back, config);
    assert_eq!(back.mappings.last().unwrap().source, Provenance::Manual);
}

#[test]
fn actions_from_wizard_json() {
    let actions: Vec<ConfigAction> = serde_json::from_str(
        r#"[
            { "type": "rename", "name": "Outbound" },
            { "type": "connectAccounts", "crm": "pipedrive", "retellAccountId": "r", "crmAccountId": "p" },
            { "type": "selectAgent", "agentId": "agent_outbound_followup" },
            { "type": "addMapping", "mapping": { "sourceField": "transcript", "targetField": "activity.note" } }
        ]"#,
    )
    .unwrap();
    let config = run(IntegrationConfig::default(), actions);
    assert!(config.is_ready());
    assert_eq!(config.crm_account_id.as_deref(), Some("p"));
}
