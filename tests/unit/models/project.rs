use super::*;

#[test]
fn test_patch_apply_merges_fields() {
    let mut project = Project::new("p1", "counter");
    let patch = ProjectPatch {
        contract_boc: Some("te6cc...".to_string()),
        ..Default::default()
    };
    assert!(patch.apply(&mut project));
    assert_eq!(project.contract_boc.as_deref(), Some("te6cc..."));
    assert_eq!(project.name, "counter");
    assert!(project.contract_address.is_none());
}

#[test]
fn test_patch_apply_reports_no_change() {
    let mut project = Project::new("p1", "counter");
    project.contract_address = Some("EQabc".to_string());
    let patch = ProjectPatch {
        contract_address: Some("EQabc".to_string()),
        ..Default::default()
    };
    assert!(!patch.apply(&mut project));
    assert!(ProjectPatch::default().is_empty());
    assert!(!patch.is_empty());
}

#[test]
fn test_project_json_shape() {
    let mut project = Project::new("p1", "counter");
    project.contract_boc = Some("boc".to_string());
    project.abi = Some(Abi {
        getters: vec![AbiMethod {
            name: "get_counter".to_string(),
            parameters: Vec::new(),
        }],
        setters: Vec::new(),
    });

    let value = serde_json::to_value(&project).unwrap();
    assert_eq!(value["contractBOC"], "boc");
    assert_eq!(value["abi"]["getters"][0]["name"], "get_counter");
    assert!(value.get("contractAddress").is_none());

    let back: Project = serde_json::from_value(value).unwrap();
    assert_eq!(back, project);
}

#[test]
fn test_abi_parameter_type_field() {
    let json = r#"{"getters":[],"setters":[{"name":"increment","parameters":[{"name":"by","type":"int"}]}]}"#;
    let abi: Abi = serde_json::from_str(json).unwrap();
    assert_eq!(abi.setters[0].parameters[0].ty, "int");
}

#[test]
fn test_network_environment_names() {
    assert_eq!(NetworkEnvironment::from_name("testnet"), Some(NetworkEnvironment::Testnet));
    assert_eq!(NetworkEnvironment::from_name(" MAINNET "), Some(NetworkEnvironment::Mainnet));
    assert_eq!(NetworkEnvironment::from_name("devnet"), None);
    assert_eq!(NetworkEnvironment::Sandbox.as_str(), "SANDBOX");
    assert_eq!(
        serde_json::to_string(&NetworkEnvironment::Testnet).unwrap(),
        "\"TESTNET\""
    );
}

#[test]
fn test_contract_link() {
    assert_eq!(
        contract_link("EQabc", NetworkEnvironment::Testnet).as_deref(),
        Some("https://testnet.tonscan.org/address/EQabc")
    );
    assert_eq!(
        contract_link("EQabc", NetworkEnvironment::Mainnet).as_deref(),
        Some("https://tonscan.org/address/EQabc")
    );
    assert!(contract_link("EQabc", NetworkEnvironment::Sandbox).is_none());
    assert!(contract_link("", NetworkEnvironment::Mainnet).is_none());
}
