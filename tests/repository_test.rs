use riskgraph::{
    standard_thresholds, Equipment, Fact, FactRepository, JsonRepository, RiskConfig, RiskEngine, Severity,
};
use std::path::Path;
use tempfile::TempDir;

fn write_json<T: serde::Serialize>(dir: &Path, name: &str, value: &T) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path
}

#[test]
fn test_json_snapshot_end_to_end() {
    let dir = TempDir::new().unwrap();
    let facts = vec![
        Fact::metric_reading("ENG-34", "engine_oil_temp_c", 129.0, "°C"),
        Fact::metric_reading("ENG-34", "engine_oil_pressure_psi", 71.0, "psi"),
        Fact::metric_reading("ENG-27", "engine_oil_temp_c", 95.0, "°C"),
    ];
    let equipment = vec![
        Equipment::new("ENG-34", "engine").at("PAD-C"),
        Equipment::new("ENG-27", "engine").at("PAD-B"),
    ];

    let repo = JsonRepository::new(
        write_json(dir.path(), "facts.json", &facts),
        write_json(dir.path(), "thresholds.json", &standard_thresholds()),
    )
    .with_equipment(write_json(dir.path(), "equipment.json", &equipment));

    assert_eq!(repo.load_facts().unwrap(), facts);
    assert_eq!(repo.load_thresholds().unwrap(), standard_thresholds());
    assert_eq!(repo.load_equipment().unwrap(), equipment);

    let config_path = dir.path().join("risk.yaml");
    std::fs::write(
        &config_path,
        "top_k_nodes: 2\ntop_k_pairs: 3\nembedding:\n  dimensions: 8\n  num_walks: 10\n  epochs: 1\n",
    )
    .unwrap();
    let config = RiskConfig::from_yaml_file(&config_path).unwrap();

    let report = RiskEngine::new(config).unwrap().run(&repo).unwrap();
    assert_eq!(report.top_risk_nodes.len(), 2);
    assert_eq!(report.top_risk_nodes[0].node_id, "ENG-34");
    assert_eq!(report.top_similar_pairs.len(), 3);

    let pad_c = &report.location_risk_groups["PAD-C"];
    assert_eq!(pad_c[0].severity, Severity::High);
    assert_eq!(pad_c[0].value, Some(129.0));
    // 95 is within bounds, so PAD-B only carries a nominal reading
    assert_eq!(report.location_risk_groups["PAD-B"][0].severity, Severity::Med);
}

#[test]
fn test_non_numeric_value_keeps_fact_unclassified() {
    let dir = TempDir::new().unwrap();
    let facts_path = dir.path().join("facts.json");
    std::fs::write(
        &facts_path,
        r#"[
            {"subject_id": "ENG-27", "subject_type": "component", "predicate": "has_metric",
             "object_id": "engine_oil_temp_c", "object_type": "metric",
             "metric": "engine_oil_temp_c", "value": "n/a", "unit": "°C"},
            {"subject_id": "ENG-27", "subject_type": "component", "predicate": "located_at",
             "object_id": "PAD-B", "object_type": "pad"}
        ]"#,
    )
    .unwrap();
    let repo = JsonRepository::new(facts_path, write_json(dir.path(), "thresholds.json", &standard_thresholds()));

    let facts = repo.load_facts().unwrap();
    assert_eq!(facts.len(), 2);
    assert!(facts[0].value.is_some_and(f64::is_nan));

    let engine = RiskEngine::new(RiskConfig::default()).unwrap();
    let (annotated, graph) = engine.build_graph(facts, &standard_thresholds(), &[]).unwrap();
    assert_eq!(annotated.len(), 2);
    assert_eq!(annotated[0].severity, None);
    assert!(graph.get_node("engine_oil_temp_c").is_some());
    assert!(graph.get_node("ENG-27").unwrap().severity.is_none());

    let mut config = RiskConfig::default();
    config.embedding.num_walks = 10;
    let report = RiskEngine::new(config).unwrap().run(&repo).unwrap();
    assert!(report.location_risk_groups.is_empty());
    assert!(report.top_risk_nodes.iter().any(|n| n.node_id == "ENG-27"));
}

#[test]
fn test_missing_config_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    assert!(RiskConfig::from_yaml_file(dir.path().join("absent.yaml")).is_err());
}

#[test]
fn test_missing_fact_file_aborts_run() {
    let dir = TempDir::new().unwrap();
    let repo = JsonRepository::new(
        dir.path().join("absent.json"),
        write_json(dir.path(), "thresholds.json", &standard_thresholds()),
    );
    let engine = RiskEngine::new(RiskConfig::default()).unwrap();
    assert!(matches!(engine.run(&repo), Err(riskgraph::RiskError::Repository(_))));
}
