use riskgraph::{
    compute_centrality, embed, predicates, standard_thresholds, EmbeddingConfig, Equipment, Fact, InMemoryRepository,
    KnowledgeGraph, RiskConfig, RiskEngine, Severity,
};

fn quick_config() -> RiskConfig {
    let mut config = RiskConfig::default();
    config.embedding = EmbeddingConfig {
        dimensions: 16,
        num_walks: 20,
        epochs: 2,
        ..EmbeddingConfig::default()
    };
    config
}

fn located(equipment: &str, pad: &str) -> Fact {
    Fact::new(equipment, "component", predicates::LOCATED_AT, pad, "pad")
}

fn fleet_facts() -> Vec<Fact> {
    vec![
        Fact::metric_reading("ENG-27", "engine_oil_temp_c", 112.0, "°C"),
        Fact::metric_reading("ENG-34", "engine_oil_pressure_psi", 71.0, "psi"),
        located("ENG-27", "PAD-B"),
        located("ENG-34", "PAD-C"),
        located("TRANS-12", "PAD-A"),
        located("ENG-12", "PAD-A"),
        Fact::new("ENG-12", "component", predicates::HAS_SYMPTOM, "Overheating", "symptom"),
        Fact::metric_reading("TRANS-12", "trans_oil_pressure_psi", 165.0, "psi"),
    ]
}

fn registry() -> Vec<Equipment> {
    vec![
        Equipment::new("ENG-27", "engine").at("PAD-B"),
        Equipment::new("ENG-34", "engine").at("PAD-C"),
        Equipment::new("TRANS-12", "transmission").at("PAD-A"),
    ]
}

#[test]
fn test_high_outranks_med_regardless_of_degree() {
    let mut facts = fleet_facts();
    // Give the MED unit many more neighbours than the HIGH unit
    for i in 0..6 {
        facts.push(Fact::new("ENG-34", "component", predicates::HAS_STATUS, format!("status-{i}"), "status"));
    }

    let engine = RiskEngine::new(quick_config()).unwrap();
    let report = engine.analyze(facts, &standard_thresholds(), &registry()).unwrap();

    let position = |id: &str| report.top_risk_nodes.iter().position(|n| n.node_id == id);
    let eng_27 = position("ENG-27").unwrap();
    let eng_34 = position("ENG-34").unwrap();
    assert!(eng_27 < eng_34);
    assert_eq!(report.top_risk_nodes[eng_27].severity, Some(Severity::High));
    assert_eq!(report.top_risk_nodes[eng_34].severity, Some(Severity::Med));
    assert!(report.top_risk_nodes[eng_34].degree > report.top_risk_nodes[eng_27].degree);
}

#[test]
fn test_location_groups_from_registry() {
    let engine = RiskEngine::new(quick_config()).unwrap();
    let report = engine.analyze(fleet_facts(), &standard_thresholds(), &registry()).unwrap();

    let pad_b = &report.location_risk_groups["PAD-B"];
    assert!(pad_b.iter().any(|f| f.metric.as_deref() == Some("engine_oil_temp_c") && f.severity == Severity::High));
    assert!(pad_b.iter().any(|f| f.object_id == riskgraph::model::EXCEEDED_LIMITS));

    let pad_c = &report.location_risk_groups["PAD-C"];
    assert_eq!(pad_c.len(), 1);
    assert_eq!(pad_c[0].severity, Severity::Med);

    assert_eq!(report.top_risk_nodes.len(), 10);
    assert_eq!(report.top_similar_pairs.len(), 10);
}

#[test]
fn test_repeated_runs_are_identical() {
    let engine = RiskEngine::new(quick_config()).unwrap();
    let repo = InMemoryRepository::new(fleet_facts(), standard_thresholds()).with_equipment(registry());

    let first = engine.run(&repo).unwrap();
    let second = engine.run(&repo).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_empty_input_gives_empty_report() {
    let engine = RiskEngine::new(quick_config()).unwrap();
    let report = engine.analyze(Vec::new(), &standard_thresholds(), &[]).unwrap();
    assert!(report.top_risk_nodes.is_empty());
    assert!(report.top_similar_pairs.is_empty());
    assert!(report.location_risk_groups.is_empty());
}

#[test]
fn test_subject_dedup_takes_max_severity() {
    let facts = vec![
        Fact::new("ENG-12", "component", predicates::HAS_SYMPTOM, "Overheating", "symptom").with_severity(Severity::Med),
        Fact::new("ENG-12", "component", predicates::HAS_SYMPTOM, "Leak", "symptom").with_severity(Severity::High),
    ];
    let engine = RiskEngine::new(quick_config()).unwrap();
    let report = engine.analyze(facts, &[], &[]).unwrap();

    let eng_12: Vec<_> = report.top_risk_nodes.iter().filter(|n| n.node_id == "ENG-12").collect();
    assert_eq!(eng_12.len(), 1);
    assert_eq!(eng_12[0].severity, Some(Severity::High));
}

#[test]
fn test_degree_within_unit_interval() {
    let mut facts = fleet_facts();
    // Both directions between the same pair
    facts.push(Fact::new("PAD-A", "pad", predicates::HAS_STATUS, "ENG-12", "component"));
    let graph = KnowledgeGraph::build(&facts).unwrap();
    let scores = compute_centrality(&graph.view(), Default::default());
    assert!(scores.iter().all(|s| (0.0..=1.0).contains(&s.degree)));
    assert!(scores.iter().all(|s| s.betweenness >= 0.0 && s.closeness >= 0.0));
}

#[test]
fn test_similarity_is_symmetric() {
    let graph = KnowledgeGraph::build(&fleet_facts()).unwrap();
    let embeddings = embed(&graph, &graph.view(), &quick_config().embedding);
    let ids: Vec<_> = graph.nodes().map(|n| n.id.clone()).collect();
    for a in &ids {
        for b in &ids {
            assert_eq!(embeddings.similarity(a, b), embeddings.similarity(b, a));
        }
    }
}

#[test]
fn test_unresolved_reading_uses_configured_fallback() {
    let facts = vec![Fact::metric_reading("PUMP-9", "discharge_rate_bpm", 12.0, "bpm").with_location("PAD-A")];

    let engine = RiskEngine::new(quick_config()).unwrap();
    let report = engine.analyze(facts.clone(), &standard_thresholds(), &[]).unwrap();
    assert!(report.location_risk_groups.is_empty());

    let mut config = quick_config();
    config.fallback_severity = Some(Severity::Med);
    let engine = RiskEngine::new(config).unwrap();
    let report = engine.analyze(facts, &standard_thresholds(), &[]).unwrap();
    assert_eq!(report.location_risk_groups["PAD-A"][0].severity, Severity::Med);
}

#[test]
fn test_invalid_value_keeps_structure() {
    let facts = vec![
        Fact::metric_reading("ENG-27", "engine_oil_temp_c", f64::NAN, "°C").with_location("PAD-B"),
        located("ENG-27", "PAD-B"),
    ];
    let engine = RiskEngine::new(quick_config()).unwrap();
    let report = engine.analyze(facts, &standard_thresholds(), &[]).unwrap();
    assert!(report.top_risk_nodes.iter().any(|n| n.node_id == "engine_oil_temp_c"));
    assert!(report.location_risk_groups.is_empty());
}
