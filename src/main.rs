use anyhow::Context;
use chrono::{DateTime, Utc};
use riskgraph::{predicates, predict_links, standard_thresholds, Equipment, Fact, InMemoryRepository, RiskConfig, RiskEngine};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("RiskGraph v{}", riskgraph::version());
    println!("==========================================");
    println!();

    let repository = InMemoryRepository::new(demo_facts()?, standard_thresholds()).with_equipment(registry());
    let engine = RiskEngine::new(RiskConfig::default())?;

    println!("=== Demo 1: Risk Report ===");
    let report = engine.run(&repository)?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    println!("\n=== Demo 2: Link Prediction ===");
    let (_, graph) = engine.build_graph(repository.facts.clone(), &repository.thresholds, &repository.equipment)?;
    for prediction in predict_links(&graph, "TRANS-12", 5)? {
        println!("  TRANS-12 -> {} ({}) score {:.3}", prediction.node_id, prediction.entity_type, prediction.score);
    }

    Ok(())
}

fn registry() -> Vec<Equipment> {
    vec![
        Equipment::new("ENG-12", "engine").at("PAD-A"),
        Equipment::new("TRANS-12", "transmission").at("PAD-A"),
        Equipment::new("FLUEND-12", "fluid_end").at("PAD-A"),
        Equipment::new("ENG-27", "engine").at("PAD-B"),
        Equipment::new("ENG-34", "engine").at("PAD-C"),
    ]
}

fn at(rfc2822: &str) -> anyhow::Result<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc2822(rfc2822).with_context(|| format!("bad timestamp {rfc2822}"))?;
    Ok(parsed.with_timezone(&Utc))
}

/// Facts as the extraction stage would emit them for three field reports
fn demo_facts() -> anyhow::Result<Vec<Fact>> {
    let mut facts = Vec::new();

    let eng_27 = at("Fri, 12 Sep 2025 08:15:00 +0000")?;
    for (metric, value, unit) in [
        ("engine_oil_pressure_psi", 62.0, "psi"),
        ("engine_oil_temp_c", 112.0, "°C"),
        ("engine_water_temp_c", 82.0, "°C"),
        ("engine_load_pct", 70.0, "%"),
    ] {
        facts.push(Fact::metric_reading("ENG-27", metric, value, unit).at(eng_27));
    }

    let eng_34 = at("Fri, 12 Sep 2025 12:30:00 +0000")?;
    for (metric, value, unit) in [
        ("engine_oil_pressure_psi", 71.0, "psi"),
        ("engine_oil_temp_c", 129.0, "°C"),
        ("engine_water_temp_c", 87.0, "°C"),
        ("engine_load_pct", 95.0, "%"),
    ] {
        facts.push(Fact::metric_reading("ENG-34", metric, value, unit).at(eng_34));
    }

    let trans_12 = at("Fri, 12 Sep 2025 13:00:00 +0000")?;
    for (metric, value, unit) in [("trans_oil_pressure_psi", 165.0, "psi"), ("trans_oil_temp_c", 87.0, "°C")] {
        facts.push(Fact::metric_reading("TRANS-12", metric, value, unit).at(trans_12));
    }
    facts.push(
        Fact::new("TRANS-12", "component", predicates::HAS_STATUS, "follow_up_inspection", "status")
            .with_equipment("TRANS-12")
            .at(trans_12),
    );

    for (equipment, pad) in [("ENG-27", "PAD-B"), ("ENG-34", "PAD-C"), ("TRANS-12", "PAD-A"), ("ENG-12", "PAD-A")] {
        facts.push(Fact::new(equipment, "component", predicates::LOCATED_AT, pad, "pad"));
    }

    Ok(facts)
}
