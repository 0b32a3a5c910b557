//! Tests for the SignificanceTest builder and the output formatters.

use empirical_copula::output::{json, terminal};
use empirical_copula::{
    empirical_joint_pmf_details, order_pmf, Config, CopulaError, PairedSamples, SignificanceTest,
};

/// Route crate logs to the test writer; set `RUST_LOG=empirical_copula=trace` to see them.
fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Shirt colour against size in a shop where red shirts only come in L.
fn shop_samples() -> PairedSamples<&'static str, &'static str> {
    let mut colors = vec!["red"; 24];
    let mut sizes = vec!["L"; 24];
    for (i, color) in ["blue", "green"].into_iter().cycle().take(48).enumerate() {
        colors.push(color);
        sizes.push(["S", "M", "L"][i % 3]);
    }
    PairedSamples::from_columns(colors, sizes).unwrap()
}

// ===========================================================================
// Builder
// ===========================================================================

#[test]
fn builder_seeded_runs_are_reproducible() {
    init_logging();
    let samples = shop_samples();
    let first = SignificanceTest::new()
        .bootstraps(300)
        .p_levels(&[0.01, 0.05])
        .seed(42)
        .run(&samples)
        .unwrap();
    let second = SignificanceTest::new()
        .bootstraps(300)
        .p_levels(&[0.01, 0.05])
        .seed(42)
        .run(&samples)
        .unwrap();

    assert_eq!(first.significance, second.significance);
    assert_eq!(first.thresholds, second.thresholds);
    assert_eq!(first.metadata.seed, Some(42));
    assert_eq!(first.metadata.n_bootstraps, 300);
    assert_eq!(first.metadata.sample_size, 72);
}

#[test]
fn builder_flags_dependent_cell() {
    init_logging();
    let result = SignificanceTest::new()
        .bootstraps(500)
        .p_levels(&[0.01, 0.05])
        .seed(7)
        .run(&shop_samples())
        .unwrap();

    // 24 of 40 L shirts are red although red is a third of the stock
    assert_eq!(result.label(&"red", &"L"), Some(2));
    assert!(result.label(&"red", &"S").unwrap() < 0);
    assert!(result.label(&"red", &"M").unwrap() < 0);

    let flagged: Vec<_> = result.significant_cells().collect();
    assert!(flagged.contains(&(&"red", &"L", 2)));
    assert!(flagged.iter().all(|(_, _, label)| *label != 0));
}

#[test]
fn builder_from_config() {
    let config: Config =
        serde_json::from_str(r#"{"n_bootstraps": 40, "p_levels_low": [0.1], "seed": 3}"#).unwrap();
    let result = SignificanceTest::with_config(config.clone())
        .run(&shop_samples())
        .unwrap();

    assert_eq!(result.quantile_levels, vec![0.1, 0.0, 0.9]);
    assert_eq!(result.labels, vec![-1, 0, 1]);
    assert_eq!(result.thresholds.len(), 3);
    assert_eq!(result.metadata.n_bootstraps, config.n_bootstraps);
}

#[test]
fn builder_rejects_bad_input_before_resampling() {
    let samples = shop_samples();

    let err = SignificanceTest::new().bootstraps(0).run(&samples).unwrap_err();
    assert_eq!(err, CopulaError::InvalidBootstrapCount);

    let err = SignificanceTest::new()
        .p_levels(&[0.05, 0.6])
        .run(&samples)
        .unwrap_err();
    assert!(matches!(err, CopulaError::InvalidSignificanceLevels(_)));

    let empty: PairedSamples<&str, &str> = PairedSamples::new(vec![]);
    let err = SignificanceTest::quick().run(&empty).unwrap_err();
    assert_eq!(err, CopulaError::EmptyInput);
}

// ===========================================================================
// Output
// ===========================================================================

#[test]
fn json_output_is_self_describing() {
    let result = SignificanceTest::quick()
        .seed(1)
        .run(&shop_samples())
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json::to_json(&result).unwrap()).unwrap();

    assert_eq!(value["labels"], serde_json::json!([-2, -1, 0, 1, 2]));
    assert_eq!(value["significance"]["rows"], serde_json::json!(["blue", "green", "red"]));
    assert_eq!(value["significance"]["columns"], serde_json::json!(["L", "M", "S"]));
    assert_eq!(value["metadata"]["seed"], 1);
    assert_eq!(value["observed"]["values"][2][0], 24);
}

#[test]
fn terminal_output_uses_marginal_order() {
    colored::control::set_override(false);
    let samples = shop_samples();
    let details = empirical_joint_pmf_details(&samples).unwrap();
    let pmf1 = order_pmf(&details.pmf1, false);

    let text = terminal::format_table(&pmf1, &details.pmf2, &details.copula).unwrap();
    let rows: Vec<&str> = text.lines().skip(3).collect();
    assert_eq!(rows.len(), 3);
    // Every colour has 24 shirts, so the stable sort keeps ascending order
    assert!(rows[0].starts_with("blue"));
    assert!(rows[1].starts_with("green"));
    assert!(rows[2].starts_with("red"));

    let result = SignificanceTest::quick().seed(2).run(&samples).unwrap();
    let text = terminal::format_significance(&pmf1, &details.pmf2, &result).unwrap();
    assert!(text.contains("not significant"));
}
