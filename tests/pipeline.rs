use std::collections::BTreeMap;

use modulus_panda::analysis::align::{COMMON_AXIS_POINTS, align};
use modulus_panda::analysis::fit::fit;
use modulus_panda::analysis::smooth::smooth;
use modulus_panda::groups::{Group, session};
use modulus_panda::{
    AnalysisSettings, ColumnKind, Curve, CurveStatus, GroupStore, PipelineError, SourceFile,
    run_batch,
};

fn curve(name: &str, strain: Vec<f64>, stress: Vec<f64>) -> Curve {
    Curve {
        name: name.into(),
        strain_column: "Strain %".into(),
        stress_column: "Stress MPa".into(),
        smoothed: stress.clone(),
        stress,
        strain,
        fit: None,
    }
}

#[test]
fn name_column_without_percent_is_not_strain() {
    let files = [SourceFile::new(
        "plain.csv",
        "Name,Stress\n,MPa\n0,0\n1,10\n2,20\n",
    )];
    let report = run_batch(&files, &AnalysisSettings::default());
    assert_eq!(
        report.outcomes[0].status(),
        CurveStatus::Failed(&PipelineError::ColumnNotFound(ColumnKind::Strain))
    );
}

#[test]
fn linear_curve_gives_modulus_200() {
    let strain: Vec<f64> = (0..=10).map(|i| i as f64 * 0.01).collect();
    let stress: Vec<f64> = strain.iter().map(|e| 200.0 * e).collect();
    let result = fit(&strain, &stress, 0.0, 0.05).unwrap();
    assert!((result.modulus - 200.0).abs() < 1e-9);
    assert!((result.r_squared.unwrap() - 1.0).abs() < 1e-12);
}

#[test]
fn two_curves_average_over_longer_range() {
    let short_strain: Vec<f64> = (0..=5).map(|i| i as f64 * 0.01).collect();
    let long_strain: Vec<f64> = (0..=8).map(|i| i as f64 * 0.01).collect();
    let short = curve("short", short_strain.clone(), short_strain.iter().map(|e| 100.0 * e).collect());
    let long = curve("long", long_strain.clone(), long_strain.iter().map(|e| 100.0 * e).collect());

    let avg = align(&[&short, &long]).unwrap();
    assert_eq!(avg.strain.len(), COMMON_AXIS_POINTS);
    assert_eq!(avg.strain[0], 0.0);
    assert_eq!(*avg.strain.last().unwrap(), 0.08);

    // Past 0.05 the short curve contributes its last smoothed value (5 MPa).
    for (e, s) in avg.strain.iter().zip(&avg.avg_stress) {
        if *e > 0.05 {
            assert!((s - (5.0 + 100.0 * e) / 2.0).abs() < 1e-9);
        }
    }
}

#[test]
fn smoothing_preserves_length_for_valid_windows() {
    let data: Vec<f64> = (0..15).map(|i| (i as f64).sqrt()).collect();
    for window in (1..=15).step_by(2) {
        for order in 0..window.min(5) {
            assert_eq!(smooth(&data, window, order).unwrap().len(), data.len());
        }
    }
}

#[test]
fn csv_to_group_to_session_round_trip() {
    let mut text = String::from("Time,Strain,Stress\ns,%,MPa\n");
    for i in 0..60 {
        let pct = i as f64 * 0.05;
        text.push_str(&format!("{},{pct},{}\n", i as f64 * 0.1, 1800.0 * pct / 100.0));
    }
    text.push_str(",,\n");

    let settings = AnalysisSettings {
        max_strain: 0.01,
        ..AnalysisSettings::default()
    };
    let report = run_batch(&[SourceFile::new("a.csv", text)], &settings);
    let moduli = report.moduli();
    assert_eq!(moduli.len(), 1);
    assert!((moduli[0] - 1800.0).abs() < 1e-6);

    let mut store = GroupStore::new();
    store.create("PETG").unwrap();
    store.record_moduli("PETG", &moduli).unwrap();

    let json = session::to_json(&store).unwrap();
    let doc: BTreeMap<String, Group> = session::from_json(&json).unwrap();
    assert_eq!(&doc, store.groups());

    let mut restored = GroupStore::new();
    restored.create("stale").unwrap();
    session::load_str(&mut restored, &json).unwrap();
    assert_eq!(restored.names(), vec!["PETG"]);
}
