//! Chart feeds built from a full dataset.

use thermo_model::{DerivationRules, PipelineOptions, WideTable};
use thermo_transform::{
    RenderPlan, SubjectSelection, TimeWindow, build_dataset, heatmap, period_bars, plan_series,
};

fn table() -> WideTable {
    let mut table = WideTable::new(vec!["f1".to_string(), "m1".to_string()]);
    table.push_row(vec!["37.0".to_string(), "36.5".to_string()]);
    table.push_row(vec!["37.5".to_string(), String::new()]);
    table.push_row(vec!["38.0".to_string(), "36.0".to_string()]);
    table
}

#[test]
fn series_plan_json_is_stable() {
    let dataset = build_dataset(&table(), &PipelineOptions::default()).unwrap();
    let plan = plan_series(
        dataset.records(),
        &SubjectSelection::only(["f1"]),
        Some(TimeWindow::new(0, 1)),
    );
    let json = serde_json::to_string_pretty(&plan).unwrap();
    insta::assert_snapshot!(json, @r#"
{
  "kind": "chart",
  "series": [
    {
      "subject_id": "f1",
      "points": [
        {
          "time": 0,
          "value": 37.0
        },
        {
          "time": 1,
          "value": 37.5
        }
      ]
    }
  ],
  "x_extent": {
    "start": 0,
    "end": 1
  },
  "y_extent": {
    "min": 37.0,
    "max": 37.5
  },
  "full_x_extent": {
    "start": 0,
    "end": 2
  }
}
"#);
}

#[test]
fn empty_selection_is_a_placeholder() {
    let dataset = build_dataset(&table(), &PipelineOptions::default()).unwrap();
    let plan = plan_series(
        dataset.records(),
        &SubjectSelection::only(Vec::<String>::new()),
        None,
    );
    assert_eq!(
        serde_json::to_string(&plan).unwrap(),
        r#"{"kind":"placeholder","message":"No subjects selected."}"#
    );
    assert!(matches!(plan, RenderPlan::Placeholder { .. }));
}

#[test]
fn binned_series_and_heatmap_follow_selection() {
    let dataset = build_dataset(&table(), &PipelineOptions::default()).unwrap();
    let selection = SubjectSelection::only(["m1"]);
    let binned = dataset.binned(&selection, 2).unwrap();
    assert_eq!(binned.len(), 2);
    assert!(binned.iter().all(|b| b.subject_id == "m1"));

    let plan = plan_series(&binned, &SubjectSelection::All, None);
    let chart = plan.chart().expect("chart");
    let times: Vec<u64> = chart.series[0].points.iter().map(|p| p.time).collect();
    assert_eq!(times, vec![0, 2]);

    let grid = heatmap(&binned, &SubjectSelection::All).expect("grid");
    assert_eq!(grid.subjects, vec!["m1"]);
    assert_eq!(grid.bins, vec![0, 1]);
}

#[test]
fn period_bars_use_configured_rules() {
    let rules = DerivationRules::default().with_period_length(1);
    let options = PipelineOptions::default().with_derivation(rules.clone());
    let dataset = build_dataset(&table(), &options).unwrap();
    let bars = period_bars(dataset.records(), &rules, &SubjectSelection::only(["f1"])).unwrap();
    let flags: Vec<bool> = bars.iter().map(|b| b.is_special_period).collect();
    assert_eq!(flags, vec![false, false, true]);
}

#[test]
fn invalid_rules_fail_dataset_build() {
    let options =
        PipelineOptions::default().with_derivation(DerivationRules::default().with_period_length(0));
    assert!(build_dataset(&table(), &options).is_err());
}

#[test]
fn stats_cover_every_subject_column() {
    let dataset = build_dataset(&table(), &PipelineOptions::default()).unwrap();
    let stats = dataset.stats();
    assert_eq!(stats.len(), 2);
    assert_eq!(stats[0].samples, 3);
    assert_eq!(stats[0].mean, Some(37.5));
    assert_eq!(stats[1].skipped, 1);
    assert_eq!(stats[1].min, Some(36.0));
}
