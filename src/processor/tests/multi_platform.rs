//! Multi-platform integration tests

use super::{TestRoots, write_csv};
use crate::config::{CycleThresholds, DataRoot};
use crate::models::{FloatRecord, SourceKind};
use crate::processor::IngestionPipeline;

fn assert_partition(record: &FloatRecord) {
    let flattened: Vec<(Option<f64>, Option<f64>)> = record
        .cycles
        .iter()
        .flat_map(|cycle| cycle.points())
        .map(|point| (point.time_value, point.pressure))
        .collect();
    let history: Vec<(Option<f64>, Option<f64>)> = record
        .history
        .iter()
        .map(|entry| (entry.time_value, entry.pressure))
        .collect();

    assert_eq!(flattened, history, "cycles must partition history of {}", record.id);
    assert!(record.cycles.iter().all(|cycle| !cycle.is_empty()));
    assert_eq!(record.history.last(), Some(&record.latest));
}

#[tokio::test]
async fn test_platforms_keep_first_seen_order() {
    let roots = TestRoots::new();
    write_csv(
        &roots.core,
        "a.csv",
        "PLATFORM_NUMBER,LATITUDE,LONGITUDE,JULD\n\
         300,0,0,1\n\
         100,0,0,1\n",
    );
    write_csv(
        &roots.core,
        "b.csv",
        "PLATFORM_NUMBER,LATITUDE,LONGITUDE,JULD\n\
         200,0,0,1\n\
         100,0,0,2\n",
    );

    let aggregate = IngestionPipeline::new(roots.config()).run().await.unwrap();
    let ids: Vec<&str> = aggregate.records().iter().map(|r| r.id.as_str()).collect();

    assert_eq!(ids, vec!["300", "100", "200"]);
    assert_eq!(aggregate.get("100").unwrap().history.len(), 2);
    assert_eq!(aggregate.stats().platforms, 3);
}

#[tokio::test]
async fn test_bgc_kind_is_sticky_regardless_of_order() {
    let roots = TestRoots::new();
    write_csv(&roots.bgc, "x.csv", "PLATFORM_NUMBER,LAT,LON,JULD\n42,1,1,5\n");
    write_csv(&roots.core, "y.csv", "PLATFORM_NUMBER,LAT,LON,JULD\n42,1,1,6\n");

    // BGC root is visited first
    let config = roots.config().with_roots(vec![
        DataRoot::new(&roots.bgc, SourceKind::Bgc),
        DataRoot::new(&roots.core, SourceKind::Core),
    ]);

    let aggregate = IngestionPipeline::new(config).run().await.unwrap();
    let record = aggregate.get("42").unwrap();

    assert_eq!(record.kind, SourceKind::Bgc);
    assert_eq!(record.history.len(), 2);
}

#[tokio::test]
async fn test_history_sorted_with_untimed_entries_first() {
    let roots = TestRoots::new();
    write_csv(
        &roots.core,
        "a.csv",
        "PLATFORM_NUMBER,LATITUDE,LONGITUDE,PRES,JULD\n\
         9,0,0,1,10\n\
         9,0,0,2,\n\
         9,0,0,3,4\n\
         9,0,0,4,\n\
         9,0,0,5,10\n",
    );

    let aggregate = IngestionPipeline::new(roots.config()).run().await.unwrap();
    let record = aggregate.get("9").unwrap();

    let pressures: Vec<Option<f64>> = record.history.iter().map(|e| e.pressure).collect();
    assert_eq!(
        pressures,
        vec![Some(2.0), Some(4.0), Some(3.0), Some(1.0), Some(5.0)]
    );
    assert_partition(record);
}

#[tokio::test]
async fn test_pressure_drop_and_time_gap_cut_cycles() {
    let roots = TestRoots::new();
    write_csv(
        &roots.core,
        "descent.csv",
        "PLATFORM_NUMBER,LATITUDE,LONGITUDE,PRES,JULD\n\
         5,0,0,1000,0.0\n\
         5,0,0,500,0.1\n\
         5,0,0,10,0.2\n\
         5,0,0,1500,0.3\n\
         5,0,0,0,0.4\n\
         5,0,0,900,0.5\n\
         5,0,0,880,2.0\n",
    );

    let aggregate = IngestionPipeline::new(roots.config()).run().await.unwrap();
    let record = aggregate.get("5").unwrap();

    let sizes: Vec<usize> = record.cycles.iter().map(|c| c.len()).collect();
    // 1000 | 500 | 10 1500 | 0 900 | 880 (time gap)
    assert_eq!(sizes, vec![1, 1, 2, 2, 1]);
    assert_partition(record);
}

#[tokio::test]
async fn test_configured_thresholds_are_used() {
    let roots = TestRoots::new();
    write_csv(
        &roots.core,
        "a.csv",
        "PLATFORM_NUMBER,LATITUDE,LONGITUDE,JULD\n\
         1,0,0,0\n\
         1,0,0,3\n\
         1,0,0,6\n",
    );

    let config = roots.config().with_cycle_thresholds(CycleThresholds {
        time_gap_days: 5.0,
        pressure_gap: 50.0,
    });

    let aggregate = IngestionPipeline::new(config).run().await.unwrap();
    assert_eq!(aggregate.get("1").unwrap().cycles.len(), 1);

    let aggregate = IngestionPipeline::new(roots.config()).run().await.unwrap();
    assert_eq!(aggregate.get("1").unwrap().cycles.len(), 3);
}

#[tokio::test]
async fn test_many_platforms_across_nested_directories() {
    let roots = TestRoots::new();

    for centre in ["aoml", "csio", "coriolis"] {
        for float in 0..4 {
            let id = format!("{}{}", centre.len(), float);
            let mut content = String::from("PLATFORM_NUMBER,LATITUDE,LONGITUDE,CYCLE_NUMBER\n");
            for cycle in 0..3 {
                content.push_str(&format!("{},1.5,-2.5,{}\n", id, cycle * 2));
            }
            write_csv(&roots.core, &format!("{}/{}/profiles.csv", centre, id), &content);
        }
    }

    let aggregate = IngestionPipeline::new(roots.config()).run().await.unwrap();

    // "aoml" and "csio" collide on length and share ids
    assert_eq!(aggregate.len(), 8);
    assert_eq!(aggregate.stats().files_processed, 12);
    assert_eq!(aggregate.stats().rows_accepted, 36);

    for record in aggregate.records() {
        assert_partition(record);
        assert!(record.latest.date_iso.is_none());
    }
    assert_eq!(aggregate.get("40").unwrap().history.len(), 6);
    assert_eq!(aggregate.get("80").unwrap().history.len(), 3);
}
