use chrono::{NaiveDateTime, TimeDelta};
use pretty_assertions::assert_eq;
use std::io::Cursor;
use trace_tempo::aggregator::{coalesce, rank_by_total, total_duration_by_group};
use trace_tempo::output::aggregate_report;
use trace_tempo::parser::{load_intervals, load_sample_intervals, parse_timestamp, Interval};

fn ts(value: &str) -> NaiveDateTime {
    parse_timestamp(value).unwrap()
}

fn trace_text(rows: &[(&str, &str, &str, &str)]) -> String {
    let mut text = String::from("task_id\thash\tname\tstatus\ttag\tsubmit\tcomplete\n");
    for (i, (status, tag, submit, complete)) in rows.iter().enumerate() {
        text.push_str(&format!(
            "{}\tab/cdef{}\tproc ({})\t{}\t{}\t{}\t{}\n",
            i + 1,
            i,
            tag,
            status,
            tag,
            submit,
            complete
        ));
    }
    text
}

#[test]
fn test_completed_example_report() {
    let text = trace_text(&[
        ("COMPLETED", "s1", "2020-04-24 00:00:00.000", "2020-04-24 01:00:00.000"),
        ("COMPLETED", "s1", "2020-04-24 00:30:00.000", "2020-04-24 02:00:00.000"),
        ("COMPLETED", "s1", "2020-04-24 03:00:00.000", "2020-04-24 04:00:00.000"),
    ]);

    let groups = load_intervals(Cursor::new(text), None).unwrap();
    let spans = coalesce(groups.get("COMPLETED").unwrap());

    assert_eq!(
        spans,
        vec![
            Interval::new(ts("2020-04-24 00:00:00.000"), ts("2020-04-24 02:00:00.000")),
            Interval::new(ts("2020-04-24 03:00:00.000"), ts("2020-04-24 04:00:00.000")),
        ]
    );

    let totals = total_duration_by_group(&groups);
    assert_eq!(totals.duration_of("COMPLETED"), TimeDelta::hours(3));
    assert_eq!(
        aggregate_report(&totals),
        "COMPLETED: 3:00:00 (3 intervals)\nTotal: 3:00:00 (3 intervals)"
    );
}

#[test]
fn test_mixed_statuses_report_in_trace_order() {
    let text = trace_text(&[
        ("CACHED", "s1", "2020-04-24 00:00:00.000", "2020-04-24 00:10:00.000"),
        ("FAILED", "s1", "2020-04-24 00:05:00.000", "2020-04-24 00:06:00.500"),
        ("ABORTED", "s2", "-", "-"),
        ("COMPLETED", "s2", "2020-04-24 01:00:00.000", "2020-04-25 02:00:00.000"),
    ]);

    let groups = load_intervals(Cursor::new(text), None).unwrap();
    let report = aggregate_report(&total_duration_by_group(&groups));

    assert_eq!(
        report,
        "CACHED: 0:10:00 (1 intervals)\n\
         FAILED: 0:01:00.500000 (1 intervals)\n\
         ABORTED: 0:00:00 (0 intervals)\n\
         COMPLETED: 1 day, 1:00:00 (1 intervals)\n\
         Total: 1 day, 1:11:00.500000 (3 intervals)"
    );
}

#[test]
fn test_doubling_rows_does_not_change_totals() {
    let rows = [
        ("COMPLETED", "s1", "2020-04-24 00:00:00.000", "2020-04-24 01:00:00.000"),
        ("COMPLETED", "s2", "2020-04-24 00:20:00.000", "2020-04-24 01:30:00.000"),
        ("FAILED", "s1", "2020-04-24 02:00:00.000", "2020-04-24 02:15:00.000"),
    ];
    let doubled: Vec<_> = rows.iter().chain(rows.iter()).copied().collect();

    let single = total_duration_by_group(&load_intervals(Cursor::new(trace_text(&rows)), None).unwrap());
    let double =
        total_duration_by_group(&load_intervals(Cursor::new(trace_text(&doubled)), None).unwrap());

    assert_eq!(single, double);
    assert_eq!(aggregate_report(&single), aggregate_report(&double));
}

#[test]
fn test_dash_submit_is_dropped_without_error() {
    let text = trace_text(&[
        ("COMPLETED", "s1", "-", "2020-04-24 01:00:00.000"),
        ("COMPLETED", "s1", "2020-04-24 02:00:00.000", "2020-04-24 02:30:00.000"),
    ]);

    let groups = load_intervals(Cursor::new(text), None).unwrap();
    let totals = total_duration_by_group(&groups);

    assert_eq!(totals.intervals_of("COMPLETED"), 1);
    assert_eq!(totals.total, TimeDelta::minutes(30));
}

#[test]
fn test_sample_ranking_ties_are_stable() {
    let text = trace_text(&[
        ("COMPLETED", "SampleA.align", "2020-04-24 00:00:00.000", "2020-04-24 05:00:00.000"),
        ("COMPLETED", "SampleB.align", "2020-04-24 01:00:00.000", "2020-04-24 04:00:00.000"),
        ("FAILED", "SampleB.call", "2020-04-24 05:00:00.000", "2020-04-24 07:00:00.000"),
        ("COMPLETED", "SampleC.align", "2020-04-24 00:00:00.000", "2020-04-24 01:00:00.000"),
    ]);
    let samples = vec![
        "SampleC".to_string(),
        "SampleB".to_string(),
        "SampleA".to_string(),
        "SampleD".to_string(),
    ];

    for _ in 0..5 {
        let buckets = load_sample_intervals(Cursor::new(text.clone()), &samples).unwrap();
        let ranked = rank_by_total(&buckets);
        let order: Vec<&str> = ranked.iter().map(|(s, _)| s.as_str()).collect();

        // SampleB and SampleA tie at five hours; SampleB comes first in the list
        assert_eq!(order, vec!["SampleB", "SampleA", "SampleC", "SampleD"]);
        assert_eq!(ranked[0].1, TimeDelta::hours(5));
        assert_eq!(ranked[1].1, TimeDelta::hours(5));
        assert_eq!(ranked[3].1, TimeDelta::zero());
    }
}
