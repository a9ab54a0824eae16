use std::fs;
use std::path::Path;

use kanji_core::{ColumnLayout, Pipeline, PipelineError, ProgressReporter, ProgressStyle, TableError};

use super::mocks::{FixedSource, MemoryTable};

fn pipeline(source: FixedSource) -> Pipeline<FixedSource, Vec<u8>> {
    Pipeline::new(source, ProgressReporter::new(Vec::new(), ProgressStyle::default()))
}

fn dictionary() -> FixedSource {
    FixedSource::new(&[
        ("日本", "Japan"),
        ("語", "language"),
        ("本", "book"),
        ("が", "subject marker"),
    ])
}

fn progress_output(pipeline: Pipeline<FixedSource, Vec<u8>>) -> String {
    String::from_utf8(pipeline.into_reporter().into_inner()).unwrap()
}

#[tokio::test]
async fn test_definitions_joined_with_numbered_lines() {
    let mut table = MemoryTable::with_kanji(&[&["日本", "語"]]);
    let mut pipeline = pipeline(dictionary());

    let (rows, entries) = pipeline.augment(&mut table).await.unwrap();

    assert_eq!((rows, entries), (1, 2));
    assert_eq!(table.cells[1][4], "Japan\n2-language");
    assert_eq!(pipeline.source().calls(), vec!["日本", "語"]);
}

#[tokio::test]
async fn test_segment_count_matches_sub_entries() {
    let mut table = MemoryTable::with_kanji(&[&["本"], &["日本", "語", "本"]]);
    let mut pipeline = pipeline(dictionary());

    pipeline.augment(&mut table).await.unwrap();

    assert_eq!(table.cells[1][4], "book");
    assert_eq!(table.cells[2][4], "Japan\n2-language\n3-book");
    // Header row is never touched
    assert_eq!(table.cells[0][4], "Definitions");
}

#[tokio::test]
async fn test_progress_output() {
    let mut table = MemoryTable::with_kanji(&[&["日本", "語"]]);
    let mut pipeline = pipeline(dictionary());

    pipeline.augment(&mut table).await.unwrap();

    let expected = concat!(
        "Starting search for 2 kanji compounds...\n",
        "\r |----------| 0.0% ",
        "\r |█████-----| 50.0% 1.1:日本 - Japan",
        "\r |██████████| 100.0% 1.2:語 - language\n",
    );
    assert_eq!(progress_output(pipeline), expected);
}

#[tokio::test]
async fn test_progress_is_cumulative_across_rows() {
    let mut table = MemoryTable::with_kanji(&[&["日本", "語"], &["本"]]);
    let mut pipeline = pipeline(dictionary());

    pipeline.augment(&mut table).await.unwrap();
    let output = progress_output(pipeline);

    let first = output.find("33.3% 1.1:日本").unwrap();
    let second = output.find("66.7% 1.2:語").unwrap();
    let third = output.find("100.0% 2.1:本").unwrap();
    assert!(first < second && second < third);
    assert_eq!(output.matches('\n').count(), 2);
    assert!(output.ends_with('\n'));
}

#[tokio::test]
async fn test_shorter_status_is_padded() {
    let mut table = MemoryTable::with_kanji(&[&["語", "日本"]]);
    let mut pipeline = pipeline(dictionary());

    pipeline.augment(&mut table).await.unwrap();

    let output = progress_output(pipeline);
    assert!(output.ends_with("1.2:日本 - Japan  \n"));
}

#[tokio::test]
async fn test_blank_kanji_cell_clears_definitions() {
    let mut table = MemoryTable::with_kanji(&[&[], &["語"]]);
    let mut pipeline = pipeline(dictionary());

    let (rows, entries) = pipeline.augment(&mut table).await.unwrap();

    assert_eq!((rows, entries), (2, 1));
    assert_eq!(table.cells[1][4], "");
    assert_eq!(table.cells[2][4], "language");
}

#[tokio::test]
async fn test_all_blank_rows_end_the_progress_line() {
    let mut table = MemoryTable::with_kanji(&[&[], &[]]);
    let mut pipeline = pipeline(dictionary());

    let (rows, entries) = pipeline.augment(&mut table).await.unwrap();

    assert_eq!((rows, entries), (2, 0));
    assert_eq!(
        progress_output(pipeline),
        "Starting search for 0 kanji compounds...\n\r |----------| 0.0% \n"
    );
}

#[tokio::test]
async fn test_terms_are_nfc_normalized() {
    let mut table = MemoryTable::with_kanji(&[&["\u{304b}\u{3099}"]]);
    let mut pipeline = pipeline(dictionary());

    pipeline.augment(&mut table).await.unwrap();

    assert_eq!(pipeline.source().calls(), vec!["が"]);
    assert_eq!(table.cells[1][4], "subject marker");
}

#[tokio::test]
async fn test_repeated_terms_are_looked_up_each_time() {
    let mut table = MemoryTable::with_kanji(&[&["語"], &["語"]]);
    let mut pipeline = pipeline(dictionary());

    pipeline.augment(&mut table).await.unwrap();

    assert_eq!(pipeline.source().calls(), vec!["語", "語"]);
}

#[tokio::test]
async fn test_custom_layout() {
    let mut table = MemoryTable::with_kanji(&[&["本"]]);
    table.cells[1][1] = "日本".to_string();
    let mut pipeline = pipeline(dictionary()).with_layout(ColumnLayout::new(1, 2));

    pipeline.augment(&mut table).await.unwrap();

    assert_eq!(table.cells[1][2], "Japan");
    assert_eq!(table.cells[1][4], "stale");
}

#[tokio::test]
async fn test_run_saves_to_derived_path() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("list.docx");
    let table = MemoryTable::with_kanji(&[&["日本", "語"]]);
    let mut pipeline = pipeline(dictionary());

    let report = pipeline.run(table, &input, None).await.unwrap();

    assert_eq!(report.output, dir.path().join("new list.docx"));
    assert_eq!((report.rows, report.entries), (1, 2));
    let saved = fs::read_to_string(&report.output).unwrap();
    assert!(saved.contains(r#""Japan\n2-language""#));
}

#[tokio::test]
async fn test_run_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("list.docx");
    let output = dir.path().join("out.docx");

    let mut outputs = Vec::new();
    for _ in 0..2 {
        let table = MemoryTable::with_kanji(&[&["日本", "語"], &["本"]]);
        let mut pipeline = pipeline(dictionary());
        pipeline.run(table, &input, Some(&output)).await.unwrap();
        outputs.push(fs::read(&output).unwrap());
    }

    assert_eq!(outputs[0], outputs[1]);
}

#[tokio::test]
async fn test_zero_data_rows() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("empty.docx");
    let table = MemoryTable::with_kanji(&[]);
    let mut pipeline = pipeline(dictionary());

    let report = pipeline.run(table, &input, None).await.unwrap();

    assert_eq!((report.rows, report.entries), (0, 0));
    assert!(report.output.exists());
    assert!(pipeline.source().calls().is_empty());
    assert_eq!(
        progress_output(pipeline),
        "Starting search for 0 kanji compounds...\n"
    );
}

#[tokio::test]
async fn test_failed_lookup_aborts_without_saving() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("list.docx");
    let table = MemoryTable::with_kanji(&[&["日本"], &["未知"], &["語"]]);
    let mut pipeline = pipeline(dictionary());

    let result = pipeline.run(table, &input, None).await;

    match result {
        Err(PipelineError::Lookup { row, term, .. }) => {
            assert_eq!(row, 2);
            assert_eq!(term, "未知");
        }
        other => panic!("expected lookup failure, got {:?}", other),
    }
    assert!(!dir.path().join("new list.docx").exists());
    assert_eq!(pipeline.source().calls(), vec!["日本", "未知"]);
}

#[tokio::test]
async fn test_missing_column_is_a_table_error() {
    let mut table = MemoryTable::with_kanji(&[&["語"]]);
    let mut pipeline = pipeline(dictionary()).with_layout(ColumnLayout::new(7, 4));

    let result = pipeline.augment(&mut table).await;

    assert!(matches!(
        result,
        Err(PipelineError::Table(TableError::Structure(_)))
    ));
}

#[tokio::test]
async fn test_same_columns_rejected() {
    let table = MemoryTable::with_kanji(&[&["語"]]);
    let mut pipeline = pipeline(dictionary()).with_layout(ColumnLayout::new(3, 3));

    let result = pipeline.run(table, Path::new("list.docx"), None).await;

    assert!(matches!(result, Err(PipelineError::Config(_))));
    assert!(pipeline.source().calls().is_empty());
}
