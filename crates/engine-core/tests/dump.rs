use connectors::{error::CursorError, memory::MemoryCursor};
use engine_config::{
    error::ConfigError,
    settings::{
        format::OutputFormat,
        validated::{DumpSettings, DumpSettingsBuilder},
    },
};
use engine_core::{
    dump::{DumpSummary, dump},
    encoder::sql::statement::CHARSET_POSTAMBLE,
    error::{DumpError, EncodeError},
};
use model::{
    core::value::Cell,
    records::{columns::ColumnSet, row::Row},
};
use std::{
    collections::BTreeSet,
    io::{self, Write},
};

fn columns() -> ColumnSet {
    ColumnSet::new(["id", "name"]).unwrap()
}

fn row(id: i64, name: Option<&str>) -> Row {
    Row::new(vec![Cell::from(id), Cell::from(name)])
}

fn people() -> MemoryCursor {
    MemoryCursor::new(
        columns(),
        vec![row(1, Some("Alice")), row(2, Some("O'Brien")), row(3, None)],
    )
}

fn sql_settings() -> DumpSettingsBuilder {
    DumpSettingsBuilder::new(OutputFormat::Sql)
        .alias("users")
        .set_names(false)
}

async fn run(cursor: &mut MemoryCursor, settings: &DumpSettings) -> (String, DumpSummary) {
    let mut out = Vec::new();
    let summary = dump(cursor, settings, &mut out).await.unwrap();
    (String::from_utf8(out).unwrap(), summary)
}

#[tokio::test]
async fn test_single_insert_statement() {
    let settings = sql_settings().build();
    let (output, summary) = run(&mut people(), &settings).await;

    assert_eq!(
        output,
        "INSERT INTO `users` (`id`, `name`) VALUES\n\
         (1, 'Alice'),\n\
         (2, 'O\\'Brien'),\n\
         (3, NULL);\n"
    );
    assert_eq!(summary.rows, 3);
    assert_eq!(summary.statements, 1);
    assert_eq!(summary.bytes, output.len() as u64);
}

#[tokio::test]
async fn test_batch_size_splits_statements() {
    // two of these tuples cross one kibibyte, one does not
    let name = "n".repeat(600);
    let mut cursor = MemoryCursor::new(
        columns(),
        (1..=3).map(|id| row(id, Some(&name))).collect(),
    );
    let settings = sql_settings().batch_size_kib(1).build();
    let (output, summary) = run(&mut cursor, &settings).await;

    assert_eq!(summary.statements, 2);
    let statements: Vec<&str> = output
        .split_inclusive(";\n")
        .collect();
    assert_eq!(statements.len(), 2);
    assert_eq!(statements[0].matches(&name).count(), 2);
    assert_eq!(statements[1].matches(&name).count(), 1);
    assert!(statements[1].starts_with("INSERT INTO `users`"));
}

#[tokio::test]
async fn test_empty_alias_reads_nothing() {
    let settings = DumpSettingsBuilder::new(OutputFormat::Sql).alias("").build();
    let mut cursor = people();
    let mut out = Vec::new();

    let err = dump(&mut cursor, &settings, &mut out).await.unwrap_err();
    assert!(matches!(err, DumpError::Config(ConfigError::MissingAlias)));
    assert_eq!(cursor.rows_served(), 0);
    assert!(out.is_empty());
}

#[tokio::test]
async fn test_unsupported_charset_reads_nothing() {
    let settings = sql_settings().charset("sjis").build();
    let mut cursor = people();
    let mut out = Vec::new();

    let err = dump(&mut cursor, &settings, &mut out).await.unwrap_err();
    assert!(matches!(
        err,
        DumpError::Config(ConfigError::UnsupportedCharset(_))
    ));
    assert_eq!(cursor.rows_served(), 0);
    assert!(out.is_empty());
}

#[tokio::test]
async fn test_on_duplicate_key_update() {
    let name = "d".repeat(600);
    let mut cursor = MemoryCursor::new(
        columns(),
        (1..=3).map(|id| row(id, Some(&name))).collect(),
    );
    let settings = sql_settings()
        .on_duplicate_key_update(true)
        .batch_size_kib(1)
        .build();
    let (output, summary) = run(&mut cursor, &settings).await;

    assert_eq!(summary.statements, 2);
    let clause = "ON DUPLICATE KEY UPDATE\n`id` = VALUES(`id`),\n`name` = VALUES(`name`);\n";
    assert_eq!(output.matches(clause).count(), 2);
    assert!(output.ends_with(clause));
}

#[tokio::test]
async fn test_special_characters_are_escaped() {
    let mut cursor = MemoryCursor::new(columns(), vec![row(1, Some("line\nbreak \\ here"))]);
    let (output, _) = run(&mut cursor, &sql_settings().build()).await;
    assert!(output.contains("(1, 'line\\nbreak \\\\ here')"));
}

#[tokio::test]
async fn test_insert_ignore() {
    let settings = sql_settings().insert_ignore(true).build();
    let (output, _) = run(&mut people(), &settings).await;
    assert!(output.starts_with("INSERT IGNORE INTO `users` (`id`, `name`) VALUES\n"));
}

#[tokio::test]
async fn test_charset_preamble_once_per_dump() {
    let settings = sql_settings()
        .set_names(true)
        .charset("utf8mb4")
        .batch_size_kib(0)
        .build();
    let (output, summary) = run(&mut people(), &settings).await;

    assert_eq!(summary.statements, 3);
    assert!(output.starts_with("/*!40101 SET @OLD_CHARACTER_SET_CLIENT=@@CHARACTER_SET_CLIENT */;\n"));
    assert_eq!(output.matches("SET NAMES utf8mb4;\n\n").count(), 1);
    assert_eq!(output.matches(CHARSET_POSTAMBLE).count(), 1);
    assert!(output.ends_with(CHARSET_POSTAMBLE));
}

#[tokio::test]
async fn test_empty_result_still_brackets_the_dump() {
    let settings = sql_settings().set_names(true).build();
    let mut cursor = MemoryCursor::new(columns(), Vec::new());
    let (output, summary) = run(&mut cursor, &settings).await;

    assert_eq!(summary.rows, 0);
    assert_eq!(summary.statements, 0);
    assert!(!output.contains("INSERT"));
    assert_eq!(output.matches("SET NAMES utf8;").count(), 1);
    assert!(output.ends_with(CHARSET_POSTAMBLE));
}

#[tokio::test]
async fn test_json_lines() {
    let settings = DumpSettings::default(OutputFormat::Json);
    let (output, summary) = run(&mut people(), &settings).await;

    assert_eq!(summary.rows, 3);
    assert_eq!(summary.statements, 0);

    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 3);
    let columns = columns();
    let expected_keys: BTreeSet<&str> = columns.iter().collect();
    for line in &lines {
        let value: serde_json::Value = serde_json::from_str(line).unwrap();
        let keys: BTreeSet<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, expected_keys);
    }

    let third: serde_json::Value = serde_json::from_str(lines[2]).unwrap();
    assert_eq!(third["id"], 3);
    assert!(third["name"].is_null());
    let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
    assert_eq!(second["name"], "O'Brien");
}

#[tokio::test]
async fn test_json_rejects_nan() {
    let mut cursor = MemoryCursor::new(
        ColumnSet::new(["ratio"]).unwrap(),
        vec![Row::new(vec![Cell::from(f64::NAN)])],
    );
    let mut out = Vec::new();
    let err = dump(&mut cursor, &DumpSettings::default(OutputFormat::Json), &mut out)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DumpError::Encoding(EncodeError::NonFiniteNumber { ref column }) if column == "ratio"
    ));
}

#[tokio::test]
async fn test_csv_single_null_column() {
    let mut cursor = MemoryCursor::new(
        ColumnSet::new(["n"]).unwrap(),
        vec![
            Row::new(vec![Cell::Null]),
            Row::new(vec![Cell::from("")]),
        ],
    );
    let (output, summary) = run(&mut cursor, &DumpSettings::default(OutputFormat::Csv)).await;

    assert_eq!(output, "\n\n");
    assert_eq!(summary.bytes, 2);
}

#[tokio::test]
async fn test_csv_records() {
    let mut cursor = MemoryCursor::new(
        columns(),
        vec![
            row(1, Some("Alice")),
            row(2, Some("Smith, \"Jr\"")),
            row(3, None),
        ],
    );
    let (output, summary) = run(&mut cursor, &DumpSettings::default(OutputFormat::Csv)).await;

    assert_eq!(summary.rows, 3);
    assert_eq!(output, "1,Alice\n2,\"Smith, \"\"Jr\"\"\"\n3,\n");
}

#[tokio::test]
async fn test_cursor_failure_keeps_partial_output() {
    let mut cursor = people().failing_after(2);
    let mut out = Vec::new();

    let err = dump(&mut cursor, &DumpSettings::default(OutputFormat::Json), &mut out)
        .await
        .unwrap_err();
    assert!(matches!(err, DumpError::Cursor(CursorError::Source(_))));
    assert_eq!(String::from_utf8(out).unwrap().lines().count(), 2);
}

#[tokio::test]
async fn test_cursor_failure_drops_unflushed_batch() {
    let mut cursor = people().failing_after(2);
    let mut out = Vec::new();

    let err = dump(&mut cursor, &sql_settings().build(), &mut out)
        .await
        .unwrap_err();
    assert!(matches!(err, DumpError::Cursor(_)));
    assert!(out.is_empty());
}

/// Sink whose reader went away.
struct ClosedPipe;

impl Write for ClosedPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "reader closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "reader closed"))
    }
}

#[tokio::test]
async fn test_write_failure_aborts_every_format() {
    let settings = [
        DumpSettings::default(OutputFormat::Csv),
        DumpSettings::default(OutputFormat::Json),
        sql_settings().build(),
        sql_settings().set_names(true).build(),
    ];

    for settings in &settings {
        let err = dump(&mut people(), settings, ClosedPipe).await.unwrap_err();
        assert!(
            matches!(err, DumpError::Sink(ref e) if e.kind() == io::ErrorKind::BrokenPipe),
            "{}: {err:?}",
            settings.format()
        );
    }
}
