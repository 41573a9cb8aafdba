//! Integration tests for the input collectors

mod common;

use argfeed::error::CollectResult;
use argfeed::{Collected, CollectError, Program, Source};
use common::{args, create_files, FailingInput, Recorder};
use std::io;

type Calls = Recorder<CollectResult<Collected>>;

#[tokio::test]
async fn test_stdin_without_positionals() {
    let calls = Calls::default();
    let chunks = Recorder::<String>::default();
    let data = chunks.clone();
    let mut program = Program::new(args(&["prog"]))
        .with_input(&b"line one\nline two\n"[..])
        .on_stdin_data(move |chunk| data.push(chunk.to_string()));

    // requested before parsing so the parse-time read serves both the
    // callback and the data listener
    let sink = calls.clone();
    program.stdin(false, move |r| sink.push(r)).await;
    program.parse().await.unwrap();

    let files_called = calls.clone();
    program.files(move |r| files_called.push(r)).await;

    let results = calls.values();
    assert_eq!(results.len(), 1);
    let collected = results[0].as_ref().unwrap();
    assert_eq!(collected.contents, "line one\nline two\n");
    assert_eq!(collected.source, Source::Stdin);
    assert_eq!(chunks.values().concat(), "line one\nline two\n");
}

#[tokio::test]
async fn test_files_concatenated_in_order() {
    let (_dir, paths) = create_files(&[("a.txt", "A"), ("b.txt", "B")]);
    let mut argv = args(&["prog"]);
    argv.extend(paths.clone());

    let data = Recorder::<String>::default();
    let on_data = data.clone();
    let whole = Recorder::<(String, Vec<String>)>::default();
    let on_files = whole.clone();

    let mut program = Program::new(argv)
        .with_input(&b"unused"[..])
        .on_files_data(move |body| on_data.push(body.to_string()))
        .on_files(move |text, files| on_files.push((text.to_string(), files.to_vec())));

    program.parse().await.unwrap();
    let seen_by_listeners = whole.len();

    let calls = Calls::default();
    let sink = calls.clone();
    program.files(move |r| sink.push(r)).await;

    let results = calls.values();
    assert_eq!(results.len(), 1);
    let collected = results[0].as_ref().unwrap();
    assert_eq!(collected.contents, "AB");
    assert_eq!(collected.files(), paths.as_slice());

    // once while parsing for the listeners, once for the explicit request
    assert_eq!(seen_by_listeners, 1);
    assert_eq!(data.values(), vec!["A", "B", "A", "B"]);
    assert_eq!(whole.values()[0], ("AB".to_string(), paths));
}

#[tokio::test]
async fn test_missing_file_reports_once_and_stops() {
    let (dir, paths) = create_files(&[("b.txt", "B")]);
    let missing = dir.path().join("a.txt").display().to_string();

    let reads = Recorder::<String>::default();
    let on_data = reads.clone();
    let errors = Recorder::<String>::default();
    let on_error = errors.clone();

    let mut program = Program::new(vec!["prog".to_string(), missing, paths[0].clone()])
        .on_files_data(move |body| on_data.push(body.to_string()))
        .on_error(move |e| on_error.push(e.to_string()));

    let calls = Calls::default();
    let sink = calls.clone();
    program.files(move |r| sink.push(r)).await;
    program.parse().await.unwrap();

    let results = calls.values();
    assert_eq!(results.len(), 1);
    match &results[0] {
        Err(CollectError::ReadFile { path, source }) => {
            assert!(path.ends_with("a.txt"));
            assert_eq!(source.kind(), io::ErrorKind::NotFound);
        }
        other => panic!("expected a read error, got {:?}", other),
    }
    assert_eq!(reads.len(), 0);
    assert_eq!(errors.len(), 1);
}

#[tokio::test]
async fn test_deferred_requests_fire_once() {
    let (_dir, paths) = create_files(&[("a.txt", "A")]);
    let mut argv = args(&["prog"]);
    argv.extend(paths);

    let calls = Calls::default();
    let mut program = Program::new(argv).with_input(&b"from stdin"[..]);

    let stdin_sink = calls.clone();
    program.stdin(false, move |r| stdin_sink.push(r)).await;
    let files_sink = calls.clone();
    program.files(move |r| files_sink.push(r)).await;
    assert_eq!(calls.len(), 0);

    program.parse().await.unwrap();

    // positional arguments were given, so only the files request applies
    let results = calls.values();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].as_ref().unwrap().contents, "A");

    program.parse().await.unwrap();
    assert_eq!(calls.len(), 1);
}

#[tokio::test]
async fn test_forced_stdin_alongside_files() {
    let (_dir, paths) = create_files(&[("a.txt", "A")]);
    let mut argv = args(&["prog"]);
    argv.extend(paths);

    let calls = Calls::default();
    let mut program = Program::new(argv).with_input(&b"piped"[..]);

    let stdin_sink = calls.clone();
    program.stdin(true, move |r| stdin_sink.push(r)).await;
    let files_sink = calls.clone();
    program.files(move |r| files_sink.push(r)).await;
    program.parse().await.unwrap();

    let contents: Vec<String> = calls
        .values()
        .into_iter()
        .map(|r| r.unwrap().contents)
        .collect();
    assert_eq!(contents, vec!["piped", "A"]);
}

#[tokio::test]
async fn test_collect_uses_whichever_applies() {
    let calls = Calls::default();
    let sink = calls.clone();
    let mut program = Program::new(args(&["prog"])).with_input(&b"only stdin"[..]);

    program.parse().await.unwrap();
    program.collect(move |r| sink.push(r)).await;

    let results = calls.values();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].as_ref().unwrap().contents, "only stdin");
}

#[tokio::test]
async fn test_no_read_without_demand() {
    let calls = Recorder::<String>::default();
    let on_error = calls.clone();
    let mut program = Program::new(args(&["prog"]))
        .on_error(move |e| on_error.push(e.to_string()));

    // default input is the process stdin; nothing asked for it
    program.parse().await.unwrap();
    assert_eq!(calls.len(), 0);
}

#[tokio::test]
async fn test_stdin_error_reaches_callback_and_listener() {
    let errors = Recorder::<String>::default();
    let on_error = errors.clone();
    let mut program = Program::new(args(&["prog"]))
        .with_input(FailingInput)
        .on_error(move |e| on_error.push(e.to_string()));

    program.parse().await.unwrap();

    let calls = Calls::default();
    let sink = calls.clone();
    program.stdin(false, move |r| sink.push(r)).await;

    let results = calls.values();
    assert_eq!(results.len(), 1);
    match &results[0] {
        Err(CollectError::Stdin(source)) => assert_eq!(source.kind(), io::ErrorKind::BrokenPipe),
        other => panic!("expected a stdin error, got {:?}", other),
    }
    assert_eq!(errors.values(), vec!["Failed to read standard input: pipe closed"]);
}

#[tokio::test]
async fn test_unknown_flag_is_read_as_a_file() {
    let (_dir, paths) = create_files(&[("a.txt", "A")]);
    let mut argv = args(&["prog", "--bogus"]);
    argv.extend(paths.clone());

    let calls = Calls::default();
    let sink = calls.clone();
    let mut program = Program::new(argv);
    program.files(move |r| sink.push(r)).await;
    program.parse().await.unwrap();

    let results = calls.values();
    assert_eq!(results.len(), 1);
    match &results[0] {
        Err(CollectError::ReadFile { path, .. }) => assert_eq!(path, "--bogus"),
        other => panic!("expected the unknown flag to be read as a path, got {:?}", other),
    }
}
