use std::{path::PathBuf, sync::Arc};

use scour::{
    ContentTypeMap,
    DataDir,
    ExtractorRegistry,
    FingerprintStore,
    Outcome,
    Processor,
    SearchIndex,
    extract::OcrConfig,
    processor::DEFAULT_MAX_FILE_SIZE,
    walker,
};

fn terms(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

struct World {
    _tmp: tempfile::TempDir,
    docs: PathBuf,
    data_dir: DataDir,
    index: Arc<SearchIndex>,
    processor: Processor,
}

fn world() -> World {
    let tmp = tempfile::tempdir().unwrap();
    let docs = tmp.path().join("docs");
    std::fs::create_dir(&docs).unwrap();

    let data_dir = DataDir::resolve(Some(&tmp.path().join("data"))).unwrap();
    let index = Arc::new(SearchIndex::open(&data_dir.index_dir().unwrap()).unwrap());
    let fingerprints =
        FingerprintStore::open(&data_dir.fingerprint_dir().unwrap()).unwrap();

    let processor = Processor::new(
        ExtractorRegistry::with_defaults(OcrConfig {
            pdf_density: 300,
            tessdata_dir: None,
        }),
        ContentTypeMap::new(),
        fingerprints,
        index.clone(),
        DEFAULT_MAX_FILE_SIZE,
    );

    World {
        _tmp: tmp,
        docs,
        data_dir,
        index,
        processor,
    }
}

#[test]
fn index_rerun_and_edit_cycle() {
    let w = world();
    std::fs::write(w.docs.join("notes.txt"), "hello world").unwrap();

    // First run: one document indexed, one fingerprint committed.
    let files = walker::discover_files(&w.docs, &[]).unwrap();
    let first = w.processor.process_many(&files);
    assert_eq!(first.indexed, 1);
    assert_eq!(first.unchanged, 0);
    assert!(first.failures.is_empty());

    let hits = w.index.query(&terms(&["hello"]), 10, 0).unwrap();
    assert_eq!(hits.len(), 1);
    assert!(hits[0].path.ends_with("notes.txt"));
    assert_eq!(hits[0].content_type, "text/plain");
    assert!(hits[0].snippet.contains("hello world"));

    // Second run over unchanged content: a no-op.
    let second = w.processor.process_many(&files);
    assert_eq!(second.indexed, 0);
    assert_eq!(second.unchanged, 1);

    // Edit the file and rerun: exactly one document re-indexed.
    std::fs::write(w.docs.join("notes.txt"), "hello world!").unwrap();
    let third = w.processor.process_many(&files);
    assert_eq!(third.indexed, 1);
    assert_eq!(third.unchanged, 0);

    let hits = w.index.query(&terms(&["hello"]), 10, 0).unwrap();
    assert_eq!(hits.len(), 1, "re-index replaces, never duplicates");
    assert!(hits[0].snippet.contains("hello world!"));

    // And the updated fingerprint makes the next run a no-op again.
    let fourth = w.processor.process_many(&files);
    assert_eq!(fourth.unchanged, 1);
}

#[test]
fn single_file_processing() {
    let w = world();
    let path = w.docs.join("todo.org");
    std::fs::write(&path, "remember the milk").unwrap();

    // Org files resolve through the built-in override to the text handler.
    assert_eq!(w.processor.process_file(&path).unwrap(), Outcome::Indexed);

    let hits = w.index.query(&terms(&["milk"]), 10, 0).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].content_type, "text/x-org");
}

#[test]
fn fingerprints_survive_process_restart() {
    let w = world();
    let path = w.docs.join("notes.txt");
    std::fs::write(&path, "durable content").unwrap();
    assert_eq!(w.processor.process_file(&path).unwrap(), Outcome::Indexed);
    w.index.close().unwrap();

    // A fresh processor over the same data directory sees the fingerprint.
    drop(w.processor);
    drop(w.index);
    let index =
        Arc::new(SearchIndex::open(&w.data_dir.index_dir().unwrap()).unwrap());
    let fingerprints =
        FingerprintStore::open(&w.data_dir.fingerprint_dir().unwrap()).unwrap();
    let processor = Processor::new(
        ExtractorRegistry::with_defaults(OcrConfig {
            pdf_density: 300,
            tessdata_dir: None,
        }),
        ContentTypeMap::new(),
        fingerprints,
        index.clone(),
        DEFAULT_MAX_FILE_SIZE,
    );

    assert_eq!(processor.process_file(&path).unwrap(), Outcome::Unchanged);
    let hits = index.query(&terms(&["durable"]), 10, 0).unwrap();
    assert_eq!(hits.len(), 1);
}

#[test]
fn walker_skips_the_data_directory() {
    let tmp = tempfile::tempdir().unwrap();
    let docs = tmp.path().join("docs");
    let data = docs.join("data");
    std::fs::create_dir_all(&data).unwrap();
    std::fs::write(docs.join("notes.txt"), "outside").unwrap();
    std::fs::write(data.join("blob"), "inside").unwrap();

    let files = walker::discover_files(&docs, &[data]).unwrap();
    assert_eq!(files.len(), 1);
    assert!(files[0].ends_with("notes.txt"));
}
