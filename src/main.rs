use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use scour::{
    ContentTypeMap,
    DataDir,
    ExtractorRegistry,
    FingerprintStore,
    Processor,
    QueryHit,
    SearchIndex,
    cli::{Cli, Command, IndexArgs, QueryArgs},
    content_type,
    error::Result,
    extract::OcrConfig,
    processor::BatchReport,
    walker,
};

fn init_tracing(verbose: u8) {
    let filter = if let Ok(env) = std::env::var("SCOUR_LOG") {
        EnvFilter::new(env)
    } else {
        match verbose {
            0 => EnvFilter::new("info"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Index(args) => {
            let data_dir = DataDir::resolve(cli.data_dir.as_deref())?;
            cmd_index(&data_dir, &args)?;
        }
        Command::Query(args) => {
            let data_dir = DataDir::resolve(cli.data_dir.as_deref())?;
            cmd_query(&data_dir, &args)?;
        }
        Command::Completions(args) => {
            args.generate();
        }
    }

    Ok(())
}

fn cmd_index(data_dir: &DataDir, args: &IndexArgs) -> Result<()> {
    let mut types = ContentTypeMap::new();
    for mapping in &args.mime_mappings {
        let (ext, content_type) = content_type::parse_mapping(mapping)?;
        types.add_mapping(&ext, &content_type);
    }

    let ocr = OcrConfig {
        pdf_density: args.pdf_density,
        tessdata_dir: args
            .tessdata
            .clone()
            .or_else(|| std::env::var_os("TESSDATA_PREFIX").map(PathBuf::from)),
    };

    let index = Arc::new(SearchIndex::open(&data_dir.index_dir()?)?);
    let fingerprints = FingerprintStore::open(&data_dir.fingerprint_dir()?)?;
    let processor = Processor::new(
        ExtractorRegistry::with_defaults(ocr),
        types,
        fingerprints,
        index.clone(),
        args.max_size,
    );

    let mut report = BatchReport::default();
    for path in &args.paths {
        let meta = match std::fs::metadata(path) {
            Ok(m) => m,
            Err(e) => {
                warn!("skipping {}: {e}", path.display());
                continue;
            }
        };

        if meta.is_dir() {
            let files =
                walker::discover_files(path, &[data_dir.root().to_path_buf()])?;
            report.merge(processor.process_many(&files));
        } else {
            report.merge(processor.process_many(std::slice::from_ref(path)));
        }
    }

    for (path, err) in &report.failures {
        warn!("failed to index {}: {err}", path.display());
    }
    println!(
        "Indexed {} file(s), {} unchanged, {} failed",
        report.indexed,
        report.unchanged,
        report.failures.len()
    );

    index.close()
}

fn cmd_query(data_dir: &DataDir, args: &QueryArgs) -> Result<()> {
    let index = SearchIndex::open(&data_dir.index_dir()?)?;
    let hits = index.query(&args.terms, args.count, args.offset)?;

    if args.json {
        format_json(&hits, &args.terms)?;
    } else {
        format_human(&hits);
    }

    index.close()
}

fn format_human(hits: &[QueryHit]) {
    if hits.is_empty() {
        println!("No results found.");
        return;
    }

    for (i, hit) in hits.iter().enumerate() {
        println!("{:>3}. [{:.3}] {}", i + 1, hit.score, hit.path);
        for line in hit.snippet.lines() {
            println!("     {line}");
        }
    }
    println!("\n{} result(s)", hits.len());
}

fn format_json(hits: &[QueryHit], terms: &[String]) -> Result<()> {
    let output = serde_json::json!({
        "query": terms.join(" "),
        "result_count": hits.len(),
        "results": hits,
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&output)
            .map_err(|e| scour::Error::Config(e.to_string()))?
    );
    Ok(())
}
