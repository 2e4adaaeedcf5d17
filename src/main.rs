use std::env;
use std::fs;
use std::fs::File;
use std::path::Path;
use std::process;
use std::str::FromStr;

use txtres_editor::txtres::{csv_io, encoder, table, validate};
use txtres_editor::{FormatConfig, SelectionPolicy, TxtResFile};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        usage(&args[0]);
        process::exit(1);
    }

    let config = match parse_config(&args) {
        Ok(config) => config,
        Err(msg) => {
            eprintln!("ERROR: {}", msg);
            process::exit(1);
        }
    };

    let result = match args[1].as_str() {
        "export" => run_export(Path::new(&args[2]), config),
        "convert" => {
            if args.len() < 4 {
                usage(&args[0]);
                process::exit(1);
            }
            let policy = match parse_policy(&args) {
                Ok(policy) => policy,
                Err(msg) => {
                    eprintln!("ERROR: {}", msg);
                    process::exit(1);
                }
            };
            run_convert(Path::new(&args[2]), Path::new(&args[3]), policy, config)
        }
        "verify" => {
            if args.len() < 4 {
                usage(&args[0]);
                process::exit(1);
            }
            run_verify(Path::new(&args[2]), Path::new(&args[3]), config)
        }
        other => {
            eprintln!("ERROR: Unknown command {:?}", other);
            usage(&args[0]);
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("\nERROR: {}", e);
        process::exit(1);
    }
}

fn usage(program: &str) {
    eprintln!("Usage:");
    eprintln!("  {} export <file> [--offset <HEADER_BYTES>]", program);
    eprintln!(
        "  {} convert <file> <edited.csv> [--offset <HEADER_BYTES>] [--policy <SELECTOR>]",
        program
    );
    eprintln!("  {} verify <file-a> <file-b>", program);
}

/// Parse the shared `--offset` flag into a config. Defaults to the standard
/// 17-byte header.
fn parse_config(args: &[String]) -> Result<FormatConfig, String> {
    let mut config = FormatConfig::default();
    if let Some(idx) = args.iter().position(|arg| arg == "--offset") {
        let value = args
            .get(idx + 1)
            .ok_or("--offset flag requires an argument.")?;
        config.header_len = value
            .parse::<u64>()
            .map_err(|_| format!("Invalid header byte count: {:?}", value))?;
    }
    Ok(config)
}

fn parse_policy(args: &[String]) -> Result<SelectionPolicy, String> {
    match args.iter().position(|arg| arg == "--policy") {
        Some(idx) => {
            let value = args
                .get(idx + 1)
                .ok_or("--policy flag requires an argument.")?;
            SelectionPolicy::from_str(value).map_err(|e| e.to_string())
        }
        None => Ok(SelectionPolicy::default()),
    }
}

fn run_export(path: &Path, config: FormatConfig) -> txtres_editor::Result<()> {
    println!("Reading text resource: {}", path.display());
    println!("{}", "=".repeat(60));

    let file = TxtResFile::open(path, config)?;
    let document = &file.document;

    println!("\nStatistics:");
    println!("  Records: {}", document.records.len());
    println!("  Max variants per record: {}", document.max_variants());
    println!("  Header: {} bytes", document.header.len());
    println!("  Footer: {} bytes", document.footer.len());

    let export = csv_io::export_path(path, file.config());
    csv_io::write_table(&export, &file.export_table())?;
    println!("\nWrote editing table: {}", export.display());

    let analysis = csv_io::analysis_path(path, file.config());
    csv_io::write_table(&analysis, &file.variants_table())?;
    println!("Wrote variants analysis: {}", analysis.display());

    Ok(())
}

fn run_convert(
    original: &Path,
    csv_path: &Path,
    policy: SelectionPolicy,
    config: FormatConfig,
) -> txtres_editor::Result<()> {
    println!("Converting {} using {}", original.display(), csv_path.display());
    println!("{}", "=".repeat(60));

    let rows = csv_io::read_rows(csv_path)?;
    let set = table::split_sentinels(rows, &config)?;
    let bytes = encoder::encode(&set, &policy, &config)?;

    let out_path = csv_io::converted_path(original, &config);
    fs::write(&out_path, &bytes)?;
    println!("Wrote {} bytes: {}", bytes.len(), out_path.display());

    report_divergences(original, &out_path, &config)
}

fn run_verify(a: &Path, b: &Path, config: FormatConfig) -> txtres_editor::Result<()> {
    println!("Comparing {} against {}", a.display(), b.display());
    println!("{}", "=".repeat(60));
    report_divergences(a, b, &config)
}

/// Run the chunked comparison and print each divergence as a warning.
/// Divergences are expected when translations were edited; they never fail
/// the run.
fn report_divergences(
    left_path: &Path,
    right_path: &Path,
    config: &FormatConfig,
) -> txtres_editor::Result<()> {
    let mut left = File::open(left_path)?;
    let mut right = File::open(right_path)?;
    let divergences = validate::compare(&mut left, &mut right, config.compare_chunk_len)?;

    if divergences.is_empty() {
        println!("\nByte-for-byte identical.");
        return Ok(());
    }

    for divergence in &divergences {
        match divergence {
            validate::Divergence::SizeMismatch { left, right } => {
                println!("\nWARNING: size mismatch ({} bytes vs {} bytes)", left, right);
            }
            validate::Divergence::ByteMismatch { offset, left, right } => {
                println!(
                    "\nWARNING: first differing chunk at offset {} ({} vs {})",
                    offset,
                    hex::encode(left),
                    hex::encode(right)
                );
            }
        }
    }
    Ok(())
}
