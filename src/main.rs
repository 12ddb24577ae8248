use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use symhuff::assembly::parse_manifest;
use symhuff::config::{CoderConfig, DEFAULT_CONFIG_FILE};
use symhuff::container::{self, ContainerOptions};
use symhuff::report::{display_symbol, CompressionReport};
use symhuff::HuffmanCoder;

#[derive(Parser)]
#[command(name = "symhuff")]
#[command(about = "Huffman compression and dependency ordering")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, global = true, help = "Config file path")]
    config: Option<String>,

    #[arg(long, global = true, help = "Skip checksum verification (overrides config)")]
    no_verify: bool,

    #[arg(long, global = true, help = "Output as JSON")]
    json: bool,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Compress a file into the symhuff container format
    Compress {
        input: PathBuf,
        /// Defaults to the input path with the configured extension appended
        output: Option<PathBuf>,
    },
    /// Restore a file written by `compress`
    Decompress {
        input: PathBuf,
        /// Defaults to the input path without its extension
        output: Option<PathBuf>,
    },
    /// Show the frequency table, codes and statistics for a file
    Inspect { input: PathBuf },
    /// Order the items of a dependency manifest
    Order {
        manifest: PathBuf,
        #[arg(long, help = "Print numbered assembly steps")]
        steps: bool,
    },
    GenerateConfig {
        #[arg(long, default_value = DEFAULT_CONFIG_FILE, help = "Config file path")]
        output: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = CoderConfig::load(cli.config.as_deref())?;
    if cli.no_verify {
        config.verify_checksum = false;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let json = cli.json;
    if let Err(e) = run(cli.command, &config, json) {
        if json {
            println!("{}", serde_json::json!({"error": format!("{e:#}")}));
        } else {
            eprintln!("❌ {e:#}");
        }
        return Err(e);
    }
    Ok(())
}

fn run(command: Commands, config: &CoderConfig, json: bool) -> Result<()> {
    let options = config.container_options();
    match command {
        Commands::Compress { input, output } => {
            let output = output.unwrap_or_else(|| with_extension(&input, &config.extension));
            compress_file(&input, &output, config, &options, json)
        }
        Commands::Decompress { input, output } => {
            let output = match output {
                Some(output) => output,
                None => without_extension(&input, &config.extension)?,
            };
            decompress_file(&input, &output, config, &options, json)
        }
        Commands::Inspect { input } => inspect_file(&input, config, &options, json),
        Commands::Order { manifest, steps } => order_manifest(&manifest, steps, json),
        Commands::GenerateConfig { output } => {
            CoderConfig::default().save(&output)?;
            if json {
                println!("{}", serde_json::json!({"success": true, "config_file": output}));
            } else {
                println!("✅ Wrote default config to {}", output);
            }
            Ok(())
        }
    }
}

fn read_input(path: &Path, config: &CoderConfig) -> Result<Vec<u8>> {
    let size = std::fs::metadata(path)
        .with_context(|| format!("reading {}", path.display()))?
        .len();
    if size > config.max_input_size as u64 {
        bail!(
            "{} is {} bytes, above the configured limit of {}",
            path.display(),
            size,
            config.max_input_size
        );
    }
    let data = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    debug!("read {} bytes from {}", data.len(), path.display());
    Ok(data)
}

fn compress_file(
    input: &Path,
    output: &Path,
    config: &CoderConfig,
    options: &ContainerOptions,
    json: bool,
) -> Result<()> {
    let data = read_input(input, config)?;
    let compressed = container::compress(&data, options)?;
    std::fs::write(output, &compressed).with_context(|| format!("writing {}", output.display()))?;
    info!("compressed {} -> {}", input.display(), output.display());

    let ratio = if data.is_empty() {
        0.0
    } else {
        compressed.len() as f64 / data.len() as f64
    };
    if json {
        println!(
            "{}",
            serde_json::json!({
                "success": true,
                "input": input,
                "output": output,
                "original_size": data.len(),
                "compressed_size": compressed.len(),
                "compression_ratio": ratio
            })
        );
    } else {
        println!("📦 Compressing {}", input.display());
        println!("=====================");
        println!("✅ Wrote {}", output.display());
        println!("   Original size: {} bytes", data.len());
        println!("   Compressed size: {} bytes", compressed.len());
        println!("   Ratio: {:.1}%", ratio * 100.0);
    }
    Ok(())
}

fn decompress_file(
    input: &Path,
    output: &Path,
    config: &CoderConfig,
    options: &ContainerOptions,
    json: bool,
) -> Result<()> {
    let data = read_input(input, config)?;
    let restored = container::decompress(&data, options)
        .with_context(|| format!("decompressing {}", input.display()))?;
    std::fs::write(output, &restored).with_context(|| format!("writing {}", output.display()))?;
    info!("decompressed {} -> {}", input.display(), output.display());

    if json {
        println!(
            "{}",
            serde_json::json!({
                "success": true,
                "input": input,
                "output": output,
                "restored_size": restored.len(),
                "checksum_verified": options.verify_checksum
            })
        );
    } else {
        println!("📂 Decompressing {}", input.display());
        println!("=======================");
        println!("✅ Wrote {}", output.display());
        println!("   Restored size: {} bytes", restored.len());
        if !options.verify_checksum {
            println!("   ⚠️  Checksum not verified");
        }
    }
    Ok(())
}

fn inspect_file(input: &Path, config: &CoderConfig, options: &ContainerOptions, json: bool) -> Result<()> {
    let data = read_input(input, config)?;
    let coder = HuffmanCoder::from_input(&data);
    let compressed = container::compress(&data, options)?;
    let report = CompressionReport::analyze(&coder, compressed.len() as u64);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("🔍 Huffman Inspection: {}", input.display());
    println!("==========================");
    println!("   Original size: {} bytes", report.original_size);
    println!("   Compressed size: {} bytes", report.compressed_size);
    println!("   Distinct symbols: {}", report.distinct_symbols);
    println!("   Tree depth: {}", report.tree_depth);
    println!("   Entropy: {:.3} bits/symbol", report.entropy_bits);
    println!("   Average code: {:.3} bits/symbol", report.average_code_length);
    println!("   Fingerprint: {}", report.fingerprint);
    println!();
    println!("   Symbol   Count      Code");
    for stat in report.symbols.iter().take(32) {
        println!("   {:<8} {:<10} {}", display_symbol(stat.symbol), stat.count, stat.code);
    }
    if report.symbols.len() > 32 {
        println!("   ... and {} more", report.symbols.len() - 32);
    }
    for insight in report.get_insights() {
        println!("   💡 {}", insight);
    }
    Ok(())
}

fn order_manifest(manifest: &Path, steps: bool, json: bool) -> Result<()> {
    let text = std::fs::read_to_string(manifest)
        .with_context(|| format!("reading {}", manifest.display()))?;
    let graph = parse_manifest(&text)?;
    let lines = if steps {
        graph.assembly_steps()?
    } else {
        graph.topological_order()?
    };

    if json {
        println!("{}", serde_json::json!({"order": lines, "count": lines.len()}));
    } else {
        println!("📋 Assembly Order");
        println!("=================");
        for line in &lines {
            println!("   {}", line);
        }
    }
    Ok(())
}

fn with_extension(path: &Path, extension: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}

fn without_extension(path: &Path, extension: &str) -> Result<PathBuf> {
    match path.extension() {
        Some(ext) if ext == extension => Ok(path.with_extension("")),
        _ => bail!(
            "{} does not end in .{}; pass an output path",
            path.display(),
            extension
        ),
    }
}
