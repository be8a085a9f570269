use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use fastx_kit::seqio::stats::{summarize_records, summary};
use fastx_kit::seqio::{
    self, Alphabet, CodonTable, DEFAULT_CHUNK_SIZE, DEFAULT_LINE_WIDTH, Endpoint, FastaWriter,
    fasta, fastq, reverse_complement,
};
use fastx_kit::{BoundaryMode, InputMode, ReadOptions, Record, WriteOptions};
use rayon::ThreadPoolBuilder;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser, Debug)]
#[command(version, about = "FASTA/FASTQ conversion, rewrapping and per-record statistics")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Length, GC content and sequence type of every record, plus N50.
    Stats {
        input: PathBuf,
        #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,
        /// Destination file; stdout when omitted (required for parquet).
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = ModeArg::Stream)]
        mode: ModeArg,
        #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
        chunk_size: usize,
        /// Tokenize each chunk on its own, without carrying split headers.
        #[arg(long, default_value_t = false)]
        legacy_boundaries: bool,
    },
    /// Rewrites a FASTA file with a fixed line width.
    Rewrap {
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
        #[arg(long, default_value_t = DEFAULT_LINE_WIDTH)]
        line_width: usize,
        /// Terminate lines with CRLF.
        #[arg(long, default_value_t = false)]
        dos: bool,
    },
    /// Reverse-complements every record.
    Revcomp {
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
        #[arg(long, default_value_t = DEFAULT_LINE_WIDTH)]
        line_width: usize,
        /// Complement with U instead of T.
        #[arg(long, default_value_t = false)]
        rna: bool,
    },
    /// Translates every record with the standard codon table.
    Translate {
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
        #[arg(long, default_value_t = DEFAULT_LINE_WIDTH)]
        line_width: usize,
    },
    /// Converts FASTQ reads to FASTA, dropping qualities.
    Fq2fa {
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
        #[arg(long, default_value_t = DEFAULT_LINE_WIDTH)]
        line_width: usize,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
    Parquet,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    Stream,
    Mmap,
}

impl From<ModeArg> for InputMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Stream => InputMode::Stream,
            ModeArg::Mmap => InputMode::Mmap,
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    init_tracing();
    // Size the global pool to the machine instead of RAYON_NUM_THREADS.
    let threads = num_cpus::get();
    let _ = ThreadPoolBuilder::new().num_threads(threads).build_global();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.cmd {
        Cmd::Stats {
            input,
            format,
            output,
            mode,
            chunk_size,
            legacy_boundaries,
        } => {
            let boundary = if legacy_boundaries {
                BoundaryMode::Legacy
            } else {
                BoundaryMode::CarryOver
            };
            let options = ReadOptions::default()
                .with_chunk_size(chunk_size)
                .with_boundary(boundary);
            run_stats(&input, mode.into(), options, format, output.as_deref())
        }
        Cmd::Rewrap {
            input,
            output,
            line_width,
            dos,
        } => {
            let linesep = if dos { "\r\n" } else { "\n" };
            let options = WriteOptions::new(linesep, line_width);
            let written = transform_fasta(&input, &output, &options, |record| record)?;
            info!(records = written, output = %output.display(), "rewrapped fasta");
            Ok(())
        }
        Cmd::Revcomp {
            input,
            output,
            line_width,
            rna,
        } => {
            let alphabet = if rna { Alphabet::Rna } else { Alphabet::Dna };
            let options = WriteOptions::new("\n", line_width);
            let written = transform_fasta(&input, &output, &options, |record| {
                Record::new(record.comment(), reverse_complement(record.sequence(), alphabet))
            })?;
            info!(records = written, output = %output.display(), "reverse-complemented fasta");
            Ok(())
        }
        Cmd::Translate {
            input,
            output,
            line_width,
        } => {
            let table = CodonTable::standard();
            let options = WriteOptions::new("\n", line_width);
            let written = transform_fasta(&input, &output, &options, |record| {
                Record::new(record.comment(), table.translate(record.sequence()))
            })?;
            info!(records = written, output = %output.display(), "translated fasta");
            Ok(())
        }
        Cmd::Fq2fa {
            input,
            output,
            line_width,
        } => {
            let written = fastq_to_fasta(&input, &output, &WriteOptions::new("\n", line_width))?;
            info!(records = written, output = %output.display(), "converted fastq");
            Ok(())
        }
    }
}

fn run_stats(
    input: &Path,
    mode: InputMode,
    options: ReadOptions,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let records = seqio::load_records_with_options(input, mode, options)
        .with_context(|| format!("failed to read {}", input.display()))?;
    if records.is_empty() {
        bail!("no records found in {}", input.display());
    }
    let stats = summarize_records(&records);
    let totals = summary(&stats);
    info!(
        records = totals.records,
        total_length = totals.total_length,
        n50 = ?totals.n50,
        "summarized input"
    );

    match format {
        OutputFormat::Csv | OutputFormat::Json => {
            let text = if format == OutputFormat::Csv {
                seqio::render_csv_stats(&stats)?
            } else {
                let mut json = seqio::render_json_stats(&stats, totals)?;
                json.push('\n');
                json
            };
            match output {
                Some(path) => fs::write(path, text)
                    .with_context(|| format!("failed to write {}", path.display()))?,
                None => print!("{text}"),
            }
        }
        OutputFormat::Parquet => {
            let Some(path) = output else {
                bail!("--output is required when --format parquet");
            };
            let file = fs::File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            seqio::write_parquet_stats(&stats, file)
                .with_context(|| format!("failed to write parquet to {}", path.display()))?;
        }
    }
    Ok(())
}

fn transform_fasta<F>(
    input: &Path,
    output: &Path,
    options: &WriteOptions,
    mut transform: F,
) -> Result<usize>
where
    F: FnMut(Record) -> Record,
{
    let records = fasta::read(Endpoint::path(input))
        .with_context(|| format!("failed to open {}", input.display()))?;
    let file = fs::File::create(output)
        .with_context(|| format!("failed to create {}", output.display()))?;
    let mut writer = FastaWriter::new(file, options.clone())?;
    for record in records {
        let record = record.with_context(|| format!("failed to read {}", input.display()))?;
        writer.write_record(&transform(record))?;
    }
    writer.flush()?;
    Ok(writer.written())
}

fn fastq_to_fasta(input: &Path, output: &Path, options: &WriteOptions) -> Result<usize> {
    let reads = fastq::read(Endpoint::path(input))
        .with_context(|| format!("failed to open {}", input.display()))?;
    let file = fs::File::create(output)
        .with_context(|| format!("failed to create {}", output.display()))?;
    let mut writer = FastaWriter::new(file, options.clone())?;
    for read in reads {
        let read = read.with_context(|| format!("failed to read {}", input.display()))?;
        writer.write_record(&read)?;
    }
    writer.flush()?;
    Ok(writer.written())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("fastx").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn stats_defaults() {
        let cli = parse(&["stats", "in.fa"]);
        match cli.cmd {
            Cmd::Stats {
                format,
                mode,
                chunk_size,
                legacy_boundaries,
                output,
                ..
            } => {
                assert_eq!(format, OutputFormat::Csv);
                assert_eq!(mode, ModeArg::Stream);
                assert_eq!(chunk_size, DEFAULT_CHUNK_SIZE);
                assert!(!legacy_boundaries);
                assert!(output.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn stats_with_legacy_boundaries_writes_csv() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.fa");
        let output = dir.path().join("stats.csv");
        fs::write(&input, ">a\nGGGG\n>b\nATAT\n").unwrap();
        run(parse(&[
            "stats",
            input.to_str().unwrap(),
            "--legacy-boundaries",
            "--chunk-size",
            "64",
            "--output",
            output.to_str().unwrap(),
        ]))
        .unwrap();
        let text = fs::read_to_string(&output).unwrap();
        assert_eq!(text.lines().count(), 3);
        assert!(text.contains("\nb,4,"));
    }

    #[test]
    fn rewrap_requires_output() {
        let parsed = Cli::try_parse_from(["fastx", "rewrap", "in.fa"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn rewrap_writes_dos_lines() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.fa");
        let output = dir.path().join("out.fa");
        fs::write(&input, ">a\nACGTACGT\n>b\nGG\n").unwrap();
        let options = WriteOptions::new("\r\n", 3);
        let written = transform_fasta(&input, &output, &options, |record| record).unwrap();
        assert_eq!(written, 2);
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            ">a\r\nACG\r\nTAC\r\nGT\r\n>b\r\nGG\r\n"
        );
    }

    #[test]
    fn revcomp_and_translate_subcommands() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("gene.fa");
        let revcomp = dir.path().join("gene.rc.fa");
        let protein = dir.path().join("gene.faa");
        fs::write(&input, ">g1 gene\nATGGCC\nTAA\n").unwrap();

        run(parse(&[
            "revcomp",
            input.to_str().unwrap(),
            "--output",
            revcomp.to_str().unwrap(),
        ]))
        .unwrap();
        assert_eq!(fs::read_to_string(&revcomp).unwrap(), ">g1 gene\nTTAGGCCAT\n");

        run(parse(&[
            "translate",
            input.to_str().unwrap(),
            "--output",
            protein.to_str().unwrap(),
        ]))
        .unwrap();
        assert_eq!(fs::read_to_string(&protein).unwrap(), ">g1 gene\nMA*\n");
    }

    #[test]
    fn fq2fa_drops_qualities() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("reads.fq");
        let output = dir.path().join("reads.fa");
        fs::write(&input, "@r1\nACGT\n+\nIIII\n@r2\nGG\n+\n##\n").unwrap();
        let written = fastq_to_fasta(&input, &output, &WriteOptions::new("\n", 70)).unwrap();
        assert_eq!(written, 2);
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            ">r1\nACGT\n>r2\nGG\n"
        );
    }

    #[test]
    fn fq2fa_reports_corrupt_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("bad.fq");
        let output = dir.path().join("bad.fa");
        fs::write(&input, "r1\nACGT\n+\nIIII\n").unwrap();
        let err = fastq_to_fasta(&input, &output, &WriteOptions::default()).unwrap_err();
        assert!(format!("{err:#}").contains("corrupted at line 1"));
    }

    #[test]
    fn stats_writes_csv_and_parquet() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.fa");
        fs::write(&input, ">a\nGGCC\n>b\nATATAT\n").unwrap();

        let csv = dir.path().join("stats.csv");
        run_stats(
            &input,
            InputMode::Mmap,
            ReadOptions::default(),
            OutputFormat::Csv,
            Some(&csv),
        )
        .unwrap();
        let text = fs::read_to_string(&csv).unwrap();
        assert!(text.starts_with("comment,length,gc_content,kind\n"));
        assert!(text.contains("b,6,0.0,nucl"));

        let parquet = dir.path().join("stats.parquet");
        run_stats(
            &input,
            InputMode::Stream,
            ReadOptions::default(),
            OutputFormat::Parquet,
            Some(&parquet),
        )
        .unwrap();
        assert!(fs::metadata(&parquet).unwrap().len() > 0);
    }

    #[test]
    fn stats_rejects_parquet_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.fa");
        fs::write(&input, ">a\nGGCC\n").unwrap();
        let err = run_stats(
            &input,
            InputMode::Stream,
            ReadOptions::default(),
            OutputFormat::Parquet,
            None,
        )
        .unwrap_err();
        assert!(err.to_string().contains("--output"));
    }

    #[test]
    fn stats_rejects_empty_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("empty.fa");
        fs::write(&input, "").unwrap();
        let err = run_stats(
            &input,
            InputMode::Stream,
            ReadOptions::default(),
            OutputFormat::Json,
            None,
        )
        .unwrap_err();
        assert!(err.to_string().contains("no records"));
    }
}
