use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use mrg_core::io::checkpoint::{resume_from_path, save_snapshot};
use mrg_core::io::config::GeneratorConfig;
use mrg_core::io::record::DrawRecord;
use mrg_core::{Mrg32k3a, StreamIndex};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "mrgstep",
    about = "Emit MRG32k3a uniforms for a stream address as NDJSON"
)]
struct Args {
    /// Optional generator config JSON (reference seed and start index).
    #[arg(long, value_name = "PATH", conflicts_with = "resume")]
    config: Option<PathBuf>,

    /// Resume from a checkpoint written by `--checkpoint`.
    #[arg(long, value_name = "PATH")]
    resume: Option<PathBuf>,

    /// Stream index; overrides the config file.
    #[arg(long, conflicts_with = "resume")]
    stream: Option<u64>,

    /// Substream index; overrides the config file.
    #[arg(long, conflicts_with = "resume")]
    substream: Option<u64>,

    /// Subsubstream index; overrides the config file.
    #[arg(long, conflicts_with = "resume")]
    subsubstream: Option<u64>,

    /// Number of uniforms to emit per block.
    #[arg(long)]
    draws: u64,

    /// Number of blocks; the generator moves between blocks per `--between`.
    #[arg(long, default_value_t = 1u64)]
    blocks: u64,

    /// Hierarchy move applied between blocks.
    #[arg(long, value_enum, default_value_t = Between::None)]
    between: Between,

    /// Output NDJSON path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Write the final generator state here for a later `--resume`.
    #[arg(long, value_name = "PATH")]
    checkpoint: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Between {
    None,
    AdvanceStream,
    AdvanceSubstream,
    AdvanceSubsubstream,
    ResetStream,
    ResetSubstream,
    ResetSubsubstream,
}

impl Between {
    fn apply(self, rng: &mut Mrg32k3a) {
        match self {
            Between::None => {}
            Between::AdvanceStream => rng.advance_stream(),
            Between::AdvanceSubstream => rng.advance_substream(),
            Between::AdvanceSubsubstream => rng.advance_subsubstream(),
            Between::ResetStream => rng.reset_stream(),
            Between::ResetSubstream => rng.reset_substream(),
            Between::ResetSubsubstream => rng.reset_subsubstream(),
        }
    }
}

fn build_generator(args: &Args) -> Result<Mrg32k3a> {
    if let Some(path) = &args.resume {
        return resume_from_path(path);
    }

    let mut config = match &args.config {
        Some(path) => GeneratorConfig::load_from_path(path)
            .with_context(|| format!("failed to read config {:?}", path))?,
        None => GeneratorConfig::default(),
    };
    config.index = StreamIndex::new(
        args.stream.unwrap_or(config.index.stream),
        args.substream.unwrap_or(config.index.substream),
        args.subsubstream.unwrap_or(config.index.subsubstream),
    );
    config.build().context("invalid generator configuration")
}

fn run<W: Write>(args: &Args, rng: &mut Mrg32k3a, writer: &mut W) -> Result<u64> {
    let tag = args.blocks > 1 || args.between != Between::None;
    let mut n = 0;
    for block in 0..args.blocks {
        if block > 0 {
            args.between.apply(rng);
        }
        let index = rng.index();
        for _ in 0..args.draws {
            let u = rng.draw();
            let record = if tag {
                DrawRecord::at(n, u, index)
            } else {
                DrawRecord::new(n, u)
            };
            writer.write_all(record.to_ndjson()?.as_bytes())?;
            n += 1;
        }
    }
    writer.flush()?;
    Ok(n)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mut rng = build_generator(&args)?;
    info!(index = %rng.index(), state = %rng.current_state(), "generator ready");

    let emitted = match &args.out {
        Some(path) => {
            let file =
                File::create(path).with_context(|| format!("failed to create {:?}", path))?;
            run(&args, &mut rng, &mut BufWriter::new(file))?
        }
        None => run(&args, &mut rng, &mut BufWriter::new(io::stdout().lock()))?,
    };

    if let Some(path) = &args.checkpoint {
        save_snapshot(path, &rng.snapshot())?;
        info!(path = ?path, "checkpoint written");
    }
    info!(emitted, index = %rng.index(), "done");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv.iter().copied()).expect("arguments parse")
    }

    fn lines(args: &Args, rng: &mut Mrg32k3a) -> Vec<serde_json::Value> {
        let mut buffer = Vec::new();
        run(args, rng, &mut buffer).expect("run succeeds");
        String::from_utf8(buffer)
            .expect("utf8 output")
            .lines()
            .map(|line| serde_json::from_str(line).expect("valid json"))
            .collect()
    }

    #[test]
    fn requires_draw_count() {
        let err = Args::try_parse_from(["mrgstep", "--stream", "1"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn rejects_resume_with_index_override() {
        let err = Args::try_parse_from([
            "mrgstep",
            "--draws",
            "1",
            "--resume",
            "rng.json",
            "--stream",
            "2",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn flags_override_config_index() {
        let config = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../../testdata/configs/custom_seed.json");
        let config = config.to_str().expect("utf8 path");
        let args = parse(&[
            "mrgstep",
            "--draws",
            "1",
            "--config",
            config,
            "--substream",
            "0",
        ]);
        let rng = build_generator(&args).expect("generator builds");
        assert_eq!(rng.index(), StreamIndex::new(2, 0, 1));
        assert_eq!(rng.ref_seed().words(), [1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn emits_reference_first_draw() {
        let args = parse(&["mrgstep", "--draws", "3"]);
        let mut rng = build_generator(&args).expect("generator builds");
        let records = lines(&args, &mut rng);
        assert_eq!(records.len(), 3);
        let u = records[0]["u"].as_f64().expect("u is a number");
        assert!((u - 0.127011).abs() < 5e-7);
        assert!(records[0].get("index").is_none());
        assert_eq!(records[2]["n"].as_u64(), Some(2));
    }

    #[test]
    fn reset_between_blocks_repeats_draws() {
        let args = parse(&[
            "mrgstep",
            "--draws",
            "4",
            "--blocks",
            "2",
            "--between",
            "reset-substream",
            "--substream",
            "5",
        ]);
        let mut rng = build_generator(&args).expect("generator builds");
        let records = lines(&args, &mut rng);
        assert_eq!(records.len(), 8);
        for i in 0..4 {
            assert_eq!(records[i]["u"], records[i + 4]["u"]);
        }
        assert_eq!(records[7]["index"]["substream"].as_u64(), Some(5));
    }

    #[test]
    fn advance_between_blocks_tags_new_index() {
        let args = parse(&[
            "mrgstep",
            "--draws",
            "2",
            "--blocks",
            "3",
            "--between",
            "advance-stream",
        ]);
        let mut rng = build_generator(&args).expect("generator builds");
        let records = lines(&args, &mut rng);
        let streams: Vec<u64> = records
            .iter()
            .map(|r| r["index"]["stream"].as_u64().expect("stream tagged"))
            .collect();
        assert_eq!(streams, vec![0, 0, 1, 1, 2, 2]);
    }

    #[test]
    fn checkpoint_then_resume_continues_sequence() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("rng.json");
        let path_str = path.to_str().expect("utf8 path");

        let full = parse(&["mrgstep", "--draws", "10", "--stream", "3"]);
        let mut reference = build_generator(&full).expect("generator builds");
        let expected = lines(&full, &mut reference);

        let first = parse(&["mrgstep", "--draws", "6", "--stream", "3"]);
        let mut rng = build_generator(&first).expect("generator builds");
        lines(&first, &mut rng);
        save_snapshot(&path, &rng.snapshot()).expect("checkpoint saves");

        let second = parse(&["mrgstep", "--draws", "4", "--resume", path_str]);
        let mut resumed = build_generator(&second).expect("checkpoint resumes");
        let tail = lines(&second, &mut resumed);
        for (i, record) in tail.iter().enumerate() {
            assert_eq!(record["u"], expected[6 + i]["u"]);
        }
    }
}
