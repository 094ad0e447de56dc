use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use vidforge::{MapParams, ParamSource, RequestBody, VidforgeResult};

#[derive(Parser, Debug)]
#[command(name = "vidforge", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile a create-movie request body.
    CreateMovie(BuildArgs),
    /// Compile a merge-video-audio request body.
    MergeVideoAudio(BuildArgs),
    /// Compile a merge-videos request body.
    MergeVideos(BuildArgs),
}

#[derive(Parser, Debug)]
struct BuildArgs {
    /// Input parameter JSON: an object of parameter name → value.
    #[arg(long = "params")]
    params_path: PathBuf,

    /// Workflow item index.
    #[arg(long, default_value_t = 0)]
    item: usize,

    /// Output path for the compiled request body (stdout if omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::CreateMovie(args) => run(args, vidforge::build_create_movie),
        Command::MergeVideoAudio(args) => run(args, vidforge::build_merge_video_audio),
        Command::MergeVideos(args) => run(args, vidforge::build_merge_videos),
    }
}

fn run(
    args: BuildArgs,
    build: fn(&dyn ParamSource, usize) -> VidforgeResult<RequestBody>,
) -> anyhow::Result<()> {
    let params = read_params_json(&args.params_path)?;
    let body = build(&params, args.item)?;
    let json = serde_json::to_string_pretty(&body).context("serialize request body")?;

    match &args.out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)
                        .with_context(|| format!("create output dir '{}'", parent.display()))?;
                }
            }
            std::fs::write(path, format!("{json}\n"))
                .with_context(|| format!("write request body '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn read_params_json(path: &Path) -> anyhow::Result<MapParams> {
    let f = File::open(path).with_context(|| format!("open params '{}'", path.display()))?;
    let r = BufReader::new(f);
    let value: serde_json::Value = serde_json::from_reader(r).with_context(|| "parse params JSON")?;
    let serde_json::Value::Object(map) = value else {
        anyhow::bail!("params file must contain a JSON object");
    };
    Ok(MapParams::new(map))
}
