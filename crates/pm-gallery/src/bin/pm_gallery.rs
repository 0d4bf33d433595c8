use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::info;
use pm_acute::{
    AcuteParams, AcuteResult, Curvature, DebugContext, DebugMode, find_acute_landmarks,
    scale_landmarks,
};
use pm_core::{Image, Point2i};
use serde::{Deserialize, Serialize};

#[derive(Parser, Debug)]
#[command(name = "pm_gallery")]
#[command(about = "Run phenomorph landmark detection on external fixtures")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(name = "acute")]
    Acute(AcuteArgs),
    #[command(name = "scale")]
    Scale(ScaleArgs),
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum DebugArg {
    Off,
    Print,
    Plot,
}

#[derive(Args, Debug, Clone)]
struct AcuteArgs {
    /// Contour fixture: `{ "points": [[x, y], ...] }`.
    #[arg(long, required = true)]
    input: PathBuf,
    /// Binary object mask; enables ptval and curvature output.
    #[arg(long)]
    mask: Option<PathBuf>,
    /// JSON parameter file; command-line values take precedence.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    win: Option<u32>,
    #[arg(long)]
    threshold: Option<f64>,
    #[arg(long, value_enum, default_value_t = DebugArg::Off)]
    debug: DebugArg,
    #[arg(long, default_value = "out")]
    out: PathBuf,
}

#[derive(Args, Debug, Clone)]
struct ScaleArgs {
    #[arg(long, required = true)]
    input: PathBuf,
    /// `landmarks.json` written by the `acute` command.
    #[arg(long, required = true)]
    landmarks: PathBuf,
    #[arg(long, default_value = "out")]
    out: PathBuf,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ParamsFile {
    win: Option<u32>,
    threshold_deg: Option<f64>,
    /// Mask value of the object region.
    foreground: Option<u8>,
}

#[derive(Debug, Clone, Deserialize)]
struct ContourFile {
    points: Vec<[i32; 2]>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LandmarkDto {
    index: usize,
    point: [i32; 2],
    start_index: usize,
    start: [i32; 2],
    stop_index: usize,
    stop: [i32; 2],
    island_len: usize,
    ptval: Option<f64>,
    curvature: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LandmarksFile {
    landmarks: Vec<LandmarkDto>,
}

#[derive(Debug, Clone, Serialize)]
struct IslandDto {
    members: Vec<usize>,
    wraps: bool,
    eligible: bool,
}

#[derive(Debug, Clone, Serialize)]
struct StageDto {
    step: u32,
    label: &'static str,
    elapsed_ms: f64,
}

#[derive(Debug, Clone, Serialize)]
struct TraceDto {
    angles: Vec<f64>,
    islands: Vec<IslandDto>,
    stages: Vec<StageDto>,
}

#[derive(Debug, Clone, Serialize)]
struct MetaAcute {
    contour_points: usize,
    win: u32,
    threshold_deg: f64,
    bridge_dist: f64,
    mask: bool,
    foreground: u8,
    islands: usize,
    seam_islands: usize,
    landmarks: usize,
    stages: Vec<StageDto>,
}

#[derive(Debug, Clone, Serialize)]
struct ScaledDto {
    centroid: [f64; 2],
    height: f64,
    points: Vec<[f64; 2]>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.cmd {
        Command::Acute(args) => run_acute(args),
        Command::Scale(args) => run_scale(args),
    }
}

fn run_acute(args: AcuteArgs) -> Result<()> {
    ensure_file_exists(&args.input, "input")?;
    let contour = load_contour(&args.input)?;

    let file_params = match &args.config {
        Some(path) => load_params(path)?,
        None => ParamsFile::default(),
    };
    let mut params = AcuteParams::default();
    apply_params_overrides(&mut params, &file_params);
    if let Some(w) = args.win {
        params.win = w;
    }
    if let Some(t) = args.threshold {
        params.threshold_deg = t;
    }
    params
        .validate()
        .with_context(|| format!("invalid parameters {params:?}"))?;
    let foreground = file_params.foreground.unwrap_or(255);

    let mask = match &args.mask {
        Some(path) => {
            ensure_file_exists(path, "mask")?;
            Some(load_mask_u8(path)?)
        }
        None => None,
    };

    let case_dir = args.out.join("acute");
    fs::create_dir_all(&case_dir)
        .with_context(|| format!("creating output directory {}", case_dir.display()))?;

    let mode = match args.debug {
        DebugArg::Off => DebugMode::Off,
        DebugArg::Print => DebugMode::Print(case_dir.join("debug")),
        DebugArg::Plot => DebugMode::Plot,
    };
    let mut ctx = DebugContext::new(mode);

    let result = find_acute_landmarks(
        &contour,
        mask.as_ref().map(|m| m.as_view()),
        &params,
        &mut ctx,
    )
    .with_context(|| format!("detecting landmarks on {}", args.input.display()))?;
    info!(
        "{}: {} landmarks from {} islands",
        args.input.display(),
        result.landmarks.len(),
        result.islands.len()
    );

    write_json(
        case_dir.join("landmarks.json"),
        &LandmarksFile {
            landmarks: landmark_dtos(&result, foreground),
        },
    )?;
    write_csv(case_dir.join("angles.csv"), result.chain.as_slice())?;
    write_json(
        case_dir.join("meta.json"),
        &MetaAcute {
            contour_points: contour.len(),
            win: params.win,
            threshold_deg: params.threshold_deg,
            bridge_dist: params.bridge_dist(),
            mask: mask.is_some(),
            foreground,
            islands: result.islands.len(),
            seam_islands: result.islands.iter().filter(|isl| isl.wraps()).count(),
            landmarks: result.landmarks.len(),
            stages: stage_dtos(&ctx),
        },
    )?;

    emit_trace(&ctx, &result)
}

/// Writes or prints the intermediate results requested by the debug mode.
fn emit_trace(ctx: &DebugContext, result: &AcuteResult) -> Result<()> {
    let trace = || TraceDto {
        angles: result.chain.as_slice().to_vec(),
        islands: result
            .islands
            .iter()
            .map(|isl| IslandDto {
                members: isl.members().to_vec(),
                wraps: isl.wraps(),
                eligible: isl.is_landmark_eligible(),
            })
            .collect(),
        stages: stage_dtos(ctx),
    };

    if let Some(dir) = ctx.mode().output_dir() {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating debug directory {}", dir.display()))?;
        write_json(dir.join("trace.json"), &trace())?;
        write_distances_csv(dir.join("distances.csv"), result)?;
    } else if matches!(ctx.mode(), DebugMode::Plot) {
        let stdout = std::io::stdout();
        let mut lock = stdout.lock();
        serde_json::to_writer(&mut lock, &trace()).context("writing trace to stdout")?;
        writeln!(lock).context("writing trace to stdout")?;
    }
    Ok(())
}

fn run_scale(args: ScaleArgs) -> Result<()> {
    ensure_file_exists(&args.input, "input")?;
    ensure_file_exists(&args.landmarks, "landmarks")?;

    let contour = load_contour(&args.input)?;
    let landmarks: LandmarksFile = read_json(&args.landmarks)?;
    let points: Vec<Point2i> = landmarks
        .landmarks
        .iter()
        .map(|lm| Point2i::from(lm.point))
        .collect();

    let scaled = scale_landmarks(&contour, &points)
        .with_context(|| format!("scaling landmarks on {}", args.input.display()))?;

    let case_dir = args.out.join("scale");
    fs::create_dir_all(&case_dir)
        .with_context(|| format!("creating output directory {}", case_dir.display()))?;

    write_json(
        case_dir.join("scaled.json"),
        &ScaledDto {
            centroid: [scaled.centroid.x, scaled.centroid.y],
            height: scaled.height,
            points: scaled.points.iter().map(|p| [p.x, p.y]).collect(),
        },
    )
}

fn apply_params_overrides(params: &mut AcuteParams, cfg: &ParamsFile) {
    if let Some(w) = cfg.win {
        params.win = w;
    }
    if let Some(t) = cfg.threshold_deg {
        params.threshold_deg = t;
    }
}

fn landmark_dtos(result: &AcuteResult, foreground: u8) -> Vec<LandmarkDto> {
    result
        .landmarks
        .iter()
        .map(|lm| LandmarkDto {
            index: lm.index,
            point: [lm.point.x, lm.point.y],
            start_index: lm.start_index,
            start: [lm.start.x, lm.start.y],
            stop_index: lm.stop_index,
            stop: [lm.stop.x, lm.stop.y],
            island_len: lm.island_len,
            ptval: lm.ptval,
            curvature: lm.curvature(foreground).map(|c| curvature_name(c).to_owned()),
        })
        .collect()
}

fn stage_dtos(ctx: &DebugContext) -> Vec<StageDto> {
    ctx.stages()
        .iter()
        .map(|s| StageDto {
            step: s.step,
            label: s.label,
            elapsed_ms: s.elapsed_ms,
        })
        .collect()
}

fn curvature_name(c: Curvature) -> &'static str {
    match c {
        Curvature::Convex => "convex",
        Curvature::Concave => "concave",
    }
}

fn load_contour(path: &Path) -> Result<Vec<Point2i>> {
    let file: ContourFile = read_json(path)?;
    if file.points.is_empty() {
        bail!("contour file has no points: {}", path.display());
    }
    Ok(file.points.into_iter().map(Point2i::from).collect())
}

fn load_params(path: &Path) -> Result<ParamsFile> {
    read_json(path).with_context(|| format!("loading parameters {}", path.display()))
}

fn load_mask_u8(path: &Path) -> Result<Image<u8>> {
    let dyn_img =
        image::open(path).with_context(|| format!("opening mask image {}", path.display()))?;
    let luma = dyn_img.to_luma8();
    let (w, h) = luma.dimensions();
    let data = luma.into_raw();

    Image::from_vec(w as usize, h as usize, data)
        .with_context(|| format!("constructing pm-core mask from {}", path.display()))
}

fn write_json(path: PathBuf, value: &impl Serialize) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value).context("serializing json")?;
    fs::write(&path, bytes).with_context(|| format!("writing json {}", path.display()))
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&data).with_context(|| format!("parsing json {}", path.display()))
}

fn write_csv(path: PathBuf, values: &[f64]) -> Result<()> {
    let mut file =
        fs::File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    writeln!(file, "index,value").context("writing csv header")?;
    for (i, v) in values.iter().enumerate() {
        writeln!(file, "{i},{v}").context("writing csv row")?;
    }
    Ok(())
}

fn write_distances_csv(path: PathBuf, result: &AcuteResult) -> Result<()> {
    let mut file =
        fs::File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    writeln!(file, "index,mean_dist,angle").context("writing csv header")?;
    for d in &result.distances {
        writeln!(file, "{},{},{}", d.index, d.mean_dist, d.angle).context("writing csv row")?;
    }
    Ok(())
}

fn ensure_file_exists(path: &Path, what: &str) -> Result<()> {
    if !path.exists() {
        bail!("{} file does not exist: {}", what, path.display());
    }
    if !path.is_file() {
        bail!("{} path is not a file: {}", what, path.display());
    }
    Ok(())
}
