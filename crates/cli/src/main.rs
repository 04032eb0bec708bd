use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use katzview::geom::InversionMap;
use katzview::host::{Event, ScriptedSource, Session};
use katzview::points::{self, Config, Distribution, PointMap};
use katzview::viewer::{Key, Modifiers, ViewerCfg};
use katzview::{Point, Vec2};
use serde_json::json;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;
mod script;

#[derive(Parser)]
#[command(name = "katzview")]
#[command(about = "Point sets and their convex hull under a circle-inversion map")]
struct Cmd {
    /// Log at debug level (zoom, radius, hull statistics)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Clone, Copy, ValueEnum)]
enum MapArg {
    Flip,
    Classic,
}

impl From<MapArg> for InversionMap {
    fn from(m: MapArg) -> Self {
        match m {
            MapArg::Flip => InversionMap::Flip,
            MapArg::Classic => InversionMap::Classic,
        }
    }
}

#[derive(Subcommand)]
enum Action {
    /// Run a headless session over an event script and save the last frame as PNG
    Render {
        /// Point file (`x y` pairs), `-` for stdin
        #[arg(long, default_value = "-")]
        points: String,
        #[arg(long)]
        out: PathBuf,
        /// Event script (see `script` module docs)
        #[arg(long)]
        script: Option<PathBuf>,
        #[arg(long, default_value_t = 800)]
        width: usize,
        #[arg(long, default_value_t = 600)]
        height: usize,
        /// Pixel-buffer capacity (both axes)
        #[arg(long)]
        max_size: Option<usize>,
        /// JSON viewer config; missing fields take defaults
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long, value_enum)]
        map: Option<MapArg>,
        /// Start with the debug overlay on
        #[arg(long)]
        debug: bool,
    },
    /// Generate or transform point clouds (one `x y` line per point on stdout)
    Points {
        #[command(subcommand)]
        cmd: PointsCmd,
    },
    /// Print a small provenance JSON block
    Report,
}

#[derive(Clone, Copy, ValueEnum)]
enum DistArg {
    Gaussian,
    Uniform,
    Cauchy,
}

#[derive(Subcommand)]
enum PointsCmd {
    /// Random points
    Random {
        #[arg(value_enum)]
        dist: DistArg,
        n: usize,
        #[arg(short, long, default_value_t = 1.0)]
        scale: f64,
        #[arg(short, long, num_args = 2, value_names = ["X", "Y"], allow_negative_numbers = true)]
        offset: Option<Vec<f64>>,
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
    /// Unit square plus a small far-away square
    TwoSquares {
        #[arg(long, default_value_t = 10.0)]
        far: f64,
        #[arg(long, default_value_t = 0.25)]
        side: f64,
    },
    /// Triangle (0,0), (1,0) and a third vertex at angle/side from the origin
    Triangle {
        #[arg(long, default_value_t = 90.0)]
        angle: f64,
        #[arg(long, default_value_t = 1.0)]
        side: f64,
    },
    /// Translate points read from stdin
    Translate {
        #[arg(allow_negative_numbers = true)]
        dx: f64,
        #[arg(allow_negative_numbers = true)]
        dy: f64,
    },
    /// Scale points read from stdin
    Scale {
        #[arg(allow_negative_numbers = true)]
        factor: f64,
    },
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = if cmd.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
    match cmd.action {
        Action::Render {
            points,
            out,
            script,
            width,
            height,
            max_size,
            config,
            map,
            debug,
        } => {
            let mut cfg = load_cfg(config.as_deref())?;
            if let Some(m) = max_size {
                cfg.max_width = m;
                cfg.max_height = m;
            }
            if let Some(m) = map {
                cfg.inversion = m.into();
            }
            let opts = RenderOpts {
                points,
                out,
                script,
                width,
                height,
                debug,
            };
            let code = render(&opts, cfg)?;
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Action::Points { cmd } => points_cmd(cmd),
        Action::Report => report(),
    }
}

struct RenderOpts {
    points: String,
    out: PathBuf,
    script: Option<PathBuf>,
    width: usize,
    height: usize,
    debug: bool,
}

fn load_cfg(path: Option<&Path>) -> Result<ViewerCfg> {
    let Some(path) = path else {
        return Ok(ViewerCfg::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let cfg: ViewerCfg = serde_json::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(cfg)
}

fn load_points(source: &str) -> Result<Vec<Point>> {
    let pts = if source == "-" {
        points::read_points(io::stdin().lock()).context("reading points from stdin")?
    } else {
        let file = std::fs::File::open(source).with_context(|| format!("opening {source}"))?;
        points::read_points(file).with_context(|| format!("reading points from {source}"))?
    };
    Ok(pts)
}

fn render(opts: &RenderOpts, cfg: ViewerCfg) -> Result<i32> {
    cfg.validate().context("invalid viewer config")?;
    // Malformed input is fatal before any window exists.
    let pts = load_points(&opts.points)?;
    let n = pts.len();

    let mut events = Vec::new();
    if opts.debug {
        events.push(Event::Key {
            key: Key::Char('d'),
            mods: Modifiers::NONE,
            x: 0,
            y: 0,
        });
    }
    if let Some(path) = &opts.script {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading script {}", path.display()))?;
        events.extend(script::parse_script(&text)?);
    }
    let scripted = events.len();

    let params = serde_json::to_value(&cfg)?;
    let mut session = Session::new(pts, opts.width, opts.height, cfg)?;
    let mut source = ScriptedSource::new(events);
    source.push(Event::Expose);
    let code = session.run(&mut source);
    if source.presented() == 0 {
        session.paint();
    }

    let canvas = session.window.canvas();
    let (w, h) = (canvas.width(), canvas.height());
    if w == 0 || h == 0 {
        bail!("nothing to save: window is {w}x{h}");
    }
    image::save_buffer_with_format(
        &opts.out,
        canvas.as_rgb(),
        w as u32,
        h as u32,
        image::ExtendedColorType::Rgb8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("writing {}", opts.out.display()))?;

    let hull = session.viewer.hull();
    tracing::info!(
        out = %opts.out.display(),
        n,
        hull = hull.vertices().len(),
        frames = source.presented(),
        code,
        "render"
    );
    let payload = provenance::Payload::new(json!({
        "viewer": params,
        "width": w,
        "height": h,
        "points": n,
        "events": scripted,
        "debug": opts.debug,
        "exit_code": code,
    }))
    .with_input(opts.points.clone());
    let payload = match &opts.script {
        Some(s) => payload.with_input(s.to_string_lossy()),
        None => payload,
    };
    provenance::write_sidecar(&opts.out, payload)?;
    Ok(code)
}

fn points_cmd(cmd: PointsCmd) -> Result<()> {
    let pts = match cmd {
        PointsCmd::Random {
            dist,
            n,
            scale,
            offset,
            seed,
        } => {
            let dist = match dist {
                DistArg::Gaussian => Distribution::Gaussian,
                DistArg::Uniform => Distribution::Uniform,
                DistArg::Cauchy => Distribution::Cauchy,
            };
            let offset = match offset.as_deref() {
                Some(&[x, y]) => Vec2::new(x, y),
                Some(other) => bail!("offset needs two values, got {}", other.len()),
                None => Vec2::zeros(),
            };
            points::random_points(dist, n, scale, offset, seed)
        }
        PointsCmd::TwoSquares { far, side } => points::config_points(Config::TwoSquares { far, side }),
        PointsCmd::Triangle { angle, side } => points::config_points(Config::Triangle {
            angle_deg: angle,
            side,
        }),
        PointsCmd::Translate { dx, dy } => {
            let mut pts = read_stdin_points()?;
            points::map_points(&mut pts, PointMap::Translate(Vec2::new(dx, dy)));
            pts
        }
        PointsCmd::Scale { factor } => {
            let mut pts = read_stdin_points()?;
            points::map_points(&mut pts, PointMap::Scale(factor));
            pts
        }
    };
    let mut stdout = io::stdout().lock();
    stdout.write_all(points::format_points(&pts).as_bytes())?;
    Ok(())
}

fn read_stdin_points() -> Result<Vec<Point>> {
    let mut text = String::new();
    io::stdin().read_to_string(&mut text)?;
    Ok(points::parse_points(&text)?)
}

fn report() -> Result<()> {
    let obj = json!({
        "code_rev": provenance::current_git_rev(),
        "version": katzview::VERSION,
        "viewer": ViewerCfg::default(),
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
