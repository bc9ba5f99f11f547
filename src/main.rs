//! # shot-chart
//!
//! Command-line front end for rendering espresso shot logs.
//!
//! ```bash
//! # Actual-versus-goal chart of one shot
//! shot-chart plot 07_27_36.shot.json --dpi 200
//!
//! # Render a saved viewer session
//! shot-chart session morning.session.json -o morning.png
//!
//! # Start a session from the two newest shots in a folder
//! shot-chart latest ~/shots -o latest
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;

use shot_chart::chart::{ChartStyle, OutputFormat, export_chart};
use shot_chart::core::{ActualsVsGoals, Shot};
use shot_chart::telemetry::{directive_for_verbosity, init_tracing};
use shot_chart::viewer::Viewer;
use shot_chart::{ShotError, ShotResult};

/// Espresso shot chart renderer
#[derive(Parser)]
#[command(name = "shot-chart")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plot actual values against their goals for one shot
    Plot(PlotArgs),

    /// Render the chart described by a saved session
    Session {
        /// Session file path
        #[arg(value_name = "SESSION")]
        session: PathBuf,

        /// Output path (default: next to the session file)
        #[arg(short, long)]
        out: Option<PathBuf>,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Write a session pre-loaded with the two most recent shots in a folder
    Latest {
        /// Folder containing *.shot.json files
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        /// Session output path (default: DIR/latest.session.json)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Print the hover readout of a session at a given time
    Readout {
        /// Session file path
        #[arg(value_name = "SESSION")]
        session: PathBuf,

        /// Elapsed time in seconds
        #[arg(long, value_name = "SECONDS", allow_negative_numbers = true)]
        at: f64,
    },
}

#[derive(Args)]
struct PlotArgs {
    /// Path to a *.shot.json file
    #[arg(value_name = "JSON")]
    json_path: PathBuf,

    /// Output path (default: <input_stem>_actuals_vs_goals.png in the same folder)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Plot title override
    #[arg(long)]
    title: Option<String>,

    /// Disable grid
    #[arg(long)]
    no_grid: bool,

    /// Hide pressure (actual)
    #[arg(long)]
    no_pressure: bool,

    /// Hide flow (actual)
    #[arg(long)]
    no_flow: bool,

    /// Hide motor speed (actual)
    #[arg(long)]
    no_motor_speed: bool,

    /// Hide pressure goal
    #[arg(long)]
    no_pressure_goal: bool,

    /// Hide flow goal
    #[arg(long)]
    no_flow_goal: bool,

    /// Hide motor power (actual)
    #[arg(long)]
    no_motor_power: bool,

    /// Hide motor power goal
    #[arg(long)]
    no_motor_power_goal: bool,

    #[command(flatten)]
    render: RenderArgs,
}

#[derive(Args)]
struct RenderArgs {
    /// Output DPI
    #[arg(long, default_value = "200")]
    dpi: u32,

    /// Figure width in inches
    #[arg(long, default_value = "14")]
    width: f64,

    /// Figure height in inches
    #[arg(long, default_value = "7")]
    height: f64,

    /// Output format
    #[arg(long, value_enum, default_value_t = FormatArg::Png)]
    format: FormatArg,

    /// JSON chart style overrides
    #[arg(long, value_name = "FILE")]
    style: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Png,
    FrameJson,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Png => Self::Png,
            FormatArg::FrameJson => Self::FrameJson,
        }
    }
}

impl RenderArgs {
    fn chart_style(&self) -> ShotResult<ChartStyle> {
        let base = match &self.style {
            Some(path) => ChartStyle::load(path)?,
            None => ChartStyle::default(),
        };
        Ok(base.with_figure_size(self.width, self.height, self.dpi))
    }

    fn output_format(&self) -> OutputFormat {
        self.format.into()
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let _ = init_tracing(directive_for_verbosity(cli.verbose));

    let result = match cli.command {
        Commands::Plot(args) => run_plot(&args),
        Commands::Session {
            session,
            out,
            render,
        } => run_session(&session, out, &render),
        Commands::Latest { dir, out } => run_latest(&dir, out),
        Commands::Readout { session, at } => run_readout(&session, at),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Render the fixed actuals-versus-goals chart
fn run_plot(args: &PlotArgs) -> ShotResult<()> {
    let shot = Shot::load(&args.json_path)?;
    let format = args.render.output_format();
    let out = args
        .out
        .clone()
        .unwrap_or_else(|| sibling_output(&args.json_path, "_actuals_vs_goals", format));

    let switches = ActualsVsGoals {
        pressure: !args.no_pressure,
        flow: !args.no_flow,
        motor_speed: !args.no_motor_speed,
        pressure_goal: !args.no_pressure_goal,
        flow_goal: !args.no_flow_goal,
        motor_power: !args.no_motor_power,
        motor_power_goal: !args.no_motor_power_goal,
    };
    let title = args.title.clone().unwrap_or_else(|| shot.report_title());
    let model = switches.plot_model(&shot, title);
    let style = args.render.chart_style()?.with_grid(!args.no_grid);

    ensure_parent(&out)?;
    export_chart(&model, &style, format, &out)?;
    println!("Wrote: {}", out.display());
    Ok(())
}

/// Render a saved viewer session
fn run_session(session: &Path, out: Option<PathBuf>, render: &RenderArgs) -> ShotResult<()> {
    let viewer = Viewer::open_session(session)?;
    let format = render.output_format();
    let out = out.unwrap_or_else(|| sibling_output(session, "", format));

    let model = viewer.plot_model();
    info!(title = %model.title, traces = model.traces.len(), "rendering session");
    ensure_parent(&out)?;
    export_chart(&model, &render.chart_style()?, format, &out)?;
    println!("Wrote: {}", out.display());
    Ok(())
}

/// Build a session from the newest shots in a folder
fn run_latest(dir: &Path, out: Option<PathBuf>) -> ShotResult<()> {
    let mut viewer = Viewer::new();
    let filled = viewer.auto_load_recent(dir)?;
    if filled == 2 {
        viewer.session_mut().compare_mode = true;
    }

    let out = out.unwrap_or_else(|| dir.join("latest"));
    let written = viewer.session().save(&out)?;
    println!("Wrote: {}", written.display());
    Ok(())
}

/// Print the readout lines at one instant
fn run_readout(session: &Path, at: f64) -> ShotResult<()> {
    let viewer = Viewer::open_session(session)?;
    for line in viewer.readout(at).lines() {
        println!("{line}");
    }
    Ok(())
}

/// `<stem><suffix>.<ext>` next to `input`; a `.session` double extension is
/// dropped from the stem.
fn sibling_output(input: &Path, suffix: &str, format: OutputFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "chart".to_owned());
    let stem = stem.strip_suffix(".session").unwrap_or(&stem);
    input.with_file_name(format!("{stem}{suffix}.{}", format.extension()))
}

fn ensure_parent(path: &Path) -> ShotResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent)
            .map_err(|source| ShotError::Io {
                path: parent.to_path_buf(),
                source,
            }),
        _ => Ok(()),
    }
}
