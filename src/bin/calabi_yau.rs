use std::path::PathBuf;
use std::process::ExitCode;

use calabi_yau::RenderError;
use calabi_yau::config::{BatchPlan, FigureOptions, OutputConfig, RenderParams};
use calabi_yau::export::{write_obj_file, write_snapshot_file};
use calabi_yau::render::{Scene, render_batch, render_scene_to_dir};

const USAGE: &str = r#"calabi_yau

Render a wireframe of the Calabi-Yau cross-section z1^5 + z2^5 = 1.

USAGE:
  calabi_yau [options]
  calabi_yau --all [--out-dir <dir>]

OPTIONS (values may also be given as --flag=value):
  --elev <deg>       Camera elevation (default 32)
  --azim <deg>       Camera azimuth (default 45)
  --alpha <deg>      Projection angle mixing Im(z1) and Im(z2) (default 45)
  --all              Render azimuth 0..345 step 15 x alpha 0..90 step 30 at elevation 32
  --out-dir <dir>    Existing directory for the PNG files (default images)
  --obj <path>       Also write the wireframe as OBJ (single render only)
  --snap <path>      Also write a quantised snapshot (single render only)
  -h, --help         Show this help
"#;

fn main() -> ExitCode {
    calabi_yau::init_logger();
    match run(std::env::args().skip(1).collect()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Usage(msg)) => {
            eprintln!("calabi_yau: {msg}\n\n{USAGE}");
            ExitCode::from(2)
        }
        Err(CliError::Render(err)) => {
            eprintln!("calabi_yau error: {err}");
            ExitCode::FAILURE
        }
    }
}

#[derive(Debug)]
enum CliError {
    Usage(String),
    Render(RenderError),
}

impl From<RenderError> for CliError {
    fn from(err: RenderError) -> Self {
        Self::Render(err)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Command {
    Help,
    Single {
        params: RenderParams,
        output: OutputConfig,
    },
    Batch {
        out_dir: PathBuf,
    },
}

fn run(args: Vec<String>) -> Result<(), CliError> {
    let figure = FigureOptions::default();
    match parse_command(args)? {
        Command::Help => {
            println!("{USAGE}");
            Ok(())
        }
        Command::Single { params, output } => {
            let scene = Scene::build(params)?;
            render_scene_to_dir(&scene, &figure, &output.out_dir)?;
            if let Some(path) = output.obj.as_deref() {
                write_obj_file(path, &scene.sheets)?;
            }
            if let Some(path) = output.snapshot.as_deref() {
                write_snapshot_file(path, &scene)?;
            }
            Ok(())
        }
        Command::Batch { out_dir } => {
            let written = render_batch(&BatchPlan::default(), &figure, &out_dir)?;
            log::info!("batch finished: {} files", written.len());
            Ok(())
        }
    }
}

fn parse_command(args: Vec<String>) -> Result<Command, CliError> {
    let mut args = Args::new(args);
    let mut params = RenderParams::default();
    let mut output = OutputConfig::default();
    let mut all = false;
    let mut angles_given = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--all" => {
                args.no_value("--all")?;
                all = true;
            }
            "--elev" => {
                params.elevation = args.float("--elev")?;
                angles_given = true;
            }
            "--azim" => {
                params.azimuth = args.float("--azim")?;
                angles_given = true;
            }
            "--alpha" => {
                params.alpha = args.float("--alpha")?;
                angles_given = true;
            }
            "--out-dir" => output.out_dir = PathBuf::from(args.value("--out-dir")?),
            "--obj" => output.obj = Some(PathBuf::from(args.value("--obj")?)),
            "--snap" => output.snapshot = Some(PathBuf::from(args.value("--snap")?)),
            "-h" | "--help" => {
                args.no_value(&arg)?;
                return Ok(Command::Help);
            }
            other => return Err(CliError::Usage(format!("unknown option `{other}`"))),
        }
    }

    if all {
        if output.obj.is_some() || output.snapshot.is_some() {
            return Err(CliError::Usage(
                "--obj/--snap apply to a single render (not --all)".to_string(),
            ));
        }
        if angles_given {
            log::warn!("--all renders a fixed sweep; --elev/--azim/--alpha are ignored");
        }
        return Ok(Command::Batch {
            out_dir: output.out_dir,
        });
    }

    Ok(Command::Single { params, output })
}

struct Args {
    args: Vec<String>,
    pos: usize,
    inline: Option<String>,
}

impl Args {
    fn new(args: Vec<String>) -> Self {
        Self {
            args,
            pos: 0,
            inline: None,
        }
    }

    /// Next flag; `--flag=value` is split on the first `=` and the value is
    /// held for [`Args::value`].
    fn next(&mut self) -> Option<String> {
        let arg = self.args.get(self.pos)?.clone();
        self.pos += 1;
        if arg.starts_with("--") {
            if let Some((flag, value)) = arg.split_once('=') {
                self.inline = Some(value.to_string());
                return Some(flag.to_string());
            }
        }
        self.inline = None;
        Some(arg)
    }

    fn value(&mut self, flag: &str) -> Result<String, CliError> {
        if let Some(value) = self.inline.take() {
            return Ok(value);
        }
        let value = self
            .args
            .get(self.pos)
            .cloned()
            .ok_or_else(|| CliError::Usage(format!("missing value for {flag}")))?;
        self.pos += 1;
        Ok(value)
    }

    fn no_value(&mut self, flag: &str) -> Result<(), CliError> {
        match self.inline.take() {
            Some(value) => Err(CliError::Usage(format!(
                "{flag} takes no value (got `{value}`)"
            ))),
            None => Ok(()),
        }
    }

    fn float(&mut self, flag: &str) -> Result<f64, CliError> {
        let raw = self.value(flag)?;
        let value = raw
            .parse::<f64>()
            .map_err(|e| CliError::Usage(format!("invalid value `{raw}` for {flag}: {e}")))?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(CliError::Usage(format!("{flag} must be finite, got `{raw}`")))
        }
    }
}
