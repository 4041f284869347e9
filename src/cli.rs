use crate::config::{load_config, Config};
use crate::ir::Diagram;
use crate::render::{render_eps, write_output_eps};
use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufWriter, Read};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(
    name = "diaeps",
    version,
    about = "Render laid-out diagram models as Encapsulated PostScript"
)]
pub struct Args {
    /// Diagram model (.json / .json5) or '-' for stdin
    pub input: PathBuf,

    /// Output file. Defaults to the input name with an .eps extension,
    /// or stdout when reading from stdin.
    pub output: Option<PathBuf>,

    /// Config JSON file (render options and theme colors)
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Do not draw drop shadows
    #[arg(short = 'S', long = "no-shadows")]
    pub no_shadows: bool,

    /// Turn anti-aliasing off (no effect on EPS output)
    #[arg(short = 'A', long = "no-antialias")]
    pub no_antialias: bool,

    /// Draw the cell grid on top of the diagram
    #[arg(short = 'd', long = "debug")]
    pub debug: bool,

    /// Replace an existing output file instead of picking a new name
    #[arg(long = "overwrite")]
    pub overwrite: bool,

    /// Log rendering progress
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut config = load_config(args.config.as_deref())?;
    apply_flags(&mut config, &args);

    let input = read_input(&args.input)?;
    let diagram = Diagram::from_json(&input)
        .with_context(|| format!("invalid diagram model in {}", args.input.display()))?;

    let Some(output) = resolve_output(&args.input, args.output.as_deref(), args.overwrite) else {
        let stdout = io::stdout().lock();
        render_eps(&diagram, &config, BufWriter::new(stdout))?;
        return Ok(());
    };

    println!("Rendering to file: {}", output.display());
    let started = Instant::now();
    write_output_eps(&diagram, &config, &output)?;
    println!("Done in {:.2} sec", started.elapsed().as_secs_f64());
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_filter),
    )
    .try_init();
}

fn apply_flags(config: &mut Config, args: &Args) {
    if args.no_shadows {
        config.render.drop_shadows = false;
    }
    if args.no_antialias {
        config.render.antialias = false;
    }
    if args.debug {
        config.render.render_debug_lines = true;
    }
}

fn is_stdin(path: &Path) -> bool {
    path == Path::new("-")
}

fn read_input(path: &Path) -> Result<String> {
    if is_stdin(path) {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))
}

/// `None` means stdout.
fn resolve_output(input: &Path, output: Option<&Path>, overwrite: bool) -> Option<PathBuf> {
    if let Some(path) = output {
        return Some(path.to_path_buf());
    }
    if is_stdin(input) {
        return None;
    }
    let target = input.with_extension("eps");
    if overwrite || !target.exists() {
        return Some(target);
    }
    Some(next_free_name(&target))
}

fn next_free_name(target: &Path) -> PathBuf {
    let stem = target
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("diagram");
    let parent = target.parent().unwrap_or_else(|| Path::new(""));
    let mut n = 2u32;
    loop {
        let candidate = parent.join(format!("{stem}_{n}.eps"));
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn flags_override_config() {
        let args = Args::parse_from(["diaeps", "-S", "-d", "in.json"]);
        let mut config = Config::default();
        apply_flags(&mut config, &args);
        assert!(!config.render.drop_shadows);
        assert!(config.render.render_debug_lines);
        assert!(config.render.antialias);
        assert_eq!(args.input, PathBuf::from("in.json"));
        assert!(args.output.is_none());
    }

    #[test]
    fn stdin_without_output_goes_to_stdout() {
        assert_eq!(resolve_output(Path::new("-"), None, false), None);
        assert_eq!(
            resolve_output(Path::new("-"), Some(Path::new("out.eps")), false),
            Some(PathBuf::from("out.eps"))
        );
    }

    #[test]
    fn default_output_swaps_extension() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("flow.json");
        assert_eq!(
            resolve_output(&input, None, false),
            Some(dir.path().join("flow.eps"))
        );
    }

    #[test]
    fn existing_output_gets_numbered_name() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("flow.json");
        fs::write(dir.path().join("flow.eps"), "").unwrap();
        fs::write(dir.path().join("flow_2.eps"), "").unwrap();
        assert_eq!(
            resolve_output(&input, None, false),
            Some(dir.path().join("flow_3.eps"))
        );
        assert_eq!(
            resolve_output(&input, None, true),
            Some(dir.path().join("flow.eps"))
        );
    }
}
