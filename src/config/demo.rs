//! Configuration of the `board_demo` binary.
//!
//! The demo takes either a JSON file
//!
//! ```json
//! {
//!   "input": "board.jpg",
//!   "params": { "board_size": 19 },
//!   "hough": { "load": "board.hough", "save": null },
//!   "output": { "result_json": "out/board.json", "debug_dir": "out/steps", "step_by_step": true }
//! }
//! ```
//!
//! or command-line flags: `[-i] [-u FILE] [-s FILE] [-j FILE] [-d DIR] IMAGE`.
//! Flags given next to a JSON file override its values.
use crate::analyser::AnalyserParams;
use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct HoughConfig {
    /// Precomputed accumulator to inject instead of running the transform.
    pub load: Option<PathBuf>,
    /// Where to store the accumulator after the run.
    pub save: Option<PathBuf>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct DemoOutputConfig {
    pub result_json: Option<PathBuf>,
    /// Directory for intermediate rasters and grid renderings.
    pub debug_dir: Option<PathBuf>,
    /// Run the stages one by one, rendering the grid after every growth step.
    pub step_by_step: bool,
}

#[derive(Clone, Debug, Deserialize)]
pub struct DemoConfig {
    pub input: PathBuf,
    #[serde(default)]
    pub params: AnalyserParams,
    #[serde(default)]
    pub hough: HoughConfig,
    #[serde(default)]
    pub output: DemoOutputConfig,
}

impl DemoConfig {
    pub fn for_image(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            params: AnalyserParams::default(),
            hough: HoughConfig::default(),
            output: DemoOutputConfig::default(),
        }
    }
}

pub fn load_config(path: &Path) -> Result<DemoConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

/// Command line of the demo. An input ending in `.json` is read as a
/// [`DemoConfig`]; flags given next to it override the file.
#[derive(Parser, Debug)]
#[command(name = "board_demo", about = "Locate the line grid of a go board photo")]
pub struct DemoArgs {
    /// Board image, or a JSON configuration file
    pub input: PathBuf,

    /// Run step by step and save every growth step
    #[arg(short = 'i', long)]
    pub intermediate: bool,

    /// Load a precomputed hough accumulator
    #[arg(short = 'u', long, value_name = "FILE")]
    pub use_hough: Option<PathBuf>,

    /// Save the hough accumulator
    #[arg(short = 's', long, value_name = "FILE")]
    pub save_hough: Option<PathBuf>,

    /// Write the analysis report as JSON
    #[arg(short = 'j', long, value_name = "FILE")]
    pub json: Option<PathBuf>,

    /// Save intermediate images
    #[arg(short = 'd', long, value_name = "DIR")]
    pub debug_dir: Option<PathBuf>,
}

impl DemoArgs {
    pub fn into_config(self) -> Result<DemoConfig, String> {
        let mut config = if self.input.extension().is_some_and(|ext| ext == "json") {
            load_config(&self.input)?
        } else {
            DemoConfig::for_image(self.input)
        };
        let (hough, output) = (&mut config.hough, &mut config.output);
        output.step_by_step |= self.intermediate;
        if self.use_hough.is_some() {
            hough.load = self.use_hough;
        }
        if self.save_hough.is_some() {
            hough.save = self.save_hough;
        }
        if self.json.is_some() {
            output.result_json = self.json;
        }
        if self.debug_dir.is_some() {
            output.debug_dir = self.debug_dir;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(list: &[&str]) -> Result<DemoArgs, clap::Error> {
        DemoArgs::try_parse_from(std::iter::once("board_demo").chain(list.iter().copied()))
    }

    #[test]
    fn flags_fill_the_config() {
        let cfg = parse(&["-i", "-u", "in.hough", "--json", "out.json", "board.png"])
            .unwrap()
            .into_config()
            .unwrap();
        assert_eq!(cfg.input, PathBuf::from("board.png"));
        assert!(cfg.output.step_by_step);
        assert_eq!(cfg.hough.load, Some(PathBuf::from("in.hough")));
        assert!(cfg.hough.save.is_none());
        assert_eq!(cfg.output.result_json, Some(PathBuf::from("out.json")));
        assert_eq!(cfg.params, AnalyserParams::default());
    }

    #[test]
    fn bad_arguments_are_reported() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["--bogus", "x.png"]).is_err());
        assert!(parse(&["x.png", "-s"]).is_err());
        assert!(parse(&["a.png", "b.png"]).is_err());
        let help = parse(&["-h"]).unwrap_err();
        assert_eq!(help.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn flags_override_a_json_config() {
        let dir = std::env::temp_dir().join(format!("board_demo_cfg_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("run.json");
        fs::write(
            &path,
            r#"{ "input": "b.jpg", "hough": { "save": "a.hough" }, "output": { "result_json": "a.json" } }"#,
        )
        .unwrap();

        let cfg = parse(&["-j", "b.json", path.to_str().unwrap()])
            .unwrap()
            .into_config()
            .unwrap();
        assert_eq!(cfg.input, PathBuf::from("b.jpg"));
        assert_eq!(cfg.hough.save, Some(PathBuf::from("a.hough")));
        assert_eq!(cfg.output.result_json, Some(PathBuf::from("b.json")));
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn json_config_uses_defaults_for_missing_sections() {
        let cfg: DemoConfig =
            serde_json::from_str(r#"{ "input": "b.jpg", "params": { "board_size": 13 } }"#)
                .unwrap();
        assert_eq!(cfg.params.board_size, 13);
        assert_eq!(cfg.params.num_initial_lines, 5);
        assert!(cfg.hough.load.is_none());
        assert!(!cfg.output.step_by_step);
    }
}
