use boxsieve::{CornerBox, DetectionTensor, PostProcessConfig, PostProcessor};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "boxsieve CLI: post-process a dumped detector tensor")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output for each post-processing stage.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct PostProcessConfigJson {
    confidence_threshold: f32,
    iou_threshold: f32,
    max_detections: Option<usize>,
}

impl Default for PostProcessConfigJson {
    fn default() -> Self {
        let cfg = PostProcessConfig::default();
        Self {
            confidence_threshold: cfg.confidence_threshold,
            iou_threshold: cfg.iou_threshold,
            max_detections: cfg.max_detections,
        }
    }
}

impl From<PostProcessConfigJson> for PostProcessConfig {
    fn from(value: PostProcessConfigJson) -> Self {
        Self {
            confidence_threshold: value.confidence_threshold,
            iou_threshold: value.iou_threshold,
            max_detections: value.max_detections,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Config {
    detections_path: String,
    output_path: Option<String>,
    postprocess: PostProcessConfigJson,
}

/// Raw detector output dumped as a flat row-major buffer plus its shape.
#[derive(Debug, Deserialize)]
struct DetectionsFile {
    shape: Vec<usize>,
    data: Vec<f32>,
}

#[derive(Debug, Serialize)]
struct BoxRecord {
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
    confidence: f32,
}

impl From<CornerBox> for BoxRecord {
    fn from(value: CornerBox) -> Self {
        Self {
            x1: value.x1,
            y1: value.y1,
            x2: value.x2,
            y2: value.y2,
            confidence: value.confidence,
        }
    }
}

#[derive(Debug, Serialize)]
struct Output {
    objects_count: usize,
    boxes: Vec<BoxRecord>,
}

/// Resolves a path from the config file relative to the file's own directory.
fn resolve_from_config(config_path: &Path, target: &str) -> PathBuf {
    let target = Path::new(target);
    if target.is_absolute() {
        return target.to_path_buf();
    }
    match config_path.parent() {
        Some(dir) => dir.join(target),
        None => target.to_path_buf(),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("boxsieve=debug".parse()?))
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.detections_path.is_empty() {
        return Err("detections_path must be set in the config".into());
    }

    let postprocess = PostProcessConfig::from(config.postprocess);
    postprocess.validate()?;

    let detections_path = resolve_from_config(&cli.config, &config.detections_path);
    let detections_text = fs::read_to_string(&detections_path)?;
    let detections: DetectionsFile = serde_json::from_str(&detections_text)?;
    let tensor = DetectionTensor::from_shape(&detections.data, &detections.shape)?;
    info!(
        batch = tensor.batch(),
        anchors = tensor.anchors(),
        "loaded detections from {}",
        detections_path.display()
    );

    let boxes = PostProcessor::new(postprocess).process(&tensor)?;
    let output = Output {
        objects_count: boxes.len(),
        boxes: boxes.into_iter().map(BoxRecord::from).collect(),
    };
    let json = serde_json::to_string_pretty(&output)?;

    match config.output_path {
        Some(path) => fs::write(resolve_from_config(&cli.config, &path), json)?,
        None => println!("{json}"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::resolve_from_config;
    use std::path::{Path, PathBuf};

    #[test]
    fn relative_paths_follow_the_config_directory() {
        let resolved = resolve_from_config(Path::new("runs/day1/config.json"), "detections.json");
        assert_eq!(resolved, PathBuf::from("runs/day1/detections.json"));

        let resolved = resolve_from_config(Path::new("runs/config.json"), "../dumps/out.json");
        assert_eq!(resolved, PathBuf::from("runs/../dumps/out.json"));
    }

    #[test]
    fn bare_config_name_keeps_current_directory() {
        let resolved = resolve_from_config(Path::new("config.json"), "detections.json");
        assert_eq!(resolved, PathBuf::from("detections.json"));
    }

    #[test]
    fn absolute_paths_are_untouched() {
        let absolute = std::env::temp_dir().join("detections.json");
        let target = absolute.to_str().unwrap();
        let resolved = resolve_from_config(Path::new("runs/config.json"), target);
        assert_eq!(resolved, absolute);
    }
}
