use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use serde::Deserialize;

use facecluster_core::clustering::domain::clustering_summary::{summarize, ClusteringSummary};
use facecluster_core::clustering::domain::face_clusterer::{FaceClusterer, ThresholdPreset};
use facecluster_core::clustering::domain::face_record::FaceRecord;
use facecluster_core::shared::bounding_box::BoundingBox;
use facecluster_core::shared::constants::EMBEDDING_SIZE;

/// Groups precomputed face embeddings into people.
#[derive(Parser)]
#[command(name = "facecluster")]
struct Cli {
    /// JSON file with an array of face records.
    input: PathBuf,

    /// Write the summary here instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Similarity threshold; overrides --preset.
    #[arg(long)]
    threshold: Option<f32>,

    /// Threshold preset: default, strict or lenient.
    #[arg(long)]
    preset: Option<String>,

    /// Emit single-line JSON.
    #[arg(long)]
    compact: bool,
}

/// One face as produced by the detection and embedding stages.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FaceInput {
    embedding: Vec<f32>,
    image_index: usize,
    #[serde(default)]
    face_index: usize,
    #[serde(default)]
    bounding_box: BoundingBox,
    /// Path of the saved face crop, if the producer kept one.
    #[serde(default)]
    crop: Option<PathBuf>,
}

type Record = FaceRecord<Option<PathBuf>>;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let clusterer = FaceClusterer::new(resolve_threshold(cli.threshold, cli.preset.as_deref())?);
    let records = load_records(&cli.input)?;
    log::info!(
        "Clustering {} faces with threshold {}",
        records.len(),
        clusterer.threshold()
    );

    let summary = summarize(&clusterer.cluster(records));
    log::info!(
        "Found {} people among {} faces",
        summary.total_people,
        summary.total_faces
    );
    for info in &summary.clusters {
        if let Some(crop) = &info.representative_face {
            log::info!(
                "Person {}: representative {}",
                info.person_id,
                crop.display()
            );
        }
    }

    let json = render(&summary, cli.compact)?;
    match cli.output {
        Some(path) => {
            fs::write(&path, json + "\n")?;
            log::info!("Summary written to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.input.exists() {
        let message = format!("Input file not found: {}", cli.input.display());
        return Err(message.into());
    }
    if cli.threshold.is_some() && cli.preset.is_some() {
        return Err("--threshold and --preset are mutually exclusive".into());
    }
    if let Some(t) = cli.threshold {
        if !t.is_finite() {
            return Err(format!("Threshold must be a finite number, got {t}").into());
        }
    }
    Ok(())
}

fn resolve_threshold(
    threshold: Option<f32>,
    preset: Option<&str>,
) -> Result<f32, Box<dyn std::error::Error>> {
    if let Some(t) = threshold {
        return Ok(t);
    }
    let preset = match preset {
        Some(name) => name.parse::<ThresholdPreset>()?,
        None => ThresholdPreset::Default,
    };
    Ok(preset.threshold())
}

fn load_records(path: &Path) -> Result<Vec<Record>, Box<dyn std::error::Error>> {
    let text = fs::read_to_string(path)?;
    let inputs: Vec<FaceInput> = serde_json::from_str(&text)?;

    Ok(inputs
        .into_iter()
        .map(|f| {
            if f.embedding.len() != EMBEDDING_SIZE {
                log::warn!(
                    "Face {} of image {} has {} dimensions, expected {EMBEDDING_SIZE}",
                    f.face_index,
                    f.image_index,
                    f.embedding.len()
                );
            }
            FaceRecord::new(
                f.embedding,
                f.crop,
                f.bounding_box,
                f.image_index,
                f.face_index,
            )
        })
        .collect())
}

fn render<C>(summary: &ClusteringSummary<C>, compact: bool) -> serde_json::Result<String> {
    if compact {
        serde_json::to_string(summary)
    } else {
        serde_json::to_string_pretty(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn input_file(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("facecluster").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_threshold_defaults_to_default_preset() {
        assert_eq!(resolve_threshold(None, None).unwrap(), 0.6);
    }

    #[test]
    fn test_threshold_from_preset() {
        assert_eq!(resolve_threshold(None, Some("strict")).unwrap(), 0.7);
        assert_eq!(resolve_threshold(None, Some("lenient")).unwrap(), 0.5);
    }

    #[test]
    fn test_explicit_threshold_wins() {
        assert_eq!(resolve_threshold(Some(0.42), None).unwrap(), 0.42);
    }

    #[test]
    fn test_unknown_preset_rejected() {
        let err = resolve_threshold(None, Some("fuzzy")).unwrap_err();
        assert!(err.to_string().contains("fuzzy"));
    }

    #[test]
    fn test_validate_rejects_missing_input() {
        let c = cli(&["/nonexistent/faces.json"]);
        let err = validate(&c).unwrap_err();
        assert!(err.to_string().contains("Input file not found"));
    }

    #[test]
    fn test_validate_rejects_threshold_with_preset() {
        let file = input_file("[]");
        let path = file.path().to_str().unwrap();
        let c = cli(&[path, "--threshold", "0.5", "--preset", "strict"]);
        assert!(validate(&c).is_err());
    }

    #[test]
    fn test_validate_rejects_nan_threshold() {
        let file = input_file("[]");
        let path = file.path().to_str().unwrap();
        let c = cli(&[path, "--threshold", "NaN"]);
        assert!(validate(&c).is_err());
    }

    #[test]
    fn test_load_records_with_defaults() {
        let file = input_file(
            r#"[
                {"embedding": [1.0, 0.0], "imageIndex": 1},
                {"embedding": [0.0, 1.0], "imageIndex": 2, "faceIndex": 3,
                 "boundingBox": {"left": 1, "top": 2, "right": 3, "bottom": 4},
                 "crop": "crops/2_3.jpg"}
            ]"#,
        );
        let records = load_records(file.path()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].face_index, 0);
        assert_eq!(records[0].crop, None);
        assert_eq!(records[1].face_index, 3);
        assert_eq!(records[1].bounding_box, BoundingBox::new(1, 2, 3, 4));
        assert_eq!(records[1].crop, Some(PathBuf::from("crops/2_3.jpg")));
    }

    #[test]
    fn test_load_records_rejects_malformed_json() {
        let file = input_file(r#"[{"embedding": "nope"}]"#);
        assert!(load_records(file.path()).is_err());
    }

    #[test]
    fn test_end_to_end_summary_json() {
        let file = input_file(
            r#"[
                {"embedding": [1.0, 0.0], "imageIndex": 1, "crop": "a.jpg"},
                {"embedding": [0.99, 0.14], "imageIndex": 2, "crop": "b.jpg"},
                {"embedding": [0.0, 1.0], "imageIndex": 2, "faceIndex": 1, "crop": "c.jpg"}
            ]"#,
        );
        let records = load_records(file.path()).unwrap();
        let summary = summarize(&FaceClusterer::new(0.6).cluster(records));

        assert_eq!(
            summary.clusters[0].representative_face,
            Some(PathBuf::from("a.jpg"))
        );
        let json = render(&summary, true).unwrap();
        assert_eq!(
            json,
            r#"{"totalFaces":3,"totalPeople":2,"clusters":[{"personId":0,"faceCount":2,"imageIndices":[1,2]},{"personId":1,"faceCount":1,"imageIndices":[2]}]}"#
        );
    }

    #[test]
    fn test_render_pretty_is_multiline() {
        let summary: ClusteringSummary<()> = ClusteringSummary::empty();
        let pretty = render(&summary, false).unwrap();
        assert!(pretty.contains('\n'));
        assert!(pretty.contains("\"totalPeople\": 0"));
    }
}
