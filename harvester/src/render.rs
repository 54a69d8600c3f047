use crate::pipeline::RunReport;
use anyhow::Result;
use cloudcore::{CorpusKind, WordFrequencyTable};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use time::format_description::well_known::Rfc3339;

/// Word-cloud background theme.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub const ALL: [Theme; 2] = [Theme::Dark, Theme::Light];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

/// Layout bias handed to the renderer.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Mixed,
}

impl Orientation {
    pub const ALL: [Orientation; 2] = [Orientation::Horizontal, Orientation::Mixed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Horizontal => "horizontal",
            Orientation::Mixed => "mixed",
        }
    }

    /// Fraction of words laid out horizontally, in [0, 1].
    pub fn prefer_horizontal(&self) -> f32 {
        match self {
            Orientation::Horizontal => 1.0,
            Orientation::Mixed => 0.5,
        }
    }
}

/// One image the rendering collaborator is expected to produce.
#[derive(Debug, Serialize)]
pub struct RenderJob {
    pub corpus: CorpusKind,
    pub theme: Theme,
    pub orientation: Orientation,
    pub prefer_horizontal: f32,
    /// Frequency-table file, relative to the manifest.
    pub frequencies: String,
    /// Target image file name.
    pub image: String,
}

#[derive(Serialize)]
struct Manifest {
    generated_at: String,
    jobs: Vec<RenderJob>,
}

fn frequencies_file(kind: CorpusKind) -> String {
    format!("{}_frequencies.json", kind.as_str())
}

fn write_frequencies(out_dir: &Path, kind: CorpusKind, freq: &WordFrequencyTable) -> Result<()> {
    // BTreeMap for stable key order on disk.
    let sorted: BTreeMap<&str, u32> = freq.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    let json = serde_json::to_string_pretty(&sorted)?;
    fs::write(out_dir.join(frequencies_file(kind)), json)?;
    Ok(())
}

/// Write the per-corpus frequency tables and the manifest of the eight
/// corpus x theme x orientation render jobs. The core's obligation ends
/// here; image generation belongs to the rendering collaborator.
pub fn write_artifacts(out_dir: &Path, report: &RunReport) -> Result<usize> {
    fs::create_dir_all(out_dir)?;
    write_frequencies(out_dir, CorpusKind::Keywords, &report.keyword_freq)?;
    write_frequencies(out_dir, CorpusKind::Descriptions, &report.description_freq)?;

    let mut jobs = Vec::new();
    for theme in Theme::ALL {
        for orientation in Orientation::ALL {
            for corpus in CorpusKind::ALL {
                jobs.push(RenderJob {
                    corpus,
                    theme,
                    orientation,
                    prefer_horizontal: orientation.prefer_horizontal(),
                    frequencies: frequencies_file(corpus),
                    image: format!(
                        "{}_{}_{}.png",
                        corpus.as_str(),
                        orientation.as_str(),
                        theme.as_str()
                    ),
                });
            }
        }
    }

    let generated_at = time::OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default();
    let manifest = Manifest { generated_at, jobs };
    let json = serde_json::to_string_pretty(&manifest)?;
    fs::write(out_dir.join("render_jobs.json"), json)?;
    Ok(manifest.jobs.len())
}
