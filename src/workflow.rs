use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::fs;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::caption::generate_cues;
use crate::config::Config;
use crate::error::{Result, TextcueError};
use crate::output::WriterFactory;
use crate::text::decode_document;

/// Outcome of converting one document
#[derive(Debug, Clone)]
pub struct ConversionReport {
    pub input: PathBuf,
    pub cue_count: usize,
    /// End time of the last cue
    pub total_duration: Duration,
    /// Files written, one per configured format (empty when the document had no text)
    pub outputs: Vec<PathBuf>,
}

/// File-level driver around the caption pipeline
///
/// Cheap to clone; every clone shares the same read-only configuration, so
/// documents can be converted on independent tasks.
#[derive(Debug, Clone)]
pub struct Workflow {
    config: Arc<Config>,
}

impl Workflow {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Convert a single text file, writing outputs next to it unless `output_dir` is given
    pub async fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_dir: Option<Q>,
    ) -> Result<ConversionReport> {
        let input_path = input_path.as_ref();
        info!("Converting file: {}", input_path.display());

        if !input_path.is_file() {
            return Err(TextcueError::FileNotFound(input_path.display().to_string()));
        }

        let output_dir = match output_dir {
            Some(dir) => dir.as_ref().to_path_buf(),
            None => input_path
                .parent()
                .map(Path::to_path_buf)
                .ok_or_else(|| TextcueError::Config("Cannot determine output directory".to_string()))?,
        };

        fs::create_dir_all(&output_dir).await?;

        self.convert_into(input_path, &output_dir).await
    }

    /// Convert every matching document under `input_dir`, mirroring its layout in `output_dir`
    ///
    /// Documents are converted concurrently, up to `batch.max_parallel` at a time.
    /// A failing document is logged and skipped; the reports of the others are returned
    /// sorted by input path.
    pub async fn convert_directory<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_dir: P,
        output_dir: Option<Q>,
    ) -> Result<Vec<ConversionReport>> {
        let input_dir = input_dir.as_ref();
        info!("Converting directory: {}", input_dir.display());

        if !input_dir.is_dir() {
            return Err(TextcueError::FileNotFound(input_dir.display().to_string()));
        }

        let output_root = match output_dir {
            Some(dir) => dir.as_ref().to_path_buf(),
            None => input_dir.to_path_buf(),
        };

        let documents = self.find_documents(input_dir);
        info!("Found {} documents to convert", documents.len());

        let progress = ProgressBar::new(documents.len() as u64);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .map_err(|e| TextcueError::Config(format!("Invalid progress template: {}", e)))?
                .progress_chars("#>-"),
        );

        let semaphore = Arc::new(Semaphore::new(self.config.batch.max_parallel));
        let mut tasks = JoinSet::new();

        for document in documents {
            let target_dir = mirrored_dir(&document, input_dir, &output_root);
            let workflow = self.clone();
            let semaphore = Arc::clone(&semaphore);

            tasks.spawn(async move {
                let result: Result<ConversionReport> = async {
                    let _permit = semaphore
                        .acquire_owned()
                        .await
                        .map_err(|e| TextcueError::Task(e.to_string()))?;
                    fs::create_dir_all(&target_dir).await?;
                    workflow.convert_into(&document, &target_dir).await
                }
                .await;
                (document, result)
            });
        }

        let mut reports = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            let (document, result) = joined.map_err(|e| TextcueError::Task(e.to_string()))?;
            progress.inc(1);

            match result {
                Ok(report) => {
                    progress.set_message(format!("{}", document.display()));
                    reports.push(report);
                }
                Err(e) => warn!("Failed to convert {}: {}", document.display(), e),
            }
        }
        progress.finish_and_clear();

        reports.sort_by(|a, b| a.input.cmp(&b.input));
        info!("Converted {} documents", reports.len());
        Ok(reports)
    }

    /// Text documents under `input_dir` whose extension is listed in `batch.extensions`
    pub fn find_documents(&self, input_dir: &Path) -> Vec<PathBuf> {
        let extensions: Vec<String> = self
            .config
            .batch
            .extensions
            .iter()
            .map(|ext| ext.trim_start_matches('.').to_lowercase())
            .collect();

        let mut walker = WalkDir::new(input_dir);
        if !self.config.batch.recursive {
            walker = walker.max_depth(1);
        }

        let mut documents: Vec<PathBuf> = walker
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| {
                entry
                    .path()
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| extensions.contains(&ext.to_lowercase()))
                    .unwrap_or(false)
            })
            .map(|entry| entry.path().to_path_buf())
            .collect();

        documents.sort();
        documents
    }

    /// Read, convert and write one document into an existing output directory
    async fn convert_into(&self, input_path: &Path, output_dir: &Path) -> Result<ConversionReport> {
        let bytes = fs::read(input_path).await?;
        let text = decode_document(&bytes, &input_path.display().to_string())?;

        let cues = generate_cues(&text, &self.config.caption)?;
        let total_duration = cues.last().map(|cue| cue.end).unwrap_or_default();

        let mut report = ConversionReport {
            input: input_path.to_path_buf(),
            cue_count: cues.len(),
            total_duration,
            outputs: Vec::new(),
        };

        if cues.is_empty() {
            if self.config.output.fail_on_empty {
                return Err(TextcueError::EmptyInput(input_path.display().to_string()));
            }
            warn!("No caption text in {}, nothing written", input_path.display());
            return Ok(report);
        }

        let stem = input_path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "captions".to_string());

        let planned: Vec<_> = WriterFactory::create_writers(&self.config, &stem)
            .into_iter()
            .map(|writer| {
                let output_path = output_dir.join(format!(
                    "{}{}.{}",
                    stem,
                    self.config.output.file_suffix,
                    writer.format().extension()
                ));
                (writer, output_path)
            })
            .collect();

        // All targets are checked before any of them is written
        if !self.config.output.overwrite {
            for (_, output_path) in &planned {
                if fs::try_exists(output_path).await? {
                    return Err(TextcueError::OutputExists(output_path.display().to_string()));
                }
            }
        }

        let mut rendered = Vec::with_capacity(planned.len());
        for (writer, output_path) in planned {
            rendered.push((output_path, writer.render(&cues)?));
        }

        for (output_path, content) in rendered {
            fs::write(&output_path, content).await?;
            debug!("Wrote {}", output_path.display());
            report.outputs.push(output_path);
        }

        info!(
            "Generated {} cues ({:.1}s) from {}",
            report.cue_count,
            report.total_duration.as_secs_f64(),
            input_path.display()
        );
        Ok(report)
    }
}

/// Output directory for `document` that mirrors its position below `input_root`
fn mirrored_dir(document: &Path, input_root: &Path, output_root: &Path) -> PathBuf {
    document
        .parent()
        .and_then(|parent| pathdiff::diff_paths(parent, input_root))
        .map(|relative| output_root.join(relative))
        .unwrap_or_else(|| output_root.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mirrored_dir() {
        assert_eq!(
            mirrored_dir(Path::new("/in/a/b/doc.txt"), Path::new("/in"), Path::new("/out")),
            PathBuf::from("/out/a/b")
        );
        assert_eq!(
            mirrored_dir(Path::new("/in/doc.txt"), Path::new("/in"), Path::new("/out")),
            PathBuf::from("/out")
        );
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = Config::default();
        config.caption.sentences_per_cue = 0;
        assert!(matches!(
            Workflow::new(config),
            Err(TextcueError::InvalidConfiguration(_))
        ));
    }
}
