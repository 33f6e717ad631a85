//! Command-line interface for synthesizing textures from exemplar images

use crate::algorithm::executor::{ModelConfig, OverlappingModel, RunStatus};
use crate::analysis::palette::Exemplar;
use crate::analysis::patterns::Symmetry;
use crate::io::configuration::{
    DEFAULT_OUTPUT_HEIGHT, DEFAULT_OUTPUT_WIDTH, DEFAULT_SYMMETRY, DEFAULT_TILE_SIZE,
    OUTPUT_SUFFIX, PROGRESS_MIN_CELLS,
};
use crate::io::error::{Result, SynthesisError, WithContext};
use crate::io::image::export_indexed_image;
use crate::io::progress::ProgressManager;
use clap::Parser;
use std::path::{Path, PathBuf};

/// Image extensions accepted as exemplars
const IMAGE_EXTENSIONS: [&str; 2] = ["png", "bmp"];

#[derive(Parser)]
#[command(name = "wavecollapse")]
#[command(
    author,
    version,
    about = "Synthesize textures from exemplar images by overlapping wave function collapse"
)]
/// Command-line arguments for the texture synthesizer
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Input image file or directory to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Edge length of the overlapping patterns
    #[arg(short = 'n', long, default_value_t = DEFAULT_TILE_SIZE)]
    pub tile_size: usize,

    /// Output width in pixels
    #[arg(short = 'w', long, default_value_t = DEFAULT_OUTPUT_WIDTH)]
    pub width: usize,

    /// Output height in pixels
    #[arg(short = 'H', long, default_value_t = DEFAULT_OUTPUT_HEIGHT)]
    pub height: usize,

    /// Symmetry level: 1 (none), 2 (+reflection), 4 (+rotations), 8 (full)
    #[arg(short = 's', long, default_value_t = DEFAULT_SYMMETRY)]
    pub symmetry: u8,

    /// Wrap pattern extraction around the exemplar edges
    #[arg(long)]
    pub periodic_input: bool,

    /// Wrap the output grid into a torus
    #[arg(long)]
    pub periodic_output: bool,

    /// Random seed for reproducible generation (drawn and logged if absent)
    #[arg(long)]
    pub seed: Option<u32>,

    /// Output file path (single-file targets only)
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Orchestrates batch processing of exemplar images with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if target validation, configuration validation, or
    /// any file's synthesis fails; a contradiction aborts the batch
    pub fn process(&mut self) -> Result<()> {
        let config = self.validate_configuration()?;
        let files = self.collect_files()?;

        for file in &files {
            self.process_file(file, config)?;
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    /// Resolve and validate the run parameters shared by every file
    fn validate_configuration(&self) -> Result<ModelConfig> {
        let symmetry = Symmetry::from_level(self.cli.symmetry)?;

        if self.cli.output.is_some() && self.cli.target.is_dir() {
            return Err(crate::io::error::invalid_parameter(
                "output",
                &self.cli.output.as_deref().unwrap_or(Path::new("")).display(),
                &"an explicit output path requires a single-file target",
            ));
        }

        let seed = self.cli.seed.unwrap_or_else(|| {
            let drawn = rand::random::<u32>();
            log::info!("No seed given; drew {drawn} from OS entropy");
            drawn
        });
        log::info!("Run seed: {seed}");

        Ok(ModelConfig {
            tile_size: self.cli.tile_size,
            output_width: self.cli.width,
            output_height: self.cli.height,
            symmetry,
            periodic_input: self.cli.periodic_input,
            periodic_output: self.cli.periodic_output,
            seed,
        })
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        if self.cli.target.is_file() {
            if has_image_extension(&self.cli.target) {
                if self.should_process_file(&self.cli.target) {
                    Ok(vec![self.cli.target.clone()])
                } else {
                    Ok(vec![])
                }
            } else {
                Err(crate::io::error::target_error(
                    "Target file must be a PNG or BMP image",
                ))
            }
        } else if self.cli.target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(&self.cli.target)? {
                let path = entry?.path();
                if has_image_extension(&path) && self.should_process_file(&path) {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(crate::io::error::target_error(
                "Target must be a PNG/BMP file or a directory",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = self.output_path_for(input_path);
        if output_path.exists() {
            // Allow print for user feedback for progress messages
            #[allow(clippy::print_stderr)]
            if !self.cli.quiet {
                eprintln!("Skipping: {} (output exists)", input_path.display());
            }
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, input_path: &Path, config: ModelConfig) -> Result<()> {
        let output_path = self.output_path_for(input_path);

        let exemplar = Exemplar::from_image_file(input_path)?;
        let mut model = OverlappingModel::new(&exemplar, config)?;

        let total_cells = model.wave().total_cells();
        let show_progress = total_cells >= PROGRESS_MIN_CELLS;
        if show_progress {
            if let Some(ref mut pm) = self.progress_manager {
                pm.start_file(input_path, total_cells);
            }
        }

        while model.execute_iteration()? {
            if show_progress {
                if let Some(ref pm) = self.progress_manager {
                    pm.update(model.wave().decided_cells(), total_cells);
                }
            }
        }

        if show_progress {
            if let Some(ref mut pm) = self.progress_manager {
                pm.update(model.wave().decided_cells(), total_cells);
                pm.complete_file();
            }
        }

        match model.status() {
            RunStatus::Succeeded => {
                let cells = model.render()?;
                export_indexed_image(&cells, model.palette(), &output_path)?;
                log::info!(
                    "Wrote {} after {} steps",
                    output_path.display(),
                    model.iteration()
                );
                Ok(())
            }
            RunStatus::Contradicted => Err(SynthesisError::Contradiction {
                cell: model.contradiction_cell().unwrap_or([0, 0]),
                iteration: None,
            })
            .with_iteration(model.iteration()),
            RunStatus::Cancelled => {
                Err(SynthesisError::Cancelled { iteration: None })
                    .with_iteration(model.iteration())
            }
            RunStatus::Running => Err(SynthesisError::Contradiction {
                cell: [0, 0],
                iteration: None,
            })
            .with_iteration(model.iteration()),
        }
    }

    fn output_path_for(&self, input_path: &Path) -> PathBuf {
        if let Some(ref output) = self.cli.output {
            return output.clone();
        }

        let stem = input_path.file_stem().unwrap_or_default();
        let extension = input_path.extension().unwrap_or_default();
        let output_name = format!(
            "{}{}.{}",
            stem.to_string_lossy(),
            OUTPUT_SUFFIX,
            extension.to_string_lossy()
        );

        if let Some(parent) = input_path.parent() {
            parent.join(output_name)
        } else {
            PathBuf::from(output_name)
        }
    }
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(str::to_ascii_lowercase)
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}
