// vim: set ai et ts=4 sw=4 sts=4:
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use image::ImageError;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};

use super::clues;
use super::grid::Grid;
use super::render::{self, RenderedImage};

pub const FULL_IMAGE_NAME: &str = "nonogram_full.png";
pub const PARTIAL_IMAGE_NAME: &str = "nonogram_partial.png";
pub const CLUE_DOC_NAME: &str = "nonogram_clues.yaml";

const REVEAL_DENOMINATOR: usize = 5; // the teaser keeps one fifth of the filled cells

// ------------------------------------------------

#[derive(Debug)]
pub enum ExportError {
    Image(ImageError),
    Io(io::Error),
}
impl From<ImageError> for ExportError {
    fn from(other: ImageError) -> Self {
        ExportError::Image(other)
    }
}
impl From<io::Error> for ExportError {
    fn from(other: io::Error) -> Self {
        ExportError::Io(other)
    }
}
impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ExportError::Image(e) => write!(f, "could not render image: {}", e),
            ExportError::Io(e)    => write!(f, "could not write artifact: {}", e),
        }
    }
}

// ------------------------------------------------

/// RNG for the reveal shuffle; seeded when reproducible output is wanted.
pub fn reveal_rng(seed: Option<u64>) -> Box<dyn RngCore> {
    match seed {
        Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
        None       => Box::new(rand::thread_rng()),
    }
}

/// Builds the teaser grid: a shuffled one-fifth (by integer division) of the
/// filled cells, painted into a fresh all-empty grid of the same dimensions.
pub fn partial_reveal<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Grid {
    let mut filled = grid.filled_cells();
    let total = filled.len();
    filled.shuffle(rng);
    filled.truncate(total / REVEAL_DENOMINATOR);
    log::debug!("partial reveal keeps {} of {} filled cells", filled.len(), total);

    let mut revealed = Grid::new(grid.width(), grid.height());
    for (row, col) in filled {
        revealed.fill(col, row);
    }
    revealed
}

// ------------------------------------------------

/// The three export artifacts of one grid.
pub struct ExportBundle {
    pub full: RenderedImage,
    pub partial: RenderedImage,
    pub clue_doc: String,
}

/// Renders the full solution and the partial reveal. The clues are derived
/// once, from the full grid; the teaser is annotated with those same clues
/// so its numbers match the eventual solution, not its own sparse content.
pub fn bundle<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Result<ExportBundle, ImageError> {
    let clue_set = clues::derive(grid);
    let full = render::render(grid, &clue_set)?;
    let partial = render::render(&partial_reveal(grid, rng), &clue_set)?;
    log::info!("rendered {}x{} px solution and teaser images", full.width, full.height);

    Ok(ExportBundle {
        full,
        partial,
        clue_doc: clue_set.to_yaml_string(),
    })
}

/// Writes the bundle into the given directory under the fixed artifact
/// names, returning the paths written.
pub fn write_to_dir(bundle: &ExportBundle, dir: &Path) -> Result<Vec<PathBuf>, io::Error> {
    let mut written = Vec::<PathBuf>::new();

    let full_path = dir.join(FULL_IMAGE_NAME);
    fs::write(&full_path, &bundle.full.bytes)?;
    written.push(full_path);

    let partial_path = dir.join(PARTIAL_IMAGE_NAME);
    fs::write(&partial_path, &bundle.partial.bytes)?;
    written.push(partial_path);

    let doc_path = dir.join(CLUE_DOC_NAME);
    fs::write(&doc_path, bundle.clue_doc.as_bytes())?;
    written.push(doc_path);

    for path in &written {
        log::info!("wrote {}", path.display());
    }
    Ok(written)
}

// ------------------------------------------------
