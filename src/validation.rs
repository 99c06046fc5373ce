//! Post-packaging output validation
//!
//! After a packaging step the pipeline checks that the artifacts it expects
//! are in place. Often a single sample file stands in for a whole directory
//! of similar files. Every path is checked before anything is reported, so
//! one run shows every problem at once.

use crate::exceptions::{Result, ValidationError};
use log::{debug, info};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Check that every path exists and is non-empty.
///
/// Diagnostics go to stderr and the success line to stdout.
pub fn validate_files_present<P: AsRef<Path>>(paths: &[P]) -> Result<()> {
    let mut stderr = io::stderr().lock();
    let result = check_paths(paths, &mut stderr);
    drop(stderr);

    if result.is_ok() {
        println!("All paths exist");
    }
    result
}

/// Same as [`validate_files_present`], with all output written to `out`
pub fn validate_files_present_to<P: AsRef<Path>, W: Write>(paths: &[P], out: &mut W) -> Result<()> {
    check_paths(paths, out)?;
    writeln!(out, "All paths exist")?;
    Ok(())
}

fn check_paths<P: AsRef<Path>, W: Write>(paths: &[P], out: &mut W) -> Result<()> {
    let mut report = ValidationError::default();

    for path in paths {
        let path = path.as_ref();
        debug!("🔍 Checking {}", path.display());

        if !path.exists() {
            writeln!(out, "File {} does not exist", path.display())?;
            describe_ancestors(path, out)?;
            report.missing.push(path.to_path_buf());
        }

        if path.exists() {
            match fs::metadata(path) {
                Ok(meta) if meta.len() == 0 => {
                    writeln!(out, "File {} is empty", path.display())?;
                    report.empty.push(path.to_path_buf());
                }
                Ok(_) => {}
                Err(e) => writeln!(out, "Could not stat {}: {e}", path.display())?,
            }
        }
    }

    if report.is_clean() {
        info!("✅ All {} paths exist", paths.len());
        return Ok(());
    }

    debug!(
        "❌ {} missing, {} empty",
        report.missing.len(),
        report.empty.len()
    );
    Err(report.into())
}

/// Nth ancestor of `path`, or the empty path once we run past the root
fn ancestor(path: &Path, generation: usize) -> PathBuf {
    path.ancestors()
        .nth(generation)
        .map(Path::to_path_buf)
        .unwrap_or_default()
}

/// Print what the directories above a missing file look like
fn describe_ancestors<W: Write>(path: &Path, out: &mut W) -> io::Result<()> {
    let parent = ancestor(path, 1);
    let grandparent = ancestor(path, 2);
    let great_grandparent = ancestor(path, 3);

    describe_folder("Parent", &parent, out)?;
    if grandparent.exists() {
        list_folder("grandparent", &grandparent, out)
    } else {
        writeln!(
            out,
            "Grandparent folder {} does not exist",
            grandparent.display()
        )?;
        describe_folder("Great-grandparent", &great_grandparent, out)
    }
}

fn describe_folder<W: Write>(label: &str, dir: &Path, out: &mut W) -> io::Result<()> {
    if dir.exists() {
        list_folder(&label.to_lowercase(), dir, out)
    } else {
        writeln!(out, "{label} folder {} does not exist", dir.display())
    }
}

fn list_folder<W: Write>(label: &str, dir: &Path, out: &mut W) -> io::Result<()> {
    match read_sorted(dir) {
        Ok(names) => writeln!(
            out,
            "Contents of {label} folder {}: [{}]",
            dir.display(),
            names.join(", ")
        ),
        Err(e) => writeln!(out, "Could not list {label} folder {}: {e}", dir.display()),
    }
}

fn read_sorted(dir: &Path) -> io::Result<Vec<String>> {
    let mut names = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
        .collect::<io::Result<Vec<_>>>()?;
    names.sort();
    Ok(names)
}
