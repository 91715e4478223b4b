//! Code related to the demo models and the CLI commands for interacting with them.
use super::{RunOpts, handle_run_command};
use crate::settings::Settings;
use anyhow::{Context, Result, ensure};
use clap::Subcommand;
use include_dir::{Dir, DirEntry, include_dir};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// The directory containing the demo models.
const DEMOS_DIR: Dir = include_dir!("demos");

/// The available subcommands for managing demo models.
#[derive(Subcommand)]
pub enum ExampleSubcommands {
    /// List available demo models.
    List,
    /// Provide information about the specified demo model.
    Info {
        /// The name of the demo model.
        name: String,
    },
    /// Extract a demo model to a new directory.
    Extract {
        /// The name of the demo model to extract.
        name: String,
        /// The destination folder for the demo model.
        new_path: Option<PathBuf>,
    },
    /// Run a demo model.
    Run {
        /// The name of the demo model to run.
        name: String,
        /// Directory for output files
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
}

impl ExampleSubcommands {
    /// Execute the supplied example subcommand
    pub fn execute(self) -> Result<()> {
        match self {
            Self::List => handle_example_list_command(),
            Self::Info { name } => handle_example_info_command(&name)?,
            Self::Extract {
                name,
                new_path: dest,
            } => handle_example_extract_command(&name, dest.as_deref())?,
            Self::Run { name, output_dir } => {
                handle_example_run_command(&name, output_dir.as_deref(), None)?;
            }
        }

        Ok(())
    }
}

/// Handle the `example list` command.
fn handle_example_list_command() {
    for entry in DEMOS_DIR.dirs() {
        println!("{}", entry.path().display());
    }
}

/// Handle the `example info` command.
fn handle_example_info_command(name: &str) -> Result<()> {
    let path: PathBuf = [name, "README.txt"].iter().collect();
    let readme = DEMOS_DIR
        .get_file(path)
        .context("Demo model not found.")?
        .contents_utf8()
        .expect("README.txt is not UTF-8 encoded");

    println!("{readme}");

    Ok(())
}

/// Handle the `example extract` command
fn handle_example_extract_command(name: &str, dest: Option<&Path>) -> Result<()> {
    let dest = dest.unwrap_or(Path::new(name));
    extract_example(name, dest)
}

/// Extract the specified demo model to a new directory
fn extract_example(name: &str, new_path: &Path) -> Result<()> {
    // Find the subdirectory in DEMOS_DIR whose name matches `name`.
    let sub_dir = DEMOS_DIR.get_dir(name).context("Demo model not found.")?;

    ensure!(
        !new_path.exists(),
        "Destination directory {} already exists",
        new_path.display()
    );

    // Copy the contents of the subdirectory to the destination
    fs::create_dir(new_path)?;
    for entry in sub_dir.entries() {
        match entry {
            DirEntry::Dir(_) => panic!("Subdirectories in demo models not supported"),
            DirEntry::File(f) => {
                let file_name = f.path().file_name().unwrap();
                let file_path = new_path.join(file_name);
                fs::write(&file_path, f.contents())?;
            }
        }
    }

    Ok(())
}

/// Handle the `example run` command.
pub fn handle_example_run_command(
    name: &str,
    output_path: Option<&Path>,
    settings: Option<Settings>,
) -> Result<()> {
    let temp_dir = TempDir::new().context("Failed to create temporary directory.")?;
    let model_path = temp_dir.path().join(name);
    extract_example(name, &model_path)?;

    let opts = RunOpts {
        output_dir: output_path.map(Path::to_path_buf),
        overwrite: false,
    };
    handle_run_command(&model_path, &opts, settings)
}
