//! Stylesheet compilation and script bundling.
use std::path::Path;

use anyhow::{Context as _, Result, bail};

use crate::exec;
use crate::template::Document;

/// Front-end build tools run against a substituted template checkout.
pub trait Toolchain {
    /// Install whatever the template needs before building.
    ///
    /// # Errors
    ///
    /// Returns an error if preparation fails.
    fn prepare(&self, template_dir: &Path) -> Result<()>;

    /// Compile the template stylesheet into `output`, scanning the page
    /// documents for used classes.
    ///
    /// # Errors
    ///
    /// Returns an error if compilation fails.
    fn compile_stylesheet(&self, template_dir: &Path, output: &Path) -> Result<()>;

    /// Bundle and minify the template script into `output`.
    ///
    /// # Errors
    ///
    /// Returns an error if bundling fails.
    fn bundle_script(&self, template_dir: &Path, output: &Path) -> Result<()>;
}

/// [`Toolchain`] running Tailwind CSS and esbuild through `npx`.
#[derive(Debug, Default, Clone, Copy)]
pub struct NpxToolchain;

impl NpxToolchain {
    fn require(program: &str) -> Result<()> {
        if exec::which(program) {
            Ok(())
        } else {
            bail!("{program} not found on PATH")
        }
    }
}

fn path_arg(path: &Path) -> Result<&str> {
    path.to_str()
        .with_context(|| format!("non UTF-8 path: {}", path.display()))
}

impl Toolchain for NpxToolchain {
    fn prepare(&self, template_dir: &Path) -> Result<()> {
        if !template_dir.join("package.json").is_file() {
            return Ok(());
        }
        Self::require("npm")?;
        exec::run_in(template_dir, "npm", &["install", "--no-audit", "--no-fund"])?;
        Ok(())
    }

    fn compile_stylesheet(&self, template_dir: &Path, output: &Path) -> Result<()> {
        Self::require("npx")?;
        let content = format!(
            "{},{}",
            Document::Page.file_name(),
            Document::SecondaryPage.file_name()
        );
        exec::run_in(
            template_dir,
            "npx",
            &[
                "tailwindcss",
                "-i",
                Document::Stylesheet.file_name(),
                "-o",
                path_arg(output)?,
                "--minify",
                "--content",
                &content,
            ],
        )?;
        Ok(())
    }

    fn bundle_script(&self, template_dir: &Path, output: &Path) -> Result<()> {
        Self::require("npx")?;
        let outfile = format!("--outfile={}", path_arg(output)?);
        exec::run_in(
            template_dir,
            "npx",
            &[
                "esbuild",
                Document::Script.file_name(),
                "--bundle",
                "--minify",
                &outfile,
            ],
        )?;
        Ok(())
    }
}
