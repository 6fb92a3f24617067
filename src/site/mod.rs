//! Site assembly: fetch the template, write the substituted documents,
//! build front-end assets and publish the output directory.
//!
//! Everything happens inside a staging directory next to the output
//! (`<output>.incomplete`). The staging directory only takes the output
//! name once every step has succeeded; on failure it is left in place with
//! a [`FAILURE_MARKER`] file describing the error.
pub mod fetch;
pub mod fs;
pub mod toolchain;

pub use fetch::{DEFAULT_TEMPLATE, DefaultFetcher, TemplateFetcher, TemplateSource};
pub use toolchain::{NpxToolchain, Toolchain};

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::AssembleError;
use crate::logging::Log;
use crate::resources::RESOURCES_DIR_NAME;
use crate::template::{Document, TemplateDocuments, TokenMap, check_strict, token_problems};

/// Suffix appended to the output name while a build is in progress.
pub const STAGING_SUFFIX: &str = ".incomplete";

/// File written into the staging directory when a build fails.
pub const FAILURE_MARKER: &str = "BUILD_FAILED";

/// Name of the template checkout inside the staging directory.
const TEMPLATE_DIR_NAME: &str = ".template";

/// Inputs to [`assemble`].
#[derive(Debug, Clone)]
pub struct SiteRequest<'a> {
    /// Final output directory; must not exist.
    pub output: &'a Path,
    /// Template to build from.
    pub template: &'a TemplateSource,
    /// Directory copied to `<output>/resources`.
    pub resources_dir: &'a Path,
    /// Token values for substitution.
    pub tokens: &'a TokenMap,
    /// Fail when a mapped token is left over or never used.
    pub strict: bool,
}

/// External collaborators used by [`assemble`].
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    /// Provides the template checkout.
    pub fetcher: &'a dyn TemplateFetcher,
    /// Builds the stylesheet and script.
    pub toolchain: &'a dyn Toolchain,
    /// Event sink.
    pub log: &'a dyn Log,
}

impl std::fmt::Debug for Collaborators<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}

/// Staging directory used while building `output`.
#[must_use]
pub fn staging_path(output: &Path) -> PathBuf {
    let mut name = output
        .file_name()
        .map_or_else(|| OsString::from("output"), OsString::from);
    name.push(STAGING_SUFFIX);
    output.with_file_name(name)
}

/// Fail if `output` already exists (as anything, including a dangling link).
///
/// # Errors
///
/// Returns [`AssembleError::OutputCollision`].
pub fn check_collision(output: &Path) -> Result<(), AssembleError> {
    if output.symlink_metadata().is_ok() {
        return Err(AssembleError::OutputCollision(output.to_path_buf()));
    }
    Ok(())
}

/// Inspect the staging path for `output`.
///
/// Returns `true` when it holds a failed earlier build (it carries a
/// [`FAILURE_MARKER`]) that may be discarded, `false` when it is absent.
///
/// # Errors
///
/// Returns [`AssembleError::OutputCollision`] for anything else at that
/// path, which is never deleted.
pub fn check_staging(output: &Path) -> Result<bool, AssembleError> {
    let staging = staging_path(output);
    if staging.symlink_metadata().is_err() {
        return Ok(false);
    }
    if staging.is_dir() && staging.join(FAILURE_MARKER).is_file() {
        Ok(true)
    } else {
        Err(AssembleError::OutputCollision(staging))
    }
}

/// Build the site into `request.output`.
///
/// Returns the output directory on success.
///
/// # Errors
///
/// Returns [`AssembleError::OutputCollision`] before touching the disk if
/// the output exists, or if the staging path exists without a
/// [`FAILURE_MARKER`]. Any later failure leaves the staging directory in
/// place with a [`FAILURE_MARKER`] and is returned unchanged.
pub fn assemble(
    request: &SiteRequest<'_>,
    with: Collaborators<'_>,
) -> Result<PathBuf, AssembleError> {
    check_collision(request.output)?;

    let staging = staging_path(request.output);
    if check_staging(request.output)? {
        with.log.warn(&format!(
            "removing stale staging directory {}",
            staging.display()
        ));
        fs::remove_dir_if_exists(&staging)?;
    }
    std::fs::create_dir_all(&staging).map_err(|e| AssembleError::write(&staging, e))?;
    let staging = std::path::absolute(&staging).map_err(|e| AssembleError::write(&staging, e))?;

    match build_in(&staging, request, with) {
        Ok(()) => {
            std::fs::rename(&staging, request.output)
                .map_err(|e| AssembleError::write(request.output, e))?;
            with.log
                .info(&format!("site written to {}", request.output.display()));
            Ok(request.output.to_path_buf())
        }
        Err(e) => {
            let marker = staging.join(FAILURE_MARKER);
            if let Err(write_err) = std::fs::write(&marker, format!("{e}\n")) {
                with.log.warn(&format!(
                    "could not write {}: {write_err}",
                    marker.display()
                ));
            }
            with.log.error(&format!(
                "incomplete build left in {}",
                staging.display()
            ));
            Err(e)
        }
    }
}

fn build_in(
    staging: &Path,
    request: &SiteRequest<'_>,
    with: Collaborators<'_>,
) -> Result<(), AssembleError> {
    let checkout = staging.join(TEMPLATE_DIR_NAME);
    let fetch_failed = |reason: String| AssembleError::TemplateFetchFailed {
        source_desc: request.template.to_string(),
        reason,
    };

    with.log
        .info(&format!("fetching template from {}", request.template));
    with.fetcher
        .fetch(request.template, &checkout)
        .map_err(|e| fetch_failed(format!("{e:#}")))?;

    let mut original = TemplateDocuments::default();
    for document in Document::ALL {
        let path = checkout.join(document.file_name());
        let text = std::fs::read_to_string(&path)
            .map_err(|e| fetch_failed(format!("cannot read {}: {e}", document.file_name())))?;
        original.set(document, text);
    }

    let rendered = original.substituted(request.tokens);
    if request.strict {
        check_strict(&rendered, request.tokens)?;
    } else {
        for problem in token_problems(&rendered, request.tokens) {
            with.log.debug(&problem);
        }
    }

    for document in Document::ALL {
        fs::write_file(
            &checkout.join(document.file_name()),
            rendered.get(document),
        )?;
    }
    for document in [Document::Page, Document::SecondaryPage] {
        fs::write_file(&staging.join(document.file_name()), rendered.get(document))?;
    }

    let build_failed = |step: &'static str| {
        move |e: anyhow::Error| AssembleError::BuildFailed {
            step,
            reason: format!("{e:#}"),
        }
    };
    with.toolchain
        .prepare(&checkout)
        .map_err(build_failed("dependency installation"))?;
    with.log.info("compiling stylesheet");
    with.toolchain
        .compile_stylesheet(&checkout, &staging.join(Document::Stylesheet.file_name()))
        .map_err(build_failed("stylesheet compilation"))?;
    with.log.info("bundling script");
    with.toolchain
        .bundle_script(&checkout, &staging.join(Document::Script.file_name()))
        .map_err(build_failed("script bundling"))?;

    fs::copy_dir_recursive(
        request.resources_dir,
        &staging.join(RESOURCES_DIR_NAME),
        true,
    )?;
    fs::remove_dir_if_exists(&checkout)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::logging::{BufferedLog, LogLevel};
    use crate::template::Token;

    struct CopyFetcher(PathBuf);

    impl TemplateFetcher for CopyFetcher {
        fn fetch(&self, _source: &TemplateSource, dest: &Path) -> anyhow::Result<()> {
            fs::copy_dir_recursive(&self.0, dest, true)?;
            Ok(())
        }
    }

    struct FailingFetcher;

    impl TemplateFetcher for FailingFetcher {
        fn fetch(&self, _source: &TemplateSource, _dest: &Path) -> anyhow::Result<()> {
            anyhow::bail!("network down")
        }
    }

    /// Copies sources to outputs verbatim.
    struct CopyToolchain {
        fail_stylesheet: bool,
    }

    impl Toolchain for CopyToolchain {
        fn prepare(&self, _template_dir: &Path) -> anyhow::Result<()> {
            Ok(())
        }

        fn compile_stylesheet(&self, template_dir: &Path, output: &Path) -> anyhow::Result<()> {
            if self.fail_stylesheet {
                anyhow::bail!("tailwindcss exited 1");
            }
            std::fs::copy(template_dir.join("style.css"), output)?;
            Ok(())
        }

        fn bundle_script(&self, template_dir: &Path, output: &Path) -> anyhow::Result<()> {
            std::fs::copy(template_dir.join("script.js"), output)?;
            Ok(())
        }
    }

    struct Fixture {
        root: tempfile::TempDir,
        tokens: TokenMap,
        source: TemplateSource,
    }

    impl Fixture {
        fn new() -> Self {
            let root = tempfile::tempdir().unwrap();
            let template = root.path().join("template");
            std::fs::create_dir_all(&template).unwrap();
            std::fs::write(template.join("index.html"), "<body class=\"{BODYCLASS}\">").unwrap();
            std::fs::write(template.join("map.html"), "<p>map</p>").unwrap();
            std::fs::write(template.join("style.css"), ".c { filter: blur({BLUR}); }").unwrap();
            std::fs::write(template.join("script.js"), "const api = \"{API}\";").unwrap();

            let resources = root.path().join("resources");
            std::fs::create_dir_all(&resources).unwrap();
            std::fs::write(resources.join("bg.png"), b"png").unwrap();

            let mut tokens = TokenMap::new();
            tokens.insert(Token::BodyClass, "nd-center");
            tokens.insert(Token::Blur, "10px");
            tokens.insert(Token::Api, "https://api.lanyard.rest");

            Self {
                source: TemplateSource::Local(template),
                root,
                tokens,
            }
        }

        fn output(&self) -> PathBuf {
            self.root.path().join("output")
        }

        fn run(
            &self,
            strict: bool,
            fetcher: &dyn TemplateFetcher,
            toolchain: &dyn Toolchain,
            log: &BufferedLog,
        ) -> Result<PathBuf, AssembleError> {
            let output = self.output();
            let resources = self.root.path().join("resources");
            assemble(
                &SiteRequest {
                    output: &output,
                    template: &self.source,
                    resources_dir: &resources,
                    tokens: &self.tokens,
                    strict,
                },
                Collaborators {
                    fetcher,
                    toolchain,
                    log,
                },
            )
        }

        fn template_dir(&self) -> PathBuf {
            self.root.path().join("template")
        }
    }

    #[test]
    fn staging_path_appends_suffix() {
        assert_eq!(
            staging_path(Path::new("site/output")),
            PathBuf::from("site/output.incomplete")
        );
    }

    #[test]
    fn builds_complete_output() {
        let fx = Fixture::new();
        let log = BufferedLog::new();
        let out = fx
            .run(
                false,
                &CopyFetcher(fx.template_dir()),
                &CopyToolchain {
                    fail_stylesheet: false,
                },
                &log,
            )
            .unwrap();

        assert_eq!(
            std::fs::read_to_string(out.join("index.html")).unwrap(),
            "<body class=\"nd-center\">"
        );
        assert_eq!(
            std::fs::read_to_string(out.join("style.css")).unwrap(),
            ".c { filter: blur(10px); }"
        );
        assert!(out.join("map.html").is_file());
        assert!(out.join("script.js").is_file());
        assert!(out.join("resources/bg.png").is_file());
        assert!(!out.join(TEMPLATE_DIR_NAME).exists());
        assert!(!staging_path(&fx.output()).exists());
    }

    #[test]
    fn existing_output_is_a_collision() {
        let fx = Fixture::new();
        std::fs::create_dir_all(fx.output()).unwrap();
        let err = fx
            .run(
                false,
                &CopyFetcher(fx.template_dir()),
                &CopyToolchain {
                    fail_stylesheet: false,
                },
                &BufferedLog::new(),
            )
            .unwrap_err();
        assert!(matches!(err, AssembleError::OutputCollision(_)));
        assert!(!staging_path(&fx.output()).exists());
    }

    #[test]
    fn stale_staging_directory_is_replaced() {
        let fx = Fixture::new();
        let staging = staging_path(&fx.output());
        std::fs::create_dir_all(&staging).unwrap();
        std::fs::write(staging.join("leftover"), "x").unwrap();
        std::fs::write(staging.join(FAILURE_MARKER), "earlier failure\n").unwrap();
        let log = BufferedLog::new();

        let out = fx
            .run(
                false,
                &CopyFetcher(fx.template_dir()),
                &CopyToolchain {
                    fail_stylesheet: false,
                },
                &log,
            )
            .unwrap();

        assert!(!out.join("leftover").exists());
        assert!(log.warnings().iter().any(|w| w.contains("stale staging")));
    }

    #[test]
    fn unmarked_staging_directory_is_kept() {
        let fx = Fixture::new();
        let staging = staging_path(&fx.output());
        std::fs::create_dir_all(&staging).unwrap();
        std::fs::write(staging.join("my_notes.txt"), "keep me").unwrap();

        let err = fx
            .run(
                false,
                &CopyFetcher(fx.template_dir()),
                &CopyToolchain {
                    fail_stylesheet: false,
                },
                &BufferedLog::new(),
            )
            .unwrap_err();

        let AssembleError::OutputCollision(path) = err else {
            panic!("expected OutputCollision, got {err:?}");
        };
        assert_eq!(path, staging);
        assert_eq!(
            std::fs::read_to_string(staging.join("my_notes.txt")).unwrap(),
            "keep me"
        );
        assert!(!fx.output().exists());
    }

    #[test]
    fn fetch_failure_marks_staging() {
        let fx = Fixture::new();
        let err = fx
            .run(
                false,
                &FailingFetcher,
                &CopyToolchain {
                    fail_stylesheet: false,
                },
                &BufferedLog::new(),
            )
            .unwrap_err();

        assert!(matches!(err, AssembleError::TemplateFetchFailed { .. }));
        assert!(!fx.output().exists());
        let marker = staging_path(&fx.output()).join(FAILURE_MARKER);
        assert!(
            std::fs::read_to_string(marker)
                .unwrap()
                .contains("network down")
        );
    }

    #[test]
    fn build_failure_names_step() {
        let fx = Fixture::new();
        let log = BufferedLog::new();
        let err = fx
            .run(
                false,
                &CopyFetcher(fx.template_dir()),
                &CopyToolchain {
                    fail_stylesheet: true,
                },
                &log,
            )
            .unwrap_err();

        let AssembleError::BuildFailed { step, reason } = err else {
            panic!("expected BuildFailed");
        };
        assert_eq!(step, "stylesheet compilation");
        assert!(reason.contains("tailwindcss"));
        assert!(!fx.output().exists());
        assert!(staging_path(&fx.output()).join(FAILURE_MARKER).is_file());
        assert!(!log.messages(LogLevel::Error).is_empty());
    }

    #[test]
    fn missing_template_document_is_fetch_failure() {
        let fx = Fixture::new();
        std::fs::remove_file(fx.template_dir().join("map.html")).unwrap();
        let err = fx
            .run(
                false,
                &CopyFetcher(fx.template_dir()),
                &CopyToolchain {
                    fail_stylesheet: false,
                },
                &BufferedLog::new(),
            )
            .unwrap_err();
        let AssembleError::TemplateFetchFailed { reason, .. } = err else {
            panic!("expected TemplateFetchFailed");
        };
        assert!(reason.contains("map.html"), "{reason}");
    }

    #[test]
    fn strict_mode_rejects_unused_tokens() {
        let mut fx = Fixture::new();
        fx.tokens.insert(Token::DiscordId, "123");
        let toolchain = CopyToolchain {
            fail_stylesheet: false,
        };

        let err = fx
            .run(
                true,
                &CopyFetcher(fx.template_dir()),
                &toolchain,
                &BufferedLog::new(),
            )
            .unwrap_err();
        assert!(matches!(err, AssembleError::UnresolvedTokens(_)));

        // Lenient mode only logs the same problem.
        std::fs::remove_dir_all(staging_path(&fx.output())).unwrap();
        let log = BufferedLog::new();
        fx.run(false, &CopyFetcher(fx.template_dir()), &toolchain, &log)
            .unwrap();
        assert!(
            log.messages(LogLevel::Debug)
                .iter()
                .any(|m| m.contains("{DISCORDID}"))
        );
    }
}
