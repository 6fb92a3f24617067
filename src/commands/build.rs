use std::path::PathBuf;

use anyhow::Result;

use crate::cli::BuildOpts;
use crate::error::BiolinkError;
use crate::logging::{Log, Logger, StepStatus};
use crate::render::{BackendProbe, HttpProbe};
use crate::site::{
    self, Collaborators, DefaultFetcher, NpxToolchain, SiteRequest, TemplateFetcher,
    TemplateSource, Toolchain,
};
use crate::{config, effects, render, resources, template};

/// External collaborators the pipeline talks to.
#[derive(Clone, Copy)]
pub struct Pipeline<'a> {
    /// Confirms custom presence backends.
    pub probe: &'a dyn BackendProbe,
    /// Provides the template checkout.
    pub fetcher: &'a dyn TemplateFetcher,
    /// Builds the stylesheet and script.
    pub toolchain: &'a dyn Toolchain,
}

impl std::fmt::Debug for Pipeline<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline").finish_non_exhaustive()
    }
}

/// Run the build command with the production collaborators and print a
/// step summary.
///
/// # Errors
///
/// Returns the first fatal error of the run.
pub fn run(opts: &BuildOpts, log: &Logger) -> Result<PathBuf> {
    let version = option_env!("BIOLINK_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
    log.info(&format!("biolink {version}"));

    let probe = HttpProbe::default();
    let pipeline = Pipeline {
        probe: &probe,
        fetcher: &DefaultFetcher,
        toolchain: &NpxToolchain,
    };
    let result = build(opts, pipeline, log);
    log.print_summary();
    Ok(result?)
}

/// Run every stage in order, stopping at the first fatal error.
///
/// Configuration, resource and backend failures happen before anything is
/// written to disk.
///
/// # Errors
///
/// Returns the first [`BiolinkError`] raised by a stage.
pub fn build(
    opts: &BuildOpts,
    pipeline: Pipeline<'_>,
    log: &dyn Log,
) -> Result<PathBuf, BiolinkError> {
    log.stage("Checking output directory");
    step(log, "output directory", || {
        site::check_collision(&opts.output)?;
        site::check_staging(&opts.output).map(|_| ())
    })?;

    log.stage("Loading configuration");
    let config = step(log, "configuration", || config::load(&opts.input))?;
    log.info(&format!(
        "loaded profile for {} ({} link(s))",
        config.name,
        config.links.len()
    ));

    log.stage("Resolving effects");
    let body_classes = effects::resolve(config.effects.as_ref(), log);
    log.debug(&format!("effect classes: {}", body_classes.to_attribute()));
    log.record_step("effects", StepStatus::Ok, None);

    log.stage("Validating resources");
    let resources_dir = opts.resources_dir();
    let validated = step(log, "resources", || {
        resources::validate(&config, &resources_dir, log)
    })?;

    log.stage("Rendering profile");
    let derived = step(log, "render", || {
        render::render(&config, &body_classes, &validated, pipeline.probe, log)
    })?;
    record_skipped_features(&config, &derived, log);

    let tokens = template::build_token_map(&config, &derived);
    log.debug(&format!("{} token(s) mapped", tokens.tokens().count()));

    log.stage("Assembling site");
    let source = opts
        .template
        .as_deref()
        .map_or_else(TemplateSource::default, TemplateSource::parse);
    let request = SiteRequest {
        output: &opts.output,
        template: &source,
        resources_dir: &resources_dir,
        tokens: &tokens,
        strict: opts.strict,
    };
    let output = step(log, "assemble", || {
        site::assemble(
            &request,
            Collaborators {
                fetcher: pipeline.fetcher,
                toolchain: pipeline.toolchain,
                log,
            },
        )
    })?;
    Ok(output)
}

/// Record each optional feature left out of the rendered site.
fn record_skipped_features(
    config: &config::Configuration,
    derived: &render::DerivedPresentation,
    log: &dyn Log,
) {
    let reason = |declared: bool| if declared { "file missing" } else { "not configured" };
    if derived.music_path.is_none() {
        log.record_step("music", StepStatus::Skipped, Some(reason(config.music.is_some())));
    }
    if !derived.body_classes.contains("avatar-include") {
        log.record_step(
            "avatar",
            StepStatus::Skipped,
            Some(reason(config.profile.avatar.is_some())),
        );
    }
    if derived.discord_id.is_none() {
        log.record_step("discord widget", StepStatus::Skipped, Some("not configured"));
    }
    if derived.geolocation.is_none() {
        log.record_step("map widget", StepStatus::Skipped, Some("not configured"));
    }
}

/// Run one stage, recording its outcome for the summary.
fn step<T, E>(
    log: &dyn Log,
    name: &str,
    f: impl FnOnce() -> Result<T, E>,
) -> Result<T, BiolinkError>
where
    E: Into<BiolinkError>,
{
    match f() {
        Ok(value) => {
            log.record_step(name, StepStatus::Ok, None);
            Ok(value)
        }
        Err(e) => {
            let e = e.into();
            log.record_step(name, StepStatus::Failed, Some(&e.to_string()));
            Err(e)
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::logging::BufferedLog;
    use std::path::Path;

    struct Unused;

    impl BackendProbe for Unused {
        fn confirm(&self, url: &str) -> Result<()> {
            anyhow::bail!("unexpected probe of {url}")
        }
    }

    impl TemplateFetcher for Unused {
        fn fetch(&self, _source: &TemplateSource, _dest: &Path) -> Result<()> {
            anyhow::bail!("unexpected fetch")
        }
    }

    impl Toolchain for Unused {
        fn prepare(&self, _template_dir: &Path) -> Result<()> {
            anyhow::bail!("unexpected build")
        }

        fn compile_stylesheet(&self, _template_dir: &Path, _output: &Path) -> Result<()> {
            anyhow::bail!("unexpected build")
        }

        fn bundle_script(&self, _template_dir: &Path, _output: &Path) -> Result<()> {
            anyhow::bail!("unexpected build")
        }
    }

    const UNUSED: Pipeline<'static> = Pipeline {
        probe: &Unused,
        fetcher: &Unused,
        toolchain: &Unused,
    };

    #[test]
    fn missing_config_fails_before_output() {
        let dir = tempfile::tempdir().unwrap();
        let opts = BuildOpts::new(dir.path().join("config.yml"), dir.path().join("out"));
        let log = BufferedLog::new();

        let err = build(&opts, UNUSED, &log).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ConfigNotFound);
        assert!(!opts.output.exists());
        let steps = log.steps();
        let last = steps.last().unwrap();
        assert_eq!(last.name, "configuration");
        assert_eq!(last.status, StepStatus::Failed);
    }

    #[test]
    fn collision_is_checked_first() {
        let dir = tempfile::tempdir().unwrap();
        let opts = BuildOpts::new(dir.path().join("absent.yml"), dir.path().to_path_buf());

        let err = build(&opts, UNUSED, &BufferedLog::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutputCollision);
    }

    #[test]
    fn foreign_staging_directory_is_a_collision() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out");
        let staging = site::staging_path(&output);
        std::fs::create_dir_all(&staging).unwrap();
        std::fs::write(staging.join("notes.txt"), "mine").unwrap();
        let opts = BuildOpts::new(dir.path().join("absent.yml"), output);

        let err = build(&opts, UNUSED, &BufferedLog::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutputCollision);
        assert!(staging.join("notes.txt").is_file());
    }

    #[test]
    fn disabled_features_are_recorded_as_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("config.yml");
        std::fs::write(
            &input,
            "name: A\ndescription: B\nbackground: bg.png\nmusic: song.mp3\n",
        )
        .unwrap();
        std::fs::create_dir_all(dir.path().join("resources")).unwrap();
        std::fs::write(dir.path().join("resources/bg.png"), "png").unwrap();
        let opts = BuildOpts::new(input, dir.path().join("out"));
        let log = BufferedLog::new();

        let err = build(&opts, UNUSED, &log).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TemplateFetchFailed);

        let skipped: Vec<(String, Option<String>)> = log
            .steps()
            .into_iter()
            .filter(|s| s.status == StepStatus::Skipped)
            .map(|s| (s.name, s.message))
            .collect();
        assert_eq!(
            skipped,
            [
                ("music".to_string(), Some("file missing".to_string())),
                ("avatar".to_string(), Some("not configured".to_string())),
                ("discord widget".to_string(), Some("not configured".to_string())),
                ("map widget".to_string(), Some("not configured".to_string())),
            ]
        );
    }

    #[test]
    fn missing_background_fails_before_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("config.yml");
        std::fs::write(&input, "name: A\ndescription: B\nbackground: bg.png\n").unwrap();
        let opts = BuildOpts::new(input, dir.path().join("out"));

        let err = build(&opts, UNUSED, &BufferedLog::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ResourceMissing);
        assert!(!opts.output.exists());
        assert!(!site::staging_path(&opts.output).exists());
    }
}
