// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed project (configuration, resources
// and a local template) plus offline stand-ins for the template fetcher and
// the front-end toolchain, so each test runs the whole pipeline without
// network access or Node.js.
#![allow(dead_code)]

use std::io::{BufRead as _, BufReader, Write as _};
use std::net::TcpListener;
use std::path::{Path, PathBuf};

use biolink_cli::cli::BuildOpts;
use biolink_cli::site::{TemplateFetcher, TemplateSource, Toolchain, fs};

/// Template page exercising every page-level token.
pub const INDEX_HTML: &str = "<body class=\"{BODYCLASS}\">\n\
<div class=\"card\">{INFORMATION}</div>\n\
<nav>{SOCIALS}</nav>\n\
{WIDGETS}\n\
<audio src=\"{MUSIC}\" loop></audio>\n\
</body>\n";

/// Secondary page repeating each coordinate.
pub const MAP_HTML: &str = "<div id=\"map\" data-lat=\"{LAT}\" data-lng=\"{LNG}\"></div>\n\
<script>L.map('map').setView([{LAT}, {LNG}], 13); L.marker([{LAT}, {LNG}]);</script>\n";

/// Stylesheet source.
pub const STYLE_CSS: &str = "body { background-image: url(\"{BACKGROUND}\"); }\n\
.bg { filter: blur({BACKGROUNDBLUR}); }\n\
.card { backdrop-filter: blur({BLUR}); opacity: {OPACITY}; text-align: {TEXTLAYOUT}; }\n";

/// Client script source.
pub const SCRIPT_JS: &str = "const API = \"{API}\";\nconst DISCORD_ID = \"{DISCORDID}\";\n";

/// Smallest valid configuration.
pub const MINIMAL_CONFIG: &str = "name: A\ndescription: B\nbackground: bg.png\n";

/// An isolated project backed by a [`tempfile::TempDir`].
pub struct SiteFixture {
    /// Temporary project root.
    pub root: tempfile::TempDir,
}

impl SiteFixture {
    /// Project with a template, a `resources/bg.png`, and no configuration.
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        let template = root.path().join("template");
        std::fs::create_dir_all(&template).expect("create template dir");
        for (name, text) in [
            ("index.html", INDEX_HTML),
            ("map.html", MAP_HTML),
            ("style.css", STYLE_CSS),
            ("script.js", SCRIPT_JS),
        ] {
            std::fs::write(template.join(name), text).expect("write template document");
        }
        let fixture = Self { root };
        fixture.with_resource("bg.png")
    }

    /// Write `config.yml`.
    #[must_use]
    pub fn with_config(self, yaml: &str) -> Self {
        std::fs::write(self.config_path(), yaml).expect("write config.yml");
        self
    }

    /// Create a file under `resources/`.
    #[must_use]
    pub fn with_resource(self, name: &str) -> Self {
        let path = self.resources_dir().join(name);
        std::fs::create_dir_all(self.resources_dir()).expect("create resources dir");
        std::fs::write(path, name.as_bytes()).expect("write resource");
        self
    }

    pub fn path(&self) -> &Path {
        self.root.path()
    }

    pub fn config_path(&self) -> PathBuf {
        self.path().join("config.yml")
    }

    pub fn resources_dir(&self) -> PathBuf {
        self.path().join("resources")
    }

    pub fn template_dir(&self) -> PathBuf {
        self.path().join("template")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.path().join("output")
    }

    /// Build options pointing at this project.
    pub fn opts(&self) -> BuildOpts {
        BuildOpts::new(self.config_path(), self.output_dir())
    }

    /// Read a file from the output directory.
    pub fn read_output(&self, name: &str) -> String {
        std::fs::read_to_string(self.output_dir().join(name)).expect("read output file")
    }

    /// Fetcher that copies this fixture's template.
    pub fn fetcher(&self) -> LocalFetcher {
        LocalFetcher(self.template_dir())
    }
}

/// [`TemplateFetcher`] ignoring the requested source and copying a fixed
/// directory instead.
pub struct LocalFetcher(pub PathBuf);

impl TemplateFetcher for LocalFetcher {
    fn fetch(&self, _source: &TemplateSource, dest: &Path) -> anyhow::Result<()> {
        fs::copy_dir_recursive(&self.0, dest, true)?;
        Ok(())
    }
}

/// [`Toolchain`] that copies the substituted sources unchanged.
pub struct PassthroughToolchain;

impl Toolchain for PassthroughToolchain {
    fn prepare(&self, _template_dir: &Path) -> anyhow::Result<()> {
        Ok(())
    }

    fn compile_stylesheet(&self, template_dir: &Path, output: &Path) -> anyhow::Result<()> {
        std::fs::copy(template_dir.join("style.css"), output)?;
        Ok(())
    }

    fn bundle_script(&self, template_dir: &Path, output: &Path) -> anyhow::Result<()> {
        std::fs::copy(template_dir.join("script.js"), output)?;
        Ok(())
    }
}

/// Answer a single HTTP request on a local port with `200 OK` and `body`.
///
/// Returns the base URL of the listener.
pub fn serve_once(body: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind local listener");
    let addr = listener.local_addr().expect("listener address");
    let response = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    std::thread::spawn(move || {
        let Ok((mut stream, _)) = listener.accept() else {
            return;
        };
        let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
        let mut line = String::new();
        loop {
            line.clear();
            match reader.read_line(&mut line) {
                Ok(0) | Err(_) => break,
                Ok(_) if line == "\r\n" => break,
                Ok(_) => {}
            }
        }
        let _ = stream.write_all(response.as_bytes());
    });
    format!("http://{addr}")
}
