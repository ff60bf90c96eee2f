use anyhow::{Context, Result, bail};
use clap::Parser;
use std::{env, fmt};

const ENV_PREFIX: &str = "THUMBNAIL_SERVICE_";

/// Centralized application configuration.
/// Combines environment variables and CLI arguments.
#[derive(Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Host name written into public asset URLs.
    pub public_host: String,
    pub assets_root: String,
    pub database_url: String,
    pub jwt_secret: String,
}

/// Command-line + environment configuration.
#[derive(Parser, Debug, Default)]
#[command(author, version, about = "Video thumbnail upload service")]
pub struct Args {
    /// Host to bind to (overrides THUMBNAIL_SERVICE_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (overrides THUMBNAIL_SERVICE_PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// Host used in public thumbnail URLs (overrides THUMBNAIL_SERVICE_PUBLIC_HOST)
    #[arg(long)]
    pub public_host: Option<String>,

    /// Directory where thumbnails are stored (overrides THUMBNAIL_SERVICE_ASSETS_ROOT)
    #[arg(long)]
    pub assets_root: Option<String>,

    /// Database URL (overrides THUMBNAIL_SERVICE_DATABASE_URL)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Secret used to sign and verify access tokens (overrides THUMBNAIL_SERVICE_JWT_SECRET)
    #[arg(long)]
    pub jwt_secret: Option<String>,

    /// Run migrations and exit
    #[arg(long)]
    pub migrate: bool,
}

impl AppConfig {
    /// Parse environment variables + CLI args into AppConfig and migrate flag.
    pub fn from_env_and_args() -> Result<(Self, bool)> {
        let args = Args::parse();
        let migrate = args.migrate;
        let cfg = Self::merge(args, |name| env::var(name))?;
        Ok((cfg, migrate))
    }

    /// Merge CLI args over values read through `lookup`, then defaults.
    pub fn merge<F>(args: Args, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Result<String, env::VarError>,
    {
        let var = |key: &str| -> Result<Option<String>> {
            let name = format!("{ENV_PREFIX}{key}");
            match lookup(&name) {
                Ok(value) => Ok(Some(value)),
                Err(env::VarError::NotPresent) => Ok(None),
                Err(err) => Err(err).with_context(|| format!("reading {name}")),
            }
        };

        // --- Environment fallback ---
        let env_port = match var("PORT")? {
            Some(value) => value
                .parse::<u16>()
                .with_context(|| format!("parsing {ENV_PREFIX}PORT value `{}`", value))?,
            None => 8091,
        };

        // --- Merge ---
        let jwt_secret = match args.jwt_secret.or(var("JWT_SECRET")?) {
            Some(secret) if !secret.is_empty() => secret,
            _ => bail!("{ENV_PREFIX}JWT_SECRET must be set"),
        };
        let cfg = Self {
            host: args
                .host
                .or(var("HOST")?)
                .unwrap_or_else(|| "0.0.0.0".into()),
            port: args.port.unwrap_or(env_port),
            public_host: args
                .public_host
                .or(var("PUBLIC_HOST")?)
                .unwrap_or_else(|| "localhost".into()),
            assets_root: args
                .assets_root
                .or(var("ASSETS_ROOT")?)
                .unwrap_or_else(|| "./assets".into()),
            database_url: args
                .database_url
                .or(var("DATABASE_URL")?)
                .unwrap_or_else(|| "sqlite://./data/videos.db".into()),
            jwt_secret,
        };

        Ok(cfg)
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Prefix of every public asset URL, e.g. `http://localhost:8091`.
    pub fn public_base_url(&self) -> String {
        format!("http://{}:{}", self.public_host, self.port)
    }
}

// Hand-written so the signing secret never reaches the logs.
impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("public_host", &self.public_host)
            .field("assets_root", &self.assets_root)
            .field("database_url", &self.database_url)
            .field("jwt_secret", &"<redacted>")
            .finish()
    }
}
