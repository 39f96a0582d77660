use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use settings::{Config, SourceFiles, StoreConfig};

/// Prefix of the environment variables that override file settings,
/// e.g. `BILLING_STORE__HOST` or `BILLING_SOURCES__DATA_DIR`.
pub const ENV_PREFIX: &str = "BILLING";

/// The configuration-related command-line flags, shared with the binary's CLI.
#[cfg(feature = "clap")]
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ConfigArgs {
    /// Path to a TOML configuration file. Defaults to `config.toml` if present.
    #[arg(long)]
    pub config: Option<std::path::PathBuf>,

    /// Directory containing the source CSV files. Overrides `sources.data_dir`.
    #[arg(long)]
    pub data_dir: Option<std::path::PathBuf>,
}

/// Loads the application configuration.
///
/// Layers, lowest priority first: built-in defaults, the TOML file (`config.toml` in the
/// working directory unless `path` is given), `BILLING_*` environment variables, and finally
/// `data_dir` when it is supplied on the command line.
pub fn load_config(path: Option<&Path>, data_dir: Option<&Path>) -> Result<Config, ConfigError> {
    let env = config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true);
    build(path, data_dir, env)
}

fn build(
    path: Option<&Path>,
    data_dir: Option<&Path>,
    env: config::Environment,
) -> Result<Config, ConfigError> {
    let file = match path {
        // An explicitly requested file must exist.
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name("config.toml").required(false),
    };

    let mut builder = config::Config::builder()
        .set_default("store.host", "localhost")?
        .set_default("store.port", 5432_i64)?
        .set_default("store.database", "billing")?
        .set_default("store.user", "postgres")?
        .set_default("store.password", "")?
        .set_default("sources.data_dir", ".")?
        .set_default("sources.clients", "clients.csv")?
        .set_default("sources.products", "products.csv")?
        .set_default("sources.invoices", "invoices.csv")?
        .set_default("sources.invoice_lines", "invoice_lines.csv")?
        .set_default("sources.delimiter", ",")?
        .add_source(file)
        .add_source(env);

    if let Some(dir) = data_dir {
        builder = builder.set_override("sources.data_dir", dir.to_string_lossy().to_string())?;
    }

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.build()?.try_deserialize::<Config>()?;
    config.validate()?;

    tracing::debug!(store = ?config.store, data_dir = %config.sources.data_dir.display(), "Configuration loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn env_from(pairs: &[(&str, &str)]) -> config::Environment {
        let map: config::Map<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .source(Some(map))
    }

    fn write_toml(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("Failed to create temporary file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temporary file");
        file
    }

    #[test]
    fn test_defaults() {
        let config = build(None, None, env_from(&[])).unwrap();
        assert_eq!(config.store.host, "localhost");
        assert_eq!(config.store.port, 5432);
        assert_eq!(config.store.database, "billing");
        assert_eq!(config.store.schema, None);
        assert_eq!(config.sources.clients_path(), PathBuf::from("./clients.csv"));
        assert_eq!(config.sources.invoice_lines_path(), PathBuf::from("./invoice_lines.csv"));
        assert_eq!(config.sources.delimiter_byte(), b',');
    }

    #[test]
    fn test_file_then_env_then_cli() {
        let file = write_toml(
            r#"
            [store]
            host = "db.internal"
            port = 5433
            schema = "billing_2024"

            [sources]
            data_dir = "/srv/data"
            products = "productos.csv"
            delimiter = ";"
            "#,
        );

        let from_file = build(Some(file.path()), None, env_from(&[])).unwrap();
        assert_eq!(from_file.store.host, "db.internal");
        assert_eq!(from_file.store.port, 5433);
        assert_eq!(from_file.store.schema.as_deref(), Some("billing_2024"));
        assert_eq!(from_file.sources.products_path(), PathBuf::from("/srv/data/productos.csv"));
        assert_eq!(from_file.sources.delimiter_byte(), b';');

        let env = env_from(&[("BILLING_STORE__HOST", "override"), ("BILLING_STORE__PORT", "6543")]);
        let layered = build(Some(file.path()), Some(Path::new("/tmp/in")), env).unwrap();
        assert_eq!(layered.store.host, "override");
        assert_eq!(layered.store.port, 6543);
        assert_eq!(layered.sources.invoices_path(), PathBuf::from("/tmp/in/invoices.csv"));
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        let result = build(Some(Path::new("/nonexistent/billing.toml")), None, env_from(&[]));
        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }

    #[test]
    fn test_validation_errors() {
        let bad_schema = env_from(&[("BILLING_STORE__SCHEMA", "x; drop")]);
        assert!(matches!(build(None, None, bad_schema), Err(ConfigError::ValidationError(_))));

        let bad_delimiter = env_from(&[("BILLING_SOURCES__DELIMITER", "||")]);
        assert!(matches!(build(None, None, bad_delimiter), Err(ConfigError::ValidationError(_))));

        let empty_host = env_from(&[("BILLING_STORE__HOST", " ")]);
        assert!(matches!(build(None, None, empty_host), Err(ConfigError::ValidationError(_))));
    }
}
