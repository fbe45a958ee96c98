//! Resolve `--input` / `--endpoint` into a record snapshot.

use std::time::Duration;

use anyhow::{Context, bail};
use lens_config::LensConfig;
use lens_core::RecordSet;
use lens_fetch::{FileSource, HttpOptions, HttpSource, LiveDataset, Outcome, Query, StaticToken};

use super::parse::parse_params;
use crate::cli::root_commands::SourceArgs;

/// Fetch the collection named by `source` into a fresh snapshot.
pub async fn load_records(source: &SourceArgs, config: &LensConfig) -> anyhow::Result<RecordSet> {
    let live = LiveDataset::new();

    let outcome = if let Some(path) = &source.input {
        let query = Query::new(path.display().to_string());
        live.analyze(&FileSource::new(path), &query).await
    } else if let Some(endpoint) = &source.endpoint {
        let http = http_source(config)?;
        let mut query = Query::new(endpoint);
        for (key, value) in parse_params(&source.params)? {
            query = query.param(key, value);
        }
        live.analyze(&http, &query).await
    } else {
        bail!("no data source: pass --input PATH or --endpoint NAME");
    };

    let records = into_result(outcome)?;
    tracing::debug!(
        records = records.len(),
        snapshot = records.id(),
        "records loaded"
    );
    Ok(records)
}

fn http_source(config: &LensConfig) -> anyhow::Result<HttpSource> {
    let api = config
        .require_api()
        .context("--endpoint needs api.base_url (set LENS_API__BASE_URL)")?;

    let mut options = HttpOptions::new(api.base_url.clone());
    options.timeout = Duration::from_secs(api.timeout_secs);
    options.user_agent.clone_from(&api.user_agent);

    let source = HttpSource::new(&options)?;
    Ok(if api.has_token() {
        source.with_credentials(StaticToken(api.token.clone()))
    } else {
        source
    })
}

fn into_result(outcome: Outcome) -> anyhow::Result<RecordSet> {
    match outcome {
        Outcome::Applied(records) => Ok(records),
        Outcome::Failed(error) => Err(error).context("failed to load records"),
        Outcome::Stale(token) => bail!("request {} was superseded", token.get()),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use lens_config::LensConfig;
    use lens_core::FieldSource;

    use super::*;

    fn json_file(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(body.as_bytes()).expect("write fixture");
        file
    }

    fn from_file(path: &std::path::Path) -> SourceArgs {
        SourceArgs {
            input: Some(path.to_path_buf()),
            ..SourceArgs::default()
        }
    }

    #[tokio::test]
    async fn input_file_loads_array() {
        let file = json_file(r#"[{"brand": "A"}, {"brand": "B"}]"#);
        let records = load_records(&from_file(file.path()), &LensConfig::default())
            .await
            .expect("records should load");
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].text("brand").as_deref(), Some("B"));
    }

    #[tokio::test]
    async fn input_file_loads_data_envelope() {
        let file = json_file(r#"{"data": [{"brand": "A"}]}"#);
        let records = load_records(&from_file(file.path()), &LensConfig::default())
            .await
            .expect("records should load");
        assert_eq!(records.len(), 1);
    }

    #[tokio::test]
    async fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let args = from_file(&dir.path().join("absent.json"));
        let err = load_records(&args, &LensConfig::default())
            .await
            .expect_err("missing file should fail");
        assert!(format!("{err:#}").contains("failed to load records"));
    }

    #[tokio::test]
    async fn endpoint_requires_api_config() {
        let args = SourceArgs {
            endpoint: Some("brands".into()),
            ..SourceArgs::default()
        };
        let err = load_records(&args, &LensConfig::default())
            .await
            .expect_err("unconfigured api should fail");
        assert!(format!("{err:#}").contains("api.base_url"));
    }

    #[tokio::test]
    async fn no_source_is_an_error() {
        let err = load_records(&SourceArgs::default(), &LensConfig::default())
            .await
            .expect_err("no source should fail");
        assert!(err.to_string().contains("--input"));
    }
}
