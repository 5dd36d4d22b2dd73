//! Command-line interface.
//!
//! - `export-csv` - Streams product rows through the filtered CSV export
//! - `render-pdf` - Renders one product sheet to a PDF file

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use thiserror::Error;
use tracing::info;

use crate::adapters::{
    CommandPdfBuilder, CsvFileWriter, LocalMediaLoader, LocalThumbnailCache,
    MiniJinjaTemplateRenderer, PostgresAttributeRepository, PostgresAttributeVisibilityReader,
    PostgresFamilyRepository, RepositoryHeaderGenerator, ResizeImageFilter, StaticActorContext,
};
use crate::application::{
    AttributeVisibilityFilter, CsvProductWriter, ExportError, ExportRowAssembler,
    ProductPdfRenderer, RenderError, ThumbnailWarmer,
};
use crate::config::{AppConfig, ConfigError};
use crate::domain::catalog::{Actor, Product};
use crate::domain::export::{ExportRow, JobParameters};
use crate::domain::pdf::RenderContext;
use crate::domain::visibility::{IgnoredAttributes, IgnoredAttributesError};
use crate::ports::TemplateError;
use crate::telemetry;

/// Errors reported by the binary.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to connect to the PIM database: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    IgnoredAttributes(#[from] IgnoredAttributesError),

    #[error("Failed to read '{path}': {reason}")]
    Input { path: String, reason: String },

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Template(#[from] TemplateError),
}

impl CliError {
    fn input(path: &Path, reason: impl ToString) -> Self {
        Self::Input {
            path: path.display().to_string(),
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "pim-publishing",
    about = "Visibility-filtered product CSV exports and product PDF sheets",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Export product rows to CSV, hiding internal attributes.
    ExportCsv(ExportCsvArgs),

    /// Render a product sheet to PDF.
    RenderPdf(RenderPdfArgs),
}

#[derive(Debug, Args)]
struct ExportCsvArgs {
    /// Job parameters (YAML)
    #[arg(long)]
    params: PathBuf,

    /// Standard-format product rows, one JSON object per line
    #[arg(long)]
    items: PathBuf,

    /// Output file, overriding `filePath` from the job parameters
    #[arg(long)]
    out: Option<PathBuf>,

    /// Rows per processed batch
    #[arg(long, default_value_t = 100)]
    batch_size: usize,
}

#[derive(Debug, Args)]
struct RenderPdfArgs {
    /// Product (JSON)
    #[arg(long)]
    product: PathBuf,

    #[arg(long)]
    locale: String,

    #[arg(long)]
    scope: String,

    /// Output PDF file
    #[arg(long)]
    out: PathBuf,

    /// Username of the requesting user
    #[arg(long)]
    user: Option<String>,

    /// Roles of the requesting user
    #[arg(long = "role")]
    roles: Vec<String>,
}

impl Cli {
    pub async fn execute(self) -> Result<(), CliError> {
        let config = AppConfig::load()?;
        config.validate().map_err(ConfigError::from)?;
        telemetry::init_tracing(&config.logging);

        let pool = connect(&config).await?;
        let ignored = match &config.export.ignored_attributes_file {
            Some(path) => IgnoredAttributes::from_yaml_file(path)?,
            None => IgnoredAttributes::builtin(),
        };
        let visibility = AttributeVisibilityFilter::new(
            Arc::new(PostgresAttributeVisibilityReader::new(pool.clone())),
            ignored,
        );

        match self.command {
            Commands::ExportCsv(args) => export_csv(args, &config, pool, visibility).await,
            Commands::RenderPdf(args) => render_pdf(args, &config, pool, visibility).await,
        }
    }
}

async fn connect(config: &AppConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await
}

async fn export_csv(
    args: ExportCsvArgs,
    config: &AppConfig,
    pool: PgPool,
    visibility: AttributeVisibilityFilter,
) -> Result<(), CliError> {
    let raw = tokio::fs::read_to_string(&args.params)
        .await
        .map_err(|e| CliError::input(&args.params, e))?;
    let mut params: JobParameters =
        serde_yaml::from_str(&raw).map_err(|e| CliError::input(&args.params, e))?;

    if let Some(out) = &args.out {
        params.set("filePath", Value::String(out.display().to_string()));
    }
    if !params.has("delimiter") {
        params.set("delimiter", Value::String(config.export.delimiter.clone()));
    }
    if !params.has("enclosure") {
        params.set("enclosure", Value::String(config.export.enclosure.clone()));
    }

    let rows = read_rows(&args.items).await?;

    let header_generator = RepositoryHeaderGenerator::new(
        Arc::new(PostgresAttributeRepository::new(pool.clone())),
        Arc::new(PostgresFamilyRepository::new(pool)),
    );
    let assembler = ExportRowAssembler::new(visibility, Arc::new(header_generator));
    let mut writer = CsvProductWriter::new(assembler, Arc::new(CsvFileWriter::new()), params);

    writer.initialize();
    let mut rows = rows.into_iter().peekable();
    while rows.peek().is_some() {
        let batch: Vec<ExportRow> = rows.by_ref().take(args.batch_size.max(1)).collect();
        writer.write(batch).await?;
    }
    let summary = writer.flush().await?;

    info!(path = %summary.path.display(), rows = summary.rows, "Export finished");
    Ok(())
}

async fn read_rows(path: &Path) -> Result<Vec<ExportRow>, CliError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| CliError::input(path, e))?;

    raw.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(n, line)| {
            serde_json::from_str(line)
                .map_err(|e| CliError::input(path, format!("line {}: {}", n + 1, e)))
        })
        .collect()
}

async fn render_pdf(
    args: RenderPdfArgs,
    config: &AppConfig,
    pool: PgPool,
    visibility: AttributeVisibilityFilter,
) -> Result<(), CliError> {
    let raw = tokio::fs::read_to_string(&args.product)
        .await
        .map_err(|e| CliError::input(&args.product, e))?;
    let product: Product =
        serde_json::from_str(&raw).map_err(|e| CliError::input(&args.product, e))?;

    let templating = match &config.pdf.template_dir {
        Some(dir) => MiniJinjaTemplateRenderer::from_dir(dir),
        None => MiniJinjaTemplateRenderer::bundled()?,
    };
    let pdf_builder = CommandPdfBuilder::new()
        .with_command(config.pdf.command.clone())
        .with_timeout(config.pdf.timeout_secs);

    let thumbnails = &config.thumbnails;
    let warmer = ThumbnailWarmer::new(
        Arc::new(LocalMediaLoader::new(thumbnails.media_dir.clone())),
        Arc::new(ResizeImageFilter::new().with_filter(
            thumbnails.filter.clone(),
            thumbnails.width,
            thumbnails.height,
        )),
        Arc::new(LocalThumbnailCache::new(thumbnails.cache_dir.clone())),
    );

    let actor = args.user.map(|user| Actor::new(user, args.roles));
    let renderer = ProductPdfRenderer::new(
        Arc::new(templating),
        Arc::new(pdf_builder),
        warmer,
        Arc::new(
            PostgresAttributeRepository::new(pool)
                .with_label_locale(config.database.label_locale.clone()),
        ),
        visibility,
        Arc::new(StaticActorContext::new(actor)),
        config.pdf.template.clone(),
        config.pdf.custom_font.clone(),
    )
    .with_thumbnail_filter(thumbnails.filter.clone());

    let pdf = renderer
        .render(&product, RenderContext::new(args.locale, args.scope))
        .await?;
    tokio::fs::write(&args.out, &pdf)
        .await
        .map_err(|e| CliError::input(&args.out, e))?;

    info!(path = %args.out.display(), bytes = pdf.len(), "Product sheet written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tempfile::TempDir;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_render_pdf_with_roles() {
        let cli = Cli::try_parse_from([
            "pim-publishing",
            "render-pdf",
            "--product",
            "p.json",
            "--locale",
            "en_US",
            "--scope",
            "ecommerce",
            "--out",
            "p.pdf",
            "--user",
            "admin",
            "--role",
            "ROLE_ADMINISTRATOR",
        ])
        .unwrap();

        match cli.command {
            Commands::RenderPdf(args) => {
                assert_eq!(args.roles, vec!["ROLE_ADMINISTRATOR"]);
                assert_eq!(args.user.as_deref(), Some("admin"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[tokio::test]
    async fn reads_json_lines_skipping_blank_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("items.jsonl");
        std::fs::write(
            &path,
            "{\"identifier\":\"a\",\"values\":{}}\n\n{\"identifier\":\"b\",\"values\":{}}\n",
        )
        .unwrap();

        let rows = read_rows(&path).await.unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].identifier.as_deref(), Some("b"));
    }

    #[tokio::test]
    async fn reports_the_bad_line() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("items.jsonl");
        std::fs::write(&path, "{\"identifier\":\"a\",\"values\":{}}\nnot json\n").unwrap();

        let err = read_rows(&path).await.unwrap_err();

        assert!(err.to_string().contains("line 2"));
    }
}
