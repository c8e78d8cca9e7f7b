use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use sqlx::PgPool;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::typst::{DocumentCompiler, TemplateStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub s3: S3Client,
    pub llm: LlmClient,
    pub config: Config,
    /// Validated at boot; every template is known to extract.
    pub templates: TemplateStore,
    /// Pluggable PDF backend. Default: TypstCli.
    pub compiler: Arc<dyn DocumentCompiler>,
}
