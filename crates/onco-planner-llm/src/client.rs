//! HTTP client for the hosted generative-language service.
//!
//! One client, one contract, one error taxonomy. The UI only needs to
//! tell apart "service misconfigured" (missing key, wrong endpoint or
//! model id), "service refused" (permission denied) and "service
//! returned nothing usable" (empty or malformed payload); every variant
//! renders a human-readable message and none of them may take the
//! caller down.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use onco_planner_core::models::{ClinicalMarkers, DetailedRegimenPlan, Patient, TreatmentOption};

use crate::extraction::{extract_payload, ExtractionError};
use crate::prompts;

/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
/// Environment variable overriding the service base URL.
pub const BASE_URL_VAR: &str = "GEMINI_BASE_URL";
/// Environment variable overriding the model identifier.
pub const MODEL_VAR: &str = "GEMINI_MODEL";

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
// The plain alias is the most widely available; versioned names 404 on
// some accounts.
const DEFAULT_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Advisor errors.
#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("API key 未配置，请设置环境变量 {0}")]
    MissingApiKey(&'static str),

    #[error("无法连接生成服务: {0}")]
    Connection(String),

    #[error("请求超时 ({0}s)，请稍后再试")]
    Timeout(u64),

    #[error("HTTP client error: {0}")]
    Http(String),

    #[error("权限拒绝 (403): {0}")]
    PermissionDenied(String),

    #[error("网络配置错误 (404): {0}")]
    EndpointNotFound(String),

    #[error("模型错误 (404): 找不到模型 '{model}'。{message}")]
    ModelNotFound { model: String, message: String },

    #[error("API 请求失败 ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("AI 返回数据为空")]
    EmptyResponse,

    #[error("malformed response: {0}")]
    Malformed(#[from] ExtractionError),
}

pub type AdvisorResult<T> = Result<T, AdvisorError>;

/// Source of AI-suggested treatment pathways and regimens.
pub trait TreatmentAdvisor {
    /// Generate 2-3 high-level pathway options from the clinical picture.
    fn pathway_options(
        &self,
        patient: &Patient,
        markers: &ClinicalMarkers,
    ) -> AdvisorResult<Vec<TreatmentOption>>;

    /// Generate per-category regimen options under a chosen pathway.
    fn detailed_regimens(
        &self,
        patient: &Patient,
        chosen: &TreatmentOption,
    ) -> AdvisorResult<DetailedRegimenPlan>;
}

/// Connection settings for [`GeminiAdvisor`].
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

impl GeminiConfig {
    /// Config with defaults for everything but the key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: api_key.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Read the config from the environment.
    ///
    /// Keys pasted with stray whitespace are trimmed; an absent or empty
    /// key is a configuration error, reported before any request goes out.
    pub fn from_env() -> AdvisorResult<Self> {
        let api_key = std::env::var(API_KEY_VAR)
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(AdvisorError::MissingApiKey(API_KEY_VAR))?;

        let mut config = Self::new(api_key);
        if let Ok(base_url) = std::env::var(BASE_URL_VAR) {
            config = config.with_base_url(base_url);
        }
        if let Ok(model) = std::env::var(MODEL_VAR) {
            config.model = model;
        }
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// Client for the generateContent endpoint.
pub struct GeminiAdvisor {
    config: GeminiConfig,
    client: reqwest::blocking::Client,
}

impl GeminiAdvisor {
    pub fn new(config: GeminiConfig) -> AdvisorResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AdvisorError::Http(e.to_string()))?;
        Ok(Self { config, client })
    }

    /// Client configured from the environment.
    pub fn from_env() -> AdvisorResult<Self> {
        Self::new(GeminiConfig::from_env()?)
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    /// Issue one generation request and return the model's text payload.
    fn generate(&self, prompt: &str, response_schema: Value) -> AdvisorResult<String> {
        let url = format!(
            "{}/v1/models/{}:generateContent?key={}",
            self.config.base_url, self.config.model, self.config.api_key
        );
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![TextPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.4,
                response_mime_type: "application/json",
                response_schema,
            },
        };

        let response = self.client.post(&url).json(&body).send().map_err(|e| {
            if e.is_connect() {
                AdvisorError::Connection(self.config.base_url.clone())
            } else if e.is_timeout() {
                AdvisorError::Timeout(self.config.timeout_secs)
            } else {
                AdvisorError::Http(e.to_string())
            }
        })?;

        let status = response.status();
        let raw = response
            .text()
            .map_err(|e| AdvisorError::Http(e.to_string()))?;

        if !status.is_success() {
            return Err(classify_failure(status.as_u16(), &raw, &self.config.model));
        }

        let envelope: GenerateResponse =
            serde_json::from_str(&raw).map_err(ExtractionError::from)?;
        envelope
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .filter(|text| !text.trim().is_empty())
            .ok_or(AdvisorError::EmptyResponse)
    }
}

impl TreatmentAdvisor for GeminiAdvisor {
    fn pathway_options(
        &self,
        patient: &Patient,
        markers: &ClinicalMarkers,
    ) -> AdvisorResult<Vec<TreatmentOption>> {
        info!(model = %self.config.model, patient = %patient.id, "requesting pathway options");
        let text = self.generate(
            &prompts::pathway_prompt(patient, markers),
            prompts::pathway_schema(),
        )?;
        let options: Vec<TreatmentOption> = extract_payload(&text)?;
        if options.is_empty() {
            warn!(patient = %patient.id, "pathway generation returned an empty array");
            return Err(AdvisorError::EmptyResponse);
        }
        Ok(options)
    }

    fn detailed_regimens(
        &self,
        patient: &Patient,
        chosen: &TreatmentOption,
    ) -> AdvisorResult<DetailedRegimenPlan> {
        info!(model = %self.config.model, patient = %patient.id, pathway = %chosen.id, "requesting detailed regimens");
        let text = self.generate(
            &prompts::regimen_prompt(patient, chosen),
            prompts::regimen_schema(),
        )?;
        let plan: DetailedRegimenPlan = extract_payload(&text)?;
        if plan.is_empty() {
            warn!(patient = %patient.id, "regimen generation returned no options in any category");
            return Err(AdvisorError::EmptyResponse);
        }
        Ok(plan)
    }
}

/// Map a non-success HTTP status to the advisor taxonomy.
///
/// A 404 carrying JSON means the service could not find the model; a 404
/// carrying HTML means the request never reached the service (a proxy or
/// base-URL misconfiguration).
fn classify_failure(status: u16, body: &str, model: &str) -> AdvisorError {
    let service_message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string));

    match status {
        403 => AdvisorError::PermissionDenied(
            service_message.unwrap_or_else(|| "Key 无效，请检查 API Key 配置".into()),
        ),
        404 => match service_message {
            Some(message) => AdvisorError::ModelNotFound {
                model: model.to_string(),
                message,
            },
            None => AdvisorError::EndpointNotFound(
                "生成服务地址不可达，请检查 base URL 配置".into(),
            ),
        },
        _ => AdvisorError::Api {
            status,
            message: service_message.unwrap_or_else(|| body.chars().take(200).collect()),
        },
    }
}

// Request/response envelope for the generateContent endpoint.

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<TextPart<'a>>,
}

#[derive(Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f64,
    #[serde(rename = "responseMimeType")]
    response_mime_type: &'static str,
    #[serde(rename = "responseSchema")]
    response_schema: Value,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

/// Canned advisor for tests and offline use.
#[derive(Debug, Default, Clone)]
pub struct MockAdvisor {
    pathways: Vec<TreatmentOption>,
    plan: DetailedRegimenPlan,
    failing: bool,
}

impl MockAdvisor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pathways(mut self, pathways: Vec<TreatmentOption>) -> Self {
        self.pathways = pathways;
        self
    }

    pub fn with_plan(mut self, plan: DetailedRegimenPlan) -> Self {
        self.plan = plan;
        self
    }

    /// An advisor whose every call fails with a service error.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }
}

impl TreatmentAdvisor for MockAdvisor {
    fn pathway_options(
        &self,
        _patient: &Patient,
        _markers: &ClinicalMarkers,
    ) -> AdvisorResult<Vec<TreatmentOption>> {
        if self.failing {
            return Err(AdvisorError::Api {
                status: 503,
                message: "mock failure".into(),
            });
        }
        Ok(self.pathways.clone())
    }

    fn detailed_regimens(
        &self,
        _patient: &Patient,
        _chosen: &TreatmentOption,
    ) -> AdvisorResult<DetailedRegimenPlan> {
        if self.failing {
            return Err(AdvisorError::Api {
                status: 503,
                message: "mock failure".into(),
            });
        }
        Ok(self.plan.clone())
    }
}
