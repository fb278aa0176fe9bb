//! Web 服务器模块
//!
//! Provider webhooks (TwiML / NCCO), outbound call trigger and the JSON
//! helper endpoints

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{FormRejection, JsonRejection, QueryRejection},
        Form, Query, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};

use crate::config::{AppConfig, TWILIO_WEBHOOK_PATH, VONAGE_ANSWER_PATH, VONAGE_EVENT_PATH};
use crate::core::{Ncco, SalonResponder, Twiml, VoiceSettings};
use crate::domain::{PhoneNumber, ProviderKind};
use crate::errors::VoiceError;
use crate::infrastructure::telephony::CallDispatcher;

/// Query used by the self-test endpoint
pub const TEST_QUERY: &str = "What services do you offer?";

const PROVIDER_HINT: &str = "Failed to initiate call. Configure Vonage (VONAGE_APPLICATION_ID/PRIVATE_KEY_PATH/PHONE_NUMBER) or Twilio (TWILIO_ACCOUNT_SID/AUTH_TOKEN/PHONE_NUMBER/WEBHOOK_URL).";

const NO_SPEECH_PROMPT: &str = "Sorry, I didn't catch that. How can I help you?";

// ==================== 错误响应 ====================

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

fn xml(body: String) -> Response {
    ([(header::CONTENT_TYPE, "application/xml")], body).into_response()
}

// ==================== 状态 ====================

#[derive(Clone)]
pub struct AppState {
    pub responder: SalonResponder,
    pub dispatcher: CallDispatcher,
    /// Settings for TwiML documents (callback: `/voice/webhook`)
    pub twilio_voice: VoiceSettings,
    /// Settings for NCCO documents (callback: `/vonage/event`)
    pub vonage_voice: VoiceSettings,
    pub default_country_code: String,
}

impl AppState {
    pub fn from_config(config: &AppConfig, dispatcher: CallDispatcher) -> anyhow::Result<Self> {
        Ok(Self {
            responder: SalonResponder::new(),
            dispatcher,
            twilio_voice: config.voice_settings(TWILIO_WEBHOOK_PATH)?,
            vonage_voice: config.voice_settings(VONAGE_EVENT_PATH)?,
            default_country_code: config.default_country_code.clone(),
        })
    }
}

// ==================== 请求类型 ====================

/// Twilio voice webhook form
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VoiceWebhookForm {
    pub call_sid: Option<String>,
    pub speech_result: Option<String>,
    pub confidence: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VoiceProcessQuery {
    #[serde(rename = "SpeechResult")]
    pub speech_result: Option<String>,
}

/// Vonage speech input event
#[derive(Debug, Deserialize)]
pub struct VonageInputEvent {
    pub uuid: Option<String>,
    pub speech: Option<VonageSpeech>,
}

#[derive(Debug, Deserialize)]
pub struct VonageSpeech {
    #[serde(default)]
    pub results: Vec<VonageSpeechResult>,
    pub timeout_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VonageSpeechResult {
    pub text: String,
    pub confidence: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct TriggerCallRequest {
    pub phone: Option<String>,
}

// ==================== API 响应类型 ====================

#[derive(Debug, Serialize)]
pub struct TriggerCallResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<ProviderKind>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_id: Option<String>,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

// ==================== 处理器 ====================

/// Twilio voice webhook
///
/// Always answers with TwiML; failures become a spoken apology.
async fn voice_webhook(
    State(state): State<Arc<AppState>>,
    form: Result<Form<VoiceWebhookForm>, FormRejection>,
) -> Response {
    let form = match form {
        Ok(Form(form)) => form,
        Err(e) => {
            error!("Error processing voice webhook: {}", e);
            return xml(Twiml::say(state.responder.apology(), &state.twilio_voice));
        }
    };

    info!(
        call_sid = form.call_sid.as_deref().unwrap_or("-"),
        from = form.from.as_deref().unwrap_or("-"),
        to = form.to.as_deref().unwrap_or("-"),
        confidence = form.confidence.as_deref().unwrap_or("-"),
        speech = form.speech_result.as_deref().unwrap_or(""),
        "voice webhook received"
    );

    let body = match non_blank(form.speech_result.as_deref()) {
        None => Twiml::say(&state.responder.greeting(), &state.twilio_voice),
        Some(speech) => {
            let reply = state.responder.process_voice_call(speech);
            Twiml::render(&reply, &state.twilio_voice)
        }
    };
    xml(body)
}

/// Stateless processing endpoint (speech passed as query parameter)
async fn voice_process(
    State(state): State<Arc<AppState>>,
    query: Result<Query<VoiceProcessQuery>, QueryRejection>,
) -> Response {
    let query = match query {
        Ok(Query(query)) => query,
        Err(e) => {
            error!("Error processing voice: {}", e);
            return xml(Twiml::say(
                "I'm sorry, I'm having trouble. Please try again.",
                &state.twilio_voice,
            ));
        }
    };

    let body = match non_blank(query.speech_result.as_deref()) {
        None => Twiml::say(&state.responder.short_greeting(), &state.twilio_voice),
        Some(speech) => Twiml::render(
            &state.responder.process_voice_call(speech),
            &state.twilio_voice,
        ),
    };
    xml(body)
}

/// Vonage answer URL: first NCCO of a call
async fn vonage_answer(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(Ncco::say(&state.responder.greeting(), &state.vonage_voice))
}

/// Vonage speech input event
async fn vonage_event(
    State(state): State<Arc<AppState>>,
    event: Result<Json<VonageInputEvent>, JsonRejection>,
) -> impl IntoResponse {
    let event = match event {
        Ok(Json(event)) => event,
        Err(e) => {
            error!("Error processing vonage event: {}", e);
            return Json(Ncco::say(state.responder.apology(), &state.vonage_voice));
        }
    };

    let speech = event.speech.as_ref();
    let text = speech
        .and_then(|s| s.results.first())
        .map(|r| r.text.as_str());

    info!(
        uuid = event.uuid.as_deref().unwrap_or("-"),
        speech = text.unwrap_or(""),
        timeout_reason = speech.and_then(|s| s.timeout_reason.as_deref()).unwrap_or("-"),
        "vonage input received"
    );

    match non_blank(text) {
        None => Json(Ncco::say(NO_SPEECH_PROMPT, &state.vonage_voice)),
        Some(text) => Json(Ncco::render(
            &state.responder.process_voice_call(text),
            &state.vonage_voice,
        )),
    }
}

/// Trigger an outbound call
async fn trigger_call(
    State(state): State<Arc<AppState>>,
    request: Result<Json<TriggerCallRequest>, JsonRejection>,
) -> Response {
    let request = match request {
        Ok(Json(request)) => request,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, e.body_text()),
    };

    let Some(raw) = non_blank(request.phone.as_deref()) else {
        return error_response(StatusCode::BAD_REQUEST, "Phone number is required");
    };

    let phone = match PhoneNumber::normalize(raw, &state.default_country_code) {
        Ok(phone) => phone,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, e.to_string()),
    };

    match state.dispatcher.trigger(&phone).await {
        Ok(receipt) => Json(TriggerCallResponse {
            success: true,
            provider: Some(receipt.provider),
            message: format!("AI call initiated to {}", phone),
            call_id: receipt.call_id,
        })
        .into_response(),
        Err(e @ (VoiceError::NoProviderConfigured | VoiceError::AllProvidersFailed(_))) => {
            warn!("Call to {} not placed: {}", phone, e);
            Json(TriggerCallResponse {
                success: false,
                provider: None,
                message: PROVIDER_HINT.to_string(),
                call_id: None,
            })
            .into_response()
        }
        Err(e) => {
            error!("Error triggering call: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

/// Bookings are not persisted; the list is always empty
async fn list_bookings() -> impl IntoResponse {
    Json(serde_json::json!({
        "bookings": [],
        "message": "Bookings are confirmed by phone and not stored by this service",
    }))
}

async fn create_booking(
    State(state): State<Arc<AppState>>,
    booking: Result<Json<serde_json::Value>, JsonRejection>,
) -> Response {
    let booking = match booking {
        Ok(Json(booking)) => booking,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, e.body_text()),
    };

    let message = state
        .responder
        .process_user_input(&format!("Book appointment: {}", booking));
    Json(serde_json::json!({
        "success": true,
        "message": message,
    }))
    .into_response()
}

/// 健康检查
async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
        "twilio_available": state.dispatcher.has_provider(ProviderKind::Twilio),
        "vonage_available": state.dispatcher.has_provider(ProviderKind::Vonage),
        "ai_system": "operational",
    }))
}

/// Run the responder on a canned query
async fn test_ai(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "query": TEST_QUERY,
        "response": state.responder.process_user_input(TEST_QUERY),
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

// ==================== 路由 ====================

pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/health", get(health_check))
        .route("/test-ai", get(test_ai))
        .route("/trigger-call", post(trigger_call))
        .route(TWILIO_WEBHOOK_PATH, post(voice_webhook))
        .route("/voice/process", get(voice_process))
        .route(VONAGE_ANSWER_PATH, get(vonage_answer))
        .route(VONAGE_EVENT_PATH, post(vonage_event))
        .route("/bookings", get(list_bookings).post(create_booking))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

// ==================== 服务器启动 ====================

pub async fn start_web_server(bind_addr: &str, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!("Web server started on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for ctrl+c: {}", e);
        std::future::pending::<()>().await;
    }
    info!("🛑 Received shutdown signal");
}
