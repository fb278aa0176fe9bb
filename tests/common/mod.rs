//! 测试通用工具
//!
//! Shared state builders and a scripted call provider

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};

use async_trait::async_trait;
use clap::{CommandFactory, FromArgMatches};
use glamour_voice::{
    AppConfig, AppState, CallDispatcher, CallProvider, CallReceipt, PhoneNumber, ProviderKind,
    VoiceError,
};

static INIT: Once = Once::new();

/// 初始化测试环境
pub fn setup() {
    INIT.call_once(|| {
        glamour_voice::logger::try_init();
    });
}

pub const PUBLIC_URL: &str = "https://salon.example";

/// Config from flags only, so a developer's exported variables don't leak in
pub fn test_config() -> AppConfig {
    let matches = AppConfig::command()
        .mut_args(|arg| arg.env(None::<&'static str>))
        .get_matches_from(["test", "--webhook-url", PUBLIC_URL]);
    AppConfig::from_arg_matches(&matches).unwrap()
}

pub fn test_state(providers: Vec<Arc<dyn CallProvider>>) -> Arc<AppState> {
    setup();
    Arc::new(AppState::from_config(&test_config(), CallDispatcher::new(providers)).unwrap())
}

/// Provider that either accepts or refuses every call, counting attempts
pub struct ScriptedProvider {
    pub kind: ProviderKind,
    pub fail: bool,
    pub calls: AtomicUsize,
    pub last_number: std::sync::Mutex<Option<String>>,
}

impl ScriptedProvider {
    pub fn accepting(kind: ProviderKind) -> Arc<Self> {
        Self::build(kind, false)
    }

    pub fn failing(kind: ProviderKind) -> Arc<Self> {
        Self::build(kind, true)
    }

    fn build(kind: ProviderKind, fail: bool) -> Arc<Self> {
        Arc::new(Self {
            kind,
            fail,
            calls: AtomicUsize::new(0),
            last_number: std::sync::Mutex::new(None),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CallProvider for ScriptedProvider {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    async fn create_call(&self, to: &PhoneNumber) -> glamour_voice::Result<CallReceipt> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_number.lock().unwrap() = Some(to.to_string());
        if self.fail {
            return Err(VoiceError::ProviderError {
                provider: self.kind.to_string(),
                status: 500,
                body: "upstream unavailable".to_string(),
            });
        }
        Ok(CallReceipt {
            provider: self.kind,
            call_id: Some(format!("{}-0001", self.kind)),
        })
    }
}
