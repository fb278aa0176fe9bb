//! Call-control markup
//!
//! Renders a [`Reply`] as the document each provider expects back from a
//! webhook: TwiML for Twilio, an NCCO array for Vonage.

use serde_json::{json, Value};

use crate::domain::Reply;

/// Voice and speech-recognition settings shared by both formats
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceSettings {
    /// Speech recognition / TTS language, e.g. `en-IN`
    pub language: String,
    /// TwiML `<Say>` voice, e.g. `Polly.Aditi`
    pub voice: String,
    /// Where the provider posts the next speech result
    pub action_url: String,
}

impl VoiceSettings {
    pub fn new(
        language: impl Into<String>,
        voice: impl Into<String>,
        action_url: impl Into<String>,
    ) -> Self {
        Self {
            language: language.into(),
            voice: voice.into(),
            action_url: action_url.into(),
        }
    }

    /// Same settings with a different callback target
    pub fn with_action_url(&self, action_url: impl Into<String>) -> Self {
        Self {
            action_url: action_url.into(),
            ..self.clone()
        }
    }
}

const REPROMPT: &str = "Sorry, I didn't catch that.";

// ==================== TwiML ====================

/// TwiML document builder
pub struct Twiml;

impl Twiml {
    /// Render a reply
    ///
    /// A continuing call wraps the speech in a `<Gather>` so the caller's
    /// answer comes back to `action_url`; on silence the call re-prompts and
    /// redirects to the same URL. An ending call says the text and hangs up.
    pub fn render(reply: &Reply, settings: &VoiceSettings) -> String {
        let voice = escape_xml(&settings.voice);
        let text = escape_xml(&reply.text);

        let mut doc = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?><Response>");
        if reply.end_call {
            doc.push_str(&format!("<Say voice=\"{}\">{}</Say><Hangup/>", voice, text));
        } else {
            let action = escape_xml(&settings.action_url);
            doc.push_str(&format!(
                "<Gather input=\"speech\" action=\"{action}\" method=\"POST\" language=\"{lang}\" speechTimeout=\"auto\"><Say voice=\"{voice}\">{text}</Say></Gather>",
                action = action,
                lang = escape_xml(&settings.language),
                voice = voice,
                text = text,
            ));
            doc.push_str(&format!(
                "<Say voice=\"{}\">{}</Say><Redirect method=\"POST\">{}</Redirect>",
                voice, REPROMPT, action
            ));
        }
        doc.push_str("</Response>");
        doc
    }

    /// Render plain text as a continuing turn
    pub fn say(text: &str, settings: &VoiceSettings) -> String {
        Self::render(&Reply::continue_with(text), settings)
    }
}

fn escape_xml(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

// ==================== NCCO ====================

/// Vonage NCCO builder
pub struct Ncco;

impl Ncco {
    /// Render a reply as an NCCO action list
    pub fn render(reply: &Reply, settings: &VoiceSettings) -> Value {
        let mut actions = vec![json!({
            "action": "talk",
            "text": reply.text,
            "language": settings.language,
            "bargeIn": !reply.end_call,
        })];

        if !reply.end_call {
            actions.push(json!({
                "action": "input",
                "type": ["speech"],
                "eventUrl": [settings.action_url],
                "eventMethod": "POST",
                "speech": {
                    "language": settings.language,
                    "endOnSilence": 1,
                },
            }));
        }

        Value::Array(actions)
    }

    pub fn say(text: &str, settings: &VoiceSettings) -> Value {
        Self::render(&Reply::continue_with(text), settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> VoiceSettings {
        VoiceSettings::new("en-IN", "Polly.Aditi", "https://salon.example/voice/webhook")
    }

    #[test]
    fn test_twiml_continuing_turn() {
        let doc = Twiml::say("Welcome!", &settings());
        assert!(doc.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?><Response>"));
        assert!(doc.contains("<Gather input=\"speech\" action=\"https://salon.example/voice/webhook\""));
        assert!(doc.contains("<Say voice=\"Polly.Aditi\">Welcome!</Say></Gather>"));
        assert!(doc.contains("<Redirect method=\"POST\">https://salon.example/voice/webhook</Redirect>"));
        assert!(doc.ends_with("</Response>"));
        assert!(!doc.contains("<Hangup/>"));
    }

    #[test]
    fn test_twiml_ending_turn() {
        let doc = Twiml::render(&Reply::end_with("Goodbye"), &settings());
        assert!(doc.contains("<Say voice=\"Polly.Aditi\">Goodbye</Say><Hangup/>"));
        assert!(!doc.contains("<Gather"));
    }

    #[test]
    fn test_twiml_escapes_text_and_attributes() {
        let settings = settings().with_action_url("https://x.example/hook?a=1&b=2");
        let doc = Twiml::say("Hair & Makeup <special> \"deal\"", &settings);
        assert!(doc.contains("Hair &amp; Makeup &lt;special&gt; &quot;deal&quot;"));
        assert!(doc.contains("action=\"https://x.example/hook?a=1&amp;b=2\""));
    }

    #[test]
    fn test_ncco_actions() {
        let ncco = Ncco::say("Hi", &settings());
        let actions = ncco.as_array().unwrap();
        assert_eq!(actions.len(), 2);
        assert_eq!(actions[0]["action"], "talk");
        assert_eq!(actions[0]["text"], "Hi");
        assert_eq!(actions[1]["action"], "input");
        assert_eq!(actions[1]["type"][0], "speech");
        assert_eq!(actions[1]["eventUrl"][0], "https://salon.example/voice/webhook");

        let ncco = Ncco::render(&Reply::end_with("Bye"), &settings());
        assert_eq!(ncco.as_array().unwrap().len(), 1);
    }
}
