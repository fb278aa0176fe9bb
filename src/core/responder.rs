//! Scripted salon responder
//!
//! Turns one recognized utterance into the next thing the assistant says.

use tracing::debug;

use crate::core::intent::{DetectedIntent, Intent, IntentDetector};
use crate::domain::{BusinessProfile, Reply, BUSINESS, SERVICES};

/// Stateless responder for salon calls
#[derive(Debug, Clone)]
pub struct SalonResponder {
    detector: IntentDetector,
    business: BusinessProfile,
}

impl Default for SalonResponder {
    fn default() -> Self {
        Self::new()
    }
}

impl SalonResponder {
    pub fn new() -> Self {
        Self {
            detector: IntentDetector::new(),
            business: BUSINESS,
        }
    }

    pub fn business(&self) -> &BusinessProfile {
        &self.business
    }

    /// First prompt of an inbound or outbound call
    pub fn greeting(&self) -> String {
        format!(
            "Hello! Welcome to {}. I'm your AI assistant. How can I help you today?",
            self.business.name
        )
    }

    /// Greeting used by the plain processing endpoint
    pub fn short_greeting(&self) -> String {
        format!(
            "Hello! Welcome to {}. How can I help you today?",
            self.business.name
        )
    }

    /// Spoken when a request could not be handled
    pub fn apology(&self) -> &'static str {
        "I'm sorry, I'm having trouble. Please try again later."
    }

    /// Reply to one utterance, including whether to hang up
    pub fn process_voice_call(&self, speech: &str) -> Reply {
        let detected = self.detector.detect(speech);
        debug!(intent = ?detected.intent, service = ?detected.service.map(|s| s.name), "detected intent");
        self.respond(&detected)
    }

    /// Text-only reply, used by the JSON endpoints
    pub fn process_user_input(&self, input: &str) -> String {
        self.process_voice_call(input).text
    }

    fn respond(&self, detected: &DetectedIntent) -> Reply {
        let b = &self.business;
        match (detected.intent, detected.service) {
            (Intent::Booking, Some(service)) => Reply::continue_with(format!(
                "I'd be happy to book a {} for you. Please tell me your preferred date and time, and our team will call you on your number to confirm.",
                service.name
            )),
            (Intent::Booking, None) => Reply::continue_with(
                "I'd be happy to book an appointment for you. Which service would you like, and what date and time suit you? Our team will call you to confirm.",
            ),
            (Intent::Pricing, Some(service)) => Reply::continue_with(format!(
                "{} costs {}. Would you like to book it?",
                service.name,
                service.spoken_price()
            )),
            (Intent::Pricing, None) => Reply::continue_with(format!(
                "Our prices: {}. Which service are you interested in?",
                SERVICES
                    .iter()
                    .map(|s| format!("{} from {}", s.name, s.spoken_price()))
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
            (Intent::Hours, _) => Reply::continue_with(format!(
                "We are open {}. Would you like to book an appointment?",
                b.opening_hours
            )),
            (Intent::Services, Some(service)) => Reply::continue_with(format!(
                "Yes, we offer {}, priced at {}. Would you like to book it?",
                service.name,
                service.spoken_price()
            )),
            (Intent::Services, None) => Reply::continue_with(format!(
                "We offer {}. {}Which one interests you?",
                SERVICES
                    .iter()
                    .map(|s| s.name)
                    .collect::<Vec<_>>()
                    .join(", "),
                if b.doorstep_service {
                    "Doorstep service is also available. "
                } else {
                    ""
                }
            )),
            (Intent::Doorstep, _) => Reply::continue_with(if b.doorstep_service {
                "Yes, we provide doorstep service. Our stylist can come to your home. Would you like to book a home visit?"
            } else {
                "Sorry, we don't offer doorstep service at the moment."
            }),
            (Intent::Contact, _) => Reply::continue_with(format!(
                "You can reach us at {}. Is there anything else I can help you with?",
                spell_digits(b.contact_number)
            )),
            (Intent::Farewell, _) => Reply::end_with(format!(
                "Thank you for calling {}. Have a wonderful day!",
                b.name
            )),
            (Intent::Greeting, _) | (Intent::Unknown, _) => Reply::continue_with(
                "I can help you with our services, prices, timings and bookings. What would you like to know?",
            ),
        }
    }
}

// Phone numbers read digit by digit sound natural on TTS engines.
fn spell_digits(number: &str) -> String {
    number
        .chars()
        .map(String::from)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greetings_mention_salon() {
        let responder = SalonResponder::new();
        assert!(responder.greeting().contains("Goodness Glamour Salon"));
        assert!(responder.short_greeting().starts_with("Hello!"));
    }

    #[test]
    fn test_pricing_for_named_service() {
        let reply = SalonResponder::new().process_voice_call("How much for hair coloring?");
        assert_eq!(
            reply.text,
            "Hair Coloring costs 2,000 to 5,000 rupees. Would you like to book it?"
        );
        assert!(!reply.end_call);
    }

    #[test]
    fn test_price_list_covers_catalog() {
        let text = SalonResponder::new().process_user_input("what are your prices");
        for service in SERVICES {
            assert!(text.contains(service.name), "missing {}", service.name);
        }
    }

    #[test]
    fn test_hours() {
        let text = SalonResponder::new().process_user_input("what time do you open?");
        assert!(text.contains("Monday to Sunday, 9 AM to 8 PM"));
    }

    #[test]
    fn test_booking_echoes_service() {
        let text = SalonResponder::new().process_user_input("I want to book a keratin treatment");
        assert!(text.contains("Keratin Treatment"));
        assert!(text.contains("date and time"));
    }

    #[test]
    fn test_farewell_ends_call() {
        let reply = SalonResponder::new().process_voice_call("that's all, thank you");
        assert!(reply.end_call);
    }

    #[test]
    fn test_contact_spelled_out() {
        let text = SalonResponder::new().process_user_input("what's your contact number");
        assert!(text.contains("9 0 3 6 6 2 6 6 4 2"));
    }

    #[test]
    fn test_greeting_naming_service_answers_it() {
        let reply = SalonResponder::new().process_voice_call("Hi, I'd like a haircut");
        assert_eq!(
            reply.text,
            "Yes, we offer Haircut & Styling, priced at 500 to 1,500 rupees. Would you like to book it?"
        );
    }

    #[test]
    fn test_doorstep_question() {
        let text = SalonResponder::new().process_user_input("Do you provide doorstep service?");
        assert!(text.starts_with("Yes, we provide doorstep service."));
    }

    #[test]
    fn test_unknown_falls_back() {
        let reply = SalonResponder::new().process_voice_call("blue elephants");
        assert!(reply.text.contains("services, prices, timings and bookings"));
        assert!(!reply.end_call);
    }
}
