//! Salon business profile and service catalog

use serde::Serialize;

/// Static facts the assistant can quote
#[derive(Debug, Clone, Serialize)]
pub struct BusinessProfile {
    pub name: &'static str,
    pub contact_number: &'static str,
    pub opening_hours: &'static str,
    pub doorstep_service: bool,
}

pub const BUSINESS: BusinessProfile = BusinessProfile {
    name: "Goodness Glamour Salon",
    contact_number: "9036626642",
    opening_hours: "Monday to Sunday, 9 AM to 8 PM",
    doorstep_service: true,
};

/// A bookable service with its price band in rupees
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalonService {
    pub name: &'static str,
    pub min_price: u32,
    pub max_price: u32,
    /// Spoken forms that refer to this service
    #[serde(skip)]
    pub keywords: &'static [&'static str],
}

impl SalonService {
    /// Price band as it should be read out, e.g. "500 to 1,500 rupees"
    pub fn spoken_price(&self) -> String {
        format!(
            "{} to {} rupees",
            group_thousands(self.min_price),
            group_thousands(self.max_price)
        )
    }
}

// Ordered most specific first: "kids haircut" must not resolve to Haircut.
pub const SERVICES: &[SalonService] = &[
    SalonService {
        name: "Kids Haircut",
        min_price: 300,
        max_price: 700,
        keywords: &["kids", "kid", "child", "children", "baby"],
    },
    SalonService {
        name: "Bridal Hair & Makeup",
        min_price: 15_000,
        max_price: 30_000,
        keywords: &["bridal", "bride", "wedding", "makeup", "make up"],
    },
    SalonService {
        name: "Party Hairstyle",
        min_price: 800,
        max_price: 1_500,
        keywords: &["party", "function", "event"],
    },
    SalonService {
        name: "Keratin Treatment",
        min_price: 4_000,
        max_price: 8_000,
        keywords: &["keratin", "smoothening", "smoothing"],
    },
    SalonService {
        name: "Hair Spa Treatment",
        min_price: 1_500,
        max_price: 3_000,
        keywords: &["spa"],
    },
    SalonService {
        name: "Hair Coloring",
        min_price: 2_000,
        max_price: 5_000,
        keywords: &["color", "colour", "coloring", "colouring", "dye", "highlights"],
    },
    SalonService {
        name: "Haircut & Styling",
        min_price: 500,
        max_price: 1_500,
        keywords: &["haircut", "hair cut", "cut", "trim", "styling", "style"],
    },
];

/// Most specific service mentioned in an utterance, if any
///
/// Keywords are matched as whole words on the lowercased text.
pub fn find_service(utterance: &str) -> Option<&'static SalonService> {
    let text = utterance.to_lowercase();
    let words: Vec<&str> = text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();
    let joined = words.join(" ");

    SERVICES.iter().find(|service| {
        service.keywords.iter().any(|keyword| {
            if keyword.contains(' ') {
                format!(" {} ", joined).contains(&format!(" {} ", keyword))
            } else {
                words.contains(keyword)
            }
        })
    })
}

fn group_thousands(value: u32) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
