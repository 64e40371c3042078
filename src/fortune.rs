//! Randomized fortune text for a sign.

use std::fmt;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;
use serde::ser::{SerializeStruct, Serializer};

use crate::{ZodiacSign, prelude::*};

const TIME_FRAME_PLACEHOLDER: &str = "{time_frame}";
const TIME_FRAMES: [&str; 4] = ["week", "month", "season", "year"];
const INTENSITIES: [&str; 5] = ["slightly", "notably", "significantly", "dramatically", "profoundly"];
const QUALITIES: [&str; 6] = [
    "creativity",
    "intuition",
    "discipline",
    "communication",
    "leadership",
    "empathy",
];
const MAX_COSMIC_NUMBER: u8 = 99;

/// Topic a fortune line is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[display(fmt = "career")]
    Career,
    #[display(fmt = "love")]
    Love,
    #[display(fmt = "health")]
    Health,
    #[display(fmt = "general")]
    General,
}

impl Category {
    pub const ALL: [Self; 4] = [Self::Career, Self::Love, Self::Health, Self::General];

    const fn templates(self) -> &'static [&'static str; 5] {
        match self {
            Self::Career => &[
                "Your career will take an unexpected turn this {time_frame}, leading to new opportunities.",
                "A colleague will offer valuable insights that will boost your professional growth.",
                "Your hard work will be recognized by someone important in your field.",
                "Now is the perfect time to pursue that project you've been postponing.",
                "Trust your instincts in professional matters; they'll lead you to success.",
            ],
            Self::Love => &[
                "Romance is in the air! Keep your heart open to new possibilities.",
                "An important conversation will strengthen your closest relationship.",
                "Someone from your past may reenter your life with surprising consequences.",
                "Your natural charisma will be especially strong in the coming {time_frame}.",
                "Take time to nurture your most valued relationships; the effort will be rewarded.",
            ],
            Self::Health => &[
                "Focus on balance in your routine to maintain optimal wellness.",
                "A new approach to your health will yield unexpected benefits.",
                "Listen to your body; it's trying to tell you something important.",
                "The stars suggest this is an excellent time to begin a new wellness practice.",
                "Your energy levels will align perfectly with your ambitions.",
            ],
            Self::General => &[
                "The universe is aligning to bring you a pleasant surprise.",
                "An unexpected encounter will shift your perspective in a meaningful way.",
                "Your natural talents will shine especially bright in the coming {time_frame}.",
                "Trust the process; what seems challenging now is preparing you for something greater.",
                "Your intuition is particularly strong right now; let it guide your decisions.",
            ],
        }
    }
}

/// One line of a fortune.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reading {
    pub category: Category,
    pub text:     String,
}

/// A generated horoscope for one sign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fortune {
    sign:          &'static ZodiacSign,
    readings:      Vec<Reading>,
    insight:       String,
    cosmic_number: u8,
}

impl Fortune {
    /// Generates a fortune with the thread-local RNG
    pub fn for_sign(sign: &'static ZodiacSign) -> Self {
        generate_fortune(sign, &mut rand::thread_rng())
    }

    pub const fn sign(&self) -> &'static ZodiacSign {
        self.sign
    }

    /// Two or three lines, each from a different category
    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    pub fn insight(&self) -> &str {
        &self.insight
    }

    /// In `1..=99`
    pub const fn cosmic_number(&self) -> u8 {
        self.cosmic_number
    }
}

impl fmt::Display for Fortune {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "🌟 {} ({}) Galactic Horoscope 🌟",
            self.sign.name(),
            self.sign.symbol()
        )?;
        writeln!(f)?;
        for reading in &self.readings {
            writeln!(f, "• {}", reading.text)?;
        }
        writeln!(f)?;
        writeln!(f, "✨ Special Insight: {}", self.insight)?;
        writeln!(f)?;
        write!(f, "🔮 Your cosmic number: {}", self.cosmic_number)
    }
}

impl Serialize for Fortune {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Fortune", 5)?;
        state.serialize_field("sign", self.sign.name())?;
        state.serialize_field("readings", &self.readings)?;
        state.serialize_field("insight", &self.insight)?;
        state.serialize_field("cosmicNumber", &self.cosmic_number)?;
        state.serialize_field("text", &self.to_string())?;
        state.end()
    }
}

fn pick<R: Rng + ?Sized>(rng: &mut R, items: &[&'static str]) -> &'static str {
    items.choose(rng).copied().unwrap_or_default()
}

/// Composes a fortune for `sign` from two or three distinct categories,
/// a special insight and a cosmic number.
pub fn generate_fortune<R: Rng + ?Sized>(sign: &'static ZodiacSign, rng: &mut R) -> Fortune {
    let count = rng.gen_range(2..=3);
    let categories: Vec<Category> = Category::ALL.choose_multiple(rng, count).copied().collect();

    let readings = categories
        .into_iter()
        .map(|category| {
            let template = pick(rng, category.templates());
            let text = if template.contains(TIME_FRAME_PLACEHOLDER) {
                template.replace(TIME_FRAME_PLACEHOLDER, pick(rng, &TIME_FRAMES))
            } else {
                template.to_owned()
            };
            Reading { category, text }
        })
        .collect();

    let insight = format!(
        "Your {} will {} increase in the coming days.",
        pick(rng, &QUALITIES),
        pick(rng, &INTENSITIES)
    );

    Fortune {
        sign,
        readings,
        insight,
        cosmic_number: rng.gen_range(1..=MAX_COSMIC_NUMBER),
    }
}
