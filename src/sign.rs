use serde::Serialize;

use crate::{Day, DayRange, Month, prelude::*};

/// Classical element of a sign. Each element rules exactly three signs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

/// One of the twelve fixed-calendar zodiac signs.
#[derive(Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZodiacSign {
    name:          &'static str,
    symbol:        &'static str,
    #[serde(rename = "period")]
    range:         DayRange,
    element:       Element,
    ruling_planet: &'static str,
    traits:        [&'static str; 5],
    daily_reading: &'static str,
}

impl ZodiacSign {
    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn symbol(&self) -> &'static str {
        self.symbol
    }

    pub const fn range(&self) -> DayRange {
        self.range
    }

    pub const fn element(&self) -> Element {
        self.element
    }

    /// May list several planets, comma-separated ("Pluto, Mars")
    pub const fn ruling_planet(&self) -> &'static str {
        self.ruling_planet
    }

    pub const fn traits(&self) -> &[&'static str] {
        &self.traits
    }

    /// Fixed reading shown with the sign details
    pub const fn daily_reading(&self) -> &'static str {
        self.daily_reading
    }

    /// Signs of the given element, in table order
    pub fn by_element(element: Element) -> impl Iterator<Item = &'static Self> {
        ZODIAC.iter().filter(move |sign| sign.element == element)
    }
}

impl std::fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.name, self.symbol)
    }
}

static ZODIAC: [ZodiacSign; 12] = [
    ZodiacSign {
        name:          "Aries",
        symbol:        "♈",
        range:         DayRange::new(3, 21, 4, 19),
        element:       Element::Fire,
        ruling_planet: "Mars",
        traits:        ["Courageous", "Determined", "Passionate", "Confident", "Enthusiastic"],
        daily_reading: "Today is perfect for starting new projects. Your natural leadership will shine through, especially in group settings.",
    },
    ZodiacSign {
        name:          "Taurus",
        symbol:        "♉",
        range:         DayRange::new(4, 20, 5, 20),
        element:       Element::Earth,
        ruling_planet: "Venus",
        traits:        ["Reliable", "Patient", "Practical", "Devoted", "Responsible"],
        daily_reading: "Focus on financial planning today. Your practical approach to life will help you make sound long-term decisions.",
    },
    ZodiacSign {
        name:          "Gemini",
        symbol:        "♊",
        range:         DayRange::new(5, 21, 6, 20),
        element:       Element::Air,
        ruling_planet: "Mercury",
        traits:        ["Gentle", "Affectionate", "Curious", "Adaptable", "Quick-witted"],
        daily_reading: "Communication channels are open wide. Your natural charm will help you connect with someone special today.",
    },
    ZodiacSign {
        name:          "Cancer",
        symbol:        "♋",
        range:         DayRange::new(6, 21, 7, 22),
        element:       Element::Water,
        ruling_planet: "Moon",
        traits:        ["Tenacious", "Highly Imaginative", "Loyal", "Emotional", "Sympathetic"],
        daily_reading: "Home and family matters take center stage. Trust your intuition when making decisions about your living space.",
    },
    ZodiacSign {
        name:          "Leo",
        symbol:        "♌",
        range:         DayRange::new(7, 23, 8, 22),
        element:       Element::Fire,
        ruling_planet: "Sun",
        traits:        ["Creative", "Passionate", "Generous", "Warm-hearted", "Cheerful"],
        daily_reading: "Your creative energy is at a peak. Take time to express yourself through art or performance today.",
    },
    ZodiacSign {
        name:          "Virgo",
        symbol:        "♍",
        range:         DayRange::new(8, 23, 9, 22),
        element:       Element::Earth,
        ruling_planet: "Mercury",
        traits:        ["Analytical", "Practical", "Diligent", "Perfectionist", "Shy"],
        daily_reading: "Your attention to detail will be appreciated at work. Consider organizing your space for maximum productivity.",
    },
    ZodiacSign {
        name:          "Libra",
        symbol:        "♎",
        range:         DayRange::new(9, 23, 10, 22),
        element:       Element::Air,
        ruling_planet: "Venus",
        traits:        ["Diplomatic", "Fair", "Social", "Cooperative", "Gracious"],
        daily_reading: "Balance in relationships is key today. Your natural diplomacy will help resolve a conflict between friends.",
    },
    ZodiacSign {
        name:          "Scorpio",
        symbol:        "♏",
        range:         DayRange::new(10, 23, 11, 21),
        element:       Element::Water,
        ruling_planet: "Pluto, Mars",
        traits:        ["Resourceful", "Brave", "Passionate", "Stubborn", "Mysterious"],
        daily_reading: "Your intuition is especially strong. Pay attention to subtle clues in your interactions with others.",
    },
    ZodiacSign {
        name:          "Sagittarius",
        symbol:        "♐",
        range:         DayRange::new(11, 22, 12, 21),
        element:       Element::Fire,
        ruling_planet: "Jupiter",
        traits:        ["Generous", "Idealistic", "Humorous", "Adventurous", "Enthusiastic"],
        daily_reading: "Expand your horizons through learning or travel. A spontaneous adventure could lead to valuable insights.",
    },
    ZodiacSign {
        name:          "Capricorn",
        symbol:        "♑",
        range:         DayRange::new(12, 22, 1, 19),
        element:       Element::Earth,
        ruling_planet: "Saturn",
        traits:        ["Responsible", "Disciplined", "Self-controlled", "Practical", "Patient"],
        daily_reading: "Career goals are highlighted today. Your natural discipline will help you make significant progress on a major project.",
    },
    ZodiacSign {
        name:          "Aquarius",
        symbol:        "♒",
        range:         DayRange::new(1, 20, 2, 18),
        element:       Element::Air,
        ruling_planet: "Uranus, Saturn",
        traits:        ["Progressive", "Original", "Independent", "Humanitarian", "Intellectual"],
        daily_reading: "Your innovative ideas will be well-received. Consider joining a group or community focused on positive change.",
    },
    ZodiacSign {
        name:          "Pisces",
        symbol:        "♓",
        range:         DayRange::new(2, 19, 3, 20),
        element:       Element::Water,
        ruling_planet: "Neptune, Jupiter",
        traits:        ["Compassionate", "Artistic", "Intuitive", "Gentle", "Wise"],
        daily_reading: "Your creativity and empathy are heightened today. Make time for artistic pursuits or helping someone in need.",
    },
];

/// All twelve signs, Aries first.
pub fn zodiac_signs() -> &'static [ZodiacSign; 12] {
    &ZODIAC
}

/// Maps a validated month and day to its sign.
///
/// The year-wrapping range is checked before the others. The twelve ranges
/// partition the calendar, so a miss means the table itself is broken.
pub fn resolve_by_date(month: Month, day: Day) -> &'static ZodiacSign {
    let (month, day) = (month.get(), day.get());
    ZODIAC
        .iter()
        .find(|sign| sign.range.wraps_year() && sign.range.contains(month, day))
        .or_else(|| {
            ZODIAC
                .iter()
                .filter(|sign| !sign.range.wraps_year())
                .find(|sign| sign.range.contains(month, day))
        })
        .unwrap_or_else(|| unreachable!("zodiac table leaves {month}/{day} uncovered"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::is_valid_calendar_date;

    fn sign_on(month: u8, day: u8) -> &'static ZodiacSign {
        let month = Month::new(month).unwrap();
        resolve_by_date(month, Day::new(day, month, None).unwrap())
    }

    #[test]
    fn test_boundary_dates() {
        let cases = [
            (3, 21, "Aries"),
            (4, 19, "Aries"),
            (4, 20, "Taurus"),
            (12, 21, "Sagittarius"),
            (12, 22, "Capricorn"),
            (1, 19, "Capricorn"),
            (1, 20, "Aquarius"),
            (2, 19, "Pisces"),
            (5, 21, "Gemini"),
            (6, 21, "Cancer"),
            (7, 23, "Leo"),
            (8, 23, "Virgo"),
            (9, 23, "Libra"),
            (10, 23, "Scorpio"),
            (11, 22, "Sagittarius"),
        ];
        for (month, day, expected) in cases {
            assert_eq!(sign_on(month, day).name(), expected, "{month}/{day}");
        }
    }

    #[test]
    fn test_mid_range_dates() {
        assert_eq!(sign_on(3, 25).name(), "Aries");
        assert_eq!(sign_on(12, 25).name(), "Capricorn");
        assert_eq!(sign_on(1, 10).name(), "Capricorn");
        assert_eq!(sign_on(2, 29).name(), "Pisces");
    }

    #[test]
    fn test_ranges_partition_the_year() {
        let mut days_per_sign = [0_u32; 12];
        for month in 1..=12_u8 {
            for day in 1..=31_u8 {
                if !is_valid_calendar_date(month.into(), day.into(), None) {
                    continue;
                }
                let owners: Vec<usize> = ZODIAC
                    .iter()
                    .enumerate()
                    .filter(|(_, sign)| sign.range.contains(month, day))
                    .map(|(i, _)| i)
                    .collect();
                assert_eq!(owners.len(), 1, "{month}/{day} owned by {owners:?}");
                assert_eq!(sign_on(month, day), &ZODIAC[owners[0]]);
                days_per_sign[owners[0]] += 1;
            }
        }
        assert_eq!(days_per_sign.iter().sum::<u32>(), 366);
        assert!(days_per_sign.iter().all(|&days| days >= 29));
    }

    #[test]
    fn test_only_capricorn_wraps() {
        let wrapping: Vec<&str> = ZODIAC
            .iter()
            .filter(|sign| sign.range.wraps_year())
            .map(ZodiacSign::name)
            .collect();
        assert_eq!(wrapping, ["Capricorn"]);
    }

    #[test]
    fn test_three_signs_per_element() {
        for element in [Element::Fire, Element::Earth, Element::Air, Element::Water] {
            assert_eq!(ZodiacSign::by_element(element).count(), 3, "{element}");
        }
        let fire: Vec<&str> = ZodiacSign::by_element(Element::Fire)
            .map(ZodiacSign::name)
            .collect();
        assert_eq!(fire, ["Aries", "Leo", "Sagittarius"]);
    }

    #[test]
    fn test_sign_data() {
        let scorpio = sign_on(11, 1);
        assert_eq!(scorpio.symbol(), "♏");
        assert_eq!(scorpio.ruling_planet(), "Pluto, Mars");
        assert_eq!(scorpio.traits().len(), 5);
        assert_eq!(scorpio.range().to_string(), "10/23 - 11/21");
        assert_eq!(scorpio.to_string(), "Scorpio ♏");
        assert_eq!(zodiac_signs().len(), 12);
        assert!(zodiac_signs().iter().all(|sign| !sign.daily_reading().is_empty()));
    }

    #[test]
    fn test_serialize_sign() {
        let json = serde_json::to_value(sign_on(3, 21)).unwrap();
        assert_eq!(json["name"], "Aries");
        assert_eq!(json["period"], "3/21 - 4/19");
        assert_eq!(json["element"], "Fire");
        assert_eq!(json["rulingPlanet"], "Mars");
        assert_eq!(json["traits"][0], "Courageous");
        assert!(
            json["dailyReading"]
                .as_str()
                .unwrap()
                .starts_with("Today is perfect for starting new projects.")
        );
    }
}
