//! Sun-sign classification from a month and day.

use serde::{Deserialize, Serialize};

use crate::prelude::*;
use crate::range::{MonthDay, MonthDaySpan};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum ZodiacSign {
    Aquarius,
    Pisces,
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
}

/// Sign intervals in calendar order starting from Aquarius. Capricorn is
/// last and is the only span that crosses New Year.
pub const ZODIAC_TABLE: [(MonthDaySpan, ZodiacSign); 12] = [
    (span(1, 20, 2, 18), ZodiacSign::Aquarius),
    (span(2, 19, 3, 20), ZodiacSign::Pisces),
    (span(3, 21, 4, 19), ZodiacSign::Aries),
    (span(4, 20, 5, 20), ZodiacSign::Taurus),
    (span(5, 21, 6, 20), ZodiacSign::Gemini),
    (span(6, 21, 7, 22), ZodiacSign::Cancer),
    (span(7, 23, 8, 22), ZodiacSign::Leo),
    (span(8, 23, 9, 22), ZodiacSign::Virgo),
    (span(9, 23, 10, 22), ZodiacSign::Libra),
    (span(10, 23, 11, 21), ZodiacSign::Scorpio),
    (span(11, 22, 12, 21), ZodiacSign::Sagittarius),
    (span(12, 22, 1, 19), ZodiacSign::Capricorn),
];

const fn span(start_month: u8, start_day: u8, end_month: u8, end_day: u8) -> MonthDaySpan {
    MonthDaySpan::new(MonthDay::new(start_month, start_day), MonthDay::new(end_month, end_day))
}

impl ZodiacSign {
    /// First-match lookup over [`ZODIAC_TABLE`]; Capricorn if nothing matches.
    pub fn from_month_day(month: u8, day: u8) -> Self {
        ZODIAC_TABLE
            .iter()
            .find(|(span, _)| span.contains(month, day))
            .map_or(Self::Capricorn, |(_, sign)| *sign)
    }

    /// The interval this sign covers.
    pub(crate) fn span(self) -> MonthDaySpan {
        ZODIAC_TABLE
            .iter()
            .find(|(_, sign)| *sign == self)
            .map_or(span(12, 22, 1, 19), |(span, _)| *span)
    }

    /// One-line character sketch.
    pub const fn personality(self) -> &'static str {
        match self {
            Self::Aries => "Bold and full of energy.",
            Self::Taurus => "Grounded and loyal.",
            Self::Gemini => "Curious and quick-witted.",
            Self::Cancer => "Sensitive and nurturing.",
            Self::Leo => "Confident and charismatic.",
            Self::Virgo => "Practical and detail-oriented.",
            Self::Libra => "Balanced and social.",
            Self::Scorpio => "Passionate and intuitive.",
            Self::Sagittarius => "Adventurous and optimistic.",
            Self::Capricorn => "Disciplined and responsible.",
            Self::Aquarius => "Innovative and independent.",
            Self::Pisces => "Compassionate and artistic.",
        }
    }

    /// Longer line describing how luck tends to arrive for the sign.
    pub const fn outlook(self) -> &'static str {
        match self {
            Self::Capricorn => "Steady, determined, and quietly lucky.",
            Self::Aquarius => "Visionary thinker with unpredictable fortune.",
            Self::Pisces => "Intuitive and dreamy, with hidden windfalls.",
            Self::Aries => "Bold and impulsive, fortune favors your fire.",
            Self::Taurus => "Practical and consistent, slow-building luck.",
            Self::Gemini => "Witty and curious, luck dances with your ideas.",
            Self::Cancer => "Emotional and nurturing, secret luck flows.",
            Self::Leo => "Confident and radiant, star of fortune.",
            Self::Virgo => "Analytical and humble, luck in the details.",
            Self::Libra => "Balanced and charming, graceful fortunes.",
            Self::Scorpio => "Intense and strategic, luck in deep moves.",
            Self::Sagittarius => "Adventurous and bold, lucky shots.",
        }
    }
}

/// A sign together with its personality line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ZodiacResult {
    pub sign:        ZodiacSign,
    pub personality: &'static str,
}

pub fn zodiac(month: u8, day: u8) -> ZodiacResult {
    let sign = ZodiacSign::from_month_day(month, day);
    ZodiacResult {
        sign,
        personality: sign.personality(),
    }
}
