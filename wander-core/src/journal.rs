//! Travel journal: one short entry per leg of a path.

use crate::sampling::SamplePoint;

/// Rainfall above which an arrival feels misty.
const MISTY_RAINFALL: u8 = 224;
/// Rainfall below which an arrival feels dry.
const DRY_RAINFALL: u8 = 64;
/// Temperature above which the heat is remarked on.
const HOT_TEMPERATURE: u8 = 160;
/// How far above sea level the water is still in sight.
const SHORE_MARGIN: u16 = 2;

/// Describe walking from `prev` to `next`.
///
/// Each entry mentions the slope, then the view, then the weather and the
/// temperature, in that order, from the point of view of the arrival.
#[must_use]
pub fn describe_leg(prev: &SamplePoint, next: &SamplePoint, sealevel: u8, snowline: u8) -> String {
    let mut entry = String::new();

    if next.altitude > prev.altitude {
        entry.push_str("I walked uphill. ");
    } else {
        entry.push_str("I walked downhill. ");
    }

    if next.altitude > snowline {
        entry.push_str("The air was thin, but I could see for miles. ");
    } else if u16::from(next.altitude) < u16::from(sealevel) + SHORE_MARGIN {
        entry.push_str("I could see the water. ");
    }

    if next.rainfall > prev.rainfall && next.rainfall > MISTY_RAINFALL {
        entry.push_str("The air was misty. ");
    } else if next.rainfall < prev.rainfall && next.rainfall < DRY_RAINFALL {
        entry.push_str("It was dry as a bone. ");
    }

    if next.temperature > prev.temperature {
        entry.push_str("It felt warmer here. ");
    } else {
        entry.push_str("It felt cooler here. ");
    }
    if next.temperature == 0 {
        entry.push_str("I tightened my coat around me. The winds were harsh and frigid. ");
    } else if next.temperature > HOT_TEMPERATURE {
        entry.push_str("The heat was unbearable. I wiped my brow. ");
    }

    entry.truncate(entry.trim_end().len());
    entry
}

/// One entry for every consecutive pair of `path`.
///
/// Paths shorter than two points produce no entries.
#[must_use]
pub fn journal(path: &[SamplePoint], sealevel: u8, snowline: u8) -> Vec<String> {
    path.windows(2)
        .map(|leg| describe_leg(&leg[0], &leg[1], sealevel, snowline))
        .collect()
}
