//! Word-list text source for plausible names, emails and descriptions.
//!
//! All draws come from the caller's RNG so a seeded generator reproduces the
//! same strings.

use rand::seq::SliceRandom;
use rand::Rng;

const SURNAMES: &[&str] = &[
    "Abebe", "Alemu", "Bekele", "Desta", "Girma", "Haile", "Kebede", "Mekonnen", "Tadesse",
    "Tesfaye", "Wolde", "Yohannes", "Anderson", "Garcia", "Johnson", "Martinez", "Nguyen",
    "Patel", "Robinson", "Schmidt", "Silva", "Thompson", "Walker", "Young",
];

const GIVEN_NAMES: &[&str] = &[
    "abel", "almaz", "dawit", "eden", "hana", "liya", "meron", "samuel", "selam", "yonas",
    "alex", "grace", "maria", "noah", "olivia", "ravi", "sofia", "tom",
];

const COMPANY_SUFFIXES: &[&str] = &["Group", "PLC", "and Sons", "Inc", "LLC", "Ltd"];

const DOMAINS: &[&str] = &["example.com", "example.org", "example.net", "mail.test"];

const LOREM: &[&str] = &[
    "alias", "amet", "aperiam", "beatae", "culpa", "dolor", "dolore", "eaque", "enim", "esse",
    "fugiat", "harum", "illum", "ipsum", "labore", "laborum", "magnam", "minima", "nemo",
    "nihil", "odio", "omnis", "quae", "quia", "ratione", "saepe", "sint", "tempora", "ullam",
    "veniam", "vero", "vitae", "voluptas",
];

fn pick<R: Rng + ?Sized>(rng: &mut R, words: &'static [&'static str]) -> &'static str {
    words.choose(rng).copied().unwrap_or_default()
}

/// A company name such as `Bekele Group` or `Haile-Silva`.
pub(crate) fn company<R: Rng + ?Sized>(rng: &mut R) -> String {
    match rng.gen_range(0..3) {
        0 => format!("{} {}", pick(rng, SURNAMES), pick(rng, COMPANY_SUFFIXES)),
        1 => format!("{}-{}", pick(rng, SURNAMES), pick(rng, SURNAMES)),
        _ => format!(
            "{}, {} and {}",
            pick(rng, SURNAMES),
            pick(rng, SURNAMES),
            pick(rng, SURNAMES)
        ),
    }
}

/// An address of the form `given.surnameNN@domain`.
pub(crate) fn email<R: Rng + ?Sized>(rng: &mut R) -> String {
    let given = pick(rng, GIVEN_NAMES);
    let surname = pick(rng, SURNAMES).to_ascii_lowercase();
    let suffix: u16 = rng.gen_range(0..1000);
    let domain = pick(rng, DOMAINS);
    format!("{given}.{surname}{suffix}@{domain}")
}

/// A single lowercase word.
pub(crate) fn word<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    pick(rng, LOREM)
}

/// A capitalized sentence of four to nine words ending with a period.
pub(crate) fn sentence<R: Rng + ?Sized>(rng: &mut R) -> String {
    let len = rng.gen_range(4..=9);
    let words: Vec<&str> = (0..len).map(|_| word(rng)).collect();
    format!("{}.", capitalize(&words.join(" ")))
}

pub(crate) fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
