//! Free-text location matching.
//!
//! Locations are plain strings typed by users, so similarity is a heuristic
//! cascade over normalized text, a gazetteer of known cities and the region
//! each city belongs to. No geocoding is involved.

pub const EXACT_MATCH: f64 = 1.0;
pub const SAME_CITY: f64 = 0.9;
pub const SUBSTRING_MATCH: f64 = 0.8;
pub const SAME_REGION: f64 = 0.6;
pub const NO_MATCH: f64 = 0.2;
pub const MISSING: f64 = 0.0;

/// Region groupings used for the loosest location rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Central,
    Western,
    Eastern,
    Northern,
    Southern,
}

impl Region {
    pub fn name(&self) -> &'static str {
        match self {
            Region::Central => "central",
            Region::Western => "western",
            Region::Eastern => "eastern",
            Region::Northern => "northern",
            Region::Southern => "southern",
        }
    }
}

/// A known city and the spellings that refer to it
#[derive(Debug)]
pub struct City {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub region: Region,
}

macro_rules! city {
    ($name:literal, $region:ident, [$($alias:literal),+ $(,)?]) => {
        City {
            name: $name,
            aliases: &[$($alias),+],
            region: Region::$region,
        }
    };
}

/// Aliases are stored already normalized (lowercase, single spaces)
pub static GAZETTEER: &[City] = &[
    // Central
    city!("riyadh", Central, ["الرياض", "رياض", "riyadh", "ar riyadh"]),
    city!("kharj", Central, ["الخرج", "kharj"]),
    city!("buraydah", Central, ["بريدة", "بريده", "buraydah", "buraidah"]),
    city!("unaizah", Central, ["عنيزة", "عنيزه", "unaizah", "onaizah"]),
    city!("majmaah", Central, ["المجمعة", "majmaah"]),
    city!("dawadmi", Central, ["الدوادمي", "dawadmi"]),
    // Western
    city!("jeddah", Western, ["جدة", "جده", "jeddah", "jiddah", "jedda"]),
    city!("makkah", Western, ["مكة", "مكه", "makkah", "mecca"]),
    city!("madinah", Western, ["المدينة المنورة", "المدينه المنوره", "madinah", "medina"]),
    city!("taif", Western, ["الطائف", "taif"]),
    city!("yanbu", Western, ["ينبع", "yanbu"]),
    city!("rabigh", Western, ["رابغ", "rabigh"]),
    // Eastern
    city!("dammam", Eastern, ["الدمام", "dammam"]),
    city!("khobar", Eastern, ["الخبر", "khobar"]),
    city!("dhahran", Eastern, ["الظهران", "dhahran"]),
    city!("jubail", Eastern, ["الجبيل", "jubail"]),
    city!("hofuf", Eastern, ["الهفوف", "الأحساء", "الاحساء", "hofuf", "al ahsa", "al-ahsa"]),
    city!("qatif", Eastern, ["القطيف", "qatif"]),
    // Northern
    city!("tabuk", Northern, ["تبوك", "tabuk"]),
    city!("hail", Northern, ["حائل", "hail", "ha'il"]),
    city!("arar", Northern, ["عرعر", "arar"]),
    city!("sakaka", Northern, ["سكاكا", "sakaka"]),
    city!("jawf", Northern, ["الجوف", "al jouf", "al jawf"]),
    // Southern
    city!("abha", Southern, ["أبها", "ابها", "abha"]),
    city!("khamis mushait", Southern, ["خميس مشيط", "khamis mushait"]),
    city!("jazan", Southern, ["جازان", "جيزان", "jazan", "jizan"]),
    city!("najran", Southern, ["نجران", "najran"]),
    city!("baha", Southern, ["الباحة", "الباحه", "al baha", "al-baha"]),
];

/// Lowercase, trim and collapse runs of whitespace
pub fn normalize_location(raw: &str) -> String {
    raw.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// First gazetteer city mentioned anywhere in an already normalized string
pub fn find_city(normalized: &str) -> Option<&'static City> {
    GAZETTEER
        .iter()
        .find(|city| city.aliases.iter().any(|alias| normalized.contains(alias)))
}

/// Similarity between two free-text locations, in [0, 1].
///
/// Rules are checked in order and the first hit wins: missing input,
/// exact match, substring, same gazetteer city, same region, otherwise a floor.
/// Every rule is symmetric, so `similarity(a, b) == similarity(b, a)`.
pub fn location_similarity(a: &str, b: &str) -> f64 {
    let a = normalize_location(a);
    let b = normalize_location(b);

    if a.is_empty() || b.is_empty() {
        return MISSING;
    }

    if a == b {
        return EXACT_MATCH;
    }

    if a.contains(&b) || b.contains(&a) {
        return SUBSTRING_MATCH;
    }

    match (find_city(&a), find_city(&b)) {
        (Some(x), Some(y)) if x.name == y.name => SAME_CITY,
        (Some(x), Some(y)) if x.region == y.region => SAME_REGION,
        _ => NO_MATCH,
    }
}
