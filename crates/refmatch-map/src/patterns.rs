//! Institutional boilerplate stripping ("Bank ", " Tbk", "Kabupaten ", ...).
//!
//! Reference data carries prefixes and suffixes that free-text import values
//! usually omit. Stripping them and re-scoring the remaining core recovers
//! matches that plain edit distance scores too low.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use refmatch_model::FieldType;

use crate::edit_distance::similarity;
use crate::utils::normalize_text;

/// Score when a stripped core equals the other side exactly.
pub const CORE_EXACT_SCORE: u8 = 95;
/// Ceiling for a fuzzy core match.
pub const CORE_FUZZY_CAP: u8 = 90;
/// Core similarity must exceed this to count.
pub const CORE_FUZZY_MIN: u8 = 80;
/// Added to a qualifying fuzzy core similarity.
pub const CORE_FUZZY_BOOST: u8 = 10;
/// Ceiling for a core left after stripping a prefix and a suffix together.
pub const DOUBLE_STRIP_CAP: u8 = CORE_FUZZY_CAP;

const PROVINCE_PREFIXES: &[&str] = &[
    "provinsi",
    "prov.",
    "prov",
    "daerah istimewa",
    "daerah khusus ibukota",
    "dki",
];
const PROVINCE_SUFFIXES: &[&str] = &["province"];

const CITY_PREFIXES: &[&str] = &[
    "kota administrasi",
    "kota adm.",
    "kota",
    "kabupaten",
    "kab.",
    "kab",
    "kecamatan",
    "kec.",
    "kec",
    "kelurahan",
    "kel.",
    "kel",
    "desa",
];
const CITY_SUFFIXES: &[&str] = &["utara", "selatan", "timur", "barat", "tengah", "pusat"];

const SUBJECT_PREFIXES: &[&str] = &["mata pelajaran", "mapel", "pelajaran", "bahasa"];
const SUBJECT_SUFFIXES: &[&str] = &["wajib", "peminatan", "lanjutan"];

const BANK_PREFIXES: &[&str] = &["pt. bank", "pt bank", "bank", "pt.", "pt"];
const BANK_SUFFIXES: &[&str] = &[
    "(persero) tbk",
    "persero tbk",
    "(persero)",
    "persero",
    "tbk",
    "indonesia",
];

const CATEGORY_PREFIXES: &[&str] = &["kategori", "jenis", "kelompok"];
const CATEGORY_SUFFIXES: &[&str] = &["umum", "lainnya"];

static BUILTIN: LazyLock<PatternBook> = LazyLock::new(PatternBook::from_builtin_lists);

fn builtin_lists(field_type: FieldType) -> (&'static [&'static str], &'static [&'static str]) {
    match field_type {
        FieldType::Provinces => (PROVINCE_PREFIXES, PROVINCE_SUFFIXES),
        FieldType::Cities => (CITY_PREFIXES, CITY_SUFFIXES),
        FieldType::Subjects => (SUBJECT_PREFIXES, SUBJECT_SUFFIXES),
        FieldType::Banks => (BANK_PREFIXES, BANK_SUFFIXES),
        FieldType::Categories => (CATEGORY_PREFIXES, CATEGORY_SUFFIXES),
    }
}

#[derive(Debug, Clone, Default)]
struct AffixRules {
    /// Stored with a trailing space, e.g. `"bank "`.
    prefixes: Vec<String>,
    /// Stored with a leading space, e.g. `" tbk"`.
    suffixes: Vec<String>,
}

impl AffixRules {
    fn push_prefix(&mut self, raw: &str) {
        let word = normalize_text(raw);
        if word.is_empty() {
            return;
        }
        let prefix = format!("{word} ");
        if !self.prefixes.contains(&prefix) {
            self.prefixes.push(prefix);
        }
    }

    fn push_suffix(&mut self, raw: &str) {
        let word = normalize_text(raw);
        if word.is_empty() {
            return;
        }
        let suffix = format!(" {word}");
        if !self.suffixes.contains(&suffix) {
            self.suffixes.push(suffix);
        }
    }

    fn strip_prefixes<'a>(&self, value: &'a str) -> Vec<&'a str> {
        self.prefixes
            .iter()
            .filter_map(|prefix| value.strip_prefix(prefix.as_str()))
            .map(str::trim)
            .filter(|core| !core.is_empty())
            .collect()
    }

    fn strip_suffixes<'a>(&self, value: &'a str) -> Vec<&'a str> {
        self.suffixes
            .iter()
            .filter_map(|suffix| value.strip_suffix(suffix.as_str()))
            .map(str::trim)
            .filter(|core| !core.is_empty())
            .collect()
    }
}

/// Prefix and suffix lists per field type.
#[derive(Debug, Clone, Default)]
pub struct PatternBook {
    rules: BTreeMap<FieldType, AffixRules>,
}

impl PatternBook {
    /// The shared built-in pattern lists, constructed on first use.
    pub fn builtin() -> &'static PatternBook {
        &BUILTIN
    }

    pub fn empty() -> Self {
        Self::default()
    }

    fn from_builtin_lists() -> Self {
        let mut book = Self::empty();
        for field_type in FieldType::ALL {
            let (prefixes, suffixes) = builtin_lists(field_type);
            book.extend(field_type, prefixes, suffixes);
        }
        book
    }

    /// Registers extra boilerplate words for a field type.
    ///
    /// Words are given bare (`"bank"`, `"tbk"`); the separating space is
    /// added here so a prefix never eats into a longer word.
    pub fn extend<P, S>(&mut self, field_type: FieldType, prefixes: &[P], suffixes: &[S])
    where
        P: AsRef<str>,
        S: AsRef<str>,
    {
        let rules = self.rules.entry(field_type).or_default();
        for prefix in prefixes {
            rules.push_prefix(prefix.as_ref());
        }
        for suffix in suffixes {
            rules.push_suffix(suffix.as_ref());
        }
    }

    pub fn prefixes(&self, field_type: FieldType) -> impl Iterator<Item = &str> {
        self.rules
            .get(&field_type)
            .into_iter()
            .flat_map(|rules| rules.prefixes.iter().map(|p| p.trim()))
    }

    pub fn suffixes(&self, field_type: FieldType) -> impl Iterator<Item = &str> {
        self.rules
            .get(&field_type)
            .into_iter()
            .flat_map(|rules| rules.suffixes.iter().map(|s| s.trim()))
    }

    /// Score of the best boilerplate-stripped comparison, or 0 when no
    /// prefix or suffix applies.
    ///
    /// Candidate names are stripped of prefixes, suffixes, and both at once.
    /// A core that needed both strips scores at most [`DOUBLE_STRIP_CAP`], so
    /// "Kabupaten Bandung" outranks "Kabupaten Bandung Barat" for "Bandung".
    /// The input is only stripped of prefixes: a trailing "Timur" typed by a
    /// user is information, not boilerplate.
    pub fn boosted_score(&self, input: &str, candidate_name: &str, field_type: FieldType) -> u8 {
        let Some(rules) = self.rules.get(&field_type) else {
            return 0;
        };
        let input = normalize_text(input);
        let candidate = normalize_text(candidate_name);
        if input.is_empty() || candidate.is_empty() {
            return 0;
        }

        let candidate_cores = candidate_cores(rules, &candidate);
        let input_cores = rules.strip_prefixes(&input);

        let mut best = 0;
        for core in &candidate_cores {
            best = best.max(core.score(&input));
        }
        for input_core in &input_cores {
            best = best.max(core_score(input_core, &candidate));
            for core in &candidate_cores {
                best = best.max(core.score(input_core));
            }
        }
        best
    }
}

/// A stripped candidate name and whether both a prefix and a suffix went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Core<'a> {
    text: &'a str,
    double_stripped: bool,
}

impl Core<'_> {
    fn score(&self, input: &str) -> u8 {
        let score = core_score(input, self.text);
        if self.double_stripped {
            score.min(DOUBLE_STRIP_CAP)
        } else {
            score
        }
    }
}

fn candidate_cores<'a>(rules: &AffixRules, candidate: &'a str) -> Vec<Core<'a>> {
    let single = |text: &'a str| Core {
        text,
        double_stripped: false,
    };
    let mut cores = Vec::new();
    for core in rules.strip_prefixes(candidate) {
        cores.push(single(core));
        cores.extend(rules.strip_suffixes(core).into_iter().map(|text| Core {
            text,
            double_stripped: true,
        }));
    }
    cores.extend(rules.strip_suffixes(candidate).into_iter().map(single));
    cores
}

fn core_score(input: &str, core: &str) -> u8 {
    if input == core {
        return CORE_EXACT_SCORE;
    }
    let score = similarity(input, core);
    if score > CORE_FUZZY_MIN {
        CORE_FUZZY_CAP.min(score.saturating_add(CORE_FUZZY_BOOST))
    } else {
        0
    }
}
