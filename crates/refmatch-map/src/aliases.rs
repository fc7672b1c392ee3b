//! Abbreviation and slang tables mapping free text to canonical name fragments.
//!
//! One table per [`FieldType`]. Keys and targets are stored normalized
//! (lowercase, single spaces). Lookup is an exact key match; fuzziness over
//! alias targets happens later, in the scorer.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use refmatch_model::FieldType;

use crate::utils::normalize_text;

const PROVINCE_ALIASES: &[(&str, &str)] = &[
    ("diy", "daerah istimewa yogyakarta"),
    ("jogja", "yogyakarta"),
    ("yogya", "yogyakarta"),
    ("dki", "dki jakarta"),
    ("jakarta", "dki jakarta"),
    ("nad", "aceh"),
    ("jabar", "jawa barat"),
    ("jateng", "jawa tengah"),
    ("jatim", "jawa timur"),
    ("sumut", "sumatera utara"),
    ("sumbar", "sumatera barat"),
    ("sumsel", "sumatera selatan"),
    ("kalbar", "kalimantan barat"),
    ("kalteng", "kalimantan tengah"),
    ("kalsel", "kalimantan selatan"),
    ("kaltim", "kalimantan timur"),
    ("kaltara", "kalimantan utara"),
    ("sulut", "sulawesi utara"),
    ("sulteng", "sulawesi tengah"),
    ("sulsel", "sulawesi selatan"),
    ("sultra", "sulawesi tenggara"),
    ("sulbar", "sulawesi barat"),
    ("ntb", "nusa tenggara barat"),
    ("ntt", "nusa tenggara timur"),
    ("babel", "kepulauan bangka belitung"),
    ("kepri", "kepulauan riau"),
    ("malut", "maluku utara"),
    ("pabar", "papua barat"),
];

const CITY_ALIASES: &[(&str, &str)] = &[
    ("jogja", "yogyakarta"),
    ("yogya", "yogyakarta"),
    ("jogjakarta", "yogyakarta"),
    ("jkt", "jakarta"),
    ("jaksel", "jakarta selatan"),
    ("jakbar", "jakarta barat"),
    ("jaktim", "jakarta timur"),
    ("jakut", "jakarta utara"),
    ("jakpus", "jakarta pusat"),
    ("bdg", "bandung"),
    ("sby", "surabaya"),
    ("smg", "semarang"),
    ("mdn", "medan"),
    ("mks", "makassar"),
    ("plg", "palembang"),
    ("dps", "denpasar"),
    ("bks", "bekasi"),
    ("bgr", "bogor"),
    ("tng", "tangerang"),
    ("tangsel", "tangerang selatan"),
    ("dpk", "depok"),
    ("solo", "surakarta"),
    ("mlg", "malang"),
    ("btm", "batam"),
    ("pku", "pekanbaru"),
    ("bpn", "balikpapan"),
    ("pnk", "pontianak"),
];

const SUBJECT_ALIASES: &[(&str, &str)] = &[
    ("mtk", "matematika"),
    ("mat", "matematika"),
    ("math", "matematika"),
    ("bindo", "bahasa indonesia"),
    ("b indo", "bahasa indonesia"),
    ("b. indonesia", "bahasa indonesia"),
    ("bing", "bahasa inggris"),
    ("b inggris", "bahasa inggris"),
    ("english", "bahasa inggris"),
    ("ipa", "ilmu pengetahuan alam"),
    ("ips", "ilmu pengetahuan sosial"),
    ("pkn", "pendidikan kewarganegaraan"),
    ("ppkn", "pendidikan pancasila dan kewarganegaraan"),
    ("pai", "pendidikan agama islam"),
    ("pjok", "pendidikan jasmani olahraga dan kesehatan"),
    ("penjas", "pendidikan jasmani"),
    ("penjaskes", "pendidikan jasmani olahraga dan kesehatan"),
    ("sbdp", "seni budaya dan prakarya"),
    ("sbk", "seni budaya"),
    ("tik", "teknologi informasi dan komunikasi"),
    ("fis", "fisika"),
    ("kim", "kimia"),
    ("bio", "biologi"),
    ("eko", "ekonomi"),
    ("geo", "geografi"),
    ("sosio", "sosiologi"),
    ("sej", "sejarah"),
];

const BANK_ALIASES: &[(&str, &str)] = &[
    ("bca", "bank central asia"),
    ("bri", "bank rakyat indonesia"),
    ("bni", "bank negara indonesia"),
    ("btn", "bank tabungan negara"),
    ("bsi", "bank syariah indonesia"),
    ("bjb", "bank pembangunan daerah jawa barat"),
    ("btpn", "bank btpn"),
    ("cimb", "cimb niaga"),
    ("ocbc", "ocbc nisp"),
    ("nisp", "ocbc nisp"),
    ("mandiri", "bank mandiri"),
    ("danamon", "bank danamon"),
    ("permata", "bank permata"),
    ("mega", "bank mega"),
    ("bukopin", "kb bukopin"),
    ("panin", "panin bank"),
    ("maybank", "maybank indonesia"),
    ("jenius", "bank btpn"),
];

const CATEGORY_ALIASES: &[(&str, &str)] = &[
    ("tk", "taman kanak-kanak"),
    ("paud", "pendidikan anak usia dini"),
    ("sd", "sekolah dasar"),
    ("smp", "sekolah menengah pertama"),
    ("sma", "sekolah menengah atas"),
    ("smk", "sekolah menengah kejuruan"),
    ("slb", "sekolah luar biasa"),
    ("mi", "madrasah ibtidaiyah"),
    ("mts", "madrasah tsanawiyah"),
    ("ma", "madrasah aliyah"),
    ("univ", "universitas"),
    ("poltek", "politeknik"),
];

static BUILTIN: LazyLock<AliasRegistry> = LazyLock::new(AliasRegistry::from_builtin_tables);

fn builtin_table(field_type: FieldType) -> &'static [(&'static str, &'static str)] {
    match field_type {
        FieldType::Provinces => PROVINCE_ALIASES,
        FieldType::Cities => CITY_ALIASES,
        FieldType::Subjects => SUBJECT_ALIASES,
        FieldType::Banks => BANK_ALIASES,
        FieldType::Categories => CATEGORY_ALIASES,
    }
}

/// Per-field alias tables.
#[derive(Debug, Clone, Default)]
pub struct AliasRegistry {
    tables: BTreeMap<FieldType, BTreeMap<String, String>>,
}

impl AliasRegistry {
    /// The shared built-in registry, constructed on first use.
    pub fn builtin() -> &'static AliasRegistry {
        &BUILTIN
    }

    /// A registry holding no aliases at all.
    pub fn empty() -> Self {
        Self::default()
    }

    fn from_builtin_tables() -> Self {
        let mut registry = Self::empty();
        for field_type in FieldType::ALL {
            registry.extend(field_type, builtin_table(field_type).iter().copied());
        }
        registry
    }

    /// Adds or replaces entries for one field type.
    ///
    /// Blank keys or targets are ignored.
    pub fn extend<I, K, V>(&mut self, field_type: FieldType, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let table = self.tables.entry(field_type).or_default();
        for (key, target) in entries {
            let key = normalize_text(key.as_ref());
            let target = normalize_text(target.as_ref());
            if key.is_empty() || target.is_empty() {
                continue;
            }
            table.insert(key, target);
        }
    }

    /// Canonical fragment for an abbreviation, if one is registered.
    pub fn lookup(&self, field_type: FieldType, token: &str) -> Option<&str> {
        let key = normalize_text(token);
        self.tables
            .get(&field_type)
            .and_then(|table| table.get(&key))
            .map(String::as_str)
    }

    /// Entries for one field type, sorted by key.
    pub fn entries(&self, field_type: FieldType) -> impl Iterator<Item = (&str, &str)> {
        self.tables
            .get(&field_type)
            .into_iter()
            .flat_map(|table| table.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }

    pub fn len(&self, field_type: FieldType) -> usize {
        self.tables.get(&field_type).map_or(0, BTreeMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.tables.values().all(BTreeMap::is_empty)
    }
}
