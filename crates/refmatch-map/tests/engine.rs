use refmatch_map::{
    FieldMatcher, MatcherConfig, classify, find_bank_matches, find_category_matches,
    find_city_matches, find_matches, find_subject_matches,
};
use refmatch_model::{CandidateRecord, Decision, DecisionTier, FieldType, MatchType};

fn cities() -> Vec<CandidateRecord> {
    vec![
        CandidateRecord::new("3404", "Kabupaten Sleman"),
        CandidateRecord::new("3471", "Kota Yogyakarta"),
        CandidateRecord::new("3273", "Kota Bandung"),
        CandidateRecord::new("3578", "Kota Surabaya"),
        CandidateRecord::new("3374", "Kota Semarang"),
    ]
}

fn banks() -> Vec<CandidateRecord> {
    vec![
        CandidateRecord::new("014", "Bank Central Asia").with_alternate_name("BCA"),
        CandidateRecord::new("002", "Bank Rakyat Indonesia"),
        CandidateRecord::new("147", "Bank Muamalat Indonesia"),
        CandidateRecord::new("008", "PT Bank Mandiri (Persero) Tbk"),
        CandidateRecord::new("009", "Bank Negara Indonesia"),
    ]
}

#[test]
fn alias_resolves_city_slang() {
    let matches = find_city_matches("jogja", &cities());
    let top = matches.first().expect("jogja should match");
    assert_eq!(top.name, "Kota Yogyakarta");
    assert!(top.similarity >= 95);
    assert_eq!(top.match_type, MatchType::Alias);
}

#[test]
fn bare_alias_target_matches_too() {
    let candidates = vec![CandidateRecord::new("y", "Yogyakarta")];
    let matches = find_matches("Jogja", &candidates, FieldType::Cities);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].match_type, MatchType::Alias);
}

#[test]
fn bank_boilerplate_is_stripped() {
    let matches = find_bank_matches("Muamalat", &banks());
    let top = matches.first().expect("muamalat should match");
    assert_eq!(top.id, "147");
    assert!(top.similarity >= 85, "got {}", top.similarity);
    assert!(classify(&matches).is_automatic());
}

#[test]
fn locative_nouns_are_stripped() {
    let sleman = find_city_matches("Sleman", &cities());
    assert_eq!(sleman[0].name, "Kabupaten Sleman");
    assert!(sleman[0].similarity >= 85);

    let kab_sleman = find_city_matches("Kab Sleman", &cities());
    assert_eq!(kab_sleman[0].name, "Kabupaten Sleman");
    assert!(kab_sleman[0].similarity >= 85);
}

#[test]
fn district_with_direction_does_not_steal_bare_name() {
    let candidates = vec![
        CandidateRecord::new("3217", "Kabupaten Bandung Barat"),
        CandidateRecord::new("3204", "Kabupaten Bandung"),
    ];
    for term in ["Bandung", "Kab Bandung"] {
        let matches = find_city_matches(term, &candidates);
        assert_eq!(matches[0].id, "3204", "wrong top match for {term}");
        assert!(matches[0].similarity > matches[1].similarity);
        let decision = classify(&matches);
        assert_eq!(decision.chosen().map(|m| m.id.as_str()), Some("3204"));
    }
}

#[test]
fn code_on_alternate_name_is_exact() {
    let matches = find_bank_matches("BCA", &banks());
    assert_eq!(matches[0].id, "014");
    assert_eq!(matches[0].similarity, 100);
    assert_eq!(matches[0].match_type, MatchType::Exact);
    assert_eq!(classify(&matches).tier(), DecisionTier::AutoAccept);
}

#[test]
fn typo_is_auto_corrected() {
    let matches = find_city_matches("Surabya", &cities());
    assert_eq!(matches[0].name, "Kota Surabaya");
    assert_eq!(matches[0].similarity, 90);
    assert_eq!(classify(&matches).tier(), DecisionTier::AutoCorrected);
}

#[test]
fn subject_and_category_abbreviations() {
    let subjects = vec![
        CandidateRecord::new("s1", "Matematika"),
        CandidateRecord::new("s2", "Bahasa Indonesia"),
    ];
    let matches = find_subject_matches("MTK", &subjects);
    assert_eq!(matches[0].id, "s1");
    assert_eq!(matches[0].match_type, MatchType::Alias);

    let levels = vec![
        CandidateRecord::new("l1", "Sekolah Menengah Pertama"),
        CandidateRecord::new("l2", "Sekolah Menengah Atas"),
    ];
    let matches = find_category_matches("sma", &levels);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].id, "l2");
}

#[test]
fn empty_inputs_yield_empty_results() {
    assert!(find_matches("", &cities(), FieldType::Cities).is_empty());
    assert!(find_matches("bandung", &[], FieldType::Cities).is_empty());
    assert_eq!(classify(&[]), Decision::Reject);
}

#[test]
fn output_is_sorted_and_above_floor() {
    for term in ["kota", "bandung", "semarng", "sleman", "kab"] {
        let matches = find_city_matches(term, &cities());
        assert!(
            matches
                .windows(2)
                .all(|pair| pair[0].similarity >= pair[1].similarity),
            "unsorted output for {term}"
        );
        assert!(matches.iter().all(|m| m.similarity > 50));
    }
}

#[test]
fn repeated_queries_are_identical() {
    let first = find_bank_matches("bank mandri", &banks());
    let second = find_bank_matches("bank mandri", &banks());
    assert_eq!(first, second);
    let json_a = serde_json::to_string(&first).expect("serialize");
    let json_b = serde_json::to_string(&second).expect("serialize");
    assert_eq!(json_a, json_b);
}

#[test]
fn bdg_end_to_end() {
    let candidates = vec![
        CandidateRecord::new("c-1", "Bandung"),
        CandidateRecord::new("c-2", "Surabaya"),
    ];
    let matches = find_city_matches("bdg", &candidates);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].similarity, 95);
    assert_eq!(matches[0].match_type, MatchType::Alias);

    let decision = classify(&matches);
    assert_eq!(decision.tier(), DecisionTier::AutoCorrected);
    assert_eq!(decision.chosen().map(|m| m.name.as_str()), Some("Bandung"));
}

#[test]
fn configured_alias_changes_outcome() {
    let candidates = vec![CandidateRecord::new("b-1", "Bank Raya Indonesia")];
    assert!(find_bank_matches("bri agro", &candidates).is_empty());

    let config: MatcherConfig = toml::from_str(
        r#"
        [aliases.banks]
        "bri agro" = "bank raya"
        "#,
    )
    .expect("parse config");
    let matcher = FieldMatcher::from_config(&config).expect("valid config");
    let resolution = matcher.resolve("BRI Agro", &candidates, FieldType::Banks);
    assert_eq!(resolution.matches[0].match_type, MatchType::Alias);
    assert_eq!(resolution.decision.tier(), DecisionTier::AutoCorrected);
}

#[test]
fn parallel_queries_agree_with_sequential() {
    let matcher = FieldMatcher::default();
    let terms = ["jogja", "Sleman", "Surabya", "Kota Bandung", "smg", "zzz"];
    let candidates = cities();
    let sequential: Vec<_> = terms
        .iter()
        .map(|t| matcher.find_matches(t, &candidates, FieldType::Cities))
        .collect();
    let parallel: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = terms
            .iter()
            .map(|t| {
                let matcher = &matcher;
                let candidates = &candidates;
                scope.spawn(move || matcher.find_matches(t, candidates, FieldType::Cities))
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("worker panicked"))
            .collect()
    });
    assert_eq!(sequential, parallel);
}
