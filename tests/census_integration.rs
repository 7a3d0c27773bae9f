//! End-to-end census behavior over authored world data

use realm_census::aggregate::{recompute_and_store, Census, PercentEntry};
use realm_census::catalog::{CultureRecord, LanguageCatalog};
use realm_census::core::{CensusConfig, EntityId};
use realm_census::world::{load_world_json, RecordDirectory, WorldStore};

fn census_of(store: &WorldStore, catalog: &LanguageCatalog, region: &str) -> realm_census::DerivedStatistics {
    let config = CensusConfig::default();
    Census::new(store, catalog, &config)
        .recompute(&EntityId::from(region))
        .unwrap()
}

fn fraction_of(entries: &[PercentEntry], key: &str) -> f64 {
    entries
        .iter()
        .find(|e| e.key == key)
        .map(|e| e.fraction)
        .unwrap_or(0.0)
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn test_population_weighted_race_blend() {
    let world = load_world_json(
        r#"[
            {"id": "vale", "kind": "region", "subordinate_ids": ["a", "b"]},
            {"id": "a", "kind": "settlement", "population": 100, "race_distribution": [{"key": "Human", "percent": 100}]},
            {"id": "b", "kind": "settlement", "population": 300, "race_distribution": [{"key": "Elf", "percent": 100}]}
        ]"#,
    )
    .unwrap();

    let stats = census_of(&world, &LanguageCatalog::new(), "vale");
    assert_eq!(stats.total_population, 400);
    assert_eq!(
        stats.race_distribution,
        vec![PercentEntry::new("Elf", 0.75), PercentEntry::new("Human", 0.25)]
    );
}

#[test]
fn test_single_culture_fallback() {
    let world = load_world_json(
        r#"[
            {"id": "coast", "kind": "region", "subordinate_ids": ["port"]},
            {"id": "port", "kind": "settlement", "population": 50, "culture_distribution": null, "culture": "Coastal"}
        ]"#,
    )
    .unwrap();

    let stats = census_of(&world, &LanguageCatalog::new(), "coast");
    assert_eq!(stats.culture_distribution, vec![PercentEntry::new("Coastal", 1.0)]);
}

#[test]
fn test_language_from_residents_without_catalog() {
    let world = load_world_json(
        r#"[
            {"id": "r", "kind": "region", "subordinate_ids": ["town"]},
            {"id": "town", "kind": "settlement", "population": 50, "culture": "Coastal",
             "character_languages": [["Common"], ["Common", "Elvish"]]}
        ]"#,
    )
    .unwrap();

    let stats = census_of(&world, &LanguageCatalog::new(), "r");
    let languages = &stats.language_distribution;
    assert_eq!(languages[0].key, "Common");
    assert!(approx(fraction_of(languages, "Common"), 2.0 / 3.0));
    assert!(approx(fraction_of(languages, "Elvish"), 1.0 / 3.0));
}

#[test]
fn test_language_from_catalog_beats_residents() {
    let world = load_world_json(
        r#"[
            {"id": "r", "kind": "region", "subordinate_ids": ["town", "village"]},
            {"id": "town", "kind": "settlement", "population": 75,
             "culture_distribution": [{"key": "Coastal", "percent": 100}],
             "character_languages": [["Elvish"]]},
            {"id": "village", "kind": "settlement", "population": 25, "culture": "Highland",
             "character_languages": [["Elvish"]]}
        ]"#,
    )
    .unwrap();
    let catalog = LanguageCatalog::from_records([
        CultureRecord {
            id: "coastal".to_string(),
            name: None,
            primary_language: Some("Seaspeak".to_string()),
        },
        CultureRecord {
            id: "highland".to_string(),
            name: None,
            primary_language: Some("Old Tongue".to_string()),
        },
    ]);

    let stats = census_of(&world, &catalog, "r");
    assert_eq!(
        stats.language_distribution,
        vec![
            PercentEntry::new("Seaspeak", 0.75),
            PercentEntry::new("Old Tongue", 0.25)
        ]
    );
}

#[test]
fn test_terrain_area_weighting() {
    let world = load_world_json(
        r#"[
            {"id": "wilds", "kind": "region", "subordinate_ids": ["wood", "sands"]},
            {"id": "wood", "kind": "unpopulated", "terrain": "Forest", "area_weight": 10},
            {"id": "sands", "kind": "unpopulated", "terrain": "Desert", "area_weight": 30}
        ]"#,
    )
    .unwrap();

    let stats = census_of(&world, &LanguageCatalog::new(), "wilds");
    assert_eq!(
        stats.terrain_breakdown,
        vec![PercentEntry::new("Desert", 0.75), PercentEntry::new("Forest", 0.25)]
    );
    assert_eq!(stats.dominant_terrain, vec!["Desert", "Forest"]);
    assert_eq!(stats.total_population, 0);
}

#[test]
fn test_huge_area_weights_still_normalize() {
    let world = load_world_json(
        r#"[
            {"id": "wilds", "kind": "region", "subordinate_ids": ["wood", "sands"]},
            {"id": "wood", "kind": "unpopulated", "terrain": "Forest", "area_weight": 1e308},
            {"id": "sands", "kind": "unpopulated", "terrain": "Desert", "area_weight": 1e308}
        ]"#,
    )
    .unwrap();

    let stats = census_of(&world, &LanguageCatalog::new(), "wilds");
    assert_eq!(
        stats.terrain_breakdown,
        vec![PercentEntry::new("Forest", 0.5), PercentEntry::new("Desert", 0.5)]
    );
}

#[test]
fn test_entry_naming_its_key_twice() {
    let world = load_world_json(
        r#"[
            {"id": "vale", "kind": "region", "subordinate_ids": ["a", "b"]},
            {"id": "a", "kind": "settlement", "population": 300,
             "race_distribution": [{"id": "elf", "name": "Elf", "percent": 100}]},
            {"id": "b", "kind": "settlement", "population": 100,
             "race_distribution": [{"key": "Human", "name": "Humans", "percent": 100, "value": 5}]}
        ]"#,
    )
    .unwrap();

    let stats = census_of(&world, &LanguageCatalog::new(), "vale");
    assert_eq!(
        stats.race_distribution,
        vec![PercentEntry::new("Elf", 0.75), PercentEntry::new("Human", 0.25)]
    );
}

#[test]
fn test_empty_region() {
    let world = load_world_json(r#"[{"id": "void", "kind": "region"}]"#).unwrap();
    let stats = census_of(&world, &LanguageCatalog::new(), "void");
    assert_eq!(stats.total_population, 0);
    assert!(stats.race_distribution.is_empty());
    assert!(stats.culture_distribution.is_empty());
    assert!(stats.language_distribution.is_empty());
    assert!(stats.terrain_breakdown.is_empty());
    assert!(stats.dominant_terrain.is_empty());
}

#[test]
fn test_malformed_fields_are_coverage_gaps() {
    let world = load_world_json(
        r#"[
            {"id": "r", "kind": "region", "subordinate_ids": ["a", "b", "ghost"]},
            {"id": "a", "kind": "settlement", "population": "lots",
             "race_distribution": [{"key": "Human", "percent": "n/a"}]},
            {"id": "b", "kind": "point_of_interest", "population": 20,
             "race_distribution": [{"key": "Dwarf", "percent": 100}, {"key": "", "percent": 50}, {"key": "Orc", "percent": -10}]}
        ]"#,
    )
    .unwrap();

    let stats = census_of(&world, &LanguageCatalog::new(), "r");
    assert_eq!(stats.total_population, 20);
    assert_eq!(stats.race_distribution, vec![PercentEntry::new("Dwarf", 1.0)]);
}

#[test]
fn test_keys_merge_case_insensitively() {
    let world = load_world_json(
        r#"[
            {"id": "r", "kind": "region", "subordinate_ids": ["a", "b"]},
            {"id": "a", "kind": "settlement", "population": 10, "race_distribution": [{"key": "Human", "percent": 1.0}]},
            {"id": "b", "kind": "settlement", "population": 10, "race_distribution": [{"key": "human", "percent": 1.0}]}
        ]"#,
    )
    .unwrap();

    let stats = census_of(&world, &LanguageCatalog::new(), "r");
    assert_eq!(stats.race_distribution, vec![PercentEntry::new("Human", 1.0)]);
}

#[test]
fn test_write_back_to_world_and_reload() {
    let mut world = load_world_json(
        r#"{"entities": [
            {"id": "r", "kind": "region", "subordinate_ids": ["a"]},
            {"id": "a", "kind": "settlement", "population": 12, "race_distribution": [{"key": "Halfling", "percent": 100}]}
        ]}"#,
    )
    .unwrap();
    let config = CensusConfig::default();
    let id = EntityId::from("r");

    let stats = recompute_and_store(&mut world, &LanguageCatalog::new(), &config, &id).unwrap();
    let reloaded = load_world_json(&world.to_json().unwrap()).unwrap();
    assert_eq!(reloaded.get(&id).unwrap().statistics(), Some(&stats));
}

#[test]
fn test_record_directory_census() {
    let dir = tempfile::tempdir().unwrap();
    let records = [
        ("r.json", r#"{"id": "r", "kind": "region", "subordinate_ids": ["inner", "a"]}"#),
        ("inner.json", r#"{"id": "inner", "kind": "region", "subordinate_ids": ["r", "b"]}"#),
        ("a.json", r#"{"id": "a", "kind": "settlement", "population": 100, "race_distribution": [{"key": "Human", "percent": 100}]}"#),
        ("b.json", r#"{"id": "b", "kind": "settlement", "population": 300, "race_distribution": [{"key": "Elf", "percent": 100}]}"#),
    ];
    for (name, content) in records {
        std::fs::write(dir.path().join(name), content).unwrap();
    }
    let mut store = RecordDirectory::open(dir.path()).unwrap();
    let config = CensusConfig::default();
    let id = EntityId::from("r");

    let stats = recompute_and_store(&mut store, &LanguageCatalog::new(), &config, &id).unwrap();
    assert_eq!(stats.total_population, 400);

    let saved = std::fs::read_to_string(dir.path().join("r.json")).unwrap();
    let saved: serde_json::Value = serde_json::from_str(&saved).unwrap();
    assert_eq!(saved["statistics"]["total_population"], 400);
    assert_eq!(saved["statistics"]["race_distribution"][0]["key"], "Elf");
}

#[test]
fn test_broken_record_surfaces_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("r.json"),
        r#"{"id": "r", "kind": "region", "subordinate_ids": ["bad"]}"#,
    )
    .unwrap();
    std::fs::write(dir.path().join("bad.json"), "{ not json").unwrap();
    let store = RecordDirectory::open(dir.path()).unwrap();
    let config = CensusConfig::default();
    let catalog = LanguageCatalog::new();

    let result = Census::new(&store, &catalog, &config).recompute(&EntityId::from("r"));
    assert!(matches!(
        result,
        Err(realm_census::CensusError::RecordError { .. })
    ));
}
