//! Voice pack manifest: the declarative source of truth for every pack.
//!
//! The manifest is a JSON file listing each pack and the default pack id.
//! Every mutation goes through [`upsert`], which re-checks the registry
//! invariants before the caller persists anything with [`save`].

mod registry;
mod store;
mod types;
mod upsert;

pub use registry::{
    ensure_const_names_present, ensure_unique_const_names, ensure_unique_ids, validate,
};
pub use store::{load, save};
pub use types::{Manifest, ManifestError, PackEntry};
pub use upsert::{DIGIT_PREFIX, PLACEHOLDER_CONST_NAME, PackUpdate, sanitize_const_name, upsert};

pub(crate) use store::write_atomic;

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn pack(id: &str, const_name: &str) -> PackEntry {
        PackEntry {
            id: id.to_string(),
            const_name: const_name.to_string(),
            display_name: id.to_uppercase(),
            description: String::new(),
            asset_dir: id.to_string(),
            voice_id: None,
            extra: Default::default(),
        }
    }

    fn storm_manifest() -> Manifest {
        Manifest {
            default_pack_id: "storm".to_string(),
            packs: vec![PackEntry {
                id: "storm".to_string(),
                const_name: "STORM".to_string(),
                display_name: "Storm".to_string(),
                description: "Sharp dramatic narration".to_string(),
                asset_dir: "storm".to_string(),
                voice_id: Some("voice-123".to_string()),
                extra: Default::default(),
            }],
            extra: Default::default(),
        }
    }

    // ===========================================
    // Store
    // ===========================================

    #[test]
    fn test_load_missing_file_returns_empty_manifest() {
        let temp_dir = TempDir::new().unwrap();
        let manifest = load(&temp_dir.path().join("voice_packs.json")).unwrap();

        assert_eq!(manifest.default_pack_id, "");
        assert!(manifest.packs.is_empty());
    }

    #[test]
    fn test_load_malformed_json_is_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("voice_packs.json");
        std::fs::write(&path, "{ not json").unwrap();

        let result = load(&path);
        assert!(matches!(result.unwrap_err(), ManifestError::Parse { .. }));
    }

    #[test]
    fn test_save_creates_parent_dirs_and_round_trips() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("scripts").join("voice_packs.json");
        let manifest = storm_manifest();

        save(&path, &manifest).unwrap();
        let loaded = load(&path).unwrap();

        assert_eq!(loaded, manifest);
        assert!(!path.with_file_name("voice_packs.json.tmp").exists());
    }

    #[test]
    fn test_save_is_pretty_printed_with_trailing_newline() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("voice_packs.json");

        save(&path, &storm_manifest()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();

        assert!(text.ends_with("}\n"));
        assert!(text.starts_with("{\n  \"default_pack_id\": \"storm\",\n  \"packs\": ["));
        let id_pos = text.find("\"id\"").unwrap();
        let const_pos = text.find("\"const_name\"").unwrap();
        let voice_pos = text.find("\"voice_id\"").unwrap();
        assert!(id_pos < const_pos && const_pos < voice_pos);
    }

    #[test]
    fn test_save_omits_unset_voice_id() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("voice_packs.json");
        let mut manifest = storm_manifest();
        manifest.packs[0].voice_id = None;

        save(&path, &manifest).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();

        assert!(!text.contains("voice_id"));
    }

    #[test]
    fn test_unknown_keys_survive_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("voice_packs.json");
        let json = r#"{
  "default_pack_id": "storm",
  "notes": "hand edited",
  "packs": [
    {"id": "storm", "display_name": "Storm", "language": "en"}
  ]
}"#;
        std::fs::write(&path, json).unwrap();

        let manifest = load(&path).unwrap();
        assert_eq!(manifest.packs[0].const_name, "");
        assert_eq!(manifest.packs[0].asset_dir(), "storm");

        save(&path, &manifest).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"notes\": \"hand edited\""));
        assert!(text.contains("\"language\": \"en\""));
    }

    #[test]
    fn test_failed_save_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("voice_packs.json");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("occupied"), "x").unwrap();

        let err = save(&path, &storm_manifest()).unwrap_err();

        assert!(matches!(err, ManifestError::Io { .. }));
        assert!(!temp_dir.path().join("voice_packs.json.tmp").exists());
        assert!(path.is_dir());
    }

    // ===========================================
    // Registry
    // ===========================================

    #[test]
    fn test_unique_ids_pass() {
        let packs = vec![pack("storm", "STORM"), pack("rain", "RAIN")];
        assert!(ensure_unique_ids(&packs).is_ok());
        assert!(ensure_unique_const_names(&packs).is_ok());
    }

    #[test]
    fn test_duplicate_id_reports_first_repeat() {
        let packs = vec![
            pack("storm", "STORM"),
            pack("rain", "RAIN"),
            pack("rain", "RAIN_2"),
            pack("storm", "STORM_2"),
        ];

        let err = ensure_unique_ids(&packs).unwrap_err();
        assert!(matches!(err, ManifestError::DuplicateId(ref id) if id == "rain"));
    }

    #[test]
    fn test_duplicate_const_name_fails() {
        let packs = vec![pack("storm", "WEATHER"), pack("rain", "WEATHER")];

        let err = ensure_unique_const_names(&packs).unwrap_err();
        assert!(matches!(err, ManifestError::DuplicateConstName(ref name) if name == "WEATHER"));
    }

    #[test]
    fn test_blank_const_name_is_rejected() {
        let packs = vec![pack("storm", "STORM"), pack("rain", ""), pack("wind", " ")];

        let err = ensure_const_names_present(&packs).unwrap_err();
        assert!(matches!(err, ManifestError::MissingConstName(ref id) if id == "rain"));
        assert_eq!(err.to_string(), "Pack rain has no const_name");
    }

    #[test]
    fn test_validate_rejects_loaded_pack_without_const_name() {
        let manifest: Manifest = serde_json::from_str(
            r#"{"default_pack_id":"storm","packs":[{"id":"storm","display_name":"Storm"}]}"#,
        )
        .unwrap();

        let err = validate(&manifest).unwrap_err();
        assert!(matches!(err, ManifestError::MissingConstName(ref id) if id == "storm"));
    }

    // ===========================================
    // Sanitization
    // ===========================================

    #[test]
    fn test_sanitize_collapses_and_uppercases() {
        let name = sanitize_const_name("rain-bird 2");

        assert_eq!(name, "RAIN_BIRD_2");
        assert!(!name.is_empty());
        assert!(!name.starts_with(|c: char| c.is_ascii_digit()));
        assert!(name.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_'));
    }

    #[test]
    fn test_sanitize_trims_edge_underscores() {
        assert_eq!(sanitize_const_name("--dramatic__en--"), "DRAMATIC_EN");
    }

    #[test]
    fn test_sanitize_leading_digit_gets_prefix() {
        assert_eq!(sanitize_const_name("7 seas"), "PACK_7_SEAS");
    }

    #[test]
    fn test_sanitize_empty_result_uses_placeholder() {
        assert_eq!(sanitize_const_name("!!!"), PLACEHOLDER_CONST_NAME);
        assert_eq!(sanitize_const_name(""), PLACEHOLDER_CONST_NAME);
    }

    // ===========================================
    // Upsert
    // ===========================================

    #[test]
    fn test_upsert_new_pack_requires_display_name() {
        let mut manifest = Manifest::default();

        let err = upsert(&mut manifest, &PackUpdate::new("storm")).unwrap_err();

        assert!(matches!(err, ManifestError::MissingField("display_name")));
        assert!(manifest.packs.is_empty());
    }

    #[test]
    fn test_upsert_requires_pack_id() {
        let mut manifest = Manifest::default();

        let err = upsert(&mut manifest, &PackUpdate::new("").with_display_name("X")).unwrap_err();
        assert!(matches!(err, ManifestError::MissingField("pack_id")));
    }

    #[test]
    fn test_upsert_new_pack_applies_defaults() {
        let mut manifest = Manifest::default();

        upsert(
            &mut manifest,
            &PackUpdate::new("rain-bird 2").with_display_name("Rainbird"),
        )
        .unwrap();

        assert_eq!(manifest.packs.len(), 1);
        let created = &manifest.packs[0];
        assert_eq!(created.const_name, "RAIN_BIRD_2");
        assert_eq!(created.asset_dir, "rain-bird 2");
        assert_eq!(created.description, "");
        assert_eq!(created.voice_id, None);
        assert_eq!(manifest.default_pack_id, "rain-bird 2");
    }

    #[test]
    fn test_upsert_appends_exactly_one_entry() {
        let mut manifest = storm_manifest();

        upsert(
            &mut manifest,
            &PackUpdate::new("wizard")
                .with_display_name("Wizard")
                .with_voice_id("abc")
                .with_asset_dir("wizard_en"),
        )
        .unwrap();

        assert_eq!(manifest.packs.len(), 2);
        assert_eq!(manifest.packs[1].id, "wizard");
        assert_eq!(manifest.packs[1].asset_dir, "wizard_en");
        assert_eq!(manifest.packs[1].voice_id.as_deref(), Some("abc"));
        assert_eq!(manifest.default_pack_id, "storm");
    }

    #[test]
    fn test_upsert_existing_only_touches_supplied_fields() {
        let mut manifest = storm_manifest();
        let before = manifest.packs[0].clone();

        upsert(
            &mut manifest,
            &PackUpdate::new("storm").with_display_name("Storm Front"),
        )
        .unwrap();

        let after = &manifest.packs[0];
        assert_eq!(after.display_name, "Storm Front");
        assert_eq!(after.const_name, before.const_name);
        assert_eq!(after.description, before.description);
        assert_eq!(after.asset_dir, before.asset_dir);
        assert_eq!(after.voice_id, before.voice_id);
    }

    #[test]
    fn test_upsert_backfills_missing_const_name() {
        let mut manifest = storm_manifest();
        manifest.packs[0].const_name = String::new();

        upsert(&mut manifest, &PackUpdate::new("storm")).unwrap();

        assert_eq!(manifest.packs[0].const_name, "STORM");
    }

    #[test]
    fn test_upsert_set_default() {
        let mut manifest = storm_manifest();

        upsert(
            &mut manifest,
            &PackUpdate::new("wizard").with_display_name("Wizard").as_default(),
        )
        .unwrap();

        assert_eq!(manifest.default_pack_id, "wizard");
    }

    #[test]
    fn test_upsert_const_name_collision_leaves_manifest_untouched() {
        let mut manifest = storm_manifest();
        let before = manifest.clone();

        let err = upsert(
            &mut manifest,
            &PackUpdate::new("storm-2")
                .with_display_name("Storm again")
                .with_const_name("STORM"),
        )
        .unwrap_err();

        assert!(matches!(err, ManifestError::DuplicateConstName(_)));
        assert_eq!(manifest, before);
    }

    #[test]
    fn test_upsert_fails_when_another_pack_lacks_const_name() {
        let mut manifest = storm_manifest();
        manifest.packs.push(pack("rain", ""));
        let before = manifest.clone();

        let err = upsert(
            &mut manifest,
            &PackUpdate::new("wind").with_display_name("Wind"),
        )
        .unwrap_err();

        assert!(matches!(err, ManifestError::MissingConstName(ref id) if id == "rain"));
        assert_eq!(manifest, before);
    }

    #[test]
    fn test_duplicate_ids_fail_before_persistence() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("voice_packs.json");
        let mut manifest = storm_manifest();
        manifest.packs.push(pack("storm", "STORM_AGAIN"));

        let result = upsert(&mut manifest, &PackUpdate::new("storm"));

        assert!(matches!(result.unwrap_err(), ManifestError::DuplicateId(_)));
        assert!(!path.exists());
    }
}
