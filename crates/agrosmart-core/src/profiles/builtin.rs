use super::schema::CropProfileSet;
use std::sync::LazyLock;

const CROP_PROFILES_JSON: &str = include_str!("../../../../rules/crop-profiles.json");

static BUILTIN_PROFILES: LazyLock<CropProfileSet> = LazyLock::new(|| {
    serde_json::from_str(CROP_PROFILES_JSON).expect("embedded crop-profiles.json is valid")
});

/// Get the built-in crop profile set.
pub fn builtin_profiles() -> &'static CropProfileSet {
    &BUILTIN_PROFILES
}
