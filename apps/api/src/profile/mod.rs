//! User profile — the single local user's styling preferences and default
//! measurements. In-memory only; new try-on sessions start from it.

pub mod handlers;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::assets::ImageAsset;
use crate::styling::models::{Measurements, SkinTone};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub age: String,
    pub birthday: String,
    /// Data URI of the profile picture.
    pub profile_picture: Option<String>,
    pub skin_tone: SkinTone,
    pub style_preferences: Vec<String>,
    pub favorite_colors: Vec<String>,
    pub default_measurements: Measurements,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: "Dara Anna".to_string(),
            age: "24".to_string(),
            birthday: "1999-08-15".to_string(),
            profile_picture: None,
            skin_tone: SkinTone::Wheatish,
            style_preferences: vec![
                "Minimalist".to_string(),
                "Indo-Western".to_string(),
                "Streetwear".to_string(),
            ],
            favorite_colors: vec!["Black".to_string(), "Navy".to_string(), "Emerald".to_string()],
            default_measurements: Measurements {
                height: "175".to_string(),
                weight: "70".to_string(),
                chest: "96".to_string(),
                waist: "80".to_string(),
                hips: "95".to_string(),
            },
        }
    }
}

impl UserProfile {
    /// Checks that the picture, when set, is a decodable image data URI.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name cannot be empty".to_string());
        }
        if let Some(picture) = &self.profile_picture {
            ImageAsset::from_data_uri(picture)
                .map_err(|e| format!("profile_picture is not a valid image: {e}"))?;
        }
        Ok(())
    }
}

/// Colours recommended for a skin tone, with a one-line rationale.
#[derive(Debug, Clone, Serialize)]
pub struct Palette {
    pub skin_tone: SkinTone,
    pub colors: &'static [&'static str],
    pub description: &'static str,
}

pub fn palette_for(skin_tone: SkinTone) -> Palette {
    let (colors, description): (&'static [&'static str], &'static str) = match skin_tone {
        SkinTone::Fair => (
            &["#E6E6FA", "#FFB6C1", "#50C878", "#000080", "#40E0D0"],
            "Pastels, jewel tones, and cool blues complement fair skin perfectly.",
        ),
        SkinTone::Wheatish => (
            &["#FFD700", "#DC143C", "#008080", "#F5DEB3", "#FF7F50"],
            "Warm earth tones, golds, and vibrant reds bring out the glow in wheatish skin.",
        ),
        SkinTone::Medium => (
            &["#B8860B", "#800000", "#4169E1", "#D2691E", "#556B2F"],
            "Deep metallics, ochre, and royal blues create a striking contrast.",
        ),
        SkinTone::Dusky => (
            &["#FF00FF", "#FF4500", "#2E8B57", "#4B0082", "#C71585"],
            "Bold, saturated colors like magenta, emerald, and cobalt look stunning.",
        ),
        SkinTone::Dark => (
            &["#FFFF00", "#FFFFFF", "#0000FF", "#800080", "#FF0000"],
            "High contrast colors like bright yellow, white, and rich violet pop beautifully.",
        ),
    };
    Palette {
        skin_tone,
        colors,
        description,
    }
}

#[derive(Clone, Default)]
pub struct ProfileStore {
    inner: Arc<RwLock<UserProfile>>,
}

impl ProfileStore {
    pub async fn get(&self) -> UserProfile {
        self.inner.read().await.clone()
    }

    pub async fn replace(&self, profile: UserProfile) {
        *self.inner.write().await = profile;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_skin_tone_has_five_colour_palette() {
        for tone in SkinTone::ALL {
            let palette = palette_for(tone);
            assert_eq!(palette.colors.len(), 5);
            assert!(palette.colors.iter().all(|c| c.starts_with('#') && c.len() == 7));
        }
    }

    #[test]
    fn test_validate_rejects_bad_picture() {
        let profile = UserProfile {
            profile_picture: Some("https://example.com/me.jpg".to_string()),
            ..UserProfile::default()
        };
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_default() {
        assert!(UserProfile::default().validate().is_ok());
    }

    #[tokio::test]
    async fn test_store_replace() {
        let store = ProfileStore::default();
        let mut profile = store.get().await;
        profile.skin_tone = SkinTone::Dark;
        store.replace(profile.clone()).await;
        assert_eq!(store.get().await, profile);
    }
}
