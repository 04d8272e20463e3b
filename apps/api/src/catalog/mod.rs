//! Dashboard content: the curated outfit catalog, saved event outfits and
//! trending shades. A template's image URL can be handed straight to a
//! try-on session as its garment source.

pub mod handlers;

use serde::Serialize;

use crate::styling::models::Occasion;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutfitTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub category: Occasion,
    pub image: &'static str,
}

const fn outfit(
    id: &'static str,
    name: &'static str,
    category: Occasion,
    image: &'static str,
) -> OutfitTemplate {
    OutfitTemplate {
        id,
        name,
        category,
        image,
    }
}

pub const OUTFITS: &[OutfitTemplate] = &[
    outfit("beach1", "Boho Maxi Dress", Occasion::Beach, "https://images.unsplash.com/photo-1572804013309-59a88b7e92f1?auto=format&fit=crop&w=600&q=80"),
    outfit("beach2", "Linen Resort Set", Occasion::Beach, "https://images.unsplash.com/photo-1596870230751-ebdfce98ec42?auto=format&fit=crop&w=600&q=80"),
    outfit("beach3", "Summer Kaftan", Occasion::Beach, "https://images.unsplash.com/photo-1585416774997-e5450c2c3b34?auto=format&fit=crop&w=600&q=80"),
    outfit("gym1", "High Impact Set", Occasion::Gym, "https://images.unsplash.com/photo-1518310383802-640c2de311b2?auto=format&fit=crop&w=600&q=80"),
    outfit("gym2", "Yoga Flow", Occasion::Gym, "https://images.unsplash.com/photo-1571019614242-c5c5dee9f50b?auto=format&fit=crop&w=600&q=80"),
    outfit("sport1", "Tennis Whites", Occasion::Sports, "https://images.unsplash.com/photo-1606107557195-0e29a4b5b4aa?auto=format&fit=crop&w=600&q=80"),
    outfit("sport2", "Running Gear", Occasion::Sports, "https://images.unsplash.com/photo-1530549387789-4c1017266635?auto=format&fit=crop&w=600&q=80"),
    outfit("wed1", "Bridal Lehenga", Occasion::Wedding, "https://images.unsplash.com/photo-1595777457583-95e059d581b8?auto=format&fit=crop&w=600&q=80"),
    outfit("wed2", "Sherwani Gold", Occasion::Wedding, "https://images.unsplash.com/photo-1586227740560-8cf2732c1531?auto=format&fit=crop&w=600&q=80"),
    outfit("fest1", "Silk Saree", Occasion::Festival, "https://images.unsplash.com/photo-1610030469983-98e550d6193c?auto=format&fit=crop&w=600&q=80"),
    outfit("fest2", "Kurta Set", Occasion::Festival, "https://images.unsplash.com/photo-1519389950473-47ba0277781c?auto=format&fit=crop&w=600&q=80"),
    outfit("party1", "Sequined Dress", Occasion::Party, "https://images.unsplash.com/photo-1566737236500-c8ac43014a67?auto=format&fit=crop&w=600&q=80"),
    outfit("party2", "Velvet Blazer", Occasion::Party, "https://images.unsplash.com/photo-1507679799987-c73779587ccf?auto=format&fit=crop&w=600&q=80"),
    outfit("cas1", "Linen Summer", Occasion::Casual, "https://images.unsplash.com/photo-1515886657613-9f3515b0c78f?auto=format&fit=crop&w=600&q=80"),
    outfit("cas2", "Denim Jacket", Occasion::Casual, "https://images.unsplash.com/photo-1523381210434-271e8be1f52b?auto=format&fit=crop&w=600&q=80"),
    outfit("form1", "Office Chic", Occasion::Formal, "https://images.unsplash.com/photo-1548271987-55c87b9f16a7?auto=format&fit=crop&w=600&q=80"),
    outfit("form2", "Navy Suit", Occasion::Formal, "https://images.unsplash.com/photo-1487222477894-8943e31ef7b2?auto=format&fit=crop&w=600&q=80"),
];

/// Templates for one occasion, or all of them.
pub fn outfits_for(category: Option<Occasion>) -> Vec<OutfitTemplate> {
    OUTFITS
        .iter()
        .filter(|o| category.map_or(true, |c| o.category == c))
        .cloned()
        .collect()
}

pub fn find_outfit(id: &str) -> Option<&'static OutfitTemplate> {
    OUTFITS.iter().find(|o| o.id == id)
}

/// A look already planned for an upcoming event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SavedOutfit {
    pub id: u32,
    pub event: &'static str,
    pub date: &'static str,
    pub image: &'static str,
    pub notes: &'static str,
}

pub const SAVED_OUTFITS: &[SavedOutfit] = &[
    SavedOutfit {
        id: 1,
        event: "Cousin's Wedding",
        date: "Oct 24",
        image: "https://images.unsplash.com/photo-1595777457583-95e059d581b8?q=80&w=400&auto=format&fit=crop",
        notes: "Gold Lehenga with emeralds",
    },
    SavedOutfit {
        id: 2,
        event: "Tech Conference",
        date: "Nov 05",
        image: "https://images.unsplash.com/photo-1487222477894-8943e31ef7b2?q=80&w=400&auto=format&fit=crop",
        notes: "Power Suit - Navy Blue",
    },
    SavedOutfit {
        id: 3,
        event: "Diwali Party",
        date: "Nov 12",
        image: "https://images.unsplash.com/photo-1519389950473-47ba0277781c?q=80&w=400&auto=format&fit=crop",
        notes: "Classic Silk Saree",
    },
];

/// A trending shade with its mood tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorShade {
    pub name: &'static str,
    pub hex: &'static str,
    pub tag: &'static str,
}

const fn shade(name: &'static str, hex: &'static str, tag: &'static str) -> ColorShade {
    ColorShade { name, hex, tag }
}

pub const COLOR_SHADES: &[ColorShade] = &[
    shade("Royal Blue", "#4169E1", "Power"),
    shade("Emerald", "#50C878", "Harmony"),
    shade("Mustard", "#FFDB58", "Vibrant"),
    shade("Ruby Red", "#E0115F", "Bold"),
    shade("Deep Purple", "#36013F", "Luxury"),
    shade("Terracotta", "#E2725B", "Earthy"),
    shade("Teal", "#008080", "Calm"),
    shade("Champagne", "#F7E7CE", "Elegant"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<_> = OUTFITS.iter().map(|o| o.id).collect();
        assert_eq!(ids.len(), OUTFITS.len());
    }

    #[test]
    fn test_filter_by_category() {
        let beach = outfits_for(Some(Occasion::Beach));
        assert_eq!(beach.len(), 3);
        assert!(beach.iter().all(|o| o.category == Occasion::Beach));
        assert!(outfits_for(Some(Occasion::Birthday)).is_empty());
        assert_eq!(outfits_for(None).len(), OUTFITS.len());
    }

    #[test]
    fn test_shades_are_hex_colours() {
        assert_eq!(COLOR_SHADES.len(), 8);
        assert!(COLOR_SHADES
            .iter()
            .all(|s| s.hex.len() == 7 && s.hex.starts_with('#')));
    }

    #[test]
    fn test_find_outfit() {
        assert_eq!(find_outfit("form2").unwrap().name, "Navy Suit");
        assert!(find_outfit("nope").is_none());
    }
}
