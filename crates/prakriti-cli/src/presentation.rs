//! Per-category display details: colours and descriptive text.

use comfy_table::Color;
use prakriti_core::model::Category;

/// How the shell presents one category.
pub struct CategoryStyle {
    pub color: Color,
    pub element: &'static str,
    pub qualities: &'static str,
    pub characteristics: &'static str,
    pub imbalance: &'static str,
}

pub fn style(category: Category) -> &'static CategoryStyle {
    match category {
        Category::Vata => &VATA,
        Category::Pitta => &PITTA,
        Category::Kapha => &KAPHA,
    }
}

static VATA: CategoryStyle = CategoryStyle {
    color: Color::Rgb {
        r: 0x9C,
        g: 0x27,
        b: 0xB0,
    },
    element: "Air & Space",
    qualities: "Light, Dry, Cold, Rough, Subtle, Mobile",
    characteristics: "Creative, energetic, quick-thinking, adaptable",
    imbalance: "Anxiety, restlessness, digestive issues, insomnia",
};

static PITTA: CategoryStyle = CategoryStyle {
    color: Color::Rgb {
        r: 0xFF,
        g: 0x57,
        b: 0x22,
    },
    element: "Fire & Water",
    qualities: "Hot, Sharp, Light, Oily, Liquid, Mobile",
    characteristics: "Intelligent, focused, ambitious, organized",
    imbalance: "Anger, inflammation, heartburn, skin issues",
};

static KAPHA: CategoryStyle = CategoryStyle {
    color: Color::Rgb {
        r: 0x4C,
        g: 0xAF,
        b: 0x50,
    },
    element: "Earth & Water",
    qualities: "Heavy, Slow, Cold, Oily, Smooth, Stable",
    characteristics: "Calm, loving, patient, stable, strong",
    imbalance: "Lethargy, weight gain, congestion, depression",
};
