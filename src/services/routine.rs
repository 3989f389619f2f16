use crate::models::{RoutineStep, SkinType};

const fn step(name: &'static str, queries: &'static [&'static str]) -> RoutineStep {
    RoutineStep { name, queries }
}

const NORMAL: [RoutineStep; 5] = [
    step("Cleanser", &["Gentle Milk Cleanser", "pH Balanced Foaming Cleanser"]),
    step("Toner", &["Hydrating Toner with Hyaluronic Acid", "Rose Water Toner"]),
    step("Moisturizer", &["Lightweight Gel Cream", "Ceramide Moisturizer"]),
    step("Serum", &["Vitamin C Serum", "Niacinamide Serum"]),
    step("Sunscreen", &["SPF 50 PA+++ Sunscreen", "Invisible Sunscreen Gel"]),
];

const DRY: [RoutineStep; 5] = [
    step("Cleanser", &["Creamy Hydrating Cleanser", "Oil-based Cleanser"]),
    step("Serum", &["Hyaluronic Acid Serum", "Squalane Serum"]),
    step("Moisturizer", &["Rich Cream with Shea Butter", "Barrier Repair Cream"]),
    step("Treatment", &["Facial Oil Blend", "Sleeping Mask"]),
    step("Sunscreen", &["SPF 50 Cream Sunscreen", "Moisturizing Sunscreen"]),
];

const OILY: [RoutineStep; 5] = [
    step("Cleanser", &["Salicylic Acid Cleanser", "Charcoal Detox Cleanser"]),
    step("Toner", &["Witch Hazel Toner", "Tea Tree Toner"]),
    step("Moisturizer", &["Oil-Free Gel Moisturizer", "Sebum Control Cream"]),
    step("Serum", &["Niacinamide + Zinc Serum", "Retinol Serum"]),
    step("Sunscreen", &["Matte Finish Sunscreen", "Oil-Control Sunscreen"]),
];

const COMBINATION: [RoutineStep; 5] = [
    step("Cleanser", &["Balancing Gel Cleanser", "Micellar Gel Wash"]),
    step("Toner", &["pH Balancing Toner", "Lotion Toner"]),
    step("Moisturizer", &["Dual Hydration Cream", "Zone-Control Moisturizer"]),
    step("Serum", &["Hyaluronic Acid + Niacinamide", "Snail Mucin Essence"]),
    step("Sunscreen", &["Lightweight Fluid Sunscreen", "Cream-Gel Hybrid Sunscreen"]),
];

const SENSITIVE: [RoutineStep; 5] = [
    step("Cleanser", &["Fragrance-Free Cleanser", "Thermal Water Cleanser"]),
    step("Soother", &["Aloe Vera Gel", "Centella Asiatica Cream"]),
    step("Moisturizer", &["Ceramide Moisturizer", "Cicaplast Baume"]),
    step("Treatment", &["Barrier Support Serum", "Redness Relief Essence"]),
    step("Sunscreen", &["Mineral Zinc Oxide Sunscreen", "Physical Sunscreen"]),
];

/// Ordered routine steps for a skin type
pub fn routine_for(skin_type: SkinType) -> &'static [RoutineStep] {
    match skin_type {
        SkinType::Normal => &NORMAL,
        SkinType::Dry => &DRY,
        SkinType::Oily => &OILY,
        SkinType::Combination => &COMBINATION,
        SkinType::Sensitive => &SENSITIVE,
    }
}

/// Routine lookup by name. Unrecognized skin types get no steps.
pub fn plan_routine(skin_type: &str) -> Vec<RoutineStep> {
    match SkinType::parse(skin_type) {
        Some(known) => routine_for(known).to_vec(),
        None => {
            tracing::debug!(skin_type = %skin_type, "Unrecognized skin type, empty routine");
            Vec::new()
        }
    }
}
