//! Static recommendations served when every model attempt fails. Keyed only
//! by a binary gender split, mirroring what the product shipped.

use super::dto::{ColorRecommendation, GarmentLists, StyleRecommendation};

fn colors(entries: &[(&str, &str)]) -> Vec<ColorRecommendation> {
    entries
        .iter()
        .map(|(name, hex)| ColorRecommendation {
            name: (*name).into(),
            hex: (*hex).into(),
        })
        .collect()
}

fn strings(entries: &[&str]) -> Vec<String> {
    entries.iter().map(|s| (*s).into()).collect()
}

pub fn fallback_recommendation(gender: &str) -> StyleRecommendation {
    tracing::info!(gender, "using fallback recommendation");

    if gender.eq_ignore_ascii_case("female") {
        StyleRecommendation {
            body_type: "Balanced".into(),
            recommendations: GarmentLists {
                tops: strings(&[
                    "V-neck blouses that elongate the neckline",
                    "Wrap tops that accentuate the waistline",
                    "Fitted button-up shirts with defined waistlines",
                    "Boat-neck tops that highlight collarbones",
                    "Peplum tops that create curves",
                ]),
                bottoms: strings(&[
                    "High-waisted straight-leg jeans",
                    "A-line skirts that hit just above the knee",
                    "Tailored trousers with a slight flare",
                    "Pencil skirts that follow your curves",
                    "Wide-leg pants with a structured waist",
                ]),
                dresses: Some(strings(&[
                    "Wrap dresses that highlight your waistline",
                    "A-line dresses with defined waists",
                    "Fit-and-flare styles for a classic silhouette",
                    "Sheath dresses for a sleek, professional look",
                    "V-neck maxi dresses for elegant occasions",
                ])),
                accessories: strings(&[
                    "Statement belts to highlight the waist",
                    "Delicate necklaces that draw attention to your neckline",
                    "Stud or drop earrings to frame your face",
                    "Structured handbags that complement your proportions",
                    "Scarves that add color and dimension to outfits",
                ]),
            },
            color_recommendations: Some(colors(&[
                ("Navy blue", "#000080"),
                ("Burgundy", "#800020"),
                ("Emerald green", "#50C878"),
                ("Soft blush pink", "#F4C2C2"),
                ("Classic black", "#000000"),
            ])),
            error: None,
        }
    } else {
        StyleRecommendation {
            body_type: "Athletic".into(),
            recommendations: GarmentLists {
                tops: strings(&[
                    "Fitted crew-neck t-shirts in solid colors",
                    "Button-up shirts with a tailored fit",
                    "V-neck sweaters for casual occasions",
                    "Structured blazers for formal settings",
                    "Polo shirts with a slight taper",
                ]),
                bottoms: strings(&[
                    "Straight-leg or slim-fit jeans in dark wash",
                    "Tailored chinos in neutral colors",
                    "Fitted dress pants for professional settings",
                    "Athletic-fit trousers with a slight stretch",
                    "Shorts that hit just above the knee",
                ]),
                dresses: None,
                accessories: strings(&[
                    "Leather belt with a simple buckle",
                    "Classic watch with a leather or metal band",
                    "Subtle tie clips for formal occasions",
                    "High-quality sunglasses that fit your face shape",
                    "Minimal leather wallet or cardholder",
                ]),
            },
            color_recommendations: Some(colors(&[
                ("Navy blue", "#000080"),
                ("Charcoal gray", "#36454F"),
                ("Olive green", "#808000"),
                ("Burgundy", "#800020"),
                ("Crisp white", "#FFFFFF"),
            ])),
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn female_fallback_has_five_of_everything_including_dresses() {
        let rec = fallback_recommendation("Female");
        assert_eq!(rec.body_type, "Balanced");
        assert_eq!(rec.recommendations.tops.len(), 5);
        assert_eq!(rec.recommendations.bottoms.len(), 5);
        assert_eq!(rec.recommendations.dresses.as_ref().unwrap().len(), 5);
        assert_eq!(rec.recommendations.accessories.len(), 5);
        assert_eq!(rec.color_recommendations.as_ref().unwrap().len(), 5);
        assert!(rec.error.is_none());
    }

    #[test]
    fn male_fallback_has_no_dresses() {
        let rec = fallback_recommendation("male");
        assert_eq!(rec.body_type, "Athletic");
        assert!(rec.recommendations.dresses.is_none());
        assert_eq!(rec.recommendations.tops.len(), 5);
        assert_eq!(rec.color_recommendations.as_ref().unwrap().len(), 5);
    }

    #[test]
    fn unknown_gender_takes_male_branch() {
        let rec = fallback_recommendation("nonbinary");
        assert_eq!(rec.body_type, "Athletic");
    }

    #[test]
    fn fallback_hex_codes_are_well_formed() {
        for gender in ["female", "male"] {
            let rec = fallback_recommendation(gender);
            for c in rec.color_recommendations.unwrap() {
                assert!(c.hex.starts_with('#'), "{} has bad hex {}", c.name, c.hex);
                assert_eq!(c.hex.len(), 7);
            }
        }
    }
}
