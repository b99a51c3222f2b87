pub const MAX_TAGS: usize = 5;

const DERIVED_TAGS: &[(&str, &[&str])] = &[
    ("aggressive", &["intense", "powerful"]),
    ("fun", &["upbeat", "joyful"]),
    ("energetic", &["high-energy", "dynamic"]),
    ("sexy", &["sensual", "romantic"]),
];

/// Seeds first (in their original order), then tags derived from trigger
/// seeds, capped at [`MAX_TAGS`].
pub fn generate_tags(seeds: &[String]) -> Vec<String> {
    let mut tags: Vec<String> = seeds.iter().take(MAX_TAGS).cloned().collect();

    for (trigger, derived) in DERIVED_TAGS {
        if !seeds.iter().any(|seed| seed.trim().eq_ignore_ascii_case(trigger)) {
            continue;
        }
        for tag in derived.iter() {
            if !tags.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
                tags.push((*tag).to_owned());
            }
        }
    }

    tags.truncate(MAX_TAGS);
    tags
}
