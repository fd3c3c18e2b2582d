//! Mapping between route labels, upstream asset codes and display labels

/// Map a route/tab label to the upstream `asset` code.
///
/// Unrecognised labels pass through unchanged so that callers may already
/// supply an upstream code.
pub fn normalize_asset_type(label: &str) -> &str {
    match label {
        "icons" => "icon",
        "3d-illustrations" => "3d",
        "lottie-animations" => "lottie",
        "illustrations" => "illustration",
        "all-assets" => "icon",
        other => other,
    }
}

/// Human readable form of a kebab-case route label.
pub fn humanize_asset_type(label: &str) -> String {
    match label {
        "3d-illustrations" => "3D Illustrations".to_string(),
        "lottie-animations" => "Lottie Animations".to_string(),
        _ => capitalize_words(&label.replace('-', " ")),
    }
}

/// Human readable label for an upstream asset code.
pub fn label_for_code(code: &str) -> String {
    match code {
        "icon" => "Icons".to_string(),
        "illustration" => "Illustrations".to_string(),
        "3d" => "3D Illustrations".to_string(),
        "lottie" => "Lottie Animations".to_string(),
        other => humanize_asset_type(other),
    }
}

/// Capitalise the first letter of every space separated word.
pub fn capitalize_words(text: &str) -> String {
    text.split(' ').map(capitalize).collect::<Vec<_>>().join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
