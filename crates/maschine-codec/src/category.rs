//! Category flattening for the NISound record.
//!
//! Modes become `\.<mode>`; type paths become `\:<seg>` joined per prefix
//! depth. All depth-1 prefixes are emitted before any depth-2 prefix, and all
//! depth-2 before depth-3, which is the order the sampler's taxonomy browser
//! expects. Duplicates are dropped, keeping the first occurrence.

use std::collections::HashSet;

use maschine_meta::{CategoryPath, MAX_CATEGORY_DEPTH};

/// Escape prefix for modes.
pub const MODE_PREFIX: &str = "\\.";

/// Escape prefix for each type segment.
pub const TYPE_PREFIX: &str = "\\:";

/// Flattens modes and type paths into deduplicated escaped path strings.
///
/// # Example
/// ```
/// use maschine_codec::category::flatten_categories;
/// use maschine_meta::CategoryPath;
///
/// let types = vec![CategoryPath::new(["Bass", "Synth Bass"]).unwrap()];
/// let flat = flatten_categories(&["Additive"], &types);
/// assert_eq!(flat, vec!["\\.Additive", "\\:Bass", "\\:Bass\\:Synth Bass"]);
/// ```
pub fn flatten_categories<S: AsRef<str>>(modes: &[S], types: &[CategoryPath]) -> Vec<String> {
    let modes = modes
        .iter()
        .map(|mode| format!("{}{}", MODE_PREFIX, mode.as_ref()));

    let prefixes = (1..=MAX_CATEGORY_DEPTH).flat_map(move |depth| {
        types
            .iter()
            .filter_map(move |path| path.prefix(depth))
            .map(type_path)
    });

    let mut seen = HashSet::new();
    modes
        .chain(prefixes)
        .filter(|entry| seen.insert(entry.clone()))
        .collect()
}

fn type_path(segments: &[String]) -> String {
    segments
        .iter()
        .map(|segment| format!("{}{}", TYPE_PREFIX, segment))
        .collect()
}
