/// Characters that cannot appear in a file name on common filesystems
const RESERVED: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Turn free text into a single path component by replacing separators,
/// reserved and control characters with `_`.
///
/// A name made only of dots would still address a directory, so it is replaced too.
pub fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_control() || RESERVED.contains(&c) {
                '_'
            } else {
                c
            }
        })
        .collect();

    if cleaned.is_empty() || cleaned.chars().all(|c| c == '.') {
        return "_".repeat(cleaned.len().max(1));
    }
    cleaned
}
