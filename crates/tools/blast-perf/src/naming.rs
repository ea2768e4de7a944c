//! Derivation of baseline file names for run-to-run comparison.

/// Segment inserted before the extension of a baseline file.
pub const REFERENCE_MARKER: &str = ".ref";

/// Name of the stored previous run paired with `name`.
///
/// `.ref` goes in front of the extension of the last path component
/// (`dgemm-blast.json` becomes `dgemm-blast.ref.json`). A name without an
/// extension gets the marker appended. Leading dots of the file name do not
/// start an extension, so `.json` becomes `.json.ref`.
pub fn reference_name(name: &str) -> String {
    let file_start = name
        .rfind(|c: char| c == '/' || c == std::path::MAIN_SEPARATOR)
        .map_or(0, |i| i + 1);
    let file = &name[file_start..];
    let stem_start = file_start + (file.len() - file.trim_start_matches('.').len());

    match name[stem_start..].rfind('.') {
        Some(dot) => {
            let (base, ext) = name.split_at(stem_start + dot);
            format!("{base}{REFERENCE_MARKER}{ext}")
        }
        None => format!("{name}{REFERENCE_MARKER}"),
    }
}
