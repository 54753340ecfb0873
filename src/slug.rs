// 🔤 Slug decoding
//
// A slug is a path whose segments are joined by `_`. A literal underscore
// inside a segment is written as `___` when it stands between two segments'
// worth of separators, so decoding is a two-pass transform:
//   1. every `_` becomes a separator
//   2. each run of three separators gets its middle one restored to `_`
// and the result is split on the remaining separators.

const SEP: char = '|';
const TRIPLE: &str = "|||";
const RESTORED: &str = "|_|";

/// Decode a slug into its path segments
///
/// ```
/// use content_overlay::slug::split_slug;
/// assert_eq!(split_slug("safety_wifi_easy"), vec!["safety", "wifi", "easy"]);
/// assert_eq!(split_slug("a___b"), vec!["a", "_", "b"]);
/// ```
pub fn split_slug(s: &str) -> Vec<String> {
    let marked = s.replace('_', &SEP.to_string());
    let restored = marked.replace(TRIPLE, RESTORED);
    restored.split(SEP).map(str::to_string).collect()
}

/// Encode path segments as a slug
///
/// Segments are joined by `_` and an underscore inside a segment is written
/// as `___`, so `home_network` becomes `home___network`. Decoding that gives
/// `["home", "_", "network"]`: compare slugs by their decoded form
/// (`slug_key`), not against the raw path.
pub fn join_slug<S: AsRef<str>>(segments: &[S]) -> String {
    segments
        .iter()
        .map(|s| s.as_ref().replace('_', "___"))
        .collect::<Vec<_>>()
        .join("_")
}

/// Decoded form of a node path, comparable with `split_slug` of its slug
pub fn slug_key<S: AsRef<str>>(segments: &[S]) -> Vec<String> {
    split_slug(&join_slug(segments))
}
