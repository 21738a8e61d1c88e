//! `/`-separated URL path helpers. These never consult the host's path rules,
//! so results are identical on every platform.

/// Normalise to a rooted, `/`-separated path with `.`, `..` and `//` resolved.
///
/// `static\css\app.css` becomes `/static/css/app.css`; `..` never climbs
/// above the root.
pub fn clean(path: &str) -> String {
    let slashed = path.replace('\\', "/");
    let mut parts: Vec<&str> = Vec::new();
    for part in slashed.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            other => parts.push(other),
        }
    }
    format!("/{}", parts.join("/"))
}

/// Everything before the last `/`, or `/` for top-level paths.
pub fn dir(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) | None => "/",
        Some(i) => &path[..i],
    }
}

/// Join a directory and a single filename with exactly one `/`.
pub fn join(dir: &str, name: &str) -> String {
    format!("{}/{}", dir.trim_end_matches('/'), name)
}
